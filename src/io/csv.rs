//! Reload embeddings and index lists from csv files, dump distance matrices in csv.
//!
//! Embedding files have one record per node, in node rank order, each record being the comma separated
//! coordinates of the embedded vector. Lines beginning with # are skipped.


use anyhow::anyhow;

use std::fs::OpenOptions;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, Trim, WriterBuilder};
use ndarray::Array2;
use num_traits::float::Float;

use crate::embedding::EmbeddingSet;
use crate::pipeline::DistanceMatrix;


// open a csv reader without header, skipping comments
fn open_csv(filepath: &Path) -> anyhow::Result<csv::Reader<BufReader<std::fs::File>>> {
    let fileres = OpenOptions::new().read(true).open(filepath);
    if fileres.is_err() {
        log::error!("open_csv : could not open file {:?}", filepath.as_os_str());
        return Err(anyhow!("could not open file {}", filepath.display()));
    }
    let bufreader = BufReader::new(fileres?);
    let rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .from_reader(bufreader);
    Ok(rdr)
}


/// reload the embedded vectors of a graph, record i giving the vector of node i
pub fn read_embedding<F>(filepath: &Path) -> anyhow::Result<EmbeddingSet<F>>
where
    F: Float + FromStr,
{
    let mut rdr = open_csv(filepath)?;
    let mut rows = Vec::<Vec<F>>::new();
    for (nb_record, result) in rdr.records().enumerate() {
        let record = result?;
        let mut row = Vec::<F>::with_capacity(record.len());
        for (k, field) in record.iter().enumerate() {
            match field.parse::<F>() {
                Ok(value) => row.push(value),
                Err(_) => {
                    return Err(anyhow!("{} : error decoding field {} of record {} : {:?}", filepath.display(), k + 1, nb_record + 1, field));
                }
            }
        }
        rows.push(row);
    }
    log::debug!("read_embedding {:?} : nb vectors {}", filepath.as_os_str(), rows.len());
    let embedding = EmbeddingSet::from_rows(rows).map_err(|e| anyhow!("{} : {}", filepath.display(), e))?;
    Ok(embedding)
} // end of read_embedding


/// reload a list of graph indexes, first field of each record
pub fn read_indices(filepath: &Path) -> anyhow::Result<Vec<usize>> {
    let mut rdr = open_csv(filepath)?;
    let mut indices = Vec::<usize>::new();
    for (nb_record, result) in rdr.records().enumerate() {
        let record = result?;
        let field = record.get(0).ok_or_else(|| anyhow!("empty record {}", nb_record + 1))?;
        if let Ok(idx) = field.parse::<usize>() {
            indices.push(idx);
        } else {
            return Err(anyhow!("{} : error decoding field 1 of record {}", filepath.display(), nb_record + 1));
        }
    }
    Ok(indices)
} // end of read_indices


/// dumps a distance matrix, one record per row
pub fn dump_matrix(matrix: &DistanceMatrix, filepath: &Path) -> anyhow::Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_path(filepath)?;
    for row in matrix.rows() {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    log::info!("dump_matrix : dumped matrix of shape {:?} in {:?}", matrix.dim(), filepath.as_os_str());
    Ok(())
} // end of dump_matrix


/// reload a matrix dumped by [dump_matrix]
pub fn read_matrix(filepath: &Path) -> anyhow::Result<DistanceMatrix> {
    let mut rdr = open_csv(filepath)?;
    let mut values = Vec::<i64>::new();
    let mut nb_rows = 0;
    let mut nb_cols: Option<usize> = None;
    for result in rdr.records() {
        let record = result?;
        match nb_cols {
            None => nb_cols = Some(record.len()),
            Some(n) if n != record.len() => {
                return Err(anyhow!("record {} has {} fields, expected {}", nb_rows + 1, record.len(), n));
            }
            _ => {}
        }
        for field in record.iter() {
            values.push(field.parse::<i64>()?);
        }
        nb_rows += 1;
    }
    let matrix = Array2::from_shape_vec((nb_rows, nb_cols.unwrap_or(0)), values)?;
    Ok(matrix)
} // end of read_matrix


//========================================================================================

// end of mod tests
