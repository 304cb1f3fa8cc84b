//! Load a collection of graphs and their embeddings from directories.
//!
//! Graphs are stored as `graph_<k>.graphml` and embeddings as `embedding_<k>.csv`, `<k>` being the graph index.
//! Files are sorted by `<k>` numerically, files whose `<k>` is not an integer come after in lexicographic order.
//! The graph of rank k in the collection is associated to the embedding of rank k.

use anyhow::anyhow;

use std::path::{Path, PathBuf};

use num_traits::float::Float;
use rayon::prelude::*;
use std::str::FromStr;

use crate::embedding::EmbeddingSet;
use crate::graph::{AttributedGraph, LabelledGraphT};

use super::csv::read_embedding;
use super::graphml::read_graphml;

pub const GRAPH_PREFIX: &str = "graph_";
pub const GRAPH_SUFFIX: &str = ".graphml";
pub const EMBEDDING_PREFIX: &str = "embedding_";
pub const EMBEDDING_SUFFIX: &str = ".csv";


/// files of dir whose name is prefix<k>suffix, sorted by k
pub fn list_numbered_files(dir: &Path, prefix: &str, suffix: &str) -> anyhow::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        log::error!("list_numbered_files : {:?} is not a directory", dir.as_os_str());
        return Err(anyhow!("{} is not a directory", dir.display()));
    }
    // (numeric key, name key, path)
    let mut files = Vec::<(Option<u64>, String, PathBuf)>::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        if let Some(key) = name.strip_prefix(prefix).and_then(|n| n.strip_suffix(suffix)) {
            let key = key.to_string();
            files.push((key.parse::<u64>().ok(), key, path));
        }
    }
    // Some(_) < None with this mapping so numbered files come first
    files.sort_by(|a, b| (a.0.is_none(), a.0, &a.1).cmp(&(b.0.is_none(), b.0, &b.1)));
    log::debug!("list_numbered_files : found {} files {}*{} in {:?}", files.len(), prefix, suffix, dir.as_os_str());
    Ok(files.into_iter().map(|f| f.2).collect())
} // end of list_numbered_files


/// Loads graphs and embeddings. Each graph must have as many nodes as its embedding has vectors.
pub fn load_dataset<F>(graph_dir: &Path, embedding_dir: &Path) -> anyhow::Result<(Vec<AttributedGraph>, Vec<EmbeddingSet<F>>)>
where
    F: Float + FromStr + Send + Sync,
{
    let graph_files = list_numbered_files(graph_dir, GRAPH_PREFIX, GRAPH_SUFFIX)?;
    let embedding_files = list_numbered_files(embedding_dir, EMBEDDING_PREFIX, EMBEDDING_SUFFIX)?;
    if graph_files.len() != embedding_files.len() {
        return Err(anyhow!("found {} graphs and {} embeddings", graph_files.len(), embedding_files.len()));
    }
    log::info!("load_dataset : loading {} graphs and embeddings", graph_files.len());
    //
    let graphs = graph_files.par_iter().map(|path| read_graphml(path)).collect::<anyhow::Result<Vec<AttributedGraph>>>()?;
    let embeddings = embedding_files.par_iter().map(|path| read_embedding::<F>(path)).collect::<anyhow::Result<Vec<EmbeddingSet<F>>>>()?;
    //
    for (k, (graph, embedding)) in graphs.iter().zip(embeddings.iter()).enumerate() {
        if graph.get_nb_nodes() != embedding.get_nb_nodes() {
            return Err(anyhow!(
                "graph {} has {} nodes but its embedding {} has {} vectors",
                graph_files[k].display(),
                graph.get_nb_nodes(),
                embedding_files[k].display(),
                embedding.get_nb_nodes()
            ));
        }
    }
    Ok((graphs, embeddings))
} // end of load_dataset


//========================================================================================

#[cfg(test)]
mod tests {

    use super::*;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn graphml(labels: &[&str], edges: &[(usize, usize)]) -> String {
        let mut xml = String::from("<graphml><key id=\"d0\" for=\"node\" attr.name=\"attr\"/><graph edgedefault=\"undirected\">\n");
        for (i, label) in labels.iter().enumerate() {
            xml.push_str(&format!("<node id=\"n{}\"><data key=\"d0\">{}</data></node>\n", i, label));
        }
        for (a, b) in edges {
            xml.push_str(&format!("<edge source=\"n{}\" target=\"n{}\"/>\n", a, b));
        }
        xml.push_str("</graph></graphml>\n");
        xml
    }

    #[test]
    fn test_list_numbered_files() {
        log_init_test();
        //
        let dir = tempfile::tempdir().unwrap();
        for name in ["graph_10.graphml", "graph_2.graphml", "graph_b.graphml", "graph_a.graphml", "graph_0.graphml", "other.graphml", "graph_3.csv"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        let files = list_numbered_files(dir.path(), GRAPH_PREFIX, GRAPH_SUFFIX).unwrap();
        let names: Vec<String> = files.iter().map(|p| p.file_name().unwrap().to_str().unwrap().to_string()).collect();
        assert_eq!(names, vec!["graph_0.graphml", "graph_2.graphml", "graph_10.graphml", "graph_a.graphml", "graph_b.graphml"]);
        assert!(list_numbered_files(&dir.path().join("graph_0.graphml"), GRAPH_PREFIX, GRAPH_SUFFIX).is_err());
    }

    #[test]
    fn test_load_dataset() {
        log_init_test();
        //
        let graph_dir = tempfile::tempdir().unwrap();
        let embedding_dir = tempfile::tempdir().unwrap();
        std::fs::write(graph_dir.path().join("graph_0.graphml"), graphml(&["A", "B"], &[(0, 1)])).unwrap();
        std::fs::write(graph_dir.path().join("graph_1.graphml"), graphml(&["A", "B", "C"], &[])).unwrap();
        std::fs::write(embedding_dir.path().join("embedding_0.csv"), "0,0\n1,1\n").unwrap();
        std::fs::write(embedding_dir.path().join("embedding_1.csv"), "0,0\n1,1\n2,2\n").unwrap();
        //
        let (graphs, embeddings) = load_dataset::<f64>(graph_dir.path(), embedding_dir.path()).unwrap();
        assert_eq!(graphs.len(), 2);
        assert_eq!(graphs[1].get_nb_nodes(), 3);
        assert_eq!(embeddings[0].get_nb_nodes(), 2);
        // node count and vector count must agree
        std::fs::write(embedding_dir.path().join("embedding_1.csv"), "0,0\n").unwrap();
        assert!(load_dataset::<f64>(graph_dir.path(), embedding_dir.path()).is_err());
        // missing embedding
        std::fs::remove_file(embedding_dir.path().join("embedding_1.csv")).unwrap();
        assert!(load_dataset::<f64>(graph_dir.path(), embedding_dir.path()).is_err());
    }
} // end of mod tests
