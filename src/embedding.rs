//! Describes the node embeddings attached to a graph.
//!
//! The embedded vectors of a graph are stored in an Array2\<F\>, each row corresponding to a node.
//! The row of a node is its rank in the graph so embedding and graph are index-aligned.
//!
//! F can be f32 or f64, the embeddings being typically produced by a graph neural network and reloaded from disk.
//! All distances are computed in f64.
//!
//! The embeddings are read only once loaded and can be shared between threads.


use ndarray::{Array2, ArrayView1};
use num_traits::float::Float;

use crate::errors::GedError;
use crate::tools::distance::euclidean_distance;


/// to represent the distance in embedded space between 2 vectors
pub type Distance<F> = fn(&ArrayView1<F>, &ArrayView1<F>) -> f64;


/// The embedded vectors of the nodes of one graph.
pub struct EmbeddingSet<F> {
    /// array (n,d) with n number of nodes, d dimension of embedding
    data: Array2<F>,
    /// distance between vectors in embedded space
    distance: Distance<F>,
} // end of EmbeddingSet


impl<F> EmbeddingSet<F>
where
    F: Float,
{
    /// an embedding set from an array, row i being the vector of node i. Distance is euclidean.
    pub fn new(data: Array2<F>) -> Self {
        EmbeddingSet { data, distance: euclidean_distance::<F> }
    }

    /// same as new but with a user given distance
    pub fn with_distance(data: Array2<F>, distance: Distance<F>) -> Self {
        EmbeddingSet { data, distance }
    }

    /// Builds the set from a list of vectors. All vectors must have the same length.
    /// An empty list gives a set of 0 vectors of dimension 0.
    pub fn from_rows(rows: Vec<Vec<F>>) -> Result<Self, GedError> {
        let nb_rows = rows.len();
        let dim = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut flat = Vec::<F>::with_capacity(nb_rows * dim);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != dim {
                log::error!("EmbeddingSet::from_rows row {} has length {}, expected {}", i, row.len(), dim);
                return Err(GedError::DimensionMismatch { expected: dim, got: row.len() });
            }
            flat.extend(row);
        }
        let data = Array2::from_shape_vec((nb_rows, dim), flat).map_err(|_| GedError::ShapeMismatch {
            context: "embedding rows",
            expected: (nb_rows, dim),
            got: (nb_rows, dim),
        })?;
        Ok(EmbeddingSet::new(data))
    } // end of from_rows

    /// get dimension of vectors (row size of array)
    pub fn get_dimension(&self) -> usize {
        self.data.dim().1
    }

    /// number of embedded nodes
    pub fn get_nb_nodes(&self) -> usize {
        self.data.dim().0
    }

    pub fn is_empty(&self) -> bool {
        self.get_nb_nodes() == 0
    }

    /// get embedding of node of rank node_rank
    pub fn get_embedded_node(&self, node_rank: usize) -> ArrayView1<'_, F> {
        self.data.row(node_rank)
    }

    /// get the whole array
    pub fn get_embedded(&self) -> &Array2<F> {
        &self.data
    }

    /// get distance function
    pub fn get_distance(&self) -> Distance<F> {
        self.distance
    }

    /// distance in embedded space between node of rank node1 in self and node of rank node2 in other
    pub fn get_cross_distance(&self, node1: usize, other: &EmbeddingSet<F>, node2: usize) -> f64 {
        (self.distance)(&self.data.row(node1), &other.data.row(node2))
    }
} // end of impl EmbeddingSet


//========================================================================================

#[cfg(test)]
mod tests {

    use super::*;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_from_rows() {
        log_init_test();
        //
        let set = EmbeddingSet::<f32>::from_rows(vec![vec![1., 2.], vec![3., 4.], vec![5., 6.]]).unwrap();
        assert_eq!(set.get_nb_nodes(), 3);
        assert_eq!(set.get_dimension(), 2);
        assert_eq!(set.get_embedded_node(1)[1], 4.);
        let other = EmbeddingSet::<f32>::from_rows(vec![vec![1., 2.]]).unwrap();
        assert_eq!(set.get_cross_distance(0, &other, 0), 0.);
    }

    #[test]
    fn test_ragged_rows() {
        log_init_test();
        //
        let res = EmbeddingSet::<f64>::from_rows(vec![vec![1., 2.], vec![3.]]);
        assert_eq!(res.err(), Some(GedError::DimensionMismatch { expected: 2, got: 1 }));
    }

    #[test]
    fn test_empty_rows() {
        let set = EmbeddingSet::<f64>::from_rows(Vec::new()).unwrap();
        assert!(set.is_empty());
    }
} // end of mod tests
