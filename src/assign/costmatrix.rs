//! The cost matrix between the nodes of a source graph and the nodes of a target graph.
//!
//! cost\[\[i,j\]\] is the distance in embedded space between node i of source and node j of target.
//! Each cell depends only on the two embedded vectors it is computed from, so the fill is done
//! in parallel with ndarray's rayon support when asked for.


use ndarray::{Array2, Zip};
use num_traits::float::Float;

use crate::embedding::EmbeddingSet;
use crate::errors::GedError;


/// A dense matrix of non negative finite costs, rows are source nodes, columns target nodes.
#[derive(Clone, Debug)]
pub struct CostMatrix {
    data: Array2<f64>,
} // end of CostMatrix


impl CostMatrix {
    /// checks that all costs are finite and non negative.
    pub fn from_array(data: Array2<f64>) -> Result<Self, GedError> {
        if let Some(((row, col), value)) = data.indexed_iter().find(|(_, v)| !(v.is_finite() && **v >= 0.)) {
            return Err(GedError::InvalidCost { row, col, value: *value });
        }
        Ok(CostMatrix { data })
    }

    /// number of source nodes
    pub fn get_nb_rows(&self) -> usize {
        self.data.nrows()
    }

    /// number of target nodes
    pub fn get_nb_cols(&self) -> usize {
        self.data.ncols()
    }

    /// (nb_rows, nb_cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// cost of assigning source node row to target node col. Panics if out of range.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[[row, col]]
    }

    /// None if out of range
    pub fn try_get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }

    /// largest cost in matrix, 0. for an empty matrix
    pub fn get_max_cost(&self) -> f64 {
        self.data.iter().fold(0f64, |acc, c| acc.max(*c))
    }

    pub fn get_array(&self) -> &Array2<f64> {
        &self.data
    }
} // end of impl CostMatrix



/// Computes the cost matrix between source and target embedded nodes.
///
/// - returns EmptyInput if one of the sets is empty,
/// - returns DimensionMismatch if the two sets do not share the same dimension,
/// - returns InvalidCost if a distance is not finite (which happens with non finite embedded values).
pub fn build_cost_matrix<F>(source: &EmbeddingSet<F>, target: &EmbeddingSet<F>, parallel: bool) -> Result<CostMatrix, GedError>
where
    F: Float + Send + Sync,
{
    if source.is_empty() {
        return Err(GedError::EmptyInput("source embedding"));
    }
    if target.is_empty() {
        return Err(GedError::EmptyInput("target embedding"));
    }
    if source.get_dimension() != target.get_dimension() {
        log::error!("build_cost_matrix source dim {} target dim {}", source.get_dimension(), target.get_dimension());
        return Err(GedError::DimensionMismatch {
            expected: source.get_dimension(),
            got: target.get_dimension(),
        });
    }
    //
    let (nb_rows, nb_cols) = (source.get_nb_nodes(), target.get_nb_nodes());
    let mut data = Array2::<f64>::zeros((nb_rows, nb_cols));
    let fill = |(i, j): (usize, usize), cost: &mut f64| {
        *cost = source.get_cross_distance(i, target, j);
    };
    if parallel {
        Zip::indexed(&mut data).par_for_each(fill);
    } else {
        Zip::indexed(&mut data).for_each(fill);
    }
    log::trace!("build_cost_matrix done, shape ({}, {})", nb_rows, nb_cols);
    //
    CostMatrix::from_array(data)
} // end of build_cost_matrix



//========================================================================================

#[cfg(test)]
mod tests {

    use super::*;
    use ndarray::array;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_cost_matrix_cells() {
        log_init_test();
        //
        let source = EmbeddingSet::<f32>::from_rows(vec![vec![1., 2.], vec![3., 4.], vec![5., 6.]]).unwrap();
        let target = EmbeddingSet::<f32>::from_rows(vec![vec![1.1, 2.1], vec![3.1, 4.1], vec![5.1, 6.1], vec![0., 0.]]).unwrap();
        let costs = build_cost_matrix(&source, &target, true).unwrap();
        assert_eq!(costs.shape(), (3, 4));
        for i in 0..3 {
            for j in 0..4 {
                let expected = source.get_cross_distance(i, &target, j);
                assert_eq!(costs.get(i, j), expected);
                assert!(costs.get(i, j) >= 0.);
            }
        }
        assert!((costs.get(2, 3) - 61f64.sqrt()).abs() < 1.0E-5);
        assert_eq!(costs.try_get(3, 0), None);
    } // end of test_cost_matrix_cells

    // a cell depends only on its two vectors: changing another target vector leaves it unchanged
    #[test]
    fn test_cells_independent() {
        log_init_test();
        //
        let source = EmbeddingSet::<f64>::from_rows(vec![vec![0., 1.], vec![2., -1.]]).unwrap();
        let target1 = EmbeddingSet::<f64>::from_rows(vec![vec![1., 1.], vec![4., 4.]]).unwrap();
        let target2 = EmbeddingSet::<f64>::from_rows(vec![vec![1., 1.], vec![-7., 0.5]]).unwrap();
        let c1 = build_cost_matrix(&source, &target1, false).unwrap();
        let c2 = build_cost_matrix(&source, &target2, true).unwrap();
        assert_eq!(c1.get(0, 0), c2.get(0, 0));
        assert_eq!(c1.get(1, 0), c2.get(1, 0));
        assert_ne!(c1.get(0, 1), c2.get(0, 1));
    }

    #[test]
    fn test_cost_matrix_errors() {
        log_init_test();
        //
        let source = EmbeddingSet::<f64>::from_rows(vec![vec![0., 1.]]).unwrap();
        let target = EmbeddingSet::<f64>::from_rows(vec![vec![1., 1., 1.]]).unwrap();
        let empty = EmbeddingSet::<f64>::from_rows(Vec::new()).unwrap();
        assert_eq!(
            build_cost_matrix(&source, &target, true).err(),
            Some(GedError::DimensionMismatch { expected: 2, got: 3 })
        );
        assert!(matches!(build_cost_matrix(&empty, &target, true), Err(GedError::EmptyInput(_))));
        assert!(matches!(build_cost_matrix(&source, &empty, false), Err(GedError::EmptyInput(_))));
        let nan = EmbeddingSet::<f64>::from_rows(vec![vec![f64::NAN, 1.]]).unwrap();
        assert!(matches!(build_cost_matrix(&source, &nan, false), Err(GedError::InvalidCost { row: 0, col: 0, .. })));
    }

    #[test]
    fn test_from_array_rejects_negative() {
        let res = CostMatrix::from_array(array![[0., 1.], [-1., 2.]]);
        assert!(matches!(res, Err(GedError::InvalidCost { row: 1, col: 0, .. })));
        let costs = CostMatrix::from_array(array![[0., 1.5], [3., 2.]]).unwrap();
        assert_eq!(costs.get_max_cost(), 3.);
    }
} // end of mod tests
