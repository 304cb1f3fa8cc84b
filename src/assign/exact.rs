//! Optimal assignment with the Hungarian algorithm.
//!
//! The rectangular nb_source x nb_target matrix is padded to a square matrix of size
//! nb_target with rows costing a constant larger than any total cost reachable with real cells,
//! so a padding cell is never preferred to a genuine assignment.
//! We then solve the square problem by successive shortest augmenting paths with dual potentials
//! (Kuhn-Munkres in its O(size³) form) and read back the real rows.
//!
//! The algorithm is deterministic: among columns reaching the same reduced cost the smallest index is chosen.


use ndarray::Array2;

use super::{AssignmentSolverT, CostMatrix, NodeAssignment};
use crate::errors::GedError;


/// Optimal (minimal total cost) assignment.
#[derive(Copy, Clone, Debug, Default)]
pub struct ExactAssignment;


impl AssignmentSolverT for ExactAssignment {
    fn get_name(&self) -> &'static str {
        "exact"
    }

    fn solve_checked(&self, costs: &CostMatrix) -> Result<NodeAssignment, GedError> {
        let (nb_source, nb_target) = costs.shape();
        let square = pad_to_square(costs);
        let row_to_col = hungarian(&square).ok_or(GedError::InfeasibleAssignment { nb_source, nb_target })?;
        // only real rows are kept
        let mapping = row_to_col[..nb_source].to_vec();
        NodeAssignment::new(mapping, nb_target)
    }
} // end of impl AssignmentSolverT for ExactAssignment


/// constant cost of padding cells : strictly more than any sum of size real cells
pub(crate) fn padding_cost(costs: &CostMatrix) -> f64 {
    let size = costs.get_nb_rows().max(costs.get_nb_cols());
    costs.get_max_cost() * size as f64 + 1.
}


// square matrix of size max(nb_rows, nb_cols) with real cells in the upper left corner
fn pad_to_square(costs: &CostMatrix) -> Array2<f64> {
    let (nb_rows, nb_cols) = costs.shape();
    let size = nb_rows.max(nb_cols);
    let pad = padding_cost(costs);
    log::trace!("pad_to_square ({}, {}) -> {}, padding cost {:.3e}", nb_rows, nb_cols, size, pad);
    let mut square = Array2::<f64>::from_elem((size, size), pad);
    square.slice_mut(ndarray::s![..nb_rows, ..nb_cols]).assign(costs.get_array());
    square
} // end of pad_to_square


/// Minimal cost perfect matching on a square matrix.
/// Returns for each row the column assigned to it, None if the matrix is not square
/// or the resolution could not progress (which requires non finite costs).
pub(crate) fn hungarian(square: &Array2<f64>) -> Option<Vec<usize>> {
    let (size, nb_cols) = square.dim();
    if size != nb_cols {
        return None;
    }
    if size == 0 {
        return Some(Vec::new());
    }
    // 1-based indexation, index 0 of columns is a virtual column used as root of augmenting paths
    let mut u = vec![0f64; size + 1];
    let mut v = vec![0f64; size + 1];
    // row_of_col[j] row matched with column j, 0 if none
    let mut row_of_col = vec![0usize; size + 1];
    let mut way = vec![0usize; size + 1];
    //
    for i in 1..=size {
        row_of_col[0] = i;
        let mut j0 = 0usize;
        let mut minv = vec![f64::INFINITY; size + 1];
        let mut used = vec![false; size + 1];
        loop {
            used[j0] = true;
            let i0 = row_of_col[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0usize;
            for j in 1..=size {
                if used[j] {
                    continue;
                }
                let reduced = square[[i0 - 1, j - 1]] - u[i0] - v[j];
                if reduced < minv[j] {
                    minv[j] = reduced;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }
            if j1 == 0 {
                log::error!("hungarian could not find an augmenting column for row {}", i);
                return None;
            }
            for j in 0..=size {
                if used[j] {
                    u[row_of_col[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }
            j0 = j1;
            if row_of_col[j0] == 0 {
                break;
            }
        } // end of loop searching a free column
        // augment along the path
        loop {
            let j1 = way[j0];
            row_of_col[j0] = row_of_col[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    } // end of for i
    //
    let mut col_of_row = vec![0usize; size];
    for j in 1..=size {
        col_of_row[row_of_col[j] - 1] = j - 1;
    }
    Some(col_of_row)
} // end of hungarian


//========================================================================================

#[cfg(test)]
mod tests {

    use super::*;
    use ndarray::array;
    use proptest::prelude::*;

    use crate::assign::AssignmentStrategy;
    use crate::embedding::EmbeddingSet;
    use crate::assign::build_cost_matrix;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    // minimum of total cost over all injective assignments, by enumeration
    fn brute_force_min(costs: &CostMatrix) -> f64 {
        fn explore(costs: &CostMatrix, row: usize, used: &mut Vec<bool>, acc: f64, best: &mut f64) {
            if row == costs.get_nb_rows() {
                if acc < *best {
                    *best = acc;
                }
                return;
            }
            for j in 0..costs.get_nb_cols() {
                if !used[j] {
                    used[j] = true;
                    explore(costs, row + 1, used, acc + costs.get(row, j), best);
                    used[j] = false;
                }
            }
        }
        let mut best = f64::INFINITY;
        let mut used = vec![false; costs.get_nb_cols()];
        explore(costs, 0, &mut used, 0., &mut best);
        best
    } // end of brute_force_min

    #[test]
    fn test_exact_shifted_embeddings() {
        log_init_test();
        //
        let source = EmbeddingSet::<f32>::from_rows(vec![vec![1., 2.], vec![3., 4.], vec![5., 6.]]).unwrap();
        let target = EmbeddingSet::<f32>::from_rows(vec![vec![1.1, 2.1], vec![3.1, 4.1], vec![5.1, 6.1]]).unwrap();
        let costs = build_cost_matrix(&source, &target, false).unwrap();
        let assignment = ExactAssignment.solve(&costs, 3, 3).unwrap();
        assert_eq!(assignment.as_slice(), &[0, 1, 2]);
    }

    // the greedy choice (0,0) costs 1 + 10, the optimum avoids it
    #[test]
    fn test_exact_beats_greedy() {
        log_init_test();
        //
        let costs = CostMatrix::from_array(array![[1., 2.], [2., 10.]]).unwrap();
        let exact = ExactAssignment.solve(&costs, 2, 2).unwrap();
        assert_eq!(exact.as_slice(), &[1, 0]);
        assert_eq!(exact.total_cost(&costs), 4.);
        let greedy = AssignmentStrategy::Greedy.solve(&costs, 2, 2).unwrap();
        assert_eq!(greedy.as_slice(), &[0, 1]);
    }

    #[test]
    fn test_exact_rectangular() {
        log_init_test();
        //
        let costs = CostMatrix::from_array(array![[5., 9., 1., 7.], [4., 1., 2., 8.]]).unwrap();
        let assignment = ExactAssignment.solve(&costs, 2, 4).unwrap();
        assert_eq!(assignment.as_slice(), &[2, 1]);
        assert_eq!(assignment.unassigned(), vec![0, 3]);
    }

    #[test]
    fn test_padding_exceeds_real_totals() {
        let costs = CostMatrix::from_array(array![[0.5, 3.], [2., 1.], [0., 0.25]]).unwrap();
        // any total of real cells is at most 3 cells * 3.
        assert!(padding_cost(&costs) > 9.);
        let zeros = CostMatrix::from_array(Array2::<f64>::zeros((2, 3))).unwrap();
        assert!(padding_cost(&zeros) > 0.);
    }

    #[test]
    fn test_hungarian_not_square() {
        assert!(hungarian(&Array2::<f64>::zeros((2, 3))).is_none());
        assert_eq!(hungarian(&Array2::<f64>::zeros((0, 0))), Some(Vec::new()));
    }

    fn arb_costs() -> impl Strategy<Value = CostMatrix> {
        (1usize..=4, 0usize..=2).prop_flat_map(|(nb_rows, extra)| {
            let nb_cols = nb_rows + extra;
            proptest::collection::vec(0u32..20, nb_rows * nb_cols).prop_map(move |cells| {
                let data = Array2::from_shape_vec((nb_rows, nb_cols), cells.into_iter().map(|c| c as f64 * 0.5).collect()).unwrap();
                CostMatrix::from_array(data).unwrap()
            })
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn exact_is_optimal(costs in arb_costs()) {
            let (nb_rows, nb_cols) = costs.shape();
            let assignment = ExactAssignment.solve(&costs, nb_rows, nb_cols).unwrap();
            let best = brute_force_min(&costs);
            prop_assert!((assignment.total_cost(&costs) - best).abs() < 1.0E-9);
            // no other strategy does better
            for strategy in [AssignmentStrategy::Greedy, AssignmentStrategy::GreedyFast] {
                let other = strategy.solve(&costs, nb_rows, nb_cols).unwrap();
                prop_assert!(assignment.total_cost(&costs) <= other.total_cost(&costs) + 1.0E-9);
            }
        }

        // when each row reaches its minimum only on the diagonal the identity is the unique optimum
        #[test]
        fn dominant_diagonal_gives_identity(size in 1usize..6, diagonal in proptest::collection::vec(0u32..100, 6),
                                            offsets in proptest::collection::vec(1u32..50, 36)) {
            // each row has its own diagonal value, other cells of the row are strictly above it
            let mut data = Array2::<f64>::zeros((size, size));
            for i in 0..size {
                let row_min = diagonal[i] as f64 / 10.;
                for j in 0..size {
                    data[[i, j]] = if i == j { row_min } else { row_min + offsets[i * 6 + j] as f64 / 10. };
                }
            }
            let costs = CostMatrix::from_array(data).unwrap();
            let assignment = ExactAssignment.solve(&costs, size, size).unwrap();
            prop_assert_eq!(assignment.as_slice().to_vec(), (0..size).collect::<Vec<usize>>());
        }
    }
} // end of mod tests
