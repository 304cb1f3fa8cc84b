//! Greedy assignments.
//!
//! At each step the cheapest cell among the remaining rows and columns is selected, its row and column
//! are removed and we continue until all rows are assigned.
//! Ties are broken by smallest row then smallest column, so both implementations below return the same assignment.
//!
//! - [GreedyAssignment] keeps for each row (resp. column) the set of its remaining cells ordered by (cost, column)
//!   (resp. (cost, row)). Finding the cheapest cell is a scan of set heads and each removal of a row/column costs
//!   a logarithmic update of the other sets. Amortized O(n.m.log(n.m)).
//! - [GreedyAssignmentFast] rescans all remaining cells at each step, O(n².m), but allocates nothing but flags.
//!   Preferable for small matrices.


use std::collections::BTreeSet;

use ordered_float::OrderedFloat;

use super::{AssignmentSolverT, CostMatrix, NodeAssignment};
use crate::errors::GedError;


/// a cell of cost matrix with the total order (cost, row, col) used to select cells
type Cell = (OrderedFloat<f64>, usize, usize);


/// Greedy assignment maintaining ordered costs by row and by column.
#[derive(Copy, Clone, Debug, Default)]
pub struct GreedyAssignment;


impl AssignmentSolverT for GreedyAssignment {
    fn get_name(&self) -> &'static str {
        "greedy"
    }

    fn solve_checked(&self, costs: &CostMatrix) -> Result<NodeAssignment, GedError> {
        let (nb_rows, nb_cols) = costs.shape();
        // sorted_rows[i] contains (cost, col) for alive columns, sorted_cols[j] contains (cost, row) for alive rows
        let mut sorted_rows: Vec<BTreeSet<(OrderedFloat<f64>, usize)>> = (0..nb_rows).map(|_| BTreeSet::new()).collect();
        let mut sorted_cols: Vec<BTreeSet<(OrderedFloat<f64>, usize)>> = (0..nb_cols).map(|_| BTreeSet::new()).collect();
        for i in 0..nb_rows {
            for j in 0..nb_cols {
                let cost = OrderedFloat(costs.get(i, j));
                sorted_rows[i].insert((cost, j));
                sorted_cols[j].insert((cost, i));
            }
        }
        let mut row_alive = vec![true; nb_rows];
        let mut col_alive = vec![true; nb_cols];
        let mut mapping = vec![usize::MAX; nb_rows];
        //
        for _ in 0..nb_rows {
            let mut best: Option<Cell> = None;
            for i in (0..nb_rows).filter(|i| row_alive[*i]) {
                if let Some(&(cost, j)) = sorted_rows[i].iter().next() {
                    keep_smallest(&mut best, (cost, i, j));
                }
            }
            for j in (0..nb_cols).filter(|j| col_alive[*j]) {
                if let Some(&(cost, i)) = sorted_cols[j].iter().next() {
                    keep_smallest(&mut best, (cost, i, j));
                }
            }
            let (_, min_row, min_col) = best.ok_or(GedError::InfeasibleAssignment { nb_source: nb_rows, nb_target: nb_cols })?;
            log::trace!("greedy assigning {} -> {}", min_row, min_col);
            mapping[min_row] = min_col;
            row_alive[min_row] = false;
            col_alive[min_col] = false;
            sorted_rows[min_row].clear();
            sorted_cols[min_col].clear();
            // consumed column disappears from alive rows, consumed row from alive columns
            for i in (0..nb_rows).filter(|i| row_alive[*i]) {
                sorted_rows[i].remove(&(OrderedFloat(costs.get(i, min_col)), min_col));
            }
            for j in (0..nb_cols).filter(|j| col_alive[*j]) {
                sorted_cols[j].remove(&(OrderedFloat(costs.get(min_row, j)), min_row));
            }
        } // end of for on rows
        //
        NodeAssignment::new(mapping, nb_cols)
    } // end of solve_checked
} // end of impl AssignmentSolverT for GreedyAssignment


fn keep_smallest(best: &mut Option<Cell>, candidate: Cell) {
    if best.map_or(true, |current| candidate < current) {
        *best = Some(candidate);
    }
}


//========================================================================================


/// Greedy assignment by rescanning the remaining cells at each step.
#[derive(Copy, Clone, Debug, Default)]
pub struct GreedyAssignmentFast;


impl AssignmentSolverT for GreedyAssignmentFast {
    fn get_name(&self) -> &'static str {
        "greedy-fast"
    }

    fn solve_checked(&self, costs: &CostMatrix) -> Result<NodeAssignment, GedError> {
        let (nb_rows, nb_cols) = costs.shape();
        let mut row_alive = vec![true; nb_rows];
        let mut col_alive = vec![true; nb_cols];
        let mut mapping = vec![usize::MAX; nb_rows];
        //
        for _ in 0..nb_rows {
            let mut best: Option<(f64, usize, usize)> = None;
            // row major scan with strict comparison keeps the smallest (row, col) among equal costs
            for i in (0..nb_rows).filter(|i| row_alive[*i]) {
                for j in (0..nb_cols).filter(|j| col_alive[*j]) {
                    let cost = costs.get(i, j);
                    if best.map_or(true, |(min_cost, _, _)| cost < min_cost) {
                        best = Some((cost, i, j));
                    }
                }
            }
            let (_, min_row, min_col) = best.ok_or(GedError::InfeasibleAssignment { nb_source: nb_rows, nb_target: nb_cols })?;
            mapping[min_row] = min_col;
            row_alive[min_row] = false;
            col_alive[min_col] = false;
        }
        //
        NodeAssignment::new(mapping, nb_cols)
    } // end of solve_checked
} // end of impl AssignmentSolverT for GreedyAssignmentFast


//========================================================================================

// end of mod tests
