//! Assignment of the nodes of a source graph to the nodes of a target graph.
//!
//! Given a cost matrix with nb_source rows and nb_target columns (nb_source <= nb_target) we look for
//! an injective mapping from rows to columns with a small total cost.
//! Three strategies are provided:
//!
//! - Exact : the optimal assignment obtained with the Hungarian algorithm on the matrix padded to a square matrix.
//! - Greedy : repeatedly picks the cheapest remaining cell, maintaining ordered costs by row and column.
//! - GreedyFast : the same choices as Greedy but found by rescanning the remaining cells, no auxiliary structure.
//!
//! For greedy strategies cost ties are broken by smallest row, then smallest column.
//! The target nodes not reached by the assignment are the unassigned nodes, they will be counted as inserted
//! by the edit cost.

use std::fmt;
use std::str::FromStr;

use crate::errors::GedError;

pub mod costmatrix;
pub mod exact;
pub mod greedy;

pub use costmatrix::{build_cost_matrix, CostMatrix};
pub use exact::ExactAssignment;
pub use greedy::{GreedyAssignment, GreedyAssignmentFast};


/// An injective mapping from source nodes `[0, nb_source)` to target nodes `[0, nb_target)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeAssignment {
    /// mapping\[i\] is the target node assigned to source node i
    mapping: Vec<usize>,
    ///
    nb_target: usize,
} // end of NodeAssignment


impl NodeAssignment {
    /// checks that all values are in range and pairwise distinct.
    pub fn new(mapping: Vec<usize>, nb_target: usize) -> Result<Self, GedError> {
        let mut seen = vec![false; nb_target];
        for (i, &j) in mapping.iter().enumerate() {
            if j >= nb_target {
                return Err(GedError::InvalidAssignment(format!(
                    "source node {} assigned to {}, out of range {}",
                    i, j, nb_target
                )));
            }
            if seen[j] {
                return Err(GedError::InvalidAssignment(format!("target node {} assigned twice", j)));
            }
            seen[j] = true;
        }
        Ok(NodeAssignment { mapping, nb_target })
    } // end of new

    /// identity assignment of nb_source nodes in a target of nb_target nodes
    pub fn identity(nb_source: usize, nb_target: usize) -> Result<Self, GedError> {
        NodeAssignment::new((0..nb_source).collect(), nb_target)
    }

    pub fn get_nb_source(&self) -> usize {
        self.mapping.len()
    }

    pub fn get_nb_target(&self) -> usize {
        self.nb_target
    }

    /// target node assigned to source node
    pub fn get_target(&self, source: usize) -> usize {
        self.mapping[source]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.mapping
    }

    /// target nodes not assigned to any source node, in increasing order
    pub fn unassigned(&self) -> Vec<usize> {
        let mut assigned = vec![false; self.nb_target];
        for &j in &self.mapping {
            assigned[j] = true;
        }
        (0..self.nb_target).filter(|j| !assigned[*j]).collect()
    }

    /// sum of the costs of assigned cells
    pub fn total_cost(&self, costs: &CostMatrix) -> f64 {
        self.mapping.iter().enumerate().map(|(i, &j)| costs.get(i, j)).sum()
    }
} // end of impl NodeAssignment


//========================================================================================


/// The interface of an assignment algorithm.
/// Implementors are stateless, all the state of a resolution lives in the call.
pub trait AssignmentSolverT: Sync {
    /// name used in logs
    fn get_name(&self) -> &'static str;
    /// computes an assignment of all rows of costs, the shape having already been checked
    /// (at least one row, no more rows than columns)
    fn solve_checked(&self, costs: &CostMatrix) -> Result<NodeAssignment, GedError>;

    /// checks the matrix is nb_source x nb_target with 0 < nb_source <= nb_target and solves.
    fn solve(&self, costs: &CostMatrix, nb_source: usize, nb_target: usize) -> Result<NodeAssignment, GedError> {
        check_shape(costs, nb_source, nb_target)?;
        let assignment = self.solve_checked(costs)?;
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{} assignment : {:?}, cost {:.3e}", self.get_name(), assignment.as_slice(), assignment.total_cost(costs));
        }
        Ok(assignment)
    }
} // end of trait AssignmentSolverT


// the contract shared by all strategies
fn check_shape(costs: &CostMatrix, nb_source: usize, nb_target: usize) -> Result<(), GedError> {
    if costs.shape() != (nb_source, nb_target) {
        return Err(GedError::ShapeMismatch {
            context: "cost matrix",
            expected: (nb_source, nb_target),
            got: costs.shape(),
        });
    }
    if nb_source == 0 || nb_source > nb_target {
        return Err(GedError::InfeasibleAssignment { nb_source, nb_target });
    }
    Ok(())
} // end of check_shape


//========================================================================================


/// Selects the assignment algorithm
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum AssignmentStrategy {
    /// optimal assignment (Hungarian algorithm on padded square matrix)
    #[default]
    Exact,
    /// greedy with ordered sets by row and by column
    Greedy,
    /// greedy by rescanning the matrix, for small matrices
    GreedyFast,
}


static EXACT: ExactAssignment = ExactAssignment;
static GREEDY: GreedyAssignment = GreedyAssignment;
static GREEDY_FAST: GreedyAssignmentFast = GreedyAssignmentFast;


impl AssignmentStrategy {
    /// returns the solver implementing the strategy
    pub fn get_solver(&self) -> &'static dyn AssignmentSolverT {
        match self {
            AssignmentStrategy::Exact => &EXACT,
            AssignmentStrategy::Greedy => &GREEDY,
            AssignmentStrategy::GreedyFast => &GREEDY_FAST,
        }
    }

    /// solves with the selected strategy
    pub fn solve(&self, costs: &CostMatrix, nb_source: usize, nb_target: usize) -> Result<NodeAssignment, GedError> {
        self.get_solver().solve(costs, nb_source, nb_target)
    }
} // end of impl AssignmentStrategy


impl FromStr for AssignmentStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" | "linear" => Ok(AssignmentStrategy::Exact),
            "greedy" => Ok(AssignmentStrategy::Greedy),
            "greedy-fast" | "greedy_fast" | "greedyfast" => Ok(AssignmentStrategy::GreedyFast),
            _ => Err(anyhow::anyhow!("unknown assignment strategy {}, expecting exact, greedy or greedy-fast", s)),
        }
    }
}

impl fmt::Display for AssignmentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssignmentStrategy::Exact => "exact",
            AssignmentStrategy::Greedy => "greedy",
            AssignmentStrategy::GreedyFast => "greedy-fast",
        };
        write!(f, "{}", name)
    }
}


//========================================================================================

#[cfg(test)]
mod tests {

    use super::*;
    use ndarray::array;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_node_assignment_validation() {
        log_init_test();
        //
        assert!(NodeAssignment::new(vec![2, 0], 3).is_ok());
        assert!(matches!(NodeAssignment::new(vec![1, 1], 3), Err(GedError::InvalidAssignment(_))));
        assert!(matches!(NodeAssignment::new(vec![0, 3], 3), Err(GedError::InvalidAssignment(_))));
    }

    #[test]
    fn test_unassigned_partition() {
        log_init_test();
        //
        let assignment = NodeAssignment::new(vec![3, 0, 4], 6).unwrap();
        let unassigned = assignment.unassigned();
        assert_eq!(unassigned, vec![1, 2, 5]);
        let mut all: Vec<usize> = assignment.as_slice().iter().chain(unassigned.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..6).collect::<Vec<usize>>());
    }

    #[test]
    fn test_shape_errors_all_strategies() {
        log_init_test();
        //
        let costs = CostMatrix::from_array(array![[1., 2., 3.], [4., 1., 6.]]).unwrap();
        let empty = CostMatrix::from_array(ndarray::Array2::<f64>::zeros((0, 3))).unwrap();
        let tall = CostMatrix::from_array(array![[1.], [2.]]).unwrap();
        for strategy in [AssignmentStrategy::Exact, AssignmentStrategy::Greedy, AssignmentStrategy::GreedyFast] {
            assert!(matches!(strategy.solve(&costs, 3, 3), Err(GedError::ShapeMismatch { .. })));
            assert!(matches!(strategy.solve(&empty, 0, 3), Err(GedError::InfeasibleAssignment { .. })));
            assert!(matches!(strategy.solve(&tall, 2, 1), Err(GedError::InfeasibleAssignment { .. })));
            let assignment = strategy.solve(&costs, 2, 3).unwrap();
            assert_eq!(assignment.as_slice(), &[0, 1]);
        }
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("exact".parse::<AssignmentStrategy>().unwrap(), AssignmentStrategy::Exact);
        assert_eq!("Greedy".parse::<AssignmentStrategy>().unwrap(), AssignmentStrategy::Greedy);
        assert_eq!("greedy-fast".parse::<AssignmentStrategy>().unwrap(), AssignmentStrategy::GreedyFast);
        assert!("hungarian-ish".parse::<AssignmentStrategy>().is_err());
        assert_eq!(AssignmentStrategy::GreedyFast.to_string(), "greedy-fast");
    }
} // end of mod tests
