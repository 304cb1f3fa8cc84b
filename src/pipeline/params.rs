//! Parameters of the distance matrix computation


use std::str::FromStr;

use crate::assign::AssignmentStrategy;


/// How the cell (j,i) of a full distance matrix is obtained once (i,j) is computed.
///
/// The computation is not symetric : the assignment always goes from the smaller graph to the larger one
/// and for graphs of equal size from the first listed to the second. So mirroring is an approximation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SymmetryMode {
    /// each unordered pair is computed once and written in both cells
    #[default]
    Mirror,
    /// each ordered pair (i,j) is computed with i listed first
    Independent,
}

impl FromStr for SymmetryMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mirror" => Ok(SymmetryMode::Mirror),
            "independent" => Ok(SymmetryMode::Independent),
            _ => Err(anyhow::anyhow!("unknown symmetry mode {}, expecting mirror or independent", s)),
        }
    }
}


/// What to do when the computation of a pair fails
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// the whole computation returns the first error (in row major order of cells)
    #[default]
    Abort,
    /// the cell receives the value and the computation goes on
    Sentinel(i64),
}


#[derive(Copy, Clone, Debug)]
pub struct PipelineParams {
    /// assignment algorithm
    strategy: AssignmentStrategy,
    /// parallel mode, on pairs and on cost matrix cells
    parallel: bool,
    ///
    symmetry: SymmetryMode,
    ///
    on_error: ErrorPolicy,
} // end of PipelineParams


impl PipelineParams {
    pub fn new(strategy: AssignmentStrategy, parallel: bool, symmetry: SymmetryMode, on_error: ErrorPolicy) -> Self {
        PipelineParams { strategy, parallel, symmetry, on_error }
    }

    /// exact assignment, parallel, mirrored, aborting on error
    pub fn with_strategy(strategy: AssignmentStrategy) -> Self {
        PipelineParams::new(strategy, true, SymmetryMode::Mirror, ErrorPolicy::Abort)
    }

    pub fn get_strategy(&self) -> AssignmentStrategy {
        self.strategy
    }

    pub fn get_parallel(&self) -> bool {
        self.parallel
    }

    pub fn get_symmetry(&self) -> SymmetryMode {
        self.symmetry
    }

    pub fn get_error_policy(&self) -> ErrorPolicy {
        self.on_error
    }

    /// useful to set flag received from command line
    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel
    }
} // end of impl PipelineParams


impl Default for PipelineParams {
    fn default() -> Self {
        PipelineParams::with_strategy(AssignmentStrategy::Exact)
    }
}
