//! Errors reported by the core computations (cost matrix, assignment, edit cost, pipeline).
//!
//! Errors are synchronous and abort only the pair being processed.
//! The pipeline decides, according to its [ErrorPolicy](crate::pipeline::ErrorPolicy),
//! whether to record a sentinel value or to abort the batch.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GedError {
    /// vectors do not share the same dimension
    #[error("dimension mismatch : expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// a matrix, an assignment or a collection does not have the announced shape
    #[error("shape mismatch in {context} : expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        context: &'static str,
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// graph construction with an out of range edge endpoint
    #[error("invalid graph : {0}")]
    InvalidGraph(String),

    /// a graph index (in cross mode index lists) beyond the collection
    #[error("graph index {index} out of range, nb graphs : {nb_graphs}")]
    IndexOutOfRange { index: usize, nb_graphs: usize },

    #[error("empty input : {0}")]
    EmptyInput(&'static str),

    /// no injective assignment of nb_source rows into nb_target columns exists
    #[error("infeasible assignment of {nb_source} source nodes into {nb_target} target nodes")]
    InfeasibleAssignment { nb_source: usize, nb_target: usize },

    #[error("invalid assignment : {0}")]
    InvalidAssignment(String),

    /// a cost that is negative or not finite
    #[error("invalid cost {value} at ({row}, {col})")]
    InvalidCost { row: usize, col: usize, value: f64 },

    /// an error raised while processing the graph pair at (row, col) of the distance matrix
    #[error("pair ({row}, {col}) : {source}")]
    Pair {
        row: usize,
        col: usize,
        #[source]
        source: Box<GedError>,
    },
} // end of GedError

impl GedError {
    /// attach pair coordinates to an error
    pub fn at_pair(self, row: usize, col: usize) -> Self {
        GedError::Pair { row, col, source: Box::new(self) }
    }
}
