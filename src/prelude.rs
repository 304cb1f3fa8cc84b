//! To ease access to most frequently items
//!


pub use crate::errors::GedError;

pub use crate::graph::{AttributedGraph, LabelledGraphT};
pub use crate::embedding::*;

pub use crate::assign::{build_cost_matrix, AssignmentSolverT, AssignmentStrategy, CostMatrix, NodeAssignment};
pub use crate::editcost::{edit_cost, edit_cost_detail, EditCostDetail};

pub use crate::pipeline::{pair_cost, DistanceMatrix, DistanceMatrixPipeline, ErrorPolicy, PipelineParams, SymmetryMode};

pub use crate::io::csv::{dump_matrix, read_embedding, read_indices};
pub use crate::io::dataset::load_dataset;
pub use crate::io::graphml::read_graphml;
pub use crate::io::output::{Format, Output};
