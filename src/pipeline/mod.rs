//! Computation of approximate graph edit distance matrices on a collection of graphs.
//!
//! For each pair of graphs the graph with fewer nodes is the source (for equal sizes the first listed),
//! so that the assignment goes from the smaller graph to the larger one and the O(n²) edge loop of the edit cost
//! runs on the smaller graph. For each pair we:
//!
//! 1. build the cost matrix between the embedded nodes of source and target,
//! 2. solve the assignment with the chosen strategy,
//! 3. collect the unassigned target nodes,
//! 4. compute the edit cost and store it at the pair's coordinates.
//!
//! Two modes are provided:
//! - full : all pairs of the collection, a square matrix with null diagonal,
//! - cross : all pairs (test, train) for two lists of graph indexes, a rectangular matrix.
//!
//! Pairs are independent and dispatched on rayon threads. Results are collected and written in the matrix
//! afterwards so each cell is written once.

use std::time::SystemTime;

use cpu_time::ProcessTime;
use ndarray::Array2;
use num_traits::float::Float;
use rayon::prelude::*;

use crate::assign::build_cost_matrix;
use crate::editcost::edit_cost;
use crate::embedding::EmbeddingSet;
use crate::errors::GedError;
use crate::graph::LabelledGraphT;

pub mod params;

pub use params::{ErrorPolicy, PipelineParams, SymmetryMode};


/// Matrix of edit costs, indexed by graph pair coordinates.
pub type DistanceMatrix = Array2<i64>;


/// A pair to compute : the cell it goes to and the graphs it compares, first listed first.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct PairJob {
    row: usize,
    col: usize,
    first: usize,
    second: usize,
}


/// Edit cost between 2 graphs along the assignment computed from their embeddings.
/// The graph with fewer nodes is taken as source, first is taken as source when sizes are equal.
pub fn pair_cost<G, F>(
    first: &G,
    first_embedding: &EmbeddingSet<F>,
    second: &G,
    second_embedding: &EmbeddingSet<F>,
    params: &PipelineParams,
) -> Result<u64, GedError>
where
    G: LabelledGraphT,
    F: Float + Send + Sync,
{
    let (source, source_emb, target, target_emb) = if first.get_nb_nodes() <= second.get_nb_nodes() {
        (first, first_embedding, second, second_embedding)
    } else {
        (second, second_embedding, first, first_embedding)
    };
    let costs = build_cost_matrix(source_emb, target_emb, params.get_parallel())?;
    let assignment = params.get_strategy().solve(&costs, source.get_nb_nodes(), target.get_nb_nodes())?;
    let unassigned = assignment.unassigned();
    edit_cost(source, target, &assignment, &unassigned)
} // end of pair_cost


//========================================================================================


/// Computes distance matrices on a collection of graphs and their embeddings.
pub struct DistanceMatrixPipeline<'a, G, F> {
    graphs: &'a [G],
    /// embeddings\[k\] is the embedding of graphs\[k\]
    embeddings: &'a [EmbeddingSet<F>],
    ///
    params: PipelineParams,
} // end of DistanceMatrixPipeline


impl<'a, G, F> DistanceMatrixPipeline<'a, G, F>
where
    G: LabelledGraphT + Sync,
    F: Float + Send + Sync,
{
    /// Checks that there is one embedding by graph, with one vector by node.
    pub fn new(graphs: &'a [G], embeddings: &'a [EmbeddingSet<F>], params: PipelineParams) -> Result<Self, GedError> {
        if graphs.len() != embeddings.len() {
            log::error!("got {} graphs and {} embeddings", graphs.len(), embeddings.len());
            return Err(GedError::ShapeMismatch {
                context: "graphs and embeddings",
                expected: (graphs.len(), graphs.len()),
                got: (graphs.len(), embeddings.len()),
            });
        }
        for (k, (graph, embedding)) in graphs.iter().zip(embeddings.iter()).enumerate() {
            if graph.get_nb_nodes() != embedding.get_nb_nodes() {
                log::error!("graph {} has {} nodes and {} embedded vectors", k, graph.get_nb_nodes(), embedding.get_nb_nodes());
                return Err(GedError::ShapeMismatch {
                    context: "graph nodes and embedded vectors",
                    expected: (graph.get_nb_nodes(), embedding.get_dimension()),
                    got: (embedding.get_nb_nodes(), embedding.get_dimension()),
                });
            }
        }
        Ok(DistanceMatrixPipeline { graphs, embeddings, params })
    } // end of new

    pub fn get_nb_graphs(&self) -> usize {
        self.graphs.len()
    }

    pub fn get_params(&self) -> &PipelineParams {
        &self.params
    }

    /// Distances between all graphs of the collection. The diagonal is 0.
    /// In mirror mode each unordered pair is computed once and cells (i,j) and (j,i) get the same value.
    pub fn full_matrix(&self) -> Result<DistanceMatrix, GedError> {
        let nb_graphs = self.graphs.len();
        log::info!("full distance matrix on {} graphs, params : {:?}", nb_graphs, self.params);
        let mut jobs = Vec::<PairJob>::with_capacity(nb_graphs * nb_graphs);
        for i in 0..nb_graphs {
            for j in 0..nb_graphs {
                let job = PairJob { row: i, col: j, first: i, second: j };
                match self.params.get_symmetry() {
                    SymmetryMode::Mirror if i < j => jobs.push(job),
                    SymmetryMode::Independent if i != j => jobs.push(job),
                    _ => {}
                }
            }
        }
        let mirror = self.params.get_symmetry() == SymmetryMode::Mirror;
        self.run_jobs((nb_graphs, nb_graphs), jobs, mirror)
    } // end of full_matrix

    /// Distances between graphs of test (rows) and graphs of train (columns), given by their index in the collection.
    pub fn cross_matrix(&self, test: &[usize], train: &[usize]) -> Result<DistanceMatrix, GedError> {
        let nb_graphs = self.graphs.len();
        if let Some(index) = test.iter().chain(train.iter()).find(|k| **k >= nb_graphs) {
            return Err(GedError::IndexOutOfRange { index: *index, nb_graphs });
        }
        log::info!("cross distance matrix test {} x train {}, params : {:?}", test.len(), train.len(), self.params);
        let mut jobs = Vec::<PairJob>::with_capacity(test.len() * train.len());
        for (row, first) in test.iter().enumerate() {
            for (col, second) in train.iter().enumerate() {
                jobs.push(PairJob { row, col, first: *first, second: *second });
            }
        }
        self.run_jobs((test.len(), train.len()), jobs, false)
    } // end of cross_matrix

    fn compute_job(&self, job: &PairJob) -> Result<u64, GedError> {
        let cost = pair_cost(
            &self.graphs[job.first],
            &self.embeddings[job.first],
            &self.graphs[job.second],
            &self.embeddings[job.second],
            &self.params,
        )?;
        log::debug!("graphs ({}, {}) cost : {}", job.first, job.second, cost);
        Ok(cost)
    }

    // computes all jobs then fills the matrix, with the mirror cell if asked for
    fn run_jobs(&self, shape: (usize, usize), jobs: Vec<PairJob>, mirror: bool) -> Result<DistanceMatrix, GedError> {
        let cpu_start = ProcessTime::now();
        let sys_start = SystemTime::now();
        let nb_jobs = jobs.len();
        //
        let results: Vec<(PairJob, Result<u64, GedError>)> = if self.params.get_parallel() {
            jobs.into_par_iter().map(|job| (job, self.compute_job(&job))).collect()
        } else {
            jobs.into_iter().map(|job| (job, self.compute_job(&job))).collect()
        };
        //
        let mut matrix = DistanceMatrix::zeros(shape);
        let mut nb_errors = 0usize;
        for (job, result) in results {
            let value = match result {
                Ok(cost) => cost as i64,
                Err(e) => {
                    nb_errors += 1;
                    match self.params.get_error_policy() {
                        ErrorPolicy::Abort => {
                            log::error!("pair ({}, {}) failed : {}", job.first, job.second, e);
                            return Err(e.at_pair(job.row, job.col));
                        }
                        ErrorPolicy::Sentinel(sentinel) => {
                            log::warn!("pair ({}, {}) failed : {}, storing {}", job.first, job.second, e, sentinel);
                            sentinel
                        }
                    }
                }
            };
            matrix[[job.row, job.col]] = value;
            if mirror {
                matrix[[job.col, job.row]] = value;
            }
        }
        //
        log::info!(
            "distance matrix {:?} done, nb pairs : {}, nb errors : {}, sys time(s) {:.2e} cpu time(s) {:.2e}",
            shape,
            nb_jobs,
            nb_errors,
            sys_start.elapsed().map(|d| d.as_secs_f64()).unwrap_or(0.),
            cpu_start.elapsed().as_secs_f64()
        );
        Ok(matrix)
    } // end of run_jobs
} // end of impl DistanceMatrixPipeline


//========================================================================================

// end of mod tests
