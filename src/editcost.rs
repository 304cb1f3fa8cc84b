//! Edit cost induced by a node assignment.
//!
//! Given an assignment φ of the nodes of a source graph into the nodes of a (not smaller) target graph,
//! the cost counts unit edit operations transforming source into target:
//!
//! 1. node substitution : 1 for each source node i whose attribute differs from the attribute of φ(i),
//! 2. node insertion : 1 for each target node not reached by φ (unassigned node),
//! 3. edge operations : for each pair i < j of source nodes, 1 if exactly one of the edges (i,j) in source
//!    and (φ(i),φ(j)) in target exists (deletion or insertion), 0 otherwise (substitution or nothing),
//! 4. edge insertion around unassigned nodes : the degree in target of each unassigned node.
//!
//! The total is an upper bound of the graph edit distance, as good as the assignment is.
//! Note that an edge between two unassigned nodes is counted once for each of its extremities in 4.
//!
//! The cost is O(n²) in the number n of source nodes, hence the convention that source is the smaller graph.


use crate::assign::NodeAssignment;
use crate::errors::GedError;
use crate::graph::LabelledGraphT;


/// The partial counts of an edit cost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EditCostDetail {
    /// source nodes whose attribute changes
    pub node_substitutions: u64,
    /// unassigned target nodes
    pub node_insertions: u64,
    /// edges deleted or inserted between assigned nodes
    pub edge_operations: u64,
    /// edges incident to unassigned target nodes
    pub unassigned_edge_insertions: u64,
} // end of EditCostDetail


impl EditCostDetail {
    /// the edit cost
    pub fn total(&self) -> u64 {
        self.node_substitutions + self.node_insertions + self.edge_operations + self.unassigned_edge_insertions
    }
}


/// computes the node part of the cost : substitutions and insertions
pub fn node_edit_cost<G: LabelledGraphT>(source: &G, target: &G, assignment: &NodeAssignment, unassigned: &[usize]) -> (u64, u64) {
    let substitutions = (0..assignment.get_nb_source())
        .filter(|i| source.get_attr(*i) != target.get_attr(assignment.get_target(*i)))
        .count() as u64;
    (substitutions, unassigned.len() as u64)
} // end of node_edit_cost


/// computes the edge part of the cost : operations on edges between assigned nodes and insertion of edges
/// incident to unassigned nodes
pub fn edge_edit_cost<G: LabelledGraphT>(source: &G, target: &G, assignment: &NodeAssignment, unassigned: &[usize]) -> (u64, u64) {
    let nb_source = assignment.get_nb_source();
    let mut operations = 0u64;
    for i in 0..nb_source {
        let phi_i = assignment.get_target(i);
        for j in i + 1..nb_source {
            let phi_j = assignment.get_target(j);
            // deletion if only in source, insertion if only in target
            if source.has_edge(i, j) != target.has_edge(phi_i, phi_j) {
                operations += 1;
            }
        }
    }
    let incident: u64 = unassigned.iter().map(|node| target.get_degree(*node) as u64).sum();
    (operations, incident)
} // end of edge_edit_cost


/// Detailed edit cost. Checks that assignment maps source nodes into target nodes
/// and that unassigned is exactly the set of target nodes not reached by assignment (in any order),
/// as returned by [NodeAssignment::unassigned].
pub fn edit_cost_detail<G: LabelledGraphT>(source: &G, target: &G, assignment: &NodeAssignment, unassigned: &[usize]) -> Result<EditCostDetail, GedError> {
    let (nb_source, nb_target) = (source.get_nb_nodes(), target.get_nb_nodes());
    if (assignment.get_nb_source(), assignment.get_nb_target()) != (nb_source, nb_target) {
        return Err(GedError::ShapeMismatch {
            context: "assignment and graphs",
            expected: (nb_source, nb_target),
            got: (assignment.get_nb_source(), assignment.get_nb_target()),
        });
    }
    // reached[j] is true for targets of assignment and for unassigned nodes already seen
    let mut reached = vec![false; nb_target];
    for i in 0..nb_source {
        reached[assignment.get_target(i)] = true;
    }
    for node in unassigned {
        if *node >= nb_target {
            return Err(GedError::InvalidAssignment(format!("unassigned node {} not in target", node)));
        }
        if reached[*node] {
            return Err(GedError::InvalidAssignment(format!("unassigned node {} is assigned or repeated", node)));
        }
        reached[*node] = true;
    }
    if unassigned.len() != nb_target - nb_source {
        return Err(GedError::InvalidAssignment(format!(
            "expected {} unassigned nodes, got {}",
            nb_target - nb_source,
            unassigned.len()
        )));
    }
    //
    let (node_substitutions, node_insertions) = node_edit_cost(source, target, assignment, unassigned);
    let (edge_operations, unassigned_edge_insertions) = edge_edit_cost(source, target, assignment, unassigned);
    let detail = EditCostDetail { node_substitutions, node_insertions, edge_operations, unassigned_edge_insertions };
    log::trace!("edit cost detail : {:?}", detail);
    Ok(detail)
} // end of edit_cost_detail


/// The edit cost of transforming source into target along assignment.
pub fn edit_cost<G: LabelledGraphT>(source: &G, target: &G, assignment: &NodeAssignment, unassigned: &[usize]) -> Result<u64, GedError> {
    edit_cost_detail(source, target, assignment, unassigned).map(|detail| detail.total())
}


//========================================================================================

// end of mod tests
