//! Undirected graphs with one categorical attribute (a String) per node.
//!
//! Nodes are identified by their rank in `[0, nb_nodes)`, the rank being the rank of the node
//! in the petgraph node indexation and the row of the node in its embedding.
//! Edges are undirected and unweighted. Self loops and parallel edges are dropped at construction
//! as we do not handle multigraphs.
//!
//! The edit cost computation asks for edge existence O(n²) times for each pair of graphs so
//! we keep the dense adjacency matrix petgraph can build for us.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::GetAdjacencyMatrix;

use crate::errors::GedError;

/// type of the adjacency bit matrix associated to our petgraph graphs
type AdjMatrix = <UnGraph<String, ()> as GetAdjacencyMatrix>::AdjMatrix;

/// The accessor the edit cost evaluation needs on a graph.
/// Nodes are identified by their rank.
pub trait LabelledGraphT {
    /// number of nodes
    fn get_nb_nodes(&self) -> usize;
    /// categorical attribute of node of rank node
    fn get_attr(&self, node: usize) -> &str;
    /// number of edges incident to node
    fn get_degree(&self, node: usize) -> usize;
    /// returns true if there is an edge between node1 and node2
    fn has_edge(&self, node1: usize, node2: usize) -> bool;
    /// ranks of neighbours of node
    fn get_neighbours(&self, node: usize) -> Vec<usize>;
} // end of trait LabelledGraphT

/// An undirected graph with a String attribute attached to each node.
pub struct AttributedGraph {
    graph: UnGraph<String, ()>,
    /// dense adjacency, symetric as graph is undirected
    adjacency: AdjMatrix,
} // end of AttributedGraph

impl AttributedGraph {
    /// Builds a graph from node attributes (node of rank i gets attrs\[i\]) and a list of undirected edges.
    /// Self loops and duplicated edges (in either orientation) are skipped.
    pub fn new(attrs: Vec<String>, edges: &[(usize, usize)]) -> Result<Self, GedError> {
        let nb_nodes = attrs.len();
        let mut graph = UnGraph::<String, ()>::with_capacity(nb_nodes, edges.len());
        for attr in attrs {
            graph.add_node(attr);
        }
        let mut nb_skipped = 0usize;
        for &(a, b) in edges {
            if a >= nb_nodes || b >= nb_nodes {
                return Err(GedError::InvalidGraph(format!(
                    "edge ({}, {}) out of range, nb nodes : {}",
                    a, b, nb_nodes
                )));
            }
            if a == b || graph.find_edge(NodeIndex::new(a), NodeIndex::new(b)).is_some() {
                log::trace!("skipping edge ({}, {})", a, b);
                nb_skipped += 1;
                continue;
            }
            graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
        }
        if nb_skipped > 0 {
            log::warn!("AttributedGraph::new skipped {} self loops or duplicated edges", nb_skipped);
        }
        Ok(AttributedGraph::from_petgraph(graph))
    } // end of new

    /// Takes ownership of a petgraph graph. The graph is expected to be free of self loops and parallel edges.
    pub fn from_petgraph(graph: UnGraph<String, ()>) -> Self {
        let adjacency = graph.adjacency_matrix();
        AttributedGraph { graph, adjacency }
    }

    /// get a reference to the underlying petgraph graph
    pub fn get_graph(&self) -> &UnGraph<String, ()> {
        &self.graph
    }

    pub fn get_nb_edges(&self) -> usize {
        self.graph.edge_count()
    }

    /// all node attributes in rank order
    pub fn get_attrs(&self) -> Vec<&str> {
        self.graph.raw_nodes().iter().map(|n| n.weight.as_str()).collect()
    }
} // end of impl AttributedGraph

impl LabelledGraphT for AttributedGraph {
    fn get_nb_nodes(&self) -> usize {
        self.graph.node_count()
    }

    fn get_attr(&self, node: usize) -> &str {
        self.graph[NodeIndex::new(node)].as_str()
    }

    fn get_degree(&self, node: usize) -> usize {
        self.graph.neighbors(NodeIndex::new(node)).count()
    }

    fn has_edge(&self, node1: usize, node2: usize) -> bool {
        self.graph
            .is_adjacent(&self.adjacency, NodeIndex::new(node1), NodeIndex::new(node2))
    }

    fn get_neighbours(&self, node: usize) -> Vec<usize> {
        self.graph.neighbors(NodeIndex::new(node)).map(|n| n.index()).collect()
    }
} // end of impl LabelledGraphT for AttributedGraph

//========================================================================================

// end of mod tests
