//! The four graph representations.

pub mod adj_list;
pub mod adj_matrix;
pub mod neighborhood;
pub mod node_graph;

pub use adj_list::AdjacencyList;
pub use adj_matrix::{AdjacencyMatrix, Cell};
pub use neighborhood::{Neighborhood, UnweightedNbs, WeightedNbs};
pub use node_graph::{NodeGraph, UnweightedGraph, WeightedGraph};
