//! Error types shared across representations and algorithms.

use std::fmt::Display;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

/// Everything that can go wrong when building, mutating or analyzing a graph.
///
/// Vertex keys are carried as their `Display` rendering so the error type
/// stays free of generic parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex {0} does not exist in the graph")]
    VertexDoesNotExist(String),

    #[error("vertex {0} already exists in the graph")]
    VertexAlreadyExists(String),

    #[error("vertex {vertex} has no edge to {neighbor}")]
    NeighborDoesNotExist { vertex: String, neighbor: String },

    #[error("vertex {vertex} already has an edge to {neighbor}")]
    NeighborAlreadyExists { vertex: String, neighbor: String },

    #[error("unsupported graph type: {0}")]
    UnsupportedGraphType(String),

    #[error("invalid traversal vertex {0}")]
    InvalidTraversalNode(String),

    #[error("invalid spanning tree start vertex {0}")]
    InvalidMstNode(String),

    #[error("traversal did not reach every vertex: {0}")]
    IncompleteTraversal(String),

    #[error("algorithm {0} is not implemented")]
    AlgorithmNotImplemented(&'static str),

    #[error("invalid conversion: {0}")]
    ConversionOperation(String),
}

impl GraphError {
    pub(crate) fn missing<K: Display>(vertex: &K) -> Self {
        GraphError::VertexDoesNotExist(vertex.to_string())
    }

    pub(crate) fn exists<K: Display>(vertex: &K) -> Self {
        GraphError::VertexAlreadyExists(vertex.to_string())
    }

    pub(crate) fn no_neighbor<K: Display>(vertex: &K, neighbor: &K) -> Self {
        GraphError::NeighborDoesNotExist {
            vertex: vertex.to_string(),
            neighbor: neighbor.to_string(),
        }
    }

    pub(crate) fn neighbor_taken<K: Display>(vertex: &K, neighbor: &K) -> Self {
        GraphError::NeighborAlreadyExists {
            vertex: vertex.to_string(),
            neighbor: neighbor.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_vertices() {
        let err = GraphError::no_neighbor(&3u32, &7u32);
        assert_eq!(err.to_string(), "vertex 3 has no edge to 7");

        let err = GraphError::missing(&"a");
        assert_eq!(err.to_string(), "vertex a does not exist in the graph");
    }
}
