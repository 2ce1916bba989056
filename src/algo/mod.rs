//! Graph algorithms, each exposed as a blanket trait over [`NeighborQuery`].

pub mod cuts;
pub mod cycles;
pub mod mst;
pub mod shortest_paths;
pub mod traversal;

pub use cuts::Cuts;
pub use cycles::Cycles;
pub use mst::Msts;
pub use shortest_paths::ShortestPaths;
pub use traversal::Traversals;

use crate::{
    error::{GraphError, Result},
    ops::NeighborQuery,
};

/// Resolves an optional start vertex: a given vertex must exist (the
/// algorithm chooses which error to raise), otherwise the smallest vertex
/// key is used.
pub(crate) fn resolve_start<G: NeighborQuery>(
    graph: &G,
    start: Option<&G::Key>,
    invalid: fn(String) -> GraphError,
) -> Result<G::Key> {
    match start {
        Some(s) if graph.contains_vertex(s) => Ok(s.clone()),
        Some(s) => Err(invalid(s.to_string())),
        None => graph.start_vertex(),
    }
}

/// Neighbor keys in contract order, one per edge.
pub(crate) fn neighbor_keys<G: NeighborQuery>(graph: &G, vertex: &G::Key) -> Result<Vec<G::Key>> {
    Ok(graph
        .ordered_neighbors(vertex)?
        .into_iter()
        .map(|(k, _)| k)
        .collect())
}
