/*!
Keyed graphs with interchangeable representations and classical
algorithms.

Four representations are provided: [`repr::UnweightedGraph`],
[`repr::WeightedGraph`], [`repr::AdjacencyList`] and
[`repr::AdjacencyMatrix`]. All of them implement [`ops::NeighborQuery`],
and every algorithm is a blanket trait over that contract, so traversals,
shortest paths, spanning trees, cycle detection and cut search run on any
of the four unchanged.

# Example

```
use kgraphs::prelude::*;

let graph = weighted_graph_from_parts(
    false,
    1..=4u32,
    [(1, 2, 1), (2, 3, 2), (3, 4, 3), (4, 1, 4)],
)?;

assert_eq!(graph.bft(None)?, vec![1, 2, 4, 3]);
assert_eq!(graph.dijkstras(None)?[&3], Distance::Finite(3));

let (total, tree) = graph.kruskals()?;
assert_eq!(total, 6);
assert_eq!(tree.len(), 3);
# Ok::<(), GraphError>(())
```
*/

pub mod algo;
pub mod build;
pub mod convert;
pub mod edge;
pub mod error;
pub mod ops;
pub mod repr;
pub mod vertex;

/// Everything most users need in one import.
pub mod prelude {
    pub use crate::algo::{Cuts, Cycles, Msts, ShortestPaths, Traversals};
    pub use crate::build::{
        adjacency_list_from_parts, adjacency_matrix_from_parts, unweighted_graph_from_parts,
        weighted_graph_from_parts,
    };
    pub use crate::convert::{
        directed_to_undirected, to_adjacency_list, to_adjacency_matrix, to_unweighted_graph,
        to_weighted_graph,
    };
    pub use crate::edge::Edge;
    pub use crate::error::{GraphError, Result};
    pub use crate::ops::NeighborQuery;
    pub use crate::repr::{
        AdjacencyList, AdjacencyMatrix, Cell, UnweightedGraph, WeightedGraph,
    };
    pub use crate::vertex::{Distance, VertexKey, Weight};
}
