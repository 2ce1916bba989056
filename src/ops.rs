/*!
The read-only query surface shared by every graph representation.

Algorithms never inspect which concrete representation they were handed;
everything they need flows through [`NeighborQuery`]. The contract is
deliberately small: ordered neighbor access plus three bits of metadata
(direction, multiplicity, vertex count).
*/

use fxhash::FxHashSet;

use crate::{
    edge::Edge,
    error::{GraphError, Result},
    vertex::{weight_rank, VertexKey, Weight},
};

/// Sorts adjacency pairs ascending by `(weight, key)`, with unweighted
/// entries before every weighted one. All `ordered_neighbors` impls go
/// through this so the contract holds uniformly.
pub(crate) fn sort_adjacency<K: VertexKey>(pairs: &mut [(K, Option<Weight>)]) {
    pairs.sort_by(|a, b| {
        weight_rank(a.1)
            .cmp(&weight_rank(b.1))
            .then_with(|| a.0.cmp(&b.0))
    });
}

/// Read access to a graph, keyed by `Self::Key`.
///
/// `ordered_neighbors` yields one entry per edge, so a parallel edge of
/// multiplicity three appears three times. Entries are sorted ascending by
/// `(weight, key)` where an absent weight sorts below every present one.
pub trait NeighborQuery {
    type Key: VertexKey;

    /// All neighbors of `vertex`, one entry per edge, in contract order.
    fn ordered_neighbors(&self, vertex: &Self::Key) -> Result<Vec<(Self::Key, Option<Weight>)>>;

    fn is_directed(&self) -> bool;

    fn has_multiple_edges(&self) -> bool;

    fn vertex_count(&self) -> usize;

    /// All vertex keys in ascending order.
    fn ordered_vertices(&self) -> Vec<Self::Key>;

    fn contains_vertex(&self, vertex: &Self::Key) -> bool;

    fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// The smallest vertex key, the canonical default start for algorithms.
    fn start_vertex(&self) -> Result<Self::Key> {
        self.ordered_vertices()
            .into_iter()
            .next()
            .ok_or_else(|| GraphError::VertexDoesNotExist("<empty graph>".to_string()))
    }

    fn has_edge(&self, vertex: &Self::Key, neighbor: &Self::Key) -> Result<bool> {
        Ok(self
            .ordered_neighbors(vertex)?
            .iter()
            .any(|(k, _)| k == neighbor))
    }

    /// Number of edges leaving `vertex`, parallel edges counted
    /// individually.
    fn degree(&self, vertex: &Self::Key) -> Result<usize> {
        Ok(self.ordered_neighbors(vertex)?.len())
    }

    /// Total number of edges. Mirrored undirected entries count once;
    /// self-loops are stored once and count once.
    fn edge_count(&self) -> Result<usize> {
        let mut total = 0;
        let mut loops = 0;
        for v in self.ordered_vertices() {
            for (n, _) in self.ordered_neighbors(&v)? {
                total += 1;
                if n == v {
                    loops += 1;
                }
            }
        }
        Ok(if self.is_directed() {
            total
        } else {
            (total + loops) / 2
        })
    }

    /// Number of parallel edges from `vertex` to `neighbor` (0 or 1 for
    /// simple graphs).
    fn edge_multiplicity(&self, vertex: &Self::Key, neighbor: &Self::Key) -> Result<usize> {
        Ok(self
            .ordered_neighbors(vertex)?
            .iter()
            .filter(|(k, _)| k == neighbor)
            .count())
    }

    /// Every edge of the graph exactly once, sorted.
    ///
    /// For undirected graphs the mirrored entry is suppressed: once `(u, v)`
    /// has been collected, `(v, u)` is skipped. Parallel edges collapse to a
    /// single entry carrying the first weight in contract order, i.e. the
    /// smallest.
    fn ordered_edges(&self) -> Result<Vec<Edge<Self::Key>>> {
        let mut seen: FxHashSet<(Self::Key, Self::Key)> = FxHashSet::default();
        let mut edges = Vec::new();
        for u in self.ordered_vertices() {
            for (v, w) in self.ordered_neighbors(&u)? {
                if seen.contains(&(u.clone(), v.clone()))
                    || seen.contains(&(v.clone(), u.clone()))
                {
                    continue;
                }
                seen.insert((u.clone(), v.clone()));
                edges.push(Edge(u.clone(), v, w));
            }
        }
        edges.sort();
        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::{Msts, ShortestPaths, Traversals};
    use crate::build::{
        adjacency_list_from_parts, adjacency_matrix_from_parts, weighted_graph_from_parts,
    };

    const WHEEL: [(u32, u32, i64); 7] = [
        (1, 2, 4),
        (2, 3, 7),
        (3, 4, 2),
        (4, 5, 5),
        (5, 1, 1),
        (1, 3, 3),
        (2, 5, 6),
    ];

    /// Every representation of the same simple graph must answer every
    /// query identically; algorithms only see the contract.
    #[test]
    fn representations_are_interchangeable() {
        let graph = weighted_graph_from_parts(false, 1..=5u32, WHEEL).unwrap();
        let list = adjacency_list_from_parts(false, 1..=5u32, WHEEL).unwrap();
        let matrix = adjacency_matrix_from_parts(false, 1..=5u32, WHEEL).unwrap();

        for v in graph.ordered_vertices() {
            let expected = graph.ordered_neighbors(&v).unwrap();
            assert_eq!(list.ordered_neighbors(&v).unwrap(), expected);
            assert_eq!(matrix.ordered_neighbors(&v).unwrap(), expected);
        }
        let expected_edges = graph.ordered_edges().unwrap();
        assert_eq!(list.ordered_edges().unwrap(), expected_edges);
        assert_eq!(matrix.ordered_edges().unwrap(), expected_edges);

        let expected_order = graph.bft(None).unwrap();
        assert_eq!(list.bft(None).unwrap(), expected_order);
        assert_eq!(matrix.bft(None).unwrap(), expected_order);

        let expected_dist = graph.dijkstras(None).unwrap();
        assert_eq!(list.dijkstras(None).unwrap(), expected_dist);
        assert_eq!(matrix.dijkstras(None).unwrap(), expected_dist);

        let (expected_total, _) = graph.kruskals().unwrap();
        assert_eq!(list.kruskals().unwrap().0, expected_total);
        assert_eq!(matrix.kruskals().unwrap().0, expected_total);
    }

    #[test]
    fn ordered_edges_suppresses_mirrors_and_collapses_parallels() {
        let list = adjacency_list_from_parts(
            false,
            1..=3u32,
            [(1, 2, Some(5)), (1, 2, Some(2)), (2, 3, None)],
        )
        .unwrap();
        assert_eq!(
            list.ordered_edges().unwrap(),
            vec![Edge(1, 2, Some(2)), Edge(2, 3, None)]
        );
    }

    #[test]
    fn start_vertex_is_the_smallest_key() {
        let list = adjacency_list_from_parts(true, [4u32, 2, 9], [(4, 2, None)]).unwrap();
        assert_eq!(list.start_vertex().unwrap(), 2);

        let empty: crate::repr::AdjacencyList<u32> = crate::repr::AdjacencyList::new(true, false);
        assert!(matches!(
            empty.start_vertex(),
            Err(GraphError::VertexDoesNotExist(_))
        ));
    }

    #[test]
    fn degree_and_edge_count_account_for_mirrors_and_loops() {
        let mut list = adjacency_list_from_parts(
            false,
            1..=3u32,
            [(1, 2, Some(4)), (2, 3, Some(1))],
        )
        .unwrap();
        assert_eq!(list.degree(&2).unwrap(), 2);
        assert_eq!(list.edge_count().unwrap(), 2);

        list.add_edge(&2, &2, Some(7)).unwrap();
        assert_eq!(list.degree(&2).unwrap(), 3);
        assert_eq!(list.edge_count().unwrap(), 3);

        let directed = adjacency_list_from_parts(
            true,
            1..=3u32,
            [(1, 2, Some(4)), (2, 1, Some(4)), (2, 3, Some(1))],
        )
        .unwrap();
        assert_eq!(directed.edge_count().unwrap(), 3);
    }

    #[test]
    fn adjacency_sort_is_weight_then_key() {
        let mut pairs = vec![
            (4u32, Some(2)),
            (1, Some(5)),
            (9, None),
            (2, Some(2)),
            (0, None),
        ];
        sort_adjacency(&mut pairs);
        assert_eq!(
            pairs,
            vec![(0, None), (9, None), (2, Some(2)), (4, Some(2)), (1, Some(5))]
        );
    }
}
