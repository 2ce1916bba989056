/*!
Node-centric graphs: a sorted map from vertex key to its [`Neighborhood`].

[`UnweightedGraph`] and [`WeightedGraph`] are the two instantiations. All
edge bookkeeping (mirroring for undirected graphs, duplicate rejection for
simple graphs, phantom edge cleanup on vertex removal) lives here once,
generic over the storage.
*/

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::{
    error::{GraphError, Result},
    ops::{sort_adjacency, NeighborQuery},
    repr::neighborhood::{Neighborhood, UnweightedNbs, WeightedNbs},
    vertex::{VertexKey, Weight},
};

#[derive(Debug, Clone, PartialEq)]
pub struct NodeGraph<K: VertexKey, N: Neighborhood<K>> {
    nodes: BTreeMap<K, N>,
    directed: bool,
    multiple_edges: bool,
    default_weight: Weight,
}

/// A graph whose edges carry no weights.
pub type UnweightedGraph<K> = NodeGraph<K, UnweightedNbs<K>>;

/// A graph with one weight per edge.
pub type WeightedGraph<K> = NodeGraph<K, WeightedNbs<K>>;

impl<K: VertexKey, N: Neighborhood<K>> NodeGraph<K, N> {
    fn with_flags(directed: bool, multiple_edges: bool, default_weight: Weight) -> Self {
        Self {
            nodes: BTreeMap::new(),
            directed,
            multiple_edges,
            default_weight,
        }
    }

    fn verify(&self, vertex: &K) -> Result<()> {
        if self.nodes.contains_key(vertex) {
            Ok(())
        } else {
            Err(GraphError::missing(vertex))
        }
    }

    fn node_mut(&mut self, vertex: &K) -> Result<&mut N> {
        self.nodes
            .get_mut(vertex)
            .ok_or_else(|| GraphError::missing(vertex))
    }

    pub fn add_vertex(&mut self, vertex: K) -> Result<()> {
        if self.nodes.contains_key(&vertex) {
            return Err(GraphError::exists(&vertex));
        }
        self.nodes.insert(vertex, N::new(self.multiple_edges));
        Ok(())
    }

    /// Removes `vertex` together with every edge pointing at it.
    pub fn remove_vertex(&mut self, vertex: &K) -> Result<()> {
        self.verify(vertex)?;
        self.nodes.remove(vertex);
        for nbs in self.nodes.values_mut() {
            nbs.remove_all(vertex);
        }
        Ok(())
    }

    pub fn is_neighbor(&self, vertex: &K, neighbor: &K) -> Result<bool> {
        self.verify(vertex)?;
        Ok(self
            .nodes
            .get(vertex)
            .map(|n| n.contains(neighbor))
            .unwrap_or(false))
    }

    /// Switches the direction flag without touching stored edges.
    ///
    /// Bulk construction and conversions insert mirrored entries while
    /// flagged directed and flip at the end, so the symmetry invariant
    /// holds once this is called.
    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    /// Switches the multiplicity regime, re-encoding every neighborhood.
    /// Collapsing parallel edges keeps the smallest weight.
    pub fn set_multiple_edges(&mut self, multiple_edges: bool) {
        if self.multiple_edges == multiple_edges {
            return;
        }
        self.multiple_edges = multiple_edges;
        for nbs in self.nodes.values_mut() {
            nbs.set_multi(multiple_edges);
        }
    }

    fn insert_edge(&mut self, vertex: &K, neighbor: &K, weight: Option<Weight>) -> Result<()> {
        self.verify(vertex)?;
        self.verify(neighbor)?;
        if !self.multiple_edges {
            let taken = self
                .nodes
                .get(vertex)
                .map(|n| n.contains(neighbor))
                .unwrap_or(false);
            if taken {
                return Err(GraphError::neighbor_taken(vertex, neighbor));
            }
        }
        if !self.directed && vertex != neighbor {
            self.node_mut(neighbor)?.insert(vertex.clone(), weight);
        }
        self.node_mut(vertex)?.insert(neighbor.clone(), weight);
        Ok(())
    }

    fn delete_edge(&mut self, vertex: &K, neighbor: &K, weight: Option<Weight>) -> Result<()> {
        self.verify(vertex)?;
        self.verify(neighbor)?;
        if !self.node_mut(vertex)?.remove(neighbor, weight) {
            return Err(GraphError::no_neighbor(vertex, neighbor));
        }
        if !self.directed && vertex != neighbor {
            self.node_mut(neighbor)?.remove(vertex, weight);
        }
        Ok(())
    }

    /// Merges `other` into `self`. Shared vertices merge their
    /// neighborhoods: simple storage deduplicates (weighted entries keep
    /// the smaller weight), multi storage sums multiplicities. Vertices
    /// only in `other` are copied, re-encoded for `self`'s regime.
    pub fn union(&mut self, other: &Self) {
        for (k, nbs) in &other.nodes {
            match self.nodes.get_mut(k) {
                Some(mine) => mine.union(nbs),
                None => {
                    let mut copied = nbs.clone();
                    copied.set_multi(self.multiple_edges);
                    self.nodes.insert(k.clone(), copied);
                }
            }
        }
    }

    /// Keeps only vertices present in both graphs and, per vertex, only
    /// the edges both record.
    pub fn intersection(&mut self, other: &Self) {
        let keys = self.nodes.keys().cloned().collect_vec();
        for k in keys {
            match other.nodes.get(&k) {
                Some(theirs) => {
                    if let Some(mine) = self.nodes.get_mut(&k) {
                        mine.intersection(theirs);
                    }
                }
                None => {
                    self.nodes.remove(&k);
                }
            }
        }
        self.prune_missing_targets();
    }

    /// Removes `other`'s vertices from `self`, along with every surviving
    /// edge that pointed at one of them.
    pub fn difference(&mut self, other: &Self) {
        for k in other.nodes.keys() {
            self.nodes.remove(k);
        }
        for nbs in self.nodes.values_mut() {
            for k in other.nodes.keys() {
                nbs.remove_all(k);
            }
        }
    }

    /// Union plus an edge between every pair of vertices drawn one from
    /// each operand, where no such edge exists yet. New edges carry the
    /// default weight in weighted graphs.
    pub fn join(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.union(other);
        let weight = N::WEIGHTED.then_some(self.default_weight);
        let left = self.nodes.keys().cloned().collect_vec();
        let right = other.nodes.keys().cloned().collect_vec();
        for u in &left {
            for v in &right {
                if u == v {
                    continue;
                }
                result.connect_if_absent(u, v, weight);
                if !result.directed {
                    result.connect_if_absent(v, u, weight);
                }
            }
        }
        result
    }

    fn connect_if_absent(&mut self, vertex: &K, neighbor: &K, weight: Option<Weight>) {
        let have = self
            .nodes
            .get(vertex)
            .map(|n| n.contains(neighbor))
            .unwrap_or(false);
        if !have {
            if let Some(n) = self.nodes.get_mut(vertex) {
                n.insert(neighbor.clone(), weight);
            }
        }
    }

    fn prune_missing_targets(&mut self) {
        let keys = self.nodes.keys().cloned().collect_vec();
        for nbs in self.nodes.values_mut() {
            let targets = nbs
                .ordered_pairs()
                .into_iter()
                .map(|(k, _)| k)
                .dedup()
                .collect_vec();
            for t in targets {
                if keys.binary_search(&t).is_err() {
                    nbs.remove_all(&t);
                }
            }
        }
    }

    pub fn label(&self) -> String {
        format!(
            "{}{} {} graph",
            if self.directed { "directed" } else { "undirected" },
            if self.multiple_edges { " multi" } else { "" },
            if N::WEIGHTED { "weighted" } else { "unweighted" },
        )
    }
}

impl<K: VertexKey> NodeGraph<K, UnweightedNbs<K>> {
    pub fn new(directed: bool, multiple_edges: bool) -> Self {
        Self::with_flags(directed, multiple_edges, 0)
    }

    pub fn add_edge(&mut self, vertex: &K, neighbor: &K) -> Result<()> {
        self.insert_edge(vertex, neighbor, None)
    }

    pub fn remove_edge(&mut self, vertex: &K, neighbor: &K) -> Result<()> {
        self.delete_edge(vertex, neighbor, None)
    }
}

impl<K: VertexKey> NodeGraph<K, WeightedNbs<K>> {
    pub fn new(directed: bool, multiple_edges: bool) -> Self {
        Self::with_flags(directed, multiple_edges, 0)
    }

    pub fn with_default_weight(
        directed: bool,
        multiple_edges: bool,
        default_weight: Weight,
    ) -> Self {
        Self::with_flags(directed, multiple_edges, default_weight)
    }

    pub fn default_weight(&self) -> Weight {
        self.default_weight
    }

    /// Adds an edge, substituting the graph's default weight when none is
    /// given.
    pub fn add_edge(&mut self, vertex: &K, neighbor: &K, weight: Option<Weight>) -> Result<()> {
        let weight = weight.unwrap_or(self.default_weight);
        self.insert_edge(vertex, neighbor, Some(weight))
    }

    /// Removes one edge. Without a weight, parallel edges lose their
    /// heaviest member.
    pub fn remove_edge(&mut self, vertex: &K, neighbor: &K, weight: Option<Weight>) -> Result<()> {
        self.delete_edge(vertex, neighbor, weight)
    }
}

impl<K: VertexKey, N: Neighborhood<K>> NeighborQuery for NodeGraph<K, N> {
    type Key = K;

    fn ordered_neighbors(&self, vertex: &K) -> Result<Vec<(K, Option<Weight>)>> {
        let node = self
            .nodes
            .get(vertex)
            .ok_or_else(|| GraphError::missing(vertex))?;
        let mut pairs = node.ordered_pairs();
        sort_adjacency(&mut pairs);
        Ok(pairs)
    }

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn has_multiple_edges(&self) -> bool {
        self.multiple_edges
    }

    fn vertex_count(&self) -> usize {
        self.nodes.len()
    }

    fn ordered_vertices(&self) -> Vec<K> {
        self.nodes.keys().cloned().collect()
    }

    fn contains_vertex(&self, vertex: &K) -> bool {
        self.nodes.contains_key(vertex)
    }
}

impl<K: VertexKey, N: Neighborhood<K>> Display for NodeGraph<K, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}:", self.label())?;
        for (k, nbs) in &self.nodes {
            let entries = nbs
                .ordered_pairs()
                .into_iter()
                .map(|(n, w)| match w {
                    Some(w) => format!("{n}({w})"),
                    None => format!("{n}"),
                })
                .join(", ");
            writeln!(f, "  {k}: [{entries}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> UnweightedGraph<u32> {
        let mut g = UnweightedGraph::new(false, false);
        for v in 1..=4 {
            g.add_vertex(v).unwrap();
        }
        for (u, v) in [(1, 2), (2, 3), (3, 4), (4, 1)] {
            g.add_edge(&u, &v).unwrap();
        }
        g
    }

    #[test]
    fn vertex_errors() {
        let mut g: UnweightedGraph<u32> = UnweightedGraph::new(true, false);
        g.add_vertex(1).unwrap();
        assert_eq!(g.add_vertex(1), Err(GraphError::VertexAlreadyExists("1".into())));
        assert_eq!(
            g.add_edge(&1, &2),
            Err(GraphError::VertexDoesNotExist("2".into()))
        );
        assert_eq!(
            g.remove_vertex(&9),
            Err(GraphError::VertexDoesNotExist("9".into()))
        );
    }

    #[test]
    fn simple_graph_rejects_duplicate_edge() {
        let mut g: UnweightedGraph<u32> = UnweightedGraph::new(true, false);
        g.add_vertex(1).unwrap();
        g.add_vertex(2).unwrap();
        g.add_edge(&1, &2).unwrap();
        assert_eq!(
            g.add_edge(&1, &2),
            Err(GraphError::NeighborAlreadyExists {
                vertex: "1".into(),
                neighbor: "2".into()
            })
        );
    }

    #[test]
    fn undirected_edges_are_mirrored() {
        let g = square();
        assert!(g.is_neighbor(&2, &1).unwrap());
        assert!(g.is_neighbor(&1, &2).unwrap());
        assert_eq!(g.ordered_neighbors(&1).unwrap(), vec![(2, None), (4, None)]);

        let mut g = g;
        g.remove_edge(&2, &1).unwrap();
        assert!(!g.is_neighbor(&1, &2).unwrap());
    }

    #[test]
    fn self_loop_is_stored_once() {
        let mut g: UnweightedGraph<u32> = UnweightedGraph::new(false, false);
        g.add_vertex(1).unwrap();
        g.add_edge(&1, &1).unwrap();
        assert_eq!(g.ordered_neighbors(&1).unwrap(), vec![(1, None)]);
        g.remove_edge(&1, &1).unwrap();
        assert!(g.ordered_neighbors(&1).unwrap().is_empty());
    }

    #[test]
    fn removing_a_vertex_prunes_incoming_edges() {
        let mut g = square();
        g.remove_vertex(&2).unwrap();
        assert_eq!(g.ordered_neighbors(&1).unwrap(), vec![(4, None)]);
        assert_eq!(g.ordered_neighbors(&3).unwrap(), vec![(4, None)]);
    }

    #[test]
    fn weighted_default_weight_substitution() {
        let mut g: WeightedGraph<u32> = WeightedGraph::with_default_weight(true, false, 7);
        g.add_vertex(1).unwrap();
        g.add_vertex(2).unwrap();
        g.add_edge(&1, &2, None).unwrap();
        assert_eq!(g.ordered_neighbors(&1).unwrap(), vec![(2, Some(7))]);
    }

    #[test]
    fn neighbor_order_is_weight_then_key() {
        let mut g: WeightedGraph<u32> = WeightedGraph::new(true, true);
        for v in 1..=4 {
            g.add_vertex(v).unwrap();
        }
        g.add_edge(&1, &2, Some(9)).unwrap();
        g.add_edge(&1, &3, Some(4)).unwrap();
        g.add_edge(&1, &4, Some(4)).unwrap();
        g.add_edge(&1, &2, Some(1)).unwrap();
        assert_eq!(
            g.ordered_neighbors(&1).unwrap(),
            vec![(2, Some(1)), (3, Some(4)), (4, Some(4)), (2, Some(9))]
        );
    }

    #[test]
    fn union_copies_and_merges() {
        let mut a = square();
        let mut b: UnweightedGraph<u32> = UnweightedGraph::new(false, false);
        for v in [3, 4, 5] {
            b.add_vertex(v).unwrap();
        }
        b.add_edge(&4, &5).unwrap();
        b.add_edge(&3, &4).unwrap();

        a.union(&b);
        assert_eq!(a.ordered_vertices(), vec![1, 2, 3, 4, 5]);
        // shared edge 3-4 not duplicated
        assert_eq!(a.ordered_neighbors(&3).unwrap(), vec![(2, None), (4, None)]);
        assert!(a.is_neighbor(&4, &5).unwrap());
    }

    #[test]
    fn difference_drops_vertices_and_their_edges() {
        let mut a = square();
        let mut b: UnweightedGraph<u32> = UnweightedGraph::new(false, false);
        b.add_vertex(2).unwrap();

        a.difference(&b);
        assert_eq!(a.ordered_vertices(), vec![1, 3, 4]);
        assert_eq!(a.ordered_neighbors(&1).unwrap(), vec![(4, None)]);
        assert_eq!(a.ordered_neighbors(&3).unwrap(), vec![(4, None)]);
    }

    #[test]
    fn intersection_keeps_shared_structure() {
        let mut a = square();
        let b = square();
        a.intersection(&b);
        assert_eq!(a, square());

        let mut c = square();
        let mut only_vertices: UnweightedGraph<u32> = UnweightedGraph::new(false, false);
        only_vertices.add_vertex(1).unwrap();
        only_vertices.add_vertex(2).unwrap();
        c.intersection(&only_vertices);
        assert_eq!(c.ordered_vertices(), vec![1, 2]);
        // the second operand has no edges, so none survive
        assert!(!c.is_neighbor(&1, &2).unwrap());
    }

    #[test]
    fn join_connects_across_operands() {
        let mut a: WeightedGraph<u32> = WeightedGraph::with_default_weight(true, false, 3);
        a.add_vertex(1).unwrap();
        let mut b: WeightedGraph<u32> = WeightedGraph::new(true, false);
        b.add_vertex(2).unwrap();

        let joined = a.join(&b);
        assert_eq!(joined.ordered_neighbors(&1).unwrap(), vec![(2, Some(3))]);
        assert!(joined.ordered_neighbors(&2).unwrap().is_empty());
    }

    #[test]
    fn multi_graph_counts_parallel_edges() {
        let mut g: UnweightedGraph<u32> = UnweightedGraph::new(false, true);
        g.add_vertex(1).unwrap();
        g.add_vertex(2).unwrap();
        g.add_edge(&1, &2).unwrap();
        g.add_edge(&1, &2).unwrap();
        assert_eq!(g.edge_multiplicity(&1, &2).unwrap(), 2);
        assert_eq!(g.edge_multiplicity(&2, &1).unwrap(), 2);
        g.remove_edge(&1, &2).unwrap();
        assert_eq!(g.edge_multiplicity(&2, &1).unwrap(), 1);
    }

    #[test]
    fn display_lists_sorted_vertices() {
        let g = square();
        let shown = g.to_string();
        assert!(shown.starts_with("undirected unweighted graph:"));
        assert!(shown.contains("  1: [2, 4]"));
    }
}
