/*!
Adjacency lists: one flat `(neighbor, weight)` pair list per vertex.

Entries may mix weighted and unweighted edges, and under the multi-edge
regime the same pair may appear several times. Insertion order is an
implementation detail; the sorted contract order is produced on query.
*/

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::{
    error::{GraphError, Result},
    ops::{sort_adjacency, NeighborQuery},
    vertex::{weight_rank, VertexKey, Weight},
};

type Pair<K> = (K, Option<Weight>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyList<K: VertexKey> {
    lists: BTreeMap<K, Vec<Pair<K>>>,
    directed: bool,
    multiple_edges: bool,
}

impl<K: VertexKey> AdjacencyList<K> {
    pub fn new(directed: bool, multiple_edges: bool) -> Self {
        Self {
            lists: BTreeMap::new(),
            directed,
            multiple_edges,
        }
    }

    fn verify(&self, vertex: &K) -> Result<()> {
        if self.lists.contains_key(vertex) {
            Ok(())
        } else {
            Err(GraphError::missing(vertex))
        }
    }

    pub fn add_vertex(&mut self, vertex: K) -> Result<()> {
        if self.lists.contains_key(&vertex) {
            return Err(GraphError::exists(&vertex));
        }
        self.lists.insert(vertex, Vec::new());
        Ok(())
    }

    pub fn remove_vertex(&mut self, vertex: &K) -> Result<()> {
        self.verify(vertex)?;
        self.lists.remove(vertex);
        for list in self.lists.values_mut() {
            list.retain(|(k, _)| k != vertex);
        }
        Ok(())
    }

    pub fn is_neighbor(&self, vertex: &K, neighbor: &K) -> Result<bool> {
        self.verify(vertex)?;
        Ok(self
            .lists
            .get(vertex)
            .map(|l| l.iter().any(|(k, _)| k == neighbor))
            .unwrap_or(false))
    }

    pub fn add_edge(&mut self, vertex: &K, neighbor: &K, weight: Option<Weight>) -> Result<()> {
        self.verify(vertex)?;
        self.verify(neighbor)?;
        if !self.multiple_edges && self.is_neighbor(vertex, neighbor)? {
            return Err(GraphError::neighbor_taken(vertex, neighbor));
        }
        if !self.directed && vertex != neighbor {
            if let Some(list) = self.lists.get_mut(neighbor) {
                list.push((vertex.clone(), weight));
            }
        }
        if let Some(list) = self.lists.get_mut(vertex) {
            list.push((neighbor.clone(), weight));
        }
        Ok(())
    }

    /// Removes one edge. With a weight given the exact pair must exist;
    /// without one, the heaviest matching entry goes (unweighted entries
    /// rank as weight 0 for this pick).
    pub fn remove_edge(&mut self, vertex: &K, neighbor: &K, weight: Option<Weight>) -> Result<()> {
        self.verify(vertex)?;
        self.verify(neighbor)?;
        let list = self
            .lists
            .get_mut(vertex)
            .ok_or_else(|| GraphError::missing(vertex))?;
        let target: Pair<K> = match weight {
            Some(w) => {
                if !list.contains(&(neighbor.clone(), Some(w))) {
                    return Err(GraphError::no_neighbor(vertex, neighbor));
                }
                (neighbor.clone(), Some(w))
            }
            None => list
                .iter()
                .filter(|(k, _)| k == neighbor)
                .max_by_key(|(_, w)| w.unwrap_or(0))
                .cloned()
                .ok_or_else(|| GraphError::no_neighbor(vertex, neighbor))?,
        };
        remove_first(list, &target);
        if !self.directed && vertex != neighbor {
            if let Some(list) = self.lists.get_mut(neighbor) {
                remove_first(list, &(vertex.clone(), target.1));
            }
        }
        Ok(())
    }

    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    pub fn set_multiple_edges(&mut self, multiple_edges: bool) {
        self.multiple_edges = multiple_edges;
    }

    /// Merges `other` into `self`. Under the simple regime exact duplicate
    /// pairs collapse; under the multi regime lists concatenate.
    pub fn union(&mut self, other: &Self) {
        for (k, list) in &other.lists {
            let mine = self.lists.entry(k.clone()).or_default();
            mine.extend(list.iter().cloned());
            if !self.multiple_edges {
                mine.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| weight_rank(a.1).cmp(&weight_rank(b.1))));
                mine.dedup();
            }
        }
    }

    /// Keeps only shared vertices and, per vertex, the pairs both lists
    /// contain (multiset semantics under the multi regime).
    pub fn intersection(&mut self, other: &Self) {
        let keys = self.lists.keys().cloned().collect_vec();
        for k in keys {
            match other.lists.get(&k) {
                Some(theirs) => {
                    if let Some(mine) = self.lists.get_mut(&k) {
                        *mine = pair_intersection(mine, theirs);
                    }
                }
                None => {
                    self.lists.remove(&k);
                }
            }
        }
        let keys = self.lists.keys().cloned().collect_vec();
        for list in self.lists.values_mut() {
            list.retain(|(k, _)| keys.binary_search(k).is_ok());
        }
    }

    /// Removes `other`'s vertices and every surviving entry pointing at
    /// one of them.
    pub fn difference(&mut self, other: &Self) {
        for k in other.lists.keys() {
            self.lists.remove(k);
        }
        for list in self.lists.values_mut() {
            list.retain(|(k, _)| !other.lists.contains_key(k));
        }
    }

    /// Union plus an unweighted edge between every cross pair that is not
    /// already connected.
    pub fn join(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.union(other);
        let left = self.lists.keys().cloned().collect_vec();
        let right = other.lists.keys().cloned().collect_vec();
        for u in &left {
            for v in &right {
                if u == v {
                    continue;
                }
                result.connect_if_absent(u, v);
                if !result.directed {
                    result.connect_if_absent(v, u);
                }
            }
        }
        result
    }

    fn connect_if_absent(&mut self, vertex: &K, neighbor: &K) {
        let have = self
            .lists
            .get(vertex)
            .map(|l| l.iter().any(|(k, _)| k == neighbor))
            .unwrap_or(false);
        if !have {
            if let Some(list) = self.lists.get_mut(vertex) {
                list.push((neighbor.clone(), None));
            }
        }
    }

    pub fn label(&self) -> String {
        format!(
            "{}{} adjacency list",
            if self.directed { "directed" } else { "undirected" },
            if self.multiple_edges { " multi" } else { "" },
        )
    }
}

fn remove_first<K: VertexKey>(list: &mut Vec<Pair<K>>, target: &Pair<K>) {
    if let Some(pos) = list.iter().position(|p| p == target) {
        list.remove(pos);
    }
}

fn pair_intersection<K: VertexKey>(a: &[Pair<K>], b: &[Pair<K>]) -> Vec<Pair<K>> {
    let mut remaining = b.to_vec();
    let mut out = Vec::new();
    for p in a {
        if let Some(pos) = remaining.iter().position(|q| q == p) {
            remaining.swap_remove(pos);
            out.push(p.clone());
        }
    }
    out
}

impl<K: VertexKey> NeighborQuery for AdjacencyList<K> {
    type Key = K;

    fn ordered_neighbors(&self, vertex: &K) -> Result<Vec<Pair<K>>> {
        let mut pairs = self
            .lists
            .get(vertex)
            .ok_or_else(|| GraphError::missing(vertex))?
            .clone();
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
        self.lists.len()
    }

    fn ordered_vertices(&self) -> Vec<K> {
        self.lists.keys().cloned().collect()
    }

    fn contains_vertex(&self, vertex: &K) -> bool {
        self.lists.contains_key(vertex)
    }
}

impl<K: VertexKey> Display for AdjacencyList<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}:", self.label())?;
        for (k, list) in &self.lists {
            let entries = list
                .iter()
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

    fn multi_list() -> AdjacencyList<u32> {
        let mut g = AdjacencyList::new(false, true);
        for v in 1..=3 {
            g.add_vertex(v).unwrap();
        }
        g.add_edge(&1, &2, Some(4)).unwrap();
        g.add_edge(&1, &2, Some(9)).unwrap();
        g.add_edge(&1, &3, None).unwrap();
        g
    }

    #[test]
    fn parallel_edges_and_mixed_weights() {
        let g = multi_list();
        assert_eq!(
            g.ordered_neighbors(&1).unwrap(),
            vec![(3, None), (2, Some(4)), (2, Some(9))]
        );
        assert_eq!(g.edge_multiplicity(&1, &2).unwrap(), 2);
        assert_eq!(g.ordered_neighbors(&2).unwrap(), vec![(1, Some(4)), (1, Some(9))]);
    }

    #[test]
    fn remove_without_weight_takes_heaviest() {
        let mut g = multi_list();
        g.remove_edge(&1, &2, None).unwrap();
        assert_eq!(g.ordered_neighbors(&1).unwrap(), vec![(3, None), (2, Some(4))]);
        // the mirrored entry disappears too
        assert_eq!(g.ordered_neighbors(&2).unwrap(), vec![(1, Some(4))]);
    }

    #[test]
    fn remove_exact_weight() {
        let mut g = multi_list();
        g.remove_edge(&1, &2, Some(4)).unwrap();
        assert_eq!(g.ordered_neighbors(&2).unwrap(), vec![(1, Some(9))]);
        assert_eq!(
            g.remove_edge(&1, &2, Some(4)),
            Err(GraphError::NeighborDoesNotExist {
                vertex: "1".into(),
                neighbor: "2".into()
            })
        );
    }

    #[test]
    fn simple_list_rejects_duplicates() {
        let mut g: AdjacencyList<u32> = AdjacencyList::new(true, false);
        g.add_vertex(1).unwrap();
        g.add_vertex(2).unwrap();
        g.add_edge(&1, &2, Some(1)).unwrap();
        assert!(matches!(
            g.add_edge(&1, &2, Some(5)),
            Err(GraphError::NeighborAlreadyExists { .. })
        ));
    }

    #[test]
    fn removing_a_vertex_prunes_entries() {
        let mut g = multi_list();
        g.remove_vertex(&2).unwrap();
        assert_eq!(g.ordered_neighbors(&1).unwrap(), vec![(3, None)]);
    }

    #[test]
    fn union_of_simple_lists_deduplicates() {
        let mut a: AdjacencyList<u32> = AdjacencyList::new(true, false);
        a.add_vertex(1).unwrap();
        a.add_vertex(2).unwrap();
        a.add_edge(&1, &2, Some(3)).unwrap();

        let mut b: AdjacencyList<u32> = AdjacencyList::new(true, false);
        b.add_vertex(1).unwrap();
        b.add_vertex(2).unwrap();
        b.add_edge(&1, &2, Some(3)).unwrap();

        a.union(&b);
        assert_eq!(a.ordered_neighbors(&1).unwrap(), vec![(2, Some(3))]);
    }

    #[test]
    fn union_of_multi_lists_concatenates() {
        let mut a = multi_list();
        let b = multi_list();
        a.union(&b);
        assert_eq!(a.edge_multiplicity(&1, &2).unwrap(), 4);
    }

    #[test]
    fn join_adds_unweighted_cross_edges() {
        let mut a: AdjacencyList<u32> = AdjacencyList::new(true, false);
        a.add_vertex(1).unwrap();
        let mut b: AdjacencyList<u32> = AdjacencyList::new(true, false);
        b.add_vertex(2).unwrap();

        let joined = a.join(&b);
        assert_eq!(joined.ordered_neighbors(&1).unwrap(), vec![(2, None)]);
        assert!(joined.ordered_neighbors(&2).unwrap().is_empty());
    }
}
