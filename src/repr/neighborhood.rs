/*!
Per-vertex neighbor storage.

Node graphs are generic over a [`Neighborhood`]: the unweighted flavor
keeps a sorted key set (or key -> multiplicity map), the weighted flavor a
sorted key -> weight map (or key -> weight list). Whether a neighborhood
allows parallel edges is a runtime property, since bulk construction only
discovers multiplicity while inserting edges.
*/

use std::collections::{BTreeMap, BTreeSet};

use smallvec::{smallvec, SmallVec};

use crate::vertex::{VertexKey, Weight};

/// Parallel edge weights are almost always few, so keep them inline.
pub type WeightList = SmallVec<[Weight; 2]>;

/// Storage for the neighbors of a single vertex.
pub trait Neighborhood<K: VertexKey>: Clone + PartialEq + std::fmt::Debug {
    /// Whether this storage records edge weights.
    const WEIGHTED: bool;

    fn new(multiple_edges: bool) -> Self;

    fn is_multi(&self) -> bool;

    /// Re-encodes the storage for the other multiplicity regime. Collapsing
    /// parallel edges keeps a single edge with the smallest weight.
    fn set_multi(&mut self, multiple_edges: bool);

    /// Records an edge. Returns `false` when the storage is simple and the
    /// neighbor is already present.
    fn insert(&mut self, neighbor: K, weight: Option<Weight>) -> bool;

    /// Removes one edge to `neighbor`. With parallel weighted edges and no
    /// weight given, the heaviest one goes. Returns `false` when no
    /// matching edge exists.
    fn remove(&mut self, neighbor: &K, weight: Option<Weight>) -> bool;

    /// Drops every edge to `neighbor`, used when the neighbor vertex is
    /// deleted from the graph.
    fn remove_all(&mut self, neighbor: &K);

    fn contains(&self, neighbor: &K) -> bool;

    fn multiplicity(&self, neighbor: &K) -> usize;

    /// One `(key, weight)` pair per edge, ascending by key.
    fn ordered_pairs(&self) -> Vec<(K, Option<Weight>)>;

    /// Number of edges, counting parallel edges individually.
    fn degree(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.degree() == 0
    }

    fn union(&mut self, other: &Self);

    fn intersection(&mut self, other: &Self);
}

/// Neighbor storage without weights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnweightedNbs<K: VertexKey> {
    Simple(BTreeSet<K>),
    Multi(BTreeMap<K, usize>),
}

impl<K: VertexKey> Neighborhood<K> for UnweightedNbs<K> {
    const WEIGHTED: bool = false;

    fn new(multiple_edges: bool) -> Self {
        if multiple_edges {
            UnweightedNbs::Multi(BTreeMap::new())
        } else {
            UnweightedNbs::Simple(BTreeSet::new())
        }
    }

    fn is_multi(&self) -> bool {
        matches!(self, UnweightedNbs::Multi(_))
    }

    fn set_multi(&mut self, multiple_edges: bool) {
        match (&*self, multiple_edges) {
            (UnweightedNbs::Simple(set), true) => {
                *self = UnweightedNbs::Multi(set.iter().cloned().map(|k| (k, 1)).collect());
            }
            (UnweightedNbs::Multi(counts), false) => {
                *self = UnweightedNbs::Simple(counts.keys().cloned().collect());
            }
            _ => {}
        }
    }

    fn insert(&mut self, neighbor: K, _weight: Option<Weight>) -> bool {
        match self {
            UnweightedNbs::Simple(set) => set.insert(neighbor),
            UnweightedNbs::Multi(counts) => {
                *counts.entry(neighbor).or_insert(0) += 1;
                true
            }
        }
    }

    fn remove(&mut self, neighbor: &K, _weight: Option<Weight>) -> bool {
        match self {
            UnweightedNbs::Simple(set) => set.remove(neighbor),
            UnweightedNbs::Multi(counts) => match counts.get_mut(neighbor) {
                Some(count) if *count > 1 => {
                    *count -= 1;
                    true
                }
                Some(_) => {
                    counts.remove(neighbor);
                    true
                }
                None => false,
            },
        }
    }

    fn remove_all(&mut self, neighbor: &K) {
        match self {
            UnweightedNbs::Simple(set) => {
                set.remove(neighbor);
            }
            UnweightedNbs::Multi(counts) => {
                counts.remove(neighbor);
            }
        }
    }

    fn contains(&self, neighbor: &K) -> bool {
        match self {
            UnweightedNbs::Simple(set) => set.contains(neighbor),
            UnweightedNbs::Multi(counts) => counts.contains_key(neighbor),
        }
    }

    fn multiplicity(&self, neighbor: &K) -> usize {
        match self {
            UnweightedNbs::Simple(set) => usize::from(set.contains(neighbor)),
            UnweightedNbs::Multi(counts) => counts.get(neighbor).copied().unwrap_or(0),
        }
    }

    fn ordered_pairs(&self) -> Vec<(K, Option<Weight>)> {
        match self {
            UnweightedNbs::Simple(set) => set.iter().cloned().map(|k| (k, None)).collect(),
            UnweightedNbs::Multi(counts) => counts
                .iter()
                .flat_map(|(k, &count)| std::iter::repeat((k.clone(), None)).take(count))
                .collect(),
        }
    }

    fn degree(&self) -> usize {
        match self {
            UnweightedNbs::Simple(set) => set.len(),
            UnweightedNbs::Multi(counts) => counts.values().sum(),
        }
    }

    fn union(&mut self, other: &Self) {
        match self {
            UnweightedNbs::Simple(set) => match other {
                UnweightedNbs::Simple(rhs) => set.extend(rhs.iter().cloned()),
                UnweightedNbs::Multi(rhs) => set.extend(rhs.keys().cloned()),
            },
            UnweightedNbs::Multi(counts) => match other {
                UnweightedNbs::Simple(rhs) => {
                    for k in rhs {
                        *counts.entry(k.clone()).or_insert(0) += 1;
                    }
                }
                UnweightedNbs::Multi(rhs) => {
                    for (k, count) in rhs {
                        *counts.entry(k.clone()).or_insert(0) += count;
                    }
                }
            },
        }
    }

    fn intersection(&mut self, other: &Self) {
        match self {
            UnweightedNbs::Simple(set) => set.retain(|k| other.contains(k)),
            UnweightedNbs::Multi(counts) => {
                let mut kept = BTreeMap::new();
                for (k, &count) in counts.iter() {
                    let min = count.min(other.multiplicity(k));
                    if min > 0 {
                        kept.insert(k.clone(), min);
                    }
                }
                *counts = kept;
            }
        }
    }

}

/// Neighbor storage with one weight per edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeightedNbs<K: VertexKey> {
    Simple(BTreeMap<K, Weight>),
    Multi(BTreeMap<K, WeightList>),
}

impl<K: VertexKey> WeightedNbs<K> {
    fn min_weight(weights: &WeightList) -> Weight {
        weights.iter().copied().min().unwrap_or(0)
    }

    /// All weights recorded for `neighbor`.
    pub fn weights(&self, neighbor: &K) -> WeightList {
        match self {
            WeightedNbs::Simple(map) => {
                map.get(neighbor).map(|&w| smallvec![w]).unwrap_or_default()
            }
            WeightedNbs::Multi(map) => map.get(neighbor).cloned().unwrap_or_default(),
        }
    }
}

impl<K: VertexKey> Neighborhood<K> for WeightedNbs<K> {
    const WEIGHTED: bool = true;

    fn new(multiple_edges: bool) -> Self {
        if multiple_edges {
            WeightedNbs::Multi(BTreeMap::new())
        } else {
            WeightedNbs::Simple(BTreeMap::new())
        }
    }

    fn is_multi(&self) -> bool {
        matches!(self, WeightedNbs::Multi(_))
    }

    fn set_multi(&mut self, multiple_edges: bool) {
        match (&*self, multiple_edges) {
            (WeightedNbs::Simple(map), true) => {
                *self = WeightedNbs::Multi(
                    map.iter().map(|(k, &w)| (k.clone(), smallvec![w])).collect(),
                );
            }
            (WeightedNbs::Multi(map), false) => {
                *self = WeightedNbs::Simple(
                    map.iter()
                        .map(|(k, ws)| (k.clone(), Self::min_weight(ws)))
                        .collect(),
                );
            }
            _ => {}
        }
    }

    fn insert(&mut self, neighbor: K, weight: Option<Weight>) -> bool {
        let weight = weight.unwrap_or(0);
        match self {
            WeightedNbs::Simple(map) => {
                if map.contains_key(&neighbor) {
                    false
                } else {
                    map.insert(neighbor, weight);
                    true
                }
            }
            WeightedNbs::Multi(map) => {
                map.entry(neighbor).or_default().push(weight);
                true
            }
        }
    }

    fn remove(&mut self, neighbor: &K, weight: Option<Weight>) -> bool {
        match self {
            WeightedNbs::Simple(map) => map.remove(neighbor).is_some(),
            WeightedNbs::Multi(map) => {
                let Some(weights) = map.get_mut(neighbor) else {
                    return false;
                };
                let target = match weight {
                    Some(w) if weights.contains(&w) => w,
                    // no (matching) weight given: drop the heaviest edge
                    _ => match weights.iter().copied().max() {
                        Some(w) => w,
                        None => return false,
                    },
                };
                if let Some(pos) = weights.iter().position(|&w| w == target) {
                    weights.remove(pos);
                }
                if weights.is_empty() {
                    map.remove(neighbor);
                }
                true
            }
        }
    }

    fn remove_all(&mut self, neighbor: &K) {
        match self {
            WeightedNbs::Simple(map) => {
                map.remove(neighbor);
            }
            WeightedNbs::Multi(map) => {
                map.remove(neighbor);
            }
        }
    }

    fn contains(&self, neighbor: &K) -> bool {
        match self {
            WeightedNbs::Simple(map) => map.contains_key(neighbor),
            WeightedNbs::Multi(map) => map.contains_key(neighbor),
        }
    }

    fn multiplicity(&self, neighbor: &K) -> usize {
        match self {
            WeightedNbs::Simple(map) => usize::from(map.contains_key(neighbor)),
            WeightedNbs::Multi(map) => map.get(neighbor).map(|ws| ws.len()).unwrap_or(0),
        }
    }

    fn ordered_pairs(&self) -> Vec<(K, Option<Weight>)> {
        match self {
            WeightedNbs::Simple(map) => {
                map.iter().map(|(k, &w)| (k.clone(), Some(w))).collect()
            }
            WeightedNbs::Multi(map) => map
                .iter()
                .flat_map(|(k, ws)| ws.iter().map(|&w| (k.clone(), Some(w))))
                .collect(),
        }
    }

    fn degree(&self) -> usize {
        match self {
            WeightedNbs::Simple(map) => map.len(),
            WeightedNbs::Multi(map) => map.values().map(|ws| ws.len()).sum(),
        }
    }

    fn union(&mut self, other: &Self) {
        match self {
            WeightedNbs::Simple(map) => {
                let incoming: Vec<(K, Weight)> = match other {
                    WeightedNbs::Simple(rhs) => {
                        rhs.iter().map(|(k, &w)| (k.clone(), w)).collect()
                    }
                    WeightedNbs::Multi(rhs) => rhs
                        .iter()
                        .map(|(k, ws)| (k.clone(), Self::min_weight(ws)))
                        .collect(),
                };
                for (k, w) in incoming {
                    map.entry(k)
                        .and_modify(|existing| *existing = (*existing).min(w))
                        .or_insert(w);
                }
            }
            WeightedNbs::Multi(map) => {
                let incoming: Vec<(K, WeightList)> = match other {
                    WeightedNbs::Simple(rhs) => {
                        rhs.iter().map(|(k, &w)| (k.clone(), smallvec![w])).collect()
                    }
                    WeightedNbs::Multi(rhs) => {
                        rhs.iter().map(|(k, ws)| (k.clone(), ws.clone())).collect()
                    }
                };
                for (k, ws) in incoming {
                    map.entry(k).or_default().extend(ws);
                }
            }
        }
    }

    fn intersection(&mut self, other: &Self) {
        match self {
            WeightedNbs::Simple(map) => {
                map.retain(|k, w| other.weights(k).contains(w));
            }
            WeightedNbs::Multi(map) => {
                let mut kept = BTreeMap::new();
                for (k, ws) in map.iter() {
                    let shared = multiset_intersection(ws, &other.weights(k));
                    if !shared.is_empty() {
                        kept.insert(k.clone(), shared);
                    }
                }
                *map = kept;
            }
        }
    }

}

/// Multiset intersection of two weight lists, i.e. each weight appears
/// `min(count_a, count_b)` times.
fn multiset_intersection(a: &WeightList, b: &WeightList) -> WeightList {
    let mut remaining: Vec<Weight> = b.to_vec();
    let mut out = WeightList::new();
    for &w in a {
        if let Some(pos) = remaining.iter().position(|&x| x == w) {
            remaining.swap_remove(pos);
            out.push(w);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unweighted_multi_counts_parallel_edges() {
        let mut nbs: UnweightedNbs<u32> = Neighborhood::new(true);
        assert!(nbs.insert(3, None));
        assert!(nbs.insert(3, None));
        assert_eq!(nbs.multiplicity(&3), 2);
        assert_eq!(nbs.degree(), 2);
        assert_eq!(nbs.ordered_pairs(), vec![(3, None), (3, None)]);

        assert!(nbs.remove(&3, None));
        assert_eq!(nbs.multiplicity(&3), 1);
        assert!(nbs.remove(&3, None));
        assert!(!nbs.remove(&3, None));
    }

    #[test]
    fn unweighted_simple_rejects_duplicates() {
        let mut nbs: UnweightedNbs<u32> = Neighborhood::new(false);
        assert!(nbs.insert(1, None));
        assert!(!nbs.insert(1, None));
        assert_eq!(nbs.degree(), 1);
    }

    #[test]
    fn weighted_multi_removes_heaviest_without_weight() {
        let mut nbs: WeightedNbs<u32> = Neighborhood::new(true);
        nbs.insert(7, Some(5));
        nbs.insert(7, Some(2));
        nbs.insert(7, Some(9));
        assert!(nbs.remove(&7, None));
        assert_eq!(nbs.weights(&7).to_vec(), vec![5, 2]);
        assert!(nbs.remove(&7, Some(2)));
        assert_eq!(nbs.weights(&7).to_vec(), vec![5]);
    }

    #[test]
    fn collapse_to_simple_keeps_minimum_weight() {
        let mut nbs: WeightedNbs<u32> = Neighborhood::new(true);
        nbs.insert(1, Some(4));
        nbs.insert(1, Some(-2));
        nbs.insert(1, Some(3));
        nbs.set_multi(false);
        assert_eq!(nbs.weights(&1).to_vec(), vec![-2]);
        assert_eq!(nbs.multiplicity(&1), 1);
    }

    #[test]
    fn weighted_union_of_simple_takes_minimum() {
        let mut a: WeightedNbs<u32> = Neighborhood::new(false);
        a.insert(1, Some(5));
        a.insert(2, Some(1));
        let mut b: WeightedNbs<u32> = Neighborhood::new(false);
        b.insert(1, Some(3));
        b.insert(3, Some(8));

        a.union(&b);
        assert_eq!(a.weights(&1).to_vec(), vec![3]);
        assert_eq!(a.weights(&2).to_vec(), vec![1]);
        assert_eq!(a.weights(&3).to_vec(), vec![8]);
    }

    #[test]
    fn multi_union_sums_multiplicities() {
        let mut a: UnweightedNbs<u32> = Neighborhood::new(true);
        a.insert(1, None);
        a.insert(1, None);
        let mut b: UnweightedNbs<u32> = Neighborhood::new(true);
        b.insert(1, None);
        a.union(&b);
        assert_eq!(a.multiplicity(&1), 3);
    }

    #[test]
    fn weighted_multiset_intersection() {
        let mut a: WeightedNbs<u32> = Neighborhood::new(true);
        a.insert(1, Some(2));
        a.insert(1, Some(2));
        a.insert(1, Some(5));
        let mut b: WeightedNbs<u32> = Neighborhood::new(true);
        b.insert(1, Some(2));
        b.insert(1, Some(7));

        let mut inter = a.clone();
        inter.intersection(&b);
        assert_eq!(inter.weights(&1).to_vec(), vec![2]);
    }
}
