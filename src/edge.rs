//! Edges between keyed vertices.

use std::fmt::{Debug, Display, Formatter};

use crate::vertex::{VertexKey, Weight};

/// An edge from `self.0` to `self.1` with an optional weight.
///
/// The derived order sorts by source, then target, then weight, with an
/// absent weight ordering below every present one.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge<K>(pub K, pub K, pub Option<Weight>);

impl<K: VertexKey> Edge<K> {
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// The same edge with source and target swapped.
    pub fn reverse(self) -> Self {
        Edge(self.1, self.0, self.2)
    }

    /// The edge with its endpoints in sorted order, for undirected dedup.
    pub fn normalized(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            self.reverse()
        }
    }

    /// The weight of the edge, substituting `default` when unweighted.
    pub fn weight_or(&self, default: Weight) -> Weight {
        self.2.unwrap_or(default)
    }
}

impl<K: Display> Display for Edge<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.2 {
            Some(w) => write!(f, "({} -> {}, {w})", self.0, self.1),
            None => write!(f, "({} -> {})", self.0, self.1),
        }
    }
}

impl<K: Display> Debug for Edge<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl<K> From<(K, K)> for Edge<K> {
    fn from((u, v): (K, K)) -> Self {
        Edge(u, v, None)
    }
}

impl<K> From<(K, K, Weight)> for Edge<K> {
    fn from((u, v, w): (K, K, Weight)) -> Self {
        Edge(u, v, Some(w))
    }
}

impl<K> From<(K, K, Option<Weight>)> for Edge<K> {
    fn from((u, v, w): (K, K, Option<Weight>)) -> Self {
        Edge(u, v, w)
    }
}
