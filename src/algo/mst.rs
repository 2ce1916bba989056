/*!
Minimum spanning trees over undirected graphs.

Unweighted edges count as weight 1 for both algorithms. Prim spans the
start vertex's component; Kruskal spans every component, producing a
minimum spanning forest on disconnected input. Both report the total
weight plus the chosen tree edges.
*/

use std::collections::{BTreeMap, BTreeSet};

use fxhash::FxHashMap;

use crate::{
    algo::resolve_start,
    edge::Edge,
    error::{GraphError, Result},
    ops::NeighborQuery,
    vertex::{Distance, VertexKey, Weight},
};

/// Disjoint sets over vertex keys, with union by rank and path
/// compression on find.
struct UnionFind<K: VertexKey> {
    parent: FxHashMap<K, K>,
    rank: FxHashMap<K, u32>,
}

impl<K: VertexKey> UnionFind<K> {
    fn new(keys: impl IntoIterator<Item = K>) -> Self {
        let parent: FxHashMap<K, K> = keys.into_iter().map(|k| (k.clone(), k)).collect();
        Self {
            parent,
            rank: FxHashMap::default(),
        }
    }

    fn find(&mut self, key: &K) -> K {
        let mut root = key.clone();
        while let Some(p) = self.parent.get(&root) {
            if *p == root {
                break;
            }
            root = p.clone();
        }
        let mut cur = key.clone();
        while cur != root {
            let next = self.parent.get(&cur).cloned().unwrap_or_else(|| root.clone());
            self.parent.insert(cur, root.clone());
            cur = next;
        }
        root
    }

    /// Merges the sets of `a` and `b`; false when they already share one.
    fn union(&mut self, a: &K, b: &K) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        let rank_a = self.rank.get(&ra).copied().unwrap_or(0);
        let rank_b = self.rank.get(&rb).copied().unwrap_or(0);
        if rank_a < rank_b {
            self.parent.insert(ra, rb);
        } else {
            if rank_a == rank_b {
                self.rank.insert(ra.clone(), rank_a + 1);
            }
            self.parent.insert(rb, ra);
        }
        true
    }
}

fn require_undirected<G: NeighborQuery>(graph: &G, what: &str) -> Result<()> {
    if graph.is_directed() {
        Err(GraphError::UnsupportedGraphType(format!(
            "{what} requires an undirected graph"
        )))
    } else {
        Ok(())
    }
}

pub trait Msts: NeighborQuery + Sized {
    /// Prim's algorithm from `start` (smallest vertex when omitted). Tree
    /// edges carry their effective weight.
    fn prims(&self, start: Option<&Self::Key>) -> Result<(Weight, Vec<Edge<Self::Key>>)> {
        require_undirected(self, "a spanning tree")?;
        let start = resolve_start(self, start, GraphError::InvalidMstNode)?;

        let mut best: BTreeMap<Self::Key, Distance> = self
            .ordered_vertices()
            .into_iter()
            .map(|v| (v, Distance::Infinite))
            .collect();
        best.insert(start, Distance::Finite(0));
        let mut parent: FxHashMap<Self::Key, (Self::Key, Weight)> = FxHashMap::default();
        let mut remaining: BTreeSet<Self::Key> = self.ordered_vertices().into_iter().collect();

        let mut total = 0;
        let mut tree = Vec::new();
        while !remaining.is_empty() {
            let v = remaining
                .iter()
                .min_by_key(|k| {
                    (
                        best.get(*k).copied().unwrap_or(Distance::Infinite),
                        (*k).clone(),
                    )
                })
                .cloned()
                .ok_or_else(|| GraphError::VertexDoesNotExist("<empty graph>".to_string()))?;
            if best.get(&v) == Some(&Distance::Infinite) {
                // the rest is unreachable from the start
                break;
            }
            remaining.remove(&v);
            if let Some((p, w)) = parent.get(&v) {
                total += w;
                tree.push(Edge(p.clone(), v.clone(), Some(*w)));
            }
            for (n, w) in self.ordered_neighbors(&v)? {
                if !remaining.contains(&n) {
                    continue;
                }
                let cost = w.unwrap_or(1);
                if best
                    .get(&n)
                    .is_some_and(|&old| Distance::Finite(cost) < old)
                {
                    best.insert(n.clone(), Distance::Finite(cost));
                    parent.insert(n, (v.clone(), cost));
                }
            }
        }
        Ok((total, tree))
    }

    /// Kruskal's algorithm: edges ascending by weight, kept when they
    /// connect two components.
    fn kruskals(&self) -> Result<(Weight, Vec<Edge<Self::Key>>)> {
        require_undirected(self, "a spanning tree")?;
        let mut edges = self.ordered_edges()?;
        edges.sort_by_key(|e| (e.weight_or(1), e.0.clone(), e.1.clone()));

        let mut sets = UnionFind::new(self.ordered_vertices());
        let limit = self.vertex_count().saturating_sub(1);
        let mut total = 0;
        let mut tree = Vec::new();
        for edge in edges {
            if tree.len() == limit {
                break;
            }
            if sets.union(&edge.0, &edge.1) {
                total += edge.weight_or(1);
                tree.push(edge);
            }
        }
        Ok((total, tree))
    }

    /// Reserved: minimum arborescence for directed graphs.
    fn arborescence(&self) -> Result<(Weight, Vec<Edge<Self::Key>>)> {
        if !self.is_directed() {
            return Err(GraphError::UnsupportedGraphType(
                "an arborescence requires a directed graph".to_string(),
            ));
        }
        Err(GraphError::AlgorithmNotImplemented("arborescence"))
    }
}

impl<G: NeighborQuery> Msts for G {}
