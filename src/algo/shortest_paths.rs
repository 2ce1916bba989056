/*!
Single-source and all-pairs shortest paths.

A quirk worth knowing: Dijkstra prices an unweighted edge at 1,
Bellman-Ford at 0. The two algorithms therefore only agree on fully
weighted graphs. Floyd-Warshall runs over an adjacency matrix view and
prices unweighted edges at 1 as well.
*/

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use crate::{
    algo::resolve_start,
    convert::to_adjacency_matrix,
    edge::Edge,
    error::{GraphError, Result},
    ops::NeighborQuery,
    vertex::{Distance, Weight},
};

/// All-pairs distance table: for each source, the distance to every
/// vertex (itself included) in ascending key order.
pub type DistanceTable<K> = BTreeMap<K, Vec<(K, Distance)>>;

pub trait ShortestPaths: NeighborQuery + Sized {
    /// Dijkstra from `start` (smallest vertex when omitted). Unreachable
    /// vertices map to [`Distance::Infinite`]. Negative weights are not
    /// checked; results are only meaningful without them.
    fn dijkstras(&self, start: Option<&Self::Key>) -> Result<BTreeMap<Self::Key, Distance>> {
        let start = resolve_start(self, start, GraphError::VertexDoesNotExist)?;
        let mut dist: BTreeMap<Self::Key, Distance> = self
            .ordered_vertices()
            .into_iter()
            .map(|v| (v, Distance::Infinite))
            .collect();
        dist.insert(start.clone(), Distance::Finite(0));

        let mut heap: BinaryHeap<Reverse<(Weight, Self::Key)>> = BinaryHeap::new();
        heap.push(Reverse((0, start)));
        while let Some(Reverse((d, v))) = heap.pop() {
            if dist.get(&v) != Some(&Distance::Finite(d)) {
                continue;
            }
            for (n, w) in self.ordered_neighbors(&v)? {
                let next = d + w.unwrap_or(1);
                if dist.get(&n).is_some_and(|&old| Distance::Finite(next) < old) {
                    dist.insert(n.clone(), Distance::Finite(next));
                    heap.push(Reverse((next, n)));
                }
            }
        }
        Ok(dist)
    }

    /// Bellman-Ford from `start`; handles negative weights. Unweighted
    /// edges cost 0 here. Relaxes the deduplicated
    /// [`NeighborQuery::ordered_edges`] list for |V|-1 passes and returns
    /// whatever distances that produced; negative-cycle screening is
    /// [`ShortestPaths::has_negative_cycle`]'s job, not this one's.
    fn bellman_ford(&self, start: Option<&Self::Key>) -> Result<BTreeMap<Self::Key, Distance>> {
        let start = resolve_start(self, start, GraphError::VertexDoesNotExist)?;
        let mut dist: BTreeMap<Self::Key, Distance> = self
            .ordered_vertices()
            .into_iter()
            .map(|v| (v, Distance::Infinite))
            .collect();
        dist.insert(start, Distance::Finite(0));

        let edges: Vec<(Self::Key, Self::Key, Weight)> = self
            .ordered_edges()?
            .into_iter()
            .map(|Edge(u, v, w)| (u, v, w.unwrap_or(0)))
            .collect();

        for _ in 1..self.vertex_count() {
            let mut changed = false;
            for (u, v, w) in &edges {
                let through = dist[u].plus(*w);
                if through < dist[v] {
                    dist.insert(v.clone(), through);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        Ok(dist)
    }

    /// Floyd-Warshall over the matrix view of the graph. Parallel edges
    /// collapse to their smallest weight during conversion. A vertex's
    /// distance to itself is 0 unless a self-loop prices it differently.
    fn floyd_warshall(&self) -> Result<DistanceTable<Self::Key>> {
        let matrix = to_adjacency_matrix(self)?;
        let keys = matrix.ordered_vertices();
        let n = keys.len();

        let mut dist = vec![vec![Distance::Infinite; n]; n];
        for (i, u) in keys.iter().enumerate() {
            for (j, v) in keys.iter().enumerate() {
                dist[i][j] = match matrix.cell(u, v)?.distance() {
                    Some(w) => Distance::Finite(w),
                    None if i == j => Distance::Finite(0),
                    None => Distance::Infinite,
                };
            }
        }
        for k in 0..n {
            for i in 0..n {
                let Distance::Finite(ik) = dist[i][k] else {
                    continue;
                };
                for j in 0..n {
                    let through = dist[k][j].plus(ik);
                    if through < dist[i][j] {
                        dist[i][j] = through;
                    }
                }
            }
        }

        Ok(keys
            .iter()
            .enumerate()
            .map(|(i, u)| {
                let row = keys
                    .iter()
                    .enumerate()
                    .map(|(j, v)| (v.clone(), dist[i][j]))
                    .collect();
                (u.clone(), row)
            })
            .collect())
    }

    /// True when some vertex can reach itself at negative cost.
    fn has_negative_cycle(&self) -> Result<bool> {
        let table = self.floyd_warshall()?;
        Ok(table.iter().any(|(u, row)| {
            row.iter()
                .any(|(v, d)| v == u && matches!(d, Distance::Finite(w) if *w < 0))
        }))
    }

    /// Reserved: Johnson's all-pairs algorithm.
    fn johnsons(&self) -> Result<DistanceTable<Self::Key>> {
        Err(GraphError::AlgorithmNotImplemented("johnsons"))
    }
}

impl<G: NeighborQuery> ShortestPaths for G {}
