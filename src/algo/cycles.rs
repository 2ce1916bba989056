/*!
Cycle detection and Hamiltonian cycles.

`find_cycle` runs a depth-first walk with an explicit frame stack and the
current path alongside. A back edge onto the path closes a cycle; in
undirected graphs the edge back to the immediate parent does not count,
unless it is a parallel edge. The Hamiltonian search is plain recursive
backtracking and exponential in the worst case.
*/

use fxhash::FxHashSet;

use crate::{
    algo::neighbor_keys,
    error::{GraphError, Result},
    ops::NeighborQuery,
};

/// One suspended depth-first visit: vertex, its parent in the walk, its
/// neighbor keys and the index of the next one to try.
type Frame<K> = (K, Option<K>, Vec<K>, usize);

fn close_cycle<K: PartialEq + Clone>(path: &[K], at: &K) -> Vec<K> {
    let start = path.iter().position(|k| k == at).unwrap_or(0);
    let mut cycle = path[start..].to_vec();
    cycle.push(at.clone());
    cycle
}

fn search_cycle<G: NeighborQuery>(graph: &G) -> Result<Option<Vec<G::Key>>> {
    let directed = graph.is_directed();
    let multi = graph.has_multiple_edges();
    let mut visited: FxHashSet<G::Key> = FxHashSet::default();

    for root in graph.ordered_vertices() {
        if !visited.insert(root.clone()) {
            continue;
        }
        let mut path = vec![root.clone()];
        let mut stack: Vec<Frame<G::Key>> =
            vec![(root.clone(), None, neighbor_keys(graph, &root)?, 0)];

        while let Some((v, parent, nbrs, idx)) = stack.last_mut() {
            if *idx >= nbrs.len() {
                stack.pop();
                path.pop();
                continue;
            }
            let n = nbrs[*idx].clone();
            *idx += 1;
            let v = v.clone();
            let parent = parent.clone();

            if visited.insert(n.clone()) {
                path.push(n.clone());
                let nbrs = neighbor_keys(graph, &n)?;
                stack.push((n, Some(v), nbrs, 0));
                continue;
            }
            let back_edge = if directed {
                path.contains(&n)
            } else {
                parent.as_ref() != Some(&n) && path.contains(&n)
            };
            if back_edge {
                return Ok(Some(close_cycle(&path, &n)));
            }
            // parallel edges and self-loops are two-vertex cycles
            if !directed && multi && (v == n || graph.edge_multiplicity(&v, &n)? > 1) {
                return Ok(Some(close_cycle(&path, &n)));
            }
        }
    }
    Ok(None)
}

fn extend_hamiltonian<G: NeighborQuery>(
    graph: &G,
    path: &mut Vec<G::Key>,
    used: &mut FxHashSet<G::Key>,
    total: usize,
) -> Result<bool> {
    let Some(last) = path.last().cloned() else {
        return Ok(false);
    };
    if path.len() == total {
        return graph.has_edge(&last, &path[0]);
    }
    for v in graph.ordered_vertices() {
        if used.contains(&v) || !graph.has_edge(&last, &v)? {
            continue;
        }
        path.push(v.clone());
        used.insert(v.clone());
        if extend_hamiltonian(graph, path, used, total)? {
            return Ok(true);
        }
        path.pop();
        used.remove(&v);
    }
    Ok(false)
}

pub trait Cycles: NeighborQuery + Sized {
    /// The first cycle found in key order, as a closed vertex walk
    /// (`cycle[0] == cycle[last]`), or `None` for an acyclic graph.
    fn find_cycle(&self) -> Result<Option<Vec<Self::Key>>> {
        search_cycle(self)
    }

    fn has_cycle(&self) -> Result<bool> {
        Ok(self.find_cycle()?.is_some())
    }

    /// Backtracking search for a cycle visiting every vertex exactly once.
    /// The result is closed, starting and ending at the start vertex.
    fn hamiltonian_cycle(&self, start: Option<&Self::Key>) -> Result<Option<Vec<Self::Key>>> {
        let start = match start {
            Some(s) if self.contains_vertex(s) => s.clone(),
            Some(s) => return Err(GraphError::missing(s)),
            None => self.start_vertex()?,
        };
        let mut path = vec![start.clone()];
        let mut used: FxHashSet<Self::Key> = FxHashSet::default();
        used.insert(start.clone());
        if extend_hamiltonian(self, &mut path, &mut used, self.vertex_count())? {
            path.push(start);
            Ok(Some(path))
        } else {
            Ok(None)
        }
    }
}

impl<G: NeighborQuery> Cycles for G {}
