/*!
Breadth- and depth-first traversals plus topological ordering.

Both traversal families share one engine that is generic over the
frontier container: a queue yields breadth-first order, a stack (fed in
reverse so the smallest neighbor surfaces first) yields the preorder a
recursive depth-first walk would produce. Vertices are marked visited
when they leave the frontier, so duplicates in the frontier are skipped
rather than prevented.
*/

use std::collections::VecDeque;

use fxhash::FxHashSet;

use crate::{
    algo::{cycles::Cycles, neighbor_keys, resolve_start},
    error::{GraphError, Result},
    ops::NeighborQuery,
};

trait Frontier<K>: Default {
    fn push_layer(&mut self, keys: Vec<K>);
    fn take_next(&mut self) -> Option<K>;
}

impl<K> Frontier<K> for VecDeque<K> {
    fn push_layer(&mut self, keys: Vec<K>) {
        self.extend(keys);
    }

    fn take_next(&mut self) -> Option<K> {
        self.pop_front()
    }
}

impl<K> Frontier<K> for Vec<K> {
    fn push_layer(&mut self, keys: Vec<K>) {
        self.extend(keys.into_iter().rev());
    }

    fn take_next(&mut self) -> Option<K> {
        self.pop()
    }
}

fn traverse<G: NeighborQuery, F: Frontier<G::Key>>(
    graph: &G,
    start: G::Key,
    target: Option<&G::Key>,
) -> Result<Vec<G::Key>> {
    let mut order = vec![start.clone()];
    if target == Some(&start) {
        return Ok(order);
    }
    let mut visited: FxHashSet<G::Key> = FxHashSet::default();
    visited.insert(start.clone());
    let mut frontier = F::default();
    frontier.push_layer(neighbor_keys(graph, &start)?);
    while let Some(v) = frontier.take_next() {
        if !visited.insert(v.clone()) {
            continue;
        }
        order.push(v.clone());
        if target == Some(&v) {
            return Ok(order);
        }
        frontier.push_layer(neighbor_keys(graph, &v)?);
    }
    Ok(order)
}

fn ensure_complete<G: NeighborQuery>(
    graph: &G,
    start: &G::Key,
    order: Vec<G::Key>,
) -> Result<Vec<G::Key>> {
    if order.len() == graph.vertex_count() {
        Ok(order)
    } else {
        Err(GraphError::IncompleteTraversal(format!(
            "reached {} of {} vertices from {start}",
            order.len(),
            graph.vertex_count(),
        )))
    }
}

pub trait Traversals: NeighborQuery + Sized {
    /// Breadth-first traversal of the whole graph. Fails with
    /// [`GraphError::IncompleteTraversal`] when some vertex is unreachable
    /// from the start.
    fn bft(&self, start: Option<&Self::Key>) -> Result<Vec<Self::Key>> {
        let start = resolve_start(self, start, GraphError::InvalidTraversalNode)?;
        let order = traverse::<_, VecDeque<_>>(self, start.clone(), None)?;
        ensure_complete(self, &start, order)
    }

    /// Depth-first traversal of the whole graph, in recursive preorder.
    fn dft(&self, start: Option<&Self::Key>) -> Result<Vec<Self::Key>> {
        let start = resolve_start(self, start, GraphError::InvalidTraversalNode)?;
        let order = traverse::<_, Vec<_>>(self, start.clone(), None)?;
        ensure_complete(self, &start, order)
    }

    /// Breadth-first search for `target`. The returned order ends at the
    /// target when it is reachable; otherwise it is the full reachable set.
    /// A target that is not a vertex of the graph is an error.
    fn bfs(&self, target: &Self::Key, start: Option<&Self::Key>) -> Result<Vec<Self::Key>> {
        if !self.contains_vertex(target) {
            return Err(GraphError::InvalidTraversalNode(target.to_string()));
        }
        let start = resolve_start(self, start, GraphError::InvalidTraversalNode)?;
        traverse::<_, VecDeque<_>>(self, start, Some(target))
    }

    /// Depth-first search for `target`, same contract as [`Traversals::bfs`].
    fn dfs(&self, target: &Self::Key, start: Option<&Self::Key>) -> Result<Vec<Self::Key>> {
        if !self.contains_vertex(target) {
            return Err(GraphError::InvalidTraversalNode(target.to_string()));
        }
        let start = resolve_start(self, start, GraphError::InvalidTraversalNode)?;
        traverse::<_, Vec<_>>(self, start, Some(target))
    }

    /// Topological order over a directed acyclic graph: reversed postorder
    /// of depth-first walks from every unvisited vertex in key order.
    fn topological_sort(&self) -> Result<Vec<Self::Key>> {
        if !self.is_directed() {
            return Err(GraphError::UnsupportedGraphType(
                "topological ordering requires a directed graph".to_string(),
            ));
        }
        if self.find_cycle()?.is_some() {
            return Err(GraphError::UnsupportedGraphType(
                "topological ordering requires an acyclic graph".to_string(),
            ));
        }

        let mut visited: FxHashSet<Self::Key> = FxHashSet::default();
        let mut postorder = Vec::with_capacity(self.vertex_count());
        for root in self.ordered_vertices() {
            if !visited.insert(root.clone()) {
                continue;
            }
            let mut stack = vec![(root.clone(), neighbor_keys(self, &root)?, 0usize)];
            loop {
                let next = match stack.last_mut() {
                    Some((_, nbrs, idx)) if *idx < nbrs.len() => {
                        *idx += 1;
                        Some(nbrs[*idx - 1].clone())
                    }
                    Some(_) => None,
                    None => break,
                };
                match next {
                    Some(n) => {
                        if visited.insert(n.clone()) {
                            let nbrs = neighbor_keys(self, &n)?;
                            stack.push((n, nbrs, 0));
                        }
                    }
                    None => {
                        if let Some((v, _, _)) = stack.pop() {
                            postorder.push(v);
                        }
                    }
                }
            }
        }
        postorder.reverse();
        Ok(postorder)
    }
}

impl<G: NeighborQuery> Traversals for G {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{unweighted_graph_from_parts, weighted_graph_from_parts};

    #[test]
    fn bft_visits_layer_by_layer() {
        let g = unweighted_graph_from_parts(
            false,
            1..=6u32,
            [(1, 2), (1, 3), (2, 4), (3, 5), (4, 6)],
        )
        .unwrap();
        assert_eq!(g.bft(None).unwrap(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn dft_matches_recursive_preorder() {
        let g = unweighted_graph_from_parts(
            false,
            1..=6u32,
            [(1, 2), (1, 3), (2, 4), (3, 5), (4, 6)],
        )
        .unwrap();
        assert_eq!(g.dft(None).unwrap(), vec![1, 2, 4, 6, 3, 5]);
    }

    #[test]
    fn traversal_prefers_lighter_edges() {
        let g = weighted_graph_from_parts(false, 1..=3u32, [(1, 2, 9), (1, 3, 1)]).unwrap();
        assert_eq!(g.bft(None).unwrap(), vec![1, 3, 2]);
    }

    #[test]
    fn disconnected_graph_is_an_incomplete_traversal() {
        let g = unweighted_graph_from_parts(false, 1..=4u32, [(1, 2)]).unwrap();
        assert!(matches!(
            g.bft(None),
            Err(GraphError::IncompleteTraversal(_))
        ));
        assert!(matches!(
            g.dft(Some(&3)),
            Err(GraphError::IncompleteTraversal(_))
        ));
    }

    #[test]
    fn invalid_start_vertex_is_rejected() {
        let g = unweighted_graph_from_parts(true, 1..=2u32, [(1, 2)]).unwrap();
        assert_eq!(
            g.bft(Some(&9)),
            Err(GraphError::InvalidTraversalNode("9".into()))
        );
    }

    #[test]
    fn bfs_stops_at_the_target() {
        let g = unweighted_graph_from_parts(false, 1..=6u32, [(1, 2), (1, 3), (2, 4), (3, 5), (4, 6)])
            .unwrap();
        assert_eq!(g.bfs(&4, None).unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(g.dfs(&5, None).unwrap(), vec![1, 2, 4, 6, 3, 5]);
    }

    #[test]
    fn bfs_with_unreachable_target_returns_reachable_set() {
        let g = unweighted_graph_from_parts(true, 1..=3u32, [(1, 2)]).unwrap();
        assert_eq!(g.bfs(&3, None).unwrap(), vec![1, 2]);
    }

    #[test]
    fn unknown_target_vertex_is_rejected() {
        let g = unweighted_graph_from_parts(true, 1..=3u32, [(1, 2), (2, 3)]).unwrap();
        assert_eq!(
            g.bfs(&9, None),
            Err(GraphError::InvalidTraversalNode("9".into()))
        );
        assert_eq!(
            g.dfs(&9, None),
            Err(GraphError::InvalidTraversalNode("9".into()))
        );
    }

    #[test]
    fn topological_sort_respects_all_edges() {
        let g = unweighted_graph_from_parts(
            true,
            1..=5u32,
            [(1, 3), (2, 3), (3, 4), (3, 5), (2, 5)],
        )
        .unwrap();
        let order = g.topological_sort().unwrap();
        let pos = |v: u32| order.iter().position(|&k| k == v).unwrap();
        for (u, v) in [(1, 3), (2, 3), (3, 4), (3, 5), (2, 5)] {
            assert!(pos(u) < pos(v), "{u} must precede {v} in {order:?}");
        }
    }

    #[test]
    fn topological_sort_rejects_undirected_and_cyclic_graphs() {
        let undirected = unweighted_graph_from_parts(false, 1..=2u32, [(1, 2)]).unwrap();
        assert!(matches!(
            undirected.topological_sort(),
            Err(GraphError::UnsupportedGraphType(_))
        ));

        let cyclic = unweighted_graph_from_parts(true, 1..=3u32, [(1, 2), (2, 3), (3, 1)]).unwrap();
        assert!(matches!(
            cyclic.topological_sort(),
            Err(GraphError::UnsupportedGraphType(_))
        ));
    }
}
