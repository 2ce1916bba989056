/*!
Articulation points and bridges via low-link depth-first search.

Directed graphs are first reinterpreted as undirected, since both notions
are defined on the underlying undirected structure. A non-root vertex is
an articulation point when some child subtree cannot climb above it; the
root is one when it has more than one child. A tree edge is a bridge when
the child subtree cannot climb back to the parent at all. One edge back
to the parent is ignored, so a parallel parent edge keeps its endpoint
from being cut off.
*/

use std::collections::BTreeSet;

use fxhash::FxHashMap;

use crate::{
    convert::directed_to_undirected,
    error::Result,
    ops::NeighborQuery,
};

struct CutSearch<'a, G: NeighborQuery> {
    graph: &'a G,
    discovery: FxHashMap<G::Key, usize>,
    low: FxHashMap<G::Key, usize>,
    clock: usize,
    points: BTreeSet<G::Key>,
    bridges: Vec<(G::Key, G::Key)>,
}

impl<'a, G: NeighborQuery> CutSearch<'a, G> {
    fn new(graph: &'a G) -> Self {
        Self {
            graph,
            discovery: FxHashMap::default(),
            low: FxHashMap::default(),
            clock: 0,
            points: BTreeSet::new(),
            bridges: Vec::new(),
        }
    }

    fn run(mut self) -> Result<(Vec<G::Key>, Vec<(G::Key, G::Key)>)> {
        for root in self.graph.ordered_vertices() {
            if self.discovery.contains_key(&root) {
                continue;
            }
            let children = self.explore(&root, None)?;
            if children > 1 {
                self.points.insert(root);
            }
        }
        self.bridges.sort();
        Ok((self.points.into_iter().collect(), self.bridges))
    }

    /// Visits `vertex`, returning its number of depth-first children.
    fn explore(&mut self, vertex: &G::Key, parent: Option<&G::Key>) -> Result<usize> {
        self.clock += 1;
        self.discovery.insert(vertex.clone(), self.clock);
        self.low.insert(vertex.clone(), self.clock);
        let discovered_at = self.clock;

        let mut children = 0;
        let mut parent_edges = 0;
        for (n, _) in self.graph.ordered_neighbors(vertex)? {
            if parent == Some(&n) && parent_edges == 0 {
                parent_edges += 1;
                continue;
            }
            if let Some(&seen) = self.discovery.get(&n) {
                let low = self.low.get(vertex).copied().unwrap_or(discovered_at);
                self.low.insert(vertex.clone(), low.min(seen));
            } else {
                children += 1;
                self.explore(&n, Some(vertex))?;
                let child_low = self.low.get(&n).copied().unwrap_or(usize::MAX);
                let low = self.low.get(vertex).copied().unwrap_or(discovered_at);
                self.low.insert(vertex.clone(), low.min(child_low));
                if parent.is_some() && child_low >= discovered_at {
                    self.points.insert(vertex.clone());
                }
                if child_low > discovered_at {
                    self.bridges.push((vertex.clone(), n.clone()));
                }
            }
        }
        Ok(children)
    }
}

pub trait Cuts: NeighborQuery + Sized {
    /// Vertices whose removal disconnects their component, ascending.
    fn articulation_points(&self) -> Result<Vec<Self::Key>> {
        if self.is_directed() {
            let undirected = directed_to_undirected(self)?;
            Ok(CutSearch::new(&undirected).run()?.0)
        } else {
            Ok(CutSearch::new(self).run()?.0)
        }
    }

    /// Edges whose removal disconnects their component, as sorted
    /// `(parent, child)` pairs of the search tree.
    fn bridges(&self) -> Result<Vec<(Self::Key, Self::Key)>> {
        if self.is_directed() {
            let undirected = directed_to_undirected(self)?;
            Ok(CutSearch::new(&undirected).run()?.1)
        } else {
            Ok(CutSearch::new(self).run()?.1)
        }
    }
}

impl<G: NeighborQuery> Cuts for G {}
