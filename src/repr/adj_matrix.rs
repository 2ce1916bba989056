/*!
Dense adjacency matrices over tagged cells.

Each cell records explicitly whether there is no edge, an unweighted edge
or a weighted edge, so weights 0 and 1 need no sentinel tricks and
negative weights are ordinary values. Matrices cannot hold parallel
edges; asking for a multi-edge matrix is an error.
*/

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::{
    error::{GraphError, Result},
    ops::{sort_adjacency, NeighborQuery},
    vertex::{weight_rank, VertexKey, Weight},
};

/// One matrix entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    NoEdge,
    Unweighted,
    Weighted(Weight),
}

impl Cell {
    pub fn is_edge(&self) -> bool {
        !matches!(self, Cell::NoEdge)
    }

    /// The edge weight as stored: `None` for an unweighted edge.
    /// Returns `None` for [`Cell::NoEdge`] as well, so gate on
    /// [`Cell::is_edge`] first where the distinction matters.
    pub fn weight(&self) -> Option<Weight> {
        match self {
            Cell::Weighted(w) => Some(*w),
            _ => None,
        }
    }

    /// The cost of crossing this cell, with unweighted edges costing 1.
    pub fn distance(&self) -> Option<Weight> {
        match self {
            Cell::NoEdge => None,
            Cell::Unweighted => Some(1),
            Cell::Weighted(w) => Some(*w),
        }
    }

    fn from_weight(weight: Option<Weight>) -> Self {
        match weight {
            Some(w) => Cell::Weighted(w),
            None => Cell::Unweighted,
        }
    }

    /// Of two edge cells, the one with the smaller weight (an unweighted
    /// cell ranks below every weighted one). `NoEdge` is the identity.
    fn merge_min(self, other: Cell) -> Cell {
        match (self, other) {
            (Cell::NoEdge, c) | (c, Cell::NoEdge) => c,
            (a, b) => {
                if weight_rank(b.weight()) < weight_rank(a.weight()) {
                    b
                } else {
                    a
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix<K: VertexKey> {
    index: BTreeMap<K, usize>,
    cells: Vec<Vec<Cell>>,
    directed: bool,
}

impl<K: VertexKey> AdjacencyMatrix<K> {
    pub fn new(directed: bool) -> Self {
        Self {
            index: BTreeMap::new(),
            cells: Vec::new(),
            directed,
        }
    }

    /// Like [`AdjacencyMatrix::new`], but fails when parallel edges are
    /// requested since a matrix cell can hold only one edge.
    pub fn with_multiplicity(directed: bool, multiple_edges: bool) -> Result<Self> {
        if multiple_edges {
            return Err(GraphError::UnsupportedGraphType(
                "adjacency matrices cannot store multiple edges".to_string(),
            ));
        }
        Ok(Self::new(directed))
    }

    fn position(&self, vertex: &K) -> Result<usize> {
        self.index
            .get(vertex)
            .copied()
            .ok_or_else(|| GraphError::missing(vertex))
    }

    pub fn add_vertex(&mut self, vertex: K) -> Result<()> {
        if self.index.contains_key(&vertex) {
            return Err(GraphError::exists(&vertex));
        }
        let n = self.cells.len();
        self.index.insert(vertex, n);
        for row in &mut self.cells {
            row.push(Cell::NoEdge);
        }
        self.cells.push(vec![Cell::NoEdge; n + 1]);
        Ok(())
    }

    pub fn remove_vertex(&mut self, vertex: &K) -> Result<()> {
        let pos = self.position(vertex)?;
        self.index.remove(vertex);
        self.cells.remove(pos);
        for row in &mut self.cells {
            row.remove(pos);
        }
        for idx in self.index.values_mut() {
            if *idx > pos {
                *idx -= 1;
            }
        }
        Ok(())
    }

    pub fn cell(&self, vertex: &K, neighbor: &K) -> Result<Cell> {
        let (i, j) = (self.position(vertex)?, self.position(neighbor)?);
        Ok(self.cells[i][j])
    }

    pub fn is_neighbor(&self, vertex: &K, neighbor: &K) -> Result<bool> {
        Ok(self.cell(vertex, neighbor)?.is_edge())
    }

    pub fn add_edge(&mut self, vertex: &K, neighbor: &K, weight: Option<Weight>) -> Result<()> {
        let (i, j) = (self.position(vertex)?, self.position(neighbor)?);
        if self.cells[i][j].is_edge() {
            return Err(GraphError::neighbor_taken(vertex, neighbor));
        }
        self.cells[i][j] = Cell::from_weight(weight);
        if !self.directed && i != j {
            self.cells[j][i] = Cell::from_weight(weight);
        }
        Ok(())
    }

    pub fn remove_edge(&mut self, vertex: &K, neighbor: &K) -> Result<()> {
        let (i, j) = (self.position(vertex)?, self.position(neighbor)?);
        if !self.cells[i][j].is_edge() {
            return Err(GraphError::no_neighbor(vertex, neighbor));
        }
        self.cells[i][j] = Cell::NoEdge;
        if !self.directed && i != j {
            self.cells[j][i] = Cell::NoEdge;
        }
        Ok(())
    }

    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    /// The full cell row for `vertex`, indexed by ascending vertex key.
    pub fn row(&self, vertex: &K) -> Result<Vec<(K, Cell)>> {
        let i = self.position(vertex)?;
        Ok(self
            .index
            .iter()
            .map(|(k, &j)| (k.clone(), self.cells[i][j]))
            .collect())
    }

    /// Merges `other` into `self`; edges present in both keep the cell
    /// with the smaller weight.
    pub fn union(&mut self, other: &Self) {
        for k in other.index.keys() {
            if !self.index.contains_key(k) {
                let _ = self.add_vertex(k.clone());
            }
        }
        for (a, &i) in &other.index {
            for (b, &j) in &other.index {
                let incoming = other.cells[i][j];
                if !incoming.is_edge() {
                    continue;
                }
                if let (Ok(si), Ok(sj)) = (self.position(a), self.position(b)) {
                    self.cells[si][sj] = self.cells[si][sj].merge_min(incoming);
                    if !self.directed && si != sj {
                        self.cells[sj][si] = self.cells[sj][si].merge_min(incoming);
                    }
                }
            }
        }
    }

    /// Keeps shared vertices and, per vertex pair, edges present in both
    /// matrices (the smaller-weight cell wins).
    pub fn intersection(&mut self, other: &Self) {
        let gone = self
            .index
            .keys()
            .filter(|k| !other.index.contains_key(k))
            .cloned()
            .collect_vec();
        for k in gone {
            let _ = self.remove_vertex(&k);
        }
        for (a, &i) in &self.index.clone() {
            for (b, &j) in &self.index.clone() {
                let mine = self.cells[i][j];
                if !mine.is_edge() {
                    continue;
                }
                let theirs = other.cell(a, b).unwrap_or(Cell::NoEdge);
                self.cells[i][j] = if theirs.is_edge() {
                    mine.merge_min(theirs)
                } else {
                    Cell::NoEdge
                };
            }
        }
    }

    /// Removes `other`'s vertices (their rows and columns go with them).
    pub fn difference(&mut self, other: &Self) {
        for k in other.index.keys() {
            let _ = self.remove_vertex(k);
        }
    }

    /// Union plus an unweighted edge for every unconnected cross pair.
    pub fn join(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.union(other);
        for u in self.index.keys() {
            for v in other.index.keys() {
                if u == v {
                    continue;
                }
                if let Ok(false) = result.is_neighbor(u, v) {
                    let _ = result.add_edge(u, v, None);
                }
            }
        }
        result
    }

    pub fn label(&self) -> String {
        format!(
            "{} adjacency matrix",
            if self.directed { "directed" } else { "undirected" },
        )
    }
}

impl<K: VertexKey> NeighborQuery for AdjacencyMatrix<K> {
    type Key = K;

    fn ordered_neighbors(&self, vertex: &K) -> Result<Vec<(K, Option<Weight>)>> {
        let mut pairs = self
            .row(vertex)?
            .into_iter()
            .filter(|(_, cell)| cell.is_edge())
            .map(|(k, cell)| (k, cell.weight()))
            .collect_vec();
        sort_adjacency(&mut pairs);
        Ok(pairs)
    }

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn has_multiple_edges(&self) -> bool {
        false
    }

    fn vertex_count(&self) -> usize {
        self.index.len()
    }

    fn ordered_vertices(&self) -> Vec<K> {
        self.index.keys().cloned().collect()
    }

    fn contains_vertex(&self, vertex: &K) -> bool {
        self.index.contains_key(vertex)
    }
}

impl<K: VertexKey> Display for AdjacencyMatrix<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}:", self.label())?;
        for (k, &i) in &self.index {
            let row = self
                .index
                .values()
                .map(|&j| match self.cells[i][j] {
                    Cell::NoEdge => ".".to_string(),
                    Cell::Unweighted => "*".to_string(),
                    Cell::Weighted(w) => w.to_string(),
                })
                .join(" ");
            writeln!(f, "  {k}: {row}")?;
        }
        Ok(())
    }
}
