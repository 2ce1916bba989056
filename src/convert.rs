/*!
Conversions between representations.

Every converter is generic over [`NeighborQuery`], so any representation
converts into any other through the same five functions. Like bulk
construction, converters fill a directed container and flip the direction
flag last; an undirected source lists each edge from both endpoints, which
lands exactly one mirrored pair in the target.
*/

use crate::{
    error::{GraphError, Result},
    ops::NeighborQuery,
    repr::{AdjacencyList, AdjacencyMatrix, UnweightedGraph, WeightedGraph},
};

/// Drops all weights. Parallel edges keep their multiplicity.
pub fn to_unweighted_graph<G: NeighborQuery>(graph: &G) -> Result<UnweightedGraph<G::Key>> {
    let mut out = UnweightedGraph::new(true, graph.has_multiple_edges());
    for v in graph.ordered_vertices() {
        out.add_vertex(v)?;
    }
    for u in graph.ordered_vertices() {
        for (v, _) in graph.ordered_neighbors(&u)? {
            out.add_edge(&u, &v)?;
        }
    }
    out.set_directed(graph.is_directed());
    Ok(out)
}

/// Keeps weights; unweighted edges pick up the target's default weight
/// (0 for [`WeightedGraph::new`]).
pub fn to_weighted_graph<G: NeighborQuery>(graph: &G) -> Result<WeightedGraph<G::Key>> {
    let mut out = WeightedGraph::new(true, graph.has_multiple_edges());
    for v in graph.ordered_vertices() {
        out.add_vertex(v)?;
    }
    for u in graph.ordered_vertices() {
        for (v, w) in graph.ordered_neighbors(&u)? {
            out.add_edge(&u, &v, w)?;
        }
    }
    out.set_directed(graph.is_directed());
    Ok(out)
}

/// Copies edges verbatim, mixed weights and multiplicities included.
pub fn to_adjacency_list<G: NeighborQuery>(graph: &G) -> Result<AdjacencyList<G::Key>> {
    let mut out = AdjacencyList::new(true, graph.has_multiple_edges());
    for v in graph.ordered_vertices() {
        out.add_vertex(v)?;
    }
    for u in graph.ordered_vertices() {
        for (v, w) in graph.ordered_neighbors(&u)? {
            out.add_edge(&u, &v, w)?;
        }
    }
    out.set_directed(graph.is_directed());
    Ok(out)
}

/// Lossy for multi-edge sources: parallel edges collapse to the one
/// coming first in contract order, i.e. the smallest weight.
pub fn to_adjacency_matrix<G: NeighborQuery>(graph: &G) -> Result<AdjacencyMatrix<G::Key>> {
    let mut out = AdjacencyMatrix::new(true);
    for v in graph.ordered_vertices() {
        out.add_vertex(v)?;
    }
    for u in graph.ordered_vertices() {
        for (v, w) in graph.ordered_neighbors(&u)? {
            if !out.is_neighbor(&u, &v)? {
                out.add_edge(&u, &v, w)?;
            }
        }
    }
    out.set_directed(graph.is_directed());
    Ok(out)
}

/// Reinterprets a directed graph as undirected: every directed edge gains
/// its mirror. Simple sources skip mirrors that already exist; multi
/// sources mirror unconditionally, so a directed two-cycle becomes a
/// parallel pair.
pub fn directed_to_undirected<G: NeighborQuery>(graph: &G) -> Result<AdjacencyList<G::Key>> {
    if !graph.is_directed() {
        return Err(GraphError::ConversionOperation(
            "graph is already undirected".to_string(),
        ));
    }
    let multi = graph.has_multiple_edges();
    let mut out = AdjacencyList::new(true, multi);
    for v in graph.ordered_vertices() {
        out.add_vertex(v)?;
    }
    for u in graph.ordered_vertices() {
        for (v, w) in graph.ordered_neighbors(&u)? {
            out.add_edge(&u, &v, w)?;
            if u != v && (multi || !out.is_neighbor(&v, &u)?) {
                out.add_edge(&v, &u, w)?;
            }
        }
    }
    out.set_directed(false);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{adjacency_list_from_parts, weighted_graph_from_parts};

    fn weighted_square() -> WeightedGraph<u32> {
        weighted_graph_from_parts(false, 1..=4u32, [(1, 2, 4), (2, 3, 0), (3, 4, -2), (4, 1, 9)])
            .unwrap()
    }

    #[test]
    fn graph_to_matrix_and_back() {
        let g = weighted_square();
        let m = to_adjacency_matrix(&g).unwrap();
        assert!(!m.is_directed());
        let back = to_weighted_graph(&m).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn matrix_conversion_collapses_parallel_edges_to_minimum() {
        let list =
            adjacency_list_from_parts(true, 1..=2u32, [(1, 2, 8), (1, 2, 3), (1, 2, 5)]).unwrap();
        let m = to_adjacency_matrix(&list).unwrap();
        assert_eq!(m.ordered_neighbors(&1).unwrap(), vec![(2, Some(3))]);
    }

    #[test]
    fn unweighted_view_drops_weights_but_keeps_multiplicity() {
        let list = adjacency_list_from_parts(true, 1..=2u32, [(1, 2, 8), (1, 2, 3)]).unwrap();
        let g = to_unweighted_graph(&list).unwrap();
        assert!(g.has_multiple_edges());
        assert_eq!(g.edge_multiplicity(&1, &2).unwrap(), 2);
        assert_eq!(g.ordered_neighbors(&1).unwrap(), vec![(2, None), (2, None)]);
    }

    #[test]
    fn weighted_view_defaults_missing_weights_to_zero() {
        let list = adjacency_list_from_parts(true, 1..=2u32, [(1u32, 2u32)]).unwrap();
        let g = to_weighted_graph(&list).unwrap();
        assert_eq!(g.ordered_neighbors(&1).unwrap(), vec![(2, Some(0))]);
    }

    #[test]
    fn undirected_source_round_trips_through_list() {
        let g = weighted_square();
        let list = to_adjacency_list(&g).unwrap();
        assert!(!list.is_directed());
        assert_eq!(list.ordered_neighbors(&1).unwrap(), g.ordered_neighbors(&1).unwrap());
        let back = to_weighted_graph(&list).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn undirecting_an_undirected_graph_fails() {
        let g = weighted_square();
        assert!(matches!(
            directed_to_undirected(&g),
            Err(GraphError::ConversionOperation(_))
        ));
    }

    #[test]
    fn undirecting_mirrors_directed_edges() {
        let g = weighted_graph_from_parts(true, 1..=3u32, [(1, 2, 5), (2, 3, 1)]).unwrap();
        let u = directed_to_undirected(&g).unwrap();
        assert!(!u.is_directed());
        assert_eq!(u.ordered_neighbors(&2).unwrap(), vec![(3, Some(1)), (1, Some(5))]);
        assert_eq!(u.ordered_neighbors(&3).unwrap(), vec![(2, Some(1))]);
    }
}
