/*!
Bulk construction from vertex and edge lists.

All builders work the same way: fill a container that is flagged directed
and multi-edge so every insertion succeeds, detect on the fly whether a
parallel edge actually occurs, then flip the flags to their final values.
Undirected inputs get their mirrored entries inserted explicitly, so an
edge list containing both `(u, v)` and `(v, u)` yields a parallel edge.
*/

use crate::{
    edge::Edge,
    error::Result,
    repr::{AdjacencyList, AdjacencyMatrix, UnweightedGraph, WeightedGraph},
    vertex::VertexKey,
};

pub fn unweighted_graph_from_parts<K, V, E, T>(
    directed: bool,
    vertices: V,
    edges: E,
) -> Result<UnweightedGraph<K>>
where
    K: VertexKey,
    V: IntoIterator<Item = K>,
    E: IntoIterator<Item = T>,
    T: Into<Edge<K>>,
{
    let mut graph = UnweightedGraph::new(true, true);
    for v in vertices {
        graph.add_vertex(v)?;
    }
    let mut multiple = false;
    for edge in edges {
        let Edge(u, v, _) = edge.into();
        multiple |= seen_before(&graph, &u, &v, directed)?;
        graph.add_edge(&u, &v)?;
        if !directed && u != v {
            graph.add_edge(&v, &u)?;
        }
    }
    graph.set_multiple_edges(multiple);
    graph.set_directed(directed);
    Ok(graph)
}

pub fn weighted_graph_from_parts<K, V, E, T>(
    directed: bool,
    vertices: V,
    edges: E,
) -> Result<WeightedGraph<K>>
where
    K: VertexKey,
    V: IntoIterator<Item = K>,
    E: IntoIterator<Item = T>,
    T: Into<Edge<K>>,
{
    let mut graph = WeightedGraph::new(true, true);
    for v in vertices {
        graph.add_vertex(v)?;
    }
    let mut multiple = false;
    for edge in edges {
        let Edge(u, v, w) = edge.into();
        multiple |= seen_before(&graph, &u, &v, directed)?;
        graph.add_edge(&u, &v, w)?;
        if !directed && u != v {
            graph.add_edge(&v, &u, w)?;
        }
    }
    graph.set_multiple_edges(multiple);
    graph.set_directed(directed);
    Ok(graph)
}

pub fn adjacency_list_from_parts<K, V, E, T>(
    directed: bool,
    vertices: V,
    edges: E,
) -> Result<AdjacencyList<K>>
where
    K: VertexKey,
    V: IntoIterator<Item = K>,
    E: IntoIterator<Item = T>,
    T: Into<Edge<K>>,
{
    let mut list = AdjacencyList::new(true, true);
    for v in vertices {
        list.add_vertex(v)?;
    }
    let mut multiple = false;
    for edge in edges {
        let Edge(u, v, w) = edge.into();
        multiple |= seen_before(&list, &u, &v, directed)?;
        list.add_edge(&u, &v, w)?;
        if !directed && u != v {
            list.add_edge(&v, &u, w)?;
        }
    }
    list.set_multiple_edges(multiple);
    list.set_directed(directed);
    Ok(list)
}

/// Matrices cannot represent parallel edges, so repeated input edges
/// collapse silently: the first occurrence wins.
pub fn adjacency_matrix_from_parts<K, V, E, T>(
    directed: bool,
    vertices: V,
    edges: E,
) -> Result<AdjacencyMatrix<K>>
where
    K: VertexKey,
    V: IntoIterator<Item = K>,
    E: IntoIterator<Item = T>,
    T: Into<Edge<K>>,
{
    let mut matrix = AdjacencyMatrix::new(true);
    for v in vertices {
        matrix.add_vertex(v)?;
    }
    for edge in edges {
        let Edge(u, v, w) = edge.into();
        if !matrix.is_neighbor(&u, &v)? {
            matrix.add_edge(&u, &v, w)?;
        }
        if !directed && u != v && !matrix.is_neighbor(&v, &u)? {
            matrix.add_edge(&v, &u, w)?;
        }
    }
    matrix.set_directed(directed);
    Ok(matrix)
}

fn seen_before<G>(graph: &G, u: &G::Key, v: &G::Key, directed: bool) -> Result<bool>
where
    G: crate::ops::NeighborQuery,
{
    Ok(graph.has_edge(u, v)? || (!directed && graph.has_edge(v, u)?))
}
