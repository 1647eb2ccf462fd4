use std::collections::{HashMap, HashSet};
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

/// A graph node. Vertices are supplied by the caller; the library only
/// compares, hashes and clones them (`Debug` is used in panic messages and logs).
pub trait Vertex: Eq + Hash + Clone + Debug {}

impl<T: Eq + Hash + Clone + Debug> Vertex for T {}

/// An undirected connection between exactly two vertices.
///
/// Implementors supply the endpoints and the length; the adjacency tests
/// are provided. Equal edges are collapsed when inserted into a [`Graph`].
pub trait Edge: Eq + Hash + Clone {
    type Vertex: Vertex;

    /// Both endpoints. Equal for a self-loop.
    fn vertices(&self) -> [&Self::Vertex; 2];

    fn length(&self) -> u64;

    /// True if `vertex` is one of the endpoints.
    fn connects_to(&self, vertex: &Self::Vertex) -> bool {
        self.vertices().iter().any(|v| *v == vertex)
    }

    /// True if the two edges share an endpoint.
    ///
    /// Decided by the number of distinct endpoints across both edges: four
    /// means disjoint, anything less counts as connected. An edge therefore
    /// connects to itself, and a self-loop (one distinct endpoint) connects
    /// to every edge.
    fn connects_to_edge(&self, other: &Self) -> bool {
        let union: HashSet<&Self::Vertex> = self
            .vertices()
            .into_iter()
            .chain(other.vertices())
            .collect();
        union.len() < 4
    }

    /// The endpoint opposite `vertex`.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is not an endpoint of this edge.
    fn other(&self, vertex: &Self::Vertex) -> &Self::Vertex {
        let [a, b] = self.vertices();
        if a == vertex {
            b
        } else if b == vertex {
            a
        } else {
            panic!(
                "vertex {:?} is not an endpoint of edge {:?}-{:?}",
                vertex, a, b
            );
        }
    }

    fn is_self_loop(&self) -> bool {
        let [a, b] = self.vertices();
        a == b
    }
}

/// Ready-made edge: an ordered endpoint pair plus a length.
///
/// Equality covers the ordered pair, so `A-B` and `B-A` with the same length
/// are two parallel edges rather than one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleEdge<V> {
    vertices: [V; 2],
    length: u64,
}

impl<V> SimpleEdge<V> {
    pub fn new(from: V, to: V, length: u64) -> Self {
        Self {
            vertices: [from, to],
            length,
        }
    }
}

impl<V: Vertex> Edge for SimpleEdge<V> {
    type Vertex = V;

    fn vertices(&self) -> [&V; 2] {
        [&self.vertices[0], &self.vertices[1]]
    }

    fn length(&self) -> u64 {
        self.length
    }
}

impl<V: Display> Display for SimpleEdge<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}:{}", self.vertices[0], self.vertices[1], self.length)
    }
}

/// A deduplicated set of undirected edges.
///
/// No vertex list is stored: the vertex set and degrees are derived from the
/// edges on every query, so a vertex exists exactly when some edge touches it.
/// The graph is built up front and then only read by the algorithms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<E: Edge> {
    edges: HashSet<E>,
}

impl<E: Edge> Graph<E> {
    pub fn new() -> Self {
        Self {
            edges: HashSet::new(),
        }
    }

    /// Pre-allocate for a known edge count.
    pub fn with_capacity(edge_count: usize) -> Self {
        Self {
            edges: HashSet::with_capacity(edge_count),
        }
    }

    /// Insert an edge. Returns false if an equal edge was already present.
    pub fn add_edge(&mut self, edge: E) -> bool {
        self.edges.insert(edge)
    }

    /// Bulk insert; duplicates collapse silently.
    pub fn load_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = E>,
    {
        self.edges.extend(edges);
    }

    /// Every vertex touched by at least one edge, each listed once.
    ///
    /// Order follows the first appearance while scanning the edge set, which
    /// is stable for an unmodified graph.
    pub fn vertices(&self) -> Vec<&E::Vertex> {
        let mut seen: HashSet<&E::Vertex> = HashSet::new();
        let mut vertices = Vec::new();
        for edge in &self.edges {
            for vertex in edge.vertices() {
                if seen.insert(vertex) {
                    vertices.push(vertex);
                }
            }
        }
        vertices
    }

    /// Degree of every vertex: endpoint occurrences, so a self-loop counts twice.
    pub fn vertices_counted(&self) -> HashMap<&E::Vertex, usize> {
        let mut counts: HashMap<&E::Vertex, usize> = HashMap::new();
        for edge in &self.edges {
            for vertex in edge.vertices() {
                *counts.entry(vertex).or_insert(0) += 1;
            }
        }
        counts
    }

    pub fn degree(&self, vertex: &E::Vertex) -> usize {
        self.edges
            .iter()
            .flat_map(|e| e.vertices())
            .filter(|v| *v == vertex)
            .count()
    }

    /// Vertices of odd degree, in [`Graph::vertices`] order.
    pub fn odd_degree_vertices(&self) -> Vec<&E::Vertex> {
        let counts = self.vertices_counted();
        self.vertices()
            .into_iter()
            .filter(|v| counts[v] % 2 == 1)
            .collect()
    }

    /// All edges touching both `a` and `b`.
    ///
    /// Includes parallel edges. When `a == b` this is every edge touching
    /// that vertex, self-loops included.
    pub fn edges_between(&self, a: &E::Vertex, b: &E::Vertex) -> Vec<&E> {
        self.edges
            .iter()
            .filter(|e| e.connects_to(a) && e.connects_to(b))
            .collect()
    }

    /// All edges, shortest first. Ties keep no particular order.
    pub fn edges(&self) -> Vec<&E> {
        let mut edges: Vec<&E> = self.edges.iter().collect();
        edges.sort_by_key(|e| e.length());
        edges
    }

    /// Edges touching `vertex`, shortest first.
    pub fn edges_adjacent_to(&self, vertex: &E::Vertex) -> Vec<&E> {
        let mut edges: Vec<&E> = self.edges.iter().filter(|e| e.connects_to(vertex)).collect();
        edges.sort_by_key(|e| e.length());
        edges
    }

    /// Adjacency lists for every vertex in one pass, each sorted shortest first.
    /// A self-loop appears once in its vertex's list.
    pub(crate) fn adjacency(&self) -> HashMap<&E::Vertex, Vec<&E>> {
        let mut adjacency: HashMap<&E::Vertex, Vec<&E>> = HashMap::new();
        for edge in self.edges() {
            let [a, b] = edge.vertices();
            adjacency.entry(a).or_default().push(edge);
            if a != b {
                adjacency.entry(b).or_default().push(edge);
            }
        }
        adjacency
    }

    pub fn contains_vertex(&self, vertex: &E::Vertex) -> bool {
        self.edges.iter().any(|e| e.connects_to(vertex))
    }

    pub fn contains_edge(&self, edge: &E) -> bool {
        self.edges.contains(edge)
    }

    /// Edges in storage order (unsorted).
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.edges.iter()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl<E: Edge> Default for Graph<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Edge> FromIterator<E> for Graph<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

impl<E: Edge> Extend<E> for Graph<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.load_edges(iter);
    }
}
