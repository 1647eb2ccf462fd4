use crate::graph::Edge;

/// An ordered sequence of edges describing a walk.
///
/// No start or end vertex is stored; [`Path::walk_from`] recovers the visited
/// vertices by following the edges from a chosen start.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path<E> {
    edges: Vec<E>,
}

impl<E> Path<E> {
    pub fn new(edges: Vec<E>) -> Self {
        Self { edges }
    }

    /// Number of edges (not the summed length, see [`Path::length`]).
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges(&self) -> &[E] {
        &self.edges
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.edges.iter()
    }

    pub fn first(&self) -> Option<&E> {
        self.edges.first()
    }

    pub fn last(&self) -> Option<&E> {
        self.edges.last()
    }

    pub fn into_edges(self) -> Vec<E> {
        self.edges
    }
}

impl<E: Edge> Path<E> {
    /// Sum of the edge lengths.
    pub fn length(&self) -> u64 {
        self.edges.iter().map(|e| e.length()).sum()
    }

    pub fn contains(&self, edge: &E) -> bool {
        self.edges.contains(edge)
    }

    /// Vertices visited when walking the edges in order from `start`,
    /// including `start` itself.
    ///
    /// Returns None if some edge does not touch the vertex the walk has
    /// reached, i.e. the edges do not form a walk from `start`.
    pub fn walk_from(&self, start: &E::Vertex) -> Option<Vec<E::Vertex>> {
        let mut current = start;
        let mut walk = Vec::with_capacity(self.edges.len() + 1);
        walk.push(start.clone());

        for edge in &self.edges {
            if !edge.connects_to(current) {
                return None;
            }
            current = edge.other(current);
            walk.push(current.clone());
        }

        Some(walk)
    }
}

impl<E> Default for Path<E> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

impl<E> From<Vec<E>> for Path<E> {
    fn from(edges: Vec<E>) -> Self {
        Self::new(edges)
    }
}

impl<E> IntoIterator for Path<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a Path<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
