use std::collections::HashMap;

use tracing::{debug, trace};

use crate::graph::{Edge, Graph};
use crate::path::Path;

/// Degree-parity classification of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EulerKind<'g, V> {
    /// Every degree is even (includes the empty graph).
    Circuit,
    /// Exactly two odd-degree vertices; an Eulerian walk must run between them.
    Trail { start: &'g V, end: &'g V },
    /// Any other number of odd-degree vertices.
    NotEulerian,
}

/// Classify the graph by how many vertices have odd degree.
///
/// Parity is necessary for an Eulerian walk, not sufficient: edges spread
/// over several components still classify as `Circuit` or `Trail`.
pub fn euler_kind<E: Edge>(graph: &Graph<E>) -> EulerKind<'_, E::Vertex> {
    let odd = graph.odd_degree_vertices();
    match odd.as_slice() {
        [] => EulerKind::Circuit,
        &[start, end] => EulerKind::Trail { start, end },
        _ => EulerKind::NotEulerian,
    }
}

/// Chain every edge into one sequence by greedy adjacency.
///
/// After the parity check passes, starts from the shortest edge and
/// repeatedly moves the first remaining edge (shortest first) that shares
/// an endpoint with the current edge into the chain. There is no
/// backtracking: if no remaining edge touches the current one the attempt
/// fails, even when a valid ordering exists. Adjacency is judged edge to
/// edge ([`Edge::connects_to_edge`]), so consecutive edges share an endpoint
/// but the chain is not guaranteed to be a walk. Use [`eulerian_path`] when
/// a walk is required.
///
/// Returns None if the parity check fails or chaining gets stuck. The empty
/// graph yields an empty path.
pub fn as_path<E: Edge>(graph: &Graph<E>) -> Option<Path<E>> {
    if euler_kind(graph) == EulerKind::NotEulerian {
        debug!(
            odd = graph.odd_degree_vertices().len(),
            "as_path: odd-degree vertex count rules out a single walk"
        );
        return None;
    }

    let mut pool = graph.edges();
    if pool.is_empty() {
        return Some(Path::default());
    }

    let mut current = pool.remove(0);
    let mut chain = Vec::with_capacity(graph.edge_count());
    chain.push(current.clone());

    while !pool.is_empty() {
        let Some(next) = pool.iter().position(|e| current.connects_to_edge(e)) else {
            debug!(
                placed = chain.len(),
                remaining = pool.len(),
                "as_path: greedy chaining stuck"
            );
            return None;
        };
        current = pool.remove(next);
        trace!(length = current.length(), "as_path: chained edge");
        chain.push(current.clone());
    }

    Some(Path::new(chain))
}

/// Eulerian walk via Hierholzer's algorithm.
///
/// Uses every edge exactly once and forms a real walk: closed when all
/// degrees are even (starting from an endpoint of the shortest edge), open
/// from one odd vertex to the other otherwise. Returns None when the parity
/// check fails or the edges are not all in one connected component.
pub fn eulerian_path<E: Edge>(graph: &Graph<E>) -> Option<Path<E>> {
    let edges = graph.edges();
    let start = match euler_kind(graph) {
        EulerKind::NotEulerian => {
            debug!("eulerian_path: odd-degree vertex count rules out a single walk");
            return None;
        }
        EulerKind::Trail { start, .. } => start,
        EulerKind::Circuit => match edges.first() {
            Some(edge) => edge.vertices()[0],
            None => return Some(Path::default()),
        },
    };

    let vertices = graph.vertices();
    let index: HashMap<&E::Vertex, usize> =
        vertices.iter().enumerate().map(|(i, &v)| (v, i)).collect();

    // Edge indices per vertex; a self-loop is listed once.
    let mut incident: Vec<Vec<usize>> = vec![Vec::new(); vertices.len()];
    for (i, edge) in edges.iter().enumerate() {
        let [a, b] = edge.vertices();
        incident[index[a]].push(i);
        if a != b {
            incident[index[b]].push(i);
        }
    }

    let mut used = vec![false; edges.len()];
    let mut cursor = vec![0usize; vertices.len()];
    // (vertex, edge that led here)
    let mut stack: Vec<(usize, Option<usize>)> = vec![(index[start], None)];
    let mut circuit: Vec<usize> = Vec::with_capacity(edges.len());

    while let Some(&(v, via)) = stack.last() {
        while cursor[v] < incident[v].len() && used[incident[v][cursor[v]]] {
            cursor[v] += 1;
        }

        match incident[v].get(cursor[v]) {
            Some(&e) => {
                used[e] = true;
                let next = index[edges[e].other(vertices[v])];
                stack.push((next, Some(e)));
            }
            None => {
                stack.pop();
                if let Some(e) = via {
                    circuit.push(e);
                }
            }
        }
    }

    if circuit.len() != edges.len() {
        debug!(
            reached = circuit.len(),
            total = edges.len(),
            "eulerian_path: edges span more than one component"
        );
        return None;
    }

    // Edges were emitted while unwinding, i.e. from the far end back to the start
    circuit.reverse();
    Some(Path::new(circuit.into_iter().map(|i| edges[i].clone()).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SimpleEdge;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    type E = SimpleEdge<&'static str>;

    fn edge(a: &'static str, b: &'static str, length: u64) -> E {
        SimpleEdge::new(a, b, length)
    }

    fn make_square() -> Graph<E> {
        Graph::from_iter([
            edge("A", "B", 1),
            edge("B", "C", 1),
            edge("C", "D", 1),
            edge("D", "A", 1),
        ])
    }

    fn make_star() -> Graph<E> {
        Graph::from_iter([edge("X", "A", 1), edge("X", "B", 1), edge("X", "C", 1)])
    }

    /// Two triangles sharing X. Greedy chaining strands the second triangle.
    fn make_figure_eight() -> Graph<E> {
        Graph::from_iter([
            edge("X", "A", 1),
            edge("A", "B", 5),
            edge("B", "X", 5),
            edge("X", "C", 2),
            edge("C", "D", 6),
            edge("D", "X", 6),
        ])
    }

    fn edge_set<'a>(path: &'a Path<E>) -> HashSet<&'a E> {
        path.iter().collect()
    }

    fn graph_set(graph: &Graph<E>) -> HashSet<&E> {
        graph.iter().collect()
    }

    /// Vertices of the walk, started from whichever end of the first edge works.
    fn closed_walk<T: Edge>(path: &Path<T>) -> Option<Vec<T::Vertex>> {
        let [a, b] = path.first()?.vertices();
        path.walk_from(a).or_else(|| path.walk_from(b))
    }

    // --- Parity ---

    #[test]
    fn test_euler_kind_circuit() {
        assert_eq!(euler_kind(&make_square()), EulerKind::Circuit);
        assert_eq!(euler_kind(&Graph::<E>::new()), EulerKind::Circuit);
    }

    #[test]
    fn test_euler_kind_trail() {
        let g = Graph::from_iter([edge("A", "B", 1), edge("B", "C", 1)]);
        match euler_kind(&g) {
            EulerKind::Trail { start, end } => {
                let mut ends = [*start, *end];
                ends.sort();
                assert_eq!(ends, ["A", "C"]);
            }
            other => panic!("expected trail, got {:?}", other),
        }
    }

    #[test]
    fn test_euler_kind_star() {
        assert_eq!(euler_kind(&make_star()), EulerKind::NotEulerian);
    }

    #[test]
    fn test_euler_kind_self_loop_is_even() {
        let g = Graph::from_iter([edge("A", "A", 1)]);
        assert_eq!(euler_kind(&g), EulerKind::Circuit);
    }

    // --- Greedy chaining ---

    #[test]
    fn test_as_path_square() {
        let g = make_square();
        let path = as_path(&g).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(edge_set(&path), graph_set(&g));
    }

    #[test]
    fn test_as_path_star_rejected() {
        assert!(as_path(&make_star()).is_none());
    }

    #[test]
    fn test_as_path_starts_with_shortest_edge() {
        let g = Graph::from_iter([edge("A", "B", 1), edge("B", "C", 4), edge("C", "D", 9)]);
        let path = as_path(&g).unwrap();
        assert_eq!(
            path.edges(),
            &[edge("A", "B", 1), edge("B", "C", 4), edge("C", "D", 9)]
        );
    }

    #[test]
    fn test_as_path_chain_from_middle_gets_stuck() {
        // Shortest edge sits mid-chain: greedy walks one way and cannot return
        let g = Graph::from_iter([edge("A", "B", 4), edge("B", "C", 1), edge("C", "D", 9)]);
        assert!(matches!(euler_kind(&g), EulerKind::Trail { .. }));
        assert!(as_path(&g).is_none());
        assert_eq!(eulerian_path(&g).map(|p| p.len()), Some(3));
    }

    #[test]
    fn test_as_path_consecutive_edges_touch() {
        let g = make_square();
        let path = as_path(&g).unwrap();
        for pair in path.edges().windows(2) {
            assert!(pair[0].connects_to_edge(&pair[1]));
        }
    }

    #[test]
    fn test_as_path_disjoint_components_stuck() {
        let g = Graph::from_iter([
            edge("A", "B", 1),
            edge("B", "C", 1),
            edge("C", "A", 1),
            edge("D", "E", 2),
            edge("E", "F", 2),
            edge("F", "D", 2),
        ]);
        assert_eq!(euler_kind(&g), EulerKind::Circuit);
        assert!(as_path(&g).is_none());
    }

    #[test]
    fn test_as_path_no_backtracking() {
        // Parity passes and a walk exists, but greedy strands C-D and D-X
        let g = make_figure_eight();
        assert_eq!(euler_kind(&g), EulerKind::Circuit);
        assert!(as_path(&g).is_none());
        assert!(eulerian_path(&g).is_some());
    }

    #[test]
    fn test_as_path_empty_graph() {
        assert_eq!(as_path(&Graph::<E>::new()), Some(Path::default()));
    }

    #[test]
    fn test_as_path_idempotent() {
        let g = make_square();
        assert_eq!(as_path(&g), as_path(&g));
    }

    // --- Hierholzer ---

    #[test]
    fn test_eulerian_path_square_is_closed_walk() {
        let g = make_square();
        let path = eulerian_path(&g).unwrap();
        assert_eq!(edge_set(&path), graph_set(&g));

        let walk = closed_walk(&path).unwrap();
        assert_eq!(walk.first(), walk.last());
    }

    #[test]
    fn test_eulerian_path_figure_eight() {
        let g = make_figure_eight();
        let path = eulerian_path(&g).unwrap();
        assert_eq!(path.len(), 6);
        assert_eq!(edge_set(&path), graph_set(&g));
        // Shortest edge is X-A, so the circuit starts at X
        let walk = path.walk_from(&"X").unwrap();
        assert_eq!(walk.last(), Some(&"X"));
    }

    #[test]
    fn test_eulerian_path_trail_runs_between_odd_vertices() {
        let g = Graph::from_iter([
            edge("A", "B", 1),
            edge("B", "C", 1),
            edge("C", "A", 1),
            edge("C", "D", 3),
        ]);
        let (start, end) = match euler_kind(&g) {
            EulerKind::Trail { start, end } => (*start, *end),
            other => panic!("expected trail, got {:?}", other),
        };
        let path = eulerian_path(&g).unwrap();
        assert_eq!(path.len(), 4);
        let walk = path.walk_from(&start).unwrap();
        assert_eq!(walk.last(), Some(&end));
    }

    #[test]
    fn test_eulerian_path_self_loop_and_parallel_edges() {
        let g = Graph::from_iter([
            edge("A", "B", 1),
            edge("B", "A", 2),
            edge("B", "B", 3),
        ]);
        let path = eulerian_path(&g).unwrap();
        assert_eq!(path.len(), 3);
        assert!(path.walk_from(&"A").is_some());
    }

    #[test]
    fn test_eulerian_path_rejects_disconnected() {
        let g = Graph::from_iter([
            edge("A", "B", 1),
            edge("B", "C", 1),
            edge("C", "A", 1),
            edge("D", "D", 1),
        ]);
        assert!(eulerian_path(&g).is_none());
    }

    #[test]
    fn test_eulerian_path_star_rejected() {
        assert!(eulerian_path(&make_star()).is_none());
    }

    #[test]
    fn test_eulerian_path_random_closed_walks() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            // Build a random closed walk; distinct lengths keep every step a separate edge
            let steps = rng.gen_range(3..15u64);
            let mut route: Vec<u64> = (0..steps).map(|_| rng.gen_range(0..6)).collect();
            route.push(route[0]);
            let g = Graph::from_iter(
                route
                    .windows(2)
                    .enumerate()
                    .map(|(i, w)| SimpleEdge::new(w[0], w[1], i as u64)),
            );
            assert_eq!(g.edge_count(), steps as usize);

            let path = eulerian_path(&g).expect("closed walk graph must be Eulerian");
            assert_eq!(path.len(), g.edge_count());
            let distinct: HashSet<&SimpleEdge<u64>> = path.iter().collect();
            assert_eq!(distinct.len(), g.edge_count());

            let walk = closed_walk(&path).expect("edges do not form a walk");
            assert_eq!(walk.first(), walk.last());
        }
    }
}
