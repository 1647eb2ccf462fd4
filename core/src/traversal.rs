use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::{debug, trace};

use crate::graph::{Edge, Graph};
use crate::path::Path;

/// Minimum-length walk from `from` to `to` (Dijkstra).
///
/// The returned path lists edges in traversal order starting at `from`.
/// Returns None if `to` is unreachable, or if either vertex is not in the
/// graph. `from == to` yields an empty path.
///
/// Among parallel edges the shortest one wins; self-loops are never taken.
/// A relaxation whose distance would overflow `u64` is skipped.
pub fn dijkstra<E: Edge>(graph: &Graph<E>, from: &E::Vertex, to: &E::Vertex) -> Option<Path<E>> {
    let vertices = graph.vertices();
    let index: HashMap<&E::Vertex, usize> =
        vertices.iter().enumerate().map(|(i, &v)| (v, i)).collect();

    let (source, target) = match (index.get(from), index.get(to)) {
        (Some(&s), Some(&t)) => (s, t),
        _ => {
            debug!(?from, ?to, "dijkstra: endpoint not in graph");
            return None;
        }
    };

    if source == target {
        return Some(Path::default());
    }

    // Adjacency by vertex index: (neighbor, edge). Self-loops can only lengthen a walk.
    let mut adjacency: Vec<Vec<(usize, &E)>> = vec![Vec::new(); vertices.len()];
    for edge in graph.iter().filter(|e| !e.is_self_loop()) {
        let [a, b] = edge.vertices();
        let (ia, ib) = (index[a], index[b]);
        adjacency[ia].push((ib, edge));
        adjacency[ib].push((ia, edge));
    }

    let mut distance: Vec<Option<u64>> = vec![None; vertices.len()];
    // previous[v] = (predecessor index, edge used to reach v)
    let mut previous: Vec<Option<(usize, &E)>> = vec![None; vertices.len()];
    let mut finished = vec![false; vertices.len()];
    let mut queue: BinaryHeap<Reverse<(u64, usize)>> = BinaryHeap::new();

    distance[source] = Some(0);
    queue.push(Reverse((0, source)));

    while let Some(Reverse((dist, current))) = queue.pop() {
        // Stale entry: a shorter distance was already settled
        if finished[current] {
            continue;
        }
        finished[current] = true;

        if current == target {
            break;
        }

        for &(next, edge) in &adjacency[current] {
            if finished[next] {
                continue;
            }
            let Some(candidate) = dist.checked_add(edge.length()) else {
                trace!(length = edge.length(), "dijkstra: distance overflow, edge skipped");
                continue;
            };
            if distance[next].map_or(true, |d| candidate < d) {
                trace!(vertex = ?vertices[next], distance = candidate, "dijkstra: relaxed");
                distance[next] = Some(candidate);
                previous[next] = Some((current, edge));
                queue.push(Reverse((candidate, next)));
            }
        }
    }

    if !finished[target] {
        debug!(?from, ?to, "dijkstra: target unreachable");
        return None;
    }

    // Walk predecessor links back from the target, then flip into traversal order
    let mut edges = Vec::new();
    let mut node = target;
    while let Some((parent, edge)) = previous[node] {
        edges.push(edge.clone());
        node = parent;
    }
    edges.reverse();

    let path = Path::new(edges);
    debug!(hops = path.len(), length = path.length(), "dijkstra: path found");
    Some(path)
}

/// Every edge-simple walk starting at any vertex.
///
/// Runs [`all_paths_from`] for each vertex in [`Graph::vertices`] order and
/// concatenates the results. The same edge sequence can appear once per
/// start vertex it is reachable from. Exponential in the edge count.
pub fn all_paths<E: Edge>(graph: &Graph<E>) -> Vec<Path<E>> {
    let adjacency = graph.adjacency();
    let mut paths = Vec::new();

    for start in graph.vertices() {
        paths.extend(enumerate_from(&adjacency, start));
    }

    debug!(
        edges = graph.edge_count(),
        paths = paths.len(),
        "all_paths: enumeration complete"
    );
    paths
}

/// Every edge-simple walk starting at `start`, each recorded as soon as it
/// is extended by one edge. Shorter walks come before their extensions.
pub fn all_paths_from<E: Edge>(graph: &Graph<E>, start: &E::Vertex) -> Vec<Path<E>> {
    let adjacency = graph.adjacency();
    enumerate_from(&adjacency, start)
}

fn enumerate_from<'g, E: Edge>(
    adjacency: &HashMap<&'g E::Vertex, Vec<&'g E>>,
    start: &'g E::Vertex,
) -> Vec<Path<E>> {
    let mut walk: Vec<&'g E> = Vec::new();
    let mut recorded: HashSet<Vec<&'g E>> = HashSet::new();
    let mut paths = Vec::new();

    extend_walk(adjacency, start, &mut walk, &mut recorded, &mut paths);
    paths
}

/// Depth-first step: try every unused edge at `at`, record the longer walk,
/// recurse from the far endpoint, then backtrack.
fn extend_walk<'g, E: Edge>(
    adjacency: &HashMap<&'g E::Vertex, Vec<&'g E>>,
    at: &'g E::Vertex,
    walk: &mut Vec<&'g E>,
    recorded: &mut HashSet<Vec<&'g E>>,
    paths: &mut Vec<Path<E>>,
) {
    let Some(candidates) = adjacency.get(at) else {
        return;
    };

    for &edge in candidates {
        if walk.contains(&edge) {
            continue;
        }

        walk.push(edge);
        assert!(
            recorded.insert(walk.clone()),
            "walk of {} edges enumerated twice from the same start",
            walk.len()
        );
        paths.push(Path::new(walk.iter().map(|&e| e.clone()).collect()));

        extend_walk(adjacency, edge.other(at), walk, recorded, paths);
        walk.pop();
    }
}
