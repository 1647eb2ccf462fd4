//! edge-graph-core: undirected graphs stored as a set of edges.
//!
//! A pure Rust library for graphs whose only stored state is a deduplicated
//! edge set; vertices and degrees are derived on demand. Provides
//! Dijkstra shortest paths, Eulerian walk assembly (a greedy chainer and
//! Hierholzer's algorithm) and exhaustive enumeration of edge-simple walks.
//!
//! All algorithms take the graph by shared reference and return freshly
//! owned [`Path`] values. "No path" is an ordinary `None`; contract
//! violations such as asking an edge for the far side of a vertex it does
//! not touch panic.

mod euler;
mod graph;
mod parse;
mod path;
mod traversal;

pub use euler::{as_path, euler_kind, eulerian_path, EulerKind};
pub use graph::{Edge, Graph, SimpleEdge, Vertex};
pub use parse::{parse_edge_list, ParseEdgeError};
pub use path::Path;
pub use traversal::{all_paths, all_paths_from, dijkstra};
