use std::time::Instant;

use anyhow::{bail, Context, Result};
use edge_graph_core::{
    all_paths, as_path, dijkstra, euler_kind, eulerian_path, parse_edge_list, Edge, EulerKind,
    Graph, SimpleEdge,
};
use serde_json::json;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_SIZE: u64 = 64;

/// Path enumeration is exponential; larger graphs report it as skipped.
const ENUMERATION_EDGE_LIMIT: usize = 12;

const DEFAULT_LOG_FILTER: &str = "edge_graph_bench=info,edge_graph_core=warn";

type Generator = fn(u64) -> Graph<SimpleEdge<u64>>;

enum Mode {
    Help,
    Generated(Vec<(&'static str, Generator)>),
    Literal {
        edges: String,
        from: Option<String>,
        to: Option<String>,
    },
}

struct BenchConfig {
    mode: Mode,
    size: u64,
    json: bool,
}

impl BenchConfig {
    /// Positional arguments: `[mode] [size]`, or `edges "<list>" [from] [to]`.
    /// `--json` may appear anywhere.
    fn from_args(args: &[String]) -> Result<Self> {
        let json = args.iter().any(|a| a == "--json");
        let positional: Vec<&str> = args
            .iter()
            .skip(1)
            .map(String::as_str)
            .filter(|a| *a != "--json")
            .collect();

        let mode = positional.first().copied().unwrap_or("all");

        if mode == "help" || mode == "--help" {
            return Ok(Self {
                mode: Mode::Help,
                size: DEFAULT_SIZE,
                json,
            });
        }

        if mode == "edges" {
            let edges = positional
                .get(1)
                .context("edges mode needs a literal list, e.g. \"A-B:1, B-C:2\"")?;
            return Ok(Self {
                mode: Mode::Literal {
                    edges: edges.to_string(),
                    from: positional.get(2).map(|s| s.to_string()),
                    to: positional.get(3).map(|s| s.to_string()),
                },
                size: DEFAULT_SIZE,
                json,
            });
        }

        let size = match positional.get(1) {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("invalid size '{}'", raw))?,
            None => DEFAULT_SIZE,
        };
        if size < 3 {
            bail!("size must be at least 3, got {}", size);
        }

        let generators: Vec<(&'static str, Generator)> = match mode {
            "grid" => vec![("Grid lattice", gen_grid)],
            "cycle" => vec![("Cycle", gen_cycle)],
            "ladder" => vec![("Ladder", gen_ladder)],
            "random" => vec![("Erdos-Renyi random", gen_random)],
            "star" => vec![("Star", gen_star)],
            "all" => vec![
                ("Grid lattice", gen_grid as Generator),
                ("Cycle", gen_cycle),
                ("Ladder", gen_ladder),
                ("Erdos-Renyi random", gen_random),
                ("Star", gen_star),
            ],
            other => bail!("unknown mode: {}. Use --help for options.", other),
        };

        Ok(Self {
            mode: Mode::Generated(generators),
            size,
            json,
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config = BenchConfig::from_args(&args)?;

    match config.mode {
        Mode::Help => print_usage(),
        Mode::Generated(generators) => {
            if !config.json {
                println!("edge-graph-bench");
                println!("================");
                println!();
            }
            for (name, generator) in generators {
                info!(graph = name, size = config.size, "generating graph");
                let t = Instant::now();
                let graph = generator(config.size);
                let build_ms = elapsed_ms(t);

                let far = graph.vertices().into_iter().copied().max().unwrap_or(0);
                let report = run_benchmark(name, &graph, &0, &far, build_ms);
                report.print(config.json);
            }
        }
        Mode::Literal { edges, from, to } => {
            let t = Instant::now();
            let graph = parse_edge_list(&edges).context("could not parse edge list")?;
            let build_ms = elapsed_ms(t);
            if graph.is_empty() {
                bail!("edge list is empty");
            }

            // Default route: alphabetically first vertex to alphabetically last
            let mut names: Vec<String> = graph.vertices().into_iter().cloned().collect();
            names.sort();
            let from = from.unwrap_or_else(|| names[0].clone());
            let to = to.unwrap_or_else(|| names[names.len() - 1].clone());
            for endpoint in [&from, &to] {
                if !graph.contains_vertex(endpoint) {
                    warn!(vertex = %endpoint, "route endpoint is not in the graph");
                }
            }

            let report = run_benchmark("Edge literal list", &graph, &from, &to, build_ms);
            report.print(config.json);
        }
    }

    Ok(())
}

fn print_usage() {
    println!("Usage: edge-graph-bench [mode] [size] [--json]");
    println!("       edge-graph-bench edges \"A-B:1, B-C:2\" [from] [to] [--json]");
    println!();
    println!("Modes:");
    println!("  all         Run every generator (default)");
    println!("  grid        size x size lattice, random lengths");
    println!("  cycle       Ring of size vertices (Eulerian circuit)");
    println!("  ladder      Two rails of size vertices joined by rungs");
    println!("  random      Erdos-Renyi: size vertices, 2 * size random edges");
    println!("  star        One hub with size leaves");
    println!("  edges       Build the graph from edge literals");
    println!();
    println!("Default size: {}", DEFAULT_SIZE);
    println!(
        "Path enumeration runs only on graphs with at most {} edges.",
        ENUMERATION_EDGE_LIMIT
    );
    println!("Logging is controlled by RUST_LOG (default: {}).", DEFAULT_LOG_FILTER);
}

struct Report {
    name: String,
    route: String,
    vertices: usize,
    edges: usize,
    parity: &'static str,
    build_ms: f64,
    /// (hops, length) of the shortest path, if any.
    shortest: Option<(usize, u64)>,
    shortest_ms: f64,
    greedy: Option<usize>,
    greedy_ms: f64,
    hierholzer: Option<usize>,
    hierholzer_ms: f64,
    /// Number of enumerated walks; None when skipped.
    enumerated: Option<usize>,
    enumeration_ms: f64,
}

impl Report {
    fn print(&self, as_json: bool) {
        if as_json {
            let value = json!({
                "name": self.name,
                "route": self.route,
                "vertices": self.vertices,
                "edges": self.edges,
                "parity": self.parity,
                "build_ms": self.build_ms,
                "shortest_path": self.shortest.map(|(hops, length)| json!({ "hops": hops, "length": length })),
                "shortest_path_ms": self.shortest_ms,
                "greedy_walk_edges": self.greedy,
                "greedy_ms": self.greedy_ms,
                "hierholzer_walk_edges": self.hierholzer,
                "hierholzer_ms": self.hierholzer_ms,
                "enumerated_walks": self.enumerated,
                "enumeration_ms": self.enumeration_ms,
            });
            println!("{}", value);
            return;
        }

        println!("--- {} ---", self.name);
        println!(
            "Built in {:.2}ms, {} vertices, {} edges, parity: {}",
            self.build_ms, self.vertices, self.edges, self.parity
        );
        match self.shortest {
            Some((hops, length)) => println!(
                "Shortest path {}: {} hops, length {} in {:.2}ms",
                self.route, hops, length, self.shortest_ms
            ),
            None => println!(
                "Shortest path {}: no path ({:.2}ms)",
                self.route, self.shortest_ms
            ),
        }
        println!(
            "{:<18} {}",
            "Greedy chaining:",
            walk_summary(self.greedy, self.greedy_ms)
        );
        println!(
            "{:<18} {}",
            "Hierholzer:",
            walk_summary(self.hierholzer, self.hierholzer_ms)
        );
        match self.enumerated {
            Some(count) => println!(
                "{:<18} {} walks in {:.2}ms",
                "Path enumeration:", count, self.enumeration_ms
            ),
            None => println!(
                "{:<18} skipped ({} edges > {})",
                "Path enumeration:", self.edges, ENUMERATION_EDGE_LIMIT
            ),
        }
        println!();
    }
}

fn walk_summary(edges: Option<usize>, ms: f64) -> String {
    match edges {
        Some(n) => format!("{} edges in {:.2}ms", n, ms),
        None => format!("no walk ({:.2}ms)", ms),
    }
}

fn elapsed_ms(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

fn run_benchmark<E: Edge>(
    name: &str,
    graph: &Graph<E>,
    from: &E::Vertex,
    to: &E::Vertex,
    build_ms: f64,
) -> Report {
    let parity = match euler_kind(graph) {
        EulerKind::Circuit => "circuit",
        EulerKind::Trail { .. } => "trail",
        EulerKind::NotEulerian => "not eulerian",
    };

    let t = Instant::now();
    let shortest = dijkstra(graph, from, to).map(|p| (p.len(), p.length()));
    let shortest_ms = elapsed_ms(t);

    let t = Instant::now();
    let greedy = as_path(graph).map(|p| p.len());
    let greedy_ms = elapsed_ms(t);

    let t = Instant::now();
    let hierholzer = eulerian_path(graph).map(|p| p.len());
    let hierholzer_ms = elapsed_ms(t);

    let (enumerated, enumeration_ms) = if graph.edge_count() <= ENUMERATION_EDGE_LIMIT {
        let t = Instant::now();
        let count = all_paths(graph).len();
        (Some(count), elapsed_ms(t))
    } else {
        debug!(edges = graph.edge_count(), "path enumeration skipped");
        (None, 0.0)
    };

    info!(graph = name, ?shortest, ?greedy, ?hierholzer, "benchmark complete");

    Report {
        name: name.to_string(),
        route: format!("{:?} -> {:?}", from, to),
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        parity,
        build_ms,
        shortest,
        shortest_ms,
        greedy,
        greedy_ms,
        hierholzer,
        hierholzer_ms,
        enumerated,
        enumeration_ms,
    }
}

// ---------------------------------------------------------------------------
// Generators: deterministic, single-threaded, vertex ids 0..n
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }

    /// Edge length in 1..=9.
    fn length(&mut self) -> u64 {
        self.next(9) + 1
    }
}

/// size x size lattice. Border vertices have odd degree, so no Eulerian walk.
fn gen_grid(size: u64) -> Graph<SimpleEdge<u64>> {
    let mut graph = Graph::with_capacity((2 * size * (size - 1)) as usize);
    let mut rng = FastRng::new(42);

    for row in 0..size {
        for col in 0..size {
            let id = row * size + col;
            if col + 1 < size {
                graph.add_edge(SimpleEdge::new(id, id + 1, rng.length()));
            }
            if row + 1 < size {
                graph.add_edge(SimpleEdge::new(id, id + size, rng.length()));
            }
        }
    }

    graph
}

/// Ring: every vertex has degree 2, so both walk builders should succeed.
fn gen_cycle(size: u64) -> Graph<SimpleEdge<u64>> {
    let mut rng = FastRng::new(12345);
    (0..size)
        .map(|i| SimpleEdge::new(i, (i + 1) % size, rng.length()))
        .collect()
}

/// Two rails (0..size and size..2*size) with a rung at every position.
fn gen_ladder(size: u64) -> Graph<SimpleEdge<u64>> {
    let mut graph = Graph::with_capacity((3 * size) as usize);
    let mut rng = FastRng::new(67890);

    for i in 0..size {
        graph.add_edge(SimpleEdge::new(i, size + i, rng.length()));
        if i + 1 < size {
            graph.add_edge(SimpleEdge::new(i, i + 1, rng.length()));
            graph.add_edge(SimpleEdge::new(size + i, size + i + 1, rng.length()));
        }
    }

    graph
}

/// Erdos-Renyi style: 2 * size uniform random edges, self-loops dropped.
fn gen_random(size: u64) -> Graph<SimpleEdge<u64>> {
    let target_edges = size * 2;
    let mut graph = Graph::with_capacity(target_edges as usize);
    let mut rng = FastRng::new(54321);

    for _ in 0..target_edges {
        let from = rng.next(size);
        let to = rng.next(size);
        if from != to {
            graph.add_edge(SimpleEdge::new(from, to, rng.length()));
        }
    }

    graph
}

/// Hub 0 with `size` leaves: every vertex is odd, the worst case for parity.
fn gen_star(size: u64) -> Graph<SimpleEdge<u64>> {
    let mut rng = FastRng::new(99999);
    (1..=size)
        .map(|leaf| SimpleEdge::new(0, leaf, rng.length()))
        .collect()
}
