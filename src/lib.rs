//! Bounded multi-source shortest paths (BMSSP) for non-negative weighted
//! digraphs, with a classic Dijkstra reference and a stable C ABI.
//!
//! Two entry points:
//!  - [`solve`]: adjacency map in, distance array out
//!  - [`Bmssp`]: CSR graph in, [`Solution`] (distances, predecessors, counters) out
//!
//! ```
//! use bmssp_core::{solve, AdjacencyMap};
//!
//! let mut g = AdjacencyMap::new();
//! g.entry(0).or_default().insert(1, 2.0);
//! g.entry(1).or_default().insert(2, 0.5);
//! let dist = solve(&g, 0, 4).unwrap();
//! assert_eq!(&dist[..3], &[0.0, 2.0, 2.5]);
//! assert!(dist[3].is_infinite());
//! ```

mod base_case;
mod bmssp;
mod certify;
pub mod config;
mod dijkstra;
pub mod error;
pub mod ffi;
mod frontier;
pub mod generate;
mod graph;
mod heap;
mod pivots;
mod state;
mod stats;

pub use crate::bmssp::Bmssp;
pub use crate::config::BmsspConfig;
pub use crate::dijkstra::dijkstra;
pub use crate::error::{Result, SolveError};
pub use crate::ffi::{sssp_run_baseline, sssp_run_bmssp, sssp_version, SsspResultInfo};
pub use crate::graph::{AdjacencyMap, CsrGraph};
pub use crate::stats::{Solution, SolveStats};

/// Shortest distances from `source` over `n` vertices; `f32::INFINITY` marks
/// unreachable vertices. Input is fully validated before any work starts.
pub fn solve(graph: &AdjacencyMap, source: u32, n: usize) -> Result<Vec<f32>> {
    if n == 0 {
        return Err(SolveError::EmptyGraph);
    }
    if source as usize >= n {
        return Err(SolveError::SourceOutOfRange { vertex: source, n });
    }
    let csr = CsrGraph::from_adjacency(n, graph)?;
    Ok(Bmssp::new(&csr).run(source)?.dist)
}
