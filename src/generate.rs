//! Deterministic graph families for tests, demos and benchmarks.

use std::ops::Range;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::graph::CsrGraph;

/// `0 -> 1 -> ... -> n-1`.
pub fn path_graph(n: u32, w: f32) -> Result<CsrGraph> {
    let edges: Vec<_> = (1..n).map(|v| (v - 1, v, w)).collect();
    CsrGraph::from_edges(n as usize, &edges)
}

/// Center 0 with edges to leaves `1..=leaves`.
pub fn star_graph(leaves: u32, w: f32) -> Result<CsrGraph> {
    let edges: Vec<_> = (1..=leaves).map(|v| (0, v, w)).collect();
    CsrGraph::from_edges(leaves as usize + 1, &edges)
}

pub fn complete_graph(n: u32, w: f32) -> Result<CsrGraph> {
    let mut edges = Vec::with_capacity((n as usize).saturating_mul(n as usize));
    clique(&mut edges, 0..n, w);
    CsrGraph::from_edges(n as usize, &edges)
}

/// Two cliques of sizes `a` and `b` joined by the single edge `a-1 -> a`.
pub fn bridge_cliques(a: u32, b: u32, w: f32) -> Result<CsrGraph> {
    let mut edges = Vec::new();
    clique(&mut edges, 0..a, w);
    clique(&mut edges, a..a + b, w);
    if a > 0 && b > 0 { edges.push((a - 1, a, w)); }
    CsrGraph::from_edges((a + b) as usize, &edges)
}

fn clique(edges: &mut Vec<(u32, u32, f32)>, range: Range<u32>, w: f32) {
    for u in range.clone() {
        for v in range.clone() {
            if u != v { edges.push((u, v, w)); }
        }
    }
}

/// `rows x cols` grid with right and down edges of weight `w`; lots of
/// equal-length paths.
pub fn grid_graph(rows: u32, cols: u32, w: f32) -> Result<CsrGraph> {
    let id = |r: u32, c: u32| r * cols + c;
    let mut edges = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            if c + 1 < cols { edges.push((id(r, c), id(r, c + 1), w)); }
            if r + 1 < rows { edges.push((id(r, c), id(r + 1, c), w)); }
        }
    }
    CsrGraph::from_edges((rows * cols) as usize, &edges)
}

/// About `n * avg_degree` random directed edges, no self loops, weights
/// uniform in `weights`.
pub fn random_sparse(n: u32, avg_degree: f32, seed: u64, weights: Range<f32>) -> Result<CsrGraph> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let m_est = (n as f32 * avg_degree) as usize;
    let mut edges = Vec::with_capacity(m_est);
    if n > 1 {
        for _ in 0..m_est {
            let u = rng.gen_range(0..n);
            let v = rng.gen_range(0..n);
            if u == v { continue; }
            let w = if weights.is_empty() { weights.start } else { rng.gen_range(weights.clone()) };
            edges.push((u, v, w));
        }
    }
    CsrGraph::from_edges(n as usize, &edges)
}

/// Like [`random_sparse`] with integer weights in `0..=max_weight`, so sums
/// are exact and zero-weight edges occur.
pub fn random_integral(n: u32, avg_degree: f32, seed: u64, max_weight: u32) -> Result<CsrGraph> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let m_est = (n as f32 * avg_degree) as usize;
    let mut edges = Vec::with_capacity(m_est);
    if n > 1 {
        for _ in 0..m_est {
            let u = rng.gen_range(0..n);
            let v = rng.gen_range(0..n);
            if u == v { continue; }
            edges.push((u, v, rng.gen_range(0..=max_weight) as f32));
        }
    }
    CsrGraph::from_edges(n as usize, &edges)
}
