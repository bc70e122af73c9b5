//! Optimality check run by debug builds after every solve.
//!
//! Every recorded distance is the length of a real path, so the array is
//! exact once no edge `u -> v` satisfies `dist[u] + w < dist[v]`.

use crate::graph::CsrGraph;
use crate::state::PathState;

/// Counts the edges that could still shorten a distance.
pub(crate) fn violations(graph: &CsrGraph, state: &PathState) -> usize {
    (0..state.len() as u32)
        .filter(|&u| state.dist(u).is_finite())
        .map(|u| {
            let du = state.dist(u);
            graph.successors(u).filter(|&(v, w)| du + w < state.dist(v)).count()
        })
        .sum()
}
