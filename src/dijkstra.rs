//! Classic binary-heap Dijkstra, the reference every other path is checked
//! against. Also backs `sssp_run_baseline`.

use crate::error::Result;
use crate::graph::CsrGraph;
use crate::heap::MinHeap;
use crate::state::{PathState, Relaxation};
use crate::stats::{Solution, SolveStats};

pub fn dijkstra(graph: &CsrGraph, source: u32) -> Result<Solution> {
    graph.check_source(source)?;
    let n = graph.num_vertices();
    let mut state = PathState::new(n, source);
    let mut heap = MinHeap::with_cap(n.min(1024));
    heap.push(state.label(source), source);
    while let Some(item) = heap.pop() {
        let u = item.vertex;
        if item.key > state.label(u) { continue; }
        for (v, w) in graph.successors(u) {
            let cand = state.candidate(u, v, w);
            if state.offer(cand) == Relaxation::Improved {
                heap.push(cand, v);
            }
        }
    }
    let mut stats = SolveStats::default();
    stats.absorb_heap(&heap);
    stats.relaxations = state.relaxations;
    log::debug!(
        "dijkstra: n={} m={} relaxations={} heap_max={}",
        n,
        graph.num_edges(),
        stats.relaxations,
        stats.heap_max
    );
    let (dist, pred) = state.into_parts();
    Ok(Solution::new(source, dist, pred, stats))
}
