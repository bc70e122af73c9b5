//! Level-0 solver: Dijkstra below bound `B`, stopped after `k + 1` settles.

use std::collections::HashSet;

use crate::graph::CsrGraph;
use crate::heap::MinHeap;
use crate::state::{Label, PathState};
use crate::stats::SolveStats;

/// Returns `(boundary, settled)`. When at most `k` vertices lie below `bound`
/// they are all returned with `bound`. Otherwise the `(k+1)`-th settled label
/// becomes the boundary and only the `k` vertices strictly below it are
/// returned; the cut vertex is left for the caller to queue again.
pub(crate) fn bounded_dijkstra(
    graph: &CsrGraph,
    state: &mut PathState,
    sources: &[u32],
    bound: Label,
    k: usize,
    stats: &mut SolveStats,
) -> (Label, Vec<u32>) {
    let budget = k.max(1);
    let mut heap = MinHeap::with_cap(budget.min(1024));
    for &s in sources {
        let l = state.label(s);
        if l < bound { heap.push(l, s); }
    }
    let mut settled = Vec::with_capacity(budget + 1);
    let mut done: HashSet<u32> = HashSet::new();

    while settled.len() <= budget {
        let Some(item) = heap.pop() else { break };
        let u = item.vertex;
        if item.key > state.label(u) || !done.insert(u) { continue; }
        settled.push(u);
        for (v, w) in graph.successors(u) {
            if done.contains(&v) { continue; }
            let cand = state.candidate(u, v, w);
            if cand < bound && state.offer(cand).reached() {
                heap.push(cand, v);
            }
        }
    }
    stats.absorb_heap(&heap);

    if settled.len() <= budget {
        return (bound, settled);
    }
    // pops come out in increasing label order, so the cut is the last one
    let cut = settled.pop().map_or(bound, |v| state.label(v));
    (cut, settled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(n: u32) -> CsrGraph {
        let edges: Vec<(u32, u32, f32)> = (0..n - 1).map(|u| (u, u + 1, 1.0)).collect();
        CsrGraph::from_edges(n as usize, &edges).unwrap()
    }

    #[test]
    fn whole_ball_fits() {
        let g = chain(4);
        let mut s = PathState::new(4, 0);
        let mut st = SolveStats::default();
        let (b, got) = bounded_dijkstra(&g, &mut s, &[0], Label::at(10.0), 8, &mut st);
        assert_eq!((b, got), (Label::at(10.0), vec![0, 1, 2, 3]));
        assert_eq!(s.dist(3), 3.0);
        assert!(st.heap_pushes >= 4);
    }

    #[test]
    fn exactly_k_vertices_still_fit() {
        let g = chain(3);
        let mut s = PathState::new(3, 0);
        let (b, got) = bounded_dijkstra(&g, &mut s, &[0], Label::TOP, 3, &mut SolveStats::default());
        assert_eq!((b, got), (Label::TOP, vec![0, 1, 2]));
    }

    #[test]
    fn budget_cuts_at_the_next_label() {
        let g = chain(6);
        let mut s = PathState::new(6, 0);
        let (b, got) = bounded_dijkstra(&g, &mut s, &[0], Label::TOP, 3, &mut SolveStats::default());
        assert_eq!(got, vec![0, 1, 2]);
        assert_eq!(b, s.label(3));
        assert_eq!(b.dist, 3.0);
        assert!(s.dist(4) == 4.0 && s.dist(5).is_infinite());
    }

    #[test]
    fn ties_at_the_cut_stay_outside() {
        // 0 fans out to 1, 2, 3 at the same distance
        let g = CsrGraph::from_edges(4, &[(0, 1, 1.0), (0, 2, 1.0), (0, 3, 1.0)]).unwrap();
        let mut s = PathState::new(4, 0);
        let (b, got) = bounded_dijkstra(&g, &mut s, &[0], Label::TOP, 2, &mut SolveStats::default());
        assert_eq!(got, vec![0, 1]);
        assert_eq!(b, s.label(2));
        for &v in &got {
            assert!(s.label(v) < b);
        }
        assert!(s.label(3) > b);
    }

    #[test]
    fn bound_stops_exploration() {
        let g = chain(6);
        let mut s = PathState::new(6, 0);
        let (b, got) = bounded_dijkstra(&g, &mut s, &[0], Label::at(2.5), 100, &mut SolveStats::default());
        assert_eq!((b, got), (Label::at(2.5), vec![0, 1, 2]));
        assert!(s.dist(3).is_infinite());
    }

    #[test]
    fn isolated_source_returns_itself() {
        let g = CsrGraph::from_edges(2, &[]).unwrap();
        let mut s = PathState::new(2, 1);
        let (b, got) = bounded_dijkstra(&g, &mut s, &[1], Label::at(7.0), 3, &mut SolveStats::default());
        assert_eq!((b, got), (Label::at(7.0), vec![1]));
    }

    #[test]
    fn source_at_or_above_bound_settles_nothing() {
        let g = chain(3);
        let mut s = PathState::new(3, 0);
        let (b, got) = bounded_dijkstra(&g, &mut s, &[0], Label::at(0.0), 3, &mut SolveStats::default());
        assert_eq!((b, got), (Label::at(0.0), vec![]));
    }
}
