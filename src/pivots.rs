//! Pivot selection over the predecessor forest restricted to `W`.
//!
//! Inside `W` every vertex that is not a source got its predecessor from a
//! vertex of `W`, so the forest's roots are sources: those without a
//! predecessor or whose predecessor lies outside `W`. Below the top level
//! every source carries a predecessor from an earlier frame.

use std::collections::{HashMap, HashSet};

use crate::state::PathState;

/// Picks the root sources whose predecessor subtree inside `w` holds at least
/// `k` vertices. Every source is kept when `w` is small relative to `sources`.
pub(crate) fn select_pivots(state: &PathState, sources: &[u32], w: &[u32], k: usize) -> Vec<u32> {
    if w.len() <= k.saturating_mul(sources.len()) {
        return sources.to_vec();
    }
    let in_w: HashSet<u32> = w.iter().copied().collect();
    let mut children: HashMap<u32, Vec<u32>> = HashMap::new();
    for &v in w {
        if let Some(p) = state.pred(v) {
            if p != v && in_w.contains(&p) {
                children.entry(p).or_default().push(v);
            }
        }
    }
    sources
        .iter()
        .copied()
        .filter(|&s| state.pred(s).map_or(true, |p| !in_w.contains(&p)))
        .filter(|&s| subtree_reaches(&children, s, k))
        .collect()
}

// Counts the root itself; stops as soon as `k` is reached.
fn subtree_reaches(children: &HashMap<u32, Vec<u32>>, root: u32, k: usize) -> bool {
    let mut seen: HashSet<u32> = HashSet::from([root]);
    let mut stack = vec![root];
    while let Some(u) = stack.pop() {
        if seen.len() >= k { return true; }
        for &c in children.get(&u).map(Vec::as_slice).unwrap_or_default() {
            if seen.insert(c) { stack.push(c); }
        }
    }
    seen.len() >= k
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0 -> 1 -> 2 -> 3 chain plus 0 -> 4 -> 5.
    fn forest() -> PathState {
        let mut s = PathState::new(6, 0);
        s.relax(0, 1, 1.0);
        s.relax(1, 2, 1.0);
        s.relax(2, 3, 1.0);
        s.relax(0, 4, 0.5);
        s.relax(4, 5, 0.2);
        s
    }

    #[test]
    fn small_w_keeps_all_sources() {
        let s = forest();
        assert_eq!(select_pivots(&s, &[0, 4], &[0, 1, 4], 2), vec![0, 4]);
    }

    #[test]
    fn large_subtrees_become_pivots() {
        let s = forest();
        let w = [0, 1, 2, 3, 5];
        // 5 hangs below 4, which is outside W: a root whose subtree is only itself.
        assert_eq!(select_pivots(&s, &[0, 5], &w, 2), vec![0]);
    }

    #[test]
    fn sources_hanging_below_another_tree_are_not_roots() {
        let s = forest();
        let w = [0, 1, 2, 3, 4, 5];
        assert_eq!(select_pivots(&s, &[0, 4], &w, 2), vec![0]);
        assert_eq!(select_pivots(&s, &[1, 2], &w, 2), Vec::<u32>::new());
    }

    #[test]
    fn sources_settled_by_an_earlier_frame_still_root_their_trees() {
        // A deeper frame starts from 2, which already has predecessor 1. Two
        // expansion rounds reach 4; 5 and 6 lie further out and only a pivot
        // at 2 carries the search there.
        let edges: Vec<(u32, u32, f32)> = (0..6).map(|u| (u, u + 1, 1.0)).collect();
        let g = crate::graph::CsrGraph::from_edges(7, &edges).unwrap();
        let mut s = PathState::new(7, 0);
        for u in 0..4 {
            for (v, w) in g.successors(u) { s.relax(u, v, w); }
        }
        assert_eq!(s.pred(2), Some(1));
        let w = [2, 3, 4];
        assert_eq!(select_pivots(&s, &[2], &w, 2), vec![2]);
        assert!(s.dist(5).is_infinite());
    }
}
