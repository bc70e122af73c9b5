//! Recursive bounded multi-source driver.
//!
//! Level `l` expands a bounded Bellman-Ford ball `W` from its sources, keeps
//! the sources with large predecessor subtrees as pivots, and then feeds them
//! through a [`FrontierStructure`] in batches of `M = 4^(l-1)`, recursing at
//! `l - 1` on each batch. Level 0 is a capped Dijkstra.
//!
//! Every comparison runs on [`Label`]s, so vertex keys are distinct and each
//! vertex has one best path. A frame returns `(B', U)` where `B' <= B` and
//! `U` holds exactly the vertices below `B'` whose best path runs through the
//! frame's sources, all of them final. `B'` equals `B` once the frontier is
//! empty; a frame that runs out of budget returns the last sub-call's
//! boundary instead.

use std::collections::HashSet;

use crate::base_case::bounded_dijkstra;
use crate::certify::violations;
use crate::config::{BmsspConfig, Params};
use crate::error::Result;
use crate::frontier::FrontierStructure;
use crate::graph::CsrGraph;
use crate::pivots::select_pivots;
use crate::state::{Label, PathState, Relaxation};
use crate::stats::{Solution, SolveStats};

/// Solver handle. Cheap to build; each [`Bmssp::run`] owns its own state.
#[derive(Debug, Clone)]
pub struct Bmssp<'g> {
    graph: &'g CsrGraph,
    config: BmsspConfig,
}

impl<'g> Bmssp<'g> {
    pub fn new(graph: &'g CsrGraph) -> Self { Self { graph, config: BmsspConfig::default() } }

    pub fn with_config(mut self, config: BmsspConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &BmsspConfig { &self.config }

    pub fn run(&self, source: u32) -> Result<Solution> {
        self.config.validate()?;
        self.graph.check_source(source)?;
        let n = self.graph.num_vertices();
        let params = self.config.resolve(n);
        let mut frame = Frames {
            graph: self.graph,
            params,
            state: PathState::new(n, source),
            stats: SolveStats::default(),
        };
        let (boundary, visited) = frame.recurse(params.top_level, Label::TOP, &[source], 0);
        log::trace!("top level returned boundary={} |U|={}", boundary.dist, visited.len());
        debug_assert_eq!(boundary, Label::TOP, "top frame stopped with work queued");
        debug_assert_eq!(violations(self.graph, &frame.state), 0, "an edge can still be relaxed");

        let Frames { state, mut stats, .. } = frame;
        stats.relaxations = state.relaxations;
        log::debug!(
            "bmssp: n={} m={} k={} levels={} frames={} pulls={} pivots={} relaxations={}",
            n,
            self.graph.num_edges(),
            params.k,
            params.top_level,
            stats.frames,
            stats.pulls,
            stats.pivots,
            stats.relaxations
        );
        let (dist, pred) = state.into_parts();
        Ok(Solution::new(source, dist, pred, stats))
    }
}

struct Frames<'g> {
    graph: &'g CsrGraph,
    params: Params,
    state: PathState,
    stats: SolveStats,
}

impl Frames<'_> {
    fn recurse(&mut self, level: u32, bound: Label, sources: &[u32], depth: u32) -> (Label, Vec<u32>) {
        let sources: Vec<u32> = sources.iter().copied().filter(|&s| self.state.label(s) < bound).collect();
        if sources.is_empty() {
            return (bound, Vec::new());
        }
        self.stats.max_depth = self.stats.max_depth.max(depth);
        if level == 0 {
            self.stats.base_cases += 1;
            return bounded_dijkstra(self.graph, &mut self.state, &sources, bound, self.params.k, &mut self.stats);
        }
        self.stats.frames += 1;

        let k = self.params.k;
        let w = self.expand(&sources, bound);
        self.stats.expanded += w.len() as u64;
        let pivots = select_pivots(&self.state, &sources, &w, k);
        self.stats.pivots += pivots.len() as u64;
        log::trace!(
            "level {level}: bound={} |S|={} |W|={} |P|={}",
            bound.dist,
            sources.len(),
            w.len(),
            pivots.len()
        );

        let m = self.params.bucket_capacity(level);
        let budget = self.params.vertex_budget(level);
        let mut frontier = FrontierStructure::new(m, bound, self.params.split_factor);
        for &p in &pivots {
            frontier.insert(p, self.state.label(p));
        }

        let mut visited: Vec<u32> = Vec::new();
        let mut in_u: HashSet<u32> = HashSet::new();
        let mut last_sub = bound;
        while !frontier.is_empty() && visited.len() < budget {
            let (b_i, s_i) = frontier.pull(m);
            self.stats.pulls += 1;
            let (sub, u_i) = self.recurse(level - 1, b_i, &s_i, depth + 1);
            last_sub = sub;

            let before = visited.len();
            for &u in &u_i {
                if in_u.insert(u) { visited.push(u); }
                // a better path may have settled it below a value still queued
                frontier.remove(u);
            }

            // [sub, b_i) goes back ahead of everything, [b_i, bound) into the buckets
            let mut prepend = Vec::new();
            for &u in &u_i {
                for (v, wt) in self.graph.successors(u) {
                    let cand = self.state.candidate(u, v, wt);
                    let r = self.state.offer(cand);
                    if r == Relaxation::Worse || (r == Relaxation::Tied && in_u.contains(&v)) { continue; }
                    if cand >= b_i && cand < bound {
                        frontier.insert(v, cand);
                    } else if cand >= sub && cand < b_i {
                        prepend.push((v, cand));
                    }
                }
            }
            for &x in &s_i {
                let lx = self.state.label(x);
                if lx >= sub && lx < b_i {
                    prepend.push((x, lx));
                }
            }
            frontier.batch_prepend(prepend);

            // the smallest source of a non-empty batch is always completed
            debug_assert!(visited.len() > before, "level {level}: batch completed nothing");
        }

        let boundary = if frontier.is_empty() { bound } else { last_sub.min(bound) };
        for &x in &w {
            if self.state.label(x) < boundary && in_u.insert(x) {
                visited.push(x);
            }
        }
        log::trace!("level {level}: returning boundary={} |U|={} queued={}", boundary.dist, visited.len(), frontier.len());
        (boundary, visited)
    }

    /// `k` rounds of bounded Bellman-Ford from `sources`; returns the ball `W`
    /// (sources included, no duplicates).
    fn expand(&mut self, sources: &[u32], bound: Label) -> Vec<u32> {
        let mut w: Vec<u32> = Vec::with_capacity(sources.len());
        let mut in_w: HashSet<u32> = HashSet::new();
        for &s in sources {
            if in_w.insert(s) { w.push(s); }
        }
        let mut layer = w.clone();
        for _ in 0..self.params.k {
            let mut next = Vec::new();
            let mut queued: HashSet<u32> = HashSet::new();
            for &u in &layer {
                for (v, wt) in self.graph.successors(u) {
                    let cand = self.state.candidate(u, v, wt);
                    if cand >= bound { continue; }
                    let r = self.state.offer(cand);
                    if !r.reached() { continue; }
                    let fresh = in_w.insert(v);
                    if fresh { w.push(v); }
                    if (fresh || r == Relaxation::Improved) && queued.insert(v) {
                        next.push(v);
                    }
                }
            }
            if next.is_empty() { break; }
            layer = next;
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dijkstra::dijkstra;
    use crate::generate;

    fn worked_example() -> CsrGraph {
        CsrGraph::from_edges(
            6,
            &[
                (0, 1, 7.0),
                (0, 2, 9.0),
                (0, 5, 14.0),
                (1, 2, 10.0),
                (1, 3, 15.0),
                (2, 3, 11.0),
                (2, 5, 2.0),
                (3, 4, 6.0),
                (4, 5, 9.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn worked_example_distances() {
        let g = worked_example();
        let sol = Bmssp::new(&g).run(0).unwrap();
        assert_eq!(sol.dist, vec![0.0, 7.0, 9.0, 20.0, 26.0, 11.0]);
        assert_eq!(sol.path_to(4), Some(vec![0, 2, 3, 4]));
        assert_eq!(sol.path_to(5), Some(vec![0, 2, 5]));
    }

    #[test]
    fn single_vertex_needs_no_relaxation() {
        let g = CsrGraph::from_edges(1, &[]).unwrap();
        let sol = Bmssp::new(&g).run(0).unwrap();
        assert_eq!(sol.dist, vec![0.0]);
        assert_eq!(sol.pred, vec![None]);
        assert_eq!(sol.stats.relaxations, 0);
    }

    #[test]
    fn recursion_is_exercised_on_larger_graphs() {
        let g = generate::random_integral(400, 3.0, 11, 9).unwrap();
        let cfg = BmsspConfig { k: Some(2), levels: Some(4), ..BmsspConfig::default() };
        let sol = Bmssp::new(&g).with_config(cfg).run(0).unwrap();
        assert!(sol.stats.frames > 1);
        assert!(sol.stats.base_cases > 0);
        assert!(sol.stats.pulls > 0);
        assert!(sol.stats.max_depth >= 1);
        assert_eq!(sol.dist, dijkstra(&g, 0).unwrap().dist);
        assert_eq!(sol.reachable_count(), dijkstra(&g, 0).unwrap().reachable_count());
    }

    #[test]
    fn integer_ties_with_the_smallest_k() {
        let g = generate::random_integral(60, 3.0, 27, 4).unwrap();
        let cfg = BmsspConfig { k: Some(2), levels: None, ..BmsspConfig::default() };
        let sol = Bmssp::new(&g).with_config(cfg).run(0).unwrap();
        let base = dijkstra(&g, 0).unwrap();
        for v in 0..60u32 {
            assert_eq!(sol.dist[v as usize], base.dist[v as usize], "vertex {v}");
        }
        assert!(sol.stats.base_cases > 0);
    }

    #[test]
    fn top_frame_reports_every_reachable_vertex() {
        let g = generate::random_integral(120, 2.5, 3, 3).unwrap();
        let params = BmsspConfig { k: Some(2), ..BmsspConfig::default() }.resolve(120);
        let mut f = Frames { graph: &g, params, state: PathState::new(120, 0), stats: SolveStats::default() };
        let (b, u) = f.recurse(params.top_level, Label::TOP, &[0], 0);
        assert_eq!(b, Label::TOP);
        let base = dijkstra(&g, 0).unwrap();
        let mut u = u;
        u.sort_unstable();
        let reachable: Vec<u32> = (0..120u32).filter(|&v| base.dist[v as usize].is_finite()).collect();
        assert_eq!(u, reachable);
        assert_eq!(violations(&g, &f.state), 0);
    }

    #[test]
    fn frame_result_respects_bound() {
        let g = generate::random_integral(200, 4.0, 5, 6).unwrap();
        let params = BmsspConfig::default().resolve(g.num_vertices());
        let mut f = Frames { graph: &g, params, state: PathState::new(200, 0), stats: SolveStats::default() };
        let (b, u) = f.recurse(2, Label::at(8.0), &[0], 0);
        assert!(b <= Label::at(8.0));
        assert!(!u.is_empty());
        let base = dijkstra(&g, 0).unwrap();
        let mut seen = HashSet::new();
        for v in &u {
            assert!(seen.insert(*v), "vertex {v} reported twice");
            assert!(f.state.label(*v) < b);
            assert_eq!(f.state.dist(*v), base.dist[*v as usize]);
        }
    }

    #[test]
    fn sources_beyond_bound_return_empty() {
        let g = worked_example();
        let params = BmsspConfig::default().resolve(6);
        let mut f = Frames { graph: &g, params, state: PathState::new(6, 0), stats: SolveStats::default() };
        assert_eq!(f.recurse(2, Label::at(5.0), &[3, 4], 0), (Label::at(5.0), vec![]));
        assert_eq!(f.stats.frames, 0);
    }
}
