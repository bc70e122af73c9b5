//! Shared `dist`/`hops`/`pred` arena threaded through every recursion level.
//!
//! Vertices are compared by [`Label`], which orders path candidates by
//! length, then hop count, then vertex, then predecessor. The order is total,
//! so no two vertices ever share a key and every vertex has exactly one best
//! path. Labels only ever move down: [`PathState::offer`] is the single writer
//! and it writes only on a strict improvement.

use std::cmp::Ordering;

const NO_PRED: u32 = u32::MAX;

/// Lexicographic path key `(dist, hops, vertex, via)`.
///
/// Extending a path by one edge strictly raises `(dist, hops)`, so the
/// predecessor forest stays acyclic even across zero-weight cycles.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Label {
    pub dist: f32,
    pub hops: u32,
    pub vertex: u32,
    pub via: u32,
}

impl Label {
    /// Sits above every label a vertex can carry.
    pub const TOP: Label = Label { dist: f32::INFINITY, hops: u32::MAX, vertex: u32::MAX, via: u32::MAX };

    /// A bound that only compares on distance: every label with `dist < d`
    /// lies below it and every label with `dist >= d` at or above it.
    pub fn at(d: f32) -> Label { Label { dist: d, hops: 0, vertex: 0, via: 0 } }
}

impl Ord for Label {
    fn cmp(&self, o: &Self) -> Ordering {
        self.dist
            .total_cmp(&o.dist)
            .then(self.hops.cmp(&o.hops))
            .then(self.vertex.cmp(&o.vertex))
            .then(self.via.cmp(&o.via))
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, o: &Self) -> Option<Ordering> { Some(self.cmp(o)) }
}

impl PartialEq for Label {
    fn eq(&self, o: &Self) -> bool { self.cmp(o) == Ordering::Equal }
}

impl Eq for Label {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Relaxation {
    /// Label strictly decreased; `pred` was rewritten.
    Improved,
    /// Candidate equals the recorded label, i.e. the same path; nothing written.
    Tied,
    Worse,
}

impl Relaxation {
    #[inline]
    pub fn reached(self) -> bool { self != Relaxation::Worse }
}

#[derive(Debug, Clone)]
pub(crate) struct PathState {
    dist: Vec<f32>,
    hops: Vec<u32>,
    pred: Vec<Option<u32>>,
    pub relaxations: u64,
}

impl PathState {
    pub fn new(n: usize, source: u32) -> Self {
        let mut dist = vec![f32::INFINITY; n];
        dist[source as usize] = 0.0;
        Self { dist, hops: vec![0; n], pred: vec![None; n], relaxations: 0 }
    }

    #[inline] pub fn dist(&self, v: u32) -> f32 { self.dist[v as usize] }
    #[inline] pub fn pred(&self, v: u32) -> Option<u32> { self.pred[v as usize] }
    #[inline] pub fn len(&self) -> usize { self.dist.len() }

    #[inline]
    pub fn label(&self, v: u32) -> Label {
        let i = v as usize;
        Label { dist: self.dist[i], hops: self.hops[i], vertex: v, via: self.pred[i].unwrap_or(NO_PRED) }
    }

    /// Label `v` would get through the edge `u -> v` of weight `w`.
    #[inline]
    pub fn candidate(&self, u: u32, v: u32, w: f32) -> Label {
        let i = u as usize;
        Label { dist: self.dist[i] + w, hops: self.hops[i].saturating_add(1), vertex: v, via: u }
    }

    /// Offers a candidate built by [`PathState::candidate`] for its vertex.
    #[inline]
    pub fn offer(&mut self, cand: Label) -> Relaxation {
        match cand.cmp(&self.label(cand.vertex)) {
            Ordering::Less => {
                let i = cand.vertex as usize;
                self.dist[i] = cand.dist;
                self.hops[i] = cand.hops;
                self.pred[i] = Some(cand.via);
                self.relaxations += 1;
                Relaxation::Improved
            }
            Ordering::Equal => Relaxation::Tied,
            Ordering::Greater => Relaxation::Worse,
        }
    }

    #[inline]
    pub fn relax(&mut self, u: u32, v: u32, w: f32) -> Relaxation {
        let cand = self.candidate(u, v, w);
        self.offer(cand)
    }

    pub fn into_parts(self) -> (Vec<f32>, Vec<Option<u32>>) { (self.dist, self.pred) }
}
