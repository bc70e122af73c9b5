//! Per-solve counters and the solved result.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolveError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveStats {
    /// Strict label improvements.
    pub relaxations: u64,
    /// Recursive driver frames entered (levels >= 1).
    pub frames: u64,
    pub max_depth: u32,
    pub base_cases: u64,
    pub pulls: u64,
    pub pivots: u64,
    /// Sum of |W| over all frames.
    pub expanded: u64,
    pub heap_pushes: u64,
    pub heap_pops: u64,
    pub heap_max: u64,
    /// Vertices with a finite final distance.
    pub settled: u32,
}

impl SolveStats {
    pub(crate) fn absorb_heap<K: Ord>(&mut self, heap: &crate::heap::MinHeap<K>) {
        self.heap_pushes += heap.pushes;
        self.heap_pops += heap.pops;
        self.heap_max = self.heap_max.max(heap.max_size);
    }
}

/// Distances and predecessors from one source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub source: u32,
    pub dist: Vec<f32>,
    pub pred: Vec<Option<u32>>,
    pub stats: SolveStats,
}

impl Solution {
    pub(crate) fn new(source: u32, dist: Vec<f32>, pred: Vec<Option<u32>>, mut stats: SolveStats) -> Self {
        stats.settled = dist.iter().filter(|d| d.is_finite()).count() as u32;
        Self { source, dist, pred, stats }
    }

    pub fn distance(&self, v: u32) -> Option<f32> {
        self.dist.get(v as usize).copied().filter(|d| d.is_finite())
    }

    pub fn predecessor(&self, v: u32) -> Option<u32> {
        self.pred.get(v as usize).copied().flatten()
    }

    pub fn reachable_count(&self) -> usize { self.stats.settled as usize }

    /// Vertex sequence from the source to `target`, or `None` if unreachable.
    pub fn path_to(&self, target: u32) -> Option<Vec<u32>> {
        self.distance(target)?;
        let mut path = vec![target];
        let mut cur = target;
        while cur != self.source {
            cur = self.predecessor(cur)?;
            path.push(cur);
            // a well-formed forest never revisits; bail rather than spin
            if path.len() > self.dist.len() { return None; }
        }
        path.reverse();
        Some(path)
    }

    /// Predecessors in the C ABI encoding: `-1` for none. Fails when a vertex
    /// id would not fit in an `i32`.
    pub fn pred_as_i32(&self) -> Result<Vec<i32>> {
        if self.pred.len() > i32::MAX as usize {
            return Err(SolveError::TooManyVertices(self.pred.len()));
        }
        Ok(self.pred.iter().map(|p| p.map_or(-1, |u| u as i32)).collect())
    }
}
