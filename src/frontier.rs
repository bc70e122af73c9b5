//! Semi-sorted frontier container used by each driver frame.
//!
//! Two regions: a deque of prepend blocks (each sorted, pushed at the front)
//! and a run of buckets ordered by upper bound. Entries inside a bucket are
//! kept sorted; a bucket that outgrows `split_factor * M` is cut at its median.
//!
//! Keys are any total order; the driver uses path labels, the tests plain
//! integers. At most one entry per vertex is *live*. Superseded entries stay in place
//! and are recognised by their stamp, then discarded when they are touched.

use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone, Copy)]
struct Entry<K> { vertex: u32, value: K, stamp: u64 }

impl<K: Ord> Entry<K> {
    #[inline]
    fn order(&self, o: &Self) -> Ordering {
        self.value.cmp(&o.value).then(self.vertex.cmp(&o.vertex))
    }
}

#[derive(Debug)]
struct Bucket<K> { upper: K, entries: Vec<Entry<K>> }

#[derive(Debug)]
pub(crate) struct FrontierStructure<K> {
    blocks: VecDeque<Vec<Entry<K>>>,
    buckets: Vec<Bucket<K>>,
    live: HashMap<u32, (K, u64)>,
    next_stamp: u64,
    bound: K,
    split_at: usize,
}

impl<K: Ord + Copy> FrontierStructure<K> {
    pub fn new(m: usize, bound: K, split_factor: usize) -> Self {
        Self {
            blocks: VecDeque::new(),
            buckets: vec![Bucket { upper: bound, entries: Vec::new() }],
            live: HashMap::new(),
            next_stamp: 0,
            bound,
            split_at: split_factor.saturating_mul(m).max(1),
        }
    }

    #[inline] pub fn len(&self) -> usize { self.live.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.live.is_empty() }

    #[inline]
    fn is_live(live: &HashMap<u32, (K, u64)>, e: &Entry<K>) -> bool {
        live.get(&e.vertex).is_some_and(|&(_, s)| s == e.stamp)
    }

    /// Records `value` for `vertex` unless it already holds something no larger.
    fn claim(&mut self, vertex: u32, value: K) -> Option<Entry<K>> {
        if let Some(&(cur, _)) = self.live.get(&vertex) {
            if cur <= value { return None; }
        }
        self.next_stamp += 1;
        self.live.insert(vertex, (value, self.next_stamp));
        Some(Entry { vertex, value, stamp: self.next_stamp })
    }

    pub fn insert(&mut self, vertex: u32, value: K) {
        let Some(entry) = self.claim(vertex, value) else { return };
        let last = self.buckets.len() - 1;
        let idx = self.buckets.partition_point(|b| b.upper < value).min(last);
        let bucket = &mut self.buckets[idx];
        let pos = bucket.entries.partition_point(|e| e.order(&entry) == Ordering::Less);
        bucket.entries.insert(pos, entry);
        if bucket.entries.len() > self.split_at { self.split(idx); }
    }

    fn split(&mut self, idx: usize) {
        let live = &self.live;
        let bucket = &mut self.buckets[idx];
        bucket.entries.retain(|e| Self::is_live(live, e));
        if bucket.entries.len() <= self.split_at { return; }
        let right = bucket.entries.split_off(bucket.entries.len() / 2);
        let old_upper = bucket.upper;
        // left is non-empty: split_at >= 1 so the bucket held at least two entries
        let left_upper = bucket.entries[bucket.entries.len() - 1].value;
        bucket.upper = left_upper;
        // the last bucket may hold values above its bound; keep uppers sorted
        let right_upper = old_upper.max(left_upper);
        self.buckets.insert(idx + 1, Bucket { upper: right_upper, entries: right });
    }

    /// Forgets `vertex`; its entries become stale in place.
    pub fn remove(&mut self, vertex: u32) {
        self.live.remove(&vertex);
    }

    /// Adds a batch ahead of everything bucketed. Keeps the minimum per vertex.
    pub fn batch_prepend<I: IntoIterator<Item = (u32, K)>>(&mut self, items: I) {
        let mut best: HashMap<u32, K> = HashMap::new();
        for (v, val) in items {
            best.entry(v).and_modify(|b| if val < *b { *b = val }).or_insert(val);
        }
        let mut block: Vec<Entry<K>> = best.into_iter().filter_map(|(v, val)| self.claim(v, val)).collect();
        if block.is_empty() { return; }
        block.sort_unstable_by(Entry::order);
        self.blocks.push_front(block);
    }

    fn drain_bucket(&mut self, idx: usize, into: &mut Vec<Entry<K>>) {
        let live = &self.live;
        into.extend(self.buckets[idx].entries.drain(..).filter(|e| Self::is_live(live, e)));
    }

    fn first_live(&self, idx: usize) -> Option<K> {
        self.buckets[idx].entries.iter().find(|e| Self::is_live(&self.live, e)).map(|e| e.value)
    }

    /// Removes and returns (at least) the `max_size` smallest vertices.
    ///
    /// Entries tied with the `max_size`-th smallest value all come out
    /// together, so the result can be larger than `max_size`. `boundary` is
    /// the smallest value still held, or the structure's bound once it is
    /// empty; every returned value is strictly below a non-bound boundary.
    pub fn pull(&mut self, max_size: usize) -> (K, Vec<u32>) {
        let max_size = max_size.max(1);
        let mut cand: Vec<Entry<K>> = Vec::new();
        while let Some(block) = self.blocks.pop_front() {
            cand.extend(block.into_iter().filter(|e| Self::is_live(&self.live, e)));
        }
        let mut next = 0;
        while cand.len() < max_size && next < self.buckets.len() {
            self.drain_bucket(next, &mut cand);
            next += 1;
        }
        cand.sort_unstable_by(Entry::order);

        let mut leftover = Vec::new();
        if cand.len() >= max_size {
            let cut = cand[max_size - 1].value;
            while next < self.buckets.len() {
                match self.first_live(next) {
                    Some(v) if v > cut => break,
                    _ => { self.drain_bucket(next, &mut cand); next += 1; }
                }
            }
            cand.sort_unstable_by(Entry::order);
            let keep = cand.partition_point(|e| e.value <= cut);
            leftover = cand.split_off(keep);
        }

        self.buckets.drain(..next);
        if self.buckets.is_empty() {
            self.buckets.push(Bucket { upper: self.bound, entries: Vec::new() });
        }
        for e in &cand { self.live.remove(&e.vertex); }

        let mut boundary = leftover.first().map(|e| e.value);
        if let Some(v) = (0..self.buckets.len()).find_map(|i| self.first_live(i)) {
            boundary = Some(boundary.map_or(v, |b: K| b.min(v)));
        }
        if !leftover.is_empty() { self.blocks.push_front(leftover); }
        debug_assert_eq!(boundary.is_none(), self.live.is_empty());
        (boundary.unwrap_or(self.bound), cand.into_iter().map(|e| e.vertex).collect())
    }
}
