//! Binary min-heap keyed by an ordered label, with push/pop/size counters.
//!
//! Lazy deletion: callers push duplicates and skip stale pops.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct HeapItem<K> { pub key: K, pub vertex: u32 }

impl<K: Ord> HeapItem<K> {
    // Ties broken by vertex id so pop order is deterministic.
    #[inline]
    fn less(&self, o: &Self) -> bool {
        (&self.key, self.vertex) < (&o.key, o.vertex)
    }
}

#[derive(Debug)]
pub(crate) struct MinHeap<K> { data: Vec<HeapItem<K>>, pub pushes: u64, pub pops: u64, pub max_size: u64 }

impl<K: Ord> MinHeap<K> {
    #[inline] pub fn with_cap(c: usize) -> Self { Self { data: Vec::with_capacity(c), pushes: 0, pops: 0, max_size: 0 } }
    #[inline] pub fn is_empty(&self) -> bool { self.data.is_empty() }

    #[inline]
    pub fn push(&mut self, key: K, vertex: u32) {
        self.data.push(HeapItem { key, vertex });
        self.pushes += 1;
        if self.data.len() as u64 > self.max_size { self.max_size = self.data.len() as u64; }
        self.sift_up(self.data.len() - 1);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<HeapItem<K>> {
        let n = self.data.len();
        if n == 0 { return None; }
        self.data.swap(0, n - 1);
        let out = self.data.pop();
        self.pops += 1;
        if !self.data.is_empty() { self.sift_down(0); }
        out
    }

    #[inline]
    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let p = (i - 1) / 2;
            if self.data[i].less(&self.data[p]) { self.data.swap(i, p); i = p; } else { break; }
        }
    }

    #[inline]
    fn sift_down(&mut self, mut i: usize) {
        let n = self.data.len();
        loop {
            let l = i * 2 + 1;
            if l >= n { break; }
            let r = l + 1;
            let mut b = l;
            if r < n && self.data[r].less(&self.data[l]) { b = r; }
            if self.data[b].less(&self.data[i]) { self.data.swap(i, b); i = b; } else { break; }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_order_and_counts() {
        let mut h = MinHeap::with_cap(4);
        for (d, v) in [(3u32, 1), (1, 2), (2, 3), (1, 0)] { h.push(d, v); }
        let order: Vec<u32> = std::iter::from_fn(|| h.pop()).map(|i| i.vertex).collect();
        assert_eq!(order, vec![0, 2, 3, 1]);
        assert_eq!((h.pushes, h.pops, h.max_size), (4, 4, 4));
        assert!(h.pop().is_none());
        assert_eq!(h.pops, 4);
    }
}
