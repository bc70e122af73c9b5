//! Immutable CSR adjacency.
//!
//! `offsets` has `n + 1` entries and the out-edges of `u` live in
//! `targets[offsets[u]..offsets[u + 1]]` with matching `weights`. This is the
//! layout the C entry points receive, so both sides validate the same way.

use std::collections::HashMap;

use crate::error::{Result, SolveError};

/// Adjacency map: vertex -> {neighbor -> weight}.
pub type AdjacencyMap = HashMap<u32, HashMap<u32, f32>>;

#[derive(Debug, Clone, PartialEq)]
pub struct CsrGraph {
    offsets: Vec<u32>,
    targets: Vec<u32>,
    weights: Vec<f32>,
}

impl CsrGraph {
    /// Wraps raw CSR arrays after checking their shape and every weight.
    pub fn from_csr(offsets: Vec<u32>, targets: Vec<u32>, weights: Vec<f32>) -> Result<Self> {
        validate_csr(&offsets, &targets, &weights)?;
        Ok(Self { offsets, targets, weights })
    }

    /// Builds from an edge list. Edge order is kept per source vertex.
    pub fn from_edges(n: usize, edges: &[(u32, u32, f32)]) -> Result<Self> {
        check_vertex_count(n)?;
        let mut degree = vec![0u32; n + 1];
        for &(u, v, w) in edges {
            check_edge(u, v, w, n)?;
            degree[u as usize + 1] += 1;
        }
        for i in 1..=n { degree[i] += degree[i - 1]; }
        let offsets = degree;
        let mut cursor: Vec<u32> = offsets[..n].to_vec();
        let mut targets = vec![0u32; edges.len()];
        let mut weights = vec![0f32; edges.len()];
        for &(u, v, w) in edges {
            let slot = cursor[u as usize] as usize;
            targets[slot] = v;
            weights[slot] = w;
            cursor[u as usize] += 1;
        }
        Ok(Self { offsets, targets, weights })
    }

    /// Builds from an adjacency map. Neighbors are laid out in ascending id
    /// order so results do not depend on hash iteration order.
    pub fn from_adjacency(n: usize, adj: &AdjacencyMap) -> Result<Self> {
        check_vertex_count(n)?;
        let mut edges = Vec::with_capacity(adj.values().map(HashMap::len).sum());
        for (&u, nbrs) in adj {
            if u as usize >= n {
                return Err(SolveError::UnknownVertex { vertex: u, n });
            }
            for (&v, &w) in nbrs {
                edges.push((u, v, w));
            }
        }
        edges.sort_by_key(|&(u, v, _)| (u, v));
        Self::from_edges(n, &edges)
    }

    #[inline]
    pub fn num_vertices(&self) -> usize { self.offsets.len() - 1 }

    #[inline]
    pub fn num_edges(&self) -> usize { self.targets.len() }

    #[inline]
    pub fn out_degree(&self, u: u32) -> usize {
        (self.offsets[u as usize + 1] - self.offsets[u as usize]) as usize
    }

    /// Out-edges of `u` as `(target, weight)`.
    #[inline]
    pub fn successors(&self, u: u32) -> impl Iterator<Item = (u32, f32)> + '_ {
        let s = self.offsets[u as usize] as usize;
        let e = self.offsets[u as usize + 1] as usize;
        self.targets[s..e].iter().copied().zip(self.weights[s..e].iter().copied())
    }

    pub fn offsets(&self) -> &[u32] { &self.offsets }
    pub fn targets(&self) -> &[u32] { &self.targets }
    pub fn weights(&self) -> &[f32] { &self.weights }

    pub fn check_source(&self, source: u32) -> Result<()> {
        if (source as usize) < self.num_vertices() {
            Ok(())
        } else {
            Err(SolveError::SourceOutOfRange { vertex: source, n: self.num_vertices() })
        }
    }
}

fn check_vertex_count(n: usize) -> Result<()> {
    if n == 0 { return Err(SolveError::EmptyGraph); }
    if n > u32::MAX as usize { return Err(SolveError::TooManyVertices(n)); }
    Ok(())
}

fn check_edge(u: u32, v: u32, w: f32, n: usize) -> Result<()> {
    if u as usize >= n || v as usize >= n {
        return Err(SolveError::VertexOutOfRange { from: u, to: v, n });
    }
    if !w.is_finite() { return Err(SolveError::NonFiniteWeight { from: u, to: v }); }
    if w < 0.0 { return Err(SolveError::NegativeWeight { from: u, to: v, weight: w }); }
    Ok(())
}

/// Shared by [`CsrGraph::from_csr`] and the C entry points.
pub(crate) fn validate_csr(offsets: &[u32], targets: &[u32], weights: &[f32]) -> Result<()> {
    if offsets.len() < 2 { return Err(SolveError::EmptyGraph); }
    let n = offsets.len() - 1;
    check_vertex_count(n)?;
    if offsets[0] != 0 {
        return Err(SolveError::MalformedOffsets(format!("offsets[0] = {}, expected 0", offsets[0])));
    }
    if let Some(i) = offsets.windows(2).position(|w| w[0] > w[1]) {
        return Err(SolveError::MalformedOffsets(format!("offsets decrease at index {}", i + 1)));
    }
    let m = offsets[n] as usize;
    if targets.len() != m || weights.len() != m {
        return Err(SolveError::MalformedOffsets(format!(
            "offsets[n] = {m} but {} targets and {} weights were given",
            targets.len(),
            weights.len()
        )));
    }
    for u in 0..n {
        for e in offsets[u] as usize..offsets[u + 1] as usize {
            check_edge(u as u32, targets[e], weights[e], n)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_list_groups_by_source() {
        let g = CsrGraph::from_edges(3, &[(2, 0, 1.0), (0, 1, 2.0), (0, 2, 3.0)]).unwrap();
        assert_eq!(g.offsets(), &[0, 2, 2, 3]);
        assert_eq!(g.successors(0).collect::<Vec<_>>(), vec![(1, 2.0), (2, 3.0)]);
        assert_eq!(g.out_degree(1), 0);
        assert_eq!(g.successors(2).collect::<Vec<_>>(), vec![(0, 1.0)]);
    }

    #[test]
    fn adjacency_is_sorted() {
        let mut adj = AdjacencyMap::new();
        adj.entry(0).or_default().insert(3, 1.0);
        adj.entry(0).or_default().insert(1, 4.0);
        adj.entry(1).or_default().insert(2, 0.5);
        let g = CsrGraph::from_adjacency(4, &adj).unwrap();
        assert_eq!(g.num_edges(), 3);
        assert_eq!(g.targets(), &[1, 3, 2]);
    }

    #[test]
    fn adjacency_keys_must_be_vertices() {
        let mut adj = AdjacencyMap::new();
        adj.entry(0).or_default().insert(1, 1.0);
        adj.entry(7).or_default();
        assert!(matches!(CsrGraph::from_adjacency(3, &adj), Err(SolveError::UnknownVertex { vertex: 7, n: 3 })));
        adj.remove(&7);
        adj.entry(2).or_default();
        assert_eq!(CsrGraph::from_adjacency(3, &adj).unwrap().num_edges(), 1);
    }

    #[test]
    fn rejects_bad_edges() {
        assert!(matches!(CsrGraph::from_edges(0, &[]), Err(SolveError::EmptyGraph)));
        assert!(matches!(
            CsrGraph::from_edges(2, &[(0, 5, 1.0)]),
            Err(SolveError::VertexOutOfRange { from: 0, to: 5, n: 2 })
        ));
        assert!(matches!(CsrGraph::from_edges(2, &[(0, 1, -0.5)]), Err(SolveError::NegativeWeight { .. })));
        assert!(matches!(CsrGraph::from_edges(2, &[(0, 1, f32::NAN)]), Err(SolveError::NonFiniteWeight { .. })));
    }

    #[test]
    fn rejects_malformed_csr() {
        assert!(matches!(CsrGraph::from_csr(vec![1, 1], vec![], vec![]), Err(SolveError::MalformedOffsets(_))));
        assert!(matches!(CsrGraph::from_csr(vec![0, 2, 1], vec![1, 0], vec![1.0, 1.0]), Err(SolveError::MalformedOffsets(_))));
        assert!(matches!(CsrGraph::from_csr(vec![0, 1], vec![0, 0], vec![1.0]), Err(SolveError::MalformedOffsets(_))));
        let g = CsrGraph::from_csr(vec![0, 1, 1], vec![1], vec![0.0]).unwrap();
        assert!(g.check_source(1).is_ok());
        assert!(matches!(g.check_source(2), Err(SolveError::SourceOutOfRange { vertex: 2, n: 2 })));
    }
}
