//! Stable C ABI over raw CSR arrays.
//!
//! Return codes: `0` success, otherwise the negative code of the failure
//! (see [`SolveError::code`]); `-3` means a required pointer was null.

use core::slice;

use crate::bmssp::Bmssp;
use crate::config::BmsspConfig;
use crate::dijkstra::dijkstra;
use crate::error::{Result, SolveError};
use crate::graph::CsrGraph;
use crate::stats::Solution;

pub const NULL_POINTER: i32 = -3;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SsspResultInfo {
    pub relaxations: u64, // strict label improvements
    pub settled: u32,     // vertices with a finite distance
    pub error_code: i32,  // 0 == success
}

/// BMSSP solve. Tuning comes from `SSSP_BMSSP_*` environment variables.
///
/// # Safety
/// `offsets` must point to `n + 1` readable `u32`s; `targets` and `weights`
/// to `offsets[n]` elements each; `out_dist` and `out_pred` to `n` writable
/// elements. `info` may be null.
#[no_mangle]
pub unsafe extern "C" fn sssp_run_bmssp(
    n: u32,
    offsets: *const u32,
    targets: *const u32,
    weights: *const f32,
    source: u32,
    out_dist: *mut f32,
    out_pred: *mut i32,
    info: *mut SsspResultInfo,
) -> i32 {
    let raw = RawCsr { n, offsets, targets, weights };
    run(raw, source, out_dist, out_pred, info, |g, s| Bmssp::new(g).with_config(BmsspConfig::from_env()).run(s))
}

/// Reference binary-heap Dijkstra.
///
/// # Safety
/// Same contract as [`sssp_run_bmssp`].
#[no_mangle]
pub unsafe extern "C" fn sssp_run_baseline(
    n: u32,
    offsets: *const u32,
    targets: *const u32,
    weights: *const f32,
    source: u32,
    out_dist: *mut f32,
    out_pred: *mut i32,
    info: *mut SsspResultInfo,
) -> i32 {
    let raw = RawCsr { n, offsets, targets, weights };
    run(raw, source, out_dist, out_pred, info, dijkstra)
}

#[no_mangle]
pub extern "C" fn sssp_version() -> u32 { 6 } // bump whenever SsspResultInfo changes layout

struct RawCsr { n: u32, offsets: *const u32, targets: *const u32, weights: *const f32 }

unsafe fn run<F>(raw: RawCsr, source: u32, out_dist: *mut f32, out_pred: *mut i32, info: *mut SsspResultInfo, solver: F) -> i32
where
    F: FnOnce(&CsrGraph, u32) -> Result<Solution>,
{
    let filled = match solve_raw(raw, source, out_dist, out_pred, solver) {
        Ok(i) => i,
        Err(code) => SsspResultInfo { error_code: code, ..SsspResultInfo::default() },
    };
    if !info.is_null() { *info = filled; }
    filled.error_code
}

unsafe fn solve_raw<F>(raw: RawCsr, source: u32, out_dist: *mut f32, out_pred: *mut i32, solver: F) -> std::result::Result<SsspResultInfo, i32>
where
    F: FnOnce(&CsrGraph, u32) -> Result<Solution>,
{
    let n = raw.n as usize;
    if n == 0 { return Err(SolveError::EmptyGraph.code()); }
    if source >= raw.n { return Err(SolveError::SourceOutOfRange { vertex: source, n }.code()); }
    // predecessors go out as i32
    if n > i32::MAX as usize { return Err(SolveError::TooManyVertices(n).code()); }
    if raw.offsets.is_null() || raw.targets.is_null() || raw.weights.is_null() || out_dist.is_null() || out_pred.is_null() {
        return Err(NULL_POINTER);
    }
    let off = slice::from_raw_parts(raw.offsets, n + 1);
    let m = off[n] as usize;
    let graph = CsrGraph::from_csr(
        off.to_vec(),
        slice::from_raw_parts(raw.targets, m).to_vec(),
        slice::from_raw_parts(raw.weights, m).to_vec(),
    )
    .map_err(reject)?;
    let sol = solver(&graph, source).map_err(reject)?;

    slice::from_raw_parts_mut(out_dist, n).copy_from_slice(&sol.dist);
    for (slot, p) in slice::from_raw_parts_mut(out_pred, n).iter_mut().zip(&sol.pred) {
        *slot = p.map_or(-1, |u| u as i32);
    }
    Ok(SsspResultInfo {
        relaxations: sol.stats.relaxations,
        settled: sol.stats.settled,
        error_code: 0,
    })
}

fn reject(e: SolveError) -> i32 {
    log::debug!("rejected C ABI call: {e}");
    e.code()
}
