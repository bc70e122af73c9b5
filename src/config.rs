//! Tuning knobs for the recursive solver.
//!
//! Defaults derive everything from the vertex count. Overrides come from a
//! JSON object or from `SSSP_BMSSP_*` environment variables, the way the
//! C entry points pick them up.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolveError};

pub const ENV_K: &str = "SSSP_BMSSP_K";
pub const ENV_LEVELS: &str = "SSSP_BMSSP_LEVELS";
pub const ENV_SPLIT: &str = "SSSP_BMSSP_SPLIT";

/// Deepest accepted recursion level. `ceil(log2(u32::MAX))` is 32.
pub const MAX_LEVELS: u32 = 64;

fn default_split_factor() -> usize { 2 }

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BmsspConfig {
    /// Branching threshold; `None` means `max(2, floor(cbrt(n)))`.
    pub k: Option<usize>,
    /// Top recursion level; `None` means `ceil(log2(n))`. A level too shallow
    /// for the top frame's budget to exceed `n` is raised until it does.
    pub levels: Option<u32>,
    /// A bucket splits once it holds more than `split_factor * M` entries.
    #[serde(default = "default_split_factor")]
    pub split_factor: usize,
}

impl Default for BmsspConfig {
    fn default() -> Self { Self { k: None, levels: None, split_factor: default_split_factor() } }
}

/// Parameters resolved for one graph size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub k: usize,
    pub top_level: u32,
    pub split_factor: usize,
}

impl Params {
    /// Bucket capacity `M = 4^(l-1)` for level `l >= 1`.
    pub fn bucket_capacity(&self, level: u32) -> usize {
        pow4(level.saturating_sub(1))
    }

    /// Vertex budget `k * 4^l` for level `l`.
    pub fn vertex_budget(&self, level: u32) -> usize {
        self.k.saturating_mul(pow4(level))
    }
}

fn pow4(e: u32) -> usize {
    e.checked_mul(2).and_then(|s| 1usize.checked_shl(s)).unwrap_or(usize::MAX)
}

/// `max(2, floor(cbrt(n)))`, corrected for float rounding at perfect cubes.
pub fn default_k(n: usize) -> usize {
    let mut k = (n as f64).cbrt() as usize;
    while k.saturating_add(1).saturating_pow(3) <= n { k += 1; }
    while k > 0 && k.saturating_pow(3) > n { k -= 1; }
    k.max(2)
}

/// `ceil(log2(n))`; a single vertex needs no recursion.
pub fn default_levels(n: usize) -> u32 {
    if n <= 1 { 0 } else { usize::BITS - (n - 1).leading_zeros() }
}

/// Smallest level whose budget `k * 4^l` exceeds `n`, so the top frame can
/// only stop once its frontier is empty.
pub fn covering_level(n: usize, k: usize) -> u32 {
    let mut level = 0;
    while level < MAX_LEVELS && k.saturating_mul(pow4(level)) <= n {
        level += 1;
    }
    level
}

impl BmsspConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: BmsspConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads overrides from the environment. Unparsable values are ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(k) = env_knob::<usize>(ENV_K) { cfg.k = Some(k); }
        if let Some(l) = env_knob::<u32>(ENV_LEVELS) { cfg.levels = Some(l); }
        if let Some(s) = env_knob::<usize>(ENV_SPLIT) { cfg.split_factor = s; }
        cfg
    }

    pub fn validate(&self) -> Result<()> {
        if self.k.is_some_and(|k| k < 2) {
            return Err(SolveError::InvalidConfig("k must be at least 2".into()));
        }
        if self.levels.is_some_and(|l| l > MAX_LEVELS) {
            return Err(SolveError::InvalidConfig(format!("levels must be at most {MAX_LEVELS}")));
        }
        if self.split_factor == 0 {
            return Err(SolveError::InvalidConfig("split_factor must be at least 1".into()));
        }
        Ok(())
    }

    pub fn resolve(&self, n: usize) -> Params {
        let k = self.k.unwrap_or_else(|| default_k(n));
        let wanted = self.levels.unwrap_or_else(|| default_levels(n));
        let top_level = wanted.max(covering_level(n, k));
        if top_level > wanted {
            log::debug!("raising levels from {wanted} to {top_level} so the top frame covers n={n}");
        }
        Params { k, top_level, split_factor: self.split_factor }
    }
}

fn env_knob<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring {name}={raw:?}: not a valid number");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_k_matches_integer_cube_root() {
        assert_eq!(default_k(1), 2);
        assert_eq!(default_k(26), 2);
        assert_eq!(default_k(27), 3);
        assert_eq!(default_k(63), 3);
        assert_eq!(default_k(64), 4);
        assert_eq!(default_k(1_000_000), 100);
    }

    #[test]
    fn derived_levels_is_ceil_log2() {
        assert_eq!(default_levels(1), 0);
        assert_eq!(default_levels(2), 1);
        assert_eq!(default_levels(3), 2);
        assert_eq!(default_levels(8), 3);
        assert_eq!(default_levels(9), 4);
    }

    #[test]
    fn budgets_saturate() {
        let p = BmsspConfig::default().resolve(1000);
        assert_eq!(p.bucket_capacity(1), 1);
        assert_eq!(p.bucket_capacity(3), 16);
        assert_eq!(p.vertex_budget(2), 10 * 16);
        assert_eq!(p.vertex_budget(200), usize::MAX);
    }

    #[test]
    fn json_overrides_and_rejects_unknown() {
        let cfg = BmsspConfig::from_json(r#"{"k": 3, "levels": 2}"#).unwrap();
        assert_eq!(cfg.resolve(40), Params { k: 3, top_level: 2, split_factor: 2 });
        assert!(matches!(BmsspConfig::from_json(r#"{"delta": 1}"#), Err(SolveError::ConfigParse(_))));
        assert!(matches!(BmsspConfig::from_json(r#"{"k": 0}"#), Err(SolveError::InvalidConfig(_))));
    }

    #[test]
    fn k_below_two_is_rejected() {
        for k in [0, 1] {
            let err = BmsspConfig { k: Some(k), ..BmsspConfig::default() }.validate().unwrap_err();
            assert_eq!(err.code(), -9);
        }
        assert!(BmsspConfig { k: Some(2), ..BmsspConfig::default() }.validate().is_ok());
    }

    #[test]
    fn levels_are_capped() {
        let deep = BmsspConfig { levels: Some(2_000_000), ..BmsspConfig::default() };
        assert!(matches!(deep.validate(), Err(SolveError::InvalidConfig(_))));
        assert_eq!(deep.validate().unwrap_err().code(), -9);
        let edge = BmsspConfig { levels: Some(MAX_LEVELS), ..BmsspConfig::default() };
        assert!(edge.validate().is_ok());
        assert!(BmsspConfig::from_json(r#"{"levels": 65}"#).is_err());
    }

    #[test]
    fn shallow_levels_are_raised_to_cover_the_graph() {
        assert_eq!(covering_level(1, 2), 0);
        assert_eq!(covering_level(2, 2), 1);
        assert_eq!(covering_level(8, 2), 2);
        assert_eq!(covering_level(60, 2), 3);
        assert_eq!(covering_level(usize::MAX, 2), MAX_LEVELS);
        let cfg = BmsspConfig { k: Some(2), levels: Some(0), ..BmsspConfig::default() };
        let p = cfg.resolve(60);
        assert_eq!(p.top_level, 3);
        assert!(p.vertex_budget(p.top_level) > 60);
        // the default is always deep enough
        for n in [1usize, 2, 7, 60, 1000, 1 << 20] {
            let p = BmsspConfig::default().resolve(n);
            assert_eq!(p.top_level, default_levels(n));
        }
    }
}
