use std::fs::File;
use std::io::Write;
use std::time::Instant;

use bmssp_core::generate::random_sparse;
use bmssp_core::{dijkstra, Bmssp, BmsspConfig};

fn run_one(n: u32, avg_degree: f32, seed: u64, cfg: &BmsspConfig) -> serde_json::Value {
    let graph = random_sparse(n, avg_degree, seed, 1.0..5.0).expect("generated graph is valid");
    let t0 = Instant::now();
    let base = dijkstra(&graph, 0).expect("baseline run");
    let dt_base = t0.elapsed().as_secs_f64() * 1000.0;
    let t1 = Instant::now();
    let sol = Bmssp::new(&graph).with_config(cfg.clone()).run(0).expect("bmssp run");
    let dt_bmssp = t1.elapsed().as_secs_f64() * 1000.0;
    for (i, (&db, &dr)) in base.dist.iter().zip(&sol.dist).enumerate() {
        if db.is_infinite() && dr.is_infinite() { continue; }
        assert!((db - dr).abs() < 1e-3 * db.max(1.0), "bmssp parity fail at {i}: {db} vs {dr}");
    }
    serde_json::json!({
        "n": n, "m": graph.num_edges(), "avg_degree": avg_degree,
        "baseline_ms": dt_base, "bmssp_ms": dt_bmssp,
        "bmssp_speedup": dt_base / dt_bmssp.max(1e-9),
        "relaxations_baseline": base.stats.relaxations,
        "relaxations_bmssp": sol.stats.relaxations,
        "bmssp": sol.stats,
    })
}

fn main() {
    env_logger::Builder::from_default_env().target(env_logger::Target::Stderr).init();
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help") { eprintln!("Usage: bench_sweep --sizes 10000,20000 --degrees 2,4,8 --seed 42 --out benchmarks/native_sample.json [--config cfg.json]"); return; }
    let arg = |name: &str| args.iter().position(|a| a == name).and_then(|i| args.get(i + 1)).cloned();
    let sizes: Vec<u32> = arg("--sizes").unwrap_or("10000,20000".into()).split(',').filter_map(|s| s.parse().ok()).collect();
    let degrees: Vec<f32> = arg("--degrees").unwrap_or("4".into()).split(',').filter_map(|s| s.parse().ok()).collect();
    let seed: u64 = arg("--seed").and_then(|v| v.parse().ok()).unwrap_or(42);
    let out_path = arg("--out").unwrap_or("benchmarks/native_sample.json".into());
    let cfg = match arg("--config") {
        Some(path) => {
            let text = std::fs::read_to_string(&path).expect("read config");
            BmsspConfig::from_json(&text).unwrap_or_else(|e| { eprintln!("{path}: {e}"); std::process::exit(2) })
        }
        None => BmsspConfig::from_env(),
    };
    let mut results = Vec::new();
    for &n in &sizes { for &deg in &degrees { results.push(run_one(n, deg, seed, &cfg)); } }
    let json = serde_json::json!({ "config": cfg, "runs": results });
    if let Some(dir) = std::path::Path::new(&out_path).parent() { std::fs::create_dir_all(dir).ok(); }
    let mut f = File::create(&out_path).expect("create out");
    f.write_all(serde_json::to_string_pretty(&json).expect("serialize report").as_bytes()).expect("write report");
    eprintln!("wrote {}", out_path);
}
