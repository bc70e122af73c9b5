use bmssp_core::generate::random_sparse;
use bmssp_core::*;

fn main() {
    env_logger::Builder::from_default_env().target(env_logger::Target::Stderr).init();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 5 { eprintln!("usage: run_one <n> <density> <seed> <mode: baseline|bmssp>"); std::process::exit(1); }
    let n: u32 = args[1].parse().expect("n");
    let density: f32 = args[2].parse().expect("density");
    let seed: u64 = args[3].parse().expect("seed");
    let mode = args[4].as_str();
    let graph = match random_sparse(n, density, seed, 1.0..4.0) {
        Ok(g) => g,
        Err(e) => { eprintln!("error: {e}"); std::process::exit(2); }
    };
    let t0 = std::time::Instant::now();
    let result = match mode {
        "baseline" => dijkstra(&graph, 0),
        "bmssp" => Bmssp::new(&graph).with_config(BmsspConfig::from_env()).run(0),
        _ => { eprintln!("bad mode"); return; }
    };
    let ms = t0.elapsed().as_secs_f64() * 1000.0;
    let sol = match result {
        Ok(s) => s,
        Err(e) => { eprintln!("error {}: {e}", e.code()); return; }
    };
    let st = &sol.stats;
    print!("mode={mode} n={n} m={} ms={ms:.3} relax={} settled={}", graph.num_edges(), st.relaxations, st.settled);
    if mode == "bmssp" {
        print!(
            " frames={} max_depth={} base_cases={} pulls={} pivots={} expanded={}",
            st.frames, st.max_depth, st.base_cases, st.pulls, st.pivots, st.expanded
        );
    }
    println!();
}
