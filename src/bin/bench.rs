/// Benchmark the GR4J hot loop: 1000 runs of 3650 days (10 years), the
/// shape of a calibration batch where each proposal re-runs the model.
use gr4j::engine::Gr4j;
use std::time::Instant;

fn main() {
    // 10 years of daily data with deterministic "random" forcing
    let n = 3650;
    let precip: Vec<f64> = (0..n)
        .map(|i| {
            let s = (i as f64 * 7.13).sin();
            if s > 0.3 { (s - 0.3) * 28.0 } else { 0.0 }
        })
        .collect();
    let pet: Vec<f64> = (0..n)
        .map(|i| 2.5 + (i as f64 * std::f64::consts::TAU / 365.25).sin() * 1.8)
        .collect();

    let x = [350.0, -0.5, 90.0, 1.7, 0.5];

    // Warmup
    let mut engine = Gr4j::new(&x);
    let _ = engine.run(&precip, &pet);

    // Benchmark: fresh engine per iteration, as a calibration loop would
    let n_iters = 1000;
    let start = Instant::now();
    for _ in 0..n_iters {
        let mut engine = Gr4j::new(&x);
        let flow = engine.run(&precip, &pet);
        assert!(flow[n - 1].is_finite());
    }
    let elapsed = start.elapsed();

    let total_timesteps = n * n_iters;
    let secs = elapsed.as_secs_f64();
    println!(
        "GR4J:          {} runs x {} days = {} timesteps",
        n_iters, n, total_timesteps
    );
    println!("  Total time:  {:.3}s", secs);
    println!("  Per run:     {:.3}ms", secs / n_iters as f64 * 1000.0);
    println!(
        "  Throughput:  {:.0} timesteps/sec",
        total_timesteps as f64 / secs
    );
}
