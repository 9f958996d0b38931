use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use tessera::demo;
use tessera::{TesseraConfig, WorldRenderer};

/// Meshes a synthetic flat world headlessly and prints per-pass statistics.
#[derive(Parser, Debug)]
#[command(name = "tessera", version)]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the worker count
    #[arg(long)]
    workers: Option<usize>,
    /// Enable the greedy up-face merge
    #[arg(long)]
    greedy: bool,
    /// Columns per side of the square world
    #[arg(long, default_value_t = 4)]
    columns: i32,
    #[arg(long, default_value_t = 30_000)]
    timeout_ms: u64,
}

fn run(args: Args) -> tessera::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => TesseraConfig::from_path(path)?,
        None => TesseraConfig::default(),
    };
    if let Some(w) = args.workers {
        cfg.workers = w;
    }
    cfg.greedy_merge |= args.greedy;
    log::info!(
        target: "runtime",
        "workers={} tick_ms={} greedy={} ao={}",
        cfg.workers,
        cfg.tick_ms,
        cfg.greedy_merge,
        cfg.ambient_occlusion
    );

    let mut renderer = WorldRenderer::new(&cfg)?;
    demo::load_tables(&mut renderer)?;

    let t0 = Instant::now();
    let n = args.columns.max(1);
    for cx in 0..n {
        for cz in 0..n {
            renderer.add_column(cx * 16, cz * 16, demo::terrain_column(cx, cz))?;
        }
    }
    renderer.wait_for_chunks_to_render(Duration::from_millis(args.timeout_ms))?;
    let elapsed = t0.elapsed();

    let s = renderer.stats();
    log::info!(target: "perf", "ms={:.3} demo_world columns={}", elapsed.as_secs_f64() * 1000.0, n * n);
    println!("columns:               {}", n * n);
    println!("sections with geometry: {}", s.sections);
    println!("vertices:              {}", s.vertices);
    println!("opaque triangles:      {}", s.opaque_triangles);
    println!("transparent triangles: {}", s.transparent_triangles);
    println!("geometry events:       {}", s.geometry_events);
    println!("finished events:       {}", s.finished_events);
    println!("diagnostics:           {}", s.diagnostics);
    println!("elapsed:               {:.1} ms", elapsed.as_secs_f64() * 1000.0);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
