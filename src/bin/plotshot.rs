use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "plotshot", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Wait for the frame backend and print its session configuration.
    Probe(ProbeArgs),
    /// Run a full export against a live backend using the headless widget.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    /// Base URL of the frame backend.
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    url: String,

    /// Backend poll interval in milliseconds.
    #[arg(long, default_value_t = 1000)]
    poll_ms: u64,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Base URL of the frame backend.
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    url: String,

    /// Output directory for captured frames.
    #[arg(long)]
    out: PathBuf,

    /// Frame number to start from (1-based).
    #[arg(long, default_value_t = 1)]
    start: u64,

    /// Backend poll interval in milliseconds.
    #[arg(long, default_value_t = 1000)]
    poll_ms: u64,

    /// Settle delay between state reset and expression apply, milliseconds.
    #[arg(long, default_value_t = 100)]
    settle_ms: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Probe(args) => cmd_probe(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let mut backend = plotshot::HttpBackend::new(&args.url);
    eprintln!("waiting for backend at {}", args.url);
    let cfg = plotshot::wait_for_config(&mut backend, Duration::from_millis(args.poll_ms))?;
    println!(
        "{}x{} canvas, {} frames, download_images={}, show_grid={}",
        cfg.canvas.width,
        cfg.canvas.height,
        cfg.total_frames,
        cfg.download_images,
        cfg.show_grid
    );
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut backend = plotshot::HttpBackend::new(&args.url);
    let mut store = plotshot::InMemoryResumeStore::new();
    let mut sink = plotshot::DirectorySink::new(&args.out);

    let opts = plotshot::ExportOpts {
        poll_interval: Duration::from_millis(args.poll_ms),
        // The start frame is scripted, there is nothing to debounce.
        start_debounce: Duration::ZERO,
        settle_delay: Duration::from_millis(args.settle_ms),
    };

    let start = args.start.max(1) as f64;
    let stats = plotshot::run_export(
        &mut backend,
        || Ok(plotshot::HeadlessWidget::new(start)),
        &mut store,
        &mut sink,
        opts,
    )?;

    eprintln!(
        "captured {} frames ({} blocks, {} restarts) into {}",
        stats.frames_captured,
        stats.blocks_fetched,
        stats.reloads,
        args.out.display()
    );
    Ok(())
}
