// Entry point: parses arguments, loads config and runs the chart pipeline.
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hanoi_plots::cli::Args;
use hanoi_plots::pipeline::Pipeline;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.resolve_config();
    let charts = args.selected_charts();

    let mut pipeline = Pipeline::new(config);
    let report = pipeline.run(&charts);

    if let Some(err) = &report.abort {
        eprintln!("{err}");
        return;
    }
    if report.skipped_rows > 0 {
        println!("Skipped {} malformed row(s)", report.skipped_rows);
    }
    for path in &report.written {
        println!("Saved {}", path.display());
    }
    for (kind, err) in &report.failed {
        eprintln!("{kind} chart not rendered: {err}");
    }
}
