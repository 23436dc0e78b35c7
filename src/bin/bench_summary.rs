//! Consolidated benchmark summary.
//!
//! Collects every `benchmark_*/results_*.csv` under the GPU and CPU roots,
//! prints a per-device summary table, and writes one CPU-vs-GPU chart per
//! metric.
//!
//! Usage:
//!     cargo run --release --bin bench_summary -- [--project-dir DIR]
//!
//! Default layout, relative to the project directory:
//!     benchmarks/               GPU runs
//!     benchmarks_cpu/           CPU runs
//!     benchmark_summary_plots/  output charts
use std::{path::PathBuf, process, time::Instant};

use benchviz::{
    config::ReportConfig,
    pipeline::run_aggregate,
    utils::{format_duration, init_logging},
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bench_summary", version, about = "Consolidate GPU and CPU benchmark runs")]
struct Cli {
    /// Directory the default roots are resolved against
    #[arg(long, default_value = ".")]
    project_dir: PathBuf,

    /// GPU runs root [default: <project-dir>/benchmarks]
    #[arg(long)]
    gpu_root: Option<PathBuf>,

    /// CPU runs root [default: <project-dir>/benchmarks_cpu]
    #[arg(long)]
    cpu_root: Option<PathBuf>,

    /// Chart directory [default: <project-dir>/benchmark_summary_plots]
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Chart width in pixels
    #[arg(long, default_value_t = 1200)]
    width: u32,

    /// Chart height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Show a progress bar and debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let project = &cli.project_dir;
    let config = ReportConfig::builder()
        .with_gpu_root(cli.gpu_root.unwrap_or_else(|| project.join("benchmarks")))
        .with_cpu_root(cli.cpu_root.unwrap_or_else(|| project.join("benchmarks_cpu")))
        .with_output_dir(
            cli.output_dir
                .unwrap_or_else(|| project.join("benchmark_summary_plots")),
        )
        .with_width(cli.width)
        .with_height(cli.height)
        .with_verbose(cli.verbose)
        .build();
    let Some(config) = config else {
        eprintln!("error: incomplete configuration");
        process::exit(2);
    };

    let start = Instant::now();
    match run_aggregate(&config) {
        Ok(report) => {
            for chart in report.failed() {
                eprintln!("warning: {} was not saved", chart.path.display());
            }
            println!("Finished in {}", format_duration(start.elapsed()));
        }
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    }
}
