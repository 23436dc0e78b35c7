use std::{path::PathBuf, process, time::Instant};

use benchviz::{
    config::ReportConfig,
    pipeline::run_compare,
    utils::{format_duration, init_logging},
};
use clap::Parser;

/// Plot one GPU benchmark run against one CPU benchmark run.
///
/// Each folder must directly contain a `results_*.csv`. Charts are written
/// to `<gpu_folder>/plots`.
#[derive(Parser, Debug)]
#[command(name = "benchviz", version, about)]
struct Cli {
    /// Folder holding the GPU run's results_*.csv
    gpu_folder: PathBuf,

    /// Folder holding the CPU run's results_*.csv
    cpu_folder: PathBuf,

    /// Chart width in pixels
    #[arg(long, default_value_t = 1200)]
    width: u32,

    /// Chart height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Show debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ReportConfig::builder()
        .with_gpu_root(&cli.gpu_folder)
        .with_cpu_root(&cli.cpu_folder)
        .with_output_dir(cli.gpu_folder.join("plots"))
        .with_width(cli.width)
        .with_height(cli.height)
        .with_verbose(cli.verbose)
        .build();
    let Some(config) = config else {
        eprintln!("error: incomplete configuration");
        process::exit(2);
    };

    let start = Instant::now();
    match run_compare(&config) {
        Ok(report) => {
            if report.failed().next().is_some() {
                eprintln!("warning: some plots could not be saved");
            }
            println!("Finished in {}", format_duration(start.elapsed()));
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("Usage: benchviz <gpu_benchmark_folder> <cpu_benchmark_folder>");
            process::exit(1);
        }
    }
}
