use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::{
    aggregate::Summary,
    align::align_metric,
    chart::{plot_comparison, ChartConfig},
    config::ReportConfig,
    error::{Error, Result},
    loader::{load_runs, load_single},
    reconcile::CanonicalAxis,
    record::{Device, DeviceTable, Metric},
    summary::print_summary,
};

/// How the two device tables were collected and reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Many run folders per device, keys unioned.
    Aggregate,
    /// One results file per device, keys intersected.
    Compare,
}

/// One chart to draw: which metric, how to label it, and where to save it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotSpec {
    pub metric: Metric,
    pub y_desc: &'static str,
    pub caption: &'static str,
    pub file_name: &'static str,
}

const fn plot(
    metric: Metric,
    y_desc: &'static str,
    caption: &'static str,
    file_name: &'static str,
) -> PlotSpec {
    PlotSpec {
        metric,
        y_desc,
        caption,
        file_name,
    }
}

pub const AGGREGATE_PLOTS: [PlotSpec; 4] = [
    plot(Metric::TokensPerSec, "Tokens per Second", "Tokens/sec CPU vs GPU", "tokens_per_sec.png"),
    plot(Metric::Seconds, "Latency (s)", "Latency CPU vs GPU", "latency.png"),
    plot(Metric::CpuPercent, "CPU (%)", "CPU Usage CPU vs GPU", "cpu_usage.png"),
    plot(Metric::MemMb, "Memory Usage (MB)", "RAM Usage CPU vs GPU", "memory_usage.png"),
];

pub const COMPARE_PLOTS: [PlotSpec; 4] = [
    plot(Metric::TokensPerSec, "Tokens per Second", "Tokens/sec CPU vs GPU", "tokens_per_sec.png"),
    plot(Metric::Seconds, "Latency (s)", "Latency CPU vs GPU", "latency.png"),
    plot(Metric::CpuPercent, "CPU (%)", "CPU Usage CPU vs GPU", "cpu_usage.png"),
    plot(Metric::MemMb, "RAM (MB)", "Memory Usage CPU vs GPU", "memory_usage.png"),
];

impl Mode {
    pub fn plots(self) -> &'static [PlotSpec] {
        match self {
            Mode::Aggregate => &AGGREGATE_PLOTS,
            Mode::Compare => &COMPARE_PLOTS,
        }
    }
}

/// What happened to one chart.
#[derive(Debug)]
pub struct ChartOutcome {
    pub metric: Metric,
    pub path: PathBuf,
    pub result: Result<()>,
}

impl ChartOutcome {
    pub fn is_saved(&self) -> bool {
        self.result.is_ok()
    }
}

/// Everything one invocation produced.
#[derive(Debug)]
pub struct Report {
    pub mode: Mode,
    pub axis: CanonicalAxis,
    pub gpu: Summary,
    pub cpu: Summary,
    pub charts: Vec<ChartOutcome>,
}

impl Report {
    pub fn saved(&self) -> impl Iterator<Item = &Path> {
        self.charts
            .iter()
            .filter(|c| c.is_saved())
            .map(|c| c.path.as_path())
    }

    pub fn failed(&self) -> impl Iterator<Item = &ChartOutcome> {
        self.charts.iter().filter(|c| !c.is_saved())
    }
}

/// Consolidate every run folder under the GPU and CPU roots and chart them.
///
/// Fails only when neither root yields a single row.
pub fn run_aggregate(config: &ReportConfig) -> Result<Report> {
    let gpu = load_runs(&config.gpu_root, Device::Gpu, config);
    let cpu = load_runs(&config.cpu_root, Device::Cpu, config);

    if gpu.is_empty() && cpu.is_empty() {
        return Err(Error::NoResults);
    }

    let axis = CanonicalAxis::union(&gpu, &cpu);
    Ok(report(Mode::Aggregate, axis, &gpu, &cpu, config))
}

/// Compare the single results file in the GPU root against the one in the
/// CPU root. Any loading problem or an empty model/test intersection fails.
pub fn run_compare(config: &ReportConfig) -> Result<Report> {
    let gpu = load_single(&config.gpu_root, Device::Gpu, config)?;
    let cpu = load_single(&config.cpu_root, Device::Cpu, config)?;
    let axis = CanonicalAxis::intersection(&gpu, &cpu)?;
    Ok(report(Mode::Compare, axis, &gpu, &cpu, config))
}

fn report(
    mode: Mode,
    axis: CanonicalAxis,
    gpu: &DeviceTable,
    cpu: &DeviceTable,
    config: &ReportConfig,
) -> Report {
    println!(
        "Found {} models and {} tests.\n",
        axis.models.len(),
        axis.tests.len()
    );

    let gpu = Summary::from_table(gpu, &Metric::ALL);
    let cpu = Summary::from_table(cpu, &Metric::ALL);
    print_summary(&gpu);
    print_summary(&cpu);

    let charts: Vec<ChartOutcome> = mode
        .plots()
        .iter()
        .map(|spec| render(spec, &axis, &gpu, &cpu, config))
        .collect();

    if charts.iter().all(ChartOutcome::is_saved) {
        println!("All plots saved in: {}", config.output_dir.display());
    } else {
        let saved = charts.iter().filter(|c| c.is_saved()).count();
        println!(
            "Saved {saved} of {} plots in: {}",
            charts.len(),
            config.output_dir.display()
        );
    }

    Report {
        mode,
        axis,
        gpu,
        cpu,
        charts,
    }
}

// A failed chart is logged and recorded; the remaining charts still run.
fn render(
    spec: &PlotSpec,
    axis: &CanonicalAxis,
    gpu: &Summary,
    cpu: &Summary,
    config: &ReportConfig,
) -> ChartOutcome {
    let path = config.chart_path(spec.file_name);
    let pairs = align_metric(spec.metric, axis, gpu, cpu);
    info!(
        "plotting {} for {} tests over {} models",
        spec.metric,
        pairs.len(),
        axis.models.len()
    );

    let chart = ChartConfig::builder()
        .caption(spec.caption)
        .y_desc(spec.y_desc)
        .path(&path)
        .width(config.width)
        .height(config.height)
        .build();

    let result = plot_comparison(&axis.models, &pairs, &chart);
    match &result {
        Ok(()) => println!("Saved plot: {}", path.display()),
        Err(err) => warn!("could not save {}: {err}", path.display()),
    }

    ChartOutcome {
        metric: spec.metric,
        path,
        result,
    }
}
