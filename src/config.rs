use std::path::{Path, PathBuf};

/// Default prefix of per-run folders under a device root.
pub const RUN_PREFIX: &str = "benchmark_";

/// Default prefix of the results file inside a run folder.
pub const RESULTS_PREFIX: &str = "results_";

/// Default extension of the results file inside a run folder.
pub const RESULTS_SUFFIX: &str = ".csv";

/// Configuration for one report invocation.
///
/// Holds where GPU and CPU results live, how run folders and results files
/// are recognised, where charts go, and how they are sized. Paths are
/// resolved by the caller; nothing here looks at the working directory.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Directory of GPU results. In aggregation mode it holds `benchmark_*`
    /// run folders; in comparison mode it directly holds a results file.
    pub gpu_root: PathBuf,

    /// Directory of CPU results, laid out like `gpu_root`.
    pub cpu_root: PathBuf,

    /// Directory the PNG charts are written to. Created if absent.
    pub output_dir: PathBuf,

    /// Name prefix identifying run folders.
    pub run_prefix: String,

    /// Name prefix identifying the results file in a folder.
    pub results_prefix: String,

    /// Name suffix identifying the results file in a folder.
    pub results_suffix: String,

    /// Chart width in pixels.
    pub width: u32,

    /// Chart height in pixels.
    pub height: u32,

    /// Whether to show a progress bar and debug details while loading.
    pub verbose: bool,
}

impl ReportConfig {
    /// Creates a new builder for constructing a `ReportConfig`.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Whether `name` looks like a run folder.
    pub fn is_run_folder(&self, name: &str) -> bool {
        name.starts_with(&self.run_prefix)
    }

    /// Whether `name` looks like a results file.
    pub fn is_results_file(&self, name: &str) -> bool {
        name.len() >= self.results_prefix.len() + self.results_suffix.len()
            && name.starts_with(&self.results_prefix)
            && name.ends_with(&self.results_suffix)
    }

    /// Full path of a chart file in the output directory.
    pub fn chart_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}

/// Builder pattern for constructing a `ReportConfig` with optional parameters.
#[derive(Default)]
pub struct ReportConfigBuilder {
    gpu_root: Option<PathBuf>,
    cpu_root: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    run_prefix: Option<String>,
    results_prefix: Option<String>,
    results_suffix: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    verbose: Option<bool>,
}

impl ReportConfigBuilder {
    /// Set the directory holding GPU results.
    pub fn with_gpu_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.gpu_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the directory holding CPU results.
    pub fn with_cpu_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cpu_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the directory charts are written to.
    pub fn with_output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the run folder name prefix (default `benchmark_`).
    pub fn with_run_prefix(mut self, prefix: &str) -> Self {
        self.run_prefix = Some(prefix.to_string());
        self
    }

    /// Set the results file name prefix (default `results_`).
    pub fn with_results_prefix(mut self, prefix: &str) -> Self {
        self.results_prefix = Some(prefix.to_string());
        self
    }

    /// Set the results file name suffix (default `.csv`).
    pub fn with_results_suffix(mut self, suffix: &str) -> Self {
        self.results_suffix = Some(suffix.to_string());
        self
    }

    /// Set the chart width in pixels.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the chart height in pixels.
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Set whether loading shows progress and debug output.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Finalize and create a `ReportConfig`.
    ///
    /// Returns `None` if any of the three directories was not set.
    pub fn build(self) -> Option<ReportConfig> {
        Some(ReportConfig {
            gpu_root: self.gpu_root?,
            cpu_root: self.cpu_root?,
            output_dir: self.output_dir?,
            run_prefix: self.run_prefix.unwrap_or_else(|| RUN_PREFIX.to_string()),
            results_prefix: self
                .results_prefix
                .unwrap_or_else(|| RESULTS_PREFIX.to_string()),
            results_suffix: self
                .results_suffix
                .unwrap_or_else(|| RESULTS_SUFFIX.to_string()),
            width: self.width.unwrap_or(1200),
            height: self.height.unwrap_or(600),
            verbose: self.verbose.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ReportConfig {
        ReportConfig::builder()
            .with_gpu_root("gpu")
            .with_cpu_root("cpu")
            .with_output_dir("plots")
            .build()
            .unwrap()
    }

    #[test]
    fn builder_defaults() {
        let config = config();
        assert_eq!(config.run_prefix, "benchmark_");
        assert_eq!(config.results_prefix, "results_");
        assert_eq!(config.results_suffix, ".csv");
        assert_eq!((config.width, config.height), (1200, 600));
        assert!(!config.verbose);
        assert_eq!(config.chart_path("latency.png"), PathBuf::from("plots/latency.png"));
    }

    #[test]
    fn builder_requires_directories() {
        assert!(ReportConfig::builder().with_gpu_root("gpu").build().is_none());
        assert!(ReportConfig::builder()
            .with_gpu_root("gpu")
            .with_cpu_root("cpu")
            .build()
            .is_none());
    }

    #[test]
    fn name_patterns() {
        let config = config();
        assert!(config.is_run_folder("benchmark_2024_01_01"));
        assert!(!config.is_run_folder("plots"));
        assert!(config.is_results_file("results_20240101.csv"));
        assert!(config.is_results_file("results_.csv"));
        assert!(!config.is_results_file("results_20240101.json"));
        assert!(!config.is_results_file("summary.csv"));
        assert!(!config.is_results_file("results.csv"));
    }
}
