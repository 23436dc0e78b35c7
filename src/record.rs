use serde::{Deserialize, Deserializer};
use std::{fmt, str::FromStr};

/// Which kind of run produced a set of measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Device {
    Gpu,
    Cpu,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Device::Gpu => write!(f, "GPU"),
            Device::Cpu => write!(f, "CPU"),
        }
    }
}

/// One row of a `results_*.csv` file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MeasurementRecord {
    pub model: String,
    pub test_name: String,
    /// Written as a float by some producers (`100.0`).
    #[serde(default)]
    pub tokens: Option<f64>,
    #[serde(deserialize_with = "blank_as_nan")]
    pub tokens_per_sec: f64,
    #[serde(deserialize_with = "blank_as_nan")]
    pub seconds: f64,
    #[serde(deserialize_with = "blank_as_nan")]
    pub cpu_percent: f64,
    #[serde(deserialize_with = "blank_as_nan")]
    pub mem_mb: f64,
    /// Only GPU runs report device memory.
    #[serde(default)]
    pub vram_mb: Option<f64>,
    /// Name of the run folder the row came from, attached by the loader.
    #[serde(skip)]
    pub benchmark: Option<String>,
}

/// Blank cells read as NaN so the aggregator skips them. Non-numeric text
/// is still an error.
fn blank_as_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Columns every results file must carry.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "model",
    "test_name",
    "tokens_per_sec",
    "seconds",
    "cpu_percent",
    "mem_mb",
];

/// Numeric columns that can be averaged and plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    Tokens,
    TokensPerSec,
    Seconds,
    CpuPercent,
    MemMb,
    VramMb,
}

impl Metric {
    /// Every metric, in summary-table column order.
    pub const ALL: [Metric; 6] = [
        Metric::Tokens,
        Metric::TokensPerSec,
        Metric::Seconds,
        Metric::CpuPercent,
        Metric::MemMb,
        Metric::VramMb,
    ];

    /// The CSV column holding this metric.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Tokens => "tokens",
            Metric::TokensPerSec => "tokens_per_sec",
            Metric::Seconds => "seconds",
            Metric::CpuPercent => "cpu_percent",
            Metric::MemMb => "mem_mb",
            Metric::VramMb => "vram_mb",
        }
    }

    /// Read this metric off a record. `None` when the record has no value for it.
    pub fn value(self, record: &MeasurementRecord) -> Option<f64> {
        match self {
            Metric::Tokens => record.tokens,
            Metric::TokensPerSec => Some(record.tokens_per_sec),
            Metric::Seconds => Some(record.seconds),
            Metric::CpuPercent => Some(record.cpu_percent),
            Metric::MemMb => Some(record.mem_mb),
            Metric::VramMb => record.vram_mb,
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let column = s.to_lowercase();
        Metric::ALL
            .into_iter()
            .find(|m| m.column() == column)
            .ok_or_else(|| format!("Invalid metric: {s}"))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Metric::Tokens => write!(f, "Tokens"),
            Metric::TokensPerSec => write!(f, "Tokens/sec"),
            Metric::Seconds => write!(f, "Latency"),
            Metric::CpuPercent => write!(f, "CPU Usage"),
            Metric::MemMb => write!(f, "RAM Usage"),
            Metric::VramMb => write!(f, "VRAM Usage"),
        }
    }
}

/// All records loaded for one device, in load order.
#[derive(Debug, Clone)]
pub struct DeviceTable {
    pub device: Device,
    pub records: Vec<MeasurementRecord>,
}

impl DeviceTable {
    pub fn new(device: Device) -> Self {
        DeviceTable {
            device,
            records: Vec::new(),
        }
    }

    pub fn with_records(device: Device, records: Vec<MeasurementRecord>) -> Self {
        DeviceTable { device, records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.model.as_str())
    }

    pub fn tests(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.test_name.as_str())
    }
}
