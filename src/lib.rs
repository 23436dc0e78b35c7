//! Consolidate GPU and CPU benchmark results into summary tables and
//! comparison charts.
//!
//! The pipeline runs once per invocation:
//! [`loader`] reads `results_*.csv` files into one [`record::DeviceTable`]
//! per device, [`reconcile`] derives the sorted model/test axis,
//! [`aggregate`] averages every metric per `(model, test_name)`,
//! [`align`] lays those means out along the model axis, and [`chart`]
//! draws one PNG per metric.

pub mod aggregate;
pub mod align;
pub mod chart;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod reconcile;
pub mod record;
pub mod summary;
pub mod utils;

pub use error::{Error, Result};

#[allow(unused)]
pub mod prelude {
    use crate::{aggregate, align, config, pipeline, reconcile, record};

    // Re-export common types for easier use
    pub use aggregate::Summary;
    pub use align::{align, align_metric, AlignedSeries, SeriesPair};
    pub use config::{ReportConfig, ReportConfigBuilder};
    pub use pipeline::{run_aggregate, run_compare, Mode, Report};
    pub use reconcile::CanonicalAxis;
    pub use record::{Device, DeviceTable, MeasurementRecord, Metric};
}
