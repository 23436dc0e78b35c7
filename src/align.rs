use crate::{
    aggregate::Summary,
    reconcile::CanonicalAxis,
    record::{Device, Metric},
};

/// Value used wherever a device has nothing for a `(model, test)` pair.
pub const FALLBACK: f64 = 0.0;

/// One device's values for one metric and test, one per canonical model.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeries {
    pub metric: Metric,
    pub test_name: String,
    pub device: Device,
    pub values: Vec<f64>,
}

/// GPU and CPU series for the same metric and test.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPair {
    pub test_name: String,
    pub gpu: AlignedSeries,
    pub cpu: AlignedSeries,
}

/// Lay `summary` out along `models` for one metric and test.
///
/// Position `i` holds the mean for `(models[i], test_name)`. Pairs the
/// device never observed, metrics it never reported, and non-finite means
/// all become [`FALLBACK`], so the result always has `models.len()` values.
pub fn align(metric: Metric, test_name: &str, models: &[String], summary: &Summary) -> AlignedSeries {
    let values = models
        .iter()
        .map(|model| {
            summary
                .mean(model, test_name, metric)
                .filter(|v| v.is_finite())
                .unwrap_or(FALLBACK)
        })
        .collect();

    AlignedSeries {
        metric,
        test_name: test_name.to_string(),
        device: summary.device,
        values,
    }
}

/// GPU and CPU series for every test on the axis, in axis order.
pub fn align_metric(
    metric: Metric,
    axis: &CanonicalAxis,
    gpu: &Summary,
    cpu: &Summary,
) -> Vec<SeriesPair> {
    axis.tests
        .iter()
        .map(|test| SeriesPair {
            test_name: test.clone(),
            gpu: align(metric, test, &axis.models, gpu),
            cpu: align(metric, test, &axis.models, cpu),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{DeviceTable, MeasurementRecord};

    fn record(model: &str, test: &str, tps: f64) -> MeasurementRecord {
        MeasurementRecord {
            model: model.into(),
            test_name: test.into(),
            tokens: Some(1.0),
            tokens_per_sec: tps,
            seconds: 1.0,
            cpu_percent: 1.0,
            mem_mb: 1.0,
            vram_mb: Some(64.0),
            benchmark: None,
        }
    }

    fn models(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_pairs_fall_back_to_zero() {
        let table = DeviceTable::with_records(
            Device::Gpu,
            vec![record("b", "t1", 3.0), record("b", "t1", 5.0), record("a", "t2", 9.0)],
        );
        let summary = Summary::from_table(&table, &Metric::ALL);
        let series = align(Metric::TokensPerSec, "t1", &models(&["a", "b", "c"]), &summary);
        assert_eq!(series.values, vec![0.0, 4.0, 0.0]);
        assert_eq!(series.device, Device::Gpu);
        assert_eq!(series.test_name, "t1");
    }

    #[test]
    fn empty_table_gives_all_zero() {
        let summary = Summary::from_table(&DeviceTable::new(Device::Cpu), &Metric::ALL);
        let series = align(Metric::Seconds, "t1", &models(&["m1"]), &summary);
        assert_eq!(series.values, vec![0.0]);
    }

    #[test]
    fn non_finite_mean_falls_back() {
        let table = DeviceTable::with_records(Device::Gpu, vec![record("a", "t", f64::INFINITY)]);
        let summary = Summary::from_table(&table, &Metric::ALL);
        let series = align(Metric::TokensPerSec, "t", &models(&["a"]), &summary);
        assert_eq!(series.values, vec![0.0]);
    }

    #[test]
    fn align_metric_pairs_each_test() {
        let gpu = DeviceTable::with_records(Device::Gpu, vec![record("a", "t1", 2.0)]);
        let mut cpu_row = record("a", "t2", 1.0);
        cpu_row.vram_mb = None;
        let cpu = DeviceTable::with_records(Device::Cpu, vec![cpu_row]);
        let axis = CanonicalAxis::union(&gpu, &cpu);

        let gpu = Summary::from_table(&gpu, &Metric::ALL);
        let cpu = Summary::from_table(&cpu, &Metric::ALL);
        let pairs = align_metric(Metric::VramMb, &axis, &gpu, &cpu);

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].test_name, "t1");
        assert_eq!(pairs[0].gpu.values, vec![64.0]);
        assert_eq!(pairs[0].cpu.values, vec![0.0]);
        assert_eq!(pairs[1].gpu.values, vec![0.0]);
        assert_eq!(pairs[1].cpu.values, vec![0.0]);
    }
}
