use std::collections::HashMap;

use crate::record::{Device, DeviceTable, Metric};

/// Running sum and count for one metric of one group.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    /// Add one observation. NaN observations are ignored.
    pub fn push(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        self.sum += value;
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Arithmetic mean, or `None` if nothing was observed.
    pub fn mean(&self) -> Option<f64> {
        match self.count {
            0 => None,
            n => Some(self.sum / n as f64),
        }
    }
}

/// Per-metric means for one `(model, test_name)` group.
#[derive(Debug, Clone)]
pub struct SummaryEntry {
    pub model: String,
    pub test_name: String,
    pub rows: usize,
    accumulators: Vec<Accumulator>,
}

/// Mean of each requested metric, grouped by `(model, test_name)`.
///
/// Groups are kept in first-seen order. Only observed pairs have an entry.
#[derive(Debug, Clone)]
pub struct Summary {
    pub device: Device,
    metrics: Vec<Metric>,
    entries: Vec<SummaryEntry>,
    index: HashMap<(String, String), usize>,
}

impl Summary {
    pub fn from_table(table: &DeviceTable, metrics: &[Metric]) -> Self {
        let mut summary = Summary {
            device: table.device,
            metrics: metrics.to_vec(),
            entries: Vec::new(),
            index: HashMap::new(),
        };

        for record in &table.records {
            let key = (record.model.clone(), record.test_name.clone());
            let slot = match summary.index.get(&key) {
                Some(&slot) => slot,
                None => {
                    let slot = summary.entries.len();
                    summary.entries.push(SummaryEntry {
                        model: record.model.clone(),
                        test_name: record.test_name.clone(),
                        rows: 0,
                        accumulators: vec![Accumulator::default(); metrics.len()],
                    });
                    summary.index.insert(key, slot);
                    slot
                }
            };

            let entry = &mut summary.entries[slot];
            entry.rows += 1;
            for (acc, metric) in entry.accumulators.iter_mut().zip(metrics) {
                if let Some(value) = metric.value(record) {
                    acc.push(value);
                }
            }
        }

        summary
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn entries(&self) -> &[SummaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, model: &str, test_name: &str) -> Option<&SummaryEntry> {
        self.index
            .get(&(model.to_string(), test_name.to_string()))
            .map(|&slot| &self.entries[slot])
    }

    /// Unrounded mean of `metric` for one group, if the group exists and
    /// observed the metric.
    pub fn mean(&self, model: &str, test_name: &str, metric: Metric) -> Option<f64> {
        self.get(model, test_name)
            .and_then(|entry| self.entry_mean(entry, metric))
    }

    pub fn entry_mean(&self, entry: &SummaryEntry, metric: Metric) -> Option<f64> {
        let slot = self.metrics.iter().position(|m| *m == metric)?;
        entry.accumulators[slot].mean()
    }
}

/// Round to 2 decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
