use std::collections::BTreeSet;

use crate::{
    error::{AxisKind, Error, Result},
    record::DeviceTable,
};

/// The sorted model and test names every chart is laid out on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CanonicalAxis {
    pub models: Vec<String>,
    pub tests: Vec<String>,
}

impl CanonicalAxis {
    /// Every model and test seen on either side. Used when consolidating many runs.
    pub fn union(gpu: &DeviceTable, cpu: &DeviceTable) -> Self {
        let models: BTreeSet<&str> = gpu.models().chain(cpu.models()).collect();
        let tests: BTreeSet<&str> = gpu.tests().chain(cpu.tests()).collect();
        CanonicalAxis {
            models: to_sorted_vec(models),
            tests: to_sorted_vec(tests),
        }
    }

    /// Only the models and tests present on both sides. Used when pairing a
    /// single GPU file with a single CPU file; an empty result on either axis
    /// is an error since nothing can be compared.
    pub fn intersection(gpu: &DeviceTable, cpu: &DeviceTable) -> Result<Self> {
        let tests = intersect(gpu.tests().collect(), cpu.tests().collect());
        if tests.is_empty() {
            return Err(Error::EmptyIntersection(AxisKind::Tests));
        }
        let models = intersect(gpu.models().collect(), cpu.models().collect());
        if models.is_empty() {
            return Err(Error::EmptyIntersection(AxisKind::Models));
        }
        Ok(CanonicalAxis { models, tests })
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty() || self.tests.is_empty()
    }
}

fn intersect(a: BTreeSet<&str>, b: BTreeSet<&str>) -> Vec<String> {
    to_sorted_vec(a.intersection(&b).copied().collect())
}

// BTreeSet iteration is already lexicographic.
fn to_sorted_vec(set: BTreeSet<&str>) -> Vec<String> {
    set.into_iter().map(str::to_string).collect()
}
