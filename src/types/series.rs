//! Output structures handed to plotting and labeling collaborators.
//!
//! Everything here is plain data and serializes with `serde`. The core makes
//! no assumption about how these are rendered.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::CompressibilityError;

/// One window's compressibility: `compressed_len / raw_len`, reported at `timestamp`.
///
/// The ratio is never clamped; tiny or random windows can exceed 1.0.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CompressibilitySample {
    pub ratio: f64,
    pub timestamp: usize,
}

/// The samples of one full pass over a window plan, in plan (time) order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct CompressibilitySeries {
    samples: Vec<CompressibilitySample>,
}

impl CompressibilitySeries {
    pub fn new(samples: Vec<CompressibilitySample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[CompressibilitySample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompressibilitySample> {
        self.samples.iter()
    }

    pub fn ratios(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.ratio).collect()
    }

    pub fn timestamps(&self) -> Vec<usize> {
        self.samples.iter().map(|s| s.timestamp).collect()
    }

    /// Converts sample-index timestamps to seconds for a given sampling rate.
    pub fn timestamps_in_seconds(&self, sample_rate: f64) -> Vec<f64> {
        self.samples
            .iter()
            .map(|s| s.timestamp as f64 / sample_rate)
            .collect()
    }

    /// Shifts every timestamp by `offset`, e.g. from an event-relative index
    /// back to an index into the full recording.
    pub fn offset_timestamps(mut self, offset: usize) -> Self {
        for sample in &mut self.samples {
            sample.timestamp += offset;
        }
        self
    }

    pub fn into_samples(self) -> Vec<CompressibilitySample> {
        self.samples
    }
}

impl<'a> IntoIterator for &'a CompressibilitySeries {
    type Item = &'a CompressibilitySample;
    type IntoIter = std::slice::Iter<'a, CompressibilitySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl FromIterator<CompressibilitySample> for CompressibilitySeries {
    fn from_iter<I: IntoIterator<Item = CompressibilitySample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

//==================================================================================
// Per-label results with error isolation
//==================================================================================

/// A set of independently computed series, keyed by label, where each label
/// either succeeded or failed on its own.
#[derive(Serialize, Debug)]
#[serde(bound(serialize = "K: Serialize + Ord"))]
pub struct LabeledSeries<K: Ord> {
    series: BTreeMap<K, CompressibilitySeries>,
    #[serde(serialize_with = "serialize_failures")]
    failures: BTreeMap<K, CompressibilityError>,
}

/// Window size -> series, all sharing one step.
pub type PyramidResult = LabeledSeries<usize>;

/// Event label -> series over that event's interval.
pub type EventResults = LabeledSeries<String>;

impl<K: Ord> Default for LabeledSeries<K> {
    fn default() -> Self {
        Self {
            series: BTreeMap::new(),
            failures: BTreeMap::new(),
        }
    }
}

impl<K: Ord> LabeledSeries<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome for `label`. A later outcome replaces an earlier one.
    pub fn insert(&mut self, label: K, outcome: Result<CompressibilitySeries, CompressibilityError>) {
        match outcome {
            Ok(series) => {
                self.failures.remove(&label);
                self.series.insert(label, series);
            }
            Err(err) => {
                self.series.remove(&label);
                self.failures.insert(label, err);
            }
        }
    }

    pub fn series(&self, label: &K) -> Option<&CompressibilitySeries> {
        self.series.get(label)
    }

    pub fn failure(&self, label: &K) -> Option<&CompressibilityError> {
        self.failures.get(label)
    }

    pub fn succeeded(&self) -> impl Iterator<Item = (&K, &CompressibilitySeries)> {
        self.series.iter()
    }

    pub fn failed(&self) -> impl Iterator<Item = (&K, &CompressibilityError)> {
        self.failures.iter()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total number of labels, successful or not.
    pub fn len(&self) -> usize {
        self.series.len() + self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Errors are not data; collaborators get their messages.
fn serialize_failures<K, S>(
    failures: &BTreeMap<K, CompressibilityError>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    K: Serialize,
    S: Serializer,
{
    serializer.collect_map(failures.iter().map(|(label, err)| (label, err.to_string())))
}
