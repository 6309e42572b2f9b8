//! The read-only view over a recording's samples.
//!
//! A `SampleArray` never owns its data: the loading collaborator keeps the
//! buffer alive for the whole analysis session and the core only ever reads
//! contiguous row ranges from it. Time runs along axis 0; 1-D recordings are
//! viewed as a single channel.

use std::collections::BTreeMap;

use ndarray::{s, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{CompressibilityError, Result};

/// A named `[start, end)` sample-index range, e.g. a stimulus condition.
///
/// Only used to select which sub-range of a recording is fed to the core.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventInterval {
    pub start: usize,
    pub end: usize,
}

impl EventInterval {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Mapping from event label to its interval, as produced by the loading collaborator.
pub type Events = BTreeMap<String, EventInterval>;

/// A borrowed, immutable 2-D view of a recording (rows = time, columns = channels).
#[derive(Debug, Clone, Copy)]
pub struct SampleArray<'a, T> {
    data: ArrayView2<'a, T>,
}

impl<'a, T> SampleArray<'a, T> {
    /// Views a flat, single-channel recording.
    pub fn from_slice(samples: &'a [T]) -> Self {
        Self::from_view1(ArrayView1::from(samples))
    }

    /// Views a 1-D array as a single-channel recording.
    pub fn from_view1(view: ArrayView1<'a, T>) -> Self {
        Self {
            data: view.insert_axis(Axis(1)),
        }
    }

    /// Views a multichannel recording with time as the first axis.
    pub fn from_view(view: ArrayView2<'a, T>) -> Self {
        Self { data: view }
    }

    /// Number of samples along the time axis.
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn channels(&self) -> usize {
        self.data.ncols()
    }

    pub fn view(&self) -> ArrayView2<'a, T> {
        self.data
    }

    /// Returns the rows `[start, end)`, or `None` if the range does not fit.
    pub fn window(&self, start: usize, end: usize) -> Option<ArrayView2<'a, T>> {
        if start > end || end > self.len() {
            return None;
        }
        Some(self.data.slice_move(s![start..end, ..]))
    }

    /// Selects the sub-recording covered by an event interval.
    pub fn interval(&self, interval: &EventInterval) -> Result<SampleArray<'a, T>> {
        self.window(interval.start, interval.end)
            .map(SampleArray::from_view)
            .ok_or(CompressibilityError::IntervalOutOfBounds {
                start: interval.start,
                end: interval.end,
                len: self.len(),
            })
    }
}

impl<'a, T> From<&'a [T]> for SampleArray<'a, T> {
    fn from(samples: &'a [T]) -> Self {
        SampleArray::from_slice(samples)
    }
}

impl<'a, T> From<ArrayView2<'a, T>> for SampleArray<'a, T> {
    fn from(view: ArrayView2<'a, T>) -> Self {
        SampleArray::from_view(view)
    }
}
