// In: src/ffi/python.rs

use log::LevelFilter;
use ndarray::Array2;
use pyo3::prelude::*;
use std::collections::HashMap;
use std::hash::Hash;
use std::path::PathBuf;

use crate::bridge;
use crate::config::CompressibilityConfig;
use crate::error::{CompressibilityError, Result};
use crate::observability;
use crate::types::{
    CompressibilitySeries, EventInterval, EventResults, Events, LabeledSeries, PyramidResult,
    SampleArray,
};

/// `(ratio, timestamp)` pairs, the shape the plotting scripts consume.
type PySeries = Vec<(f64, usize)>;

//==================================================================================
// I. Marshalling Helpers
//==================================================================================

fn parse_config(config_json: Option<String>) -> Result<CompressibilityConfig> {
    match config_json {
        Some(json) => CompressibilityConfig::from_json_str(&json),
        None => Ok(CompressibilityConfig::default()),
    }
}

/// Reshapes a flat, row-major buffer into `(rows, channels)`.
fn to_matrix(samples: Vec<f32>, channels: usize) -> Result<Array2<f32>> {
    if channels == 0 || samples.len() % channels != 0 {
        return Err(CompressibilityError::InvalidConfig(format!(
            "{} samples cannot be split into {} channels",
            samples.len(),
            channels
        )));
    }
    let rows = samples.len() / channels;
    Array2::from_shape_vec((rows, channels), samples)
        .map_err(|e| CompressibilityError::InvalidConfig(e.to_string()))
}

fn to_pairs(series: &CompressibilitySeries) -> PySeries {
    series.iter().map(|s| (s.ratio, s.timestamp)).collect()
}

/// Splits per-label outcomes into `(series, error messages)` dicts.
fn split_labeled<K>(result: &LabeledSeries<K>) -> (HashMap<K, PySeries>, HashMap<K, String>)
where
    K: Ord + Hash + Clone,
{
    let series = result
        .succeeded()
        .map(|(label, series)| (label.clone(), to_pairs(series)))
        .collect();
    let failures = result
        .failed()
        .map(|(label, err)| (label.clone(), err.to_string()))
        .collect();
    (series, failures)
}

//==================================================================================
// II. Stateless Analysis API
//==================================================================================

/// Computes the compressibility series of a recording.
///
/// `samples` is a flat, row-major buffer of `channels` interleaved channels.
#[pyfunction]
#[pyo3(name = "compress_recording", signature = (samples, channels = 1, config_json = None))]
pub fn compress_recording_py(
    py: Python<'_>,
    samples: Vec<f32>,
    channels: usize,
    config_json: Option<String>,
) -> PyResult<PySeries> {
    let series = py.allow_threads(move || -> Result<CompressibilitySeries> {
        let config = parse_config(config_json)?;
        let matrix = to_matrix(samples, channels)?;
        bridge::compress_recording(&SampleArray::from_view(matrix.view()), &config)
    })?;
    Ok(to_pairs(&series))
}

/// Computes one series per `window_sizes` entry of the config.
///
/// Returns `(series_by_window_size, error_by_window_size)`.
#[pyfunction]
#[pyo3(name = "compress_recording_pyramid", signature = (samples, channels = 1, config_json = None))]
pub fn compress_recording_pyramid_py(
    py: Python<'_>,
    samples: Vec<f32>,
    channels: usize,
    config_json: Option<String>,
) -> PyResult<(HashMap<usize, PySeries>, HashMap<usize, String>)> {
    let result = py.allow_threads(move || -> Result<PyramidResult> {
        let config = parse_config(config_json)?;
        let matrix = to_matrix(samples, channels)?;
        bridge::compress_recording_pyramid(&SampleArray::from_view(matrix.view()), &config)
    })?;
    Ok(split_labeled(&result))
}

/// Computes a series for each `label -> (start, end)` event interval.
///
/// Returns `(series_by_label, error_by_label)`.
#[pyfunction]
#[pyo3(name = "compress_events", signature = (samples, events, channels = 1, config_json = None))]
pub fn compress_events_py(
    py: Python<'_>,
    samples: Vec<f32>,
    events: HashMap<String, (usize, usize)>,
    channels: usize,
    config_json: Option<String>,
) -> PyResult<(HashMap<String, PySeries>, HashMap<String, String>)> {
    let result = py.allow_threads(move || -> Result<EventResults> {
        let config = parse_config(config_json)?;
        let matrix = to_matrix(samples, channels)?;
        let events: Events = events
            .into_iter()
            .map(|(label, (start, end))| (label, EventInterval::new(start, end)))
            .collect();
        bridge::compress_events(&SampleArray::from_view(matrix.view()), &events, &config)
    })?;
    Ok(split_labeled(&result))
}

//==================================================================================
// III. Diagnostics
//==================================================================================

/// Routes the library's log output to stderr, or appends it to `log_file`.
#[pyfunction]
#[pyo3(name = "enable_verbose_logging", signature = (log_file = None, debug = false))]
pub fn enable_verbose_logging_py(log_file: Option<PathBuf>, debug: bool) -> PyResult<()> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    observability::init_logging(level, log_file.as_deref())?;
    Ok(())
}
