//! This module defines the core, strongly-typed data representations used
//! throughout the compressibility pipeline.
//!
//! It includes the read-only `SampleArray` view handed to the core by the
//! loading collaborator, and the plain, serializable output structures handed
//! on to plotting collaborators.

pub mod sample_array;
pub mod series;

// Re-export the main type(s) for easier access.
pub use sample_array::{EventInterval, Events, SampleArray};
pub use series::{
    CompressibilitySample, CompressibilitySeries, EventResults, LabeledSeries, PyramidResult,
};
