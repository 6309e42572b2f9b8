// In: src/ffi/mod.rs

//! Python bindings, compiled only with the `python` feature.

pub mod python;
