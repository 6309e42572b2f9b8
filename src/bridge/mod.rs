// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the stable, config-driven face of the library. Drivers (scripts,
// notebooks, the Python bindings) hand it a sample array and a
// `CompressibilityConfig`; it turns the config into a codec, a window plan and run
// options, and calls the pure `window_pipeline` engine.
//
// Data Flow:
//
//   1. [Driver]            -> SampleArray + CompressibilityConfig (+ optional Events)
//         |
//         `-> 2. [Stateless API]
//                  a. validate config, build `Box<dyn Codec>` and `RunOptions`
//                  b. plan windows (single run) or list resolutions (pyramid)
//         |
//         `-> 3. [window_pipeline]  -> CompressibilitySeries / PyramidResult
//         |
//         `-> 4. [Driver]  <- plain, serializable results for plotting
//
// ====================================================================================
pub mod stateless_api;

pub use stateless_api::{compress_events, compress_recording, compress_recording_pyramid};
