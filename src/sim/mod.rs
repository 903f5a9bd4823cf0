//! Storm-resilience simulation: battery, storm window, fan-out, and engine.

/// Battery state-of-charge model.
pub mod battery;
pub mod engine;
/// Even supply split across stations.
pub mod fan_out;
pub mod types;
/// Wall-clock storm window test.
pub mod window;

// Re-export the main types for convenience
pub use battery::Battery;
pub use engine::{Engine, SimulateError, simulate};
pub use fan_out::fan_out;
pub use types::{SimParams, StepRecord};
pub use window::StormWindow;
