//! Position sampling - sample type and the source adapter contract.
//!
//! The reporting loop has zero dependency on any specific sensor API. Any
//! implementation of [`PositionSource`] (a timer-driven simulation, a real
//! GNSS binding) satisfies the same contract:
//!
//! - [`PositionSample`] - one timestamped latitude/longitude/altitude reading
//! - [`SourceConfig`] - polling cadence and accuracy policy
//! - [`PositionSource`] - subscribe/cancel contract for sample producers
//! - [`SimulatedSource`] - timer-driven implementation for development and tests

mod sample;
mod simulated;
mod source;

pub use sample::PositionSample;
pub use simulated::{SimulatedPath, SimulatedSource};
pub use source::{PositionSource, PositionSourceError, SourceConfig};
