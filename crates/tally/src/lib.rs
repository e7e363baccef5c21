//! Tally
//!
//! Counts how often each application holds input focus and keeps the counts
//! in a JSON file across runs:
//! - [`normalize`] maps a window title to the label it is counted under
//! - [`ActivityStore`] holds the counts and loads/flushes the file
//! - [`Sampler`] polls a [`focus_probe::FocusProbe`] on a fixed timer
//! - [`run_until`] ties them together with a graceful-shutdown flush
//!
//! Library functions report failures as [`Error`]; deciding whether to exit
//! is left to the caller.

mod error;
pub mod normalize;
mod runtime;
pub mod sampler;
pub mod store;

pub use error::{Error, Result};
pub use normalize::normalize;
pub use runtime::{RunSummary, run_until, shutdown_signal};
pub use sampler::{DEFAULT_INTERVAL, Sampler, SamplerConfig};
pub use store::{ActivityStore, Snapshot};
