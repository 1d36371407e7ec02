//! Common utilities module
//!
//! Error types, exit codes and stage timing shared across the image pipeline.

pub mod error;
pub mod timing;

pub use error::{ConversionError, ExitCode, Result};
pub use timing::{PipelineTimings, StepTiming, Timer};
