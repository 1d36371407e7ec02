//! Pipeline conversions module
//!
//! Orchestrates decoding, P010 packing and the selected output consumer.

mod heif_to_p010;
pub mod types;

#[cfg(test)]
mod tests;

pub use heif_to_p010::HeifToP010Pipeline;
pub use types::{ConversionConfig, ConversionConfigBuilder, OutputTarget};
