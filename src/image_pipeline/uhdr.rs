//! Ultra HDR encoding module
//!
//! Color metadata, encoder configuration, the raw-image descriptor handed
//! to the gain-map encoder, and the encoder seam itself.

mod descriptor;
mod encoder;
#[cfg(feature = "ultrahdr")]
mod ultrahdr_encoder;
pub mod types;


pub use descriptor::{RawImageDescriptor, RawImageDescriptorBuilder};
pub use encoder::HdrEncoder;
#[cfg(feature = "ultrahdr")]
pub use ultrahdr_encoder::UltraHdrEncoder;
pub use types::{
    ColorGamut, ColorParams, ColorRange, ColorTransfer, EncoderConfig, EncoderConfigBuilder,
    EncoderPreset, RawFormat,
};
