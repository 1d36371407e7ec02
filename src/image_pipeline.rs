//! Image processing pipeline module
//!
//! Converts decoded HEIF/AVIF YCbCr planes into P010, then either dumps the
//! packed planes as a raw file or feeds them to a gain-map encoder.

pub mod common;
pub mod conversions;
pub mod heif;
pub mod p010;
pub mod uhdr;

pub use common::{ConversionError, ExitCode, PipelineTimings, Result};

pub use heif::{Plane, PlanarImage, PlanarImageReader};
#[cfg(feature = "libheif")]
pub use heif::LibHeifReader;

pub use p010::{PackedP010Image, PlaneRepacker, RawP010Writer};

pub use uhdr::{
    ColorGamut, ColorParams, ColorRange, ColorTransfer, EncoderConfig, EncoderConfigBuilder,
    EncoderPreset, HdrEncoder, RawFormat, RawImageDescriptor, RawImageDescriptorBuilder,
};
#[cfg(feature = "ultrahdr")]
pub use uhdr::UltraHdrEncoder;

pub use conversions::{
    ConversionConfig, ConversionConfigBuilder, HeifToP010Pipeline, OutputTarget,
};
