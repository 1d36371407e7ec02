//! Conversion configuration types

use crate::image_pipeline::uhdr::types::{ColorParams, EncoderConfig};

/// Consumer of the packed P010 planes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    /// Headerless P010 dump of the packed planes
    RawFile,
    /// Raw-image descriptor fed to the gain-map encoder, producing a JPEG
    EncoderDescriptor,
}

impl OutputTarget {
    /// File extension used when no output path is given.
    pub fn extension(self) -> &'static str {
        match self {
            OutputTarget::RawFile => "p010",
            OutputTarget::EncoderDescriptor => "jpg",
        }
    }
}

/// Configuration for HEIF to P010 / Ultra HDR conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    pub target: OutputTarget,
    /// Color metadata for the encoder; unused for raw output
    pub color: ColorParams,
    pub encoder: EncoderConfig,
    /// Pack luma and chroma concurrently
    pub parallel_planes: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            target: OutputTarget::EncoderDescriptor,
            color: ColorParams::default(),
            encoder: EncoderConfig::default(),
            parallel_planes: false,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    target: Option<OutputTarget>,
    color: Option<ColorParams>,
    encoder: Option<EncoderConfig>,
    parallel_planes: Option<bool>,
}

impl ConversionConfigBuilder {
    pub fn target(mut self, target: OutputTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn color(mut self, color: ColorParams) -> Self {
        self.color = Some(color);
        self
    }

    pub fn encoder(mut self, encoder: EncoderConfig) -> Self {
        self.encoder = Some(encoder);
        self
    }

    pub fn parallel_planes(mut self, enable: bool) -> Self {
        self.parallel_planes = Some(enable);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            target: self.target.unwrap_or(default.target),
            color: self.color.unwrap_or(default.color),
            encoder: self.encoder.unwrap_or(default.encoder),
            parallel_planes: self.parallel_planes.unwrap_or(default.parallel_planes),
        }
    }
}
