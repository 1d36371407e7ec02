//! Color metadata and encoder configuration types
//!
//! Integer codes match the gain-map encoder's C enumerations, which is also
//! what the command line accepts.

use std::fmt;

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Pixel layout of a raw image handed to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawFormat {
    /// 10-bit YCbCr 4:2:0, luma plane plus interleaved UV plane.
    YCbCrP010,
}

impl RawFormat {
    pub fn name(self) -> &'static str {
        match self {
            RawFormat::YCbCrP010 => "24-bits-per-pixel YCbCr P010",
        }
    }
}

/// Color primaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorGamut {
    /// BT.709 / sRGB
    Bt709,
    /// Display P3
    DisplayP3,
    /// BT.2100 (BT.2020 primaries)
    Bt2100,
}

/// Sample value range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRange {
    /// Video range (64..=940 for 10-bit luma)
    Limited,
    /// Full range (0..=1023)
    Full,
}

/// Transfer function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTransfer {
    Linear,
    /// Hybrid Log-Gamma
    Hlg,
    /// Perceptual Quantizer (SMPTE ST 2084)
    Pq,
    Srgb,
}

impl TryFrom<i32> for ColorGamut {
    type Error = ConversionError;

    fn try_from(code: i32) -> Result<Self> {
        match code {
            0 => Ok(ColorGamut::Bt709),
            1 => Ok(ColorGamut::DisplayP3),
            2 => Ok(ColorGamut::Bt2100),
            _ => Err(ConversionError::InvalidOption(format!(
                "color gamut {} (expected 0 = BT.709, 1 = Display P3, 2 = BT.2100)",
                code
            ))),
        }
    }
}

impl TryFrom<i32> for ColorRange {
    type Error = ConversionError;

    fn try_from(code: i32) -> Result<Self> {
        match code {
            0 => Ok(ColorRange::Limited),
            1 => Ok(ColorRange::Full),
            _ => Err(ConversionError::InvalidOption(format!(
                "color range {} (expected 0 = limited, 1 = full)",
                code
            ))),
        }
    }
}

impl TryFrom<i32> for ColorTransfer {
    type Error = ConversionError;

    fn try_from(code: i32) -> Result<Self> {
        match code {
            0 => Ok(ColorTransfer::Linear),
            1 => Ok(ColorTransfer::Hlg),
            2 => Ok(ColorTransfer::Pq),
            3 => Ok(ColorTransfer::Srgb),
            _ => Err(ConversionError::InvalidOption(format!(
                "color transfer {} (expected 0 = linear, 1 = HLG, 2 = PQ, 3 = sRGB)",
                code
            ))),
        }
    }
}

impl fmt::Display for ColorGamut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorGamut::Bt709 => "BT.709",
            ColorGamut::DisplayP3 => "Display P3",
            ColorGamut::Bt2100 => "BT.2100",
        })
    }
}

impl fmt::Display for ColorRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorRange::Limited => "limited",
            ColorRange::Full => "full",
        })
    }
}

impl fmt::Display for ColorTransfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorTransfer::Linear => "linear",
            ColorTransfer::Hlg => "HLG",
            ColorTransfer::Pq => "PQ",
            ColorTransfer::Srgb => "sRGB",
        })
    }
}

/// Color metadata attached to the encoder input.
///
/// Passed through to the encoder without interpretation. The default is the
/// BT.2100 / limited / HLG combination that camera HEIF files usually carry;
/// callers that know their source should set all three fields explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorParams {
    pub gamut: ColorGamut,
    pub range: ColorRange,
    pub transfer: ColorTransfer,
}

impl ColorParams {
    pub fn new(gamut: ColorGamut, range: ColorRange, transfer: ColorTransfer) -> Self {
        Self {
            gamut,
            range,
            transfer,
        }
    }

    /// BT.2100 primaries, limited range, HLG transfer.
    pub fn hlg_bt2100() -> Self {
        Self::new(ColorGamut::Bt2100, ColorRange::Limited, ColorTransfer::Hlg)
    }
}

impl Default for ColorParams {
    fn default() -> Self {
        Self::hlg_bt2100()
    }
}

/// Encoder usage hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderPreset {
    Realtime,
    BestQuality,
}

/// Configuration for gain-map encoding
#[derive(Debug, Clone, PartialEq)]
pub struct EncoderConfig {
    /// JPEG quality of the base image, 0-100
    pub base_quality: u8,
    /// JPEG quality of the gain map image, 0-100
    pub gain_map_quality: u8,
    /// Per-channel gain map instead of a single luminance map
    pub multi_channel_gain_map: bool,
    /// Downscale factor of the gain map relative to the base image
    pub gain_map_scale_factor: u32,
    /// Gamma applied when encoding gain map values
    pub gain_map_gamma: f32,
    pub preset: EncoderPreset,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            base_quality: 95,
            gain_map_quality: 95,
            multi_channel_gain_map: false,
            gain_map_scale_factor: 1,
            gain_map_gamma: 1.0,
            preset: EncoderPreset::BestQuality,
        }
    }
}

impl EncoderConfig {
    pub fn builder() -> EncoderConfigBuilder {
        EncoderConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_quality > 100 {
            return Err(ConversionError::EncoderSetupFailure(format!(
                "base quality {} is outside 0-100",
                self.base_quality
            )));
        }
        if self.gain_map_quality > 100 {
            return Err(ConversionError::EncoderSetupFailure(format!(
                "gain map quality {} is outside 0-100",
                self.gain_map_quality
            )));
        }
        if self.gain_map_scale_factor == 0 {
            return Err(ConversionError::EncoderSetupFailure(
                "gain map scale factor must be at least 1".to_string(),
            ));
        }
        if !(self.gain_map_gamma > 0.0 && self.gain_map_gamma.is_finite()) {
            return Err(ConversionError::EncoderSetupFailure(format!(
                "gain map gamma {} must be a positive number",
                self.gain_map_gamma
            )));
        }
        Ok(())
    }
}

/// Builder for EncoderConfig
#[derive(Default)]
pub struct EncoderConfigBuilder {
    base_quality: Option<u8>,
    gain_map_quality: Option<u8>,
    multi_channel_gain_map: Option<bool>,
    gain_map_scale_factor: Option<u32>,
    gain_map_gamma: Option<f32>,
    preset: Option<EncoderPreset>,
}

impl EncoderConfigBuilder {
    pub fn base_quality(mut self, quality: u8) -> Self {
        self.base_quality = Some(quality);
        self
    }

    pub fn gain_map_quality(mut self, quality: u8) -> Self {
        self.gain_map_quality = Some(quality);
        self
    }

    pub fn multi_channel_gain_map(mut self, enable: bool) -> Self {
        self.multi_channel_gain_map = Some(enable);
        self
    }

    pub fn gain_map_scale_factor(mut self, factor: u32) -> Self {
        self.gain_map_scale_factor = Some(factor);
        self
    }

    pub fn gain_map_gamma(mut self, gamma: f32) -> Self {
        self.gain_map_gamma = Some(gamma);
        self
    }

    pub fn preset(mut self, preset: EncoderPreset) -> Self {
        self.preset = Some(preset);
        self
    }

    pub fn build(self) -> EncoderConfig {
        let default = EncoderConfig::default();
        EncoderConfig {
            base_quality: self.base_quality.unwrap_or(default.base_quality),
            gain_map_quality: self.gain_map_quality.unwrap_or(default.gain_map_quality),
            multi_channel_gain_map: self
                .multi_channel_gain_map
                .unwrap_or(default.multi_channel_gain_map),
            gain_map_scale_factor: self
                .gain_map_scale_factor
                .unwrap_or(default.gain_map_scale_factor),
            gain_map_gamma: self.gain_map_gamma.unwrap_or(default.gain_map_gamma),
            preset: self.preset.unwrap_or(default.preset),
        }
    }
}
