//! Command line definition and its mapping onto the conversion config

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::warn;

use crate::image_pipeline::{
    ColorGamut, ColorParams, ColorRange, ColorTransfer, ConversionConfig, EncoderConfig,
    OutputTarget, Result,
};

/// Convert a 10-bit HEIF/AVIF image to raw P010 or an Ultra HDR JPEG
#[derive(Parser, Debug)]
#[command(name = "heif2p010", version)]
pub struct Cli {
    /// HEIF or AVIF file to convert
    pub input_file: PathBuf,

    /// Output path; defaults to the input name with a .p010 or .jpg extension
    pub output_file: Option<PathBuf>,

    /// Write the packed P010 planes as a raw file instead of encoding a JPEG
    #[arg(short = 'p', long = "p010")]
    pub raw_p010: bool,

    /// Color gamut: 0 = BT.709, 1 = Display P3, 2 = BT.2100
    #[arg(short = 'c', long = "gamut", allow_negative_numbers = true)]
    pub gamut: Option<i32>,

    /// Color range: 0 = limited, 1 = full
    #[arg(short = 'r', long = "range", allow_negative_numbers = true)]
    pub range: Option<i32>,

    /// Transfer function: 0 = linear, 1 = HLG, 2 = PQ, 3 = sRGB
    #[arg(short = 't', long = "transfer", allow_negative_numbers = true)]
    pub transfer: Option<i32>,

    /// Base image JPEG quality
    #[arg(short = 'q', long = "quality", default_value_t = 95, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub base_quality: u8,

    /// Gain map JPEG quality
    #[arg(short = 'g', long = "gain-map-quality", default_value_t = 95, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub gain_map_quality: u8,

    /// Debug logging and a per-stage timing summary
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn target(&self) -> OutputTarget {
        if self.raw_p010 {
            OutputTarget::RawFile
        } else {
            OutputTarget::EncoderDescriptor
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_file
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input_file, self.target()))
    }

    /// Resolves color codes and qualities into a [`ConversionConfig`].
    ///
    /// Color fields left unset fall back to [`ColorParams::default`] with a
    /// warning, since the source's real color description is not inspected.
    pub fn conversion_config(&self) -> Result<ConversionConfig> {
        let defaults = ColorParams::default();
        let target = self.target();
        let encoding = target == OutputTarget::EncoderDescriptor;

        let gamut = match self.gamut {
            Some(code) => ColorGamut::try_from(code)?,
            None => {
                if encoding {
                    warn!("No color gamut given (-c), assuming {}", defaults.gamut);
                }
                defaults.gamut
            }
        };
        let range = match self.range {
            Some(code) => ColorRange::try_from(code)?,
            None => defaults.range,
        };
        let transfer = match self.transfer {
            Some(code) => ColorTransfer::try_from(code)?,
            None => {
                if encoding {
                    warn!("No transfer function given (-t), assuming {}", defaults.transfer);
                }
                defaults.transfer
            }
        };

        let encoder = EncoderConfig::builder()
            .base_quality(self.base_quality)
            .gain_map_quality(self.gain_map_quality)
            .build();

        Ok(ConversionConfig::builder()
            .target(target)
            .color(ColorParams::new(gamut, range, transfer))
            .encoder(encoder)
            .parallel_planes(true)
            .build())
    }
}

/// `photo.heic` becomes `photo.p010` or `photo.jpg`, next to the input.
pub fn default_output_path(input: &Path, target: OutputTarget) -> PathBuf {
    input.with_extension(target.extension())
}
