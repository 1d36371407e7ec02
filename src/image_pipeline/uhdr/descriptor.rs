use tracing::debug;

use crate::image_pipeline::p010::types::PackedP010Image;
use crate::image_pipeline::uhdr::types::{ColorParams, RawFormat};

/// Raw P010 image as the gain-map encoder consumes it.
///
/// Owns the packed planes; handing the descriptor to an encoder moves them.
/// Both strides are in samples and equal the luma width: each chroma row
/// holds `width / 2` UV pairs.
#[derive(Debug)]
pub struct RawImageDescriptor {
    format: RawFormat,
    color: ColorParams,
    width: usize,
    height: usize,
    luma_stride: usize,
    chroma_stride: usize,
    image: PackedP010Image,
}

impl RawImageDescriptor {
    pub fn format(&self) -> RawFormat {
        self.format
    }

    pub fn color(&self) -> ColorParams {
        self.color
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn luma_stride(&self) -> usize {
        self.luma_stride
    }

    pub fn chroma_stride(&self) -> usize {
        self.chroma_stride
    }

    pub fn luma(&self) -> &[u16] {
        self.image.luma()
    }

    pub fn chroma(&self) -> &[u16] {
        self.image.chroma()
    }

    /// Both planes as one little-endian buffer, luma first.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.image.to_le_bytes()
    }

    pub fn into_packed(self) -> PackedP010Image {
        self.image
    }
}

/// Wraps packed planes with geometry and color metadata.
pub struct RawImageDescriptorBuilder;

impl RawImageDescriptorBuilder {
    /// Never fails: geometry comes from an image the repacker already
    /// validated, and color metadata is passed through as given.
    pub fn build(image: PackedP010Image, color: ColorParams) -> RawImageDescriptor {
        let width = image.width();
        let height = image.height();

        debug!(
            "Descriptor: {} {}x{}, gamut {}, range {}, transfer {}",
            RawFormat::YCbCrP010.name(),
            width,
            height,
            color.gamut,
            color.range,
            color.transfer
        );

        RawImageDescriptor {
            format: RawFormat::YCbCrP010,
            color,
            width,
            height,
            luma_stride: width,
            chroma_stride: width,
            image,
        }
    }
}
