//! Packed P010 image type

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Left shift that moves a 10-bit sample into the top of a 16-bit word.
pub const P010_SHIFT: u32 = 6;

/// Significant bits of a 10-bit source sample.
pub const TEN_BIT_MASK: u16 = 0x03FF;

/// Luma and interleaved chroma planes in P010 layout, without stride padding.
///
/// Words hold logical values; byte order is only chosen when the image is
/// serialized. The image is moved into exactly one consumer and dropped there.
#[derive(Debug, PartialEq, Eq)]
pub struct PackedP010Image {
    width: usize,
    height: usize,
    chroma_width: usize,
    chroma_height: usize,
    luma: Vec<u16>,
    chroma: Vec<u16>,
}

impl PackedP010Image {
    /// Assembles an image from already packed planes.
    ///
    /// `luma` must hold `width * height` words and `chroma` must hold
    /// `2 * ceil(width / 2) * ceil(height / 2)` words.
    pub fn from_parts(width: usize, height: usize, luma: Vec<u16>, chroma: Vec<u16>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidGeometry(format!(
                "packed image {}x{} has no samples",
                width, height
            )));
        }

        let chroma_width = width.div_ceil(2);
        let chroma_height = height.div_ceil(2);

        if luma.len() != width * height {
            return Err(ConversionError::InvalidGeometry(format!(
                "luma plane has {} words, expected {}",
                luma.len(),
                width * height
            )));
        }
        if chroma.len() != 2 * chroma_width * chroma_height {
            return Err(ConversionError::InvalidGeometry(format!(
                "chroma plane has {} words, expected {}",
                chroma.len(),
                2 * chroma_width * chroma_height
            )));
        }

        Ok(Self {
            width,
            height,
            chroma_width,
            chroma_height,
            luma,
            chroma,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn chroma_width(&self) -> usize {
        self.chroma_width
    }

    pub fn chroma_height(&self) -> usize {
        self.chroma_height
    }

    pub fn luma(&self) -> &[u16] {
        &self.luma
    }

    /// Interleaved `[U0, V0, U1, V1, ...]` words, row-major over the chroma grid.
    pub fn chroma(&self) -> &[u16] {
        &self.chroma
    }

    /// Size of the serialized image in bytes.
    pub fn byte_len(&self) -> usize {
        2 * (self.luma.len() + self.chroma.len())
    }

    /// Luma words followed by chroma words, each little-endian.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.byte_len());
        for word in self.luma.iter().chain(&self.chroma) {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    pub fn into_planes(self) -> (Vec<u16>, Vec<u16>) {
        (self.luma, self.chroma)
    }
}
