//! Planar image types produced by the decoder

use crate::image_pipeline::common::error::{ConversionError, Result};

/// One sample plane with explicit geometry.
///
/// Samples are logical 16-bit values; row `y` starts at `y * stride`. The
/// constructor guarantees the buffer covers every visible sample, so
/// [`Plane::row`] never goes out of bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    width: usize,
    height: usize,
    stride: usize,
    samples: Vec<u16>,
}

impl Plane {
    /// Wraps `samples` as a `width`x`height` plane with `stride` samples per row.
    ///
    /// Zero dimensions are accepted here; the repacker is the one that
    /// rejects them.
    pub fn new(width: usize, height: usize, stride: usize, samples: Vec<u16>) -> Result<Self> {
        if stride < width {
            return Err(ConversionError::InvalidGeometry(format!(
                "stride {} is smaller than width {}",
                stride, width
            )));
        }

        let required = required_len(width, height, stride)?;
        if samples.len() < required {
            return Err(ConversionError::InvalidGeometry(format!(
                "plane {}x{} with stride {} needs {} samples, got {}",
                width,
                height,
                stride,
                required,
                samples.len()
            )));
        }

        Ok(Self {
            width,
            height,
            stride,
            samples,
        })
    }

    /// Builds a plane from a decoder buffer of little-endian 16-bit words.
    ///
    /// `byte_stride` is the distance between rows in bytes, as decoders report it.
    pub fn from_le_bytes(
        bytes: &[u8],
        width: usize,
        height: usize,
        byte_stride: usize,
    ) -> Result<Self> {
        if byte_stride % 2 != 0 {
            return Err(ConversionError::InvalidGeometry(format!(
                "byte stride {} is not a whole number of 16-bit samples",
                byte_stride
            )));
        }
        let stride = byte_stride / 2;
        if stride < width {
            return Err(ConversionError::InvalidGeometry(format!(
                "stride {} is smaller than width {}",
                stride, width
            )));
        }

        let required_bytes = required_len(width, height, stride)? * 2;
        if bytes.len() < required_bytes {
            return Err(ConversionError::InvalidGeometry(format!(
                "plane {}x{} with byte stride {} needs {} bytes, got {}",
                width,
                height,
                byte_stride,
                required_bytes,
                bytes.len()
            )));
        }

        let samples = bytes[..required_bytes]
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        Self::new(width, height, stride, samples)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Visible samples of row `y`, without stride padding.
    pub fn row(&self, y: usize) -> &[u16] {
        let start = y * self.stride;
        &self.samples[start..start + self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u16]> {
        (0..self.height).map(move |y| self.row(y))
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Ok(0);
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|n| n.checked_add(width))
        .ok_or_else(|| {
            ConversionError::InvalidGeometry(format!(
                "plane {}x{} with stride {} overflows",
                width, height, stride
            ))
        })
}

/// A decoded YCbCr 4:2:0 image as the decoder hands it over.
#[derive(Debug, Clone)]
pub struct PlanarImage {
    pub luma: Plane,
    pub chroma_blue: Plane,
    pub chroma_red: Plane,
    /// Significant bits per sample, shared by all three planes.
    pub bit_depth: u8,
}

impl PlanarImage {
    pub fn new(luma: Plane, chroma_blue: Plane, chroma_red: Plane, bit_depth: u8) -> Self {
        Self {
            luma,
            chroma_blue,
            chroma_red,
            bit_depth,
        }
    }

    pub fn width(&self) -> usize {
        self.luma.width()
    }

    pub fn height(&self) -> usize {
        self.luma.height()
    }
}
