use tracing::{debug, instrument};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::heif::types::{Plane, PlanarImage};
use crate::image_pipeline::p010::types::{P010_SHIFT, PackedP010Image, TEN_BIT_MASK};

const SUPPORTED_BIT_DEPTH: u8 = 10;

/// Moves the low 10 bits of `sample` into the top of the word.
#[inline]
pub fn pack_sample(sample: u16) -> u16 {
    (sample & TEN_BIT_MASK) << P010_SHIFT
}

#[inline]
pub fn unpack_sample(word: u16) -> u16 {
    word >> P010_SHIFT
}

/// Converts planar 10-bit YCbCr 4:2:0 into P010.
///
/// Luma and chroma are independent; with `parallel` set they are packed on
/// the rayon pool at the same time.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaneRepacker {
    parallel: bool,
}

impl PlaneRepacker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = enable;
        self
    }

    /// Packs `image` into freshly allocated P010 planes.
    ///
    /// The bit depth is checked before any sample is touched, and geometry
    /// before anything is allocated. A failure produces no output at all.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn repack(&self, image: &PlanarImage) -> Result<PackedP010Image> {
        if image.bit_depth != SUPPORTED_BIT_DEPTH {
            return Err(ConversionError::UnsupportedBitDepth(image.bit_depth));
        }
        validate_geometry(image)?;

        let (luma, chroma) = if self.parallel {
            rayon::join(
                || pack_luma(&image.luma),
                || pack_chroma(&image.chroma_blue, &image.chroma_red),
            )
        } else {
            (
                pack_luma(&image.luma),
                pack_chroma(&image.chroma_blue, &image.chroma_red),
            )
        };

        debug!(
            luma_words = luma.len(),
            chroma_words = chroma.len(),
            "Repacked planes to P010"
        );

        PackedP010Image::from_parts(image.luma.width(), image.luma.height(), luma, chroma)
    }
}

fn validate_geometry(image: &PlanarImage) -> Result<()> {
    let (width, height) = (image.luma.width(), image.luma.height());
    if width == 0 || height == 0 {
        return Err(ConversionError::InvalidGeometry(format!(
            "luma plane is {}x{}",
            width, height
        )));
    }

    let expected = (width.div_ceil(2), height.div_ceil(2));
    for (name, plane) in [("Cb", &image.chroma_blue), ("Cr", &image.chroma_red)] {
        if (plane.width(), plane.height()) != expected {
            return Err(ConversionError::InvalidGeometry(format!(
                "{} plane is {}x{}, expected {}x{} for 4:2:0 luma {}x{}",
                name,
                plane.width(),
                plane.height(),
                expected.0,
                expected.1,
                width,
                height
            )));
        }
    }

    Ok(())
}

// Reads through the source stride, writes contiguously.
fn pack_luma(plane: &Plane) -> Vec<u16> {
    let mut packed = Vec::with_capacity(plane.width() * plane.height());
    for row in plane.rows() {
        packed.extend(row.iter().map(|&s| pack_sample(s)));
    }
    packed
}

// U before V in every pair.
fn pack_chroma(blue: &Plane, red: &Plane) -> Vec<u16> {
    let mut packed = Vec::with_capacity(2 * blue.width() * blue.height());
    for (blue_row, red_row) in blue.rows().zip(red.rows()) {
        for (&u, &v) in blue_row.iter().zip(red_row) {
            packed.push(pack_sample(u));
            packed.push(pack_sample(v));
        }
    }
    packed
}
