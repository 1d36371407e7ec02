//! Planar image reader backed by libheif.
//!
//! Opens a HEIF/AVIF container from memory, selects the primary image and
//! decodes it to YCbCr 4:2:0 without any color conversion, so the planes
//! reach the repacker exactly as the codec produced them.

use libheif_rs::{Chroma, ColorSpace, HeifContext, LibHeif};
use tracing::{debug, warn};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::heif::reader::PlanarImageReader;
use crate::image_pipeline::heif::types::{Plane, PlanarImage};

/// The only luma bit depth that can be packed as P010.
const SUPPORTED_BIT_DEPTH: u8 = 10;

/// Reader that owns a libheif instance for its whole lifetime.
///
/// The library is initialised when the reader is created and released when
/// it is dropped.
pub struct LibHeifReader {
    lib: LibHeif,
}

impl LibHeifReader {
    pub fn new() -> Self {
        Self { lib: LibHeif::new() }
    }
}

impl Default for LibHeifReader {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanarImageReader for LibHeifReader {
    /// Decodes the primary image of a HEIF/AVIF container.
    ///
    /// The luma bit depth is checked on the image handle before anything is
    /// decoded; sources that are not 10-bit fail with
    /// [`ConversionError::UnsupportedBitDepth`].
    fn read_planar(&self, data: &[u8]) -> Result<PlanarImage> {
        debug!("Opening HEIF container, {} bytes", data.len());

        let ctx = HeifContext::read_from_bytes(data)
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        let top_level = ctx.number_of_top_level_images();
        if top_level > 1 {
            warn!(
                "Container holds {} top-level images, converting the primary one only",
                top_level
            );
        }

        let handle = ctx
            .primary_image_handle()
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        let bit_depth = handle.luma_bits_per_pixel();
        debug!(
            "Primary image: {}x{}, {} bits per luma sample",
            handle.width(),
            handle.height(),
            bit_depth
        );
        if bit_depth != SUPPORTED_BIT_DEPTH {
            return Err(ConversionError::UnsupportedBitDepth(bit_depth));
        }

        let image = self
            .lib
            .decode(&handle, ColorSpace::YCbCr(Chroma::C420), None)
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        let planes = image.planes();
        let missing = |name: &str| ConversionError::DecodeError(format!("decoded image has no {} plane", name));

        let y = planes.y.ok_or_else(|| missing("Y"))?;
        let cb = planes.cb.ok_or_else(|| missing("Cb"))?;
        let cr = planes.cr.ok_or_else(|| missing("Cr"))?;

        let luma = Plane::from_le_bytes(y.data, y.width as usize, y.height as usize, y.stride)?;
        let chroma_blue = Plane::from_le_bytes(cb.data, cb.width as usize, cb.height as usize, cb.stride)?;
        let chroma_red = Plane::from_le_bytes(cr.data, cr.width as usize, cr.height as usize, cr.stride)?;

        debug!(
            "Planes: Y {}x{} stride {}, Cb/Cr {}x{} stride {}/{}",
            luma.width(),
            luma.height(),
            luma.stride(),
            chroma_blue.width(),
            chroma_blue.height(),
            chroma_blue.stride(),
            chroma_red.stride()
        );

        Ok(PlanarImage::new(luma, chroma_blue, chroma_red, bit_depth))
    }
}
