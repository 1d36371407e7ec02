use std::io::{BufWriter, Write};

use tracing::debug;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::p010::types::PackedP010Image;

/// Writes a packed image as headerless P010: every luma word, then every
/// interleaved chroma word, all little-endian.
///
/// Geometry is not stored; readers must know width and height out of band.
pub struct RawP010Writer;

impl RawP010Writer {
    /// Serializes and consumes `image`, returning the number of bytes written.
    ///
    /// A writer that stops accepting bytes surfaces as an I/O error, never as
    /// a silently truncated file.
    pub fn write_packed(&self, image: PackedP010Image, output: &mut dyn Write) -> Result<u64> {
        debug!(
            "Writing raw P010: {}x{}, {} bytes",
            image.width(),
            image.height(),
            image.byte_len()
        );

        let expected = image.byte_len() as u64;
        let (luma, chroma) = image.into_planes();

        let mut out = BufWriter::new(output);
        for word in luma.iter().chain(&chroma) {
            out.write_all(&word.to_le_bytes())?;
        }
        out.flush()?;

        debug!("Raw P010 write complete");
        Ok(expected)
    }
}
