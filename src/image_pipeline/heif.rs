//! HEIF/AVIF decoding module
//!
//! Planar YCbCr image types and the reader seam for the container decoder.

mod reader;
#[cfg(feature = "libheif")]
mod libheif_reader;
pub mod types;


pub use reader::PlanarImageReader;
#[cfg(feature = "libheif")]
pub use libheif_reader::LibHeifReader;
pub use types::{Plane, PlanarImage};
