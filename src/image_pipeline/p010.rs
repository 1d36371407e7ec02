//! P010 packing module
//!
//! Converts planar 10-bit YCbCr into P010 layout and serializes the result
//! as a headerless raw file.

mod raw_writer;
mod repacker;
pub mod types;

#[cfg(test)]
mod proptests;

pub use raw_writer::RawP010Writer;
pub use repacker::{PlaneRepacker, pack_sample, unpack_sample};
pub use types::{PackedP010Image, P010_SHIFT, TEN_BIT_MASK};
