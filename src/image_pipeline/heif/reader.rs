use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::heif::types::PlanarImage;

pub trait PlanarImageReader {
    fn read_planar(&self, data: &[u8]) -> Result<PlanarImage>;
}
