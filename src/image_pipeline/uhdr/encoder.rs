use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::uhdr::descriptor::RawImageDescriptor;
use crate::image_pipeline::uhdr::types::EncoderConfig;

pub trait HdrEncoder {
    /// Encodes `descriptor` into a gain-map JPEG. The descriptor and its
    /// planes are released when the call returns, whether it succeeded or not.
    fn encode(&self, descriptor: RawImageDescriptor, config: &EncoderConfig) -> Result<Vec<u8>>;
}
