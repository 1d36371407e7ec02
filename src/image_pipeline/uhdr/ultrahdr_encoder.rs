//! Gain-map encoder backed by the `ultrahdr-rs` crate.

use tracing::{debug, warn};
use ultrahdr::{
    ColorGamut as UhdrGamut, ColorTransfer as UhdrTransfer, Encoder, PixelFormat, RawImage,
};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::uhdr::descriptor::RawImageDescriptor;
use crate::image_pipeline::uhdr::encoder::HdrEncoder;
use crate::image_pipeline::uhdr::types::{
    ColorGamut, ColorRange, ColorTransfer, EncoderConfig, EncoderPreset,
};

pub struct UltraHdrEncoder;

impl UltraHdrEncoder {
    pub(super) fn gamut(gamut: ColorGamut) -> UhdrGamut {
        match gamut {
            ColorGamut::Bt709 => UhdrGamut::Bt709,
            ColorGamut::DisplayP3 => UhdrGamut::DisplayP3,
            ColorGamut::Bt2100 => UhdrGamut::Bt2100,
        }
    }

    pub(super) fn transfer(transfer: ColorTransfer) -> UhdrTransfer {
        match transfer {
            ColorTransfer::Linear => UhdrTransfer::Linear,
            ColorTransfer::Hlg => UhdrTransfer::Hlg,
            ColorTransfer::Pq => UhdrTransfer::Pq,
            ColorTransfer::Srgb => UhdrTransfer::Srgb,
        }
    }

    fn check_supported(descriptor: &RawImageDescriptor, config: &EncoderConfig) -> Result<u8> {
        config.validate()?;

        if descriptor.width() % 2 != 0 || descriptor.height() % 2 != 0 {
            return Err(ConversionError::EncoderSetupFailure(format!(
                "P010 input must have even dimensions, got {}x{}",
                descriptor.width(),
                descriptor.height()
            )));
        }
        if config.multi_channel_gain_map {
            return Err(ConversionError::EncoderSetupFailure(
                "multi-channel gain maps are not supported".to_string(),
            ));
        }
        if config.gain_map_gamma != 1.0 {
            return Err(ConversionError::EncoderSetupFailure(format!(
                "gain map gamma {} is not supported, only 1.0",
                config.gain_map_gamma
            )));
        }

        u8::try_from(config.gain_map_scale_factor).map_err(|_| {
            ConversionError::EncoderSetupFailure(format!(
                "gain map scale factor {} exceeds 255",
                config.gain_map_scale_factor
            ))
        })
    }
}

impl HdrEncoder for UltraHdrEncoder {
    fn encode(&self, descriptor: RawImageDescriptor, config: &EncoderConfig) -> Result<Vec<u8>> {
        let scale = Self::check_supported(&descriptor, config)?;
        let color = descriptor.color();

        if color.range == ColorRange::Full {
            warn!("Full-range P010 is encoded as-is; the encoder assumes limited range");
        }
        if config.preset == EncoderPreset::Realtime {
            debug!("Realtime preset requested; encoder has a single quality mode");
        }

        debug!(
            "Encoding {}x{} {} with quality {}/{} and gain map scale {}",
            descriptor.width(),
            descriptor.height(),
            descriptor.format().name(),
            config.base_quality,
            config.gain_map_quality,
            scale
        );

        let width = descriptor.width() as u32;
        let height = descriptor.height() as u32;
        let data = descriptor.to_le_bytes();
        drop(descriptor);

        let image = RawImage::from_data(
            width,
            height,
            PixelFormat::P010,
            Self::gamut(color.gamut),
            Self::transfer(color.transfer),
            data,
        )
        .map_err(|e| ConversionError::EncoderSetupFailure(e.to_string()))?;

        let mut encoder = Encoder::new();
        encoder
            .set_hdr_image(image)
            .set_quality(config.base_quality, config.gain_map_quality)
            .set_gainmap_scale(scale);

        let jpeg = encoder
            .encode()
            .map_err(|e| ConversionError::EncoderEncodeFailure(e.to_string()))?;

        debug!("Encoded Ultra HDR JPEG, {} bytes", jpeg.len());
        Ok(jpeg)
    }
}
