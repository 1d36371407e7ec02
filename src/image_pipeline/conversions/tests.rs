use std::io::Cursor;
use std::sync::{Arc, Mutex};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::conversions::{ConversionConfig, HeifToP010Pipeline, OutputTarget};
use crate::image_pipeline::heif::{Plane, PlanarImage, PlanarImageReader};
use crate::image_pipeline::uhdr::{
    ColorGamut, ColorParams, ColorRange, ColorTransfer, EncoderConfig, HdrEncoder,
    RawImageDescriptor,
};

struct MockReader {
    should_fail: bool,
    mock_data: Option<PlanarImage>,
}

fn mock_image(width: usize, height: usize, bit_depth: u8) -> PlanarImage {
    let (cw, ch) = (width.div_ceil(2), height.div_ceil(2));
    PlanarImage::new(
        Plane::new(width, height, width, vec![100; width * height]).unwrap(),
        Plane::new(cw, ch, cw, vec![50; cw * ch]).unwrap(),
        Plane::new(cw, ch, cw, vec![60; cw * ch]).unwrap(),
        bit_depth,
    )
}

impl PlanarImageReader for MockReader {
    fn read_planar(&self, _data: &[u8]) -> Result<PlanarImage> {
        if self.should_fail {
            return Err(ConversionError::DecodeError("Mock decode error".to_string()));
        }
        Ok(self.mock_data.clone().unwrap_or_else(|| mock_image(4, 4, 10)))
    }
}

#[derive(Debug, Clone)]
struct EncodedCall {
    width: usize,
    height: usize,
    chroma_stride: usize,
    color: ColorParams,
    chroma_head: Vec<u16>,
}

struct MockEncoder {
    should_fail: bool,
    calls: Arc<Mutex<Vec<EncodedCall>>>,
}

impl MockEncoder {
    fn new(should_fail: bool) -> (Self, Arc<Mutex<Vec<EncodedCall>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                should_fail,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

impl HdrEncoder for MockEncoder {
    fn encode(&self, descriptor: RawImageDescriptor, _config: &EncoderConfig) -> Result<Vec<u8>> {
        if self.should_fail {
            return Err(ConversionError::EncoderEncodeFailure(
                "uhdr: gain map computation failed".to_string(),
            ));
        }
        self.calls.lock().unwrap().push(EncodedCall {
            width: descriptor.width(),
            height: descriptor.height(),
            chroma_stride: descriptor.chroma_stride(),
            color: descriptor.color(),
            chroma_head: descriptor.chroma()[..2].to_vec(),
        });
        Ok(b"\xFF\xD8mock jpeg\xFF\xD9".to_vec())
    }
}

fn reader(mock_data: Option<PlanarImage>) -> MockReader {
    MockReader {
        should_fail: false,
        mock_data,
    }
}

#[test]
fn test_config_builder() {
    let color = ColorParams::new(ColorGamut::Bt709, ColorRange::Full, ColorTransfer::Pq);
    let config = ConversionConfig::builder()
        .target(OutputTarget::RawFile)
        .color(color)
        .parallel_planes(true)
        .build();

    assert_eq!(config.target, OutputTarget::RawFile);
    assert_eq!(config.color, color);
    assert!(config.parallel_planes);
    assert_eq!(config.encoder, EncoderConfig::default());
}

#[test]
fn test_raw_target_writes_p010_without_encoding() {
    let (encoder, calls) = MockEncoder::new(false);
    let config = ConversionConfig::builder()
        .target(OutputTarget::RawFile)
        .build();
    let pipeline = HeifToP010Pipeline::with_custom(reader(None), encoder, config);

    let mut output = Cursor::new(Vec::new());
    pipeline.convert(b"fake heif data", &mut output).unwrap();

    let bytes = output.into_inner();
    assert_eq!(bytes.len(), 2 * 16 + 2 * 8);
    // First luma word: 100 << 6 = 6400 = 0x1900
    assert_eq!(&bytes[..2], &[0x00, 0x19]);
    // First chroma pair: 50 << 6 = 0x0C80, 60 << 6 = 0x0F00
    assert_eq!(&bytes[32..36], &[0x80, 0x0C, 0x00, 0x0F]);
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn test_encoder_target_passes_descriptor() {
    let (encoder, calls) = MockEncoder::new(false);
    let color = ColorParams::new(ColorGamut::DisplayP3, ColorRange::Limited, ColorTransfer::Pq);
    let config = ConversionConfig::builder()
        .target(OutputTarget::EncoderDescriptor)
        .color(color)
        .build();
    let pipeline = HeifToP010Pipeline::with_custom(reader(Some(mock_image(6, 2, 10))), encoder, config);

    let mut output = Cursor::new(Vec::new());
    let timings = pipeline
        .convert_with_timings(b"fake heif data", &mut output)
        .unwrap();

    assert_eq!(output.into_inner(), b"\xFF\xD8mock jpeg\xFF\xD9".to_vec());
    assert!(timings.get_step("encode_uhdr").is_some());
    assert!(timings.get_step("write_p010").is_none());

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].width, 6);
    assert_eq!(calls[0].height, 2);
    assert_eq!(calls[0].chroma_stride, 6);
    assert_eq!(calls[0].color, color);
    assert_eq!(calls[0].chroma_head, vec![3200, 3840]);
}

#[test]
fn test_reader_failure() {
    let (encoder, _) = MockEncoder::new(false);
    let pipeline = HeifToP010Pipeline::with_custom(
        MockReader {
            should_fail: true,
            mock_data: None,
        },
        encoder,
        ConversionConfig::default(),
    );

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake heif data", &mut output);

    assert!(matches!(result, Err(ConversionError::DecodeError(_))));
}

#[test]
fn test_encoder_failure_is_surfaced_verbatim() {
    let (encoder, _) = MockEncoder::new(true);
    let pipeline =
        HeifToP010Pipeline::with_custom(reader(None), encoder, ConversionConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake heif data", &mut output);

    match result {
        Err(ConversionError::EncoderEncodeFailure(detail)) => {
            assert_eq!(detail, "uhdr: gain map computation failed")
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(output.into_inner().is_empty());
}

#[test]
fn test_eight_bit_source_is_rejected() {
    let (encoder, calls) = MockEncoder::new(false);
    let pipeline = HeifToP010Pipeline::with_custom(
        reader(Some(mock_image(4, 4, 8))),
        encoder,
        ConversionConfig::default(),
    );

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake heif data", &mut output);

    assert!(matches!(result, Err(ConversionError::UnsupportedBitDepth(8))));
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn test_invalid_encoder_config_fails_before_decoding() {
    let (encoder, _) = MockEncoder::new(false);
    let config = ConversionConfig::builder()
        .encoder(EncoderConfig::builder().gain_map_quality(150).build())
        .build();
    let pipeline = HeifToP010Pipeline::with_custom(
        MockReader {
            should_fail: true,
            mock_data: None,
        },
        encoder,
        config,
    );

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake heif data", &mut output);

    assert!(matches!(result, Err(ConversionError::EncoderSetupFailure(_))));
}

#[test]
fn test_convert_file_writes_raw_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.heic");
    let output = dir.path().join("photo.p010");
    std::fs::write(&input, b"fake heif data").unwrap();

    let (encoder, _) = MockEncoder::new(false);
    let config = ConversionConfig::builder()
        .target(OutputTarget::RawFile)
        .parallel_planes(true)
        .build();
    let pipeline = HeifToP010Pipeline::with_custom(reader(None), encoder, config);

    let timings = pipeline.convert_file_with_timings(&input, &output).unwrap();

    assert_eq!(std::fs::metadata(&output).unwrap().len(), 2 * 16 + 2 * 8);
    assert!(timings.get_step("read_input_file").is_some());
    assert!(timings.get_step("repack_p010").is_some());
}

#[test]
fn test_convert_file_removes_output_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.heic");
    let output = dir.path().join("photo.jpg");
    std::fs::write(&input, b"fake heif data").unwrap();

    let (encoder, _) = MockEncoder::new(true);
    let pipeline =
        HeifToP010Pipeline::with_custom(reader(None), encoder, ConversionConfig::default());

    let result = pipeline.convert_file(&input, &output);

    assert!(matches!(result, Err(ConversionError::EncoderEncodeFailure(_))));
    assert!(!output.exists());
}

#[test]
fn test_missing_input_is_input_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let (encoder, _) = MockEncoder::new(false);
    let pipeline =
        HeifToP010Pipeline::with_custom(reader(None), encoder, ConversionConfig::default());

    let result = pipeline.convert_file(dir.path().join("missing.heic"), dir.path().join("out.jpg"));

    assert!(matches!(result, Err(ConversionError::InputReadError(_))));
}

#[test]
fn test_set_config() {
    let (encoder, _) = MockEncoder::new(false);
    let mut pipeline =
        HeifToP010Pipeline::with_custom(reader(None), encoder, ConversionConfig::default());

    pipeline.set_config(ConversionConfig::builder().target(OutputTarget::RawFile).build());

    assert_eq!(pipeline.config().target, OutputTarget::RawFile);
}

#[test]
fn test_default_output_name_colliding_with_input_is_rejected() {
    use clap::Parser;

    use crate::cli::Cli;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("shot.jpg");
    std::fs::write(&input, b"original jpeg").unwrap();

    let cli = Cli::try_parse_from(["heif2p010", input.to_str().unwrap()]).unwrap();
    let output = cli.output_path();

    let (encoder, _) = MockEncoder::new(false);
    let pipeline = HeifToP010Pipeline::with_custom(
        MockReader {
            should_fail: true,
            mock_data: None,
        },
        encoder,
        ConversionConfig::default(),
    );

    let result = pipeline.convert_file(&input, &output);

    match result {
        Err(e @ ConversionError::InvalidOption(_)) => {
            assert_eq!(e.exit_code(), crate::image_pipeline::ExitCode::Usage)
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(std::fs::read(&input).unwrap(), b"original jpeg");
}

#[test]
fn test_explicit_output_equal_to_input_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.heic");
    std::fs::write(&input, b"fake heif data").unwrap();
    // Same file reached through a different spelling.
    let output = dir.path().join(".").join("in.heic");

    let (encoder, calls) = MockEncoder::new(false);
    let config = ConversionConfig::builder()
        .target(OutputTarget::RawFile)
        .build();
    let pipeline = HeifToP010Pipeline::with_custom(reader(None), encoder, config);

    let result = pipeline.convert_file(&input, &output);

    assert!(matches!(result, Err(ConversionError::InvalidOption(_))));
    assert_eq!(std::fs::read(&input).unwrap(), b"fake heif data");
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn test_existing_output_survives_failed_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.heic");
    let output = dir.path().join("photo.jpg");
    std::fs::write(&input, b"fake heif data").unwrap();
    std::fs::write(&output, b"previous result").unwrap();

    let (encoder, _) = MockEncoder::new(false);
    let pipeline = HeifToP010Pipeline::with_custom(
        reader(Some(mock_image(4, 4, 8))),
        encoder,
        ConversionConfig::default(),
    );

    let result = pipeline.convert_file(&input, &output);

    assert!(matches!(result, Err(ConversionError::UnsupportedBitDepth(8))));
    assert_eq!(std::fs::read(&output).unwrap(), b"previous result");
    // Only the input and the untouched output remain; no staging leftovers.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn test_existing_output_is_replaced_on_success() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.heic");
    let output = dir.path().join("photo.jpg");
    std::fs::write(&input, b"fake heif data").unwrap();
    std::fs::write(&output, b"previous result").unwrap();

    let (encoder, _) = MockEncoder::new(false);
    let pipeline =
        HeifToP010Pipeline::with_custom(reader(None), encoder, ConversionConfig::default());

    pipeline.convert_file(&input, &output).unwrap();

    assert_eq!(std::fs::read(&output).unwrap(), b"\xFF\xD8mock jpeg\xFF\xD9".to_vec());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}
