use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

use crate::image_pipeline::{
    common::{ConversionError, PipelineTimings, Result, Timer},
    conversions::types::{ConversionConfig, OutputTarget},
    heif::PlanarImageReader,
    p010::{PlaneRepacker, RawP010Writer},
    uhdr::{HdrEncoder, RawImageDescriptorBuilder},
};
#[cfg(all(feature = "libheif", feature = "ultrahdr"))]
use crate::image_pipeline::{heif::LibHeifReader, uhdr::UltraHdrEncoder};

/// Decodes a HEIF/AVIF image, packs it as P010 and hands the packed planes
/// to the configured consumer.
pub struct HeifToP010Pipeline<R: PlanarImageReader, E: HdrEncoder> {
    reader: R,
    encoder: E,
    writer: RawP010Writer,
    config: ConversionConfig,
}

#[cfg(all(feature = "libheif", feature = "ultrahdr"))]
impl HeifToP010Pipeline<LibHeifReader, UltraHdrEncoder> {
    pub fn new(config: ConversionConfig) -> Self {
        Self::with_custom(LibHeifReader::new(), UltraHdrEncoder, config)
    }
}

impl<R: PlanarImageReader, E: HdrEncoder> HeifToP010Pipeline<R, E> {
    pub fn with_custom(reader: R, encoder: E, config: ConversionConfig) -> Self {
        Self {
            reader,
            encoder,
            writer: RawP010Writer,
            config,
        }
    }

    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<()> {
        self.convert_with_timings(input_data, output).map(|_| ())
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len(), output_target = ?self.config.target))]
    pub fn convert_with_timings(
        &self,
        input_data: &[u8],
        output: &mut dyn Write,
    ) -> Result<PipelineTimings> {
        let mut timings = PipelineTimings::new();
        info!("Starting HEIF to P010 conversion");

        if self.config.target == OutputTarget::EncoderDescriptor {
            self.config.encoder.validate()?;
        }

        let timer = Timer::start("decode_heif");
        let planar = self.reader.read_planar(input_data)?;
        timings.record(timer);

        let (width, height) = (planar.width(), planar.height());

        let timer = Timer::start("repack_p010");
        let packed = PlaneRepacker::new()
            .parallel(self.config.parallel_planes)
            .repack(&planar)?;
        drop(planar);
        timings.record(timer);

        match self.config.target {
            OutputTarget::RawFile => {
                let timer = Timer::start("write_p010");
                self.writer.write_packed(packed, output)?;
                timings.record(timer);
            }
            OutputTarget::EncoderDescriptor => {
                let descriptor = RawImageDescriptorBuilder::build(packed, self.config.color);

                let timer = Timer::start("encode_uhdr");
                let jpeg = self.encoder.encode(descriptor, &self.config.encoder)?;
                timings.record(timer);

                let timer = Timer::start("write_jpeg");
                output.write_all(&jpeg)?;
                output.flush()?;
                timings.record(timer);
            }
        }

        info!(
            "Conversion complete: {}x{} in {:.3}ms",
            width,
            height,
            timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok(timings)
    }

    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        self.convert_file_with_timings(input_path, output_path)
            .map(|_| ())
    }

    /// Converts `input_path` into `output_path`.
    ///
    /// Output goes to a temporary file next to `output_path` that replaces it
    /// only once every stage has succeeded. An output path that names the
    /// input file is rejected before anything is read or written.
    pub fn convert_file_with_timings<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<PipelineTimings> {
        let mut timings = PipelineTimings::new();
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            "Converting file: {} -> {}",
            input_path.display(),
            output_path.display()
        );

        if is_same_file(input_path, output_path) {
            return Err(ConversionError::InvalidOption(format!(
                "output {} would overwrite the input file",
                output_path.display()
            )));
        }

        let timer = Timer::start("read_input_file");
        let input_data = std::fs::read(input_path).map_err(|e| {
            ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
        })?;
        timings.record(timer);

        let timer = Timer::start("create_output_file");
        let mut staged = staging_file(output_path)?;
        timings.record(timer);

        // Dropping `staged` on error deletes the temporary file.
        let conversion_timings = self.convert_with_timings(&input_data, &mut staged)?;
        timings.extend(conversion_timings);

        let timer = Timer::start("persist_output_file");
        staged.persist(output_path).map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e.error))
        })?;
        timings.record(timer);

        Ok(timings)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}

/// True when both paths resolve to one existing file.
fn is_same_file(input: &Path, output: &Path) -> bool {
    match (input.canonicalize(), output.canonicalize()) {
        (Ok(input), Ok(output)) => input == output,
        _ => false,
    }
}

fn staging_file(output_path: &Path) -> Result<NamedTempFile> {
    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staged = tempfile::Builder::new()
        .prefix(".heif2p010-")
        .tempfile_in(dir)
        .map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
        })?;
    debug!("Staging output in {}", staged.path().display());
    Ok(staged)
}
