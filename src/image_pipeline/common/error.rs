use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to decode HEIF image: {0}")]
    DecodeError(String),

    #[error("Invalid plane geometry: {0}")]
    InvalidGeometry(String),

    #[error("Unsupported bit depth: {0} (only 10-bit sources can be packed as P010)")]
    UnsupportedBitDepth(u8),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("IO error: {0}")]
    IoFailure(#[from] std::io::Error),

    #[error("Encoder setup failed: {0}")]
    EncoderSetupFailure(String),

    #[error("Encoding failed: {0}")]
    EncoderEncodeFailure(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

impl ConversionError {
    /// Process exit code reported for this failure category.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ConversionError::InvalidOption(_) => ExitCode::Usage,
            ConversionError::InputReadError(_) => ExitCode::InputRead,
            ConversionError::DecodeError(_) => ExitCode::Decode,
            ConversionError::InvalidGeometry(_) => ExitCode::InvalidGeometry,
            ConversionError::UnsupportedBitDepth(_) => ExitCode::UnsupportedBitDepth,
            ConversionError::OutputWriteError(_) | ConversionError::IoFailure(_) => ExitCode::OutputIo,
            ConversionError::EncoderSetupFailure(_) => ExitCode::EncoderSetup,
            ConversionError::EncoderEncodeFailure(_) => ExitCode::EncoderEncode,
        }
    }
}

/// Exit codes for scripting. Values are stable; new categories get new numbers.
///
/// - 0: success
/// - 1: unclassified failure
/// - 2: bad command line option
/// - 3: input file could not be read
/// - 4: container could not be decoded
/// - 5: plane geometry rejected
/// - 6: source bit depth is not 10
/// - 7: output could not be created or written
/// - 8: encoder rejected the image or configuration
/// - 9: encoder failed while encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    Usage = 2,
    InputRead = 3,
    Decode = 4,
    InvalidGeometry = 5,
    UnsupportedBitDepth = 6,
    OutputIo = 7,
    EncoderSetup = 8,
    EncoderEncode = 9,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    pub fn to_exit_code(self) -> std::process::ExitCode {
        std::process::ExitCode::from(self as u8)
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
