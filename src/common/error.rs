use std::collections::TryReserveError;
use std::fmt::{Display, Error, Formatter};
use std::io;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // Parameters
    InvalidVersion,
    InvalidECLevel,
    InvalidMaskingPattern,
    InvalidEcCount,

    // Resources
    OutOfMemory,

    // Input
    DataTooLong,

    // Output
    Io(io::ErrorKind),
}

impl QRError {
    /// Process status reported by the command line tool for this error.
    pub fn status_code(&self) -> i32 {
        match self {
            Self::InvalidVersion
            | Self::InvalidECLevel
            | Self::InvalidMaskingPattern
            | Self::InvalidEcCount => 1,
            Self::OutOfMemory => 2,
            Self::DataTooLong => 3,
            Self::Io(_) => 5,
        }
    }
}

impl Display for QRError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let msg = match *self {
            // Parameters
            Self::InvalidVersion => "Invalid version",
            Self::InvalidECLevel => "Invalid error correction level",
            Self::InvalidMaskingPattern => "Invalid masking pattern",
            Self::InvalidEcCount => "Invalid error correction codeword count",

            // Resources
            Self::OutOfMemory => "Out of memory",

            // Input
            Self::DataTooLong => "Data too long",

            // Output
            Self::Io(kind) => return write!(f, "I/O error: {kind}"),
        };
        f.write_str(msg)
    }
}

impl std::error::Error for QRError {}

impl From<io::Error> for QRError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.kind())
    }
}

impl From<image::ImageError> for QRError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Self::Io(e.kind()),
            _ => Self::Io(io::ErrorKind::Other),
        }
    }
}

impl From<TryReserveError> for QRError {
    fn from(_: TryReserveError) -> Self {
        Self::OutOfMemory
    }
}

pub type QRResult<T> = Result<T, QRError>;
