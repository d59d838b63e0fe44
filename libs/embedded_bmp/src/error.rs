use core::fmt;

/// Error type for bitmap reading and writing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmpError {
    IoError(embedded_io::ErrorKind),
    InvalidSignature,
    /// Anything other than an uncompressed 1-bit image.
    UnsupportedFormat,
    InvalidDimensions,
    InvalidData,
}

impl BmpError {
    pub(crate) fn from_io_error(error: impl embedded_io::Error) -> Self {
        BmpError::IoError(error.kind())
    }

    pub(crate) fn from_read_exact_error<E: embedded_io::Error>(
        error: embedded_io::ReadExactError<E>,
    ) -> Self {
        match error {
            embedded_io::ReadExactError::UnexpectedEof => BmpError::InvalidData,
            embedded_io::ReadExactError::Other(e) => BmpError::from_io_error(e),
        }
    }
}

impl embedded_io::Error for BmpError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            BmpError::IoError(kind) => *kind,
            BmpError::InvalidSignature | BmpError::InvalidData | BmpError::InvalidDimensions => {
                embedded_io::ErrorKind::InvalidData
            }
            BmpError::UnsupportedFormat => embedded_io::ErrorKind::Unsupported,
        }
    }
}

impl fmt::Display for BmpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BmpError::IoError(kind) => write!(f, "I/O error: {kind:?}"),
            BmpError::InvalidSignature => f.write_str("missing BM signature"),
            BmpError::UnsupportedFormat => f.write_str("only uncompressed 1-bit bitmaps are supported"),
            BmpError::InvalidDimensions => f.write_str("invalid bitmap dimensions"),
            BmpError::InvalidData => f.write_str("truncated or inconsistent bitmap data"),
        }
    }
}

impl core::error::Error for BmpError {}
