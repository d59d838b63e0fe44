use std::path::PathBuf;

use iconc_core::EncodeError;
use thiserror::Error;

/// Failure of a compile run. Every variant names the file it failed on.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("failed to list input directory {}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode {}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: EncodeError,
    },

    #[error("symbol `{symbol}` from {} is already defined by {existing}", .path.display())]
    DuplicateSymbol {
        symbol: String,
        path: PathBuf,
        existing: String,
    },

    #[error("failed to write {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CompileError {
    /// Name of the pipeline stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            CompileError::ReadDir { .. } => "scan",
            CompileError::Decode { .. } => "decode",
            CompileError::Encode { .. } => "encode",
            CompileError::DuplicateSymbol { .. } => "symbol",
            CompileError::Io { .. } => "write",
        }
    }
}
