#![no_std]

pub mod artifact;
pub mod encoder;
pub mod raster;
pub mod symbol;

extern crate alloc;

pub use artifact::{Artifact, ArtifactEntry, ArtifactError, PREAMBLE};
pub use encoder::{BmpEncoder, EncodeError, EncodedBitmap, IconEncoder};
pub use raster::{MonoRaster, SizeClass, THRESHOLD};
pub use symbol::{format_symbol, symbol_name, write_symbol};
