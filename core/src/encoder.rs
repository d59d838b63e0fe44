use alloc::{boxed::Box, vec::Vec};
use core::fmt;
use log::debug;

use crate::raster::MonoRaster;

/// Serialized icon, ready to be emitted as a byte array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBitmap {
    bytes: Box<[u8]>,
}

impl EncodedBitmap {
    pub fn new(bytes: Box<[u8]>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    Bitmap(embedded_bmp::BmpError),
    /// Header declares a different size than was produced.
    SizeMismatch { declared: usize, actual: usize },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::Bitmap(err) => write!(f, "bitmap serialization failed: {err}"),
            EncodeError::SizeMismatch { declared, actual } => write!(
                f,
                "bitmap header declares {declared} bytes but {actual} were written"
            ),
        }
    }
}

impl core::error::Error for EncodeError {}

/// Turns a raster into the byte stream stored on the device.
pub trait IconEncoder {
    fn encode(&self, raster: &MonoRaster) -> Result<EncodedBitmap, EncodeError>;
}

/// 1-bit BMP, the format the panel's graphics library loads from flash.
#[derive(Debug, Default, Clone, Copy)]
pub struct BmpEncoder;

impl IconEncoder for BmpEncoder {
    fn encode(&self, raster: &MonoRaster) -> Result<EncodedBitmap, EncodeError> {
        let (width, height) = (raster.width(), raster.height());
        let mut bytes: Vec<u8> = Vec::with_capacity(embedded_bmp::mono_file_size(width, height));
        let declared = embedded_bmp::write_mono(&mut bytes, width, height, raster.data())
            .map_err(EncodeError::Bitmap)? as usize;
        if declared != bytes.len() {
            return Err(EncodeError::SizeMismatch {
                declared,
                actual: bytes.len(),
            });
        }
        debug!("Encoded {}x{} raster into {} byte bitmap", width, height, declared);
        Ok(EncodedBitmap::new(bytes.into_boxed_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::SizeClass;
    use embedded_graphics::pixelcolor::BinaryColor;

    fn decode(bitmap: &EncodedBitmap) -> (embedded_bmp::BmpInfo, Vec<u8>) {
        let mut reader = bitmap.as_bytes();
        let info = embedded_bmp::parse_header(&mut reader).unwrap();
        let rows = embedded_bmp::read_rows(&mut reader, &info).unwrap();
        (info, rows)
    }

    #[test]
    fn test_dimensions_follow_size_class() {
        for class in SizeClass::ALL {
            let size = class.size();
            let raster = MonoRaster::new(size.width, size.height);
            let bitmap = BmpEncoder.encode(&raster).unwrap();
            let (info, _) = decode(&bitmap);
            assert_eq!((info.width, info.height), (size.width, size.height));
            assert_eq!(info.file_size as usize, bitmap.len());
        }
    }

    #[test]
    fn test_pixels_survive_encoding() {
        let mut raster = MonoRaster::new(64, 64);
        raster.set_pixel(0, 0, BinaryColor::Off);
        raster.set_pixel(63, 63, BinaryColor::Off);
        raster.set_pixel(17, 40, BinaryColor::Off);
        let bitmap = BmpEncoder.encode(&raster).unwrap();
        let (info, rows) = decode(&bitmap);
        assert_eq!(rows, raster.data());
        assert_eq!(embedded_bmp::pixel_index(&rows, info.width, 17, 40), 0);
        assert_eq!(embedded_bmp::pixel_index(&rows, info.width, 18, 40), 1);
        assert_eq!(info.palette, embedded_bmp::MONO_PALETTE);
    }

    #[test]
    fn test_odd_width_is_padded() {
        let raster = MonoRaster::new(13, 5);
        let bitmap = BmpEncoder.encode(&raster).unwrap();
        assert_eq!(bitmap.len(), 62 + 4 * 5);
    }

    #[test]
    fn test_empty_raster_is_rejected() {
        let raster = MonoRaster::new(0, 0);
        assert_eq!(
            BmpEncoder.encode(&raster),
            Err(EncodeError::Bitmap(embedded_bmp::BmpError::InvalidDimensions))
        );
    }
}
