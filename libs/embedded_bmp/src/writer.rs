use embedded_io::Write;
use zerocopy::IntoBytes;
use zerocopy::byteorder::little_endian::{I32, U16, U32};

use crate::BmpError;
use crate::header::{
    COMPRESSION_RGB, FileHeader, INFO_HEADER_SIZE, InfoHeader, MONO_DATA_OFFSET, MONO_PALETTE,
    PIXELS_PER_METER, SIGNATURE, mono_file_size, packed_stride, row_stride,
};

const PADDING: [u8; 3] = [0u8; 3];

/// Write a 1-bit bottom-up bitmap.
///
/// `pixels` holds `height` rows, top row first, each `width.div_ceil(8)` bytes
/// long with the leftmost pixel in the most significant bit. A set bit selects
/// palette entry 1 (white), a cleared bit entry 0 (black).
///
/// Returns the file size declared in the header, which is also the number of
/// bytes written.
pub fn write_mono<W: Write>(
    writer: &mut W,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<u32, BmpError> {
    if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(BmpError::InvalidDimensions);
    }
    let packed = packed_stride(width);
    if pixels.len() != packed * height as usize {
        return Err(BmpError::InvalidData);
    }
    let stride = row_stride(width, 1);
    let file_size =
        u32::try_from(mono_file_size(width, height)).map_err(|_| BmpError::InvalidDimensions)?;

    let file_header = FileHeader {
        signature: SIGNATURE,
        file_size: U32::new(file_size),
        reserved: [U16::new(0); 2],
        data_offset: U32::new(MONO_DATA_OFFSET as u32),
    };
    let info_header = InfoHeader {
        header_size: U32::new(INFO_HEADER_SIZE),
        width: I32::new(width as i32),
        height: I32::new(height as i32),
        planes: U16::new(1),
        bits_per_pixel: U16::new(1),
        compression: U32::new(COMPRESSION_RGB),
        image_size: U32::new((stride * height as usize) as u32),
        x_pixels_per_meter: I32::new(PIXELS_PER_METER),
        y_pixels_per_meter: I32::new(PIXELS_PER_METER),
        colors_used: U32::new(MONO_PALETTE.len() as u32),
        colors_important: U32::new(MONO_PALETTE.len() as u32),
    };

    writer
        .write_all(file_header.as_bytes())
        .map_err(BmpError::from_io_error)?;
    writer
        .write_all(info_header.as_bytes())
        .map_err(BmpError::from_io_error)?;
    for entry in &MONO_PALETTE {
        writer.write_all(entry).map_err(BmpError::from_io_error)?;
    }

    // Bottom row first
    for row in pixels.chunks_exact(packed).rev() {
        writer.write_all(row).map_err(BmpError::from_io_error)?;
        writer
            .write_all(&PADDING[..stride - packed])
            .map_err(BmpError::from_io_error)?;
    }

    #[cfg(feature = "log")]
    log::trace!("wrote {}x{} mono bitmap ({} bytes)", width, height, file_size);

    Ok(file_size)
}
