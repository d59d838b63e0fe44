extern crate alloc;
use alloc::{vec, vec::Vec};
use embedded_io::Read;
use zerocopy::FromBytes;

use crate::BmpError;
use crate::header::{
    BmpInfo, COMPRESSION_RGB, FILE_HEADER_SIZE, FileHeader, HEADERS_SIZE, INFO_HEADER_SIZE,
    InfoHeader, SIGNATURE, packed_stride,
};

/// Read the file header, info header and 2-entry palette.
///
/// Leaves the reader positioned right after the palette. Only uncompressed
/// 1-bit images are accepted.
pub fn parse_header<R: Read>(reader: &mut R) -> Result<BmpInfo, BmpError> {
    let mut buf = [0u8; HEADERS_SIZE];
    reader
        .read_exact(&mut buf)
        .map_err(BmpError::from_read_exact_error)?;
    let file = FileHeader::read_from_bytes(&buf[..FILE_HEADER_SIZE]).unwrap();
    let info = InfoHeader::read_from_bytes(&buf[FILE_HEADER_SIZE..]).unwrap();

    if file.signature != SIGNATURE {
        return Err(BmpError::InvalidSignature);
    }
    if info.header_size.get() != INFO_HEADER_SIZE {
        return Err(BmpError::UnsupportedFormat);
    }
    if info.bits_per_pixel.get() != 1 || info.compression.get() != COMPRESSION_RGB {
        return Err(BmpError::UnsupportedFormat);
    }
    let width = info.width.get();
    let height = info.height.get();
    if width <= 0 || height == 0 || height == i32::MIN {
        return Err(BmpError::InvalidDimensions);
    }

    let mut palette = [[0u8; 4]; 2];
    for entry in palette.iter_mut() {
        reader
            .read_exact(entry)
            .map_err(BmpError::from_read_exact_error)?;
    }

    let result = BmpInfo {
        file_size: file.file_size.get(),
        data_offset: file.data_offset.get(),
        width: width as u32,
        height: height.unsigned_abs(),
        top_down: height < 0,
        bits_per_pixel: 1,
        palette,
    };
    if (result.data_offset as usize) < HEADERS_SIZE + palette.len() * 4 {
        return Err(BmpError::InvalidData);
    }

    #[cfg(feature = "log")]
    log::trace!(
        "parsed bmp header: {}x{} offset={} size={}",
        result.width,
        result.height,
        result.data_offset,
        result.file_size
    );
    Ok(result)
}

/// Read the pixel array that follows [`parse_header`].
///
/// Returns palette indices packed like the writer's input: top row first,
/// `width.div_ceil(8)` bytes per row, padding stripped.
pub fn read_rows<R: Read>(reader: &mut R, info: &BmpInfo) -> Result<Vec<u8>, BmpError> {
    // Skip whatever sits between the palette and the pixel array
    let mut skip = info.data_offset as usize - (HEADERS_SIZE + info.palette.len() * 4);
    let mut scratch = [0u8; 16];
    while skip > 0 {
        let n = skip.min(scratch.len());
        reader
            .read_exact(&mut scratch[..n])
            .map_err(BmpError::from_read_exact_error)?;
        skip -= n;
    }

    let stride = info.row_stride();
    let packed = packed_stride(info.width);
    let height = info.height as usize;
    let mut row = vec![0u8; stride];
    let mut pixels = vec![0u8; packed * height];
    for stored in 0..height {
        reader
            .read_exact(&mut row)
            .map_err(BmpError::from_read_exact_error)?;
        let y = if info.top_down {
            stored
        } else {
            height - 1 - stored
        };
        pixels[y * packed..(y + 1) * packed].copy_from_slice(&row[..packed]);
    }
    Ok(pixels)
}

/// Palette index of the pixel at (`x`, `y`) in rows returned by [`read_rows`].
pub fn pixel_index(pixels: &[u8], width: u32, x: u32, y: u32) -> u8 {
    let byte = pixels[y as usize * packed_stride(width) + x as usize / 8];
    (byte >> (7 - (x % 8))) & 1
}
