#![cfg_attr(rustfmt, rustfmt_skip)]
extern crate std;

use super::*;
use std::vec;
use std::vec::Vec;

fn encode(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
    let mut out = Vec::<u8>::new();
    let size = write_mono(&mut out, width, height, pixels).unwrap();
    assert_eq!(size as usize, out.len());
    out
}

fn le_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

fn le_i32(bytes: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

fn le_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
}

#[test]
fn test_header_layout() {
    let pixels = vec![0xFFu8; 8 * 64];
    let bytes = encode(64, 64, &pixels);

    assert_eq!(&bytes[0..2], b"BM");
    assert_eq!(le_u32(&bytes, 2) as usize, bytes.len());
    assert_eq!(le_u32(&bytes, 6), 0);
    assert_eq!(le_u32(&bytes, 10), 62);
    assert_eq!(le_u32(&bytes, 14), 40);
    assert_eq!(le_i32(&bytes, 18), 64);
    assert_eq!(le_i32(&bytes, 22), 64);
    assert_eq!(le_u16(&bytes, 26), 1);
    assert_eq!(le_u16(&bytes, 28), 1);
    assert_eq!(le_u32(&bytes, 30), 0);
    assert_eq!(le_u32(&bytes, 34), 8 * 64);
    assert_eq!(le_i32(&bytes, 38), PIXELS_PER_METER);
    assert_eq!(le_i32(&bytes, 42), PIXELS_PER_METER);
    assert_eq!(le_u32(&bytes, 46), 2);
    assert_eq!(le_u32(&bytes, 50), 2);
    assert_eq!(&bytes[54..62], &[0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);
    assert_eq!(bytes.len(), 62 + 8 * 64);
    assert_eq!(bytes.len(), mono_file_size(64, 64));
}

#[test]
fn test_rows_are_bottom_up_and_padded() {
    // 10 pixels wide: 2 packed bytes, stored with 2 bytes of padding
    let pixels = [
        0b1000_0000, 0b0100_0000, // top row
        0b0000_0001, 0b1100_0000, // middle row
        0b1111_1111, 0b1100_0000, // bottom row
    ];
    let bytes = encode(10, 3, &pixels);
    let data = &bytes[MONO_DATA_OFFSET..];
    assert_eq!(row_stride(10, 1), 4);
    assert_eq!(data.len(), 12);
    assert_eq!(&data[0..4], &[0b1111_1111, 0b1100_0000, 0, 0]);
    assert_eq!(&data[4..8], &[0b0000_0001, 0b1100_0000, 0, 0]);
    assert_eq!(&data[8..12], &[0b1000_0000, 0b0100_0000, 0, 0]);
}

#[test]
fn test_parse_restores_top_down_rows() {
    let pixels = [0b1010_1010, 0b0101_0101, 0b1111_0000, 0b0000_1111];
    let bytes = encode(8, 4, &pixels);

    let mut reader = bytes.as_slice();
    let info = parse_header(&mut reader).unwrap();
    assert_eq!(info.width, 8);
    assert_eq!(info.height, 4);
    assert!(!info.top_down);
    assert_eq!(info.palette, MONO_PALETTE);
    assert_eq!(info.file_size as usize, bytes.len());
    assert_eq!(info.data_offset as usize, MONO_DATA_OFFSET);
    let rows = read_rows(&mut reader, &info).unwrap();
    assert_eq!(rows, pixels);
    assert_eq!(pixel_index(&rows, 8, 0, 0), 1);
    assert_eq!(pixel_index(&rows, 8, 1, 0), 0);
    assert_eq!(pixel_index(&rows, 8, 7, 3), 1);
}

#[test]
fn test_wide_row_stride() {
    assert_eq!(row_stride(1, 1), 4);
    assert_eq!(row_stride(32, 1), 4);
    assert_eq!(row_stride(33, 1), 8);
    assert_eq!(row_stride(256, 1), 32);
    assert_eq!(mono_file_size(256, 256), 62 + 32 * 256);
}

#[test]
fn test_rejects_wrong_pixel_count() {
    let mut out = Vec::<u8>::new();
    assert_eq!(
        write_mono(&mut out, 16, 2, &[0u8; 3]),
        Err(BmpError::InvalidData)
    );
    assert_eq!(write_mono(&mut out, 0, 2, &[]), Err(BmpError::InvalidDimensions));
    assert!(out.is_empty());
}

#[test]
fn test_rejects_bad_signature() {
    let mut bytes = encode(8, 1, &[0x00]);
    bytes[0] = b'X';
    let mut reader = bytes.as_slice();
    assert_eq!(parse_header(&mut reader), Err(BmpError::InvalidSignature));
}

#[test]
fn test_rejects_other_bit_depths() {
    let mut bytes = encode(8, 1, &[0x00]);
    bytes[28] = 24;
    let mut reader = bytes.as_slice();
    assert_eq!(parse_header(&mut reader), Err(BmpError::UnsupportedFormat));
}

#[test]
fn test_truncated_pixel_data() {
    let bytes = encode(8, 8, &[0u8; 8]);
    let truncated = &bytes[..bytes.len() - 1];
    let mut reader = truncated;
    let info = parse_header(&mut reader).unwrap();
    assert_eq!(read_rows(&mut reader, &info), Err(BmpError::InvalidData));
}

#[test]
fn test_truncated_header() {
    let bytes = encode(8, 8, &[0u8; 8]);
    let mut reader = &bytes[..20];
    assert_eq!(parse_header(&mut reader), Err(BmpError::InvalidData));
}
