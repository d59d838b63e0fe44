use zerocopy::byteorder::little_endian::{I32, U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

pub const SIGNATURE: [u8; 2] = *b"BM";
pub const INFO_HEADER_SIZE: u32 = 40;
pub const COMPRESSION_RGB: u32 = 0;
/// 96 dpi expressed in pixels per metre.
pub const PIXELS_PER_METER: i32 = 3780;

/// Index 0 is black, index 1 is white. Entries are BGRX; the fourth byte
/// repeats the gray level, as Pillow writes it for 1-bit images.
pub const MONO_PALETTE: [[u8; 4]; 2] = [[0x00, 0x00, 0x00, 0x00], [0xFF, 0xFF, 0xFF, 0xFF]];

#[repr(C)]
#[derive(FromBytes, IntoBytes, Immutable, KnownLayout)]
pub(crate) struct FileHeader {
    pub signature: [u8; 2],
    pub file_size: U32,
    pub reserved: [U16; 2],
    pub data_offset: U32,
}

#[repr(C)]
#[derive(FromBytes, IntoBytes, Immutable, KnownLayout)]
pub(crate) struct InfoHeader {
    pub header_size: U32,
    pub width: I32,
    pub height: I32,
    pub planes: U16,
    pub bits_per_pixel: U16,
    pub compression: U32,
    pub image_size: U32,
    pub x_pixels_per_meter: I32,
    pub y_pixels_per_meter: I32,
    pub colors_used: U32,
    pub colors_important: U32,
}

pub const FILE_HEADER_SIZE: usize = core::mem::size_of::<FileHeader>();
pub const HEADERS_SIZE: usize = FILE_HEADER_SIZE + core::mem::size_of::<InfoHeader>();
/// Offset of the pixel array in a 1-bit file written by this crate.
pub const MONO_DATA_OFFSET: usize = HEADERS_SIZE + MONO_PALETTE.len() * 4;

/// Bytes per stored row. Rows are padded to a multiple of four bytes.
pub const fn row_stride(width: u32, bits_per_pixel: u16) -> usize {
    (width as usize * bits_per_pixel as usize).div_ceil(32) * 4
}

/// Bytes per row of a packed 1-bit raster without padding.
pub const fn packed_stride(width: u32) -> usize {
    (width as usize).div_ceil(8)
}

/// Total size of a 1-bit file of the given dimensions.
pub const fn mono_file_size(width: u32, height: u32) -> usize {
    MONO_DATA_OFFSET + row_stride(width, 1) * height as usize
}

/// Parsed description of a bitmap file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpInfo {
    pub file_size: u32,
    pub data_offset: u32,
    pub width: u32,
    pub height: u32,
    /// Rows are stored top row first (negative height in the file).
    pub top_down: bool,
    pub bits_per_pixel: u16,
    pub palette: [[u8; 4]; 2],
}

impl BmpInfo {
    pub fn row_stride(&self) -> usize {
        row_stride(self.width, self.bits_per_pixel)
    }

    pub fn pixel_data_size(&self) -> usize {
        self.row_stride() * self.height as usize
    }
}
