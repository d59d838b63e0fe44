/*!
A no_std writer and reader for 1-bit Windows bitmaps using embedded-io.

The writer emits the layout most display libraries load directly: a
BITMAPINFOHEADER, a black/white palette and bottom-up rows padded to four
bytes.

## Usage
```
# fn main() -> Result<(), embedded_bmp::BmpError> {
// 8x2 image, top row white, bottom row black
let pixels: [u8; 2] = [0xFF, 0x00];
let mut out: Vec<u8> = Vec::new();
let size = embedded_bmp::write_mono(&mut out, 8, 2, &pixels)?;
assert_eq!(size as usize, out.len());

let mut reader = out.as_slice();
let info = embedded_bmp::parse_header(&mut reader)?;
assert_eq!((info.width, info.height), (8, 2));
assert_eq!(embedded_bmp::read_rows(&mut reader, &info)?, pixels);
# Ok(())
# }
```
*/
#![no_std]

mod error;
mod header;
mod parser;
mod writer;

#[cfg(test)]
mod tests;

pub use error::BmpError;
pub use header::{
    BmpInfo, MONO_DATA_OFFSET, MONO_PALETTE, PIXELS_PER_METER, mono_file_size, packed_stride,
    row_stride,
};
pub use parser::{parse_header, pixel_index, read_rows};
pub use writer::write_mono;
