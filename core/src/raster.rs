use alloc::{vec, vec::Vec};
use embedded_graphics::{
    Pixel,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Size},
};

/// Luminance below this becomes black.
pub const THRESHOLD: u8 = 128;

/// Target dimensions of an icon, chosen by the directory it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SizeClass {
    /// Small interactive control, 64x64
    Widget,
    /// Full-screen UI element, 256x256
    Ui,
}

impl SizeClass {
    /// Processing order of the groups in the artifact.
    pub const ALL: [SizeClass; 2] = [SizeClass::Widget, SizeClass::Ui];

    pub fn repr(self) -> &'static str {
        match self {
            SizeClass::Widget => "widget",
            SizeClass::Ui => "ui",
        }
    }

    pub fn size(self) -> Size {
        match self {
            SizeClass::Widget => Size::new(64, 64),
            SizeClass::Ui => Size::new(256, 256),
        }
    }
}

/// A 1-bit image. Set bits are white, cleared bits black.
///
/// Rows are stored top to bottom, `width.div_ceil(8)` bytes each, leftmost
/// pixel in the most significant bit. Unused trailing bits stay cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoRaster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl MonoRaster {
    /// An all-white raster.
    pub fn new(width: u32, height: u32) -> Self {
        let mut ret = Self {
            width,
            height,
            data: vec![0; Self::stride_for(width) * height as usize],
        };
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                ret.set_pixel(x, y, BinaryColor::On);
            }
        }
        ret
    }

    /// Threshold an 8-bit luminance buffer of `width * height` samples.
    pub fn from_luma(width: u32, height: u32, luma: &[u8]) -> Self {
        assert_eq!(luma.len(), width as usize * height as usize);
        let stride = Self::stride_for(width);
        let mut data = vec![0u8; stride * height as usize];
        for (index, &value) in luma.iter().enumerate() {
            let x = index % width as usize;
            let y = index / width as usize;
            let bit = if value < THRESHOLD { 0 } else { 1 };
            data[y * stride + x / 8] |= bit << (7 - (x % 8));
        }
        Self {
            width,
            height,
            data,
        }
    }

    fn stride_for(width: u32) -> usize {
        (width as usize).div_ceil(8)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        Self::stride_for(self.width)
    }

    /// Packed rows, see the type documentation for the layout.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<BinaryColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let byte = self.data[y as usize * self.stride() + x as usize / 8];
        if (byte >> (7 - (x % 8))) & 1 == 1 {
            Some(BinaryColor::On)
        } else {
            Some(BinaryColor::Off)
        }
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let byte_index = y as usize * self.stride() + x as usize / 8;
        let bit_index = 7 - (x as usize % 8);
        match color {
            BinaryColor::On => self.data[byte_index] |= 1 << bit_index,
            BinaryColor::Off => self.data[byte_index] &= !(1 << bit_index),
        }
    }

    pub fn count(&self, color: BinaryColor) -> usize {
        let mut count = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.pixel(x, y) == Some(color) {
                    count += 1;
                }
            }
        }
        count
    }
}

impl OriginDimensions for MonoRaster {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for MonoRaster {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.set_pixel(coord.x, coord.y, color);
        }
        Ok(())
    }
}
