use std::path::Path;

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage, imageops};
use iconc_core::{MonoRaster, SizeClass};
use log::trace;

use crate::error::CompileError;

/// Resampling used for every icon. Nearest and box filters make small icons
/// look ragged.
pub const FILTER: imageops::FilterType = imageops::FilterType::Lanczos3;

/// Decode `path` and reduce it to a black/white raster of the class size.
pub fn load_icon(path: &Path, size_class: SizeClass) -> Result<MonoRaster, CompileError> {
    let image = image::open(path).map_err(|source| CompileError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    trace!(
        "Decoded {}: {}x{} {:?}",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );
    Ok(normalize(image, size_class))
}

pub fn normalize(image: DynamicImage, size_class: SizeClass) -> MonoRaster {
    let flat = flatten_onto_white(&image.into_rgba8());
    let size = size_class.size();
    let resized = imageops::resize(&flat, size.width, size.height, FILTER);
    let levels: Vec<u8> = resized.pixels().map(|&pixel| luma(pixel)).collect();
    MonoRaster::from_luma(size.width, size.height, &levels)
}

/// ITU-R 601-2 luma in 16.16 fixed point, rounded. Matches PIL's "L"
/// conversion, so icons threshold the same as the previous Python tool.
pub fn luma(Rgb([r, g, b]): Rgb<u8>) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

/// Composite over an opaque white canvas, the panel has no alpha.
pub fn flatten_onto_white(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let Rgba([r, g, b, a]) = *image.get_pixel(x, y);
        Rgb([blend(r, a), blend(g, a), blend(b, a)])
    })
}

fn blend(channel: u8, alpha: u8) -> u8 {
    let (channel, alpha) = (channel as u32, alpha as u32);
    ((channel * alpha + 255 * (255 - alpha) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::BinaryColor;

    #[test]
    fn test_blend() {
        assert_eq!(blend(0, 255), 0);
        assert_eq!(blend(0, 0), 255);
        assert_eq!(blend(200, 0), 255);
        assert_eq!(blend(0, 128), 127);
        assert_eq!(blend(100, 255), 100);
    }

    #[test]
    fn test_luma_weights() {
        assert_eq!(luma(Rgb([0, 0, 0])), 0);
        assert_eq!(luma(Rgb([255, 255, 255])), 255);
        assert_eq!(luma(Rgb([255, 0, 0])), 76);
        assert_eq!(luma(Rgb([0, 255, 0])), 150);
        assert_eq!(luma(Rgb([0, 0, 255])), 29);
        assert_eq!(luma(Rgb([255, 100, 0])), 135);
    }

    #[test]
    fn test_orange_is_white() {
        // 601 luma of this orange is above the cutoff, 709 luma is below it
        let orange = RgbImage::from_pixel(64, 64, Rgb([255, 100, 0]));
        let raster = normalize(DynamicImage::ImageRgb8(orange), SizeClass::Widget);
        assert_eq!(raster.count(BinaryColor::On), 64 * 64);

        let red = RgbImage::from_pixel(64, 64, Rgb([255, 0, 0]));
        let raster = normalize(DynamicImage::ImageRgb8(red), SizeClass::Widget);
        assert_eq!(raster.count(BinaryColor::Off), 64 * 64);
    }

    #[test]
    fn test_transparent_becomes_white() {
        let mut image = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 0]));
        image.put_pixel(5, 7, Rgba([0, 0, 0, 255]));
        let raster = normalize(DynamicImage::ImageRgba8(image), SizeClass::Widget);
        assert_eq!(raster.pixel(0, 0), Some(BinaryColor::On));
        assert_eq!(raster.pixel(5, 7), Some(BinaryColor::Off));
        assert_eq!(raster.count(BinaryColor::Off), 1);
    }

    #[test]
    fn test_translucent_black_resolves_by_coverage() {
        // 30% black over white is light, 70% is dark
        let light = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 77]));
        let dark = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 179]));
        let light = normalize(DynamicImage::ImageRgba8(light), SizeClass::Widget);
        let dark = normalize(DynamicImage::ImageRgba8(dark), SizeClass::Widget);
        assert_eq!(light.count(BinaryColor::On), 64 * 64);
        assert_eq!(dark.count(BinaryColor::Off), 64 * 64);
    }

    #[test]
    fn test_resizes_to_size_class() {
        let mut image = RgbImage::from_pixel(300, 120, Rgb([255, 255, 255]));
        for y in 0..120 {
            for x in 0..150 {
                image.put_pixel(x, y, Rgb([10, 10, 10]));
            }
        }
        let raster = normalize(DynamicImage::ImageRgb8(image), SizeClass::Ui);
        assert_eq!((raster.width(), raster.height()), (256, 256));
        assert_eq!(raster.pixel(10, 128), Some(BinaryColor::Off));
        assert_eq!(raster.pixel(245, 128), Some(BinaryColor::On));
    }

    #[test]
    fn test_gray_is_thresholded() {
        let mid_gray = image::GrayImage::from_pixel(16, 16, image::Luma([140]));
        let raster = normalize(DynamicImage::ImageLuma8(mid_gray), SizeClass::Widget);
        assert_eq!(raster.count(BinaryColor::On), 64 * 64);

        let dark_gray = image::GrayImage::from_pixel(16, 16, image::Luma([100]));
        let raster = normalize(DynamicImage::ImageLuma8(dark_gray), SizeClass::Widget);
        assert_eq!(raster.count(BinaryColor::Off), 64 * 64);
    }

    #[test]
    fn test_deterministic() {
        let image = RgbaImage::from_fn(97, 41, |x, y| {
            Rgba([(x * 3) as u8, (y * 5) as u8, ((x + y) * 2) as u8, ((x * y) % 256) as u8])
        });
        let first = normalize(DynamicImage::ImageRgba8(image.clone()), SizeClass::Widget);
        let second = normalize(DynamicImage::ImageRgba8(image), SizeClass::Widget);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let err = load_icon(Path::new("does/not/exist.png"), SizeClass::Widget).unwrap_err();
        assert!(matches!(err, CompileError::Decode { .. }));
        assert_eq!(err.stage(), "decode");
    }
}
