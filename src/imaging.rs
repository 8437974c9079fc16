use image::codecs::jpeg::JpegEncoder;
use image::{imageops::FilterType, GenericImageView};

use crate::error::AppError;

/// Longest edge an uploaded image is allowed to keep. Larger images are
/// scaled down to fit within this square, preserving aspect ratio.
pub const MAX_DIMENSION: u32 = 1200;

/// Quality setting for the JPEG re-encode.
pub const JPEG_QUALITY: u8 = 85;

/// An uploaded image after normalization: resized to fit the dimension cap
/// and re-encoded as JPEG.
#[derive(Debug)]
pub struct ProcessedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Decodes `input`, scales it down if either edge exceeds [`MAX_DIMENSION`]
/// (never up), and re-encodes it as an RGB JPEG.
///
/// Returns `AppError::BadRequest` when the bytes are not a decodable image;
/// encoding failures surface as `AppError::InternalServerError`.
pub fn compress_to_jpeg(input: &[u8]) -> Result<ProcessedImage, AppError> {
    let decoded = image::load_from_memory(input)
        .map_err(|e| AppError::BadRequest(format!("Could not decode image: {}", e)))?;

    let (width, height) = decoded.dimensions();
    let resized = if width > MAX_DIMENSION || height > MAX_DIMENSION {
        decoded.resize(MAX_DIMENSION, MAX_DIMENSION, FilterType::Lanczos3)
    } else {
        decoded
    };

    // JPEG has no alpha channel, so flatten to RGB before encoding.
    let rgb = resized.to_rgb8();
    let mut data = Vec::new();
    JpegEncoder::new_with_quality(&mut data, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|e| AppError::InternalServerError(format!("Failed to encode image: {}", e)))?;

    Ok(ProcessedImage {
        data,
        width: rgb.width(),
        height: rgb.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(image: DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();
        bytes
    }

    #[test_log::test]
    fn test_oversized_image_is_scaled_down() {
        let input = png_bytes(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            2000,
            500,
            Rgb([200, 40, 40]),
        )));

        let processed = compress_to_jpeg(&input).unwrap();
        // 2000x500 fits into 1200x1200 as 1200x300.
        assert_eq!((processed.width, processed.height), (1200, 300));
    }

    #[test]
    fn test_small_image_keeps_its_dimensions() {
        let input = png_bytes(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            800,
            600,
            Rgb([10, 120, 90]),
        )));

        let processed = compress_to_jpeg(&input).unwrap();
        assert_eq!((processed.width, processed.height), (800, 600));
    }

    #[test]
    fn test_output_is_jpeg_even_for_rgba_input() {
        let input = png_bytes(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            64,
            64,
            Rgba([0, 0, 255, 128]),
        )));

        let processed = compress_to_jpeg(&input).unwrap();
        // JPEG magic bytes.
        assert_eq!(&processed.data[..2], &[0xFF, 0xD8]);
    }

    #[test_log::test]
    fn test_undecodable_bytes_are_rejected() {
        let result = compress_to_jpeg(b"definitely not an image");
        match result {
            Err(AppError::BadRequest(msg)) => assert!(msg.contains("decode")),
            other => panic!("Expected BadRequest, got {:?}", other),
        }
    }
}
