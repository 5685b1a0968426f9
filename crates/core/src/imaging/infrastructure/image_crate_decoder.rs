use crate::imaging::domain::image_decoder::ImageDecoder;
use crate::shared::frame::Frame;

/// Decodes with the pure-Rust `image` crate, sniffing the format from the
/// byte content. Output is always 3-channel RGB.
pub struct ImageCrateDecoder;

impl ImageCrateDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageCrateDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageDecoder for ImageCrateDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Frame, Box<dyn std::error::Error>> {
        if bytes.is_empty() {
            return Err("empty image buffer".into());
        }
        let rgb = image::load_from_memory(bytes)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Err(format!("image has no pixels ({width}x{height})").into());
        }
        Ok(Frame::new(rgb.into_raw(), width, height, 3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_png(img: &image::RgbImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decodes_png_dimensions() {
        let img = image::RgbImage::from_pixel(100, 80, image::Rgb([50, 100, 200]));
        let frame = ImageCrateDecoder::new().decode(&encode_png(&img)).unwrap();
        assert_eq!(frame.width(), 100);
        assert_eq!(frame.height(), 80);
        assert_eq!(frame.channels(), 3);
    }

    #[test]
    fn test_decoded_pixels_are_rgb() {
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([50, 100, 200]));
        let frame = ImageCrateDecoder::new().decode(&encode_png(&img)).unwrap();
        assert_eq!(&frame.data()[..3], &[50, 100, 200]);
    }

    #[test]
    fn test_grayscale_input_expanded_to_rgb() {
        let img = image::GrayImage::from_pixel(3, 2, image::Luma([77]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        let frame = ImageCrateDecoder::new().decode(&buf.into_inner()).unwrap();
        assert_eq!(frame.channels(), 3);
        assert_eq!(&frame.data()[..3], &[77, 77, 77]);
    }

    #[test]
    fn test_empty_buffer_is_error() {
        assert!(ImageCrateDecoder::new().decode(&[]).is_err());
    }

    #[test]
    fn test_garbage_bytes_are_error() {
        assert!(ImageCrateDecoder::new()
            .decode(b"definitely not an image")
            .is_err());
    }

    #[test]
    fn test_truncated_png_is_error() {
        let img = image::RgbImage::from_pixel(32, 32, image::Rgb([1, 2, 3]));
        let bytes = encode_png(&img);
        assert!(ImageCrateDecoder::new().decode(&bytes[..bytes.len() / 2]).is_err());
    }
}
