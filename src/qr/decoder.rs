//! QR code decoder using rqrr

use crate::error::{Error, Result};
use image::{DynamicImage, GrayImage};

/// QR code decoder
pub struct QrDecoder {}

impl QrDecoder {
    /// Create a new QR decoder with default settings
    pub fn new() -> Self {
        Self {}
    }

    /// Decode the first QR code found in an image
    pub fn decode(&self, img: &DynamicImage) -> Result<String> {
        // transparent pixels read as black in luma, so flatten onto white first
        let mut flat = image::RgbaImage::from_pixel(
            img.width(),
            img.height(),
            image::Rgba([255, 255, 255, 255]),
        );
        image::imageops::overlay(&mut flat, &img.to_rgba8(), 0, 0);

        self.decode_gray(&DynamicImage::ImageRgba8(flat).to_luma8())
    }

    /// Decode the first QR code found in encoded image bytes (e.g. an exported PNG)
    pub fn decode_bytes(&self, bytes: &[u8]) -> Result<String> {
        let img = image::load_from_memory(bytes)?;
        self.decode(&img)
    }

    /// Decode a QR code from a grayscale image
    pub fn decode_gray(&self, img: &GrayImage) -> Result<String> {
        let mut prepared = rqrr::PreparedImage::prepare(img.clone());

        let grids = prepared.detect_grids();

        let grid = grids.first().ok_or(Error::NoQrCodeFound)?;

        match grid.decode() {
            Ok((meta, content)) => {
                tracing::debug!(
                    "Decoded QR: version={:?}, ecc_level={:?}, length={}",
                    meta.version,
                    meta.ecc_level,
                    content.len()
                );
                Ok(content)
            }
            Err(e) => Err(Error::QrDecode(format!("Decode failed: {:?}", e))),
        }
    }
}

impl Default for QrDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_image_has_no_code() {
        let decoder = QrDecoder::new();
        let blank = DynamicImage::ImageLuma8(GrayImage::from_pixel(64, 64, image::Luma([255])));
        assert!(matches!(decoder.decode(&blank), Err(Error::NoQrCodeFound)));
    }

    #[test]
    fn test_garbage_bytes_are_image_errors() {
        let decoder = QrDecoder::new();
        assert!(matches!(
            decoder.decode_bytes(b"nope"),
            Err(Error::Image(_))
        ));
    }
}
