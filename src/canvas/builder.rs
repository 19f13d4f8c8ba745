//! Canvas builder: decode the QR bitmap, size the surface, composite

use super::geometry::PREVIEW_SIZE;
use super::layers::{DrawingParams, composite_all};
use super::surface::PixmapSurface;
use crate::error::{Error, Result};
use crate::style::StyleParameters;
use bytes::Bytes;
use image::RgbaImage;
use tiny_skia::{IntSize, Pixmap, PixmapRef};
use uuid::Uuid;

/// Inputs for a single export
#[derive(Debug, Clone)]
pub struct QrCanvasOptions {
    /// Encoded raster (PNG or any format `image` can read) of the bare QR code
    pub qr_bitmap: Bytes,
    /// Styling applied around the artwork
    pub style: StyleParameters,
    /// Pixel footprint of the QR artwork in the output
    pub download_size: u32,
}

/// Decoded QR artwork owned by one export.
///
/// The pixel buffer is released when the handle is dropped, on success and
/// on every error path.
#[derive(Debug)]
pub struct DecodedBitmap {
    id: Uuid,
    pixmap: Pixmap,
}

impl DecodedBitmap {
    /// Decode `bytes` off the async executor
    pub async fn decode(bytes: Bytes) -> Result<Self> {
        let pixmap = tokio::task::spawn_blocking(move || decode_pixmap(&bytes))
            .await
            .map_err(|e| Error::BitmapDecode(format!("decode task failed: {e}")))??;

        let id = Uuid::new_v4();
        tracing::trace!(%id, width = pixmap.width(), height = pixmap.height(), "Decoded QR bitmap");
        Ok(Self { id, pixmap })
    }

    /// Decode `bytes` on the current thread
    pub fn decode_blocking(bytes: &[u8]) -> Result<Self> {
        let pixmap = decode_pixmap(bytes)?;
        Ok(Self {
            id: Uuid::new_v4(),
            pixmap,
        })
    }

    /// Width of the decoded artwork
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Height of the decoded artwork
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Borrow the premultiplied pixels
    pub fn pixmap(&self) -> PixmapRef<'_> {
        self.pixmap.as_ref()
    }
}

impl Drop for DecodedBitmap {
    fn drop(&mut self) {
        tracing::trace!(id = %self.id, "Released decoded QR bitmap");
    }
}

fn decode_pixmap(bytes: &[u8]) -> Result<Pixmap> {
    let rgba = image::load_from_memory(bytes)
        .map_err(|e| {
            tracing::warn!("QR bitmap decode failed: {e}");
            Error::BitmapDecode(e.to_string())
        })?
        .to_rgba8();
    rgba_to_pixmap(rgba)
}

/// Convert straight-alpha RGBA into a premultiplied tiny-skia pixmap
pub(crate) fn rgba_to_pixmap(rgba: RgbaImage) -> Result<Pixmap> {
    let (width, height) = rgba.dimensions();
    let size = IntSize::from_wh(width, height)
        .ok_or_else(|| Error::BitmapDecode(format!("empty bitmap ({width}x{height})")))?;

    let mut data = rgba.into_raw();
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a < 255 {
            for c in &mut px[..3] {
                *c = ((*c as u16 * a + 127) / 255) as u8;
            }
        }
    }

    Pixmap::from_vec(data, size)
        .ok_or_else(|| Error::BitmapDecode(format!("invalid bitmap size {width}x{height}")))
}

/// Composite `bitmap` with `style` at `download_size` onto a fresh surface
pub fn build_canvas(
    bitmap: &DecodedBitmap,
    style: &StyleParameters,
    download_size: u32,
) -> Result<Pixmap> {
    let params = DrawingParams::new(bitmap.pixmap(), style, download_size);
    tracing::debug!(
        source_width = bitmap.width(),
        source_height = bitmap.height(),
        download_size,
        padding = params.padding,
        border_width = params.border_width,
        border_radius = params.border_radius,
        total_size = params.total_size,
        "Compositing QR canvas"
    );

    let mut surface = PixmapSurface::new(params.surface_side())?;
    composite_all(&mut surface, &params);
    Ok(surface.into_pixmap())
}

/// Composite at the fixed live-preview size
pub fn preview_canvas(bitmap: &DecodedBitmap, style: &StyleParameters) -> Result<Pixmap> {
    build_canvas(bitmap, style, PREVIEW_SIZE)
}

/// Decode the QR bitmap and composite it into a finished surface.
///
/// Decoding is the only suspension point; drawing is synchronous.
pub async fn create_qr_canvas(options: QrCanvasOptions) -> Result<Pixmap> {
    let QrCanvasOptions {
        qr_bitmap,
        style,
        download_size,
    } = options;

    let bitmap = DecodedBitmap::decode(qr_bitmap).await?;
    build_canvas(&bitmap, &style, download_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{BorderStyle, Color};
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn checker_png(side: u32) -> Bytes {
        let img = RgbaImage::from_fn(side, side, |x, y| {
            if (x / 4 + y / 4) % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        Bytes::from(buf.into_inner())
    }

    fn rgb_at(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let c = pixmap.pixel(x, y).unwrap().demultiply();
        (c.red(), c.green(), c.blue(), c.alpha())
    }

    #[tokio::test]
    async fn test_garbage_bytes_fail_with_decode_error() {
        let options = QrCanvasOptions {
            qr_bitmap: Bytes::from_static(b"definitely not a png"),
            style: StyleParameters::default(),
            download_size: 300,
        };
        assert!(matches!(
            create_qr_canvas(options).await,
            Err(Error::BitmapDecode(_))
        ));
    }

    #[tokio::test]
    async fn test_surface_sized_to_total_geometry() {
        let options = QrCanvasOptions {
            qr_bitmap: checker_png(64),
            style: StyleParameters {
                margin: 20.0,
                border_width: 0.0,
                ..StyleParameters::default()
            },
            download_size: 1000,
        };
        let pixmap = create_qr_canvas(options).await.unwrap();
        assert_eq!(pixmap.width(), 1133);
        assert_eq!(pixmap.height(), 1133);
    }

    #[tokio::test]
    async fn test_layers_land_where_expected() {
        let style = StyleParameters {
            background_color: Color::rgb(0xff, 0xff, 0x00),
            stroke_color: Color::rgb(0xff, 0x00, 0x00),
            margin: 30.0,
            border_width: 10.0,
            border_radius: 0.0,
            border_style: BorderStyle::Square,
        };
        let options = QrCanvasOptions {
            qr_bitmap: checker_png(300),
            style,
            download_size: 300,
        };
        let pixmap = create_qr_canvas(options).await.unwrap();
        // padding 30, border 10 => side 370, artwork at 35..335
        assert_eq!(pixmap.width(), 370);

        assert_eq!(rgb_at(&pixmap, 2, 185), (0xff, 0x00, 0x00, 0xff));
        assert_eq!(rgb_at(&pixmap, 20, 185), (0xff, 0xff, 0x00, 0xff));
        assert_eq!(rgb_at(&pixmap, 36, 36), (0x00, 0x00, 0x00, 0xff));
        assert_eq!(rgb_at(&pixmap, 40, 36), (0xff, 0xff, 0x00, 0xff));
    }

    #[tokio::test]
    async fn test_rounded_corners_stay_transparent() {
        let style = StyleParameters {
            margin: 10.0,
            border_radius: 50.0,
            border_style: BorderStyle::Rounded,
            ..StyleParameters::default()
        };
        let options = QrCanvasOptions {
            qr_bitmap: checker_png(32),
            style,
            download_size: 600,
        };
        let pixmap = create_qr_canvas(options).await.unwrap();
        assert_eq!(rgb_at(&pixmap, 0, 0).3, 0);
        assert_eq!(rgb_at(&pixmap, 2, pixmap.height() / 2).3, 0xff);
    }

    #[tokio::test]
    async fn test_identical_inputs_are_pixel_identical() {
        let options = QrCanvasOptions {
            qr_bitmap: checker_png(50),
            style: StyleParameters {
                margin: 13.0,
                border_width: 7.0,
                border_radius: 21.0,
                border_style: BorderStyle::Rounded,
                ..StyleParameters::default()
            },
            download_size: 777,
        };
        let first = create_qr_canvas(options.clone()).await.unwrap();
        let second = create_qr_canvas(options).await.unwrap();
        assert_eq!(first.data(), second.data());
    }

    #[test]
    fn test_preview_and_export_share_proportions() {
        let bitmap = DecodedBitmap::decode_blocking(&checker_png(40)).unwrap();
        let style = StyleParameters {
            margin: 15.0,
            border_width: 6.0,
            ..StyleParameters::default()
        };

        let preview = preview_canvas(&bitmap, &style).unwrap();
        let export = build_canvas(&bitmap, &style, 900).unwrap();
        // 300 + 30 + 6 at preview scale, three times that at export
        assert_eq!(preview.width(), 336);
        assert_eq!(export.width(), 1008);
    }

    #[test]
    fn test_zero_radius_rounded_matches_square() {
        let bitmap = DecodedBitmap::decode_blocking(&checker_png(48)).unwrap();

        for (margin, border_width) in [(20.0, 0.0), (7.0, 9.0), (13.3, 5.5)] {
            let square = StyleParameters {
                margin,
                border_width,
                border_radius: 0.0,
                border_style: BorderStyle::Square,
                ..StyleParameters::default()
            };
            let rounded = StyleParameters {
                border_style: BorderStyle::Rounded,
                ..square.clone()
            };

            let a = build_canvas(&bitmap, &square, 777).unwrap();
            let b = build_canvas(&bitmap, &rounded, 777).unwrap();
            assert_eq!(a.width(), b.width());
            assert!(
                a.data() == b.data(),
                "margin {margin}, width {border_width}: rounded corners with zero radius differ from square"
            );
        }
    }

    #[test]
    fn test_premultiply_on_decode() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([200, 100, 50, 128]));
        let pixmap = rgba_to_pixmap(img).unwrap();
        let px = pixmap.pixels()[0];
        assert_eq!(px.alpha(), 128);
        assert_eq!(px.red(), 100);
        assert_eq!(px.green(), 50);
        assert_eq!(px.blue(), 25);
    }
}
