//! QR code encoder

use super::{DotShape, ErrorCorrection, QrRenderer};
use crate::error::{Error, Result};
use crate::style::Color;
use async_trait::async_trait;
use bytes::Bytes;
use qrcode::QrCode;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};

/// Renders bare QR artwork (dark modules on a transparent background)
#[derive(Debug, Clone)]
pub struct QrEncoder {
    ec_level: ErrorCorrection,
    dot_color: Color,
    dot_shape: DotShape,
}

impl QrEncoder {
    /// Create a new QR encoder with default settings (Medium ECC, black squares)
    pub fn new() -> Self {
        Self {
            ec_level: ErrorCorrection::M,
            dot_color: Color::BLACK,
            dot_shape: DotShape::Square,
        }
    }

    /// Use a specific error correction level
    pub fn with_ec_level(mut self, ec_level: ErrorCorrection) -> Self {
        self.ec_level = ec_level;
        self
    }

    /// Paint dark modules with `color`
    pub fn with_dot_color(mut self, color: Color) -> Self {
        self.dot_color = color;
        self
    }

    /// Draw dark modules as `shape`
    pub fn with_dot_shape(mut self, shape: DotShape) -> Self {
        self.dot_shape = shape;
        self
    }

    /// Render `data` onto a `size` x `size` pixmap with no quiet zone
    pub fn render(&self, data: &str, size: u32) -> Result<Pixmap> {
        let code = QrCode::with_error_correction_level(data, self.ec_level.into())
            .map_err(|e| Error::QrEncode(format!("Failed to create QR code: {}", e)))?;

        let mut pixmap = Pixmap::new(size, size).ok_or(Error::SurfaceUnavailable {
            width: size,
            height: size,
        })?;

        let modules = code.width();
        let colors = code.to_colors();

        let mut paint = Paint::default();
        paint.set_color(self.dot_color.into());
        paint.anti_alias = self.dot_shape == DotShape::Dots;

        // integer cell edges keep neighbouring squares seamless
        let edge = |i: usize| (i as u64 * size as u64 / modules as u64) as f32;

        let mut pb = PathBuilder::new();
        for (idx, color) in colors.iter().enumerate() {
            if *color != qrcode::Color::Dark {
                continue;
            }
            let (x, y) = (idx % modules, idx / modules);
            let (left, top, right, bottom) = (edge(x), edge(y), edge(x + 1), edge(y + 1));

            match self.dot_shape {
                DotShape::Square => {
                    if let Some(rect) = Rect::from_ltrb(left, top, right, bottom) {
                        pb.push_rect(rect);
                    }
                }
                DotShape::Dots => {
                    let r = (right - left).min(bottom - top) / 2.0;
                    pb.push_circle((left + right) / 2.0, (top + bottom) / 2.0, r);
                }
            }
        }

        if let Some(path) = pb.finish() {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }

        tracing::debug!(modules, size, shape = ?self.dot_shape, "Rendered QR artwork");
        Ok(pixmap)
    }

    /// Render `data` and encode it as PNG bytes
    pub fn render_png_blocking(&self, data: &str, size: u32) -> Result<Bytes> {
        let pixmap = self.render(data, size)?;
        let png = pixmap
            .encode_png()
            .map_err(|e| Error::Encode(e.to_string()))?;
        Ok(Bytes::from(png))
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QrRenderer for QrEncoder {
    async fn render_png(&self, data: &str, size: u32) -> Result<Bytes> {
        let encoder = self.clone();
        let data = data.to_string();
        tokio::task::spawn_blocking(move || encoder.render_png_blocking(&data, size))
            .await
            .map_err(|e| Error::QrEncode(format!("render task failed: {e}")))?
    }
}
