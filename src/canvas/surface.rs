//! Drawing surface abstraction
//!
//! Layer drawers only talk to a [`Surface`]. [`PixmapSurface`] paints into a
//! `tiny_skia::Pixmap`; tests substitute a recorder to observe draw order.

use crate::error::{Error, Result};
use crate::style::Color;
use tiny_skia::{
    FillRule, FilterQuality, Paint, Path, PathBuilder, Pixmap, PixmapPaint, PixmapRef, Rect,
    Stroke, Transform,
};

/// Canvas-like drawing operations used by the compositor
pub trait Surface {
    /// Fill an axis-aligned rectangle
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fill a closed path using the non-zero winding rule
    fn fill_path(&mut self, path: &Path, color: Color);

    /// Stroke the outline of an axis-aligned rectangle
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);

    /// Stroke a path
    fn stroke_path(&mut self, path: &Path, color: Color, width: f32);

    /// Draw `image` scaled to `size` x `size` with its top-left corner at (`x`, `y`)
    fn draw_image(&mut self, image: PixmapRef<'_>, x: f32, y: f32, size: f32);
}

/// Anti-aliased raster surface backed by tiny-skia
#[derive(Debug)]
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    /// Allocate a transparent square surface of `side` pixels
    pub fn new(side: u32) -> Result<Self> {
        let pixmap = Pixmap::new(side, side).ok_or(Error::SurfaceUnavailable {
            width: side,
            height: side,
        })?;
        Ok(Self { pixmap })
    }

    /// Borrow the underlying pixel buffer
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Release the finished pixel buffer
    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    fn paint(color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(color.into());
        paint.anti_alias = true;
        paint
    }

    fn stroke(width: f32) -> Stroke {
        Stroke {
            width,
            ..Stroke::default()
        }
    }
}

impl Surface for PixmapSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.pixmap
            .fill_rect(rect, &Self::paint(color), Transform::identity(), None);
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        self.pixmap.fill_path(
            path,
            &Self::paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        let path = PathBuilder::from_rect(rect);
        self.stroke_path(&path, color, width);
    }

    fn stroke_path(&mut self, path: &Path, color: Color, width: f32) {
        self.pixmap.stroke_path(
            path,
            &Self::paint(color),
            &Self::stroke(width),
            Transform::identity(),
            None,
        );
    }

    fn draw_image(&mut self, image: PixmapRef<'_>, x: f32, y: f32, size: f32) {
        let sx = size / image.width() as f32;
        let sy = size / image.height() as f32;
        let transform = Transform::from_row(sx, 0.0, 0.0, sy, x, y);

        // an exact pixel-aligned blit needs no resampling
        let quality = if sx == 1.0 && sy == 1.0 && x.fract() == 0.0 && y.fract() == 0.0 {
            FilterQuality::Nearest
        } else {
            FilterQuality::Bilinear
        };

        let paint = PixmapPaint {
            quality,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(0, 0, image, &paint, transform, None);
    }
}

#[cfg(test)]
pub(crate) mod recording {
    //! Surface that records draw calls instead of rasterising them

    use super::*;

    /// One recorded drawing operation
    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawOp {
        FillRect { rect: Rect, color: Color },
        FillPath { bounds: Rect, color: Color },
        StrokeRect { rect: Rect, color: Color, width: f32 },
        StrokePath { bounds: Rect, color: Color, width: f32 },
        DrawImage { x: f32, y: f32, size: f32 },
    }

    impl DrawOp {
        pub fn is_stroke(&self) -> bool {
            matches!(self, DrawOp::StrokeRect { .. } | DrawOp::StrokePath { .. })
        }
    }

    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub ops: Vec<DrawOp>,
    }

    impl Surface for RecordingSurface {
        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.ops.push(DrawOp::FillRect { rect, color });
        }

        fn fill_path(&mut self, path: &Path, color: Color) {
            self.ops.push(DrawOp::FillPath {
                bounds: path.bounds(),
                color,
            });
        }

        fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
            self.ops.push(DrawOp::StrokeRect { rect, color, width });
        }

        fn stroke_path(&mut self, path: &Path, color: Color, width: f32) {
            self.ops.push(DrawOp::StrokePath {
                bounds: path.bounds(),
                color,
                width,
            });
        }

        fn draw_image(&mut self, _image: PixmapRef<'_>, x: f32, y: f32, size: f32) {
            self.ops.push(DrawOp::DrawImage { x, y, size });
        }
    }
}
