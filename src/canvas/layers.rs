//! Layer drawers and the compositor
//!
//! Layers are painted background first, then the QR artwork, then the border
//! so the stroke is never covered by the artwork.

use super::geometry;
use super::path::rounded_rect_path;
use super::surface::Surface;
use crate::style::{BorderStyle, Color, StyleParameters};
use tiny_skia::{PixmapRef, Rect};

const SIDE_EPSILON: f32 = 1e-3;

/// Per-export drawing inputs with every magnitude already in output pixels
#[derive(Debug, Clone, Copy)]
pub struct DrawingParams<'a> {
    /// Decoded QR artwork
    pub image: PixmapRef<'a>,
    /// Background fill color
    pub background_color: Color,
    /// Border stroke color
    pub stroke_color: Color,
    /// Corner treatment
    pub border_style: BorderStyle,
    /// Footprint of the QR artwork
    pub download_size: f32,
    /// Space between border and artwork
    pub padding: f32,
    /// Side length of the whole composite
    pub total_size: f32,
    /// Scaled corner radius
    pub border_radius: f32,
    /// Scaled stroke thickness, never negative
    pub border_width: f32,
}

impl<'a> DrawingParams<'a> {
    /// Scale `style` against `download_size` and derive the composite geometry
    pub fn new(image: PixmapRef<'a>, style: &StyleParameters, download_size: u32) -> Self {
        let download_size = download_size as f32;
        let padding = geometry::padding(style.margin, download_size);
        // NaN and negative widths both mean "no border"
        let border_width = if style.has_border() {
            geometry::scaled_border_width(style.border_width, download_size)
        } else {
            0.0
        };
        let border_radius = geometry::scaled_border_radius(style.border_radius, download_size);
        let total_size = geometry::total_size(download_size, padding, border_width);

        Self {
            image,
            background_color: style.background_color,
            stroke_color: style.stroke_color,
            border_style: style.border_style,
            download_size,
            padding,
            total_size,
            border_radius,
            border_width,
        }
    }

    /// Distance from the surface edge to the centre line of the border stroke
    pub fn border_inset(&self) -> f32 {
        self.border_width / 2.0
    }

    /// Top-left offset of the QR artwork on both axes
    pub fn image_offset(&self) -> f32 {
        self.border_inset() + self.padding
    }

    /// Pixel side length of the surface that holds this composite
    pub fn surface_side(&self) -> u32 {
        // canvas dimensions truncate fractional sizes; the epsilon absorbs
        // f32 rounding just below a whole size
        (self.total_size + SIDE_EPSILON) as u32
    }

    fn inset_rect(&self) -> Option<Rect> {
        let inset = self.border_inset();
        let side = self.total_size - self.border_width;
        Rect::from_xywh(inset, inset, side, side)
    }
}

/// Fill the background, inset by half the border width so the stroke is
/// centred on its edge.
pub fn draw_background<S: Surface + ?Sized>(surface: &mut S, params: &DrawingParams<'_>) {
    match params.border_style {
        BorderStyle::Rounded => {
            match rounded_rect_path(params.total_size, params.border_radius, params.border_inset())
            {
                Some(path) => surface.fill_path(&path, params.background_color),
                None => tracing::warn!(
                    total_size = params.total_size,
                    "Skipping background: degenerate rounded path"
                ),
            }
        }
        BorderStyle::Square => match params.inset_rect() {
            Some(rect) => surface.fill_rect(rect, params.background_color),
            None => tracing::warn!(
                total_size = params.total_size,
                "Skipping background: empty rectangle"
            ),
        },
    }
    tracing::trace!(style = ?params.border_style, "Background layer drawn");
}

/// Stroke the border. Does nothing when the border width is not positive.
pub fn draw_border<S: Surface + ?Sized>(surface: &mut S, params: &DrawingParams<'_>) {
    if params.border_width <= 0.0 {
        return;
    }

    match params.border_style {
        BorderStyle::Rounded => {
            if let Some(path) =
                rounded_rect_path(params.total_size, params.border_radius, params.border_inset())
            {
                surface.stroke_path(&path, params.stroke_color, params.border_width);
            }
        }
        BorderStyle::Square => {
            if let Some(rect) = params.inset_rect() {
                surface.stroke_rect(rect, params.stroke_color, params.border_width);
            }
        }
    }
    tracing::trace!(width = params.border_width, "Border layer drawn");
}

/// Blit the QR artwork inside the border and padding at its download size
pub fn draw_qr_image<S: Surface + ?Sized>(surface: &mut S, params: &DrawingParams<'_>) {
    let offset = params.image_offset();
    surface.draw_image(params.image, offset, offset, params.download_size);
    tracing::trace!(offset, size = params.download_size, "QR layer drawn");
}

/// Paint every layer onto `surface` in order: background, QR image, border
pub fn composite_all<S: Surface + ?Sized>(surface: &mut S, params: &DrawingParams<'_>) {
    draw_background(surface, params);
    draw_qr_image(surface, params);
    draw_border(surface, params);
}
