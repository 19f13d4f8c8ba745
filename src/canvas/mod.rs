//! Export-time compositing
//!
//! Turns a bare QR bitmap plus [`StyleParameters`](crate::StyleParameters)
//! into a single raster: background, QR artwork, then an optional square or
//! rounded border, all scaled to the requested download size.

pub mod builder;
pub mod export;
pub mod geometry;
pub mod layers;
pub mod path;
pub mod surface;

pub use builder::{
    DecodedBitmap, QrCanvasOptions, build_canvas, create_qr_canvas, preview_canvas,
};
pub use export::{DEFAULT_FILENAME, encode_png, serialize_and_download};
pub use geometry::PREVIEW_SIZE;
pub use layers::{DrawingParams, composite_all, draw_background, draw_border, draw_qr_image};
pub use path::rounded_rect_path;
pub use surface::{PixmapSurface, Surface};
