//! qrcanvas - styled QR code export
//!
//! Takes a bare QR bitmap and a set of style parameters (colors, padding,
//! square or rounded border) and composites them into one flat raster at any
//! output resolution, geometrically consistent with a fixed-size preview.
//!
//! # Features
//!
//! - **Compositing**: background, QR artwork and border layered on a
//!   tiny-skia surface
//! - **Resolution independence**: every style magnitude scales linearly with
//!   the download size
//! - **QR Processing**: bundled `qrcode` renderer and `rqrr` verification
//! - **Async-first**: bitmap decoding runs off the Tokio executor
//!
//! # Example
//!
//! ```no_run
//! use qrcanvas::{QrCanvasOptions, QrEncoder, QrRenderer, StyleParameters};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let qr_bitmap = QrEncoder::new().render_png("https://example.com", 1000).await?;
//!
//!     let surface = qrcanvas::create_qr_canvas(QrCanvasOptions {
//!         qr_bitmap,
//!         style: StyleParameters::default(),
//!         download_size: 1000,
//!     })
//!     .await?;
//!
//!     qrcanvas::serialize_and_download(&surface, None).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod canvas;
pub mod config;
pub mod error;
pub mod logging;
pub mod qr;
pub mod style;

// Re-exports for convenience
pub use error::{Error, Result};

pub use canvas::{
    DEFAULT_FILENAME, DecodedBitmap, PREVIEW_SIZE, QrCanvasOptions, build_canvas,
    create_qr_canvas, encode_png, preview_canvas, serialize_and_download,
};
pub use config::{ContentOptions, ExportOptions, LogRotation, LoggingOptions, QrCanvasConfig};
pub use qr::{DotShape, ErrorCorrection, QrDecoder, QrEncoder, QrRenderer};
pub use style::{BorderStyle, Color, StyleParameters};
