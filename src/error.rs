//! Error types for qrcanvas operations

use thiserror::Error;

/// Result type alias using qrcanvas's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrcanvas operations
#[derive(Error, Debug)]
pub enum Error {
    /// The QR bitmap bytes could not be decoded into a drawable image
    #[error("Failed to decode QR bitmap: {0}")]
    BitmapDecode(String),

    /// The output surface could not be allocated
    #[error("Drawing surface unavailable ({width}x{height})")]
    SurfaceUnavailable {
        /// Requested surface width in pixels
        width: u32,
        /// Requested surface height in pixels
        height: u32,
    },

    /// Serialising the surface to PNG failed
    #[error("Failed to encode PNG: {0}")]
    Encode(String),

    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// A color string could not be parsed
    #[error("Invalid color '{0}', expected #rgb, #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(format!("JSON error: {}", e))
    }
}
