//! QR artwork rendering and verification
//!
//! The compositor treats QR rendering as a black box behind [`QrRenderer`].
//! [`QrEncoder`] is the bundled renderer; [`QrDecoder`] reads an exported
//! image back to confirm the artwork still scans.

mod decoder;
mod encoder;

pub use decoder::QrDecoder;
pub use encoder::QrEncoder;

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Source of bare QR bitmaps at a requested pixel size
#[async_trait]
pub trait QrRenderer: Send + Sync {
    /// Render `data` as an encoded raster of exactly `size` x `size` pixels
    async fn render_png(&self, data: &str, size: u32) -> Result<Bytes>;
}

/// Shape used to draw each dark module
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DotShape {
    /// Filled square cells
    #[default]
    Square,
    /// Filled circles inscribed in each cell
    Dots,
}

impl DotShape {
    /// Parse a dot shape identifier (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "square" => Some(Self::Square),
            "dots" | "dot" => Some(Self::Dots),
            _ => None,
        }
    }
}

/// QR error correction level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ErrorCorrection {
    /// ~7% recovery
    L,
    /// ~15% recovery
    #[default]
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    H,
}

impl From<ErrorCorrection> for qrcode::EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::L => qrcode::EcLevel::L,
            ErrorCorrection::M => qrcode::EcLevel::M,
            ErrorCorrection::Q => qrcode::EcLevel::Q,
            ErrorCorrection::H => qrcode::EcLevel::H,
        }
    }
}
