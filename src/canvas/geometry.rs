//! Scaling from UI units to output pixels
//!
//! UI magnitudes are expressed in pixels of the fixed-size live preview, so a
//! value is scaled by `download_size / PREVIEW_SIZE`. Every function here is
//! linear in `download_size`; inputs are not validated.
//!
//! Products are formed before dividing so whole-pixel results stay exact.

/// Side length of the live preview in pixels
pub const PREVIEW_SIZE: u32 = 300;

const SCALE_DIVISOR: f32 = PREVIEW_SIZE as f32;

/// Padding between the border and the QR artwork
pub fn padding(margin: f32, download_size: f32) -> f32 {
    margin * download_size / SCALE_DIVISOR
}

/// Corner radius in output pixels
pub fn scaled_border_radius(radius: f32, download_size: f32) -> f32 {
    radius * download_size / SCALE_DIVISOR
}

/// Border stroke thickness in output pixels
pub fn scaled_border_width(width: f32, download_size: f32) -> f32 {
    width * download_size / SCALE_DIVISOR
}

/// Side length of the exported image.
///
/// Half a stroke sits on each side of the artwork, so the full border width
/// is added once.
pub fn total_size(download_size: f32, padding: f32, scaled_border_width: f32) -> f32 {
    download_size + padding * 2.0 + scaled_border_width
}
