//! PNG serialisation and file save

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tiny_skia::Pixmap;
use uuid::Uuid;

/// File name used when the caller does not supply one
pub const DEFAULT_FILENAME: &str = "qr-code.png";

/// Encode the finished surface as PNG bytes
pub fn encode_png(surface: &Pixmap) -> Result<Vec<u8>> {
    surface
        .encode_png()
        .map_err(|e| Error::Encode(e.to_string()))
}

/// Encode `surface` and save it to `path` (default [`DEFAULT_FILENAME`]).
///
/// The bytes go to a temporary sibling first and are renamed into place, so
/// nothing appears at `path` when encoding or writing fails.
pub async fn serialize_and_download(surface: &Pixmap, path: Option<&Path>) -> Result<PathBuf> {
    let target = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FILENAME));
    let bytes = encode_png(surface)?;

    let file_name = target
        .file_name()
        .ok_or_else(|| Error::Other(format!("'{}' has no file name", target.display())))?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(format!(".{}.tmp", Uuid::new_v4().simple()));
    let tmp = target.with_file_name(tmp_name);

    if let Err(e) = tokio::fs::write(&tmp, &bytes).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    if let Err(e) = tokio::fs::rename(&tmp, &target).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }

    tracing::info!(
        path = %target.display(),
        bytes = bytes.len(),
        width = surface.width(),
        "Saved QR image"
    );
    Ok(target)
}
