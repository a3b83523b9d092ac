//! File intake checks for the upload path.
//!
//! The service extracts text from `.txt` and `.pdf` documents only; anything
//! else is rejected before a byte leaves the client. Content types are
//! resolved from magic bytes first, falling back to the extension, since
//! upload metadata is unreliable.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::models::FilePayload;

/// Extensions the classification service can extract text from.
static ACCEPTED_EXTENSIONS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["txt", "pdf"].into_iter().collect());

fn extension_of(filename: &str) -> Option<String> {
    let ext = filename.rsplit('.').next()?;
    if ext == filename {
        // No dot at all.
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// True when the filename carries an accepted extension.
pub fn is_accepted_filename(filename: &str) -> bool {
    extension_of(filename)
        .map(|ext| ACCEPTED_EXTENSIONS.contains(ext.as_str()))
        .unwrap_or(false)
}

/// Resolve a MIME type from magic bytes, then extension.
pub fn detect_content_type(filename: &str, data: &[u8]) -> String {
    if let Some(kind) = infer::get(data) {
        return kind.mime_type().to_string();
    }

    // Text formats carry no magic bytes.
    match extension_of(filename).as_deref() {
        Some("txt") => "text/plain".to_string(),
        Some("pdf") => "application/pdf".to_string(),
        _ => "application/octet-stream".to_string(),
    }
}

/// Validate and package an uploaded file.
pub fn intake_file(filename: &str, data: Vec<u8>) -> Result<FilePayload> {
    if !is_accepted_filename(filename) {
        return Err(Error::InvalidInput(format!(
            "unsupported file type: {} (accepted: .txt, .pdf)",
            filename
        )));
    }

    let content_type = detect_content_type(filename, &data);
    Ok(FilePayload {
        filename: filename.to_string(),
        content_type,
        data,
    })
}
