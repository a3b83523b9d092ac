//! Turns the current UI selection into a classification request.
//!
//! The selection carries an explicit active tab. On the files tab, more
//! than one file becomes a batch request and exactly one a single-file
//! request; with nothing selected the trimmed text field is used instead.
//! Oversized selections are truncated to the cap and a warning is surfaced
//! rather than rejecting the submission. No side effects.

use triage_core::defaults::MAX_BATCH_FILES;
use triage_core::{ClassificationRequest, FilePayload, Result};

/// Which input tab is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTab {
    Text,
    Files,
}

/// Current text-field value and file selection.
#[derive(Debug, Clone)]
pub struct Selection {
    pub tab: InputTab,
    pub text: String,
    pub files: Vec<FilePayload>,
}

impl Selection {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            tab: InputTab::Text,
            text: value.into(),
            files: Vec::new(),
        }
    }

    pub fn files(files: Vec<FilePayload>) -> Self {
        Self {
            tab: InputTab::Files,
            text: String::new(),
            files,
        }
    }
}

/// Non-fatal signal surfaced alongside a built request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// The selection held more files than the cap; only the first
    /// [`MAX_BATCH_FILES`] were kept.
    FilesTruncated { selected: usize },
}

impl std::fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildWarning::FilesTruncated { selected } => write!(
                f,
                "{} files selected; only the first {} will be processed",
                selected, MAX_BATCH_FILES
            ),
        }
    }
}

/// A validated request plus any warning raised while building it.
#[derive(Debug, Clone)]
pub struct BuiltRequest {
    pub request: ClassificationRequest,
    pub warning: Option<BuildWarning>,
}

/// Cap a file list at [`MAX_BATCH_FILES`], keeping selection order.
///
/// Applied both here and on the file intake path, so no caller can slip an
/// oversized selection through.
pub fn cap_files(mut files: Vec<FilePayload>) -> (Vec<FilePayload>, Option<BuildWarning>) {
    if files.len() > MAX_BATCH_FILES {
        let selected = files.len();
        files.truncate(MAX_BATCH_FILES);
        (files, Some(BuildWarning::FilesTruncated { selected }))
    } else {
        (files, None)
    }
}

/// Build a request from the current selection.
///
/// Fails with [`triage_core::Error::EmptyInput`] when the trimmed text is
/// empty and no file is selected.
pub fn build(selection: Selection) -> Result<BuiltRequest> {
    match selection.tab {
        InputTab::Files if !selection.files.is_empty() => {
            let (mut files, warning) = cap_files(selection.files);
            let request = if files.len() == 1 {
                ClassificationRequest::SingleFile(files.remove(0))
            } else {
                ClassificationRequest::multi(files)?
            };
            Ok(BuiltRequest { request, warning })
        }
        // Text tab, or files tab with nothing selected yet.
        _ => Ok(BuiltRequest {
            request: ClassificationRequest::text(&selection.text)?,
            warning: None,
        }),
    }
}
