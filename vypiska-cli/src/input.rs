//! Input file classification and output path derivation.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::export::OutputFileType;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unsupported input file extension {0:?} (expected .pdf or .txt)")]
    UnsupportedExtension(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Needs the external PDF-to-text step first.
    Pdf,
    /// Already flattened statement text.
    Text,
}

pub fn classify_input(path: &Path) -> Result<InputKind, InputError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => Ok(InputKind::Pdf),
        "txt" => Ok(InputKind::Text),
        _ => Err(InputError::UnsupportedExtension(format!(".{ext}"))),
    }
}

/// Text file written next to a PDF input.
pub fn intermediate_txt_path(input: &Path) -> PathBuf {
    input.with_extension("txt")
}

/// Output next to the input, with the extension of the output type.
pub fn default_output_path(input: &Path, file_type: OutputFileType) -> PathBuf {
    input.with_extension(file_type.extension())
}
