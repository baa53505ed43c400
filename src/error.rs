//! Error kinds for the crop pipeline.

use thiserror::Error;

/// Everything that can go wrong between picking a file and saving the
/// cropped output. None of these are transient; no operation is retried.
#[derive(Error, Debug)]
pub enum CropError {
    #[error("failed to load PDF: {0}")]
    Load(#[from] lopdf::Error),
    #[error("failed to serialize PDF: {0}")]
    Io(#[from] std::io::Error),
    #[error("document has no pages")]
    PageAccess,
    #[error("no selection to apply")]
    NoSelection,
    #[error("no cropped document to save")]
    NoArtifact,
}

pub type Result<T> = std::result::Result<T, CropError>;
