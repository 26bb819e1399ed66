//! Error handling for the atlas packer
//!
//! Every error here is fatal for the whole run: the tool is a batch process
//! with no partial-success output, so nothing is recovered internally.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for atlas packing runs
#[derive(Debug, Error)]
pub enum AtlasError {
    /// Bad command-line value
    #[error("invalid {what} '{value}'")]
    Config { what: &'static str, value: String },

    /// Font file or sprite image could not be opened or decoded
    #[error("failed to load {path}: {reason}")]
    ResourceLoad { path: PathBuf, reason: String },

    /// Font engine cannot rasterize the requested code point
    #[error("font engine could not render code point U+{code:04X}")]
    FontRender { code: u32 },

    /// A sprite does not fit the configured sheet even on its own
    #[error(
        "sprite '{label}' ({width}x{height} plus {border}px border) does not fit a {sheet_width}x{sheet_height} sheet"
    )]
    SpriteTooLarge {
        label: String,
        width: u32,
        height: u32,
        border: u32,
        sheet_width: u32,
        sheet_height: u32,
    },

    /// Sheet image or descriptor write failure
    #[error("failed to write {path}: {reason}")]
    Io { path: PathBuf, reason: String },
}

/// Type alias for Results in the atlas packer
pub type AtlasResult<T> = Result<T, AtlasError>;
