//! Error type shared by the checked entry points

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Checked plotting outside the buffer; nothing was written
    #[error("{axis} is out of range: {value} (limit {limit})")]
    OutOfRange {
        axis: &'static str,
        value: i32,
        limit: u32,
    },

    #[error(
        "invalid size ({image_width}, {image_height}) for blitting on pixel buffer of size ({width}, {height})"
    )]
    SizeMismatch {
        image_width: u32,
        image_height: u32,
        width: u32,
        height: u32,
    },

    #[error("{} already exists", .0.display())]
    FileExists(PathBuf),

    #[error("normalizing a vertex with length 0")]
    ZeroLengthVertex,

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid canvas configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// SDL2 reports its failures as plain strings
    #[error("display error: {0}")]
    Display(String),
}

impl From<String> for RenderError {
    fn from(message: String) -> Self {
        Self::Display(message)
    }
}
