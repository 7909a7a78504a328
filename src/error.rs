use thiserror::Error;

/// Errors raised by gallery state operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GalleryError {
    #[error("position {index} is outside the active list (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no photo with id {0}")]
    UnknownPhoto(u32),

    #[error("unknown category: {0}")]
    UnknownCategory(String),
}
