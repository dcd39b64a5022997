use thiserror::Error;

/// Failures surfaced by editor operations.
///
/// Upload failures are user-visible (they become an error toast); the rest
/// are programming or host errors reported to the caller.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("not an image file: {mime:?}")]
    NotAnImage { mime: String },

    #[error("image file could not be read")]
    ReadFailed,

    #[error("image data could not be decoded: {0}")]
    DecodeFailed(String),

    #[error("no element with id {0:?}")]
    UnknownElement(String),

    #[error("invalid editor config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

impl EditorError {
    /// The message shown to the user in the notification toast.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotAnImage { .. } => "Please select an image file",
            Self::ReadFailed => "Failed to read image file",
            Self::DecodeFailed(_) => "Failed to load image. Please try another one.",
            Self::UnknownElement(_) => "Element no longer exists",
            Self::InvalidConfig(_) => "Editor configuration is invalid",
        }
    }
}
