//! Object lifecycle and document errors.

use park_core::{ErrorSeverity, GameError};

use crate::pools::{ImageId, ImagePoolError};

/// Errors raised while reading, loading or unloading an object.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ObjectError {
    /// The configuration document root is not a JSON object.
    #[error("{object} document root must be an object")]
    RootNotObject { object: String },

    /// Every display-name slot is taken.
    #[error("no object string slot left for {object}")]
    NameExhausted { object: String },

    #[error("image allocation for {object} failed: {source}")]
    ImageAllocation {
        object: String,
        #[source]
        source: ImagePoolError,
    },

    #[error("releasing images {base}..+{count} of {object} failed: {source}")]
    ImageRelease {
        object: String,
        base: ImageId,
        count: u32,
        #[source]
        source: ImagePoolError,
    },
}

impl GameError for ObjectError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::RootNotObject { .. } => ErrorSeverity::Validation,
            Self::NameExhausted { .. } | Self::ImageAllocation { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::ImageRelease { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RootNotObject { .. } => "OBJECT_ROOT_NOT_OBJECT",
            Self::NameExhausted { .. } => "OBJECT_NAME_EXHAUSTED",
            Self::ImageAllocation { .. } => "OBJECT_IMAGE_ALLOCATION",
            Self::ImageRelease { .. } => "OBJECT_IMAGE_RELEASE",
        }
    }
}
