//! Action execution errors.
//!
//! Every failure carries an [`ActionErrorKind`] for callers that only need the
//! category, and a [`MessageKey`] naming the text shown to the player.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{BannerIndex, StringPoolError};

/// Category of an action failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionErrorKind {
    /// Target index out of range, null, or not resolvable.
    InvalidTarget,
    /// Parameter outside the range allowed for the variant, or unknown variant.
    InvalidParameter,
    /// A pooled resource could not be allocated.
    ResourceExhausted,
    /// The action may not run while the game is paused.
    Disallowed,
}

/// User-facing message attached to a failure.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageKey {
    /// No message; the failure is silent in the UI.
    None,
    InvalidSelectionOfObjects,
    CantRepaintThis,
    CantSetBannerText,
    GameIsPaused,
}

// ============================================================================
// Banner Action Errors
// ============================================================================

/// Errors raised by banner style changes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BannerError {
    /// Index is the null sentinel or beyond the banner table.
    #[error("banner index {index} is out of range")]
    IndexOutOfRange { index: BannerIndex },

    /// Index is in range but the slot holds no banner.
    #[error("{index} is not in use")]
    BannerNotFound { index: BannerIndex },

    /// The banner record has no backing tile element.
    #[error("could not find tile element for {index}")]
    ElementNotFound { index: BannerIndex },

    #[error("invalid primary colour: colour = {colour}")]
    InvalidPrimaryColour { colour: u8 },

    #[error("invalid text colour: colour = {colour}")]
    InvalidTextColour { colour: u8 },

    /// Wire kind byte does not name a style variant.
    #[error("invalid banner style type: {kind}")]
    UnknownStyleKind { kind: u8 },

    #[error("cannot set banner text: {0}")]
    TextAllocation(StringPoolError),
}

impl BannerError {
    pub fn kind(&self) -> ActionErrorKind {
        use BannerError::*;
        match self {
            IndexOutOfRange { .. } | BannerNotFound { .. } | ElementNotFound { .. } => {
                ActionErrorKind::InvalidTarget
            }
            InvalidPrimaryColour { .. } | InvalidTextColour { .. } | UnknownStyleKind { .. } => {
                ActionErrorKind::InvalidParameter
            }
            TextAllocation(_) => ActionErrorKind::ResourceExhausted,
        }
    }

    pub fn message_key(&self) -> MessageKey {
        use BannerError::*;
        match self {
            IndexOutOfRange { .. } | BannerNotFound { .. } => MessageKey::InvalidSelectionOfObjects,
            ElementNotFound { .. } | UnknownStyleKind { .. } => MessageKey::None,
            InvalidPrimaryColour { .. } | InvalidTextColour { .. } => MessageKey::CantRepaintThis,
            TextAllocation(_) => MessageKey::CantSetBannerText,
        }
    }
}

impl GameError for BannerError {
    fn severity(&self) -> ErrorSeverity {
        use BannerError::*;
        match self {
            IndexOutOfRange { .. } | BannerNotFound { .. } => ErrorSeverity::Validation,
            ElementNotFound { .. } => ErrorSeverity::Internal,
            InvalidPrimaryColour { .. } | InvalidTextColour { .. } | UnknownStyleKind { .. } => {
                ErrorSeverity::Validation
            }
            TextAllocation(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use BannerError::*;
        match self {
            IndexOutOfRange { .. } => "BANNER_INDEX_OUT_OF_RANGE",
            BannerNotFound { .. } => "BANNER_NOT_FOUND",
            ElementNotFound { .. } => "BANNER_ELEMENT_NOT_FOUND",
            InvalidPrimaryColour { .. } => "BANNER_INVALID_PRIMARY_COLOUR",
            InvalidTextColour { .. } => "BANNER_INVALID_TEXT_COLOUR",
            UnknownStyleKind { .. } => "BANNER_UNKNOWN_STYLE_KIND",
            TextAllocation(_) => "BANNER_TEXT_ALLOCATION",
        }
    }
}
