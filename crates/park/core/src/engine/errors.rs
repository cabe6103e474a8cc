//! Error types for action execution pipeline.

use crate::action::{
    ActionErrorKind, ActionTransition, BannerSetStyleAction, GameCommand, MessageKey,
};
use crate::error::{ErrorSeverity, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while querying or executing an action through the engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("banner set style action failed: {0}")]
    BannerSetStyle(TransitionPhaseError<<BannerSetStyleAction as ActionTransition>::Error>),

    #[error("{command} is not allowed while the game is paused")]
    Paused { command: GameCommand },
}

impl ExecuteError {
    pub fn kind(&self) -> ActionErrorKind {
        match self {
            Self::BannerSetStyle(err) => err.error.kind(),
            Self::Paused { .. } => ActionErrorKind::Disallowed,
        }
    }

    pub fn message_key(&self) -> MessageKey {
        match self {
            Self::BannerSetStyle(err) => err.error.message_key(),
            Self::Paused { .. } => MessageKey::GameIsPaused,
        }
    }

    /// Phase that failed, if the action got as far as the pipeline.
    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            Self::BannerSetStyle(err) => Some(err.phase),
            Self::Paused { .. } => None,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::BannerSetStyle(err) => err.error.severity(),
            Self::Paused { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BannerSetStyle(err) => err.error.error_code(),
            Self::Paused { .. } => "ENGINE_GAME_PAUSED",
        }
    }
}
