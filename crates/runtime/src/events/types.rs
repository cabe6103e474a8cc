//! Event types for different topics.

use park_core::{
    Action, ActionErrorKind, ActionOutcome, Intent, MessageKey, engine::TransitionPhase,
};
use serde::{Deserialize, Serialize};

/// Events related to game state changes (actions, failures, pausing)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameStateEvent {
    /// An action was executed and appended to the replay log
    ActionExecuted {
        /// Position of the action in the replay log
        sequence: u64,
        action: Action,
        outcome: ActionOutcome,
    },

    /// An action was rejected; state is unchanged
    ActionFailed {
        action: Action,
        /// `None` when the action never entered the pipeline (e.g. paused)
        phase: Option<TransitionPhase>,
        kind: ActionErrorKind,
        message: MessageKey,
        error: String,
    },

    PauseChanged { paused: bool },
}

/// Events consumed by views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiEvent {
    /// Notification raised by an executed action
    Intent(Intent),
}
