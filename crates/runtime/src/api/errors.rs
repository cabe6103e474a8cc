//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, action execution and the wire
//! codec so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use park_core::{ExecuteError, GameCommand, WireError};

use crate::replay::ReplayError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("{command} rejected: the game is paused")]
    Paused { command: GameCommand },

    #[error(transparent)]
    Execute(ExecuteError),

    #[error(transparent)]
    Wire(#[from] WireError),

    #[error(transparent)]
    Replay(#[from] ReplayError),
}

impl From<ExecuteError> for RuntimeError {
    fn from(error: ExecuteError) -> Self {
        match error {
            ExecuteError::Paused { command } => Self::Paused { command },
            error => Self::Execute(error),
        }
    }
}
