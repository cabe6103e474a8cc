//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! querying and executing actions or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use park_core::{Action, ActionOutcome, ActionPacket, GameState};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::replay::ActionLog;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Validate an action without applying it
    pub async fn query(&self, action: Action) -> Result<ActionOutcome> {
        self.request(|reply| Command::Query { action, reply })
            .await?
    }

    /// Validate and apply an action
    pub async fn execute(&self, action: Action) -> Result<ActionOutcome> {
        self.request(|reply| Command::Execute { action, reply })
            .await?
    }

    /// Decode and execute an encoded action
    pub async fn execute_packet(&self, packet: ActionPacket) -> Result<ActionOutcome> {
        self.request(|reply| Command::ExecutePacket { packet, reply })
            .await?
    }

    /// Pause or resume the game
    pub async fn set_paused(&self, paused: bool) -> Result<()> {
        self.request(|reply| Command::SetPaused { paused, reply })
            .await
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Snapshot of every action executed so far
    pub async fn action_log(&self) -> Result<ActionLog> {
        self.request(|reply| Command::QueryLog { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::GameState` - Action execution, failures and pause changes
    /// - `Topic::Ui` - Intents raised by executed actions
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use park_runtime::Topic;
    ///
    /// let mut ui_rx = handle.subscribe(Topic::Ui);
    /// while let Ok(event) = ui_rx.recv().await {
    ///     // Refresh the affected window
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
