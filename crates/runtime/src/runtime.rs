//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the park.

use std::env;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use park_core::{GameConfig, GameState};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Start with the game paused (default: false)
    pub start_paused: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            start_paused: false,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PARK_EVENT_BUFFER` - Capacity of each event topic (default: 100)
    /// - `PARK_COMMAND_BUFFER` - Command queue size (default: 32)
    /// - `PARK_START_PAUSED` - Start paused (default: false)
    /// - `PARK_USER_STRINGS` - User string pool capacity (default: 1024)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("PARK_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("PARK_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }
        if let Some(paused) = read_env_bool("PARK_START_PAUSED") {
            config.start_paused = paused;
        }
        if let Some(capacity) = read_env::<usize>("PARK_USER_STRINGS") {
            config.game_config = GameConfig::with_user_string_capacity(capacity);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Accepts `true`/`false`, `1`/`0`, or an empty value meaning `true`.
fn read_env_bool(key: &str) -> Option<bool> {
    let value = env::var(key).ok()?;
    match value.trim() {
        "" | "1" => Some(true),
        "0" => Some(false),
        other => other.parse().ok(),
    }
}

/// Main runtime that orchestrates the park simulation
///
/// Design: Runtime owns workers and coordinates execution.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every outstanding handle clone is dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide initial game state
    ///
    /// Defaults to an empty park sized by the configured [`GameConfig`].
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Start paused regardless of the configuration
    pub fn paused(mut self, paused: bool) -> Self {
        self.config.start_paused = paused;
        self
    }

    /// Build the runtime and spawn its worker on the current tokio runtime
    pub fn build(self) -> Runtime {
        let initial_state = self
            .state
            .unwrap_or_else(|| GameState::with_config(&self.config.game_config));

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(
            initial_state,
            self.config.start_paused,
            command_rx,
            event_bus,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Runtime {
            handle,
            sim_worker_handle,
        }
    }
}
