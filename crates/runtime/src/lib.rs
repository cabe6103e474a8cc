//! Runtime orchestration for the deterministic park simulation.
//!
//! This crate wires the park-core engine into a single-writer worker task with
//! a command channel, a topic-based event bus and a replay log. Consumers embed
//! [`Runtime`] to drive the park and interact with it through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`replay`] records executed actions and reads/writes replay files
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod replay;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, GameStateEvent, Topic, UiEvent};
pub use replay::{ActionLog, Replay, ReplayError};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
