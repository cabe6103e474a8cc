//! Topic-based event bus for runtime events.
//!
//! Executed and rejected actions are published on [`Topic::GameState`];
//! intents raised by executed actions are published on [`Topic::Ui`] for
//! windows and other views to refresh from.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{GameStateEvent, UiEvent};
