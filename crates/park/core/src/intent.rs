//! Change notifications raised by executed actions.
//!
//! Actions describe what changed as an [`Intent`]; an [`IntentSink`] delivers
//! it to whatever views care (windows, renderers, network mirrors). Delivery
//! is fire-and-forget: a sink has no way to fail the action that raised it.

use std::cell::RefCell;

use crate::state::BannerIndex;

/// Kind of change an intent announces.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntentAction {
    /// A banner's appearance or flags changed.
    UpdateBanner,
}

/// Notification with a single integer payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intent {
    pub action: IntentAction,
    pub banner_index: BannerIndex,
}

impl Intent {
    pub fn update_banner(banner_index: BannerIndex) -> Self {
        Self {
            action: IntentAction::UpdateBanner,
            banner_index,
        }
    }
}

/// Receiver of intents broadcast by the engine.
pub trait IntentSink {
    fn broadcast(&self, intent: Intent);
}

/// Sink that drops every intent.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullIntentSink;

impl IntentSink for NullIntentSink {
    fn broadcast(&self, _intent: Intent) {}
}

/// Sink that keeps every intent in order, for inspection.
#[derive(Debug, Default)]
pub struct RecordingIntentSink {
    intents: RefCell<Vec<Intent>>,
}

impl RecordingIntentSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns and clears the recorded intents.
    pub fn take(&self) -> Vec<Intent> {
        self.intents.take()
    }
}

impl IntentSink for RecordingIntentSink {
    fn broadcast(&self, intent: Intent) {
        self.intents.borrow_mut().push(intent);
    }
}

impl<T: IntentSink + ?Sized> IntentSink for &T {
    fn broadcast(&self, intent: Intent) {
        (**self).broadcast(intent);
    }
}
