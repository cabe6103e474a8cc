//! Deterministic park rules and data types shared across clients.
//!
//! `park-core` defines the canonical rules (actions, engine, park state) and
//! exposes pure APIs that can be reused by both the runtime and offline
//! replay tools. All state mutation flows through [`engine::GameEngine`], and
//! supporting crates depend on the types re-exported here.
pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod intent;
pub mod state;
pub mod text;

pub use action::{
    Action, ActionErrorKind, ActionFlags, ActionOutcome, ActionPacket, ActionTransition,
    BannerError, BannerSetStyleAction, BannerStyle, ExpenditureType, GameCommand, MessageKey,
    Money, compute_actions_root,
};
#[cfg(feature = "serde")]
pub use action::WireError;
pub use config::GameConfig;
pub use engine::{ExecuteError, GameEngine, TransitionPhase, TransitionPhaseError};
pub use error::{ErrorSeverity, GameError};
pub use intent::{Intent, IntentAction, IntentSink, NullIntentSink, RecordingIntentSink};
pub use state::{
    Banner, BannerElement, BannerFlags, BannerIndex, CoordsXYZ, Direction, Duplication,
    EdgeMask, GameState, PlacementError, StringId, StringPoolError, TileCoords, UserStringPool,
};
