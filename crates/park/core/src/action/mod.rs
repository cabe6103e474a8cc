//! Action domain - two-phase park mutations.
//!
//! Every action is validated against the current state before it mutates
//! anything, and re-validated at the start of execution because state can
//! change between a query and the matching execute.
//!
//! # Module Structure
//!
//! - `banner`: Banner style action (colour, text colour, no-entry)
//! - `error`: Action error types and user-facing message keys
//! - `result`: Outcome model shared by query and execute
//! - `wire`: Packet format used for replication and replay

pub mod banner;
pub mod error;
pub mod result;
pub mod wire;

pub use banner::{BannerSetStyleAction, BannerSetStyleParams, BannerStyle};
pub use error::{ActionErrorKind, BannerError, MessageKey};
pub use result::{ActionOutcome, ExpenditureType, Money};
pub use wire::{ActionPacket, compute_actions_root};
#[cfg(feature = "serde")]
pub use wire::WireError;

use bitflags::bitflags;

use crate::intent::Intent;
use crate::state::GameState;

bitflags! {
    /// Scheduling properties of an action.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ActionFlags: u16 {
        /// The action may run while the game is paused.
        const ALLOW_WHILE_PAUSED = 1 << 0;
    }
}

/// Command identifier carried in every packet.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum GameCommand {
    SetBannerStyle = 50,
}

impl GameCommand {
    pub const fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            50 => Some(Self::SetBannerStyle),
            _ => None,
        }
    }
}

/// Defines how a concrete action validates and mutates park state.
///
/// `pre_validate` must stay side-effect free; the engine calls it alone for
/// queries and again before `apply` for executes.
pub trait ActionTransition {
    type Error;

    /// Returns the command identifier of this action.
    fn command(&self) -> GameCommand;

    /// Returns scheduling flags for this action.
    fn flags(&self) -> ActionFlags {
        ActionFlags::empty()
    }

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, state: &GameState) -> Result<ActionOutcome, Self::Error>;

    /// Applies the action by mutating the game state directly.
    ///
    /// Must leave `state` untouched when returning an error.
    fn apply(&self, state: &mut GameState) -> Result<(), Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Notification raised after a successful apply.
    fn intent(&self) -> Option<Intent> {
        None
    }
}

/// Top-level action enum covering every replicated command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    BannerSetStyle(BannerSetStyleAction),
}

impl Action {
    pub fn command(&self) -> GameCommand {
        match self {
            Action::BannerSetStyle(action) => action.command(),
        }
    }

    pub fn flags(&self) -> ActionFlags {
        match self {
            Action::BannerSetStyle(action) => action.flags(),
        }
    }

    /// Returns the snake_case name of the action, used for logging.
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Action::BannerSetStyle(_) => "banner_set_style",
        }
    }
}

impl From<BannerSetStyleAction> for Action {
    fn from(action: BannerSetStyleAction) -> Self {
        Self::BannerSetStyle(action)
    }
}
