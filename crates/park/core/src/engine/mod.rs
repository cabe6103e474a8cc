//! Action query and execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. It runs
//! the shared precondition phase for queries, and the full
//! pre_validate → apply → post_validate pipeline for executes, surfacing the
//! failing phase to the caller.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::action::{Action, ActionFlags, ActionOutcome};
use crate::intent::IntentSink;
use crate::state::GameState;

/// Game engine that validates and applies actions against a [`GameState`].
///
/// Execution never relies on an earlier query: preconditions are checked
/// again at the start of every execute.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    paused: bool,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine with the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self {
            state,
            paused: false,
        }
    }

    /// Marks the game as paused; actions must then carry
    /// [`ActionFlags::ALLOW_WHILE_PAUSED`].
    pub fn paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Validates `action` against the current state without mutating it.
    ///
    /// Returns the same outcome shape as [`GameEngine::execute`].
    pub fn query(&self, action: &Action) -> Result<ActionOutcome, ExecuteError> {
        query(self.state, action, self.paused)
    }

    /// Validates and applies `action`, broadcasting its intent on success.
    ///
    /// On error the state is left exactly as it was.
    pub fn execute(
        &mut self,
        action: &Action,
        intents: &dyn IntentSink,
    ) -> Result<ActionOutcome, ExecuteError> {
        check_paused(action, self.paused)?;
        transition::execute(action, self.state, intents)
    }
}

/// Validates `action` against a shared state borrow, applying the same pause
/// rule as [`GameEngine::query`].
pub fn query(
    state: &GameState,
    action: &Action,
    paused: bool,
) -> Result<ActionOutcome, ExecuteError> {
    check_paused(action, paused)?;
    transition::query(action, state)
}

fn check_paused(action: &Action, paused: bool) -> Result<(), ExecuteError> {
    if paused && !action.flags().contains(ActionFlags::ALLOW_WHILE_PAUSED) {
        return Err(ExecuteError::Paused {
            command: action.command(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionErrorKind, BannerSetStyleAction, BannerStyle};
    use crate::intent::{Intent, RecordingIntentSink};
    use crate::state::{Banner, BannerIndex, Direction, Duplication, TileCoords};

    fn park() -> (GameState, BannerIndex) {
        let mut state = GameState::default();
        let tile = TileCoords::new(10, 10);
        state.add_surface(tile, 1).unwrap();
        let text = state.strings.allocate("Exit", Duplication::Permitted).unwrap();
        let index = state
            .place_banner(Banner::new(tile).with_text(text), Direction::EAST, 1)
            .unwrap();
        (state, index)
    }

    fn set_style(index: BannerIndex, style: BannerStyle) -> Action {
        Action::from(BannerSetStyleAction::new(index, style))
    }

    #[test]
    fn test_query_matches_execute_outcome() {
        let (mut state, index) = park();
        let action = set_style(index, BannerStyle::PrimaryColour(8));
        let intents = RecordingIntentSink::new();

        let queried = query(&state, &action, false).unwrap();
        let before = state.clone();
        assert_eq!(state, before);

        let executed = GameEngine::new(&mut state).execute(&action, &intents).unwrap();
        assert_eq!(queried, executed);
        assert_eq!(state.banners.get(index).unwrap().colour, 8);
    }

    #[test]
    fn test_execute_broadcasts_once() {
        let (mut state, index) = park();
        let intents = RecordingIntentSink::new();
        let mut engine = GameEngine::new(&mut state);

        engine
            .execute(&set_style(index, BannerStyle::NoEntry(true)), &intents)
            .unwrap();
        assert_eq!(intents.take(), vec![Intent::update_banner(index)]);
    }

    #[test]
    fn test_failed_execute_is_silent_and_pure() {
        let (mut state, index) = park();
        let before = state.clone();
        let intents = RecordingIntentSink::new();

        let err = GameEngine::new(&mut state)
            .execute(&set_style(index, BannerStyle::PrimaryColour(32)), &intents)
            .unwrap_err();

        assert_eq!(err.kind(), ActionErrorKind::InvalidParameter);
        assert_eq!(err.phase(), Some(TransitionPhase::PreValidate));
        assert!(intents.take().is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_execute_revalidates_after_removal() {
        let (mut state, index) = park();
        let action = set_style(index, BannerStyle::TextColour(2));
        query(&state, &action, false).unwrap();

        state.remove_banner(index);
        let intents = RecordingIntentSink::new();
        let err = GameEngine::new(&mut state)
            .execute(&action, &intents)
            .unwrap_err();

        assert_eq!(err.kind(), ActionErrorKind::InvalidTarget);
        assert!(intents.take().is_empty());
    }

    #[test]
    fn test_invalid_target_for_every_out_of_range_index() {
        let (mut state, _) = park();
        let before = state.clone();
        let intents = RecordingIntentSink::new();

        for raw in 250..=u8::MAX {
            let action = set_style(BannerIndex(raw), BannerStyle::PrimaryColour(0));
            assert_eq!(
                query(&state, &action, false).unwrap_err().kind(),
                ActionErrorKind::InvalidTarget
            );
            let err = GameEngine::new(&mut state)
                .execute(&action, &intents)
                .unwrap_err();
            assert_eq!(err.kind(), ActionErrorKind::InvalidTarget);
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_paused_engine() {
        let (mut state, index) = park();
        let intents = RecordingIntentSink::new();
        let mut engine = GameEngine::new(&mut state).paused(true);

        // Banner styling is flagged to run while paused.
        let action = set_style(index, BannerStyle::PrimaryColour(3));
        assert!(engine.query(&action).is_ok());
        assert!(engine.execute(&action, &intents).is_ok());
        assert_eq!(engine.state().banners.get(index).unwrap().colour, 3);
    }

    #[test]
    fn test_shared_query_while_paused() {
        let (state, index) = park();
        let action = set_style(index, BannerStyle::NoEntry(true));

        assert_eq!(
            query(&state, &action, true).unwrap(),
            query(&state, &action, false).unwrap()
        );
        assert!(!state.banners.get(index).unwrap().has_no_entry());
    }
}
