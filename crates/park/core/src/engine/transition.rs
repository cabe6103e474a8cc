//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionOutcome, ActionTransition};
use crate::intent::IntentSink;
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Runs the read-only precondition phase.
#[inline]
fn query_transition<T>(
    transition: &T,
    state: &GameState,
) -> Result<ActionOutcome, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))
}

/// Executes a transition through the three-phase pipeline and returns the outcome.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state
/// 3. `post_validate` - Verify postconditions after mutation
///
/// The intent is broadcast only after every phase succeeded.
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    intents: &dyn IntentSink,
) -> Result<ActionOutcome, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    let outcome = query_transition(transition, state)?;

    transition
        .apply(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    if let Some(intent) = transition.intent() {
        intents.broadcast(intent);
    }

    Ok(outcome)
}

pub(super) fn query(action: &Action, state: &GameState) -> Result<ActionOutcome, ExecuteError> {
    match action {
        Action::BannerSetStyle(transition) => {
            query_transition(transition, state).map_err(ExecuteError::BannerSetStyle)
        }
    }
}

pub(super) fn execute(
    action: &Action,
    state: &mut GameState,
    intents: &dyn IntentSink,
) -> Result<ActionOutcome, ExecuteError> {
    match action {
        Action::BannerSetStyle(transition) => {
            drive_transition(transition, state, intents).map_err(ExecuteError::BannerSetStyle)
        }
    }
}
