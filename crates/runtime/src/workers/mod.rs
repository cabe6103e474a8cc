//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker is the only task that touches the authoritative
//! park state.

mod simulation;

pub use simulation::{Command, SimulationWorker};
