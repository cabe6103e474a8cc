//! Simulation worker that owns the authoritative [`park_core::GameState`].
//!
//! Receives commands from [`crate::RuntimeHandle`], runs actions through
//! [`park_core::GameEngine`], and publishes events to the EventBus. Commands
//! are processed one at a time, so a query and the execute that follows it may
//! observe different states; the engine re-validates on execute.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use park_core::engine::{self, ExecuteError, TransitionPhase};
use park_core::{Action, ActionOutcome, ActionPacket, GameEngine, GameState};

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, GameStateEvent};
use crate::replay::ActionLog;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Validate an action against the current state without applying it.
    Query {
        action: Action,
        reply: oneshot::Sender<Result<ActionOutcome>>,
    },
    /// Validate and apply an action.
    Execute {
        action: Action,
        reply: oneshot::Sender<Result<ActionOutcome>>,
    },
    /// Decode a packet received from a peer or a replay file, then execute it.
    ExecutePacket {
        packet: ActionPacket,
        reply: oneshot::Sender<Result<ActionOutcome>>,
    },
    SetPaused {
        paused: bool,
        reply: oneshot::Sender<()>,
    },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
    /// Snapshot of the replay log.
    QueryLog { reply: oneshot::Sender<ActionLog> },
}

/// Background task that processes gameplay commands.
pub struct SimulationWorker {
    state: GameState,
    paused: bool,
    log: ActionLog,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SimulationWorker {
    pub fn new(
        state: GameState,
        paused: bool,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            "SimulationWorker initialized with {} banners, paused: {}",
            state.banners.len(),
            paused
        );

        Self {
            state,
            paused,
            log: ActionLog::new(),
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop; returns once every handle is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        info!(
            target: "runtime::worker",
            actions = self.log.len(),
            root = %self.log.root_hex(),
            "SimulationWorker stopped"
        );
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Query { action, reply } => {
                let result = self.handle_query(&action);
                if reply.send(result).is_err() {
                    debug!("Query reply channel closed (caller dropped)");
                }
            }
            Command::Execute { action, reply } => {
                let result = self.handle_execute(action);
                if reply.send(result).is_err() {
                    debug!("Execute reply channel closed (caller dropped)");
                }
            }
            Command::ExecutePacket { packet, reply } => {
                let result = self.handle_packet(&packet);
                if reply.send(result).is_err() {
                    debug!("ExecutePacket reply channel closed (caller dropped)");
                }
            }
            Command::SetPaused { paused, reply } => {
                self.set_paused(paused);
                if reply.send(()).is_err() {
                    debug!("SetPaused reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::QueryLog { reply } => {
                if reply.send(self.log.clone()).is_err() {
                    debug!("QueryLog reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_query(&self, action: &Action) -> Result<ActionOutcome> {
        engine::query(&self.state, action, self.paused).map_err(RuntimeError::from)
    }

    fn handle_packet(&mut self, packet: &ActionPacket) -> Result<ActionOutcome> {
        let action = packet.decode().inspect_err(|error| {
            warn!(
                target: "runtime::worker",
                command = packet.command,
                error = %error,
                "Rejected undecodable packet"
            );
        })?;
        self.handle_execute(action)
    }

    /// Executes `action` and appends it to the replay log.
    ///
    /// The packet is encoded before execution so an action is never applied
    /// without being logged.
    fn handle_execute(&mut self, action: Action) -> Result<ActionOutcome> {
        let packet = ActionPacket::encode(&action)?;

        let mut engine = GameEngine::new(&mut self.state).paused(self.paused);
        match engine.execute(&action, &self.event_bus) {
            Ok(outcome) => {
                let sequence = self.log.push(packet);
                debug!(
                    target: "runtime::worker",
                    sequence,
                    action = action.as_snake_case(),
                    "Action executed"
                );
                self.event_bus
                    .publish(Event::GameState(GameStateEvent::ActionExecuted {
                        sequence,
                        action,
                        outcome,
                    }));
                Ok(outcome)
            }
            Err(error) => {
                self.handle_execute_error(&action, &error);
                Err(error.into())
            }
        }
    }

    fn handle_execute_error(&self, action: &Action, error: &ExecuteError) {
        let phase = error.phase();
        match phase {
            Some(TransitionPhase::PreValidate) | None => debug!(
                target: "runtime::worker",
                action = ?action,
                phase = phase.map(|phase| phase.as_str()),
                kind = %error.kind(),
                error = %error,
                "Action rejected"
            ),
            Some(phase) => warn!(
                target: "runtime::worker",
                action = ?action,
                phase = phase.as_str(),
                error = %error,
                "Action execution failed"
            ),
        }

        self.event_bus
            .publish(Event::GameState(GameStateEvent::ActionFailed {
                action: *action,
                phase,
                kind: error.kind(),
                message: error.message_key(),
                error: error.to_string(),
            }));
    }

    fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        info!(target: "runtime::worker", paused, "Pause state changed");
        self.event_bus
            .publish(Event::GameState(GameStateEvent::PauseChanged { paused }));
    }
}
