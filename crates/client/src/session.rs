//! Replays a recorded session through a fresh runtime.

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use park_runtime::{Event, Replay, Runtime, RuntimeConfig, Topic, UiEvent};

/// What a replay run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    pub executed: usize,
    pub rejected: usize,
    /// Ui intents raised while replaying.
    pub intents: usize,
    pub root: [u8; 32],
    /// Whether `root` equals the root recorded in the replay.
    pub matches: bool,
}

/// Runs every packet of `replay` against its recorded starting state.
///
/// Packets the runtime rejects are counted, not fatal: the report says whether
/// the replayed log still reproduces the recorded root.
pub async fn run_replay(config: RuntimeConfig, replay: Replay) -> Result<ReplayReport> {
    let expected = replay.root();
    let runtime = Runtime::builder()
        .config(config)
        .initial_state(replay.initial_state)
        .build();
    let handle = runtime.handle();
    let mut ui_rx = handle.subscribe(Topic::Ui);

    let mut executed = 0;
    let mut rejected = 0;
    for (index, packet) in replay.packets.into_iter().enumerate() {
        match handle.execute_packet(packet).await {
            Ok(outcome) => {
                executed += 1;
                debug!(target: "client::replay", index, cost = ?outcome.cost, "Packet replayed");
            }
            Err(error) => {
                rejected += 1;
                warn!(target: "client::replay", index, "Packet rejected: {error}");
            }
        }
    }

    let log = handle
        .action_log()
        .await
        .context("Failed to read the replay log")?;
    drop(handle);
    runtime
        .shutdown()
        .await
        .context("Runtime did not shut down cleanly")?;

    let mut intents = 0;
    while let Ok(event) = ui_rx.try_recv() {
        if matches!(event, Event::Ui(UiEvent::Intent(_))) {
            intents += 1;
        }
    }

    let root = log.root();
    let report = ReplayReport {
        executed,
        rejected,
        intents,
        root,
        matches: root == expected,
    };
    info!(
        target: "client::replay",
        executed,
        rejected,
        intents,
        root = %log.root_hex(),
        matches = report.matches,
        "Replay finished"
    );
    Ok(report)
}
