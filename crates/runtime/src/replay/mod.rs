//! Replay log of executed actions.
//!
//! Every action the simulation worker executes is appended as an encoded
//! [`ActionPacket`]. Peers that executed the same packets in the same order
//! report the same [`ActionLog::root`].
//!
//! A replay file holds a bincode-encoded [`Replay`]: the park state the
//! session started from and the packets executed on top of it.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use park_core::{ActionPacket, GameState, compute_actions_root};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReplayError>;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("replay file I/O failed")]
    Io(#[from] std::io::Error),

    #[error("replay file is malformed")]
    Codec(#[from] bincode::Error),
}

/// Ordered packets of every action executed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLog {
    packets: Vec<ActionPacket>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `packet` and returns its sequence number.
    pub fn push(&mut self, packet: ActionPacket) -> u64 {
        self.packets.push(packet);
        (self.packets.len() - 1) as u64
    }

    pub fn packets(&self) -> &[ActionPacket] {
        &self.packets
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    /// SHA-256 root over the logged packets.
    pub fn root(&self) -> [u8; 32] {
        compute_actions_root(&self.packets)
    }

    /// Root as lowercase hex, for logging.
    pub fn root_hex(&self) -> String {
        hex::encode(self.root())
    }

    pub fn into_packets(self) -> Vec<ActionPacket> {
        self.packets
    }
}

/// Recorded session: starting state plus executed packets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replay {
    pub initial_state: GameState,
    pub packets: Vec<ActionPacket>,
}

impl Replay {
    pub fn new(initial_state: GameState, log: ActionLog) -> Self {
        Self {
            initial_state,
            packets: log.into_packets(),
        }
    }

    /// Root the session must reproduce.
    pub fn root(&self) -> [u8; 32] {
        compute_actions_root(&self.packets)
    }

    /// Reads a replay file.
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(bincode::deserialize_from(reader)?)
    }

    /// Writes the replay, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}
