//! Packet format for replicated and replayed actions.
//!
//! A packet carries the command id and an opaque body. The body of a banner
//! style action is exactly three bytes: kind, banner index, parameter.

use super::GameCommand;
#[cfg(feature = "serde")]
use super::{Action, BannerError, BannerSetStyleAction, BannerSetStyleParams};

/// Encoded action as exchanged with the network and replay layers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionPacket {
    pub command: u32,
    pub body: Vec<u8>,
}

impl ActionPacket {
    pub fn command(&self) -> Option<GameCommand> {
        GameCommand::from_id(self.command)
    }
}

/// Errors surfaced while encoding or decoding packets.
#[cfg(feature = "serde")]
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("unknown command id {0}")]
    UnknownCommand(u32),

    #[error("{command} body is malformed")]
    Malformed {
        command: GameCommand,
        #[source]
        source: bincode::Error,
    },

    #[error("{command} body has {extra} trailing bytes")]
    TrailingBytes { command: GameCommand, extra: usize },

    #[error("{command} parameters rejected: {source}")]
    Rejected {
        command: GameCommand,
        #[source]
        source: BannerError,
    },
}

#[cfg(feature = "serde")]
impl ActionPacket {
    /// Encodes `action` into a packet.
    pub fn encode(action: &Action) -> Result<Self, WireError> {
        let command = action.command();
        let body = match action {
            Action::BannerSetStyle(action) => {
                bincode::serialize(&BannerSetStyleParams::from(*action))
            }
        }
        .map_err(|source| WireError::Malformed { command, source })?;

        Ok(Self {
            command: command.id(),
            body,
        })
    }

    /// Decodes the packet body into a typed action.
    ///
    /// Unknown style kinds are rejected here, so a decoded action always
    /// names a known variant.
    pub fn decode(&self) -> Result<Action, WireError> {
        let command = self
            .command()
            .ok_or(WireError::UnknownCommand(self.command))?;

        match command {
            GameCommand::SetBannerStyle => {
                let params: BannerSetStyleParams = decode_body(command, &self.body)?;
                let action = BannerSetStyleAction::try_from(params)
                    .map_err(|source| WireError::Rejected { command, source })?;
                Ok(Action::BannerSetStyle(action))
            }
        }
    }
}

#[cfg(feature = "serde")]
fn decode_body<T>(command: GameCommand, body: &[u8]) -> Result<T, WireError>
where
    T: serde::de::DeserializeOwned + serde::Serialize,
{
    let value: T =
        bincode::deserialize(body).map_err(|source| WireError::Malformed { command, source })?;
    let consumed = bincode::serialized_size(&value)
        .map_err(|source| WireError::Malformed { command, source })? as usize;
    if consumed != body.len() {
        return Err(WireError::TrailingBytes {
            command,
            extra: body.len().saturating_sub(consumed),
        });
    }
    Ok(value)
}

/// Computes a replay checksum over a packet sequence.
///
/// Two peers that executed the same packets in the same order produce the
/// same root; order matters.
pub fn compute_actions_root(packets: &[ActionPacket]) -> [u8; 32] {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    for packet in packets {
        hasher.update(packet.command.to_le_bytes());
        hasher.update((packet.body.len() as u32).to_le_bytes());
        hasher.update(&packet.body);
    }
    hasher.finalize().into()
}
