//! Client configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

use park_runtime::RuntimeConfig;

/// Configuration required to bootstrap the headless park client.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub runtime: RuntimeConfig,
    /// Directory of footpath surface documents to catalog at startup.
    pub objects_dir: Option<PathBuf>,
    /// Recorded session to replay after the catalog is loaded.
    pub replay_file: Option<PathBuf>,
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PARK_OBJECTS_DIR` - Object document directory (default: none)
    /// - `PARK_REPLAY_FILE` - Replay file to run (default: none)
    /// - `PARK_SESSION_ID` - Session identifier for log files (default: auto-generated)
    /// - `PARK_LOG_DIR` - Log directory (default: platform-specific)
    ///
    /// Runtime settings are read by [`RuntimeConfig::from_env`].
    pub fn from_env() -> Self {
        Self {
            runtime: RuntimeConfig::from_env(),
            objects_dir: read_path("PARK_OBJECTS_DIR"),
            replay_file: read_path("PARK_REPLAY_FILE"),
            session_id: env::var("PARK_SESSION_ID")
                .ok()
                .filter(|id| !id.trim().is_empty()),
            log_dir: read_path("PARK_LOG_DIR"),
        }
    }
}

fn read_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
