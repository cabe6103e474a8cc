//! Park client binary.
//!
//! Composition root that assembles:
//! 1. The object catalog from `PARK_OBJECTS_DIR`
//! 2. The runtime, driven by the replay in `PARK_REPLAY_FILE`
//!
//! ```bash
//! PARK_OBJECTS_DIR=objects PARK_REPLAY_FILE=session.replay cargo run -p park-client
//! ```

use anyhow::{Context, Result, bail};
use park_client::{ClientConfig, ObjectCatalog, logging, run_replay};
use park_objects::AssetPools;
use park_runtime::Replay;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    logging::setup_logging(config.log_dir.as_deref(), config.session_id.as_deref())?;

    tracing::info!("Starting park client");

    let mut catalog = match &config.objects_dir {
        Some(dir) => ObjectCatalog::load_dir(dir, AssetPools::default())?,
        None => {
            tracing::debug!("PARK_OBJECTS_DIR not set, object catalog is empty");
            ObjectCatalog::default()
        }
    };

    if let Some(path) = &config.replay_file {
        let replay = Replay::load(path)
            .with_context(|| format!("Failed to read replay {}", path.display()))?;
        tracing::info!(
            "Replaying {} packets from {}",
            replay.packets.len(),
            path.display()
        );

        let report = run_replay(config.runtime.clone(), replay).await?;
        if !report.matches {
            catalog.unload_all();
            bail!(
                "replay diverged: {} executed, {} rejected",
                report.executed,
                report.rejected
            );
        }
    } else {
        tracing::debug!("PARK_REPLAY_FILE not set, nothing to replay");
    }

    catalog.unload_all();
    tracing::info!("Client shutdown complete");
    Ok(())
}
