//! Headless park client.
//!
//! Assembles the object catalog and the runtime from environment
//! configuration. The `park` binary is a thin wrapper over this crate.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod session;

pub use catalog::ObjectCatalog;
pub use config::ClientConfig;
pub use session::{ReplayReport, run_replay};
