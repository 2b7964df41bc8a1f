//! # Runtime
//!
//! Service-level plumbing shared by the mirror binary: configuration
//! (builder and environment loading) and logging setup.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{MirrorConfig, MirrorConfigBuilder, PublishConfig};
pub use error::{Error, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};
