//! Configuration file loading for cine-sleuth
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CINE_SLEUTH_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./cine-sleuth.toml` or `./.cine-sleuth.toml`
//! 4. Global: `$XDG_CONFIG_HOME/cine-sleuth/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileCredentialsConfig, FileGameConfig, FileLoggingConfig, FileOracleConfig,
    FileTranscriptConfig,
};
pub use loader::ConfigLoader;
