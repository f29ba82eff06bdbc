//! Application-level configuration.
//!
//! - [`GameConfig`]: per-game parameters handed to the play use case

pub mod game_config;

pub use game_config::GameConfig;
