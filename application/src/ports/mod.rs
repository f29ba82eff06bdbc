//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod conversation_logger;
pub mod oracle_gateway;
pub mod player;
pub mod progress;
pub mod transcript;
