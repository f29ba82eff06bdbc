//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod oracle_session;
pub mod play_game;

#[cfg(test)]
pub(crate) mod test_support;
