//! Interactive game loop

pub mod driver;

pub use driver::{GameDriver, SessionSummary};
