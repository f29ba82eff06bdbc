//! Gemini REST adapter
//!
//! Implements OracleGateway for the Google Generative Language API.

pub mod error;
pub mod gateway;
pub mod protocol;
pub mod session;
