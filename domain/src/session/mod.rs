//! Oracle conversation domain.
//!
//! - [`entities::Message`]: one prompt or reply in the exchange sequence
//! - [`entities::Role`]: who authored it

pub mod entities;
