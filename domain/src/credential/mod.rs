//! API credentials and forward-only rotation.
//!
//! - [`entities::Credential`]: a named secret granting access to the oracle
//! - [`rotator::CredentialRotator`]: ordered credentials with exhaustion tracking
//! - [`source::CredentialSource`]: where credentials are discovered from

pub mod entities;
pub mod rotator;
pub mod source;
