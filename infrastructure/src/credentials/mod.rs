//! Credential discovery from the process environment and `.env` files.

mod env_source;

pub use env_source::{
    DEFAULT_BACKUP_PREFIX, DEFAULT_MAX_BACKUPS, DEFAULT_PRIMARY_ENV, EnvCredentialSource,
    load_dotenv,
};
