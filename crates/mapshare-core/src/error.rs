//! Error kinds for the identity and catalog stores.

use mapshare_storage::StateKey;
use thiserror::Error;

use crate::models::ValidationError;
use crate::models::validation::describe;

/// A persisted snapshot that cannot be turned back into state.
#[derive(Debug, Error)]
#[error("Corrupt state under key '{key}': {reason}")]
pub struct CorruptStateError {
    pub key: StateKey,
    pub reason: String,
}

impl CorruptStateError {
    pub fn new(key: StateKey, reason: impl Into<String>) -> Self {
        Self {
            key,
            reason: reason.into(),
        }
    }
}

/// Failures while loading persisted state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Corrupt(#[from] CorruptStateError),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Failures of identity operations.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Email and password are required")]
    EmptyCredentials,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Username is required")]
    EmptyUsername,

    #[error("Superseded by a newer identity operation")]
    Superseded,

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Failures of catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Map not found: {0}")]
    MapNotFound(String),

    #[error("Validation failed: {}", describe(.0))]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
