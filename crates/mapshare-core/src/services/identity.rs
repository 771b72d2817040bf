//! Identity store: at most one active identity, persisted under `user`.
//!
//! The register/login/change-password operations are mocks. They wait for
//! `auth_delay_ms`, never check a stored credential, and discard passwords.
//! Each register/login/logout takes a new generation; a completion whose
//! generation is no longer current is dropped with [`IdentityError::Superseded`].

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{info, warn};

use crate::error::IdentityError;
use crate::models::Identity;
use crate::models::identity::is_valid_email;
use crate::storage::{ConfigStorage, StateStorage, SystemConfig};

pub struct IdentityStore {
    state: StateStorage,
    config: ConfigStorage,
    current: RwLock<Option<Identity>>,
    generation: AtomicU64,
}

impl IdentityStore {
    pub fn new(state: StateStorage, config: ConfigStorage, current: Option<Identity>) -> Self {
        Self {
            state,
            config,
            current: RwLock::new(current),
            generation: AtomicU64::new(0),
        }
    }

    /// The active identity, if any.
    pub fn current(&self) -> Option<Identity> {
        self.current.read().clone()
    }

    /// Create a new identity and make it active. No uniqueness check.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, IdentityError> {
        let config = self.system_config()?;
        let username = username.trim();
        let email = email.trim();
        if config.strict_credentials {
            if username.is_empty() {
                return Err(IdentityError::EmptyUsername);
            }
            check_email(email)?;
            if password.trim().is_empty() {
                return Err(IdentityError::EmptyCredentials);
            }
        }

        let ticket = self.next_generation();
        Self::simulate_latency(&config).await;

        let identity = Identity::new(username, email);
        self.complete(ticket, identity)
    }

    /// Log in as the email's local part. The password is not checked.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, IdentityError> {
        let config = self.system_config()?;
        let email = email.trim();
        if email.is_empty() {
            return Err(IdentityError::EmptyCredentials);
        }
        if config.strict_credentials {
            check_email(email)?;
            if password.trim().is_empty() {
                return Err(IdentityError::EmptyCredentials);
            }
        }

        let ticket = self.next_generation();
        Self::simulate_latency(&config).await;

        let identity = Identity::from_email(email);
        self.complete(ticket, identity)
    }

    /// Clear the active identity. Any pending register/login is discarded.
    pub fn logout(&self) -> Result<(), IdentityError> {
        let mut current = self.current.write();
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.clear_identity()?;
        if let Some(identity) = current.take() {
            info!(user = %identity.username, "Logged out");
        }
        Ok(())
    }

    /// Accepted without effect on any stored value.
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        let config = self.system_config()?;
        if config.strict_credentials
            && (old_password.trim().is_empty() || new_password.trim().is_empty())
        {
            return Err(IdentityError::EmptyCredentials);
        }

        Self::simulate_latency(&config).await;
        info!("Password changed");
        Ok(())
    }

    fn system_config(&self) -> Result<SystemConfig, IdentityError> {
        Ok(self.config.get_config()?.unwrap_or_default())
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn simulate_latency(config: &SystemConfig) {
        if config.auth_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(config.auth_delay_ms)).await;
        }
    }

    fn complete(&self, ticket: u64, identity: Identity) -> Result<Identity, IdentityError> {
        let mut current = self.current.write();
        if self.generation.load(Ordering::SeqCst) != ticket {
            warn!(user = %identity.username, "Discarding stale identity completion");
            return Err(IdentityError::Superseded);
        }

        self.state.save_identity(&identity)?;
        info!(user = %identity.username, id = %identity.id, "Identity activated");
        *current = Some(identity.clone());
        Ok(identity)
    }
}

fn check_email(email: &str) -> Result<(), IdentityError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(IdentityError::InvalidEmail(email.to_string()))
    }
}
