//! Session store.
//!
//! Owns the current user identity: authenticates against the remote
//! user directory, holds the identity in memory and durable storage, and
//! provides address-book operations that round-trip through the same
//! endpoint.
//!
//! Every operation returns `Result<_, SessionError>` instead of
//! panicking; callers branch on the result and surface
//! `SessionError::to_string()` to the user. Address mutations are
//! read-modify-write over the whole address list with no locking:
//! two concurrent mutations race and the second write wins (last write
//! wins, preserved deliberately - see the lost-update test).

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use sunstone_core::{AddressId, Email, EmailError, UserId};

use crate::directory::{DirectoryError, UserDirectory};
use crate::models::{Address, AddressDraft, AddressPatch, ProfilePatch, User};
use crate::storage::{StorageBackend, keys, load_snapshot, persist_snapshot};

use super::now_millis;

/// Avatar assigned to new accounts.
const DEFAULT_AVATAR: &str = "/images/avatars/default.png";

/// Errors surfaced by session operations.
///
/// The display text is the human-readable message the presentation layer
/// shows; do not change it without checking UI copy.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Login lookup returned no match.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Signup email already registered.
    #[error("Email already registered")]
    EmailTaken,

    /// The submitted email is not structurally valid.
    #[error("Invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),

    /// A create/update call to the remote endpoint returned non-success.
    #[error("Remote write failed: {0}")]
    RemoteWriteFailed(String),

    /// The call itself failed (offline, DNS, refused connection).
    #[error("Network error: {0}")]
    Network(String),
}

impl From<DirectoryError> for SessionError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Http(e) => Self::Network(e.to_string()),
            DirectoryError::Api { status, message } => {
                Self::RemoteWriteFailed(format!("{status} - {message}"))
            }
            DirectoryError::Parse(message) => Self::Network(message),
        }
    }
}

/// Persisted session snapshot: the logged-in user record, if any.
type SessionSnapshot = Option<User>;

/// The session store.
///
/// Generic over the directory so tests can run against an in-memory
/// implementation instead of HTTP.
pub struct SessionStore<D: UserDirectory> {
    directory: D,
    storage: Arc<dyn StorageBackend>,
    current: Option<User>,
}

impl<D: UserDirectory> SessionStore<D> {
    /// Create a session store, restoring any persisted session.
    #[must_use]
    pub fn new(directory: D, storage: Arc<dyn StorageBackend>) -> Self {
        let current: SessionSnapshot = load_snapshot(storage.as_ref(), keys::SESSION);
        if let Some(user) = &current {
            debug!(user_id = %user.id, "Restored persisted session");
        }
        Self {
            directory,
            storage,
            current,
        }
    }

    /// The currently logged-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    fn persist(&self) {
        persist_snapshot(self.storage.as_ref(), keys::SESSION, &self.current);
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Log in with email and password.
    ///
    /// Queries the remote user collection filtered by email+password
    /// equality. The first match becomes the current user; multiple
    /// matches are not distinguished (first wins, as upstream).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidCredentials` on zero matches and
    /// `SessionError::Network` if the lookup fails.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, SessionError> {
        let matches = self.directory.find_by_credentials(email, password).await?;

        let Some(user) = matches.into_iter().next() else {
            debug!(email, "Login lookup returned no match");
            return Err(SessionError::InvalidCredentials);
        };

        debug!(user_id = %user.id, "Login succeeded");
        self.current = Some(user.clone());
        self.persist();
        Ok(user)
    }

    /// Create a new account and log it in.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidEmail` if the email is malformed,
    /// `SessionError::EmailTaken` if a record with the same email exists,
    /// and `SessionError::RemoteWriteFailed` if the creation call does
    /// not report success.
    #[instrument(skip(self, password))]
    pub async fn signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, SessionError> {
        let email = Email::parse(email)?;

        if !self.directory.find_by_email(email.as_str()).await?.is_empty() {
            return Err(SessionError::EmailTaken);
        }

        // Millisecond-timestamp id, matching existing records.
        let user = User {
            id: UserId::new(now_millis()),
            name: name.to_string(),
            email,
            password: password.to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
            joined_date: Utc::now().date_naive(),
            shipping_addresses: Vec::new(),
            phone: None,
        };

        let created = self.directory.create(&user).await?;
        debug!(user_id = %created.id, "Signup succeeded");

        self.current = Some(created.clone());
        self.persist();
        Ok(created)
    }

    /// Log out: clear the in-memory identity and durable storage.
    /// No remote call.
    pub fn logout(&mut self) {
        if let Some(user) = &self.current {
            debug!(user_id = %user.id, "Logging out");
        }
        self.current = None;
        self.storage.remove(keys::SESSION);
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// Shallow-merge profile fields into the current identity.
    ///
    /// Local-only: the change is persisted to client storage but not
    /// synced to the remote endpoint, so the two can diverge (preserved
    /// upstream behavior). A call with no logged-in user is a no-op.
    pub fn update_profile(&mut self, patch: ProfilePatch) {
        let Some(user) = self.current.as_mut() else {
            return;
        };
        user.apply_profile(patch);
        self.persist();
    }

    // =========================================================================
    // Address book
    // =========================================================================

    /// Add a shipping address.
    ///
    /// The first address added is implicitly marked default; this is
    /// never re-validated after later edits. The whole user record is
    /// PATCHed remotely; on any failure local state is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::RemoteWriteFailed` or
    /// `SessionError::Network` when the remote write fails.
    #[instrument(skip(self, draft))]
    pub async fn add_address(&mut self, draft: AddressDraft) -> Result<(), SessionError> {
        let Some(user) = self.current.clone() else {
            return Ok(());
        };

        let mut updated = user;
        let is_default = updated.shipping_addresses.is_empty();
        updated.shipping_addresses.push(Address::from_draft(
            AddressId::new(now_millis()),
            draft,
            is_default,
        ));

        self.commit_remote(updated).await
    }

    /// Shallow-merge fields into the address with the given id.
    ///
    /// A nonexistent id is a silent no-op (no remote call, no error).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::RemoteWriteFailed` or
    /// `SessionError::Network` when the remote write fails.
    #[instrument(skip(self, patch))]
    pub async fn update_address(
        &mut self,
        id: AddressId,
        patch: AddressPatch,
    ) -> Result<(), SessionError> {
        let Some(user) = self.current.clone() else {
            return Ok(());
        };

        let mut updated = user;
        let Some(address) = updated.shipping_addresses.iter_mut().find(|a| a.id == id) else {
            debug!(address_id = %id, "update_address: no such address, skipping");
            return Ok(());
        };
        address.apply(patch);

        self.commit_remote(updated).await
    }

    /// Delete the address with the given id.
    ///
    /// Deleting an absent id still PATCHes the (unchanged) list, as
    /// upstream does.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::RemoteWriteFailed` or
    /// `SessionError::Network` when the remote write fails.
    #[instrument(skip(self))]
    pub async fn delete_address(&mut self, id: AddressId) -> Result<(), SessionError> {
        let Some(user) = self.current.clone() else {
            return Ok(());
        };

        let mut updated = user;
        updated.shipping_addresses.retain(|a| a.id != id);

        self.commit_remote(updated).await
    }

    /// PATCH the full user record remotely; only on success update local
    /// state and storage.
    async fn commit_remote(&mut self, updated: User) -> Result<(), SessionError> {
        match self.directory.update(&updated).await {
            Ok(stored) => {
                self.current = Some(stored);
                self.persist();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Remote user update failed, local state unchanged");
                Err(e.into())
            }
        }
    }
}
