//! Session store: registered users and the authenticated user.
//!
//! Passwords are compared and persisted in plaintext because that is the
//! shape of the user record this engine stays consistent with - a known
//! weakness of the data format, documented on `arcadia_core::User`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::info;

use arcadia_core::{NewUser, User};

use crate::config::AdminBootstrap;
use crate::error::RegisterError;
use crate::storage::{self, SharedStorage, StorageError, keys};

/// Owns the registered users and the currently authenticated user.
///
/// The current user is in-memory only (there is no persisted session
/// record); it resets on restart.
pub struct SessionStore {
    storage: SharedStorage,
    state: Mutex<SessionState>,
}

struct SessionState {
    users: Vec<User>,
    current: Option<User>,
}

impl SessionStore {
    /// Open the store, restoring persisted users and bootstrapping the
    /// admin account.
    ///
    /// If no persisted user carries the configured admin email
    /// (case-insensitive), the admin account is created and persisted -
    /// the engine guarantees an admin exists after first run. The
    /// credential comes from `admin`, so deployments can replace the fixed
    /// default without touching this store.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the record cannot be read, decoded, or
    /// (when bootstrapping) written.
    pub fn open(storage: SharedStorage, admin: &AdminBootstrap) -> Result<Self, StorageError> {
        let mut users: Vec<User> =
            storage::read_record(storage.as_ref(), keys::USERS)?.unwrap_or_default();

        let admin_exists = users
            .iter()
            .any(|u| u.email.matches_ignore_case(admin.email.as_str()));
        if !admin_exists {
            users.push(User {
                username: admin.username.clone(),
                email: admin.email.clone(),
                password: admin.password_plaintext(),
                is_admin: true,
            });
            storage::write_record(storage.as_ref(), keys::USERS, &users)?;
            info!(username = %admin.username, "bootstrapped admin account");
        }

        Ok(Self {
            storage,
            state: Mutex::new(SessionState {
                users,
                current: None,
            }),
        })
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns [`RegisterError::UsernameTaken`] or
    /// [`RegisterError::EmailTaken`] (email match is case-insensitive)
    /// without persisting anything, or [`RegisterError::Storage`] if the
    /// write fails.
    pub fn register(&self, new: NewUser) -> Result<(), RegisterError> {
        let mut guard = self.lock();

        if guard.users.iter().any(|u| u.username == new.username) {
            return Err(RegisterError::UsernameTaken);
        }
        if guard
            .users
            .iter()
            .any(|u| u.email.matches_ignore_case(new.email.as_str()))
        {
            return Err(RegisterError::EmailTaken);
        }

        let user = new.into_user();
        let mut candidate = guard.users.clone();
        candidate.push(user.clone());
        storage::write_record(self.storage.as_ref(), keys::USERS, &candidate)?;
        guard.users = candidate;

        info!(username = %user.username, "registered user");
        Ok(())
    }

    /// Authenticate by username. On success the user becomes current.
    #[must_use]
    pub fn login(&self, username: &str, password: &str) -> Option<User> {
        let mut guard = self.lock();
        let user = guard
            .users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned()?;
        guard.current = Some(user.clone());
        Some(user)
    }

    /// Authenticate by email (case-insensitive). On success the user
    /// becomes current.
    #[must_use]
    pub fn login_by_email(&self, email: &str, password: &str) -> Option<User> {
        let mut guard = self.lock();
        let user = guard
            .users
            .iter()
            .find(|u| u.email.matches_ignore_case(email) && u.password == password)
            .cloned()?;
        guard.current = Some(user.clone());
        Some(user)
    }

    /// The currently authenticated user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.lock().current.clone()
    }

    /// Clear the current user.
    pub fn logout(&self) {
        self.lock().current = None;
    }

    /// All registered users.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.lock().users.clone()
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
