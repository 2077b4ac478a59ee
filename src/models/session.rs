use serde::{Deserialize, Serialize};

use super::Identity;

/// The client's view of the current login session.
///
/// Owned exclusively by [`crate::store::SessionStore`]. `loading` is true
/// from construction until the store has rehydrated persisted state at boot,
/// so guards can hold their decision instead of flashing a redirect.
///
/// Invariant: `authenticated == true` implies `user` is present. The store
/// enforces this on every mutation and on rehydration.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: Option<Identity>,
    pub authenticated: bool,
    pub loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            user: None,
            authenticated: false,
            loading: false,
        }
    }
}

impl Session {
    /// A session that is still rehydrating from persisted storage.
    pub fn booting() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// An authenticated session for the given user.
    pub fn signed_in(user: Identity) -> Self {
        Self {
            user: Some(user),
            authenticated: true,
            loading: false,
        }
    }
}

/// Login form input. Sent to the auth API, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}
