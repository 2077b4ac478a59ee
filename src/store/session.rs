use std::sync::Mutex;

use anyhow::Result;

use super::kv::KvStore;
use crate::models::{Identity, Session};

const KEY_USER: &str = "session.user";
const KEY_AUTHENTICATED: &str = "session.authenticated";

/// Process-wide holder of the login session.
///
/// Every mutation writes through to the key-value store so a reload lands
/// the user back in their session. Only the identity and the authenticated
/// flag are persisted, never credentials. The store starts in the `loading`
/// state; [`SessionStore::load`] (called from `AppCore::boot`) rehydrates it.
pub struct SessionStore {
    kv: KvStore,
    state: Mutex<Session>,
}

impl SessionStore {
    pub fn new(kv: KvStore) -> Self {
        Self {
            kv,
            state: Mutex::new(Session::booting()),
        }
    }

    /// Rehydrate the session from persisted storage and leave `loading`.
    ///
    /// A persisted `authenticated` flag without a persisted user would break
    /// the session invariant, so it reads back as signed-out.
    pub fn load(&self) -> Result<()> {
        let user: Option<Identity> = self.kv.get_json(KEY_USER)?;
        let authenticated: bool = self.kv.get_json(KEY_AUTHENTICATED)?.unwrap_or(false);

        let mut state = self.state.lock().expect("session store lock poisoned");
        state.authenticated = authenticated && user.is_some();
        state.user = user;
        state.loading = false;
        Ok(())
    }

    /// Mark the session authenticated for `user` and persist it.
    pub fn login(&self, user: Identity) -> Result<()> {
        {
            let mut state = self.state.lock().expect("session store lock poisoned");
            *state = Session::signed_in(user.clone());
        }
        self.kv.put_json(KEY_USER, &user)?;
        self.kv.put_json(KEY_AUTHENTICATED, &true)?;
        Ok(())
    }

    /// Replace the identity of an already-authenticated session, e.g. with
    /// the renewed identity a refresh probe returned.
    pub fn set_user(&self, user: Identity) -> Result<()> {
        {
            let mut state = self.state.lock().expect("session store lock poisoned");
            state.user = Some(user.clone());
        }
        self.kv.put_json(KEY_USER, &user)?;
        Ok(())
    }

    pub fn set_loading(&self, loading: bool) {
        let mut state = self.state.lock().expect("session store lock poisoned");
        state.loading = loading;
    }

    /// Reset to signed-out and erase the persisted keys.
    pub fn clear(&self) -> Result<()> {
        {
            let mut state = self.state.lock().expect("session store lock poisoned");
            *state = Session::default();
        }
        self.kv.remove(KEY_USER)?;
        self.kv.remove(KEY_AUTHENTICATED)?;
        Ok(())
    }

    pub fn snapshot(&self) -> Session {
        self.state
            .lock()
            .expect("session store lock poisoned")
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state
            .lock()
            .expect("session store lock poisoned")
            .authenticated
    }
}
