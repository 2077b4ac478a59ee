use std::sync::Mutex;

use anyhow::Result;

use super::kv::KvStore;
use crate::models::BusinessProfile;

const KEY_PROFILE: &str = "business.profile";

/// Process-wide holder of the tenant profile, persisted across reloads.
///
/// Meaningful only while a session is authenticated; the logout cascade
/// clears it alongside the session.
pub struct BusinessStore {
    kv: KvStore,
    profile: Mutex<Option<BusinessProfile>>,
}

impl BusinessStore {
    pub fn new(kv: KvStore) -> Self {
        Self {
            kv,
            profile: Mutex::new(None),
        }
    }

    /// Rehydrate the profile from persisted storage.
    pub fn load(&self) -> Result<()> {
        let stored: Option<BusinessProfile> = self.kv.get_json(KEY_PROFILE)?;
        let mut profile = self.profile.lock().expect("business store lock poisoned");
        *profile = stored;
        Ok(())
    }

    pub fn set(&self, new: BusinessProfile) -> Result<()> {
        {
            let mut profile = self.profile.lock().expect("business store lock poisoned");
            *profile = Some(new.clone());
        }
        self.kv.put_json(KEY_PROFILE, &new)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        {
            let mut profile = self.profile.lock().expect("business store lock poisoned");
            *profile = None;
        }
        self.kv.remove(KEY_PROFILE)?;
        Ok(())
    }

    pub fn get(&self) -> Option<BusinessProfile> {
        self.profile
            .lock()
            .expect("business store lock poisoned")
            .clone()
    }

    pub fn has_profile(&self) -> bool {
        self.profile
            .lock()
            .expect("business store lock poisoned")
            .is_some()
    }
}
