use std::sync::Mutex;

use crate::models::SubscriptionState;

/// Volatile holder of the account's premium/trial flags.
///
/// Never persisted: an external collaborator fetches the subscription record
/// each session and writes the derived flags here. The premium guard only
/// reads. Cleared on logout.
pub struct SubscriptionStore {
    state: Mutex<SubscriptionState>,
}

impl SubscriptionStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SubscriptionState::default()),
        }
    }

    pub fn set(&self, new: SubscriptionState) {
        let mut state = self.state.lock().expect("subscription store lock poisoned");
        *state = new;
    }

    pub fn clear(&self) {
        let mut state = self.state.lock().expect("subscription store lock poisoned");
        *state = SubscriptionState::default();
    }

    pub fn snapshot(&self) -> SubscriptionState {
        *self.state.lock().expect("subscription store lock poisoned")
    }

    pub fn has_access(&self) -> bool {
        self.snapshot().has_access()
    }
}

impl Default for SubscriptionStore {
    fn default() -> Self {
        Self::new()
    }
}
