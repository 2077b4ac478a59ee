use serde::{Deserialize, Serialize};

/// Premium/trial flags derived from the account's subscription record.
///
/// Not persisted: an external collaborator refetches it each session and
/// writes it into [`crate::store::SubscriptionStore`]. The premium guard
/// only ever reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionState {
    pub is_premium: bool,
    pub is_trialing: bool,
}

impl SubscriptionState {
    /// Whether plan-gated routes are reachable: premium or an active trial.
    pub fn has_access(&self) -> bool {
        self.is_premium || self.is_trialing
    }
}
