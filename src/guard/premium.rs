//! Premium plan guard.

use super::{paths, GuardContext, Outcome, Redirect};

/// Restricts a subtree to premium-or-trialing accounts.
///
/// Reads already-loaded subscription state and never fetches. A denied
/// attempt opens the upgrade prompt exactly once (re-renders while still
/// denied stay silent; the prompt re-arms once access is observed true
/// again) and redirects to the landing page. This is a conversion nudge,
/// not an error.
pub struct PremiumGuard {
    reason: String,
    landing_path: String,
    prompted: bool,
}

impl PremiumGuard {
    /// `reason` tags the upgrade prompt with the gated feature.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            landing_path: paths::HOME.to_string(),
            prompted: false,
        }
    }

    pub fn with_landing_path(mut self, path: impl Into<String>) -> Self {
        self.landing_path = path.into();
        self
    }

    pub async fn evaluate(&mut self, ctx: &GuardContext) -> Outcome {
        if ctx.app.subscription.has_access() {
            self.prompted = false;
            return Outcome::Allow;
        }

        if !self.prompted {
            self.prompted = true;
            ctx.app.ui.open_upgrade_prompt(self.reason.clone());
        }

        Outcome::Redirect(Redirect {
            to: self.landing_path.clone(),
            replace: true,
            return_to: None,
        })
    }
}
