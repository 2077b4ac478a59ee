//! Business-onboarding guard.

use super::{paths, GuardContext, Outcome, Redirect};
use crate::models::Role;

/// Ensures a business profile exists before business-scoped pages render.
///
/// Role-polymorphic:
/// - `Staff` never onboards; always redirected to the staff area.
/// - `Accountant` works inside client businesses, not their own; always
///   allowed through.
/// - `Owner` needs a loaded [`crate::models::BusinessProfile`]. If the store
///   has none, the guard fetches it exactly once per mount; still absent
///   (or the fetch failed) means onboarding never completed, so redirect
///   into the onboarding flow. The guard never yields an error outcome.
pub struct OnboardingGuard {
    onboarding_path: String,
    staff_path: String,
    has_fetched: bool,
}

impl OnboardingGuard {
    pub fn new() -> Self {
        Self {
            onboarding_path: paths::ONBOARDING.to_string(),
            staff_path: paths::STAFF_HOME.to_string(),
            has_fetched: false,
        }
    }

    pub fn with_onboarding_path(mut self, path: impl Into<String>) -> Self {
        self.onboarding_path = path.into();
        self
    }

    pub fn with_staff_path(mut self, path: impl Into<String>) -> Self {
        self.staff_path = path.into();
        self
    }

    pub async fn evaluate(&mut self, ctx: &GuardContext) -> Outcome {
        // Under an auth guard the user is always present; a bare mount with
        // no user takes the standard-role path and ends at onboarding.
        let role = ctx
            .app
            .session
            .snapshot()
            .user
            .map(|user| user.role)
            .unwrap_or(Role::Owner);

        match role {
            Role::Staff => Outcome::Redirect(Redirect {
                to: self.staff_path.clone(),
                replace: true,
                return_to: None,
            }),
            Role::Accountant => Outcome::Allow,
            Role::Owner => self.evaluate_owner(ctx).await,
        }
    }

    async fn evaluate_owner(&mut self, ctx: &GuardContext) -> Outcome {
        if ctx.app.business.has_profile() {
            return Outcome::Allow;
        }

        if !self.has_fetched {
            // Set before the await point: re-renders while the fetch is in
            // flight must not start another one.
            self.has_fetched = true;
            match ctx.app.business_api.get().await {
                Ok(Some(profile)) => {
                    if let Err(err) = ctx.app.business.set(profile) {
                        tracing::warn!("failed to persist business profile: {err:#}");
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    // Treated the same as "no business": redirect, no error UI.
                    tracing::debug!("business fetch failed, treating as not onboarded: {err}");
                }
            }
        }

        if ctx.app.business.has_profile() {
            Outcome::Allow
        } else {
            Outcome::Redirect(Redirect {
                to: self.onboarding_path.clone(),
                replace: true,
                return_to: None,
            })
        }
    }
}

impl Default for OnboardingGuard {
    fn default() -> Self {
        Self::new()
    }
}
