//! Session validation and the authentication guard.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio_util::sync::CancellationToken;

use super::{paths, GuardContext, Outcome, Redirect};
use crate::api::{ApiError, AuthApi};
use crate::models::Identity;

/// Process-wide record of whether the current login session has been
/// verified against the server.
///
/// Lifecycle: false at boot, set true only by a successful refresh probe,
/// reset to false synchronously on logout or probe failure. Not persisted,
/// so a full reload re-verifies. Injected rather than a module global so
/// tests reset it per case.
pub struct SessionValidator {
    validated: AtomicBool,
    probe_lock: tokio::sync::Mutex<()>,
}

impl SessionValidator {
    pub fn new() -> Self {
        Self {
            validated: AtomicBool::new(false),
            probe_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn is_validated(&self) -> bool {
        self.validated.load(Ordering::SeqCst)
    }

    /// Reset the flag. Called synchronously during logout so a
    /// redirect-in-flight can never read a stale true.
    pub fn invalidate(&self) {
        self.validated.store(false, Ordering::SeqCst);
    }

    fn mark_validated(&self) {
        self.validated.store(true, Ordering::SeqCst);
    }

    /// Run the refresh probe unless this login session already passed it.
    ///
    /// Concurrent callers (nested routes mounting two auth guards at once)
    /// serialize on an internal lock and re-check the flag after acquiring
    /// it, so the probe runs at most once per login session. Returns the
    /// renewed identity when this caller performed the probe, `None` when
    /// the session was already validated.
    pub async fn ensure_validated(
        &self,
        auth: &dyn AuthApi,
    ) -> Result<Option<Identity>, ApiError> {
        if self.is_validated() {
            return Ok(None);
        }

        let _probe = self.probe_lock.lock().await;
        if self.is_validated() {
            return Ok(None);
        }

        match auth.refresh().await {
            Ok(identity) => {
                self.mark_validated();
                Ok(Some(identity))
            }
            Err(err) => {
                self.invalidate();
                Err(err)
            }
        }
    }
}

impl Default for SessionValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Verification progress of one mounted auth guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    Unchecked,
    Validating,
    Valid,
    Invalid,
}

/// Gates a protected subtree on a verified session.
///
/// A locally-flagged session is not enough: the first mount of any auth
/// guard after login probes the refresh endpoint, and only a successful
/// round-trip renders the children. Probe failure is terminal for the
/// session: the guard forces the full logout cascade before its redirect
/// outcome is returned, so no stale authenticated view can flash.
pub struct AuthGuard {
    login_path: String,
    state: ValidationState,
    unmount: CancellationToken,
}

impl AuthGuard {
    pub fn new() -> Self {
        Self {
            login_path: paths::LOGIN.to_string(),
            state: ValidationState::Unchecked,
            unmount: CancellationToken::new(),
        }
    }

    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn state(&self) -> ValidationState {
        self.state
    }

    /// Token the host cancels when it unmounts this guard. A probe already
    /// in flight keeps running (its global effects stand), but this mount's
    /// own state and outcome are suppressed afterward.
    pub fn unmount_token(&self) -> CancellationToken {
        self.unmount.clone()
    }

    pub async fn evaluate(&mut self, ctx: &GuardContext) -> Outcome {
        let session = ctx.app.session.snapshot();

        if session.loading {
            return Outcome::Loading;
        }

        if !session.authenticated {
            self.state = ValidationState::Invalid;
            return self.redirect_to_login(ctx);
        }

        if ctx.app.validator.is_validated() {
            self.state = ValidationState::Valid;
            return Outcome::Allow;
        }

        self.state = ValidationState::Validating;
        match ctx
            .app
            .validator
            .ensure_validated(ctx.app.auth_api.as_ref())
            .await
        {
            Ok(renewed) => {
                if self.unmount.is_cancelled() {
                    return Outcome::Loading;
                }
                if let Some(identity) = renewed {
                    if let Err(err) = ctx.app.session.set_user(identity) {
                        tracing::warn!("failed to persist renewed identity: {err:#}");
                    }
                }
                self.state = ValidationState::Valid;
                Outcome::Allow
            }
            Err(err) => {
                tracing::info!("session refresh failed, forcing logout: {err}");
                // Flag reset and store/cache clears happen before the
                // redirect outcome exists, let alone renders.
                ctx.app.logout();
                if self.unmount.is_cancelled() {
                    return Outcome::Loading;
                }
                self.state = ValidationState::Invalid;
                self.redirect_to_login(ctx)
            }
        }
    }

    fn redirect_to_login(&self, ctx: &GuardContext) -> Outcome {
        Outcome::Redirect(Redirect {
            to: self.login_path.clone(),
            replace: true,
            return_to: Some(ctx.path.clone()),
        })
    }
}

impl Default for AuthGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use uuid::Uuid;

    use crate::models::{LoginCredentials, Role};

    struct CountingAuth {
        refreshes: AtomicUsize,
        succeed: bool,
    }

    impl CountingAuth {
        fn new(succeed: bool) -> Self {
            Self {
                refreshes: AtomicUsize::new(0),
                succeed,
            }
        }

        fn identity() -> Identity {
            Identity {
                id: Uuid::new_v4(),
                email: "owner@example.com".to_string(),
                display_name: "Owner".to_string(),
                role: Role::Owner,
            }
        }
    }

    #[async_trait]
    impl AuthApi for CountingAuth {
        async fn refresh(&self) -> Result<Identity, ApiError> {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
            if self.succeed {
                Ok(Self::identity())
            } else {
                Err(ApiError::Unauthorized)
            }
        }

        async fn login(&self, _credentials: &LoginCredentials) -> Result<Identity, ApiError> {
            Ok(Self::identity())
        }

        async fn logout(&self) -> Result<(), ApiError> {
            Ok(())
        }
    }

    #[test]
    fn starts_unvalidated() {
        let validator = SessionValidator::new();
        assert!(!validator.is_validated());
    }

    #[tokio::test]
    async fn probe_success_sets_the_flag() {
        let validator = SessionValidator::new();
        let auth = CountingAuth::new(true);

        let renewed = validator.ensure_validated(&auth).await.unwrap();
        assert!(renewed.is_some());
        assert!(validator.is_validated());
    }

    #[tokio::test]
    async fn second_call_short_circuits() {
        let validator = SessionValidator::new();
        let auth = CountingAuth::new(true);

        validator.ensure_validated(&auth).await.unwrap();
        let renewed = validator.ensure_validated(&auth).await.unwrap();

        assert!(renewed.is_none());
        assert_eq!(auth.refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn probe_failure_resets_the_flag() {
        let validator = SessionValidator::new();
        let auth = CountingAuth::new(false);

        let result = validator.ensure_validated(&auth).await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
        assert!(!validator.is_validated());
    }

    #[tokio::test]
    async fn invalidate_forces_a_fresh_probe() {
        let validator = SessionValidator::new();
        let auth = CountingAuth::new(true);

        validator.ensure_validated(&auth).await.unwrap();
        validator.invalidate();
        validator.ensure_validated(&auth).await.unwrap();

        assert_eq!(auth.refreshes.load(Ordering::SeqCst), 2);
    }
}
