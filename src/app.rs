//! Application core: wires the stores, the session validator, and the REST
//! collaborators, and owns the boot/login/logout lifecycle.

use std::sync::Arc;

use anyhow::Result;

use crate::api::{ApiError, AuthApi, BusinessApi, QueryCache};
use crate::guard::{GuardContext, SessionValidator};
use crate::models::{Identity, LoginCredentials};
use crate::store::{BusinessStore, KvStore, SessionStore, SubscriptionStore, UiStore};

/// Shared handles to the client's process-wide state and collaborators.
///
/// Every field is `Arc`-shared, so cloning an `AppCore` is cheap and every
/// clone observes the same stores: guards, pages, and the host shell all
/// hold clones of one core.
#[derive(Clone)]
pub struct AppCore {
    pub session: Arc<SessionStore>,
    pub business: Arc<BusinessStore>,
    pub subscription: Arc<SubscriptionStore>,
    pub ui: Arc<UiStore>,
    pub validator: Arc<SessionValidator>,
    pub cache: Arc<dyn QueryCache>,
    pub auth_api: Arc<dyn AuthApi>,
    pub business_api: Arc<dyn BusinessApi>,
}

impl AppCore {
    pub fn new(
        kv: KvStore,
        auth_api: Arc<dyn AuthApi>,
        business_api: Arc<dyn BusinessApi>,
        cache: Arc<dyn QueryCache>,
    ) -> Self {
        Self {
            session: Arc::new(SessionStore::new(kv.clone())),
            business: Arc::new(BusinessStore::new(kv)),
            subscription: Arc::new(SubscriptionStore::new()),
            ui: Arc::new(UiStore::new()),
            validator: Arc::new(SessionValidator::new()),
            cache,
            auth_api,
            business_api,
        }
    }

    /// Rehydrate persisted state. Until this runs the session reports
    /// `loading` and auth guards hold at a neutral indicator.
    pub fn boot(&self) -> Result<()> {
        self.session.load()?;
        self.business.load()?;
        Ok(())
    }

    /// Sign in and persist the session locally.
    ///
    /// The validation flag stays false: the next protected mount performs
    /// the one refresh probe of the new session.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Identity, ApiError> {
        let identity = self.auth_api.login(credentials).await?;
        if let Err(err) = self.session.login(identity.clone()) {
            tracing::warn!("failed to persist session: {err:#}");
        }
        Ok(identity)
    }

    /// Tear down the session: synchronous-first.
    ///
    /// The validation flag, all three stores, and the query cache reset in
    /// one tick with no await points, so a mounted guard evaluating a
    /// redirect can never read half-cleared state. Only the server-side
    /// session invalidation is asynchronous, and it is best-effort.
    pub fn logout(&self) {
        self.validator.invalidate();
        if let Err(err) = self.session.clear() {
            tracing::warn!("failed to clear persisted session: {err:#}");
        }
        if let Err(err) = self.business.clear() {
            tracing::warn!("failed to clear persisted business profile: {err:#}");
        }
        self.subscription.clear();
        self.cache.clear();

        let auth_api = Arc::clone(&self.auth_api);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(err) = auth_api.logout().await {
                        tracing::warn!("server-side logout failed: {err}");
                    }
                });
            }
            Err(_) => {
                tracing::debug!("no async runtime; skipping server-side logout");
            }
        }
    }

    /// Build the context guards evaluate for a navigation to `path`.
    pub fn guard_context(&self, path: impl Into<String>) -> GuardContext {
        GuardContext {
            app: self.clone(),
            path: path.into(),
        }
    }
}
