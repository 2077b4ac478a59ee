use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use pocketledger::api::{ApiClient, ApiError, AuthApi, BusinessApi, HttpAuthApi, HttpBusinessApi};
use pocketledger::models::{BusinessKind, BusinessProfile, Identity, LoginCredentials, Role};
use uuid::Uuid;

fn owner_identity() -> Identity {
    Identity {
        id: Uuid::new_v4(),
        email: "owner@example.com".to_string(),
        display_name: "Owner".to_string(),
        role: Role::Owner,
    }
}

fn sample_profile() -> BusinessProfile {
    BusinessProfile {
        id: Uuid::new_v4(),
        name: "Corner Bakery".to_string(),
        kind: BusinessKind::Goods,
        currency: "USD".to_string(),
        created_at: Utc::now(),
    }
}

/// Serve a stub backend on an ephemeral port, returning its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub server");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Stub server died");
    });
    format!("http://{}", addr)
}

async fn client_for(router: Router) -> ApiClient {
    ApiClient::new(serve(router).await, None)
}

mod auth_api {
    use super::*;

    #[tokio::test]
    async fn refresh_returns_the_renewed_identity() {
        let router = Router::new().route("/auth/refresh", post(|| async { Json(owner_identity()) }));
        let auth = HttpAuthApi::new(client_for(router).await);

        let identity = auth.refresh().await.expect("Refresh failed");

        assert_eq!(identity.email, "owner@example.com");
        assert_eq!(identity.role, Role::Owner);
    }

    #[tokio::test]
    async fn an_expired_session_maps_to_unauthorized() {
        let router = Router::new().route(
            "/auth/refresh",
            post(|| async { StatusCode::UNAUTHORIZED }),
        );
        let auth = HttpAuthApi::new(client_for(router).await);

        let result = auth.refresh().await;

        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }

    #[tokio::test]
    async fn login_sends_the_credentials() {
        let router = Router::new().route(
            "/auth/login",
            post(|Json(credentials): Json<LoginCredentials>| async move {
                let mut identity = owner_identity();
                identity.email = credentials.email;
                Json(identity)
            }),
        );
        let auth = HttpAuthApi::new(client_for(router).await);

        let identity = auth
            .login(&LoginCredentials {
                email: "new@example.com".to_string(),
                password: "hunter2".to_string(),
            })
            .await
            .expect("Login failed");

        assert_eq!(identity.email, "new@example.com");
    }

    #[tokio::test]
    async fn rejected_credentials_map_to_unauthorized() {
        let router = Router::new().route(
            "/auth/login",
            post(|| async { StatusCode::UNAUTHORIZED }),
        );
        let auth = HttpAuthApi::new(client_for(router).await);

        let result = auth
            .login(&LoginCredentials {
                email: "new@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }

    #[tokio::test]
    async fn logout_succeeds_on_an_empty_response() {
        let router = Router::new().route("/auth/logout", post(|| async { StatusCode::OK }));
        let auth = HttpAuthApi::new(client_for(router).await);

        auth.logout().await.expect("Logout failed");
    }

    #[tokio::test]
    async fn a_backend_failure_maps_to_a_server_error() {
        let router = Router::new().route(
            "/auth/logout",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "session service down") }),
        );
        let auth = HttpAuthApi::new(client_for(router).await);

        let result = auth.logout().await;

        match result {
            Err(ApiError::Server(message)) => assert!(message.contains("session service down")),
            other => panic!("Expected server error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn a_configured_bearer_token_is_attached() {
        let router = Router::new().route(
            "/auth/refresh",
            post(|headers: HeaderMap| async move {
                match headers.get("authorization").and_then(|v| v.to_str().ok()) {
                    Some("Bearer staging-token") => Json(owner_identity()).into_response(),
                    _ => StatusCode::UNAUTHORIZED.into_response(),
                }
            }),
        );
        let base_url = serve(router).await;
        let auth = HttpAuthApi::new(ApiClient::new(base_url, Some("staging-token".to_string())));

        auth.refresh().await.expect("Refresh failed");
    }
}

mod business_api {
    use super::*;

    #[tokio::test]
    async fn an_onboarded_business_deserializes() {
        let router = Router::new().route("/business", get(|| async { Json(sample_profile()) }));
        let business = HttpBusinessApi::new(client_for(router).await);

        let profile = business.get().await.expect("Fetch failed").expect("No profile");

        assert_eq!(profile.name, "Corner Bakery");
        assert_eq!(profile.kind, BusinessKind::Goods);
    }

    #[tokio::test]
    async fn a_missing_business_reads_as_none() {
        let router = Router::new().route(
            "/business",
            get(|| async { (StatusCode::NOT_FOUND, "no business for account") }),
        );
        let business = HttpBusinessApi::new(client_for(router).await);

        let profile = business.get().await.expect("Fetch failed");

        assert!(profile.is_none());
    }

    #[tokio::test]
    async fn a_backend_failure_propagates_as_an_error() {
        let router = Router::new().route(
            "/business",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let business = HttpBusinessApi::new(client_for(router).await);

        let result = business.get().await;

        assert!(matches!(result, Err(ApiError::Server(_))));
    }
}
