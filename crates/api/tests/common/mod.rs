#![allow(dead_code)]

pub mod memory;

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use bistro_api::auth::jwt::{generate_access_token, JwtConfig};
use bistro_api::config::ServerConfig;
use bistro_api::router::build_app_router;
use bistro_api::state::AppState;
use bistro_core::models::user::NewUser;
use bistro_core::roles::role_for;
use bistro_core::store::UserStore;
use bistro_core::types::DbId;
use http_body_util::BodyExt;
use tower::ServiceExt;

use memory::MemoryDb;

/// Origin the test config whitelists for non-GET requests.
pub const ALLOWED_ORIGIN: &str = "http://localhost:4200";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![ALLOWED_ORIGIN.to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
        bootstrap_admin: None,
    }
}

/// The full application router over an in-memory store.
pub struct TestApp {
    pub router: Router,
    pub db: Arc<MemoryDb>,
    pub config: Arc<ServerConfig>,
}

/// A seeded user together with a valid bearer token.
pub struct TestUser {
    pub id: DbId,
    pub token: String,
}

impl TestApp {
    pub fn new() -> Self {
        let db = Arc::new(MemoryDb::default());
        let config = Arc::new(test_config());
        let state = AppState {
            dishes: db.clone(),
            promotions: db.clone(),
            users: db.clone(),
            config: Arc::clone(&config),
        };
        Self {
            router: build_app_router(state),
            db,
            config,
        }
    }

    /// Insert a user straight into the store and mint a token for them.
    pub async fn seed_user(&self, username: &str, admin: bool) -> TestUser {
        let user = UserStore::create(
            self.db.as_ref(),
            &NewUser {
                username: username.to_string(),
                password_hash: "unused".to_string(),
                firstname: username.to_uppercase(),
                lastname: "Tester".to_string(),
                admin,
            },
        )
        .await
        .expect("seeding a user should succeed");
        let token = generate_access_token(user.id, role_for(admin), &self.config.jwt)
            .expect("token generation should succeed");
        TestUser { id: user.id, token }
    }

    pub async fn admin(&self) -> TestUser {
        self.seed_user("admin", true).await
    }

    /// Send one request through the router.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let request = builder.body(body).expect("request should build");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: serde_json::Value) -> Response {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: serde_json::Value) -> Response {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> Response {
        self.send(Method::DELETE, uri, Some(token), None).await
    }

    /// Create a dish as `admin` and return its id.
    pub async fn create_dish(&self, admin: &TestUser, name: &str) -> DbId {
        let response = self
            .post(
                "/dishes",
                &admin.token,
                serde_json::json!({
                    "name": name,
                    "description": format!("{name}, freshly made"),
                    "category": "mains",
                    "price": 425,
                }),
            )
            .await;
        assert_eq!(response.status(), axum::http::StatusCode::OK);
        body_json(response).await["id"]
            .as_i64()
            .expect("dish id should be a number")
    }

    /// Post a comment as `user` and return the new comment's id.
    pub async fn create_comment(&self, user: &TestUser, dish_id: DbId, text: &str) -> DbId {
        let response = self
            .post(
                &format!("/dishes/{dish_id}/comments"),
                &user.token,
                serde_json::json!({"rating": 4, "comment": text}),
            )
            .await;
        assert_eq!(response.status(), axum::http::StatusCode::OK);
        let dish = body_json(response).await;
        dish["comments"]
            .as_array()
            .and_then(|c| c.last())
            .and_then(|c| c["id"].as_i64())
            .expect("new comment should be last")
    }
}

/// Read the response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Read the response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}
