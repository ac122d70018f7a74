/// Common test utilities for integration tests
///
/// Provides the shared infrastructure for exercising the API end-to-end:
/// - test database setup via migrations
/// - registered test user + bearer token
/// - request/response helpers driving the router directly through tower
///
/// Tests are skipped when `DATABASE_URL` is not set, so the suite passes on
/// machines without PostgreSQL.
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use sqlx::PgPool;
use taskdeck_api::app::{build_router, AppState};
use taskdeck_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use tower::ServiceExt;
use uuid::Uuid;

/// Test context containing the router and a registered, logged-in user
pub struct TestContext {
    pub db: PgPool,
    pub app: Router,
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

/// Returns a config for tests, or None when DATABASE_URL is unset
pub fn test_config() -> Option<Config> {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").ok()?;

    Some(Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url,
            max_connections: 5,
        },
        jwt: JwtConfig {
            secret: "integration-test-secret-at-least-32-bytes".to_string(),
            algorithm: jsonwebtoken::Algorithm::HS256,
            token_ttl_seconds: 86_400,
        },
    })
}

impl TestContext {
    /// Creates a context with a fresh user registered and logged in
    ///
    /// Returns None when DATABASE_URL is unset.
    pub async fn new() -> anyhow::Result<Option<Self>> {
        let Some(config) = test_config() else {
            eprintln!("DATABASE_URL not set, skipping integration test");
            return Ok(None);
        };

        let db = PgPool::connect(&config.database.url).await?;

        // Migrations path is relative to the taskdeck-shared crate root
        sqlx::migrate!("../taskdeck-shared/migrations").run(&db).await?;

        let app = build_router(AppState::new(db.clone(), config));

        // Unique email per run keeps reruns independent
        let email = format!("test-{}@example.com", Uuid::new_v4());

        let mut ctx = Self {
            db,
            app,
            user_id: Uuid::nil(),
            email: email.clone(),
            token: String::new(),
        };

        let (status, body) = ctx
            .request(
                "POST",
                "/api/auth/register",
                None,
                Some(serde_json::json!({ "email": email, "password": "password1" })),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "register failed: {}", body);
        ctx.user_id = body["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or_else(|| anyhow::anyhow!("register response missing id"))?;

        let (status, body) = ctx
            .request(
                "POST",
                "/api/auth/login",
                None,
                Some(serde_json::json!({ "email": email, "password": "password1" })),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "login failed: {}", body);
        ctx.token = body["access_token"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("login response missing access_token"))?
            .to_string();

        Ok(Some(ctx))
    }

    /// Sends a request through the router and parses the JSON response
    ///
    /// Returns the status and body; empty bodies parse as JSON null.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        bearer: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> anyhow::Result<(StatusCode, serde_json::Value)> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = bearer {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.app.clone().oneshot(request).await?;
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok((status, json))
    }

    /// Shorthand for an authenticated request as the context user
    pub async fn authed(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> anyhow::Result<(StatusCode, serde_json::Value)> {
        self.request(method, uri, Some(&self.token), body).await
    }

    /// Removes the context user; the tasks table cascades
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(self.user_id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}
