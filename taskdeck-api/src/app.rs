/// Application state, router builder, and bearer-token middleware
///
/// # Router layout
///
/// ```text
/// /
/// ├── GET  /                          # liveness message (public)
/// ├── /api/
/// │   ├── GET  /health                # health check (public)
/// │   ├── /auth/                      # authentication (public)
/// │   │   ├── POST /register
/// │   │   └── POST /login
/// │   └── /tasks/                     # task CRUD (bearer token required)
/// │       ├── POST   /
/// │       ├── GET    /
/// │       ├── GET    /:id
/// │       ├── PUT    /:id
/// │       ├── DELETE /:id
/// │       └── PATCH  /:id/complete
/// ```
///
/// # Example
///
/// ```no_run
/// use taskdeck_api::app::{build_router, AppState};
/// use taskdeck_api::config::Config;
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
///
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
use crate::config::Config;
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskdeck_shared::{auth::jwt, models::user::User};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Uses Arc
/// internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// The authenticated caller, resolved by the bearer-token middleware
///
/// Handlers pull this out of request extensions; its id scopes every task
/// query.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Persisted user id the token resolved to
    pub id: uuid::Uuid,

    /// The user's email, handy for logging
    pub email: String,
}

/// Builds the complete Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes: liveness and authentication
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Task routes require a valid bearer token
    let task_routes = Router::new()
        .route("/", post(routes::tasks::create_task))
        .route("/", get(routes::tasks::list_tasks))
        .route("/:id", get(routes::tasks::get_task))
        .route("/:id", put(routes::tasks::update_task))
        .route("/:id", delete(routes::tasks::delete_task))
        .route("/:id/complete", patch(routes::tasks::toggle_task_completion))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    let api_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/auth", auth_routes)
        .nest("/tasks", task_routes);

    Router::new()
        .route("/", get(routes::health::root))
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bearer-token authentication middleware
///
/// Resolves the inbound token to exactly one persisted user, fresh on every
/// request:
/// 1. decode and verify the token,
/// 2. take the subject claim,
/// 3. look the user up in the store.
///
/// Every failure, including a token whose user has since been deleted, is an
/// unauthorized response, never a not-found.
async fn bearer_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            crate::error::ApiError::Unauthorized("Missing authorization header".to_string())
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        crate::error::ApiError::Unauthorized("Expected Bearer token".to_string())
    })?;

    let claims = jwt::decode_token(token, state.jwt_secret(), state.config.jwt.algorithm)?;

    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| crate::error::ApiError::Unauthorized("User not found".to_string()))?;

    req.extensions_mut().insert(CurrentUser {
        id: user.id,
        email: user.email,
    });

    Ok(next.run(req).await)
}
