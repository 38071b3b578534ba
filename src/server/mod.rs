//! Server initialization and routing

use crate::api;
use crate::cache::CacheManager;
use crate::config::Config;
use crate::domain::PageQuery;
use crate::middleware::{guard, guard_form, AllowAnonymous};
use crate::repository::exception::ExceptionRepositoryImpl;
use crate::state::AppContext;
use crate::views::ViewEngine;
use anyhow::Result;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Extension, Router,
};
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: MySqlPool,
    pub cache_manager: CacheManager,
    pub exception_repo: Arc<ExceptionRepositoryImpl>,
    pub views: ViewEngine,
}

impl AppContext for AppState {
    type Sessions = CacheManager;
    type Exceptions = ExceptionRepositoryImpl;

    fn config(&self) -> &Config {
        &self.config
    }

    fn sessions(&self) -> &Self::Sessions {
        &self.cache_manager
    }

    fn exceptions(&self) -> &Self::Exceptions {
        &self.exception_repo
    }

    fn views(&self) -> &ViewEngine {
        &self.views
    }

    async fn check_ready(&self) -> (bool, bool) {
        let db_ok = sqlx::query("SELECT 1").execute(&self.db_pool).await.is_ok();
        let cache_ok = self.cache_manager.ping().await.is_ok();
        (db_ok, cache_ok)
    }
}

/// Build the application router.
///
/// Generic over the context so the same route table serves the production
/// `AppState` and the fakes used in integration tests.
pub fn build_router<S: AppContext>(state: S) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health endpoints
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        // Exception log screens
        .route(
            "/Exception/Index",
            get(api::exception::index::<S>)
                .route_layer(from_fn_with_state(state.clone(), guard::<S>)),
        )
        .route(
            "/Exception/List",
            post(api::exception::list::<S>)
                .route_layer(from_fn_with_state(state.clone(), guard_form::<S, PageQuery>)),
        )
        // Login flow; the marker layer is added last so it runs first and
        // the guard sees it
        .route(
            "/Home/login",
            get(api::home::login_page::<S>)
                .post(api::home::login::<S>)
                .route_layer(from_fn_with_state(state.clone(), guard::<S>))
                .route_layer(Extension(AllowAnonymous)),
        )
        .route(
            "/Home/logout",
            post(api::home::logout::<S>)
                .route_layer(from_fn_with_state(state.clone(), guard::<S>)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the server
pub async fn run(config: Config) -> Result<()> {
    // Create database connection pool
    let db_pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    info!("Connected to database");

    let cache_manager = CacheManager::new(&config.redis).await?;
    info!("Connected to Redis");

    let exception_repo = Arc::new(ExceptionRepositoryImpl::new(db_pool.clone()));
    let views = ViewEngine::new()?;

    let state = AppState {
        config: Arc::new(config.clone()),
        db_pool,
        cache_manager,
        exception_repo,
        views,
    };

    let app = build_router(state);

    let http_addr = config.http_addr();
    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
