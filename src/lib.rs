pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod id;
pub mod products;
pub mod query;
pub mod repository;
pub mod users;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use auth::{require_auth, AuthService, TokenService};
use config::Config;
use products::{MemoryProductRepository, PgProductRepository, ProductRepository};
use users::{MemoryUserRepository, PgUserRepository, UserRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
    pub users: Arc<dyn UserRepository>,
    pub auth: Arc<AuthService>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    /// Wire the services around the given storage engines
    pub fn new(
        products: Arc<dyn ProductRepository>,
        users: Arc<dyn UserRepository>,
        tokens: TokenService,
    ) -> Self {
        let tokens = Arc::new(tokens);
        let auth = Arc::new(AuthService::new(users.clone(), tokens.clone()));
        Self {
            products,
            users,
            auth,
            tokens,
        }
    }

    /// Postgres-backed state
    pub fn postgres(pool: db::DbPool, config: &Config) -> Self {
        Self::new(
            Arc::new(PgProductRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool)),
            TokenService::new(&config.jwt_secret, config.jwt_expires_in),
        )
    }

    /// State backed by the in-memory store; nothing survives a restart
    pub fn in_memory(config: &Config) -> Self {
        Self::new(
            Arc::new(MemoryProductRepository::new()),
            Arc::new(MemoryUserRepository::new()),
            TokenService::new(&config.jwt_secret, config.jwt_expires_in),
        )
    }
}

/// Creates and configures the application router
/// Product routes require a bearer token; user routes are public
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let product_routes = Router::new()
        .route(
            "/products",
            post(products::create_product).get(products::list_products),
        )
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            require_auth,
        ));

    let user_routes = Router::new()
        .route("/users", post(users::create_user))
        .route("/users/generate-jwt", post(users::generate_jwt));

    Router::new()
        .merge(product_routes)
        .merge(user_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
