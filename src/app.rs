use crate::config::ServerConfig;
use crate::handlers;
use crate::middleware::{add_security_headers, SecurityPolicy};
use crate::services::upload_service::UPLOADS_ROUTE;
use crate::AppState;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let uploads = ServeDir::new(state.upload_store.dir());

    let api = Router::new()
        .route(
            "/signup",
            post(handlers::signup_handler)
                .layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
        .route("/login", post(handlers::login_handler))
        .route("/verify", post(handlers::verify_claim_handler))
        .route("/influencers", get(handlers::list_influencers_handler))
        .route("/influencers/stats", get(handlers::leaderboard_stats_handler))
        .route("/influencers/{id}", get(handlers::get_influencer_handler));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/api", api)
        .nest_service(UPLOADS_ROUTE, uploads)
        .layer(middleware::from_fn_with_state(
            SecurityPolicy {
                hsts: config.is_production(),
            },
            add_security_headers,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
