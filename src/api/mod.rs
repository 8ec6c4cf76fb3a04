pub mod error;
pub mod health;
pub mod member;

use axum::{Router, routing::get};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Member search
        .route("/v1/members", get(member::search_member_v1))
        .route("/v2/members", get(member::search_member_v2))
        .with_state(state)
}
