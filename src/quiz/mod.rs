mod dto;
pub mod handlers;
pub mod services;

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quiz", get(handlers::quiz_page))
        .route("/quiz/submit", post(handlers::submit_quiz))
}
