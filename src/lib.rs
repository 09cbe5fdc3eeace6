//! Cutiscura: dashboard, product catalog, skin quiz and appointments for a
//! skincare practice, rendered server-side.

pub mod app;
pub mod appointments;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod products;
pub mod quiz;
pub mod state;
pub mod store;
pub mod views;

pub use app::build_app;
pub use config::AppConfig;
pub use state::AppState;
pub use store::{MemoryStore, PgStore, Store};
