//! `abomd`: HTTP front end for the ABOM risk scoring engine.

pub mod api;
pub mod config;
pub mod server;

pub use api::router::build_router;
pub use api::AppState;
pub use config::ServerConfig;
