//! HTTP server
//!
//! Actix-web surface over the generation pipeline.

pub mod builder;
pub mod routes;
pub mod server;
pub mod state;

pub use server::HttpServer;
pub use state::AppState;
