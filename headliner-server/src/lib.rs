//! # Headliner Server
//!
//! HTTP front end of the Headliner news aggregator: configuration loading,
//! startup seeding, axum routes and server-rendered pages.

pub mod handlers;
pub mod infra;
pub mod routes;
pub mod views;

pub use infra::app_state::AppState;
