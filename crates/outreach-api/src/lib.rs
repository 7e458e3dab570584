//! Outreach API - HTTP interface
//!
//! Axum routes and handlers for the campaign builder: campaign CRUD
//! and draft content sync, email lists and contacts, sender accounts,
//! uploads, and AI personalization.

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
