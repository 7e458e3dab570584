//! Outreach Storage - PostgreSQL persistence
//!
//! This crate provides the database layer for Outreach: the connection
//! pool, row models, and per-entity repositories.

pub mod db;
pub mod models;
pub mod repository;

pub use db::{classify_db_error, DatabasePool};
pub use models::*;
pub use repository::*;
