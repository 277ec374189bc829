//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! PostgreSQL persistence via SeaORM, connection setup, and startup
//! schema management.

pub mod database;

pub use database::{DatabaseConfig, PostgresPostRepository, connect};
