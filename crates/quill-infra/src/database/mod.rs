//! Database connection management and the posts repository.

mod connections;
mod postgres_base;
pub mod postgres_repo;

pub mod entity;
pub mod schema;

pub use connections::{DatabaseConfig, connect};
pub use postgres_repo::PostgresPostRepository;
