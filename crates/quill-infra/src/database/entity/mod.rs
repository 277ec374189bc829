//! SeaORM entities mapping the relational schema.

pub mod post;
