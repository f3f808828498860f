//! Storage layer
//!
//! SQLite schema and typed errors for the article store.
//!
//! ## Tables
//!
//! - `articles` - One row per stored article; content blocks are kept as
//!   a JSON array in the `content` column
//! - `schema_info` - Schema version tracking

pub mod error;
pub mod schema;

pub use error::{StoreError, StoreResult};
pub use schema::{init_schema, needs_init, SCHEMA_VERSION};
