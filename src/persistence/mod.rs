//! Persistence layer: PostgreSQL storage for ingested StatsBomb data.
//!
//! [`MatchStore`](postgres::MatchStore) wraps `sqlx::PgPool` and owns all
//! SQL: idempotent schema creation, `ON CONFLICT DO NOTHING` upserts for
//! the loaders, and the read queries behind the analytics endpoints.

pub mod postgres;
pub mod schema;

pub use postgres::{MatchFilter, MatchStore};
