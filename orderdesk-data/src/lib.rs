//! # orderdesk-data
//!
//! Database helpers on top of [SQLx](https://github.com/launchbadge/sqlx):
//!
//! | Type | Description |
//! |------|-------------|
//! | [`DataError`] | Data-layer error, convertible into `HttpError` |
//! | [`Tx`] | Transaction guard, rolls back on drop unless committed |
//! | [`transactional`] | Begin / run / commit-or-rollback in one call |
//!
//! # Feature flags
//!
//! | Feature    | Driver |
//! |------------|--------|
//! | `sqlite`   | SQLite via `sqlx/sqlite` |
//! | `postgres` | PostgreSQL via `sqlx/postgres` |

pub mod error;
pub mod tx;

pub use error::{DataError, DataResult};
pub use tx::{transactional, Tx};
