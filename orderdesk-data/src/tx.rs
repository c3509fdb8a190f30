//! Transaction guard with automatic rollback.
//!
//! [`Tx`] wraps an SQLx [`Transaction`]: it is committed explicitly and rolled
//! back when dropped on any other path (early return, `?`, panic). The pooled
//! connection goes back to the pool either way. [`transactional`] packages the
//! begin / run / commit-or-rollback sequence as one call.

use futures_util::future::BoxFuture;
use sqlx::{Database, Pool, Transaction};

use crate::error::DataError;

/// A wrapper around an SQLx [`Transaction`].
///
/// Dropping a `Tx` without calling [`commit`](Tx::commit) rolls it back.
pub struct Tx<'a, DB: Database>(Transaction<'a, DB>);

impl<DB: Database> Tx<'static, DB> {
    /// Begin a new transaction on a connection acquired from `pool`.
    pub async fn begin(pool: &Pool<DB>) -> Result<Self, DataError> {
        let tx = pool.begin().await?;
        Ok(Tx(tx))
    }
}

impl<'a, DB: Database> Tx<'a, DB> {
    /// Returns a mutable reference to the underlying connection, usable as an executor.
    pub fn as_mut(&mut self) -> &mut <DB as Database>::Connection {
        &mut *self.0
    }

    pub async fn commit(self) -> Result<(), DataError> {
        self.0.commit().await?;
        Ok(())
    }

    pub async fn rollback(self) -> Result<(), DataError> {
        self.0.rollback().await?;
        Ok(())
    }
}

/// Run `f` inside a transaction on `pool`.
///
/// Commits when `f` returns `Ok`, rolls back when it returns `Err`. A failed
/// rollback is logged and the original error is returned; a failed commit is
/// returned as the error.
///
/// ```ignore
/// let order = transactional(&pool, move |tx| {
///     Box::pin(async move {
///         sqlx::query("DELETE FROM items WHERE order_id = $1")
///             .bind(id)
///             .execute(tx.as_mut())
///             .await?;
///         Ok::<_, DataError>(())
///     })
/// })
/// .await?;
/// ```
pub async fn transactional<DB, F, T, E>(pool: &Pool<DB>, f: F) -> Result<T, E>
where
    DB: Database,
    F: for<'c> FnOnce(&'c mut Tx<'static, DB>) -> BoxFuture<'c, Result<T, E>>,
    E: From<DataError>,
{
    let mut tx = Tx::begin(pool).await?;
    match f(&mut tx).await {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}
