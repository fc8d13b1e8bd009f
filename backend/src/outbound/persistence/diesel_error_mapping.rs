//! Diesel and pool error mapping for the product repository.
//!
//! Driver text is kept in the error so the HTTP boundary can log it; the
//! client only ever sees the redacted envelope.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::ProductRepositoryError;

use super::pool::PoolError;

pub(crate) fn map_pool_error(error: PoolError) -> ProductRepositoryError {
    ProductRepositoryError::connection(error.to_string())
}

pub(crate) fn map_diesel_error(error: DieselError) -> ProductRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            ProductRepositoryError::connection(info.message())
        }
        DieselError::DatabaseError(_, info) => ProductRepositoryError::query(info.message()),
        other => ProductRepositoryError::query(other.to_string()),
    }
}
