//! Shared Diesel error mapping for repositories with basic query semantics.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::{PoolError, TransactionError};

/// Map pool errors into a repository-specific connection error constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
pub fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

/// Map a pooled transaction failure with the same rules as above.
pub fn map_basic_transaction_error<E, Q, C>(error: TransactionError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(String) -> E,
{
    match error {
        TransactionError::Pool(pool) => map_basic_pool_error(pool, connection),
        TransactionError::Diesel(diesel) => {
            map_basic_diesel_error(diesel, query, |message| connection(message.to_owned()))
        }
    }
}

/// True when the statement failed on a unique constraint.
pub fn is_unique_violation(error: &TransactionError) -> bool {
    matches!(
        error,
        TransactionError::Diesel(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            _
        ))
    )
}
