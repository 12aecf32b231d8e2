//! Translation of pool and Diesel failures into driven-port errors.
//!
//! Every store error enum has `Connection` and `Query` variants; the
//! [`StoreError`] trait lets one pair of mapping functions serve them all.
//! Connection failures become 503s upstream and query failures 500s.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{
    EventRepositoryError, ExampleDataSeedRepositoryError, GroupRepositoryError,
    RegistrationRepositoryError, SkillRepositoryError, SocialGraphRepositoryError,
    UserRepositoryError,
};

use super::pool::PoolError;

pub(crate) trait StoreError: Sized {
    fn connection_failed(message: String) -> Self;
    fn query_failed(message: String) -> Self;
}

macro_rules! impl_store_error {
    ($($ty:ty),* $(,)?) => {
        $(
            impl StoreError for $ty {
                fn connection_failed(message: String) -> Self {
                    Self::connection(message)
                }

                fn query_failed(message: String) -> Self {
                    Self::query(message)
                }
            }
        )*
    };
}

impl_store_error!(
    UserRepositoryError,
    EventRepositoryError,
    RegistrationRepositoryError,
    SocialGraphRepositoryError,
    SkillRepositoryError,
    GroupRepositoryError,
    ExampleDataSeedRepositoryError,
);

pub(crate) fn map_pool_error<E: StoreError>(error: PoolError) -> E {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            E::connection_failed(message)
        }
    }
}

pub(crate) fn map_diesel_error<E: StoreError>(error: DieselError) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            E::connection_failed("database connection error".to_owned())
        }
        DieselError::NotFound => E::query_failed("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => E::query_failed("database query error".to_owned()),
        _ => E::query_failed("database error".to_owned()),
    }
}

/// Whether `error` is a unique constraint violation.
pub(crate) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Map a row that failed domain validation on the way out of the database.
pub(crate) fn corrupt_row<E: StoreError>(table: &str, reason: String) -> E {
    E::query_failed(format!("invalid {table} row: {reason}"))
}
