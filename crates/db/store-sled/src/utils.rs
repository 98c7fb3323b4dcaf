use overseer_db_types::DbError;
use sled::transaction::TransactionError;

pub fn to_db_error(e: sled::Error) -> DbError {
    DbError::IoError(e.to_string())
}

/// Unwraps an aborted transaction into the error it was aborted with.
pub fn tx_to_db_error(e: TransactionError<DbError>) -> DbError {
    match e {
        TransactionError::Abort(err) => err,
        TransactionError::Storage(err) => to_db_error(err),
    }
}
