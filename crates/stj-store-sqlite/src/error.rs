//! Error type for `stj-store-sqlite`.

use stj_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// The registration number is already held by another case.
  #[error("duplicate registration number: {0}")]
  Duplicate(String),
}

impl Error {
  /// Classify a failed write, singling out unique-constraint violations.
  pub(crate) fn from_write(err: tokio_rusqlite::Error, registration_number: &str) -> Self {
    if is_unique_violation(&err) {
      Error::Duplicate(registration_number.to_owned())
    } else {
      Error::Database(err)
    }
  }
}

impl StoreError for Error {
  fn is_conflict(&self) -> bool { matches!(self, Error::Duplicate(_)) }
}

fn is_unique_violation(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
      if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
