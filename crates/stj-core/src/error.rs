//! Error types for `stj-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("registration number must not be empty")]
  EmptyRegistrationNumber,

  #[error("invalid case date {0:?}, expected DD/MM/YYYY")]
  InvalidCaseDate(String),

  #[error("invalid jurisdiction {0:?}, expected a two-character code")]
  InvalidJurisdiction(String),

  #[error("stage text is {0} characters long, the limit is {max}", max = crate::stage::MAX_STAGE_TEXT_CHARS)]
  StageTextTooLong(usize),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
