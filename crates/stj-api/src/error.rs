//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use stj_core::store::StoreError;
use thiserror::Error;

use crate::schema::ErrorBody;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The request did not parse into the declared shape.
  #[error("{0}")]
  Validation(String),

  #[error("not found")]
  NotFound,

  #[error("duplicate")]
  Conflict,

  /// A write failed for any reason other than a uniqueness violation.
  #[error("save failed")]
  SaveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Map the outcome of an insert or update.
  pub fn from_write<E: StoreError>(err: E) -> Self {
    if err.is_conflict() {
      ApiError::Conflict
    } else {
      ApiError::SaveFailed(Box::new(err))
    }
  }

  pub fn from_read<E: StoreError>(err: E) -> Self { ApiError::Store(Box::new(err)) }
}

impl From<stj_core::Error> for ApiError {
  fn from(err: stj_core::Error) -> Self { ApiError::Validation(err.to_string()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::Validation(_) | ApiError::SaveFailed(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound => StatusCode::NOT_FOUND,
      ApiError::Conflict => StatusCode::CONFLICT,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorBody { message: self.to_string() })).into_response()
  }
}
