//! Handlers for case endpoints.
//!
//! | Method   | Path         | Notes |
//! |----------|--------------|-------|
//! | `POST`   | `/processo`  | Form: [`CaseCreateRequest`]; 409 on a taken key |
//! | `PUT`    | `/processo`  | Form: [`CaseCreateRequest`]; 404 if the key is unknown |
//! | `GET`    | `/processos` | Every case, without stages |
//! | `GET`    | `/processo`  | `?registrationNumber`; case plus stages |
//! | `DELETE` | `/processo`  | `?registrationNumber`, percent-encoded twice |

use std::sync::Arc;

use axum::{
  Form,
  Json,
  extract::{
    Query, State,
    rejection::{FormRejection, QueryRejection},
  },
};
use percent_encoding::percent_decode_str;
use stj_core::{case::NewCase, store::CaseStore};

use crate::{
  error::ApiError,
  schema::{
    CaseCreateRequest, CaseList, CaseLookupRequest, CaseSummary, CaseView,
    DeleteConfirmation, ErrorBody,
  },
};

// ─── Create ───────────────────────────────────────────────────────────────────

/// Add a case. Answers with the stored case and its (empty) stage list.
#[utoipa::path(
  post,
  path = "/processo",
  tag = "Processo",
  operation_id = "create_case",
  request_body(content = CaseCreateRequest, content_type = "application/x-www-form-urlencoded"),
  responses(
    (status = 200, description = "Case stored", body = CaseView),
    (status = 409, description = "Registration number already taken", body = ErrorBody),
    (status = 400, description = "Invalid input or save failure", body = ErrorBody)
  )
)]
pub async fn create<S>(
  State(store): State<Arc<S>>,
  form: Result<Form<CaseCreateRequest>, FormRejection>,
) -> Result<Json<CaseView>, ApiError>
where
  S: CaseStore,
{
  let Form(body) = form.map_err(|r| ApiError::Validation(r.body_text()))?;
  let input = NewCase::try_from(body)?;
  let key = input.registration_number.clone();

  tracing::debug!(registration_number = %key, "adding case");

  let case = store.insert_case(input).await.map_err(|e| {
    tracing::warn!(registration_number = %key, error = %e, "failed to add case");
    ApiError::from_write(e)
  })?;

  tracing::debug!(registration_number = %key, case_id = case.case_id, "case added");
  Ok(Json(CaseView::new(case, Vec::new())))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// Update a case; the form's registration number selects it.
#[utoipa::path(
  put,
  path = "/processo",
  tag = "Processo",
  operation_id = "update_case",
  request_body(content = CaseCreateRequest, content_type = "application/x-www-form-urlencoded"),
  responses(
    (status = 200, description = "Case updated", body = CaseView),
    (status = 404, description = "No case with that registration number", body = ErrorBody),
    (status = 409, description = "Registration number already taken", body = ErrorBody),
    (status = 400, description = "Invalid input or save failure", body = ErrorBody)
  )
)]
pub async fn update<S>(
  State(store): State<Arc<S>>,
  form: Result<Form<CaseCreateRequest>, FormRejection>,
) -> Result<Json<CaseView>, ApiError>
where
  S: CaseStore,
{
  let Form(body) = form.map_err(|r| ApiError::Validation(r.body_text()))?;
  let input = NewCase::try_from(body)?;
  let key = input.registration_number.clone();

  let case = store
    .update_case(&key, input)
    .await
    .map_err(|e| {
      tracing::warn!(registration_number = %key, error = %e, "failed to update case");
      ApiError::from_write(e)
    })?
    .ok_or_else(|| {
      tracing::warn!(registration_number = %key, "update target not found");
      ApiError::NotFound
    })?;

  tracing::debug!(registration_number = %key, "case updated");

  let stages = store
    .list_stages(&case.registration_number)
    .await
    .map_err(|e| {
      tracing::warn!(registration_number = %key, error = %e, "failed to list stages");
      ApiError::from_read(e)
    })?;
  Ok(Json(CaseView::new(case, stages)))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// List every case, without stages.
#[utoipa::path(
  get,
  path = "/processos",
  tag = "Processo",
  operation_id = "list_cases",
  responses((status = 200, description = "All cases", body = CaseList))
)]
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<CaseList>, ApiError>
where
  S: CaseStore,
{
  let cases = store.list_cases().await.map_err(|e| {
    tracing::warn!(error = %e, "failed to list cases");
    ApiError::from_read(e)
  })?;
  tracing::debug!(count = cases.len(), "cases listed");

  Ok(Json(CaseList {
    cases: cases.into_iter().map(CaseSummary::from).collect(),
  }))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// Fetch one case with its stages.
#[utoipa::path(
  get,
  path = "/processo",
  tag = "Processo",
  operation_id = "get_case",
  params(CaseLookupRequest),
  responses(
    (status = 200, description = "Case found", body = CaseView),
    (status = 404, description = "No case with that registration number", body = ErrorBody)
  )
)]
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  query: Result<Query<CaseLookupRequest>, QueryRejection>,
) -> Result<Json<CaseView>, ApiError>
where
  S: CaseStore,
{
  let Query(params) = query.map_err(|r| ApiError::Validation(r.body_text()))?;
  let key = params.registration_number;

  tracing::debug!(registration_number = %key, "fetching case");

  let case = store
    .find_case(&key)
    .await
    .map_err(|e| {
      tracing::warn!(registration_number = %key, error = %e, "failed to fetch case");
      ApiError::from_read(e)
    })?
    .ok_or_else(|| {
      tracing::warn!(registration_number = %key, "case not found");
      ApiError::NotFound
    })?;

  let stages = store.list_stages(&key).await.map_err(|e| {
    tracing::warn!(registration_number = %key, error = %e, "failed to list stages");
    ApiError::from_read(e)
  })?;
  Ok(Json(CaseView::new(case, stages)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// Delete a case and its stages.
///
/// Callers encode the key twice: the query extractor undoes one layer and
/// this handler undoes the second.
#[utoipa::path(
  delete,
  path = "/processo",
  tag = "Processo",
  operation_id = "delete_case",
  params(CaseLookupRequest),
  responses(
    (status = 200, description = "Case removed", body = DeleteConfirmation),
    (status = 404, description = "No case with that registration number", body = ErrorBody)
  )
)]
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  query: Result<Query<CaseLookupRequest>, QueryRejection>,
) -> Result<Json<DeleteConfirmation>, ApiError>
where
  S: CaseStore,
{
  let Query(params) = query.map_err(|r| ApiError::Validation(r.body_text()))?;
  let key = percent_decode_str(&params.registration_number)
    .decode_utf8_lossy()
    .into_owned();

  tracing::debug!(registration_number = %key, "deleting case");

  let removed = store.delete_case(&key).await.map_err(|e| {
    tracing::warn!(registration_number = %key, error = %e, "failed to delete case");
    ApiError::from_read(e)
  })?;
  if removed == 0 {
    tracing::warn!(registration_number = %key, "delete target not found");
    return Err(ApiError::NotFound);
  }

  tracing::debug!(registration_number = %key, "case deleted");
  Ok(Json(DeleteConfirmation {
    message: "case removed".to_owned(),
    id:      key,
  }))
}
