//! Handlers for stage endpoints.
//!
//! | Method | Path    | Notes |
//! |--------|---------|-------|
//! | `GET`  | `/fase` | `?registrationNumber`; empty list when none |
//! | `POST` | `/fase` | Form: [`StageCreateRequest`]; routed only when enabled |

use std::sync::Arc;

use axum::{
  Form,
  Json,
  extract::{
    Query, State,
    rejection::{FormRejection, QueryRejection},
  },
};
use stj_core::{stage::NewStage, store::CaseStore};

use crate::{
  error::ApiError,
  schema::{ErrorBody, StageCreateRequest, StageList, StageLookupRequest, StageView},
};

/// List the stages recorded against a case.
#[utoipa::path(
  get,
  path = "/fase",
  tag = "Fase",
  operation_id = "list_stages",
  params(StageLookupRequest),
  responses((status = 200, description = "Stages for the case, possibly empty", body = StageList))
)]
pub async fn list<S>(
  State(store): State<Arc<S>>,
  query: Result<Query<StageLookupRequest>, QueryRejection>,
) -> Result<Json<StageList>, ApiError>
where
  S: CaseStore,
{
  let Query(params) = query.map_err(|r| ApiError::Validation(r.body_text()))?;

  let stages = store
    .list_stages(&params.registration_number)
    .await
    .map_err(|e| {
      tracing::warn!(
        registration_number = %params.registration_number,
        error = %e,
        "failed to list stages"
      );
      ApiError::from_read(e)
    })?;
  tracing::debug!(
    registration_number = %params.registration_number,
    count = stages.len(),
    "stages listed"
  );

  Ok(Json(StageList {
    stages: stages.into_iter().map(StageView::from).collect(),
  }))
}

/// Record a stage against an existing case. Routed only when enabled.
#[utoipa::path(
  post,
  path = "/fase",
  tag = "Fase",
  operation_id = "create_stage",
  request_body(content = StageCreateRequest, content_type = "application/x-www-form-urlencoded"),
  responses(
    (status = 200, description = "Stage stored", body = StageView),
    (status = 404, description = "No case with that registration number", body = ErrorBody),
    (status = 400, description = "Invalid input or save failure", body = ErrorBody)
  )
)]
pub async fn create<S>(
  State(store): State<Arc<S>>,
  form: Result<Form<StageCreateRequest>, FormRejection>,
) -> Result<Json<StageView>, ApiError>
where
  S: CaseStore,
{
  let Form(body) = form.map_err(|r| ApiError::Validation(r.body_text()))?;
  let input = NewStage::try_from(body)?;
  let key = input.registration_number.clone();

  tracing::debug!(registration_number = %key, "adding stage");

  let owner = store.find_case(&key).await.map_err(|e| {
    tracing::warn!(registration_number = %key, error = %e, "failed to fetch stage owner");
    ApiError::from_read(e)
  })?;
  if owner.is_none() {
    tracing::warn!(registration_number = %key, "stage owner not found");
    return Err(ApiError::NotFound);
  }

  let stage = store.insert_stage(input).await.map_err(|e| {
    tracing::warn!(registration_number = %key, error = %e, "failed to add stage");
    ApiError::from_write(e)
  })?;

  Ok(Json(StageView::from(stage)))
}
