//! OpenAPI document and the root redirect.

use axum::{
  Json,
  http::{StatusCode, header},
  response::IntoResponse,
};
use utoipa::OpenApi;

use crate::schema::{
  CaseCreateRequest, CaseList, CaseLookupRequest, CaseSummary, CaseView,
  DeleteConfirmation, ErrorBody, StageCreateRequest, StageList,
  StageLookupRequest, StageView,
};

pub const OPENAPI_PATH: &str = "/openapi";

#[derive(OpenApi)]
#[openapi(
  info(title = "STJ API", version = "1.0.0"),
  paths(
    home,
    crate::cases::create,
    crate::cases::update,
    crate::cases::list,
    crate::cases::get_one,
    crate::cases::delete_one,
    crate::stages::list,
    crate::stages::create
  ),
  components(schemas(
    CaseCreateRequest,
    CaseLookupRequest,
    StageLookupRequest,
    StageCreateRequest,
    CaseView,
    CaseSummary,
    CaseList,
    StageView,
    StageList,
    DeleteConfirmation,
    ErrorBody
  )),
  tags(
    (name = "Processo", description = "Add, view, update and remove cases"),
    (name = "Fase", description = "Stages recorded against a case")
  )
)]
pub struct ApiDoc;

/// Redirect to the OpenAPI document.
#[utoipa::path(
  get,
  path = "/",
  operation_id = "home",
  responses((status = 302, description = "Redirect to /openapi", headers(("location" = String))))
)]
pub async fn home() -> impl IntoResponse {
  (StatusCode::FOUND, [(header::LOCATION, OPENAPI_PATH)])
}

/// `GET /openapi`
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> { Json(ApiDoc::openapi()) }
