//! Request and response shapes.
//!
//! Field names are camelCase on the wire. Examples feed the OpenAPI
//! document served at `/openapi`.

use serde::{Deserialize, Serialize};
use stj_core::{
  case::{Case, NewCase, render_case_date},
  stage::{NewStage, Stage},
};
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;

// ─── Requests ────────────────────────────────────────────────────────────────

/// Form body for `POST /processo` and `PUT /processo`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseCreateRequest {
  #[schema(example = "2023/0104863-0")]
  pub registration_number: String,
  /// `DD/MM/YYYY`.
  #[schema(example = "21/09/2023")]
  pub case_date:           String,
  #[schema(example = "MS")]
  pub jurisdiction:        String,
}

impl TryFrom<CaseCreateRequest> for NewCase {
  type Error = ApiError;

  fn try_from(req: CaseCreateRequest) -> Result<Self, ApiError> {
    NewCase::new(req.registration_number, &req.case_date, req.jurisdiction)
      .map_err(ApiError::from)
  }
}

/// Query for `GET /processo` and `DELETE /processo`.
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CaseLookupRequest {
  #[schema(example = "0000/0000000-0")]
  #[param(example = "0000/0000000-0")]
  pub registration_number: String,
}

/// Query for `GET /fase`.
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StageLookupRequest {
  #[schema(example = "2023/0104863-0")]
  #[param(example = "2023/0104863-0")]
  pub registration_number: String,
}

/// Form body for `POST /fase`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StageCreateRequest {
  #[schema(example = "2023/0104863-0")]
  pub registration_number: String,
  #[schema(example = "Conclusos para julgamento")]
  pub text:                String,
}

impl TryFrom<StageCreateRequest> for NewStage {
  type Error = ApiError;

  fn try_from(req: StageCreateRequest) -> Result<Self, ApiError> {
    NewStage::new(req.registration_number, req.text).map_err(ApiError::from)
  }
}

// ─── Views ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct StageView {
  #[schema(example = "Conclusos para julgamento")]
  pub text: String,
}

impl From<Stage> for StageView {
  fn from(stage: Stage) -> Self { Self { text: stage.text } }
}

/// A case with its stages.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseView {
  #[schema(example = 1)]
  pub id:                  i64,
  #[schema(example = "2023/0104863-0")]
  pub registration_number: String,
  /// `D/M/YYYY`, without zero padding.
  #[schema(example = "21/9/2023")]
  pub case_date:           String,
  #[schema(example = "MS")]
  pub jurisdiction:        String,
  pub stages:              Vec<StageView>,
}

impl CaseView {
  pub fn new(case: Case, stages: Vec<Stage>) -> Self {
    Self {
      id:                  case.case_id,
      registration_number: case.registration_number,
      case_date:           render_case_date(case.case_date),
      jurisdiction:        case.jurisdiction,
      stages:              stages.into_iter().map(StageView::from).collect(),
    }
  }
}

/// A case as it appears in the full listing: no stages.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseSummary {
  #[schema(example = 1)]
  pub id:                  i64,
  #[schema(example = "2023/0104863-0")]
  pub registration_number: String,
  #[schema(example = "21/9/2023")]
  pub case_date:           String,
  #[schema(example = "MS")]
  pub jurisdiction:        String,
}

impl From<Case> for CaseSummary {
  fn from(case: Case) -> Self {
    Self {
      id:                  case.case_id,
      registration_number: case.registration_number,
      case_date:           render_case_date(case.case_date),
      jurisdiction:        case.jurisdiction,
    }
  }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CaseList {
  pub cases: Vec<CaseSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StageList {
  pub stages: Vec<StageView>,
}

/// Body of a successful `DELETE /processo`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteConfirmation {
  /// The key is spelled `mesage` on the wire; existing clients read it.
  #[serde(rename = "mesage")]
  #[schema(example = "case removed")]
  pub message: String,
  #[schema(example = "2023/0104863-0")]
  pub id:      String,
}

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
  #[serde(rename = "mesage")]
  #[schema(example = "not found")]
  pub message: String,
}
