//! HTTP-level tests driving the router against an in-memory store.

use std::sync::Arc;

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use serde_json::Value;
use stj_core::{
  case::NewCase,
  stage::NewStage,
  store::CaseStore,
};
use stj_store_sqlite::SqliteStore;
use tower::ServiceExt as _;

use crate::{ApiOptions, api_router};

const FORM: &str = "application/x-www-form-urlencoded";
const SAMPLE_FORM: &str =
  "registrationNumber=2023%2F0104863-0&caseDate=21%2F09%2F2023&jurisdiction=MS";

async fn store() -> Arc<SqliteStore> {
  Arc::new(SqliteStore::open_in_memory().await.unwrap())
}

async fn oneshot_raw(
  store:   Arc<SqliteStore>,
  options: ApiOptions,
  method:  &str,
  uri:     &str,
  body:    Option<&str>,
) -> Response {
  let mut builder = Request::builder().method(method).uri(uri);
  if body.is_some() {
    builder = builder.header(header::CONTENT_TYPE, FORM);
  }
  let req = builder
    .body(Body::from(body.unwrap_or_default().to_string()))
    .unwrap();
  api_router(store, options).oneshot(req).await.unwrap()
}

async fn send(
  store:  Arc<SqliteStore>,
  method: &str,
  uri:    &str,
  body:   Option<&str>,
) -> Response {
  oneshot_raw(store, ApiOptions::default(), method, uri, body).await
}

async fn json(resp: Response) -> Value {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

// ── Docs ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn root_redirects_to_openapi() {
  let resp = send(store().await, "GET", "/", None).await;
  assert_eq!(resp.status(), StatusCode::FOUND);
  assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/openapi");
}

#[tokio::test]
async fn openapi_document_lists_schemas() {
  let resp = send(store().await, "GET", "/openapi", None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let doc = json(resp).await;
  assert_eq!(doc["info"]["title"], "STJ API");
  assert!(doc["components"]["schemas"]["CaseView"].is_object());
  assert!(doc["components"]["schemas"]["ErrorBody"]["properties"]["mesage"].is_object());

  let case_item = &doc["paths"]["/processo"];
  for method in ["get", "post", "put", "delete"] {
    assert!(case_item[method].is_object(), "/processo is missing {method}");
    assert_eq!(case_item[method]["tags"], serde_json::json!(["Processo"]));
  }
  assert_eq!(case_item["get"]["parameters"][0]["name"], "registrationNumber");
  assert_eq!(case_item["get"]["parameters"][0]["in"], "query");
  assert_eq!(
    case_item["post"]["responses"]["409"]["content"]["application/json"]["schema"]["$ref"],
    "#/components/schemas/ErrorBody"
  );
  assert_eq!(
    case_item["delete"]["responses"]["200"]["content"]["application/json"]["schema"]["$ref"],
    "#/components/schemas/DeleteConfirmation"
  );

  assert!(doc["paths"]["/processos"]["get"].is_object());
  assert_eq!(doc["paths"]["/fase"]["get"]["tags"], serde_json::json!(["Fase"]));
  assert!(doc["paths"]["/fase"]["post"].is_object());
}

// ── Create / duplicate / get / delete scenario ───────────────────────────────

#[tokio::test]
async fn case_lifecycle_scenario() {
  let s = store().await;

  let resp = send(s.clone(), "POST", "/processo", Some(SAMPLE_FORM)).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let view = json(resp).await;
  assert_eq!(view["registrationNumber"], "2023/0104863-0");
  assert_eq!(view["caseDate"], "21/9/2023");
  assert_eq!(view["jurisdiction"], "MS");
  assert_eq!(view["stages"], serde_json::json!([]));
  assert!(view["id"].is_i64());

  let resp = send(s.clone(), "POST", "/processo", Some(SAMPLE_FORM)).await;
  assert_eq!(resp.status(), StatusCode::CONFLICT);
  assert_eq!(json(resp).await["mesage"], "duplicate");

  let resp = send(s.clone(), "GET", "/processo?registrationNumber=2023%2F0104863-0", None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json(resp).await["jurisdiction"], "MS");

  let resp = send(s.clone(), "DELETE", "/processo?registrationNumber=2023%252F0104863-0", None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = json(resp).await;
  assert_eq!(body["id"], "2023/0104863-0");
  assert!(body["mesage"].is_string());

  let resp = send(s, "GET", "/processo?registrationNumber=2023%2F0104863-0", None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert_eq!(json(resp).await["mesage"], "not found");
}

#[tokio::test]
async fn concurrent_creates_store_one_case() {
  let s = store().await;

  let (a, b) = tokio::join!(
    send(s.clone(), "POST", "/processo", Some(SAMPLE_FORM)),
    send(s.clone(), "POST", "/processo", Some(SAMPLE_FORM)),
  );
  let mut statuses = [a.status(), b.status()];
  statuses.sort_by_key(|status| status.as_u16());
  assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);

  assert_eq!(s.list_cases().await.unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_create_leaves_original_untouched() {
  let s = store().await;
  send(s.clone(), "POST", "/processo", Some(SAMPLE_FORM)).await;

  let resp = send(
    s.clone(),
    "POST",
    "/processo",
    Some("registrationNumber=2023%2F0104863-0&caseDate=01%2F01%2F2020&jurisdiction=SP"),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::CONFLICT);

  let case = s.find_case("2023/0104863-0").await.unwrap().unwrap();
  assert_eq!(case.jurisdiction, "MS");
}

// ── Validation ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_missing_field_is_rejected() {
  let s = store().await;
  let resp = send(
    s.clone(),
    "POST",
    "/processo",
    Some("registrationNumber=1&jurisdiction=MS"),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert!(json(resp).await["mesage"].is_string());
  assert!(s.list_cases().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_malformed_date_is_rejected() {
  let s = store().await;
  let resp = send(
    s.clone(),
    "POST",
    "/processo",
    Some("registrationNumber=1&caseDate=2023-09-21&jurisdiction=MS"),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert!(s.list_cases().await.unwrap().is_empty());
}

#[tokio::test]
async fn get_without_key_is_rejected() {
  let resp = send(store().await, "GET", "/processo", None).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ── Update ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_existing_case() {
  let s = store().await;
  send(s.clone(), "POST", "/processo", Some(SAMPLE_FORM)).await;
  s.insert_stage(NewStage::new("2023/0104863-0", "Distribuído").unwrap()).await.unwrap();

  let resp = send(
    s.clone(),
    "PUT",
    "/processo",
    Some("registrationNumber=2023%2F0104863-0&caseDate=05%2F01%2F2024&jurisdiction=SP"),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let view = json(resp).await;
  assert_eq!(view["caseDate"], "5/1/2024");
  assert_eq!(view["jurisdiction"], "SP");
  assert_eq!(view["stages"], serde_json::json!([{ "text": "Distribuído" }]));
}

#[tokio::test]
async fn update_missing_case_is_not_found() {
  let resp = send(store().await, "PUT", "/processo", Some(SAMPLE_FORM)).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert_eq!(json(resp).await["mesage"], "not found");
}

// ── List ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_on_empty_store_is_ok() {
  let resp = send(store().await, "GET", "/processos", None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json(resp).await, serde_json::json!({ "cases": [] }));
}

#[tokio::test]
async fn list_omits_stages() {
  let s = store().await;
  send(s.clone(), "POST", "/processo", Some(SAMPLE_FORM)).await;

  let body = json(send(s, "GET", "/processos", None).await).await;
  let cases = body["cases"].as_array().unwrap();
  assert_eq!(cases.len(), 1);
  assert_eq!(cases[0]["caseDate"], "21/9/2023");
  assert!(cases[0].get("stages").is_none());
}

// ── Delete ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_accepts_single_encoded_key() {
  let s = store().await;
  send(s.clone(), "POST", "/processo", Some(SAMPLE_FORM)).await;

  let resp = send(s.clone(), "DELETE", "/processo?registrationNumber=2023%2F0104863-0", None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json(resp).await["id"], "2023/0104863-0");
  assert!(s.find_case("2023/0104863-0").await.unwrap().is_none());
}

#[tokio::test]
async fn delete_key_with_literal_percent() {
  let s = store().await;
  s.insert_case(NewCase::new("50%", "21/09/2023", "MS").unwrap()).await.unwrap();

  // `%` encoded twice: `%25` then `%2525`.
  let resp = send(s.clone(), "DELETE", "/processo?registrationNumber=50%2525", None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json(resp).await["id"], "50%");
  assert!(s.find_case("50%").await.unwrap().is_none());
}

#[tokio::test]
async fn delete_missing_case_is_not_found() {
  let resp = send(store().await, "DELETE", "/processo?registrationNumber=nope", None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ── Stages ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn stage_list_without_stages_is_empty() {
  let resp = send(store().await, "GET", "/fase?registrationNumber=A-1", None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json(resp).await, serde_json::json!({ "stages": [] }));
}

#[tokio::test]
async fn get_case_includes_stage_texts() {
  let s = store().await;
  s.insert_case(NewCase::new("A-1", "21/09/2023", "MS").unwrap()).await.unwrap();
  s.insert_stage(NewStage::new("A-1", "Distribuído").unwrap()).await.unwrap();
  s.insert_stage(NewStage::new("A-1", "Conclusos").unwrap()).await.unwrap();

  let view = json(send(s.clone(), "GET", "/processo?registrationNumber=A-1", None).await).await;
  assert_eq!(
    view["stages"],
    serde_json::json!([{ "text": "Distribuído" }, { "text": "Conclusos" }])
  );

  let list = json(send(s, "GET", "/fase?registrationNumber=A-1", None).await).await;
  assert_eq!(list["stages"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn stage_create_is_not_routed_by_default() {
  let resp = send(
    store().await,
    "POST",
    "/fase",
    Some("registrationNumber=A-1&text=hello"),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn stage_create_when_enabled() {
  let s = store().await;
  let options = ApiOptions { stage_create: true };

  let resp = oneshot_raw(
    s.clone(),
    options,
    "POST",
    "/fase",
    Some("registrationNumber=A-1&text=hello"),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  s.insert_case(NewCase::new("A-1", "21/09/2023", "MS").unwrap()).await.unwrap();
  let resp = oneshot_raw(
    s.clone(),
    options,
    "POST",
    "/fase",
    Some("registrationNumber=A-1&text=hello"),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json(resp).await, serde_json::json!({ "text": "hello" }));
  assert_eq!(s.list_stages("A-1").await.unwrap().len(), 1);
}

#[tokio::test]
async fn stage_create_rejects_oversized_text() {
  let s = store().await;
  s.insert_case(NewCase::new("A-1", "21/09/2023", "MS").unwrap()).await.unwrap();

  let body = format!("registrationNumber=A-1&text={}", "a".repeat(4001));
  let resp = oneshot_raw(
    s.clone(),
    ApiOptions { stage_create: true },
    "POST",
    "/fase",
    Some(body.as_str()),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert!(s.list_stages("A-1").await.unwrap().is_empty());
}
