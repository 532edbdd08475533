//! JSON REST API for the STJ case registry.
//!
//! Exposes an axum [`Router`] backed by any [`stj_core::store::CaseStore`].
//! TLS, CORS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = stj_api::api_router(Arc::new(store), ApiOptions::default());
//! ```

pub mod cases;
pub mod docs;
pub mod error;
pub mod schema;
pub mod stages;

use std::sync::Arc;

use axum::{Router, routing::get};
use stj_core::store::CaseStore;

pub use error::ApiError;

/// Switches for optional parts of the routing surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiOptions {
  /// Route `POST /fase`. Off by default.
  pub stage_create: bool,
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, options: ApiOptions) -> Router<()>
where
  S: CaseStore + 'static,
{
  let stage_routes = if options.stage_create {
    get(stages::list::<S>).post(stages::create::<S>)
  } else {
    get(stages::list::<S>)
  };

  Router::new()
    // Docs
    .route("/", get(docs::home))
    .route(docs::OPENAPI_PATH, get(docs::openapi))
    // Cases
    .route(
      "/processo",
      get(cases::get_one::<S>)
        .post(cases::create::<S>)
        .put(cases::update::<S>)
        .delete(cases::delete_one::<S>),
    )
    .route("/processos", get(cases::list::<S>))
    // Stages
    .route("/fase", stage_routes)
    .with_state(store)
}

#[cfg(test)]
mod tests;
