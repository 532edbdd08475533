//! The `CaseStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `stj-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  case::{Case, NewCase},
  stage::{NewStage, Stage},
};

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Backend errors must say whether they stem from the registration-number
/// uniqueness constraint so handlers can answer with a conflict.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn is_conflict(&self) -> bool;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a case registry backend.
///
/// Every method is a single unit of work: it either commits completely or
/// fails with no persisted change. Uniqueness of registration numbers and the
/// stage → case reference are enforced by the backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CaseStore: Send + Sync {
  type Error: StoreError;

  // ── Cases ─────────────────────────────────────────────────────────────

  /// Exact-match lookup by registration number. Returns `None` if absent.
  fn find_case<'a>(
    &'a self,
    registration_number: &'a str,
  ) -> impl Future<Output = Result<Option<Case>, Self::Error>> + Send + 'a;

  /// Persist a new case. `case_id` and `inserted_at` are set by the store.
  /// Fails with a conflict if the registration number is taken.
  fn insert_case(
    &self,
    input: NewCase,
  ) -> impl Future<Output = Result<Case, Self::Error>> + Send + '_;

  /// Overwrite the mutable fields of the case keyed by `registration_number`.
  /// Returns `None` if no such case exists.
  fn update_case<'a>(
    &'a self,
    registration_number: &'a str,
    input: NewCase,
  ) -> impl Future<Output = Result<Option<Case>, Self::Error>> + Send + 'a;

  /// Delete the case keyed by `registration_number` together with its
  /// stages. Returns the number of cases removed.
  fn delete_case<'a>(
    &'a self,
    registration_number: &'a str,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// All cases in insertion order.
  fn list_cases(
    &self,
  ) -> impl Future<Output = Result<Vec<Case>, Self::Error>> + Send + '_;

  // ── Stages ────────────────────────────────────────────────────────────

  /// All stages referencing `registration_number`, in insertion order.
  fn list_stages<'a>(
    &'a self,
    registration_number: &'a str,
  ) -> impl Future<Output = Result<Vec<Stage>, Self::Error>> + Send + 'a;

  /// Persist a new stage. Fails if the owning case does not exist.
  fn insert_stage(
    &self,
    input: NewStage,
  ) -> impl Future<Output = Result<Stage, Self::Error>> + Send + '_;
}
