//! [`SqliteStore`] — the SQLite implementation of [`CaseStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use stj_core::{
  case::{Case, NewCase},
  stage::{NewStage, Stage},
  store::CaseStore,
};

use crate::{
  encode::{
    CASE_COLUMNS, RawCase, RawStage, STAGE_COLUMNS, encode_date, encode_dt,
  },
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A case registry backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── CaseStore impl ──────────────────────────────────────────────────────────

impl CaseStore for SqliteStore {
  type Error = crate::Error;

  // ── Cases ─────────────────────────────────────────────────────────────────

  async fn find_case(&self, registration_number: &str) -> Result<Option<Case>> {
    let key = registration_number.to_owned();

    let raw: Option<RawCase> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {CASE_COLUMNS} FROM cases WHERE registration_number = ?1"),
            rusqlite::params![key],
            RawCase::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawCase::into_case).transpose()
  }

  async fn insert_case(&self, input: NewCase) -> Result<Case> {
    let inserted_at = Utc::now();

    let key      = input.registration_number.clone();
    let date_str = encode_date(input.case_date);
    let juris    = input.jurisdiction.clone();
    let at_str   = encode_dt(inserted_at);

    let case_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO cases (registration_number, case_date, jurisdiction, inserted_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![key, date_str, juris, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(|e| crate::Error::from_write(e, &input.registration_number))?;

    tracing::debug!(case_id, registration_number = %input.registration_number, "case inserted");

    Ok(Case {
      case_id,
      registration_number: input.registration_number,
      case_date: input.case_date,
      jurisdiction: input.jurisdiction,
      inserted_at,
    })
  }

  async fn update_case(
    &self,
    registration_number: &str,
    input: NewCase,
  ) -> Result<Option<Case>> {
    let key      = registration_number.to_owned();
    let new_key  = input.registration_number.clone();
    let date_str = encode_date(input.case_date);
    let juris    = input.jurisdiction;

    let raw: Option<RawCase> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "UPDATE cases
               SET registration_number = ?2, case_date = ?3, jurisdiction = ?4
               WHERE registration_number = ?1
               RETURNING {CASE_COLUMNS}"
            ),
            rusqlite::params![key, new_key, date_str, juris],
            RawCase::from_row,
          )
          .optional()?)
      })
      .await
      .map_err(|e| crate::Error::from_write(e, &input.registration_number))?;

    raw.map(RawCase::into_case).transpose()
  }

  async fn delete_case(&self, registration_number: &str) -> Result<usize> {
    let key = registration_number.to_owned();

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM cases WHERE registration_number = ?1",
          rusqlite::params![key],
        )?)
      })
      .await?;

    Ok(removed)
  }

  async fn list_cases(&self) -> Result<Vec<Case>> {
    let raws: Vec<RawCase> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {CASE_COLUMNS} FROM cases ORDER BY case_id"))?;
        let rows = stmt
          .query_map([], RawCase::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCase::into_case).collect()
  }

  // ── Stages ────────────────────────────────────────────────────────────────

  async fn list_stages(&self, registration_number: &str) -> Result<Vec<Stage>> {
    let key = registration_number.to_owned();

    let raws: Vec<RawStage> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {STAGE_COLUMNS} FROM stages
           WHERE registration_number = ?1
           ORDER BY stage_id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![key], RawStage::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawStage::into_stage).collect()
  }

  async fn insert_stage(&self, input: NewStage) -> Result<Stage> {
    let inserted_at = Utc::now();

    let key    = input.registration_number.clone();
    let text   = input.text.clone();
    let at_str = encode_dt(inserted_at);

    let stage_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO stages (registration_number, text, inserted_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![key, text, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Stage {
      stage_id,
      registration_number: input.registration_number,
      text: input.text,
      inserted_at,
    })
  }
}
