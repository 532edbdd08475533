//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, Utc};
use stj_core::{case::Case, stage::Stage};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

pub const CASE_COLUMNS: &str =
  "case_id, registration_number, case_date, jurisdiction, inserted_at";

/// A `cases` row exactly as read from SQLite.
pub struct RawCase {
  pub case_id:             i64,
  pub registration_number: String,
  pub case_date:           String,
  pub jurisdiction:        String,
  pub inserted_at:         String,
}

impl RawCase {
  /// Row mapper for queries selecting [`CASE_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      case_id:             row.get(0)?,
      registration_number: row.get(1)?,
      case_date:           row.get(2)?,
      jurisdiction:        row.get(3)?,
      inserted_at:         row.get(4)?,
    })
  }

  pub fn into_case(self) -> Result<Case> {
    Ok(Case {
      case_id:             self.case_id,
      registration_number: self.registration_number,
      case_date:           decode_date(&self.case_date)?,
      jurisdiction:        self.jurisdiction,
      inserted_at:         decode_dt(&self.inserted_at)?,
    })
  }
}

pub const STAGE_COLUMNS: &str =
  "stage_id, registration_number, text, inserted_at";

/// A `stages` row exactly as read from SQLite.
pub struct RawStage {
  pub stage_id:            i64,
  pub registration_number: String,
  pub text:                String,
  pub inserted_at:         String,
}

impl RawStage {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      stage_id:            row.get(0)?,
      registration_number: row.get(1)?,
      text:                row.get(2)?,
      inserted_at:         row.get(3)?,
    })
  }

  pub fn into_stage(self) -> Result<Stage> {
    Ok(Stage {
      stage_id:            self.stage_id,
      registration_number: self.registration_number,
      text:                self.text,
      inserted_at:         decode_dt(&self.inserted_at)?,
    })
  }
}
