//! Case — a legal proceeding keyed by its registration number.
//!
//! Cases are plain values. The store hands out fresh copies on every read and
//! accepts [`NewCase`] for both inserts and in-place updates.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Case ────────────────────────────────────────────────────────────────────

/// A persisted case record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
  /// Surrogate key assigned by the store.
  pub case_id:             i64,
  /// Business key; unique across all cases.
  pub registration_number: String,
  pub case_date:           NaiveDate,
  /// Two-character region code, e.g. `"MS"`.
  pub jurisdiction:        String,
  /// Server-assigned timestamp; never changes after creation.
  pub inserted_at:         DateTime<Utc>,
}

// ─── NewCase ─────────────────────────────────────────────────────────────────

/// Input to [`crate::store::CaseStore::insert_case`] and
/// [`crate::store::CaseStore::update_case`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCase {
  pub registration_number: String,
  pub case_date:           NaiveDate,
  pub jurisdiction:        String,
}

impl NewCase {
  /// Validate raw client input. `case_date` must be `DD/MM/YYYY`.
  pub fn new(
    registration_number: impl Into<String>,
    case_date: &str,
    jurisdiction: impl Into<String>,
  ) -> Result<Self> {
    let registration_number = registration_number.into();
    if registration_number.trim().is_empty() {
      return Err(Error::EmptyRegistrationNumber);
    }

    let jurisdiction = jurisdiction.into();
    if jurisdiction.chars().count() != 2 {
      return Err(Error::InvalidJurisdiction(jurisdiction));
    }

    Ok(Self {
      registration_number,
      case_date: parse_case_date(case_date)?,
      jurisdiction,
    })
  }
}

// ─── Date text ───────────────────────────────────────────────────────────────

/// Parse a `DD/MM/YYYY` date. Leading zeros are optional.
pub fn parse_case_date(input: &str) -> Result<NaiveDate> {
  let invalid = || Error::InvalidCaseDate(input.to_owned());

  let parts: Vec<&str> = input.split('/').collect();
  let [day, month, year] = parts.as_slice() else {
    return Err(invalid());
  };

  let day: u32 = day.trim().parse().map_err(|_| invalid())?;
  let month: u32 = month.trim().parse().map_err(|_| invalid())?;
  let year: i32 = year.trim().parse().map_err(|_| invalid())?;

  if !(1..=9999).contains(&year) {
    return Err(invalid());
  }

  NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Render a date as `D/M/YYYY` without zero padding on day or month.
pub fn render_case_date(date: NaiveDate) -> String {
  format!("{}/{}/{}", date.day(), date.month(), date.year())
}
