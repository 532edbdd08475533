//! Stage — a timestamped textual event belonging to one case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Upper bound on [`Stage::text`], counted in characters.
pub const MAX_STAGE_TEXT_CHARS: usize = 4000;

/// A persisted stage record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
  pub stage_id:            i64,
  /// Registration number of the owning case.
  pub registration_number: String,
  pub text:                String,
  pub inserted_at:         DateTime<Utc>,
}

/// Input to [`crate::store::CaseStore::insert_stage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStage {
  pub registration_number: String,
  pub text:                String,
}

impl NewStage {
  pub fn new(
    registration_number: impl Into<String>,
    text: impl Into<String>,
  ) -> Result<Self> {
    let registration_number = registration_number.into();
    if registration_number.trim().is_empty() {
      return Err(Error::EmptyRegistrationNumber);
    }

    let text = text.into();
    let len = text.chars().count();
    if len > MAX_STAGE_TEXT_CHARS {
      return Err(Error::StageTextTooLong(len));
    }

    Ok(Self { registration_number, text })
  }
}
