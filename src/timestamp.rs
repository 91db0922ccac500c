use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::fmt;

pub type Timestamp = DateTime<Utc>;

/// Literal token in a destination key that is replaced by the run's date stamp.
pub const TIMESTAMP_PLACEHOLDER: &str = "[[timestamp]]";

/// The date stamp of a run, formatted as `day-month-year` without zero-padding, e.g. `9-3-2024`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTimestamp(String);

impl RunTimestamp {
  pub fn now() -> Self {
    Self::from_timestamp(Utc::now())
  }

  pub fn from_timestamp(timestamp: Timestamp) -> Self {
    Self::from_date(timestamp.date_naive())
  }

  pub fn from_date(date: NaiveDate) -> Self {
    RunTimestamp(format!("{}-{}-{}", date.day(), date.month(), date.year()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// See [`resolve_key`].
  pub fn resolve(&self, template: &str) -> String {
    resolve_key(template, self.as_str())
  }
}

impl fmt::Display for RunTimestamp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Replace every [`TIMESTAMP_PLACEHOLDER`] in `template` with `stamp`.
/// Templates without the placeholder are returned unchanged.
pub fn resolve_key(template: &str, stamp: &str) -> String {
  template.replace(TIMESTAMP_PLACEHOLDER, stamp)
}
