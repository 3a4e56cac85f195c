//! Catalog creation timestamp.

use chrono::{DateTime, Local, Utc};

use crate::core::error::TimestampError;

/// Environment variable holding a fixed build time (seconds since the epoch).
///
/// See <https://reproducible-builds.org/specs/source-date-epoch/>.
pub const SOURCE_DATE_EPOCH: &str = "SOURCE_DATE_EPOCH";

const CTIME_FORMAT: &str = "%Y-%m-%d %H:%M%z";

/// Creation time shared by every catalog of one build.
///
/// Computed once when the build starts, so all files carry the same value even
/// if the build crosses a minute boundary or a daylight-saving change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTimestamp {
    ctime: String,
}

impl BuildTimestamp {
    /// Use `source_date_epoch` when given, otherwise the local clock.
    pub fn new(source_date_epoch: Option<&str>) -> Result<Self, TimestampError> {
        match source_date_epoch {
            Some(value) => Self::from_epoch_str(value),
            None => Ok(Self::now()),
        }
    }

    pub fn now() -> Self {
        Self {
            ctime: Local::now().format(CTIME_FORMAT).to_string(),
        }
    }

    /// Parse a `SOURCE_DATE_EPOCH` value. Fractional seconds are accepted.
    pub fn from_epoch_str(value: &str) -> Result<Self, TimestampError> {
        let invalid = || TimestampError::Invalid(value.to_string());
        let seconds: f64 = value.trim().parse().map_err(|_| invalid())?;
        if !seconds.is_finite() {
            return Err(invalid());
        }
        let whole = seconds.floor();
        let nanos = ((seconds - whole) * 1e9) as u32;
        let instant: DateTime<Utc> =
            DateTime::from_timestamp(whole as i64, nanos).ok_or_else(invalid)?;
        Ok(Self {
            ctime: instant.format(CTIME_FORMAT).to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.ctime
    }
}
