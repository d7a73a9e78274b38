//! Countdown classifier
//!
//! Maps an auction's start timestamp and the current time to the state
//! shown on a listing. Pure: the only thing that changes between calls
//! is the `now` handed in by the caller.
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// How long after its nominal start an auction is still considered live
pub const LIVE_WINDOW_SECS: i64 = 300;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("unparsable auction timestamp: {0:?}")]
    Unparsable(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuctionState {
    Pending {
        days: u64,
        hours: u64,
        minutes: u64,
        seconds: u64,
    },
    Live,
    Ended,
    Invalid,
}

impl AuctionState {
    /// Classify by the signed number of whole seconds until the auction starts
    pub fn from_delta_secs(delta: i64) -> Self {
        if delta > 0 {
            let total = delta.unsigned_abs();
            AuctionState::Pending {
                days: total / SECS_PER_DAY,
                hours: (total % SECS_PER_DAY) / SECS_PER_HOUR,
                minutes: (total % SECS_PER_HOUR) / SECS_PER_MINUTE,
                seconds: total % SECS_PER_MINUTE,
            }
        } else if delta >= -LIVE_WINDOW_SECS {
            AuctionState::Live
        } else {
            AuctionState::Ended
        }
    }

    /// Badge text for a listing card
    pub fn label(self) -> String {
        match self {
            AuctionState::Pending { .. } => format!("Auction in {self}"),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for AuctionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuctionState::Pending {
                days,
                hours,
                minutes,
                seconds,
            } => write!(f, "{days}d {hours}h {minutes}m {seconds}s"),
            AuctionState::Live => f.write_str("Auction live"),
            AuctionState::Ended => f.write_str("Auction ended"),
            AuctionState::Invalid => f.write_str("Invalid date"),
        }
    }
}

/// Classifies auction timestamps against a supplied `now`
///
/// Date-times that carry no offset of their own are read in `offset`.
/// Bare dates are always midnight UTC.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CountdownClassifier {
    offset: FixedOffset,
}

impl Default for CountdownClassifier {
    fn default() -> Self {
        Self { offset: Utc.fix() }
    }
}

impl CountdownClassifier {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn parse(&self, raw: &str) -> Result<DateTime<Utc>, TimestampError> {
        // `2024/04/15 09:00:00` is the listing format; normalize it to ISO first
        let normalized = raw.trim().replace('/', "-").replacen(' ', "T", 1);

        if let Ok(at) = DateTime::parse_from_rfc3339(&normalized) {
            return Ok(at.with_timezone(&Utc));
        }

        let unparsable = || TimestampError::Unparsable(raw.to_owned());

        if let Some(naive) = NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(&normalized, format).ok())
        {
            return self
                .offset
                .from_local_datetime(&naive)
                .single()
                .map(|at| at.with_timezone(&Utc))
                .ok_or_else(unparsable);
        }

        // a bare date is midnight UTC, whatever `offset` is
        NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
            .ok_or_else(unparsable)
    }

    pub fn classify(&self, raw: &str, now: DateTime<Utc>) -> AuctionState {
        match self.parse(raw) {
            Ok(at) => {
                let delta = (at - now).num_milliseconds().div_euclid(1000);
                AuctionState::from_delta_secs(delta)
            }
            Err(e) => {
                tracing::trace!(error = %e, "classifying as invalid");
                AuctionState::Invalid
            }
        }
    }
}
