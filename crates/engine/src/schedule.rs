//! Cadences and the freshness predicate.
//!
//! A cadence is either a fixed window (`300s`, `10m`, `2h`, `1d`, `1w`) or a
//! cron expression. Cron parsing is delegated to the `cron` crate; five-field
//! expressions get a leading `0` seconds field so they read like crontab lines.
//!
//! Invariants:
//! - The reference time is always passed in; nothing here reads the clock.
//! - An absent last update is never fresh.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Expected reporting cadence of a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Cadence {
    /// Fresh while the last update is at most this old.
    Every(TimeDelta),
    /// Fresh while no firing has been missed since the last update.
    Cron(CronCadence),
}

/// A parsed cron schedule together with its normalized source text.
#[derive(Debug, Clone)]
pub struct CronCadence {
    expression: String,
    schedule: cron::Schedule,
}

impl CronCadence {
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// First firing strictly after `after`.
    pub fn next_after(&self, after: &DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule.after(after).next()
    }
}

impl PartialEq for Cadence {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Every(a), Self::Every(b)) => a == b,
            (Self::Cron(a), Self::Cron(b)) => a.expression == b.expression,
            _ => false,
        }
    }
}

impl Cadence {
    /// Fixed-window cadence.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidCadence`] for a non-positive window or
    /// one that is not a whole number of seconds.
    pub fn every(window: TimeDelta) -> Result<Self> {
        let invalid = |message: &str| EngineError::InvalidCadence {
            cadence: window.to_string(),
            message: message.to_string(),
        };
        if window <= TimeDelta::zero() {
            return Err(invalid("window must be positive"));
        }
        if window.subsec_nanos() != 0 {
            return Err(invalid("window must be a whole number of seconds"));
        }
        Ok(Self::Every(window))
    }
}

const UNITS: [(char, i64); 5] = [
    ('w', 7 * 24 * 3600),
    ('d', 24 * 3600),
    ('h', 3600),
    ('m', 60),
    ('s', 1),
];

fn parse_window(text: &str) -> Option<std::result::Result<TimeDelta, String>> {
    let unit = text.chars().last()?;
    let digits = &text[..text.len() - unit.len_utf8()];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (_, scale) = UNITS.iter().find(|(u, _)| *u == unit)?;
    let window = digits
        .parse::<i64>()
        .ok()
        .and_then(|n| n.checked_mul(*scale))
        .and_then(TimeDelta::try_seconds);
    Some(match window {
        Some(w) if w > TimeDelta::zero() => Ok(w),
        Some(_) => Err("window must be positive".to_string()),
        None => Err("window is too large".to_string()),
    })
}

fn parse_cron(text: &str) -> std::result::Result<CronCadence, String> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let expression = match fields.len() {
        5 => format!("0 {}", fields.join(" ")),
        6 | 7 => fields.join(" "),
        n => {
            return Err(format!(
                "expected a duration like 10m or a cron expression with 5 to 7 fields, got {n} fields"
            ));
        }
    };
    let schedule = cron::Schedule::from_str(&expression).map_err(|e| e.to_string())?;
    Ok(CronCadence {
        expression,
        schedule,
    })
}

impl FromStr for Cadence {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let invalid = |message: String| EngineError::InvalidCadence {
            cadence: s.to_string(),
            message,
        };
        if let Some(window) = parse_window(text) {
            return window.map(Self::Every).map_err(invalid);
        }
        parse_cron(text).map(Self::Cron).map_err(invalid)
    }
}

impl TryFrom<String> for Cadence {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Cadence> for String {
    fn from(cadence: Cadence) -> Self {
        cadence.to_string()
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Every(window) => {
                let secs = window.num_seconds();
                // UNITS ends with seconds, so a unit always divides.
                let (unit, scale) = UNITS
                    .iter()
                    .find(|(_, scale)| secs % scale == 0)
                    .copied()
                    .unwrap_or(('s', 1));
                write!(f, "{}{unit}", secs / scale)
            }
            Self::Cron(cron) => f.write_str(&cron.expression),
        }
    }
}

/// Decide whether a job that last reported at `last_update` is fresh at `reference`.
///
/// Fixed windows are inclusive: a report exactly `window` old is still fresh.
/// For cron cadences the job is fresh when the first firing strictly after the
/// last update is not before `reference`, which is the same as the last update
/// being at or after the latest firing strictly before `reference`. A schedule
/// with no future firings never goes stale.
pub fn is_fresh(
    cadence: &Cadence,
    last_update: Option<DateTime<Utc>>,
    reference: DateTime<Utc>,
) -> bool {
    let Some(last) = last_update else {
        return false;
    };
    match cadence {
        Cadence::Every(window) => reference - last <= *window,
        Cadence::Cron(cron) => match cron.next_after(&last) {
            Some(next) => next >= reference,
            None => true,
        },
    }
}
