//! Driver schedules: when to run a check or update cycle.
//!
//! Two grammars are supported, matching the configuration file:
//! `"HH:MM"` runs daily at that wall-clock time and `"Nh"` runs every N
//! hours (fractions allowed).

use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::{bail, ensure, Context};
use chrono::{Days, Duration, NaiveDateTime};

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Run once a day at the given local time.
    Daily { hour: u32, minute: u32 },
    /// Run at a fixed interval.
    Interval(Duration),
}

impl Schedule {
    /// Interval schedules fire immediately on startup; daily schedules wait
    /// for their first configured time.
    pub fn fires_immediately(&self) -> bool {
        matches!(self, Schedule::Interval(_))
    }

    /// Returns the next occurrence strictly after `after`, in naive local
    /// time.
    pub fn next_after(&self, after: NaiveDateTime) -> NaiveDateTime {
        match self {
            Schedule::Interval(interval) => after + *interval,
            Schedule::Daily { hour, minute } => {
                // hour and minute were validated during parsing
                let candidate = after
                    .date()
                    .and_hms_opt(*hour, *minute, 0)
                    .unwrap_or(after);
                if candidate <= after {
                    candidate + Days::new(1)
                } else {
                    candidate
                }
            }
        }
    }
}

impl FromStr for Schedule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hours) = s.strip_suffix('h') {
            let hours: f64 = hours
                .parse()
                .with_context(|| format!("Invalid interval schedule '{s}'"))?;
            ensure!(hours > 0.0, "Schedule interval must be positive, got '{s}'");
            return Ok(Schedule::Interval(Duration::seconds(
                (hours * 3600.0) as i64,
            )));
        }

        if let Some((hour, minute)) = s.split_once(':') {
            let hour: u32 = hour
                .parse()
                .with_context(|| format!("Invalid daily schedule '{s}'"))?;
            let minute: u32 = minute
                .parse()
                .with_context(|| format!("Invalid daily schedule '{s}'"))?;
            ensure!(
                hour < 24 && minute < 60,
                "Daily schedule '{s}' is out of range"
            );
            return Ok(Schedule::Daily { hour, minute });
        }

        bail!("Invalid schedule format '{s}'. Use 'HH:MM' or 'Nh'.")
    }
}

impl Display for Schedule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Schedule::Daily { hour, minute } => write!(f, "daily at {hour:02}:{minute:02}"),
            Schedule::Interval(interval) => {
                let hours = interval.num_seconds() as f64 / 3600.0;
                write!(f, "every {hours:.4} hours")
            }
        }
    }
}
