// Time window and host scope of a chart request

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::WindowError;

/// Literal scope value meaning "every host in the cluster".
pub const ALL_HOSTS_SCOPE: &str = "ALL";

/// Inclusive [start, end] range of row timestamps (local time, as written in the files).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTimeWindow")]
pub struct TimeWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTimeWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TryFrom<RawTimeWindow> for TimeWindow {
    type Error = WindowError;

    fn try_from(raw: RawTimeWindow) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window of `duration_mins` minutes ending at `end`.
    pub fn ending_at(end: NaiveDateTime, duration_mins: u32) -> Result<Self, WindowError> {
        let start = end
            .checked_sub_signed(Duration::minutes(i64::from(duration_mins)))
            .ok_or(WindowError::OutOfRange { end, duration_mins })?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}

/// Which hosts contribute series to a chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Scope {
    #[default]
    AllHosts,
    Host(String),
}

impl Scope {
    /// Parse a scope parameter: `ALL` (any case) or a host name.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ALL_HOSTS_SCOPE) {
            Scope::AllHosts
        } else {
            Scope::Host(s.to_string())
        }
    }
}
