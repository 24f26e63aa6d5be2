// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Milliseconds in one day.
pub const DAY_MILLIS: i64 = 86_400_000;

/// An instant in milliseconds since the Unix epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// The current instant.
    #[cfg(feature = "clock")]
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    /// This instant moved forward by whole days, saturating at the end of
    /// the representable range.
    pub fn plus_days(self, days: u32) -> Self {
        Self(self.0.saturating_add(i64::from(days).saturating_mul(DAY_MILLIS)))
    }

    /// Like [`Timestamp::plus_days`], but `None` on overflow.
    pub fn checked_plus_days(self, days: u32) -> Option<Self> {
        i64::from(days)
            .checked_mul(DAY_MILLIS)
            .and_then(|d| self.0.checked_add(d))
            .map(Self)
    }

    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.timestamp_millis())
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => write!(f, "{}ms", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_display() {
        let ts = Timestamp::from_millis(1_696_516_215_123);
        assert_eq!(ts.to_string(), "2023-10-05T14:30:15.123Z");
    }

    #[test]
    fn test_plus_days() {
        let ts = Timestamp::from_millis(1_000);
        assert_eq!(ts.plus_days(2).as_millis(), 1_000 + 2 * DAY_MILLIS);
        assert_eq!(Timestamp::from_millis(i64::MAX).plus_days(1).as_millis(), i64::MAX);
        assert_eq!(Timestamp::from_millis(i64::MAX).checked_plus_days(1), None);
    }

    #[test]
    fn test_serialize() -> Fallible<()> {
        let ts = Timestamp::from_millis(86_400_000);
        assert_eq!(serde_json::to_string(&ts)?, "86400000");
        let back: Timestamp = serde_json::from_str("86400000")?;
        assert_eq!(back, ts);
        Ok(())
    }

    #[test]
    fn test_deserialize_rejects_fractions() {
        assert!(serde_json::from_str::<Timestamp>("1.5").is_err());
    }
}
