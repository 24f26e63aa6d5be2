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
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;

/// The four answer grades offered to the learner.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Quality {
    Again,
    Hard,
    Good,
    Easy,
}

impl Quality {
    pub const ALL: [Quality; 4] = [Quality::Again, Quality::Hard, Quality::Good, Quality::Easy];

    pub fn as_str(&self) -> &str {
        match self {
            Quality::Again => "again",
            Quality::Hard => "hard",
            Quality::Good => "good",
            Quality::Easy => "easy",
        }
    }

    pub fn value(self) -> u8 {
        match self {
            Quality::Again => 1,
            Quality::Hard => 3,
            Quality::Good => 4,
            Quality::Easy => 5,
        }
    }
}

impl Display for Quality {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accepts the grade's name or its numeric value.
impl FromStr for Quality {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "again" | "1" => Ok(Quality::Again),
            "hard" | "3" => Ok(Quality::Hard),
            "good" | "4" => Ok(Quality::Good),
            "easy" | "5" => Ok(Quality::Easy),
            other => fail(format!("invalid grade: '{other}'")),
        }
    }
}

/// An answer grade clamped to an integer in `[0, 5]`. Scores below 3 are
/// failures.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Score(u8);

impl Score {
    pub const MAX: u8 = 5;
    pub const PASS: u8 = 3;

    /// Coerce any number into a score: round half away from zero, then clamp.
    /// NaN becomes 0.
    pub fn from_raw(raw: f64) -> Self {
        if raw.is_nan() {
            return Self(0);
        }
        Self(raw.round().clamp(0.0, Self::MAX as f64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_pass(self) -> bool {
        self.0 >= Self::PASS
    }
}

impl From<Quality> for Score {
    fn from(q: Quality) -> Self {
        Self(q.value())
    }
}

impl From<u8> for Score {
    fn from(raw: u8) -> Self {
        Self(raw.min(Self::MAX))
    }
}

impl From<i64> for Score {
    fn from(raw: i64) -> Self {
        Self(raw.clamp(0, Self::MAX as i64) as u8)
    }
}

impl From<f64> for Score {
    fn from(raw: f64) -> Self {
        Self::from_raw(raw)
    }
}
