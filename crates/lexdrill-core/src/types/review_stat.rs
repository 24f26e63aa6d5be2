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

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::sm2::Easiness;
use crate::sm2::FIRST_INTERVAL;
use crate::sm2::INITIAL_EASINESS;
use crate::sm2::MAX_EASINESS;
use crate::sm2::MIN_EASINESS;
use crate::sm2::new_easiness;
use crate::sm2::success_interval;
use crate::types::quality::Score;
use crate::types::timestamp::Timestamp;

/// Review stats keyed by item id.
pub type ReviewStats = BTreeMap<String, ReviewStat>;

/// Scheduling state of an item that has been answered at least once.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStat {
    /// How easy the item is, in `[MIN_EASINESS, MAX_EASINESS]`.
    pub easiness_factor: Easiness,
    /// Successful answers since the last failure.
    pub consecutive_correct: u32,
    /// Days between `last_reviewed_at` and `due_at`.
    pub interval_days: u32,
    /// When the item should next be presented.
    pub due_at: Timestamp,
    /// When the answer that produced this state was given.
    pub last_reviewed_at: Timestamp,
}

impl Default for ReviewStat {
    fn default() -> Self {
        Self {
            easiness_factor: INITIAL_EASINESS,
            consecutive_correct: 0,
            interval_days: 0,
            due_at: Timestamp::default(),
            last_reviewed_at: Timestamp::default(),
        }
    }
}

impl ReviewStat {
    pub fn is_due(&self, now: Timestamp) -> bool {
        self.due_at <= now
    }

    /// Check the invariants a stored stat must satisfy.
    pub fn validate(&self) -> Fallible<()> {
        let ef = self.easiness_factor;
        if !ef.is_finite() || !(MIN_EASINESS..=MAX_EASINESS).contains(&ef) {
            return fail(format!("easiness factor {ef} out of range"));
        }
        match self.last_reviewed_at.checked_plus_days(self.interval_days) {
            Some(due_at) if due_at == self.due_at => Ok(()),
            _ => fail(format!(
                "due time {} does not follow from last review {} plus {} days",
                self.due_at.as_millis(),
                self.last_reviewed_at.as_millis(),
                self.interval_days
            )),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Advance an item's stat by one answer given at `reviewed_at`. A missing
/// `previous` means the item is new.
pub fn advance(
    previous: Option<&ReviewStat>,
    score: impl Into<Score>,
    reviewed_at: Timestamp,
) -> ReviewStat {
    let score: Score = score.into();
    let prev: ReviewStat = previous.copied().unwrap_or_default();
    let (consecutive_correct, interval_days) = if score.is_pass() {
        let streak = prev.consecutive_correct.saturating_add(1);
        let interval = success_interval(streak, prev.interval_days, prev.easiness_factor);
        (streak, interval)
    } else {
        (0, FIRST_INTERVAL)
    };
    ReviewStat {
        easiness_factor: new_easiness(prev.easiness_factor, score),
        consecutive_correct,
        interval_days,
        due_at: reviewed_at.plus_days(interval_days),
        last_reviewed_at: reviewed_at,
    }
}

/// [`advance`] at the current instant.
#[cfg(feature = "clock")]
pub fn advance_now(previous: Option<&ReviewStat>, score: impl Into<Score>) -> ReviewStat {
    advance(previous, score, Timestamp::now())
}
