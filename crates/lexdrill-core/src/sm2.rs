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

//! The arithmetic of a simplified SM-2 scheduler.

use crate::types::quality::Score;

pub type Easiness = f64;

/// Easiness of an item that has never been reviewed.
pub const INITIAL_EASINESS: Easiness = 2.5;

/// The easiness factor never drops below this.
pub const MIN_EASINESS: Easiness = 1.3;

/// The easiness factor never rises above this.
pub const MAX_EASINESS: Easiness = 2.5;

/// Interval after a failed answer, and after the first successful one.
pub const FIRST_INTERVAL: u32 = 1;

/// Interval after the second successful answer in a row.
pub const SECOND_INTERVAL: u32 = 6;

/// `ef' = ef + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))`, clamped into
/// `[MIN_EASINESS, MAX_EASINESS]`. A NaN easiness restarts from the initial
/// value.
pub fn new_easiness(ef: Easiness, score: Score) -> Easiness {
    let ef = if ef.is_nan() { INITIAL_EASINESS } else { ef };
    let d = (Score::MAX - score.value()) as f64;
    let ef = ef + (0.1 - d * (0.08 + d * 0.02));
    ef.clamp(MIN_EASINESS, MAX_EASINESS)
}

/// The interval in days after a successful answer that brings the streak to
/// `streak`. Past the second answer the previous interval grows by the
/// previous easiness, rounded half away from zero and capped at `u32::MAX`.
pub fn success_interval(streak: u32, prev_interval: u32, prev_ef: Easiness) -> u32 {
    match streak {
        0 | 1 => FIRST_INTERVAL,
        2 => SECOND_INTERVAL,
        _ => (prev_interval as f64 * prev_ef)
            .round()
            .clamp(0.0, u32::MAX as f64) as u32,
    }
}
