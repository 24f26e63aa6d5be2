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

//! The single owner of the review-stat map during a drill.
//!
//! Every answer goes through [`Drill::answer`], which advances the stat,
//! writes it into the map and persists the map, in that order.

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::rng::RandomSource;
use crate::rng::TinyRng;
use crate::session::Session;
use crate::session::compose_session;
use crate::store::KeyValueStore;
use crate::store::ReviewStatStore;
use crate::types::item::Item;
use crate::types::quality::Score;
use crate::types::review_stat::ReviewStat;
use crate::types::review_stat::ReviewStats;
use crate::types::review_stat::advance;
use crate::types::timestamp::Timestamp;

pub struct Drill<S> {
    store: ReviewStatStore<S>,
    stats: ReviewStats,
    session: Session,
}

/// The outcome of recording one answer.
#[derive(Debug, PartialEq)]
pub struct Answered {
    pub item_id: String,
    pub stat: ReviewStat,
    /// Set when the new stat could not be persisted. The in-memory map is
    /// updated regardless.
    pub save_error: Option<ErrorReport>,
}

impl<S: KeyValueStore> Drill<S> {
    /// Load the stored stats and start a session over `pool`.
    pub fn open(
        store: ReviewStatStore<S>,
        pool: &[Item],
        target_count: usize,
        now: Timestamp,
    ) -> Self {
        Self::with_rng(store, pool, target_count, now, &mut TinyRng::from_entropy())
    }

    pub fn with_rng(
        store: ReviewStatStore<S>,
        pool: &[Item],
        target_count: usize,
        now: Timestamp,
        rng: &mut impl RandomSource,
    ) -> Self {
        let stats = store.load();
        let items = compose_session(pool, &stats, target_count, now, rng);
        Self {
            store,
            stats,
            session: Session::new(items),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn stats(&self) -> &ReviewStats {
        &self.stats
    }

    pub fn current(&self) -> Option<&Item> {
        self.session.current()
    }

    pub fn stat_of(&self, item_id: &str) -> Option<&ReviewStat> {
        self.stats.get(item_id)
    }

    /// Record an answer for the current item and move to the next one.
    /// Returns `None` once the session is over.
    pub fn answer(&mut self, score: impl Into<Score>, reviewed_at: Timestamp) -> Option<Answered> {
        let item_id = self.session.current()?.id.clone();
        let stat = advance(self.stats.get(&item_id), score, reviewed_at);
        self.stats.insert(item_id.clone(), stat);
        self.session.step();
        let save_error = match self.store.save(&self.stats) {
            Ok(()) => None,
            Err(e) => {
                log::warn!("Failed to save review stats: {e}");
                Some(e)
            }
        };
        Some(Answered {
            item_id,
            stat,
            save_error,
        })
    }

    /// Forget every review, in memory and in the store.
    pub fn reset(&mut self) -> Fallible<()> {
        self.stats.clear();
        self.store.reset()
    }

    pub fn into_store(self) -> ReviewStatStore<S> {
        self.store
    }
}
