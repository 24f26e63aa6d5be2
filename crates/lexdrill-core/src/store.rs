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

//! Persisting review stats through a key-value medium.

use std::collections::HashMap;

use serde_json::Map;
use serde_json::Value;

use crate::error::Fallible;
use crate::types::review_stat::ReviewStat;
use crate::types::review_stat::ReviewStats;

/// The key the stats blob is stored under.
pub const REVIEW_STATS_KEY: &str = "lexdrill_review_stats";

/// A byte-oriented key-value medium.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Fallible<Option<Vec<u8>>>;

    fn set(&mut self, key: &str, value: &[u8]) -> Fallible<()>;

    fn remove(&mut self, key: &str) -> Fallible<()>;
}

/// An in-process medium. Contents are lost when it is dropped.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Fallible<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Fallible<()> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Fallible<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Loads and saves the whole review-stat map as one JSON object.
pub struct ReviewStatStore<S> {
    medium: S,
}

impl<S: KeyValueStore> ReviewStatStore<S> {
    pub fn new(medium: S) -> Self {
        Self { medium }
    }

    pub fn medium(&self) -> &S {
        &self.medium
    }

    pub fn into_inner(self) -> S {
        self.medium
    }

    /// Read the stored stats. Never fails: an unreadable medium or blob
    /// gives an empty map, and entries that are malformed or break the stat
    /// invariants are dropped one by one.
    pub fn load(&self) -> ReviewStats {
        let bytes = match self.medium.get(REVIEW_STATS_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return ReviewStats::new(),
            Err(e) => {
                log::warn!("Failed to read review stats, starting empty: {e}");
                return ReviewStats::new();
            }
        };
        let entries: Map<String, Value> = match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Stored review stats are not a JSON object, starting empty: {e}");
                return ReviewStats::new();
            }
        };
        let mut stats = ReviewStats::new();
        for (id, value) in entries {
            match parse_entry(value) {
                Ok(stat) => {
                    stats.insert(id, stat);
                }
                Err(e) => log::warn!("Dropping review stat for '{id}': {e}"),
            }
        }
        stats
    }

    /// Replace the stored stats with `stats`.
    pub fn save(&mut self, stats: &ReviewStats) -> Fallible<()> {
        let bytes = serde_json::to_vec(stats)?;
        self.medium.set(REVIEW_STATS_KEY, &bytes)
    }

    /// Forget every stored stat.
    pub fn reset(&mut self) -> Fallible<()> {
        self.medium.remove(REVIEW_STATS_KEY)
    }
}

fn parse_entry(value: Value) -> Fallible<ReviewStat> {
    let stat: ReviewStat = serde_json::from_value(value)?;
    stat.validate()?;
    Ok(stat)
}
