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

use std::collections::HashSet;
use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use lexdrill_core::Fallible;
use lexdrill_core::Item;
use lexdrill_core::ReviewStatStore;
use lexdrill_core::ReviewStats;
use lexdrill_core::Timestamp;
use lexdrill_core::session::census;
use serde::Serialize;

use crate::config::Config;
use crate::db::Medium;
use crate::items::load_items;

#[derive(ValueEnum, Clone, Copy, PartialEq)]
pub enum StatsFormat {
    Text,
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct CollectionStats {
    pub items: usize,
    pub due: usize,
    pub fresh: usize,
    pub not_due: usize,
    /// Stats stored for ids no longer in the item file.
    pub orphaned: usize,
    pub mean_easiness: Option<f64>,
    pub next_due: Option<String>,
}

pub fn print_stats(directory: Option<String>, format: StatsFormat) -> Fallible<()> {
    let config = Config::load(directory, None)?;
    let pool = load_items(&config.items_path)?;
    let store = ReviewStatStore::new(Medium::open(&config.database_path));
    let stats = collection_stats(&pool, &store.load(), Timestamp::now());
    match format {
        StatsFormat::Text => {
            println!("Items:          {}", stats.items);
            println!("Due now:        {}", stats.due);
            println!("Never reviewed: {}", stats.fresh);
            println!("Not yet due:    {}", stats.not_due);
            if stats.orphaned > 0 {
                println!("Orphaned stats: {}", stats.orphaned);
            }
            if let Some(ef) = stats.mean_easiness {
                println!("Mean easiness:  {ef:.2}");
            }
            if let Some(next) = &stats.next_due {
                println!("Next due:       {next}");
            }
        }
        StatsFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
    }
    Ok(())
}

pub fn collection_stats(pool: &[Item], stats: &ReviewStats, now: Timestamp) -> CollectionStats {
    let counts = census(pool, stats, now);
    let reviewed: Vec<_> = pool.iter().filter_map(|i| stats.get(&i.id)).collect();
    let pool_ids: HashSet<&str> = pool.iter().map(|i| i.id.as_str()).collect();
    let mean_easiness = if reviewed.is_empty() {
        None
    } else {
        Some(reviewed.iter().map(|s| s.easiness_factor).sum::<f64>() / reviewed.len() as f64)
    };
    let next_due = reviewed
        .iter()
        .map(|s| s.due_at)
        .filter(|due| *due > now)
        .min()
        .map(|due| due.to_string());
    CollectionStats {
        items: counts.total(),
        due: counts.due,
        fresh: counts.fresh,
        not_due: counts.other,
        orphaned: stats
            .keys()
            .filter(|id| !pool_ids.contains(id.as_str()))
            .count(),
        mean_easiness,
        next_due,
    }
}

#[cfg(test)]
mod tests {
    use lexdrill_core::Quality;
    use lexdrill_core::advance;

    use super::*;

    #[test]
    fn test_collection_stats() {
        let pool = vec![
            Item::new("a", 1, "a", "A"),
            Item::new("b", 2, "b", "B"),
            Item::new("c", 3, "c", "C"),
        ];
        let t0 = Timestamp::from_millis(0);
        let mut stats = ReviewStats::new();
        stats.insert("a".to_string(), advance(None, Quality::Good, t0));
        stats.insert("b".to_string(), advance(None, Quality::Easy, t0));
        stats.insert("zzz".to_string(), advance(None, Quality::Good, t0));
        let now = Timestamp::from_millis(1_000);
        let result = collection_stats(&pool, &stats, now);
        assert_eq!(result.items, 3);
        assert_eq!(result.due, 0);
        assert_eq!(result.fresh, 1);
        assert_eq!(result.not_due, 2);
        assert_eq!(result.orphaned, 1);
        assert_eq!(result.mean_easiness, Some(2.5));
        assert_eq!(result.next_due.as_deref(), Some("1970-01-02T00:00:00.000Z"));
    }

    #[test]
    fn test_empty_collection() {
        let result = collection_stats(&[], &ReviewStats::new(), Timestamp::from_millis(0));
        assert_eq!(result.items, 0);
        assert_eq!(result.mean_easiness, None);
        assert_eq!(result.next_due, None);
    }

    #[test]
    fn test_duplicate_pool_ids_do_not_break_orphan_count() {
        let pool = vec![Item::new("a", 1, "a", "A"), Item::new("a", 2, "a", "A")];
        let mut stats = ReviewStats::new();
        stats.insert(
            "a".to_string(),
            advance(None, Quality::Good, Timestamp::from_millis(0)),
        );
        let result = collection_stats(&pool, &stats, Timestamp::from_millis(0));
        assert_eq!(result.orphaned, 0);
        assert_eq!(result.not_due, 2);
    }
}
