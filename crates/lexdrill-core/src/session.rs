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

//! Choosing and ordering the items of a drill session.
//!
//! Items fall into three buckets: due (reviewed before and now due), fresh
//! (never reviewed), and other (reviewed, not yet due). A session takes due
//! items first, then fresh ones, then pads with the rest. Each bucket is
//! shuffled on its own.

use std::ops::RangeInclusive;

use crate::rng::RandomSource;
use crate::rng::TinyRng;
use crate::rng::shuffle_in_place;
use crate::types::item::Item;
use crate::types::review_stat::ReviewStats;
use crate::types::timestamp::Timestamp;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Bucket {
    Due,
    Fresh,
    Other,
}

impl Bucket {
    pub fn of(item: &Item, stats: &ReviewStats, now: Timestamp) -> Self {
        match stats.get(&item.id) {
            None => Bucket::Fresh,
            Some(stat) if stat.is_due(now) => Bucket::Due,
            Some(_) => Bucket::Other,
        }
    }
}

/// A pool split by [`Bucket`], each part in pool order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Buckets {
    pub due: Vec<Item>,
    pub fresh: Vec<Item>,
    pub other: Vec<Item>,
}

pub fn partition(pool: &[Item], stats: &ReviewStats, now: Timestamp) -> Buckets {
    let mut buckets = Buckets::default();
    for item in pool {
        let target = match Bucket::of(item, stats, now) {
            Bucket::Due => &mut buckets.due,
            Bucket::Fresh => &mut buckets.fresh,
            Bucket::Other => &mut buckets.other,
        };
        target.push(item.clone());
    }
    buckets
}

/// How many items of a pool fall in each bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Census {
    pub due: usize,
    pub fresh: usize,
    pub other: usize,
}

impl Census {
    pub fn total(&self) -> usize {
        self.due + self.fresh + self.other
    }
}

pub fn census(pool: &[Item], stats: &ReviewStats, now: Timestamp) -> Census {
    let mut census = Census::default();
    for item in pool {
        match Bucket::of(item, stats, now) {
            Bucket::Due => census.due += 1,
            Bucket::Fresh => census.fresh += 1,
            Bucket::Other => census.other += 1,
        }
    }
    census
}

/// Build the ordered item list of a session of at most `target_count` items.
pub fn compose_session(
    pool: &[Item],
    stats: &ReviewStats,
    target_count: usize,
    now: Timestamp,
    rng: &mut impl RandomSource,
) -> Vec<Item> {
    if target_count == 0 || pool.is_empty() {
        return Vec::new();
    }
    let Buckets {
        mut due,
        mut fresh,
        mut other,
    } = partition(pool, stats, now);
    shuffle_in_place(&mut due, rng);
    shuffle_in_place(&mut fresh, rng);
    shuffle_in_place(&mut other, rng);
    log::debug!(
        "Composing session of {target_count} from {} due, {} fresh, {} other",
        due.len(),
        fresh.len(),
        other.len()
    );
    let mut items = due;
    items.append(&mut fresh);
    items.append(&mut other);
    items.truncate(target_count);
    items
}

/// Start a session, shuffling with an entropy-seeded generator.
pub fn start_session(
    pool: &[Item],
    stats: &ReviewStats,
    target_count: usize,
    now: Timestamp,
) -> Session {
    let mut rng = TinyRng::from_entropy();
    Session::new(compose_session(pool, stats, target_count, now, &mut rng))
}

/// The items whose ordinal lies in `range`, in pool order.
pub fn filter_by_ordinal(pool: &[Item], range: RangeInclusive<u32>) -> Vec<Item> {
    pool.iter()
        .filter(|item| range.contains(&item.ordinal))
        .cloned()
        .collect()
}

/// A fixed sequence of items and how far the learner has got through it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    items: Vec<Item>,
    position: usize,
}

impl Session {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items, position: 0 }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// The item awaiting an answer, if any.
    pub fn current(&self) -> Option<&Item> {
        self.items.get(self.position)
    }

    /// Move past the current item. No-op once finished.
    pub fn step(&mut self) {
        if self.position < self.items.len() {
            self.position += 1;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.items.len()
    }

    pub fn remaining(&self) -> usize {
        self.items.len() - self.position
    }

    /// Fraction of the session answered. An empty session counts as done.
    pub fn progress(&self) -> f64 {
        if self.items.is_empty() {
            1.0
        } else {
            self.position as f64 / self.items.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::types::quality::Quality;
    use crate::types::review_stat::ReviewStat;
    use crate::types::review_stat::advance;
    use crate::types::timestamp::DAY_MILLIS;

    const NOW: i64 = 1_700_000_000_000;

    fn item(id: &str, ordinal: u32) -> Item {
        Item::new(id, ordinal, format!("word-{id}"), format!("meaning-{id}"))
    }

    fn now() -> Timestamp {
        Timestamp::from_millis(NOW)
    }

    /// A stat that falls due `days` days from now (negative for the past).
    fn due_in(days: i64) -> ReviewStat {
        let last = Timestamp::from_millis(NOW + (days - 1) * DAY_MILLIS);
        advance(None, Quality::Good, last)
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_priority_and_truncation() {
        let pool = vec![item("C", 3), item("B", 2), item("A", 1)];
        let mut stats = ReviewStats::new();
        stats.insert("A".to_string(), due_in(0));
        stats.insert("C".to_string(), due_in(3));
        let mut rng = TinyRng::from_seed(42);
        let session = compose_session(&pool, &stats, 2, now(), &mut rng);
        assert_eq!(ids(&session), vec!["A", "B"]);
    }

    #[test]
    fn test_due_boundary_is_inclusive() {
        let stat = due_in(0);
        assert_eq!(stat.due_at, now());
        let mut stats = ReviewStats::new();
        stats.insert("A".to_string(), stat);
        assert_eq!(Bucket::of(&item("A", 1), &stats, now()), Bucket::Due);
        let before = Timestamp::from_millis(NOW - 1);
        assert_eq!(Bucket::of(&item("A", 1), &stats, before), Bucket::Other);
        assert_eq!(Bucket::of(&item("Z", 1), &stats, now()), Bucket::Fresh);
    }

    #[test]
    fn test_empty_cases() {
        let mut rng = TinyRng::from_seed(1);
        let stats = ReviewStats::new();
        assert!(compose_session(&[], &stats, 10, now(), &mut rng).is_empty());
        let pool = vec![item("A", 1)];
        assert!(compose_session(&pool, &stats, 0, now(), &mut rng).is_empty());
    }

    #[test]
    fn test_short_pool_is_padded_with_other() {
        let pool = vec![item("A", 1), item("B", 2)];
        let mut stats = ReviewStats::new();
        stats.insert("A".to_string(), due_in(10));
        stats.insert("B".to_string(), due_in(20));
        let mut rng = TinyRng::from_seed(5);
        let session = compose_session(&pool, &stats, 5, now(), &mut rng);
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn test_same_seed_same_session() {
        let pool: Vec<Item> = (0..30).map(|i| item(&i.to_string(), i)).collect();
        let stats = ReviewStats::new();
        let a = compose_session(&pool, &stats, 10, now(), &mut TinyRng::from_seed(9));
        let b = compose_session(&pool, &stats, 10, now(), &mut TinyRng::from_seed(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_census() {
        let pool = vec![item("A", 1), item("B", 2), item("C", 3), item("D", 4)];
        let mut stats = ReviewStats::new();
        stats.insert("A".to_string(), due_in(-2));
        stats.insert("C".to_string(), due_in(3));
        stats.insert("gone".to_string(), due_in(-1));
        let c = census(&pool, &stats, now());
        assert_eq!(
            c,
            Census {
                due: 1,
                fresh: 2,
                other: 1
            }
        );
        assert_eq!(c.total(), 4);
        let b = partition(&pool, &stats, now());
        assert_eq!(ids(&b.fresh), vec!["B", "D"]);
    }

    #[test]
    fn test_filter_by_ordinal() {
        let pool: Vec<Item> = (1..=10).map(|i| item(&i.to_string(), i)).collect();
        let picked = filter_by_ordinal(&pool, 3..=5);
        assert_eq!(ids(&picked), vec!["3", "4", "5"]);
        #[allow(clippy::reversed_empty_ranges)]
        let none = filter_by_ordinal(&pool, 5..=3);
        assert!(none.is_empty());
    }

    #[test]
    fn test_session_cursor() {
        let mut session = Session::new(vec![item("A", 1), item("B", 2)]);
        assert_eq!(session.current().map(|i| i.id.as_str()), Some("A"));
        assert_eq!(session.progress(), 0.0);
        session.step();
        assert_eq!(session.current().map(|i| i.id.as_str()), Some("B"));
        assert_eq!(session.remaining(), 1);
        session.step();
        session.step();
        assert!(session.is_finished());
        assert_eq!(session.current(), None);
        assert_eq!(session.position(), 2);
        assert_eq!(session.progress(), 1.0);
    }

    #[test]
    fn test_empty_session() {
        let session = start_session(&[], &ReviewStats::new(), 10, now());
        assert!(session.is_empty());
        assert!(session.is_finished());
        assert_eq!(session.progress(), 1.0);
    }

    fn arb_pool_and_stats() -> impl Strategy<Value = (Vec<Item>, ReviewStats)> {
        prop::collection::vec(prop::option::of(-5i64..5), 0..40).prop_map(|offsets| {
            let mut pool = Vec::new();
            let mut stats = ReviewStats::new();
            for (i, offset) in offsets.into_iter().enumerate() {
                let it = item(&format!("w{i}"), i as u32);
                if let Some(days) = offset {
                    stats.insert(it.id.clone(), due_in(days));
                }
                pool.push(it);
            }
            (pool, stats)
        })
    }

    fn rank(b: Bucket) -> u8 {
        match b {
            Bucket::Due => 0,
            Bucket::Fresh => 1,
            Bucket::Other => 2,
        }
    }

    proptest! {
        #[test]
        fn prop_buckets_in_priority_order((pool, stats) in arb_pool_and_stats(), n in 0usize..50, seed in any::<u64>()) {
            let session = compose_session(&pool, &stats, n, now(), &mut TinyRng::from_seed(seed));
            prop_assert_eq!(session.len(), n.min(pool.len()));
            let ranks: Vec<u8> = session.iter().map(|i| rank(Bucket::of(i, &stats, now()))).collect();
            prop_assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn prop_no_duplicates((pool, stats) in arb_pool_and_stats(), seed in any::<u64>()) {
            let session = compose_session(&pool, &stats, pool.len(), now(), &mut TinyRng::from_seed(seed));
            let mut seen: Vec<&str> = ids(&session);
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), pool.len());
        }
    }
}
