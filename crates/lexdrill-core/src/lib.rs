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

//! lexdrill-core: scheduling for vocabulary drills.
//!
//! This library provides:
//! - A simplified SM-2 scheduler advancing an item's review stat per answer
//! - Session composition: due items first, then fresh, then the rest
//! - Seedable shuffling
//! - Loading and saving review stats through a key-value medium

pub mod drill;
pub mod error;
pub mod rng;
pub mod session;
pub mod sm2;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use drill::{Answered, Drill};
pub use error::{ErrorReport, Fallible, fail};
pub use rng::{RandomSource, TinyRng, pick_random, shuffle, shuffle_in_place, shuffle_seeded};
pub use session::{Census, Session, compose_session, filter_by_ordinal, start_session};
pub use store::{KeyValueStore, MemoryStore, ReviewStatStore};
pub use types::item::Item;
pub use types::quality::{Quality, Score};
pub use types::review_stat::{ReviewStat, ReviewStats, advance};
pub use types::timestamp::Timestamp;
