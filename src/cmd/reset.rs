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

use lexdrill_core::Fallible;
use lexdrill_core::KeyValueStore;
use lexdrill_core::ReviewStatStore;
use lexdrill_core::fail;

use crate::config::Config;
use crate::db::SqliteStore;

pub fn reset_collection(directory: Option<String>, confirmed: bool) -> Fallible<()> {
    if !confirmed {
        return fail("refusing to erase review history without --yes.");
    }
    let config = Config::load(directory, None)?;
    let store = ReviewStatStore::new(SqliteStore::open(&config.database_path)?);
    let erased = reset_store(store)?;
    println!("Erased review history for {erased} items.");
    Ok(())
}

/// Clear the store and return how many stats it held.
fn reset_store<S: KeyValueStore>(mut store: ReviewStatStore<S>) -> Fallible<usize> {
    let count = store.load().len();
    store.reset()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use lexdrill_core::MemoryStore;
    use lexdrill_core::Quality;
    use lexdrill_core::ReviewStats;
    use lexdrill_core::Timestamp;
    use lexdrill_core::advance;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_requires_confirmation() {
        let err = reset_collection(None, false).err().map(|e| e.to_string());
        assert_eq!(
            err.as_deref(),
            Some("error: refusing to erase review history without --yes.")
        );
    }

    #[test]
    fn test_reset_store() -> Fallible<()> {
        let mut store = ReviewStatStore::new(MemoryStore::new());
        let mut stats = ReviewStats::new();
        stats.insert(
            "a".to_string(),
            advance(None, Quality::Good, Timestamp::from_millis(0)),
        );
        store.save(&stats)?;
        assert_eq!(reset_store(store)?, 1);
        Ok(())
    }

    #[test]
    fn test_reset_collection() -> Fallible<()> {
        let dir = tempdir()?;
        reset_collection(Some(dir.path().display().to_string()), true)?;
        let store = ReviewStatStore::new(SqliteStore::open(&dir.path().join("lexdrill.db"))?);
        assert!(store.load().is_empty());
        Ok(())
    }
}
