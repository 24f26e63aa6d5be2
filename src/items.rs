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
use std::fs::read_to_string;
use std::path::Path;

use lexdrill_core::ErrorReport;
use lexdrill_core::Fallible;
use lexdrill_core::Item;
use lexdrill_core::fail;
use serde::Deserialize;

#[derive(Deserialize)]
struct ItemFile {
    #[serde(default)]
    item: Vec<Item>,
}

/// Load the item pool from a TOML file of `[[item]]` tables.
pub fn load_items(path: &Path) -> Fallible<Vec<Item>> {
    if !path.exists() {
        return fail(format!("item file {} does not exist.", path.display()));
    }
    let text = read_to_string(path)?;
    parse_items(&text)
}

pub fn parse_items(text: &str) -> Fallible<Vec<Item>> {
    let file: ItemFile = toml::from_str(text)
        .map_err(|e| ErrorReport::new(format!("Failed to parse items: {e}")))?;
    let mut seen = HashSet::new();
    for item in &file.item {
        if !seen.insert(item.id.as_str()) {
            return fail(format!("duplicate item id: '{}'", item.id));
        }
    }
    Ok(file.item)
}
