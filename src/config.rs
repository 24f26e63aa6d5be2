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

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use lexdrill_core::ErrorReport;
use lexdrill_core::Fallible;
use lexdrill_core::fail;
use serde::Deserialize;

/// Optional per-collection settings file.
pub const CONFIG_FILE: &str = "lexdrill.toml";

const DEFAULT_ITEMS: &str = "items.toml";
const DEFAULT_DATABASE: &str = "lexdrill.db";
const DEFAULT_SESSION_SIZE: usize = 20;

#[derive(Deserialize, Default, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    items: Option<String>,
    database: Option<String>,
    session_size: Option<usize>,
}

/// Settings for one collection directory: flags over `lexdrill.toml` over
/// defaults.
#[derive(Debug, PartialEq)]
pub struct Config {
    pub directory: PathBuf,
    pub items_path: PathBuf,
    pub database_path: PathBuf,
    pub session_size: usize,
}

impl Config {
    pub fn load(directory: Option<String>, session_size: Option<usize>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir()?,
        };
        if !directory.exists() {
            return fail("directory does not exist.");
        }
        let file = read_config_file(&directory)?;
        let items = file.items.unwrap_or_else(|| DEFAULT_ITEMS.to_string());
        let database = file.database.unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        Ok(Self {
            items_path: directory.join(items),
            database_path: directory.join(database),
            session_size: session_size
                .or(file.session_size)
                .unwrap_or(DEFAULT_SESSION_SIZE),
            directory,
        })
    }
}

fn read_config_file(directory: &Path) -> Fallible<ConfigFile> {
    let path = directory.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let text = read_to_string(&path)?;
    toml::from_str(&text)
        .map_err(|e| ErrorReport::new(format!("Failed to parse {}: {e}", path.display())))
}
