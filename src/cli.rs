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

use clap::Parser;
use lexdrill_core::Fallible;

use crate::cmd::drill::DrillConfig;
use crate::cmd::drill::drill_collection;
use crate::cmd::reset::reset_collection;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Drill items in the terminal.
    Drill {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Maximum number of items in the session. Overrides `session_size` in lexdrill.toml.
        #[arg(long)]
        count: Option<usize>,
        /// Only drill items with an ordinal at or above this.
        #[arg(long)]
        from: Option<u32>,
        /// Only drill items with an ordinal at or below this.
        #[arg(long)]
        to: Option<u32>,
    },
    /// Print collection statistics.
    Stats {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Erase all review history of a collection.
    Reset {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Confirm the reset.
        #[arg(long)]
        yes: bool,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            directory,
            count,
            from,
            to,
        } => {
            let range = match (from, to) {
                (None, None) => None,
                (from, to) => Some(from.unwrap_or(0)..=to.unwrap_or(u32::MAX)),
            };
            drill_collection(DrillConfig {
                directory,
                count,
                range,
            })
        }
        Command::Stats { directory, format } => print_stats(directory, format),
        Command::Reset { directory, yes } => reset_collection(directory, yes),
    }
}
