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

//! Drill items in the terminal.

use std::io::BufRead;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;
use std::ops::RangeInclusive;

use lexdrill_core::Drill;
use lexdrill_core::Fallible;
use lexdrill_core::KeyValueStore;
use lexdrill_core::Quality;
use lexdrill_core::ReviewStatStore;
use lexdrill_core::Score;
use lexdrill_core::Timestamp;
use lexdrill_core::filter_by_ordinal;

use crate::config::Config;
use crate::db::Medium;
use crate::items::load_items;

pub struct DrillConfig {
    pub directory: Option<String>,
    pub count: Option<usize>,
    pub range: Option<RangeInclusive<u32>>,
}

#[derive(Debug, Default, PartialEq)]
pub struct DrillSummary {
    pub total: usize,
    pub answered: usize,
    pub passed: usize,
}

pub fn drill_collection(config: DrillConfig) -> Fallible<()> {
    let summary = drill_collection_with(config, stdin().lock(), stdout().lock())?;
    log::debug!(
        "Session over: {} of {} answered",
        summary.answered,
        summary.total
    );
    Ok(())
}

fn drill_collection_with(
    config: DrillConfig,
    input: impl BufRead,
    output: impl Write,
) -> Fallible<DrillSummary> {
    let DrillConfig {
        directory,
        count,
        range,
    } = config;
    let config = Config::load(directory, count)?;
    let mut pool = load_items(&config.items_path)?;
    if let Some(range) = range {
        pool = filter_by_ordinal(&pool, range);
    }
    let store = ReviewStatStore::new(Medium::open(&config.database_path));
    let mut drill = Drill::open(store, &pool, config.session_size, Timestamp::now());
    run_drill(&mut drill, input, output, Timestamp::now)
}

/// Run the question-and-grade loop until the session ends, the learner
/// quits with `q`, or input runs out.
pub fn run_drill<S: KeyValueStore>(
    drill: &mut Drill<S>,
    mut input: impl BufRead,
    mut output: impl Write,
    clock: impl Fn() -> Timestamp,
) -> Fallible<DrillSummary> {
    let mut summary = DrillSummary {
        total: drill.session().len(),
        ..DrillSummary::default()
    };
    if summary.total == 0 {
        writeln!(output, "Nothing to drill.")?;
        return Ok(summary);
    }
    while let Some(item) = drill.current().cloned() {
        let number = drill.session().position() + 1;
        writeln!(output, "[{number}/{}] {}", summary.total, item.word)?;
        write!(output, "Press enter to reveal, q to quit: ")?;
        output.flush()?;
        match read_line(&mut input)? {
            Some(line) if line.trim() != "q" => {}
            _ => break,
        }
        writeln!(output, "  {}", item.meaning)?;
        if let Some(example) = &item.example {
            writeln!(output, "  e.g. {example}")?;
        }
        let Some(quality) = ask_grade(&mut input, &mut output)? else {
            break;
        };
        let Some(answered) = drill.answer(quality, clock()) else {
            break;
        };
        summary.answered += 1;
        if Score::from(quality).is_pass() {
            summary.passed += 1;
        }
        match answered.save_error {
            Some(e) => writeln!(output, "warning: progress not saved ({e})")?,
            None => writeln!(output, "Next review: {}", answered.stat.due_at)?,
        }
    }
    writeln!(
        output,
        "Answered {} of {} ({} correct).",
        summary.answered, summary.total, summary.passed
    )?;
    Ok(summary)
}

fn ask_grade(input: &mut impl BufRead, output: &mut impl Write) -> Fallible<Option<Quality>> {
    loop {
        write!(output, "Grade: [1] again [3] hard [4] good [5] easy: ")?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.parse::<Quality>() {
            Ok(quality) => return Ok(Some(quality)),
            Err(e) => writeln!(output, "{e}")?,
        }
    }
}

/// One line without its terminator, or `None` at end of input.
fn read_line(input: &mut impl BufRead) -> Fallible<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
