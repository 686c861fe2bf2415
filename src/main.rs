//! Line-oriented terminal shell and entry point.
//!
//! This module is the thin host layer around the jobtrail library. It reads
//! commands from stdin, translates them into library events, executes the
//! resulting actions against the record store, and prints the rendered page.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────┐
//! │  stdin command              │
//! └─────────────────────────────┘
//!              │ parse_command
//!              ▼
//! ┌─────────────────────────────┐
//! │  handle_event (library)     │  ← state changes, view state persisted
//! └─────────────────────────────┘
//!              │ actions
//!              ▼
//! ┌─────────────────────────────┐
//! │  execute_action             │  ← record store; results fed back as events
//! └─────────────────────────────┘
//!              │
//!              ▼
//! ┌─────────────────────────────┐
//! │  render + scroll anchor     │  ← restore runs after every render
//! └─────────────────────────────┘
//! ```
//!
//! # Shell Lifecycle
//!
//! 1. **Load**: Parse `key=value` arguments (and `config=<file>`), initialize
//!    tracing, create `AppState`
//! 2. **Mount**: Restore view state, fetch the collection, render
//! 3. **Update**: One command per line until `quit` or end of input
//! 4. **Exit**: The session ends and its view state is discarded
//!
//! `edit <id>` leaves the list; `back` mounts it again and the
//!    scroll anchor brings the record back into view
//!
//! # Commands
//!
//! - `search [text]`: Set (or clear) the search text; everything after the
//!   single space following `search` is taken verbatim
//! - `status <status>`: Toggle a status filter
//! - `type <type>`: Toggle an application-type filter
//! - `from [YYYY-MM-DD]`, `to [YYYY-MM-DD]`: Set (or clear) a date bound
//! - `unchip <n>`: Remove the n-th filter chip
//! - `clear`: Clear every filter
//! - `view card|list`: Switch layout
//! - `edit <id>`, `back`: Leave for the edit flow and return
//! - `delete <id>`: Delete a record
//! - `refresh`, `retry`: Re-fetch the collection
//! - `reset`: Forget the remembered view state
//! - `help`, `quit`

#![allow(clippy::multiple_crate_versions)]

use std::collections::{BTreeMap, VecDeque};
use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use jobtrail::app::AppState;
use jobtrail::domain::{ApplicationStatus, FilterQuery, RecordId};
use jobtrail::records::{JsonRecordStore, RecordStore};
use jobtrail::scroll::{FrameQueue, RestoreOutcome, ScrollAnchor};
use jobtrail::ui::RenderedPage;
use jobtrail::{filter, handle_event, Action, Config, Event, ViewMode};

/// Rows between the pinned header and a restored record.
const HEADER_GAP_ROWS: f64 = 1.0;

const HELP: &str = "commands: search [text] | status <s> | type <t> | from [date] | to [date] | \
unchip <n> | clear | view card|list | edit <id> | back | delete <id> | refresh | retry | reset | quit";

/// What one line of input asks for.
#[derive(Debug)]
enum Input {
    App(Event),
    Back,
    Help,
    Quit,
}

/// Shell state wrapper.
///
/// Wraps the library's `AppState` with the host concerns: the record store,
/// the scroll anchor and its frame queue, and the last rendered page.
struct Shell {
    /// Core application state from library layer.
    app: AppState,

    records: JsonRecordStore,

    anchor: ScrollAnchor<FrameQueue>,

    page: RenderedPage,

    /// `true` while the edit flow has the screen.
    away: bool,

    rows: usize,
    cols: usize,
}

impl Shell {
    /// Parses configuration, initializes tracing and the application state.
    fn load(args: &BTreeMap<String, String>) -> Self {
        let config = load_config(args);
        jobtrail::observability::init_tracing(&config);

        let span = tracing::debug_span!("shell_load");
        let _guard = span.entered();

        tracing::debug!(records_file = ?config.records_file, "parsed configuration");

        let anchor = ScrollAnchor::new(FrameQueue::default())
            .with_retry_budget(config.scroll_retry_budget)
            .with_header_gap(HEADER_GAP_ROWS);

        Self {
            app: jobtrail::initialize(&config),
            records: JsonRecordStore::new(config.records_file),
            anchor,
            page: RenderedPage::default(),
            away: false,
            rows: terminal_dimension("LINES", 24),
            cols: terminal_dimension("COLUMNS", 80),
        }
    }

    /// Handles one line of input. Returns `false` when the shell should exit.
    fn update(&mut self, line: &str) -> bool {
        let input = match parse_command(line, &self.app.query) {
            Ok(Some(input)) => input,
            Ok(None) => return true,
            Err(message) => {
                println!("{message}");
                return true;
            }
        };

        let span = tracing::debug_span!("shell_update", input = ?input);
        let _guard = span.entered();

        match input {
            Input::Quit => return false,
            Input::Help => println!("{HELP}"),
            Input::Back if self.away => {
                self.away = false;
                self.dispatch(Event::Mounted);
            }
            Input::Back => println!("already on the list"),
            Input::App(_) if self.away => println!("editing; type `back` to return to the list"),
            Input::App(event) => self.dispatch(event),
        }
        true
    }

    /// Runs `event` and every event produced by executing its actions.
    fn dispatch(&mut self, event: Event) {
        let mut queue = VecDeque::from([event]);
        let mut needs_render = false;

        while let Some(event) = queue.pop_front() {
            match handle_event(&mut self.app, &event) {
                Ok((should_render, actions)) => {
                    tracing::debug!(
                        action_count = actions.len(),
                        should_render = should_render,
                        "event handled successfully"
                    );
                    needs_render |= should_render;
                    for action in &actions {
                        queue.extend(self.execute_action(action));
                    }
                }
                Err(e) => tracing::warn!(error = %e, "error handling event"),
            }
        }

        if needs_render && !self.away {
            self.render();
        }
    }

    /// Executes an action, returning the event that reports its result.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) -> Option<Event> {
        match action {
            Action::FetchCollection { ticket } => Some(match self.records.fetch_all() {
                Ok(records) => Event::CollectionLoaded {
                    ticket: *ticket,
                    records,
                },
                Err(e) => Event::FetchFailed {
                    ticket: *ticket,
                    message: e.to_string(),
                },
            }),
            Action::OpenEditor { id } => {
                self.anchor.cancel();
                self.away = true;
                println!("editing {id}; type `back` to return to the list");
                None
            }
            Action::DeleteRecord { id } => match self.records.delete(id) {
                Ok(()) => Some(Event::RecordDeleted(id.clone())),
                Err(e) => {
                    tracing::warn!(error = %e, record_id = %id, "delete failed");
                    println!("could not delete {id}: {e}");
                    None
                }
            },
        }
    }

    /// Renders the page, restores the scroll anchor and prints what fits.
    fn render(&mut self) {
        let today = chrono::Local::now().date_naive();
        self.page = jobtrail::ui::render(&self.app, today, self.cols);

        let mut outcome = self
            .anchor
            .attempt_restore(self.app.view_store_mut(), &mut self.page);
        while !self.anchor.scheduler().is_idle() {
            for handle in self.anchor.scheduler_mut().take_due() {
                if let Some(next) =
                    self.anchor
                        .on_frame(handle, self.app.view_store_mut(), &mut self.page)
                {
                    outcome = next;
                }
            }
        }
        if let RestoreOutcome::Abandoned { target, attempts } = &outcome {
            tracing::debug!(target_id = %target, attempts, "record not on page, scroll left at top");
        }

        let stdout = io::stdout();
        let mut out = stdout.lock();
        for line in self.page.visible(self.rows) {
            let _ = writeln!(out, "{line}");
        }
        let _ = out.flush();
    }
}

/// Maps a command line to shell input.
///
/// Leading whitespace is ignored. The command ends at the first space; for
/// `search` the rest of the line is kept as typed, other arguments are trimmed.
fn parse_command(line: &str, query: &FilterQuery) -> Result<Option<Input>, String> {
    let line = line.trim_start();
    if line.trim_end().is_empty() {
        return Ok(None);
    }
    let (command, raw) = line.split_once(' ').unwrap_or((line.trim_end(), ""));
    let rest = raw.trim();

    let event = match command.trim_end() {
        "quit" | "q" => return Ok(Some(Input::Quit)),
        "help" | "?" => return Ok(Some(Input::Help)),
        "back" => return Ok(Some(Input::Back)),
        "search" if raw.is_empty() => Event::SearchCleared,
        "search" => Event::SearchChanged(raw.to_string()),
        "status" => Event::ToggleStatus(rest.parse::<ApplicationStatus>()?),
        "type" if !rest.is_empty() => Event::ToggleType(rest.to_string()),
        "from" => Event::SetStartDate(parse_date(rest)?),
        "to" => Event::SetEndDate(parse_date(rest)?),
        "unchip" => Event::RemoveChip(chip_at(query, rest)?),
        "clear" => Event::ClearFilters,
        "view" => Event::SetViewMode(rest.parse::<ViewMode>().map_err(|e| e.to_string())?),
        "edit" if !rest.is_empty() => Event::EditRecord(RecordId::from(rest)),
        "delete" if !rest.is_empty() => Event::DeleteRequested(RecordId::from(rest)),
        "refresh" => Event::Refresh,
        "retry" => Event::Retry,
        "reset" => Event::ResetSession,
        _ => return Err(format!("unknown command: {} (try `help`)", line.trim_end())),
    };
    Ok(Some(Input::App(event)))
}

/// Looks up a chip by its 1-based position in the filter bar.
fn chip_at(query: &FilterQuery, position: &str) -> Result<filter::FilterChip, String> {
    let chips = filter::active_chips(query);
    position
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| chips.get(index).cloned())
        .ok_or_else(|| format!("no chip {position}; {} active", chips.len()))
}

fn parse_date(value: &str) -> Result<Option<NaiveDate>, String> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| format!("invalid date {value}: {e}"))
}

/// Loads `config=<file>` when given, then applies the remaining pairs on top.
fn load_config(args: &BTreeMap<String, String>) -> Config {
    let mut config = match args.get("config") {
        Some(path) => match Config::from_file(&jobtrail::infrastructure::expand_tilde(path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("ignoring config file {path}: {e}");
                Config::default()
            }
        },
        None => Config::default(),
    };
    config.apply_overrides(args);
    config
}

fn parse_args(args: impl Iterator<Item = String>) -> BTreeMap<String, String> {
    args.filter_map(|arg| {
        let (key, value) = arg.split_once('=')?;
        Some((key.trim().to_string(), value.to_string()))
    })
    .collect()
}

fn terminal_dimension(var: &str, fallback: usize) -> usize {
    std::env::var(var)
        .ok()
        .and_then(|value| value.parse().ok())
        .filter(|&n: &usize| n > 0)
        .unwrap_or(fallback)
}

fn main() {
    let args = parse_args(std::env::args().skip(1));
    let mut shell = Shell::load(&args);
    shell.dispatch(Event::Mounted);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        if !shell.update(&line) {
            break;
        }
    }

    shell.app.view_store_mut().end_session();
    tracing::debug!("shell exiting");
}
