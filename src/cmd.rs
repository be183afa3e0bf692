//! Command implementations for the CLI interface.
//!
//! Each handler works on an already-loaded [`TaskStore`], persists through
//! the given [`Storage`] when it mutates, and writes its report to `out`.

use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use clap::Subcommand;
use clap_complete::{generate, Shell};
use tracing::{debug, info};

use crate::calendar::YearMonth;
use crate::db::{date_key, now_millis, parse_date_input, TaskStore};
use crate::fields::WeekStart;
use crate::state::AppState;
use crate::storage::Storage;
use crate::tui::run::run_tui;
use crate::view::{grid_to_text, render, selected_label};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive calendar (the default).
    Ui,

    /// Add a task to a day.
    Add {
        /// Task text. Multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Day: YYYY-MM-DD, "today", "tomorrow", a weekday, or "in Nd". Defaults to today.
        #[arg(long)]
        date: Option<String>,
    },

    /// List the tasks for a day.
    List {
        /// Day to list. Defaults to today.
        #[arg(long, conflicts_with = "all")]
        date: Option<String>,
        /// List every day that has tasks.
        #[arg(long)]
        all: bool,
    },

    /// Toggle a task between open and done.
    Toggle {
        /// Task ID as shown by `list`.
        id: u64,
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a task.
    Delete {
        /// Task ID as shown by `list`.
        id: u64,
        #[arg(long)]
        date: Option<String>,
    },

    /// Print a month calendar, marking days that have tasks.
    Cal {
        /// Month as YYYY-MM. Defaults to the current month.
        #[arg(long)]
        month: Option<YearMonth>,
    },

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Resolve an optional `--date` argument, defaulting to `today`.
pub fn resolve_date(input: Option<&str>, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    match input {
        None => Ok(today),
        Some(s) => parse_date_input(s, today).ok_or_else(|| {
            anyhow!("invalid date '{s}': expected YYYY-MM-DD, today, tomorrow, a weekday or 'in Nd'")
        }),
    }
}

/// Launch the interactive view.
pub fn cmd_ui(storage: Box<dyn Storage>, week_start: WeekStart, log_path: Option<&Path>) -> anyhow::Result<()> {
    run_tui(storage, week_start, log_path).context("interactive view failed")
}

/// Add a task and report its id.
pub fn cmd_add(
    store: &mut TaskStore,
    storage: &mut dyn Storage,
    out: &mut impl Write,
    date: NaiveDate,
    text: &[String],
) -> anyhow::Result<()> {
    let text = text.join(" ");
    if text.trim().is_empty() {
        debug!(%date, "ignored blank task text");
        writeln!(out, "Nothing to add.")?;
        return Ok(());
    }
    let id = store
        .add(date, &text, now_millis())
        .ok_or_else(|| anyhow!("no free task id left on {}", date_key(date)))?;
    store.save(storage).context("failed to save tasks")?;
    info!(%date, id, "added task from CLI");
    writeln!(out, "Added task {id} on {}.", date_key(date))?;
    Ok(())
}

/// Print one day's checklist, or every day's when `all` is set.
pub fn cmd_list(store: &TaskStore, out: &mut impl Write, date: NaiveDate, all: bool) -> anyhow::Result<()> {
    if all {
        if store.is_empty() {
            writeln!(out, "No tasks.")?;
        }
        for (i, day) in store.dates().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            print_day(store, out, day)?;
        }
        return Ok(());
    }

    if store.has_tasks(date) {
        print_day(store, out, date)?;
    } else {
        writeln!(out, "No tasks for {} ({}).", selected_label(date), date_key(date))?;
    }
    Ok(())
}

fn print_day(store: &TaskStore, out: &mut impl Write, date: NaiveDate) -> anyhow::Result<()> {
    writeln!(
        out,
        "{} ({}): {} open",
        selected_label(date),
        date_key(date),
        store.pending_count(date)
    )?;
    for task in store.tasks_for(date) {
        let mark = if task.completed { 'x' } else { ' ' };
        writeln!(out, "  [{mark}] {:<14} {}", task.id, task.text)?;
    }
    Ok(())
}

/// Flip a task's completion.
pub fn cmd_toggle(
    store: &mut TaskStore,
    storage: &mut dyn Storage,
    out: &mut impl Write,
    date: NaiveDate,
    id: u64,
) -> anyhow::Result<()> {
    let completed = store
        .toggle(date, id)
        .ok_or_else(|| anyhow!("no task {id} on {}", date_key(date)))?;
    store.save(storage).context("failed to save tasks")?;
    let state = if completed { "done" } else { "open" };
    writeln!(out, "Task {id} is now {state}.")?;
    Ok(())
}

/// Remove a task.
pub fn cmd_delete(
    store: &mut TaskStore,
    storage: &mut dyn Storage,
    out: &mut impl Write,
    date: NaiveDate,
    id: u64,
) -> anyhow::Result<()> {
    let removed = store
        .delete(date, id)
        .ok_or_else(|| anyhow!("no task {id} on {}", date_key(date)))?;
    store.save(storage).context("failed to save tasks")?;
    writeln!(out, "Deleted task {id}: {}", removed.text)?;
    Ok(())
}

/// Print the month grid.
pub fn cmd_cal(
    store: TaskStore,
    out: &mut impl Write,
    month: Option<YearMonth>,
    today: NaiveDate,
    week_start: WeekStart,
) -> anyhow::Result<()> {
    let mut state = AppState::new(today, store);
    if let Some(month) = month {
        state.current_month = month;
    }
    let view = render(&state, today, week_start);
    write!(out, "{}", grid_to_text(&view))?;
    Ok(())
}

/// Generate shell completions to stdout.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
