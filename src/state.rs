//! Application state and the handlers that mutate it.
//!
//! Every user interaction becomes an [`Action`]. [`AppState::apply`] performs
//! it and reports which views need redrawing and whether the task store
//! changed; [`AppState::dispatch`] additionally persists the store when it
//! did.

use chrono::{Duration, NaiveDate};
use tracing::{debug, instrument};

use crate::calendar::YearMonth;
use crate::db::TaskStore;
use crate::error::StorageError;
use crate::storage::Storage;

/// Everything the interactive view needs: the displayed month, the selected
/// day and the task store that owns all persisted data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub current_month: YearMonth,
    pub selected_date: NaiveDate,
    pub store: TaskStore,
}

/// A single user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Select a day. The displayed month follows if the day lies outside it.
    SelectDate(NaiveDate),
    /// Move the selection by a number of days (arrow-key navigation).
    MoveSelection(i64),
    PrevMonth,
    NextMonth,
    /// Add a task to the selected day.
    AddTask(String),
    ToggleTask { date: NaiveDate, id: u64 },
    DeleteTask { date: NaiveDate, id: u64 },
    EditTask { date: NaiveDate, id: u64, text: String },
    ClearCompleted(NaiveDate),
}

/// Which views must be redrawn after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Nothing,
    Calendar,
    TaskList,
    Both,
}

impl Refresh {
    pub fn calendar(self) -> bool {
        matches!(self, Refresh::Calendar | Refresh::Both)
    }

    pub fn task_list(self) -> bool {
        matches!(self, Refresh::TaskList | Refresh::Both)
    }
}

/// Result of applying an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub refresh: Refresh,
    pub store_changed: bool,
}

impl Outcome {
    fn view(refresh: Refresh) -> Self {
        Outcome {
            refresh,
            store_changed: false,
        }
    }

    fn mutated(refresh: Refresh) -> Self {
        Outcome {
            refresh,
            store_changed: true,
        }
    }

    fn unchanged() -> Self {
        Outcome::view(Refresh::Nothing)
    }
}

impl AppState {
    /// Start on `today`'s month with `today` selected.
    pub fn new(today: NaiveDate, store: TaskStore) -> Self {
        AppState {
            current_month: YearMonth::of(today),
            selected_date: today,
            store,
        }
    }

    /// Apply `action` to the in-memory state. `now_millis` is the creation
    /// instant used for new task ids.
    #[instrument(level = "debug", skip(self), fields(selected = %self.selected_date))]
    pub fn apply(&mut self, action: Action, now_millis: u64) -> Outcome {
        match action {
            Action::SelectDate(date) => {
                self.select(date);
                Outcome::view(Refresh::Both)
            }
            Action::MoveSelection(days) => {
                match self.selected_date.checked_add_signed(Duration::days(days)) {
                    Some(date) => {
                        self.select(date);
                        Outcome::view(Refresh::Both)
                    }
                    None => Outcome::unchanged(),
                }
            }
            Action::PrevMonth => {
                self.current_month = self.current_month.prev();
                Outcome::view(Refresh::Calendar)
            }
            Action::NextMonth => {
                self.current_month = self.current_month.next();
                Outcome::view(Refresh::Calendar)
            }
            Action::AddTask(text) => match self.store.add(self.selected_date, &text, now_millis) {
                Some(_) => Outcome::mutated(Refresh::Both),
                None => Outcome::unchanged(),
            },
            Action::ToggleTask { date, id } => match self.store.toggle(date, id) {
                Some(_) => Outcome::mutated(Refresh::TaskList),
                None => Outcome::unchanged(),
            },
            Action::DeleteTask { date, id } => match self.store.delete(date, id) {
                Some(_) => Outcome::mutated(Refresh::Both),
                None => Outcome::unchanged(),
            },
            Action::EditTask { date, id, text } => {
                if self.store.edit(date, id, &text) {
                    Outcome::mutated(Refresh::TaskList)
                } else {
                    Outcome::unchanged()
                }
            }
            Action::ClearCompleted(date) => {
                if self.store.clear_completed(date) > 0 {
                    Outcome::mutated(Refresh::Both)
                } else {
                    Outcome::unchanged()
                }
            }
        }
    }

    /// Apply `action` and save the store to `storage` if it changed.
    pub fn dispatch(
        &mut self,
        action: Action,
        now_millis: u64,
        storage: &mut dyn Storage,
    ) -> Result<Outcome, StorageError> {
        let outcome = self.apply(action, now_millis);
        if outcome.store_changed {
            self.store.save(storage)?;
        }
        debug!(?outcome, "dispatched action");
        Ok(outcome)
    }

    fn select(&mut self, date: NaiveDate) {
        self.selected_date = date;
        if !self.current_month.contains(date) {
            self.current_month = YearMonth::of(date);
        }
    }
}
