//! Pure presentation: turns an [`AppState`] into a [`ViewModel`].
//!
//! Nothing here touches the terminal, so the output can be asserted on
//! directly. The TUI only draws what this module produces.

use chrono::NaiveDate;

use crate::calendar::{month_grid, MonthGrid};
use crate::db::TaskStore;
use crate::fields::WeekStart;
use crate::state::AppState;

/// One row of the checklist for the selected day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub date: NaiveDate,
    pub id: u64,
    pub text: String,
    pub completed: bool,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    /// e.g. "March 2024"
    pub month_label: String,
    pub weekday_header: [&'static str; 7],
    pub grid: MonthGrid,
    /// e.g. "Friday, March 15"
    pub selected_label: String,
    pub tasks: Vec<TaskItem>,
    pub pending: usize,
}

/// Build the view model for the current state.
pub fn render(state: &AppState, today: NaiveDate, week_start: WeekStart) -> ViewModel {
    let grid = month_grid(
        state.current_month,
        state.selected_date,
        today,
        &state.store,
        week_start,
    );
    let tasks = render_task_list(&state.store, state.selected_date);

    ViewModel {
        month_label: state.current_month.label(),
        weekday_header: week_start.header(),
        grid,
        selected_label: selected_label(state.selected_date),
        pending: tasks.iter().filter(|t| !t.completed).count(),
        tasks,
    }
}

/// The ordered checklist for `date`; empty when the day has no tasks.
pub fn render_task_list(store: &TaskStore, date: NaiveDate) -> Vec<TaskItem> {
    store
        .tasks_for(date)
        .iter()
        .map(|t| TaskItem {
            date,
            id: t.id,
            text: t.text.clone(),
            completed: t.completed,
        })
        .collect()
}

/// Long-form label for the selected day, e.g. "Friday, March 15".
pub fn selected_label(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

/// Plain-text month calendar, `*` marking days with tasks and `[..]` today.
/// Cells are five columns wide; today is bracketed.
pub fn grid_to_text(view: &ViewModel) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:^34}\n", view.month_label));
    out.push_str(view.weekday_header.map(|h| format!(" {h}  ")).concat().trim_end());
    out.push('\n');
    for week in view.grid.weeks() {
        for cell in week {
            let rendered = match cell {
                None => "     ".to_string(),
                Some(c) => {
                    let mark = if c.has_tasks { '*' } else { ' ' };
                    if c.today {
                        format!("[{:>2}]{mark}", c.day)
                    } else {
                        format!(" {:>2}{mark} ", c.day)
                    }
                }
            };
            out.push_str(&rendered);
        }
        out.truncate(out.trim_end().len());
        out.push('\n');
    }
    out
}
