//! Enumerations for TUI state management.

/// Which screen or overlay currently receives input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Screen {
    Main,
    AddTask,
    /// Editing the text of the task with this id on the selected day.
    EditTask(u64),
    Help,
    /// Waiting for confirmation before deleting this task.
    ConfirmDelete(u64),
}

/// Which pane navigation keys act on.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Focus {
    Calendar,
    Tasks,
}

impl Focus {
    pub fn toggled(self) -> Self {
        match self {
            Focus::Calendar => Focus::Tasks,
            Focus::Tasks => Focus::Calendar,
        }
    }
}
