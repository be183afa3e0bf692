//! Task data structure.
//!
//! A `Task` is a single to-do item attached to one calendar day. The day
//! itself is not stored on the task; it is the key of the bucket holding it.

use serde::{Deserialize, Serialize};

/// A short to-do item belonging to a single day's bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Creation time in milliseconds since the Unix epoch, bumped forward when
    /// needed so ids are strictly increasing across the whole store.
    pub id: u64,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create an open task. Callers are expected to have trimmed `text`.
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Task {
            id,
            text: text.into(),
            completed: false,
        }
    }

    /// Flip the completion flag and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_open() {
        let task = Task::new(7, "Water plants");
        assert_eq!(task.id, 7);
        assert_eq!(task.text, "Water plants");
        assert!(!task.completed);
    }

    #[test]
    fn serialises_with_browser_field_names() {
        let task = Task::new(1710460800000, "Buy milk");
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, r#"{"id":1710460800000,"text":"Buy milk","completed":false}"#);
    }

    #[test]
    fn missing_completed_defaults_to_false() {
        let task: Task = serde_json::from_str(r#"{"id":3,"text":"x"}"#).unwrap();
        assert!(!task.completed);
    }
}
