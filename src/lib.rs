//! # caltodo - calendar with per-day to-do lists
//!
//! Navigate months, pick a day, and keep a short checklist for it. All tasks
//! live in one JSON object keyed by `YYYY-MM-DD`, stored under the key
//! `todos` in the data directory (`todos.json`).
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the interactive calendar
//! caltodo
//!
//! # Add a task to a day from the shell
//! caltodo add Buy milk --date 2024-03-15
//!
//! # Show a day's checklist, or every day that has tasks
//! caltodo list --date tomorrow
//! caltodo list --all
//!
//! # Print this month with task days marked
//! caltodo cal
//! ```
//!
//! ## Layout
//!
//! - [`db::TaskStore`]: the date-keyed task buckets and their CRUD operations
//! - [`storage`]: key-value persistence (files on disk, or memory)
//! - [`calendar`]: month arithmetic and the day grid
//! - [`state`]: the application state and the actions that mutate it
//! - [`view`]: pure rendering of state into a view model
//! - [`tui`]: the ratatui front end

pub mod calendar;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod db;
pub mod error;
pub mod fields;
pub mod logging;
pub mod state;
pub mod storage;
pub mod task;
pub mod view;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod utils;
}
