//! Interactive view entry point and terminal setup.

use std::{io, panic, path::Path};

use chrono::Local;
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};
use tracing::{info, warn};

use crate::db::TaskStore;
use crate::fields::WeekStart;
use crate::storage::Storage;
use crate::tui::app::App;

/// Load the task store, then run the calendar until the user quits.
pub fn run_tui(storage: Box<dyn Storage>, week_start: WeekStart, log_path: Option<&Path>) -> io::Result<()> {
    let store = TaskStore::load(storage.as_ref());
    let today = Local::now().date_naive();
    if let Some(path) = log_path {
        info!(log = %path.display(), "starting interactive view");
    }

    install_panic_hook();
    enable_raw_mode()?;
    let guard = RestoreGuard::new(|| {
        if let Err(e) = restore_terminal() {
            warn!(error = %e, "failed to restore terminal");
        }
    });

    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(store, storage, today, week_start);
    let result = app.run(&mut terminal);

    guard.disarm();
    restore_terminal()?;
    result
}

/// Leave raw mode and the alternate screen, and show the cursor again.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show)
}

/// Restore the terminal before the panic message is printed, so it lands on
/// the normal screen.
fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        previous(info);
    }));
}

/// Runs `restore` on drop unless disarmed, covering early `?` returns and
/// unwinding.
struct RestoreGuard<F: FnMut()> {
    restore: Option<F>,
}

impl<F: FnMut()> RestoreGuard<F> {
    fn new(restore: F) -> Self {
        RestoreGuard { restore: Some(restore) }
    }

    fn disarm(mut self) {
        self.restore = None;
    }
}

impl<F: FnMut()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.as_mut() {
            restore();
        }
    }
}
