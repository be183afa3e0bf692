//! Main application logic for the terminal user interface.
//!
//! `App` owns the [`AppState`] and the storage backend, translates key and
//! mouse events into [`Action`]s, and draws the cached [`ViewModel`]. Only
//! the parts of the view named by each action's [`Refresh`] are rebuilt.

use std::io;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::{error, info};

use crate::calendar::month_grid;
use crate::db::{now_millis, TaskStore};
use crate::fields::WeekStart;
use crate::state::{Action, AppState, Refresh};
use crate::storage::Storage;
use crate::tui::{
    colors::{ACCENT, GOLD, MUTED, TASK_DOT},
    enums::{Focus, Screen},
    input::InputField,
    utils::centered_rect,
};
use crate::view::{render, render_task_list, selected_label, ViewModel};

/// Width of one day cell in the calendar pane.
const CELL_WIDTH: u16 = 5;
/// Calendar pane width: seven cells plus borders.
const CALENDAR_WIDTH: u16 = CELL_WIDTH * 7 + 2;

/// Interactive calendar and checklist.
pub struct App {
    state: AppState,
    storage: Box<dyn Storage>,
    today: NaiveDate,
    week_start: WeekStart,
    view: ViewModel,
    screen: Screen,
    focus: Focus,
    input: InputField,
    task_list_state: ListState,
    status_message: String,
    day_hitboxes: Vec<(Rect, NaiveDate)>,
    should_quit: bool,
}

impl App {
    /// Create the app with `today` selected.
    pub fn new(store: TaskStore, storage: Box<dyn Storage>, today: NaiveDate, week_start: WeekStart) -> Self {
        let state = AppState::new(today, store);
        let view = render(&state, today, week_start);
        let mut app = App {
            state,
            storage,
            today,
            week_start,
            view,
            screen: Screen::Main,
            focus: Focus::Calendar,
            input: InputField::new(),
            task_list_state: ListState::default(),
            status_message: String::new(),
            day_hitboxes: Vec::new(),
            should_quit: false,
        };
        app.clamp_task_selection();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Apply an action, persist if the store changed, and refresh the view.
    fn perform(&mut self, action: Action) {
        match self.state.dispatch(action, now_millis(), self.storage.as_mut()) {
            Ok(outcome) => self.refresh(outcome.refresh),
            Err(e) => {
                error!(error = %e, "failed to save tasks");
                self.set_status_message(format!("Save failed: {e}"));
                self.refresh(Refresh::Both);
            }
        }
    }

    /// Rebuild the parts of the cached view named by `refresh`.
    fn refresh(&mut self, refresh: Refresh) {
        if refresh.calendar() {
            self.view.grid = month_grid(
                self.state.current_month,
                self.state.selected_date,
                self.today,
                &self.state.store,
                self.week_start,
            );
            self.view.month_label = self.state.current_month.label();
        }
        if refresh.task_list() {
            let tasks = render_task_list(&self.state.store, self.state.selected_date);
            self.view.pending = tasks.iter().filter(|t| !t.completed).count();
            self.view.tasks = tasks;
            self.view.selected_label = selected_label(self.state.selected_date);
            self.clamp_task_selection();
        }
    }

    /// Pick up a date change while running past midnight.
    fn roll_today(&mut self, today: NaiveDate) {
        if today != self.today {
            info!(%today, "date changed");
            self.today = today;
            self.refresh(Refresh::Calendar);
        }
    }

    fn clamp_task_selection(&mut self) {
        let len = self.view.tasks.len();
        let selected = match (self.task_list_state.selected(), len) {
            (_, 0) => None,
            (Some(i), _) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.task_list_state.select(selected);
    }

    /// Id of the highlighted checklist item.
    fn selected_task_id(&self) -> Option<u64> {
        self.task_list_state
            .selected()
            .and_then(|i| self.view.tasks.get(i))
            .map(|t| t.id)
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        self.status_message.clear();

        match self.screen {
            Screen::Main => self.handle_main_input(key.code),
            Screen::AddTask | Screen::EditTask(_) => self.handle_form_input(key.code),
            Screen::Help => self.screen = Screen::Main,
            Screen::ConfirmDelete(id) => self.handle_confirm_input(key.code, id),
        }
    }

    fn handle_main_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.screen = Screen::Help,
            KeyCode::Tab | KeyCode::BackTab => self.focus = self.focus.toggled(),
            KeyCode::Char('[') | KeyCode::PageUp => self.perform(Action::PrevMonth),
            KeyCode::Char(']') | KeyCode::PageDown => self.perform(Action::NextMonth),
            KeyCode::Char('t') => self.perform(Action::SelectDate(self.today)),
            KeyCode::Char('a') | KeyCode::Char('i') => {
                self.input = InputField::new();
                self.screen = Screen::AddTask;
            }
            _ => match self.focus {
                Focus::Calendar => self.handle_calendar_input(key),
                Focus::Tasks => self.handle_task_list_input(key),
            },
        }
    }

    fn handle_calendar_input(&mut self, key: KeyCode) {
        let days = match key {
            KeyCode::Left => -1,
            KeyCode::Right => 1,
            KeyCode::Up => -7,
            KeyCode::Down => 7,
            KeyCode::Enter => {
                self.focus = Focus::Tasks;
                return;
            }
            _ => return,
        };
        self.perform(Action::MoveSelection(days));
    }

    fn handle_task_list_input(&mut self, key: KeyCode) {
        let date = self.state.selected_date;
        match key {
            KeyCode::Up => self.task_list_state.select_previous(),
            KeyCode::Down => self.task_list_state.select_next(),
            KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => {
                if let Some(id) = self.selected_task_id() {
                    self.perform(Action::ToggleTask { date, id });
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_task_id() {
                    self.screen = Screen::ConfirmDelete(id);
                }
            }
            KeyCode::Char('e') => {
                if let Some(id) = self.selected_task_id() {
                    if let Some(task) = self.state.store.get(date, id) {
                        self.input = InputField::with_value(&task.text);
                        self.screen = Screen::EditTask(id);
                    }
                }
            }
            KeyCode::Char('c') => {
                let before = self.state.store.len();
                self.perform(Action::ClearCompleted(date));
                let removed = before - self.state.store.len();
                if removed > 0 {
                    self.set_status_message(format!("Cleared {removed} completed"));
                }
            }
            KeyCode::Esc => self.focus = Focus::Calendar,
            _ => {}
        }
        self.clamp_task_selection();
    }

    fn handle_form_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.input = InputField::new();
                self.screen = Screen::Main;
            }
            KeyCode::Enter => {
                let text = self.input.take();
                let screen = std::mem::replace(&mut self.screen, Screen::Main);
                match screen {
                    Screen::AddTask => {
                        self.perform(Action::AddTask(text));
                        // Highlight the task just appended.
                        if !self.view.tasks.is_empty() {
                            self.task_list_state.select(Some(self.view.tasks.len() - 1));
                        }
                    }
                    Screen::EditTask(id) => {
                        let date = self.state.selected_date;
                        self.perform(Action::EditTask { date, id, text });
                    }
                    _ => {}
                }
            }
            KeyCode::Backspace => self.input.handle_backspace(),
            KeyCode::Delete => self.input.handle_delete(),
            KeyCode::Left => self.input.move_cursor_left(),
            KeyCode::Right => self.input.move_cursor_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Char(c) => self.input.handle_char(c),
            _ => {}
        }
    }

    fn handle_confirm_input(&mut self, key: KeyCode, id: u64) {
        self.screen = Screen::Main;
        if matches!(key, KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter) {
            let date = self.state.selected_date;
            self.perform(Action::DeleteTask { date, id });
        }
    }

    /// Handle a mouse event: a left click on a day selects it.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.screen != Screen::Main || mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let pos = Position::new(mouse.column, mouse.row);
        let hit = self
            .day_hitboxes
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, date)| *date);
        if let Some(date) = hit {
            self.focus = Focus::Calendar;
            self.perform(Action::SelectDate(date));
        }
    }

    /// Poll for and handle one terminal event.
    fn handle_input(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                _ => {}
            }
        }
        Ok(())
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header = Line::from(vec![
            Span::styled("CALTODO", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("   "),
            Span::styled("◀ ", Style::default().fg(Color::Cyan)),
            Span::styled(
                self.view.month_label.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ▶", Style::default().fg(Color::Cyan)),
        ]);
        let block = Paragraph::new(header)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(block, area);
    }

    fn pane_block(&self, title: String, pane: Focus) -> Block<'static> {
        let border = if self.focus == pane && self.screen == Screen::Main {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title)
    }

    /// Draw the day grid and record where each day landed for mouse clicks.
    fn render_calendar(&mut self, f: &mut Frame, area: Rect) {
        let block = self.pane_block(self.view.month_label.clone(), Focus::Calendar);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let mut lines = vec![Line::from(
            self.view
                .weekday_header
                .iter()
                .map(|h| Span::styled(format!("{h:^5}"), Style::default().add_modifier(Modifier::BOLD)))
                .collect::<Vec<_>>(),
        )];

        for week in self.view.grid.weeks() {
            let mut spans = Vec::with_capacity(7);
            for cell in week {
                let Some(cell) = cell else {
                    spans.push(Span::raw(" ".repeat(CELL_WIDTH as usize)));
                    continue;
                };

                let mut style = Style::default();
                if cell.today {
                    style = style.fg(GOLD).add_modifier(Modifier::BOLD);
                }
                if cell.selected {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(format!(" {:>2}", cell.day), style));
                spans.push(if cell.has_tasks {
                    Span::styled("• ", Style::default().fg(TASK_DOT))
                } else {
                    Span::raw("  ")
                });
            }
            lines.push(Line::from(spans));
        }

        // Row 0 of the pane is the weekday header.
        let grid = &self.view.grid;
        self.day_hitboxes = grid
            .days()
            .filter_map(|cell| {
                let (row, col) = grid.position_of(cell.date)?;
                let hitbox = Rect::new(
                    inner.x + col as u16 * CELL_WIDTH,
                    inner.y + 1 + row as u16,
                    CELL_WIDTH,
                    1,
                )
                .intersection(inner);
                (!hitbox.is_empty()).then_some((hitbox, cell.date))
            })
            .collect();

        f.render_widget(Paragraph::new(lines), inner);
    }

    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let title = format!("{} ({} open)", self.view.selected_label, self.view.pending);
        let block = self.pane_block(title, Focus::Tasks);

        if self.view.tasks.is_empty() {
            let empty = Paragraph::new("No tasks. Press 'a' to add one.")
                .style(Style::default().fg(MUTED))
                .block(block);
            f.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .view
            .tasks
            .iter()
            .map(|task| {
                let (mark, style) = if task.completed {
                    ("[x] ", Style::default().fg(MUTED).add_modifier(Modifier::CROSSED_OUT))
                } else {
                    ("[ ] ", Style::default())
                };
                ListItem::new(Line::from(vec![Span::raw(mark), Span::styled(task.text.clone(), style)]))
            })
            .collect();

        let highlight = if self.focus == Focus::Tasks {
            Style::default().bg(Color::Gray).fg(Color::Black)
        } else {
            Style::default()
        };
        let list = List::new(items)
            .block(block)
            .highlight_style(highlight)
            .highlight_symbol(">> ");
        f.render_stateful_widget(list, area, &mut self.task_list_state);
    }

    fn render_input(&mut self, f: &mut Frame, area: Rect) {
        let title = match self.screen {
            Screen::EditTask(_) => format!("Edit task on {}", self.view.selected_label),
            _ => format!("New task for {}", self.view.selected_label),
        };
        let popup = centered_rect(60, 3, area);
        f.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT))
            .title(title)
            .title_bottom("Enter to save, Esc to cancel");
        let inner = block.inner(popup);
        f.render_widget(Paragraph::new(self.input.value.clone()).block(block), popup);

        let cursor_x = inner.x + (self.input.cursor as u16).min(inner.width.saturating_sub(1));
        f.set_cursor_position((cursor_x, inner.y));
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let rows = [
            ("←/→/↑/↓", "move the selected day (calendar) or task (list)"),
            ("Enter", "calendar: focus tasks / list: toggle"),
            ("Tab", "switch between calendar and task list"),
            ("[ / ]", "previous / next month"),
            ("t", "jump to today"),
            ("a", "add a task to the selected day"),
            ("Space, x", "toggle the highlighted task"),
            ("e", "edit the highlighted task"),
            ("d", "delete the highlighted task"),
            ("c", "clear completed tasks for the day"),
            ("click", "select a day"),
            ("q", "quit"),
        ];
        let lines: Vec<Line> = rows
            .iter()
            .map(|(key, what)| {
                Line::from(vec![
                    Span::styled(format!("{key:>10}  "), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(*what),
                ])
            })
            .collect();

        let popup = centered_rect(70, rows.len() as u16 + 2, area);
        f.render_widget(Clear, popup);
        let help = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Help (any key to close)"))
            .wrap(Wrap { trim: false });
        f.render_widget(help, popup);
    }

    fn render_confirm(&self, f: &mut Frame, area: Rect, id: u64) {
        let text = self
            .state
            .store
            .get(self.state.selected_date, id)
            .map(|t| t.text.clone())
            .unwrap_or_default();
        let popup = centered_rect(50, 4, area);
        f.render_widget(Clear, popup);
        let confirm = Paragraph::new(vec![
            Line::from(format!("Delete \"{text}\"?")),
            Line::from(Span::styled("y to confirm, any other key to cancel", Style::default().fg(MUTED))),
        ])
        .block(Block::default().borders(Borders::ALL).title("Confirm"))
        .alignment(Alignment::Center);
        f.render_widget(confirm, popup);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.screen {
                Screen::Main => {
                    let pane = match self.focus {
                        Focus::Calendar => "Calendar",
                        Focus::Tasks => "Tasks",
                    };
                    format!("{pane} | {} tasks on {} days | Press '?' for help", self.state.store.len(), self.state.store.dates().count())
                }
                Screen::AddTask => "Add Task".to_string(),
                Screen::EditTask(_) => "Edit Task".to_string(),
                Screen::Help => "Help".to_string(),
                Screen::ConfirmDelete(_) => "Confirm Delete".to_string(),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(ACCENT).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Draw the whole frame.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        self.render_header(f, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(CALENDAR_WIDTH), Constraint::Min(20)])
            .split(chunks[1]);
        self.render_calendar(f, body[0]);
        self.render_task_list(f, body[1]);

        match self.screen {
            Screen::Main => {}
            Screen::AddTask | Screen::EditTask(_) => self.render_input(f, chunks[1]),
            Screen::Help => self.render_help(f, chunks[1]),
            Screen::ConfirmDelete(id) => self.render_confirm(f, chunks[1], id),
        }

        self.render_status_bar(f, chunks[2]);
    }

    /// Main event loop: draw, then handle input, until the user quits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.should_quit {
            self.roll_today(Local::now().date_naive());
            terminal.draw(|f| self.render(f))?;
            self.handle_input()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, STORE_KEY};
    use ratatui::backend::TestBackend;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn test_app() -> App {
        App::new(TaskStore::new(), Box::new(MemoryStorage::new()), d(2024, 3, 15), WeekStart::Sunday)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buf = terminal.backend().buffer();
        buf.content
            .chunks(buf.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>().trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn stored(app: &App) -> TaskStore {
        TaskStore::load(app.storage.as_ref())
    }

    #[test]
    fn add_toggle_delete_through_keys() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.screen, Screen::AddTask);
        type_text(&mut app, "Buy milk");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen, Screen::Main);
        assert_eq!(app.view.tasks.len(), 1);
        assert_eq!(stored(&app), app.state.store);
        assert!(app.view.grid.days().any(|c| c.day == 15 && c.has_tasks));

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.view.tasks[0].completed);
        assert!(stored(&app).tasks_for(d(2024, 3, 15))[0].completed);

        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(app.screen, Screen::ConfirmDelete(_)));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.state.store.is_empty());
        assert_eq!(app.storage.get_item(STORE_KEY).unwrap().as_deref(), Some("{}"));
        assert!(!app.view.grid.days().any(|c| c.has_tasks));
    }

    #[test]
    fn blank_input_adds_nothing() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert!(app.state.store.is_empty());
        assert_eq!(app.storage.get_item(STORE_KEY).unwrap(), None);
    }

    #[test]
    fn cancelled_delete_keeps_task() {
        let mut app = test_app();
        app.perform(Action::AddTask("Keep me".into()));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.state.store.len(), 1);
    }

    #[test]
    fn edit_replaces_text() {
        let mut app = test_app();
        app.perform(Action::AddTask("Buy milk".into()));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('e'));
        assert!(matches!(app.screen, Screen::EditTask(_)));
        for _ in 0.."milk".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "bread");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view.tasks[0].text, "Buy bread");
    }

    #[test]
    fn month_keys_redraw_calendar_but_keep_selection() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.view.month_label, "April 2024");
        assert_eq!(app.state.selected_date, d(2024, 3, 15));
        assert_eq!(app.view.selected_label, "Friday, March 15");
        assert!(!app.view.grid.days().any(|c| c.selected));

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.view.month_label, "March 2024");
    }

    #[test]
    fn arrows_move_selected_day() {
        let mut app = test_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.state.selected_date, d(2024, 3, 23));
        assert_eq!(app.view.selected_label, "Saturday, March 23");
    }

    #[test]
    fn clicking_a_day_selects_it() {
        let mut app = test_app();
        draw(&mut app);
        let (rect, _) = *app
            .day_hitboxes
            .iter()
            .find(|(_, date)| *date == d(2024, 3, 20))
            .unwrap();
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: rect.x + 1,
            row: rect.y,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(app.state.selected_date, d(2024, 3, 20));
    }

    #[test]
    fn draws_calendar_and_checklist() {
        let mut app = test_app();
        app.perform(Action::AddTask("Buy milk".into()));
        let screen = draw(&mut app);
        assert!(screen.contains("March 2024"));
        assert!(screen.contains(" Su   Mo   Tu   We   Th   Fr   Sa"));
        assert!(screen.contains("Friday, March 15 (1 open)"));
        assert!(screen.contains("[ ] Buy milk"));
        assert!(screen.contains("15•"));
    }

    #[test]
    fn ctrl_c_quits_from_any_screen() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[test]
    fn rolling_past_midnight_moves_today_marker() {
        let mut app = test_app();
        app.roll_today(d(2024, 3, 16));
        let today: Vec<_> = app.view.grid.days().filter(|c| c.today).map(|c| c.day).collect();
        assert_eq!(today, vec![16]);
    }
}
