// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tidelist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tidelist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal widget.
//!
//! Renders the resolved todo list (ratatui + crossterm) and forwards user intents through
//! [`TodoActions`]. The widget never edits list state itself; every change comes back through
//! the reconciler.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tokio::runtime::Handle;

use crate::client::{SyncKind, WidgetController};
use crate::model::{TodoId, TodoItem, TodoList};

const FOCUS_COLOR: Color = Color::LightGreen;
const DONE_COLOR: Color = Color::DarkGray;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const EMPTY_LIST_TEXT: &str = "No items yet";
const INPUT_PLACEHOLDER: &str = "Press a to add a todo";
const TOAST_TTL: Duration = Duration::from_secs(2);

/// User intents raised by the widget.
pub trait TodoActions {
    fn add(&mut self, title: &str);
    fn toggle(&mut self, todo_id: &TodoId);
    fn delete(&mut self, todo_id: &TodoId);
}

/// Forwards widget intents to a [`WidgetController`] from outside the async runtime.
pub struct ControllerActions {
    controller: WidgetController,
    runtime: Handle,
}

impl ControllerActions {
    pub fn new(controller: WidgetController, runtime: Handle) -> Self {
        Self { controller, runtime }
    }
}

impl TodoActions for ControllerActions {
    // The returned handles are detached; responses land in the reconciler on their own.
    fn add(&mut self, title: &str) {
        let _pending = self.runtime.block_on(self.controller.add(title));
    }

    fn toggle(&mut self, todo_id: &TodoId) {
        let _pending = self.runtime.block_on(self.controller.toggle(todo_id));
    }

    fn delete(&mut self, todo_id: &TodoId) {
        let _pending = self.runtime.block_on(self.controller.delete(todo_id));
    }
}

/// Runs the interactive widget until the user quits.
///
/// Must be called off the async runtime (e.g. from `spawn_blocking`); `runtime` drives the
/// controller's tool calls.
pub fn run_widget(controller: WidgetController, runtime: Handle) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut actions = ControllerActions::new(controller.clone(), runtime);
    let mut app = App::default();

    while !app.should_quit {
        let (list, sync) = controller.blocking_view();
        app.clamp_selection(&list);
        terminal.draw(|frame| draw(frame, &app, &list, sync))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key, &list, &mut actions);
                }
                _ => {}
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &App, list: &TodoList, sync: SyncKind) {
    let area = frame.size();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    render_input(frame, app, rows[0]);
    render_items(frame, app, list, rows[1]);
    frame.render_widget(Paragraph::new(footer_line(app, sync)), rows[2]);
}

fn render_input(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(input_border_style(app.mode))
        .title(input_view_title(app.mode));

    let text = if app.input.is_empty() && app.mode == InputMode::Browse {
        Line::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Line::raw(app.input.clone())
    };
    frame.render_widget(Paragraph::new(text).block(block), area);

    if app.mode == InputMode::Insert && area.width > 2 && area.height > 2 {
        let typed = u16::try_from(app.input.chars().count()).unwrap_or(u16::MAX);
        let cursor_x = area.x + 1 + typed.min(area.width - 3);
        frame.set_cursor(cursor_x, area.y + 1);
    }
}

fn render_items(frame: &mut Frame<'_>, app: &App, list: &TodoList, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(list_view_title(list));

    if list.is_empty() {
        let empty = Paragraph::new(Line::styled(EMPTY_LIST_TEXT, Style::default().fg(DONE_COLOR)))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items = list.items().iter().map(|item| ListItem::new(item_line(item)));
    let widget = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if app.mode == InputMode::Browse {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(widget, area, &mut state);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum InputMode {
    #[default]
    Browse,
    Insert,
}

#[derive(Debug)]
struct Toast {
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct App {
    mode: InputMode,
    input: String,
    selected: usize,
    should_quit: bool,
    toast: Option<Toast>,
}

impl App {
    fn handle_key(&mut self, key: KeyEvent, list: &TodoList, actions: &mut dyn TodoActions) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.handle_key_code(key.code, list, actions) {
            self.should_quit = true;
        }
    }

    /// Returns `true` when the widget should quit.
    fn handle_key_code(
        &mut self,
        code: KeyCode,
        list: &TodoList,
        actions: &mut dyn TodoActions,
    ) -> bool {
        match self.mode {
            InputMode::Insert => {
                self.handle_insert_key(code, actions);
                false
            }
            InputMode::Browse => self.handle_browse_key(code, list, actions),
        }
    }

    fn handle_browse_key(
        &mut self,
        code: KeyCode,
        list: &TodoList,
        actions: &mut dyn TodoActions,
    ) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(list, 1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(list, -1),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => self.selected = list.len().saturating_sub(1),
            KeyCode::Char('a') | KeyCode::Char('i') => self.mode = InputMode::Insert,
            KeyCode::Char(' ') | KeyCode::Enter => match list.items().get(self.selected) {
                Some(item) => actions.toggle(item.id()),
                None => self.set_toast("Nothing to toggle"),
            },
            KeyCode::Char('d') | KeyCode::Delete => match list.items().get(self.selected) {
                Some(item) => {
                    actions.delete(item.id());
                    self.set_toast(format!("Deleted \"{}\"", item.title()));
                }
                None => self.set_toast("Nothing to delete"),
            },
            _ => {}
        }
        false
    }

    fn handle_insert_key(&mut self, code: KeyCode, actions: &mut dyn TodoActions) {
        match code {
            KeyCode::Esc => {
                self.input.clear();
                self.mode = InputMode::Browse;
            }
            KeyCode::Enter => self.submit(actions),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(ch) => self.input.push(ch),
            _ => {}
        }
    }

    fn submit(&mut self, actions: &mut dyn TodoActions) {
        if self.input.trim().is_empty() {
            self.input.clear();
            self.set_toast("Type a title first");
            return;
        }
        actions.add(self.input.trim());
        self.input.clear();
        self.selected = 0;
    }

    fn move_selection(&mut self, list: &TodoList, delta: isize) {
        let last = list.len().saturating_sub(1);
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    fn clamp_selection(&mut self, list: &TodoList) {
        self.selected = self.selected.min(list.len().saturating_sub(1));
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast =
            Some(Toast { message: message.into(), expires_at: Instant::now() + TOAST_TTL });
    }

    fn active_toast(&self) -> Option<&str> {
        self.toast
            .as_ref()
            .filter(|toast| Instant::now() < toast.expires_at)
            .map(|toast| toast.message.as_str())
    }
}

include!("chrome.rs");

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}
