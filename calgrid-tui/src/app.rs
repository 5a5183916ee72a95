//! Application state and event loop.
//!
//! One task owns all state. Blocking terminal input is forwarded from a
//! pump thread and store calls run as spawned tasks; both feed the same
//! channel, so the loop only ever reacts to one message at a time. A single
//! in-flight guard covers every remote call: while one is pending, actions
//! that would start another are ignored instead of racing.

use std::io::{self, stdout};
use std::thread;

use anyhow::{Context, Result};
use calgrid_core::{
    CalendarEvent, Editor, EditorIntent, EditorMode, MonthCursor, MonthView, StoreResult,
    ViewCommand,
};
use chrono::{Datelike, NaiveDate};
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;

use crate::client::StoreClient;
use crate::ui;

/// Everything the main loop reacts to.
pub enum AppMsg {
    /// Forwarded terminal input.
    Input(Event),
    /// A month fetch finished, for the month it was issued against.
    MonthListed(MonthCursor, StoreResult<Vec<CalendarEvent>>),
    /// A create/update/delete finished.
    Mutated(Mutation, StoreResult<()>),
}

/// Which mutation a completion belongs to; drives the user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

impl Mutation {
    fn done_message(self) -> &'static str {
        match self {
            Mutation::Create => "Event added",
            Mutation::Update => "Event updated",
            Mutation::Delete => "Event deleted",
        }
    }

    fn failed_message(self) -> &'static str {
        match self {
            Mutation::Create => "Could not add the event",
            Mutation::Update => "Could not update the event",
            Mutation::Delete => "Could not delete the event",
        }
    }
}

/// Application state.
pub struct App {
    pub view: MonthView,
    pub editor: Option<Editor>,
    /// Day the grid cursor sits on, 1-based within the displayed month.
    pub selected_day: u32,
    pub today: NaiveDate,
    /// Set while a remote call is pending.
    pub in_flight: bool,
    /// Blocking notification; dismissed by the next key press.
    pub alert: Option<String>,
    /// Transient line after a successful mutation.
    pub status: Option<String>,
    pub should_quit: bool,
    client: StoreClient,
    tx: mpsc::Sender<AppMsg>,
}

impl App {
    pub fn new(client: StoreClient) -> (Self, mpsc::Receiver<AppMsg>) {
        let (tx, rx) = mpsc::channel(16);
        let today = chrono::Local::now().date_naive();

        let app = App {
            view: MonthView::new(MonthCursor::containing(today)),
            editor: None,
            selected_day: today.day(),
            today,
            in_flight: false,
            alert: None,
            status: None,
            should_quit: false,
            client,
            tx,
        };
        (app, rx)
    }

    /// Run the TUI until the user quits.
    pub async fn run(&mut self, mut rx: mpsc::Receiver<AppMsg>) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        stdout()
            .execute(EnterAlternateScreen)
            .context("Failed to enter the alternate screen")?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

        spawn_input_pump(self.tx.clone());
        let cmd = self.view.open();
        self.run_view_command(cmd);

        let result = self.event_loop(&mut terminal, &mut rx).await;

        disable_raw_mode()?;
        stdout().execute(LeaveAlternateScreen)?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        rx: &mut mpsc::Receiver<AppMsg>,
    ) -> Result<()> {
        loop {
            terminal.draw(|frame| ui::render(frame, self))?;

            if self.should_quit {
                break;
            }

            match rx.recv().await {
                Some(AppMsg::Input(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    self.handle_key(key.code);
                }
                Some(AppMsg::Input(_)) => {} // resizes redraw on the next pass
                Some(AppMsg::MonthListed(cursor, result)) => self.month_listed(cursor, result),
                Some(AppMsg::Mutated(kind, result)) => self.mutated(kind, result),
                None => break,
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        // A pending alert blocks everything else until dismissed.
        if self.alert.is_some() {
            self.alert = None;
            return;
        }
        self.status = None;

        if self.editor.is_some() {
            self.handle_editor_key(code);
        } else {
            self.handle_grid_key(code);
        }
    }

    fn handle_grid_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Left => self.move_selection(-1),
            KeyCode::Right => self.move_selection(1),
            KeyCode::Up => self.move_selection(-7),
            KeyCode::Down => self.move_selection(7),
            KeyCode::Char('p') | KeyCode::PageUp => self.navigate(MonthView::prev_month),
            KeyCode::Char('n') | KeyCode::PageDown => self.navigate(MonthView::next_month),
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Enter => self.open_editor(),
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, code: KeyCode) {
        let editing = self.editor.as_ref().is_some_and(Editor::is_editing);
        if editing {
            match code {
                KeyCode::Enter => self.submit_editor(),
                KeyCode::Esc => self.cancel_editor(),
                KeyCode::Tab => {
                    if let Some(editor) = self.editor.as_mut() {
                        editor.toggle_focus();
                    }
                }
                KeyCode::Backspace => {
                    if let Some(editor) = self.editor.as_mut() {
                        editor.delete_char();
                    }
                }
                KeyCode::Char(c) => {
                    if let Some(editor) = self.editor.as_mut() {
                        editor.insert_char(c);
                    }
                }
                _ => {}
            }
        } else {
            match code {
                KeyCode::Esc | KeyCode::Char('q') => self.editor = None,
                KeyCode::Char('e') => {
                    if let Some(editor) = self.editor.as_mut() {
                        editor.begin_edit();
                    }
                }
                KeyCode::Char('d') => self.delete_selected(),
                _ => {}
            }
        }
    }

    /// Move the grid cursor by days, clamped to the displayed month.
    fn move_selection(&mut self, delta: i32) {
        let days = self.view.cursor().day_count() as i32;
        self.selected_day = (self.selected_day as i32 + delta).clamp(1, days) as u32;
    }

    fn navigate(&mut self, go: fn(&mut MonthView) -> ViewCommand) {
        if self.in_flight {
            return;
        }
        let cmd = go(&mut self.view);
        // Navigation clears the selection.
        self.selected_day = 1;
        self.editor = None;
        self.run_view_command(cmd);
    }

    fn refresh(&mut self) {
        if self.in_flight {
            return;
        }
        let cmd = self.view.reconcile();
        self.run_view_command(cmd);
    }

    fn open_editor(&mut self) {
        let Some(date) = self.view.cursor().date(self.selected_day) else {
            return;
        };
        let existing = self.view.event_on(date).cloned();
        self.editor = Some(Editor::open(date, existing));
    }

    fn submit_editor(&mut self) {
        if self.in_flight {
            return;
        }
        let Some(editor) = self.editor.as_ref() else {
            return;
        };
        match editor.submit() {
            Ok(intent) => self.run_intent(intent),
            Err(err) => self.alert = Some(err.to_string()),
        }
    }

    fn delete_selected(&mut self) {
        if self.in_flight {
            return;
        }
        let Some(editor) = self.editor.as_ref() else {
            return;
        };
        match editor.request_delete() {
            Ok(intent) => self.run_intent(intent),
            Err(err) => self.alert = Some(err.to_string()),
        }
    }

    fn cancel_editor(&mut self) {
        match self.editor.as_mut() {
            Some(editor) if editor.mode() == EditorMode::Editing => editor.cancel_edit(),
            _ => self.editor = None,
        }
    }

    fn run_view_command(&mut self, cmd: ViewCommand) {
        match cmd {
            ViewCommand::FetchMonth(cursor) => {
                self.in_flight = true;
                let client = self.client.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = client.list_month(cursor).await;
                    let _ = tx.send(AppMsg::MonthListed(cursor, result)).await;
                });
            }
        }
    }

    fn run_intent(&mut self, intent: EditorIntent) {
        self.in_flight = true;
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let (kind, result) = match intent {
                EditorIntent::Create(draft) => (Mutation::Create, client.create(&draft).await),
                EditorIntent::Update { id, draft } => {
                    (Mutation::Update, client.update(id, &draft).await)
                }
                EditorIntent::Delete { id } => (Mutation::Delete, client.delete(id).await),
            };
            let _ = tx.send(AppMsg::Mutated(kind, result)).await;
        });
    }

    fn month_listed(&mut self, cursor: MonthCursor, result: StoreResult<Vec<CalendarEvent>>) {
        self.in_flight = false;
        if let Err(err) = &result {
            log::warn!("month fetch for {} failed: {err}", cursor.anchor());
        }
        if let Some(err) = self.view.month_loaded(cursor, result) {
            self.alert = Some(format!("Could not load events: {err}"));
        }
        self.clamp_selection();
    }

    fn mutated(&mut self, kind: Mutation, result: StoreResult<()>) {
        match result {
            Ok(()) => {
                self.editor = None;
                self.status = Some(kind.done_message().to_string());
                let cmd = self.view.reconcile();
                self.run_view_command(cmd);
            }
            Err(err) => {
                log::warn!("{kind:?} failed: {err}");
                self.in_flight = false;
                // The editor stays in its current mode with fields intact.
                self.alert = Some(format!("{}: {err}", kind.failed_message()));
            }
        }
    }

    fn clamp_selection(&mut self) {
        let days = self.view.cursor().day_count();
        self.selected_day = self.selected_day.clamp(1, days);
    }
}

/// Forward blocking crossterm input into the app channel.
fn spawn_input_pump(tx: mpsc::Sender<AppMsg>) {
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(AppMsg::Input(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });
}
