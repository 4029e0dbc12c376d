//! Main application loop and event handling.

use crate::state::{AppMode, AppState, FocusTarget};
use crate::ui;
use crate::worker::{self, WorkerCommand, WorkerEvent};
use anyhow::{Context, Result};
use askdb_core::{Config, HttpClient, QueryController};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

/// What a key press asks the loop to do beyond mutating state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Submit,
}

/// Run the TUI application
pub fn run(config: Config) -> Result<()> {
    let client = HttpClient::from_config(&config)?;
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (evt_tx, evt_rx) = mpsc::channel();
    let worker = worker::start_worker(client, config.health_interval(), cmd_rx, evt_tx)
        .context("failed to start request worker")?;

    let mut app = AppState::new(config.server_url.clone());
    app.max_cell_width = config.tui.max_cell_width;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let res = run_app(&mut terminal, &mut app, &cmd_tx, &evt_rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    let _ = cmd_tx.send(WorkerCommand::Quit);
    drop(cmd_tx);
    if worker.join().is_err() {
        tracing::warn!("request worker panicked");
    }

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Main application loop
fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    cmd_tx: &Sender<WorkerCommand>,
    evt_rx: &Receiver<WorkerEvent>,
) -> Result<()> {
    let mut controller = QueryController::new();

    loop {
        // Draw UI
        terminal.draw(|f| ui::render(f, app))?;

        // Apply worker events
        while let Ok(evt) = evt_rx.try_recv() {
            apply_worker_event(app, &mut controller, evt);
        }

        // Handle events
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(app, key.code, key.modifiers) == KeyAction::Submit {
                    submit(app, &mut controller, cmd_tx);
                }
            }
        }

        // Check if should quit
        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Begin a submission and hand the request to the worker.
pub(crate) fn submit(
    app: &mut AppState,
    controller: &mut QueryController,
    cmd_tx: &Sender<WorkerCommand>,
) {
    let Some((id, request)) = app.submit(controller) else {
        return;
    };

    if cmd_tx.send(WorkerCommand::Ask { id, request }).is_err() {
        // Worker is gone; finish the submission so the UI stays usable.
        app.complete(
            controller,
            id,
            Err(askdb_core::Error::Transport("request worker stopped".to_string())),
        );
    }
}

pub(crate) fn apply_worker_event(
    app: &mut AppState,
    controller: &mut QueryController,
    evt: WorkerEvent,
) {
    match evt {
        WorkerEvent::Answer { id, result } => {
            app.complete(controller, id, result);
        }
        WorkerEvent::Health { status } => {
            app.server_status = Some(status);
        }
    }
}

/// Handle keyboard events
pub fn handle_key_event(app: &mut AppState, key: KeyCode, modifiers: KeyModifiers) -> KeyAction {
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key, modifiers) {
        app.quit();
        return KeyAction::None;
    }

    match app.mode {
        AppMode::Query => handle_query_keys(app, key, modifiers),
        AppMode::Help => {
            handle_help_keys(app, key);
            KeyAction::None
        }
    }
}

/// Handle keys on the query screen
fn handle_query_keys(app: &mut AppState, key: KeyCode, modifiers: KeyModifiers) -> KeyAction {
    // Keys that work regardless of focus
    match (key, modifiers) {
        (KeyCode::Tab, _) => {
            app.cycle_focus();
            return KeyAction::None;
        }
        (KeyCode::F(1), _) => {
            app.toggle_help();
            return KeyAction::None;
        }
        _ => {}
    }

    match app.focus {
        FocusTarget::Input => handle_input_keys(app, key, modifiers),
        FocusTarget::Button => handle_button_keys(app, key),
        FocusTarget::Results => {
            handle_results_keys(app, key);
            KeyAction::None
        }
    }
}

/// Handle keys when the question input is focused
fn handle_input_keys(app: &mut AppState, key: KeyCode, modifiers: KeyModifiers) -> KeyAction {
    match (key, modifiers) {
        (KeyCode::Enter, _) => return KeyAction::Submit,
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            app.input.insert_char(c);
        }
        (KeyCode::Backspace, _) => app.input.delete_char(),
        (KeyCode::Delete, _) => app.input.delete_char_forward(),
        (KeyCode::Left, _) => app.input.move_cursor_left(),
        (KeyCode::Right, _) => app.input.move_cursor_right(),
        (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
            app.input.move_cursor_home()
        }
        (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
            app.input.move_cursor_end()
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => app.input.clear(),
        // Down arrow switches to results if there are any
        (KeyCode::Down, _) if app.answer.table_visible => app.focus = FocusTarget::Results,
        _ => {}
    }
    KeyAction::None
}

/// Handle keys when the Ask button is focused
fn handle_button_keys(app: &mut AppState, key: KeyCode) -> KeyAction {
    match key {
        KeyCode::Enter | KeyCode::Char(' ') => return KeyAction::Submit,
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('q') => app.quit(),
        KeyCode::Esc => app.focus = FocusTarget::Input,
        _ => {}
    }
    KeyAction::None
}

/// Handle keys when the result table is focused
fn handle_results_keys(app: &mut AppState, key: KeyCode) {
    match key {
        // Up arrow at top goes back to input
        KeyCode::Up if app.answer.selected_row == 0 => app.focus = FocusTarget::Input,
        KeyCode::Char('j') | KeyCode::Down => app.answer.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.answer.select_previous(),
        KeyCode::Char('g') | KeyCode::Home => app.answer.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.answer.select_last(),
        KeyCode::PageDown => app.answer.page_down(),
        KeyCode::PageUp => app.answer.page_up(),
        KeyCode::Char('h') | KeyCode::Left => app.answer.scroll_columns_left(),
        KeyCode::Char('l') | KeyCode::Right => app.answer.scroll_columns_right(),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('q') => app.quit(),
        KeyCode::Esc => app.focus = FocusTarget::Input,
        _ => {}
    }
}

/// Handle keys in help mode
fn handle_help_keys(app: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Char('?') | KeyCode::F(1) | KeyCode::Esc | KeyCode::Char('q') => {
            app.toggle_help();
        }
        _ => {}
    }
}
