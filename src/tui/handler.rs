//! Async event loop for the editor panel.

use std::{io, sync::Arc, time::Duration};

use anyhow::Result;
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use is_terminal::IsTerminal;
use ratatui::prelude::*;
use tokio::sync::mpsc;

use crate::{
    execution::execute_code,
    generation::generate_code,
    llm::TextGenerator,
    panel::{ExecuteRequest, GenerateRequest},
};
use super::{
    app::{App, Focus},
    events::TuiEvent,
    ui::{editor_viewport_rows, render_ui},
};

/// Spawns adapter calls and reports their results back to the loop.
struct Dispatcher {
    generator: Arc<dyn TextGenerator>,
    tx: mpsc::UnboundedSender<TuiEvent>,
}

impl Dispatcher {
    fn generate(&self, req: GenerateRequest) {
        let generator = Arc::clone(&self.generator);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let code = generate_code(generator.as_ref(), &req.prompt, req.language).await;
            let _ = tx.send(TuiEvent::Generated(code));
        });
    }

    fn execute(&self, req: ExecuteRequest) {
        let generator = Arc::clone(&self.generator);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = execute_code(generator.as_ref(), &req.code, req.language, req.input.as_deref()).await;
            let _ = tx.send(TuiEvent::Executed(outcome));
        });
    }
}

/// Run the editor panel until the user quits.
pub async fn run_editor(generator: Arc<dyn TextGenerator>, mut app: App) -> Result<()> {
    if !io::stdout().is_terminal() {
        return Err(anyhow::anyhow!(
            "the editor panel requires an interactive terminal; use `aicode generate` or `aicode run` instead"
        ));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (event_tx, event_rx) = mpsc::unbounded_channel::<TuiEvent>();
    let dispatcher = Dispatcher { generator, tx: event_tx.clone() };

    let result = run_app(&mut terminal, &mut app, &dispatcher, event_tx, event_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableBracketedPaste)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    dispatcher: &Dispatcher,
    event_tx: mpsc::UnboundedSender<TuiEvent>,
    mut event_rx: mpsc::UnboundedReceiver<TuiEvent>,
) -> Result<()> {
    // Spawn input handler
    let input_tx = event_tx;
    tokio::task::spawn_blocking(move || loop {
        if input_tx.is_closed() {
            break;
        }
        if event::poll(Duration::from_millis(100)).unwrap_or(false) {
            let ev = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => TuiEvent::Key(key),
                Ok(Event::Paste(text)) => TuiEvent::Paste(text),
                _ => continue,
            };
            if input_tx.send(ev).is_err() {
                break; // Channel closed
            }
        }
    });

    loop {
        terminal.draw(|frame| {
            app.editor_height = editor_viewport_rows(frame.area().height);
            render_ui(frame, app);
        })?;

        let Some(first) = event_rx.recv().await else {
            break;
        };
        let mut next = Some(first);
        while let Some(ev) = next {
            if handle_event(app, ev, dispatcher) {
                return Ok(());
            }
            next = event_rx.try_recv().ok();
        }
    }

    Ok(())
}

/// Returns true when the user asked to quit.
fn handle_event(app: &mut App, event: TuiEvent, dispatcher: &Dispatcher) -> bool {
    match event {
        TuiEvent::Key(key) => return handle_key_event(app, key, dispatcher),
        TuiEvent::Paste(text) => handle_paste(app, &text),
        TuiEvent::Generated(code) => app.finish_generate(code),
        TuiEvent::Executed(outcome) => app.finish_execution(outcome),
    }
    false
}

fn handle_paste(app: &mut App, text: &str) {
    match app.focus {
        Focus::Editor => {
            app.editor.insert_str(text);
            app.sync_code();
        }
        // single-line fields keep the first line only
        Focus::Prompt => {
            text.lines().next().unwrap_or_default().chars().for_each(|c| app.prompt.insert_char(c));
            app.sync_prompt();
        }
        Focus::Input => {
            text.lines().next().unwrap_or_default().chars().for_each(|c| app.stdin_input.insert_char(c));
            app.sync_input();
        }
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent, dispatcher: &Dispatcher) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    if is_quit_key(&key) {
        return true;
    }

    // While help is shown, any other key closes it
    if app.show_help {
        app.toggle_help();
        return false;
    }

    match key.code {
        KeyCode::Char('g') if ctrl => start_generate(app, dispatcher),
        KeyCode::Char('r') if ctrl => start_run(app, dispatcher),
        KeyCode::F(1) => app.toggle_help(),
        KeyCode::F(2) => app.next_language(),
        KeyCode::F(3) => app.previous_language(),
        KeyCode::Tab => app.cycle_focus(),
        KeyCode::Up if alt => app.scroll_output_up(),
        KeyCode::Down if alt => app.scroll_output_down(),
        _ => match app.focus {
            Focus::Prompt => handle_prompt_key(app, key, dispatcher),
            Focus::Editor => handle_editor_key(app, key),
            Focus::Input => handle_input_key(app, key, dispatcher),
        },
    }
    false
}

fn is_quit_key(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn start_generate(app: &mut App, dispatcher: &Dispatcher) {
    if let Some(req) = app.begin_generate() {
        dispatcher.generate(req);
    }
}

fn start_run(app: &mut App, dispatcher: &Dispatcher) {
    if let Some(req) = app.begin_run() {
        dispatcher.execute(req);
    }
}

fn handle_prompt_key(app: &mut App, key: KeyEvent, dispatcher: &Dispatcher) {
    match key.code {
        KeyCode::Enter => start_generate(app, dispatcher),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.prompt.insert_char(c),
        KeyCode::Backspace => app.prompt.backspace(),
        KeyCode::Delete => app.prompt.delete(),
        KeyCode::Left => app.prompt.move_left(),
        KeyCode::Right => app.prompt.move_right(),
        KeyCode::Home => app.prompt.move_home(),
        KeyCode::End => app.prompt.move_end(),
        _ => return,
    }
    app.sync_prompt();
}

fn handle_editor_key(app: &mut App, key: KeyEvent) {
    let page = app.editor_height.max(1);
    let edited = match key.code {
        KeyCode::Enter => {
            app.editor.insert_newline();
            true
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.editor.insert_char(c);
            true
        }
        KeyCode::Backspace => {
            app.editor.backspace();
            true
        }
        KeyCode::Delete => {
            app.editor.delete();
            true
        }
        KeyCode::Left => {
            app.editor.move_left();
            false
        }
        KeyCode::Right => {
            app.editor.move_right();
            false
        }
        KeyCode::Up => {
            app.editor.move_up();
            false
        }
        KeyCode::Down => {
            app.editor.move_down();
            false
        }
        KeyCode::Home => {
            app.editor.move_home();
            false
        }
        KeyCode::End => {
            app.editor.move_end();
            false
        }
        KeyCode::PageUp => {
            app.editor.move_rows_up(page);
            false
        }
        KeyCode::PageDown => {
            app.editor.move_rows_down(page);
            false
        }
        _ => false,
    };
    if edited {
        app.sync_code();
    }
}

fn handle_input_key(app: &mut App, key: KeyEvent, dispatcher: &Dispatcher) {
    match key.code {
        KeyCode::Enter => {
            if let Some(req) = app.submit_input() {
                dispatcher.execute(req);
            }
            return;
        }
        KeyCode::Esc => {
            app.dismiss_input();
            return;
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.stdin_input.insert_char(c),
        KeyCode::Backspace => app.stdin_input.backspace(),
        KeyCode::Delete => app.stdin_input.delete(),
        KeyCode::Left => app.stdin_input.move_left(),
        KeyCode::Right => app.stdin_input.move_right(),
        KeyCode::Home => app.stdin_input.move_home(),
        KeyCode::End => app.stdin_input.move_end(),
        _ => return,
    }
    app.sync_input();
}
