//! TUI application state: the session plus widget state around it.

use crate::{
    config::Config,
    execution::ExecutionOutcome,
    language::Language,
    panel::{ExecuteRequest, GenerateRequest, PanelState, Session},
};

use super::editor::{EditorBuffer, LineInput};

/// Which widget receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Prompt,
    Editor,
    Input,
}

/// Pass-through display settings.
#[derive(Debug, Clone, Copy)]
pub struct DisplayOptions {
    /// Wrap long lines in the output pane
    pub word_wrap: bool,
    /// Show a line-number gutter in the editor
    pub line_numbers: bool,
}

impl DisplayOptions {
    pub fn from_config(cfg: &Config) -> Self {
        Self { word_wrap: cfg.get_bool("WORD_WRAP"), line_numbers: cfg.get_bool("LINE_NUMBERS") }
    }
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self { word_wrap: true, line_numbers: true }
    }
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub editor: EditorBuffer,
    pub prompt: LineInput,
    pub stdin_input: LineInput,
    pub focus: Focus,
    /// Model name shown in the status bar
    pub model: String,
    pub options: DisplayOptions,
    pub show_help: bool,
    /// Lines scrolled down in the output pane
    pub output_scroll: u16,
    /// Rows visible in the editor at last draw, for paging
    pub editor_height: usize,
}

impl App {
    pub fn new(language: Language, model: String, options: DisplayOptions) -> Self {
        let session = Session::new(language);
        let editor = EditorBuffer::new(session.code());
        Self {
            session,
            editor,
            prompt: LineInput::default(),
            stdin_input: LineInput::default(),
            focus: Focus::Prompt,
            model,
            options,
            show_help: false,
            output_scroll: 0,
            editor_height: 10,
        }
    }

    /// Push the editor text into the session after an edit.
    pub fn sync_code(&mut self) {
        self.session.set_code(self.editor.text());
    }

    pub fn sync_prompt(&mut self) {
        self.session.set_prompt(self.prompt.text());
    }

    pub fn sync_input(&mut self) {
        self.session.set_pending_input(self.stdin_input.text());
    }

    pub fn is_input_shown(&self) -> bool {
        self.session.state() == PanelState::AwaitingInput
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Prompt => Focus::Editor,
            Focus::Editor if self.is_input_shown() => Focus::Input,
            Focus::Editor | Focus::Input => Focus::Prompt,
        };
    }

    pub fn next_language(&mut self) {
        self.session.set_language(self.session.language().next());
    }

    pub fn previous_language(&mut self) {
        self.session.set_language(self.session.language().previous());
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn scroll_output_up(&mut self) {
        self.output_scroll = self.output_scroll.saturating_sub(1);
    }

    pub fn scroll_output_down(&mut self) {
        self.output_scroll = self.output_scroll.saturating_add(1);
    }

    pub fn begin_generate(&mut self) -> Option<GenerateRequest> {
        self.sync_prompt();
        self.session.begin_generate()
    }

    pub fn finish_generate(&mut self, code: String) {
        self.session.finish_generate(code);
        self.editor.set_text(self.session.code());
    }

    pub fn begin_run(&mut self) -> Option<ExecuteRequest> {
        self.sync_code();
        let req = self.session.begin_run()?;
        self.output_scroll = 0;
        self.release_hidden_input();
        Some(req)
    }

    pub fn submit_input(&mut self) -> Option<ExecuteRequest> {
        self.sync_input();
        let req = self.session.submit_input()?;
        if self.focus == Focus::Input {
            self.focus = Focus::Editor;
        }
        Some(req)
    }

    pub fn finish_execution(&mut self, outcome: ExecutionOutcome) {
        self.session.finish_execution(outcome);
        self.output_scroll = 0;
        if self.is_input_shown() {
            self.focus = Focus::Input;
        } else {
            self.release_hidden_input();
        }
    }

    /// Keystrokes must never reach the input field while it is hidden.
    fn release_hidden_input(&mut self) {
        if self.focus == Focus::Input && !self.is_input_shown() {
            self.focus = Focus::Editor;
        }
    }

    pub fn dismiss_input(&mut self) {
        if self.session.dismiss_input() && self.focus == Focus::Input {
            self.focus = Focus::Editor;
        }
    }

    pub fn status_message(&self) -> String {
        let activity = match self.session.state() {
            PanelState::Idle => "Ready",
            PanelState::Generating => "Generating...",
            PanelState::Executing => "Running...",
            PanelState::AwaitingInput => "Program needs input (Enter submits, Esc closes)",
        };
        format!("{} | {} | Model: {} | F1 help", activity, self.session.language(), self.model)
    }
}
