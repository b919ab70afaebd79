//! Editor panel session state and its transitions.
//!
//! Transitions return the request the caller should dispatch, or `None` when
//! the action is not available in the current state (a disabled control).

use crate::{
    execution::{ExecutionOutcome, DEFAULT_CODE},
    language::Language,
};

pub const OUTPUT_PLACEHOLDER: &str = "Output will appear here...";
pub const EXECUTING: &str = "Executing code...";
pub const EXECUTING_WITH_INPUT: &str = "Executing code with input...";
pub const WAITING_FOR_INPUT: &str = "Waiting for input...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Idle,
    Generating,
    Executing,
    AwaitingInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub prompt: String,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteRequest {
    pub code: String,
    pub language: Language,
    pub input: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Session {
    code: String,
    language: Language,
    prompt: String,
    output: String,
    state: PanelState,
    pending_input: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl Session {
    pub fn new(language: Language) -> Self {
        Self {
            code: DEFAULT_CODE.to_string(),
            language,
            prompt: String::new(),
            output: String::new(),
            state: PanelState::Idle,
            pending_input: String::new(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Raw output text; empty until something has run.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Output as displayed, with the placeholder when nothing has run yet.
    pub fn display_output(&self) -> &str {
        if self.output.is_empty() {
            OUTPUT_PLACEHOLDER
        } else {
            &self.output
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    /// Switching language keeps both code and output.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn set_pending_input(&mut self, input: impl Into<String>) {
        self.pending_input = input.into();
    }

    pub fn can_generate(&self) -> bool {
        self.state == PanelState::Idle
    }

    pub fn can_run(&self) -> bool {
        matches!(self.state, PanelState::Idle | PanelState::AwaitingInput)
    }

    pub fn begin_generate(&mut self) -> Option<GenerateRequest> {
        if !self.can_generate() || self.prompt.trim().is_empty() {
            return None;
        }
        self.state = PanelState::Generating;
        Some(GenerateRequest { prompt: self.prompt.clone(), language: self.language })
    }

    /// Generated text (or the failure placeholder) replaces the editor content.
    pub fn finish_generate(&mut self, code: String) {
        if self.state != PanelState::Generating {
            tracing::debug!(state = ?self.state, "ignoring stale generation result");
            return;
        }
        self.code = code;
        self.state = PanelState::Idle;
    }

    pub fn begin_run(&mut self) -> Option<ExecuteRequest> {
        if !self.can_run() {
            return None;
        }
        self.state = PanelState::Executing;
        self.output = EXECUTING.to_string();
        let input = (!self.pending_input.is_empty()).then(|| self.pending_input.clone());
        Some(ExecuteRequest { code: self.code.clone(), language: self.language, input })
    }

    pub fn submit_input(&mut self) -> Option<ExecuteRequest> {
        if self.state != PanelState::AwaitingInput {
            return None;
        }
        self.state = PanelState::Executing;
        self.output = EXECUTING_WITH_INPUT.to_string();
        Some(ExecuteRequest {
            code: self.code.clone(),
            language: self.language,
            input: Some(self.pending_input.clone()),
        })
    }

    pub fn finish_execution(&mut self, outcome: ExecutionOutcome) {
        if self.state != PanelState::Executing {
            tracing::debug!(state = ?self.state, "ignoring stale execution result");
            return;
        }
        match outcome {
            ExecutionOutcome::InputRequired => {
                self.state = PanelState::AwaitingInput;
                self.output = WAITING_FOR_INPUT.to_string();
            }
            ExecutionOutcome::Output(text) => {
                self.state = PanelState::Idle;
                self.output = text;
            }
        }
    }

    /// Close the input field without running.
    pub fn dismiss_input(&mut self) -> bool {
        if self.state != PanelState::AwaitingInput {
            return false;
        }
        self.state = PanelState::Idle;
        true
    }
}
