//! AI code editor: generate code from a prompt and simulate running it,
//! both through a hosted text-generation model.

pub mod cli;
pub mod config;
pub mod execution;
pub mod generation;
pub mod handlers;
pub mod language;
pub mod llm;
pub mod panel;
pub mod printer;
pub mod prompt;
pub mod tui;
pub mod utils;
