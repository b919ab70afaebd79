//! Custom event types for the TUI application.

use crossterm::event::KeyEvent;

use crate::execution::ExecutionOutcome;

/// Events that can occur in the TUI application
#[derive(Debug)]
pub enum TuiEvent {
    /// User keyboard input
    Key(KeyEvent),
    /// Bracketed paste content
    Paste(String),
    /// Generation adapter settled with editor text
    Generated(String),
    /// Execution adapter settled
    Executed(ExecutionOutcome),
}
