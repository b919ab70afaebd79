//! UI layout and rendering logic for the TUI.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::app::{App, Focus};
use crate::panel::PanelState;

const TOP_ROWS: u16 = 3;
const STATUS_ROWS: u16 = 1;
const EDITOR_SHARE: u16 = 55;

/// Rows of code visible in the editor for a terminal of `height` rows.
pub fn editor_viewport_rows(height: u16) -> usize {
    let body = height.saturating_sub(TOP_ROWS + STATUS_ROWS) as usize;
    (body * EDITOR_SHARE as usize / 100).saturating_sub(2)
}

/// Render the main UI
pub fn render_ui(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TOP_ROWS),    // Language, prompt, actions
            Constraint::Min(6),              // Editor and output
            Constraint::Length(STATUS_ROWS), // Status bar
        ])
        .split(frame.area());

    render_toolbar(frame, app, main_layout[0]);

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(EDITOR_SHARE), Constraint::Percentage(100 - EDITOR_SHARE)])
        .split(main_layout[1]);

    render_editor(frame, app, body[0]);
    render_output(frame, app, body[1]);
    render_status_bar(frame, app, main_layout[2]);

    if app.show_help {
        render_help_overlay(frame);
    }
}

fn focused_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default().borders(Borders::ALL).border_style(border).title(title)
}

/// Render a single-line field and place the cursor in it when focused.
fn render_line_field(frame: &mut Frame, area: Rect, block: Block, text: &str, placeholder: &str, cursor_col: usize, focused: bool) {
    let inner = block.inner(area);
    let width = inner.width.max(1) as usize;
    let hscroll = cursor_col.saturating_sub(width - 1);

    let paragraph = if text.is_empty() {
        Paragraph::new(placeholder).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(text).scroll((0, hscroll as u16))
    };
    frame.render_widget(paragraph.block(block), area);

    if focused {
        frame.set_cursor_position((inner.x + (cursor_col - hscroll) as u16, inner.y));
    }
}

/// Render the language selector, prompt field and action indicators
fn render_toolbar(frame: &mut Frame, app: &App, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(18), Constraint::Min(10), Constraint::Length(36)])
        .split(area);

    let language = Paragraph::new(format!("< {} >", app.session.language()))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title("Language F2/F3"));
    frame.render_widget(language, layout[0]);

    let focused = app.focus == Focus::Prompt;
    render_line_field(
        frame,
        layout[1],
        focused_block("Prompt (Enter to generate)", focused),
        app.prompt.text(),
        "Describe what code you want to generate...",
        app.prompt.cursor_display_col(),
        focused,
    );

    let state = app.session.state();
    let enabled = Style::default().fg(Color::White);
    let disabled = Style::default().fg(Color::DarkGray);
    let generate = if state == PanelState::Generating {
        Span::styled("Generating...", Style::default().fg(Color::Blue))
    } else {
        Span::styled("^G Generate", if app.session.can_generate() { enabled.bg(Color::Blue) } else { disabled })
    };
    let run = if state == PanelState::Executing {
        Span::styled("Running...", Style::default().fg(Color::Green))
    } else {
        Span::styled("^R Run", if app.session.can_run() { enabled.bg(Color::Green) } else { disabled })
    };
    let actions = Paragraph::new(Line::from(vec![generate, Span::raw("  "), run]))
        .block(Block::default().borders(Borders::ALL).title("Actions"));
    frame.render_widget(actions, layout[2]);
}

/// Render the code editor with an optional line-number gutter
fn render_editor(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Editor;
    let title = format!("Editor - {}", app.session.language());
    let block = focused_block(&title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = app.editor.lines();
    let gutter_width = if app.options.line_numbers {
        lines.len().to_string().len() as u16 + 1
    } else {
        0
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(gutter_width), Constraint::Min(1)])
        .split(inner);
    let code_area = columns[1];

    let height = code_area.height.max(1) as usize;
    let width = code_area.width.max(1) as usize;
    let (row, _) = app.editor.cursor();
    let cursor_col = app.editor.cursor_display_col();
    let vscroll = row.saturating_sub(height - 1);
    let hscroll = cursor_col.saturating_sub(width - 1);

    let visible = lines.iter().enumerate().skip(vscroll).take(height);

    if app.options.line_numbers {
        let numbers: Vec<Line> = visible
            .clone()
            .map(|(i, _)| {
                let style = if i == row {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Line::from(Span::styled(format!("{:>w$}", i + 1, w = gutter_width as usize - 1), style))
            })
            .collect();
        frame.render_widget(Paragraph::new(Text::from(numbers)), columns[0]);
    }

    let code: Vec<Line> = visible.map(|(_, l)| Line::from(l.as_str())).collect();
    frame.render_widget(Paragraph::new(Text::from(code)).scroll((0, hscroll as u16)), code_area);

    if focused {
        frame.set_cursor_position((
            code_area.x + (cursor_col - hscroll) as u16,
            code_area.y + (row - vscroll) as u16,
        ));
    }
}

/// Render the output pane, with the input field below it while input is awaited
fn render_output(frame: &mut Frame, app: &App, area: Rect) {
    let output_area = if app.is_input_shown() {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(area);
        let focused = app.focus == Focus::Input;
        render_line_field(
            frame,
            split[1],
            focused_block("Input (Enter to submit, Esc to close)", focused),
            app.stdin_input.text(),
            "Enter your input...",
            app.stdin_input.cursor_display_col(),
            focused,
        );
        split[0]
    } else {
        area
    };

    let style = if app.session.output().is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let mut paragraph = Paragraph::new(app.session.display_output())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title("Output (Alt+Up/Down to scroll)"))
        .scroll((app.output_scroll, 0));
    if app.options.word_wrap {
        paragraph = paragraph.wrap(Wrap { trim: false });
    }
    frame.render_widget(paragraph, output_area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status_paragraph = Paragraph::new(app.status_message())
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_paragraph, area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame) {
    let popup_area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, popup_area);

    let help_lines = vec![
        Line::from("Editor Panel Help"),
        Line::from(""),
        Line::from("  Ctrl+G       - Generate code from the prompt"),
        Line::from("  Ctrl+R       - Run the code (simulated)"),
        Line::from("  F2 / F3      - Next / previous language"),
        Line::from("  Tab          - Move focus: prompt, editor, input"),
        Line::from("  Alt+Up/Down  - Scroll output"),
        Line::from("  F1           - Toggle this help"),
        Line::from("  Ctrl+C       - Quit"),
        Line::from(""),
        Line::from("Prompt: Enter generates."),
        Line::from("Input: Enter submits, Esc closes without running."),
        Line::from(""),
        Line::from("Press any key to close"),
    ];

    let help_paragraph = Paragraph::new(Text::from(help_lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help_paragraph, popup_area);
}

/// Helper function to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{language::Language, tui::app::DisplayOptions};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render_ui(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn idle_panel_shows_placeholders() {
        let app = App::new(Language::Python, "gemini-pro".into(), DisplayOptions::default());
        let text = screen(&app);
        assert!(text.contains("Editor - Python"));
        assert!(text.contains("Output will appear here..."));
        assert!(!text.contains("Enter your input..."));
    }

    #[test]
    fn awaiting_input_shows_input_field() {
        let mut app = App::new(Language::Java, "gemini-pro".into(), DisplayOptions::default());
        app.editor.set_text("new Scanner(System.in)");
        app.begin_run().unwrap();
        app.finish_execution(crate::execution::ExecutionOutcome::InputRequired);
        let text = screen(&app);
        assert!(text.contains("Waiting for input..."));
        assert!(text.contains("Enter your input..."));
    }

    #[test]
    fn viewport_rows_track_terminal_height() {
        assert_eq!(editor_viewport_rows(24), 9);
        assert_eq!(editor_viewport_rows(2), 0);
    }
}
