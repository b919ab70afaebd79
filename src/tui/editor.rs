//! Text-editing widgets: a multi-line code buffer and a single-line field.
//!
//! Cursors are char indices; conversion to byte offsets happens at the edges.

use unicode_width::UnicodeWidthStr;

fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(s.len())
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Terminal columns taken by the first `char_idx` chars of `s`.
fn display_width(s: &str, char_idx: usize) -> usize {
    s[..byte_index(s, char_idx)].width()
}

#[derive(Debug, Clone)]
pub struct EditorBuffer {
    lines: Vec<String>,
    row: usize,
    col: usize,
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self { lines: vec![String::new()], row: 0, col: 0 }
    }
}

impl EditorBuffer {
    pub fn new(text: &str) -> Self {
        let mut buf = Self::default();
        buf.set_text(text);
        buf
    }

    /// Replace the whole content; the cursor moves to the start.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(|l| l.trim_end_matches('\r').to_string()).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.row = 0;
        self.col = 0;
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// (row, char column)
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn cursor_display_col(&self) -> usize {
        display_width(&self.lines[self.row], self.col)
    }

    fn current_len(&self) -> usize {
        char_len(&self.lines[self.row])
    }

    pub fn insert_char(&mut self, c: char) {
        let line = &mut self.lines[self.row];
        let at = byte_index(line, self.col);
        line.insert(at, c);
        self.col += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars() {
            if c == '\n' {
                self.split_line();
            } else if c != '\r' {
                self.insert_char(c);
            }
        }
    }

    fn split_line(&mut self) {
        let line = &mut self.lines[self.row];
        let at = byte_index(line, self.col);
        let rest = line.split_off(at);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
    }

    /// Break the line at the cursor, carrying the current indentation.
    pub fn insert_newline(&mut self) {
        let indent: String = self.lines[self.row]
            .chars()
            .take(self.col)
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect();
        self.split_line();
        let line = &mut self.lines[self.row];
        line.insert_str(0, &indent);
        self.col = char_len(&indent);
    }

    pub fn backspace(&mut self) {
        if self.col > 0 {
            let line = &mut self.lines[self.row];
            let at = byte_index(line, self.col - 1);
            line.remove(at);
            self.col -= 1;
        } else if self.row > 0 {
            let current = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.current_len();
            self.lines[self.row].push_str(&current);
        }
    }

    pub fn delete(&mut self) {
        if self.col < self.current_len() {
            let line = &mut self.lines[self.row];
            let at = byte_index(line, self.col);
            line.remove(at);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.current_len();
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.current_len() {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        self.move_rows_up(1);
    }

    pub fn move_down(&mut self) {
        self.move_rows_down(1);
    }

    pub fn move_rows_up(&mut self, n: usize) {
        self.row = self.row.saturating_sub(n);
        self.col = self.col.min(self.current_len());
    }

    pub fn move_rows_down(&mut self, n: usize) {
        self.row = (self.row + n).min(self.lines.len() - 1);
        self.col = self.col.min(self.current_len());
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self) {
        self.col = self.current_len();
    }
}

/// Single-line input used for the prompt and the stdin field.
#[derive(Debug, Clone, Default)]
pub struct LineInput {
    text: String,
    cursor: usize,
}

impl LineInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor_display_col(&self) -> usize {
        display_width(&self.text, self.cursor)
    }

    pub fn insert_char(&mut self, c: char) {
        let at = byte_index(&self.text, self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let at = byte_index(&self.text, self.cursor - 1);
            self.text.remove(at);
            self.cursor -= 1;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < char_len(&self.text) {
            let at = byte_index(&self.text, self.cursor);
            self.text.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(char_len(&self.text));
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = char_len(&self.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newline_carries_indentation() {
        let mut buf = EditorBuffer::new("def f():");
        buf.move_end();
        buf.insert_newline();
        buf.insert_str("    return 1");
        buf.insert_newline();
        assert_eq!(buf.text(), "def f():\n    return 1\n    ");
        assert_eq!(buf.cursor(), (2, 4));
    }

    #[test]
    fn backspace_at_line_start_joins_lines() {
        let mut buf = EditorBuffer::new("ab\ncd");
        buf.move_down();
        buf.backspace();
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor(), (0, 2));
    }

    #[test]
    fn delete_at_line_end_pulls_next_line() {
        let mut buf = EditorBuffer::new("ab\ncd");
        buf.move_end();
        buf.delete();
        assert_eq!(buf.text(), "abcd");
    }

    #[test]
    fn vertical_moves_clamp_column() {
        let mut buf = EditorBuffer::new("long line\nx");
        buf.move_end();
        buf.move_down();
        assert_eq!(buf.cursor(), (1, 1));
        buf.move_rows_down(10);
        assert_eq!(buf.cursor(), (1, 1));
        buf.move_rows_up(10);
        assert_eq!(buf.cursor(), (0, 1));
    }

    #[test]
    fn multibyte_chars_edit_by_char() {
        let mut buf = EditorBuffer::new("héllo");
        buf.move_right();
        buf.move_right();
        buf.backspace();
        assert_eq!(buf.text(), "hllo");
        buf.insert_char('é');
        assert_eq!(buf.text(), "héllo");
    }

    #[test]
    fn wide_chars_take_two_columns() {
        let mut buf = EditorBuffer::new("日本");
        buf.move_end();
        assert_eq!(buf.cursor_display_col(), 4);
    }

    #[test]
    fn line_input_edits_in_place() {
        let mut input = LineInput::default();
        for c in "3 4".chars() {
            input.insert_char(c);
        }
        input.move_home();
        input.delete();
        input.move_end();
        input.backspace();
        input.insert_char('5');
        assert_eq!(input.text(), " 5");
        assert_eq!(input.cursor_display_col(), 2);
    }
}
