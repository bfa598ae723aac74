//! Line editor shared by the panels, built on `tui_input::Input`.
//!
//! Multi-line mode keeps `\n` inside the value; Alt+Enter or Shift+Enter
//! inserts one and Enter commits.

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use tui_input::{Input, InputRequest, backend::crossterm::EventHandler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The value changed.
    Changed,
    /// Key consumed without changing the value (cursor movement).
    Moved,
    Commit,
    Cancel,
}

#[derive(Debug, Clone, Default)]
pub struct LineEdit {
    input: Input,
    multiline: bool,
}

impl LineEdit {
    pub fn new(value: impl Into<String>) -> Self {
        let value: String = value.into();
        Self {
            input: Input::new(value),
            multiline: false,
        }
    }

    pub fn multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditOutcome {
        match key.code {
            KeyCode::Esc => EditOutcome::Cancel,
            KeyCode::Enter
                if self.multiline
                    && key
                        .modifiers
                        .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT) =>
            {
                self.input.handle(InputRequest::InsertChar('\n'));
                EditOutcome::Changed
            }
            KeyCode::Enter => EditOutcome::Commit,
            _ => match self.input.handle_event(&CrosstermEvent::Key(key)) {
                Some(change) if change.value => EditOutcome::Changed,
                _ => EditOutcome::Moved,
            },
        }
    }

    /// Insert pasted text at the cursor. Newlines are dropped in single-line mode.
    pub fn paste(&mut self, text: &str) {
        for c in text.chars() {
            match c {
                '\r' => {}
                '\n' if !self.multiline => {}
                c => {
                    self.input.handle(InputRequest::InsertChar(c));
                }
            }
        }
    }

    /// Cursor as (row, column) within the value split at `\n`.
    pub fn cursor_position(&self) -> (u16, u16) {
        let before: String = self.input.value().chars().take(self.input.cursor()).collect();
        let row = before.matches('\n').count();
        let col = before
            .rsplit('\n')
            .next()
            .map(|line| line.chars().count())
            .unwrap_or(0);
        (row as u16, col as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_changes_and_enter_commits() {
        let mut edit = LineEdit::new("ab");
        assert_eq!(edit.handle_key(key(KeyCode::Char('c'))), EditOutcome::Changed);
        assert_eq!(edit.value(), "abc");
        assert_eq!(edit.handle_key(key(KeyCode::Left)), EditOutcome::Moved);
        assert_eq!(edit.handle_key(key(KeyCode::Enter)), EditOutcome::Commit);
        assert_eq!(edit.handle_key(key(KeyCode::Esc)), EditOutcome::Cancel);
    }

    #[test]
    fn multiline_inserts_newlines_and_tracks_rows() {
        let mut edit = LineEdit::new("ab").multiline(true);
        let alt_enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT);
        assert_eq!(edit.handle_key(alt_enter), EditOutcome::Changed);
        edit.handle_key(key(KeyCode::Char('x')));
        assert_eq!(edit.value(), "ab\nx");
        assert_eq!(edit.cursor_position(), (1, 1));
    }

    #[test]
    fn single_line_paste_drops_newlines() {
        let mut edit = LineEdit::new("");
        edit.paste("a\r\nb");
        assert_eq!(edit.value(), "ab");

        let mut edit = LineEdit::new("").multiline(true);
        edit.paste("a\r\nb");
        assert_eq!(edit.value(), "a\nb");
    }
}
