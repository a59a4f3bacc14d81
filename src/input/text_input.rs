use crate::input::text_edit;
use crate::terminal::{KeyCode, KeyModifiers};
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Edited,
    Moved,
    NotHandled,
}

/// Single-line text editor. Cursor positions are char offsets.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    cursor: usize,
    placeholder: String,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn char_len(&self) -> usize {
        text_edit::char_count(&self.value)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replaces the value and moves the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = text_edit::char_count(&self.value);
    }

    /// Display width of the text before the cursor, in terminal cells.
    pub fn cursor_cell_offset(&self) -> usize {
        self.value
            .chars()
            .take(self.cursor)
            .map(|ch| ch.width().unwrap_or(0))
            .sum()
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> EditOutcome {
        if modifiers.contains(KeyModifiers::CONTROL) || modifiers.contains(KeyModifiers::ALT) {
            return EditOutcome::NotHandled;
        }

        match code {
            KeyCode::Char(ch) => {
                text_edit::insert_char(&mut self.value, &mut self.cursor, ch);
                EditOutcome::Edited
            }
            KeyCode::Backspace => {
                if text_edit::backspace_char(&mut self.value, &mut self.cursor) {
                    EditOutcome::Edited
                } else {
                    EditOutcome::Moved
                }
            }
            KeyCode::Delete => {
                if text_edit::delete_char(&mut self.value, &mut self.cursor) {
                    EditOutcome::Edited
                } else {
                    EditOutcome::Moved
                }
            }
            KeyCode::Left => {
                text_edit::move_left(&mut self.cursor, &self.value);
                EditOutcome::Moved
            }
            KeyCode::Right => {
                text_edit::move_right(&mut self.cursor, &self.value);
                EditOutcome::Moved
            }
            KeyCode::Home => {
                self.cursor = 0;
                EditOutcome::Moved
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                EditOutcome::Moved
            }
            _ => EditOutcome::NotHandled,
        }
    }
}
