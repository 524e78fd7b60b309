//! Cursor editing for the input area
//!
//! The text itself lives in [`Console`](crate::console::Console); the editor
//! only tracks a byte offset into it and applies edits at that offset.

/// Insertion point inside the input buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Editor {
    cursor: usize,
}

impl Editor {
    pub fn new() -> Self {
        Editor { cursor: 0 }
    }

    /// Editor with the cursor after the last character of `text`
    pub fn at_end(text: &str) -> Self {
        Editor { cursor: text.len() }
    }

    /// Byte offset of the cursor
    pub fn offset(&self) -> usize {
        self.cursor
    }

    /// Zero-based (row, column) of the cursor, column counted in chars
    pub fn position(&self, text: &str) -> (usize, usize) {
        let before = &text[..self.cursor.min(text.len())];
        let row = before.matches('\n').count();
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        (row, before[line_start..].chars().count())
    }

    /// Pull the cursor back inside `text` after it was replaced wholesale
    pub fn clamp(&mut self, text: &str) {
        self.cursor = self.cursor.min(text.len());
        while !text.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    pub fn move_to_end(&mut self, text: &str) {
        self.cursor = text.len();
    }

    pub fn insert(&mut self, text: &mut String, c: char) {
        self.clamp(text);
        text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_str(&mut self, text: &mut String, s: &str) {
        self.clamp(text);
        text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// Delete the char before the cursor
    pub fn backspace(&mut self, text: &mut String) {
        self.clamp(text);
        if let Some(c) = text[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
            text.remove(self.cursor);
        }
    }

    /// Delete the char under the cursor
    pub fn delete(&mut self, text: &mut String) {
        self.clamp(text);
        if self.cursor < text.len() {
            text.remove(self.cursor);
        }
    }

    pub fn left(&mut self, text: &str) {
        self.clamp(text);
        if let Some(c) = text[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    pub fn right(&mut self, text: &str) {
        self.clamp(text);
        if let Some(c) = text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Start of the current line
    pub fn home(&mut self, text: &str) {
        self.clamp(text);
        self.cursor = line_start(text, self.cursor);
    }

    /// End of the current line
    pub fn end(&mut self, text: &str) {
        self.clamp(text);
        self.cursor = line_end(text, self.cursor);
    }

    pub fn up(&mut self, text: &str) {
        self.clamp(text);
        let start = line_start(text, self.cursor);
        if start == 0 {
            return;
        }
        let column = text[start..self.cursor].chars().count();
        let prev_start = line_start(text, start - 1);
        self.cursor = offset_at_column(text, prev_start, column);
    }

    pub fn down(&mut self, text: &str) {
        self.clamp(text);
        let end = line_end(text, self.cursor);
        if end == text.len() {
            return;
        }
        let column = text[line_start(text, self.cursor)..self.cursor].chars().count();
        self.cursor = offset_at_column(text, end + 1, column);
    }
}

fn line_start(text: &str, offset: usize) -> usize {
    text[..offset].rfind('\n').map_or(0, |i| i + 1)
}

fn line_end(text: &str, offset: usize) -> usize {
    text[offset..].find('\n').map_or(text.len(), |i| offset + i)
}

/// Offset of `column` chars into the line starting at `start`, or the line end
fn offset_at_column(text: &str, start: usize, column: usize) -> usize {
    let end = line_end(text, start);
    text[start..end]
        .char_indices()
        .nth(column)
        .map_or(end, |(i, _)| start + i)
}
