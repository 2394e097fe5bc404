use std::io::Write;

use crossterm::{cursor, queue, style::PrintStyledContent, style::Stylize};

use crate::{components::TUIComponent, core::Document, javitor::TermSize};

/// Bottom row: file name, type, line count, a transient message and the cursor position.
pub struct StatusBar {
    pub row: u16,
    file_name: String,
    dirty: bool,
    file_type: String,
    line_count: usize,
    cursor: (usize, usize),
    message: Option<String>,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self {
            row: 0,
            file_name: crate::core::document::UNTITLED.to_string(),
            dirty: false,
            file_type: crate::core::document::DEFAULT_FILE_TYPE.to_string(),
            line_count: 0,
            cursor: (0, 0),
            message: None,
        }
    }
}

impl TUIComponent for StatusBar {
    fn render<W: Write>(&mut self, w: &mut W, window_size: TermSize) -> anyhow::Result<()> {
        let line = fit(&self.left_text(), &self.right_text(), window_size.width);

        queue!(w, cursor::MoveTo(0, self.row), PrintStyledContent(line.reverse()))?;

        Ok(())
    }
}

/// Lays `left` and `right` out on a `width`-wide line, truncating `left` first.
pub fn fit(left: &str, right: &str, width: usize) -> String {
    let right_len = right.chars().count();

    if right_len >= width {
        return right.chars().take(width).collect();
    }

    let room = width - right_len;
    let left: String = left.chars().take(room.saturating_sub(1)).collect();
    let gap = width - left.chars().count() - right_len;

    format!("{left}{}{right}", " ".repeat(gap))
}

impl StatusBar {
    pub fn update_status(&mut self, document: &Document, cursor: (usize, usize)) {
        self.file_name = document.display_name();
        self.dirty = document.is_modified();
        self.file_type = document.file_type();
        self.line_count = document.line_count();
        self.cursor = cursor;
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn left_text(&self) -> String {
        let prefix = if self.dirty { "*" } else { "" };
        let mut text = format!(
            " File: {prefix}{} | Type: {} | Lines: {}",
            self.file_name, self.file_type, self.line_count
        );

        if let Some(message) = &self.message {
            text.push_str(" | ");
            text.push_str(message);
        }

        text
    }

    pub fn right_text(&self) -> String {
        format!("Ln {}, Col {} ", self.cursor.1 + 1, self.cursor.0 + 1)
    }
}
