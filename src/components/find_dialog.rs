use std::{io::Write, ops::Range};

use crossterm::{
    cursor,
    event::{KeyCode, KeyEvent, KeyModifiers},
    queue,
    style::{PrintStyledContent, Stylize},
};
use tracing::{debug, info};

use crate::{
    components::{
        dialog::{draw_box, TextField},
        text_block::TextBlock,
        TUIComponent,
    },
    core::{Edit, Matcher},
    javitor::TermSize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindCommand {
    Find,
    FindNext,
    Replace,
    ReplaceAll,
    Cancel,
}

const BUTTONS: [(&str, FindCommand); 5] = [
    ("Find", FindCommand::Find),
    ("Find Next", FindCommand::FindNext),
    ("Replace", FindCommand::Replace),
    ("Replace All", FindCommand::ReplaceAll),
    ("Cancel", FindCommand::Cancel),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    FindField,
    ReplaceField,
    Button(usize),
}

#[derive(Debug, PartialEq, Eq)]
pub enum FindOutcome {
    Found(Range<usize>),
    NotFound(String),
    Replaced(usize),
    NeedText,
}

/// Find / replace dialog state. The remembered `start_index` drives the
/// cyclic Find Next and survives hiding the dialog.
pub struct FindDialog {
    pub visible: bool,
    pub find: TextField,
    pub replace: TextField,
    pub focus: Focus,
    pub start_index: usize,
    cursor: (u16, u16),
}

impl Default for FindDialog {
    fn default() -> Self {
        Self {
            visible: false,
            find: TextField::default(),
            replace: TextField::default(),
            focus: Focus::FindField,
            start_index: 0,
            cursor: (0, 0),
        }
    }
}

impl TUIComponent for FindDialog {
    fn render<W: Write>(&mut self, w: &mut W, window_size: TermSize) -> anyhow::Result<()> {
        const LABEL_WIDTH: usize = 9;
        let field_width = window_size.width.saturating_sub(LABEL_WIDTH + 8).clamp(1, 40);

        let (find_shown, find_cursor) = self.find.visible(field_width);
        let (replace_shown, replace_cursor) = self.replace.visible(field_width);

        let buttons: String = BUTTONS
            .iter()
            .map(|(label, _)| format!("[{label}] "))
            .collect();

        let lines = vec![
            format!("{:<LABEL_WIDTH$}{find_shown:<field_width$}", "Find"),
            format!("{:<LABEL_WIDTH$}{replace_shown:<field_width$}", "Replace"),
            String::new(),
            buttons.trim_end().to_string(),
        ];

        let frame = draw_box(w, window_size, "Find", &lines)?;
        let field_x = frame.x + 2 + LABEL_WIDTH as u16;

        if let Focus::Button(index) = self.focus {
            let offset: usize = BUTTONS[..index]
                .iter()
                .map(|(label, _)| label.chars().count() + 3)
                .sum();
            let (label, _) = BUTTONS[index];

            queue!(
                w,
                cursor::MoveTo(frame.x + 2 + offset as u16, frame.y + 4),
                PrintStyledContent(format!("[{label}]").reverse())
            )?;
        }

        self.cursor = match self.focus {
            Focus::FindField => (field_x + find_cursor as u16, frame.y + 1),
            Focus::ReplaceField => (field_x + replace_cursor as u16, frame.y + 2),
            Focus::Button(_) => (frame.x + frame.width - 2, frame.y + 4),
        };

        Ok(())
    }
}

impl FindDialog {
    /// Shows the dialog, or just focuses it when it is already open.
    pub fn show(&mut self) {
        if !self.visible {
            self.visible = true;
            self.focus = Focus::FindField;
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn cursor(&self) -> Option<(u16, u16)> {
        match self.focus {
            Focus::Button(_) => None,
            _ => Some(self.cursor),
        }
    }

    fn focused_field(&mut self) -> Option<&mut TextField> {
        match self.focus {
            Focus::FindField => Some(&mut self.find),
            Focus::ReplaceField => Some(&mut self.replace),
            Focus::Button(_) => None,
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        const STOPS: usize = BUTTONS.len() + 2;

        let index = match self.focus {
            Focus::FindField => 0,
            Focus::ReplaceField => 1,
            Focus::Button(i) => i + 2,
        };
        let next = if forward {
            (index + 1) % STOPS
        } else {
            (index + STOPS - 1) % STOPS
        };

        self.focus = match next {
            0 => Focus::FindField,
            1 => Focus::ReplaceField,
            i => Focus::Button(i - 2),
        };
    }

    pub fn paste(&mut self, text: &str) {
        if let Some(field) = self.focused_field() {
            field.insert_str(text);
        }
    }

    /// Routes a key press; returns the command it triggers, if any.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Option<FindCommand> {
        match (event.modifiers, event.code) {
            (_, KeyCode::Esc) => return Some(FindCommand::Cancel),
            (KeyModifiers::NONE, KeyCode::Tab) | (KeyModifiers::NONE, KeyCode::Down) => {
                self.cycle_focus(true);
                return None;
            }
            (_, KeyCode::BackTab) | (KeyModifiers::NONE, KeyCode::Up) => {
                self.cycle_focus(false);
                return None;
            }
            (KeyModifiers::ALT, KeyCode::Char(c)) => {
                return match c.to_ascii_lowercase() {
                    'f' => Some(FindCommand::Find),
                    'n' => Some(FindCommand::FindNext),
                    'r' => Some(FindCommand::Replace),
                    'a' => Some(FindCommand::ReplaceAll),
                    _ => None,
                };
            }
            (_, KeyCode::Enter) => {
                return Some(match self.focus {
                    Focus::FindField => FindCommand::FindNext,
                    Focus::ReplaceField => FindCommand::Replace,
                    Focus::Button(i) => BUTTONS[i].1,
                });
            }
            _ => {}
        }

        match self.focus {
            Focus::Button(_) => {
                match event.code {
                    KeyCode::Left => self.cycle_focus(false),
                    KeyCode::Right => self.cycle_focus(true),
                    _ => {}
                }
                None
            }
            _ => {
                if let Some(field) = self.focused_field() {
                    field.handle_key(event);
                }
                None
            }
        }
    }

    /// Runs `command` against the text block.
    pub fn execute(
        &mut self,
        command: FindCommand,
        text_block: &mut TextBlock,
    ) -> anyhow::Result<Option<FindOutcome>> {
        Ok(Some(match command {
            FindCommand::Find => self.find(text_block)?,
            FindCommand::FindNext => self.find_next(text_block)?,
            FindCommand::Replace => self.replace(text_block)?,
            FindCommand::ReplaceAll => self.replace_all(text_block)?,
            FindCommand::Cancel => {
                self.hide();
                return Ok(None);
            }
        }))
    }

    /// First occurrence from the top of the document.
    pub fn find(&mut self, text_block: &mut TextBlock) -> anyhow::Result<FindOutcome> {
        let needle = self.find.value().to_string();

        if needle.is_empty() {
            self.focus = Focus::FindField;
            return Ok(FindOutcome::NeedText);
        }

        let matcher = Matcher::new(&needle)?;
        let content = text_block.document.get_content();

        let Some(found) = matcher.find_from(content, 0) else {
            self.start_index = 0;
            debug!(%needle, "find: no match");
            return Ok(FindOutcome::NotFound(needle));
        };

        self.remember(&matcher, text_block, &found);
        text_block.select(found.clone())?;

        Ok(FindOutcome::Found(found))
    }

    /// Next occurrence after `start_index`, wrapping to the top when the end is reached.
    pub fn find_next(&mut self, text_block: &mut TextBlock) -> anyhow::Result<FindOutcome> {
        if self.find.value().is_empty() {
            // Search for the selected text, continuing after it. A multi-line
            // selection cannot go into the single-line find field.
            let selected = text_block
                .selected_text()
                .filter(|selected| !selected.contains(['\n', '\r']));

            if let (Some(range), Some(selected)) = (text_block.selection_range(), selected) {
                self.find.set_value(selected);
                self.start_index = range.end;
            }
        }

        let needle = self.find.value().to_string();

        if needle.is_empty() {
            self.show();
            self.focus = Focus::FindField;
            return Ok(FindOutcome::NeedText);
        }

        let matcher = Matcher::new(&needle)?;
        let content = text_block.document.get_content();

        let found = matcher
            .find_from(content, self.start_index)
            .or_else(|| matcher.find_from(content, 0));

        let Some(found) = found else {
            debug!(%needle, "find next: no match");
            return Ok(FindOutcome::NotFound(needle));
        };

        self.remember(&matcher, text_block, &found);
        text_block.select(found.clone())?;

        Ok(FindOutcome::Found(found))
    }

    fn remember(&mut self, matcher: &Matcher, text_block: &TextBlock, found: &Range<usize>) {
        let last = matcher.find_last(text_block.document.get_content());

        self.start_index = if last.is_some_and(|last| last.start == found.start) {
            0
        } else {
            found.end
        };
    }

    /// Replaces the selection when it is a match, otherwise the next match.
    pub fn replace(&mut self, text_block: &mut TextBlock) -> anyhow::Result<FindOutcome> {
        let needle = self.find.value().to_string();

        if needle.is_empty() {
            self.focus = Focus::FindField;
            return Ok(FindOutcome::NeedText);
        }

        let matcher = Matcher::new(&needle)?;

        let range = match (text_block.selection_range(), text_block.selected_text()) {
            (Some(range), Some(selected)) if matcher.is_match_exact(&selected) => range,
            _ => match self.find_next(text_block)? {
                FindOutcome::Found(range) => range,
                other => return Ok(other),
            },
        };

        let replacement = self.replace.value().to_string();
        text_block.replace_range(range.clone(), &replacement)?;

        let end = range.start + replacement.chars().count();
        self.start_index = if self.start_index == 0 { 0 } else { end };

        info!(%needle, %replacement, at = range.start, "replaced occurrence");

        Ok(FindOutcome::Replaced(1))
    }

    /// Replaces every occurrence as one undoable edit.
    pub fn replace_all(&mut self, text_block: &mut TextBlock) -> anyhow::Result<FindOutcome> {
        let needle = self.find.value().to_string();

        if needle.is_empty() {
            self.focus = Focus::FindField;
            return Ok(FindOutcome::NeedText);
        }

        let matcher = Matcher::new(&needle)?;
        let original = text_block.document.get_content().to_string();
        let (replaced, count) = matcher.replace_all(&original, self.replace.value());

        if count == 0 {
            return Ok(FindOutcome::NotFound(needle));
        }

        let cursor = text_block.cursor_char_index()?;

        text_block.document.apply(Edit::replace(0, original, replaced))?;
        text_block.anchor = None;
        text_block.set_cursor_char_index(cursor)?;
        self.start_index = 0;

        info!(%needle, count, "replaced all occurrences");

        Ok(FindOutcome::Replaced(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{components::gutter::Gutter, core::Document};

    fn block(text: &str) -> TextBlock {
        let mut document = Document::new();
        document.apply(Edit::insert(0, text)).unwrap();

        TextBlock::new(document, (80, 20), (0, 2), Gutter::new(true), 4)
    }

    fn dialog(find: &str, replace: &str) -> FindDialog {
        let mut dialog = FindDialog::default();
        dialog.find.set_value(find);
        dialog.replace.set_value(replace);
        dialog
    }

    fn text(block: &TextBlock) -> String {
        block.document.get_content().to_string()
    }

    #[test]
    fn find_selects_first_occurrence() {
        let mut block = block("one Two two TWO");
        let mut dialog = dialog("two", "");

        assert_eq!(dialog.find(&mut block).unwrap(), FindOutcome::Found(4..7));
        assert_eq!(block.selected_text().as_deref(), Some("Two"));
        assert_eq!(dialog.start_index, 7);

        assert_eq!(dialog.find(&mut block).unwrap(), FindOutcome::Found(4..7));
    }

    #[test]
    fn find_next_cycles_and_wraps() {
        let mut block = block("ab ab ab");
        let mut dialog = dialog("AB", "");

        assert_eq!(dialog.find_next(&mut block).unwrap(), FindOutcome::Found(0..2));
        assert_eq!(dialog.find_next(&mut block).unwrap(), FindOutcome::Found(3..5));
        assert_eq!(dialog.find_next(&mut block).unwrap(), FindOutcome::Found(6..8));
        assert_eq!(dialog.start_index, 0);
        assert_eq!(dialog.find_next(&mut block).unwrap(), FindOutcome::Found(0..2));
    }

    #[test]
    fn find_next_wraps_when_start_index_is_stale() {
        let mut block = block("xx ab");
        let mut dialog = dialog("ab", "");
        dialog.start_index = 4;

        assert_eq!(dialog.find_next(&mut block).unwrap(), FindOutcome::Found(3..5));
    }

    #[test]
    fn find_reports_missing_text() {
        let mut block = block("hello");
        let mut dialog = dialog("bye", "");
        dialog.start_index = 3;

        assert_eq!(
            dialog.find(&mut block).unwrap(),
            FindOutcome::NotFound("bye".to_string())
        );
        assert_eq!(dialog.start_index, 0);
        assert_eq!(
            dialog.find_next(&mut block).unwrap(),
            FindOutcome::NotFound("bye".to_string())
        );
    }

    #[test]
    fn find_next_falls_back_to_selection() {
        let mut block = block("cat dog cat");
        block.select(0..3).unwrap();
        let mut dialog = FindDialog::default();

        assert_eq!(dialog.find_next(&mut block).unwrap(), FindOutcome::Found(8..11));
        assert_eq!(dialog.find.value(), "cat");
    }

    #[test]
    fn multi_line_selection_is_not_used_as_needle() {
        let mut block = block("cat\ndog cat\ndog");
        block.select(0..7).unwrap();
        let mut dialog = FindDialog::default();

        assert_eq!(dialog.find_next(&mut block).unwrap(), FindOutcome::NeedText);
        assert_eq!(dialog.find.value(), "");
        assert_eq!(block.selection_range(), Some(0..7));
    }

    #[test]
    fn empty_needle_asks_for_text() {
        let mut block = block("text");
        let mut dialog = FindDialog::default();
        dialog.focus = Focus::Button(2);

        assert_eq!(dialog.find_next(&mut block).unwrap(), FindOutcome::NeedText);
        assert!(dialog.visible);
        assert_eq!(dialog.focus, Focus::FindField);
        assert_eq!(dialog.replace_all(&mut block).unwrap(), FindOutcome::NeedText);
    }

    #[test]
    fn replace_walks_through_matches() {
        let mut block = block("a-a-a");
        let mut dialog = dialog("a", "bb");

        assert_eq!(dialog.replace(&mut block).unwrap(), FindOutcome::Replaced(1));
        assert_eq!(text(&block), "bb-a-a");

        assert_eq!(dialog.replace(&mut block).unwrap(), FindOutcome::Replaced(1));
        assert_eq!(text(&block), "bb-bb-a");

        assert_eq!(dialog.replace(&mut block).unwrap(), FindOutcome::Replaced(1));
        assert_eq!(text(&block), "bb-bb-bb");

        assert_eq!(
            dialog.replace(&mut block).unwrap(),
            FindOutcome::NotFound("a".to_string())
        );
    }

    #[test]
    fn replace_uses_current_selection() {
        let mut block = block("foo foo");
        block.select(4..7).unwrap();
        let mut dialog = dialog("FOO", "bar");

        dialog.replace(&mut block).unwrap();

        assert_eq!(text(&block), "foo bar");
    }

    #[test]
    fn replace_all_preserves_other_text_and_undoes_at_once() {
        let mut block = block("Hello WORLD, hello world");
        let mut dialog = dialog("world", "There");

        assert_eq!(dialog.replace_all(&mut block).unwrap(), FindOutcome::Replaced(2));
        assert_eq!(text(&block), "Hello There, hello There");

        assert!(block.undo().unwrap());
        assert_eq!(text(&block), "Hello WORLD, hello world");
    }

    #[test]
    fn keys_drive_focus_and_commands() {
        let mut dialog = FindDialog::default();
        dialog.show();

        for c in "abc".chars() {
            dialog.handle_key(&KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        assert_eq!(dialog.find.value(), "abc");
        assert_eq!(
            dialog.handle_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            Some(FindCommand::FindNext)
        );

        dialog.handle_key(&KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        dialog.handle_key(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(dialog.replace.value(), "x");

        dialog.handle_key(&KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        dialog.handle_key(&KeyEvent::new(KeyCode::Right, KeyModifiers::NONE));
        dialog.handle_key(&KeyEvent::new(KeyCode::Right, KeyModifiers::NONE));
        dialog.handle_key(&KeyEvent::new(KeyCode::Right, KeyModifiers::NONE));
        assert_eq!(
            dialog.handle_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            Some(FindCommand::ReplaceAll)
        );
        assert_eq!(
            dialog.handle_key(&KeyEvent::new(KeyCode::Char('r'), KeyModifiers::ALT)),
            Some(FindCommand::Replace)
        );
        assert_eq!(
            dialog.handle_key(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Some(FindCommand::Cancel)
        );
    }

    #[test]
    fn cancel_hides_but_keeps_state() {
        let mut block = block("abc");
        let mut dialog = dialog("b", "");
        dialog.show();
        dialog.start_index = 2;

        assert_eq!(dialog.execute(FindCommand::Cancel, &mut block).unwrap(), None);
        assert!(!dialog.visible);

        dialog.show();
        assert_eq!(dialog.find.value(), "b");
        assert_eq!(dialog.start_index, 2);
    }
}
