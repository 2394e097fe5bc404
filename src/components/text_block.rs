use std::{io::Write, ops::Range};

use crossterm::{
    cursor,
    event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::{Print, PrintStyledContent, Stylize},
    terminal::{Clear, ClearType},
};
use once_cell::sync::Lazy;
use ropey::Rope;

use crate::{
    components::{gutter::Gutter, TUIComponent},
    core::{
        coords::{Coords, TermScreenCoords},
        Document, Edit,
    },
    javitor::TermSize,
};

static WORD_REGEX: Lazy<regex::Regex> = Lazy::new(|| regex::Regex::new(r"\w+|[^\w\s]+").unwrap());

pub enum TextBlockEvent {
    Char(char),
    NewLine,
    Delete,
    DeleteForward,
    Paste(String),
}

/// The editing surface: owns the document, a cursor, an optional selection
/// anchor and the scroll offset.
///
/// `cursor.x` is allowed to run past the end of the current line so vertical
/// moves keep their column; [`TextBlock::get_cursor_pos`] clamps it.
pub struct TextBlock {
    pub position: TermScreenCoords,
    pub document: Document,
    pub offset: Coords,
    pub size: Coords,
    pub cursor: Coords,
    pub anchor: Option<usize>,
    pub gutter: Gutter,
    pub tab_width: usize,
}

impl TUIComponent for TextBlock {
    fn render<W: Write>(&mut self, w: &mut W, window_size: TermSize) -> anyhow::Result<()> {
        self.scroll(window_size)?;

        let (effective_width, effective_height) = self.get_effective_size(window_size)?;
        let text_width = (effective_width as usize).saturating_sub(self.gutter_width());
        let selection = self.selection_range();
        let content = self.document.get_content();
        let line_count = content.len_lines();
        let gutter_digits = self.gutter.digits(line_count);

        for row in 0..effective_height {
            let y = self.offset.y + row as usize;

            queue!(w, cursor::MoveTo(self.position.x, self.position.y + row))?;

            if y >= line_count {
                self.gutter.render_blank(w, gutter_digits)?;
                queue!(w, Clear(ClearType::UntilNewLine))?;
                continue;
            }

            self.gutter.render_number(w, y + 1, gutter_digits)?;

            let line_start = content.line_to_char(y);
            let len = line_len(content, y);
            let mut run = String::new();
            let mut run_selected = false;
            let mut col = 0;

            for (i, ch) in content.line(y).chars().take(len).enumerate() {
                if col >= self.offset.x + text_width {
                    break;
                }

                let width = self.char_width(ch, col);
                let selected = selection
                    .as_ref()
                    .is_some_and(|range| range.contains(&(line_start + i)));
                let shown = match ch {
                    '\t' => ' ',
                    c if c.is_control() => '?',
                    c => c,
                };

                for cell in col..col + width {
                    if cell < self.offset.x || cell >= self.offset.x + text_width {
                        continue;
                    }

                    if selected != run_selected && !run.is_empty() {
                        print_run(w, &run, run_selected)?;
                        run.clear();
                    }

                    run_selected = selected;
                    run.push(shown);
                }

                col += width;
            }

            print_run(w, &run, run_selected)?;
            queue!(w, Clear(ClearType::UntilNewLine))?;
        }

        Ok(())
    }
}

fn print_run<W: Write>(w: &mut W, run: &str, selected: bool) -> anyhow::Result<()> {
    if run.is_empty() {
        return Ok(());
    }

    if selected {
        queue!(w, PrintStyledContent(run.reverse()))?;
    } else {
        queue!(w, Print(run))?;
    }

    Ok(())
}

/// Char length of line `index` without its line terminator.
fn line_len(content: &Rope, index: usize) -> usize {
    let line = content.line(index);
    let mut len = line.len_chars();

    if len > 0 && line.char(len - 1) == '\n' {
        len -= 1;
    }
    if len > 0 && line.char(len - 1) == '\r' {
        len -= 1;
    }

    len
}

impl TextBlock {
    pub fn new(
        document: Document,
        size: (usize, usize),
        position: (u16, u16),
        gutter: Gutter,
        tab_width: usize,
    ) -> TextBlock {
        TextBlock {
            document,
            size: size.into(),
            offset: (0, 0).into(),
            position: position.into(),
            cursor: (0, 0).into(),
            anchor: None,
            gutter,
            tab_width: tab_width.max(1),
        }
    }

    /// Puts the cursor back at the top after the document was replaced.
    pub fn reset_view(&mut self) {
        self.cursor = (0, 0).into();
        self.offset = (0, 0).into();
        self.anchor = None;
    }

    pub fn gutter_width(&self) -> usize {
        self.gutter.width(self.document.line_count())
    }

    fn char_width(&self, ch: char, col: usize) -> usize {
        if ch == '\t' {
            self.tab_width - col % self.tab_width
        } else {
            1
        }
    }

    /// Display column of char column `x` on line `y`, with tabs expanded.
    fn visual_col(&self, y: usize, x: usize) -> usize {
        let content = self.document.get_content();
        let mut col = 0;

        for ch in content.line(y).chars().take(x) {
            col += self.char_width(ch, col);
        }

        col
    }

    /// Inverse of [`TextBlock::visual_col`]: the char column covering display column `target`.
    fn char_col_at(&self, y: usize, target: usize) -> usize {
        let content = self.document.get_content();
        let len = line_len(content, y);
        let mut col = 0;

        for (i, ch) in content.line(y).chars().take(len).enumerate() {
            let width = self.char_width(ch, col);
            if target < col + width {
                return i;
            }
            col += width;
        }

        len
    }

    pub fn get_cursor_term_pos(&self) -> anyhow::Result<(u16, u16)> {
        let (x, y) = self.get_cursor_pos()?;
        let col = self.visual_col(y, x);

        let x = col.saturating_sub(self.offset.x) + self.gutter_width() + self.position.x as usize;
        let y = y.saturating_sub(self.offset.y) + self.position.y as usize;

        Ok((x.try_into()?, y.try_into()?))
    }

    pub fn scroll(&mut self, window_size: TermSize) -> anyhow::Result<()> {
        let (window_width, window_height) = self.get_effective_size(window_size)?;
        let text_width = (window_width as usize)
            .saturating_sub(self.gutter_width())
            .max(1);
        let window_height = (window_height as usize).max(1);

        let (x, y) = self.get_cursor_pos()?;

        if y < self.offset.y {
            self.offset.y = y;
        }
        if y >= self.offset.y + window_height {
            self.offset.y = y + 1 - window_height;
        }

        let col = self.visual_col(y, x);

        if col < self.offset.x {
            self.offset.x = col;
        }
        if col >= self.offset.x + text_width {
            self.offset.x = col + 1 - text_width;
        }

        Ok(())
    }

    pub fn get_effective_size(&self, window_size: TermSize) -> anyhow::Result<(u16, u16)> {
        let effective_width = (self.size.x + self.position.x as usize)
            .min(window_size.width)
            .saturating_sub(self.position.x as usize);
        let effective_height = (self.size.y + self.position.y as usize)
            .min(window_size.height)
            .saturating_sub(self.position.y as usize);

        Ok((effective_width.try_into()?, effective_height.try_into()?))
    }

    pub fn update(&mut self, event: &Event) -> anyhow::Result<Option<TextBlockEvent>> {
        Ok(match event {
            Event::Key(event) if event.kind != KeyEventKind::Release => self.handle_key(event)?,
            Event::Paste(data) => Some(TextBlockEvent::Paste(data.clone())),
            _ => None,
        })
    }

    /// Applies an editing event produced by [`TextBlock::update`].
    pub fn apply_event(&mut self, event: TextBlockEvent) -> anyhow::Result<()> {
        match event {
            TextBlockEvent::Char(c) => self.insert_text(&c.to_string()),
            TextBlockEvent::NewLine => self.insert_text("\n"),
            TextBlockEvent::Paste(data) => self.insert_text(&data),
            TextBlockEvent::Delete => self.delete(),
            TextBlockEvent::DeleteForward => self.delete_forward(),
        }
    }

    fn line_count(&self) -> usize {
        self.document.get_content().len_lines()
    }

    fn get_line_len(&self, index: usize) -> anyhow::Result<usize> {
        if index >= self.line_count() {
            anyhow::bail!("No line at index {}", index);
        }

        Ok(line_len(self.document.get_content(), index))
    }

    fn goto_line(&mut self, line_number: usize) {
        let lines_len = self.line_count();

        self.cursor.y = line_number.min(lines_len.saturating_sub(1));
    }

    fn line_string(&self, index: usize) -> String {
        let content = self.document.get_content();
        let len = line_len(content, index);

        content.line(index).slice(..len).to_string()
    }

    fn get_prev_word_start(&self, line_number: usize, before: usize) -> Option<usize> {
        let line = self.line_string(line_number);

        WORD_REGEX
            .find_iter(&line)
            .map(|m| line[..m.start()].chars().count())
            .filter(|&start| start < before)
            .last()
    }

    fn get_next_word_start(&self, line_number: usize, after: usize) -> Option<usize> {
        let line = self.line_string(line_number);

        WORD_REGEX
            .find_iter(&line)
            .map(|m| line[..m.start()].chars().count())
            .find(|&start| start > after)
    }

    fn handle_key(&mut self, event: &KeyEvent) -> anyhow::Result<Option<TextBlockEvent>> {
        let shift = event.modifiers.contains(KeyModifiers::SHIFT);
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);

        let is_movement = matches!(
            event.code,
            KeyCode::Left
                | KeyCode::Right
                | KeyCode::Up
                | KeyCode::Down
                | KeyCode::Home
                | KeyCode::End
                | KeyCode::PageUp
                | KeyCode::PageDown
        );

        if is_movement {
            if shift && self.anchor.is_none() {
                self.anchor = Some(self.cursor_char_index()?);
            } else if !shift {
                self.anchor = None;
            }

            self.move_cursor(event.code, ctrl)?;
            return Ok(None);
        }

        Ok(match (event.modifiers, event.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('a')) => {
                self.select(0..self.document.get_content().len_chars())?;
                None
            }
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                Some(TextBlockEvent::Char(c))
            }
            (KeyModifiers::NONE, KeyCode::Tab) => Some(TextBlockEvent::Char('\t')),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Enter) => {
                Some(TextBlockEvent::NewLine)
            }
            (KeyModifiers::NONE, KeyCode::Backspace) => Some(TextBlockEvent::Delete),
            (KeyModifiers::NONE, KeyCode::Delete) => Some(TextBlockEvent::DeleteForward),
            (KeyModifiers::NONE, KeyCode::Esc) => {
                self.anchor = None;
                None
            }
            _ => None,
        })
    }

    fn move_cursor(&mut self, code: KeyCode, ctrl: bool) -> anyhow::Result<()> {
        let (x, y) = self.get_cursor_pos()?;
        let last_line = self.line_count().saturating_sub(1);
        let page = self.size.y.max(1);

        match (code, ctrl) {
            (KeyCode::Left, false) => {
                if x > 0 {
                    self.cursor.x = x - 1;
                } else if y > 0 {
                    self.cursor.y = y - 1;
                    self.cursor.x = self.get_line_len(y - 1)?;
                }
            }
            (KeyCode::Right, false) => {
                if x < self.get_line_len(y)? {
                    self.cursor.x = x + 1;
                } else if y < last_line {
                    self.cursor.y = y + 1;
                    self.cursor.x = 0;
                }
            }
            (KeyCode::Left, true) => match self.get_prev_word_start(y, x) {
                Some(start) => self.cursor.x = start,
                None if y > 0 => {
                    let prev_len = self.get_line_len(y - 1)?;
                    self.cursor.y = y - 1;
                    self.cursor.x = self.get_prev_word_start(y - 1, prev_len).unwrap_or(0);
                }
                None => self.cursor.x = 0,
            },
            (KeyCode::Right, true) => match self.get_next_word_start(y, x) {
                Some(start) => self.cursor.x = start,
                None if y < last_line => {
                    self.cursor.y = y + 1;
                    self.cursor.x = if self.line_string(y + 1).starts_with(char::is_whitespace) {
                        self.get_next_word_start(y + 1, 0).unwrap_or(0)
                    } else {
                        0
                    };
                }
                None => self.cursor.x = self.get_line_len(y)?,
            },
            (KeyCode::Up, _) => self.goto_line(y.saturating_sub(1)),
            (KeyCode::Down, _) => self.goto_line(y + 1),
            (KeyCode::PageUp, _) => self.goto_line(y.saturating_sub(page)),
            (KeyCode::PageDown, _) => self.goto_line(y + page),
            (KeyCode::Home, false) => self.cursor.x = 0,
            (KeyCode::End, false) => self.cursor.x = self.get_line_len(y)?,
            (KeyCode::Home, true) => self.cursor = (0, 0).into(),
            (KeyCode::End, true) => {
                self.cursor.y = last_line;
                self.cursor.x = self.get_line_len(last_line)?;
            }
            _ => {}
        };

        Ok(())
    }

    pub fn get_cursor_pos(&self) -> anyhow::Result<(usize, usize)> {
        let y = self.cursor.y.min(self.line_count().saturating_sub(1));
        let x = self.cursor.x.min(self.get_line_len(y)?);

        Ok((x, y))
    }

    pub fn cursor_char_index(&self) -> anyhow::Result<usize> {
        let (x, y) = self.get_cursor_pos()?;

        Ok(self.document.get_content().try_line_to_char(y)? + x)
    }

    pub fn set_cursor_char_index(&mut self, index: usize) -> anyhow::Result<()> {
        let content = self.document.get_content();
        let index = index.min(content.len_chars());
        let y = content.try_char_to_line(index)?;
        let x = index - content.try_line_to_char(y)?;

        self.cursor = (x, y).into();

        Ok(())
    }

    /// Selects `range` (char offsets), leaving the cursor at its end.
    pub fn select(&mut self, range: Range<usize>) -> anyhow::Result<()> {
        self.set_cursor_char_index(range.end)?;
        self.anchor = Some(range.start);

        Ok(())
    }

    pub fn selection_range(&self) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        let cursor = self.cursor_char_index().ok()?;

        match anchor.cmp(&cursor) {
            std::cmp::Ordering::Less => Some(anchor..cursor),
            std::cmp::Ordering::Greater => Some(cursor..anchor),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn selected_text(&self) -> Option<String> {
        let range = self.selection_range()?;

        Some(self.document.get_content().slice(range).to_string())
    }

    /// Replaces `range` with `text` as one undoable edit and puts the cursor after it.
    pub fn replace_range(&mut self, range: Range<usize>, text: &str) -> anyhow::Result<()> {
        let removed = self.document.get_content().get_slice(range.clone());
        let removed = removed
            .ok_or(anyhow::anyhow!("Range {:?} is out of bounds", range))?
            .to_string();

        let edit = Edit::replace(range.start, removed, text);
        let end = edit.end_after_apply();

        self.document.apply(edit)?;
        self.anchor = None;
        self.set_cursor_char_index(end)
    }

    pub fn insert_text(&mut self, text: &str) -> anyhow::Result<()> {
        let range = match self.selection_range() {
            Some(range) => range,
            None => {
                let index = self.cursor_char_index()?;
                index..index
            }
        };

        self.replace_range(range, text)
    }

    pub fn delete(&mut self) -> anyhow::Result<()> {
        if let Some(range) = self.selection_range() {
            return self.replace_range(range, "");
        }

        let index = self.cursor_char_index()?;
        self.anchor = None;

        if index == 0 {
            return Ok(());
        }

        let content = self.document.get_content();
        let start = if index >= 2
            && content.char(index - 1) == '\n'
            && content.char(index - 2) == '\r'
        {
            index - 2
        } else {
            index - 1
        };

        self.replace_range(start..index, "")
    }

    pub fn delete_forward(&mut self) -> anyhow::Result<()> {
        if let Some(range) = self.selection_range() {
            return self.replace_range(range, "");
        }

        let index = self.cursor_char_index()?;
        self.anchor = None;

        let content = self.document.get_content();
        let len = content.len_chars();

        if index >= len {
            return Ok(());
        }

        // A CRLF terminator goes as one unit.
        let end = if index + 1 < len
            && content.char(index) == '\r'
            && content.char(index + 1) == '\n'
        {
            index + 2
        } else {
            index + 1
        };

        self.replace_range(index..end, "")
    }

    pub fn undo(&mut self) -> anyhow::Result<bool> {
        let Some(index) = self.document.undo()? else {
            return Ok(false);
        };

        self.anchor = None;
        self.set_cursor_char_index(index)?;

        Ok(true)
    }

    pub fn redo(&mut self) -> anyhow::Result<bool> {
        let Some(index) = self.document.redo()? else {
            return Ok(false);
        };

        self.anchor = None;
        self.set_cursor_char_index(index)?;

        Ok(true)
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.position.x
            && row >= self.position.y
            && ((column - self.position.x) as usize) < self.size.x
            && ((row - self.position.y) as usize) < self.size.y
    }

    /// Moves the cursor to the char under a mouse click at screen cell (`column`, `row`).
    pub fn click(&mut self, column: u16, row: u16) -> anyhow::Result<()> {
        if !self.contains(column, row) {
            return Ok(());
        }

        self.anchor = None;

        let y = self.offset.y + (row - self.position.y) as usize;
        self.goto_line(y);

        let target = ((column - self.position.x) as usize)
            .saturating_sub(self.gutter_width())
            + self.offset.x;
        self.cursor.x = self.char_col_at(self.cursor.y, target);

        Ok(())
    }
}
