use std::io::Write;

use crossterm::{
    cursor,
    event::{KeyCode, KeyEvent, KeyModifiers},
    queue,
    style::{Print, PrintStyledContent, Stylize},
};

use crate::{actions::Action, components::TUIComponent, javitor::TermSize};

/// Single-line editable text with its own cursor (char index).
#[derive(Debug, Default, Clone)]
pub struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = single_line(&value.into());
        let cursor = value.chars().count();

        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        *self = Self::with_value(value);
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Returns true when the key edited or moved inside the field.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        let len = self.value.chars().count();

        match (event.modifiers, event.code) {
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
            }
            (KeyModifiers::NONE, KeyCode::Backspace) if self.cursor > 0 => {
                let at = self.byte_index(self.cursor - 1);
                self.value.remove(at);
                self.cursor -= 1;
            }
            (KeyModifiers::NONE, KeyCode::Delete) if self.cursor < len => {
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
            }
            (KeyModifiers::NONE, KeyCode::Left) => self.cursor = self.cursor.saturating_sub(1),
            (KeyModifiers::NONE, KeyCode::Right) => self.cursor = (self.cursor + 1).min(len),
            (KeyModifiers::NONE, KeyCode::Home) => self.cursor = 0,
            (KeyModifiers::NONE, KeyCode::End) => self.cursor = len,
            (KeyModifiers::NONE, KeyCode::Backspace | KeyCode::Delete) => {}
            _ => return false,
        }

        true
    }

    pub fn insert_str(&mut self, text: &str) {
        let at = self.byte_index(self.cursor);
        let clean = single_line(text);

        self.value.insert_str(at, &clean);
        self.cursor += clean.chars().count();
    }

    /// The visible part of the field for a box `width` cells wide, and the cursor column in it.
    pub fn visible(&self, width: usize) -> (String, usize) {
        let width = width.max(1);
        let skip = (self.cursor + 1).saturating_sub(width);
        let shown: String = self.value.chars().skip(skip).take(width).collect();

        (shown, self.cursor - skip)
    }
}

fn single_line(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

/// Frame geometry of a centered dialog box.
pub struct BoxFrame {
    pub x: u16,
    pub y: u16,
    pub width: u16,
}

/// Draws a centered, bordered box with `title` and `lines`, returning its frame.
pub fn draw_box<W: Write>(
    w: &mut W,
    window_size: TermSize,
    title: &str,
    lines: &[String],
) -> anyhow::Result<BoxFrame> {
    let content_width = lines
        .iter()
        .map(|line| line.chars().count())
        .chain(std::iter::once(title.chars().count() + 2))
        .max()
        .unwrap_or(0);
    let inner = content_width
        .max(20)
        .min(window_size.width.saturating_sub(4).max(1));
    let width = inner + 4;
    let height = lines.len() + 2;

    let x = window_size.width.saturating_sub(width) / 2;
    let y = window_size.height.saturating_sub(height) / 2;
    let (x, y): (u16, u16) = (x.try_into()?, y.try_into()?);

    let title: String = title.chars().take(inner).collect();
    let top_fill = "─".repeat(inner + 2 - title.chars().count());

    queue!(
        w,
        cursor::MoveTo(x, y),
        Print("┌"),
        PrintStyledContent(title.bold()),
        Print(format!("{top_fill}┐"))
    )?;

    for (i, line) in lines.iter().enumerate() {
        let line: String = line.chars().take(inner).collect();
        let pad = inner - line.chars().count();

        queue!(
            w,
            cursor::MoveTo(x, y + 1 + i as u16),
            Print(format!("│ {line}{} │", " ".repeat(pad)))
        )?;
    }

    queue!(
        w,
        cursor::MoveTo(x, y + 1 + lines.len() as u16),
        Print(format!("└{}┘", "─".repeat(inner + 2)))
    )?;

    Ok(BoxFrame {
        x,
        y,
        width: width.try_into()?,
    })
}

/// Informational or error box; any key dismisses it.
pub struct MessageBox {
    pub title: String,
    pub body: String,
}

impl MessageBox {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

impl TUIComponent for MessageBox {
    fn render<W: Write>(&mut self, w: &mut W, window_size: TermSize) -> anyhow::Result<()> {
        let mut lines: Vec<String> = self.body.lines().map(str::to_string).collect();
        lines.push(String::new());
        lines.push("[ OK ]".to_string());

        draw_box(w, window_size, &self.title, &lines)?;

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAnswer {
    Yes,
    No,
    Cancel,
}

/// Yes / No / Cancel question guarding `then`.
pub struct ConfirmBox {
    pub title: String,
    pub body: String,
    pub then: Action,
}

impl ConfirmBox {
    pub fn answer(event: &KeyEvent) -> Option<ConfirmAnswer> {
        match event.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(ConfirmAnswer::Yes),
            KeyCode::Char('n' | 'N') => Some(ConfirmAnswer::No),
            KeyCode::Char('c' | 'C') | KeyCode::Esc => Some(ConfirmAnswer::Cancel),
            _ => None,
        }
    }
}

impl TUIComponent for ConfirmBox {
    fn render<W: Write>(&mut self, w: &mut W, window_size: TermSize) -> anyhow::Result<()> {
        let lines = vec![
            self.body.clone(),
            String::new(),
            "[Y]es   [N]o   [C]ancel".to_string(),
        ];

        draw_box(w, window_size, &self.title, &lines)?;

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPurpose {
    Open,
    /// Save under a new name, then carry on with the interrupted action.
    SaveAs { then: Option<Action> },
}

/// Asks for a file path; stands in for a file chooser.
pub struct PromptBox {
    pub title: String,
    pub purpose: PromptPurpose,
    pub field: TextField,
    cursor: (u16, u16),
}

impl PromptBox {
    pub fn new(title: impl Into<String>, purpose: PromptPurpose, initial: &str) -> Self {
        Self {
            title: title.into(),
            purpose,
            field: TextField::with_value(initial),
            cursor: (0, 0),
        }
    }

    /// Screen position of the text cursor as of the last render.
    pub fn cursor(&self) -> (u16, u16) {
        self.cursor
    }
}

impl TUIComponent for PromptBox {
    fn render<W: Write>(&mut self, w: &mut W, window_size: TermSize) -> anyhow::Result<()> {
        let field_width = window_size.width.saturating_sub(8).clamp(1, 60);
        let (shown, cursor_column) = self.field.visible(field_width);

        let lines = vec![
            "Path:".to_string(),
            format!("{shown:<field_width$}"),
            String::new(),
            "Enter: OK   Esc: Cancel".to_string(),
        ];

        let frame = draw_box(w, window_size, &self.title, &lines)?;
        self.cursor = (frame.x + 2 + cursor_column as u16, frame.y + 2);

        Ok(())
    }
}
