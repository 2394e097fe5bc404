use std::{io::Write, ops::Range};

use crossterm::{
    cursor, queue,
    style::{Print, PrintStyledContent, Stylize},
    terminal::{Clear, ClearType},
};

use crate::{actions::Action, components::TUIComponent, javitor::TermSize};

const LEFT_GROUP: [(&str, Action); 7] = [
    ("New", Action::New),
    ("Open", Action::Open),
    ("Save", Action::Save),
    ("Undo", Action::Undo),
    ("Redo", Action::Redo),
    ("Clear All", Action::Clear),
    ("Find", Action::Find),
];

const ABOUT_GROUP: [(&str, Action); 2] = [
    ("About Me", Action::AboutAuthor),
    ("About", Action::AboutSoftware),
];

const CLOSE_BUTTON: (&str, Action) = ("Close", Action::Close);

pub struct Button {
    pub columns: Range<u16>,
    pub label: &'static str,
    pub action: Action,
}

/// Row of clickable buttons under the menu bar.
pub struct Toolbar {
    pub row: u16,
    pub enabled: bool,
    buttons: Vec<Button>,
}

impl TUIComponent for Toolbar {
    fn render<W: Write>(&mut self, w: &mut W, window_size: TermSize) -> anyhow::Result<()> {
        if !self.enabled {
            return Ok(());
        }

        self.layout(window_size.width);

        queue!(w, cursor::MoveTo(0, self.row), Clear(ClearType::CurrentLine))?;

        for button in &self.buttons {
            queue!(
                w,
                cursor::MoveTo(button.columns.start, self.row),
                Print("["),
                PrintStyledContent(button.label.bold()),
                Print("]")
            )?;
        }

        Ok(())
    }
}

impl Toolbar {
    pub fn new(row: u16, enabled: bool) -> Self {
        Self {
            row,
            enabled,
            buttons: Vec::new(),
        }
    }

    /// Places the edit group on the left, the about group after a gap and Close
    /// at the right edge, dropping buttons that do not fit.
    pub fn layout(&mut self, width: usize) {
        let width = width.min(u16::MAX as usize) as u16;
        let mut buttons = Vec::new();
        let mut column = 1u16;

        let mut place = |column: &mut u16, (label, action): (&'static str, Action), limit: u16| {
            let end = *column + label.len() as u16 + 2;
            if end > limit {
                return false;
            }

            buttons.push(Button {
                columns: *column..end,
                label,
                action,
            });
            *column = end + 1;
            true
        };

        let close_start = width.saturating_sub(CLOSE_BUTTON.0.len() as u16 + 3);

        for button in LEFT_GROUP {
            place(&mut column, button, close_start);
        }

        column += 2;

        for button in ABOUT_GROUP {
            place(&mut column, button, close_start);
        }

        let mut close_column = close_start.max(column);
        place(&mut close_column, CLOSE_BUTTON, width);

        self.buttons = buttons;
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn button_at(&self, column: u16, row: u16) -> Option<Action> {
        if !self.enabled || row != self.row {
            return None;
        }

        self.buttons
            .iter()
            .find(|button| button.columns.contains(&column))
            .map(|button| button.action)
    }
}
