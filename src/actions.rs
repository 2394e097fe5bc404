use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Everything the menu bar, the toolbar and the accelerators can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    New,
    Open,
    Save,
    SaveAs,
    Close,
    Undo,
    Redo,
    Clear,
    Find,
    FindNext,
    AboutAuthor,
    AboutSoftware,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::New => "New",
            Action::Open => "Open",
            Action::Save => "Save",
            Action::SaveAs => "Save As",
            Action::Close => "Close",
            Action::Undo => "Undo",
            Action::Redo => "Redo",
            Action::Clear => "Clear",
            Action::Find => "Find",
            Action::FindNext => "Find Next",
            Action::AboutAuthor => "About the author",
            Action::AboutSoftware => "About the software",
        }
    }

    pub fn accelerator(self) -> Option<&'static str> {
        match self {
            Action::New => Some("^N"),
            Action::Open => Some("^O"),
            Action::Save => Some("^S"),
            Action::SaveAs => Some("^⇧S"),
            Action::Close => Some("^Q"),
            Action::Undo => Some("^Z"),
            Action::Redo => Some("^Y"),
            Action::Clear => Some("^K"),
            Action::Find => Some("^F"),
            Action::FindNext => Some("F3"),
            Action::AboutAuthor => Some("F2"),
            Action::AboutSoftware => Some("F1"),
        }
    }

    pub fn from_key(event: &KeyEvent) -> Option<Action> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        let shift = event.modifiers.contains(KeyModifiers::SHIFT);

        Some(match event.code {
            KeyCode::Char(c) if ctrl => match (c.to_ascii_lowercase(), shift) {
                ('n', _) => Action::New,
                ('o', _) => Action::Open,
                ('s', true) => Action::SaveAs,
                ('s', false) => Action::Save,
                ('q', _) => Action::Close,
                ('z', _) => Action::Undo,
                ('y', _) => Action::Redo,
                ('k', _) => Action::Clear,
                ('f', _) => Action::Find,
                _ => return None,
            },
            KeyCode::F(4) if ctrl => Action::Close,
            KeyCode::F(3) => Action::FindNext,
            KeyCode::F(2) => Action::AboutAuthor,
            KeyCode::F(1) => Action::AboutSoftware,
            _ => return None,
        })
    }
}
