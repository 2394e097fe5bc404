use std::io::Write;

use crossterm::{
    cursor,
    event::{KeyCode, KeyEvent, KeyModifiers},
    queue,
    style::{Print, PrintStyledContent, Stylize},
};

use crate::{
    actions::Action,
    components::{status_bar::fit, TUIComponent},
    javitor::TermSize,
};

pub struct Menu {
    pub title: &'static str,
    pub hotkey: char,
    pub items: &'static [Action],
}

pub const MENUS: [Menu; 4] = [
    Menu {
        title: "File",
        hotkey: 'f',
        items: &[
            Action::New,
            Action::Open,
            Action::Save,
            Action::SaveAs,
            Action::Close,
        ],
    },
    Menu {
        title: "Edit",
        hotkey: 'e',
        items: &[Action::Undo, Action::Redo, Action::Clear],
    },
    Menu {
        title: "Find",
        hotkey: 'i',
        items: &[Action::Find, Action::FindNext],
    },
    Menu {
        title: "About",
        hotkey: 'a',
        items: &[Action::AboutAuthor, Action::AboutSoftware],
    },
];

const ITEM_WIDTH: usize = 28;

#[derive(Debug, PartialEq, Eq)]
pub enum MenuOutcome {
    Ignored,
    Consumed,
    Trigger(Action),
}

/// Top row. Shows the menu titles and the window title, and owns the open drop-down.
#[derive(Default)]
pub struct MenuBar {
    pub title: String,
    open: Option<(usize, usize)>,
}

impl TUIComponent for MenuBar {
    fn render<W: Write>(&mut self, w: &mut W, window_size: TermSize) -> anyhow::Result<()> {
        let titles: String = MENUS
            .iter()
            .map(|menu| format!(" {} ", menu.title))
            .collect();
        let bar = fit(&format!(" {titles}"), &format!("{} ", self.title), window_size.width);

        queue!(w, cursor::MoveTo(0, 0), PrintStyledContent(bar.reverse()))?;

        let Some((menu_index, item_index)) = self.open else {
            return Ok(());
        };

        let start = title_column(menu_index);
        let menu = &MENUS[menu_index];

        queue!(
            w,
            cursor::MoveTo(start, 0),
            Print(format!(" {} ", menu.title))
        )?;

        for (i, action) in menu.items.iter().enumerate() {
            let label = format!(
                " {:<width$}{:>6} ",
                action.label(),
                action.accelerator().unwrap_or(""),
                width = ITEM_WIDTH - 8
            );

            queue!(w, cursor::MoveTo(start, 1 + i as u16))?;

            if i == item_index {
                queue!(w, PrintStyledContent(label.reverse()))?;
            } else {
                queue!(w, Print(label))?;
            }
        }

        Ok(())
    }
}

/// Screen column where menu `index`'s title starts.
fn title_column(index: usize) -> u16 {
    1 + MENUS[..index]
        .iter()
        .map(|menu| menu.title.len() as u16 + 2)
        .sum::<u16>()
}

impl MenuBar {
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn open_menu(&mut self, index: usize) {
        if index < MENUS.len() {
            self.open = Some((index, 0));
        }
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn selected(&self) -> Option<Action> {
        let (menu, item) = self.open?;

        MENUS[menu].items.get(item).copied()
    }

    /// F10 or Alt+hotkey, checked while no menu is open.
    pub fn menu_for_key(event: &KeyEvent) -> Option<usize> {
        match (event.modifiers, event.code) {
            (KeyModifiers::NONE, KeyCode::F(10)) => Some(0),
            (KeyModifiers::ALT, KeyCode::Char(c)) => MENUS
                .iter()
                .position(|menu| menu.hotkey == c.to_ascii_lowercase()),
            _ => None,
        }
    }

    pub fn handle_key(&mut self, event: &KeyEvent) -> MenuOutcome {
        let Some((menu, item)) = self.open else {
            return match Self::menu_for_key(event) {
                Some(index) => {
                    self.open_menu(index);
                    MenuOutcome::Consumed
                }
                None => MenuOutcome::Ignored,
            };
        };

        let items = MENUS[menu].items.len();

        match event.code {
            KeyCode::Esc | KeyCode::F(10) => self.close(),
            KeyCode::Left => self.open = Some(((menu + MENUS.len() - 1) % MENUS.len(), 0)),
            KeyCode::Right => self.open = Some(((menu + 1) % MENUS.len(), 0)),
            KeyCode::Up => self.open = Some((menu, (item + items - 1) % items)),
            KeyCode::Down => self.open = Some((menu, (item + 1) % items)),
            KeyCode::Enter => {
                let action = self.selected();
                self.close();

                if let Some(action) = action {
                    return MenuOutcome::Trigger(action);
                }
            }
            _ => {}
        }

        MenuOutcome::Consumed
    }

    /// Handles a left click at (`column`, `row`).
    pub fn click(&mut self, column: u16, row: u16) -> MenuOutcome {
        if row == 0 {
            let hit = (0..MENUS.len()).find(|&i| {
                let start = title_column(i);
                column >= start && column < start + MENUS[i].title.len() as u16 + 2
            });

            return match hit {
                Some(index) if self.open.map(|(menu, _)| menu) == Some(index) => {
                    self.close();
                    MenuOutcome::Consumed
                }
                Some(index) => {
                    self.open_menu(index);
                    MenuOutcome::Consumed
                }
                None if self.is_open() => {
                    self.close();
                    MenuOutcome::Consumed
                }
                None => MenuOutcome::Ignored,
            };
        }

        let Some((menu, _)) = self.open else {
            return MenuOutcome::Ignored;
        };

        self.close();

        let start = title_column(menu);
        let item = (row - 1) as usize;

        if column >= start && ((column - start) as usize) < ITEM_WIDTH {
            if let Some(action) = MENUS[menu].items.get(item) {
                return MenuOutcome::Trigger(*action);
            }
        }

        MenuOutcome::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(modifiers: KeyModifiers, code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn keyboard_navigation_triggers_actions() {
        let mut menu_bar = MenuBar::default();

        assert_eq!(
            menu_bar.handle_key(&key(KeyModifiers::NONE, KeyCode::Down)),
            MenuOutcome::Ignored
        );
        assert_eq!(
            menu_bar.handle_key(&key(KeyModifiers::ALT, KeyCode::Char('e'))),
            MenuOutcome::Consumed
        );
        assert_eq!(menu_bar.selected(), Some(Action::Undo));

        menu_bar.handle_key(&key(KeyModifiers::NONE, KeyCode::Up));
        assert_eq!(menu_bar.selected(), Some(Action::Clear));

        menu_bar.handle_key(&key(KeyModifiers::NONE, KeyCode::Right));
        assert_eq!(menu_bar.selected(), Some(Action::Find));

        menu_bar.handle_key(&key(KeyModifiers::NONE, KeyCode::Down));
        assert_eq!(
            menu_bar.handle_key(&key(KeyModifiers::NONE, KeyCode::Enter)),
            MenuOutcome::Trigger(Action::FindNext)
        );
        assert!(!menu_bar.is_open());
    }

    #[test]
    fn left_wraps_to_last_menu() {
        let mut menu_bar = MenuBar::default();
        menu_bar.handle_key(&key(KeyModifiers::NONE, KeyCode::F(10)));

        menu_bar.handle_key(&key(KeyModifiers::NONE, KeyCode::Left));
        assert_eq!(menu_bar.selected(), Some(Action::AboutAuthor));

        menu_bar.handle_key(&key(KeyModifiers::NONE, KeyCode::Esc));
        assert!(!menu_bar.is_open());
    }

    #[test]
    fn mouse_opens_menu_and_picks_item() {
        let mut menu_bar = MenuBar::default();

        // " File  Edit ..." puts "Edit" at columns 7..13
        assert_eq!(menu_bar.click(8, 0), MenuOutcome::Consumed);
        assert_eq!(menu_bar.selected(), Some(Action::Undo));

        assert_eq!(menu_bar.click(9, 2), MenuOutcome::Trigger(Action::Redo));
        assert!(!menu_bar.is_open());

        assert_eq!(menu_bar.click(9, 2), MenuOutcome::Ignored);
    }
}
