use std::io::Write;

use crate::javitor::TermSize;

pub mod dialog;
pub mod find_dialog;
pub mod gutter;
pub mod menu_bar;
pub mod status_bar;
pub mod text_block;
pub mod toolbar;

pub use dialog::{ConfirmBox, MessageBox, PromptBox};
pub use find_dialog::FindDialog;
pub use gutter::Gutter;
pub use menu_bar::MenuBar;
pub use status_bar::StatusBar;
pub use text_block::TextBlock;
pub use toolbar::Toolbar;

pub trait TUIComponent {
    fn render<W: Write>(&mut self, w: &mut W, window_size: TermSize) -> anyhow::Result<()>;
}
