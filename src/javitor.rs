use std::{
    io::{self, Write},
    path::PathBuf,
};

use crossterm::{
    cursor,
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event, EventStream, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen, SetTitle,
    },
};
use futures_core::Stream;
use futures_util::StreamExt;
use tracing::{info, warn};

use crate::{
    actions::Action,
    components::{
        dialog::{ConfirmAnswer, PromptPurpose},
        find_dialog::{FindCommand, FindOutcome},
        menu_bar::MenuOutcome,
        ConfirmBox, FindDialog, Gutter, MenuBar, MessageBox, PromptBox, StatusBar, TUIComponent,
        TextBlock, Toolbar,
    },
    config::Config,
    constants::*,
    core::Document,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    pub width: usize,
    pub height: usize,
}

/// Modal boxes drawn over everything else. At most one is open at a time.
pub enum Overlay {
    None,
    Message(MessageBox),
    Confirm(ConfirmBox),
    Prompt(PromptBox),
}

pub struct Javitor<W: Write> {
    pub writer: W,
    pub text_block: TextBlock,
    pub menu_bar: MenuBar,
    pub toolbar: Toolbar,
    pub status_bar: StatusBar,
    pub find_dialog: FindDialog,
    pub overlay: Overlay,
    pub window_size: TermSize,
    pub quit: bool,
    terminal_active: bool,
}

impl<W: Write> Drop for Javitor<W> {
    fn drop(&mut self) {
        if self.terminal_active {
            let _ = self.restore_terminal();
        }
    }
}

impl<W: Write> Javitor<W> {
    /// Builds the editor, loading `file_path` when given. A path that does not
    /// exist yet becomes the save target of an empty document.
    pub async fn new(writer: W, config: Config, file_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let document = Document::with_undo_limit(config.undo_limit);

        let mut javitor = Javitor {
            writer,
            text_block: TextBlock::new(
                document,
                (0, 0),
                (0, 0),
                Gutter::new(config.show_line_numbers),
                config.tab_width,
            ),
            menu_bar: MenuBar::default(),
            toolbar: Toolbar::new(1, config.show_toolbar),
            status_bar: StatusBar::default(),
            find_dialog: FindDialog::default(),
            overlay: Overlay::None,
            window_size: TermSize {
                width: 80,
                height: 24,
            },
            quit: false,
            terminal_active: false,
        };

        javitor.resize(80, 24);

        if let Some(path) = file_path {
            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                javitor.open_path(path).await;
            } else {
                info!(path = %path.display(), "starting with a new file");
                javitor.text_block.document.set_file_path(path);
            }
        }

        Ok(javitor)
    }

    pub async fn start(mut self) -> anyhow::Result<()> {
        self.setup_terminal()?;

        let (columns, rows) = terminal::size()?;
        self.resize(columns, rows);
        self.render()?;

        let result = self.run_loop(EventStream::new()).await;

        self.restore_terminal()?;

        result
    }

    pub async fn run_loop<S>(&mut self, mut events: S) -> anyhow::Result<()>
    where
        S: Stream<Item = io::Result<Event>> + Unpin,
    {
        while let Some(event) = events.next().await {
            self.handle_event(event?).await?;

            if self.quit {
                info!("closing editor");
                break;
            }

            self.render()?;
        }

        Ok(())
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.window_size = TermSize {
            width: columns as usize,
            height: rows as usize,
        };

        let top: u16 = if self.toolbar.enabled { 2 } else { 1 };

        self.toolbar.row = 1;
        self.toolbar.layout(self.window_size.width);
        self.text_block.position = (0, top).into();
        self.text_block.size = (
            self.window_size.width,
            (rows as usize).saturating_sub(top as usize + 1),
        )
            .into();
        self.status_bar.row = rows.saturating_sub(1);
    }

    fn setup_terminal(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        enable_raw_mode()?;
        self.terminal_active = true;

        execute!(self.writer, Clear(ClearType::All))?;

        Ok(())
    }

    pub fn restore_terminal(&mut self) -> io::Result<()> {
        self.terminal_active = false;

        execute!(
            self.writer,
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen,
            cursor::Show
        )?;
        disable_raw_mode()?;

        Ok(())
    }

    pub fn render(&mut self) -> anyhow::Result<()> {
        let size = self.window_size;
        let title = self.text_block.document.window_title();

        queue!(self.writer, cursor::Hide, SetTitle(&title))?;

        self.menu_bar.title = title;
        self.toolbar.render(&mut self.writer, size)?;
        self.text_block.render(&mut self.writer, size)?;

        let cursor_pos = self.text_block.get_cursor_pos()?;
        self.status_bar
            .update_status(&self.text_block.document, cursor_pos);
        self.status_bar.render(&mut self.writer, size)?;

        self.menu_bar.render(&mut self.writer, size)?;

        if self.find_dialog.visible {
            self.find_dialog.render(&mut self.writer, size)?;
        }

        let cursor = match &mut self.overlay {
            Overlay::Message(message) => {
                message.render(&mut self.writer, size)?;
                None
            }
            Overlay::Confirm(confirm) => {
                confirm.render(&mut self.writer, size)?;
                None
            }
            Overlay::Prompt(prompt) => {
                prompt.render(&mut self.writer, size)?;
                Some(prompt.cursor())
            }
            Overlay::None if self.menu_bar.is_open() => None,
            Overlay::None if self.find_dialog.visible => self.find_dialog.cursor(),
            Overlay::None => Some(self.text_block.get_cursor_term_pos()?),
        };

        if let Some((x, y)) = cursor {
            queue!(self.writer, cursor::MoveTo(x, y), cursor::Show)?;
        }

        self.writer.flush()?;

        Ok(())
    }

    pub async fn handle_event(&mut self, event: Event) -> anyhow::Result<()> {
        match event {
            Event::Key(event) if event.kind != KeyEventKind::Release => {
                self.handle_key(event).await?
            }
            Event::Mouse(event) => self.handle_mouse(event).await?,
            Event::Paste(data) => self.handle_paste(&data)?,
            Event::Resize(width, height) => self.resize(width, height),
            _ => {}
        };

        Ok(())
    }

    async fn handle_key(&mut self, event: KeyEvent) -> anyhow::Result<()> {
        self.status_bar.clear_message();

        match std::mem::replace(&mut self.overlay, Overlay::None) {
            Overlay::None => {}
            Overlay::Message(_) => return Ok(()),
            Overlay::Confirm(confirm) => {
                match ConfirmBox::answer(&event) {
                    Some(answer) => self.answer_confirm(answer, confirm.then).await?,
                    None => self.overlay = Overlay::Confirm(confirm),
                }
                return Ok(());
            }
            Overlay::Prompt(mut prompt) => {
                match event.code {
                    KeyCode::Enter => self.submit_prompt(prompt).await?,
                    KeyCode::Esc => {}
                    _ => {
                        prompt.field.handle_key(&event);
                        self.overlay = Overlay::Prompt(prompt);
                    }
                }
                return Ok(());
            }
        }

        if self.menu_bar.is_open() {
            if let MenuOutcome::Trigger(action) = self.menu_bar.handle_key(&event) {
                self.perform(action).await?;
            }
            return Ok(());
        }

        if let Some(action) = Action::from_key(&event) {
            return self.perform(action).await;
        }

        // The find dialog owns Alt shortcuts while it is open.
        if self.find_dialog.visible {
            if let Some(command) = self.find_dialog.handle_key(&event) {
                self.run_find(command);
            }
            return Ok(());
        }

        if MenuBar::menu_for_key(&event).is_some() {
            self.menu_bar.handle_key(&event);
            return Ok(());
        }

        if let Some(edit) = self.text_block.update(&Event::Key(event))? {
            self.text_block.apply_event(edit)?;
        }

        Ok(())
    }

    async fn handle_mouse(&mut self, event: MouseEvent) -> anyhow::Result<()> {
        if !matches!(self.overlay, Overlay::None) {
            return Ok(());
        }

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match self.menu_bar.click(event.column, event.row) {
                    MenuOutcome::Trigger(action) => return self.perform(action).await,
                    MenuOutcome::Consumed => return Ok(()),
                    MenuOutcome::Ignored => {}
                }

                if let Some(action) = self.toolbar.button_at(event.column, event.row) {
                    return self.perform(action).await;
                }

                if !self.find_dialog.visible {
                    self.text_block.click(event.column, event.row)?;
                }
            }
            MouseEventKind::ScrollUp => {
                let line = self.text_block.cursor.y.saturating_sub(3);
                self.text_block.cursor.y = line;
            }
            MouseEventKind::ScrollDown => {
                let last = self.text_block.document.line_count().saturating_sub(1);
                self.text_block.cursor.y = (self.text_block.cursor.y + 3).min(last);
            }
            _ => {}
        }

        Ok(())
    }

    fn handle_paste(&mut self, data: &str) -> anyhow::Result<()> {
        match &mut self.overlay {
            Overlay::Prompt(prompt) => prompt.field.insert_str(data),
            Overlay::None if self.find_dialog.visible => self.find_dialog.paste(data),
            Overlay::None => self.text_block.insert_text(data)?,
            _ => {}
        }

        Ok(())
    }

    pub async fn perform(&mut self, action: Action) -> anyhow::Result<()> {
        self.menu_bar.close();

        match action {
            Action::New | Action::Open | Action::Close => {
                if self.text_block.document.is_modified() {
                    self.overlay = Overlay::Confirm(ConfirmBox {
                        title: MSG_UNSAVED_CHANGES_TITLE.to_string(),
                        body: MSG_UNSAVED_CHANGES.to_string(),
                        then: action,
                    });
                } else {
                    self.proceed(action);
                }
            }
            Action::Save => self.save(None).await,
            Action::SaveAs => self.prompt_save_as(None),
            Action::Undo => {
                if !self.text_block.document.can_undo() || !self.text_block.undo()? {
                    self.status_bar.set_message("Nothing to undo");
                }
            }
            Action::Redo => {
                if !self.text_block.document.can_redo() || !self.text_block.redo()? {
                    self.status_bar.set_message("Nothing to redo");
                }
            }
            Action::Clear => {
                if self.text_block.document.clear_text()? {
                    self.text_block.reset_view();
                }
            }
            Action::Find => self.find_dialog.show(),
            Action::FindNext => self.run_find(FindCommand::FindNext),
            Action::AboutAuthor => {
                self.overlay = Overlay::Message(MessageBox::new(
                    format!("About the Author - {APP_NAME}"),
                    format!("Author: {AUTHOR_NAME}\nContact me at: {AUTHOR_EMAIL}"),
                ));
            }
            Action::AboutSoftware => {
                self.overlay = Overlay::Message(MessageBox::new(
                    format!("About the Software - {APP_NAME}"),
                    format!("Name: {APP_NAME}\nVersion: {APP_VERSION}"),
                ));
            }
        };

        Ok(())
    }

    /// Carries out New / Open / Close once unsaved changes are dealt with.
    fn proceed(&mut self, action: Action) {
        match action {
            Action::New => {
                self.text_block.document.clear();
                self.text_block.reset_view();
                self.find_dialog.start_index = 0;
            }
            Action::Open => {
                let initial = self
                    .text_block
                    .document
                    .file_path()
                    .and_then(|path| path.parent())
                    .map(|dir| format!("{}/", dir.display()))
                    .unwrap_or_default();

                self.overlay = Overlay::Prompt(PromptBox::new(
                    "Open",
                    PromptPurpose::Open,
                    &initial,
                ));
            }
            Action::Close => self.quit = true,
            _ => {}
        }
    }

    fn prompt_save_as(&mut self, then: Option<Action>) {
        let initial = self
            .text_block
            .document
            .file_path()
            .map(|path| path.display().to_string())
            .unwrap_or_default();

        self.overlay = Overlay::Prompt(PromptBox::new(
            "Save As",
            PromptPurpose::SaveAs { then },
            &initial,
        ));
    }

    /// Saves to the associated file, asking for a path when there is none.
    /// `then` runs only after a successful save.
    async fn save(&mut self, then: Option<Action>) {
        if self.text_block.document.file_path().is_none() {
            self.prompt_save_as(then);
            return;
        }

        match self.text_block.document.save().await {
            Ok(()) => self.saved(then),
            Err(err) => self.show_write_error(&err),
        }
    }

    fn saved(&mut self, then: Option<Action>) {
        let name = self.text_block.document.display_name();
        self.status_bar.set_message(format!("Saved {name}"));

        if let Some(action) = then {
            self.proceed(action);
        }
    }

    async fn answer_confirm(&mut self, answer: ConfirmAnswer, then: Action) -> anyhow::Result<()> {
        match answer {
            ConfirmAnswer::Yes => self.save(Some(then)).await,
            ConfirmAnswer::No => self.proceed(then),
            ConfirmAnswer::Cancel => {}
        }

        Ok(())
    }

    async fn submit_prompt(&mut self, prompt: PromptBox) -> anyhow::Result<()> {
        let path = prompt.field.value().trim();

        if path.is_empty() {
            return Ok(());
        }

        let path = PathBuf::from(path);

        match prompt.purpose {
            PromptPurpose::Open => self.open_path(path).await,
            PromptPurpose::SaveAs { then } => {
                match self.text_block.document.save_as(&path).await {
                    Ok(()) => self.saved(then),
                    Err(err) => self.show_write_error(&err),
                }
            }
        }

        Ok(())
    }

    async fn open_path(&mut self, path: PathBuf) {
        match self.text_block.document.open(&path).await {
            Ok(()) => {
                self.text_block.reset_view();
                self.find_dialog.start_index = 0;
            }
            Err(err) => {
                warn!("open failed: {err:#}");
                self.overlay = Overlay::Message(MessageBox::new(
                    MSG_FILE_READ_ERROR_TITLE,
                    format!("{MSG_FILE_READ_ERROR}{err:#}"),
                ));
            }
        }
    }

    fn show_write_error(&mut self, err: &anyhow::Error) {
        warn!("save failed: {err:#}");
        self.overlay = Overlay::Message(MessageBox::new(
            MSG_FILE_WRITE_ERROR_TITLE,
            format!("{MSG_FILE_WRITE_ERROR}{err:#}"),
        ));
    }

    /// Search errors are reported in a message box and never end the editor.
    fn run_find(&mut self, command: FindCommand) {
        let outcome = match self.find_dialog.execute(command, &mut self.text_block) {
            Ok(Some(outcome)) => outcome,
            Ok(None) => return,
            Err(err) => {
                warn!("search failed: {err:#}");
                self.overlay = Overlay::Message(MessageBox::new(
                    MSG_SEARCH_ERROR_TITLE,
                    format!("{MSG_SEARCH_ERROR}{err:#}"),
                ));
                return;
            }
        };

        match outcome {
            FindOutcome::Found(_) => {}
            FindOutcome::NotFound(needle) => {
                self.overlay = Overlay::Message(MessageBox::new(
                    "Find",
                    format!("{MSG_SEARCH_NOT_FOUND}{needle}"),
                ));
            }
            FindOutcome::Replaced(count) => {
                let noun = if count == 1 { "occurrence" } else { "occurrences" };
                self.status_bar
                    .set_message(format!("Replaced {count} {noun}"));
            }
            FindOutcome::NeedText => self.status_bar.set_message(MSG_SEARCH_EMPTY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    async fn editor() -> Javitor<Vec<u8>> {
        Javitor::new(Vec::new(), Config::default(), None).await.unwrap()
    }

    fn key(modifiers: KeyModifiers, code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn typed(text: &str) -> Vec<Event> {
        text.chars()
            .map(|c| match c {
                '\n' => key(KeyModifiers::NONE, KeyCode::Enter),
                c => key(KeyModifiers::NONE, KeyCode::Char(c)),
            })
            .collect()
    }

    async fn feed(javitor: &mut Javitor<Vec<u8>>, events: Vec<Event>) {
        javitor
            .run_loop(futures_util::stream::iter(events.into_iter().map(Ok)))
            .await
            .unwrap();
    }

    fn text(javitor: &Javitor<Vec<u8>>) -> String {
        javitor.text_block.document.get_content().to_string()
    }

    #[tokio::test]
    async fn typing_marks_the_title_and_undo_cleans_it() {
        let mut javitor = editor().await;

        feed(&mut javitor, typed("hi")).await;
        assert_eq!(text(&javitor), "hi");
        assert_eq!(javitor.menu_bar.title, "*Untitled - Javitor (Java Editor)");

        feed(
            &mut javitor,
            vec![
                key(KeyModifiers::CONTROL, KeyCode::Char('z')),
                key(KeyModifiers::CONTROL, KeyCode::Char('z')),
            ],
        )
        .await;
        assert_eq!(text(&javitor), "");
        assert_eq!(javitor.menu_bar.title, "Untitled - Javitor (Java Editor)");

        feed(&mut javitor, vec![key(KeyModifiers::CONTROL, KeyCode::Char('z'))]).await;
        assert_eq!(javitor.status_bar.message(), Some("Nothing to undo"));
    }

    #[tokio::test]
    async fn close_with_unsaved_changes_asks_first() {
        let mut javitor = editor().await;
        feed(&mut javitor, typed("draft")).await;

        feed(&mut javitor, vec![key(KeyModifiers::CONTROL, KeyCode::Char('q'))]).await;
        assert!(matches!(javitor.overlay, Overlay::Confirm(_)));
        assert!(!javitor.quit);

        feed(&mut javitor, vec![key(KeyModifiers::NONE, KeyCode::Esc)]).await;
        assert!(matches!(javitor.overlay, Overlay::None));
        assert!(!javitor.quit);

        feed(
            &mut javitor,
            vec![
                key(KeyModifiers::CONTROL, KeyCode::Char('q')),
                key(KeyModifiers::NONE, KeyCode::Char('n')),
            ],
        )
        .await;
        assert!(javitor.quit);
    }

    #[tokio::test]
    async fn new_with_yes_saves_through_prompt_then_clears() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.txt");
        let mut javitor = editor().await;
        feed(&mut javitor, typed("keep\nthis")).await;

        let mut events = vec![
            key(KeyModifiers::CONTROL, KeyCode::Char('n')),
            key(KeyModifiers::NONE, KeyCode::Char('y')),
        ];
        events.extend(typed(&path.display().to_string()));
        events.push(key(KeyModifiers::NONE, KeyCode::Enter));
        feed(&mut javitor, events).await;

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep\nthis");
        assert_eq!(text(&javitor), "");
        assert!(javitor.text_block.document.file_path().is_none());
        assert!(!javitor.text_block.document.is_modified());
    }

    #[tokio::test]
    async fn open_prompt_loads_file_and_missing_file_shows_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "line one\nline two\n").unwrap();
        let mut javitor = editor().await;

        let mut events = vec![key(KeyModifiers::CONTROL, KeyCode::Char('o'))];
        events.extend(typed(&path.display().to_string()));
        events.push(key(KeyModifiers::NONE, KeyCode::Enter));
        feed(&mut javitor, events).await;

        assert_eq!(text(&javitor), "line one\nline two\n");
        assert_eq!(javitor.menu_bar.title, "notes.md - Javitor (Java Editor)");
        assert_eq!(
            javitor.status_bar.left_text(),
            " File: notes.md | Type: md | Lines: 3"
        );

        let mut events = vec![key(KeyModifiers::CONTROL, KeyCode::Char('o'))];
        events.push(key(KeyModifiers::NONE, KeyCode::End));
        events.extend(typed("missing.txt"));
        events.push(key(KeyModifiers::NONE, KeyCode::Enter));
        feed(&mut javitor, events).await;

        match &javitor.overlay {
            Overlay::Message(message) => {
                assert_eq!(message.title, MSG_FILE_READ_ERROR_TITLE);
                assert!(message.body.starts_with(MSG_FILE_READ_ERROR));
            }
            _ => panic!("expected an error message"),
        }
        assert_eq!(text(&javitor), "line one\nline two\n");
    }

    #[tokio::test]
    async fn save_writes_to_the_opened_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "abc").unwrap();

        let mut javitor = Javitor::new(Vec::new(), Config::default(), Some(path.clone()))
            .await
            .unwrap();
        feed(
            &mut javitor,
            vec![
                key(KeyModifiers::CONTROL, KeyCode::End),
                key(KeyModifiers::NONE, KeyCode::Char('!')),
                key(KeyModifiers::CONTROL, KeyCode::Char('s')),
            ],
        )
        .await;

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "abc!");
        assert!(!javitor.text_block.document.is_modified());
        assert_eq!(javitor.status_bar.message(), Some("Saved a.txt"));
    }

    #[tokio::test]
    async fn missing_start_file_becomes_save_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.txt");

        let mut javitor = Javitor::new(Vec::new(), Config::default(), Some(path.clone()))
            .await
            .unwrap();
        let mut events = typed("fresh");
        events.push(key(KeyModifiers::CONTROL, KeyCode::Char('s')));
        feed(&mut javitor, events).await;

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh");
    }

    #[tokio::test]
    async fn find_dialog_round_trip() {
        let mut javitor = editor().await;
        feed(&mut javitor, typed("red green red")).await;

        let mut events = vec![key(KeyModifiers::CONTROL, KeyCode::Char('f'))];
        events.extend(typed("RED"));
        events.push(key(KeyModifiers::NONE, KeyCode::Tab));
        events.extend(typed("blue"));
        events.push(key(KeyModifiers::ALT, KeyCode::Char('a')));
        feed(&mut javitor, events).await;

        assert_eq!(text(&javitor), "blue green blue");
        assert_eq!(javitor.status_bar.message(), Some("Replaced 2 occurrences"));

        feed(
            &mut javitor,
            vec![
                key(KeyModifiers::NONE, KeyCode::Esc),
                key(KeyModifiers::NONE, KeyCode::F(3)),
            ],
        )
        .await;
        assert!(!javitor.find_dialog.visible);
        match &javitor.overlay {
            Overlay::Message(message) => assert_eq!(message.body, "Could not find: RED"),
            _ => panic!("expected a not-found message"),
        }

        feed(&mut javitor, vec![key(KeyModifiers::NONE, KeyCode::Char('x'))]).await;
        assert!(matches!(javitor.overlay, Overlay::None));
        assert_eq!(text(&javitor), "blue green blue");
    }

    #[tokio::test]
    async fn oversized_search_text_reports_error_and_keeps_document() {
        let mut javitor = editor().await;
        feed(&mut javitor, typed("x")).await;

        feed(
            &mut javitor,
            vec![
                key(KeyModifiers::CONTROL, KeyCode::Char('f')),
                Event::Paste("é".repeat(200_000)),
                key(KeyModifiers::NONE, KeyCode::Enter),
            ],
        )
        .await;

        match &javitor.overlay {
            Overlay::Message(message) => {
                assert_eq!(message.title, MSG_SEARCH_ERROR_TITLE);
                assert!(message.body.starts_with(MSG_SEARCH_ERROR));
            }
            _ => panic!("expected a search error message"),
        }
        assert!(!javitor.quit);
        assert_eq!(text(&javitor), "x");
        assert!(javitor.text_block.document.is_modified());

        feed(
            &mut javitor,
            vec![
                key(KeyModifiers::NONE, KeyCode::Enter),
                key(KeyModifiers::NONE, KeyCode::Esc),
                key(KeyModifiers::NONE, KeyCode::F(3)),
            ],
        )
        .await;
        assert!(matches!(javitor.overlay, Overlay::Message(_)));
        assert_eq!(text(&javitor), "x");
    }

    #[tokio::test]
    async fn about_boxes_and_menu_trigger() {
        let mut javitor = editor().await;

        feed(&mut javitor, vec![key(KeyModifiers::NONE, KeyCode::F(1))]).await;
        match &javitor.overlay {
            Overlay::Message(message) => assert!(message.body.contains("Javitor (Java Editor)")),
            _ => panic!("expected the about box"),
        }

        feed(
            &mut javitor,
            vec![
                key(KeyModifiers::NONE, KeyCode::Enter),
                key(KeyModifiers::ALT, KeyCode::Char('a')),
                key(KeyModifiers::NONE, KeyCode::Enter),
            ],
        )
        .await;
        match &javitor.overlay {
            Overlay::Message(message) => assert!(message.body.contains(AUTHOR_NAME)),
            _ => panic!("expected the author box"),
        }
    }

    #[tokio::test]
    async fn toolbar_click_and_clear() {
        let mut javitor = editor().await;
        feed(&mut javitor, typed("wipe me")).await;

        let clear = javitor
            .toolbar
            .buttons()
            .iter()
            .find(|button| button.action == Action::Clear)
            .map(|button| button.columns.start)
            .unwrap();

        feed(
            &mut javitor,
            vec![Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: clear,
                row: 1,
                modifiers: KeyModifiers::NONE,
            })],
        )
        .await;

        assert_eq!(text(&javitor), "");
        assert!(javitor.text_block.document.is_modified());

        feed(&mut javitor, vec![key(KeyModifiers::CONTROL, KeyCode::Char('z'))]).await;
        assert_eq!(text(&javitor), "wipe me");
    }

    #[tokio::test]
    async fn paste_goes_to_the_focused_target() {
        let mut javitor = editor().await;

        feed(&mut javitor, vec![Event::Paste("one\ntwo".to_string())]).await;
        assert_eq!(text(&javitor), "one\ntwo");

        feed(
            &mut javitor,
            vec![
                key(KeyModifiers::CONTROL, KeyCode::Char('f')),
                Event::Paste("two".to_string()),
            ],
        )
        .await;
        assert_eq!(javitor.find_dialog.find.value(), "two");
        assert_eq!(text(&javitor), "one\ntwo");
    }
}
