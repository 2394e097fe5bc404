use std::path::{Path, PathBuf};

use anyhow::Context;
use ropey::Rope;
use tracing::{debug, info};

use crate::{
    constants::APP_NAME,
    core::history::{Edit, History},
};

pub const UNTITLED: &str = "Untitled";
pub const DEFAULT_FILE_TYPE: &str = "Text";

pub struct Document {
    file_path: Option<PathBuf>,
    content: Rope,
    history: History,
    saved_revision: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_undo_limit(crate::core::history::DEFAULT_UNDO_LIMIT)
    }

    pub fn with_undo_limit(undo_limit: usize) -> Self {
        let history = History::new(undo_limit);
        let saved_revision = history.revision();

        Self {
            file_path: None,
            content: Rope::new(),
            history,
            saved_revision,
        }
    }

    /// Replaces the document with the contents of `path`. On failure the
    /// document is left untouched.
    pub async fn open(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;

        self.content = Rope::from(text);
        self.file_path = Some(path.to_path_buf());
        self.history.reset();
        self.mark_saved();

        info!(path = %path.display(), lines = self.line_count(), "opened file");

        Ok(())
    }

    /// Associates `path` without reading it, for a file that does not exist yet.
    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) {
        self.file_path = Some(path.into());
    }

    pub async fn save(&mut self) -> anyhow::Result<()> {
        let path = self
            .file_path
            .clone()
            .ok_or(anyhow::anyhow!("No file associated with this document"))?;

        self.write_to(&path).await?;
        self.mark_saved();

        Ok(())
    }

    /// Writes to `path` and associates it. Path and modified flag only change on success.
    pub async fn save_as(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();

        self.write_to(path).await?;
        self.file_path = Some(path.to_path_buf());
        self.mark_saved();

        Ok(())
    }

    async fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        tokio::fs::write(path, self.content.to_string())
            .await
            .with_context(|| format!("writing {}", path.display()))?;

        info!(path = %path.display(), bytes = self.content.len_bytes(), "saved file");

        Ok(())
    }

    /// Resets to an empty, unmodified, untitled document.
    pub fn clear(&mut self) {
        self.content = Rope::new();
        self.file_path = None;
        self.history.reset();
        self.mark_saved();
    }

    /// Empties the buffer as a single undoable edit. Returns false when there was nothing to clear.
    pub fn clear_text(&mut self) -> anyhow::Result<bool> {
        if self.content.len_chars() == 0 {
            return Ok(false);
        }

        self.apply(Edit::replace(0, self.content.to_string(), ""))?;

        Ok(true)
    }

    pub fn apply(&mut self, edit: Edit) -> anyhow::Result<()> {
        edit.apply(&mut self.content)?;
        debug!(at = edit.at, removed = edit.removed.len(), inserted = edit.inserted.len(), "edit");
        self.history.record(edit);

        Ok(())
    }

    pub fn undo(&mut self) -> anyhow::Result<Option<usize>> {
        self.history.undo(&mut self.content)
    }

    pub fn redo(&mut self) -> anyhow::Result<Option<usize>> {
        self.history.redo(&mut self.content)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn mark_saved(&mut self) {
        self.saved_revision = self.history.revision();
    }

    pub fn is_modified(&self) -> bool {
        self.history.revision() != self.saved_revision
    }

    pub fn get_content(&self) -> &Rope {
        &self.content
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn display_name(&self) -> String {
        self.file_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    pub fn window_title(&self) -> String {
        let marker = if self.is_modified() { "*" } else { "" };

        format!("{marker}{} - {APP_NAME}", self.display_name())
    }

    /// Extension after the last dot, unless the dot is the first or last character.
    pub fn file_type(&self) -> String {
        if self.file_path.is_none() {
            return DEFAULT_FILE_TYPE.to_string();
        }

        let name = self.display_name();

        match name.rfind('.') {
            Some(dot) if dot > 0 && dot < name.len() - 1 => name[dot + 1..].to_string(),
            _ => DEFAULT_FILE_TYPE.to_string(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.content.len_lines()
    }
}
