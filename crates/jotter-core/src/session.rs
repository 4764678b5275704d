use std::{
    borrow::Cow,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    storage::{FsStorage, Storage},
    surface::{
        Choice, DEFAULT_EXTENSION, DisplaySurface, STATUS_CLEAR_AFTER, TEXT_FILTERS, title_for,
    },
};

const ERROR_TITLE: &str = "Error";
const UNSAVED_TITLE: &str = "Unsaved Changes";

/// Result of a session operation. `Cancelled` means a picker was dismissed
/// and is never reported as an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Cancelled,
    Failed,
}

impl Outcome {
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseDecision {
    Exit,
    Stay,
}

/// The one open document.
///
/// Every operation either applies completely or leaves `path`, `buffer` and
/// `dirty` exactly as they were.
#[derive(Debug)]
pub struct DocumentSession<S = FsStorage> {
    storage: S,
    path: Option<PathBuf>,
    buffer: String,
    dirty: bool,
    status_clear_after: Duration,
}

impl Default for DocumentSession<FsStorage> {
    fn default() -> Self {
        Self::new(FsStorage)
    }
}

impl<S: Storage> DocumentSession<S> {
    pub const fn new(storage: S) -> Self {
        Self {
            storage,
            path: None,
            buffer: String::new(),
            dirty: false,
            status_clear_after: STATUS_CLEAR_AFTER,
        }
    }

    #[must_use]
    pub fn with_status_clear_after(mut self, after: Duration) -> Self {
        self.status_clear_after = after;
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn title(&self) -> Cow<'_, str> {
        title_for(self.path())
    }

    #[cfg(test)]
    pub(crate) const fn storage(&self) -> &S {
        &self.storage
    }

    /// Called by the surface after the user changed the text.
    pub fn note_edited(&mut self, surface: &mut impl DisplaySurface) {
        self.buffer = surface.get_text();
        if !self.dirty {
            self.dirty = true;
            surface.set_title(self.path(), true);
        }
    }

    pub fn new_document(&mut self, surface: &mut impl DisplaySurface) {
        self.path = None;
        self.buffer.clear();
        self.dirty = false;

        surface.set_text("");
        surface.set_title(None, false);
        self.status(surface, "New file created");
        log::info!("started a new untitled document");
    }

    pub fn open_prompted(&mut self, surface: &mut impl DisplaySurface) -> Outcome {
        let selected = surface.prompt_open_path(TEXT_FILTERS);
        self.open(surface, selected)
    }

    pub fn open(&mut self, surface: &mut impl DisplaySurface, selected: Option<PathBuf>) -> Outcome {
        let Some(path) = selected else {
            log::debug!("open cancelled");
            return Outcome::Cancelled;
        };

        match self.storage.read_text(&path) {
            Ok(text) => {
                surface.set_text(&text);
                surface.set_title(Some(&path), false);
                let message = format!("Opened: {}", title_for(Some(&path)));
                self.status(surface, &message);
                log::info!("opened {} ({} bytes)", path.display(), text.len());

                self.buffer = text;
                self.path = Some(path);
                self.dirty = false;
                Outcome::Done
            }
            Err(err) => {
                log::warn!("{err}");
                surface.show_error(ERROR_TITLE, &format!("Failed to open file:\n{err}"));
                Outcome::Failed
            }
        }
    }

    /// Writes to the current path, or asks for one when the document has
    /// never been saved.
    pub fn save(&mut self, surface: &mut impl DisplaySurface) -> Outcome {
        let Some(path) = self.path.clone() else {
            return self.save_as_prompted(surface);
        };

        let text = surface.get_text();
        if !self.write(surface, &path, &text) {
            return Outcome::Failed;
        }

        self.buffer = text;
        self.dirty = false;
        surface.set_title(Some(&path), false);
        let message = format!("Saved: {}", title_for(Some(&path)));
        self.status(surface, &message);
        Outcome::Done
    }

    pub fn save_as_prompted(&mut self, surface: &mut impl DisplaySurface) -> Outcome {
        let selected = surface.prompt_save_path(TEXT_FILTERS, DEFAULT_EXTENSION);
        self.save_as(surface, selected)
    }

    pub fn save_as(
        &mut self,
        surface: &mut impl DisplaySurface,
        selected: Option<PathBuf>,
    ) -> Outcome {
        let Some(path) = selected else {
            log::debug!("save as cancelled");
            return Outcome::Cancelled;
        };

        let text = surface.get_text();
        if !self.write(surface, &path, &text) {
            return Outcome::Failed;
        }

        surface.set_title(Some(&path), false);
        let message = format!("Saved as: {}", title_for(Some(&path)));
        self.status(surface, &message);

        self.buffer = text;
        self.path = Some(path);
        self.dirty = false;
        Outcome::Done
    }

    /// Decides whether the current buffer may be thrown away, asking the
    /// user when it has unsaved changes. Returns `false` when the caller
    /// must keep the document.
    pub fn settle_unsaved(&mut self, surface: &mut impl DisplaySurface) -> bool {
        if !self.dirty {
            return true;
        }

        let message = format!(
            "\"{}\" has unsaved changes. Do you want to save them?",
            self.title()
        );
        match surface.confirm_three_way(UNSAVED_TITLE, &message) {
            Choice::Save => self.save(surface).is_done(),
            Choice::Discard => true,
            Choice::Cancel => false,
        }
    }

    pub fn close(&mut self, surface: &mut impl DisplaySurface) -> CloseDecision {
        let decision = if self.settle_unsaved(surface) {
            CloseDecision::Exit
        } else {
            CloseDecision::Stay
        };
        log::debug!("close requested: {decision:?}");
        decision
    }

    fn write(&self, surface: &mut impl DisplaySurface, path: &Path, text: &str) -> bool {
        match self.storage.write_text(path, text) {
            Ok(()) => {
                log::info!("saved {} ({} bytes)", path.display(), text.len());
                true
            }
            Err(err) => {
                log::warn!("{err}");
                surface.show_error(ERROR_TITLE, &format!("Failed to save file:\n{err}"));
                false
            }
        }
    }

    fn status(&self, surface: &mut impl DisplaySurface, message: &str) {
        surface.set_status(message, Some(self.status_clear_after));
    }
}
