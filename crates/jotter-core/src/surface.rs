use std::{
    borrow::Cow,
    path::{Path, PathBuf},
    time::Duration,
};

pub const UNTITLED: &str = "Untitled";
pub const READY_STATUS: &str = "Ready";
pub const DEFAULT_EXTENSION: &str = "txt";
pub const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(3);

/// A named group of extensions offered by the file pickers. `*` matches
/// any file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
}

pub const TEXT_FILTERS: &[FileFilter] = &[
    FileFilter {
        name: "Text Files",
        extensions: &["txt"],
    },
    FileFilter {
        name: "Python Files",
        extensions: &["py"],
    },
    FileFilter {
        name: "HTML Files",
        extensions: &["html", "htm"],
    },
    FileFilter {
        name: "CSS Files",
        extensions: &["css"],
    },
    FileFilter {
        name: "JavaScript Files",
        extensions: &["js"],
    },
    FileFilter {
        name: "All Files",
        extensions: &["*"],
    },
];

/// Answer to the unsaved-changes prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    Save,
    Discard,
    Cancel,
}

/// Everything the session needs from the UI. Prompts block until the user
/// answers; a `None` path means the picker was dismissed.
pub trait DisplaySurface {
    fn get_text(&self) -> String;
    fn set_text(&mut self, text: &str);
    fn set_title(&mut self, path: Option<&Path>, dirty: bool);
    fn set_status(&mut self, message: &str, clear_after: Option<Duration>);
    fn prompt_open_path(&mut self, filters: &[FileFilter]) -> Option<PathBuf>;
    fn prompt_save_path(
        &mut self,
        filters: &[FileFilter],
        default_extension: &str,
    ) -> Option<PathBuf>;
    fn confirm_three_way(&mut self, title: &str, message: &str) -> Choice;
    fn show_error(&mut self, title: &str, message: &str);
}

/// File name shown in titles and status messages.
pub fn title_for(path: Option<&Path>) -> Cow<'_, str> {
    path.and_then(Path::file_name)
        .map_or(Cow::Borrowed(UNTITLED), |name| name.to_string_lossy())
}

pub fn with_default_extension(path: PathBuf, extension: &str) -> PathBuf {
    if path.extension().is_some() || extension.is_empty() {
        path
    } else {
        path.with_extension(extension)
    }
}
