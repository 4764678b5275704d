#![forbid(unsafe_code)]

//! Document lifecycle for `jotter`: one plain-text buffer, an optional
//! backing file, and the open/save/close protocol around them.
//!
//! The GUI crate supplies a [`DisplaySurface`]; the session never touches
//! widgets or dialogs directly.

mod error;
mod session;
mod storage;
mod surface;

pub use error::{IoError, IoOp};
pub use session::{CloseDecision, DocumentSession, Outcome};
pub use storage::{FsStorage, Storage};
pub use surface::{
    Choice, DEFAULT_EXTENSION, DisplaySurface, FileFilter, READY_STATUS, STATUS_CLEAR_AFTER,
    TEXT_FILTERS, UNTITLED, title_for, with_default_extension,
};

/// Hard cap on file sizes we will load into memory.
pub const MAX_FILE_BYTES: u64 = 64 * 1024 * 1024;
