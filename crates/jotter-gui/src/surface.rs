#![forbid(unsafe_code)]

use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use eframe::egui;
use jotter_core::{
    Choice, DisplaySurface, FileFilter, READY_STATUS, title_for, with_default_extension,
};

pub(crate) fn window_title(path: Option<&Path>, dirty: bool) -> String {
    format!(
        "jotter - {}{}",
        title_for(path),
        if dirty { "*" } else { "" }
    )
}

/// Transient status text that falls back to "Ready" once its deadline passes.
#[derive(Debug)]
pub(crate) struct StatusLine {
    message: String,
    clear_at: Option<Instant>,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_owned(),
            clear_at: None,
        }
    }
}

impl StatusLine {
    fn set(&mut self, message: &str, clear_after: Option<Duration>, now: Instant) {
        message.clone_into(&mut self.message);
        // A deadline past what `Instant` can hold just never expires.
        self.clear_at = clear_after.and_then(|after| now.checked_add(after));
    }

    fn message(&self) -> &str {
        &self.message
    }

    /// Returns how long the current message has left, if it expires.
    fn tick(&mut self, now: Instant) -> Option<Duration> {
        let deadline = self.clear_at?;
        if now >= deadline {
            READY_STATUS.clone_into(&mut self.message);
            self.clear_at = None;
            return None;
        }
        Some(deadline - now)
    }
}

/// The editor window as seen by the document session: the text widget's
/// backing string plus native dialogs.
pub(crate) struct EguiSurface {
    ctx: egui::Context,
    pub(crate) text: String,
    status: StatusLine,
}

impl EguiSurface {
    pub(crate) fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            text: String::new(),
            status: StatusLine::default(),
        }
    }

    pub(crate) fn status(&self) -> &str {
        self.status.message()
    }

    pub(crate) fn tick_status(&mut self) {
        if let Some(remaining) = self.status.tick(Instant::now()) {
            self.ctx.request_repaint_after(remaining);
        }
    }
}

impl DisplaySurface for EguiSurface {
    fn get_text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }

    fn set_title(&mut self, path: Option<&Path>, dirty: bool) {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Title(window_title(path, dirty)));
    }

    fn set_status(&mut self, message: &str, clear_after: Option<Duration>) {
        self.status.set(message, clear_after, Instant::now());
        self.ctx.request_repaint();
    }

    fn prompt_open_path(&mut self, filters: &[FileFilter]) -> Option<PathBuf> {
        file_dialog(filters).pick_file()
    }

    fn prompt_save_path(
        &mut self,
        filters: &[FileFilter],
        default_extension: &str,
    ) -> Option<PathBuf> {
        file_dialog(filters)
            .set_file_name(format!("untitled.{default_extension}"))
            .save_file()
            .map(|path| with_default_extension(path, default_extension))
    }

    fn confirm_three_way(&mut self, title: &str, message: &str) -> Choice {
        let answer = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::YesNoCancel)
            .show();

        match answer {
            rfd::MessageDialogResult::Yes => Choice::Save,
            rfd::MessageDialogResult::No => Choice::Discard,
            _ => Choice::Cancel,
        }
    }

    fn show_error(&mut self, title: &str, message: &str) {
        let _ = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

fn file_dialog(filters: &[FileFilter]) -> rfd::FileDialog {
    filters.iter().fold(rfd::FileDialog::new(), |dialog, filter| {
        dialog.add_filter(filter.name, filter.extensions)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_title_marks_unsaved_changes() {
        assert_eq!(window_title(None, false), "jotter - Untitled");
        assert_eq!(window_title(None, true), "jotter - Untitled*");
        assert_eq!(
            window_title(Some(Path::new("/tmp/notes.txt")), true),
            "jotter - notes.txt*"
        );
    }

    #[test]
    fn status_starts_ready() {
        assert_eq!(StatusLine::default().message(), READY_STATUS);
    }

    #[test]
    fn status_reverts_after_its_deadline() {
        let start = Instant::now();
        let mut status = StatusLine::default();
        status.set("Saved: a.txt", Some(Duration::from_secs(3)), start);

        assert_eq!(
            status.tick(start + Duration::from_secs(1)),
            Some(Duration::from_secs(2))
        );
        assert_eq!(status.message(), "Saved: a.txt");

        assert_eq!(status.tick(start + Duration::from_secs(3)), None);
        assert_eq!(status.message(), READY_STATUS);
    }

    #[test]
    fn status_without_deadline_stays() {
        let start = Instant::now();
        let mut status = StatusLine::default();
        status.set("Working", None, start);

        assert_eq!(status.tick(start + Duration::from_secs(60)), None);
        assert_eq!(status.message(), "Working");
    }

    #[test]
    fn huge_clear_delay_never_expires() {
        let start = Instant::now();
        let mut status = StatusLine::default();
        status.set("Saved: a.txt", Some(Duration::MAX), start);
        status.tick(start + Duration::from_secs(3600));
        assert_eq!(status.message(), "Saved: a.txt");

        status.set("Opened: a.txt", Some(Duration::from_secs(i64::MAX as u64)), start);
        status.tick(start + Duration::from_secs(3600));
        assert_eq!(status.message(), "Opened: a.txt");
    }

    #[test]
    fn newer_status_replaces_the_deadline() {
        let start = Instant::now();
        let mut status = StatusLine::default();
        status.set("Opened: a.txt", Some(Duration::from_secs(3)), start);
        status.set("Saved: a.txt", Some(Duration::from_secs(3)), start + Duration::from_secs(2));

        assert!(status.tick(start + Duration::from_secs(4)).is_some());
        assert_eq!(status.message(), "Saved: a.txt");
    }
}
