#![forbid(unsafe_code)]

use eframe::egui;

pub(crate) fn editor_id() -> egui::Id {
    egui::Id::new("editor")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EditCommand {
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,
}

impl EditCommand {
    pub(crate) const ALL: [Self; 6] = [
        Self::Undo,
        Self::Redo,
        Self::Cut,
        Self::Copy,
        Self::Paste,
        Self::SelectAll,
    ];

    pub(crate) fn label(self) -> &'static str {
        ["Undo", "Redo", "Cut", "Copy", "Paste", "Select All"][self as usize]
    }

    pub(crate) fn shortcut(self) -> &'static str {
        ["Ctrl+Z", "Ctrl+Y", "Ctrl+X", "Ctrl+C", "Ctrl+V", "Ctrl+A"][self as usize]
    }

    /// Menu entries that start a new group.
    pub(crate) const fn starts_group(self) -> bool {
        matches!(self, Self::Cut | Self::SelectAll)
    }
}

/// Runs `command` against the editor widget. Returns `true` when `text` was
/// changed here; clipboard edits arrive next frame as widget events and show
/// up as a normal `changed()` response.
pub(crate) fn apply(ctx: &egui::Context, text: &mut String, command: EditCommand) -> bool {
    let id = editor_id();
    ctx.memory_mut(|mem| mem.request_focus(id));

    match command {
        EditCommand::Undo => step_history(ctx, text, false),
        EditCommand::Redo => step_history(ctx, text, true),
        EditCommand::Cut => {
            ctx.send_viewport_cmd(egui::ViewportCommand::RequestCut);
            false
        }
        EditCommand::Copy => {
            ctx.send_viewport_cmd(egui::ViewportCommand::RequestCopy);
            false
        }
        EditCommand::Paste => {
            ctx.send_viewport_cmd(egui::ViewportCommand::RequestPaste);
            false
        }
        EditCommand::SelectAll => {
            let mut state = egui::TextEdit::load_state(ctx, id).unwrap_or_default();
            state
                .cursor
                .set_char_range(Some(egui::text::CCursorRange::two(
                    egui::text::CCursor::new(0),
                    egui::text::CCursor::new(text.chars().count()),
                )));
            egui::TextEdit::store_state(ctx, id, state);
            false
        }
    }
}

fn step_history(ctx: &egui::Context, text: &mut String, redo: bool) -> bool {
    let id = editor_id();
    let Some(mut state) = egui::TextEdit::load_state(ctx, id) else {
        return false;
    };
    let Some(range) = state.cursor.char_range() else {
        return false;
    };

    let mut undoer = state.undoer();
    let current = (range, text.clone());
    let step = if redo {
        undoer.redo(&current)
    } else {
        undoer.undo(&current)
    };
    let Some((range, restored)) = step.cloned() else {
        return false;
    };

    *text = restored;
    state.cursor.set_char_range(Some(range));
    state.set_undoer(undoer);
    egui::TextEdit::store_state(ctx, id, state);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_lists_the_usual_edit_commands() {
        let labels = EditCommand::ALL.map(EditCommand::label);
        assert_eq!(
            labels,
            ["Undo", "Redo", "Cut", "Copy", "Paste", "Select All"]
        );
        assert_eq!(EditCommand::Undo.shortcut(), "Ctrl+Z");
        assert_eq!(EditCommand::SelectAll.shortcut(), "Ctrl+A");
    }

    #[test]
    fn groups_split_history_clipboard_and_selection() {
        let starts: Vec<_> = EditCommand::ALL
            .into_iter()
            .filter(|c| c.starts_group())
            .collect();
        assert_eq!(starts, [EditCommand::Cut, EditCommand::SelectAll]);
    }

    #[test]
    fn undo_without_history_leaves_text_alone() {
        let ctx = egui::Context::default();
        let mut text = "hello".to_owned();

        assert!(!apply(&ctx, &mut text, EditCommand::Undo));
        assert!(!apply(&ctx, &mut text, EditCommand::Redo));
        assert_eq!(text, "hello");
    }

    #[test]
    fn select_all_covers_every_char() {
        let ctx = egui::Context::default();
        let mut text = "h\u{e9}llo".to_owned();

        assert!(!apply(&ctx, &mut text, EditCommand::SelectAll));

        let range =
            egui::TextEdit::load_state(&ctx, editor_id()).and_then(|s| s.cursor.char_range());
        let indices = range.map(|r| (r.primary.index, r.secondary.index));
        assert_eq!(indices, Some((5, 0)));
    }
}
