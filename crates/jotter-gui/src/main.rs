#![forbid(unsafe_code)]
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

#[cfg(target_arch = "wasm32")]
compile_error!("jotter is a native desktop app; web/wasm builds are not supported.");

use std::{borrow::Cow, path::Path};

use eframe::egui;
use jotter_core::{CloseDecision, DocumentSession};

mod config;
mod edit_menu;
mod surface;

use config::{Config, FontSize};
use edit_menu::EditCommand;
use surface::{EguiSurface, window_title};

fn main() -> eframe::Result {
    env_logger::init();

    let config = Config::load();
    log::debug!("starting with {config:?}");

    // Viewport sizes are in points, so they scale with the OS DPI factor.
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(window_title(None, false))
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };
    eframe::run_native(
        "jotter",
        options,
        Box::new(move |cc| Ok(Box::new(JotterApp::new(cc.egui_ctx.clone(), config)))),
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    New,
    Open,
    Save,
    SaveAs,
    Exit,
}

impl Command {
    const FILE_MENU: [Self; 5] = [Self::New, Self::Open, Self::Save, Self::SaveAs, Self::Exit];
    const TOOLBAR: [Self; 3] = [Self::Open, Self::Save, Self::SaveAs];

    fn label(self) -> &'static str {
        ["New", "Open", "Save", "Save As", "Exit"][self as usize]
    }

    fn shortcut(self) -> &'static str {
        ["Ctrl+N", "Ctrl+O", "Ctrl+S", "Ctrl+Shift+S", ""][self as usize]
    }

    fn from_input(input: &egui::InputState) -> Option<Self> {
        if !input.modifiers.command {
            return None;
        }
        if input.key_pressed(egui::Key::N) {
            Some(Self::New)
        } else if input.key_pressed(egui::Key::O) {
            Some(Self::Open)
        } else if input.key_pressed(egui::Key::S) {
            Some(if input.modifiers.shift {
                Self::SaveAs
            } else {
                Self::Save
            })
        } else {
            None
        }
    }
}

fn path_label(path: Option<&Path>) -> Cow<'_, str> {
    path.map_or(Cow::Borrowed("Unsaved"), Path::to_string_lossy)
}

struct JotterApp {
    session: DocumentSession,
    surface: EguiSurface,
    font_size: FontSize,
    monospace: bool,
}

impl JotterApp {
    fn new(ctx: egui::Context, config: Config) -> Self {
        Self {
            session: DocumentSession::default().with_status_clear_after(config.status_clear_after()),
            surface: EguiSurface::new(ctx),
            font_size: config.font_size,
            monospace: config.monospace,
        }
    }

    fn run(&mut self, ctx: &egui::Context, command: Command) {
        log::debug!("running {command:?}");
        match command {
            Command::New => {
                if self.session.settle_unsaved(&mut self.surface) {
                    self.session.new_document(&mut self.surface);
                }
            }
            Command::Open => {
                if self.session.settle_unsaved(&mut self.surface) {
                    self.session.open_prompted(&mut self.surface);
                }
            }
            Command::Save => {
                self.session.save(&mut self.surface);
            }
            Command::SaveAs => {
                self.session.save_as_prompted(&mut self.surface);
            }
            // Goes through the same close protocol as the title-bar button.
            Command::Exit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
    }

    fn editor_font(&self) -> egui::FontId {
        let family = if self.monospace {
            egui::FontFamily::Monospace
        } else {
            egui::FontFamily::Proportional
        };
        egui::FontId::new(self.font_size.points(), family)
    }

    fn show_menu_bar(
        &mut self,
        ui: &mut egui::Ui,
        commands: &mut Vec<Command>,
        edits: &mut Vec<EditCommand>,
    ) {
        ui.horizontal(|ui| {
            ui.menu_button("File", |ui| {
                for command in Command::FILE_MENU {
                    if command == Command::Exit {
                        ui.separator();
                    }
                    let button = egui::Button::new(command.label()).shortcut_text(command.shortcut());
                    if ui.add(button).clicked() {
                        commands.push(command);
                    }
                }
            });

            ui.menu_button("Edit", |ui| {
                for edit in EditCommand::ALL {
                    if edit.starts_group() {
                        ui.separator();
                    }
                    let button = egui::Button::new(edit.label()).shortcut_text(edit.shortcut());
                    if ui.add(button).clicked() {
                        edits.push(edit);
                    }
                }
            });

            ui.menu_button("View", |ui| {
                for size in FontSize::ALL {
                    ui.radio_value(&mut self.font_size, size, size.label());
                }
                ui.separator();
                ui.checkbox(&mut self.monospace, "Monospace");
            });
        });
    }

    fn show_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(self.surface.status());
            ui.separator();
            ui.label(path_label(self.session.path()));

            if self.session.is_dirty() {
                ui.separator();
                ui.colored_label(ui.visuals().warn_fg_color, "Modified");
            }
        });
    }
}

impl eframe::App for JotterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested())
            && self.session.close(&mut self.surface) == CloseDecision::Stay
        {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        }

        let mut commands: Vec<Command> = ctx.input(Command::from_input).into_iter().collect();

        let mut edits = Vec::new();
        egui::TopBottomPanel::top("menu")
            .show(ctx, |ui| self.show_menu_bar(ui, &mut commands, &mut edits));

        // Applied before the editor is laid out so it shows the result this frame.
        for edit in edits {
            if edit_menu::apply(ctx, &mut self.surface.text, edit) {
                self.session.note_edited(&mut self.surface);
            }
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for command in Command::TOOLBAR {
                    if ui.button(command.label()).clicked() {
                        commands.push(command);
                    }
                }
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.show_status_bar(ui));

        let font = self.editor_font();
        let mut edited = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    let size = ui.available_size();
                    let editor = egui::TextEdit::multiline(&mut self.surface.text)
                        .desired_width(f32::INFINITY)
                        .min_size(size)
                        .font(font)
                        .frame(false)
                        .id(edit_menu::editor_id());
                    edited = ui.add(editor).changed();
                });
        });

        if edited {
            self.session.note_edited(&mut self.surface);
        }

        for command in commands {
            self.run(ctx, command);
        }

        self.surface.tick_status();
    }
}
