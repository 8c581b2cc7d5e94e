use std::time::Duration;

use eframe::egui::{self, Context, RichText};

use crate::util::{format_distance, truncate_label};

use super::super::SnailNavigatorApp;

impl SnailNavigatorApp {
    pub(in crate::app) fn draw_open_dialog(&mut self, ctx: &Context) {
        let Some(dialog) = self.open_dialog.as_mut() else {
            return;
        };

        let mut load = false;
        let mut cancel = false;
        egui::Window::new("Open")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("File path or URI (file://, http://, https://)");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut dialog.uri).desired_width(420.0),
                );
                if response.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter)) {
                    load = true;
                }

                if !self.recent_uris.is_empty() {
                    egui::ComboBox::from_id_salt("recent_uris")
                        .selected_text("Recent")
                        .width(420.0)
                        .show_ui(ui, |ui| {
                            for uri in &self.recent_uris {
                                ui.selectable_value(&mut dialog.uri, uri.clone(), truncate_label(uri, 64));
                            }
                        });
                }

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("Load").clicked() {
                        load = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if load {
            let uri = dialog.uri.clone();
            self.open_dialog = None;
            self.start_load(uri);
        } else if cancel {
            self.open_dialog = None;
        }
    }

    pub(in crate::app) fn draw_distance_window(&mut self, ctx: &Context) {
        let Some(window) = self.distance_window.as_mut() else {
            return;
        };

        egui::Window::new("Measures")
            .open(&mut window.open)
            .default_width(520.0)
            .show(ctx, |ui| {
                ui.label(RichText::new(&window.uri).small());
                ui.add_space(4.0);
                egui::ScrollArea::vertical()
                    .id_salt("distance_scroll")
                    .max_height(420.0)
                    .show(ui, |ui| {
                        egui::Grid::new("distance_grid")
                            .striped(true)
                            .num_columns(3)
                            .show(ui, |ui| {
                                ui.label(RichText::new("Subject").strong());
                                ui.label(RichText::new("Average distance").strong());
                                ui.label(RichText::new("Closeness").strong());
                                ui.end_row();

                                for row in &window.rows {
                                    ui.label(truncate_label(&row.subject, 60))
                                        .on_hover_text(&row.subject);
                                    ui.label(format_distance(row.average));
                                    ui.label(format_distance(row.closeness()));
                                    ui.end_row();
                                }
                            });
                    });
            });

        if !window.open {
            self.distance_window = None;
        }
    }

    pub(in crate::app) fn draw_about(&mut self, ctx: &Context) {
        egui::Window::new("About Snail Navigator")
            .open(&mut self.show_about)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Snail Navigator {}", env!("CARGO_PKG_VERSION")));
                ui.label("Browse RDF statements as an interactive graph.");
            });
    }

    pub(in crate::app) fn draw_error(&mut self, ctx: &Context) {
        let Some(error) = self.error.as_ref() else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(true)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(error.as_str());
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.error = None;
        }
    }

    pub(in crate::app) fn draw_glass_pane(&mut self, ctx: &Context) {
        let Some(task) = &self.task else {
            return;
        };

        egui::Modal::new(egui::Id::new("glass_pane")).show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(task.message());
            });
        });
        ctx.request_repaint_after(Duration::from_millis(50));
    }
}
