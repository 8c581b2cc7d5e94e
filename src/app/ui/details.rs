use eframe::egui::{self, Color32, RichText, Ui};

use super::super::ViewModel;
use super::super::render_utils::kind_color;

const DETAIL_TEXT: Color32 = Color32::from_rgb(24, 28, 34);

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selection Details");
        ui.add_space(6.0);

        if self.vertex_details.is_empty() && self.edge_details.is_empty() {
            ui.label("Pick vertices or statements in the graph, or select a resource in the tree.");
            return;
        }

        egui::ScrollArea::vertical()
            .id_salt("details_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if !self.vertex_details.is_empty() {
                    ui.label(RichText::new(format!("Vertices ({})", self.vertex_details.len())).strong());
                    for detail in &self.vertex_details {
                        egui::Frame::new()
                            .fill(kind_color(detail.kind))
                            .inner_margin(6.0)
                            .corner_radius(3.0)
                            .show(ui, |ui| {
                                ui.set_width(ui.available_width());
                                ui.label(RichText::new(detail.kind.label()).small().color(DETAIL_TEXT));
                                ui.label(RichText::new(&detail.text).color(DETAIL_TEXT));
                            });
                        ui.add_space(4.0);
                    }
                }

                if !self.edge_details.is_empty() {
                    ui.separator();
                    ui.label(RichText::new(format!("Statements ({})", self.edge_details.len())).strong());
                    for detail in &self.edge_details {
                        egui::Frame::group(ui.style()).show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.label(&detail.subject);
                            ui.label(RichText::new(&detail.predicate).strong());
                            ui.label(&detail.object);
                        });
                        ui.add_space(4.0);
                    }
                }
            });
    }
}
