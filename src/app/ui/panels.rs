use eframe::egui::{self, Align, Context, Layout, Rect};

use crate::layout::{Layout as _, LayoutKind};
use crate::session::Session;
use crate::tree::MatchMode;
use crate::util::short_name;
use crate::viewer::{VIEWER_SIZE, ViewTransform};

use super::super::{EdgeDetail, OpenDialog, SnailNavigatorApp, VertexDetail, ViewModel};

enum MenuAction {
    Open,
    Exit,
    Measures,
    About,
}

impl SnailNavigatorApp {
    pub(in crate::app) fn draw_menu_bar(&mut self, ctx: &Context) {
        let mut action = None;

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open…").clicked() {
                        action = Some(MenuAction::Open);
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        action = Some(MenuAction::Exit);
                        ui.close();
                    }
                });
                ui.menu_button("Tools", |ui| {
                    let enabled = self.view.is_some();
                    if ui
                        .add_enabled(enabled, egui::Button::new("Measures"))
                        .clicked()
                    {
                        action = Some(MenuAction::Measures);
                        ui.close();
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        action = Some(MenuAction::About);
                        ui.close();
                    }
                });
            });
        });

        match action {
            Some(MenuAction::Open) => {
                let uri = self.recent_uris.first().cloned().unwrap_or_default();
                self.open_dialog = Some(OpenDialog { uri });
            }
            Some(MenuAction::Exit) => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            Some(MenuAction::Measures) => self.start_distances(),
            Some(MenuAction::About) => self.show_about = true,
            None => {}
        }
    }
}

impl ViewModel {
    pub(in crate::app) fn new(mut session: Session) -> Self {
        let vertex_events = session.picked_vertices_mut().subscribe();
        let edge_events = session.picked_edges_mut().subscribe();
        let filtered_tree = session.tree().clone();

        Self {
            session,
            transform: ViewTransform::default(),
            viewport: None,
            tree_filter: String::new(),
            match_mode: MatchMode::Substring,
            filtered_tree,
            filtered_for: (String::new(), MatchMode::Substring),
            expand_tree: true,
            selected_path: None,
            vertex_events,
            edge_events,
            vertex_details: Vec::new(),
            edge_details: Vec::new(),
            dragging: None,
            show_edge_labels: false,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        self.refresh_details();

        egui::TopBottomPanel::bottom("status_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(short_name(self.session.uri()))
                        .on_hover_text(self.session.uri());
                    ui.separator();
                    ui.label(format!("vertices: {}", self.session.graph().vertex_count()));
                    ui.label(format!("statements: {}", self.session.graph().edge_count()));
                    ui.label(format!(
                        "picked: {} / {}",
                        self.session.picked_vertices().len(),
                        self.session.picked_edges().len()
                    ));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!("zoom {:.0}%", self.transform.scale * 100.0));
                        if !self.session.layout().is_done() {
                            ui.spinner();
                        }
                    });
                });
            });

        egui::SidePanel::left("resources")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_tree_panel(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                self.draw_satellite(ui);
                ui.separator();
                self.draw_details(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_toolbar(ui);
            ui.separator();
            self.draw_graph(ui);
        });
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        let rect = self.viewport_rect();

        ui.horizontal(|ui| {
            let mut kind = self.session.layout_kind();
            for candidate in LayoutKind::ALL {
                ui.selectable_value(&mut kind, candidate, candidate.label());
            }
            if kind != self.session.layout_kind() {
                self.session.set_layout(kind, VIEWER_SIZE);
                self.transform = ViewTransform::default();
            }

            ui.separator();
            if ui.button("+").on_hover_text("Zoom in").clicked() {
                self.transform.zoom_in(rect);
            }
            if ui.button("−").on_hover_text("Zoom out").clicked() {
                self.transform.zoom_out(rect);
            }
            if ui.button("Fit").clicked() {
                let size = self.session.layout().size().unwrap_or(VIEWER_SIZE);
                self.transform = ViewTransform::fit(size, rect);
            }
            if ui.button("Relayout").clicked() {
                self.session.layout_mut().reset();
            }

            ui.separator();
            ui.checkbox(&mut self.show_edge_labels, "Edge labels");
        });
    }

    pub(in crate::app) fn viewport_rect(&self) -> Rect {
        self.viewport
            .unwrap_or_else(|| Rect::from_min_size(egui::Pos2::ZERO, VIEWER_SIZE))
    }

    /// Rebuilds the detail rows once per pick event.
    fn refresh_details(&mut self) {
        if let Some(event) = self.vertex_events.try_iter().last() {
            let graph = self.session.graph();
            self.vertex_details = event
                .picked
                .iter()
                .map(|vertex| {
                    let node = graph.node(*vertex);
                    VertexDetail {
                        kind: node.kind(),
                        text: node.to_string(),
                    }
                })
                .collect();
        }

        if let Some(event) = self.edge_events.try_iter().last() {
            let graph = self.session.graph();
            self.edge_details = event
                .picked
                .iter()
                .map(|edge| {
                    let statement = graph.statement(*edge);
                    EdgeDetail {
                        subject: graph.node(statement.subject).to_string(),
                        predicate: graph.predicate_string(*edge).to_owned(),
                        object: graph.node(statement.object).to_string(),
                    }
                })
                .collect();
        }
    }
}
