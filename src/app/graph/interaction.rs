use eframe::egui::{self, Pos2, Rect, Ui};

use crate::layout::Layout;
use crate::rdf::{EdgeId, NodeId};
use crate::viewer::{self, EDGE_PICK_TOLERANCE, VERTEX_RADIUS, VIEWER_SIZE};

use super::super::ViewModel;

#[derive(Clone, Copy)]
pub(super) enum Hit {
    Vertex(NodeId),
    Edge(EdgeId),
}

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let factor = if scroll > 0.0 {
            viewer::ZOOM_STEP
        } else {
            1.0 / viewer::ZOOM_STEP
        };
        self.transform.zoom_about(rect, pointer, factor);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        let background_drag =
            self.dragging.is_none() && response.dragged_by(egui::PointerButton::Primary);
        if background_drag
            || response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.transform.pan(response.drag_delta());
        }
    }

    /// Screen position of every vertex, indexed by vertex id.
    pub(super) fn screen_positions(&self, rect: Rect) -> Vec<Option<Pos2>> {
        let layout = self.session.layout();
        self.session
            .graph()
            .vertices()
            .map(|vertex| {
                layout
                    .position(vertex)
                    .map(|world| self.transform.world_to_screen(rect, world))
            })
            .collect()
    }

    pub(super) fn hit_test(&self, screen: &[Option<Pos2>], pointer: Pos2) -> Option<Hit> {
        let graph = self.session.graph();
        let vertices = graph
            .vertices()
            .filter_map(|vertex| screen[vertex.index()].map(|position| (vertex, position)));
        if let Some(vertex) = viewer::hit_vertex(vertices, pointer, self.vertex_radius()) {
            return Some(Hit::Vertex(vertex));
        }

        let segments = graph.edges().filter_map(|edge| {
            let (subject, object) = graph.endpoints(edge);
            Some((edge, screen[subject.index()]?, screen[object.index()]?))
        });
        viewer::hit_edge(segments, pointer, EDGE_PICK_TOLERANCE).map(Hit::Edge)
    }

    pub(super) fn vertex_radius(&self) -> f32 {
        (VERTEX_RADIUS * self.transform.scale.sqrt()).clamp(3.0, 24.0)
    }

    /// Starts, continues or ends a vertex drag. Returns `true` while dragging.
    pub(super) fn handle_vertex_drag(
        &mut self,
        ui: &Ui,
        response: &egui::Response,
        screen: &[Option<Pos2>],
    ) -> bool {
        if response.drag_started_by(egui::PointerButton::Primary) {
            let origin = ui.input(|input| input.pointer.press_origin());
            self.dragging = origin.and_then(|pointer| match self.hit_test(screen, pointer) {
                Some(Hit::Vertex(vertex)) => Some(vertex),
                _ => None,
            });
        }

        let Some(vertex) = self.dragging else {
            return false;
        };

        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta() / self.transform.scale;
            if delta != egui::Vec2::ZERO {
                self.session.drag_vertex(vertex, delta);
                self.session.expand_to_fit(VIEWER_SIZE);
            }
        }

        if response.drag_stopped() {
            self.dragging = None;
        }
        true
    }

    pub(super) fn handle_click(&mut self, response: &egui::Response, screen: &[Option<Pos2>]) {
        if !response.clicked_by(egui::PointerButton::Primary) {
            return;
        }
        let Some(pointer) = response.interact_pointer_pos() else {
            return;
        };

        match self.hit_test(screen, pointer) {
            Some(Hit::Vertex(vertex)) => {
                self.session.toggle_vertex(vertex);
            }
            Some(Hit::Edge(edge)) => {
                self.session.toggle_edge(edge);
            }
            None => self.session.clear_picks(),
        }
    }
}
