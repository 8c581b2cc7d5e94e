use eframe::egui::{self, Color32, Sense, Stroke, StrokeKind, Ui};

use crate::layout::Layout;
use crate::viewer::{SATELLITE_SIZE, VIEWER_SIZE, ViewTransform};

use super::super::ViewModel;
use super::super::render_utils::{PICKED_COLOR, kind_color};

impl ViewModel {
    /// Overview of the whole layout; clicking or dragging recentres the main view.
    pub(in crate::app) fn draw_satellite(&mut self, ui: &mut Ui) {
        let size = egui::vec2(ui.available_width().max(SATELLITE_SIZE.x), SATELLITE_SIZE.y);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 2.0, Color32::from_rgb(27, 32, 40));

        let layout_size = self.session.layout().size().unwrap_or(VIEWER_SIZE);
        let overview = ViewTransform::fit(layout_size, rect);

        if (response.clicked() || response.dragged())
            && let Some(pointer) = response.interact_pointer_pos()
        {
            let world = overview.screen_to_world(rect, pointer);
            let main = self.viewport_rect();
            self.transform.center_on(main, world);
        }

        let graph = self.session.graph();
        let layout = self.session.layout();
        let picked_vertices = self.session.picked_vertices();
        let picked_edges = self.session.picked_edges();

        for edge in graph.edges() {
            let (subject, object) = graph.endpoints(edge);
            let (Some(start), Some(end)) = (layout.position(subject), layout.position(object))
            else {
                continue;
            };
            let color = if picked_edges.is_picked(edge) {
                PICKED_COLOR
            } else {
                Color32::from_rgba_unmultiplied(150, 160, 172, 110)
            };
            painter.line_segment(
                [
                    overview.world_to_screen(rect, start),
                    overview.world_to_screen(rect, end),
                ],
                Stroke::new(0.6, color),
            );
        }

        for vertex in graph.vertices() {
            let Some(position) = layout.position(vertex) else {
                continue;
            };
            let center = overview.world_to_screen(rect, position);
            if picked_vertices.is_picked(vertex) {
                painter.circle_filled(center, 2.6, PICKED_COLOR);
            } else {
                painter.circle_filled(center, 1.6, kind_color(graph.node(vertex).kind()));
            }
        }

        let visible = self.transform.visible_world_rect(self.viewport_rect());
        let frame = egui::Rect::from_min_max(
            overview.world_to_screen(rect, visible.min),
            overview.world_to_screen(rect, visible.max),
        );
        painter.rect_stroke(
            frame.intersect(rect),
            0.0,
            Stroke::new(1.2, Color32::from_rgb(103, 196, 255)),
            StrokeKind::Inside,
        );
    }
}
