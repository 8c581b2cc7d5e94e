use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};

use crate::layout::Layout;

use super::super::ViewModel;
use super::super::render_utils::{
    HOVER_COLOR, PICKED_COLOR, blend_color, circle_visible, draw_background, draw_directed_edge,
    edge_visible, kind_color,
};
use super::interaction::Hit;

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.viewport = Some(rect);
        let painter = ui.painter_at(rect);

        if self.session.step_layout() {
            ui.ctx().request_repaint();
        }

        self.handle_graph_zoom(ui, rect, &response);

        let screen = self.screen_positions(rect);
        let vertex_dragged = self.handle_vertex_drag(ui, &response, &screen);
        if !vertex_dragged {
            self.handle_graph_pan(&response);
        }
        self.handle_click(&response, &screen);

        // Positions may have moved during interaction.
        let screen = self.screen_positions(rect);
        draw_background(&painter, rect, &self.transform);

        let hovered = response
            .hover_pos()
            .and_then(|pointer| self.hit_test(&screen, pointer));
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let graph = self.session.graph();
        let picked_vertices = self.session.picked_vertices();
        let picked_edges = self.session.picked_edges();
        let radius = self.vertex_radius();
        let zoom_sqrt = self.transform.scale.sqrt();
        let label_font = FontId::proportional(11.0);

        for edge in graph.edges() {
            let (subject, object) = graph.endpoints(edge);
            let (Some(start), Some(end)) = (screen[subject.index()], screen[object.index()]) else {
                continue;
            };
            if !edge_visible(rect, start, end, radius) {
                continue;
            }

            let is_picked = picked_edges.is_picked(edge);
            let is_hovered = matches!(hovered, Some(Hit::Edge(hovered)) if hovered == edge);
            let (width, color) = if is_picked {
                ((2.4 * zoom_sqrt).clamp(1.4, 4.4), PICKED_COLOR)
            } else if is_hovered {
                ((1.8 * zoom_sqrt).clamp(1.2, 3.6), HOVER_COLOR)
            } else {
                (
                    (1.1 * zoom_sqrt).clamp(0.6, 2.8),
                    Color32::from_rgba_unmultiplied(150, 160, 172, 190),
                )
            };

            if subject == object {
                painter.circle_stroke(
                    start + vec2(0.0, -radius * 1.6),
                    radius * 0.9,
                    Stroke::new(width, color),
                );
            } else {
                draw_directed_edge(&painter, start, end, radius, Stroke::new(width, color));
            }

            if self.show_edge_labels || is_picked || is_hovered {
                painter.text(
                    start + (end - start) * 0.5,
                    Align2::CENTER_BOTTOM,
                    graph.edge_label(edge),
                    label_font.clone(),
                    Color32::from_gray(200),
                );
            }
        }

        for vertex in graph.vertices() {
            let Some(position) = screen[vertex.index()] else {
                continue;
            };
            if !circle_visible(rect, position, radius) {
                continue;
            }

            let is_picked = picked_vertices.is_picked(vertex);
            let is_hovered = matches!(hovered, Some(Hit::Vertex(hovered)) if hovered == vertex);
            let base = kind_color(graph.node(vertex).kind());
            let color = if is_hovered {
                blend_color(base, HOVER_COLOR, 0.55)
            } else {
                base
            };

            painter.circle_filled(position, radius, color);
            let outline = if is_picked {
                Stroke::new(2.6, PICKED_COLOR)
            } else {
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190))
            };
            painter.circle_stroke(position, radius, outline);

            if is_picked || is_hovered || self.transform.scale > 0.7 {
                painter.text(
                    position + vec2(radius + 4.0, 0.0),
                    Align2::LEFT_CENTER,
                    graph.vertex_label(vertex),
                    label_font.clone(),
                    Color32::from_gray(238),
                );
            }
        }

        if let Some(hit) = hovered {
            let text = match hit {
                Hit::Vertex(vertex) => graph.node(vertex).to_string(),
                Hit::Edge(edge) => {
                    let (subject, object) = graph.endpoints(edge);
                    format!(
                        "{}  {}  {}",
                        graph.vertex_label(subject),
                        graph.edge_label(edge),
                        graph.vertex_label(object)
                    )
                }
            };
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                text,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        if response.dragged() || !self.session.layout().is_done() {
            ui.ctx().request_repaint();
        }
    }
}
