use std::f32::consts::TAU;

use eframe::egui::{Pos2, Vec2, pos2};

use crate::graph::ModelGraph;
use crate::rdf::NodeId;

use super::{Layout, Positions};

pub struct CircleLayout {
    graph: ModelGraph,
    size: Option<Vec2>,
    radius: Option<f32>,
    positions: Positions,
}

impl CircleLayout {
    pub fn new(graph: ModelGraph) -> Self {
        let positions = Positions::with_capacity(graph.vertex_count());
        Self {
            graph,
            size: None,
            radius: None,
            positions,
        }
    }

    /// Overrides the default radius of 0.45 × the shorter side.
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = Some(radius);
    }

    pub fn radius(&self) -> Option<f32> {
        self.radius
            .or_else(|| self.size.map(|size| size.x.min(size.y) * 0.45))
    }
}

impl Layout for CircleLayout {
    fn graph(&self) -> &ModelGraph {
        &self.graph
    }

    fn initialize(&mut self) {
        let (Some(size), Some(radius)) = (self.size, self.radius()) else {
            return;
        };

        let count = self.graph.vertex_count().max(1) as f32;
        let center = pos2(size.x / 2.0, size.y / 2.0);
        for (index, vertex) in self.graph.vertices().enumerate() {
            let angle = TAU * index as f32 / count;
            self.positions.set(
                vertex,
                center + Vec2::angled(angle) * radius,
            );
        }
    }

    fn size(&self) -> Option<Vec2> {
        self.size
    }

    fn set_size(&mut self, size: Vec2) {
        self.size = Some(size);
        self.initialize();
    }

    fn position(&self, vertex: NodeId) -> Option<Pos2> {
        self.positions.get(vertex)
    }

    fn set_position(&mut self, vertex: NodeId, position: Pos2) {
        self.positions.set(vertex, position);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eframe::egui::vec2;

    use super::*;
    use crate::graph::tests::sample_store;

    #[test]
    fn vertices_sit_on_the_inscribed_circle() {
        let graph = ModelGraph::new(Arc::new(sample_store()));
        let mut layout = CircleLayout::new(graph.clone());
        layout.set_size(vec2(400.0, 200.0));

        let center = pos2(200.0, 100.0);
        for vertex in graph.vertices() {
            let distance = layout.position(vertex).unwrap().distance(center);
            assert!((distance - 90.0).abs() < 1e-3, "distance {distance}");
        }

        let first = graph.vertices().next().unwrap();
        let placed = layout.position(first).unwrap();
        assert!((placed.x - 290.0).abs() < 1e-3);
        assert!((placed.y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn custom_radius_wins() {
        let graph = ModelGraph::new(Arc::new(sample_store()));
        let mut layout = CircleLayout::new(graph.clone());
        layout.set_radius(10.0);
        layout.set_size(vec2(400.0, 400.0));

        for vertex in graph.vertices() {
            let distance = layout.position(vertex).unwrap().distance(pos2(200.0, 200.0));
            assert!((distance - 10.0).abs() < 1e-3);
        }
    }
}
