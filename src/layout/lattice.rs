use std::cmp::Ordering;
use std::collections::HashSet;

use eframe::egui::{Pos2, Vec2, pos2};

use crate::error::GraphError;
use crate::graph::ModelGraph;
use crate::rdf::NodeId;

use super::{Layout, Positions};

const COLUMN_PITCH: f32 = 50.0;
const COLUMN_ORIGIN: f32 = 30.0;
const ROW_ORIGIN: f32 = 20.0;
const SIDE_MARGIN: f32 = 10.0;

pub struct LatticeLayout {
    graph: ModelGraph,
    size: Option<Vec2>,
    order: Option<Vec<NodeId>>,
    positions: Positions,
}

impl LatticeLayout {
    pub fn new(graph: ModelGraph) -> Self {
        let positions = Positions::with_capacity(graph.vertex_count());
        Self {
            graph,
            size: None,
            order: None,
            positions,
        }
    }

    /// Uses `order` for placement; it has to name every vertex of the graph.
    pub fn set_vertex_order(&mut self, order: Vec<NodeId>) -> Result<(), GraphError> {
        if let Some(unknown) = order.iter().find(|v| !self.graph.contains_vertex(**v)) {
            return Err(GraphError::InvalidArgument(format!(
                "vertex {} is not part of the graph",
                unknown.index()
            )));
        }

        let listed = order.iter().copied().collect::<HashSet<_>>();
        let missing = self.graph.vertices().filter(|v| !listed.contains(v)).count();
        if missing > 0 {
            return Err(GraphError::InvalidArgument(format!(
                "supplied order must include all vertices of the graph ({missing} missing)"
            )));
        }

        self.order = Some(order);
        Ok(())
    }

    /// Sorts the current order (the graph order if none was set) with `compare`.
    pub fn sort_vertex_order_by<F>(&mut self, compare: F)
    where
        F: FnMut(&NodeId, &NodeId) -> Ordering,
    {
        let order = self
            .order
            .get_or_insert_with(|| self.graph.vertices().collect());
        order.sort_by(compare);
    }

    pub fn columns(width: f32) -> usize {
        (((width - SIDE_MARGIN) / COLUMN_PITCH).floor() as usize).max(1)
    }

    pub fn row_height(height: f32, vertex_count: usize, columns: usize) -> f32 {
        let rows = (vertex_count / columns).max(1);
        (height / rows as f32).floor()
    }
}

impl Layout for LatticeLayout {
    fn graph(&self) -> &ModelGraph {
        &self.graph
    }

    fn initialize(&mut self) {
        let Some(size) = self.size else {
            return;
        };

        let order = self
            .order
            .get_or_insert_with(|| self.graph.vertices().collect());
        let columns = Self::columns(size.x);
        let row_height = Self::row_height(size.y, self.graph.vertex_count(), columns);

        for (index, vertex) in order.iter().enumerate() {
            let column = index % columns;
            let row = index / columns;
            self.positions.set(
                *vertex,
                pos2(
                    column as f32 * COLUMN_PITCH + COLUMN_ORIGIN,
                    ROW_ORIGIN + row as f32 * row_height,
                ),
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
    use crate::graph::tests::{EX, ex};
    use crate::rdf::TripleStore;

    fn chain(length: usize) -> ModelGraph {
        let mut store = TripleStore::new();
        for index in 0..length.saturating_sub(1) {
            store
                .insert(
                    ex(&format!("n{index}")),
                    &format!("{EX}next"),
                    ex(&format!("n{}", index + 1)),
                )
                .unwrap();
        }
        ModelGraph::new(Arc::new(store))
    }

    #[test]
    fn grid_follows_the_placement_formula() {
        let graph = chain(12);
        let mut layout = LatticeLayout::new(graph.clone());
        let (width, height) = (220.0, 300.0);
        layout.set_size(vec2(width, height));

        let columns = 4;
        assert_eq!(LatticeLayout::columns(width), columns);
        let row_height = (height / (12 / columns) as f32).floor();
        assert_eq!(row_height, 100.0);

        for (index, vertex) in graph.vertices().enumerate() {
            let expected = pos2(
                (index % columns) as f32 * 50.0 + 30.0,
                20.0 + (index / columns) as f32 * row_height,
            );
            assert_eq!(layout.position(vertex), Some(expected));
        }
    }

    #[test]
    fn unsized_layout_places_nothing() {
        let graph = chain(3);
        let mut layout = LatticeLayout::new(graph.clone());
        layout.initialize();
        assert!(graph.vertices().all(|v| layout.position(v).is_none()));
    }

    #[test]
    fn explicit_order_is_respected() {
        let graph = chain(3);
        let mut reversed = graph.vertices().collect::<Vec<_>>();
        reversed.reverse();

        let mut layout = LatticeLayout::new(graph.clone());
        layout.set_vertex_order(reversed.clone()).unwrap();
        layout.set_size(vec2(960.0, 780.0));

        assert_eq!(layout.position(reversed[0]), Some(pos2(30.0, 20.0)));
        assert_eq!(layout.position(reversed[2]), Some(pos2(130.0, 20.0)));
    }

    #[test]
    fn incomplete_order_is_rejected() {
        let graph = chain(3);
        let partial = graph.vertices().take(2).collect::<Vec<_>>();

        let mut layout = LatticeLayout::new(graph);
        let result = layout.set_vertex_order(partial);
        assert!(matches!(result, Err(GraphError::InvalidArgument(_))));
    }

    #[test]
    fn comparator_order_sorts_by_label() {
        let graph = chain(3);
        let mut layout = LatticeLayout::new(graph.clone());
        layout.sort_vertex_order_by(|a, b| {
            graph
                .node(*b)
                .to_string()
                .cmp(&graph.node(*a).to_string())
        });
        layout.set_size(vec2(960.0, 780.0));

        let last = graph.store().find_node(&ex("n2")).unwrap();
        assert_eq!(layout.position(last), Some(pos2(30.0, 20.0)));
    }

    #[test]
    fn degenerate_sizes_still_place_every_vertex() {
        let graph = chain(2);
        let mut layout = LatticeLayout::new(graph.clone());
        layout.set_size(vec2(20.0, 10.0));
        assert!(graph.vertices().all(|v| layout.position(v).is_some()));
    }
}
