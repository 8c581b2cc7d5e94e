use std::sync::Arc;

use anyhow::Result;
use eframe::egui::{Pos2, Vec2};
use tracing::{debug, info};

use crate::graph::ModelGraph;
use crate::layout::{ExpandableLayout, Layout, LayoutKind};
use crate::picking::PickedState;
use crate::rdf::{self, EdgeId, NodeId, TripleStore};
use crate::tree::{self, SelectionTarget, TreeNode, TreePath};
use crate::viewer;

pub struct LoadedModel {
    pub uri: String,
    pub store: Arc<TripleStore>,
    pub tree: TreeNode,
}

impl LoadedModel {
    pub fn load(uri: &str) -> Result<Self> {
        let store = rdf::load_store(uri)?;
        Ok(Self::from_store(uri, store))
    }

    pub fn from_store(uri: &str, store: TripleStore) -> Self {
        let tree = tree::build_resource_tree(&store);
        Self {
            uri: uri.to_owned(),
            store: Arc::new(store),
            tree,
        }
    }
}

pub struct Session {
    uri: String,
    graph: ModelGraph,
    tree: TreeNode,
    layout_kind: LayoutKind,
    layout: ExpandableLayout,
    picked_vertices: PickedState<NodeId>,
    picked_edges: PickedState<EdgeId>,
    seed: u64,
}

impl Session {
    pub fn new(model: LoadedModel, kind: LayoutKind, viewport: Vec2, seed: u64) -> Self {
        let graph = ModelGraph::new(model.store);
        let layout = Self::build_layout(&graph, kind, viewport, seed);
        info!(
            uri = %model.uri,
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "opened session"
        );

        Self {
            uri: model.uri,
            graph,
            tree: model.tree,
            layout_kind: kind,
            layout,
            picked_vertices: PickedState::new(),
            picked_edges: PickedState::new(),
            seed,
        }
    }

    fn build_layout(
        graph: &ModelGraph,
        kind: LayoutKind,
        viewport: Vec2,
        seed: u64,
    ) -> ExpandableLayout {
        let mut layout = ExpandableLayout::new(kind.build(graph.clone(), seed));
        layout.set_size(viewport);
        layout
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn graph(&self) -> &ModelGraph {
        &self.graph
    }

    pub fn store(&self) -> &TripleStore {
        self.graph.store()
    }

    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    pub fn layout_kind(&self) -> LayoutKind {
        self.layout_kind
    }

    pub fn layout(&self) -> &ExpandableLayout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut ExpandableLayout {
        &mut self.layout
    }

    pub fn picked_vertices(&self) -> &PickedState<NodeId> {
        &self.picked_vertices
    }

    pub fn picked_vertices_mut(&mut self) -> &mut PickedState<NodeId> {
        &mut self.picked_vertices
    }

    pub fn picked_edges(&self) -> &PickedState<EdgeId> {
        &self.picked_edges
    }

    pub fn picked_edges_mut(&mut self) -> &mut PickedState<EdgeId> {
        &mut self.picked_edges
    }

    /// Replaces the layout with a fresh one of `kind`. Picks are kept.
    pub fn set_layout(&mut self, kind: LayoutKind, viewport: Vec2) {
        self.layout_kind = kind;
        self.layout = Self::build_layout(&self.graph, kind, viewport, self.seed);
        debug!(layout = kind.label(), "switched layout");
    }

    pub fn step_layout(&mut self) -> bool {
        self.layout.step()
    }

    /// Applies a tree selection to the picked sets.
    ///
    /// A leaf under "Subjects" picks exactly the vertices with that string
    /// identity and a leaf under "Predicates" picks exactly the statements
    /// with that predicate. The other set is left untouched. Anything else
    /// changes nothing.
    pub fn select_tree_path(&mut self, path: Option<&TreePath>) -> SelectionTarget {
        let target = tree::selection_target(path);
        match &target {
            SelectionTarget::Subject(label) => {
                let matching = self
                    .graph
                    .vertices()
                    .filter(|vertex| self.graph.node(*vertex).to_string() == *label)
                    .collect::<Vec<_>>();
                self.picked_vertices.pick_exactly(matching);
            }
            SelectionTarget::Predicate(label) => {
                let matching = self
                    .graph
                    .edges()
                    .filter(|edge| self.graph.predicate_string(*edge) == label)
                    .collect::<Vec<_>>();
                self.picked_edges.pick_exactly(matching);
            }
            SelectionTarget::Nothing => {}
        }
        target
    }

    pub fn toggle_vertex(&mut self, vertex: NodeId) -> bool {
        self.picked_vertices.toggle(vertex)
    }

    pub fn toggle_edge(&mut self, edge: EdgeId) -> bool {
        self.picked_edges.toggle(edge)
    }

    pub fn clear_picks(&mut self) {
        self.picked_vertices.clear();
        self.picked_edges.clear();
    }

    /// Moves `vertex` and every other picked vertex by the same offset.
    pub fn drag_vertex(&mut self, vertex: NodeId, delta: Vec2) {
        let mut moving = vec![vertex];
        if self.picked_vertices.is_picked(vertex) {
            moving.extend(
                self.picked_vertices
                    .picked()
                    .iter()
                    .copied()
                    .filter(|picked| *picked != vertex),
            );
        }

        for moved in moving {
            if let Some(position) = self.layout.position(moved) {
                self.layout.set_position(moved, position + delta);
            }
        }
    }

    /// Grows the layout bounds to cover every vertex once one has been
    /// dragged outside the viewport. Returns the new size when it grew.
    pub fn expand_to_fit(&mut self, viewport: Vec2) -> Option<Vec2> {
        let positions = self
            .graph
            .vertices()
            .filter_map(|vertex| self.layout.position(vertex))
            .collect::<Vec<Pos2>>();
        let expanded = viewer::expanded_size(viewport, &positions)?;

        let current = self.layout.size().unwrap_or(viewport);
        if expanded.x <= current.x && expanded.y <= current.y {
            return None;
        }

        let grown = expanded.max(current);
        self.layout.set_size(grown);
        debug!(width = grown.x, height = grown.y, "expanded layout");
        Some(grown)
    }
}
