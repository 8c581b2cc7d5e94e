use eframe::egui::{Pos2, Rect, Vec2};

use crate::graph::ModelGraph;
use crate::rdf::NodeId;

mod circle;
mod expandable;
mod isom;
mod lattice;

pub use circle::CircleLayout;
pub use expandable::{ExpandableLayout, SizeState};
pub use isom::IsomLayout;
pub use lattice::LatticeLayout;

/// Assigns a position to every vertex of a graph inside a bounding size.
pub trait Layout {
    fn graph(&self) -> &ModelGraph;

    /// Recomputes every position. Does nothing while the size is unset.
    fn initialize(&mut self);

    fn reset(&mut self) {
        self.initialize();
    }

    fn size(&self) -> Option<Vec2>;

    /// Stores the size and re-runs [`Layout::initialize`].
    fn set_size(&mut self, size: Vec2);

    fn position(&self, vertex: NodeId) -> Option<Pos2>;

    fn set_position(&mut self, vertex: NodeId, position: Pos2);

    /// Advances an iterative layout; returns `true` while positions still change.
    fn step(&mut self) -> bool {
        false
    }

    fn is_done(&self) -> bool {
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutKind {
    Isom,
    Circle,
    Lattice,
}

impl LayoutKind {
    pub const ALL: [Self; 3] = [Self::Isom, Self::Circle, Self::Lattice];

    pub fn label(self) -> &'static str {
        match self {
            Self::Isom => "Graph",
            Self::Circle => "Circular",
            Self::Lattice => "Lattice",
        }
    }

    pub fn build(self, graph: ModelGraph, seed: u64) -> Box<dyn Layout> {
        match self {
            Self::Isom => Box::new(IsomLayout::new(graph, seed)),
            Self::Circle => Box::new(CircleLayout::new(graph)),
            Self::Lattice => Box::new(LatticeLayout::new(graph)),
        }
    }
}

/// Position table shared by every layout implementation, indexed by vertex id.
#[derive(Clone, Debug, Default)]
pub struct Positions {
    points: Vec<Option<Pos2>>,
}

impl Positions {
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            points: vec![None; vertex_count],
        }
    }

    pub fn get(&self, vertex: NodeId) -> Option<Pos2> {
        self.points.get(vertex.index()).copied().flatten()
    }

    pub fn set(&mut self, vertex: NodeId, position: Pos2) {
        let index = vertex.index();
        if index >= self.points.len() {
            self.points.resize(index + 1, None);
        }
        self.points[index] = Some(position);
    }

    pub fn len(&self) -> usize {
        self.points.iter().flatten().count()
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.points
            .iter()
            .flatten()
            .fold(None, |bounds: Option<Rect>, point| {
                Some(match bounds {
                    Some(rect) => rect.union(Rect::from_min_max(*point, *point)),
                    None => Rect::from_min_max(*point, *point),
                })
            })
    }
}
