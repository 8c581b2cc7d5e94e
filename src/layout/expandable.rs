use std::cell::Cell;

use eframe::egui::{Pos2, Vec2};

use crate::graph::ModelGraph;
use crate::rdf::NodeId;

use super::Layout;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SizeState {
    #[default]
    Unset,
    Fixed(Vec2),
}

/// Lets the viewer grow the reported layout size without re-running the
/// wrapped layout.
///
/// The first size read captures the delegate's size. Later writes replace
/// the reported size, but only reach the delegate while it is still unsized.
pub struct ExpandableLayout {
    delegate: Box<dyn Layout>,
    size: Cell<SizeState>,
}

impl ExpandableLayout {
    pub fn new(delegate: Box<dyn Layout>) -> Self {
        Self {
            delegate,
            size: Cell::new(SizeState::Unset),
        }
    }

    pub fn size_state(&self) -> SizeState {
        self.size.get()
    }

    pub fn delegate(&self) -> &dyn Layout {
        self.delegate.as_ref()
    }
}

impl Layout for ExpandableLayout {
    fn graph(&self) -> &ModelGraph {
        self.delegate.graph()
    }

    fn initialize(&mut self) {
        self.delegate.initialize();
    }

    fn reset(&mut self) {
        self.delegate.reset();
    }

    fn size(&self) -> Option<Vec2> {
        match self.size.get() {
            SizeState::Fixed(size) => Some(size),
            SizeState::Unset => {
                let captured = self.delegate.size();
                if let Some(size) = captured {
                    self.size.set(SizeState::Fixed(size));
                }
                captured
            }
        }
    }

    fn set_size(&mut self, size: Vec2) {
        if self.delegate.size().is_none() {
            self.delegate.set_size(size);
        }
        self.size.set(SizeState::Fixed(size));
    }

    fn position(&self, vertex: NodeId) -> Option<Pos2> {
        self.delegate.position(vertex)
    }

    fn set_position(&mut self, vertex: NodeId, position: Pos2) {
        self.delegate.set_position(vertex, position);
    }

    fn step(&mut self) -> bool {
        self.delegate.step()
    }

    fn is_done(&self) -> bool {
        self.delegate.is_done()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eframe::egui::{pos2, vec2};

    use super::*;
    use crate::graph::tests::sample_store;
    use crate::layout::LatticeLayout;

    fn lattice() -> Box<dyn Layout> {
        Box::new(LatticeLayout::new(ModelGraph::new(Arc::new(sample_store()))))
    }

    #[test]
    fn first_size_reaches_the_delegate() {
        let mut layout = ExpandableLayout::new(lattice());
        assert_eq!(layout.size(), None);
        assert_eq!(layout.size_state(), SizeState::Unset);

        layout.set_size(vec2(960.0, 780.0));
        assert_eq!(layout.delegate().size(), Some(vec2(960.0, 780.0)));
        assert_eq!(layout.size_state(), SizeState::Fixed(vec2(960.0, 780.0)));

        let first = layout.graph().vertices().next().unwrap();
        assert_eq!(layout.position(first), Some(pos2(30.0, 20.0)));
    }

    #[test]
    fn growth_is_not_forwarded_once_sized() {
        let mut layout = ExpandableLayout::new(lattice());
        layout.set_size(vec2(960.0, 780.0));
        let first = layout.graph().vertices().next().unwrap();
        layout.set_position(first, pos2(1200.0, 900.0));

        layout.set_size(vec2(1224.0, 924.0));
        assert_eq!(layout.size(), Some(vec2(1224.0, 924.0)));
        assert_eq!(layout.delegate().size(), Some(vec2(960.0, 780.0)));
        assert_eq!(layout.position(first), Some(pos2(1200.0, 900.0)));
    }

    #[test]
    fn reading_captures_a_presized_delegate_once() {
        let mut delegate = lattice();
        delegate.set_size(vec2(300.0, 200.0));
        let layout = ExpandableLayout::new(delegate);

        assert_eq!(layout.size_state(), SizeState::Unset);
        assert_eq!(layout.size(), Some(vec2(300.0, 200.0)));
        assert_eq!(layout.size_state(), SizeState::Fixed(vec2(300.0, 200.0)));
    }
}
