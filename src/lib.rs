//! Snail Navigator: browse an RDF model as a directed graph.
//!
//! The desktop shell lives in [`app`]; the remaining modules hold the
//! statement store, the read-only graph view, layouts, picking and the tree
//! and distance models it drives.

pub mod app;
pub mod distance;
pub mod error;
pub mod graph;
pub mod layout;
pub mod picking;
pub mod prefs;
pub mod rdf;
pub mod session;
pub mod tree;
pub mod util;
pub mod viewer;

pub use app::SnailNavigatorApp;
pub use error::GraphError;
pub use graph::ModelGraph;
pub use session::{LoadedModel, Session};
