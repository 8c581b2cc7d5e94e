mod load;
mod model;
mod prefix;

pub use load::{load_store, parse_store};
pub use model::{EdgeId, Node, NodeId, NodeKind, PredicateId, Statement, TripleStore};
pub use prefix::PrefixMap;
