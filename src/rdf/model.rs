use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::GraphError;

use super::prefix::PrefixMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PredicateId(usize);

impl PredicateId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Resource,
    Blank,
    Literal,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Resource => "resource",
            Self::Blank => "blank node",
            Self::Literal => "literal",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Node {
    Resource(String),
    Blank(String),
    Literal {
        value: String,
        datatype: Option<String>,
        language: Option<String>,
    },
}

impl Node {
    pub fn resource(iri: impl Into<String>) -> Self {
        Self::Resource(iri.into())
    }

    pub fn blank(id: impl Into<String>) -> Self {
        Self::Blank(id.into())
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Resource(_) => NodeKind::Resource,
            Self::Blank(_) => NodeKind::Blank,
            Self::Literal { .. } => NodeKind::Literal,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal { .. })
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank(_))
    }

    pub fn iri(&self) -> Option<&str> {
        match self {
            Self::Resource(iri) => Some(iri),
            _ => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resource(iri) => f.write_str(iri),
            Self::Blank(id) => f.write_str(id),
            Self::Literal {
                value,
                language: Some(language),
                ..
            } => write!(f, "{value}@{language}"),
            Self::Literal {
                value,
                datatype: Some(datatype),
                ..
            } => write!(f, "{value}^^{datatype}"),
            Self::Literal { value, .. } => f.write_str(value),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Statement {
    pub subject: NodeId,
    pub predicate: PredicateId,
    pub object: NodeId,
}

/// Deduplicated statement set with interned terms and subject/object indexes.
///
/// Only terms that occur as a subject or an object are interned, so the node
/// table doubles as the vertex set of the statement graph. Node ids follow
/// first appearance, subject before object.
#[derive(Debug, Default)]
pub struct TripleStore {
    nodes: Vec<Node>,
    node_index: HashMap<Node, NodeId>,
    predicates: Vec<String>,
    predicate_index: HashMap<String, PredicateId>,
    statements: Vec<Statement>,
    statement_index: HashSet<Statement>,
    by_subject: Vec<Vec<EdgeId>>,
    by_object: Vec<Vec<EdgeId>>,
    prefixes: PrefixMap,
}

impl TripleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a statement; returns `false` when it was already present.
    pub fn insert(
        &mut self,
        subject: Node,
        predicate: &str,
        object: Node,
    ) -> Result<bool, GraphError> {
        if subject.is_literal() {
            return Err(GraphError::InvalidArgument(format!(
                "literal {subject} cannot be the subject of a statement"
            )));
        }

        let subject = self.intern_node(subject);
        let object = self.intern_node(object);
        let predicate = self.intern_predicate(predicate);
        let statement = Statement {
            subject,
            predicate,
            object,
        };

        if !self.statement_index.insert(statement) {
            return Ok(false);
        }

        let edge = EdgeId(self.statements.len());
        self.statements.push(statement);
        self.by_subject[subject.0].push(edge);
        self.by_object[object.0].push(edge);
        Ok(true)
    }

    fn intern_node(&mut self, node: Node) -> NodeId {
        if let Some(&id) = self.node_index.get(&node) {
            return id;
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(node.clone());
        self.node_index.insert(node, id);
        self.by_subject.push(Vec::new());
        self.by_object.push(Vec::new());
        id
    }

    fn intern_predicate(&mut self, predicate: &str) -> PredicateId {
        if let Some(&id) = self.predicate_index.get(predicate) {
            return id;
        }

        let id = PredicateId(self.predicates.len());
        self.predicates.push(predicate.to_owned());
        self.predicate_index.insert(predicate.to_owned(), id);
        id
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn find_node(&self, node: &Node) -> Option<NodeId> {
        self.node_index.get(node).copied()
    }

    pub fn node_ids(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn predicate(&self, id: PredicateId) -> &str {
        &self.predicates[id.0]
    }

    pub fn predicates(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.predicates.iter().map(String::as_str)
    }

    pub fn statement(&self, id: EdgeId) -> Statement {
        self.statements[id.0]
    }

    pub fn contains_statement(&self, statement: &Statement) -> bool {
        self.statement_index.contains(statement)
    }

    pub fn edge_ids(&self) -> impl ExactSizeIterator<Item = EdgeId> + '_ {
        (0..self.statements.len()).map(EdgeId)
    }

    pub fn statements(&self) -> impl ExactSizeIterator<Item = (EdgeId, Statement)> + '_ {
        self.statements
            .iter()
            .enumerate()
            .map(|(index, statement)| (EdgeId(index), *statement))
    }

    pub fn edges_from(&self, subject: NodeId) -> &[EdgeId] {
        self.by_subject
            .get(subject.0)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn edges_to(&self, object: NodeId) -> &[EdgeId] {
        self.by_object
            .get(object.0)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn subjects(&self) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        self.statements
            .iter()
            .filter(|statement| seen.insert(statement.subject))
            .map(|statement| statement.subject)
            .collect()
    }

    pub fn prefixes(&self) -> &PrefixMap {
        &self.prefixes
    }

    pub fn prefixes_mut(&mut self) -> &mut PrefixMap {
        &mut self.prefixes
    }
}
