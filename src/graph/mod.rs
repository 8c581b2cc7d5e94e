use std::collections::HashSet;
use std::sync::Arc;

use crate::error::GraphError;
use crate::rdf::{EdgeId, Node, NodeId, Statement, TripleStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeType {
    Directed,
    Undirected,
}

/// Directed graph view over a loaded model.
///
/// Vertices are the distinct subjects and objects of the store, edges are
/// its statements pointing from subject to object. The view shares the
/// store and never copies it; every mutating operation is rejected.
#[derive(Clone, Debug)]
pub struct ModelGraph {
    store: Arc<TripleStore>,
}

impl ModelGraph {
    pub fn new(store: Arc<TripleStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &TripleStore {
        &self.store
    }

    pub fn node(&self, vertex: NodeId) -> &Node {
        self.store.node(vertex)
    }

    pub fn statement(&self, edge: EdgeId) -> Statement {
        self.store.statement(edge)
    }

    pub fn vertices(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.store.node_ids()
    }

    pub fn edges(&self) -> impl ExactSizeIterator<Item = EdgeId> + '_ {
        self.store.edge_ids()
    }

    pub fn edges_of_type(&self, edge_type: EdgeType) -> Vec<EdgeId> {
        match edge_type {
            EdgeType::Directed => self.edges().collect(),
            EdgeType::Undirected => Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.store.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.store.len()
    }

    pub fn contains_vertex(&self, vertex: NodeId) -> bool {
        vertex.index() < self.store.node_count()
    }

    pub fn contains_edge(&self, statement: &Statement) -> bool {
        self.store.contains_statement(statement)
    }

    /// Statements whose subject is `vertex`; always empty for literals.
    pub fn out_edges(&self, vertex: NodeId) -> &[EdgeId] {
        if !self.contains_vertex(vertex) || self.node(vertex).is_literal() {
            return &[];
        }
        self.store.edges_from(vertex)
    }

    pub fn in_edges(&self, vertex: NodeId) -> &[EdgeId] {
        if !self.contains_vertex(vertex) {
            return &[];
        }
        self.store.edges_to(vertex)
    }

    pub fn incident_edges(&self, vertex: NodeId) -> Vec<EdgeId> {
        let mut seen = HashSet::new();
        self.in_edges(vertex)
            .iter()
            .chain(self.out_edges(vertex))
            .copied()
            .filter(|edge| seen.insert(*edge))
            .collect()
    }

    pub fn successors(&self, vertex: NodeId) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        self.out_edges(vertex)
            .iter()
            .map(|edge| self.statement(*edge).object)
            .filter(|object| seen.insert(*object))
            .collect()
    }

    pub fn predecessors(&self, vertex: NodeId) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        self.in_edges(vertex)
            .iter()
            .map(|edge| self.statement(*edge).subject)
            .filter(|subject| seen.insert(*subject))
            .collect()
    }

    pub fn neighbors(&self, vertex: NodeId) -> Vec<NodeId> {
        let mut neighbors = self.successors(vertex);
        for predecessor in self.predecessors(vertex) {
            if !neighbors.contains(&predecessor) {
                neighbors.push(predecessor);
            }
        }
        neighbors
    }

    pub fn in_degree(&self, vertex: NodeId) -> usize {
        self.in_edges(vertex).len()
    }

    pub fn out_degree(&self, vertex: NodeId) -> usize {
        self.out_edges(vertex).len()
    }

    pub fn degree(&self, vertex: NodeId) -> usize {
        self.in_degree(vertex) + self.out_degree(vertex)
    }

    pub fn endpoints(&self, edge: EdgeId) -> (NodeId, NodeId) {
        let statement = self.statement(edge);
        (statement.subject, statement.object)
    }

    pub fn source(&self, edge: EdgeId) -> NodeId {
        self.statement(edge).subject
    }

    pub fn dest(&self, edge: EdgeId) -> NodeId {
        self.statement(edge).object
    }

    pub fn opposite(&self, vertex: NodeId, edge: EdgeId) -> NodeId {
        let (subject, object) = self.endpoints(edge);
        if subject == vertex { object } else { subject }
    }

    pub fn is_incident(&self, vertex: NodeId, edge: EdgeId) -> bool {
        let (subject, object) = self.endpoints(edge);
        subject == vertex || object == vertex
    }

    /// True when some statement points from `v1` to `v2`.
    pub fn is_predecessor(&self, v1: NodeId, v2: NodeId) -> bool {
        self.out_edges(v1)
            .iter()
            .any(|edge| self.statement(*edge).object == v2)
    }

    pub fn is_successor(&self, v1: NodeId, v2: NodeId) -> bool {
        self.is_predecessor(v2, v1)
    }

    pub fn is_neighbor(&self, v1: NodeId, v2: NodeId) -> bool {
        self.is_predecessor(v1, v2) || self.is_predecessor(v2, v1)
    }

    pub fn find_edge_set(&self, v1: NodeId, v2: NodeId) -> Vec<EdgeId> {
        let forward = self
            .out_edges(v1)
            .iter()
            .filter(|edge| self.statement(**edge).object == v2);
        let backward = self
            .out_edges(v2)
            .iter()
            .filter(|edge| self.statement(**edge).object == v1);

        let mut seen = HashSet::new();
        forward
            .chain(backward)
            .copied()
            .filter(|edge| seen.insert(*edge))
            .collect()
    }

    pub fn find_edge(&self, v1: NodeId, v2: NodeId) -> Option<EdgeId> {
        self.find_edge_set(v1, v2).into_iter().next()
    }

    pub fn edge_type(&self, _edge: EdgeId) -> EdgeType {
        EdgeType::Directed
    }

    pub fn default_edge_type(&self) -> EdgeType {
        EdgeType::Directed
    }

    pub fn add_vertex(&mut self, _vertex: Node) -> Result<bool, GraphError> {
        Err(GraphError::UnsupportedOperation("add_vertex"))
    }

    pub fn add_edge(
        &mut self,
        _subject: NodeId,
        _predicate: &str,
        _object: NodeId,
    ) -> Result<bool, GraphError> {
        Err(GraphError::UnsupportedOperation("add_edge"))
    }

    pub fn remove_vertex(&mut self, _vertex: NodeId) -> Result<bool, GraphError> {
        Err(GraphError::UnsupportedOperation("remove_vertex"))
    }

    pub fn remove_edge(&mut self, _edge: EdgeId) -> Result<bool, GraphError> {
        Err(GraphError::UnsupportedOperation("remove_edge"))
    }

    pub fn vertex_label(&self, vertex: NodeId) -> String {
        self.store.prefixes().node_label(self.node(vertex))
    }

    pub fn edge_label(&self, edge: EdgeId) -> String {
        let predicate = self.store.predicate(self.statement(edge).predicate);
        self.store.prefixes().iri_label(predicate)
    }

    pub fn predicate_string(&self, edge: EdgeId) -> &str {
        self.store.predicate(self.statement(edge).predicate)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashSet;

    use super::*;

    pub(crate) const EX: &str = "http://example.org/";

    pub(crate) fn ex(local: &str) -> Node {
        Node::resource(format!("{EX}{local}"))
    }

    pub(crate) fn sample_store() -> TripleStore {
        let mut store = TripleStore::new();
        store.insert(ex("a"), &format!("{EX}p"), ex("b")).unwrap();
        store
            .insert(ex("a"), &format!("{EX}q"), Node::literal("lit"))
            .unwrap();
        store.insert(ex("b"), &format!("{EX}p"), ex("a")).unwrap();
        store.insert(ex("b"), &format!("{EX}q"), ex("c")).unwrap();
        store
    }

    fn vertex(graph: &ModelGraph, node: Node) -> NodeId {
        graph.store().find_node(&node).unwrap()
    }

    #[test]
    fn vertices_are_distinct_subjects_and_objects() {
        let graph = ModelGraph::new(Arc::new(sample_store()));

        let rendered = graph
            .vertices()
            .map(|v| graph.node(v).to_string())
            .collect::<Vec<_>>();
        let unique = rendered.iter().collect::<HashSet<_>>();
        assert_eq!(rendered.len(), unique.len());

        let mut expected = HashSet::new();
        for (_, statement) in graph.store().statements() {
            expected.insert(graph.node(statement.subject).to_string());
            expected.insert(graph.node(statement.object).to_string());
        }
        assert_eq!(unique.into_iter().cloned().collect::<HashSet<_>>(), expected);
    }

    #[test]
    fn one_edge_per_statement_with_ordered_endpoints() {
        let graph = ModelGraph::new(Arc::new(sample_store()));
        assert_eq!(graph.edge_count(), 4);

        for edge in graph.edges() {
            let statement = graph.statement(edge);
            assert_eq!(graph.endpoints(edge), (statement.subject, statement.object));
            assert_eq!(graph.edge_type(edge), EdgeType::Directed);
        }
        assert!(graph.edges_of_type(EdgeType::Undirected).is_empty());
    }

    #[test]
    fn statements_are_edges_only_in_their_direction() {
        let graph = ModelGraph::new(Arc::new(sample_store()));
        let a = vertex(&graph, ex("a"));
        let c = vertex(&graph, ex("c"));
        let edge = graph.find_edge(vertex(&graph, ex("b")), c).unwrap();
        let statement = graph.statement(edge);

        assert_eq!(graph.default_edge_type(), EdgeType::Directed);
        assert!(graph.contains_edge(&statement));
        assert!(!graph.contains_edge(&Statement {
            subject: c,
            ..statement
        }));
        assert!(!graph.contains_edge(&Statement {
            object: a,
            ..statement
        }));
        assert_eq!(graph.edges_of_type(EdgeType::Directed).len(), graph.edge_count());
    }

    #[test]
    fn literals_never_have_out_edges() {
        let graph = ModelGraph::new(Arc::new(sample_store()));
        let literal = vertex(&graph, Node::literal("lit"));

        assert!(graph.out_edges(literal).is_empty());
        assert!(graph.successors(literal).is_empty());
        assert_eq!(graph.in_degree(literal), 1);
        assert_eq!(graph.predecessors(literal), vec![vertex(&graph, ex("a"))]);
    }

    #[test]
    fn neighbourhood_queries() {
        let graph = ModelGraph::new(Arc::new(sample_store()));
        let a = vertex(&graph, ex("a"));
        let b = vertex(&graph, ex("b"));
        let c = vertex(&graph, ex("c"));

        assert_eq!(graph.successors(b), vec![a, c]);
        assert!(graph.is_predecessor(a, b));
        assert!(graph.is_successor(c, b));
        assert!(!graph.is_neighbor(a, c));
        assert_eq!(graph.find_edge_set(a, b).len(), 2);
        assert_eq!(graph.degree(b), 3);
        assert_eq!(graph.incident_edges(b).len(), 3);

        let edge = graph.find_edge(b, c).unwrap();
        assert_eq!(graph.opposite(c, edge), b);
        assert!(graph.is_incident(b, edge));
        assert_eq!(graph.edge_label(edge), "<http://example.org/q>");
    }

    #[test]
    fn mutation_is_unsupported() {
        let mut graph = ModelGraph::new(Arc::new(sample_store()));
        let a = vertex(&graph, ex("a"));
        let first = graph.edges().next().unwrap();

        assert_eq!(
            graph.add_vertex(ex("z")),
            Err(GraphError::UnsupportedOperation("add_vertex"))
        );
        assert!(matches!(
            graph.add_edge(a, "http://example.org/p", a),
            Err(GraphError::UnsupportedOperation(_))
        ));
        assert!(graph.remove_vertex(a).is_err());
        assert!(graph.remove_edge(first).is_err());
        assert_eq!(graph.edge_count(), 4);
    }
}
