use std::collections::HashSet;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::rdf::TripleStore;

pub const ROOT_LABEL: &str = "Resources";
pub const PREDICATES_LABEL: &str = "Predicates";
pub const SUBJECTS_LABEL: &str = "Subjects";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, label: &str) -> Option<&TreeNode> {
        self.children.iter().find(|child| child.label == label)
    }

    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(TreeNode::leaf_count).sum()
        }
    }
}

/// Builds the "Resources" tree: distinct predicates, then distinct named subjects.
pub fn build_resource_tree(store: &TripleStore) -> TreeNode {
    let mut predicates = Vec::new();
    let mut subjects = Vec::new();
    let mut seen_predicates = HashSet::new();
    let mut seen_subjects = HashSet::new();

    for (_, statement) in store.statements() {
        let predicate = store.predicate(statement.predicate);
        if seen_predicates.insert(predicate) {
            predicates.push(TreeNode::new(predicate));
        }

        let subject = store.node(statement.subject);
        if !subject.is_blank() && seen_subjects.insert(statement.subject) {
            subjects.push(TreeNode::new(subject.to_string()));
        }
    }

    TreeNode::with_children(
        ROOT_LABEL,
        vec![
            TreeNode::with_children(PREDICATES_LABEL, predicates),
            TreeNode::with_children(SUBJECTS_LABEL, subjects),
        ],
    )
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchMode {
    #[default]
    Substring,
    Fuzzy,
}

pub struct LabelMatcher<'a> {
    text: &'a str,
    mode: MatchMode,
    fuzzy: SkimMatcherV2,
}

impl<'a> LabelMatcher<'a> {
    pub fn new(text: &'a str, mode: MatchMode) -> Self {
        Self {
            text,
            mode,
            fuzzy: SkimMatcherV2::default(),
        }
    }

    pub fn matches(&self, label: &str) -> bool {
        match self.mode {
            MatchMode::Substring => label.contains(self.text),
            MatchMode::Fuzzy => {
                self.fuzzy.fuzzy_match(label, self.text).is_some()
                    || self
                        .fuzzy
                        .fuzzy_match(&label.to_lowercase(), &self.text.to_lowercase())
                        .is_some()
            }
        }
    }
}

/// The keep predicate the navigator ships with: every node is eligible.
pub fn keep_all(_node: &TreeNode) -> bool {
    true
}

/// Filters `root` against `text` without touching it.
///
/// The root always survives, as does every node that still has children
/// after filtering. A node left without children survives only when `keep`
/// accepts it and its label matches. Blank text with an accepted root
/// returns the tree unchanged.
pub fn filter_tree(
    root: &TreeNode,
    text: &str,
    mode: MatchMode,
    keep: &dyn Fn(&TreeNode) -> bool,
) -> TreeNode {
    if text.trim().is_empty() && keep(root) {
        return root.clone();
    }

    let matcher = LabelMatcher::new(text, mode);
    TreeNode::with_children(
        root.label.clone(),
        root.children
            .iter()
            .filter_map(|child| filter_node(child, &matcher, keep))
            .collect(),
    )
}

fn filter_node(
    node: &TreeNode,
    matcher: &LabelMatcher<'_>,
    keep: &dyn Fn(&TreeNode) -> bool,
) -> Option<TreeNode> {
    let children = node
        .children
        .iter()
        .filter_map(|child| filter_node(child, matcher, keep))
        .collect::<Vec<_>>();

    if !children.is_empty() || (keep(node) && matcher.matches(&node.label)) {
        Some(TreeNode::with_children(node.label.clone(), children))
    } else {
        None
    }
}

/// Whether a label is drawn emphasised for the current filter text.
pub fn is_highlighted(label: &str, text: &str) -> bool {
    !text.is_empty() && label.starts_with(text)
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TreePath(Vec<String>);

impl TreePath {
    pub fn new(labels: Vec<String>) -> Self {
        Self(labels)
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn leaf_label(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn parent_label(&self) -> Option<&str> {
        let count = self.0.len();
        (count >= 2).then(|| self.0[count - 2].as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionTarget {
    Subject(String),
    Predicate(String),
    Nothing,
}

pub fn selection_target(path: Option<&TreePath>) -> SelectionTarget {
    let Some(path) = path else {
        return SelectionTarget::Nothing;
    };

    match (path.parent_label(), path.leaf_label()) {
        (Some(SUBJECTS_LABEL), Some(label)) => SelectionTarget::Subject(label.to_owned()),
        (Some(PREDICATES_LABEL), Some(label)) => SelectionTarget::Predicate(label.to_owned()),
        _ => SelectionTarget::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::sample_store;
    use crate::rdf::Node;

    fn sample_tree() -> TreeNode {
        TreeNode::with_children(
            ROOT_LABEL,
            vec![
                TreeNode::with_children(
                    PREDICATES_LABEL,
                    vec![TreeNode::new("ex:name"), TreeNode::new("ex:knows")],
                ),
                TreeNode::with_children(
                    SUBJECTS_LABEL,
                    vec![TreeNode::new("ex:alice"), TreeNode::new("ex:bob")],
                ),
            ],
        )
    }

    fn path(labels: &[&str]) -> TreePath {
        TreePath::new(labels.iter().map(|label| (*label).to_owned()).collect())
    }

    #[test]
    fn resource_tree_lists_predicates_then_named_subjects() {
        let mut store = sample_store();
        store
            .insert(
                Node::blank("b0"),
                "http://example.org/p",
                Node::literal("anon"),
            )
            .unwrap();
        let tree = build_resource_tree(&store);

        assert_eq!(tree.label(), ROOT_LABEL);
        let labels = tree
            .children()
            .iter()
            .map(TreeNode::label)
            .collect::<Vec<_>>();
        assert_eq!(labels, vec![PREDICATES_LABEL, SUBJECTS_LABEL]);

        let predicates = tree.child(PREDICATES_LABEL).unwrap();
        assert_eq!(predicates.children().len(), 2);
        let subjects = tree.child(SUBJECTS_LABEL).unwrap();
        let subject_labels = subjects
            .children()
            .iter()
            .map(TreeNode::label)
            .collect::<Vec<_>>();
        assert_eq!(
            subject_labels,
            vec!["http://example.org/a", "http://example.org/b"]
        );
    }

    #[test]
    fn blank_filter_returns_the_source_tree() {
        let tree = sample_tree();
        assert_eq!(filter_tree(&tree, "  ", MatchMode::Substring, &keep_all), tree);
    }

    #[test]
    fn matching_leaves_keep_their_ancestors() {
        let tree = sample_tree();
        let filtered = filter_tree(&tree, "ali", MatchMode::Substring, &keep_all);

        assert_eq!(
            filtered,
            TreeNode::with_children(
                ROOT_LABEL,
                vec![TreeNode::with_children(
                    SUBJECTS_LABEL,
                    vec![TreeNode::new("ex:alice")]
                )],
            )
        );
        assert_eq!(tree.leaf_count(), 4);
    }

    #[test]
    fn emptied_folders_survive_only_when_they_match() {
        let tree = sample_tree();
        let filtered = filter_tree(&tree, "Pred", MatchMode::Substring, &keep_all);

        assert_eq!(filtered.children().len(), 1);
        let predicates = &filtered.children()[0];
        assert_eq!(predicates.label(), PREDICATES_LABEL);
        assert!(predicates.is_leaf());
    }

    #[test]
    fn nothing_matches_leaves_a_bare_root() {
        let filtered = filter_tree(&sample_tree(), "zzz", MatchMode::Substring, &keep_all);
        assert_eq!(filtered, TreeNode::new(ROOT_LABEL));
    }

    #[test]
    fn rejected_nodes_are_pruned() {
        let keep = |node: &TreeNode| node.label() != "ex:bob";
        let filtered = filter_tree(&sample_tree(), "ex:", MatchMode::Substring, &keep);
        let subjects = filtered.child(SUBJECTS_LABEL).unwrap();
        assert_eq!(subjects.children(), &[TreeNode::new("ex:alice")]);
    }

    #[test]
    fn fuzzy_mode_matches_scattered_letters() {
        let filtered = filter_tree(&sample_tree(), "exkw", MatchMode::Fuzzy, &keep_all);
        let predicates = filtered.child(PREDICATES_LABEL).unwrap();
        assert_eq!(predicates.children(), &[TreeNode::new("ex:knows")]);
        assert!(filtered.child(SUBJECTS_LABEL).is_none());
    }

    #[test]
    fn highlight_uses_prefix_match() {
        assert!(is_highlighted("ex:alice", "ex:a"));
        assert!(!is_highlighted("ex:alice", "alice"));
        assert!(!is_highlighted("ex:alice", ""));
    }

    #[test]
    fn selection_targets_follow_the_parent_label() {
        assert_eq!(
            selection_target(Some(&path(&[ROOT_LABEL, SUBJECTS_LABEL, "ex:a"]))),
            SelectionTarget::Subject("ex:a".to_owned())
        );
        assert_eq!(
            selection_target(Some(&path(&[ROOT_LABEL, PREDICATES_LABEL, "ex:p"]))),
            SelectionTarget::Predicate("ex:p".to_owned())
        );
        assert_eq!(
            selection_target(Some(&path(&[ROOT_LABEL, SUBJECTS_LABEL]))),
            SelectionTarget::Nothing
        );
        assert_eq!(selection_target(Some(&path(&[ROOT_LABEL]))), SelectionTarget::Nothing);
        assert_eq!(selection_target(None), SelectionTarget::Nothing);
    }
}
