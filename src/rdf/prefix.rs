use super::model::Node;

const WELL_KNOWN: [(&str, &str); 8] = [
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
    ("foaf", "http://xmlns.com/foaf/0.1/"),
    ("dc", "http://purl.org/dc/elements/1.1/"),
    ("dcterms", "http://purl.org/dc/terms/"),
    ("skos", "http://www.w3.org/2004/02/skos/core#"),
];

#[derive(Clone, Debug)]
pub struct PrefixMap {
    entries: Vec<(String, String)>,
}

impl Default for PrefixMap {
    fn default() -> Self {
        Self {
            entries: WELL_KNOWN
                .iter()
                .map(|(prefix, namespace)| ((*prefix).to_owned(), (*namespace).to_owned()))
                .collect(),
        }
    }
}

impl PrefixMap {
    pub fn declare(&mut self, prefix: &str, namespace: &str) {
        if namespace.is_empty() {
            return;
        }

        if let Some(entry) = self.entries.iter_mut().find(|(known, _)| known == prefix) {
            entry.1 = namespace.to_owned();
        } else {
            self.entries.push((prefix.to_owned(), namespace.to_owned()));
        }
    }

    /// Compacts `iri` with the longest matching namespace, if the remainder is a plain local name.
    pub fn qname_for(&self, iri: &str) -> Option<String> {
        self.entries
            .iter()
            .filter(|(_, namespace)| iri.starts_with(namespace.as_str()))
            .max_by_key(|(_, namespace)| namespace.len())
            .and_then(|(prefix, namespace)| {
                let local = &iri[namespace.len()..];
                is_local_name(local).then(|| format!("{prefix}:{local}"))
            })
    }

    pub fn iri_label(&self, iri: &str) -> String {
        self.qname_for(iri).unwrap_or_else(|| format!("<{iri}>"))
    }

    pub fn node_label(&self, node: &Node) -> String {
        match node {
            Node::Resource(iri) => self.iri_label(iri),
            Node::Blank(_) => "[]".to_owned(),
            Node::Literal { .. } => node.to_string(),
        }
    }
}

fn is_local_name(local: &str) -> bool {
    let mut chars = local.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compacts_with_longest_namespace() {
        let mut prefixes = PrefixMap::default();
        prefixes.declare("ex", "http://example.org/");
        prefixes.declare("exv", "http://example.org/vocab/");

        assert_eq!(
            prefixes.qname_for("http://example.org/vocab/name").as_deref(),
            Some("exv:name")
        );
        assert_eq!(
            prefixes.iri_label("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"),
            "rdf:type"
        );
    }

    #[test]
    fn falls_back_to_bracketed_iri() {
        let prefixes = PrefixMap::default();
        assert_eq!(
            prefixes.iri_label("http://example.org/a/b"),
            "<http://example.org/a/b>"
        );
        assert_eq!(prefixes.node_label(&Node::blank("b0")), "[]");
        assert_eq!(prefixes.node_label(&Node::literal("42")), "42");
    }

    #[test]
    fn rejects_locals_that_are_not_names() {
        let mut prefixes = PrefixMap::default();
        prefixes.declare("ex", "http://example.org/");
        assert_eq!(prefixes.qname_for("http://example.org/"), None);
        assert_eq!(prefixes.qname_for("http://example.org/1abc"), None);
        assert_eq!(prefixes.qname_for("http://example.org/a/b"), None);
    }
}
