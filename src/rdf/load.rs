use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model::Term;
use tracing::{debug, info};

use super::model::{Node, TripleStore};

const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
const RDF_ACCEPT: &str =
    "text/turtle, application/rdf+xml, application/n-triples;q=0.9, */*;q=0.1";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Remote(String),
}

pub fn resolve_source(uri: &str) -> Result<Source> {
    let uri = uri.trim();
    if uri.is_empty() {
        bail!("no RDF file or URI was given");
    }

    if !uri.contains("://") {
        return Ok(Source::File(PathBuf::from(uri)));
    }

    let url = reqwest::Url::parse(uri).with_context(|| format!("invalid URI {uri}"))?;
    match url.scheme() {
        "file" => url
            .to_file_path()
            .map(Source::File)
            .map_err(|()| anyhow!("{uri} does not name a local file")),
        "http" | "https" => Ok(Source::Remote(uri.to_owned())),
        scheme => bail!("unsupported URI scheme `{scheme}` in {uri}"),
    }
}

pub fn load_store(uri: &str) -> Result<TripleStore> {
    let store = match resolve_source(uri)? {
        Source::File(path) => load_file(&path)?,
        Source::Remote(url) => load_remote(&url)?,
    };

    info!(
        uri,
        statements = store.len(),
        vertices = store.node_count(),
        "loaded RDF model"
    );
    Ok(store)
}

fn load_file(path: &Path) -> Result<TripleStore> {
    let format = format_for_name(&path.to_string_lossy()).unwrap_or(RdfFormat::RdfXml);
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let base_iri = fs::canonicalize(path)
        .ok()
        .and_then(|absolute| reqwest::Url::from_file_path(absolute).ok())
        .map(String::from);

    debug!(path = %path.display(), ?format, "parsing local RDF file");
    parse_store(BufReader::new(file), format, base_iri.as_deref())
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn load_remote(url: &str) -> Result<TripleStore> {
    let response = remote_request(&reqwest::blocking::Client::new(), url)
        .send()
        .with_context(|| format!("failed to fetch {url}"))?
        .error_for_status()
        .with_context(|| format!("server refused {url}"))?;

    let format = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(format_for_media_type)
        .or_else(|| format_for_name(url))
        .unwrap_or(RdfFormat::RdfXml);

    let body = response
        .bytes()
        .with_context(|| format!("failed to read response body from {url}"))?;

    debug!(url, ?format, bytes = body.len(), "parsing remote RDF document");
    parse_store(body.as_ref(), format, Some(url))
        .with_context(|| format!("failed to parse {url}"))
}

fn remote_request(
    client: &reqwest::blocking::Client,
    url: &str,
) -> reqwest::blocking::RequestBuilder {
    client.get(url).header(reqwest::header::ACCEPT, RDF_ACCEPT)
}

fn format_for_name(name: &str) -> Option<RdfFormat> {
    let name = name.split(['?', '#']).next().unwrap_or(name);
    let (_, extension) = name.rsplit_once('.')?;
    RdfFormat::from_extension(&extension.to_ascii_lowercase())
}

fn format_for_media_type(value: &str) -> Option<RdfFormat> {
    let media_type = value.split(';').next().unwrap_or(value).trim();
    RdfFormat::from_media_type(media_type)
}

/// Parses a serialized document; graph names of quad formats are ignored.
pub fn parse_store<R: Read>(
    reader: R,
    format: RdfFormat,
    base_iri: Option<&str>,
) -> Result<TripleStore> {
    let mut parser = RdfParser::from_format(format);
    if let Some(base_iri) = base_iri {
        parser = parser
            .with_base_iri(base_iri)
            .with_context(|| format!("invalid base IRI {base_iri}"))?;
    }

    let mut quads = parser.for_reader(reader);
    let mut store = TripleStore::new();
    for quad in quads.by_ref() {
        let quad = quad.context("invalid RDF syntax")?;
        let subject = node_from_term(Term::from(quad.subject))?;
        let object = node_from_term(quad.object)?;
        store.insert(subject, quad.predicate.as_str(), object)?;
    }

    for (prefix, namespace) in quads.prefixes() {
        store.prefixes_mut().declare(prefix, namespace);
    }

    Ok(store)
}

fn node_from_term(term: Term) -> Result<Node> {
    Ok(match term {
        Term::NamedNode(node) => Node::Resource(node.into_string()),
        Term::BlankNode(node) => Node::Blank(node.into_string()),
        Term::Literal(literal) => {
            let language = literal.language().map(str::to_owned);
            let datatype = literal.datatype().as_str();
            let datatype = (language.is_none() && datatype != XSD_STRING)
                .then(|| datatype.to_owned());
            Node::Literal {
                value: literal.value().to_owned(),
                datatype,
                language,
            }
        }
        #[allow(unreachable_patterns)]
        other => bail!("unsupported RDF term {other}"),
    })
}
