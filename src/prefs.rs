use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const RECENT_URIS_KEY: &str = "snail-uris";
const APP_DIR: &str = "snail-navigator";
const FILE_NAME: &str = "prefs.json";

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
struct PreferenceFile {
    values: BTreeMap<String, String>,
}

/// String preferences persisted as a flat JSON object.
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    file: PreferenceFile,
}

impl PreferenceStore {
    /// Reads `path`; a missing file yields empty preferences.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file: PreferenceFile = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)
                .with_context(|| format!("failed to parse preferences {}", path.display()))?,
            Err(error) if error.kind() == ErrorKind::NotFound => PreferenceFile::default(),
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to read preferences {}", path.display()));
            }
        };

        debug!(path = %path.display(), entries = file.values.len(), "opened preferences");
        Ok(Self { path, file })
    }

    /// In-memory preferences that are written to `path` on the first change.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: PreferenceFile::default(),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;
        Some(base.join(APP_DIR).join(FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.file.values.get(key).map(String::as_str)
    }

    pub fn put(&mut self, key: &str, value: String) -> Result<()> {
        self.file.values.insert(key.to_owned(), value);
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let text = serde_json::to_string_pretty(&self.file)?;
        fs::write(&self.path, text)
            .with_context(|| format!("failed to write preferences {}", self.path.display()))
    }

    pub fn recent_uris(&self) -> Vec<String> {
        self.get(RECENT_URIS_KEY)
            .map(|joined| {
                joined
                    .split(',')
                    .map(str::trim)
                    .filter(|uri| !uri.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn remember_uri(&mut self, uri: &str) -> Result<Vec<String>> {
        let mut recent = self.recent_uris();
        push_recent(&mut recent, uri);
        self.put(RECENT_URIS_KEY, recent.join(","))?;
        Ok(recent)
    }
}

/// Moves `uri` to the front of `recent`, dropping any older copy.
pub fn push_recent(recent: &mut Vec<String>, uri: &str) {
    recent.retain(|known| known != uri);
    recent.insert(0, uri.to_owned());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reopening_a_uri_moves_it_to_the_front() {
        let mut recent = Vec::new();
        for uri in ["A", "B", "A"] {
            push_recent(&mut recent, uri);
        }
        assert_eq!(recent, vec!["A".to_owned(), "B".to_owned()]);
    }

    #[test]
    fn missing_file_means_no_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = PreferenceStore::open(dir.path().join("absent.json")).unwrap();
        assert!(prefs.recent_uris().is_empty());
        assert_eq!(prefs.get(RECENT_URIS_KEY), None);
    }

    #[test]
    fn recent_uris_persist_as_a_joined_string() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut prefs = PreferenceStore::open(&path).unwrap();
        prefs.remember_uri("file:///tmp/a.rdf").unwrap();
        prefs.remember_uri("http://example.org/b.ttl").unwrap();
        prefs.remember_uri("file:///tmp/a.rdf").unwrap();

        let reopened = PreferenceStore::open(&path).unwrap();
        assert_eq!(
            reopened.get(RECENT_URIS_KEY),
            Some("file:///tmp/a.rdf,http://example.org/b.ttl")
        );
        assert_eq!(reopened.recent_uris().len(), 2);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();

        let error = PreferenceStore::open(&path).unwrap_err();
        assert!(format!("{error:#}").contains("failed to parse preferences"));
    }
}
