//! Function-name listings.
//!
//! The builtin listing is the fixed dispatch catalog. A documentation
//! catalog can be loaded from disk to widen the combined listing; without
//! one, only the listing narrows, dispatch is unaffected.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use sym_value::{evaluation, SymResult};

use crate::dispatch::FIXED_CATALOG;

/// Names in the fixed catalog, sorted.
pub fn builtin_function_names() -> Vec<&'static str> {
    let mut names: Vec<_> = FIXED_CATALOG.iter().map(|entry| entry.name()).collect();
    names.sort_unstable();
    names
}

pub fn builtin_function_count() -> usize {
    FIXED_CATALOG.len()
}

/// Documented operator names read from a help database.
///
/// Each entry in the database starts with a line `# name [alias ...]`;
/// everything else is body text and is skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocCatalog {
    names: BTreeSet<String>,
    source: Option<PathBuf>,
}

impl DocCatalog {
    pub fn load(path: impl AsRef<Path>) -> SymResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| {
            evaluation(format!("cannot read documentation catalog {}: {err}", path.display()))
        })?;
        let mut catalog = DocCatalog::parse(&text);
        catalog.source = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), entries = catalog.len(), "documentation catalog loaded");
        Ok(catalog)
    }

    pub fn parse(text: &str) -> Self {
        let names = text
            .lines()
            .filter_map(|line| line.strip_prefix('#'))
            .flat_map(str::split_whitespace)
            .map(str::to_owned)
            .collect();
        DocCatalog { names, source: None }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// File this catalog was loaded from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Sorted, deduplicated union of the builtin names and the documented ones.
pub fn all_function_names(docs: Option<&DocCatalog>) -> Vec<String> {
    let mut names: BTreeSet<String> = builtin_function_names().into_iter().map(str::to_owned).collect();
    if let Some(docs) = docs {
        names.extend(docs.names().map(str::to_owned));
    }
    names.into_iter().collect()
}
