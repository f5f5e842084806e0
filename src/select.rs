//! Turning `path[:name]` selectors into the ordered list of tests to run.
//!
//! A selector without a name picks every test whose file is the path or lies
//! below it at a `/` boundary (`a/b` picks `a/b` and `a/b/c`, never `a/bc`).
//! A selector with a name picks the tests with exactly that file and name.
//! Results are unioned, deduplicated by identity and sorted by (file, line).

use std::fmt;

use tracing::debug;

use crate::case::TestCase;
use crate::errors::{SelectionError, UsageError};
use crate::registry::Registry;

/// One parsed `path[:name]` filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    path: String,
    name: Option<String>,
}

impl Selector {
    /// Parses `path[:name]`. The path is split off at the first `:`.
    pub fn parse(text: &str) -> Result<Self, UsageError> {
        let invalid = |reason| UsageError::InvalidSelector(text.to_string(), reason);
        if text.starts_with('-') {
            return Err(UsageError::InvalidOption(text.to_string()));
        }
        let (path, name) = match text.split_once(':') {
            Some((path, name)) => (path, Some(name)),
            None => (text, None),
        };
        let path = path.replace('\\', "/");
        let mut path = path.as_str();
        while let Some(rest) = path.strip_prefix("./") {
            path = rest;
        }
        let path = path.trim_end_matches('/');
        if path.is_empty() {
            return Err(invalid("the path is empty"));
        }
        match name {
            Some("") => Err(invalid("the test name after `:` is empty")),
            Some(name) if name.contains(':') => Err(invalid("more than one `:`")),
            _ => Ok(Self {
                path: path.to_string(),
                name: name.map(str::to_string),
            }),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn matches(&self, test: &TestCase) -> bool {
        match &self.name {
            Some(name) => test.file() == self.path && test.name() == name,
            None => is_path_prefix(&self.path, test.file()),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}:{}", self.path, name),
            None => f.write_str(&self.path),
        }
    }
}

/// `prefix` equals `file` or names one of its ancestor directories.
fn is_path_prefix(prefix: &str, file: &str) -> bool {
    match file.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Parses every selector string, stopping at the first invalid one.
pub fn parse_selectors<S: AsRef<str>>(texts: &[S]) -> Result<Vec<Selector>, UsageError> {
    texts.iter().map(|t| Selector::parse(t.as_ref())).collect()
}

/// Sorts tests into canonical order: file, then line.
pub fn sort_canonical(tests: &mut [&TestCase]) {
    tests.sort_by(|a, b| a.file().cmp(b.file()).then(a.line().cmp(&b.line())));
}

/// The tests matched by any of `selectors`, each once, in canonical order.
///
/// An empty selector list is a usage error; selectors that match nothing are
/// reported as [`SelectionError::Empty`].
pub fn select<'r>(
    registry: &'r Registry,
    selectors: &[Selector],
) -> Result<Vec<&'r TestCase>, SelectionError> {
    if selectors.is_empty() {
        return Err(UsageError::NoSelectors.into());
    }
    let mut chosen = vec![false; registry.len()];
    for selector in selectors {
        let mut hits = 0usize;
        for (index, test) in registry.all_tests().iter().enumerate() {
            if selector.matches(test) {
                chosen[index] = true;
                hits += 1;
            }
        }
        debug!(selector = %selector, hits, "selector evaluated");
    }
    let mut selected: Vec<&TestCase> = registry
        .all_tests()
        .iter()
        .zip(chosen)
        .filter_map(|(test, picked)| picked.then_some(test))
        .collect();
    if selected.is_empty() {
        return Err(SelectionError::Empty {
            selectors: selectors.iter().map(Selector::to_string).collect(),
        });
    }
    sort_canonical(&mut selected);
    Ok(selected)
}
