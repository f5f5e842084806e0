//! The catalog of discovered tests.
//!
//! ## Registry Invariant
//! `(file, line)` is unique across the registry; two tests cannot start on
//! the same line of the same file. `(file, name)` is not checked here beyond
//! reporting duplicates through [`Registry::duplicate_names`].
//!
//! Insertion order follows link order and is not meaningful. The canonical
//! (file, line) order is applied by [`crate::select`].

use std::collections::{HashMap, HashSet};

use once_cell::sync::OnceCell;
use tracing::{debug, trace};

use crate::case::{registrations, Category, EntryPoint, TestCase};
use crate::errors::RegistryError;

/// Owns every [`TestCase`] for the lifetime of the process.
#[derive(Debug, Default)]
pub struct Registry {
    tests: Vec<TestCase>,
    locations: HashSet<(String, u32)>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide registry, building it on first call from every
    /// registration linked into the binary.
    ///
    /// A failed bootstrap is not cached; the next call tries again and reports
    /// the same error.
    pub fn instance() -> Result<&'static Registry, RegistryError> {
        static INSTANCE: OnceCell<Registry> = OnceCell::new();
        INSTANCE.get_or_try_init(Registry::bootstrap)
    }

    /// Builds a fresh registry from the link-time registration list.
    pub fn bootstrap() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for registration in registrations() {
            trace!(
                name = registration.name,
                file = registration.file,
                line = registration.line,
                "collecting registration"
            );
            registry.add_test(
                Box::new(registration.entry),
                registration.name,
                registration.file,
                registration.line,
                registration.category,
            )?;
        }
        debug!(count = registry.len(), "registry bootstrapped");
        Ok(registry)
    }

    /// Appends a test. Rejects a second test at an already registered
    /// `(file, line)`; duplicate names are accepted.
    pub fn add_test(
        &mut self,
        entry: EntryPoint,
        name: impl Into<String>,
        file: impl AsRef<str>,
        line: u32,
        category: Category,
    ) -> Result<(), RegistryError> {
        let case = TestCase::new(entry, name, file, line, category);
        let location = (case.file().to_string(), case.line());
        if self.locations.contains(&location) {
            let first = self
                .tests
                .iter()
                .find(|t| t.file() == case.file() && t.line() == case.line())
                .map(|t| t.name().to_string())
                .unwrap_or_default();
            return Err(RegistryError::DuplicateLocation {
                file: location.0,
                line: location.1,
                first,
                second: case.name().to_string(),
            });
        }
        self.locations.insert(location);
        self.tests.push(case);
        Ok(())
    }

    /// All tests, in insertion order.
    pub fn all_tests(&self) -> &[TestCase] {
        &self.tests
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// `file:name` pairs registered more than once, sorted.
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut counts: HashMap<(&str, &str), usize> = HashMap::new();
        for test in &self.tests {
            *counts.entry((test.file(), test.name())).or_default() += 1;
        }
        let mut duplicates: Vec<String> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|((file, name), _)| format!("{file}:{name}"))
            .collect();
        duplicates.sort();
        duplicates
    }
}
