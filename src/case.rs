//! Test cases and the registration records that produce them.
//!
//! A test is declared with one of the registration macros
//! ([`test_create!`](crate::test_create), [`test_fast!`](crate::test_fast),
//! [`test_slow!`](crate::test_slow)). Each declaration submits a
//! [`Registration`] to a link-time collected list; [`crate::Registry::bootstrap`]
//! turns every linked registration into a [`TestCase`] exactly once.

use std::fmt;

use crate::assert::TestResult;

/// Function signature of a registered test body.
pub type TestFn = fn() -> TestResult;

/// Boxed entry point owned by a [`TestCase`].
pub type EntryPoint = Box<dyn Fn() -> TestResult + Send + Sync>;

/// How expensive a test is. Purely descriptive: it has no effect on scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Fast,
    Slow,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fast => "FAST",
            Category::Slow => "SLOW",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One registered unit of test logic with its identifying metadata.
///
/// Immutable once constructed. `name` is only unique within `file`;
/// `(file, line)` is unique across a registry.
pub struct TestCase {
    name: String,
    file: String,
    line: u32,
    category: Category,
    entry: EntryPoint,
}

impl TestCase {
    pub fn new(
        entry: EntryPoint,
        name: impl Into<String>,
        file: impl AsRef<str>,
        line: u32,
        category: Category,
    ) -> Self {
        Self {
            name: name.into(),
            file: normalize_file(file.as_ref()),
            line,
            category,
            entry,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Repository-relative path of the defining source file, without extension.
    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Runs the test body. Panics are not caught here; that is the runner's job.
    pub fn run(&self) -> TestResult {
        (self.entry)()
    }

    /// `file:name`, the form a selector uses to pick exactly this test.
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.file, self.name)
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("file", &self.file)
            .field("line", &self.line)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// A test declaration collected at link time.
///
/// Values are built in `const` context by the registration macros and
/// gathered with `inventory`, so no code has to run before `main` and the
/// result does not depend on the order units were linked in.
#[derive(Debug, Clone, Copy)]
pub struct Registration {
    pub name: &'static str,
    pub file: &'static str,
    pub line: u32,
    pub category: Category,
    pub entry: TestFn,
}

impl Registration {
    pub const fn new(
        name: &'static str,
        file: &'static str,
        line: u32,
        category: Category,
        entry: TestFn,
    ) -> Self {
        Self {
            name,
            file,
            line,
            category,
            entry,
        }
    }
}

inventory::collect!(Registration);

/// Every registration linked into the current binary, in link order.
pub fn registrations() -> impl Iterator<Item = &'static Registration> {
    inventory::iter::<Registration>.into_iter()
}

/// Normalizes a source path as reported by `file!()`.
///
/// Separators become `/`, a leading `./` is dropped and the final extension
/// is removed, so `src\fp\math.rs` and `./src/fp/math.rs` both become
/// `src/fp/math`.
pub fn normalize_file(path: &str) -> String {
    let mut normalized = path.replace('\\', "/");
    while let Some(rest) = normalized.strip_prefix("./") {
        normalized = rest.to_string();
    }
    let stem_start = normalized.rfind('/').map_or(0, |i| i + 1);
    if let Some(dot) = normalized[stem_start..].rfind('.') {
        // Dotfiles such as `.hidden` keep their name.
        if dot > 0 {
            normalized.truncate(stem_start + dot);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passing() -> TestResult {
        Ok(())
    }

    #[test]
    fn test_normalize_strips_extension_and_separators() {
        assert_eq!(normalize_file("src/fp/math.rs"), "src/fp/math");
        assert_eq!(normalize_file("src\\fp\\math.rs"), "src/fp/math");
        assert_eq!(normalize_file("./demos/failing.rs"), "demos/failing");
        assert_eq!(normalize_file("tests/noext"), "tests/noext");
    }

    #[test]
    fn test_normalize_keeps_dotted_directories_and_dotfiles() {
        assert_eq!(normalize_file("a.b/c.rs"), "a.b/c");
        assert_eq!(normalize_file("a.b/c"), "a.b/c");
        assert_eq!(normalize_file("dir/.hidden"), "dir/.hidden");
    }

    #[test]
    fn test_case_exposes_metadata() {
        let case = TestCase::new(Box::new(passing), "alpha", "src/file.rs", 10, Category::Slow);
        assert_eq!(case.name(), "alpha");
        assert_eq!(case.file(), "src/file");
        assert_eq!(case.line(), 10);
        assert_eq!(case.category(), Category::Slow);
        assert_eq!(case.qualified_name(), "src/file:alpha");
        assert!(case.run().is_ok());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Fast.to_string(), "FAST");
        assert_eq!(Category::Slow.to_string(), "SLOW");
    }
}
