//! Test registry - ordered list of registered test cases

use std::fmt;

/// Zero-argument test body
pub type EntryPoint = Box<dyn Fn() + Send + Sync + 'static>;

/// A registered test case
pub struct TestDescriptor {
    suite: String,
    name: String,
    entry: EntryPoint,
}

impl TestDescriptor {
    /// Create a descriptor from its suite, name and body
    pub fn new(
        suite: impl Into<String>,
        name: impl Into<String>,
        entry: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self {
            suite: suite.into(),
            name: name.into(),
            entry: Box::new(entry),
        }
    }

    /// Suite the test belongs to (e.g., "Parser")
    pub fn suite(&self) -> &str {
        &self.suite
    }

    /// Name of the test within its suite (e.g., "handles_empty_input")
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `<suite>.<name>`, the string matchers are checked against
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.suite, self.name)
    }

    /// Whether `matcher` selects this test. No matcher selects everything.
    pub fn matches(&self, matcher: Option<&str>) -> bool {
        match matcher {
            None => true,
            Some(pattern) => self.full_name().contains(pattern),
        }
    }

    /// Invoke the test body on the calling thread
    pub fn invoke(&self) {
        (self.entry)()
    }
}

impl fmt::Debug for TestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestDescriptor")
            .field("suite", &self.suite)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A test declared with [`unit_test!`](crate::unit_test), collected at link time
#[derive(Debug, Clone, Copy)]
pub struct StaticTest {
    pub suite: &'static str,
    pub name: &'static str,
    pub entry: fn(),
    /// Source file of the declaration
    pub file: &'static str,
    /// Line of the declaration
    pub line: u32,
}

impl StaticTest {
    #[doc(hidden)] // constructed by unit_test!
    pub const fn new(
        suite: &'static str,
        name: &'static str,
        entry: fn(),
        file: &'static str,
        line: u32,
    ) -> Self {
        Self {
            suite,
            name,
            entry,
            file,
            line,
        }
    }
}

inventory::collect!(StaticTest);

/// Every `unit_test!` declaration linked into the binary.
///
/// Link order across files is unspecified, so declarations are sorted by
/// file, then by line.
pub fn static_tests() -> Vec<&'static StaticTest> {
    let mut tests: Vec<_> = inventory::iter::<StaticTest>.into_iter().collect();
    tests.sort_by(|a, b| a.file.cmp(b.file).then_with(|| a.line.cmp(&b.line)));
    tests
}

/// Append-only list of registered tests; iteration follows registration order
#[derive(Debug, Default)]
pub struct Registry {
    tests: Vec<TestDescriptor>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every `unit_test!` declaration in the binary
    pub fn from_static() -> Self {
        let mut registry = Self::new();
        for test in static_tests() {
            registry.register(test.suite, test.name, test.entry);
        }
        registry
    }

    /// Append a test. Duplicates are kept and both run.
    ///
    /// Always returns `true`.
    pub fn register(
        &mut self,
        suite: impl Into<String>,
        name: impl Into<String>,
        entry: impl Fn() + Send + Sync + 'static,
    ) -> bool {
        self.tests.push(TestDescriptor::new(suite, name, entry));
        true
    }

    /// Tests in registration order
    pub fn iter(&self) -> impl Iterator<Item = &TestDescriptor> {
        self.tests.iter()
    }

    /// Test at `index` in registration order
    pub fn get(&self, index: usize) -> Option<&TestDescriptor> {
        self.tests.get(index)
    }

    /// Check if any test is registered
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Get count of tests
    pub fn len(&self) -> usize {
        self.tests.len()
    }
}
