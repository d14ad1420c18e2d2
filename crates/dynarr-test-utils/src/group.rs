//! Named test tables.
//!
//! A [`TestGroup`] keeps tests in registration order. [`TestGroup::run`]
//! invokes every test in isolation: a panic inside one test is caught and
//! recorded as that test's failure, and the remaining tests still run.

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::panic;

use indexmap::IndexMap;

/// Outcome of a single test: `Ok(())` or a failure description.
pub type TestResult = Result<(), String>;

/// A zero-argument test function.
pub type TestFn = fn() -> TestResult;

/// A test name was registered twice in the same group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateTest {
    pub group: String,
    pub name: &'static str,
}

impl fmt::Display for DuplicateTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "test '{}' registered twice in group '{}'", self.name, self.group)
    }
}

impl Error for DuplicateTest {}

/// An ordered table of named tests.
pub struct TestGroup {
    name: String,
    tests: IndexMap<&'static str, TestFn>,
}

impl TestGroup {
    /// Create an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: IndexMap::new(),
        }
    }

    /// Build a group from a `(name, test)` table.
    pub fn from_table(
        name: impl Into<String>,
        table: &[(&'static str, TestFn)],
    ) -> Result<Self, DuplicateTest> {
        let mut group = Self::new(name);
        for &(test_name, test) in table {
            group.register(test_name, test)?;
        }
        Ok(group)
    }

    /// Add a test under `name`.
    pub fn register(&mut self, name: &'static str, test: TestFn) -> Result<(), DuplicateTest> {
        if self.tests.contains_key(name) {
            return Err(DuplicateTest {
                group: self.name.clone(),
                name,
            });
        }
        self.tests.insert(name, test);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Test names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tests.keys().copied()
    }

    /// Run one test by name. Returns `None` if no such test is registered.
    pub fn run_one(&self, name: &str) -> Option<TestResult> {
        self.tests
            .get_key_value(name)
            .map(|(&name, &test)| invoke(name, test))
    }

    /// Run every test in registration order.
    pub fn run(&self) -> GroupReport {
        let mut report = GroupReport {
            group: self.name.clone(),
            passed: 0,
            failures: Vec::new(),
        };
        for (&name, &test) in &self.tests {
            match invoke(name, test) {
                Ok(()) => report.passed += 1,
                Err(description) => report.failures.push(Failure {
                    test: name,
                    description,
                }),
            }
        }
        report
    }
}

/// Call `test`, turning panics and empty descriptions into failures.
///
/// An empty description is replaced by `"<name> failed"`.
fn invoke(name: &str, test: TestFn) -> TestResult {
    match panic::catch_unwind(test) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(description)) if description.is_empty() => Err(format!("{name} failed")),
        Ok(Err(description)) => Err(description),
        Err(payload) => Err(format!("panicked: {}", panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}

/// One failed test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    pub test: &'static str,
    /// Never empty.
    pub description: String,
}

/// Results of running a [`TestGroup`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupReport {
    pub group: String,
    pub passed: usize,
    pub failures: Vec<Failure>,
}

impl GroupReport {
    pub fn total(&self) -> usize {
        self.passed + self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Lists each failure as `group/test: description`; successes are silent.
impl fmt::Display for GroupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for failure in &self.failures {
            writeln!(
                f,
                "{}/{}: {}",
                self.group, failure.test, failure.description
            )?;
        }
        write!(
            f,
            "{}: {} of {} passed",
            self.group,
            self.passed,
            self.total()
        )
    }
}
