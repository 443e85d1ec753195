//! Test step value object.

use serde::{Deserialize, Serialize};

use super::status::RunStatus;

/// A single ordered step in a test case.
///
/// `step_number` is maintained by [`TestCase::renumber_steps`]
/// (contiguous 1..N matching array position); callers should not set it
/// directly.
///
/// [`TestCase::renumber_steps`]: super::TestCase::renumber_steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestStep {
    /// 1-based position within the test case.
    #[serde(default)]
    pub step_number: u32,
    /// What the tester does.
    pub description: String,
    /// Input data for the step.
    #[serde(default)]
    pub test_data: String,
    /// What should happen.
    #[serde(default)]
    pub expected_result: String,
    /// What actually happened, recorded during execution.
    #[serde(default)]
    pub actual_result: String,
    /// Execution status of this step.
    #[serde(default)]
    pub step_status: RunStatus,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
}

impl TestStep {
    /// Create a new unexecuted step.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            step_number: 0,
            description: description.into(),
            test_data: String::new(),
            expected_result: String::new(),
            actual_result: String::new(),
            step_status: RunStatus::NotRun,
            notes: String::new(),
        }
    }

    /// Builder-style setter for the expected result.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected_result = expected.into();
        self
    }

    /// Builder-style setter for the test data.
    pub fn with_test_data(mut self, data: impl Into<String>) -> Self {
        self.test_data = data.into();
        self
    }
}
