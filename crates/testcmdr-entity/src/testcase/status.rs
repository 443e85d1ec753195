//! Priority and execution-result enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Test case priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, sqlx::Type)]
#[sqlx(type_name = "priority_level", rename_all = "lowercase")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority (the default when absent).
    #[default]
    Medium,
    /// High priority.
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        write!(f, "{s}")
    }
}

/// Execution result for a test case or an individual step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, sqlx::Type)]
#[sqlx(type_name = "run_status", rename_all = "snake_case")]
pub enum RunStatus {
    /// Not yet executed (the default when absent).
    #[default]
    #[serde(rename = "Not Run")]
    NotRun,
    /// Executed and passed.
    Passed,
    /// Executed and failed.
    Failed,
    /// Execution started but not finished.
    #[serde(rename = "In Progress")]
    InProgress,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotRun => "Not Run",
            Self::Passed => "Passed",
            Self::Failed => "Failed",
            Self::InProgress => "In Progress",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(RunStatus::default(), RunStatus::NotRun);
    }

    #[test]
    fn test_run_status_serde_labels() {
        assert_eq!(
            serde_json::to_string(&RunStatus::NotRun).unwrap(),
            "\"Not Run\""
        );
        assert_eq!(
            serde_json::from_str::<RunStatus>("\"In Progress\"").unwrap(),
            RunStatus::InProgress
        );
    }
}
