//! Per-script results and the run report built from them.

use std::path::{Path, PathBuf};

/// Outcome of one script file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptExecutionResult {
    /// Path of the script as discovered.
    pub file_path: PathBuf,

    /// Whether the script ran and committed (or was blank).
    pub success: bool,

    /// Error text when the script failed.
    pub error_message: Option<String>,
}

impl ScriptExecutionResult {
    /// A script that committed, or was blank and skipped.
    pub fn succeeded(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            success: true,
            error_message: None,
        }
    }

    /// A script that failed and was rolled back.
    pub fn failed(file_path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            success: false,
            error_message: Some(message.into()),
        }
    }
}

/// Ordered results of one script run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptReport {
    /// One entry per discovered script, in execution order.
    pub results: Vec<ScriptExecutionResult>,
}

impl ScriptReport {
    /// Create a report from collected results.
    pub fn new(results: Vec<ScriptExecutionResult>) -> Self {
        Self { results }
    }

    /// Number of scripts processed.
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Number of scripts that succeeded.
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    /// Number of scripts that failed.
    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// Whether every script succeeded.
    pub fn is_success(&self) -> bool {
        self.results.iter().all(|r| r.success)
    }

    /// Failed scripts with their error text.
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.results.iter().filter(|r| !r.success).map(|r| {
            (
                r.file_path.as_path(),
                r.error_message.as_deref().unwrap_or_default(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let report = ScriptReport::new(vec![
            ScriptExecutionResult::failed("a.sql", "boom"),
            ScriptExecutionResult::succeeded("b.sql"),
            ScriptExecutionResult::succeeded("c.sql"),
        ]);
        assert_eq!(report.total(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_success());

        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures, vec![(Path::new("a.sql"), "boom")]);
    }

    #[test]
    fn test_empty_report_is_success() {
        let report = ScriptReport::default();
        assert_eq!(report.total(), 0);
        assert_eq!(report.failed(), 0);
        assert!(report.is_success());
    }
}
