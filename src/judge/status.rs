//! Judge status codes and per-execution results

/// Status of a single execution at the judge service.
///
/// Closed mapping over the service's numeric codes: 1 queued, 2 processing,
/// 3 accepted, 4 wrong answer, 5 time limit exceeded, 6 compilation error.
/// Everything at 7 and above is a runtime failure; the raw code is kept so
/// per-test detail can report it exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JudgeStatus {
    InQueue,
    Processing,
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    CompilationError,
    RuntimeError(i32),
}

impl JudgeStatus {
    /// Map a service status code to a variant
    pub fn from_id(id: i32) -> Self {
        match id {
            1 => Self::InQueue,
            2 => Self::Processing,
            3 => Self::Accepted,
            4 => Self::WrongAnswer,
            5 => Self::TimeLimitExceeded,
            6 => Self::CompilationError,
            other => Self::RuntimeError(other),
        }
    }

    /// The service status code for this variant
    pub fn id(&self) -> i32 {
        match self {
            Self::InQueue => 1,
            Self::Processing => 2,
            Self::Accepted => 3,
            Self::WrongAnswer => 4,
            Self::TimeLimitExceeded => 5,
            Self::CompilationError => 6,
            Self::RuntimeError(id) => *id,
        }
    }

    /// Check if the execution has finished (successfully or not)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::InQueue | Self::Processing)
    }

    /// Check if the execution passed its test case
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl std::fmt::Display for JudgeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InQueue => write!(f, "in queue"),
            Self::Processing => write!(f, "processing"),
            Self::Accepted => write!(f, "accepted"),
            Self::WrongAnswer => write!(f, "wrong answer"),
            Self::TimeLimitExceeded => write!(f, "time limit exceeded"),
            Self::CompilationError => write!(f, "compilation error"),
            Self::RuntimeError(_) => write!(f, "runtime error"),
        }
    }
}

/// Result of one execution, as reported by the judge service.
///
/// Absent wall time or memory on the wire is normalized to zero when the
/// service payload is converted, never at call sites.
#[derive(Debug, Clone)]
pub struct JudgeResult {
    pub status: JudgeStatus,
    /// Wall time in milliseconds
    pub time_ms: f64,
    /// Peak memory in kilobytes
    pub memory_kb: i64,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
}

impl JudgeResult {
    /// Error text for per-test detail: compiler output wins over stderr
    pub fn error_output(&self) -> Option<&str> {
        self.compile_output
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.stderr.as_deref().filter(|s| !s.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_id_round_trip() {
        for id in 1..=12 {
            assert_eq!(JudgeStatus::from_id(id).id(), id);
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!JudgeStatus::InQueue.is_terminal());
        assert!(!JudgeStatus::Processing.is_terminal());
        assert!(JudgeStatus::Accepted.is_terminal());
        assert!(JudgeStatus::WrongAnswer.is_terminal());
        assert!(JudgeStatus::TimeLimitExceeded.is_terminal());
        assert!(JudgeStatus::CompilationError.is_terminal());
        assert!(JudgeStatus::RuntimeError(11).is_terminal());
    }

    #[test]
    fn test_only_accepted_passes() {
        assert!(JudgeStatus::Accepted.is_accepted());
        assert!(!JudgeStatus::WrongAnswer.is_accepted());
        assert!(!JudgeStatus::TimeLimitExceeded.is_accepted());
        assert!(!JudgeStatus::CompilationError.is_accepted());
        assert!(!JudgeStatus::RuntimeError(7).is_accepted());
    }

    #[test]
    fn test_error_output_prefers_compiler_output() {
        let result = JudgeResult {
            status: JudgeStatus::CompilationError,
            time_ms: 0.0,
            memory_kb: 0,
            stdout: None,
            stderr: Some("runtime noise".to_string()),
            compile_output: Some("expected ';'".to_string()),
        };
        assert_eq!(result.error_output(), Some("expected ';'"));

        let result = JudgeResult {
            compile_output: Some(String::new()),
            ..result
        };
        assert_eq!(result.error_output(), Some("runtime noise"));
    }
}
