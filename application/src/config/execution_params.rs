//! Execution parameters: use case deadlines.
//!
//! [`ExecutionParams`] groups the deadlines that bound remote round-trips in
//! [`ExecToolUseCase`](crate::use_cases::exec_tool::ExecToolUseCase) and
//! [`CompleteUseCase`](crate::use_cases::complete::CompleteUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Deadlines for remote round-trips.
///
/// | Path        | Deadline             |
/// |-------------|----------------------|
/// | completion  | `completion_timeout` |
/// | exec schema | `schema_timeout`     |
/// | connect     | `connect_timeout`    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Whole live query behind a shell completion request.
    pub completion_timeout: Duration,
    /// Fetching the tool list to obtain a schema before `exec`.
    pub schema_timeout: Duration,
    /// Establishing the HTTP connection to the server.
    pub connect_timeout: Duration,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            completion_timeout: Duration::from_secs(3),
            schema_timeout: Duration::from_secs(2),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_completion_timeout(mut self, timeout: Duration) -> Self {
        self.completion_timeout = timeout;
        self
    }

    pub fn with_schema_timeout(mut self, timeout: Duration) -> Self {
        self.schema_timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}
