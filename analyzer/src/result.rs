//! The result of type resolution steps that can fail.

use ferroplc_dsl::diagnostic::Diagnostic;

/// Resolution steps either succeed or terminate the enclosing
/// compilation attempt with a diagnostic. There is no retryable
/// condition at this layer.
pub type ResolutionResult<T> = Result<T, Diagnostic>;
