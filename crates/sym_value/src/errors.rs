//! Error taxonomy shared by every layer of the bridge.
//!
//! Factory functions are the public construction API. Callers match on the
//! variants; the `Display` output is the diagnostic text surfaced to users.

use thiserror::Error;

/// Result alias used across the workspace.
pub type SymResult<T> = Result<T, SymError>;

/// Every failure the bridge can report.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SymError {
    /// Malformed expression text. `position` is a byte offset into the input.
    #[error("syntax error at offset {position}: {message}")]
    Parse { message: String, position: usize },

    /// The kernel rejected or could not complete an operation. The message is
    /// the kernel's diagnostic, unmodified.
    #[error("{message}")]
    Evaluation { message: String },

    /// An accessor was invoked on a value of the wrong tag.
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },

    /// Vector access outside `[0, size)`.
    #[error("index {index} out of range for vector of size {size}")]
    IndexOutOfRange { index: i64, size: usize },

    /// Name resolves to no recognized operator.
    #[error("unknown operator `{name}`")]
    UnknownOperator { name: String },

    /// A heap handle id that was never issued or has already been freed.
    #[error("invalid heap handle {raw:#018x}")]
    InvalidHandle { raw: u64 },
}

impl SymError {
    /// True for failures that originate in the kernel (parse or evaluation)
    /// rather than in local accessor misuse.
    pub fn is_kernel_error(&self) -> bool {
        matches!(self, SymError::Parse { .. } | SymError::Evaluation { .. })
    }
}

// Factory functions

#[cold]
pub fn parse_error(message: impl Into<String>, position: usize) -> SymError {
    SymError::Parse {
        message: message.into(),
        position,
    }
}

#[cold]
pub fn evaluation(message: impl Into<String>) -> SymError {
    SymError::Evaluation {
        message: message.into(),
    }
}

#[cold]
pub fn division_by_zero() -> SymError {
    evaluation("division by zero")
}

#[cold]
pub fn type_mismatch(expected: &'static str, got: &'static str) -> SymError {
    SymError::TypeMismatch { expected, got }
}

#[cold]
pub fn index_out_of_range(index: i64, size: usize) -> SymError {
    SymError::IndexOutOfRange { index, size }
}

#[cold]
pub fn unknown_operator(name: impl Into<String>) -> SymError {
    SymError::UnknownOperator { name: name.into() }
}

#[cold]
pub fn invalid_handle(raw: u64) -> SymError {
    SymError::InvalidHandle { raw }
}
