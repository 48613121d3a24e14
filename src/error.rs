use thiserror::Error;

/// Failures a codec operation can report.
///
/// Each failure is terminal for the call that raised it: an operation
/// either returns a complete output buffer or exactly one of these, never a
/// partial result. The same input always raises the same failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RleError {
    /// A token declared more trailing bytes than the stream still holds.
    #[error("encoded stream truncated at offset {offset}, {needed} more byte(s) expected")]
    TruncatedInput { offset: usize, needed: usize },

    /// A header byte carried a count of zero, which no encoder emits.
    #[error("corrupt token at offset {offset}, count is zero")]
    ZeroCount { offset: usize },

    /// The output buffer could not be allocated or grown.
    #[error("failed to reserve {requested} byte(s) for the output buffer")]
    AllocationFailure { requested: usize },
}
