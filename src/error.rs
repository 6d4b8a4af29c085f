use thiserror::Error;

/// Convenience result type for kernels and the execution engine.
pub type KernelResult<T> = Result<T, KernelError>;

/// Error type returned by kernels, dataset accessors and the execution engine.
///
/// Missing data is never an error: kernels signal it with [`crate::na::NA_REAL`]. Errors are reserved
/// for caller-contract violations: empty input where a value is undefined, invalid parameters, or a
/// column lookup that fails.
#[derive(Debug, Error)]
pub enum KernelError {
    /// The operation has no defined result for an empty sequence.
    #[error("{op} is undefined for an empty sequence")]
    EmptyInput { op: &'static str },

    /// A parameter is outside its valid domain.
    #[error("invalid argument '{name}': {message}")]
    InvalidArgument { name: &'static str, message: String },

    /// The execution engine could not build its worker pool.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A column name was not found in the dataset schema.
    #[error("unknown column '{name}'")]
    UnknownColumn { name: String },

    /// A column exists but holds a different [`crate::types::DataType`] than the operation needs.
    #[error("column '{column}' is not {expected:?}")]
    TypeMismatch {
        column: String,
        expected: crate::types::DataType,
    },
}
