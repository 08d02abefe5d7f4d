use thiserror::Error;

/// Errors reported by the bank operations.
///
/// Every fallible operation validates before mutating, so a failed call
/// leaves the addressed slot exactly as it was. With the `unchecked`
/// cargo feature enabled none of these are ever produced.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PidError {
    /// Slot index at or beyond the bank's length.
    #[error("controller index {index} out of range for a bank of {len}")]
    InvalidIndex {
        /// The offending index.
        index: usize,
        /// Number of slots in the bank.
        len: usize,
    },

    /// Sample time not strictly positive.
    #[error("sample time must be positive")]
    InvalidSampleTime,

    /// Negative integral reset time.
    #[error("integral reset time must not be negative")]
    InvalidIntegralTime,

    /// Negative derivative time.
    #[error("derivative time must not be negative")]
    InvalidDerivativeTime,

    /// Nonzero derivative filter time constant shorter than the sample time.
    #[error("filter time constant must be zero or at least the sample time")]
    InvalidFilterTime,
}

/// Type alias for Result with [`PidError`].
pub type PidResult<T> = Result<T, PidError>;
