//! Failure taxonomy for group construction and transforms.

use thiserror::Error;

use crate::fault::Fault;

/// Errors raised by [`crate::FaultGroup`] construction and transforms.
///
/// All three variants are synchronous caller errors, never transient: no
/// partial state survives them, and retrying without fixing the call is
/// pointless.
#[derive(Debug, Error)]
pub enum GroupError {
    /// A dynamic payload failed the base-error conformance check.
    #[error("payload at index {index} is not a fault: {found}")]
    InvalidMember { index: usize, found: String },

    /// Children and sources differ in length.
    #[error("different number of sources ({sources}) and faults ({children})")]
    LengthMismatch { children: usize, sources: usize },

    /// The fault to remove is not a member of the group.
    #[error("{fault:?} not contained in {group}")]
    NotAMember { fault: Fault, group: String },
}

/// Result type for group operations.
pub type GroupResult<T> = Result<T, GroupError>;
