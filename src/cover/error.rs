// src/cover/error.rs
// =============================================================================
// Errors the bucket queue can report.
//
// Two families:
// - Invalid arguments: the caller asked for something the queue never allows
//   (raising a priority, or a priority that doesn't match the set's size)
// - Invariant violations: the queue's own bookkeeping is inconsistent.
//   These should be unreachable; if one shows up it is a bug, not a
//   condition to retry.
//
// Running out of sets is NOT an error - peek returns None and delete does
// nothing - and neither is failing to cover every element.
// =============================================================================

use thiserror::Error;

/// Broad category of a [`QueueError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed an argument the queue rejects.
    InvalidArgument,
    /// The queue's internal bookkeeping is corrupted.
    InvariantViolation,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// Priorities only ever go down.
    #[error("bucket queue priority can only be decreased (from {old} to {new})")]
    PriorityIncrease { old: usize, new: usize },

    /// The new priority must be the set's current size.
    #[error("new priority {new} does not match the set's size {size}")]
    PriorityMismatch { new: usize, size: usize },

    /// The set was not stored in the bucket it was expected in.
    #[error("set not found at priority {priority}")]
    NotFound { priority: usize },

    /// The priority is past the last bucket.
    #[error("priority {priority} is out of range (highest bucket is {len})")]
    OutOfRange { priority: usize, len: usize },
}

impl QueueError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueueError::PriorityIncrease { .. } | QueueError::PriorityMismatch { .. } => {
                ErrorKind::InvalidArgument
            }
            QueueError::NotFound { .. } | QueueError::OutOfRange { .. } => {
                ErrorKind::InvariantViolation
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            QueueError::PriorityIncrease { old: 1, new: 2 }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            QueueError::PriorityMismatch { new: 1, size: 2 }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            QueueError::NotFound { priority: 3 }.kind(),
            ErrorKind::InvariantViolation
        );
        assert_eq!(
            QueueError::OutOfRange { priority: 9, len: 2 }.kind(),
            ErrorKind::InvariantViolation
        );
    }

    #[test]
    fn test_error_message() {
        let err = QueueError::PriorityIncrease { old: 1, new: 4 };
        assert_eq!(
            err.to_string(),
            "bucket queue priority can only be decreased (from 1 to 4)"
        );
    }
}
