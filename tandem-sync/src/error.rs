//! Error types for the synchronization layer

use std::fmt;
use tandem_convert::ConvertError;

/// Errors that can occur in the synchronization layer.
///
/// `InvalidQueueBound` is an invariant violation and fails the calling
/// operation outright; conversion failures are recoverable and handled close
/// to where they occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// The expected-edit queue capacity must be at least 1.
    InvalidQueueBound(usize),
    /// A conversion failed while synchronizing.
    Convert(ConvertError),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::InvalidQueueBound(bound) => {
                write!(f, "expected-edit queue capacity must be positive, got {bound}")
            }
            SyncError::Convert(error) => write!(f, "conversion failed: {error}"),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<ConvertError> for SyncError {
    fn from(error: ConvertError) -> Self {
        SyncError::Convert(error)
    }
}
