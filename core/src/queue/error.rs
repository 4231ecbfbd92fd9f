use thiserror::Error;

/// Errors that can occur during ItemQueue operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The queue mutex was poisoned by a panicking thread
    #[error("item queue lock poisoned")]
    LockPoisoned,
}
