use thiserror::Error;

/// Errors that can occur during billing computation or invoice assembly.
///
/// Only fatal conditions live here. Reconciliation mismatches and a missing
/// payment QR are deliberately *not* errors — they are logged and the
/// invoice is still produced (see [`Reconciliation`](super::Reconciliation)).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BillError {
    /// Empty or malformed line-item set. Not retryable.
    #[error("invalid order: {0}")]
    InvalidOrder(String),

    /// The order carries no invoice number, order number, or internal id.
    /// Assembly aborts immediately.
    #[error("order has no resolvable identifier")]
    MissingOrderIdentifier,

    /// PDF serialization failed.
    #[error("document assembly error: {0}")]
    Assembly(String),

    /// Invoice series misuse (e.g. rolling the fiscal year backwards).
    #[error("numbering error: {0}")]
    Numbering(String),
}
