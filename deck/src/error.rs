//! Engine-level failures. Transport failures belong to the API host, not here.

/// Errors raised by the engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeckError {
    /// The optimizer response carried no deck descriptor.
    #[error("invalid data received from the API: missing deck descriptor")]
    InvalidSnapshot,

    /// The placement heuristic found no room for another item.
    #[error("no space left on the deck for another item")]
    Capacity,

    /// No snapshot has been loaded yet.
    #[error("no load plan has been loaded")]
    NotLoaded,
}
