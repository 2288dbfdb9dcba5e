use crate::sink::SinkError;

/// Errors that can occur while filling an event table
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Error from the underlying storage sink
    #[error(transparent)]
    SinkError(#[from] SinkError),

    /// A column name was reused across incompatible column kinds
    #[error("column name '{name}' is already used by a {existing} column")]
    NameCollision {
        /// The colliding column name
        name: String,
        /// Description of the declaration that already owns the name
        existing: &'static str,
    },

    /// Values were appended after a commit without an intervening `clear()`,
    /// which would silently merge two rows
    #[error("row committed but not cleared; call clear() before filling the next row")]
    StaleRowBuffer,
}
