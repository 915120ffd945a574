//! Failure type for host location queries.

use thiserror::Error;

/// A collaborator could not resolve a location.
///
/// Never escapes the engine's public operations: it is turned into a
/// `Notification::LocationUnavailable` at the operation boundary.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    /// The object has no geometry.
    #[error("location unavailable")]
    Unavailable,

    /// A caret position was requested for an object that is not editable.
    #[error("not an editable field")]
    NotEditable,
}
