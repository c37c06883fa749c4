use core::fmt;

/// Errors surfaced by the map variants and their cursors.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AnyKeyError {
    /// The key is in neither partition and no default was supplied.
    MissingKey,
    /// A mutation was attempted on a frozen map; `op` names the entry point.
    Immutable { op: &'static str },
    /// `hash()` on a frozen map holding an unhashable key or value.
    UnhashableInFrozenHash,
    /// The parent's length changed since the cursor was created.
    IterationInvalidated,
    /// A cursor was advanced against a map other than the one it came from.
    WrongMap,
    /// The default factory panicked on its trial call at construction.
    InvalidFactory,
}

impl fmt::Display for AnyKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyKeyError::MissingKey => f.write_str("key not found"),
            AnyKeyError::Immutable { op } => {
                write!(f, "frozen map does not support `{}`", op)
            }
            AnyKeyError::UnhashableInFrozenHash => {
                f.write_str("frozen map holds an unhashable key or value")
            }
            AnyKeyError::IterationInvalidated => {
                f.write_str("map changed size during iteration")
            }
            AnyKeyError::WrongMap => f.write_str("cursor belongs to a different map"),
            AnyKeyError::InvalidFactory => {
                f.write_str("default factory must be callable or None")
            }
        }
    }
}

impl std::error::Error for AnyKeyError {}
