//! Sealed trait marker for Transport implementations.
//!
//! Keeps `Transport` implementable only inside this crate, so every
//! implementation attaches the secret fields the same way.

pub(crate) mod private {
    /// Sealed trait marker.
    pub trait Sealed {}
}
