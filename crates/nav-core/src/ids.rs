//! Strongly typed identifier wrappers.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// The ID following `self`, saturating at `INVALID`.
            #[inline]
            pub fn next(self) -> $name {
                $name(self.0.saturating_add(1))
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Identifier of an obstacle within a session's obstacle set.
    pub struct ObstacleId(u32);
}

typed_id! {
    /// Navigation-session generation counter.
    ///
    /// Bumped on every start/stop so that a provider response tagged with an
    /// older epoch can be recognised as stale and discarded.
    pub struct Epoch(u64);
}
