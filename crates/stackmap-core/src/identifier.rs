//! Element keys backed by a global string interner.
//!
//! Every node and cluster of a diagram is addressed by an [`Id`]. Ids are
//! cheap to copy and compare, which keeps edge endpoints and lookup tables
//! free of string clones.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        // The interner is never left half-updated, so a poisoned lock is still usable.
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Interned key of a diagram element.
///
/// # Examples
///
/// ```
/// use stackmap_core::identifier::Id;
///
/// let vpc = Id::new("vpc");
/// assert_eq!(vpc, "vpc");
/// assert_eq!(vpc, Id::from("vpc"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a string slice.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Returns the interned string behind this ID.
    pub fn as_string(&self) -> String {
        interner().resolve(self.0).unwrap_or_default().to_owned()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
