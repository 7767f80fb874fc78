use thiserror::Error;

use crate::identifier::Id;

/// Structural errors raised while a diagram is declared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagramError {
    #[error("element `{0}` is declared more than once")]
    DuplicateKey(Id),

    #[error("element `{0}` is used before it is declared")]
    UnknownElement(Id),

    #[error("cluster `{0}` has no members")]
    EmptyCluster(Id),

    #[error("element `{0}` cannot be connected to itself")]
    SelfLoop(Id),

    #[error("`{inner}` is nested inside cluster `{outer}` and cannot be connected to it")]
    NestedEndpoint { inner: Id, outer: Id },
}
