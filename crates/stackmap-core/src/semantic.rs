//! Semantic model of an overview diagram.
//!
//! A [`Diagram`] is an immutable set of nodes, clusters and edges. It can only
//! be produced by a [`GraphBuilder`], which checks the structural rules while
//! elements are declared:
//!
//! - keys are unique across nodes and clusters,
//! - edge endpoints are declared before the edge,
//! - an edge never joins an element to itself or to a cluster enclosing it,
//! - every cluster ends up with at least one member.

mod builder;
mod diagram;
mod error;

pub use builder::GraphBuilder;
pub use diagram::{Cluster, Diagram, Edge, EdgeKind, Element, Node};
pub use error::DiagramError;
