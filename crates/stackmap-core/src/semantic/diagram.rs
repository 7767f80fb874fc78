use indexmap::IndexMap;

use crate::{
    attributes::{ClusterAttributes, GraphAttributes},
    icon::Icon,
    identifier::Id,
};

/// Reference to a declared node or cluster.
///
/// Elements are the members of clusters and the endpoints of edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Node(Id),
    Cluster(Id),
}

impl Element {
    pub fn id(self) -> Id {
        match self {
            Self::Node(id) | Self::Cluster(id) => id,
        }
    }
}

/// A labeled resource symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    label: String,
    icon: Icon,
    cluster: Option<Id>,
}

impl Node {
    pub(super) fn new(id: Id, label: String, icon: Icon, cluster: Option<Id>) -> Self {
        Self {
            id,
            label,
            icon,
            cluster,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// Display label. Line breaks are kept as `\n`.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon(&self) -> Icon {
        self.icon
    }

    /// The innermost cluster containing this node, if any.
    pub fn cluster(&self) -> Option<Id> {
        self.cluster
    }
}

/// A titled group of nodes and nested clusters.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    id: Id,
    title: String,
    attributes: ClusterAttributes,
    parent: Option<Id>,
    depth: usize,
    members: Vec<Element>,
}

impl Cluster {
    pub(super) fn new(
        id: Id,
        title: String,
        attributes: ClusterAttributes,
        parent: Option<Id>,
        depth: usize,
    ) -> Self {
        Self {
            id,
            title,
            attributes,
            parent,
            depth,
            members: Vec::new(),
        }
    }

    pub(super) fn push_member(&mut self, member: Element) {
        self.members.push(member);
    }

    pub(super) fn truncate_members(&mut self, len: usize) {
        self.members.truncate(len);
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn attributes(&self) -> &ClusterAttributes {
        &self.attributes
    }

    pub fn parent(&self) -> Option<Id> {
        self.parent
    }

    /// Nesting depth, `0` for clusters declared at the top level.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Direct members in declaration order.
    pub fn members(&self) -> &[Element] {
        &self.members
    }
}

/// Kind of relation an edge expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// The source produces or contains the target.
    Directed,
    /// Symmetric adjacency, drawn without arrow heads.
    Undirected,
}

/// A connection between two declared elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    source: Element,
    target: Element,
    kind: EdgeKind,
}

impl Edge {
    pub(super) fn new(source: Element, target: Element, kind: EdgeKind) -> Self {
        Self {
            source,
            target,
            kind,
        }
    }

    pub fn source(&self) -> Element {
        self.source
    }

    pub fn target(&self) -> Element {
        self.target
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    /// Returns true when the edge joins `a` and `b`, in either direction for
    /// undirected edges.
    pub fn joins(&self, a: Element, b: Element) -> bool {
        match self.kind {
            EdgeKind::Directed => self.source == a && self.target == b,
            EdgeKind::Undirected => {
                (self.source == a && self.target == b) || (self.source == b && self.target == a)
            }
        }
    }
}

/// A fully declared diagram.
///
/// Nodes, clusters, members and edges all keep their declaration order so that
/// exports are deterministic.
#[derive(Debug, Clone)]
pub struct Diagram {
    pub(super) name: String,
    pub(super) attributes: GraphAttributes,
    pub(super) nodes: IndexMap<Id, Node>,
    pub(super) clusters: IndexMap<Id, Cluster>,
    pub(super) root: Vec<Element>,
    pub(super) edges: Vec<Edge>,
}

impl Diagram {
    /// Diagram title, empty for untitled diagrams.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &GraphAttributes {
        &self.attributes
    }

    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn cluster(&self, id: Id) -> Option<&Cluster> {
        self.clusters.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.values()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Elements declared outside of any cluster.
    pub fn root_members(&self) -> &[Element] {
        &self.root
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn clusters_count(&self) -> usize {
        self.clusters.len()
    }

    pub fn edges_count(&self) -> usize {
        self.edges.len()
    }

    /// Checks whether `element` refers to a declared node or cluster.
    pub fn contains(&self, element: Element) -> bool {
        match element {
            Element::Node(id) => self.nodes.contains_key(&id),
            Element::Cluster(id) => self.clusters.contains_key(&id),
        }
    }

    /// Returns the chain of clusters enclosing `element`, innermost first.
    pub fn ancestors(&self, element: Element) -> Vec<Id> {
        let mut current = match element {
            Element::Node(id) => self.nodes.get(&id).and_then(Node::cluster),
            Element::Cluster(id) => self.clusters.get(&id).and_then(Cluster::parent),
        };
        let mut ancestors = Vec::new();
        while let Some(id) = current {
            ancestors.push(id);
            current = self.clusters.get(&id).and_then(Cluster::parent);
        }
        ancestors
    }

    /// Returns the node standing in for `element` when it is an edge endpoint:
    /// the node itself, or the first node found depth first inside a cluster.
    pub fn anchor_node(&self, element: Element) -> Option<Id> {
        match element {
            Element::Node(id) => self.nodes.contains_key(&id).then_some(id),
            Element::Cluster(id) => self
                .clusters
                .get(&id)?
                .members()
                .iter()
                .find_map(|member| self.anchor_node(*member)),
        }
    }
}
