use indexmap::IndexMap;
use log::{debug, trace};

use crate::{
    attributes::{ClusterAttributes, GraphAttributes},
    icon::Icon,
    identifier::Id,
};

use super::{Cluster, Diagram, DiagramError, Edge, EdgeKind, Element, Node};

/// Declarative builder for a [`Diagram`].
///
/// Nodes are placed into the cluster whose body is currently running, so the
/// nesting of [`GraphBuilder::cluster`] calls mirrors the visual nesting.
///
/// # Examples
///
/// ```
/// use stackmap_core::{attributes::ClusterAttributes, icon::Icon, semantic::GraphBuilder};
///
/// let mut builder = GraphBuilder::new("network");
/// let (_, (vpc, subnet)) = builder
///     .cluster("net", "Networking Resources", ClusterAttributes::new(), |b| {
///         let vpc = b.node("vpc", "VPC", Icon::Vpc)?;
///         let subnet = b.node("subnet", "Public Subnet", Icon::PublicSubnet)?;
///         Ok((vpc, subnet))
///     })
///     .unwrap();
/// builder.link(vpc, subnet).unwrap();
///
/// let diagram = builder.build().unwrap();
/// assert_eq!(diagram.nodes_count(), 2);
/// assert_eq!(diagram.clusters_count(), 1);
/// assert_eq!(diagram.edges_count(), 1);
/// ```
#[derive(Debug)]
pub struct GraphBuilder {
    name: String,
    attributes: GraphAttributes,
    nodes: IndexMap<Id, Node>,
    clusters: IndexMap<Id, Cluster>,
    root: Vec<Element>,
    edges: Vec<Edge>,
    scope: Vec<Id>,
}

/// Sizes of the builder collections at the start of a cluster body.
#[derive(Debug, Clone, Copy)]
struct Mark {
    nodes: usize,
    clusters: usize,
    edges: usize,
    members: usize,
}

impl GraphBuilder {
    /// Creates a builder for a diagram titled `name`. An empty name leaves the
    /// diagram untitled.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: GraphAttributes::default(),
            nodes: IndexMap::new(),
            clusters: IndexMap::new(),
            root: Vec::new(),
            edges: Vec::new(),
            scope: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: GraphAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Declares a node inside the current cluster.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::DuplicateKey`] when `key` is already used by a
    /// node or cluster.
    pub fn node(
        &mut self,
        key: &str,
        label: impl Into<String>,
        icon: Icon,
    ) -> Result<Element, DiagramError> {
        let id = self.claim_key(key)?;
        let cluster = self.scope.last().copied();
        let node = Node::new(id, label.into(), icon, cluster);
        trace!(node:?; "Declared node");

        self.nodes.insert(id, node);
        let element = Element::Node(id);
        self.add_member(element);
        Ok(element)
    }

    /// Declares a cluster inside the current cluster and runs `body` with the
    /// new cluster as the current one.
    ///
    /// Returns the cluster element together with whatever `body` returned,
    /// which is usually the elements declared inside it.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::DuplicateKey`] when `key` is already used, or
    /// any error returned by `body`. On error the cluster and everything
    /// declared inside it are discarded.
    pub fn cluster<F, T>(
        &mut self,
        key: &str,
        title: impl Into<String>,
        attributes: ClusterAttributes,
        body: F,
    ) -> Result<(Element, T), DiagramError>
    where
        F: FnOnce(&mut Self) -> Result<T, DiagramError>,
    {
        let id = self.claim_key(key)?;
        let parent = self.scope.last().copied();
        let mark = self.mark();
        let cluster = Cluster::new(id, title.into(), attributes, parent, self.scope.len());
        debug!(cluster = key, depth = self.scope.len(); "Opening cluster");

        self.clusters.insert(id, cluster);
        let element = Element::Cluster(id);
        self.add_member(element);

        self.scope.push(id);
        let result = body(self);
        self.scope.pop();

        match result {
            Ok(value) => Ok((element, value)),
            Err(err) => {
                debug!(cluster = key, error = err.to_string(); "Discarding cluster");
                self.rollback(mark);
                Err(err)
            }
        }
    }

    /// Declares a directed edge: `source` produces or contains `target`.
    pub fn connect(&mut self, source: Element, target: Element) -> Result<(), DiagramError> {
        self.add_edge(source, target, EdgeKind::Directed)
    }

    /// Declares a directed edge from `source` to each of `targets`, in order.
    pub fn connect_all(
        &mut self,
        source: Element,
        targets: &[Element],
    ) -> Result<(), DiagramError> {
        targets
            .iter()
            .try_for_each(|target| self.connect(source, *target))
    }

    /// Declares an undirected adjacency between `a` and `b`.
    pub fn link(&mut self, a: Element, b: Element) -> Result<(), DiagramError> {
        self.add_edge(a, b, EdgeKind::Undirected)
    }

    /// Finishes the declaration.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::EmptyCluster`] for the first cluster that has no
    /// members.
    pub fn build(self) -> Result<Diagram, DiagramError> {
        if let Some(empty) = self.clusters.values().find(|c| c.members().is_empty()) {
            return Err(DiagramError::EmptyCluster(empty.id()));
        }

        debug!(
            nodes = self.nodes.len(),
            clusters = self.clusters.len(),
            edges = self.edges.len();
            "Diagram declared"
        );

        Ok(Diagram {
            name: self.name,
            attributes: self.attributes,
            nodes: self.nodes,
            clusters: self.clusters,
            root: self.root,
            edges: self.edges,
        })
    }

    fn claim_key(&self, key: &str) -> Result<Id, DiagramError> {
        let id = Id::new(key);
        if self.nodes.contains_key(&id) || self.clusters.contains_key(&id) {
            return Err(DiagramError::DuplicateKey(id));
        }
        Ok(id)
    }

    fn member_count(&self) -> usize {
        match self.scope.last().and_then(|id| self.clusters.get(id)) {
            Some(cluster) => cluster.members().len(),
            None => self.root.len(),
        }
    }

    fn mark(&self) -> Mark {
        Mark {
            nodes: self.nodes.len(),
            clusters: self.clusters.len(),
            edges: self.edges.len(),
            members: self.member_count(),
        }
    }

    /// Drops everything declared since `mark` was taken in the current scope.
    fn rollback(&mut self, mark: Mark) {
        self.nodes.truncate(mark.nodes);
        self.clusters.truncate(mark.clusters);
        self.edges.truncate(mark.edges);
        match self.scope.last().and_then(|id| self.clusters.get_mut(id)) {
            Some(cluster) => cluster.truncate_members(mark.members),
            None => self.root.truncate(mark.members),
        }
    }

    fn add_member(&mut self, element: Element) {
        match self.scope.last().and_then(|id| self.clusters.get_mut(id)) {
            Some(cluster) => cluster.push_member(element),
            None => self.root.push(element),
        }
    }

    fn contains(&self, element: Element) -> bool {
        match element {
            Element::Node(id) => self.nodes.contains_key(&id),
            Element::Cluster(id) => self.clusters.contains_key(&id),
        }
    }

    /// Returns true when `outer` is a cluster enclosing `inner`.
    fn encloses(&self, outer: Element, inner: Element) -> bool {
        let Element::Cluster(outer_id) = outer else {
            return false;
        };
        let mut current = match inner {
            Element::Node(id) => self.nodes.get(&id).and_then(Node::cluster),
            Element::Cluster(id) => self.clusters.get(&id).and_then(Cluster::parent),
        };
        while let Some(id) = current {
            if id == outer_id {
                return true;
            }
            current = self.clusters.get(&id).and_then(Cluster::parent);
        }
        false
    }

    fn add_edge(
        &mut self,
        source: Element,
        target: Element,
        kind: EdgeKind,
    ) -> Result<(), DiagramError> {
        for endpoint in [source, target] {
            if !self.contains(endpoint) {
                return Err(DiagramError::UnknownElement(endpoint.id()));
            }
        }
        if source == target {
            return Err(DiagramError::SelfLoop(source.id()));
        }
        if self.encloses(source, target) {
            return Err(DiagramError::NestedEndpoint {
                inner: target.id(),
                outer: source.id(),
            });
        }
        if self.encloses(target, source) {
            return Err(DiagramError::NestedEndpoint {
                inner: source.id(),
                outer: target.id(),
            });
        }

        let edge = Edge::new(source, target, kind);
        trace!(edge:?; "Declared edge");
        self.edges.push(edge);
        Ok(())
    }
}
