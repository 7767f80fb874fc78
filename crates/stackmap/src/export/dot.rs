//! Graphviz DOT export.
//!
//! The diagram is converted into a `dot_structures::Graph` and printed with
//! `graphviz-rust`. Element ids are assigned in declaration order (`n0`, `n1`,
//! ..., `cluster_0`, ...), so the same diagram always prints the same source.
//!
//! Styling follows the look of the usual architecture diagram icon sets:
//! library defaults first, then per-diagram and per-cluster attributes, which
//! win on conflicts.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use dot_structures::{
    Attribute, Edge as DotEdge, EdgeTy, Graph, GraphAttributes as DotGraphAttributes,
    Id as DotId, Node as DotNode, NodeId, Stmt, Subgraph, Vertex,
};
use graphviz_rust::printer::{DotPrinter, PrinterContext};
use log::{debug, trace};

use stackmap_core::{
    attributes::Attributes,
    identifier::Id,
    semantic::{Cluster, Diagram, Edge, EdgeKind, Element, Node},
};

use super::Error;

const GRAPH_DEFAULTS: [(&str, &str); 7] = [
    ("pad", "2.0"),
    ("splines", "ortho"),
    ("nodesep", "0.60"),
    ("ranksep", "0.75"),
    ("fontname", "Sans-Serif"),
    ("fontsize", "15"),
    ("fontcolor", "#2D3436"),
];

const NODE_DEFAULTS: [(&str, &str); 10] = [
    ("shape", "box"),
    ("style", "rounded"),
    ("fixedsize", "true"),
    ("width", "1.4"),
    ("height", "1.4"),
    ("labelloc", "b"),
    ("imagescale", "true"),
    ("fontname", "Sans-Serif"),
    ("fontsize", "13"),
    ("fontcolor", "#2D3436"),
];

const EDGE_DEFAULTS: [(&str, &str); 1] = [("color", "#7B8894")];

const CLUSTER_DEFAULTS: [(&str, &str); 6] = [
    ("shape", "box"),
    ("style", "rounded"),
    ("labeljust", "l"),
    ("pencolor", "#AEB6BE"),
    ("fontname", "Sans-Serif"),
    ("fontsize", "12"),
];

/// Cluster background colors, cycled by nesting depth.
const CLUSTER_BACKGROUNDS: [&str; 4] = ["#E5F5FD", "#EBF3E7", "#ECE8F6", "#FDF7E3"];

/// Height of an icon node with a single line label, in inches.
const ICON_NODE_HEIGHT: f32 = 1.9;

/// Extra height per additional label line, in inches.
const LABEL_LINE_HEIGHT: f32 = 0.4;

fn defaults(pairs: &[(&str, &str)]) -> Attributes {
    pairs
        .iter()
        .fold(Attributes::new(), |attrs, (key, value)| attrs.with(*key, *value))
}

/// Escapes `value` for use inside a double quoted DOT string. Line breaks
/// become the `\n` escape, which Graphviz renders as a centered line break.
///
/// # Examples
///
/// ```
/// use stackmap::export::dot::escape;
///
/// assert_eq!(escape("CDK App\n[mcservers]"), r"CDK App\n[mcservers]");
/// assert_eq!(escape(r#"say "hi""#), r#"say \"hi\""#);
/// ```
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str(r"\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str(r"\n"),
            '\r' => {}
            other => escaped.push(other),
        }
    }
    escaped
}

fn quoted(value: &str) -> DotId {
    DotId::Escaped(format!("\"{}\"", escape(value)))
}

fn to_dot_attributes(attrs: &Attributes) -> Vec<Attribute> {
    attrs
        .iter()
        .map(|(key, value)| Attribute(DotId::Plain(key.to_string()), quoted(value)))
        .collect()
}

/// DOT identifiers of every declared element.
struct DotIds {
    nodes: HashMap<Id, String>,
    clusters: HashMap<Id, String>,
}

impl DotIds {
    fn assign(diagram: &Diagram) -> Self {
        let nodes = diagram
            .nodes()
            .enumerate()
            .map(|(idx, node)| (node.id(), format!("n{idx}")))
            .collect();
        // The `cluster` prefix makes Graphviz draw the subgraph as a box.
        let clusters = diagram
            .clusters()
            .enumerate()
            .map(|(idx, cluster)| (cluster.id(), format!("cluster_{idx}")))
            .collect();
        Self { nodes, clusters }
    }

    fn node(&self, id: Id) -> Result<&str, Error> {
        self.nodes
            .get(&id)
            .map(String::as_str)
            .ok_or_else(|| Error::Render(format!("node `{id}` is not part of the diagram")))
    }

    fn cluster(&self, id: Id) -> Result<&str, Error> {
        self.clusters
            .get(&id)
            .map(String::as_str)
            .ok_or_else(|| Error::Render(format!("cluster `{id}` is not part of the diagram")))
    }
}

/// Resolves an edge endpoint to the DOT id of the node it attaches to.
fn endpoint<'a>(diagram: &Diagram, ids: &'a DotIds, element: Element) -> Result<&'a str, Error> {
    let anchor = diagram.anchor_node(element).ok_or_else(|| {
        Error::Render(format!(
            "`{}` has no node to attach an edge to",
            element.id()
        ))
    })?;
    ids.node(anchor)
}

/// Builds Graphviz input for a [`Diagram`].
///
/// # Examples
///
/// ```
/// use stackmap::export::dot::DotExporter;
/// use stackmap_core::{icon::Icon, semantic::GraphBuilder};
///
/// let mut builder = GraphBuilder::new("");
/// builder.node("doc_vpc", "VPC", Icon::Vpc).unwrap();
/// let diagram = builder.build().unwrap();
///
/// let dot = DotExporter::new().to_dot(&diagram).unwrap();
/// assert!(dot.starts_with("digraph"));
/// assert!(dot.contains("\"VPC\""));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DotExporter {
    icon_dir: Option<PathBuf>,
}

impl DotExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses icon images from `dir` instead of the built-in category shapes.
    pub fn with_icon_dir(mut self, dir: Option<&Path>) -> Self {
        self.icon_dir = dir.map(Path::to_path_buf);
        self
    }

    /// Prints the DOT source of `diagram`.
    pub fn to_dot(&self, diagram: &Diagram) -> Result<String, Error> {
        let graph = self.to_graph(diagram)?;
        Ok(graph.print(&mut PrinterContext::default()))
    }

    /// Converts `diagram` into a Graphviz graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] when an edge endpoint cannot be resolved to a
    /// node of the diagram.
    pub fn to_graph(&self, diagram: &Diagram) -> Result<Graph, Error> {
        let ids = DotIds::assign(diagram);

        let compound = diagram.edges().iter().any(|edge| {
            matches!(edge.source(), Element::Cluster(_))
                || matches!(edge.target(), Element::Cluster(_))
        });

        let mut graph_attrs = defaults(&GRAPH_DEFAULTS)
            .with("label", diagram.name())
            .with("rankdir", diagram.attributes().direction().rankdir());
        if compound {
            graph_attrs.insert("compound", "true");
        }
        let graph_attrs = graph_attrs.merged(diagram.attributes().attributes());

        let mut stmts = vec![
            Stmt::GAttribute(DotGraphAttributes::Graph(to_dot_attributes(&graph_attrs))),
            Stmt::GAttribute(DotGraphAttributes::Node(to_dot_attributes(&defaults(
                &NODE_DEFAULTS,
            )))),
            Stmt::GAttribute(DotGraphAttributes::Edge(to_dot_attributes(&defaults(
                &EDGE_DEFAULTS,
            )))),
        ];

        for member in diagram.root_members() {
            stmts.push(self.member_stmt(diagram, &ids, *member)?);
        }
        for edge in diagram.edges() {
            stmts.push(self.edge_stmt(diagram, &ids, edge)?);
        }

        debug!(
            stmts = stmts.len(),
            compound = compound,
            icons = self.icon_dir.is_some();
            "DOT graph built"
        );

        Ok(Graph::DiGraph {
            id: DotId::Plain("G".to_string()),
            strict: false,
            stmts,
        })
    }

    fn member_stmt(
        &self,
        diagram: &Diagram,
        ids: &DotIds,
        member: Element,
    ) -> Result<Stmt, Error> {
        match member {
            Element::Node(id) => {
                let node = diagram
                    .node(id)
                    .ok_or_else(|| Error::Render(format!("node `{id}` is not declared")))?;
                Ok(self.node_stmt(node, ids.node(id)?))
            }
            Element::Cluster(id) => {
                let cluster = diagram
                    .cluster(id)
                    .ok_or_else(|| Error::Render(format!("cluster `{id}` is not declared")))?;
                self.cluster_stmt(diagram, ids, cluster)
            }
        }
    }

    fn node_stmt(&self, node: &Node, dot_id: &str) -> Stmt {
        let icon = node.icon();
        let mut attrs = Attributes::new()
            .with("label", node.label())
            .with("tooltip", icon.to_string());

        match &self.icon_dir {
            Some(dir) => {
                let extra_lines = node.label().matches('\n').count() as f32;
                attrs.insert("shape", "none");
                attrs.insert(
                    "height",
                    format!("{:.1}", ICON_NODE_HEIGHT + LABEL_LINE_HEIGHT * extra_lines),
                );
                attrs.insert("image", dir.join(icon.relative_path()).display().to_string());
            }
            None => {
                let category = icon.category();
                attrs.insert("shape", category.fallback_shape());
                attrs.insert("style", "filled");
                attrs.insert("fillcolor", category.fill_color());
                attrs.insert("fontcolor", "white");
                attrs.insert("fixedsize", "false");
                attrs.insert("labelloc", "c");
            }
        }
        trace!(node = dot_id, icon = icon.to_string(); "Node statement");

        Stmt::Node(DotNode {
            id: NodeId(DotId::Plain(dot_id.to_string()), None),
            attributes: to_dot_attributes(&attrs),
        })
    }

    fn cluster_stmt(
        &self,
        diagram: &Diagram,
        ids: &DotIds,
        cluster: &Cluster,
    ) -> Result<Stmt, Error> {
        let attrs = defaults(&CLUSTER_DEFAULTS)
            .with(
                "bgcolor",
                CLUSTER_BACKGROUNDS[cluster.depth() % CLUSTER_BACKGROUNDS.len()],
            )
            .with("label", cluster.title())
            .merged(cluster.attributes().attributes());

        let mut stmts = vec![Stmt::GAttribute(DotGraphAttributes::Graph(
            to_dot_attributes(&attrs),
        ))];
        for member in cluster.members() {
            stmts.push(self.member_stmt(diagram, ids, *member)?);
        }

        Ok(Stmt::Subgraph(Subgraph {
            id: DotId::Plain(ids.cluster(cluster.id())?.to_string()),
            stmts,
        }))
    }

    fn edge_stmt(&self, diagram: &Diagram, ids: &DotIds, edge: &Edge) -> Result<Stmt, Error> {
        let tail = endpoint(diagram, ids, edge.source())?;
        let head = endpoint(diagram, ids, edge.target())?;

        let mut attrs = Attributes::new().with(
            "dir",
            match edge.kind() {
                EdgeKind::Directed => "forward",
                EdgeKind::Undirected => "none",
            },
        );
        if let Element::Cluster(id) = edge.source() {
            attrs.insert("ltail", ids.cluster(id)?);
        }
        if let Element::Cluster(id) = edge.target() {
            attrs.insert("lhead", ids.cluster(id)?);
        }

        Ok(Stmt::Edge(DotEdge {
            ty: EdgeTy::Pair(
                Vertex::N(NodeId(DotId::Plain(tail.to_string()), None)),
                Vertex::N(NodeId(DotId::Plain(head.to_string()), None)),
            ),
            attributes: to_dot_attributes(&attrs),
        }))
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use stackmap_core::{icon::Icon, semantic::GraphBuilder};

    use super::*;

    fn label_strategy() -> impl Strategy<Value = String> {
        "[A-Za-z0-9 \\[\\]()=:,.\\n-]{0,24}"
    }

    /// Any label must survive printing as a quoted DOT string.
    fn check_label_prints_valid_dot(label: String) -> Result<(), TestCaseError> {
        let mut builder = GraphBuilder::new("");
        builder.node("prop_node", label.clone(), Icon::Ec2).unwrap();
        let diagram = builder.build().unwrap();

        let dot = DotExporter::new().to_dot(&diagram).unwrap();
        prop_assert!(graphviz_rust::parse(&dot).is_ok(), "invalid DOT for {label:?}:\n{dot}");
        let expected = format!("\"{}\"", escape(&label));
        prop_assert!(dot.contains(&expected), "missing {expected} in:\n{dot}");
        Ok(())
    }

    /// Escaped text never contains a raw line break or an unescaped quote.
    fn check_escape_is_single_line(value: String) -> Result<(), TestCaseError> {
        let escaped = escape(&value);
        prop_assert!(!escaped.contains('\n'));
        let unescaped_quote = escaped
            .char_indices()
            .filter(|(_, ch)| *ch == '"')
            .any(|(idx, _)| {
                let backslashes = escaped[..idx].chars().rev().take_while(|c| *c == '\\').count();
                backslashes % 2 == 0
            });
        prop_assert!(!unescaped_quote, "unescaped quote in {escaped:?}");
        Ok(())
    }

    proptest! {
        #[test]
        fn label_prints_valid_dot(label in label_strategy()) {
            check_label_prints_valid_dot(label)?;
        }

        #[test]
        fn escape_is_single_line(value in "[a-z\"\\\\\\n ]{0,32}") {
            check_escape_is_single_line(value)?;
        }
    }
}
