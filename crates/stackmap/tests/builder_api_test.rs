//! Integration tests for the DiagramBuilder API
//!
//! These tests verify that the public API works and is usable.

use stackmap::{
    DiagramBuilder, StackmapError,
    attributes::ClusterAttributes,
    config::AppConfig,
    export::dot::DotExporter,
    icon::Icon,
    semantic::{DiagramError, GraphBuilder},
};

#[test]
fn test_builder_api_exists() {
    let _builder = DiagramBuilder::default();
}

#[test]
fn test_build_default_overview() {
    let builder = DiagramBuilder::new(AppConfig::default());
    let result = builder.build();
    assert!(
        result.is_ok(),
        "Should declare the overview: {:?}",
        result.err()
    );
}

#[test]
fn test_builder_reusability() {
    let builder = DiagramBuilder::default();

    let diagram1 = builder.build().expect("Failed to declare diagram1");
    let dot1 = builder.to_dot(&diagram1).expect("Failed to export diagram1");

    let diagram2 = builder.build().expect("Failed to declare diagram2");
    let dot2 = builder.to_dot(&diagram2).expect("Failed to export diagram2");

    assert!(dot1.starts_with("digraph"), "First export should be DOT");
    assert_eq!(dot1, dot2);
}

#[test]
fn test_custom_graph_through_public_api() {
    let mut builder = GraphBuilder::new("Backups");
    let (_, (lambda, bucket)) = builder
        .cluster("api_backups", "Game Backups", ClusterAttributes::new(), |b| {
            let lambda = b.node("api_handler", "Backup\nHandler", Icon::Lambda)?;
            let bucket = b.node("api_bucket", "Backups", Icon::SimpleStorageService)?;
            Ok((lambda, bucket))
        })
        .expect("Failed to declare cluster");
    let volume = builder
        .node("api_volume", "Game Volume", Icon::ElasticBlockStore)
        .unwrap();
    builder.connect(volume, lambda).unwrap();
    builder.connect(lambda, bucket).unwrap();

    let diagram = builder.build().expect("Failed to build");
    let dot = DotExporter::new().to_dot(&diagram).expect("Failed to export");

    assert!(dot.contains("\"Backup\\nHandler\""));
    assert!(dot.contains("\"Game Backups\""));
    assert!(dot.contains("\"Backups\""));
}

#[test]
fn test_diagram_error_converts() {
    let mut builder = GraphBuilder::new("");
    builder.node("api_dup", "One", Icon::Ec2).unwrap();
    let err: StackmapError = builder
        .node("api_dup", "Two", Icon::Ec2)
        .unwrap_err()
        .into();

    assert!(matches!(
        err,
        StackmapError::Diagram(DiagramError::DuplicateKey(_))
    ));
    assert!(err.to_string().contains("api_dup"));
}
