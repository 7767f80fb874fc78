//! The server farm architecture overview.
//!
//! The CDK app deploys two top-level stacks: the network stack (VPC and public
//! subnet) and the hosts stack, which nests one stack per game server. Each
//! nested stack owns the EC2 instance running its server, and every instance
//! sits in the public subnet.

use log::{debug, info};

use stackmap_core::{
    icon::Icon,
    semantic::{Diagram, Element, GraphBuilder},
};

use crate::{
    config::{FarmConfig, StyleConfig},
    error::StackmapError,
};

/// Declares the overview diagram for `farm`, styled by `style`.
///
/// # Errors
///
/// Returns [`StackmapError::Config`] when the farm has no servers or the style
/// is invalid, and [`StackmapError::Diagram`] when two servers share a name.
///
/// # Examples
///
/// ```
/// use stackmap::{config::{FarmConfig, StyleConfig}, overview};
///
/// let diagram = overview::server_farm(&FarmConfig::default(), &StyleConfig::default()).unwrap();
/// assert_eq!(diagram.nodes_count(), 11);
/// assert_eq!(diagram.clusters_count(), 5);
/// assert_eq!(diagram.edges_count(), 14);
/// ```
pub fn server_farm(farm: &FarmConfig, style: &StyleConfig) -> Result<Diagram, StackmapError> {
    if farm.servers().is_empty() {
        return Err(StackmapError::Config(
            "the server farm needs at least one server".to_string(),
        ));
    }

    info!(servers = farm.servers().len(); "Declaring server farm overview");

    let graph_attrs = style.graph_attributes().map_err(StackmapError::Config)?;
    let cluster_attrs = style.cluster_attributes();
    let mut builder = GraphBuilder::new("").with_attributes(graph_attrs);

    let (_, (network_stack, nested_stacks)) =
        builder.cluster("cdk", "Cloud Development Kit (CDK)", cluster_attrs.clone(), |b| {
            let app = b.node(
                "app",
                format!("CDK App\n[{}]", farm.qualifier()),
                Icon::CloudDevelopmentKit,
            )?;

            let (_, network_stack) =
                b.cluster("cdk_network", "CDK Stack = Network", cluster_attrs.clone(), |b| {
                    b.node(
                        "network_stack",
                        format!("CloudFormation Stack\n[{}]", farm.stack_id("network")),
                        Icon::CloudformationStack,
                    )
                })?;

            let (_, (nested_stacks, hosts_stack)) =
                b.cluster("cdk_hosts", "CDK Stack = Hosts", cluster_attrs.clone(), |b| {
                    let nested_stacks = farm
                        .servers()
                        .iter()
                        .map(|server| {
                            b.node(
                                &format!("nested_stack_{server}"),
                                format!("Nested Stack\n[Server {server}]"),
                                Icon::CloudformationStack,
                            )
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    let hosts_stack = b.node(
                        "hosts_stack",
                        format!("CloudFormation Stack\n[{}]", farm.stack_id("hosts")),
                        Icon::CloudformationStack,
                    )?;

                    let last_first: Vec<Element> = nested_stacks.iter().rev().copied().collect();
                    b.connect_all(hosts_stack, &last_first)?;
                    Ok((nested_stacks, hosts_stack))
                })?;

            b.connect_all(app, &[hosts_stack, network_stack])?;
            Ok((network_stack, nested_stacks))
        })?;

    let (_, subnet) =
        builder.cluster("networking", "Networking Resources", cluster_attrs.clone(), |b| {
            let vpc = b.node("vpc", "VPC", Icon::Vpc)?;
            let subnet = b.node("subnet", "Public Subnet", Icon::PublicSubnet)?;
            b.link(vpc, subnet)?;
            b.connect_all(network_stack, &[vpc, subnet])?;
            Ok(subnet)
        })?;

    let (_, instances) = builder.cluster("compute", "Compute Resources", cluster_attrs, |b| {
        farm.servers()
            .iter()
            .map(|server| {
                b.node(
                    &format!("ec2_{server}"),
                    format!("Minecraft\nServer {server}"),
                    Icon::Ec2,
                )
            })
            .collect::<Result<Vec<_>, _>>()
    })?;

    for (stack, instance) in nested_stacks.iter().zip(&instances) {
        builder.connect(*stack, *instance)?;
    }
    for instance in &instances {
        builder.link(*instance, subnet)?;
    }

    let diagram = builder.build()?;
    debug!(
        nodes = diagram.nodes_count(),
        clusters = diagram.clusters_count(),
        edges = diagram.edges_count();
        "Server farm overview declared"
    );
    Ok(diagram)
}
