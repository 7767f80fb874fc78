//! Stackmap Core Types and Definitions
//!
//! This crate provides the foundational types for declaring infrastructure
//! overview diagrams. It includes:
//!
//! - **Identifiers**: Interned element keys ([`identifier::Id`])
//! - **Colors**: CSS color parsing with Graphviz output ([`color::Color`])
//! - **Icons**: The closed catalog of resource icons ([`icon::Icon`])
//! - **Attributes**: Graph and cluster level visual settings ([`attributes`] module)
//! - **Semantic**: The diagram model and its builder ([`semantic`] module)

pub mod attributes;
pub mod color;
pub mod icon;
pub mod identifier;
pub mod semantic;
