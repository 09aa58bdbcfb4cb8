// Copyright 2025 Cowboy AI, LLC.

//! Diagrams over finite categories
//!
//! - [`commutativity`] reduces label paths through a category's composition
//!   table and reports whether they agree
//! - [`discovery`] enumerates generator paths between two objects
//! - [`rewriting`] proves two label paths equal from a set of relations,
//!   without a materialized category

pub mod commutativity;
pub mod discovery;
pub mod rewriting;

pub use commutativity::{
    CommutativityChecker, CommutativityOutcome, Diagram, DiagramPath, PathDefect,
    PathDefectReason,
};
pub use discovery::{discover_paths, PathDiscovery};
pub use rewriting::{Certificate, Direction, Relation, RewriteChecker, RewriteOutcome, RewriteStep};
