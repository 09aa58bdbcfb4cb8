// Copyright 2025 Cowboy AI, LLC.

//! # CIM Category
//!
//! Finite categories and the laws they must satisfy.
//!
//! This crate provides the building blocks for working with explicitly
//! presented categorical structures:
//! - **Presentation**: Objects and arrow generators, validated once
//! - **Category**: Materialized structure with identities and a composition table
//! - **Functor**: Structure-preserving maps between categories
//! - **Natural Transformation**: Families of morphisms between parallel functors
//! - **Laws**: Named checks aggregated into suite reports
//! - **Diagrams**: Commutativity of label paths, with path discovery and rewriting
//!
//! ## Design Principles
//!
//! 1. **Explicit Structure**: Composition is a finite table, never a callback
//! 2. **Immutability**: Built structures are read-only and shared through `Arc`
//! 3. **Laws Are Data**: A failing law is a report, not an error
//! 4. **Determinism**: Checks iterate in a fixed order, so reports are reproducible
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use cim_category::{build_category, CommutativityChecker, ExplicitComposite, Presentation};
//!
//! let presentation = Presentation::builder("triangle")
//!     .objects(["A", "B", "C"])
//!     .generator("f", "A", "B")
//!     .generator("g", "B", "C")
//!     .build()?;
//! let category = build_category(&presentation, &[ExplicitComposite::new("g", "f", "gf")])?;
//! assert!(category.verify().is_ok());
//!
//! let checker = CommutativityChecker::new(Arc::new(category));
//! let outcome = checker.check("A", "C", &[vec!["f", "g"], vec!["gf"]])?;
//! assert_eq!(outcome.morphism(), Some("gf"));
//! # Ok::<(), cim_category::StructureError>(())
//! ```

#![warn(missing_docs)]

pub mod category;
pub mod config;
pub mod diagram;
mod errors;
pub mod laws;

pub use category::{
    build_category, build_free_category, materialize, standard, ArrowGenerator, Category,
    CategoryBuilder, CategorySnapshot, CompositionMode, ExplicitComposite, FormalWord, Functor,
    FunctorBuilder, MaterializeOptions, Morphism, MorphismKind, NaturalTransformation, Object,
    Presentation, PresentationBuilder, Truncation,
};
pub use config::EngineConfig;
pub use diagram::{
    discover_paths, Certificate, CommutativityChecker, CommutativityOutcome, Diagram,
    DiagramPath, PathDefect, PathDefectReason, PathDiscovery, Relation, RewriteChecker,
    RewriteOutcome,
};
pub use errors::{CategoryResult, StructureError};
pub use laws::{
    category_laws, functor_laws, law_fn, naturality_laws, Checkable, Law, LawOutcome, LawSuite,
    LawViolations, StructureKind, SuiteReport, Violation, Witness,
};
