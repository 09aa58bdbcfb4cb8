// Copyright 2025 Cowboy AI, LLC.

//! Finite categories, functors and natural transformations
//!
//! Structures are built in two steps. A [`Presentation`] collects objects and
//! arrow generators and is validated once. Materialization then turns it
//! into a [`Category`] with synthesized identities and an explicit
//! composition table.
//!
//! ```mermaid
//! graph LR
//!     P[Presentation] -->|materialize| C[Category]
//!     C -->|FunctorBuilder| F[Functor]
//!     F -->|components| N[NaturalTransformation]
//! ```

pub mod constructions;
pub mod finite_category;
pub mod functor;
pub mod materialize;
pub mod natural_transformation;
pub mod presentation;
pub mod snapshot;
pub mod standard;
pub mod word;

pub use finite_category::{Category, Morphism, MorphismKind, Truncation};
pub use functor::{Functor, FunctorBuilder};
pub use materialize::{
    build_category, build_free_category, materialize, CategoryBuilder, CompositionMode,
    MaterializeOptions,
};
pub use natural_transformation::NaturalTransformation;
pub use presentation::{ArrowGenerator, ExplicitComposite, Object, Presentation, PresentationBuilder};
pub use snapshot::{CategorySnapshot, CompositionEntry, MorphismSnapshot, ObjectSnapshot};
pub use word::{identity_name, is_identity_name, FormalWord, COMPOSE_SEPARATOR, IDENTITY_PREFIX};
