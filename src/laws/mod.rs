// Copyright 2025 Cowboy AI, LLC.

//! Law engine - checkable properties over categorical structures
//!
//! A [`Law`] is a named check over one kind of structure. A [`LawSuite`]
//! runs an ordered list of laws to completion and aggregates every
//! [`Violation`] into a [`SuiteReport`]. Reports have the same shape for
//! categories, functors and natural transformations, so downstream tooling
//! can render any of them identically.
//!
//! A failing law is a normal result, not an error. Callers that want a
//! failure to be fatal use [`SuiteReport::into_result`].

pub mod category_laws;
pub mod functor_laws;
pub mod naturality;

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::category::{Category, Functor, NaturalTransformation};

pub use category_laws::{
    category_laws, AssociativityLaw, IdentityEndomorphismLaw, IdentityLaw,
};
pub use functor_laws::{functor_laws, CompositionPreservationLaw, IdentityPreservationLaw};
pub use naturality::{naturality_laws, NaturalityLaw};

type LawCheck<S> = Box<dyn Fn(&S) -> Vec<Violation> + Send + Sync>;

/// Kind of structure a law is stated over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum StructureKind {
    /// A finite category
    Category,
    /// A functor between categories
    Functor,
    /// A natural transformation between functors
    NaturalTransformation,
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StructureKind::Category => "category",
            StructureKind::Functor => "functor",
            StructureKind::NaturalTransformation => "natural transformation",
        };
        f.write_str(name)
    }
}

/// A structure laws can be checked against
pub trait Checkable {
    /// Tag carried by every violation and report for this structure
    const KIND: StructureKind;

    /// Name used in reports
    fn structure_name(&self) -> &str;
}

impl Checkable for Category {
    const KIND: StructureKind = StructureKind::Category;

    fn structure_name(&self) -> &str {
        self.name()
    }
}

impl Checkable for Functor {
    const KIND: StructureKind = StructureKind::Functor;

    fn structure_name(&self) -> &str {
        self.name()
    }
}

impl Checkable for NaturalTransformation {
    const KIND: StructureKind = StructureKind::NaturalTransformation;

    fn structure_name(&self) -> &str {
        self.name()
    }
}

/// A named property of a structure
pub trait Law<S: Checkable>: Send + Sync {
    /// Short identifier used in reports
    fn name(&self) -> &str;

    /// What the law requires
    fn description(&self) -> &str;

    /// Every violation found; empty when the law holds
    fn check(&self, structure: &S) -> Vec<Violation>;
}

/// A law backed by a closure
pub struct FnLaw<S> {
    name: String,
    description: String,
    check: LawCheck<S>,
}

impl<S: Checkable> Law<S> for FnLaw<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn check(&self, structure: &S) -> Vec<Violation> {
        (self.check)(structure)
    }
}

/// Wrap a closure as a law
pub fn law_fn<S, F>(name: impl Into<String>, description: impl Into<String>, check: F) -> FnLaw<S>
where
    S: Checkable,
    F: Fn(&S) -> Vec<Violation> + Send + Sync + 'static,
{
    FnLaw {
        name: name.into(),
        description: description.into(),
        check: Box::new(check),
    }
}

/// Which side of an identity composite failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Side {
    /// `id_B ∘ f`
    Left,
    /// `f ∘ id_A`
    Right,
}

/// The objects or morphisms a violation is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Witness {
    /// An object
    Object {
        /// Object name
        name: String,
    },

    /// A single morphism, optionally with the failing side
    Morphism {
        /// Morphism name
        name: String,
        /// Side of an identity law
        side: Option<Side>,
    },

    /// A composable pair `second ∘ first`
    Pair {
        /// Morphism applied second
        second: String,
        /// Morphism applied first
        first: String,
    },

    /// A composable triple in application order
    Triple {
        /// Applied first
        first: String,
        /// Applied second
        second: String,
        /// Applied third
        third: String,
    },

    /// A naturality square for a source morphism
    Square {
        /// Source-category morphism
        morphism: String,
        /// Its source object
        source: String,
        /// Its target object
        target: String,
    },

    /// A natural transformation component
    Component {
        /// Indexing object
        object: String,
    },

    /// A path of morphism labels in application order
    Path {
        /// Labels along the path
        labels: Vec<String>,
    },

    /// The structure as a whole
    Structure {
        /// Structure name
        name: String,
    },
}

impl fmt::Display for Witness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Witness::Object { name } => write!(f, "object {name}"),
            Witness::Morphism { name, side: None } => write!(f, "morphism {name}"),
            Witness::Morphism {
                name,
                side: Some(side),
            } => write!(f, "morphism {name} ({side:?} identity)"),
            Witness::Pair { second, first } => write!(f, "pair {second} ∘ {first}"),
            Witness::Triple {
                first,
                second,
                third,
            } => write!(f, "triple ({first}, {second}, {third})"),
            Witness::Square {
                morphism,
                source,
                target,
            } => write!(f, "square over {morphism}: {source} → {target}"),
            Witness::Component { object } => write!(f, "component at {object}"),
            Witness::Path { labels } => write!(f, "path [{}]", labels.join(", ")),
            Witness::Structure { name } => write!(f, "{name}"),
        }
    }
}

/// A single failed instance of a law
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Violation {
    /// Law that failed
    pub law: String,

    /// Kind of structure checked
    pub kind: StructureKind,

    /// Objects or morphisms involved
    pub witness: Witness,

    /// Human-readable explanation
    pub message: String,

    /// Morphism the law required, when there is one
    pub expected: Option<String>,

    /// Morphism actually found, when there is one
    pub actual: Option<String>,
}

impl Violation {
    /// Create a violation without expected/actual values
    pub fn new(
        law: impl Into<String>,
        kind: StructureKind,
        witness: Witness,
        message: impl Into<String>,
    ) -> Self {
        Self {
            law: law.into(),
            kind,
            witness,
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    /// Attach the expected and actual morphisms
    pub fn with_values(mut self, expected: impl Into<String>, actual: Option<String>) -> Self {
        self.expected = Some(expected.into());
        self.actual = actual;
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.law, self.witness, self.message)?;
        if let Some(expected) = &self.expected {
            let actual = self.actual.as_deref().unwrap_or("undefined");
            write!(f, " (expected {expected}, found {actual})")?;
        }
        Ok(())
    }
}

/// Result of one law within a suite run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LawOutcome {
    /// Law name
    pub law: String,

    /// Number of violations it produced
    pub violations: usize,
}

impl LawOutcome {
    /// Whether the law held
    pub fn holds(&self) -> bool {
        self.violations == 0
    }
}

/// Aggregated result of running a suite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SuiteReport {
    /// Suite name
    pub suite: String,

    /// Name of the structure that was checked
    pub structure: String,

    /// Kind of structure that was checked
    pub kind: StructureKind,

    /// True when no law produced a violation
    pub ok: bool,

    /// Per-law outcomes in suite order
    pub laws: Vec<LawOutcome>,

    /// Every violation in suite order
    pub violations: Vec<Violation>,
}

impl SuiteReport {
    /// Whether every law held
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Total number of violations
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    /// Violations produced by one law
    pub fn violations_for<'a>(&'a self, law: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations.iter().filter(move |v| v.law == law)
    }

    /// Pass/fail badge for rendering
    pub fn badge(&self) -> &'static str {
        if self.ok {
            "✅"
        } else {
            "❌"
        }
    }

    /// Elevate a failing report to an error
    pub fn into_result(self) -> Result<SuiteReport, LawViolations> {
        if self.ok {
            Ok(self)
        } else {
            Err(LawViolations { report: self })
        }
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} on {} {}: {} law(s), {} violation(s)",
            self.badge(),
            self.suite,
            self.kind,
            self.structure,
            self.laws.len(),
            self.violations.len()
        )?;
        for violation in &self.violations {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}

/// A failing report elevated to an error by the caller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} violation(s) in {} for {}", .report.violations.len(), .report.suite, .report.structure)]
pub struct LawViolations {
    /// The full report, every violation included
    pub report: SuiteReport,
}

/// An ordered collection of laws over one structure kind
pub struct LawSuite<S: Checkable> {
    name: String,
    laws: Vec<Box<dyn Law<S>>>,
}

impl<S: Checkable> LawSuite<S> {
    /// Create an empty suite
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            laws: Vec::new(),
        }
    }

    /// Append a law, builder style
    pub fn with_law(mut self, law: impl Law<S> + 'static) -> Self {
        self.laws.push(Box::new(law));
        self
    }

    /// Append a law
    pub fn push(&mut self, law: Box<dyn Law<S>>) {
        self.laws.push(law);
    }

    /// Suite name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of laws
    pub fn len(&self) -> usize {
        self.laws.len()
    }

    /// Whether the suite has no laws
    pub fn is_empty(&self) -> bool {
        self.laws.is_empty()
    }

    /// Law names in order
    pub fn law_names(&self) -> Vec<&str> {
        self.laws.iter().map(|law| law.name()).collect()
    }

    /// Run every law to completion
    pub fn run(&self, structure: &S) -> SuiteReport {
        let mut outcomes = Vec::with_capacity(self.laws.len());
        let mut violations = Vec::new();

        for law in &self.laws {
            let found = law.check(structure);
            outcomes.push(LawOutcome {
                law: law.name().to_string(),
                violations: found.len(),
            });
            violations.extend(found);
        }

        debug!(
            suite = %self.name,
            structure = structure.structure_name(),
            laws = outcomes.len(),
            violations = violations.len(),
            "law suite finished"
        );

        SuiteReport {
            suite: self.name.clone(),
            structure: structure.structure_name().to_string(),
            kind: S::KIND,
            ok: violations.is_empty(),
            laws: outcomes,
            violations,
        }
    }
}
