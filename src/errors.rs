// Copyright 2025 Cowboy AI, LLC.

//! Error types for categorical structure operations
//!
//! Malformed input (dangling references, conflicting names, boundary
//! mismatches) is reported through [`StructureError`]. A mathematical law
//! that fails on well-formed input is not an error: it is returned as part of
//! a [`SuiteReport`](crate::laws::SuiteReport) or a commutativity
//! disagreement, and only becomes [`LawViolations`](crate::laws::LawViolations)
//! when a caller elevates it explicitly.

use thiserror::Error;

use crate::diagram::PathDefect;

/// Errors raised when the input structure itself is malformed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// A referenced object does not exist
    #[error("Unknown object '{name}' referenced by {context}")]
    UnknownObject {
        /// Name of the missing object
        name: String,
        /// Where the reference was found
        context: String,
    },

    /// A referenced morphism does not exist
    #[error("Unknown morphism '{name}' referenced by {context}")]
    UnknownMorphism {
        /// Name of the missing morphism
        name: String,
        /// Where the reference was found
        context: String,
    },

    /// Two arrows share a name but disagree on their boundary
    #[error("Duplicate name '{name}': already registered as {existing}, redeclared as {conflicting}")]
    DuplicateName {
        /// The shared name
        name: String,
        /// Boundary of the first declaration
        existing: String,
        /// Boundary of the conflicting declaration
        conflicting: String,
    },

    /// Names starting with `id:` belong to synthesized identities
    #[error("Name '{name}' is reserved for synthesized identities")]
    ReservedName {
        /// The offending name
        name: String,
    },

    /// `second ∘ first` was requested but the boundaries do not meet
    #[error("Cannot compose {second} ∘ {first}: target of {first} is {first_target}, source of {second} is {second_source}")]
    NotComposable {
        /// Morphism applied second
        second: String,
        /// Morphism applied first
        first: String,
        /// Target object of `first`
        first_target: String,
        /// Source object of `second`
        second_source: String,
    },

    /// The pair is composable but the composition table has no entry for it
    #[error("Composition {second} ∘ {first} is not defined in the composition table")]
    CompositionUndefined {
        /// Morphism applied second
        second: String,
        /// Morphism applied first
        first: String,
    },

    /// A morphism's boundary disagrees with what its context requires
    #[error("Boundary mismatch for {morphism}: expected {expected_source} → {expected_target}, found {actual_source} → {actual_target}")]
    BoundaryMismatch {
        /// The offending morphism
        morphism: String,
        /// Required source
        expected_source: String,
        /// Required target
        expected_target: String,
        /// Actual source
        actual_source: String,
        /// Actual target
        actual_target: String,
    },

    /// The same composable pair was registered with two different results
    #[error("Conflicting composite for {second} ∘ {first}: already {existing}, redeclared as {conflicting}")]
    ConflictingComposite {
        /// Morphism applied second
        second: String,
        /// Morphism applied first
        first: String,
        /// Previously registered result
        existing: String,
        /// Newly requested result
        conflicting: String,
    },

    /// A builder key was remapped to a different value
    #[error("Conflicting {kind} mapping for '{key}': already mapped to {existing}, remapped to {conflicting}")]
    ConflictingMapping {
        /// "object" or "morphism"
        kind: String,
        /// Source key
        key: String,
        /// Existing image
        existing: String,
        /// Rejected image
        conflicting: String,
    },

    /// A map that must be total is missing keys
    #[error("Incomplete {kind} map for {owner}: missing {missing:?}")]
    IncompleteMap {
        /// "object" or "morphism"
        kind: String,
        /// The structure being built
        owner: String,
        /// Keys without an image
        missing: Vec<String>,
    },

    /// Two functors do not share source and target categories
    #[error("Functors {source_functor} and {target_functor} are not parallel: {reason}")]
    MismatchedFunctors {
        /// Name of the source functor
        source_functor: String,
        /// Name of the target functor
        target_functor: String,
        /// Which side differs
        reason: String,
    },

    /// A natural transformation component is indexed by a foreign object
    #[error("Component of {transformation} references object '{object}' outside the source category")]
    ComponentOutsideCategory {
        /// Transformation name
        transformation: String,
        /// Offending object
        object: String,
    },

    /// A commutativity check was requested without any paths
    #[error("Diagram from {start} to {end} has no paths to compare")]
    EmptyDiagram {
        /// Start object
        start: String,
        /// End object
        end: String,
    },

    /// One or more supplied paths are malformed
    #[error("Malformed diagram paths: {}", format_defects(.defects))]
    MalformedPaths {
        /// Every defect found, one entry per offending path
        defects: Vec<PathDefect>,
    },

    /// Engine configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Serialization or deserialization failure
    #[error("Serialization error: {0}")]
    Serialization(String),
}

fn format_defects(defects: &[PathDefect]) -> String {
    defects
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for structure operations
pub type CategoryResult<T> = Result<T, StructureError>;

impl From<serde_json::Error> for StructureError {
    fn from(err: serde_json::Error) -> Self {
        StructureError::Serialization(err.to_string())
    }
}

impl StructureError {
    /// Check if this error points at a name that does not exist
    pub fn is_unknown_reference(&self) -> bool {
        matches!(
            self,
            StructureError::UnknownObject { .. } | StructureError::UnknownMorphism { .. }
        )
    }

    /// Check if this error comes from two declarations that disagree
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            StructureError::DuplicateName { .. }
                | StructureError::ConflictingComposite { .. }
                | StructureError::ConflictingMapping { .. }
        )
    }

    pub(crate) fn unknown_object(name: impl Into<String>, context: impl Into<String>) -> Self {
        StructureError::UnknownObject {
            name: name.into(),
            context: context.into(),
        }
    }

    pub(crate) fn unknown_morphism(name: impl Into<String>, context: impl Into<String>) -> Self {
        StructureError::UnknownMorphism {
            name: name.into(),
            context: context.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::PathDefectReason;

    /// Test error display messages carry the offending names
    ///
    /// ```mermaid
    /// graph TD
    ///     A[StructureError] -->|Display| B[Message with names]
    ///     A -->|Clone| C[Cloned Error]
    /// ```
    #[test]
    fn test_error_display_messages() {
        let err = StructureError::unknown_object("X", "generator f");
        assert_eq!(err.to_string(), "Unknown object 'X' referenced by generator f");

        let err = StructureError::NotComposable {
            second: "g".to_string(),
            first: "f".to_string(),
            first_target: "B".to_string(),
            second_source: "C".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot compose g ∘ f: target of f is B, source of g is C"
        );

        let err = StructureError::BoundaryMismatch {
            morphism: "h".to_string(),
            expected_source: "A".to_string(),
            expected_target: "C".to_string(),
            actual_source: "A".to_string(),
            actual_target: "B".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Boundary mismatch for h: expected A → C, found A → B"
        );

        let err = StructureError::IncompleteMap {
            kind: "object".to_string(),
            owner: "F".to_string(),
            missing: vec!["B".to_string()],
        };
        assert_eq!(err.to_string(), "Incomplete object map for F: missing [\"B\"]");
    }

    #[test]
    fn test_malformed_paths_lists_every_defect() {
        let err = StructureError::MalformedPaths {
            defects: vec![
                PathDefect {
                    index: 0,
                    path: vec!["f".to_string()],
                    reason: PathDefectReason::WrongStart {
                        expected: "A".to_string(),
                        actual: "B".to_string(),
                    },
                },
                PathDefect {
                    index: 2,
                    path: vec!["q".to_string()],
                    reason: PathDefectReason::UnknownMorphism {
                        name: "q".to_string(),
                    },
                },
            ],
        };
        let text = err.to_string();
        assert!(text.contains("path #0"));
        assert!(text.contains("path #2"));
    }

    #[test]
    fn test_error_predicates() {
        assert!(StructureError::unknown_morphism("f", "composite").is_unknown_reference());
        assert!(!StructureError::ReservedName { name: "id:A".to_string() }.is_unknown_reference());

        assert!(StructureError::ConflictingMapping {
            kind: "object".to_string(),
            key: "A".to_string(),
            existing: "X".to_string(),
            conflicting: "Y".to_string(),
        }
        .is_conflict());
        assert!(!StructureError::InvalidConfiguration("zero".to_string()).is_conflict());
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: StructureError = json_err.into();
        assert!(matches!(err, StructureError::Serialization(_)));
    }
}
