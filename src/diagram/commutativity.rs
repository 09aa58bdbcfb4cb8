// Copyright 2025 Cowboy AI, LLC.

//! Commutativity of path diagrams
//!
//! Paths are lists of morphism labels in application order: `["f", "g"]`
//! means "apply `f`, then `g`". Each path is validated against the category
//! and reduced through its composition table. Paths commute when they reduce
//! to the same morphism.
//!
//! ```mermaid
//! graph LR
//!     A -->|f| B
//!     B -->|g| C
//!     A -->|gf| C
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::category::{materialize, Category, CompositionMode, MaterializeOptions, Presentation};
use crate::config::EngineConfig;
use crate::errors::{CategoryResult, StructureError};
use crate::laws::{Checkable, Violation, Witness};

/// Morphism labels in application order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiagramPath(Vec<String>);

impl DiagramPath {
    /// Path through the given labels
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(labels.into_iter().map(Into::into).collect())
    }

    /// Labels in application order
    pub fn labels(&self) -> &[String] {
        &self.0
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the empty path
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[String]> for DiagramPath {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for DiagramPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// Why a path was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathDefectReason {
    /// A label is not a morphism of the category
    UnknownMorphism {
        /// The label
        name: String,
    },

    /// The first morphism does not start at the diagram's start
    WrongStart {
        /// Diagram start
        expected: String,
        /// Source of the first morphism
        actual: String,
    },

    /// The last morphism does not end at the diagram's end
    WrongEnd {
        /// Diagram end
        expected: String,
        /// Target of the last morphism
        actual: String,
    },

    /// Consecutive labels do not meet
    Broken {
        /// Index of the label that does not fit
        position: usize,
        /// Target of the label before it
        previous_target: String,
        /// Source of the label itself
        next_source: String,
    },

    /// The empty path only connects an object to itself
    EmptyPathBetweenDistinct {
        /// Diagram start
        start: String,
        /// Diagram end
        end: String,
    },

    /// The composition table has no entry for a step of the reduction
    Unreducible {
        /// Label being applied
        second: String,
        /// Morphism reduced so far
        first: String,
    },
}

impl fmt::Display for PathDefectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathDefectReason::UnknownMorphism { name } => write!(f, "unknown morphism {name}"),
            PathDefectReason::WrongStart { expected, actual } => {
                write!(f, "starts at {actual}, expected {expected}")
            }
            PathDefectReason::WrongEnd { expected, actual } => {
                write!(f, "ends at {actual}, expected {expected}")
            }
            PathDefectReason::Broken {
                position,
                previous_target,
                next_source,
            } => write!(
                f,
                "label {position} starts at {next_source} but the path is at {previous_target}"
            ),
            PathDefectReason::EmptyPathBetweenDistinct { start, end } => {
                write!(f, "empty path cannot connect {start} to {end}")
            }
            PathDefectReason::Unreducible { second, first } => {
                write!(f, "{second} ∘ {first} is not in the composition table")
            }
        }
    }
}

/// A rejected path and the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathDefect {
    /// Position of the path in the request
    pub index: usize,

    /// The path as supplied
    pub path: Vec<String>,

    /// What is wrong with it
    pub reason: PathDefectReason,
}

impl fmt::Display for PathDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "path #{} [{}]: {}", self.index, self.path.join(", "), self.reason)
    }
}

/// Result of a commutativity check on well-formed paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommutativityOutcome {
    /// Every path reduces to `morphism`
    Commutes {
        /// The common reduction
        morphism: String,
        /// The paths that were compared
        paths: Vec<DiagramPath>,
    },

    /// Only one path was supplied, so the check is vacuous
    SinglePath {
        /// Its reduction
        morphism: String,
        /// The path
        path: DiagramPath,
    },

    /// Paths reduce to different morphisms, grouped in first-seen order
    Disagreement {
        /// `morphism ↦ paths reducing to it`
        groups: IndexMap<String, Vec<DiagramPath>>,
    },
}

impl CommutativityOutcome {
    /// Whether no two paths disagree
    pub fn commutes(&self) -> bool {
        !matches!(self, CommutativityOutcome::Disagreement { .. })
    }

    /// Whether the check compared fewer than two paths
    pub fn is_vacuous(&self) -> bool {
        matches!(self, CommutativityOutcome::SinglePath { .. })
    }

    /// The common reduction, when there is one
    pub fn morphism(&self) -> Option<&str> {
        match self {
            CommutativityOutcome::Commutes { morphism, .. }
            | CommutativityOutcome::SinglePath { morphism, .. } => Some(morphism),
            CommutativityOutcome::Disagreement { .. } => None,
        }
    }

    /// Disagreeing paths as law violations against the first group
    pub fn violations(&self) -> Vec<Violation> {
        let CommutativityOutcome::Disagreement { groups } = self else {
            return Vec::new();
        };
        let Some(expected) = groups.keys().next() else {
            return Vec::new();
        };

        groups
            .iter()
            .skip(1)
            .flat_map(|(actual, paths)| {
                paths.iter().map(move |path| {
                    Violation::new(
                        "commutativity",
                        <Category as Checkable>::KIND,
                        Witness::Path {
                            labels: path.labels().to_vec(),
                        },
                        format!("{path} reduces to {actual}, not {expected}"),
                    )
                    .with_values(expected.clone(), Some(actual.clone()))
                })
            })
            .collect()
    }
}

/// A named set of parallel paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagram {
    /// Diagram name
    pub name: String,

    /// Start object; taken from the first path when absent
    #[serde(default)]
    pub start: Option<String>,

    /// End object; taken from the first path when absent
    #[serde(default)]
    pub end: Option<String>,

    /// Paths to compare
    pub paths: Vec<DiagramPath>,
}

impl Diagram {
    /// An empty diagram
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: None,
            end: None,
            paths: Vec::new(),
        }
    }

    /// Fix both endpoints
    pub fn between(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self.end = Some(end.into());
        self
    }

    /// Add a path
    pub fn with_path<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths.push(DiagramPath::new(labels));
        self
    }

    /// `g ∘ f` against `h`
    pub fn triangle(f: &str, g: &str, h: &str) -> Self {
        Self::new(format!("triangle {h}"))
            .with_path([f, g])
            .with_path([h])
    }

    /// `right ∘ top` against `bottom ∘ left`
    pub fn square(top: &str, right: &str, left: &str, bottom: &str) -> Self {
        Self::new(format!("square {top}/{bottom}"))
            .with_path([top, right])
            .with_path([left, bottom])
    }
}

/// Checks path diagrams against one category
#[derive(Debug, Clone)]
pub struct CommutativityChecker {
    category: Arc<Category>,
}

impl CommutativityChecker {
    /// Check against an existing category
    pub fn new(category: Arc<Category>) -> Self {
        Self { category }
    }

    /// Materialize a presentation freely and check against the result
    ///
    /// The mode in `options` is overridden; only the bounds are used.
    pub fn from_presentation(
        presentation: &Presentation,
        options: &MaterializeOptions,
    ) -> CategoryResult<Self> {
        let options = MaterializeOptions {
            mode: CompositionMode::Free,
            ..options.clone()
        };
        let category = materialize(presentation, &[], &options)?;
        Ok(Self::new(Arc::new(category)))
    }

    /// Validate `config` and materialize the presentation with its options
    ///
    /// Unlike [`from_presentation`](Self::from_presentation), the configured
    /// composition mode is kept.
    pub fn from_config(presentation: &Presentation, config: &EngineConfig) -> CategoryResult<Self> {
        config.validate()?;
        let category = materialize(presentation, &[], &config.materialize)?;
        Ok(Self::new(Arc::new(category)))
    }

    /// The category paths are checked against
    pub fn category(&self) -> &Arc<Category> {
        &self.category
    }

    /// Reduce every path and compare the results
    ///
    /// Fails with `EmptyDiagram` when `paths` is empty and with
    /// `MalformedPaths`, listing every bad path, when any path is malformed
    /// or cannot be reduced.
    pub fn check<P, S>(&self, start: &str, end: &str, paths: &[P]) -> CategoryResult<CommutativityOutcome>
    where
        P: AsRef<[S]>,
        S: AsRef<str>,
    {
        if paths.is_empty() {
            return Err(StructureError::EmptyDiagram {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        let mut defects = Vec::new();
        let mut reduced: Vec<(String, DiagramPath)> = Vec::with_capacity(paths.len());

        for (index, path) in paths.iter().enumerate() {
            let labels: Vec<String> = path
                .as_ref()
                .iter()
                .map(|label| label.as_ref().to_string())
                .collect();
            match self.reduce(start, end, &labels) {
                Ok(morphism) => reduced.push((morphism, DiagramPath(labels))),
                Err(reason) => defects.push(PathDefect {
                    index,
                    path: labels,
                    reason,
                }),
            }
        }

        if !defects.is_empty() {
            return Err(StructureError::MalformedPaths { defects });
        }

        let mut groups: IndexMap<String, Vec<DiagramPath>> = IndexMap::new();
        for (morphism, path) in reduced {
            groups.entry(morphism).or_default().push(path);
        }

        debug!(
            category = self.category.name(),
            start,
            end,
            paths = paths.len(),
            groups = groups.len(),
            "checked diagram commutativity"
        );

        if groups.len() > 1 {
            return Ok(CommutativityOutcome::Disagreement { groups });
        }
        match groups.into_iter().next() {
            Some((morphism, mut group)) if group.len() == 1 => Ok(CommutativityOutcome::SinglePath {
                morphism,
                path: group.remove(0),
            }),
            Some((morphism, paths)) => Ok(CommutativityOutcome::Commutes { morphism, paths }),
            None => Err(StructureError::EmptyDiagram {
                start: start.to_string(),
                end: end.to_string(),
            }),
        }
    }

    /// Check a [`Diagram`], inferring missing endpoints from its first path
    pub fn check_diagram(&self, diagram: &Diagram) -> CategoryResult<CommutativityOutcome> {
        let first = diagram.paths.iter().find(|p| !p.is_empty());
        let start = match (&diagram.start, first) {
            (Some(start), _) => start.clone(),
            (None, Some(path)) => self.endpoint(&path.labels()[0], &diagram.name, true)?,
            (None, None) => String::new(),
        };
        let end = match (&diagram.end, first) {
            (Some(end), _) => end.clone(),
            (None, Some(path)) => self.endpoint(&path.labels()[path.len() - 1], &diagram.name, false)?,
            (None, None) => start.clone(),
        };
        self.check(&start, &end, &diagram.paths)
    }

    /// Discover every generator path up to `max_len` and check them together
    pub fn check_all_paths(
        &self,
        start: &str,
        end: &str,
        max_len: usize,
    ) -> CategoryResult<CommutativityOutcome> {
        let discovery = super::discovery::discover_paths(&self.category, start, end, max_len)?;
        self.check(start, end, &discovery.paths)
    }

    /// [`check_all_paths`](Self::check_all_paths) bounded by `discovery_max_length`
    pub fn check_all_paths_with(
        &self,
        start: &str,
        end: &str,
        config: &EngineConfig,
    ) -> CategoryResult<CommutativityOutcome> {
        self.check_all_paths(start, end, config.discovery_max_length)
    }

    fn endpoint(&self, label: &str, diagram: &str, source: bool) -> CategoryResult<String> {
        let m = self
            .category
            .morphism(label)
            .map_err(|_| StructureError::unknown_morphism(label, format!("diagram {diagram}")))?;
        Ok(if source { m.source.clone() } else { m.target.clone() })
    }

    fn reduce(&self, start: &str, end: &str, labels: &[String]) -> Result<String, PathDefectReason> {
        let Some((first, rest)) = labels.split_first() else {
            if start != end {
                return Err(PathDefectReason::EmptyPathBetweenDistinct {
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
            return self.category.identity(start).map(str::to_string).map_err(|_| {
                PathDefectReason::UnknownMorphism {
                    name: crate::category::identity_name(start),
                }
            });
        };

        let mut morphisms = Vec::with_capacity(labels.len());
        for label in labels {
            let m = self
                .category
                .morphism(label)
                .map_err(|_| PathDefectReason::UnknownMorphism {
                    name: label.clone(),
                })?;
            morphisms.push(m);
        }

        if morphisms[0].source != start {
            return Err(PathDefectReason::WrongStart {
                expected: start.to_string(),
                actual: morphisms[0].source.clone(),
            });
        }
        for (position, pair) in morphisms.windows(2).enumerate() {
            if pair[0].target != pair[1].source {
                return Err(PathDefectReason::Broken {
                    position: position + 1,
                    previous_target: pair[0].target.clone(),
                    next_source: pair[1].source.clone(),
                });
            }
        }
        let last = &morphisms[morphisms.len() - 1];
        if last.target != end {
            return Err(PathDefectReason::WrongEnd {
                expected: end.to_string(),
                actual: last.target.clone(),
            });
        }

        let mut acc = first.clone();
        for next in rest {
            acc = self
                .category
                .composite(next, &acc)
                .map(str::to_string)
                .ok_or_else(|| PathDefectReason::Unreducible {
                    second: next.clone(),
                    first: acc.clone(),
                })?;
        }
        Ok(acc)
    }
}
