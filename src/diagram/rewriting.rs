// Copyright 2025 Cowboy AI, LLC.

//! Path equality by subpath rewriting
//!
//! Given relations `lhs = rhs` between label sequences, two paths are equal
//! when one rewrites into the other by replacing subpaths. The search is
//! breadth-first and bounded, so a failed search means "not proved within
//! budget", never "proved different".

use std::collections::{HashSet, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;

/// Default number of paths expanded before giving up
pub const DEFAULT_REWRITE_BUDGET: usize = 2048;

/// An equation between two label sequences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Name used in certificates
    pub name: String,
    /// Left-hand side
    pub lhs: Vec<String>,
    /// Right-hand side
    pub rhs: Vec<String>,
}

impl Relation {
    /// Create `name: lhs = rhs`
    pub fn new<L, R, S>(name: impl Into<String>, lhs: L, rhs: R) -> Self
    where
        L: IntoIterator<Item = S>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            lhs: lhs.into_iter().map(Into::into).collect(),
            rhs: rhs.into_iter().map(Into::into).collect(),
        }
    }
}

/// Which way a relation was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// `lhs` replaced by `rhs`
    Forward,
    /// `rhs` replaced by `lhs`
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Forward => "→",
            Direction::Backward => "←",
        })
    }
}

/// One substitution in a proof
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteStep {
    /// Relation applied
    pub relation: String,
    /// Index of the replaced subpath
    pub offset: usize,
    /// Direction of application
    pub direction: Direction,
}

/// Sequence of rewrite steps turning one path into another
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    /// Steps in order
    pub steps: Vec<RewriteStep>,
}

impl Certificate {
    /// Whether the paths were already equal
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let steps: Vec<String> = self
            .steps
            .iter()
            .map(|s| format!("{}{}@{}", s.relation, s.direction, s.offset))
            .collect();
        write!(f, "[{}]", steps.join(", "))
    }
}

/// Result of a rewrite search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewriteOutcome {
    /// The paths are equal; the certificate shows how
    Proved(Certificate),
    /// No proof was found within the budget
    Unproved {
        /// Paths expanded before stopping
        explored: usize,
    },
}

impl RewriteOutcome {
    /// Whether a proof was found
    pub fn is_proved(&self) -> bool {
        matches!(self, RewriteOutcome::Proved(_))
    }

    /// The certificate, if proved
    pub fn certificate(&self) -> Option<&Certificate> {
        match self {
            RewriteOutcome::Proved(certificate) => Some(certificate),
            RewriteOutcome::Unproved { .. } => None,
        }
    }
}

/// Bounded breadth-first rewriting over a fixed set of relations
#[derive(Debug, Clone, Default)]
pub struct RewriteChecker {
    relations: Vec<Relation>,
}

impl RewriteChecker {
    /// Create a checker from relations
    pub fn new(relations: impl IntoIterator<Item = Relation>) -> Self {
        Self {
            relations: relations.into_iter().collect(),
        }
    }

    /// The relations in use
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Search for a rewrite of `left` into `right`
    pub fn check<S: AsRef<str>>(&self, left: &[S], right: &[S], budget: usize) -> RewriteOutcome {
        let left: Vec<String> = left.iter().map(|s| s.as_ref().to_string()).collect();
        let right: Vec<String> = right.iter().map(|s| s.as_ref().to_string()).collect();

        if left == right {
            return RewriteOutcome::Proved(Certificate::default());
        }

        let mut seen: HashSet<Vec<String>> = HashSet::from([left.clone()]);
        let mut queue: VecDeque<(Vec<String>, Vec<RewriteStep>)> = VecDeque::from([(left, Vec::new())]);
        let mut explored = 0usize;

        while explored < budget {
            let Some((path, steps)) = queue.pop_front() else {
                break;
            };
            explored += 1;

            for (next, step) in self.rewrites(&path) {
                if next == right {
                    let mut steps = steps.clone();
                    steps.push(step);
                    debug!(explored, steps = steps.len(), "rewrite proof found");
                    return RewriteOutcome::Proved(Certificate { steps });
                }
                if seen.insert(next.clone()) {
                    let mut extended = steps.clone();
                    extended.push(step);
                    queue.push_back((next, extended));
                }
            }
        }

        debug!(explored, budget, "rewrite search exhausted");
        RewriteOutcome::Unproved { explored }
    }

    /// [`check`](Self::check) with the configured `rewrite_budget`
    pub fn check_with<S: AsRef<str>>(
        &self,
        left: &[S],
        right: &[S],
        config: &EngineConfig,
    ) -> RewriteOutcome {
        self.check(left, right, config.rewrite_budget)
    }

    /// Apply a certificate to `path`, returning the rewritten path
    ///
    /// `None` when a step names an unknown relation or its pattern is not
    /// at the stated offset.
    pub fn replay<S: AsRef<str>>(&self, path: &[S], certificate: &Certificate) -> Option<Vec<String>> {
        let mut current: Vec<String> = path.iter().map(|s| s.as_ref().to_string()).collect();
        for step in &certificate.steps {
            let relation = self.relations.iter().find(|r| r.name == step.relation)?;
            let (pattern, replacement) = oriented(relation, step.direction);
            let end = step.offset + pattern.len();
            if end > current.len() || current[step.offset..end] != *pattern {
                return None;
            }
            current.splice(step.offset..end, replacement.iter().cloned());
        }
        Some(current)
    }

    fn rewrites(&self, path: &[String]) -> Vec<(Vec<String>, RewriteStep)> {
        let mut out = Vec::new();
        for relation in &self.relations {
            for direction in [Direction::Forward, Direction::Backward] {
                let (pattern, replacement) = oriented(relation, direction);
                if pattern.is_empty() || pattern.len() > path.len() {
                    continue;
                }
                for offset in 0..=path.len() - pattern.len() {
                    if path[offset..offset + pattern.len()] != *pattern {
                        continue;
                    }
                    let mut next = Vec::with_capacity(path.len() - pattern.len() + replacement.len());
                    next.extend_from_slice(&path[..offset]);
                    next.extend_from_slice(replacement);
                    next.extend_from_slice(&path[offset + pattern.len()..]);
                    out.push((
                        next,
                        RewriteStep {
                            relation: relation.name.clone(),
                            offset,
                            direction,
                        },
                    ));
                }
            }
        }
        out
    }
}

fn oriented(relation: &Relation, direction: Direction) -> (&[String], &[String]) {
    match direction {
        Direction::Forward => (relation.lhs.as_slice(), relation.rhs.as_slice()),
        Direction::Backward => (relation.rhs.as_slice(), relation.lhs.as_slice()),
    }
}
