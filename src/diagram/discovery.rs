// Copyright 2025 Cowboy AI, LLC.

//! Bounded enumeration of generator paths between two objects

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::commutativity::DiagramPath;
use crate::category::Category;
use crate::errors::{CategoryResult, StructureError};

/// Paths found by [`discover_paths`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathDiscovery {
    /// Paths from start to end, shortest first
    pub paths: Vec<DiagramPath>,

    /// Set when some path reached `max_len` and could have been extended
    pub truncated: bool,
}

/// Breadth-first search over generators, up to `max_len` labels
///
/// The empty path is included when `start == end`. Identities and composites
/// are not used as steps.
pub fn discover_paths(
    category: &Category,
    start: &str,
    end: &str,
    max_len: usize,
) -> CategoryResult<PathDiscovery> {
    for object in [start, end] {
        if !category.has_object(object) {
            return Err(StructureError::unknown_object(
                object,
                format!("path discovery in {}", category.name()),
            ));
        }
    }

    let mut paths = Vec::new();
    let mut truncated = false;
    let mut queue: VecDeque<(String, Vec<String>)> = VecDeque::new();
    queue.push_back((start.to_string(), Vec::new()));

    while let Some((at, labels)) = queue.pop_front() {
        if at == end {
            paths.push(DiagramPath::new(labels.iter().cloned()));
        }

        let mut steps = category.generators().filter(|g| g.source == at).peekable();
        if labels.len() == max_len {
            truncated |= steps.peek().is_some();
            continue;
        }
        for g in steps {
            let mut next = labels.clone();
            next.push(g.name.clone());
            queue.push_back((g.target.clone(), next));
        }
    }

    trace!(start, end, max_len, found = paths.len(), truncated, "discovered paths");
    Ok(PathDiscovery { paths, truncated })
}
