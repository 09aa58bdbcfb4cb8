// Copyright 2025 Cowboy AI, LLC.

//! Serializable snapshots of materialized categories
//!
//! A snapshot is the plain data of a [`Category`]: names, boundaries, word
//! factors and the composition table. Loading a snapshot re-validates every
//! reference, so a hand-edited document cannot produce a dangling table.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::finite_category::{Category, Morphism, MorphismKind, Truncation};
use super::presentation::Object;
use super::word::FormalWord;
use crate::errors::{CategoryResult, StructureError};

/// An object as stored in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ObjectSnapshot {
    /// Object name
    pub name: String,

    /// Opaque payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// A morphism as stored in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MorphismSnapshot {
    /// Morphism name
    pub name: String,

    /// Source object
    pub source: String,

    /// Target object
    pub target: String,

    /// Identity, generator or composite
    pub kind: MorphismKind,

    /// Generator names in application order, empty for identities
    #[serde(default)]
    pub factors: Vec<String>,

    /// Opaque payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// One composition table entry `second ∘ first = result`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CompositionEntry {
    /// Applied second
    pub second: String,
    /// Applied first
    pub first: String,
    /// The composite
    pub result: String,
}

/// Plain-data form of a [`Category`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategorySnapshot {
    /// Display name
    pub name: String,

    /// Objects in order
    pub objects: Vec<ObjectSnapshot>,

    /// Morphisms in order
    pub morphisms: Vec<MorphismSnapshot>,

    /// Composition table in key order
    pub composition: Vec<CompositionEntry>,

    /// `object ↦ identity morphism`
    pub identities: BTreeMap<String, String>,

    /// Set when the category was truncated during free composition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncation: Option<Truncation>,
}

impl Category {
    /// Capture the category as plain data
    pub fn to_snapshot(&self) -> CategorySnapshot {
        CategorySnapshot {
            name: self.name.clone(),
            objects: self
                .objects
                .values()
                .map(|o| ObjectSnapshot {
                    name: o.name.clone(),
                    data: o.data.clone(),
                })
                .collect(),
            morphisms: self
                .morphisms
                .values()
                .map(|m| MorphismSnapshot {
                    name: m.name.clone(),
                    source: m.source.clone(),
                    target: m.target.clone(),
                    kind: m.kind,
                    factors: m.word.factors().to_vec(),
                    data: m.data.clone(),
                })
                .collect(),
            composition: self
                .composition
                .iter()
                .map(|((second, first), result)| CompositionEntry {
                    second: second.clone(),
                    first: first.clone(),
                    result: result.clone(),
                })
                .collect(),
            identities: self
                .identities
                .iter()
                .map(|(object, id)| (object.clone(), id.clone()))
                .collect(),
            truncation: self.truncation.clone(),
        }
    }

    /// Rebuild a category from a snapshot, checking every reference
    pub fn from_snapshot(snapshot: &CategorySnapshot) -> CategoryResult<Category> {
        let context = format!("snapshot {}", snapshot.name);

        let mut objects = IndexMap::new();
        for o in &snapshot.objects {
            let object = Object {
                name: o.name.clone(),
                data: o.data.clone(),
            };
            objects.insert(o.name.clone(), object);
        }

        let mut morphisms: IndexMap<String, Morphism> = IndexMap::new();
        for m in &snapshot.morphisms {
            for endpoint in [&m.source, &m.target] {
                if !objects.contains_key(endpoint) {
                    return Err(StructureError::unknown_object(
                        endpoint.clone(),
                        format!("morphism {} in {context}", m.name),
                    ));
                }
            }
            let word = match m.kind {
                MorphismKind::Identity => FormalWord::identity(m.source.clone()),
                _ if m.factors.is_empty() => FormalWord::generator(m.name.clone()),
                _ => FormalWord::from_factors(m.source.clone(), m.factors.iter().cloned()),
            };
            let morphism = Morphism {
                name: m.name.clone(),
                source: m.source.clone(),
                target: m.target.clone(),
                kind: m.kind,
                word,
                data: m.data.clone(),
            };
            if let Some(existing) = morphisms.get(&m.name) {
                return Err(StructureError::DuplicateName {
                    name: m.name.clone(),
                    existing: existing.boundary(),
                    conflicting: morphism.boundary(),
                });
            }
            morphisms.insert(m.name.clone(), morphism);
        }

        let mut identities = IndexMap::new();
        for object in objects.keys() {
            let Some(id) = snapshot.identities.get(object) else {
                return Err(StructureError::unknown_morphism(
                    super::word::identity_name(object),
                    context.clone(),
                ));
            };
            identities.insert(object.clone(), id.clone());
        }
        for (object, id) in &snapshot.identities {
            if !objects.contains_key(object) {
                return Err(StructureError::unknown_object(object.clone(), format!("identities in {context}")));
            }
            if !morphisms.contains_key(id) {
                return Err(StructureError::unknown_morphism(id.clone(), format!("identities in {context}")));
            }
        }

        let mut composition: BTreeMap<(String, String), String> = BTreeMap::new();
        for entry in &snapshot.composition {
            let lookup = |name: &String| {
                morphisms.get(name).ok_or_else(|| {
                    StructureError::unknown_morphism(name.clone(), format!("composition table in {context}"))
                })
            };
            let first = lookup(&entry.first)?;
            let second = lookup(&entry.second)?;
            let result = lookup(&entry.result)?;

            if first.target != second.source {
                return Err(StructureError::NotComposable {
                    second: entry.second.clone(),
                    first: entry.first.clone(),
                    first_target: first.target.clone(),
                    second_source: second.source.clone(),
                });
            }
            if result.source != first.source || result.target != second.target {
                return Err(StructureError::BoundaryMismatch {
                    morphism: entry.result.clone(),
                    expected_source: first.source.clone(),
                    expected_target: second.target.clone(),
                    actual_source: result.source.clone(),
                    actual_target: result.target.clone(),
                });
            }

            let key = (entry.second.clone(), entry.first.clone());
            if let Some(existing) = composition.get(&key) {
                if *existing != entry.result {
                    return Err(StructureError::ConflictingComposite {
                        second: entry.second.clone(),
                        first: entry.first.clone(),
                        existing: existing.clone(),
                        conflicting: entry.result.clone(),
                    });
                }
            }
            composition.insert(key, entry.result.clone());
        }

        debug!(
            category = %snapshot.name,
            morphisms = morphisms.len(),
            composites = composition.len(),
            "restored category from snapshot"
        );

        Ok(Category::assemble(
            snapshot.name.clone(),
            objects,
            morphisms,
            composition,
            identities,
            snapshot.truncation.clone(),
        ))
    }

    /// Pretty-printed JSON snapshot
    pub fn to_json(&self) -> CategoryResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_snapshot())?)
    }

    /// Parse and validate a JSON snapshot
    pub fn from_json(json: &str) -> CategoryResult<Category> {
        let snapshot: CategorySnapshot = serde_json::from_str(json)?;
        Category::from_snapshot(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{build_free_category, standard, Presentation};

    #[test]
    fn test_json_round_trip_preserves_table() {
        let presentation = Presentation::builder("T")
            .objects(["A", "B", "C"])
            .object_with_data("D", serde_json::json!({"role": "sink"}))
            .generator("f", "A", "B")
            .generator("g", "B", "C")
            .generator("h", "C", "D")
            .build()
            .unwrap();
        let category = build_free_category(&presentation, 3).unwrap();

        let json = category.to_json().unwrap();
        let restored = Category::from_json(&json).unwrap();

        assert!(restored.same_structure(&category));
        assert_ne!(restored.id(), category.id());
        assert_eq!(restored.compose("h", "g∘f").unwrap(), "h∘g∘f");
        assert_eq!(
            restored.morphism("h∘g∘f").unwrap().word.factors(),
            ["f".to_string(), "g".to_string(), "h".to_string()]
        );
        assert_eq!(restored.object("D").unwrap().data, Some(serde_json::json!({"role": "sink"})));
    }

    #[test]
    fn test_dangling_entry_rejected() {
        let mut snapshot = standard::arrow().unwrap().to_snapshot();
        snapshot.composition.push(CompositionEntry {
            second: "u".to_string(),
            first: "ghost".to_string(),
            result: "u".to_string(),
        });

        let err = Category::from_snapshot(&snapshot).unwrap_err();
        assert!(err.is_unknown_reference());
    }

    #[test]
    fn test_non_composable_entry_rejected() {
        let mut snapshot = standard::arrow().unwrap().to_snapshot();
        snapshot.composition.push(CompositionEntry {
            second: "u".to_string(),
            first: "u".to_string(),
            result: "u".to_string(),
        });

        let err = Category::from_snapshot(&snapshot).unwrap_err();
        assert!(matches!(err, StructureError::NotComposable { .. }));
    }

    #[test]
    fn test_malformed_json_is_a_serialization_error() {
        let err = Category::from_json("{ not json").unwrap_err();
        assert!(matches!(err, StructureError::Serialization(_)));
    }

    #[test]
    fn test_schema_generation() {
        let schema = schemars::schema_for!(CategorySnapshot);
        let json = serde_json::to_value(&schema).unwrap();
        assert!(json["properties"]["composition"].is_object());
    }
}
