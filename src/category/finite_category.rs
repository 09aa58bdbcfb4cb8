// Copyright 2025 Cowboy AI, LLC.

//! Finite categories - the materialized structure
//!
//! A [`Category`] holds:
//! - Objects, identified by name
//! - Morphisms, each with a source, a target and a formal word
//! - An explicit composition table `(g, f) ↦ g∘f`, restricted to composable pairs
//! - An identity morphism `id:X` for every object
//!
//! Categories are read-only once built. Constructions such as
//! [`opposite`](Category::opposite) return new instances.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::presentation::Object;
use super::word::FormalWord;
use crate::errors::{CategoryResult, StructureError};
use crate::laws::{category_laws, SuiteReport};

/// Where a morphism came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum MorphismKind {
    /// Synthesized identity `id:X`
    Identity,
    /// Generator copied from the presentation
    Generator,
    /// Registered or synthesized composite
    Composite,
}

/// A morphism of a materialized category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Morphism {
    /// Unique name; equality of morphisms is equality of names
    pub name: String,

    /// Source object
    pub source: String,

    /// Target object
    pub target: String,

    /// Identity, generator or composite
    pub kind: MorphismKind,

    /// Generators this morphism was composed from
    pub word: FormalWord,

    /// Payload copied from the generator, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Morphism {
    pub(crate) fn identity(object: &str) -> Self {
        let word = FormalWord::identity(object);
        Self {
            name: word.canonical_name(),
            source: object.to_string(),
            target: object.to_string(),
            kind: MorphismKind::Identity,
            word,
            data: None,
        }
    }

    /// Whether this is an identity morphism
    pub fn is_identity(&self) -> bool {
        self.kind == MorphismKind::Identity
    }

    /// Whether source and target coincide
    pub fn is_endomorphism(&self) -> bool {
        self.source == self.target
    }

    /// `source → target` rendering used in messages
    pub fn boundary(&self) -> String {
        format!("{} → {}", self.source, self.target)
    }
}

/// Record of a free composition that stopped before its fixed point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Truncation {
    /// Configured word length bound
    pub max_path_length: usize,

    /// Configured morphism count bound
    pub max_morphisms: usize,

    /// Composable pairs left without a composite
    pub skipped_pairs: usize,

    /// First skipped pair as `(second, first)`
    pub first_skipped: Option<(String, String)>,
}

/// A finite category with an explicit composition table
#[derive(Debug, Clone)]
pub struct Category {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) objects: IndexMap<String, Object>,
    pub(crate) morphisms: IndexMap<String, Morphism>,
    pub(crate) composition: BTreeMap<(String, String), String>,
    pub(crate) identities: IndexMap<String, String>,
    pub(crate) truncation: Option<Truncation>,
}

impl Category {
    pub(crate) fn assemble(
        name: String,
        objects: IndexMap<String, Object>,
        morphisms: IndexMap<String, Morphism>,
        composition: BTreeMap<(String, String), String>,
        identities: IndexMap<String, String>,
        truncation: Option<Truncation>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            objects,
            morphisms,
            composition,
            identities,
            truncation,
        }
    }

    /// Instance identifier, fresh for every constructed category
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Objects in declaration order
    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.values()
    }

    /// Object names in declaration order
    pub fn object_names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    /// Look up an object
    pub fn object(&self, name: &str) -> Option<&Object> {
        self.objects.get(name)
    }

    /// Whether the object exists
    pub fn has_object(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    /// All morphisms: identities, generators, then composites as registered
    pub fn morphisms(&self) -> impl Iterator<Item = &Morphism> {
        self.morphisms.values()
    }

    /// Morphisms copied from the presentation's generators
    pub fn generators(&self) -> impl Iterator<Item = &Morphism> {
        self.morphisms
            .values()
            .filter(|m| m.kind == MorphismKind::Generator)
    }

    /// Look up a morphism
    pub fn morphism(&self, name: &str) -> CategoryResult<&Morphism> {
        self.morphisms
            .get(name)
            .ok_or_else(|| StructureError::unknown_morphism(name, format!("category {}", self.name)))
    }

    /// Whether the morphism exists
    pub fn has_morphism(&self, name: &str) -> bool {
        self.morphisms.contains_key(name)
    }

    /// Number of objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of morphisms, identities included
    pub fn morphism_count(&self) -> usize {
        self.morphisms.len()
    }

    /// Compose `g ∘ f` (apply `f`, then `g`)
    ///
    /// Fails if either morphism is unknown, if the pair is not composable, or
    /// if the table has no entry for a composable pair.
    pub fn compose(&self, g: &str, f: &str) -> CategoryResult<&str> {
        let first = self.morphism(f)?;
        let second = self.morphism(g)?;

        if first.target != second.source {
            return Err(StructureError::NotComposable {
                second: g.to_string(),
                first: f.to_string(),
                first_target: first.target.clone(),
                second_source: second.source.clone(),
            });
        }

        self.composite(g, f)
            .ok_or_else(|| StructureError::CompositionUndefined {
                second: g.to_string(),
                first: f.to_string(),
            })
    }

    /// Table lookup for `g ∘ f` without boundary checks
    pub fn composite(&self, g: &str, f: &str) -> Option<&str> {
        self.composition
            .get(&(g.to_string(), f.to_string()))
            .map(String::as_str)
    }

    /// Identity morphism on an object
    pub fn identity(&self, object: &str) -> CategoryResult<&str> {
        self.identities
            .get(object)
            .map(String::as_str)
            .ok_or_else(|| StructureError::unknown_object(object, format!("category {}", self.name)))
    }

    /// Identity map `object ↦ id:object`
    pub fn identities(&self) -> impl Iterator<Item = (&str, &str)> {
        self.identities
            .iter()
            .map(|(object, id)| (object.as_str(), id.as_str()))
    }

    /// Composition table as `((g, f), g∘f)`, ordered by key
    pub fn composition_table(&self) -> impl Iterator<Item = ((&str, &str), &str)> {
        self.composition
            .iter()
            .map(|((g, f), h)| ((g.as_str(), f.as_str()), h.as_str()))
    }

    /// Number of entries in the composition table
    pub fn composition_len(&self) -> usize {
        self.composition.len()
    }

    /// Whether `name` is the identity of some object
    pub fn is_identity(&self, name: &str) -> bool {
        self.morphisms
            .get(name)
            .is_some_and(Morphism::is_identity)
    }

    /// Morphisms `a → b`
    pub fn hom(&self, a: &str, b: &str) -> Vec<&Morphism> {
        self.morphisms
            .values()
            .filter(|m| m.source == a && m.target == b)
            .collect()
    }

    /// All morphisms out of an object
    pub fn morphisms_from(&self, source: &str) -> Vec<&Morphism> {
        self.morphisms
            .values()
            .filter(|m| m.source == source)
            .collect()
    }

    /// All morphisms into an object
    pub fn morphisms_to(&self, target: &str) -> Vec<&Morphism> {
        self.morphisms
            .values()
            .filter(|m| m.target == target)
            .collect()
    }

    /// Truncation record if free composition stopped early
    pub fn truncation(&self) -> Option<&Truncation> {
        self.truncation.as_ref()
    }

    /// Whether materialization reached its fixed point
    pub fn is_complete(&self) -> bool {
        self.truncation.is_none()
    }

    /// Structural equality, ignoring the instance id and display name
    pub fn same_structure(&self, other: &Category) -> bool {
        if self.id == other.id {
            return true;
        }
        self.objects.len() == other.objects.len()
            && self.objects.keys().all(|k| other.objects.contains_key(k))
            && self.morphisms == other.morphisms
            && self.composition == other.composition
            && self.identities == other.identities
    }

    /// Exactly one morphism from `object` to every object
    pub fn is_initial(&self, object: &str) -> bool {
        self.has_object(object) && self.objects.keys().all(|other| self.hom(object, other).len() == 1)
    }

    /// Exactly one morphism from every object to `object`
    pub fn is_terminal(&self, object: &str) -> bool {
        self.has_object(object) && self.objects.keys().all(|other| self.hom(other, object).len() == 1)
    }

    /// A two-sided inverse of `name`, if the table records one
    pub fn inverse_of(&self, name: &str) -> Option<&str> {
        let m = self.morphisms.get(name)?;
        let id_source = self.identities.get(&m.source)?;
        let id_target = self.identities.get(&m.target)?;

        self.hom(&m.target, &m.source)
            .into_iter()
            .find(|candidate| {
                self.composite(&candidate.name, name) == Some(id_source.as_str())
                    && self.composite(name, &candidate.name) == Some(id_target.as_str())
            })
            .map(|candidate| candidate.name.as_str())
    }

    /// Whether `name` has a two-sided inverse
    pub fn is_isomorphism(&self, name: &str) -> bool {
        self.inverse_of(name).is_some()
    }

    /// Run the category law suite (identity endomorphisms, identity, associativity)
    pub fn verify(&self) -> SuiteReport {
        category_laws().run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{build_category, ExplicitComposite, Presentation};

    fn triangle() -> Category {
        let presentation = Presentation::builder("triangle")
            .objects(["A", "B", "C"])
            .generator("f", "A", "B")
            .generator("g", "B", "C")
            .build()
            .unwrap();
        build_category(&presentation, &[ExplicitComposite::new("g", "f", "gf")]).unwrap()
    }

    #[test]
    fn test_category_creation() {
        let category = triangle();

        assert_eq!(category.object_count(), 3);
        // 3 identities + f, g + gf
        assert_eq!(category.morphism_count(), 6);
        assert_eq!(category.generators().count(), 2);
        assert!(category.is_complete());
    }

    #[test]
    fn test_composition() {
        let category = triangle();

        assert_eq!(category.compose("g", "f").unwrap(), "gf");
        assert_eq!(category.morphism("gf").unwrap().boundary(), "A → C");
        assert_eq!(category.morphism("gf").unwrap().word.canonical_name(), "g∘f");
    }

    #[test]
    fn test_non_composable_pair_is_an_error() {
        let category = triangle();

        let err = category.compose("f", "g").unwrap_err();
        assert_eq!(
            err,
            StructureError::NotComposable {
                second: "f".to_string(),
                first: "g".to_string(),
                first_target: "C".to_string(),
                second_source: "A".to_string(),
            }
        );
        assert!(category.compose("f", "nope").unwrap_err().is_unknown_reference());
    }

    #[test]
    fn test_identity_laws() {
        let category = triangle();

        let id_a = category.identity("A").unwrap();
        assert_eq!(id_a, "id:A");
        assert_eq!(category.compose("f", id_a).unwrap(), "f");
        assert_eq!(category.compose("id:B", "f").unwrap(), "f");
        assert_eq!(category.compose("id:A", "id:A").unwrap(), "id:A");
        assert!(category.is_identity("id:C"));
        assert!(!category.is_identity("gf"));
        assert!(category.identity("Z").is_err());
    }

    #[test]
    fn test_hom_sets() {
        let category = triangle();

        let hom: Vec<_> = category.hom("A", "C").iter().map(|m| m.name.clone()).collect();
        assert_eq!(hom, ["gf"]);
        assert_eq!(category.morphisms_from("A").len(), 3);
        assert_eq!(category.morphisms_to("C").len(), 3);
    }

    #[test]
    fn test_initial_and_terminal() {
        let category = triangle();

        assert!(category.is_initial("A"));
        assert!(category.is_terminal("C"));
        assert!(!category.is_initial("B"));
        assert!(!category.is_terminal("missing"));
    }

    #[test]
    fn test_same_structure_ignores_instance_id() {
        let a = triangle();
        let b = triangle();

        assert_ne!(a.id(), b.id());
        assert!(a.same_structure(&b));
        assert!(a.same_structure(&a.clone()));
    }
}
