// Copyright 2025 Cowboy AI, LLC.

//! Presentations - the finite generating data of a category
//!
//! A presentation lists object names, arrow generators between them, and
//! optionally a seed of explicit composites. It is validated once by
//! [`PresentationBuilder::build`] and is immutable afterwards.

use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::word::is_identity_name;
use crate::errors::{CategoryResult, StructureError};

/// An object of a presentation, identified by name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Object {
    /// Unique name within the structure
    pub name: String,

    /// Opaque payload carried along unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Object {
    /// Create an object without payload
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: None,
        }
    }

    /// Create an object carrying a payload
    pub fn with_data(name: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            data: Some(data),
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Object {}

impl Hash for Object {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// A primitive morphism between two named objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowGenerator {
    /// Unique name within the presentation
    pub name: String,

    /// Source object name
    pub source: String,

    /// Target object name
    pub target: String,

    /// Opaque payload carried along unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ArrowGenerator {
    /// Create a generator `name: source → target`
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            target: target.into(),
            data: None,
        }
    }

    /// Attach a payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub(crate) fn boundary(&self) -> String {
        format!("{} → {}", self.source, self.target)
    }
}

/// An explicit entry `second ∘ first = result` for the composition table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplicitComposite {
    /// Morphism applied second (`g` in `g∘f`)
    pub second: String,

    /// Morphism applied first (`f` in `g∘f`)
    pub first: String,

    /// Name of the composite, new or existing
    pub result: String,

    /// Stated source of the result, checked against `first`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Stated target of the result, checked against `second`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl ExplicitComposite {
    /// Register `second ∘ first = result`
    pub fn new(
        second: impl Into<String>,
        first: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        Self {
            second: second.into(),
            first: first.into(),
            result: result.into(),
            source: None,
            target: None,
        }
    }

    /// State the expected boundary of the result
    pub fn with_boundary(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self.target = Some(target.into());
        self
    }
}

/// Validated, immutable generating data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PresentationBuilder", into = "PresentationBuilder")]
pub struct Presentation {
    name: String,
    objects: IndexMap<String, Object>,
    generators: IndexMap<String, ArrowGenerator>,
    composites: Vec<ExplicitComposite>,
}

impl Presentation {
    /// Start building a presentation
    pub fn builder(name: impl Into<String>) -> PresentationBuilder {
        PresentationBuilder::new(name)
    }

    /// Presentation name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Objects in declaration order
    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.values()
    }

    /// Generators in declaration order
    pub fn generators(&self) -> impl Iterator<Item = &ArrowGenerator> {
        self.generators.values()
    }

    /// Look up an object
    pub fn object(&self, name: &str) -> Option<&Object> {
        self.objects.get(name)
    }

    /// Look up a generator
    pub fn generator(&self, name: &str) -> Option<&ArrowGenerator> {
        self.generators.get(name)
    }

    /// Seed composites declared with the presentation
    pub fn composites(&self) -> &[ExplicitComposite] {
        &self.composites
    }

    /// Number of objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of generators
    pub fn generator_count(&self) -> usize {
        self.generators.len()
    }
}

/// Accumulates presentation data; validation happens in [`build`](Self::build)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresentationBuilder {
    name: String,
    #[serde(default)]
    objects: Vec<Object>,
    #[serde(default)]
    generators: Vec<ArrowGenerator>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    composites: Vec<ExplicitComposite>,
}

impl PresentationBuilder {
    /// Create an empty builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Declare an object
    pub fn object(mut self, name: impl Into<String>) -> Self {
        self.objects.push(Object::new(name));
        self
    }

    /// Declare several objects at once
    pub fn objects<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.objects.extend(names.into_iter().map(Object::new));
        self
    }

    /// Declare an object with a payload
    pub fn object_with_data(mut self, name: impl Into<String>, data: serde_json::Value) -> Self {
        self.objects.push(Object::with_data(name, data));
        self
    }

    /// Declare a generator `name: source → target`
    pub fn generator(
        mut self,
        name: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        self.generators.push(ArrowGenerator::new(name, source, target));
        self
    }

    /// Declare a generator with a payload
    pub fn generator_with_data(
        mut self,
        name: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        self.generators
            .push(ArrowGenerator::new(name, source, target).with_data(data));
        self
    }

    /// Seed an explicit composite
    pub fn composite(mut self, composite: ExplicitComposite) -> Self {
        self.composites.push(composite);
        self
    }

    /// Validate and freeze the presentation
    pub fn build(self) -> CategoryResult<Presentation> {
        let mut objects: IndexMap<String, Object> = IndexMap::new();
        for object in self.objects {
            if is_identity_name(&object.name) {
                return Err(StructureError::ReservedName { name: object.name });
            }
            // Same name means same object; the first payload wins.
            objects.entry(object.name.clone()).or_insert(object);
        }

        let mut generators: IndexMap<String, ArrowGenerator> = IndexMap::new();
        for generator in self.generators {
            if is_identity_name(&generator.name) {
                return Err(StructureError::ReservedName {
                    name: generator.name,
                });
            }
            for endpoint in [&generator.source, &generator.target] {
                if !objects.contains_key(endpoint) {
                    return Err(StructureError::unknown_object(
                        endpoint.clone(),
                        format!("generator {}", generator.name),
                    ));
                }
            }
            match generators.get(&generator.name) {
                Some(existing)
                    if existing.source != generator.source
                        || existing.target != generator.target =>
                {
                    return Err(StructureError::DuplicateName {
                        name: generator.name.clone(),
                        existing: existing.boundary(),
                        conflicting: generator.boundary(),
                    });
                }
                Some(_) => {}
                None => {
                    generators.insert(generator.name.clone(), generator);
                }
            }
        }

        Ok(Presentation {
            name: self.name,
            objects,
            generators,
            composites: self.composites,
        })
    }
}

impl TryFrom<PresentationBuilder> for Presentation {
    type Error = StructureError;

    fn try_from(builder: PresentationBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

impl From<Presentation> for PresentationBuilder {
    fn from(presentation: Presentation) -> Self {
        Self {
            name: presentation.name,
            objects: presentation.objects.into_values().collect(),
            generators: presentation.generators.into_values().collect(),
            composites: presentation.composites,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> PresentationBuilder {
        Presentation::builder("triangle")
            .objects(["A", "B", "C"])
            .generator("f", "A", "B")
            .generator("g", "B", "C")
    }

    #[test]
    fn test_presentation_creation() {
        let presentation = triangle().build().unwrap();

        assert_eq!(presentation.name(), "triangle");
        assert_eq!(presentation.object_count(), 3);
        assert_eq!(presentation.generator_count(), 2);
        assert_eq!(presentation.generator("f").unwrap().target, "B");
        let names: Vec<_> = presentation.objects().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn test_dangling_reference_rejected() {
        let err = triangle().generator("h", "A", "Z").build().unwrap_err();
        assert_eq!(
            err,
            StructureError::UnknownObject {
                name: "Z".to_string(),
                context: "generator h".to_string(),
            }
        );
    }

    #[test]
    fn test_conflicting_generator_rejected() {
        let err = triangle().generator("f", "A", "C").build().unwrap_err();
        assert!(err.is_conflict());

        // Identical redeclaration is harmless
        let presentation = triangle().generator("f", "A", "B").build().unwrap();
        assert_eq!(presentation.generator_count(), 2);
    }

    #[test]
    fn test_reserved_names_rejected() {
        let err = triangle().generator("id:A", "A", "A").build().unwrap_err();
        assert_eq!(err, StructureError::ReservedName { name: "id:A".to_string() });

        let err = Presentation::builder("bad").object("id:X").build().unwrap_err();
        assert!(matches!(err, StructureError::ReservedName { .. }));
    }

    #[test]
    fn test_objects_identified_by_name() {
        let presentation = Presentation::builder("dup")
            .object_with_data("A", serde_json::json!({"size": 1}))
            .object("A")
            .build()
            .unwrap();

        assert_eq!(presentation.object_count(), 1);
        assert_eq!(Object::new("A"), Object::with_data("A", serde_json::json!(2)));
        assert_eq!(
            presentation.object("A").unwrap().data,
            Some(serde_json::json!({"size": 1}))
        );
    }

    #[test]
    fn test_deserialization_validates() {
        let json = r#"{
            "name": "p",
            "objects": [{"name": "A"}],
            "generators": [{"name": "f", "source": "A", "target": "B"}]
        }"#;
        let result: Result<Presentation, _> = serde_json::from_str(json);
        assert!(result.is_err());

        let presentation = triangle().build().unwrap();
        let json = serde_json::to_string(&presentation).unwrap();
        let back: Presentation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, presentation);
    }
}
