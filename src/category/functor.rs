// Copyright 2025 Cowboy AI, LLC.

//! Functors between finite categories
//!
//! A functor is a pair of total maps, objects to objects and morphisms to
//! morphisms, that respects boundaries. Whether it also preserves identities
//! and composition is a law question answered by [`Functor::verify`].

use std::sync::Arc;

use indexmap::IndexMap;

use super::finite_category::Category;
use crate::errors::{CategoryResult, StructureError};
use crate::laws::{functor_laws, SuiteReport};

/// A structure-preserving map between two shared categories
#[derive(Debug, Clone)]
pub struct Functor {
    name: String,
    source: Arc<Category>,
    target: Arc<Category>,
    object_map: IndexMap<String, String>,
    morphism_map: IndexMap<String, String>,
}

impl Functor {
    /// Start building a functor `source → target`
    pub fn builder(
        name: impl Into<String>,
        source: Arc<Category>,
        target: Arc<Category>,
    ) -> FunctorBuilder {
        FunctorBuilder::new(name, source, target)
    }

    /// The identity functor on a category
    pub fn identity(category: Arc<Category>) -> Functor {
        let object_map = category
            .object_names()
            .map(|x| (x.to_string(), x.to_string()))
            .collect();
        let morphism_map = category
            .morphisms()
            .map(|m| (m.name.clone(), m.name.clone()))
            .collect();

        Functor {
            name: format!("Id_{}", category.name()),
            source: Arc::clone(&category),
            target: category,
            object_map,
            morphism_map,
        }
    }

    /// Functor name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Image of an object
    pub fn map_object(&self, object: &str) -> CategoryResult<&str> {
        self.object_map
            .get(object)
            .map(String::as_str)
            .ok_or_else(|| StructureError::unknown_object(object, format!("functor {}", self.name)))
    }

    /// Image of a morphism
    pub fn map_morphism(&self, morphism: &str) -> CategoryResult<&str> {
        self.morphism_map
            .get(morphism)
            .map(String::as_str)
            .ok_or_else(|| {
                StructureError::unknown_morphism(morphism, format!("functor {}", self.name))
            })
    }

    /// Image of a path, label by label
    pub fn map_path<S: AsRef<str>>(&self, labels: &[S]) -> CategoryResult<Vec<String>> {
        labels
            .iter()
            .map(|label| self.map_morphism(label.as_ref()).map(str::to_string))
            .collect()
    }

    /// Domain category
    pub fn source_category(&self) -> &Arc<Category> {
        &self.source
    }

    /// Codomain category
    pub fn target_category(&self) -> &Arc<Category> {
        &self.target
    }

    /// Object map in source order
    pub fn object_map(&self) -> &IndexMap<String, String> {
        &self.object_map
    }

    /// Morphism map in source order
    pub fn morphism_map(&self) -> &IndexMap<String, String> {
        &self.morphism_map
    }

    /// Compose with `next`, giving `next ∘ self`
    pub fn then(&self, next: &Functor) -> CategoryResult<Functor> {
        if !self.target.same_structure(&next.source) {
            return Err(StructureError::MismatchedFunctors {
                source_functor: self.name.clone(),
                target_functor: next.name.clone(),
                reason: format!(
                    "target {} is not the source {}",
                    self.target.name(),
                    next.source.name()
                ),
            });
        }

        let object_map = self
            .object_map
            .iter()
            .map(|(x, fx)| Ok((x.clone(), next.map_object(fx)?.to_string())))
            .collect::<CategoryResult<_>>()?;
        let morphism_map = self
            .morphism_map
            .iter()
            .map(|(m, fm)| Ok((m.clone(), next.map_morphism(fm)?.to_string())))
            .collect::<CategoryResult<_>>()?;

        Ok(Functor {
            name: format!("{}∘{}", next.name, self.name),
            source: Arc::clone(&self.source),
            target: Arc::clone(&next.target),
            object_map,
            morphism_map,
        })
    }

    /// Run the functor law suite (identity and composition preservation)
    pub fn verify(&self) -> SuiteReport {
        functor_laws().run(self)
    }
}

/// Accumulates a functor's maps, rejecting bad entries immediately
#[derive(Debug, Clone)]
pub struct FunctorBuilder {
    name: String,
    source: Arc<Category>,
    target: Arc<Category>,
    object_map: IndexMap<String, String>,
    morphism_map: IndexMap<String, String>,
}

impl FunctorBuilder {
    /// Create an empty builder
    pub fn new(name: impl Into<String>, source: Arc<Category>, target: Arc<Category>) -> Self {
        Self {
            name: name.into(),
            source,
            target,
            object_map: IndexMap::new(),
            morphism_map: IndexMap::new(),
        }
    }

    /// Map one object
    pub fn map_object(
        mut self,
        object: impl Into<String>,
        image: impl Into<String>,
    ) -> CategoryResult<Self> {
        let (object, image) = (object.into(), image.into());
        if !self.source.has_object(&object) {
            return Err(StructureError::unknown_object(
                object,
                format!("source of functor {}", self.name),
            ));
        }
        if !self.target.has_object(&image) {
            return Err(StructureError::unknown_object(
                image,
                format!("target of functor {}", self.name),
            ));
        }
        insert_mapping(&mut self.object_map, "object", object, image)?;
        Ok(self)
    }

    /// Map several objects
    pub fn map_objects<I, K, V>(self, pairs: I) -> CategoryResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .try_fold(self, |builder, (object, image)| builder.map_object(object, image))
    }

    /// Map one morphism
    pub fn map_morphism(
        mut self,
        morphism: impl Into<String>,
        image: impl Into<String>,
    ) -> CategoryResult<Self> {
        let (morphism, image) = (morphism.into(), image.into());
        if !self.source.has_morphism(&morphism) {
            return Err(StructureError::unknown_morphism(
                morphism,
                format!("source of functor {}", self.name),
            ));
        }
        if !self.target.has_morphism(&image) {
            return Err(StructureError::unknown_morphism(
                image,
                format!("target of functor {}", self.name),
            ));
        }
        insert_mapping(&mut self.morphism_map, "morphism", morphism, image)?;
        Ok(self)
    }

    /// Map several morphisms
    pub fn map_morphisms<I, K, V>(self, pairs: I) -> CategoryResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .try_fold(self, |builder, (m, image)| builder.map_morphism(m, image))
    }

    /// Send `id:X` to `id:F(X)` for every object mapped so far
    pub fn map_identities(self) -> CategoryResult<Self> {
        let pairs = self
            .object_map
            .iter()
            .map(|(x, fx)| {
                let id_x = self.source.identity(x)?.to_string();
                let id_fx = self.target.identity(fx)?.to_string();
                Ok((id_x, id_fx))
            })
            .collect::<CategoryResult<Vec<_>>>()?;
        self.map_morphisms(pairs)
    }

    /// Check totality and boundaries, then freeze
    pub fn build(self) -> CategoryResult<Functor> {
        let missing: Vec<String> = self
            .source
            .object_names()
            .filter(|x| !self.object_map.contains_key(*x))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(StructureError::IncompleteMap {
                kind: "object".to_string(),
                owner: self.name,
                missing,
            });
        }

        let missing: Vec<String> = self
            .source
            .morphisms()
            .filter(|m| !self.morphism_map.contains_key(&m.name))
            .map(|m| m.name.clone())
            .collect();
        if !missing.is_empty() {
            return Err(StructureError::IncompleteMap {
                kind: "morphism".to_string(),
                owner: self.name,
                missing,
            });
        }

        for (m, image) in &self.morphism_map {
            let m = self.source.morphism(m)?;
            let image = self.target.morphism(image)?;
            let expected_source = &self.object_map[&m.source];
            let expected_target = &self.object_map[&m.target];
            if &image.source != expected_source || &image.target != expected_target {
                return Err(StructureError::BoundaryMismatch {
                    morphism: format!("{}({})", self.name, m.name),
                    expected_source: expected_source.clone(),
                    expected_target: expected_target.clone(),
                    actual_source: image.source.clone(),
                    actual_target: image.target.clone(),
                });
            }
        }

        Ok(Functor {
            name: self.name,
            source: self.source,
            target: self.target,
            object_map: self.object_map,
            morphism_map: self.morphism_map,
        })
    }
}

fn insert_mapping(
    map: &mut IndexMap<String, String>,
    kind: &str,
    key: String,
    image: String,
) -> CategoryResult<()> {
    match map.get(&key) {
        Some(existing) if *existing != image => Err(StructureError::ConflictingMapping {
            kind: kind.to_string(),
            key,
            existing: existing.clone(),
            conflicting: image,
        }),
        Some(_) => Ok(()),
        None => {
            map.insert(key, image);
            Ok(())
        }
    }
}
