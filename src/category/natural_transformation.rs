// Copyright 2025 Cowboy AI, LLC.

//! Natural transformations between parallel functors
//!
//! A transformation `α: F ⇒ G` picks, for every object `X` of the shared
//! source category, a component `α_X: F(X) → G(X)` in the shared target.
//! Naturality (`G(f) ∘ α_A = α_B ∘ F(f)`) is checked by
//! [`NaturalTransformation::verify`].

use std::sync::Arc;

use indexmap::IndexMap;

use super::finite_category::Category;
use super::functor::Functor;
use crate::errors::{CategoryResult, StructureError};
use crate::laws::{naturality_laws, SuiteReport};

/// A family of target morphisms indexed by source objects
#[derive(Debug, Clone)]
pub struct NaturalTransformation {
    name: String,
    source: Arc<Functor>,
    target: Arc<Functor>,
    components: IndexMap<String, String>,
}

impl NaturalTransformation {
    /// Create `name: source ⇒ target` from `object ↦ component` pairs
    ///
    /// Components may be partial; missing ones are reported by
    /// [`verify`](Self::verify).
    pub fn new<I, K, V>(
        name: impl Into<String>,
        source: Arc<Functor>,
        target: Arc<Functor>,
        components: I,
    ) -> CategoryResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        check_parallel(&source, &target)?;

        let domain = source.source_category();
        let codomain = source.target_category();
        let mut map: IndexMap<String, String> = IndexMap::new();

        for (object, component) in components {
            let (object, component) = (object.into(), component.into());
            if !domain.has_object(&object) {
                return Err(StructureError::ComponentOutsideCategory {
                    transformation: name,
                    object,
                });
            }
            let morphism = codomain.morphism(&component)?;
            let expected_source = source.map_object(&object)?;
            let expected_target = target.map_object(&object)?;
            if morphism.source != expected_source || morphism.target != expected_target {
                return Err(StructureError::BoundaryMismatch {
                    morphism: format!("{name}_{object} = {component}"),
                    expected_source: expected_source.to_string(),
                    expected_target: expected_target.to_string(),
                    actual_source: morphism.source.clone(),
                    actual_target: morphism.target.clone(),
                });
            }
            if let Some(existing) = map.get(&object) {
                if *existing != component {
                    return Err(StructureError::ConflictingMapping {
                        kind: "component".to_string(),
                        key: object,
                        existing: existing.clone(),
                        conflicting: component,
                    });
                }
            }
            map.insert(object, component);
        }

        Ok(Self {
            name,
            source,
            target,
            components: map,
        })
    }

    /// The identity transformation `F ⇒ F` with components `id:F(X)`
    pub fn identity(functor: Arc<Functor>) -> CategoryResult<Self> {
        let components = functor
            .object_map()
            .iter()
            .map(|(x, fx)| {
                let id = functor.target_category().identity(fx)?;
                Ok((x.clone(), id.to_string()))
            })
            .collect::<CategoryResult<Vec<_>>>()?;

        Self::new(
            format!("id_{}", functor.name()),
            Arc::clone(&functor),
            functor,
            components,
        )
    }

    /// Transformation name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The functor `F` in `α: F ⇒ G`
    pub fn source_functor(&self) -> &Arc<Functor> {
        &self.source
    }

    /// The functor `G` in `α: F ⇒ G`
    pub fn target_functor(&self) -> &Arc<Functor> {
        &self.target
    }

    /// Shared source category of both functors
    pub fn domain(&self) -> &Arc<Category> {
        self.source.source_category()
    }

    /// Shared target category of both functors
    pub fn codomain(&self) -> &Arc<Category> {
        self.source.target_category()
    }

    /// Component at an object
    pub fn component(&self, object: &str) -> CategoryResult<&str> {
        self.components
            .get(object)
            .map(String::as_str)
            .ok_or_else(|| {
                StructureError::unknown_object(object, format!("components of {}", self.name))
            })
    }

    /// Components in insertion order
    pub fn components(&self) -> impl Iterator<Item = (&str, &str)> {
        self.components
            .iter()
            .map(|(x, c)| (x.as_str(), c.as_str()))
    }

    /// Vertical composite `next ∘ self` with components `next_X ∘ self_X`
    pub fn vertical_compose(&self, next: &NaturalTransformation) -> CategoryResult<Self> {
        if !Arc::ptr_eq(&self.target, &next.source)
            && !same_maps(&self.target, &next.source)
        {
            return Err(StructureError::MismatchedFunctors {
                source_functor: self.target.name().to_string(),
                target_functor: next.source.name().to_string(),
                reason: "middle functors differ".to_string(),
            });
        }

        let codomain = self.codomain();
        let components = self
            .components
            .iter()
            .map(|(x, alpha)| {
                let beta = next.component(x)?;
                Ok((x.clone(), codomain.compose(beta, alpha)?.to_string()))
            })
            .collect::<CategoryResult<Vec<_>>>()?;

        Self::new(
            format!("{}∘{}", next.name, self.name),
            Arc::clone(&self.source),
            Arc::clone(&next.target),
            components,
        )
    }

    /// Whether every component exists and is an isomorphism
    pub fn is_natural_isomorphism(&self) -> bool {
        let codomain = self.codomain();
        self.domain()
            .object_names()
            .all(|x| self.components.get(x).is_some_and(|c| codomain.is_isomorphism(c)))
            && self.verify().is_ok()
    }

    /// Run the naturality suite
    pub fn verify(&self) -> SuiteReport {
        naturality_laws().run(self)
    }
}

fn check_parallel(source: &Functor, target: &Functor) -> CategoryResult<()> {
    let mismatch = |reason: &str| StructureError::MismatchedFunctors {
        source_functor: source.name().to_string(),
        target_functor: target.name().to_string(),
        reason: reason.to_string(),
    };
    if !source
        .source_category()
        .same_structure(target.source_category())
    {
        return Err(mismatch("source categories differ"));
    }
    if !source
        .target_category()
        .same_structure(target.target_category())
    {
        return Err(mismatch("target categories differ"));
    }
    Ok(())
}

fn same_maps(a: &Functor, b: &Functor) -> bool {
    a.object_map() == b.object_map() && a.morphism_map() == b.morphism_map()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{standard, Presentation};
    use crate::category::build_free_category;

    /// Walking arrow `0 → 1` and the two constant functors into it
    fn constants() -> (Arc<Functor>, Arc<Functor>) {
        let point = Arc::new(standard::terminal().unwrap());
        let arrow = Arc::new(standard::arrow().unwrap());
        let at = |object: &str, name: &str| {
            Functor::builder(name, Arc::clone(&point), Arc::clone(&arrow))
                .map_object("*", object)
                .unwrap()
                .map_identities()
                .unwrap()
                .build()
                .unwrap()
        };
        (Arc::new(at("0", "Zero")), Arc::new(at("1", "One")))
    }

    #[test]
    fn test_components_checked_on_construction() {
        let (zero, one) = constants();

        let alpha = NaturalTransformation::new("alpha", Arc::clone(&zero), Arc::clone(&one), [("*", "u")])
            .unwrap();
        assert_eq!(alpha.component("*").unwrap(), "u");
        assert!(alpha.verify().is_ok());

        let err = NaturalTransformation::new("bad", Arc::clone(&zero), Arc::clone(&one), [("*", "id:0")])
            .unwrap_err();
        assert!(matches!(err, StructureError::BoundaryMismatch { .. }));

        let err = NaturalTransformation::new("stray", zero, one, [("Q", "u")]).unwrap_err();
        assert_eq!(
            err,
            StructureError::ComponentOutsideCategory {
                transformation: "stray".to_string(),
                object: "Q".to_string(),
            }
        );
    }

    #[test]
    fn test_functors_must_be_parallel() {
        let (zero, _) = constants();
        let other = Arc::new(Functor::identity(Arc::new(standard::arrow().unwrap())));

        let err = NaturalTransformation::new("alpha", zero, other, Vec::<(String, String)>::new())
            .unwrap_err();
        assert!(matches!(err, StructureError::MismatchedFunctors { .. }));
    }

    #[test]
    fn test_identity_transformation_is_natural_isomorphism() {
        let presentation = Presentation::builder("square")
            .objects(["A", "B", "C", "D"])
            .generator("f", "A", "B")
            .generator("g", "B", "D")
            .generator("h", "A", "C")
            .generator("k", "C", "D")
            .build()
            .unwrap();
        let category = Arc::new(build_free_category(&presentation, 4).unwrap());
        let identity = Arc::new(Functor::identity(category));

        let id = NaturalTransformation::identity(identity).unwrap();
        assert!(id.verify().is_ok());
        assert!(id.is_natural_isomorphism());
        assert_eq!(id.component("B").unwrap(), "id:B");
    }

    #[test]
    fn test_missing_component_is_a_violation() {
        let (zero, one) = constants();
        let partial = NaturalTransformation::new("partial", zero, one, Vec::<(String, String)>::new())
            .unwrap();

        let report = partial.verify();
        assert!(!report.is_ok());
        assert!(partial.component("*").is_err());
        assert!(!partial.is_natural_isomorphism());
    }

    #[test]
    fn test_vertical_composition() {
        let (zero, one) = constants();
        let alpha = NaturalTransformation::new("alpha", Arc::clone(&zero), Arc::clone(&one), [("*", "u")])
            .unwrap();
        let id_one = NaturalTransformation::identity(Arc::clone(&one)).unwrap();
        let id_zero = NaturalTransformation::identity(zero).unwrap();

        let composed = alpha.vertical_compose(&id_one).unwrap();
        assert_eq!(composed.component("*").unwrap(), "u");
        assert!(composed.verify().is_ok());
        assert!(!composed.is_natural_isomorphism());

        let err = alpha.vertical_compose(&id_zero).unwrap_err();
        assert!(matches!(err, StructureError::MismatchedFunctors { .. }));
    }
}
