// Copyright 2025 Cowboy AI, LLC.

//! Materialization - turning a presentation into a category
//!
//! Identities are synthesized for every object, explicit composites are
//! registered in dependency order, and in free composition mode every
//! composable pair is closed under composition up to a configured bound.
//! An explicit composite whose result already exists relates two words;
//! free composition reduces words by these relations before naming them.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::finite_category::{Category, Morphism, MorphismKind, Truncation};
use super::presentation::{ArrowGenerator, ExplicitComposite, Object, Presentation};
use super::word::{is_identity_name, FormalWord};
use crate::errors::{CategoryResult, StructureError};

/// How composites beyond the explicit ones are obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionMode {
    /// Only identities and explicitly registered composites
    #[default]
    Explicit,
    /// Close the table under composition, naming new composites canonically
    Free,
}

/// Options controlling materialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterializeOptions {
    /// Explicit or free composition
    pub mode: CompositionMode,

    /// Longest formal word synthesized in free mode
    pub max_path_length: usize,

    /// Upper bound on the number of morphisms in free mode
    pub max_morphisms: usize,
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self {
            mode: CompositionMode::Explicit,
            max_path_length: 8,
            max_morphisms: 10_000,
        }
    }
}

impl MaterializeOptions {
    /// Free composition with the given word length bound
    pub fn free(max_path_length: usize) -> Self {
        Self {
            mode: CompositionMode::Free,
            max_path_length,
            ..Self::default()
        }
    }

    /// Override the morphism count bound
    pub fn with_max_morphisms(mut self, max_morphisms: usize) -> Self {
        self.max_morphisms = max_morphisms;
        self
    }
}

/// Materialize with only explicit composites
pub fn build_category(
    presentation: &Presentation,
    explicit_composites: &[ExplicitComposite],
) -> CategoryResult<Category> {
    materialize(presentation, explicit_composites, &MaterializeOptions::default())
}

/// Materialize in free composition mode
pub fn build_free_category(
    presentation: &Presentation,
    max_path_length: usize,
) -> CategoryResult<Category> {
    materialize(presentation, &[], &MaterializeOptions::free(max_path_length))
}

/// Materialize a presentation into a category
///
/// The presentation's own seed composites are registered before
/// `explicit_composites`.
pub fn materialize(
    presentation: &Presentation,
    explicit_composites: &[ExplicitComposite],
    options: &MaterializeOptions,
) -> CategoryResult<Category> {
    let mut state = Materializer::new(options);

    for object in presentation.objects() {
        state.add_object(object);
    }
    for generator in presentation.generators() {
        state.add_generator(generator);
    }

    let composites: Vec<&ExplicitComposite> = presentation
        .composites()
        .iter()
        .chain(explicit_composites)
        .collect();
    state.register_composites(composites)?;

    if options.mode == CompositionMode::Free {
        state.close_under_composition()?;
    }
    state.fill_identity_entries();

    let truncation = state.truncation();
    if let Some(t) = &truncation {
        warn!(
            category = presentation.name(),
            skipped_pairs = t.skipped_pairs,
            max_path_length = t.max_path_length,
            "free composition truncated before reaching a fixed point"
        );
    }
    debug!(
        category = presentation.name(),
        objects = state.objects.len(),
        morphisms = state.morphisms.len(),
        composites = state.composition.len(),
        "materialized category"
    );

    Ok(Category::assemble(
        presentation.name().to_string(),
        state.objects,
        state.morphisms,
        state.composition,
        state.identities,
        truncation,
    ))
}

struct Materializer<'a> {
    options: &'a MaterializeOptions,
    objects: IndexMap<String, Object>,
    morphisms: IndexMap<String, Morphism>,
    identities: IndexMap<String, String>,
    composition: BTreeMap<(String, String), String>,
    word_index: HashMap<FormalWord, String>,
    /// `lhs → rhs` subword rules from explicit composites, rhs shortlex-smaller
    rules: Vec<(Vec<String>, Vec<String>)>,
    skipped: BTreeSet<(String, String)>,
}

impl<'a> Materializer<'a> {
    fn new(options: &'a MaterializeOptions) -> Self {
        Self {
            options,
            objects: IndexMap::new(),
            morphisms: IndexMap::new(),
            identities: IndexMap::new(),
            composition: BTreeMap::new(),
            word_index: HashMap::new(),
            rules: Vec::new(),
            skipped: BTreeSet::new(),
        }
    }

    fn add_object(&mut self, object: &Object) {
        let identity = Morphism::identity(&object.name);
        self.identities
            .insert(object.name.clone(), identity.name.clone());
        self.word_index
            .insert(identity.word.clone(), identity.name.clone());
        self.morphisms.insert(identity.name.clone(), identity);
        self.objects.insert(object.name.clone(), object.clone());
    }

    fn add_generator(&mut self, generator: &ArrowGenerator) {
        let word = FormalWord::generator(&generator.name);
        self.word_index
            .entry(word.clone())
            .or_insert_with(|| generator.name.clone());
        self.morphisms.insert(
            generator.name.clone(),
            Morphism {
                name: generator.name.clone(),
                source: generator.source.clone(),
                target: generator.target.clone(),
                kind: MorphismKind::Generator,
                word,
                data: generator.data.clone(),
            },
        );
    }

    /// Register composites whose constituents are known, until none are left
    fn register_composites(&mut self, mut pending: Vec<&ExplicitComposite>) -> CategoryResult<()> {
        while !pending.is_empty() {
            let before = pending.len();
            let mut deferred = Vec::new();

            for composite in pending {
                if self.morphisms.contains_key(&composite.first)
                    && self.morphisms.contains_key(&composite.second)
                {
                    self.register_composite(composite)?;
                } else {
                    deferred.push(composite);
                }
            }

            if deferred.len() == before {
                let stuck = deferred[0];
                let missing = if self.morphisms.contains_key(&stuck.first) {
                    &stuck.second
                } else {
                    &stuck.first
                };
                return Err(StructureError::unknown_morphism(
                    missing.clone(),
                    format!("composite {}", stuck.result),
                ));
            }
            pending = deferred;
        }
        Ok(())
    }

    fn register_composite(&mut self, composite: &ExplicitComposite) -> CategoryResult<()> {
        let first = &self.morphisms[&composite.first];
        let second = &self.morphisms[&composite.second];

        if first.target != second.source {
            return Err(StructureError::NotComposable {
                second: composite.second.clone(),
                first: composite.first.clone(),
                first_target: first.target.clone(),
                second_source: second.source.clone(),
            });
        }

        let source = first.source.clone();
        let target = second.target.clone();
        let word = first.word.then(&second.word);

        // Each stated end is checked on its own; an unstated end takes the derived value
        let stated_source = composite.source.clone().unwrap_or_else(|| source.clone());
        let stated_target = composite.target.clone().unwrap_or_else(|| target.clone());
        if stated_source != source || stated_target != target {
            return Err(StructureError::BoundaryMismatch {
                morphism: composite.result.clone(),
                expected_source: source,
                expected_target: target,
                actual_source: stated_source,
                actual_target: stated_target,
            });
        }

        match self.morphisms.get(&composite.result) {
            Some(existing) => {
                if existing.source != source || existing.target != target {
                    return Err(StructureError::BoundaryMismatch {
                        morphism: composite.result.clone(),
                        expected_source: source,
                        expected_target: target,
                        actual_source: existing.source.clone(),
                        actual_target: existing.target.clone(),
                    });
                }
                let existing_word = existing.word.clone();
                self.add_rule(&word, &existing_word);
            }
            None => {
                if is_identity_name(&composite.result) {
                    return Err(StructureError::ReservedName {
                        name: composite.result.clone(),
                    });
                }
                self.morphisms.insert(
                    composite.result.clone(),
                    Morphism {
                        name: composite.result.clone(),
                        source,
                        target,
                        kind: MorphismKind::Composite,
                        word: word.clone(),
                        data: None,
                    },
                );
            }
        }

        self.word_index
            .entry(word)
            .or_insert_with(|| composite.result.clone());
        self.insert_entry(&composite.second, &composite.first, &composite.result)
    }

    /// Record that two words name the same morphism
    fn add_rule(&mut self, a: &FormalWord, b: &FormalWord) {
        let (a, b) = (a.factors().to_vec(), b.factors().to_vec());
        let order = (a.len(), &a).cmp(&(b.len(), &b));
        let (lhs, rhs) = match order {
            Ordering::Equal => return,
            Ordering::Greater => (a, b),
            Ordering::Less => (b, a),
        };
        if !self.rules.iter().any(|(l, r)| *l == lhs && *r == rhs) {
            self.rules.push((lhs, rhs));
        }
    }

    /// Rewrite `word` with the registered rules until none applies
    ///
    /// Every step is shortlex-decreasing, so this terminates. The rules are
    /// not completed, so overlapping relations can still leave two names for
    /// one morphism.
    fn normalize(&self, source: &str, word: FormalWord) -> FormalWord {
        if self.rules.is_empty() {
            return word;
        }
        let mut factors = word.factors().to_vec();
        'rewrite: loop {
            for (lhs, rhs) in &self.rules {
                if lhs.len() > factors.len() {
                    continue;
                }
                if let Some(at) = factors.windows(lhs.len()).position(|w| w == lhs.as_slice()) {
                    factors.splice(at..at + lhs.len(), rhs.iter().cloned());
                    continue 'rewrite;
                }
            }
            break;
        }
        FormalWord::from_factors(source, factors)
    }

    /// Key the word index by normal forms once every rule is known
    fn reindex(&mut self) {
        if self.rules.is_empty() {
            return;
        }
        let entries: Vec<(FormalWord, String)> = self
            .morphisms
            .values()
            .map(|m| (self.normalize(&m.source, m.word.clone()), m.name.clone()))
            .collect();
        self.word_index.clear();
        for (word, name) in entries {
            self.word_index.entry(word).or_insert(name);
        }
    }

    fn insert_entry(&mut self, g: &str, f: &str, result: &str) -> CategoryResult<()> {
        let key = (g.to_string(), f.to_string());
        match self.composition.get(&key) {
            Some(existing) if existing != result => Err(StructureError::ConflictingComposite {
                second: g.to_string(),
                first: f.to_string(),
                existing: existing.clone(),
                conflicting: result.to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                self.composition.insert(key, result.to_string());
                Ok(())
            }
        }
    }

    /// Free composition: add composites until no new morphism appears
    fn close_under_composition(&mut self) -> CategoryResult<()> {
        self.reindex();
        let mut rounds = 0usize;
        loop {
            rounds += 1;
            let names: Vec<String> = self
                .morphisms
                .values()
                .filter(|m| !m.is_identity())
                .map(|m| m.name.clone())
                .collect();

            let mut added = 0usize;
            for f in &names {
                for g in &names {
                    if self.morphisms[f].target != self.morphisms[g].source {
                        continue;
                    }
                    let key = (g.clone(), f.clone());
                    if self.composition.contains_key(&key) {
                        continue;
                    }
                    if let Some(created) = self.synthesize(g, f)? {
                        if created {
                            added += 1;
                        }
                    } else {
                        self.skipped.insert(key);
                    }
                }
            }

            debug!(round = rounds, added, "free composition round");
            if added == 0 {
                return Ok(());
            }
        }
    }

    /// Fill in `g ∘ f`; `None` when a bound prevents it, `Some(true)` when a
    /// new morphism was created
    fn synthesize(&mut self, g: &str, f: &str) -> CategoryResult<Option<bool>> {
        let (word, source, target) = {
            let first = &self.morphisms[f];
            let second = &self.morphisms[g];
            (
                self.normalize(&first.source, first.word.then(&second.word)),
                first.source.clone(),
                second.target.clone(),
            )
        };

        if word.len() > self.options.max_path_length {
            return Ok(None);
        }

        if let Some(existing) = self.word_index.get(&word).cloned() {
            self.insert_entry(g, f, &existing)?;
            return Ok(Some(false));
        }

        let name = word.canonical_name();

        if let Some(clash) = self.morphisms.get(&name) {
            if clash.source != source || clash.target != target {
                return Err(StructureError::DuplicateName {
                    name,
                    existing: clash.boundary(),
                    conflicting: format!("{source} → {target}"),
                });
            }
            self.word_index.insert(word, name.clone());
            self.insert_entry(g, f, &name)?;
            return Ok(Some(false));
        }

        if self.morphisms.len() >= self.options.max_morphisms {
            return Ok(None);
        }

        trace!(composite = %name, "synthesized free composite");
        self.morphisms.insert(
            name.clone(),
            Morphism {
                name: name.clone(),
                source,
                target,
                kind: MorphismKind::Composite,
                word: word.clone(),
                data: None,
            },
        );
        self.word_index.insert(word, name.clone());
        self.insert_entry(g, f, &name)?;
        Ok(Some(true))
    }

    /// `f ∘ id_A = f` and `id_B ∘ f = f` wherever no explicit entry exists
    fn fill_identity_entries(&mut self) {
        for m in self.morphisms.values() {
            if let Some(id_source) = self.identities.get(&m.source) {
                self.composition
                    .entry((m.name.clone(), id_source.clone()))
                    .or_insert_with(|| m.name.clone());
            }
            if let Some(id_target) = self.identities.get(&m.target) {
                self.composition
                    .entry((id_target.clone(), m.name.clone()))
                    .or_insert_with(|| m.name.clone());
            }
        }
    }

    fn truncation(&self) -> Option<Truncation> {
        // Pairs skipped in an early round may have been filled later through
        // the word index; only the ones still missing count.
        let remaining: Vec<&(String, String)> = self
            .skipped
            .iter()
            .filter(|key| !self.composition.contains_key(*key))
            .collect();

        if remaining.is_empty() {
            return None;
        }
        Some(Truncation {
            max_path_length: self.options.max_path_length,
            max_morphisms: self.options.max_morphisms,
            skipped_pairs: remaining.len(),
            first_skipped: remaining.first().map(|(g, f)| (g.clone(), f.clone())),
        })
    }
}

/// Incremental construction in the style of a mutable domain category
///
/// Objects and morphisms are accumulated and checked eagerly; the result is
/// materialized once by [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct CategoryBuilder {
    name: String,
    objects: Vec<Object>,
    generators: Vec<ArrowGenerator>,
    composites: Vec<ExplicitComposite>,
    options: MaterializeOptions,
}

impl CategoryBuilder {
    /// Create a builder for a named category
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
            generators: Vec::new(),
            composites: Vec::new(),
            options: MaterializeOptions::default(),
        }
    }

    /// Add an object; repeating a name is a no-op
    pub fn add_object(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        if !self.objects.iter().any(|o| o.name == name) {
            self.objects.push(Object::new(name));
        }
        self
    }

    /// Add a generator; both endpoints must already exist
    pub fn add_morphism(
        &mut self,
        name: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> CategoryResult<&mut Self> {
        let generator = ArrowGenerator::new(name, source, target);
        for endpoint in [&generator.source, &generator.target] {
            if !self.objects.iter().any(|o| &o.name == endpoint) {
                return Err(StructureError::unknown_object(
                    endpoint.clone(),
                    format!("morphism {}", generator.name),
                ));
            }
        }
        if let Some(existing) = self.generators.iter().find(|g| g.name == generator.name) {
            return Err(StructureError::DuplicateName {
                name: generator.name.clone(),
                existing: existing.boundary(),
                conflicting: generator.boundary(),
            });
        }
        self.generators.push(generator);
        Ok(self)
    }

    /// Define `second ∘ first = result`
    pub fn define_composition(
        &mut self,
        first: impl Into<String>,
        second: impl Into<String>,
        result: impl Into<String>,
    ) -> &mut Self {
        self.composites
            .push(ExplicitComposite::new(second, first, result));
        self
    }

    /// Close under composition up to `max_path_length`
    pub fn with_free_composition(&mut self, max_path_length: usize) -> &mut Self {
        self.options = MaterializeOptions::free(max_path_length);
        self
    }

    /// Replace the materialization options
    pub fn with_options(&mut self, options: MaterializeOptions) -> &mut Self {
        self.options = options;
        self
    }

    /// Validate the accumulated presentation and materialize it
    pub fn build(&self) -> CategoryResult<Category> {
        let mut presentation = Presentation::builder(self.name.clone());
        for object in &self.objects {
            presentation = match &object.data {
                Some(data) => presentation.object_with_data(object.name.clone(), data.clone()),
                None => presentation.object(object.name.clone()),
            };
        }
        for g in &self.generators {
            presentation = presentation.generator(g.name.clone(), g.source.clone(), g.target.clone());
        }
        materialize(&presentation.build()?, &self.composites, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chain(len: usize) -> Presentation {
        let mut builder = Presentation::builder(format!("chain{len}"));
        for i in 0..=len {
            builder = builder.object(i.to_string());
        }
        for i in 0..len {
            builder = builder.generator(format!("d{i}"), i.to_string(), (i + 1).to_string());
        }
        builder.build().unwrap()
    }

    fn triangle() -> Presentation {
        Presentation::builder("triangle")
            .objects(["A", "B", "C"])
            .generator("f", "A", "B")
            .generator("g", "B", "C")
            .build()
            .unwrap()
    }

    #[test]
    fn test_identities_synthesized() {
        let category = build_category(&triangle(), &[]).unwrap();

        for object in ["A", "B", "C"] {
            let id = category.identity(object).unwrap();
            assert_eq!(id, format!("id:{object}"));
            assert!(category.morphism(id).unwrap().is_endomorphism());
        }
        assert_eq!(category.compose("f", "id:A").unwrap(), "f");
        // Explicit mode does not derive g∘f
        assert!(matches!(
            category.compose("g", "f"),
            Err(StructureError::CompositionUndefined { .. })
        ));
    }

    #[test]
    fn test_explicit_composite_with_stated_boundary() {
        let ok = ExplicitComposite::new("g", "f", "gf").with_boundary("A", "C");
        let category = build_category(&triangle(), &[ok]).unwrap();
        assert_eq!(category.compose("g", "f").unwrap(), "gf");

        let bad = ExplicitComposite::new("g", "f", "gf").with_boundary("A", "B");
        let err = build_category(&triangle(), &[bad]).unwrap_err();
        assert_eq!(
            err,
            StructureError::BoundaryMismatch {
                morphism: "gf".to_string(),
                expected_source: "A".to_string(),
                expected_target: "C".to_string(),
                actual_source: "A".to_string(),
                actual_target: "B".to_string(),
            }
        );
    }

    #[test]
    fn test_explicit_composite_with_one_stated_end() {
        let mut source_only = ExplicitComposite::new("g", "f", "gf");
        source_only.source = Some("B".to_string());
        let err = build_category(&triangle(), &[source_only]).unwrap_err();
        assert_eq!(
            err,
            StructureError::BoundaryMismatch {
                morphism: "gf".to_string(),
                expected_source: "A".to_string(),
                expected_target: "C".to_string(),
                actual_source: "B".to_string(),
                actual_target: "C".to_string(),
            }
        );

        let mut target_only = ExplicitComposite::new("g", "f", "gf");
        target_only.target = Some("B".to_string());
        let err = build_category(&triangle(), &[target_only]).unwrap_err();
        assert!(matches!(
            err,
            StructureError::BoundaryMismatch { ref actual_target, .. } if actual_target == "B"
        ));

        let mut matching = ExplicitComposite::new("g", "f", "gf");
        matching.target = Some("C".to_string());
        let category = build_category(&triangle(), &[matching]).unwrap();
        assert_eq!(category.morphism("gf").unwrap().boundary(), "A → C");
    }

    #[test]
    fn test_explicit_composite_must_be_composable() {
        let err = build_category(&triangle(), &[ExplicitComposite::new("f", "g", "fg")]).unwrap_err();
        assert!(matches!(err, StructureError::NotComposable { .. }));
    }

    #[test]
    fn test_existing_result_boundary_checked() {
        let err = build_category(&triangle(), &[ExplicitComposite::new("g", "f", "f")]).unwrap_err();
        assert!(matches!(err, StructureError::BoundaryMismatch { .. }));
    }

    #[test]
    fn test_conflicting_composites_rejected() {
        let err = build_category(
            &triangle(),
            &[
                ExplicitComposite::new("g", "f", "gf"),
                ExplicitComposite::new("g", "f", "other"),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, StructureError::ConflictingComposite { .. }));
    }

    #[test]
    fn test_composites_resolve_in_dependency_order() {
        let presentation = chain(3);
        // The second composite is listed first but depends on the first one.
        let composites = [
            ExplicitComposite::new("d2", "d1d0", "d2d1d0"),
            ExplicitComposite::new("d1", "d0", "d1d0"),
        ];
        let category = build_category(&presentation, &composites).unwrap();

        assert_eq!(category.compose("d2", "d1d0").unwrap(), "d2d1d0");
        assert_eq!(category.morphism("d2d1d0").unwrap().boundary(), "0 → 3");

        let err = build_category(&presentation, &[ExplicitComposite::new("d1", "ghost", "x")])
            .unwrap_err();
        assert_eq!(
            err,
            StructureError::UnknownMorphism {
                name: "ghost".to_string(),
                context: "composite x".to_string(),
            }
        );
    }

    #[test]
    fn test_free_composition_reaches_fixed_point() {
        let category = build_free_category(&chain(3), 8).unwrap();

        assert!(category.is_complete());
        // 4 identities, 3 generators, 2 + 1 composites
        assert_eq!(category.morphism_count(), 10);
        assert_eq!(category.compose("d1", "d0").unwrap(), "d1∘d0");
        assert_eq!(category.compose("d2", "d1∘d0").unwrap(), "d2∘d1∘d0");
        assert_eq!(category.compose("d2∘d1", "d0").unwrap(), "d2∘d1∘d0");
    }

    #[test]
    fn test_free_composition_reuses_explicit_names() {
        let presentation = Presentation::builder("named")
            .objects(["A", "B", "C", "D"])
            .generator("f", "A", "B")
            .generator("g", "B", "C")
            .generator("h", "C", "D")
            .composite(ExplicitComposite::new("g", "f", "gf"))
            .build()
            .unwrap();
        let category = materialize(&presentation, &[], &MaterializeOptions::free(4)).unwrap();

        assert_eq!(category.compose("g", "f").unwrap(), "gf");
        assert_eq!(category.compose("h", "gf").unwrap(), "h∘g∘f");
        assert_eq!(category.compose("h∘g", "f").unwrap(), "h∘g∘f");
        assert!(!category.has_morphism("g∘f"));
    }

    #[test]
    fn test_free_composition_respects_seeded_relation() {
        // g∘f = h with h a generator, so k∘h and (k∘g)∘f are one morphism
        let presentation = Presentation::builder("seeded")
            .objects(["A", "B", "C", "D"])
            .generator("f", "A", "B")
            .generator("g", "B", "C")
            .generator("h", "A", "C")
            .generator("k", "C", "D")
            .composite(ExplicitComposite::new("g", "f", "h"))
            .build()
            .unwrap();
        let category = materialize(&presentation, &[], &MaterializeOptions::free(4)).unwrap();

        assert!(category.is_complete());
        assert_eq!(category.compose("k", "h").unwrap(), "k∘h");
        assert_eq!(category.compose("k∘g", "f").unwrap(), "k∘h");
        assert!(!category.has_morphism("k∘g∘f"));
        assert!(category.verify().is_ok(), "{}", category.verify());
    }

    #[test]
    fn test_free_composition_collapses_inverse_pairs() {
        let presentation = Presentation::builder("iso-tail")
            .objects(["0", "1", "2"])
            .generator("f", "0", "1")
            .generator("f⁻¹", "1", "0")
            .generator("t", "1", "2")
            .composite(ExplicitComposite::new("f⁻¹", "f", "id:0"))
            .composite(ExplicitComposite::new("f", "f⁻¹", "id:1"))
            .build()
            .unwrap();
        let category = materialize(&presentation, &[], &MaterializeOptions::free(6)).unwrap();

        assert!(category.is_complete());
        // 3 identities, 3 generators and t∘f; t∘f∘f⁻¹ reduces to t
        assert_eq!(category.morphism_count(), 7);
        assert_eq!(category.compose("t", "f").unwrap(), "t∘f");
        assert_eq!(category.compose("t∘f", "f⁻¹").unwrap(), "t");
        assert!(category.verify().is_ok(), "{}", category.verify());
    }

    #[test]
    fn test_cycle_reports_truncation() {
        let presentation = Presentation::builder("loop")
            .object("A")
            .generator("e", "A", "A")
            .build()
            .unwrap();
        let category = build_free_category(&presentation, 3).unwrap();

        let truncation = category.truncation().expect("cycle must truncate");
        assert_eq!(truncation.max_path_length, 3);
        assert!(truncation.skipped_pairs > 0);
        assert!(!category.is_complete());
        assert!(category.has_morphism("e∘e∘e"));
        assert!(!category.has_morphism("e∘e∘e∘e"));
    }

    #[test]
    fn test_morphism_cap_reports_truncation() {
        let options = MaterializeOptions::free(10).with_max_morphisms(8);
        let category = materialize(&chain(3), &[], &options).unwrap();

        assert!(category.morphism_count() <= 8);
        assert!(category.truncation().is_some());
    }

    #[test]
    fn test_presentation_not_mutated() {
        let presentation = triangle();
        let before = presentation.clone();
        let _ = build_free_category(&presentation, 4).unwrap();
        assert_eq!(presentation, before);
    }

    #[test]
    fn test_category_builder() {
        let mut builder = CategoryBuilder::new("TestDomain");
        builder.add_object("A").add_object("B").add_object("C");
        builder.add_morphism("f", "A", "B").unwrap();
        builder.add_morphism("g", "B", "C").unwrap();
        builder.add_morphism("h", "A", "C").unwrap();
        builder.define_composition("f", "g", "h");

        let category = builder.build().unwrap();
        assert_eq!(category.compose("g", "f").unwrap(), "h");

        let err = builder.add_morphism("k", "A", "Z").unwrap_err();
        assert!(err.is_unknown_reference());
        let err = builder.add_morphism("f", "B", "C").unwrap_err();
        assert!(err.is_conflict());
    }
}
