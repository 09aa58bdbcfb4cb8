// Copyright 2025 Cowboy AI, LLC.

//! New categories built from existing ones
//!
//! Every construction returns a fresh [`Category`]; the input is never
//! modified.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use tracing::debug;

use super::finite_category::{Category, Morphism, MorphismKind};
use super::presentation::Object;
use super::word::{identity_name, FormalWord};
use crate::errors::{CategoryResult, StructureError};

fn pair_name(left: &str, right: &str) -> String {
    format!("({left},{right})")
}

impl Category {
    /// The opposite category: same objects, every arrow reversed
    ///
    /// `g ∘ f = h` becomes `f ∘ g = h`.
    pub fn opposite(&self) -> Category {
        let morphisms = self
            .morphisms
            .values()
            .map(|m| {
                let word = match &m.word {
                    FormalWord::Identity(object) => FormalWord::identity(object.clone()),
                    FormalWord::Composite(factors) => {
                        FormalWord::from_factors(m.target.clone(), factors.iter().rev().cloned())
                    }
                };
                let reversed = Morphism {
                    name: m.name.clone(),
                    source: m.target.clone(),
                    target: m.source.clone(),
                    kind: m.kind,
                    word,
                    data: m.data.clone(),
                };
                (m.name.clone(), reversed)
            })
            .collect();

        let composition = self
            .composition
            .iter()
            .map(|((g, f), h)| ((f.clone(), g.clone()), h.clone()))
            .collect();

        Category::assemble(
            format!("{}^op", self.name),
            self.objects.clone(),
            morphisms,
            composition,
            self.identities.clone(),
            self.truncation.clone(),
        )
    }

    /// The product category with componentwise composition
    ///
    /// Objects are `(A,X)`, morphisms `(m,n)`; the pair of identities on
    /// `(A,X)` is named `id:(A,X)`.
    pub fn product(&self, other: &Category) -> Category {
        let mut objects = IndexMap::new();
        let mut identities = IndexMap::new();
        for a in self.objects.keys() {
            for x in other.objects.keys() {
                let name = pair_name(a, x);
                identities.insert(name.clone(), identity_name(&name));
                objects.insert(name.clone(), Object::new(name));
            }
        }

        let name_of = |m: &Morphism, n: &Morphism| -> String {
            if m.is_identity() && n.is_identity() {
                identity_name(&pair_name(&m.source, &n.source))
            } else {
                pair_name(&m.name, &n.name)
            }
        };

        let mut morphisms = IndexMap::new();
        for m in self.morphisms.values() {
            for n in other.morphisms.values() {
                let name = name_of(m, n);
                let source = pair_name(&m.source, &n.source);
                let (kind, word) = match (m.kind, n.kind) {
                    (MorphismKind::Identity, MorphismKind::Identity) => {
                        (MorphismKind::Identity, FormalWord::identity(source.clone()))
                    }
                    (MorphismKind::Identity, MorphismKind::Generator)
                    | (MorphismKind::Generator, MorphismKind::Identity) => {
                        (MorphismKind::Generator, FormalWord::generator(name.clone()))
                    }
                    _ => (MorphismKind::Composite, FormalWord::generator(name.clone())),
                };
                morphisms.insert(
                    name.clone(),
                    Morphism {
                        name,
                        source,
                        target: pair_name(&m.target, &n.target),
                        kind,
                        word,
                        data: None,
                    },
                );
            }
        }

        let mut composition = BTreeMap::new();
        for ((g, f), h) in &self.composition {
            for ((v, u), w) in &other.composition {
                let (Some(g), Some(f), Some(h)) = (
                    self.morphisms.get(g),
                    self.morphisms.get(f),
                    self.morphisms.get(h),
                ) else {
                    continue;
                };
                let (Some(v), Some(u), Some(w)) = (
                    other.morphisms.get(v),
                    other.morphisms.get(u),
                    other.morphisms.get(w),
                ) else {
                    continue;
                };
                composition.insert((name_of(g, v), name_of(f, u)), name_of(h, w));
            }
        }

        let truncation = self.truncation.clone().or_else(|| other.truncation.clone());
        Category::assemble(
            format!("{}×{}", self.name, other.name),
            objects,
            morphisms,
            composition,
            identities,
            truncation,
        )
    }

    /// The slice category over `base`
    ///
    /// Objects are the morphisms `f: A → base`. A morphism `h: f → g` is a
    /// base morphism `h: A → B` with `g ∘ h = f`.
    pub fn slice(&self, base: &str) -> CategoryResult<Category> {
        if !self.has_object(base) {
            return Err(StructureError::unknown_object(base, format!("slice of {}", self.name)));
        }

        let over: Vec<&Morphism> = self.morphisms_to(base);

        let mut objects = IndexMap::new();
        let mut identities = IndexMap::new();
        for f in &over {
            identities.insert(f.name.clone(), identity_name(&f.name));
            objects.insert(
                f.name.clone(),
                Object::with_data(f.name.clone(), serde_json::json!({ "over": base, "source": f.source })),
            );
        }

        // (base morphism, slice source, slice target) -> slice morphism name
        let mut index: HashMap<(String, String, String), String> = HashMap::new();
        let mut morphisms = IndexMap::new();
        for f in &over {
            for g in &over {
                for h in self.hom(&f.source, &g.source) {
                    if self.composite(&g.name, &h.name) != Some(f.name.as_str()) {
                        continue;
                    }
                    let (name, kind, word) = if h.is_identity() {
                        let name = identity_name(&f.name);
                        (name, MorphismKind::Identity, FormalWord::identity(f.name.clone()))
                    } else {
                        let name = format!("{}:{}→{}", h.name, f.name, g.name);
                        let word = FormalWord::generator(name.clone());
                        (name, h.kind, word)
                    };
                    index.insert((h.name.clone(), f.name.clone(), g.name.clone()), name.clone());
                    morphisms.insert(
                        name.clone(),
                        Morphism {
                            name,
                            source: f.name.clone(),
                            target: g.name.clone(),
                            kind,
                            word,
                            data: h.data.clone(),
                        },
                    );
                }
            }
        }

        let mut composition = BTreeMap::new();
        for ((h, f, g), first) in &index {
            for ((k, g2, e), second) in &index {
                if g != g2 {
                    continue;
                }
                let Some(m) = self.composite(k, h) else {
                    continue;
                };
                match index.get(&(m.to_string(), f.clone(), e.clone())) {
                    Some(result) => {
                        composition.insert((second.clone(), first.clone()), result.clone());
                    }
                    None => {
                        debug!(base, composite = m, "slice composite does not lie over the base");
                    }
                }
            }
        }

        Ok(Category::assemble(
            format!("{}/{}", self.name, base),
            objects,
            morphisms,
            composition,
            identities,
            self.truncation.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::category::{build_category, build_free_category, ExplicitComposite, Presentation};
    use crate::category::Category;

    fn triangle() -> Category {
        let presentation = Presentation::builder("T")
            .objects(["A", "B", "C"])
            .generator("f", "A", "B")
            .generator("g", "B", "C")
            .build()
            .unwrap();
        build_category(&presentation, &[ExplicitComposite::new("g", "f", "gf")]).unwrap()
    }

    #[test]
    fn test_opposite_reverses_arrows() {
        let category = triangle();
        let op = category.opposite();

        assert_eq!(op.name(), "T^op");
        assert_eq!(op.morphism("f").unwrap().boundary(), "B → A");
        assert_eq!(op.compose("f", "g").unwrap(), "gf");
        assert!(op.compose("g", "f").is_err());
        assert!(op.verify().is_ok());
        assert!(op.opposite().same_structure(&category));
        assert_ne!(op.id(), category.id());
    }

    #[test]
    fn test_product_is_componentwise() {
        let left = triangle();
        let arrow = build_free_category(
            &Presentation::builder("2")
                .objects(["0", "1"])
                .generator("u", "0", "1")
                .build()
                .unwrap(),
            2,
        )
        .unwrap();
        let product = left.product(&arrow);

        assert_eq!(product.object_count(), 6);
        assert_eq!(product.identity("(A,0)").unwrap(), "id:(A,0)");
        assert_eq!(product.compose("(g,id:1)", "(f,u)").unwrap(), "(gf,u)");
        assert_eq!(product.compose("(f,u)", "id:(A,0)").unwrap(), "(f,u)");
        assert!(product.verify().is_ok());
    }

    #[test]
    fn test_slice_over_terminal_object() {
        let category = triangle();
        let slice = category.slice("C").unwrap();

        let objects: Vec<_> = slice.object_names().collect();
        assert_eq!(objects, ["id:C", "g", "gf"]);
        assert_eq!(slice.morphism("f:gf→g").unwrap().boundary(), "gf → g");
        assert_eq!(slice.compose("g:g→id:C", "f:gf→g").unwrap(), "gf:gf→id:C");
        assert!(slice.is_terminal("id:C"));
        assert!(slice.verify().is_ok());
        assert!(category.slice("missing").is_err());
    }
}
