// Copyright 2025 Cowboy AI, LLC.

//! Category axioms as laws

use super::{Checkable, Law, LawSuite, Side, Violation, Witness};
use crate::category::{Category, Morphism};

/// Every object's identity is an endomorphism on that object
pub struct IdentityEndomorphismLaw;

impl Law<Category> for IdentityEndomorphismLaw {
    fn name(&self) -> &str {
        "identity_endomorphism"
    }

    fn description(&self) -> &str {
        "identities[X] exists and is a morphism X → X"
    }

    fn check(&self, category: &Category) -> Vec<Violation> {
        let mut violations = Vec::new();

        for object in category.object_names() {
            let witness = Witness::Object {
                name: object.to_string(),
            };
            let Ok(id) = category.identity(object) else {
                violations.push(Violation::new(
                    self.name(),
                    Category::KIND,
                    witness,
                    format!("object {object} has no identity"),
                ));
                continue;
            };
            match category.morphism(id) {
                Ok(m) if m.source == object && m.target == object => {}
                Ok(m) => violations.push(
                    Violation::new(
                        self.name(),
                        Category::KIND,
                        witness,
                        format!("identity {id} is {} instead of {object} → {object}", m.boundary()),
                    )
                    .with_values(format!("{object} → {object}"), Some(m.boundary())),
                ),
                Err(_) => violations.push(Violation::new(
                    self.name(),
                    Category::KIND,
                    witness,
                    format!("identity {id} is not a morphism of the category"),
                )),
            }
        }

        violations
    }
}

/// `f ∘ id_A = f` and `id_B ∘ f = f` for every `f: A → B`
pub struct IdentityLaw;

impl IdentityLaw {
    fn check_side(
        &self,
        category: &Category,
        m: &Morphism,
        side: Side,
        violations: &mut Vec<Violation>,
    ) {
        let object = match side {
            Side::Right => &m.source,
            Side::Left => &m.target,
        };
        // A missing identity is reported by the endomorphism law
        let Ok(id) = category.identity(object) else {
            return;
        };
        let (actual, composite) = match side {
            Side::Right => (category.composite(&m.name, id), format!("{} ∘ {id}", m.name)),
            Side::Left => (category.composite(id, &m.name), format!("{id} ∘ {}", m.name)),
        };
        if actual == Some(m.name.as_str()) {
            return;
        }

        let message = match actual {
            Some(other) => format!("{composite} is {other}, not {}", m.name),
            None => format!("{composite} is undefined"),
        };
        violations.push(
            Violation::new(
                self.name(),
                Category::KIND,
                Witness::Morphism {
                    name: m.name.clone(),
                    side: Some(side),
                },
                message,
            )
            .with_values(m.name.clone(), actual.map(str::to_string)),
        );
    }
}

impl Law<Category> for IdentityLaw {
    fn name(&self) -> &str {
        "identity"
    }

    fn description(&self) -> &str {
        "composing with an identity on either side leaves a morphism unchanged"
    }

    fn check(&self, category: &Category) -> Vec<Violation> {
        let mut violations = Vec::new();
        for m in category.morphisms() {
            self.check_side(category, m, Side::Right, &mut violations);
            self.check_side(category, m, Side::Left, &mut violations);
        }
        violations
    }
}

/// `h ∘ (g ∘ f) = (h ∘ g) ∘ f` for composable non-identity triples
///
/// Triples whose outer composites are missing count as violations only when
/// the category is complete; a truncated free category is expected to lack
/// them.
pub struct AssociativityLaw;

impl Law<Category> for AssociativityLaw {
    fn name(&self) -> &str {
        "associativity"
    }

    fn description(&self) -> &str {
        "h ∘ (g ∘ f) equals (h ∘ g) ∘ f"
    }

    fn check(&self, category: &Category) -> Vec<Violation> {
        let complete = category.is_complete();
        let mut violations = Vec::new();

        for f in category.morphisms().filter(|m| !m.is_identity()) {
            for g in category.morphisms_from(&f.target) {
                if g.is_identity() {
                    continue;
                }
                let Some(gf) = category.composite(&g.name, &f.name) else {
                    continue;
                };
                for h in category.morphisms_from(&g.target) {
                    if h.is_identity() {
                        continue;
                    }
                    let Some(hg) = category.composite(&h.name, &g.name) else {
                        continue;
                    };

                    let left = category.composite(&h.name, gf);
                    let right = category.composite(hg, &f.name);
                    let witness = Witness::Triple {
                        first: f.name.clone(),
                        second: g.name.clone(),
                        third: h.name.clone(),
                    };

                    match (left, right) {
                        (Some(left), Some(right)) if left == right => {}
                        (Some(left), Some(right)) => violations.push(
                            Violation::new(
                                self.name(),
                                Category::KIND,
                                witness,
                                format!(
                                    "{} ∘ {gf} = {left} but {hg} ∘ {} = {right}",
                                    h.name, f.name
                                ),
                            )
                            .with_values(left, Some(right.to_string())),
                        ),
                        (left, right) if complete => {
                            let message = match (left, right) {
                                (None, None) => format!(
                                    "neither {} ∘ {gf} nor {hg} ∘ {} is defined",
                                    h.name, f.name
                                ),
                                (None, Some(_)) => format!("{} ∘ {gf} is undefined", h.name),
                                _ => format!("{hg} ∘ {} is undefined", f.name),
                            };
                            let mut violation =
                                Violation::new(self.name(), Category::KIND, witness, message);
                            if let Some(defined) = left.or(right) {
                                violation = violation.with_values(defined, None);
                            }
                            violations.push(violation);
                        }
                        _ => {}
                    }
                }
            }
        }

        violations
    }
}

/// Identity endomorphisms, identity and associativity, in that order
pub fn category_laws() -> LawSuite<Category> {
    LawSuite::new("category_laws")
        .with_law(IdentityEndomorphismLaw)
        .with_law(IdentityLaw)
        .with_law(AssociativityLaw)
}
