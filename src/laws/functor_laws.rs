// Copyright 2025 Cowboy AI, LLC.

//! Functor laws: identities and composites are preserved

use super::{Checkable, Law, LawSuite, Violation, Witness};
use crate::category::Functor;

/// `F(id_X) = id_F(X)` for every source object
pub struct IdentityPreservationLaw;

impl Law<Functor> for IdentityPreservationLaw {
    fn name(&self) -> &str {
        "identity_preservation"
    }

    fn description(&self) -> &str {
        "F(id_X) = id_F(X)"
    }

    fn check(&self, functor: &Functor) -> Vec<Violation> {
        let source = functor.source_category();
        let target = functor.target_category();
        let mut violations = Vec::new();

        for (object, id) in source.identities() {
            let witness = Witness::Object {
                name: object.to_string(),
            };
            let expected = match functor.map_object(object).and_then(|fx| target.identity(fx)) {
                Ok(expected) => expected,
                Err(err) => {
                    violations.push(Violation::new(self.name(), Functor::KIND, witness, err.to_string()));
                    continue;
                }
            };
            match functor.map_morphism(id) {
                Ok(actual) if actual == expected => {}
                Ok(actual) => violations.push(
                    Violation::new(
                        self.name(),
                        Functor::KIND,
                        witness,
                        format!("{}({id}) is {actual}, not {expected}", functor.name()),
                    )
                    .with_values(expected, Some(actual.to_string())),
                ),
                Err(err) => violations.push(
                    Violation::new(self.name(), Functor::KIND, witness, err.to_string())
                        .with_values(expected, None),
                ),
            }
        }

        violations
    }
}

/// `F(g ∘ f) = F(g) ∘ F(f)` for every entry of the source table
pub struct CompositionPreservationLaw;

impl Law<Functor> for CompositionPreservationLaw {
    fn name(&self) -> &str {
        "composition_preservation"
    }

    fn description(&self) -> &str {
        "F(g ∘ f) = F(g) ∘ F(f)"
    }

    fn check(&self, functor: &Functor) -> Vec<Violation> {
        let source = functor.source_category();
        let target = functor.target_category();
        let mut violations = Vec::new();

        for ((g, f), gf) in source.composition_table() {
            let witness = Witness::Pair {
                second: g.to_string(),
                first: f.to_string(),
            };
            let images = functor.map_morphism(g).and_then(|fg| {
                let ff = functor.map_morphism(f)?;
                let fgf = functor.map_morphism(gf)?;
                Ok((fg, ff, fgf))
            });
            let (fg, ff, expected) = match images {
                Ok(images) => images,
                Err(err) => {
                    violations.push(Violation::new(self.name(), Functor::KIND, witness, err.to_string()));
                    continue;
                }
            };

            let actual = target.composite(fg, ff);
            if actual == Some(expected) {
                continue;
            }
            let message = match actual {
                Some(actual) => format!(
                    "{name}({gf}) = {expected} but {fg} ∘ {ff} = {actual}",
                    name = functor.name()
                ),
                None => format!(
                    "{name}({gf}) = {expected} but {fg} ∘ {ff} is undefined",
                    name = functor.name()
                ),
            };
            violations.push(
                Violation::new(self.name(), Functor::KIND, witness, message)
                    .with_values(expected, actual.map(str::to_string)),
            );
        }

        violations
    }
}

/// Identity preservation, then composition preservation
pub fn functor_laws() -> LawSuite<Functor> {
    LawSuite::new("functor_laws")
        .with_law(IdentityPreservationLaw)
        .with_law(CompositionPreservationLaw)
}
