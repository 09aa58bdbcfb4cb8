// Copyright 2025 Cowboy AI, LLC.

//! Naturality of a transformation

use super::{Checkable, Law, LawSuite, Violation, Witness};
use crate::category::NaturalTransformation;

/// `G(f) ∘ α_A = α_B ∘ F(f)` for every generator `f: A → B` of the source
///
/// Every source object must have a component. A square whose composites are
/// not in the target table counts as a violation.
pub struct NaturalityLaw;

impl Law<NaturalTransformation> for NaturalityLaw {
    fn name(&self) -> &str {
        "naturality"
    }

    fn description(&self) -> &str {
        "G(f) ∘ α_A = α_B ∘ F(f) for every generator f: A → B"
    }

    fn check(&self, alpha: &NaturalTransformation) -> Vec<Violation> {
        let domain = alpha.domain();
        let codomain = alpha.codomain();
        let f_functor = alpha.source_functor();
        let g_functor = alpha.target_functor();
        let mut violations = Vec::new();

        for object in domain.object_names() {
            if alpha.component(object).is_err() {
                violations.push(Violation::new(
                    self.name(),
                    NaturalTransformation::KIND,
                    Witness::Component {
                        object: object.to_string(),
                    },
                    format!("{} has no component at {object}", alpha.name()),
                ));
            }
        }

        for f in domain.generators() {
            let (Ok(alpha_a), Ok(alpha_b)) = (alpha.component(&f.source), alpha.component(&f.target))
            else {
                continue;
            };
            let witness = Witness::Square {
                morphism: f.name.clone(),
                source: f.source.clone(),
                target: f.target.clone(),
            };
            let images = f_functor
                .map_morphism(&f.name)
                .and_then(|ff| Ok((ff, g_functor.map_morphism(&f.name)?)));
            let (ff, gf) = match images {
                Ok(images) => images,
                Err(err) => {
                    violations.push(Violation::new(
                        self.name(),
                        NaturalTransformation::KIND,
                        witness,
                        err.to_string(),
                    ));
                    continue;
                }
            };

            let upper = codomain.composite(gf, alpha_a);
            let lower = codomain.composite(alpha_b, ff);
            let message = match (upper, lower) {
                (Some(upper), Some(lower)) if upper == lower => continue,
                (Some(upper), Some(lower)) => {
                    format!("{gf} ∘ {alpha_a} = {upper} but {alpha_b} ∘ {ff} = {lower}")
                }
                (None, _) => format!("{gf} ∘ {alpha_a} is undefined"),
                (Some(_), None) => format!("{alpha_b} ∘ {ff} is undefined"),
            };

            let mut violation =
                Violation::new(self.name(), NaturalTransformation::KIND, witness, message);
            if let Some(upper) = upper {
                violation = violation.with_values(upper, lower.map(str::to_string));
            }
            violations.push(violation);
        }

        violations
    }
}

/// The single naturality law
pub fn naturality_laws() -> LawSuite<NaturalTransformation> {
    LawSuite::new("naturality_laws").with_law(NaturalityLaw)
}
