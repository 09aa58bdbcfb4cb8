// Copyright 2025 Cowboy AI, LLC.

//! Standard small categories
//!
//! Each factory builds a fresh instance; nothing is cached or registered.

use super::finite_category::Category;
use super::materialize::{build_category, build_free_category};
use super::presentation::{ExplicitComposite, Presentation};
use crate::errors::CategoryResult;

/// The empty category `0`
pub fn empty() -> CategoryResult<Category> {
    build_category(&Presentation::builder("0").build()?, &[])
}

/// The terminal category `1`: one object `*`, only its identity
pub fn terminal() -> CategoryResult<Category> {
    build_category(&Presentation::builder("1").object("*").build()?, &[])
}

/// Only identities on the given objects
pub fn discrete<I, S>(objects: I) -> CategoryResult<Category>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let builder = Presentation::builder("Discrete").objects(objects);
    build_category(&builder.build()?, &[])
}

/// The walking arrow `2`: `u: 0 → 1`
pub fn arrow() -> CategoryResult<Category> {
    let presentation = Presentation::builder("2")
        .objects(["0", "1"])
        .generator("u", "0", "1")
        .build()?;
    build_category(&presentation, &[])
}

/// `f: 0 → 1` and `f⁻¹: 1 → 0`, mutually inverse
pub fn walking_isomorphism() -> CategoryResult<Category> {
    let presentation = Presentation::builder("Walking_Iso")
        .objects(["0", "1"])
        .generator("f", "0", "1")
        .generator("f⁻¹", "1", "0")
        .build()?;
    build_category(
        &presentation,
        &[
            ExplicitComposite::new("f⁻¹", "f", "id:0"),
            ExplicitComposite::new("f", "f⁻¹", "id:1"),
        ],
    )
}

/// Two parallel arrows `f, g: 0 ⇉ 1`
pub fn parallel_pair() -> CategoryResult<Category> {
    let presentation = Presentation::builder("Parallel")
        .objects(["0", "1"])
        .generator("f", "0", "1")
        .generator("g", "0", "1")
        .build()?;
    build_category(&presentation, &[])
}

/// `L ← C → R`
pub fn span() -> CategoryResult<Category> {
    let presentation = Presentation::builder("Span")
        .objects(["L", "C", "R"])
        .generator("f", "C", "L")
        .generator("g", "C", "R")
        .build()?;
    build_category(&presentation, &[])
}

/// `L → C ← R`
pub fn cospan() -> CategoryResult<Category> {
    let presentation = Presentation::builder("Cospan")
        .objects(["L", "C", "R"])
        .generator("f", "L", "C")
        .generator("g", "R", "C")
        .build()?;
    build_category(&presentation, &[])
}

/// The ordinal `[n]`: `0 → 1 → … → n` with every composite
///
/// Generators are `d{i}: i → i+1`; composites get canonical names such as
/// `d1∘d0`.
pub fn simplex(n: usize) -> CategoryResult<Category> {
    let mut builder = Presentation::builder(format!("[{n}]"));
    for i in 0..=n {
        builder = builder.object(i.to_string());
    }
    for i in 0..n {
        builder = builder.generator(format!("d{i}"), i.to_string(), (i + 1).to_string());
    }
    build_free_category(&builder.build()?, n.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_terminal() {
        let zero = empty().unwrap();
        assert_eq!(zero.object_count(), 0);
        assert_eq!(zero.morphism_count(), 0);

        let one = terminal().unwrap();
        assert_eq!(one.morphism_count(), 1);
        assert!(one.is_initial("*"));
        assert!(one.is_terminal("*"));
    }

    #[test]
    fn test_walking_isomorphism() {
        let iso = walking_isomorphism().unwrap();

        assert_eq!(iso.compose("f⁻¹", "f").unwrap(), "id:0");
        assert_eq!(iso.compose("f", "f⁻¹").unwrap(), "id:1");
        assert_eq!(iso.inverse_of("f"), Some("f⁻¹"));
        assert!(iso.is_isomorphism("f⁻¹"));
        assert!(iso.verify().is_ok());
    }

    #[test]
    fn test_simplex_is_complete_poset() {
        let simplex = simplex(3).unwrap();

        assert!(simplex.is_complete());
        // one morphism i → j for every i ≤ j
        assert_eq!(simplex.morphism_count(), 10);
        for i in 0..=3 {
            for j in i..=3 {
                assert_eq!(simplex.hom(&i.to_string(), &j.to_string()).len(), 1);
            }
        }
        assert!(simplex.is_initial("0"));
        assert!(simplex.is_terminal("3"));
    }

    #[test]
    fn test_factories_build_fresh_instances() {
        let a = arrow().unwrap();
        let b = arrow().unwrap();
        assert_ne!(a.id(), b.id());
        assert!(a.same_structure(&b));
    }
}
