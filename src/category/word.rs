// Copyright 2025 Cowboy AI, LLC.

//! Formal words - morphisms as sequences of generator names
//!
//! A word is stored in application order: `[f, g]` means "apply `f`, then
//! `g`" and renders as `g∘f`. The identity on an object is a distinct variant
//! rather than an empty sequence, so every identity knows which object it
//! belongs to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix of every synthesized identity morphism name
pub const IDENTITY_PREFIX: &str = "id:";

/// Separator used when rendering composite names
pub const COMPOSE_SEPARATOR: &str = "∘";

/// Name of the identity morphism on `object`
pub fn identity_name(object: &str) -> String {
    format!("{IDENTITY_PREFIX}{object}")
}

/// Whether `name` is reserved for a synthesized identity
pub fn is_identity_name(name: &str) -> bool {
    name.starts_with(IDENTITY_PREFIX)
}

/// A formal composite of generator names
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FormalWord {
    /// Identity on the named object
    Identity(String),

    /// Non-empty sequence of generators in application order
    Composite(Vec<String>),
}

impl FormalWord {
    /// Identity word on an object
    pub fn identity(object: impl Into<String>) -> Self {
        FormalWord::Identity(object.into())
    }

    /// Single-generator word
    pub fn generator(name: impl Into<String>) -> Self {
        FormalWord::Composite(vec![name.into()])
    }

    /// Build a word from factors in application order
    ///
    /// Identity factors are dropped; if nothing remains the result is the
    /// identity on `object`.
    pub fn from_factors<I, S>(object: impl Into<String>, factors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let factors: Vec<String> = factors
            .into_iter()
            .map(Into::into)
            .filter(|name| !is_identity_name(name))
            .collect();

        if factors.is_empty() {
            FormalWord::Identity(object.into())
        } else {
            FormalWord::Composite(factors)
        }
    }

    /// Diagrammatic composition: apply `self`, then `next`
    pub fn then(&self, next: &FormalWord) -> FormalWord {
        match (self, next) {
            (FormalWord::Identity(_), other) => other.clone(),
            (this, FormalWord::Identity(_)) => this.clone(),
            (FormalWord::Composite(first), FormalWord::Composite(second)) => {
                let mut factors = Vec::with_capacity(first.len() + second.len());
                factors.extend(first.iter().cloned());
                factors.extend(second.iter().cloned());
                FormalWord::Composite(factors)
            }
        }
    }

    /// Conventional composition `self ∘ inner`
    pub fn after(&self, inner: &FormalWord) -> FormalWord {
        inner.then(self)
    }

    /// Generator names in application order (empty for identities)
    pub fn factors(&self) -> &[String] {
        match self {
            FormalWord::Identity(_) => &[],
            FormalWord::Composite(factors) => factors,
        }
    }

    /// Number of generator factors
    pub fn len(&self) -> usize {
        self.factors().len()
    }

    /// Whether the word has no generator factors
    pub fn is_empty(&self) -> bool {
        self.is_identity()
    }

    /// Whether this is an identity word
    pub fn is_identity(&self) -> bool {
        matches!(self, FormalWord::Identity(_))
    }

    /// Canonical morphism name: `id:X`, `f`, or `h∘g∘f`
    pub fn canonical_name(&self) -> String {
        match self {
            FormalWord::Identity(object) => identity_name(object),
            FormalWord::Composite(factors) => {
                let mut names: Vec<&str> = factors.iter().map(String::as_str).collect();
                names.reverse();
                names.join(COMPOSE_SEPARATOR)
            }
        }
    }
}

impl fmt::Display for FormalWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_distinct_per_object() {
        let a = FormalWord::identity("A");
        let b = FormalWord::identity("B");
        assert_ne!(a, b);
        assert_eq!(a.canonical_name(), "id:A");
        assert!(a.is_identity());
        assert_eq!(a.len(), 0);
    }

    #[test]
    fn test_composition_renders_right_to_left() {
        let f = FormalWord::generator("f");
        let g = FormalWord::generator("g");
        let h = FormalWord::generator("h");

        let gf = f.then(&g);
        assert_eq!(gf.factors(), ["f".to_string(), "g".to_string()]);
        assert_eq!(gf.canonical_name(), "g∘f");
        assert_eq!(g.after(&f), gf);

        let hgf = gf.then(&h);
        assert_eq!(hgf.to_string(), "h∘g∘f");
        assert_eq!(hgf, f.then(&g.then(&h)));
    }

    #[test]
    fn test_identity_absorbed() {
        let f = FormalWord::generator("f");
        let id_a = FormalWord::identity("A");
        let id_b = FormalWord::identity("B");

        assert_eq!(id_a.then(&f), f);
        assert_eq!(f.then(&id_b), f);
        assert_eq!(id_a.then(&id_a), id_a);
    }

    #[test]
    fn test_from_factors_normalizes() {
        let word = FormalWord::from_factors("A", ["id:A", "f", "id:B", "g"]);
        assert_eq!(word.canonical_name(), "g∘f");

        let empty = FormalWord::from_factors("A", Vec::<String>::new());
        assert_eq!(empty, FormalWord::identity("A"));

        let only_ids = FormalWord::from_factors("C", ["id:C"]);
        assert_eq!(only_ids, FormalWord::identity("C"));
    }

    #[test]
    fn test_identity_name_helpers() {
        assert_eq!(identity_name("X"), "id:X");
        assert!(is_identity_name("id:X"));
        assert!(!is_identity_name("idX"));
    }
}
