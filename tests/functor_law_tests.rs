// Copyright 2025 Cowboy AI, LLC.

use std::sync::Arc;

use cim_category::{
    build_category, standard, Category, ExplicitComposite, Functor, Presentation, StructureError,
    StructureKind, Witness,
};
use pretty_assertions::assert_eq;

/// `A → B → C` with `g ∘ f` and an extra `h: A → C`
fn triangle_with_shortcut() -> Arc<Category> {
    let presentation = Presentation::builder("Shortcut")
        .objects(["A", "B", "C"])
        .generator("f", "A", "B")
        .generator("g", "B", "C")
        .generator("h", "A", "C")
        .build()
        .expect("valid presentation");
    Arc::new(
        build_category(&presentation, &[ExplicitComposite::new("g", "f", "gf")])
            .expect("materialized"),
    )
}

/// Test collapsing every object onto the point preserves all structure
#[test]
fn collapse_to_terminal_is_lawful() {
    let source = Arc::new(standard::walking_isomorphism().expect("iso"));
    let point = Arc::new(standard::terminal().expect("terminal"));

    let functor = Functor::builder("Collapse", Arc::clone(&source), point)
        .map_objects([("0", "*"), ("1", "*")])
        .and_then(|b| b.map_morphisms(source.morphisms().map(|m| (m.name.clone(), "id:*"))))
        .and_then(|b| b.build())
        .expect("functor");

    let report = functor.verify();
    assert!(report.is_ok(), "{report}");
    assert_eq!(report.kind, StructureKind::Functor);
    assert_eq!(report.structure, "Collapse");
}

/// Test sending an identity to a non-identity endomorphism is reported
#[test]
fn identity_sent_to_idempotent_is_a_violation() {
    let presentation = Presentation::builder("Idempotent")
        .object("A")
        .generator("e", "A", "A")
        .build()
        .expect("valid presentation");
    let target = Arc::new(
        build_category(&presentation, &[ExplicitComposite::new("e", "e", "e")])
            .expect("materialized"),
    );
    let point = Arc::new(standard::terminal().expect("terminal"));

    let functor = Functor::builder("Pick", point, target)
        .map_object("*", "A")
        .and_then(|b| b.map_morphism("id:*", "e"))
        .and_then(|b| b.build())
        .expect("boundaries agree");

    let report = functor.verify();
    assert_eq!(report.violation_count(), 1);
    let violation = &report.violations[0];
    assert_eq!(violation.law, "identity_preservation");
    assert_eq!(
        violation.witness,
        Witness::Object {
            name: "*".to_string()
        }
    );
    assert_eq!(violation.expected.as_deref(), Some("id:A"));
    assert_eq!(violation.actual.as_deref(), Some("e"));
}

/// Test a functor that breaks one composite is caught by composition preservation
///
/// ```mermaid
/// graph LR
///     A -->|f| B
///     B -->|g| C
///     A -->|"gf ↦ h"| C
/// ```
#[test]
fn composite_sent_elsewhere_is_a_violation() {
    let source_presentation = Presentation::builder("T")
        .objects(["A", "B", "C"])
        .generator("f", "A", "B")
        .generator("g", "B", "C")
        .build()
        .expect("valid presentation");
    let source = Arc::new(
        build_category(&source_presentation, &[ExplicitComposite::new("g", "f", "gf")])
            .expect("materialized"),
    );

    let functor = Functor::builder("Skew", source, triangle_with_shortcut())
        .map_objects([("A", "A"), ("B", "B"), ("C", "C")])
        .and_then(|b| b.map_morphisms([("f", "f"), ("g", "g"), ("gf", "h")]))
        .and_then(|b| b.map_identities())
        .and_then(|b| b.build())
        .expect("boundaries agree");

    let report = functor.verify();
    assert_eq!(report.violation_count(), 1);
    let violation = &report.violations[0];
    assert_eq!(violation.law, "composition_preservation");
    assert_eq!(
        violation.witness,
        Witness::Pair {
            second: "g".to_string(),
            first: "f".to_string(),
        }
    );
    assert_eq!(violation.expected.as_deref(), Some("h"));
    assert_eq!(violation.actual.as_deref(), Some("gf"));
}

/// Test identities are only mapped when asked for
#[test]
fn identities_are_not_mapped_implicitly() {
    let arrow = Arc::new(standard::arrow().expect("arrow"));

    let err = Functor::builder("F", Arc::clone(&arrow), Arc::clone(&arrow))
        .map_objects([("0", "0"), ("1", "1")])
        .and_then(|b| b.map_morphism("u", "u"))
        .and_then(|b| b.build())
        .expect_err("identities missing");
    assert_eq!(
        err,
        StructureError::IncompleteMap {
            kind: "morphism".to_string(),
            owner: "F".to_string(),
            missing: vec!["id:0".to_string(), "id:1".to_string()],
        }
    );
}

/// Test composing functors and mapping paths through the composite
#[test]
fn functor_composition_maps_paths() {
    let iso = Arc::new(standard::walking_isomorphism().expect("iso"));
    let swap = Functor::builder("Swap", Arc::clone(&iso), Arc::clone(&iso))
        .map_objects([("0", "1"), ("1", "0")])
        .and_then(|b| b.map_morphisms([("f", "f⁻¹"), ("f⁻¹", "f")]))
        .and_then(|b| b.map_identities())
        .and_then(|b| b.build())
        .expect("swap");
    assert!(swap.verify().is_ok());

    let twice = swap.then(&swap).expect("composable");
    assert_eq!(twice.name(), "Swap∘Swap");
    assert_eq!(twice.map_object("0").expect("mapped"), "0");
    assert_eq!(twice.map_path(&["f", "f⁻¹"]).expect("mapped"), ["f", "f⁻¹"]);
    assert!(twice.verify().is_ok());
}
