//! End-to-end checks of the build-validate-freeze protocol

use ferrum_model::datatypes::{CodeableConcept, Coding, Extension, Identifier, Reference};
use ferrum_model::prelude::*;
use ferrum_model::primitive::{Boolean, Code, FhirString, Uri};
use ferrum_model::resource::{Account, Observation, ObservationValue};
use ferrum_model::{ErrorKind, ModelConfig, ReferenceDefect, ValidationError};

fn reference(literal: &str) -> Reference {
    Reference::builder()
        .reference(FhirString::of(literal).unwrap())
        .build()
        .unwrap()
}

fn identifier(value: &str) -> Identifier {
    Identifier::builder()
        .system(Uri::of("urn:example:accounts").unwrap())
        .value(FhirString::of(value).unwrap())
        .build()
        .unwrap()
}

fn concept(code: &str) -> CodeableConcept {
    CodeableConcept::builder()
        .coding([Coding::builder().code(Code::of(code).unwrap()).build().unwrap()])
        .build()
        .unwrap()
}

#[test]
fn required_lists_and_choice_survive_freeze() {
    let observation = Observation::builder()
        .status(Code::of("final").unwrap())
        .code(concept("8867-4"))
        .identifier([identifier("a"), identifier("b")])
        .value(FhirString::of("elevated").unwrap())
        .build()
        .unwrap();

    assert_eq!(observation.status().as_str(), Some("final"));
    let values: Vec<_> = observation
        .identifier()
        .iter()
        .filter_map(|id| id.value().and_then(|v| v.as_str()))
        .collect();
    assert_eq!(values, vec!["a", "b"]);
    match observation.value() {
        Some(ObservationValue::String(value)) => assert_eq!(value.as_str(), Some("elevated")),
        other => panic!("unexpected value: {:?}", other),
    }

    #[derive(Default)]
    struct Seen {
        depth: usize,
        identifiers: Vec<(Option<usize>, String)>,
        value_type: Option<&'static str>,
    }

    impl<'a> Visitor<'a> for Seen {
        fn visit_start(&mut self, name: &'static str, index: Option<usize>, node: &'a dyn Visitable) {
            self.depth += 1;
            // direct children of the root only
            if self.depth != 2 {
                return;
            }
            match name {
                "identifier" => {
                    let value = node
                        .downcast_ref::<Identifier>()
                        .and_then(|id| id.value())
                        .and_then(|v| v.as_str())
                        .unwrap_or_default();
                    self.identifiers.push((index, value.to_string()));
                }
                "value" => self.value_type = Some(node.type_name()),
                _ => {}
            }
        }

        fn visit_end(&mut self, _name: &'static str, _index: Option<usize>, _node: &'a dyn Visitable) {
            self.depth -= 1;
        }
    }

    let mut seen = Seen::default();
    walk(&observation, &mut seen);
    assert_eq!(
        seen.identifiers,
        vec![(Some(0), "a".to_string()), (Some(1), "b".to_string())]
    );
    assert_eq!(seen.value_type, Some("string"));
}

#[test]
fn missing_required_field_names_its_path() {
    let err = Account::builder()
        .identifier([identifier("a")])
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        ValidationError::MissingRequiredField {
            path: "Account.status".to_string()
        }
    );
    assert_eq!(err.to_string(), "Missing required element: 'Account.status'");
}

#[test]
fn reference_targets_are_enforced() {
    let builder = Observation::builder()
        .status(Code::of("final").unwrap())
        .code(concept("x"));

    let ok = builder.clone().subject(reference("Patient/123")).build();
    assert!(ok.is_ok());

    let err = builder.subject(reference("Specimen/123")).build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ReferenceTargetViolation);
    assert_eq!(err.path(), "Observation.subject");
    match err {
        ValidationError::ReferenceTargetViolation { defect, reference, .. } => {
            assert_eq!(reference, "Specimen/123");
            assert!(matches!(
                defect,
                ReferenceDefect::TargetNotAllowed { ref found, .. } if found == "Specimen"
            ));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn reference_checks_can_be_switched_off() {
    let config = ModelConfig::builder().check_reference_types(false).build();
    let observation = Observation::builder()
        .status(Code::of("final").unwrap())
        .code(concept("x"))
        .subject(reference("Specimen/123"))
        .build_with(&config)
        .unwrap();
    assert_eq!(
        observation
            .subject()
            .and_then(|s| s.reference())
            .and_then(|r| r.as_str()),
        Some("Specimen/123")
    );
}

#[test]
fn empty_element_needs_a_value_or_extension() {
    let err = Reference::builder().build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyElementViolation);
    assert_eq!(err.path(), "Reference");

    let flagged = Reference::builder()
        .extension([Extension::builder()
            .url("http://example.org/flag")
            .value(Boolean::of(true).unwrap())
            .build()
            .unwrap()])
        .build()
        .unwrap();
    assert!(flagged.has_children());
    assert!(flagged.reference().is_none());
}

#[test]
fn list_holes_are_reported_with_their_index() {
    let err = Account::builder()
        .status(Code::of("active").unwrap())
        .identifier([Some(identifier("a")), None, Some(identifier("c"))])
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedList);
    match err {
        ValidationError::MalformedList { path, index, .. } => {
            assert_eq!(path, "Account.identifier");
            assert_eq!(index, 1);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn copy_with_leaves_the_original_untouched() {
    let original = Account::builder()
        .status(Code::of("active").unwrap())
        .name(FhirString::of("Household").unwrap())
        .build()
        .unwrap();

    let renamed = original
        .to_builder()
        .name(FhirString::of("Renamed").unwrap())
        .build()
        .unwrap();

    assert_eq!(original.name().and_then(|n| n.as_str()), Some("Household"));
    assert_eq!(renamed.name().and_then(|n| n.as_str()), Some("Renamed"));
    assert_eq!(renamed.status(), original.status());
    assert_eq!(original.to_builder().build().unwrap(), original);
}

#[test]
fn failed_build_keeps_builder_usable() {
    let builder = Account::builder().name(FhirString::of("Pending").unwrap());
    assert!(builder.build().is_err());

    let account = builder.status(Code::of("active").unwrap()).build().unwrap();
    assert_eq!(account.name().and_then(|n| n.as_str()), Some("Pending"));
}
