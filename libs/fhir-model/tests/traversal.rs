//! Traversal completeness: a visitor that renders the tree as JSON sees every
//! node, and its start/end callbacks balance

use ferrum_model::datatypes::{CodeableConcept, Coding, Extension, Meta, Quantity, Reference};
use ferrum_model::prelude::*;
use ferrum_model::primitive::{
    Boolean, Canonical, Code, Decimal, FhirString, Id, PositiveInt, Uri, ValueRef,
};
use ferrum_model::resource::{Account, AccountCoverage, AnyResource, Observation, Patient};
use ferrum_model::schema::TypeKind;
use rust_decimal::Decimal as RustDecimal;
use serde_json::{json, Map, Value};

/// Renders a tree as FHIR-ish JSON, collapsing primitives to their value
#[derive(Default)]
struct JsonWriter {
    stack: Vec<Map<String, Value>>,
    lists_open: usize,
    started: usize,
    ended: usize,
    root: Option<Value>,
}

impl<'a> Visitor<'a> for JsonWriter {
    fn visit_start(&mut self, _name: &'static str, _index: Option<usize>, node: &'a dyn Visitable) {
        self.started += 1;
        let mut object = Map::new();
        if node.is_resource() {
            object.insert("resourceType".to_string(), json!(node.type_name()));
        }
        self.stack.push(object);
    }

    fn visit_value(&mut self, name: &'static str, value: ValueRef<'a>) {
        let value = match value {
            ValueRef::Boolean(b) => json!(b),
            ValueRef::Integer(i) => json!(i),
            other => json!(other.to_string()),
        };
        let top = self.stack.last_mut().expect("value outside a node");
        top.insert(name.to_string(), value);
    }

    fn visit_list_start(&mut self, name: &'static str, _len: usize, _item_type: &'static str) {
        self.lists_open += 1;
        let top = self.stack.last_mut().expect("list outside a node");
        top.insert(name.to_string(), Value::Array(Vec::new()));
    }

    fn visit_list_end(&mut self, _name: &'static str, _len: usize, _item_type: &'static str) {
        self.lists_open -= 1;
    }

    fn visit_end(&mut self, name: &'static str, index: Option<usize>, node: &'a dyn Visitable) {
        self.ended += 1;
        let mut object = self.stack.pop().expect("unbalanced visit_end");
        let value = if node.type_info().kind == TypeKind::PrimitiveType && object.len() == 1 {
            object.remove("value").unwrap_or(Value::Null)
        } else {
            Value::Object(object)
        };

        match self.stack.last_mut() {
            None => self.root = Some(value),
            Some(parent) => match index {
                Some(_) => parent
                    .get_mut(name)
                    .and_then(Value::as_array_mut)
                    .expect("list item before list start")
                    .push(value),
                None => {
                    parent.insert(name.to_string(), value);
                }
            },
        }
    }
}

fn reference(literal: &str) -> Reference {
    Reference::builder()
        .reference(FhirString::of(literal).unwrap())
        .build()
        .unwrap()
}

fn observation() -> Observation {
    Observation::builder()
        .id(Id::of("bp").unwrap())
        .status(Code::of("final").unwrap())
        .code(
            CodeableConcept::builder()
                .coding([Coding::builder()
                    .system(Uri::of("http://loinc.org").unwrap())
                    .code(Code::of("8867-4").unwrap())
                    .build()
                    .unwrap()])
                .build()
                .unwrap(),
        )
        .subject(reference("Patient/p1"))
        .value(
            Quantity::builder()
                .value(Decimal::of(RustDecimal::new(72, 0)).unwrap())
                .unit(FhirString::of("beats/minute").unwrap())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

fn patient() -> Patient {
    Patient::builder()
        .id(Id::of("pt").unwrap())
        .active(Boolean::of(true).unwrap())
        .build()
        .unwrap()
}

fn flag(url: &str) -> Extension {
    Extension::builder()
        .url(url)
        .value(Boolean::of(true).unwrap())
        .build()
        .unwrap()
}

fn account() -> Account {
    Account::builder()
        .meta(
            Meta::builder()
                .profile([Canonical::of("http://example.org/acct").unwrap()])
                .build()
                .unwrap(),
        )
        .status(Code::of("active").unwrap())
        .contained([AnyResource::from(observation()), AnyResource::from(patient())])
        .extension([flag("http://example.org/vip")])
        .subject([reference("Patient/p1"), reference("#pt")])
        .coverage([AccountCoverage::builder()
            .coverage(reference("Coverage/c1"))
            .priority(PositiveInt::of(1).unwrap())
            .build()
            .unwrap()])
        .build()
        .unwrap()
}

#[test]
fn json_writer_renders_whole_tree() {
    let account = account();
    let mut writer = JsonWriter::default();
    walk(&account, &mut writer);

    assert!(writer.stack.is_empty());
    assert_eq!(writer.lists_open, 0);
    assert_eq!(writer.started, writer.ended);

    let expected = json!({
        "resourceType": "Account",
        "meta": {
            "profile": ["http://example.org/acct"]
        },
        "contained": [{
            "resourceType": "Observation",
            "id": "bp",
            "status": "final",
            "code": {
                "coding": [{
                    "system": "http://loinc.org",
                    "code": "8867-4"
                }]
            },
            "subject": { "reference": "Patient/p1" },
            "value": {
                "value": "72",
                "unit": "beats/minute"
            }
        }, {
            "resourceType": "Patient",
            "id": "pt",
            "active": true
        }],
        "extension": [{
            "url": "http://example.org/vip",
            "value": true
        }],
        "status": "active",
        "subject": [
            { "reference": "Patient/p1" },
            { "reference": "#pt" }
        ],
        "coverage": [{
            "coverage": { "reference": "Coverage/c1" },
            "priority": 1
        }]
    });
    assert_eq!(writer.root, Some(expected));
}

#[test]
fn every_node_is_visited_exactly_once() {
    let account = account();
    let mut writer = JsonWriter::default();
    walk(&account, &mut writer);

    // Account 1, meta 2, Observation 12, Patient 3, extension 2, status 1,
    // subject 4, coverage 4
    assert_eq!(writer.started, 29);
    assert_eq!(writer.ended, 29);
}

#[test]
fn modifier_extensions_are_visited_apart_from_extensions() {
    #[derive(Default)]
    struct Extensions {
        depth: usize,
        lists: Vec<(&'static str, usize, &'static str)>,
        entered: Vec<(usize, &'static str, Option<usize>, String)>,
    }

    impl<'a> Visitor<'a> for Extensions {
        fn visit_start(&mut self, name: &'static str, index: Option<usize>, node: &'a dyn Visitable) {
            self.depth += 1;
            if let Some(extension) = node.downcast_ref::<Extension>() {
                self.entered
                    .push((self.depth, name, index, extension.url().to_string()));
            }
        }

        fn visit_list_start(&mut self, name: &'static str, len: usize, item_type: &'static str) {
            self.lists.push((name, len, item_type));
        }

        fn visit_end(&mut self, _name: &'static str, _index: Option<usize>, _node: &'a dyn Visitable) {
            self.depth -= 1;
        }
    }

    let coverage = AccountCoverage::builder()
        .coverage(reference("Coverage/c1"))
        .extension([flag("http://example.org/note")])
        .modifier_extension([flag("http://example.org/suspended"), flag("http://example.org/disputed")])
        .build()
        .unwrap();
    let account = Account::builder()
        .status(Code::of("active").unwrap())
        .extension([flag("http://example.org/vip")])
        .modifier_extension([flag("http://example.org/on-hold")])
        .coverage([coverage])
        .build()
        .unwrap();

    let mut seen = Extensions::default();
    walk(&account, &mut seen);

    assert_eq!(seen.depth, 0);
    let extension_lists: Vec<_> = seen
        .lists
        .iter()
        .filter(|(name, _, _)| name.ends_with("xtension"))
        .copied()
        .collect();
    assert_eq!(
        extension_lists,
        vec![
            ("extension", 1, "Extension"),
            ("modifierExtension", 1, "Extension"),
            ("extension", 1, "Extension"),
            ("modifierExtension", 2, "Extension"),
        ]
    );
    assert_eq!(
        seen.entered,
        vec![
            (2, "extension", Some(0), "http://example.org/vip".to_string()),
            (2, "modifierExtension", Some(0), "http://example.org/on-hold".to_string()),
            (3, "extension", Some(0), "http://example.org/note".to_string()),
            (3, "modifierExtension", Some(0), "http://example.org/suspended".to_string()),
            (3, "modifierExtension", Some(1), "http://example.org/disputed".to_string()),
        ]
    );
}

#[test]
fn pruned_subtrees_still_balance() {
    #[derive(Default)]
    struct Pruning {
        depth: usize,
        max_depth: usize,
        entered: Vec<&'static str>,
    }

    impl<'a> Visitor<'a> for Pruning {
        fn pre_visit(&mut self, node: &'a dyn Visitable) -> bool {
            !node.is::<Extension>()
        }

        fn visit_start(&mut self, _name: &'static str, _index: Option<usize>, node: &'a dyn Visitable) {
            self.depth += 1;
            self.max_depth = self.max_depth.max(self.depth);
            self.entered.push(node.type_name());
        }

        fn visit(&mut self, _name: &'static str, _index: Option<usize>, node: &'a dyn Visitable) -> bool {
            // stay out of contained resources
            !(node.is_resource() && self.depth > 1)
        }

        fn visit_end(&mut self, _name: &'static str, _index: Option<usize>, _node: &'a dyn Visitable) {
            self.depth -= 1;
        }
    }

    let account = account();
    let mut pruning = Pruning::default();
    walk(&account, &mut pruning);

    assert_eq!(pruning.depth, 0);
    assert!(!pruning.entered.contains(&"Extension"));
    assert!(!pruning.entered.contains(&"Quantity"));
    // the contained Observation is entered but not descended into
    assert_eq!(
        pruning.entered.iter().filter(|t| **t == "Observation").count(),
        1
    );
    assert!(pruning.max_depth >= 4);
}
