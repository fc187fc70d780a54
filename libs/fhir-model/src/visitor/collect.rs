use std::marker::PhantomData;

use super::{walk, Visitable, Visitor};

/// Gathers every node of concrete type `T`, in traversal order
pub struct CollectingVisitor<'a, T> {
    found: Vec<&'a T>,
    _type: PhantomData<fn() -> T>,
}

impl<'a, T: Visitable> CollectingVisitor<'a, T> {
    pub fn new() -> Self {
        Self {
            found: Vec::new(),
            _type: PhantomData,
        }
    }

    pub fn found(&self) -> &[&'a T] {
        &self.found
    }

    pub fn into_found(self) -> Vec<&'a T> {
        self.found
    }
}

impl<'a, T: Visitable> Default for CollectingVisitor<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Visitable> Visitor<'a> for CollectingVisitor<'a, T> {
    fn visit_start(&mut self, _name: &'static str, _index: Option<usize>, node: &'a dyn Visitable) {
        if let Some(found) = node.downcast_ref::<T>() {
            self.found.push(found);
        }
    }
}

/// All nodes of type `T` in the tree under `root`, the root included
pub fn collect<T: Visitable>(root: &dyn Visitable) -> Vec<&T> {
    let mut collector = CollectingVisitor::new();
    walk(root, &mut collector);
    collector.into_found()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::{CodeableConcept, Coding, Reference};
    use crate::prelude::*;
    use crate::primitive::{Code, FhirString, Id};
    use crate::resource::{Account, AccountCoverage, Observation};

    fn reference(literal: &str) -> Reference {
        Reference::builder()
            .reference(FhirString::of(literal).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_collects_nested_and_contained() {
        let observation = Observation::builder()
            .id(Id::of("obs-1").unwrap())
            .status(Code::of("final").unwrap())
            .code(
                CodeableConcept::builder()
                    .coding([Coding::builder().code(Code::of("x").unwrap()).build().unwrap()])
                    .build()
                    .unwrap(),
            )
            .subject(reference("Patient/p1"))
            .build()
            .unwrap();
        let account = Account::builder()
            .status(Code::of("active").unwrap())
            .contained([observation])
            .subject([reference("Patient/p1")])
            .coverage([AccountCoverage::builder()
                .coverage(reference("Coverage/c1"))
                .build()
                .unwrap()])
            .build()
            .unwrap();

        let references = collect::<Reference>(&account);
        let literals: Vec<_> = references
            .iter()
            .filter_map(|r| r.reference().and_then(|l| l.as_str()))
            .collect();
        // contained first, then subject, then coverage
        assert_eq!(literals, vec!["Patient/p1", "Patient/p1", "Coverage/c1"]);

        let observations = collect::<Observation>(&account);
        assert_eq!(observations.len(), 1);
        assert_eq!(collect::<Coding>(&account).len(), 1);
    }

    #[test]
    fn test_root_is_collected() {
        let coding = Coding::builder().code(Code::of("a").unwrap()).build().unwrap();
        let found = collect::<Coding>(&coding);
        assert_eq!(found, vec![&coding]);
    }
}
