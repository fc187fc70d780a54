//! Pull-style traversal
//!
//! [`nodes`] yields `(path, node)` pairs in the same depth-first pre-order as
//! [`super::walk`]. Paths are dotted field names from the root type with list
//! positions in brackets, e.g. `Account.coverage[0].coverage`. Scalar payloads
//! are not nodes and are not yielded.

use smallvec::SmallVec;

use super::{Child, Children, Visitable};

type Frame<'a> = (String, &'a dyn Visitable);

pub struct NodeIter<'a> {
    stack: SmallVec<[Frame<'a>; 16]>,
}

/// Iterate over every node under `root`, the root first
pub fn nodes(root: &dyn Visitable) -> NodeIter<'_> {
    let mut stack = SmallVec::new();
    stack.push((root.type_name().to_string(), root));
    NodeIter { stack }
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = (String, &'a dyn Visitable);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, node) = self.stack.pop()?;

        let mut children = Children::new();
        node.children(&mut children);

        // pushed in reverse so the first declared child pops next
        let mut pending: SmallVec<[Frame<'a>; 16]> = SmallVec::new();
        for (name, child) in children.into_entries() {
            match child {
                Child::Node(child) => pending.push((format!("{}.{}", path, name), child)),
                Child::List { items, .. } => {
                    for (index, item) in items.into_iter().enumerate() {
                        pending.push((format!("{}.{}[{}]", path, name, index), item));
                    }
                }
                Child::Value(_) => {}
            }
        }
        self.stack.extend(pending.into_iter().rev());

        Some((path, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::Reference;
    use crate::prelude::*;
    use crate::primitive::{Code, FhirString, PositiveInt};
    use crate::resource::{Account, AccountCoverage};
    use crate::visitor::{walk, Visitor};

    fn account() -> Account {
        let coverage = |literal: &str, priority: i32| {
            AccountCoverage::builder()
                .coverage(
                    Reference::builder()
                        .reference(FhirString::of(literal).unwrap())
                        .build()
                        .unwrap(),
                )
                .priority(PositiveInt::of(priority).unwrap())
                .build()
                .unwrap()
        };
        Account::builder()
            .status(Code::of("active").unwrap())
            .coverage([coverage("Coverage/a", 1), coverage("Coverage/b", 2)])
            .build()
            .unwrap()
    }

    #[test]
    fn test_paths() {
        let account = account();
        let paths: Vec<String> = nodes(&account).map(|(path, _)| path).collect();
        assert_eq!(
            paths,
            vec![
                "Account",
                "Account.status",
                "Account.coverage[0]",
                "Account.coverage[0].coverage",
                "Account.coverage[0].coverage.reference",
                "Account.coverage[0].priority",
                "Account.coverage[1]",
                "Account.coverage[1].coverage",
                "Account.coverage[1].coverage.reference",
                "Account.coverage[1].priority",
            ]
        );
    }

    #[test]
    fn test_same_order_as_walk() {
        #[derive(Default)]
        struct Types(Vec<&'static str>);

        impl<'a> Visitor<'a> for Types {
            fn visit_start(&mut self, _name: &'static str, _index: Option<usize>, node: &'a dyn Visitable) {
                self.0.push(node.type_name());
            }
        }

        let account = account();
        let mut walked = Types::default();
        walk(&account, &mut walked);
        let pulled: Vec<_> = nodes(&account).map(|(_, node)| node.type_name()).collect();
        assert_eq!(pulled, walked.0);
    }
}
