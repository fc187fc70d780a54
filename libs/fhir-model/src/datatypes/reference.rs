//! Reference
//!
//! A non-owning pointer to another resource, by literal (`Patient/123`,
//! absolute URL, `#contained`), by logical identifier, or both. Which resource
//! types a reference may point to is declared by the element holding it, see
//! `ElementInfo::reference_targets`; builders check it with
//! [`crate::validation::check_references`].

use std::any::Any;

use crate::builder::{Buildable, Builder};
use crate::config::ModelConfig;
use crate::datatypes::Identifier;
use crate::element::{impl_element, Element, ElementBase, ElementBuilderBase, HasChildren};
use crate::error::Result;
use crate::primitive::{FhirString, Uri};
use crate::schema::{ElementInfo, ModelType, TypeInfo, TypeKind};
use crate::validation;
use crate::visitor::{Children, Visitable};

pub static REFERENCE_INFO: TypeInfo = TypeInfo {
    name: "Reference",
    kind: TypeKind::ComplexType,
    is_abstract: false,
    base: Some("Element"),
    elements: &[
        ElementInfo::new("reference", &["string"]).summary(),
        ElementInfo::new("type", &["uri"]).summary(),
        ElementInfo::new("identifier", &["Identifier"]).summary(),
        ElementInfo::new("display", &["string"]).summary(),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    base: ElementBase,
    reference: Option<FhirString>,
    type_: Option<Uri>,
    identifier: Option<Identifier>,
    display: Option<FhirString>,
}

impl Reference {
    /// Literal reference (relative, absolute or `#local`)
    pub fn reference(&self) -> Option<&FhirString> {
        self.reference.as_ref()
    }

    /// Declared target resource type
    pub fn type_(&self) -> Option<&Uri> {
        self.type_.as_ref()
    }

    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    pub fn display(&self) -> Option<&FhirString> {
        self.display.as_ref()
    }
}

impl_element!(Reference, ReferenceBuilder);

impl HasChildren for Reference {
    fn has_children(&self) -> bool {
        self.base.has_children()
            || self.reference.is_some()
            || self.type_.is_some()
            || self.identifier.is_some()
            || self.display.is_some()
    }
}

impl Element for Reference {}

impl ModelType for Reference {
    fn schema() -> &'static TypeInfo {
        &REFERENCE_INFO
    }
}

impl Visitable for Reference {
    fn type_info(&self) -> &'static TypeInfo {
        &REFERENCE_INFO
    }

    fn children<'a>(&'a self, children: &mut Children<'a>) {
        self.base.children(children);
        children
            .element("reference", self.reference.as_ref())
            .element("type", self.type_.as_ref())
            .element("identifier", self.identifier.as_ref())
            .element("display", self.display.as_ref());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Buildable for Reference {
    type Builder = ReferenceBuilder;

    fn builder() -> ReferenceBuilder {
        ReferenceBuilder::default()
    }

    fn to_builder(&self) -> ReferenceBuilder {
        ReferenceBuilder {
            base: ElementBuilderBase::from_base(&self.base),
            reference: self.reference.clone(),
            type_: self.type_.clone(),
            identifier: self.identifier.clone(),
            display: self.display.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceBuilder {
    base: ElementBuilderBase,
    reference: Option<FhirString>,
    type_: Option<Uri>,
    identifier: Option<Identifier>,
    display: Option<FhirString>,
}

impl ReferenceBuilder {
    pub fn reference(mut self, reference: impl Into<Option<FhirString>>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn type_(mut self, type_: impl Into<Option<Uri>>) -> Self {
        self.type_ = type_.into();
        self
    }

    pub fn identifier(mut self, identifier: impl Into<Option<Identifier>>) -> Self {
        self.identifier = identifier.into();
        self
    }

    pub fn display(mut self, display: impl Into<Option<FhirString>>) -> Self {
        self.display = display.into();
        self
    }
}

impl Builder for ReferenceBuilder {
    type Target = Reference;

    fn freeze(&self, config: &ModelConfig) -> Result<Reference> {
        let info = &REFERENCE_INFO;
        let reference = Reference {
            base: self.base.freeze(info, config)?,
            reference: self.reference.clone(),
            type_: self.type_.clone(),
            identifier: self.identifier.clone(),
            display: self.display.clone(),
        };
        validation::require_value_or_children(&reference, info.name)?;
        Ok(reference)
    }
}
