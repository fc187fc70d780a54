//! CodeableConcept

use std::any::Any;

use crate::builder::{Buildable, Builder};
use crate::config::ModelConfig;
use crate::datatypes::coding::{Coding, CODING_INFO};
use crate::element::{impl_element, Element, ElementBase, ElementBuilderBase, HasChildren};
use crate::error::Result;
use crate::primitive::FhirString;
use crate::schema::{ElementInfo, ModelType, TypeInfo, TypeKind};
use crate::validation;
use crate::visitor::{Children, Visitable};

pub static CODEABLE_CONCEPT_INFO: TypeInfo = TypeInfo {
    name: "CodeableConcept",
    kind: TypeKind::ComplexType,
    is_abstract: false,
    base: Some("Element"),
    elements: &[
        ElementInfo::new("coding", &["Coding"]).repeating().summary(),
        ElementInfo::new("text", &["string"]).summary(),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeableConcept {
    base: ElementBase,
    coding: Vec<Coding>,
    text: Option<FhirString>,
}

impl CodeableConcept {
    pub fn coding(&self) -> &[Coding] {
        &self.coding
    }

    pub fn text(&self) -> Option<&FhirString> {
        self.text.as_ref()
    }
}

impl_element!(CodeableConcept, CodeableConceptBuilder);

impl HasChildren for CodeableConcept {
    fn has_children(&self) -> bool {
        self.base.has_children() || !self.coding.is_empty() || self.text.is_some()
    }
}

impl Element for CodeableConcept {}

impl ModelType for CodeableConcept {
    fn schema() -> &'static TypeInfo {
        &CODEABLE_CONCEPT_INFO
    }
}

impl Visitable for CodeableConcept {
    fn type_info(&self) -> &'static TypeInfo {
        &CODEABLE_CONCEPT_INFO
    }

    fn children<'a>(&'a self, children: &mut Children<'a>) {
        self.base.children(children);
        children
            .list("coding", &self.coding)
            .element("text", self.text.as_ref());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Buildable for CodeableConcept {
    type Builder = CodeableConceptBuilder;

    fn builder() -> CodeableConceptBuilder {
        CodeableConceptBuilder::default()
    }

    fn to_builder(&self) -> CodeableConceptBuilder {
        CodeableConceptBuilder {
            base: ElementBuilderBase::from_base(&self.base),
            coding: self.coding.iter().cloned().map(Some).collect(),
            text: self.text.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodeableConceptBuilder {
    base: ElementBuilderBase,
    coding: Vec<Option<Coding>>,
    text: Option<FhirString>,
}

impl CodeableConceptBuilder {
    /// Append codings
    pub fn coding<I>(mut self, coding: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Coding>>,
    {
        self.coding.extend(coding.into_iter().map(Into::into));
        self
    }

    /// Replace all codings
    pub fn set_coding<I>(mut self, coding: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Coding>>,
    {
        self.coding = coding.into_iter().map(Into::into).collect();
        self
    }

    pub fn text(mut self, text: impl Into<Option<FhirString>>) -> Self {
        self.text = text.into();
        self
    }
}

impl Builder for CodeableConceptBuilder {
    type Target = CodeableConcept;

    fn freeze(&self, config: &ModelConfig) -> Result<CodeableConcept> {
        let info = &CODEABLE_CONCEPT_INFO;
        let base = self.base.freeze(info, config)?;
        let coding = validation::check_list(&self.coding, &info.path("coding"), &CODING_INFO)?;
        let concept = CodeableConcept {
            base,
            coding,
            text: self.text.clone(),
        };
        validation::require_value_or_children(&concept, info.name)?;
        Ok(concept)
    }
}
