//! Identifier

use std::any::Any;

use crate::builder::{Buildable, Builder};
use crate::config::ModelConfig;
use crate::datatypes::{CodeableConcept, Period, Reference};
use crate::element::{impl_element, Element, ElementBase, ElementBuilderBase, HasChildren};
use crate::error::Result;
use crate::primitive::{Code, FhirString, Uri};
use crate::schema::{BindingStrength, ElementInfo, ModelType, TypeInfo, TypeKind};
use crate::validation;
use crate::visitor::{Children, Visitable};

pub static IDENTIFIER_INFO: TypeInfo = TypeInfo {
    name: "Identifier",
    kind: TypeKind::ComplexType,
    is_abstract: false,
    base: Some("Element"),
    elements: &[
        ElementInfo::new("use", &["code"])
            .modifier()
            .summary()
            .bound(BindingStrength::Required, "http://hl7.org/fhir/ValueSet/identifier-use|4.0.1"),
        ElementInfo::new("type", &["CodeableConcept"])
            .summary()
            .bound(BindingStrength::Extensible, "http://hl7.org/fhir/ValueSet/identifier-type"),
        ElementInfo::new("system", &["uri"]).summary(),
        ElementInfo::new("value", &["string"]).summary(),
        ElementInfo::new("period", &["Period"]).summary(),
        ElementInfo::new("assigner", &["Reference"])
            .summary()
            .targets(&["Organization"]),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    base: ElementBase,
    use_: Option<Code>,
    type_: Option<CodeableConcept>,
    system: Option<Uri>,
    value: Option<FhirString>,
    period: Option<Period>,
    assigner: Option<Box<Reference>>,
}

impl Identifier {
    pub fn use_(&self) -> Option<&Code> {
        self.use_.as_ref()
    }

    pub fn type_(&self) -> Option<&CodeableConcept> {
        self.type_.as_ref()
    }

    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn value(&self) -> Option<&FhirString> {
        self.value.as_ref()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    /// Organization that issued the identifier
    pub fn assigner(&self) -> Option<&Reference> {
        self.assigner.as_deref()
    }
}

impl_element!(Identifier, IdentifierBuilder);

impl HasChildren for Identifier {
    fn has_children(&self) -> bool {
        self.base.has_children()
            || self.use_.is_some()
            || self.type_.is_some()
            || self.system.is_some()
            || self.value.is_some()
            || self.period.is_some()
            || self.assigner.is_some()
    }
}

impl Element for Identifier {}

impl ModelType for Identifier {
    fn schema() -> &'static TypeInfo {
        &IDENTIFIER_INFO
    }
}

impl Visitable for Identifier {
    fn type_info(&self) -> &'static TypeInfo {
        &IDENTIFIER_INFO
    }

    fn children<'a>(&'a self, children: &mut Children<'a>) {
        self.base.children(children);
        children
            .element("use", self.use_.as_ref())
            .element("type", self.type_.as_ref())
            .element("system", self.system.as_ref())
            .element("value", self.value.as_ref())
            .element("period", self.period.as_ref())
            .element("assigner", self.assigner.as_deref());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Buildable for Identifier {
    type Builder = IdentifierBuilder;

    fn builder() -> IdentifierBuilder {
        IdentifierBuilder::default()
    }

    fn to_builder(&self) -> IdentifierBuilder {
        IdentifierBuilder {
            base: ElementBuilderBase::from_base(&self.base),
            use_: self.use_.clone(),
            type_: self.type_.clone(),
            system: self.system.clone(),
            value: self.value.clone(),
            period: self.period.clone(),
            assigner: self.assigner.as_deref().cloned(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IdentifierBuilder {
    base: ElementBuilderBase,
    use_: Option<Code>,
    type_: Option<CodeableConcept>,
    system: Option<Uri>,
    value: Option<FhirString>,
    period: Option<Period>,
    assigner: Option<Reference>,
}

impl IdentifierBuilder {
    pub fn use_(mut self, use_: impl Into<Option<Code>>) -> Self {
        self.use_ = use_.into();
        self
    }

    pub fn type_(mut self, type_: impl Into<Option<CodeableConcept>>) -> Self {
        self.type_ = type_.into();
        self
    }

    pub fn system(mut self, system: impl Into<Option<Uri>>) -> Self {
        self.system = system.into();
        self
    }

    pub fn value(mut self, value: impl Into<Option<FhirString>>) -> Self {
        self.value = value.into();
        self
    }

    pub fn period(mut self, period: impl Into<Option<Period>>) -> Self {
        self.period = period.into();
        self
    }

    pub fn assigner(mut self, assigner: impl Into<Option<Reference>>) -> Self {
        self.assigner = assigner.into();
        self
    }
}

impl Builder for IdentifierBuilder {
    type Target = Identifier;

    fn freeze(&self, config: &ModelConfig) -> Result<Identifier> {
        let info = &IDENTIFIER_INFO;
        let base = self.base.freeze(info, config)?;
        validation::check_references(info, "assigner", self.assigner.as_ref(), config)?;
        let identifier = Identifier {
            base,
            use_: self.use_.clone(),
            type_: self.type_.clone(),
            system: self.system.clone(),
            value: self.value.clone(),
            period: self.period.clone(),
            assigner: self.assigner.clone().map(Box::new),
        };
        validation::require_value_or_children(&identifier, info.name)?;
        Ok(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ReferenceDefect, ValidationError};

    fn reference(literal: &str) -> Reference {
        Reference::builder()
            .reference(FhirString::of(literal).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_assigner_must_be_organization() {
        let ok = Identifier::builder()
            .value(FhirString::of("12345").unwrap())
            .assigner(reference("Organization/acme"))
            .build()
            .unwrap();
        assert_eq!(
            ok.assigner().and_then(|r| r.reference()).and_then(|r| r.as_str()),
            Some("Organization/acme")
        );

        let err = Identifier::builder()
            .value(FhirString::of("12345").unwrap())
            .assigner(reference("Patient/p1"))
            .build()
            .unwrap_err();
        match err {
            ValidationError::ReferenceTargetViolation { path, defect, .. } => {
                assert_eq!(path, "Identifier.assigner");
                assert!(matches!(defect, ReferenceDefect::TargetNotAllowed { .. }));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_use_binding_metadata() {
        let binding = IDENTIFIER_INFO.element("use").unwrap().binding.unwrap();
        assert_eq!(binding.strength, BindingStrength::Required);
    }
}
