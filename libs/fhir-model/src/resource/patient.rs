//! Patient

use std::any::Any;

use crate::builder::{repeating_setters, Buildable, Builder};
use crate::choice::{choice_type, Choice, DataType};
use crate::config::ModelConfig;
use crate::datatypes::identifier::IDENTIFIER_INFO;
use crate::datatypes::reference::REFERENCE_INFO;
use crate::datatypes::{CodeableConcept, Identifier, Reference};
use crate::element::{impl_backbone_element, BackboneBase, BackboneBuilderBase, HasChildren};
use crate::error::Result;
use crate::primitive::{Boolean, Code, Date, DateTime, Integer};
use crate::resource::{impl_domain_resource, DomainResourceBase, DomainResourceBuilderBase};
use crate::schema::{BindingStrength, ElementInfo, ModelType, TypeInfo, TypeKind};
use crate::validation;
use crate::visitor::{Children, Visitable};

pub static PATIENT_INFO: TypeInfo = TypeInfo {
    name: "Patient",
    kind: TypeKind::Resource,
    is_abstract: false,
    base: Some("DomainResource"),
    elements: &[
        ElementInfo::new("identifier", &["Identifier"]).repeating().summary(),
        ElementInfo::new("active", &["boolean"]).modifier().summary(),
        ElementInfo::new("gender", &["code"])
            .summary()
            .bound(BindingStrength::Required, "http://hl7.org/fhir/ValueSet/administrative-gender|4.0.1"),
        ElementInfo::new("birthDate", &["date"]).summary(),
        ElementInfo::new("deceased", PatientDeceased::ALLOWED_TYPES)
            .modifier()
            .summary(),
        ElementInfo::new("maritalStatus", &["CodeableConcept"])
            .bound(BindingStrength::Extensible, "http://hl7.org/fhir/ValueSet/marital-status"),
        ElementInfo::new("multipleBirth", PatientMultipleBirth::ALLOWED_TYPES),
        ElementInfo::new("generalPractitioner", &["Reference"])
            .repeating()
            .targets(&["Organization", "Practitioner", "PractitionerRole"]),
        ElementInfo::new("managingOrganization", &["Reference"])
            .summary()
            .targets(&["Organization"]),
        ElementInfo::new("link", &["Patient.Link"]).repeating().modifier().summary(),
    ],
};

pub static PATIENT_LINK_INFO: TypeInfo = TypeInfo {
    name: "Patient.Link",
    kind: TypeKind::BackboneElement,
    is_abstract: false,
    base: Some("BackboneElement"),
    elements: &[
        ElementInfo::new("other", &["Reference"])
            .required()
            .summary()
            .targets(&["Patient", "RelatedPerson"]),
        ElementInfo::new("type", &["code"])
            .required()
            .summary()
            .bound(BindingStrength::Required, "http://hl7.org/fhir/ValueSet/link-type|4.0.1"),
    ],
};

choice_type! {
    /// `Patient.deceased[x]`
    pub enum PatientDeceased {
        Boolean(Boolean) = "boolean",
        DateTime(DateTime) = "dateTime",
    }
}

choice_type! {
    /// `Patient.multipleBirth[x]`
    pub enum PatientMultipleBirth {
        Boolean(Boolean) = "boolean",
        Integer(Integer) = "integer",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Patient {
    base: DomainResourceBase,
    identifier: Vec<Identifier>,
    active: Option<Boolean>,
    gender: Option<Code>,
    birth_date: Option<Date>,
    deceased: Option<PatientDeceased>,
    marital_status: Option<CodeableConcept>,
    multiple_birth: Option<PatientMultipleBirth>,
    general_practitioner: Vec<Reference>,
    managing_organization: Option<Reference>,
    link: Vec<PatientLink>,
}

impl Patient {
    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    /// Whether the record is in active use; a modifier
    pub fn active(&self) -> Option<&Boolean> {
        self.active.as_ref()
    }

    pub fn gender(&self) -> Option<&Code> {
        self.gender.as_ref()
    }

    pub fn birth_date(&self) -> Option<&Date> {
        self.birth_date.as_ref()
    }

    pub fn deceased(&self) -> Option<&PatientDeceased> {
        self.deceased.as_ref()
    }

    pub fn marital_status(&self) -> Option<&CodeableConcept> {
        self.marital_status.as_ref()
    }

    pub fn multiple_birth(&self) -> Option<&PatientMultipleBirth> {
        self.multiple_birth.as_ref()
    }

    pub fn general_practitioner(&self) -> &[Reference] {
        &self.general_practitioner
    }

    pub fn managing_organization(&self) -> Option<&Reference> {
        self.managing_organization.as_ref()
    }

    /// Other records about the same person
    pub fn link(&self) -> &[PatientLink] {
        &self.link
    }
}

impl_domain_resource!(Patient, PatientBuilder);

impl ModelType for Patient {
    fn schema() -> &'static TypeInfo {
        &PATIENT_INFO
    }
}

impl Visitable for Patient {
    fn type_info(&self) -> &'static TypeInfo {
        &PATIENT_INFO
    }

    fn children<'a>(&'a self, children: &mut Children<'a>) {
        self.base.children(children);
        children
            .list("identifier", &self.identifier)
            .element("active", self.active.as_ref())
            .element("gender", self.gender.as_ref())
            .element("birthDate", self.birth_date.as_ref())
            .node("deceased", self.deceased.as_ref().map(Choice::as_node))
            .element("maritalStatus", self.marital_status.as_ref())
            .node("multipleBirth", self.multiple_birth.as_ref().map(Choice::as_node))
            .list("generalPractitioner", &self.general_practitioner)
            .element("managingOrganization", self.managing_organization.as_ref())
            .list("link", &self.link);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Buildable for Patient {
    type Builder = PatientBuilder;

    fn builder() -> PatientBuilder {
        PatientBuilder::default()
    }

    fn to_builder(&self) -> PatientBuilder {
        PatientBuilder {
            base: DomainResourceBuilderBase::from_base(&self.base),
            identifier: self.identifier.iter().cloned().map(Some).collect(),
            active: self.active.clone(),
            gender: self.gender.clone(),
            birth_date: self.birth_date.clone(),
            deceased: self.deceased.clone().map(Choice::into_data),
            marital_status: self.marital_status.clone(),
            multiple_birth: self.multiple_birth.clone().map(Choice::into_data),
            general_practitioner: self.general_practitioner.iter().cloned().map(Some).collect(),
            managing_organization: self.managing_organization.clone(),
            link: self.link.iter().cloned().map(Some).collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PatientBuilder {
    base: DomainResourceBuilderBase,
    identifier: Vec<Option<Identifier>>,
    active: Option<Boolean>,
    gender: Option<Code>,
    birth_date: Option<Date>,
    deceased: Option<DataType>,
    marital_status: Option<CodeableConcept>,
    multiple_birth: Option<DataType>,
    general_practitioner: Vec<Option<Reference>>,
    managing_organization: Option<Reference>,
    link: Vec<Option<PatientLink>>,
}

impl PatientBuilder {
    repeating_setters! {
        identifier, set_identifier: Identifier;
        general_practitioner, set_general_practitioner: Reference;
        link, set_link: PatientLink;
    }

    pub fn active(mut self, active: impl Into<Option<Boolean>>) -> Self {
        self.active = active.into();
        self
    }

    pub fn gender(mut self, gender: impl Into<Option<Code>>) -> Self {
        self.gender = gender.into();
        self
    }

    pub fn birth_date(mut self, birth_date: impl Into<Option<Date>>) -> Self {
        self.birth_date = birth_date.into();
        self
    }

    /// Stage `deceased[x]`; a later call replaces it
    pub fn deceased(mut self, deceased: impl Into<DataType>) -> Self {
        self.deceased = Some(deceased.into());
        self
    }

    pub fn clear_deceased(mut self) -> Self {
        self.deceased = None;
        self
    }

    pub fn marital_status(mut self, marital_status: impl Into<Option<CodeableConcept>>) -> Self {
        self.marital_status = marital_status.into();
        self
    }

    /// Stage `multipleBirth[x]`; a later call replaces it
    pub fn multiple_birth(mut self, multiple_birth: impl Into<DataType>) -> Self {
        self.multiple_birth = Some(multiple_birth.into());
        self
    }

    pub fn clear_multiple_birth(mut self) -> Self {
        self.multiple_birth = None;
        self
    }

    pub fn managing_organization(mut self, organization: impl Into<Option<Reference>>) -> Self {
        self.managing_organization = organization.into();
        self
    }
}

impl Builder for PatientBuilder {
    type Target = Patient;

    fn freeze(&self, config: &ModelConfig) -> Result<Patient> {
        let info = &PATIENT_INFO;
        let base = self.base.freeze(info, config)?;

        let identifier = validation::check_list(&self.identifier, &info.path("identifier"), &IDENTIFIER_INFO)?;
        let general_practitioner = validation::check_list(
            &self.general_practitioner,
            &info.path("generalPractitioner"),
            &REFERENCE_INFO,
        )?;
        let link = validation::check_list(&self.link, &info.path("link"), &PATIENT_LINK_INFO)?;

        let deceased: Option<PatientDeceased> =
            validation::choice_element(self.deceased.as_ref(), &info.path("deceased"))?;
        let multiple_birth: Option<PatientMultipleBirth> =
            validation::choice_element(self.multiple_birth.as_ref(), &info.path("multipleBirth"))?;

        validation::check_references(info, "generalPractitioner", &general_practitioner, config)?;
        validation::check_references(
            info,
            "managingOrganization",
            self.managing_organization.as_ref(),
            config,
        )?;

        Ok(Patient {
            base,
            identifier,
            active: self.active.clone(),
            gender: self.gender.clone(),
            birth_date: self.birth_date.clone(),
            deceased,
            marital_status: self.marital_status.clone(),
            multiple_birth,
            general_practitioner,
            managing_organization: self.managing_organization.clone(),
            link,
        })
    }
}

/// `Patient.link`: another patient or related-person record about the same person
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatientLink {
    base: BackboneBase,
    other: Reference,
    type_: Code,
}

impl PatientLink {
    pub fn other(&self) -> &Reference {
        &self.other
    }

    /// `replaced-by | replaces | refer | seealso`
    pub fn type_(&self) -> &Code {
        &self.type_
    }
}

impl_backbone_element!(PatientLink, PatientLinkBuilder);

impl HasChildren for PatientLink {
    fn has_children(&self) -> bool {
        true
    }
}

impl ModelType for PatientLink {
    fn schema() -> &'static TypeInfo {
        &PATIENT_LINK_INFO
    }
}

impl Visitable for PatientLink {
    fn type_info(&self) -> &'static TypeInfo {
        &PATIENT_LINK_INFO
    }

    fn children<'a>(&'a self, children: &mut Children<'a>) {
        self.base.children(children);
        children
            .element("other", Some(&self.other))
            .element("type", Some(&self.type_));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Buildable for PatientLink {
    type Builder = PatientLinkBuilder;

    fn builder() -> PatientLinkBuilder {
        PatientLinkBuilder::default()
    }

    fn to_builder(&self) -> PatientLinkBuilder {
        PatientLinkBuilder {
            base: BackboneBuilderBase::from_base(&self.base),
            other: Some(self.other.clone()),
            type_: Some(self.type_.clone()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PatientLinkBuilder {
    base: BackboneBuilderBase,
    other: Option<Reference>,
    type_: Option<Code>,
}

impl PatientLinkBuilder {
    pub fn other(mut self, other: impl Into<Option<Reference>>) -> Self {
        self.other = other.into();
        self
    }

    pub fn type_(mut self, type_: impl Into<Option<Code>>) -> Self {
        self.type_ = type_.into();
        self
    }
}

impl Builder for PatientLinkBuilder {
    type Target = PatientLink;

    fn freeze(&self, config: &ModelConfig) -> Result<PatientLink> {
        let info = &PATIENT_LINK_INFO;
        let base = self.base.freeze(info, config)?;
        let other = validation::require_non_null(self.other.as_ref(), &info.path("other"))?;
        let type_ = validation::require_non_null(self.type_.as_ref(), &info.path("type"))?;
        validation::check_references(info, "other", Some(other), config)?;
        Ok(PatientLink {
            base,
            other: other.clone(),
            type_: type_.clone(),
        })
    }
}
