//! Observation
//!
//! Measurements and simple assertions made about a subject. The measured value
//! and the clinically relevant time are choice elements (`value[x]`,
//! `effective[x]`); panels put their parts in `component`.

use std::any::Any;

use crate::builder::{repeating_setters, Buildable, Builder};
use crate::choice::{choice_type, Choice, DataType};
use crate::config::ModelConfig;
use crate::datatypes::codeable_concept::CODEABLE_CONCEPT_INFO;
use crate::datatypes::identifier::IDENTIFIER_INFO;
use crate::datatypes::reference::REFERENCE_INFO;
use crate::datatypes::{CodeableConcept, Identifier, Period, Quantity, Reference};
use crate::element::{impl_backbone_element, BackboneBase, BackboneBuilderBase, HasChildren};
use crate::error::Result;
use crate::primitive::{Boolean, Code, DateTime, FhirString, Instant, Integer, Time};
use crate::resource::{impl_domain_resource, DomainResourceBase, DomainResourceBuilderBase};
use crate::schema::{BindingStrength, ElementInfo, ModelType, TypeInfo, TypeKind};
use crate::validation;
use crate::visitor::{Children, Visitable};

const OBSERVATION_STATUS: &str = "http://hl7.org/fhir/ValueSet/observation-status|4.0.1";
const OBSERVATION_CODES: &str = "http://hl7.org/fhir/ValueSet/observation-codes";
const DATA_ABSENT_REASON: &str = "http://hl7.org/fhir/ValueSet/data-absent-reason";
const INTERPRETATION: &str = "http://hl7.org/fhir/ValueSet/observation-interpretation";

pub static OBSERVATION_INFO: TypeInfo = TypeInfo {
    name: "Observation",
    kind: TypeKind::Resource,
    is_abstract: false,
    base: Some("DomainResource"),
    elements: &[
        ElementInfo::new("identifier", &["Identifier"]).repeating(),
        ElementInfo::new("basedOn", &["Reference"]).repeating().targets(&[
            "CarePlan",
            "DeviceRequest",
            "ImmunizationRecommendation",
            "MedicationRequest",
            "NutritionOrder",
            "ServiceRequest",
        ]),
        ElementInfo::new("status", &["code"])
            .required()
            .modifier()
            .summary()
            .bound(BindingStrength::Required, OBSERVATION_STATUS),
        ElementInfo::new("category", &["CodeableConcept"])
            .repeating()
            .bound(BindingStrength::Preferred, "http://hl7.org/fhir/ValueSet/observation-category"),
        ElementInfo::new("code", &["CodeableConcept"])
            .required()
            .summary()
            .bound(BindingStrength::Example, OBSERVATION_CODES),
        ElementInfo::new("subject", &["Reference"])
            .summary()
            .targets(&["Patient", "Group", "Device", "Location"]),
        // any resource type
        ElementInfo::new("focus", &["Reference"]).repeating().summary(),
        ElementInfo::new("encounter", &["Reference"])
            .summary()
            .targets(&["Encounter"]),
        ElementInfo::new("effective", ObservationEffective::ALLOWED_TYPES).summary(),
        ElementInfo::new("issued", &["instant"]).summary(),
        ElementInfo::new("performer", &["Reference"])
            .repeating()
            .summary()
            .targets(&[
                "Practitioner",
                "PractitionerRole",
                "Organization",
                "CareTeam",
                "Patient",
                "RelatedPerson",
            ]),
        ElementInfo::new("value", ObservationValue::ALLOWED_TYPES).summary(),
        ElementInfo::new("dataAbsentReason", &["CodeableConcept"])
            .bound(BindingStrength::Extensible, DATA_ABSENT_REASON),
        ElementInfo::new("interpretation", &["CodeableConcept"])
            .repeating()
            .bound(BindingStrength::Extensible, INTERPRETATION),
        ElementInfo::new("bodySite", &["CodeableConcept"])
            .bound(BindingStrength::Example, "http://hl7.org/fhir/ValueSet/body-site"),
        ElementInfo::new("method", &["CodeableConcept"])
            .bound(BindingStrength::Example, "http://hl7.org/fhir/ValueSet/observation-methods"),
        ElementInfo::new("specimen", &["Reference"]).targets(&["Specimen"]),
        ElementInfo::new("device", &["Reference"]).targets(&["Device", "DeviceMetric"]),
        ElementInfo::new("hasMember", &["Reference"]).repeating().summary().targets(&[
            "Observation",
            "QuestionnaireResponse",
            "MolecularSequence",
        ]),
        ElementInfo::new("derivedFrom", &["Reference"]).repeating().summary().targets(&[
            "DocumentReference",
            "ImagingStudy",
            "Media",
            "QuestionnaireResponse",
            "Observation",
            "MolecularSequence",
        ]),
        ElementInfo::new("component", &["Observation.Component"])
            .repeating()
            .summary(),
    ],
};

pub static OBSERVATION_COMPONENT_INFO: TypeInfo = TypeInfo {
    name: "Observation.Component",
    kind: TypeKind::BackboneElement,
    is_abstract: false,
    base: Some("BackboneElement"),
    elements: &[
        ElementInfo::new("code", &["CodeableConcept"])
            .required()
            .summary()
            .bound(BindingStrength::Example, OBSERVATION_CODES),
        ElementInfo::new("value", ObservationValue::ALLOWED_TYPES).summary(),
        ElementInfo::new("dataAbsentReason", &["CodeableConcept"])
            .bound(BindingStrength::Extensible, DATA_ABSENT_REASON),
        ElementInfo::new("interpretation", &["CodeableConcept"])
            .repeating()
            .bound(BindingStrength::Extensible, INTERPRETATION),
    ],
};

choice_type! {
    /// `Observation.value[x]` and `Observation.component.value[x]`
    pub enum ObservationValue {
        Quantity(Quantity) = "Quantity",
        CodeableConcept(CodeableConcept) = "CodeableConcept",
        String(FhirString) = "string",
        Boolean(Boolean) = "boolean",
        Integer(Integer) = "integer",
        Time(Time) = "time",
        DateTime(DateTime) = "dateTime",
        Period(Period) = "Period",
    }
}

choice_type! {
    /// `Observation.effective[x]`
    pub enum ObservationEffective {
        DateTime(DateTime) = "dateTime",
        Period(Period) = "Period",
        Instant(Instant) = "instant",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Observation {
    base: DomainResourceBase,
    identifier: Vec<Identifier>,
    based_on: Vec<Reference>,
    status: Code,
    category: Vec<CodeableConcept>,
    code: CodeableConcept,
    subject: Option<Reference>,
    focus: Vec<Reference>,
    encounter: Option<Reference>,
    effective: Option<ObservationEffective>,
    issued: Option<Instant>,
    performer: Vec<Reference>,
    value: Option<ObservationValue>,
    data_absent_reason: Option<CodeableConcept>,
    interpretation: Vec<CodeableConcept>,
    body_site: Option<CodeableConcept>,
    method: Option<CodeableConcept>,
    specimen: Option<Reference>,
    device: Option<Reference>,
    has_member: Vec<Reference>,
    derived_from: Vec<Reference>,
    component: Vec<ObservationComponent>,
}

impl Observation {
    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    pub fn based_on(&self) -> &[Reference] {
        &self.based_on
    }

    /// `registered | preliminary | final | amended | ...`
    pub fn status(&self) -> &Code {
        &self.status
    }

    pub fn category(&self) -> &[CodeableConcept] {
        &self.category
    }

    /// What was observed
    pub fn code(&self) -> &CodeableConcept {
        &self.code
    }

    pub fn subject(&self) -> Option<&Reference> {
        self.subject.as_ref()
    }

    pub fn focus(&self) -> &[Reference] {
        &self.focus
    }

    pub fn encounter(&self) -> Option<&Reference> {
        self.encounter.as_ref()
    }

    pub fn effective(&self) -> Option<&ObservationEffective> {
        self.effective.as_ref()
    }

    pub fn issued(&self) -> Option<&Instant> {
        self.issued.as_ref()
    }

    pub fn performer(&self) -> &[Reference] {
        &self.performer
    }

    pub fn value(&self) -> Option<&ObservationValue> {
        self.value.as_ref()
    }

    pub fn data_absent_reason(&self) -> Option<&CodeableConcept> {
        self.data_absent_reason.as_ref()
    }

    pub fn interpretation(&self) -> &[CodeableConcept] {
        &self.interpretation
    }

    pub fn body_site(&self) -> Option<&CodeableConcept> {
        self.body_site.as_ref()
    }

    pub fn method(&self) -> Option<&CodeableConcept> {
        self.method.as_ref()
    }

    pub fn specimen(&self) -> Option<&Reference> {
        self.specimen.as_ref()
    }

    pub fn device(&self) -> Option<&Reference> {
        self.device.as_ref()
    }

    pub fn has_member(&self) -> &[Reference] {
        &self.has_member
    }

    pub fn derived_from(&self) -> &[Reference] {
        &self.derived_from
    }

    pub fn component(&self) -> &[ObservationComponent] {
        &self.component
    }
}

impl_domain_resource!(Observation, ObservationBuilder);

impl ModelType for Observation {
    fn schema() -> &'static TypeInfo {
        &OBSERVATION_INFO
    }
}

impl Visitable for Observation {
    fn type_info(&self) -> &'static TypeInfo {
        &OBSERVATION_INFO
    }

    fn children<'a>(&'a self, children: &mut Children<'a>) {
        self.base.children(children);
        children
            .list("identifier", &self.identifier)
            .list("basedOn", &self.based_on)
            .element("status", Some(&self.status))
            .list("category", &self.category)
            .element("code", Some(&self.code))
            .element("subject", self.subject.as_ref())
            .list("focus", &self.focus)
            .element("encounter", self.encounter.as_ref())
            .node("effective", self.effective.as_ref().map(Choice::as_node))
            .element("issued", self.issued.as_ref())
            .list("performer", &self.performer)
            .node("value", self.value.as_ref().map(Choice::as_node))
            .element("dataAbsentReason", self.data_absent_reason.as_ref())
            .list("interpretation", &self.interpretation)
            .element("bodySite", self.body_site.as_ref())
            .element("method", self.method.as_ref())
            .element("specimen", self.specimen.as_ref())
            .element("device", self.device.as_ref())
            .list("hasMember", &self.has_member)
            .list("derivedFrom", &self.derived_from)
            .list("component", &self.component);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Buildable for Observation {
    type Builder = ObservationBuilder;

    fn builder() -> ObservationBuilder {
        ObservationBuilder::default()
    }

    fn to_builder(&self) -> ObservationBuilder {
        ObservationBuilder {
            base: DomainResourceBuilderBase::from_base(&self.base),
            identifier: self.identifier.iter().cloned().map(Some).collect(),
            based_on: self.based_on.iter().cloned().map(Some).collect(),
            status: Some(self.status.clone()),
            category: self.category.iter().cloned().map(Some).collect(),
            code: Some(self.code.clone()),
            subject: self.subject.clone(),
            focus: self.focus.iter().cloned().map(Some).collect(),
            encounter: self.encounter.clone(),
            effective: self.effective.clone().map(Choice::into_data),
            issued: self.issued.clone(),
            performer: self.performer.iter().cloned().map(Some).collect(),
            value: self.value.clone().map(Choice::into_data),
            data_absent_reason: self.data_absent_reason.clone(),
            interpretation: self.interpretation.iter().cloned().map(Some).collect(),
            body_site: self.body_site.clone(),
            method: self.method.clone(),
            specimen: self.specimen.clone(),
            device: self.device.clone(),
            has_member: self.has_member.iter().cloned().map(Some).collect(),
            derived_from: self.derived_from.iter().cloned().map(Some).collect(),
            component: self.component.iter().cloned().map(Some).collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObservationBuilder {
    base: DomainResourceBuilderBase,
    identifier: Vec<Option<Identifier>>,
    based_on: Vec<Option<Reference>>,
    status: Option<Code>,
    category: Vec<Option<CodeableConcept>>,
    code: Option<CodeableConcept>,
    subject: Option<Reference>,
    focus: Vec<Option<Reference>>,
    encounter: Option<Reference>,
    effective: Option<DataType>,
    issued: Option<Instant>,
    performer: Vec<Option<Reference>>,
    value: Option<DataType>,
    data_absent_reason: Option<CodeableConcept>,
    interpretation: Vec<Option<CodeableConcept>>,
    body_site: Option<CodeableConcept>,
    method: Option<CodeableConcept>,
    specimen: Option<Reference>,
    device: Option<Reference>,
    has_member: Vec<Option<Reference>>,
    derived_from: Vec<Option<Reference>>,
    component: Vec<Option<ObservationComponent>>,
}

impl ObservationBuilder {
    repeating_setters! {
        identifier, set_identifier: Identifier;
        based_on, set_based_on: Reference;
        category, set_category: CodeableConcept;
        focus, set_focus: Reference;
        performer, set_performer: Reference;
        interpretation, set_interpretation: CodeableConcept;
        has_member, set_has_member: Reference;
        derived_from, set_derived_from: Reference;
        component, set_component: ObservationComponent;
    }

    pub fn status(mut self, status: impl Into<Option<Code>>) -> Self {
        self.status = status.into();
        self
    }

    pub fn code(mut self, code: impl Into<Option<CodeableConcept>>) -> Self {
        self.code = code.into();
        self
    }

    pub fn subject(mut self, subject: impl Into<Option<Reference>>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn encounter(mut self, encounter: impl Into<Option<Reference>>) -> Self {
        self.encounter = encounter.into();
        self
    }

    /// Stage `effective[x]`; a later call replaces it
    pub fn effective(mut self, effective: impl Into<DataType>) -> Self {
        self.effective = Some(effective.into());
        self
    }

    pub fn clear_effective(mut self) -> Self {
        self.effective = None;
        self
    }

    pub fn issued(mut self, issued: impl Into<Option<Instant>>) -> Self {
        self.issued = issued.into();
        self
    }

    /// Stage `value[x]`; a later call replaces it
    pub fn value(mut self, value: impl Into<DataType>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn clear_value(mut self) -> Self {
        self.value = None;
        self
    }

    pub fn data_absent_reason(mut self, reason: impl Into<Option<CodeableConcept>>) -> Self {
        self.data_absent_reason = reason.into();
        self
    }

    pub fn body_site(mut self, body_site: impl Into<Option<CodeableConcept>>) -> Self {
        self.body_site = body_site.into();
        self
    }

    pub fn method(mut self, method: impl Into<Option<CodeableConcept>>) -> Self {
        self.method = method.into();
        self
    }

    pub fn specimen(mut self, specimen: impl Into<Option<Reference>>) -> Self {
        self.specimen = specimen.into();
        self
    }

    pub fn device(mut self, device: impl Into<Option<Reference>>) -> Self {
        self.device = device.into();
        self
    }
}

impl Builder for ObservationBuilder {
    type Target = Observation;

    fn freeze(&self, config: &ModelConfig) -> Result<Observation> {
        let info = &OBSERVATION_INFO;
        let base = self.base.freeze(info, config)?;

        let status = validation::require_non_null(self.status.as_ref(), &info.path("status"))?;
        let code = validation::require_non_null(self.code.as_ref(), &info.path("code"))?;

        let identifier = validation::check_list(&self.identifier, &info.path("identifier"), &IDENTIFIER_INFO)?;
        let based_on = validation::check_list(&self.based_on, &info.path("basedOn"), &REFERENCE_INFO)?;
        let category = validation::check_list(&self.category, &info.path("category"), &CODEABLE_CONCEPT_INFO)?;
        let focus = validation::check_list(&self.focus, &info.path("focus"), &REFERENCE_INFO)?;
        let performer = validation::check_list(&self.performer, &info.path("performer"), &REFERENCE_INFO)?;
        let interpretation = validation::check_list(
            &self.interpretation,
            &info.path("interpretation"),
            &CODEABLE_CONCEPT_INFO,
        )?;
        let has_member = validation::check_list(&self.has_member, &info.path("hasMember"), &REFERENCE_INFO)?;
        let derived_from =
            validation::check_list(&self.derived_from, &info.path("derivedFrom"), &REFERENCE_INFO)?;
        let component = validation::check_list(
            &self.component,
            &info.path("component"),
            &OBSERVATION_COMPONENT_INFO,
        )?;

        let effective: Option<ObservationEffective> =
            validation::choice_element(self.effective.as_ref(), &info.path("effective"))?;
        let value: Option<ObservationValue> =
            validation::choice_element(self.value.as_ref(), &info.path("value"))?;

        validation::check_references(info, "basedOn", &based_on, config)?;
        validation::check_references(info, "subject", self.subject.as_ref(), config)?;
        validation::check_references(info, "focus", &focus, config)?;
        validation::check_references(info, "encounter", self.encounter.as_ref(), config)?;
        validation::check_references(info, "performer", &performer, config)?;
        validation::check_references(info, "specimen", self.specimen.as_ref(), config)?;
        validation::check_references(info, "device", self.device.as_ref(), config)?;
        validation::check_references(info, "hasMember", &has_member, config)?;
        validation::check_references(info, "derivedFrom", &derived_from, config)?;

        Ok(Observation {
            base,
            identifier,
            based_on,
            status: status.clone(),
            category,
            code: code.clone(),
            subject: self.subject.clone(),
            focus,
            encounter: self.encounter.clone(),
            effective,
            issued: self.issued.clone(),
            performer,
            value,
            data_absent_reason: self.data_absent_reason.clone(),
            interpretation,
            body_site: self.body_site.clone(),
            method: self.method.clone(),
            specimen: self.specimen.clone(),
            device: self.device.clone(),
            has_member,
            derived_from,
            component,
        })
    }
}

/// `Observation.component`: one part of a multi-part observation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObservationComponent {
    base: BackboneBase,
    code: CodeableConcept,
    value: Option<ObservationValue>,
    data_absent_reason: Option<CodeableConcept>,
    interpretation: Vec<CodeableConcept>,
}

impl ObservationComponent {
    pub fn code(&self) -> &CodeableConcept {
        &self.code
    }

    pub fn value(&self) -> Option<&ObservationValue> {
        self.value.as_ref()
    }

    pub fn data_absent_reason(&self) -> Option<&CodeableConcept> {
        self.data_absent_reason.as_ref()
    }

    pub fn interpretation(&self) -> &[CodeableConcept] {
        &self.interpretation
    }
}

impl_backbone_element!(ObservationComponent, ObservationComponentBuilder);

impl HasChildren for ObservationComponent {
    fn has_children(&self) -> bool {
        true
    }
}

impl ModelType for ObservationComponent {
    fn schema() -> &'static TypeInfo {
        &OBSERVATION_COMPONENT_INFO
    }
}

impl Visitable for ObservationComponent {
    fn type_info(&self) -> &'static TypeInfo {
        &OBSERVATION_COMPONENT_INFO
    }

    fn children<'a>(&'a self, children: &mut Children<'a>) {
        self.base.children(children);
        children
            .element("code", Some(&self.code))
            .node("value", self.value.as_ref().map(Choice::as_node))
            .element("dataAbsentReason", self.data_absent_reason.as_ref())
            .list("interpretation", &self.interpretation);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Buildable for ObservationComponent {
    type Builder = ObservationComponentBuilder;

    fn builder() -> ObservationComponentBuilder {
        ObservationComponentBuilder::default()
    }

    fn to_builder(&self) -> ObservationComponentBuilder {
        ObservationComponentBuilder {
            base: BackboneBuilderBase::from_base(&self.base),
            code: Some(self.code.clone()),
            value: self.value.clone().map(Choice::into_data),
            data_absent_reason: self.data_absent_reason.clone(),
            interpretation: self.interpretation.iter().cloned().map(Some).collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObservationComponentBuilder {
    base: BackboneBuilderBase,
    code: Option<CodeableConcept>,
    value: Option<DataType>,
    data_absent_reason: Option<CodeableConcept>,
    interpretation: Vec<Option<CodeableConcept>>,
}

impl ObservationComponentBuilder {
    repeating_setters! {
        interpretation, set_interpretation: CodeableConcept;
    }

    pub fn code(mut self, code: impl Into<Option<CodeableConcept>>) -> Self {
        self.code = code.into();
        self
    }

    /// Stage `value[x]`; a later call replaces it
    pub fn value(mut self, value: impl Into<DataType>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn clear_value(mut self) -> Self {
        self.value = None;
        self
    }

    pub fn data_absent_reason(mut self, reason: impl Into<Option<CodeableConcept>>) -> Self {
        self.data_absent_reason = reason.into();
        self
    }
}

impl Builder for ObservationComponentBuilder {
    type Target = ObservationComponent;

    fn freeze(&self, config: &ModelConfig) -> Result<ObservationComponent> {
        let info = &OBSERVATION_COMPONENT_INFO;
        let base = self.base.freeze(info, config)?;
        let code = validation::require_non_null(self.code.as_ref(), &info.path("code"))?;
        let interpretation = validation::check_list(
            &self.interpretation,
            &info.path("interpretation"),
            &CODEABLE_CONCEPT_INFO,
        )?;
        let value: Option<ObservationValue> =
            validation::choice_element(self.value.as_ref(), &info.path("value"))?;
        Ok(ObservationComponent {
            base,
            code: code.clone(),
            value,
            data_absent_reason: self.data_absent_reason.clone(),
            interpretation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::Coding;
    use crate::error::{ReferenceDefect, ValidationError};
    use crate::primitive::{Decimal, Uri};

    fn loinc(code: &str) -> CodeableConcept {
        CodeableConcept::builder()
            .coding([Coding::builder()
                .system(Uri::of("http://loinc.org").unwrap())
                .code(Code::of(code).unwrap())
                .build()
                .unwrap()])
            .build()
            .unwrap()
    }

    fn reference(literal: &str) -> Reference {
        Reference::builder()
            .reference(FhirString::of(literal).unwrap())
            .build()
            .unwrap()
    }

    fn quantity(value: &str) -> Quantity {
        Quantity::builder()
            .value(Decimal::parse(value).unwrap())
            .unit(FhirString::of("mmHg").unwrap())
            .build()
            .unwrap()
    }

    fn heart_rate() -> ObservationBuilder {
        Observation::builder()
            .status(Code::of("final").unwrap())
            .code(loinc("8867-4"))
            .subject(reference("Patient/example"))
    }

    #[test]
    fn test_value_choice_last_write_wins() {
        let obs = heart_rate()
            .value(FhirString::of("fast").unwrap())
            .value(quantity("72"))
            .build()
            .unwrap();
        match obs.value() {
            Some(ObservationValue::Quantity(q)) => assert!(q.value().is_some()),
            other => panic!("unexpected value: {:?}", other),
        }
        assert_eq!(obs.value().map(|v| v.type_name()), Some("Quantity"));
    }

    #[test]
    fn test_value_outside_choice_set() {
        let err = heart_rate()
            .value(reference("Patient/example"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::ChoiceTypeViolation {
                path: "Observation.value".to_string(),
                found: "Reference",
                allowed: ObservationValue::ALLOWED_TYPES,
            }
        );
    }

    #[test]
    fn test_subject_specimen_rejected() {
        let err = heart_rate()
            .subject(reference("Specimen/s1"))
            .build()
            .unwrap_err();
        match err {
            ValidationError::ReferenceTargetViolation { path, defect, .. } => {
                assert_eq!(path, "Observation.subject");
                assert_eq!(
                    defect,
                    ReferenceDefect::TargetNotAllowed {
                        found: "Specimen".to_string(),
                        allowed: &["Patient", "Group", "Device", "Location"],
                    }
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_focus_accepts_any_resource_type() {
        let obs = heart_rate()
            .focus([reference("Specimen/s1"), reference("Medication/m1")])
            .build()
            .unwrap();
        assert_eq!(obs.focus().len(), 2);
    }

    #[test]
    fn test_required_fields_checked_before_lists() {
        let err = Observation::builder()
            .status(Code::of("final").unwrap())
            .identifier([None::<Identifier>])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingRequiredField {
                path: "Observation.code".to_string()
            }
        );
    }

    #[test]
    fn test_components() {
        let systolic = ObservationComponent::builder()
            .code(loinc("8480-6"))
            .value(quantity("120"))
            .build()
            .unwrap();
        let diastolic = ObservationComponent::builder()
            .code(loinc("8462-4"))
            .value(quantity("80"))
            .build()
            .unwrap();
        let obs = heart_rate()
            .code(loinc("85354-9"))
            .effective(DateTime::parse("2024-05-01T10:30:00+02:00").unwrap())
            .component([systolic.clone(), diastolic])
            .build()
            .unwrap();
        assert_eq!(obs.component().len(), 2);
        assert_eq!(obs.component()[0], systolic);
        assert!(matches!(obs.effective(), Some(ObservationEffective::DateTime(_))));
    }

    #[test]
    fn test_component_code_required() {
        let err = ObservationComponent::builder()
            .value(quantity("80"))
            .build()
            .unwrap_err();
        assert_eq!(err.path(), "Observation.component.code");
    }

    #[test]
    fn test_effective_rejects_date() {
        let err = heart_rate()
            .effective(crate::primitive::Date::parse("2024-05-01").unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err.path(), "Observation.effective");
    }

    #[test]
    fn test_copy_with_keeps_choice() {
        let obs = heart_rate().value(quantity("72")).build().unwrap();
        let amended = obs
            .to_builder()
            .status(Code::of("amended").unwrap())
            .build()
            .unwrap();
        assert_eq!(amended.value(), obs.value());
        assert_eq!(amended.status().as_str(), Some("amended"));
    }
}
