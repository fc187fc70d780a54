//! Account
//!
//! A financial tool for tracking value accrued for a particular purpose, with
//! the coverages that pay for it and the parties responsible for the balance.

use std::any::Any;

use crate::builder::{Buildable, Builder};
use crate::config::ModelConfig;
use crate::datatypes::identifier::IDENTIFIER_INFO;
use crate::datatypes::{CodeableConcept, Identifier, Period, Reference};
use crate::element::{impl_backbone_element, BackboneBase, BackboneBuilderBase, HasChildren};
use crate::error::Result;
use crate::primitive::{Boolean, Code, FhirString, PositiveInt};
use crate::resource::{impl_domain_resource, DomainResourceBase, DomainResourceBuilderBase};
use crate::schema::{BindingStrength, ElementInfo, ModelType, TypeInfo, TypeKind};
use crate::validation;
use crate::visitor::{Children, Visitable};

pub static ACCOUNT_INFO: TypeInfo = TypeInfo {
    name: "Account",
    kind: TypeKind::Resource,
    is_abstract: false,
    base: Some("DomainResource"),
    elements: &[
        ElementInfo::new("identifier", &["Identifier"]).repeating().summary(),
        ElementInfo::new("status", &["code"])
            .required()
            .modifier()
            .summary()
            .bound(BindingStrength::Required, "http://hl7.org/fhir/ValueSet/account-status|4.0.1"),
        ElementInfo::new("type", &["CodeableConcept"])
            .summary()
            .bound(BindingStrength::Example, "http://hl7.org/fhir/ValueSet/account-type"),
        ElementInfo::new("name", &["string"]).summary(),
        ElementInfo::new("subject", &["Reference"])
            .repeating()
            .summary()
            .targets(&[
                "Patient",
                "Device",
                "Practitioner",
                "PractitionerRole",
                "Location",
                "HealthcareService",
                "Organization",
            ]),
        ElementInfo::new("servicePeriod", &["Period"]).summary(),
        ElementInfo::new("coverage", &["Account.Coverage"]).repeating().summary(),
        ElementInfo::new("owner", &["Reference"])
            .summary()
            .targets(&["Organization"]),
        ElementInfo::new("description", &["string"]).summary(),
        ElementInfo::new("guarantor", &["Account.Guarantor"]).repeating(),
        ElementInfo::new("partOf", &["Reference"]).targets(&["Account"]),
    ],
};

pub static ACCOUNT_COVERAGE_INFO: TypeInfo = TypeInfo {
    name: "Account.Coverage",
    kind: TypeKind::BackboneElement,
    is_abstract: false,
    base: Some("BackboneElement"),
    elements: &[
        ElementInfo::new("coverage", &["Reference"])
            .required()
            .summary()
            .targets(&["Coverage"]),
        ElementInfo::new("priority", &["positiveInt"]).summary(),
    ],
};

pub static ACCOUNT_GUARANTOR_INFO: TypeInfo = TypeInfo {
    name: "Account.Guarantor",
    kind: TypeKind::BackboneElement,
    is_abstract: false,
    base: Some("BackboneElement"),
    elements: &[
        ElementInfo::new("party", &["Reference"])
            .required()
            .targets(&["Patient", "RelatedPerson", "Organization"]),
        ElementInfo::new("onHold", &["boolean"]),
        ElementInfo::new("period", &["Period"]),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Account {
    base: DomainResourceBase,
    identifier: Vec<Identifier>,
    status: Code,
    type_: Option<CodeableConcept>,
    name: Option<FhirString>,
    subject: Vec<Reference>,
    service_period: Option<Period>,
    coverage: Vec<AccountCoverage>,
    owner: Option<Reference>,
    description: Option<FhirString>,
    guarantor: Vec<AccountGuarantor>,
    part_of: Option<Reference>,
}

impl Account {
    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    /// `active | inactive | entered-in-error | on-hold | unknown`
    pub fn status(&self) -> &Code {
        &self.status
    }

    pub fn type_(&self) -> Option<&CodeableConcept> {
        self.type_.as_ref()
    }

    pub fn name(&self) -> Option<&FhirString> {
        self.name.as_ref()
    }

    /// The entities the account's charges are associated with
    pub fn subject(&self) -> &[Reference] {
        &self.subject
    }

    pub fn service_period(&self) -> Option<&Period> {
        self.service_period.as_ref()
    }

    /// Coverages in the order they should be used
    pub fn coverage(&self) -> &[AccountCoverage] {
        &self.coverage
    }

    pub fn owner(&self) -> Option<&Reference> {
        self.owner.as_ref()
    }

    pub fn description(&self) -> Option<&FhirString> {
        self.description.as_ref()
    }

    pub fn guarantor(&self) -> &[AccountGuarantor] {
        &self.guarantor
    }

    pub fn part_of(&self) -> Option<&Reference> {
        self.part_of.as_ref()
    }
}

impl_domain_resource!(Account, AccountBuilder);

impl ModelType for Account {
    fn schema() -> &'static TypeInfo {
        &ACCOUNT_INFO
    }
}

impl Visitable for Account {
    fn type_info(&self) -> &'static TypeInfo {
        &ACCOUNT_INFO
    }

    fn children<'a>(&'a self, children: &mut Children<'a>) {
        self.base.children(children);
        children
            .list("identifier", &self.identifier)
            .element("status", Some(&self.status))
            .element("type", self.type_.as_ref())
            .element("name", self.name.as_ref())
            .list("subject", &self.subject)
            .element("servicePeriod", self.service_period.as_ref())
            .list("coverage", &self.coverage)
            .element("owner", self.owner.as_ref())
            .element("description", self.description.as_ref())
            .list("guarantor", &self.guarantor)
            .element("partOf", self.part_of.as_ref());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Buildable for Account {
    type Builder = AccountBuilder;

    fn builder() -> AccountBuilder {
        AccountBuilder::default()
    }

    fn to_builder(&self) -> AccountBuilder {
        AccountBuilder {
            base: DomainResourceBuilderBase::from_base(&self.base),
            identifier: self.identifier.iter().cloned().map(Some).collect(),
            status: Some(self.status.clone()),
            type_: self.type_.clone(),
            name: self.name.clone(),
            subject: self.subject.iter().cloned().map(Some).collect(),
            service_period: self.service_period.clone(),
            coverage: self.coverage.iter().cloned().map(Some).collect(),
            owner: self.owner.clone(),
            description: self.description.clone(),
            guarantor: self.guarantor.iter().cloned().map(Some).collect(),
            part_of: self.part_of.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AccountBuilder {
    base: DomainResourceBuilderBase,
    identifier: Vec<Option<Identifier>>,
    status: Option<Code>,
    type_: Option<CodeableConcept>,
    name: Option<FhirString>,
    subject: Vec<Option<Reference>>,
    service_period: Option<Period>,
    coverage: Vec<Option<AccountCoverage>>,
    owner: Option<Reference>,
    description: Option<FhirString>,
    guarantor: Vec<Option<AccountGuarantor>>,
    part_of: Option<Reference>,
}

impl AccountBuilder {
    pub fn identifier<I>(mut self, identifier: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Identifier>>,
    {
        self.identifier.extend(identifier.into_iter().map(Into::into));
        self
    }

    pub fn set_identifier<I>(mut self, identifier: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Identifier>>,
    {
        self.identifier = identifier.into_iter().map(Into::into).collect();
        self
    }

    pub fn status(mut self, status: impl Into<Option<Code>>) -> Self {
        self.status = status.into();
        self
    }

    pub fn type_(mut self, type_: impl Into<Option<CodeableConcept>>) -> Self {
        self.type_ = type_.into();
        self
    }

    pub fn name(mut self, name: impl Into<Option<FhirString>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn subject<I>(mut self, subject: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Reference>>,
    {
        self.subject.extend(subject.into_iter().map(Into::into));
        self
    }

    pub fn set_subject<I>(mut self, subject: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Reference>>,
    {
        self.subject = subject.into_iter().map(Into::into).collect();
        self
    }

    pub fn service_period(mut self, service_period: impl Into<Option<Period>>) -> Self {
        self.service_period = service_period.into();
        self
    }

    pub fn coverage<I>(mut self, coverage: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<AccountCoverage>>,
    {
        self.coverage.extend(coverage.into_iter().map(Into::into));
        self
    }

    pub fn set_coverage<I>(mut self, coverage: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<AccountCoverage>>,
    {
        self.coverage = coverage.into_iter().map(Into::into).collect();
        self
    }

    pub fn owner(mut self, owner: impl Into<Option<Reference>>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn description(mut self, description: impl Into<Option<FhirString>>) -> Self {
        self.description = description.into();
        self
    }

    pub fn guarantor<I>(mut self, guarantor: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<AccountGuarantor>>,
    {
        self.guarantor.extend(guarantor.into_iter().map(Into::into));
        self
    }

    pub fn set_guarantor<I>(mut self, guarantor: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<AccountGuarantor>>,
    {
        self.guarantor = guarantor.into_iter().map(Into::into).collect();
        self
    }

    pub fn part_of(mut self, part_of: impl Into<Option<Reference>>) -> Self {
        self.part_of = part_of.into();
        self
    }
}

impl Builder for AccountBuilder {
    type Target = Account;

    fn freeze(&self, config: &ModelConfig) -> Result<Account> {
        let info = &ACCOUNT_INFO;
        let base = self.base.freeze(info, config)?;

        let status = validation::require_non_null(self.status.as_ref(), &info.path("status"))?;

        let identifier = validation::check_list(&self.identifier, &info.path("identifier"), &IDENTIFIER_INFO)?;
        let subject = validation::check_list(&self.subject, &info.path("subject"), Reference::schema())?;
        let coverage = validation::check_list(&self.coverage, &info.path("coverage"), &ACCOUNT_COVERAGE_INFO)?;
        let guarantor =
            validation::check_list(&self.guarantor, &info.path("guarantor"), &ACCOUNT_GUARANTOR_INFO)?;

        validation::check_references(info, "subject", &subject, config)?;
        validation::check_references(info, "owner", self.owner.as_ref(), config)?;
        validation::check_references(info, "partOf", self.part_of.as_ref(), config)?;

        Ok(Account {
            base,
            identifier,
            status: status.clone(),
            type_: self.type_.clone(),
            name: self.name.clone(),
            subject,
            service_period: self.service_period.clone(),
            coverage,
            owner: self.owner.clone(),
            description: self.description.clone(),
            guarantor,
            part_of: self.part_of.clone(),
        })
    }
}

/// `Account.coverage`: a coverage paying for the account's charges
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountCoverage {
    base: BackboneBase,
    coverage: Reference,
    priority: Option<PositiveInt>,
}

impl AccountCoverage {
    pub fn coverage(&self) -> &Reference {
        &self.coverage
    }

    pub fn priority(&self) -> Option<&PositiveInt> {
        self.priority.as_ref()
    }
}

impl_backbone_element!(AccountCoverage, AccountCoverageBuilder);

impl HasChildren for AccountCoverage {
    fn has_children(&self) -> bool {
        true
    }
}

impl ModelType for AccountCoverage {
    fn schema() -> &'static TypeInfo {
        &ACCOUNT_COVERAGE_INFO
    }
}

impl Visitable for AccountCoverage {
    fn type_info(&self) -> &'static TypeInfo {
        &ACCOUNT_COVERAGE_INFO
    }

    fn children<'a>(&'a self, children: &mut Children<'a>) {
        self.base.children(children);
        children
            .element("coverage", Some(&self.coverage))
            .element("priority", self.priority.as_ref());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Buildable for AccountCoverage {
    type Builder = AccountCoverageBuilder;

    fn builder() -> AccountCoverageBuilder {
        AccountCoverageBuilder::default()
    }

    fn to_builder(&self) -> AccountCoverageBuilder {
        AccountCoverageBuilder {
            base: BackboneBuilderBase::from_base(&self.base),
            coverage: Some(self.coverage.clone()),
            priority: self.priority.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AccountCoverageBuilder {
    base: BackboneBuilderBase,
    coverage: Option<Reference>,
    priority: Option<PositiveInt>,
}

impl AccountCoverageBuilder {
    pub fn coverage(mut self, coverage: impl Into<Option<Reference>>) -> Self {
        self.coverage = coverage.into();
        self
    }

    pub fn priority(mut self, priority: impl Into<Option<PositiveInt>>) -> Self {
        self.priority = priority.into();
        self
    }
}

impl Builder for AccountCoverageBuilder {
    type Target = AccountCoverage;

    fn freeze(&self, config: &ModelConfig) -> Result<AccountCoverage> {
        let info = &ACCOUNT_COVERAGE_INFO;
        let base = self.base.freeze(info, config)?;
        let coverage = validation::require_non_null(self.coverage.as_ref(), &info.path("coverage"))?;
        validation::check_references(info, "coverage", Some(coverage), config)?;
        Ok(AccountCoverage {
            base,
            coverage: coverage.clone(),
            priority: self.priority.clone(),
        })
    }
}

/// `Account.guarantor`: a party responsible for balancing the account
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountGuarantor {
    base: BackboneBase,
    party: Reference,
    on_hold: Option<Boolean>,
    period: Option<Period>,
}

impl AccountGuarantor {
    pub fn party(&self) -> &Reference {
        &self.party
    }

    pub fn on_hold(&self) -> Option<&Boolean> {
        self.on_hold.as_ref()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }
}

impl_backbone_element!(AccountGuarantor, AccountGuarantorBuilder);

impl HasChildren for AccountGuarantor {
    fn has_children(&self) -> bool {
        true
    }
}

impl ModelType for AccountGuarantor {
    fn schema() -> &'static TypeInfo {
        &ACCOUNT_GUARANTOR_INFO
    }
}

impl Visitable for AccountGuarantor {
    fn type_info(&self) -> &'static TypeInfo {
        &ACCOUNT_GUARANTOR_INFO
    }

    fn children<'a>(&'a self, children: &mut Children<'a>) {
        self.base.children(children);
        children
            .element("party", Some(&self.party))
            .element("onHold", self.on_hold.as_ref())
            .element("period", self.period.as_ref());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Buildable for AccountGuarantor {
    type Builder = AccountGuarantorBuilder;

    fn builder() -> AccountGuarantorBuilder {
        AccountGuarantorBuilder::default()
    }

    fn to_builder(&self) -> AccountGuarantorBuilder {
        AccountGuarantorBuilder {
            base: BackboneBuilderBase::from_base(&self.base),
            party: Some(self.party.clone()),
            on_hold: self.on_hold.clone(),
            period: self.period.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AccountGuarantorBuilder {
    base: BackboneBuilderBase,
    party: Option<Reference>,
    on_hold: Option<Boolean>,
    period: Option<Period>,
}

impl AccountGuarantorBuilder {
    pub fn party(mut self, party: impl Into<Option<Reference>>) -> Self {
        self.party = party.into();
        self
    }

    pub fn on_hold(mut self, on_hold: impl Into<Option<Boolean>>) -> Self {
        self.on_hold = on_hold.into();
        self
    }

    pub fn period(mut self, period: impl Into<Option<Period>>) -> Self {
        self.period = period.into();
        self
    }
}

impl Builder for AccountGuarantorBuilder {
    type Target = AccountGuarantor;

    fn freeze(&self, config: &ModelConfig) -> Result<AccountGuarantor> {
        let info = &ACCOUNT_GUARANTOR_INFO;
        let base = self.base.freeze(info, config)?;
        let party = validation::require_non_null(self.party.as_ref(), &info.path("party"))?;
        validation::check_references(info, "party", Some(party), config)?;
        Ok(AccountGuarantor {
            base,
            party: party.clone(),
            on_hold: self.on_hold.clone(),
            period: self.period.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ListDefect, ReferenceDefect, ValidationError};
    use crate::prelude::*;
    use crate::primitive::Id;

    fn reference(literal: &str) -> Reference {
        Reference::builder()
            .reference(FhirString::of(literal).unwrap())
            .build()
            .unwrap()
    }

    fn coverage(literal: &str) -> AccountCoverage {
        AccountCoverage::builder()
            .coverage(reference(literal))
            .priority(PositiveInt::of(1).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_minimal_account() {
        let account = Account::builder()
            .status(Code::of("active").unwrap())
            .build()
            .unwrap();
        assert_eq!(account.status().as_str(), Some("active"));
        assert!(account.coverage().is_empty());
        assert!(account.id().is_none());
    }

    #[test]
    fn test_status_required() {
        let err = Account::builder().build().unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingRequiredField {
                path: "Account.status".to_string()
            }
        );
    }

    #[test]
    fn test_subject_targets_checked_per_entry() {
        let err = Account::builder()
            .status(Code::of("active").unwrap())
            .subject([reference("Patient/p1"), reference("Specimen/s1")])
            .build()
            .unwrap_err();
        match err {
            ValidationError::ReferenceTargetViolation {
                path,
                reference,
                defect,
            } => {
                assert_eq!(path, "Account.subject");
                assert_eq!(reference, "Specimen/s1");
                assert!(matches!(defect, ReferenceDefect::TargetNotAllowed { .. }));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_coverage_reference_required() {
        let err = AccountCoverage::builder()
            .priority(PositiveInt::of(2).unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err.path(), "Account.coverage.coverage");
    }

    #[test]
    fn test_coverage_list_hole() {
        let err = Account::builder()
            .status(Code::of("active").unwrap())
            .coverage([Some(coverage("Coverage/c1")), None])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MalformedList {
                path: "Account.coverage".to_string(),
                index: 1,
                defect: ListDefect::NullEntry,
            }
        );
    }

    #[test]
    fn test_guarantor_party_targets() {
        let ok = AccountGuarantor::builder()
            .party(reference("RelatedPerson/r1"))
            .on_hold(Boolean::of(false).unwrap())
            .build();
        assert!(ok.is_ok());

        let err = AccountGuarantor::builder()
            .party(reference("Device/d1"))
            .build()
            .unwrap_err();
        assert_eq!(err.path(), "Account.guarantor.party");
    }

    #[test]
    fn test_copy_with() {
        let account = Account::builder()
            .id(Id::of("acc-1").unwrap())
            .status(Code::of("active").unwrap())
            .coverage([coverage("Coverage/c1")])
            .build()
            .unwrap();
        let closed = account
            .to_builder()
            .status(Code::of("inactive").unwrap())
            .build()
            .unwrap();
        assert_eq!(account.status().as_str(), Some("active"));
        assert_eq!(closed.status().as_str(), Some("inactive"));
        assert_eq!(closed.coverage(), account.coverage());
        assert_eq!(closed.id(), account.id());
    }

    #[test]
    fn test_modifier_extension_on_backbone() {
        let flag = crate::datatypes::Extension::builder()
            .url("http://example.org/do-not-bill")
            .value(Boolean::of(true).unwrap())
            .build()
            .unwrap();
        let cov = AccountCoverage::builder()
            .coverage(reference("Coverage/c1"))
            .modifier_extension([flag])
            .build()
            .unwrap();
        assert_eq!(cov.modifier_extension().len(), 1);
        assert!(cov.extension().is_empty());
    }
}
