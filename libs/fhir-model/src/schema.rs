//! Static schema metadata
//!
//! Every modeled type carries a [`TypeInfo`] describing its elements: cardinality,
//! permitted types (several for choice elements), reference targets, modifier and
//! summary flags, and terminology bindings. Validation consults this table rather
//! than repeating per-field target lists, and traversal consumers can use it to
//! interpret what they walk.
//!
//! Uses compile-time perfect hash maps (phf) for type-name lookups.

use phf::{phf_map, phf_set};

use crate::datatypes::{
    codeable_concept, coding, extension, identifier, meta, narrative, period, quantity, reference,
};
use crate::element;
use crate::primitive;
use crate::resource::{self, account, observation, patient};

/// Kind of a modeled type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Primitive type (e.g., string, integer, boolean)
    PrimitiveType,
    /// Complex datatype (e.g., Coding, Quantity, Reference)
    ComplexType,
    /// Backbone element (nested complex element within a resource)
    BackboneElement,
    /// Resource (e.g., Patient, Observation)
    Resource,
}

/// Binding strength for terminology bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingStrength {
    Required,
    Extensible,
    Preferred,
    Example,
}

/// Terminology binding declared on a coded element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binding {
    pub strength: BindingStrength,
    pub value_set: &'static str,
}

/// Static description of one element of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementInfo {
    /// Element name as it appears in paths (e.g. `subject`, `value`)
    pub name: &'static str,
    /// Permitted type names; more than one means a choice element
    pub type_names: &'static [&'static str],
    pub min: u32,
    /// None means unbounded
    pub max: Option<u32>,
    /// Acceptable target resource types for Reference elements
    pub reference_targets: &'static [&'static str],
    pub modifier: bool,
    pub summary: bool,
    pub binding: Option<Binding>,
}

impl ElementInfo {
    pub const fn new(name: &'static str, type_names: &'static [&'static str]) -> Self {
        Self {
            name,
            type_names,
            min: 0,
            max: Some(1),
            reference_targets: &[],
            modifier: false,
            summary: false,
            binding: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.min = 1;
        self
    }

    pub const fn repeating(mut self) -> Self {
        self.max = None;
        self
    }

    pub const fn targets(mut self, targets: &'static [&'static str]) -> Self {
        self.reference_targets = targets;
        self
    }

    pub const fn modifier(mut self) -> Self {
        self.modifier = true;
        self
    }

    pub const fn summary(mut self) -> Self {
        self.summary = true;
        self
    }

    pub const fn bound(mut self, strength: BindingStrength, value_set: &'static str) -> Self {
        self.binding = Some(Binding {
            strength,
            value_set,
        });
        self
    }

    pub fn is_required(&self) -> bool {
        self.min > 0
    }

    pub fn is_repeating(&self) -> bool {
        self.max.map(|m| m > 1).unwrap_or(true)
    }

    pub fn is_choice(&self) -> bool {
        self.type_names.len() > 1
    }

    pub fn is_reference(&self) -> bool {
        !self.reference_targets.is_empty()
    }
}

/// Static description of a modeled type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    /// Type name; backbone elements use their path (e.g. `Account.Coverage`)
    pub name: &'static str,
    pub kind: TypeKind,
    pub is_abstract: bool,
    /// Type this one specializes
    pub base: Option<&'static str>,
    /// Elements declared by this type itself, in declaration order
    pub elements: &'static [ElementInfo],
}

impl TypeInfo {
    /// The base type's metadata, if registered
    pub fn base_info(&self) -> Option<&'static TypeInfo> {
        self.base.and_then(type_info)
    }

    /// Look an element up on this type or any of its ancestors
    pub fn element(&self, name: &str) -> Option<&'static ElementInfo> {
        let elements: &'static [ElementInfo] = self.elements;
        if let Some(found) = elements.iter().find(|e| e.name == name) {
            return Some(found);
        }
        let mut current = self.base_info();
        while let Some(info) = current {
            if let Some(found) = info.elements.iter().find(|e| e.name == name) {
                return Some(found);
            }
            current = info.base_info();
        }
        None
    }

    /// All elements, ancestor-declared first
    pub fn all_elements(&self) -> Vec<&ElementInfo> {
        let mut chain = vec![self];
        let mut current = self.base_info();
        while let Some(info) = current {
            chain.push(info);
            current = info.base_info();
        }
        chain
            .into_iter()
            .rev()
            .flat_map(|info| info.elements.iter())
            .collect()
    }

    /// True if this type is `name` or specializes it
    pub fn is_a(&self, name: &str) -> bool {
        if self.name == name {
            return true;
        }
        let mut current = self.base_info();
        while let Some(info) = current {
            if info.name == name {
                return true;
            }
            current = info.base_info();
        }
        false
    }

    /// `Type.element` path used in error messages and traversal paths
    ///
    /// Backbone types are named after their owning element, so
    /// `Account.Coverage` yields `Account.coverage.<element>`.
    pub fn path(&self, element: &str) -> String {
        match (self.kind, self.name.rsplit_once('.')) {
            (TypeKind::BackboneElement, Some((owner, segment))) => {
                let mut chars = segment.chars();
                let head: String = chars.next().map(|c| c.to_lowercase().collect()).unwrap_or_default();
                format!("{}.{}{}.{}", owner, head, chars.as_str(), element)
            }
            _ => format!("{}.{}", self.name, element),
        }
    }
}

/// Implemented by every modeled type
pub trait ModelType {
    /// Metadata of the type itself (not of a runtime variant)
    fn schema() -> &'static TypeInfo;
}

static TYPES: phf::Map<&'static str, &'static TypeInfo> = phf_map! {
    // Abstract bases
    "Element" => &element::ELEMENT_INFO,
    "BackboneElement" => &element::BACKBONE_ELEMENT_INFO,
    "Resource" => &resource::RESOURCE_INFO,
    "DomainResource" => &resource::DOMAIN_RESOURCE_INFO,

    // Primitive types
    "boolean" => &primitive::BOOLEAN_INFO,
    "integer" => &primitive::INTEGER_INFO,
    "positiveInt" => &primitive::POSITIVE_INT_INFO,
    "unsignedInt" => &primitive::UNSIGNED_INT_INFO,
    "decimal" => &primitive::DECIMAL_INFO,
    "string" => &primitive::STRING_INFO,
    "code" => &primitive::CODE_INFO,
    "id" => &primitive::ID_INFO,
    "markdown" => &primitive::MARKDOWN_INFO,
    "uri" => &primitive::URI_INFO,
    "canonical" => &primitive::CANONICAL_INFO,
    "xhtml" => &primitive::XHTML_INFO,
    "date" => &primitive::DATE_INFO,
    "dateTime" => &primitive::DATE_TIME_INFO,
    "instant" => &primitive::INSTANT_INFO,
    "time" => &primitive::TIME_INFO,
    "base64Binary" => &primitive::BASE64_BINARY_INFO,

    // Complex types
    "Extension" => &extension::EXTENSION_INFO,
    "Reference" => &reference::REFERENCE_INFO,
    "Identifier" => &identifier::IDENTIFIER_INFO,
    "Coding" => &coding::CODING_INFO,
    "CodeableConcept" => &codeable_concept::CODEABLE_CONCEPT_INFO,
    "Period" => &period::PERIOD_INFO,
    "Quantity" => &quantity::QUANTITY_INFO,
    "Meta" => &meta::META_INFO,
    "Narrative" => &narrative::NARRATIVE_INFO,

    // Resources and their backbone elements
    "Account" => &account::ACCOUNT_INFO,
    "Account.Coverage" => &account::ACCOUNT_COVERAGE_INFO,
    "Account.Guarantor" => &account::ACCOUNT_GUARANTOR_INFO,
    "Observation" => &observation::OBSERVATION_INFO,
    "Observation.Component" => &observation::OBSERVATION_COMPONENT_INFO,
    "Patient" => &patient::PATIENT_INFO,
    "Patient.Link" => &patient::PATIENT_LINK_INFO,
};

/// Every concrete R4 resource type name; reference checks accept any of these
/// even when the type itself is not modeled here.
static RESOURCE_TYPES: phf::Set<&'static str> = phf_set! {
    "Account", "ActivityDefinition", "AdverseEvent", "AllergyIntolerance", "Appointment",
    "AppointmentResponse", "AuditEvent", "Basic", "Binary", "BiologicallyDerivedProduct",
    "BodyStructure", "Bundle", "CapabilityStatement", "CarePlan", "CareTeam", "CatalogEntry",
    "ChargeItem", "ChargeItemDefinition", "Claim", "ClaimResponse", "ClinicalImpression",
    "CodeSystem", "Communication", "CommunicationRequest", "CompartmentDefinition",
    "Composition", "ConceptMap", "Condition", "Consent", "Contract", "Coverage",
    "CoverageEligibilityRequest", "CoverageEligibilityResponse", "DetectedIssue", "Device",
    "DeviceDefinition", "DeviceMetric", "DeviceRequest", "DeviceUseStatement",
    "DiagnosticReport", "DocumentManifest", "DocumentReference", "EffectEvidenceSynthesis",
    "Encounter", "Endpoint", "EnrollmentRequest", "EnrollmentResponse", "EpisodeOfCare",
    "EventDefinition", "Evidence", "EvidenceVariable", "ExampleScenario",
    "ExplanationOfBenefit", "FamilyMemberHistory", "Flag", "Goal", "GraphDefinition", "Group",
    "GuidanceResponse", "HealthcareService", "ImagingStudy", "Immunization",
    "ImmunizationEvaluation", "ImmunizationRecommendation", "ImplementationGuide",
    "InsurancePlan", "Invoice", "Library", "Linkage", "List", "Location", "Measure",
    "MeasureReport", "Media", "Medication", "MedicationAdministration", "MedicationDispense",
    "MedicationKnowledge", "MedicationRequest", "MedicationStatement", "MedicinalProduct",
    "MedicinalProductAuthorization", "MedicinalProductContraindication",
    "MedicinalProductIndication", "MedicinalProductIngredient", "MedicinalProductInteraction",
    "MedicinalProductManufactured", "MedicinalProductPackaged",
    "MedicinalProductPharmaceutical", "MedicinalProductUndesirableEffect", "MessageDefinition",
    "MessageHeader", "MolecularSequence", "NamingSystem", "NutritionOrder", "Observation",
    "ObservationDefinition", "OperationDefinition", "OperationOutcome", "Organization",
    "OrganizationAffiliation", "Parameters", "Patient", "PaymentNotice",
    "PaymentReconciliation", "Person", "PlanDefinition", "Practitioner", "PractitionerRole",
    "Procedure", "Provenance", "Questionnaire", "QuestionnaireResponse", "RelatedPerson",
    "RequestGroup", "ResearchDefinition", "ResearchElementDefinition", "ResearchStudy",
    "ResearchSubject", "RiskAssessment", "RiskEvidenceSynthesis", "Schedule",
    "SearchParameter", "ServiceRequest", "Slot", "Specimen", "SpecimenDefinition",
    "StructureDefinition", "StructureMap", "Subscription", "Substance", "SubstanceNucleicAcid",
    "SubstancePolymer", "SubstanceProtein", "SubstanceReferenceInformation",
    "SubstanceSourceMaterial", "SubstanceSpecification", "SupplyDelivery", "SupplyRequest",
    "Task", "TerminologyCapabilities", "TestReport", "TestScript", "ValueSet",
    "VerificationResult", "VisionPrescription",
};

/// Metadata for a modeled type, by name
pub fn type_info(name: &str) -> Option<&'static TypeInfo> {
    TYPES.get(name).copied()
}

/// All modeled types (order unspecified)
pub fn type_infos() -> impl Iterator<Item = &'static TypeInfo> {
    TYPES.values().copied()
}

/// True if `name` is a concrete resource type name
pub fn is_resource_type(name: &str) -> bool {
    RESOURCE_TYPES.contains(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_resource_type() {
        assert!(is_resource_type("Patient"));
        assert!(is_resource_type("Specimen"));
        assert!(!is_resource_type("Resource"));
        assert!(!is_resource_type("Coding"));
    }

    #[test]
    fn test_element_lookup_walks_bases() {
        let account = type_info("Account").unwrap();
        assert_eq!(account.element("status").unwrap().min, 1);
        // declared on DomainResource
        assert!(account.element("contained").unwrap().is_repeating());
        // declared on Resource
        assert_eq!(account.element("id").unwrap().type_names, &["id"]);
        assert!(account.element("nope").is_none());
    }

    #[test]
    fn test_backbone_paths_use_element_names() {
        assert_eq!(type_info("Account").unwrap().path("status"), "Account.status");
        assert_eq!(
            type_info("Account.Coverage").unwrap().path("coverage"),
            "Account.coverage.coverage"
        );
        assert_eq!(
            type_info("Observation.Component").unwrap().path("code"),
            "Observation.component.code"
        );
        assert_eq!(type_info("Patient.Link").unwrap().path("type"), "Patient.link.type");
    }

    #[test]
    fn test_all_elements_ancestor_first() {
        let coverage = type_info("Account.Coverage").unwrap();
        let names: Vec<_> = coverage.all_elements().iter().map(|e| e.name).collect();
        assert_eq!(
            names,
            vec!["id", "extension", "modifierExtension", "coverage", "priority"]
        );
    }

    #[test]
    fn test_is_a() {
        let observation = type_info("Observation").unwrap();
        assert!(observation.is_a("DomainResource"));
        assert!(observation.is_a("Resource"));
        assert!(!observation.is_a("Element"));
        assert_eq!(observation.kind, TypeKind::Resource);
    }

    #[test]
    fn test_choice_and_reference_metadata() {
        let observation = type_info("Observation").unwrap();
        let value = observation.element("value").unwrap();
        assert!(value.is_choice());
        assert!(value.type_names.contains(&"Quantity"));

        let subject = observation.element("subject").unwrap();
        assert!(subject.is_reference());
        assert!(subject.reference_targets.contains(&"Patient"));

        let status = observation.element("status").unwrap();
        assert!(status.modifier);
        assert_eq!(
            status.binding.map(|b| b.strength),
            Some(BindingStrength::Required)
        );
    }

    #[test]
    fn test_every_registered_type_is_named_by_its_key() {
        for info in type_infos() {
            assert_eq!(type_info(info.name), Some(info));
        }
    }
}
