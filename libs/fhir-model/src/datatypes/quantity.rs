//! Quantity

use std::any::Any;

use crate::builder::{Buildable, Builder};
use crate::config::ModelConfig;
use crate::element::{impl_element, Element, ElementBase, ElementBuilderBase, HasChildren};
use crate::error::Result;
use crate::primitive::{Code, Decimal, FhirString, Uri};
use crate::schema::{BindingStrength, ElementInfo, ModelType, TypeInfo, TypeKind};
use crate::validation;
use crate::visitor::{Children, Visitable};

pub static QUANTITY_INFO: TypeInfo = TypeInfo {
    name: "Quantity",
    kind: TypeKind::ComplexType,
    is_abstract: false,
    base: Some("Element"),
    elements: &[
        ElementInfo::new("value", &["decimal"]).summary(),
        ElementInfo::new("comparator", &["code"])
            .modifier()
            .summary()
            .bound(BindingStrength::Required, "http://hl7.org/fhir/ValueSet/quantity-comparator|4.0.1"),
        ElementInfo::new("unit", &["string"]).summary(),
        ElementInfo::new("system", &["uri"]).summary(),
        ElementInfo::new("code", &["code"]).summary(),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quantity {
    base: ElementBase,
    value: Option<Decimal>,
    comparator: Option<Code>,
    unit: Option<FhirString>,
    system: Option<Uri>,
    code: Option<Code>,
}

impl Quantity {
    pub fn value(&self) -> Option<&Decimal> {
        self.value.as_ref()
    }

    /// `<`, `<=`, `>=` or `>`; changes how the value is read
    pub fn comparator(&self) -> Option<&Code> {
        self.comparator.as_ref()
    }

    pub fn unit(&self) -> Option<&FhirString> {
        self.unit.as_ref()
    }

    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }
}

impl_element!(Quantity, QuantityBuilder);

impl HasChildren for Quantity {
    fn has_children(&self) -> bool {
        self.base.has_children()
            || self.value.is_some()
            || self.comparator.is_some()
            || self.unit.is_some()
            || self.system.is_some()
            || self.code.is_some()
    }
}

impl Element for Quantity {}

impl ModelType for Quantity {
    fn schema() -> &'static TypeInfo {
        &QUANTITY_INFO
    }
}

impl Visitable for Quantity {
    fn type_info(&self) -> &'static TypeInfo {
        &QUANTITY_INFO
    }

    fn children<'a>(&'a self, children: &mut Children<'a>) {
        self.base.children(children);
        children
            .element("value", self.value.as_ref())
            .element("comparator", self.comparator.as_ref())
            .element("unit", self.unit.as_ref())
            .element("system", self.system.as_ref())
            .element("code", self.code.as_ref());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Buildable for Quantity {
    type Builder = QuantityBuilder;

    fn builder() -> QuantityBuilder {
        QuantityBuilder::default()
    }

    fn to_builder(&self) -> QuantityBuilder {
        QuantityBuilder {
            base: ElementBuilderBase::from_base(&self.base),
            value: self.value.clone(),
            comparator: self.comparator.clone(),
            unit: self.unit.clone(),
            system: self.system.clone(),
            code: self.code.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuantityBuilder {
    base: ElementBuilderBase,
    value: Option<Decimal>,
    comparator: Option<Code>,
    unit: Option<FhirString>,
    system: Option<Uri>,
    code: Option<Code>,
}

impl QuantityBuilder {
    pub fn value(mut self, value: impl Into<Option<Decimal>>) -> Self {
        self.value = value.into();
        self
    }

    pub fn comparator(mut self, comparator: impl Into<Option<Code>>) -> Self {
        self.comparator = comparator.into();
        self
    }

    pub fn unit(mut self, unit: impl Into<Option<FhirString>>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn system(mut self, system: impl Into<Option<Uri>>) -> Self {
        self.system = system.into();
        self
    }

    pub fn code(mut self, code: impl Into<Option<Code>>) -> Self {
        self.code = code.into();
        self
    }
}

impl Builder for QuantityBuilder {
    type Target = Quantity;

    fn freeze(&self, config: &ModelConfig) -> Result<Quantity> {
        let info = &QUANTITY_INFO;
        let quantity = Quantity {
            base: self.base.freeze(info, config)?,
            value: self.value.clone(),
            comparator: self.comparator.clone(),
            unit: self.unit.clone(),
            system: self.system.clone(),
            code: self.code.clone(),
        };
        validation::require_value_or_children(&quantity, info.name)?;
        Ok(quantity)
    }
}
