//! Extension
//!
//! A URL-keyed annotation carrying either a single value or nested extensions.

use std::any::Any;

use crate::builder::{Buildable, Builder};
use crate::choice::{choice_type, Choice, DataType};
use crate::config::ModelConfig;
use crate::datatypes::{CodeableConcept, Coding, Identifier, Period, Quantity, Reference};
use crate::element::{impl_element, Element, ElementBase, ElementBuilderBase, HasChildren};
use crate::error::Result;
use crate::primitive::{
    Base64Binary, Boolean, Canonical, Code, Date, DateTime, Decimal, FhirString, Id, Instant,
    Integer, Markdown, PositiveInt, Time, UnsignedInt, Uri, ValueRef,
};
use crate::schema::{ElementInfo, ModelType, TypeInfo, TypeKind};
use crate::validation;
use crate::visitor::{Children, Visitable};

pub static EXTENSION_INFO: TypeInfo = TypeInfo {
    name: "Extension",
    kind: TypeKind::ComplexType,
    is_abstract: false,
    base: Some("Element"),
    elements: &[
        ElementInfo::new("url", &["uri"]).required(),
        ElementInfo::new("value", ExtensionValue::ALLOWED_TYPES),
    ],
};

choice_type! {
    /// `Extension.value[x]`
    pub enum ExtensionValue {
        Base64Binary(Base64Binary) = "base64Binary",
        Boolean(Boolean) = "boolean",
        Canonical(Canonical) = "canonical",
        Code(Code) = "code",
        Date(Date) = "date",
        DateTime(DateTime) = "dateTime",
        Decimal(Decimal) = "decimal",
        Id(Id) = "id",
        Instant(Instant) = "instant",
        Integer(Integer) = "integer",
        Markdown(Markdown) = "markdown",
        PositiveInt(PositiveInt) = "positiveInt",
        String(FhirString) = "string",
        Time(Time) = "time",
        UnsignedInt(UnsignedInt) = "unsignedInt",
        Uri(Uri) = "uri",
        CodeableConcept(CodeableConcept) = "CodeableConcept",
        Coding(Coding) = "Coding",
        Identifier(Identifier) = "Identifier",
        Period(Period) = "Period",
        Quantity(Quantity) = "Quantity",
        Reference(Reference) = "Reference",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Extension {
    base: ElementBase,
    url: String,
    value: Option<ExtensionValue>,
}

impl Extension {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn value(&self) -> Option<&ExtensionValue> {
        self.value.as_ref()
    }
}

impl_element!(Extension, ExtensionBuilder);

impl HasChildren for Extension {
    fn has_children(&self) -> bool {
        self.base.has_children() || self.value.is_some()
    }
}

impl Element for Extension {}

impl ModelType for Extension {
    fn schema() -> &'static TypeInfo {
        &EXTENSION_INFO
    }
}

impl Visitable for Extension {
    fn type_info(&self) -> &'static TypeInfo {
        &EXTENSION_INFO
    }

    fn children<'a>(&'a self, children: &mut Children<'a>) {
        self.base.children(children);
        children
            .value("url", Some(ValueRef::String(&self.url)))
            .node("value", self.value.as_ref().map(Choice::as_node));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Buildable for Extension {
    type Builder = ExtensionBuilder;

    fn builder() -> ExtensionBuilder {
        ExtensionBuilder::default()
    }

    fn to_builder(&self) -> ExtensionBuilder {
        ExtensionBuilder {
            base: ElementBuilderBase::from_base(&self.base),
            url: Some(self.url.clone()),
            value: self.value.clone().map(Choice::into_data),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExtensionBuilder {
    base: ElementBuilderBase,
    url: Option<String>,
    value: Option<DataType>,
}

impl ExtensionBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Stage the value; a later call replaces it
    pub fn value(mut self, value: impl Into<DataType>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl Builder for ExtensionBuilder {
    type Target = Extension;

    fn freeze(&self, config: &ModelConfig) -> Result<Extension> {
        let info = &EXTENSION_INFO;
        let base = self.base.freeze(info, config)?;
        let url = validation::require_non_null(self.url.as_ref(), &info.path("url"))?;
        validation::check_uri(url, &info.path("url"), config)?;
        let value: Option<ExtensionValue> =
            validation::choice_element(self.value.as_ref(), &info.path("value"))?;
        validation::check_references(
            info,
            "value",
            value.as_ref().and_then(Choice::as_reference),
            config,
        )?;
        let extension = Extension {
            base,
            url: url.clone(),
            value,
        };
        // an extension has a value or nested extensions, never just a url
        validation::require_value_or_children(&extension, info.name)?;
        Ok(extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementBuilder, HasExtensions};
    use crate::error::{ErrorKind, ValidationError};

    #[test]
    fn test_missing_url() {
        let err = Extension::builder()
            .value(Boolean::of(true).unwrap())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingRequiredField {
                path: "Extension.url".to_string()
            }
        );
    }

    #[test]
    fn test_value_outside_choice_set() {
        let narrative_status = crate::datatypes::Narrative::builder()
            .status(Code::of("generated").unwrap())
            .div(crate::primitive::Xhtml::of("<div>hi</div>").unwrap())
            .build()
            .unwrap();
        let err = Extension::builder()
            .url("http://example.org/n")
            .value(narrative_status)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::ChoiceTypeViolation {
                path: "Extension.value".to_string(),
                found: "Narrative",
                allowed: ExtensionValue::ALLOWED_TYPES,
            }
        );
    }

    #[test]
    fn test_last_value_wins() {
        let extension = Extension::builder()
            .url("http://example.org/x")
            .value(Boolean::of(true).unwrap())
            .value(Code::of("c").unwrap())
            .build()
            .unwrap();
        assert!(matches!(extension.value(), Some(ExtensionValue::Code(_))));
    }

    #[test]
    fn test_nested_extensions_satisfy_value_or_children() {
        let inner = Extension::builder()
            .url("inner")
            .value(Integer::of(1).unwrap())
            .build()
            .unwrap();
        let outer = Extension::builder()
            .url("http://example.org/complex")
            .extension([inner])
            .build()
            .unwrap();
        assert_eq!(outer.extension().len(), 1);

        let err = Extension::builder().url("http://example.org/empty").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyElementViolation);
    }

    #[test]
    fn test_reference_value_is_checked() {
        let reference = Reference::builder()
            .reference(FhirString::of("Nothing/1").unwrap())
            .build()
            .unwrap();
        let err = Extension::builder()
            .url("http://example.org/r")
            .value(reference)
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReferenceTargetViolation);
    }
}
