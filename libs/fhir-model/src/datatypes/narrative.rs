//! Narrative
//!
//! Human-readable summary of a resource: an XHTML `div` and a status saying
//! how it was produced.

use std::any::Any;

use crate::builder::{Buildable, Builder};
use crate::config::ModelConfig;
use crate::element::{impl_element, Element, ElementBase, ElementBuilderBase, HasChildren};
use crate::error::Result;
use crate::primitive::{Code, Xhtml};
use crate::schema::{BindingStrength, ElementInfo, ModelType, TypeInfo, TypeKind};
use crate::validation;
use crate::visitor::{Children, Visitable};

pub static NARRATIVE_INFO: TypeInfo = TypeInfo {
    name: "Narrative",
    kind: TypeKind::ComplexType,
    is_abstract: false,
    base: Some("Element"),
    elements: &[
        ElementInfo::new("status", &["code"])
            .required()
            .bound(BindingStrength::Required, "http://hl7.org/fhir/ValueSet/narrative-status|4.0.1"),
        ElementInfo::new("div", &["xhtml"]).required(),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Narrative {
    base: ElementBase,
    status: Code,
    div: Xhtml,
}

impl Narrative {
    /// `generated | extensions | additional | empty`
    pub fn status(&self) -> &Code {
        &self.status
    }

    pub fn div(&self) -> &Xhtml {
        &self.div
    }
}

impl_element!(Narrative, NarrativeBuilder);

impl HasChildren for Narrative {
    fn has_children(&self) -> bool {
        true
    }
}

impl Element for Narrative {}

impl ModelType for Narrative {
    fn schema() -> &'static TypeInfo {
        &NARRATIVE_INFO
    }
}

impl Visitable for Narrative {
    fn type_info(&self) -> &'static TypeInfo {
        &NARRATIVE_INFO
    }

    fn children<'a>(&'a self, children: &mut Children<'a>) {
        self.base.children(children);
        children
            .element("status", Some(&self.status))
            .element("div", Some(&self.div));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Buildable for Narrative {
    type Builder = NarrativeBuilder;

    fn builder() -> NarrativeBuilder {
        NarrativeBuilder::default()
    }

    fn to_builder(&self) -> NarrativeBuilder {
        NarrativeBuilder {
            base: ElementBuilderBase::from_base(&self.base),
            status: Some(self.status.clone()),
            div: Some(self.div.clone()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NarrativeBuilder {
    base: ElementBuilderBase,
    status: Option<Code>,
    div: Option<Xhtml>,
}

impl NarrativeBuilder {
    pub fn status(mut self, status: impl Into<Option<Code>>) -> Self {
        self.status = status.into();
        self
    }

    pub fn div(mut self, div: impl Into<Option<Xhtml>>) -> Self {
        self.div = div.into();
        self
    }
}

impl Builder for NarrativeBuilder {
    type Target = Narrative;

    fn freeze(&self, config: &ModelConfig) -> Result<Narrative> {
        let info = &NARRATIVE_INFO;
        let base = self.base.freeze(info, config)?;
        let status = validation::require_non_null(self.status.as_ref(), &info.path("status"))?;
        let div = validation::require_non_null(self.div.as_ref(), &info.path("div"))?;
        Ok(Narrative {
            base,
            status: status.clone(),
            div: div.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_required_fields_in_declaration_order() {
        let err = Narrative::builder().build().unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingRequiredField {
                path: "Narrative.status".to_string()
            }
        );

        let err = Narrative::builder()
            .status(Code::of("generated").unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err.path(), "Narrative.div");
    }
}
