//! Coding

use std::any::Any;

use crate::builder::{Buildable, Builder};
use crate::config::ModelConfig;
use crate::element::{impl_element, Element, ElementBase, ElementBuilderBase, HasChildren};
use crate::error::Result;
use crate::primitive::{Boolean, Code, FhirString, Uri};
use crate::schema::{ElementInfo, ModelType, TypeInfo, TypeKind};
use crate::validation;
use crate::visitor::{Children, Visitable};

pub static CODING_INFO: TypeInfo = TypeInfo {
    name: "Coding",
    kind: TypeKind::ComplexType,
    is_abstract: false,
    base: Some("Element"),
    elements: &[
        ElementInfo::new("system", &["uri"]).summary(),
        ElementInfo::new("version", &["string"]).summary(),
        ElementInfo::new("code", &["code"]).summary(),
        ElementInfo::new("display", &["string"]).summary(),
        ElementInfo::new("userSelected", &["boolean"]).summary(),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coding {
    base: ElementBase,
    system: Option<Uri>,
    version: Option<FhirString>,
    code: Option<Code>,
    display: Option<FhirString>,
    user_selected: Option<Boolean>,
}

impl Coding {
    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn version(&self) -> Option<&FhirString> {
        self.version.as_ref()
    }

    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    pub fn display(&self) -> Option<&FhirString> {
        self.display.as_ref()
    }

    pub fn user_selected(&self) -> Option<&Boolean> {
        self.user_selected.as_ref()
    }
}

impl_element!(Coding, CodingBuilder);

impl HasChildren for Coding {
    fn has_children(&self) -> bool {
        self.base.has_children()
            || self.system.is_some()
            || self.version.is_some()
            || self.code.is_some()
            || self.display.is_some()
            || self.user_selected.is_some()
    }
}

impl Element for Coding {}

impl ModelType for Coding {
    fn schema() -> &'static TypeInfo {
        &CODING_INFO
    }
}

impl Visitable for Coding {
    fn type_info(&self) -> &'static TypeInfo {
        &CODING_INFO
    }

    fn children<'a>(&'a self, children: &mut Children<'a>) {
        self.base.children(children);
        children
            .element("system", self.system.as_ref())
            .element("version", self.version.as_ref())
            .element("code", self.code.as_ref())
            .element("display", self.display.as_ref())
            .element("userSelected", self.user_selected.as_ref());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Buildable for Coding {
    type Builder = CodingBuilder;

    fn builder() -> CodingBuilder {
        CodingBuilder::default()
    }

    fn to_builder(&self) -> CodingBuilder {
        CodingBuilder {
            base: ElementBuilderBase::from_base(&self.base),
            system: self.system.clone(),
            version: self.version.clone(),
            code: self.code.clone(),
            display: self.display.clone(),
            user_selected: self.user_selected.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodingBuilder {
    base: ElementBuilderBase,
    system: Option<Uri>,
    version: Option<FhirString>,
    code: Option<Code>,
    display: Option<FhirString>,
    user_selected: Option<Boolean>,
}

impl CodingBuilder {
    pub fn system(mut self, system: impl Into<Option<Uri>>) -> Self {
        self.system = system.into();
        self
    }

    pub fn version(mut self, version: impl Into<Option<FhirString>>) -> Self {
        self.version = version.into();
        self
    }

    pub fn code(mut self, code: impl Into<Option<Code>>) -> Self {
        self.code = code.into();
        self
    }

    pub fn display(mut self, display: impl Into<Option<FhirString>>) -> Self {
        self.display = display.into();
        self
    }

    pub fn user_selected(mut self, user_selected: impl Into<Option<Boolean>>) -> Self {
        self.user_selected = user_selected.into();
        self
    }
}

impl Builder for CodingBuilder {
    type Target = Coding;

    fn freeze(&self, config: &ModelConfig) -> Result<Coding> {
        let info = &CODING_INFO;
        let coding = Coding {
            base: self.base.freeze(info, config)?,
            system: self.system.clone(),
            version: self.version.clone(),
            code: self.code.clone(),
            display: self.display.clone(),
            user_selected: self.user_selected.clone(),
        };
        validation::require_value_or_children(&coding, info.name)?;
        Ok(coding)
    }
}
