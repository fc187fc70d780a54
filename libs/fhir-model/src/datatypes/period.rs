//! Period

use std::any::Any;

use crate::builder::{Buildable, Builder};
use crate::config::ModelConfig;
use crate::element::{impl_element, Element, ElementBase, ElementBuilderBase, HasChildren};
use crate::error::Result;
use crate::primitive::DateTime;
use crate::schema::{ElementInfo, ModelType, TypeInfo, TypeKind};
use crate::validation;
use crate::visitor::{Children, Visitable};

pub static PERIOD_INFO: TypeInfo = TypeInfo {
    name: "Period",
    kind: TypeKind::ComplexType,
    is_abstract: false,
    base: Some("Element"),
    elements: &[
        ElementInfo::new("start", &["dateTime"]).summary(),
        ElementInfo::new("end", &["dateTime"]).summary(),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Period {
    base: ElementBase,
    start: Option<DateTime>,
    end: Option<DateTime>,
}

impl Period {
    pub fn start(&self) -> Option<&DateTime> {
        self.start.as_ref()
    }

    /// Open-ended when absent
    pub fn end(&self) -> Option<&DateTime> {
        self.end.as_ref()
    }
}

impl_element!(Period, PeriodBuilder);

impl HasChildren for Period {
    fn has_children(&self) -> bool {
        self.base.has_children() || self.start.is_some() || self.end.is_some()
    }
}

impl Element for Period {}

impl ModelType for Period {
    fn schema() -> &'static TypeInfo {
        &PERIOD_INFO
    }
}

impl Visitable for Period {
    fn type_info(&self) -> &'static TypeInfo {
        &PERIOD_INFO
    }

    fn children<'a>(&'a self, children: &mut Children<'a>) {
        self.base.children(children);
        children
            .element("start", self.start.as_ref())
            .element("end", self.end.as_ref());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Buildable for Period {
    type Builder = PeriodBuilder;

    fn builder() -> PeriodBuilder {
        PeriodBuilder::default()
    }

    fn to_builder(&self) -> PeriodBuilder {
        PeriodBuilder {
            base: ElementBuilderBase::from_base(&self.base),
            start: self.start.clone(),
            end: self.end.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PeriodBuilder {
    base: ElementBuilderBase,
    start: Option<DateTime>,
    end: Option<DateTime>,
}

impl PeriodBuilder {
    pub fn start(mut self, start: impl Into<Option<DateTime>>) -> Self {
        self.start = start.into();
        self
    }

    pub fn end(mut self, end: impl Into<Option<DateTime>>) -> Self {
        self.end = end.into();
        self
    }
}

impl Builder for PeriodBuilder {
    type Target = Period;

    fn freeze(&self, config: &ModelConfig) -> Result<Period> {
        let info = &PERIOD_INFO;
        let period = Period {
            base: self.base.freeze(info, config)?,
            start: self.start.clone(),
            end: self.end.clone(),
        };
        validation::require_value_or_children(&period, info.name)?;
        Ok(period)
    }
}
