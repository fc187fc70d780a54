//! Meta
//!
//! Resource metadata maintained by the infrastructure: version, last update,
//! claimed profiles, security labels and tags.

use std::any::Any;

use crate::builder::{Buildable, Builder};
use crate::config::ModelConfig;
use crate::datatypes::coding::{Coding, CODING_INFO};
use crate::element::{impl_element, Element, ElementBase, ElementBuilderBase, HasChildren};
use crate::error::Result;
use crate::primitive::{Canonical, Id, Instant, Uri, CANONICAL_INFO};
use crate::schema::{BindingStrength, ElementInfo, ModelType, TypeInfo, TypeKind};
use crate::validation;
use crate::visitor::{Children, Visitable};

pub static META_INFO: TypeInfo = TypeInfo {
    name: "Meta",
    kind: TypeKind::ComplexType,
    is_abstract: false,
    base: Some("Element"),
    elements: &[
        ElementInfo::new("versionId", &["id"]).summary(),
        ElementInfo::new("lastUpdated", &["instant"]).summary(),
        ElementInfo::new("source", &["uri"]).summary(),
        ElementInfo::new("profile", &["canonical"]).repeating().summary(),
        ElementInfo::new("security", &["Coding"])
            .repeating()
            .summary()
            .bound(BindingStrength::Extensible, "http://hl7.org/fhir/ValueSet/security-labels"),
        ElementInfo::new("tag", &["Coding"])
            .repeating()
            .summary()
            .bound(BindingStrength::Example, "http://hl7.org/fhir/ValueSet/common-tags"),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Meta {
    base: ElementBase,
    version_id: Option<Id>,
    last_updated: Option<Instant>,
    source: Option<Uri>,
    profile: Vec<Canonical>,
    security: Vec<Coding>,
    tag: Vec<Coding>,
}

impl Meta {
    pub fn version_id(&self) -> Option<&Id> {
        self.version_id.as_ref()
    }

    pub fn last_updated(&self) -> Option<&Instant> {
        self.last_updated.as_ref()
    }

    pub fn source(&self) -> Option<&Uri> {
        self.source.as_ref()
    }

    pub fn profile(&self) -> &[Canonical] {
        &self.profile
    }

    pub fn security(&self) -> &[Coding] {
        &self.security
    }

    pub fn tag(&self) -> &[Coding] {
        &self.tag
    }
}

impl_element!(Meta, MetaBuilder);

impl HasChildren for Meta {
    fn has_children(&self) -> bool {
        self.base.has_children()
            || self.version_id.is_some()
            || self.last_updated.is_some()
            || self.source.is_some()
            || !self.profile.is_empty()
            || !self.security.is_empty()
            || !self.tag.is_empty()
    }
}

impl Element for Meta {}

impl ModelType for Meta {
    fn schema() -> &'static TypeInfo {
        &META_INFO
    }
}

impl Visitable for Meta {
    fn type_info(&self) -> &'static TypeInfo {
        &META_INFO
    }

    fn children<'a>(&'a self, children: &mut Children<'a>) {
        self.base.children(children);
        children
            .element("versionId", self.version_id.as_ref())
            .element("lastUpdated", self.last_updated.as_ref())
            .element("source", self.source.as_ref())
            .list("profile", &self.profile)
            .list("security", &self.security)
            .list("tag", &self.tag);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Buildable for Meta {
    type Builder = MetaBuilder;

    fn builder() -> MetaBuilder {
        MetaBuilder::default()
    }

    fn to_builder(&self) -> MetaBuilder {
        MetaBuilder {
            base: ElementBuilderBase::from_base(&self.base),
            version_id: self.version_id.clone(),
            last_updated: self.last_updated.clone(),
            source: self.source.clone(),
            profile: self.profile.iter().cloned().map(Some).collect(),
            security: self.security.iter().cloned().map(Some).collect(),
            tag: self.tag.iter().cloned().map(Some).collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetaBuilder {
    base: ElementBuilderBase,
    version_id: Option<Id>,
    last_updated: Option<Instant>,
    source: Option<Uri>,
    profile: Vec<Option<Canonical>>,
    security: Vec<Option<Coding>>,
    tag: Vec<Option<Coding>>,
}

impl MetaBuilder {
    pub fn version_id(mut self, version_id: impl Into<Option<Id>>) -> Self {
        self.version_id = version_id.into();
        self
    }

    pub fn last_updated(mut self, last_updated: impl Into<Option<Instant>>) -> Self {
        self.last_updated = last_updated.into();
        self
    }

    pub fn source(mut self, source: impl Into<Option<Uri>>) -> Self {
        self.source = source.into();
        self
    }

    pub fn profile<I>(mut self, profile: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Canonical>>,
    {
        self.profile.extend(profile.into_iter().map(Into::into));
        self
    }

    pub fn set_profile<I>(mut self, profile: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Canonical>>,
    {
        self.profile = profile.into_iter().map(Into::into).collect();
        self
    }

    pub fn security<I>(mut self, security: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Coding>>,
    {
        self.security.extend(security.into_iter().map(Into::into));
        self
    }

    pub fn set_security<I>(mut self, security: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Coding>>,
    {
        self.security = security.into_iter().map(Into::into).collect();
        self
    }

    pub fn tag<I>(mut self, tag: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Coding>>,
    {
        self.tag.extend(tag.into_iter().map(Into::into));
        self
    }

    pub fn set_tag<I>(mut self, tag: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Coding>>,
    {
        self.tag = tag.into_iter().map(Into::into).collect();
        self
    }
}

impl Builder for MetaBuilder {
    type Target = Meta;

    fn freeze(&self, config: &ModelConfig) -> Result<Meta> {
        let info = &META_INFO;
        let base = self.base.freeze(info, config)?;
        let profile = validation::check_list(&self.profile, &info.path("profile"), &CANONICAL_INFO)?;
        let security = validation::check_list(&self.security, &info.path("security"), &CODING_INFO)?;
        let tag = validation::check_list(&self.tag, &info.path("tag"), &CODING_INFO)?;
        let meta = Meta {
            base,
            version_id: self.version_id.clone(),
            last_updated: self.last_updated.clone(),
            source: self.source.clone(),
            profile,
            security,
            tag,
        };
        validation::require_value_or_children(&meta, info.name)?;
        Ok(meta)
    }
}
