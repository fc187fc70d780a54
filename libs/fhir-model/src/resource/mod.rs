//! Resources
//!
//! A resource is a top-level record and the usual root of a traversal. All
//! resources share the [`Resource`] fields (id, meta, implicitRules, language);
//! every resource modeled here is also a [`DomainResource`], which adds a
//! narrative, contained resources and both kinds of extensions.
//!
//! Concrete resources hold a [`DomainResourceBase`] and their builders a
//! [`DomainResourceBuilderBase`]; the base is frozen before the resource's
//! own fields are checked.

pub mod account;
pub mod observation;
pub mod patient;

use std::any::Any;

pub use account::{
    Account, AccountBuilder, AccountCoverage, AccountCoverageBuilder, AccountGuarantor,
    AccountGuarantorBuilder,
};
pub use observation::{
    Observation, ObservationBuilder, ObservationComponent, ObservationComponentBuilder,
    ObservationEffective, ObservationValue,
};
pub use patient::{
    Patient, PatientBuilder, PatientDeceased, PatientLink, PatientLinkBuilder, PatientMultipleBirth,
};

use crate::config::ModelConfig;
use crate::datatypes::extension::EXTENSION_INFO;
use crate::datatypes::{Extension, Meta, Narrative};
use crate::element::{HasExtensions, HasModifierExtensions};
use crate::error::Result;
use crate::primitive::{Code, Id, Uri};
use crate::schema::{BindingStrength, ElementInfo, ModelType, TypeInfo, TypeKind};
use crate::validation;
use crate::visitor::{Children, Visitable};

pub static RESOURCE_INFO: TypeInfo = TypeInfo {
    name: "Resource",
    kind: TypeKind::Resource,
    is_abstract: true,
    base: None,
    elements: &[
        ElementInfo::new("id", &["id"]).summary(),
        ElementInfo::new("meta", &["Meta"]).summary(),
        ElementInfo::new("implicitRules", &["uri"]).modifier().summary(),
        ElementInfo::new("language", &["code"])
            .bound(BindingStrength::Preferred, "http://hl7.org/fhir/ValueSet/languages"),
    ],
};

pub static DOMAIN_RESOURCE_INFO: TypeInfo = TypeInfo {
    name: "DomainResource",
    kind: TypeKind::Resource,
    is_abstract: true,
    base: Some("Resource"),
    elements: &[
        ElementInfo::new("text", &["Narrative"]),
        ElementInfo::new("contained", &["Resource"]).repeating(),
        ElementInfo::new("extension", &["Extension"]).repeating(),
        ElementInfo::new("modifierExtension", &["Extension"])
            .repeating()
            .modifier(),
    ],
};

pub trait Resource: Visitable {
    /// Logical id, assigned by the server that stores the resource
    fn id(&self) -> Option<&Id>;

    fn meta(&self) -> Option<&Meta>;

    /// Rules the content was created under; a modifier
    fn implicit_rules(&self) -> Option<&Uri>;

    fn language(&self) -> Option<&Code>;

    fn resource_type(&self) -> &'static str {
        self.type_name()
    }
}

pub trait DomainResource: Resource + HasExtensions + HasModifierExtensions {
    fn text(&self) -> Option<&Narrative>;

    /// Resources owned by this one, only addressable from inside it
    fn contained(&self) -> &[AnyResource];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResourceBase {
    id: Option<Id>,
    meta: Option<Meta>,
    implicit_rules: Option<Uri>,
    language: Option<Code>,
}

impl ResourceBase {
    pub fn id(&self) -> Option<&Id> {
        self.id.as_ref()
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    pub fn implicit_rules(&self) -> Option<&Uri> {
        self.implicit_rules.as_ref()
    }

    pub fn language(&self) -> Option<&Code> {
        self.language.as_ref()
    }

    pub fn children<'a>(&'a self, children: &mut Children<'a>) {
        children
            .element("id", self.id.as_ref())
            .element("meta", self.meta.as_ref())
            .element("implicitRules", self.implicit_rules.as_ref())
            .element("language", self.language.as_ref());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DomainResourceBase {
    resource: ResourceBase,
    text: Option<Narrative>,
    contained: Vec<AnyResource>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
}

impl DomainResourceBase {
    pub fn resource(&self) -> &ResourceBase {
        &self.resource
    }

    pub fn text(&self) -> Option<&Narrative> {
        self.text.as_ref()
    }

    pub fn contained(&self) -> &[AnyResource] {
        &self.contained
    }

    pub fn extension(&self) -> &[Extension] {
        &self.extension
    }

    pub fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }

    pub fn children<'a>(&'a self, children: &mut Children<'a>) {
        self.resource.children(children);
        children
            .element("text", self.text.as_ref())
            .list("contained", &self.contained)
            .list("extension", &self.extension)
            .list("modifierExtension", &self.modifier_extension);
    }
}

/// Staged `Resource` fields
#[derive(Debug, Clone, Default)]
pub struct ResourceBuilderBase {
    pub(crate) id: Option<Id>,
    pub(crate) meta: Option<Meta>,
    pub(crate) implicit_rules: Option<Uri>,
    pub(crate) language: Option<Code>,
}

impl ResourceBuilderBase {
    pub(crate) fn from_base(base: &ResourceBase) -> Self {
        Self {
            id: base.id.clone(),
            meta: base.meta.clone(),
            implicit_rules: base.implicit_rules.clone(),
            language: base.language.clone(),
        }
    }

    pub(crate) fn freeze(&self, _info: &TypeInfo, _config: &ModelConfig) -> Result<ResourceBase> {
        Ok(ResourceBase {
            id: self.id.clone(),
            meta: self.meta.clone(),
            implicit_rules: self.implicit_rules.clone(),
            language: self.language.clone(),
        })
    }
}

/// Staged `DomainResource` fields
#[derive(Debug, Clone, Default)]
pub struct DomainResourceBuilderBase {
    pub(crate) resource: ResourceBuilderBase,
    pub(crate) text: Option<Narrative>,
    pub(crate) contained: Vec<Option<AnyResource>>,
    pub(crate) extension: Vec<Option<Extension>>,
    pub(crate) modifier_extension: Vec<Option<Extension>>,
}

impl DomainResourceBuilderBase {
    pub(crate) fn from_base(base: &DomainResourceBase) -> Self {
        Self {
            resource: ResourceBuilderBase::from_base(&base.resource),
            text: base.text.clone(),
            contained: base.contained.iter().cloned().map(Some).collect(),
            extension: base.extension.iter().cloned().map(Some).collect(),
            modifier_extension: base.modifier_extension.iter().cloned().map(Some).collect(),
        }
    }

    pub(crate) fn freeze(&self, info: &TypeInfo, config: &ModelConfig) -> Result<DomainResourceBase> {
        let resource = self.resource.freeze(info, config)?;
        let contained = validation::check_list(&self.contained, &info.path("contained"), &RESOURCE_INFO)?;
        let extension = validation::check_list(&self.extension, &info.path("extension"), &EXTENSION_INFO)?;
        let modifier_extension = validation::check_list(
            &self.modifier_extension,
            &info.path("modifierExtension"),
            &EXTENSION_INFO,
        )?;
        Ok(DomainResourceBase {
            resource,
            text: self.text.clone(),
            contained,
            extension,
            modifier_extension,
        })
    }
}

/// Fluent setters shared by every resource builder
pub trait ResourceBuilder: Sized {
    #[doc(hidden)]
    fn resource_mut(&mut self) -> &mut ResourceBuilderBase;

    fn id(mut self, id: impl Into<Option<Id>>) -> Self {
        self.resource_mut().id = id.into();
        self
    }

    fn meta(mut self, meta: impl Into<Option<Meta>>) -> Self {
        self.resource_mut().meta = meta.into();
        self
    }

    fn implicit_rules(mut self, implicit_rules: impl Into<Option<Uri>>) -> Self {
        self.resource_mut().implicit_rules = implicit_rules.into();
        self
    }

    fn language(mut self, language: impl Into<Option<Code>>) -> Self {
        self.resource_mut().language = language.into();
        self
    }
}

/// Fluent setters shared by every domain resource builder
pub trait DomainResourceBuilder: ResourceBuilder {
    #[doc(hidden)]
    fn domain_mut(&mut self) -> &mut DomainResourceBuilderBase;

    fn text(mut self, text: impl Into<Option<Narrative>>) -> Self {
        self.domain_mut().text = text.into();
        self
    }

    /// Append contained resources
    fn contained<I>(mut self, contained: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<AnyResource>>,
    {
        self.domain_mut()
            .contained
            .extend(contained.into_iter().map(Into::into));
        self
    }

    /// Replace all contained resources
    fn set_contained<I>(mut self, contained: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<AnyResource>>,
    {
        self.domain_mut().contained = contained.into_iter().map(Into::into).collect();
        self
    }

    /// Append extensions
    fn extension<I>(mut self, extension: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Extension>>,
    {
        self.domain_mut()
            .extension
            .extend(extension.into_iter().map(Into::into));
        self
    }

    /// Replace all extensions
    fn set_extension<I>(mut self, extension: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Extension>>,
    {
        self.domain_mut().extension = extension.into_iter().map(Into::into).collect();
        self
    }

    /// Append modifier extensions
    fn modifier_extension<I>(mut self, extension: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Extension>>,
    {
        self.domain_mut()
            .modifier_extension
            .extend(extension.into_iter().map(Into::into));
        self
    }

    /// Replace all modifier extensions
    fn set_modifier_extension<I>(mut self, extension: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Extension>>,
    {
        self.domain_mut().modifier_extension = extension.into_iter().map(Into::into).collect();
        self
    }
}

/// Implements the resource capabilities for a type with a
/// `base: DomainResourceBase` field and its builder with a
/// `base: DomainResourceBuilderBase` field.
macro_rules! impl_domain_resource {
    ($ty:ty, $builder:ty) => {
        impl $crate::resource::Resource for $ty {
            fn id(&self) -> Option<&$crate::primitive::Id> {
                self.base.resource().id()
            }

            fn meta(&self) -> Option<&$crate::datatypes::Meta> {
                self.base.resource().meta()
            }

            fn implicit_rules(&self) -> Option<&$crate::primitive::Uri> {
                self.base.resource().implicit_rules()
            }

            fn language(&self) -> Option<&$crate::primitive::Code> {
                self.base.resource().language()
            }
        }

        impl $crate::resource::DomainResource for $ty {
            fn text(&self) -> Option<&$crate::datatypes::Narrative> {
                self.base.text()
            }

            fn contained(&self) -> &[$crate::resource::AnyResource] {
                self.base.contained()
            }
        }

        impl $crate::element::HasExtensions for $ty {
            fn extension(&self) -> &[$crate::datatypes::Extension] {
                self.base.extension()
            }
        }

        impl $crate::element::HasModifierExtensions for $ty {
            fn modifier_extension(&self) -> &[$crate::datatypes::Extension] {
                self.base.modifier_extension()
            }
        }

        impl $crate::resource::ResourceBuilder for $builder {
            fn resource_mut(&mut self) -> &mut $crate::resource::ResourceBuilderBase {
                &mut self.base.resource
            }
        }

        impl $crate::resource::DomainResourceBuilder for $builder {
            fn domain_mut(&mut self) -> &mut $crate::resource::DomainResourceBuilderBase {
                &mut self.base
            }
        }
    };
}

pub(crate) use impl_domain_resource;

macro_rules! any_resource {
    ($($variant:ident),+ $(,)?) => {
        /// Any modeled resource; the item type of `contained`
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum AnyResource {
            $($variant($variant)),+
        }

        impl AnyResource {
            pub fn as_resource(&self) -> &dyn DomainResource {
                match self {
                    $(Self::$variant(r) => r),+
                }
            }

            fn as_visitable(&self) -> &dyn Visitable {
                match self {
                    $(Self::$variant(r) => r),+
                }
            }
        }

        $(
            impl From<$variant> for AnyResource {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }

            impl From<$variant> for Option<AnyResource> {
                fn from(value: $variant) -> Self {
                    Some(AnyResource::$variant(value))
                }
            }
        )+
    };
}

any_resource!(Account, Observation, Patient);

impl AnyResource {
    pub fn resource_type(&self) -> &'static str {
        self.as_visitable().type_name()
    }

    pub fn downcast_ref<T: Visitable>(&self) -> Option<&T> {
        self.as_visitable().downcast_ref::<T>()
    }
}

impl ModelType for AnyResource {
    fn schema() -> &'static TypeInfo {
        &RESOURCE_INFO
    }
}

/// Transparent: traversal and downcasts see the wrapped resource
impl Visitable for AnyResource {
    fn type_info(&self) -> &'static TypeInfo {
        self.as_visitable().type_info()
    }

    fn children<'a>(&'a self, children: &mut Children<'a>) {
        self.as_visitable().children(children)
    }

    fn as_any(&self) -> &dyn Any {
        self.as_visitable().as_any()
    }
}
