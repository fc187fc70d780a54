//! Element capabilities
//!
//! Every non-resource node is an element: an optional id plus ordered
//! extensions. Backbone elements (record-internal substructures) also own
//! modifier extensions. Concrete types hold an [`ElementBase`] or
//! [`BackboneBase`] and their builders hold the matching builder base, whose
//! `freeze` runs the ancestor checks before the type's own checks.

use crate::config::ModelConfig;
use crate::datatypes::extension::{Extension, EXTENSION_INFO};
use crate::error::Result;
use crate::primitive::ValueRef;
use crate::schema::{ElementInfo, TypeInfo, TypeKind};
use crate::validation;
use crate::visitor::{Children, Visitable};

pub static ELEMENT_INFO: TypeInfo = TypeInfo {
    name: "Element",
    kind: TypeKind::ComplexType,
    is_abstract: true,
    base: None,
    elements: &[
        ElementInfo::new("id", &["string"]),
        ElementInfo::new("extension", &["Extension"]).repeating(),
    ],
};

pub static BACKBONE_ELEMENT_INFO: TypeInfo = TypeInfo {
    name: "BackboneElement",
    kind: TypeKind::ComplexType,
    is_abstract: true,
    base: Some("Element"),
    elements: &[ElementInfo::new("modifierExtension", &["Extension"])
        .repeating()
        .modifier()
        .summary()],
};

pub trait HasId {
    fn id(&self) -> Option<&str>;
}

pub trait HasExtensions {
    fn extension(&self) -> &[Extension];
}

/// Extensions that change the meaning of the node carrying them
pub trait HasModifierExtensions {
    fn modifier_extension(&self) -> &[Extension];
}

pub trait HasChildren {
    /// True if anything other than the id is populated
    fn has_children(&self) -> bool;
}

pub trait Element: HasId + HasExtensions + HasChildren + Visitable {
    /// Primitives override this; complex types carry no value of their own
    fn has_value(&self) -> bool {
        false
    }
}

pub trait BackboneElement: Element + HasModifierExtensions {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ElementBase {
    id: Option<String>,
    extension: Vec<Extension>,
}

impl ElementBase {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn extension(&self) -> &[Extension] {
        &self.extension
    }

    pub fn has_children(&self) -> bool {
        !self.extension.is_empty()
    }

    pub fn children<'a>(&'a self, children: &mut Children<'a>) {
        children
            .value("id", self.id.as_deref().map(ValueRef::String))
            .list("extension", &self.extension);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BackboneBase {
    element: ElementBase,
    modifier_extension: Vec<Extension>,
}

impl BackboneBase {
    pub fn element(&self) -> &ElementBase {
        &self.element
    }

    pub fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }

    pub fn has_children(&self) -> bool {
        self.element.has_children() || !self.modifier_extension.is_empty()
    }

    pub fn children<'a>(&'a self, children: &mut Children<'a>) {
        self.element.children(children);
        children.list("modifierExtension", &self.modifier_extension);
    }
}

/// Staged `Element` fields
#[derive(Debug, Clone, Default)]
pub struct ElementBuilderBase {
    pub(crate) id: Option<String>,
    pub(crate) extension: Vec<Option<Extension>>,
}

impl ElementBuilderBase {
    pub(crate) fn from_base(base: &ElementBase) -> Self {
        Self {
            id: base.id.clone(),
            extension: base.extension.iter().cloned().map(Some).collect(),
        }
    }

    pub(crate) fn freeze(&self, info: &TypeInfo, _config: &ModelConfig) -> Result<ElementBase> {
        let extension = validation::check_list(&self.extension, &info.path("extension"), &EXTENSION_INFO)?;
        Ok(ElementBase {
            id: self.id.clone(),
            extension,
        })
    }
}

/// Staged `BackboneElement` fields
#[derive(Debug, Clone, Default)]
pub struct BackboneBuilderBase {
    pub(crate) element: ElementBuilderBase,
    pub(crate) modifier_extension: Vec<Option<Extension>>,
}

impl BackboneBuilderBase {
    pub(crate) fn from_base(base: &BackboneBase) -> Self {
        Self {
            element: ElementBuilderBase::from_base(&base.element),
            modifier_extension: base.modifier_extension.iter().cloned().map(Some).collect(),
        }
    }

    pub(crate) fn freeze(&self, info: &TypeInfo, config: &ModelConfig) -> Result<BackboneBase> {
        let element = self.element.freeze(info, config)?;
        let modifier_extension = validation::check_list(
            &self.modifier_extension,
            &info.path("modifierExtension"),
            &EXTENSION_INFO,
        )?;
        Ok(BackboneBase {
            element,
            modifier_extension,
        })
    }
}

/// Fluent setters shared by every element builder
pub trait ElementBuilder: Sized {
    #[doc(hidden)]
    fn element_mut(&mut self) -> &mut ElementBuilderBase;

    fn id(mut self, id: impl Into<String>) -> Self {
        self.element_mut().id = Some(id.into());
        self
    }

    /// Append extensions
    fn extension<I>(mut self, extension: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Extension>>,
    {
        self.element_mut()
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
        self.element_mut().extension = extension.into_iter().map(Into::into).collect();
        self
    }
}

/// Fluent setters shared by every backbone element builder
pub trait BackboneElementBuilder: ElementBuilder {
    #[doc(hidden)]
    fn backbone_mut(&mut self) -> &mut BackboneBuilderBase;

    /// Append modifier extensions
    fn modifier_extension<I>(mut self, extension: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Extension>>,
    {
        self.backbone_mut()
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
        self.backbone_mut().modifier_extension = extension.into_iter().map(Into::into).collect();
        self
    }
}

/// Implements the element capabilities for a type with a `base: ElementBase`
/// field and its builder with a `base: ElementBuilderBase` field.
macro_rules! impl_element {
    ($ty:ty, $builder:ty) => {
        impl $crate::element::HasId for $ty {
            fn id(&self) -> Option<&str> {
                self.base.id()
            }
        }

        impl $crate::element::HasExtensions for $ty {
            fn extension(&self) -> &[$crate::datatypes::Extension] {
                self.base.extension()
            }
        }

        impl $crate::element::ElementBuilder for $builder {
            fn element_mut(&mut self) -> &mut $crate::element::ElementBuilderBase {
                &mut self.base
            }
        }
    };
}

/// Like `impl_element!`, for `base: BackboneBase` / `base: BackboneBuilderBase`
macro_rules! impl_backbone_element {
    ($ty:ty, $builder:ty) => {
        impl $crate::element::HasId for $ty {
            fn id(&self) -> Option<&str> {
                self.base.element().id()
            }
        }

        impl $crate::element::HasExtensions for $ty {
            fn extension(&self) -> &[$crate::datatypes::Extension] {
                self.base.element().extension()
            }
        }

        impl $crate::element::HasModifierExtensions for $ty {
            fn modifier_extension(&self) -> &[$crate::datatypes::Extension] {
                self.base.modifier_extension()
            }
        }

        impl $crate::element::Element for $ty {}

        impl $crate::element::BackboneElement for $ty {}

        impl $crate::element::ElementBuilder for $builder {
            fn element_mut(&mut self) -> &mut $crate::element::ElementBuilderBase {
                &mut self.base.element
            }
        }

        impl $crate::element::BackboneElementBuilder for $builder {
            fn backbone_mut(&mut self) -> &mut $crate::element::BackboneBuilderBase {
                &mut self.base
            }
        }
    };
}

pub(crate) use impl_backbone_element;
pub(crate) use impl_element;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::Period;
    use crate::error::{ListDefect, ValidationError};
    use crate::prelude::*;
    use crate::primitive::DateTime;

    fn flag() -> Extension {
        Extension::builder()
            .url("http://example.org/flag")
            .value(crate::primitive::Boolean::of(true).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_extension_append_and_replace() {
        let builder = Period::builder().extension([flag(), flag()]);
        let period = builder.clone().extension([flag()]).build().unwrap();
        assert_eq!(period.extension().len(), 3);

        let period = builder.set_extension([flag()]).build().unwrap();
        assert_eq!(period.extension().len(), 1);
    }

    #[test]
    fn test_extension_hole_rejected() {
        let err = Period::builder()
            .start(DateTime::parse("2024-01-01").unwrap())
            .extension([Some(flag()), None])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MalformedList {
                path: "Period.extension".to_string(),
                index: 1,
                defect: ListDefect::NullEntry,
            }
        );
    }

    #[test]
    fn test_id_is_not_a_child() {
        let err = Period::builder().id("p1").build().unwrap_err();
        assert!(matches!(err, ValidationError::EmptyElementViolation { .. }));
    }

    #[test]
    fn test_backbone_info_chain() {
        assert!(BACKBONE_ELEMENT_INFO.is_a("Element"));
        assert!(BACKBONE_ELEMENT_INFO.element("modifierExtension").unwrap().modifier);
        assert!(BACKBONE_ELEMENT_INFO.element("id").is_some());
    }
}
