//! Choice-typed fields
//!
//! A choice field (`value[x]`) holds one value out of a fixed set of types.
//! Builders stage the value as a [`DataType`], the closed enum of every
//! datatype; `build()` converts it into the field's own enum, which lists
//! exactly the permitted variants. A value of any other type is rejected with
//! a choice-type violation.

use crate::datatypes::{
    CodeableConcept, Coding, Extension, Identifier, Meta, Narrative, Period, Quantity, Reference,
};
use crate::primitive::{
    Base64Binary, Boolean, Canonical, Code, Date, DateTime, Decimal, FhirString, Id, Instant,
    Integer, Markdown, PositiveInt, Time, UnsignedInt, Uri, Xhtml,
};
use crate::visitor::Visitable;

/// A closed set of permitted types for one field
pub trait Choice: Sized + Clone {
    /// Type names of the permitted variants
    const ALLOWED_TYPES: &'static [&'static str];

    /// Take the value if its type is permitted, otherwise hand it back
    fn from_data(value: DataType) -> std::result::Result<Self, DataType>;

    fn into_data(self) -> DataType;

    fn as_node(&self) -> &dyn Visitable;

    fn type_name(&self) -> &'static str {
        self.as_node().type_name()
    }

    fn as_reference(&self) -> Option<&Reference> {
        self.as_node().downcast_ref::<Reference>()
    }
}

/// Declares a choice enum; variant names must match [`DataType`] variants
macro_rules! choice_type {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident($ty:ty) = $type_name:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant($ty)),+
        }

        impl $crate::choice::Choice for $name {
            const ALLOWED_TYPES: &'static [&'static str] = &[$($type_name),+];

            #[allow(unreachable_patterns)]
            fn from_data(
                value: $crate::choice::DataType,
            ) -> ::std::result::Result<Self, $crate::choice::DataType> {
                match value {
                    $($crate::choice::DataType::$variant(v) => Ok(Self::$variant(v)),)+
                    other => Err(other),
                }
            }

            fn into_data(self) -> $crate::choice::DataType {
                match self {
                    $(Self::$variant(v) => $crate::choice::DataType::$variant(v)),+
                }
            }

            fn as_node(&self) -> &dyn $crate::visitor::Visitable {
                match self {
                    $(Self::$variant(v) => v as &dyn $crate::visitor::Visitable),+
                }
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

pub(crate) use choice_type;

/// Any datatype value, used to stage choice fields
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean(Boolean),
    Integer(Integer),
    PositiveInt(PositiveInt),
    UnsignedInt(UnsignedInt),
    Decimal(Decimal),
    String(FhirString),
    Code(Code),
    Id(Id),
    Markdown(Markdown),
    Uri(Uri),
    Canonical(Canonical),
    Xhtml(Xhtml),
    Date(Date),
    DateTime(DateTime),
    Instant(Instant),
    Time(Time),
    Base64Binary(Base64Binary),
    Extension(Extension),
    Reference(Reference),
    Identifier(Identifier),
    Coding(Coding),
    CodeableConcept(CodeableConcept),
    Period(Period),
    Quantity(Quantity),
    Meta(Meta),
    Narrative(Narrative),
}

macro_rules! data_type_conversions {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        impl DataType {
            pub fn as_node(&self) -> &dyn Visitable {
                match self {
                    $(Self::$variant(v) => v as &dyn Visitable),+
                }
            }
        }

        $(
            impl From<$ty> for DataType {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

data_type_conversions!(
    Boolean(Boolean),
    Integer(Integer),
    PositiveInt(PositiveInt),
    UnsignedInt(UnsignedInt),
    Decimal(Decimal),
    String(FhirString),
    Code(Code),
    Id(Id),
    Markdown(Markdown),
    Uri(Uri),
    Canonical(Canonical),
    Xhtml(Xhtml),
    Date(Date),
    DateTime(DateTime),
    Instant(Instant),
    Time(Time),
    Base64Binary(Base64Binary),
    Extension(Extension),
    Reference(Reference),
    Identifier(Identifier),
    Coding(Coding),
    CodeableConcept(CodeableConcept),
    Period(Period),
    Quantity(Quantity),
    Meta(Meta),
    Narrative(Narrative),
);

impl DataType {
    /// Schema name of the held value (e.g. `dateTime`, `Quantity`)
    pub fn type_name(&self) -> &'static str {
        self.as_node().type_name()
    }
}
