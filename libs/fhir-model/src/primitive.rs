//! Primitive datatypes
//!
//! A primitive is an element wrapping one scalar. All of them share
//! [`Primitive<K>`]; the kind marker `K` fixes the Rust value type, the
//! schema entry, how the value is parsed from its lexical form and which
//! value checks run at build time.
//!
//! ```rust
//! use ferrum_model::primitive::{Code, DateTime, PositiveInt};
//!
//! let code = Code::of("final").unwrap();
//! assert_eq!(code.as_str(), Some("final"));
//! assert!(Code::of(" final").is_err());
//! assert!(PositiveInt::of(0).is_err());
//! assert!(DateTime::parse("2024-02").is_ok());
//! ```

use std::any::Any;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{FixedOffset, NaiveDate, NaiveTime};
use regex::Regex;
use rust_decimal::Decimal as DecimalValue;

use crate::builder::{Buildable, Builder};
use crate::config::ModelConfig;
use crate::datatypes::Extension;
use crate::element::{
    Element, ElementBase, ElementBuilder, ElementBuilderBase, HasChildren, HasExtensions, HasId,
};
use crate::error::{Result, ValidationError};
use crate::schema::{ModelType, TypeInfo, TypeKind};
use crate::validation;
use crate::visitor::{Children, Visitable};

/// Borrowed view of a scalar payload, as surfaced during traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueRef<'a> {
    Boolean(bool),
    Integer(i32),
    Decimal(&'a DecimalValue),
    String(&'a str),
    Date(&'a PartialDate),
    DateTime(&'a DateTimeValue),
    Instant(&'a chrono::DateTime<FixedOffset>),
    Time(&'a NaiveTime),
    Binary(&'a [u8]),
}

impl fmt::Display for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(v) => write!(f, "{}", v),
            Self::Integer(v) => write!(f, "{}", v),
            Self::Decimal(v) => write!(f, "{}", v),
            Self::String(v) => f.write_str(v),
            Self::Date(v) => write!(f, "{}", v),
            Self::DateTime(v) => write!(f, "{}", v),
            Self::Instant(v) => f.write_str(&v.to_rfc3339()),
            Self::Time(v) => write!(f, "{}", v.format("%H:%M:%S%.f")),
            Self::Binary(v) => f.write_str(&BASE64.encode(v)),
        }
    }
}

/// A date with year, year-month or full precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PartialDate {
    Year(i32),
    YearMonth(i32, u32),
    Date(NaiveDate),
}

impl FromStr for PartialDate {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || format!("'{}' is not a valid date", s);
        let parts: Vec<&str> = s.split('-').collect();
        let widths_ok = parts
            .iter()
            .zip([4, 2, 2])
            .all(|(part, width)| part.len() == width && part.bytes().all(|b| b.is_ascii_digit()));
        if !widths_ok {
            return Err(invalid());
        }
        let year = parts[0].parse::<i32>().map_err(|_| invalid())?;
        match parts.len() {
            1 => Ok(Self::Year(year)),
            2 => {
                let month = parts[1]
                    .parse::<u32>()
                    .ok()
                    .filter(|m| (1..=12).contains(m))
                    .ok_or_else(invalid)?;
                Ok(Self::YearMonth(year, month))
            }
            3 => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(Self::Date)
                .map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(y) => write!(f, "{:04}", y),
            Self::YearMonth(y, m) => write!(f, "{:04}-{:02}", y, m),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// A partial date, or a full date and time with offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTimeValue {
    Partial(PartialDate),
    Full(chrono::DateTime<FixedOffset>),
}

impl FromStr for DateTimeValue {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.contains('T') {
            chrono::DateTime::parse_from_rfc3339(s)
                .map(Self::Full)
                .map_err(|e| format!("'{}' is not a valid dateTime: {}", s, e))
        } else {
            s.parse().map(Self::Partial)
        }
    }
}

impl fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Partial(d) => write!(f, "{}", d),
            Self::Full(dt) => f.write_str(&dt.to_rfc3339()),
        }
    }
}

impl From<PartialDate> for DateTimeValue {
    fn from(value: PartialDate) -> Self {
        Self::Partial(value)
    }
}

impl From<chrono::DateTime<FixedOffset>> for DateTimeValue {
    fn from(value: chrono::DateTime<FixedOffset>) -> Self {
        Self::Full(value)
    }
}

/// Marker describing one primitive type
pub trait PrimitiveKind:
    Copy + Default + fmt::Debug + PartialEq + Eq + Hash + Send + Sync + 'static
{
    type Value: Clone + fmt::Debug + PartialEq + Eq + Hash + Send + Sync + 'static;

    fn info() -> &'static TypeInfo;

    /// Parse the lexical form
    fn parse(text: &str) -> std::result::Result<Self::Value, String>;

    fn value_ref(value: &Self::Value) -> ValueRef<'_>;

    /// Value constraints beyond what the Rust type enforces
    fn check(_value: &Self::Value, _path: &str, _config: &ModelConfig) -> Result<()> {
        Ok(())
    }
}

macro_rules! primitive_info {
    ($name:literal, $base:literal) => {
        TypeInfo {
            name: $name,
            kind: TypeKind::PrimitiveType,
            is_abstract: false,
            base: Some($base),
            elements: &[],
        }
    };
}

pub static BOOLEAN_INFO: TypeInfo = primitive_info!("boolean", "Element");
pub static INTEGER_INFO: TypeInfo = primitive_info!("integer", "Element");
pub static POSITIVE_INT_INFO: TypeInfo = primitive_info!("positiveInt", "integer");
pub static UNSIGNED_INT_INFO: TypeInfo = primitive_info!("unsignedInt", "integer");
pub static DECIMAL_INFO: TypeInfo = primitive_info!("decimal", "Element");
pub static STRING_INFO: TypeInfo = primitive_info!("string", "Element");
pub static CODE_INFO: TypeInfo = primitive_info!("code", "string");
pub static ID_INFO: TypeInfo = primitive_info!("id", "string");
pub static MARKDOWN_INFO: TypeInfo = primitive_info!("markdown", "string");
pub static URI_INFO: TypeInfo = primitive_info!("uri", "Element");
pub static CANONICAL_INFO: TypeInfo = primitive_info!("canonical", "uri");
pub static XHTML_INFO: TypeInfo = primitive_info!("xhtml", "Element");
pub static DATE_INFO: TypeInfo = primitive_info!("date", "Element");
pub static DATE_TIME_INFO: TypeInfo = primitive_info!("dateTime", "Element");
pub static INSTANT_INFO: TypeInfo = primitive_info!("instant", "Element");
pub static TIME_INFO: TypeInfo = primitive_info!("time", "Element");
pub static BASE64_BINARY_INFO: TypeInfo = primitive_info!("base64Binary", "Element");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BooleanKind;

impl PrimitiveKind for BooleanKind {
    type Value = bool;

    fn info() -> &'static TypeInfo {
        &BOOLEAN_INFO
    }

    fn parse(text: &str) -> std::result::Result<bool, String> {
        match text {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(format!("'{}' is not a valid boolean", text)),
        }
    }

    fn value_ref(value: &bool) -> ValueRef<'_> {
        ValueRef::Boolean(*value)
    }
}

/// Integer kinds differ only in their lower bound
macro_rules! integer_kind {
    ($kind:ident, $info:ident, $min:expr) => {
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $kind;

        impl PrimitiveKind for $kind {
            type Value = i32;

            fn info() -> &'static TypeInfo {
                &$info
            }

            fn parse(text: &str) -> std::result::Result<i32, String> {
                text.parse()
                    .map_err(|_| format!("'{}' is not a valid {}", text, $info.name))
            }

            fn value_ref(value: &i32) -> ValueRef<'_> {
                ValueRef::Integer(*value)
            }

            fn check(value: &i32, path: &str, _config: &ModelConfig) -> Result<()> {
                match $min {
                    Some(min) => validation::check_min_value(*value, min, path),
                    None => Ok(()),
                }
            }
        }
    };
}

integer_kind!(IntegerKind, INTEGER_INFO, None::<i32>);
integer_kind!(PositiveIntKind, POSITIVE_INT_INFO, Some(1));
integer_kind!(UnsignedIntKind, UNSIGNED_INT_INFO, Some(0));

fn decimal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?$")
            .expect("decimal regex must compile")
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DecimalKind;

impl PrimitiveKind for DecimalKind {
    type Value = DecimalValue;

    fn info() -> &'static TypeInfo {
        &DECIMAL_INFO
    }

    fn parse(text: &str) -> std::result::Result<DecimalValue, String> {
        if !decimal_pattern().is_match(text) {
            return Err(format!("'{}' is not a valid decimal", text));
        }
        let parsed = if text.contains(|c| c == 'e' || c == 'E') {
            DecimalValue::from_scientific(text)
        } else {
            DecimalValue::from_str(text)
        };
        parsed.map_err(|e| format!("'{}' is not a valid decimal: {}", text, e))
    }

    fn value_ref(value: &DecimalValue) -> ValueRef<'_> {
        ValueRef::Decimal(value)
    }
}

/// String-valued kinds share parsing and differ in their check
macro_rules! string_kind {
    ($kind:ident, $info:ident, $check:path) => {
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $kind;

        impl PrimitiveKind for $kind {
            type Value = String;

            fn info() -> &'static TypeInfo {
                &$info
            }

            fn parse(text: &str) -> std::result::Result<String, String> {
                Ok(text.to_string())
            }

            fn value_ref(value: &String) -> ValueRef<'_> {
                ValueRef::String(value)
            }

            fn check(value: &String, path: &str, config: &ModelConfig) -> Result<()> {
                $check(value, path, config)
            }
        }
    };
}

string_kind!(StringKind, STRING_INFO, validation::check_string);
string_kind!(CodeKind, CODE_INFO, validation::check_code);
string_kind!(IdKind, ID_INFO, validation::check_id);
string_kind!(MarkdownKind, MARKDOWN_INFO, validation::check_string);
string_kind!(UriKind, URI_INFO, validation::check_uri);
string_kind!(CanonicalKind, CANONICAL_INFO, validation::check_uri);
string_kind!(XhtmlKind, XHTML_INFO, validation::check_string);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DateKind;

impl PrimitiveKind for DateKind {
    type Value = PartialDate;

    fn info() -> &'static TypeInfo {
        &DATE_INFO
    }

    fn parse(text: &str) -> std::result::Result<PartialDate, String> {
        text.parse()
    }

    fn value_ref(value: &PartialDate) -> ValueRef<'_> {
        ValueRef::Date(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DateTimeKind;

impl PrimitiveKind for DateTimeKind {
    type Value = DateTimeValue;

    fn info() -> &'static TypeInfo {
        &DATE_TIME_INFO
    }

    fn parse(text: &str) -> std::result::Result<DateTimeValue, String> {
        text.parse()
    }

    fn value_ref(value: &DateTimeValue) -> ValueRef<'_> {
        ValueRef::DateTime(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InstantKind;

impl PrimitiveKind for InstantKind {
    type Value = chrono::DateTime<FixedOffset>;

    fn info() -> &'static TypeInfo {
        &INSTANT_INFO
    }

    fn parse(text: &str) -> std::result::Result<Self::Value, String> {
        chrono::DateTime::parse_from_rfc3339(text)
            .map_err(|e| format!("'{}' is not a valid instant: {}", text, e))
    }

    fn value_ref(value: &Self::Value) -> ValueRef<'_> {
        ValueRef::Instant(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TimeKind;

impl PrimitiveKind for TimeKind {
    type Value = NaiveTime;

    fn info() -> &'static TypeInfo {
        &TIME_INFO
    }

    fn parse(text: &str) -> std::result::Result<NaiveTime, String> {
        NaiveTime::parse_from_str(text, "%H:%M:%S%.f")
            .map_err(|e| format!("'{}' is not a valid time: {}", text, e))
    }

    fn value_ref(value: &NaiveTime) -> ValueRef<'_> {
        ValueRef::Time(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Base64BinaryKind;

impl PrimitiveKind for Base64BinaryKind {
    type Value = Vec<u8>;

    fn info() -> &'static TypeInfo {
        &BASE64_BINARY_INFO
    }

    /// Decodes strictly: the input length must be a multiple of four and
    /// padding bits must be zero
    fn parse(text: &str) -> std::result::Result<Vec<u8>, String> {
        BASE64
            .decode(text)
            .map_err(|e| format!("invalid base64 string: {}", e))
    }

    fn value_ref(value: &Vec<u8>) -> ValueRef<'_> {
        ValueRef::Binary(value)
    }
}

pub type Boolean = Primitive<BooleanKind>;
pub type Integer = Primitive<IntegerKind>;
pub type PositiveInt = Primitive<PositiveIntKind>;
pub type UnsignedInt = Primitive<UnsignedIntKind>;
pub type Decimal = Primitive<DecimalKind>;
pub type FhirString = Primitive<StringKind>;
pub type Code = Primitive<CodeKind>;
pub type Id = Primitive<IdKind>;
pub type Markdown = Primitive<MarkdownKind>;
pub type Uri = Primitive<UriKind>;
pub type Canonical = Primitive<CanonicalKind>;
pub type Xhtml = Primitive<XhtmlKind>;
pub type Date = Primitive<DateKind>;
pub type DateTime = Primitive<DateTimeKind>;
pub type Instant = Primitive<InstantKind>;
pub type Time = Primitive<TimeKind>;
pub type Base64Binary = Primitive<Base64BinaryKind>;

/// A primitive element: optional value plus the element fields
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Primitive<K: PrimitiveKind> {
    base: ElementBase,
    value: Option<K::Value>,
    kind: PhantomData<K>,
}

impl<K: PrimitiveKind> Primitive<K> {
    /// Build a primitive holding just `value`
    pub fn of(value: impl Into<K::Value>) -> Result<Self> {
        Self::builder().value(value).build()
    }

    /// Build a primitive from its lexical form
    pub fn parse(text: &str) -> Result<Self> {
        let value = K::parse(text)
            .map_err(|message| ValidationError::invalid_value(K::info().path("value"), message))?;
        Self::of(value)
    }

    pub fn value(&self) -> Option<&K::Value> {
        self.value.as_ref()
    }
}

impl<K: PrimitiveKind<Value = String>> Primitive<K> {
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl<K: PrimitiveKind> ModelType for Primitive<K> {
    fn schema() -> &'static TypeInfo {
        K::info()
    }
}

impl<K: PrimitiveKind> HasId for Primitive<K> {
    fn id(&self) -> Option<&str> {
        self.base.id()
    }
}

impl<K: PrimitiveKind> HasExtensions for Primitive<K> {
    fn extension(&self) -> &[Extension] {
        self.base.extension()
    }
}

impl<K: PrimitiveKind> HasChildren for Primitive<K> {
    fn has_children(&self) -> bool {
        self.base.has_children()
    }
}

impl<K: PrimitiveKind> Element for Primitive<K> {
    fn has_value(&self) -> bool {
        self.value.is_some()
    }
}

impl<K: PrimitiveKind> Visitable for Primitive<K> {
    fn type_info(&self) -> &'static TypeInfo {
        K::info()
    }

    fn children<'a>(&'a self, children: &mut Children<'a>) {
        self.base.children(children);
        children.value("value", self.value.as_ref().map(K::value_ref));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<K: PrimitiveKind> Buildable for Primitive<K> {
    type Builder = PrimitiveBuilder<K>;

    fn builder() -> PrimitiveBuilder<K> {
        PrimitiveBuilder::default()
    }

    fn to_builder(&self) -> PrimitiveBuilder<K> {
        PrimitiveBuilder {
            base: ElementBuilderBase::from_base(&self.base),
            value: self.value.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PrimitiveBuilder<K: PrimitiveKind> {
    base: ElementBuilderBase,
    value: Option<K::Value>,
}

// not derived: date and instant values have no Default
impl<K: PrimitiveKind> Default for PrimitiveBuilder<K> {
    fn default() -> Self {
        Self {
            base: ElementBuilderBase::default(),
            value: None,
        }
    }
}

impl<K: PrimitiveKind> PrimitiveBuilder<K> {
    pub fn value(mut self, value: impl Into<K::Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn clear_value(mut self) -> Self {
        self.value = None;
        self
    }
}

impl<K: PrimitiveKind> ElementBuilder for PrimitiveBuilder<K> {
    fn element_mut(&mut self) -> &mut ElementBuilderBase {
        &mut self.base
    }
}

impl<K: PrimitiveKind> Builder for PrimitiveBuilder<K> {
    type Target = Primitive<K>;

    fn freeze(&self, config: &ModelConfig) -> Result<Primitive<K>> {
        let info = K::info();
        let base = self.base.freeze(info, config)?;
        if let Some(value) = &self.value {
            K::check(value, &info.path("value"), config)?;
        }
        let primitive = Primitive {
            base,
            value: self.value.clone(),
            kind: PhantomData,
        };
        validation::require_value_or_children(&primitive, info.name)?;
        Ok(primitive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_string_checks() {
        assert!(FhirString::of("hello\tworld\n").is_ok());
        assert_eq!(
            FhirString::of("   ").unwrap_err().kind(),
            ErrorKind::InvalidValue
        );
        assert!(FhirString::of("bell\u{7}").is_err());
    }

    #[test]
    fn test_control_chars_allowed_when_disabled() {
        let config = ModelConfig::builder().check_control_chars(false).build();
        let value = FhirString::builder()
            .value("bell\u{7}")
            .build_with(&config)
            .unwrap();
        assert_eq!(value.as_str(), Some("bell\u{7}"));
    }

    #[test]
    fn test_max_string_length() {
        let config = ModelConfig::builder().max_string_length(4).build();
        assert!(FhirString::builder().value("four").build_with(&config).is_ok());
        let err = Uri::builder().value("fives").build_with(&config).unwrap_err();
        assert_eq!(err.path(), "uri.value");
    }

    #[test]
    fn test_code_whitespace() {
        assert!(Code::of("a b").is_ok());
        assert!(Code::of("a  b").is_err());
        assert!(Code::of("a\tb").is_err());
        assert!(Code::of("b ").is_err());
        assert!(Code::of("").is_err());
    }

    #[test]
    fn test_id_pattern() {
        assert!(Id::of("abc-123.DEF").is_ok());
        assert!(Id::of("a/b").is_err());
        assert!(Id::of("x".repeat(65)).is_err());
        assert!(Id::of("x".repeat(64)).is_ok());
    }

    #[test]
    fn test_uri_rejects_whitespace() {
        assert!(Uri::of("urn:uuid:53fefa32-fcbb-4ff8-8a92-55ee120877b7").is_ok());
        assert!(Uri::of("http://example.org/a b").is_err());
    }

    #[test]
    fn test_integer_bounds() {
        assert!(Integer::of(-5).is_ok());
        assert!(UnsignedInt::of(0).is_ok());
        assert!(UnsignedInt::of(-1).is_err());
        assert!(PositiveInt::of(1).is_ok());
        assert!(PositiveInt::of(0).is_err());
    }

    #[test]
    fn test_parse_lexical_forms() {
        assert_eq!(Boolean::parse("true").unwrap().value(), Some(&true));
        assert!(Boolean::parse("yes").is_err());
        assert_eq!(
            Decimal::parse("1.50").unwrap().value().unwrap().to_string(),
            "1.50"
        );
        assert_eq!(
            Date::parse("2024-03").unwrap().value(),
            Some(&PartialDate::YearMonth(2024, 3))
        );
        assert!(Date::parse("2024-13").is_err());
        assert!(Date::parse("24").is_err());
        assert!(matches!(
            DateTime::parse("2024-03-05T10:00:00+01:00").unwrap().value(),
            Some(DateTimeValue::Full(_))
        ));
        assert!(Instant::parse("2024-03-05").is_err());
        assert!(Time::parse("10:15:30").is_ok());
    }

    #[test]
    fn test_builders_for_values_without_default() {
        let err = Date::builder().build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyElementViolation);

        let date = Date::parse("2024-05-01").unwrap();
        let rebuilt = PrimitiveBuilder::<DateKind>::default()
            .value(date.value().unwrap().clone())
            .build()
            .unwrap();
        assert_eq!(rebuilt, date);

        let instant = Instant::parse("2024-05-01T10:30:00Z").unwrap();
        assert_eq!(instant.to_builder().build().unwrap(), instant);
    }

    #[test]
    fn test_date_parts_need_two_digits() {
        assert!(Date::parse("2024-1-05").is_err());
        assert!(Date::parse("2024-01-5").is_err());
        assert!(Date::parse("2024-+1").is_err());
        assert!(Date::parse("2024-02-30").is_err());
        assert_eq!(
            Date::parse("2024-01-05").unwrap().value().unwrap().to_string(),
            "2024-01-05"
        );
        assert!(DateTime::parse("2024-1").is_err());
    }

    #[test]
    fn test_decimal_lexical_form() {
        assert!(Decimal::parse("1_000").is_err());
        assert!(Decimal::parse("01.5").is_err());
        assert!(Decimal::parse("1.").is_err());
        assert!(Decimal::parse("+1").is_err());
        assert!(Decimal::parse("-0.25").is_ok());
        assert_eq!(
            Decimal::parse("1.5e3").unwrap().value(),
            Some(&DecimalValue::new(1500, 0))
        );
    }

    #[test]
    fn test_base64_canonical_padding() {
        assert_eq!(Base64Binary::parse("aGk=").unwrap().value().unwrap(), b"hi");
        assert!(Base64Binary::parse("aGk").is_err());
        // non-zero padding bits
        assert!(Base64Binary::parse("aGl=").is_err());
    }

    #[test]
    fn test_value_display() {
        let date = Date::parse("2024-03-05").unwrap();
        let mut children = Children::new();
        date.children(&mut children);
        let rendered: Vec<String> = children
            .iter()
            .filter_map(|(_, child)| match child {
                crate::visitor::Child::Value(v) => Some(v.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(rendered, vec!["2024-03-05"]);
    }

    #[test]
    fn test_extension_only_primitive() {
        let extension = Extension::builder()
            .url("http://hl7.org/fhir/StructureDefinition/data-absent-reason")
            .value(Code::of("unknown").unwrap())
            .build()
            .unwrap();
        let empty = FhirString::builder().extension([extension]).build().unwrap();
        assert!(!empty.has_value());
        assert!(empty.has_children());

        let err = FhirString::builder().build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyElementViolation);
    }

    #[test]
    fn test_copy_with() {
        let original = FhirString::of("a").unwrap();
        let changed = original.to_builder().value("b").build().unwrap();
        assert_eq!(original.as_str(), Some("a"));
        assert_eq!(changed.as_str(), Some("b"));
    }
}
