//! Validation rule library
//!
//! Stateless checks composed by every builder's `freeze`. Each returns the
//! first violation found as a [`ValidationError`] carrying the field path.
//!
//! Builders apply them in a fixed order: ancestor checks, required fields,
//! repeating fields, choice and reference fields, then value-or-children.

use std::sync::OnceLock;

use regex::Regex;

use crate::choice::{Choice, DataType};
use crate::config::ModelConfig;
use crate::datatypes::Reference;
use crate::element::Element;
use crate::error::{ListDefect, ReferenceDefect, Result, ValidationError};
use crate::schema::{self, TypeInfo};
use crate::visitor::Visitable;

const MAX_ID_LENGTH: usize = 64;

/// Fail if a required singular field is absent
pub fn require_non_null<'v, T>(value: Option<&'v T>, path: &str) -> Result<&'v T> {
    value.ok_or_else(|| ValidationError::MissingRequiredField {
        path: path.to_string(),
    })
}

/// Fail if a repeating field has a hole or an entry that is not an `expected`
///
/// Returns the entries, in order, ready to be frozen.
pub fn check_list<T>(entries: &[Option<T>], path: &str, expected: &TypeInfo) -> Result<Vec<T>>
where
    T: Visitable + Clone,
{
    let mut checked = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let entry = entry.as_ref().ok_or_else(|| ValidationError::MalformedList {
            path: path.to_string(),
            index,
            defect: ListDefect::NullEntry,
        })?;
        let found = entry.type_info();
        if !found.is_a(expected.name) {
            return Err(ValidationError::MalformedList {
                path: path.to_string(),
                index,
                defect: ListDefect::WrongType {
                    expected: expected.name,
                    found: found.name,
                },
            });
        }
        checked.push(entry.clone());
    }
    Ok(checked)
}

/// Like [`check_list`], for repeating fields with a minimum cardinality of one
pub fn check_non_empty_list<T>(entries: &[Option<T>], path: &str, expected: &TypeInfo) -> Result<Vec<T>>
where
    T: Visitable + Clone,
{
    if entries.is_empty() {
        return Err(ValidationError::MissingRequiredField {
            path: path.to_string(),
        });
    }
    check_list(entries, path, expected)
}

/// Convert a staged choice value into the field's closed set of variants
pub fn choice_element<C: Choice>(value: Option<&DataType>, path: &str) -> Result<Option<C>> {
    value
        .map(|value| {
            C::from_data(value.clone()).map_err(|rejected| ValidationError::ChoiceTypeViolation {
                path: path.to_string(),
                found: rejected.type_name(),
                allowed: C::ALLOWED_TYPES,
            })
        })
        .transpose()
}

pub fn require_choice_element<C: Choice>(value: Option<&DataType>, path: &str) -> Result<C> {
    let value = require_non_null(value, path)?;
    choice_element(Some(value), path)?.ok_or_else(|| ValidationError::MissingRequiredField {
        path: path.to_string(),
    })
}

/// `Type/id` or `Type/id/_history/vid`
fn reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Za-z]+)/([A-Za-z0-9\-.]{1,64})(/_history/([A-Za-z0-9\-.]{1,64}))?$")
            .expect("reference regex must compile")
    })
}

const RESOURCE_TYPE_GROUP: usize = 1;

/// Absolute literals (`https://...`, `urn:uuid:...`) are not checked for a type
fn has_scheme(literal: &str) -> bool {
    matches!(literal.find(':'), Some(index) if index > 0 && literal.len() > index + 1)
}

/// Resource type named by a reference literal
///
/// `Ok(None)` means the literal is not typed (local `#id` or absolute URI).
fn literal_resource_type(literal: &str) -> std::result::Result<Option<&str>, ReferenceDefect> {
    if literal.starts_with('#') || has_scheme(literal) {
        return Ok(None);
    }
    if let Some(index) = literal.find('?') {
        // conditional reference
        return Ok(Some(&literal[..index]));
    }
    reference_pattern()
        .captures(literal)
        .and_then(|captures| captures.get(RESOURCE_TYPE_GROUP))
        .map(|m| Some(m.as_str()))
        .ok_or(ReferenceDefect::MissingResourceType)
}

fn check_target(found: &str, allowed: &'static [&'static str]) -> std::result::Result<(), ReferenceDefect> {
    if !schema::is_resource_type(found) {
        return Err(ReferenceDefect::UnknownResourceType {
            found: found.to_string(),
        });
    }
    // no declared targets means any resource type
    if !allowed.is_empty() && !allowed.contains(&found) {
        return Err(ReferenceDefect::TargetNotAllowed {
            found: found.to_string(),
            allowed,
        });
    }
    Ok(())
}

/// Fail if a reference's literal or declared type is not an acceptable target
pub fn check_reference_type(
    reference: &Reference,
    path: &str,
    allowed: &'static [&'static str],
    config: &ModelConfig,
) -> Result<()> {
    if !config.check_reference_types {
        return Ok(());
    }
    let literal = reference.reference().and_then(|r| r.as_str());
    let violation = |defect: ReferenceDefect| ValidationError::ReferenceTargetViolation {
        path: path.to_string(),
        reference: literal
            .or_else(|| reference.type_().and_then(|t| t.as_str()))
            .unwrap_or_default()
            .to_string(),
        defect,
    };

    let literal_type = match literal {
        Some(literal) => {
            let found = literal_resource_type(literal).map_err(violation)?;
            if let Some(found) = found {
                check_target(found, allowed).map_err(violation)?;
            }
            found
        }
        None => None,
    };

    if let Some(declared) = reference.type_().and_then(|t| t.as_str()) {
        check_target(declared, allowed).map_err(violation)?;
        if let Some(found) = literal_type {
            if found != declared {
                return Err(violation(ReferenceDefect::TypeMismatch {
                    literal: found.to_string(),
                    declared: declared.to_string(),
                }));
            }
        }
    }
    Ok(())
}

/// Check every reference of a field against the targets declared in the schema
pub fn check_references<'r, I>(info: &TypeInfo, element: &str, references: I, config: &ModelConfig) -> Result<()>
where
    I: IntoIterator<Item = &'r Reference>,
{
    let allowed = info
        .element(element)
        .map(|e| e.reference_targets)
        .unwrap_or_default();
    let path = info.path(element);
    for reference in references {
        check_reference_type(reference, &path, allowed, config)?;
    }
    Ok(())
}

/// Fail if an element carries neither a value nor any child
pub fn require_value_or_children<E: Element + ?Sized>(element: &E, path: &str) -> Result<()> {
    if !element.has_value() && !element.has_children() {
        return Err(ValidationError::EmptyElementViolation {
            path: path.to_string(),
        });
    }
    Ok(())
}

/// Whitespace that may appear inside a string value
const ALLOWED_WHITESPACE: [char; 4] = [' ', '\t', '\r', '\n'];

fn is_breaking_whitespace(c: char) -> bool {
    c.is_whitespace() && !matches!(c, '\u{00A0}' | '\u{2007}' | '\u{202F}')
}

/// Below 32, only tab, carriage return and line feed are allowed
fn is_unsupported_control_char(c: char) -> bool {
    (c as u32) < 32 && !matches!(c, '\t' | '\r' | '\n')
}

fn check_control_char(value: &str, c: char, path: &str, config: &ModelConfig) -> Result<()> {
    if config.check_control_chars && is_unsupported_control_char(c) {
        return Err(ValidationError::invalid_value(
            path,
            format!("string value contains unsupported control characters: {:?}", value),
        ));
    }
    Ok(())
}

fn check_max_length(value: &str, path: &str, config: &ModelConfig) -> Result<()> {
    let length = value.chars().count();
    if length > config.max_string_length {
        return Err(ValidationError::invalid_value(
            path,
            format!(
                "value length: {} is greater than maximum allowed length: {}",
                length, config.max_string_length
            ),
        ));
    }
    Ok(())
}

/// At least one non-whitespace character, only allowed whitespace
pub fn check_string(value: &str, path: &str, config: &ModelConfig) -> Result<()> {
    check_max_length(value, path, config)?;
    let mut significant = 0;
    for c in value.chars() {
        if !is_breaking_whitespace(c) {
            check_control_char(value, c, path, config)?;
            significant += 1;
        } else if !ALLOWED_WHITESPACE.contains(&c) {
            return Err(ValidationError::invalid_value(
                path,
                format!("string value: {:?} contains illegal whitespace", value),
            ));
        }
    }
    if significant == 0 {
        return Err(ValidationError::invalid_value(
            path,
            "string value must contain at least one non-whitespace character",
        ));
    }
    Ok(())
}

/// No leading, trailing or consecutive whitespace; single spaces only
pub fn check_code(value: &str, path: &str, config: &ModelConfig) -> Result<()> {
    check_max_length(value, path, config)?;
    let (first, last) = match (value.chars().next(), value.chars().last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(ValidationError::invalid_value(path, "code value must not be empty")),
    };
    if is_breaking_whitespace(first) || is_breaking_whitespace(last) {
        return Err(ValidationError::invalid_value(
            path,
            format!("code value: {:?} must not begin or end with whitespace", value),
        ));
    }
    let mut previous_space = false;
    for c in value.chars() {
        if is_breaking_whitespace(c) {
            if c != ' ' {
                return Err(ValidationError::invalid_value(
                    path,
                    format!("code value: {:?} must not contain whitespace other than a single space", value),
                ));
            }
            if previous_space {
                return Err(ValidationError::invalid_value(
                    path,
                    format!("code value: {:?} must not contain consecutive spaces", value),
                ));
            }
            previous_space = true;
        } else {
            check_control_char(value, c, path, config)?;
            previous_space = false;
        }
    }
    Ok(())
}

/// `[A-Za-z0-9\-.]{1,64}`
pub fn check_id(value: &str, path: &str, _config: &ModelConfig) -> Result<()> {
    if value.is_empty() || value.len() > MAX_ID_LENGTH {
        return Err(ValidationError::invalid_value(
            path,
            format!("id value length: {} must be between 1 and {}", value.len(), MAX_ID_LENGTH),
        ));
    }
    if let Some(c) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '.'))
    {
        return Err(ValidationError::invalid_value(
            path,
            format!("id value: '{}' contains invalid character {:?}", value, c),
        ));
    }
    Ok(())
}

/// No whitespace anywhere
pub fn check_uri(value: &str, path: &str, config: &ModelConfig) -> Result<()> {
    check_max_length(value, path, config)?;
    for c in value.chars() {
        check_control_char(value, c, path, config)?;
        if c.is_whitespace() {
            return Err(ValidationError::invalid_value(
                path,
                format!("uri value: '{}' must not contain whitespace", value),
            ));
        }
    }
    Ok(())
}

pub fn check_min_value(value: i32, min: i32, path: &str) -> Result<()> {
    if value < min {
        return Err(ValidationError::invalid_value(
            path,
            format!("integer value: {} is less than minimum required value: {}", value, min),
        ));
    }
    Ok(())
}
