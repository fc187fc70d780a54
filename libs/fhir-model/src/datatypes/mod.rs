//! Complex datatypes
//!
//! The general-purpose datatypes the core depends on: extensions, references
//! and the small family of coded and structured values they carry.

pub mod codeable_concept;
pub mod coding;
pub mod extension;
pub mod identifier;
pub mod meta;
pub mod narrative;
pub mod period;
pub mod quantity;
pub mod reference;

pub use codeable_concept::{CodeableConcept, CodeableConceptBuilder};
pub use coding::{Coding, CodingBuilder};
pub use extension::{Extension, ExtensionBuilder, ExtensionValue};
pub use identifier::{Identifier, IdentifierBuilder};
pub use meta::{Meta, MetaBuilder};
pub use narrative::{Narrative, NarrativeBuilder};
pub use period::{Period, PeriodBuilder};
pub use quantity::{Quantity, QuantityBuilder};
pub use reference::{Reference, ReferenceBuilder};
