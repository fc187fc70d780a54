//! FHIR element and resource model
//!
//! Immutable, strongly-typed FHIR trees with a build-time structural check and
//! generic traversal.
//!
//! # Module Organization
//!
//! - `element`, `resource`: the capability traits shared by every node
//! - `primitive`, `datatypes`: the value types (`string`, `Coding`, `Reference`, ...)
//! - `resource::{account, observation, patient}`: concrete resources
//! - `choice`: closed enums for `value[x]`-style fields
//! - `builder`, `validation`: the validate-then-freeze protocol and its rules
//! - `visitor`: depth-first traversal (callbacks or a `(path, node)` iterator)
//! - `schema`: static per-type metadata (cardinality, targets, bindings)
//!
//! # Example
//!
//! ```rust
//! use ferrum_model::prelude::*;
//! use ferrum_model::datatypes::{CodeableConcept, Coding, Reference};
//! use ferrum_model::primitive::{Code, FhirString, Uri};
//! use ferrum_model::resource::Observation;
//!
//! let code = CodeableConcept::builder()
//!     .coding([Coding::builder()
//!         .system(Uri::of("http://loinc.org").unwrap())
//!         .code(Code::of("8867-4").unwrap())
//!         .build()
//!         .unwrap()])
//!     .build()
//!     .unwrap();
//!
//! let subject = Reference::builder()
//!     .reference(FhirString::of("Patient/example").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let observation = Observation::builder()
//!     .status(Code::of("final").unwrap())
//!     .code(code)
//!     .subject(subject)
//!     .build()
//!     .unwrap();
//!
//! let paths: Vec<String> = ferrum_model::visitor::nodes(&observation)
//!     .map(|(path, _)| path)
//!     .collect();
//! assert!(paths.contains(&"Observation.subject.reference".to_string()));
//! ```

pub mod builder;
pub mod choice;
pub mod config;
pub mod datatypes;
pub mod element;
pub mod error;
pub mod primitive;
pub mod resource;
pub mod schema;
pub mod validation;
pub mod visitor;

// Re-export commonly used types
pub use builder::{Buildable, Builder};
pub use choice::{Choice, DataType};
pub use config::{ModelConfig, ModelConfigBuilder};
pub use error::{ConfigError, ErrorKind, ListDefect, ReferenceDefect, Result, ValidationError};
pub use resource::AnyResource;
pub use schema::{ElementInfo, ModelType, TypeInfo, TypeKind};
pub use visitor::{walk, Visitable, Visitor};

/// Traits needed to build, inspect and walk model types
pub mod prelude {
    pub use crate::builder::{Buildable, Builder};
    pub use crate::choice::Choice;
    pub use crate::element::{
        BackboneElement, BackboneElementBuilder, Element, ElementBuilder, HasChildren, HasExtensions,
        HasId, HasModifierExtensions,
    };
    pub use crate::resource::{DomainResource, DomainResourceBuilder, Resource, ResourceBuilder};
    pub use crate::schema::ModelType;
    pub use crate::visitor::{walk, Visitable, Visitor};
}
