//! Builder / validate-then-freeze protocol
//!
//! Every modeled type is created through its builder. Setters stage values;
//! [`Builder::build`] checks the staged field set and, only if every check
//! passes, returns a new immutable instance. The builder is left untouched, so
//! it can be adjusted and built again. [`Buildable::to_builder`] seeds a fresh
//! builder from an existing instance for copy-with edits.

use crate::config::ModelConfig;
use crate::error::Result;
use crate::schema::ModelType;

pub trait Builder: Default + Clone {
    type Target: ModelType;

    /// Run the checks for the staged fields and construct the instance
    ///
    /// Implementations freeze their ancestor base first, then apply the
    /// type's own checks.
    fn freeze(&self, config: &ModelConfig) -> Result<Self::Target>;

    fn build_with(&self, config: &ModelConfig) -> Result<Self::Target> {
        let type_name = Self::Target::schema().name;
        match self.freeze(config) {
            Ok(target) => {
                tracing::trace!(type_name, "froze instance");
                Ok(target)
            }
            Err(err) => {
                tracing::debug!(type_name, path = err.path(), kind = %err.kind(), "build rejected");
                Err(err)
            }
        }
    }

    /// Build against the process-wide [`ModelConfig`]
    fn build(&self) -> Result<Self::Target> {
        self.build_with(&ModelConfig::current())
    }
}

pub trait Buildable: Sized {
    type Builder: Builder<Target = Self>;

    fn builder() -> Self::Builder;

    /// A builder staged with every field of `self`
    fn to_builder(&self) -> Self::Builder;
}

/// Append (`field`) and replace (`set_field`) setters for repeating fields;
/// entries may be staged as `None` and are rejected at build
macro_rules! repeating_setters {
    ($($field:ident, $set:ident: $ty:ty;)+) => {
        $(
            pub fn $field<I>(mut self, items: I) -> Self
            where
                I: IntoIterator,
                I::Item: Into<Option<$ty>>,
            {
                self.$field.extend(items.into_iter().map(Into::into));
                self
            }

            pub fn $set<I>(mut self, items: I) -> Self
            where
                I: IntoIterator,
                I::Item: Into<Option<$ty>>,
            {
                self.$field = items.into_iter().map(Into::into).collect();
                self
            }
        )+
    };
}

pub(crate) use repeating_setters;
