//! Blockstate variant/multipart resolution into cuboid element models.
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod face;
pub mod model;
pub mod predicate;
pub mod resolver;
pub mod table;

pub use error::{ModelError, Result};
pub use face::Face;
pub use model::{Element, ElementFace, ElementRotation, Model, ResolvedVariant, UvTile};
pub use predicate::Predicate;
pub use resolver::{ModelResolver, Resolution, ResolverStats};
pub use table::{BlockStates, VariantTable};

/// Strips a `minecraft:` style namespace.
#[inline]
pub fn bare_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, n)| n)
}
