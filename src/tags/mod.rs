//! Tag Registry
//!
//! Static knowledge about the template language: tags, their attributes, and
//! built-in functions.

mod builtin;
pub mod registry;
pub mod schema;

pub use registry::TagRegistry;
pub use schema::{FunctionDef, RegistryFile, TagDef};
