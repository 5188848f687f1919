//! Validation Engine
//!
//! Three independent passes over the full document text, each a fresh scan:
//! interpolated expressions, tags and attributes, and tag closure.

pub mod closure;
pub mod engine;
pub mod expressions;
pub mod tags;

pub use engine::{ValidationResult, validate, validate_document};
