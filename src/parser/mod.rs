//! Template Parsing
//!
//! Expression checking and the lexical scans used by validation. No syntax
//! tree is produced.

pub mod expression;
pub mod scanner;

pub use expression::{ExpressionError, MAX_NESTING_DEPTH, check_expression};
pub use scanner::{Attribute, ClosingTag, Interpolation, Opener, OpeningTag};
