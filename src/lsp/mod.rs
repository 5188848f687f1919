//! LSP Protocol Implementation
//!
//! Thin protocol layer: document bookkeeping, diagnostics publishing, hover,
//! and completion. All checking is delegated to the validation engine.

pub mod backend;
pub mod handlers;
pub mod server;

pub use backend::Backend;
