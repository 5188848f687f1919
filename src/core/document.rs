//! Document Store
//!
//! Latest text and version for each open document. Validation never reads
//! from here directly; the server snapshots the text and validates the copy.

use std::collections::HashMap;
use tower_lsp::lsp_types::Url;

/// State for each open document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentState {
    pub text: String,
    pub version: i32,
}

/// In-memory documents keyed by URI
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: HashMap<Url, DocumentState>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a document
    pub fn open(&mut self, uri: Url, text: String, version: i32) {
        self.documents.insert(uri, DocumentState { text, version });
    }

    /// Replace the text of a document. Older versions never overwrite newer ones.
    pub fn update(&mut self, uri: Url, text: String, version: i32) -> bool {
        match self.documents.get_mut(&uri) {
            Some(state) if state.version > version => false,
            Some(state) => {
                state.text = text;
                state.version = version;
                true
            }
            None => {
                self.open(uri, text, version);
                true
            }
        }
    }

    pub fn close(&mut self, uri: &Url) -> Option<DocumentState> {
        self.documents.remove(uri)
    }

    pub fn get(&self, uri: &Url) -> Option<&DocumentState> {
        self.documents.get(uri)
    }

    /// Whether `version` is still the latest known version of `uri`
    pub fn is_current(&self, uri: &Url, version: i32) -> bool {
        self.documents
            .get(uri)
            .is_some_and(|state| state.version == version)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
