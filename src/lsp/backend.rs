use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::core::DocumentStore;
use crate::lsp::handlers::{HandleCompletion, HandleDiagnostics, HandleHover};
use crate::tags::TagRegistry;

/// The main LSP backend that holds state and implements the Language Server Protocol
pub struct Backend {
    pub client: Client,
    pub registry: Arc<TagRegistry>,
    pub documents: Arc<Mutex<DocumentStore>>,
}

impl Backend {
    pub fn new(client: Client, registry: Arc<TagRegistry>) -> Self {
        Self {
            client,
            registry,
            documents: Arc::new(Mutex::new(DocumentStore::new())),
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(
        &self,
        _: InitializeParams,
    ) -> tower_lsp::jsonrpc::Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(false),
                    trigger_characters: Some(vec![
                        "<".to_string(),
                        "%".to_string(),
                        "\"".to_string(),
                        "-".to_string(),
                    ]),
                    work_done_progress_options: Default::default(),
                    all_commit_characters: None,
                    completion_item: None,
                }),
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "webrelease-ls".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "webrelease-language-server initialized")
            .await;
    }

    async fn shutdown(&self) -> tower_lsp::jsonrpc::Result<()> {
        Ok(())
    }

    async fn hover(&self, params: HoverParams) -> tower_lsp::jsonrpc::Result<Option<Hover>> {
        self.handle_hover(params).await
    }

    async fn completion(
        &self,
        params: CompletionParams,
    ) -> tower_lsp::jsonrpc::Result<Option<CompletionResponse>> {
        self.handle_completion(params).await
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        log::debug!("Document opened: {}", doc.uri);

        let mut docs = self.documents.lock().await;
        docs.open(doc.uri.clone(), doc.text, doc.version);
        drop(docs); // Release the lock before validating

        self.publish_diagnostics(doc.uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        log::debug!("Document changed: {} (version {})", uri, version);

        // Full sync: the last change carries the whole text
        if let Some(change) = params.content_changes.into_iter().last() {
            let mut docs = self.documents.lock().await;
            let accepted = docs.update(uri.clone(), change.text, version);
            drop(docs);

            if accepted {
                self.publish_diagnostics(uri).await;
            }
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        log::debug!("Document closed: {}", uri);

        self.documents.lock().await.close(&uri);
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }
}
