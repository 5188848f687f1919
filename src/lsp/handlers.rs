use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::*;

use crate::core::Severity;
use crate::lsp::backend::Backend;
use crate::tags::TagRegistry;
use crate::validation::engine::validate;

/// Trait for handling hover requests
#[tower_lsp::async_trait]
pub trait HandleHover {
    async fn handle_hover(&self, params: HoverParams) -> LspResult<Option<Hover>>;
}

/// Trait for handling completion requests
#[tower_lsp::async_trait]
pub trait HandleCompletion {
    async fn handle_completion(
        &self,
        params: CompletionParams,
    ) -> LspResult<Option<CompletionResponse>>;
}

/// Trait for handling diagnostics
#[tower_lsp::async_trait]
pub trait HandleDiagnostics {
    async fn publish_diagnostics(&self, uri: Url);
}

#[tower_lsp::async_trait]
impl HandleHover for Backend {
    async fn handle_hover(&self, params: HoverParams) -> LspResult<Option<Hover>> {
        let tdpp = params.text_document_position_params;
        let uri = tdpp.text_document.uri;
        let pos = tdpp.position;

        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return Ok(None),
        };

        let line = doc_state.text.lines().nth(pos.line as usize).unwrap_or("");
        let Some(word) = word_at(line, pos.character as usize) else {
            return Ok(None);
        };

        Ok(hover_markdown(&self.registry, &word).map(|value| Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value,
            }),
            range: None,
        }))
    }
}

#[tower_lsp::async_trait]
impl HandleCompletion for Backend {
    async fn handle_completion(
        &self,
        params: CompletionParams,
    ) -> LspResult<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let pos = params.text_document_position.position;

        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return Ok(None),
        };

        let line = doc_state.text.lines().nth(pos.line as usize).unwrap_or("");
        let prefix: String = line.chars().take(pos.character as usize).collect();

        let completions = completion_items(&self.registry, &prefix);
        if completions.is_empty() {
            Ok(None)
        } else {
            Ok(Some(CompletionResponse::Array(completions)))
        }
    }
}

#[tower_lsp::async_trait]
impl HandleDiagnostics for Backend {
    /// Validate the current text of a document and publish the result,
    /// unless a newer version arrived in the meantime
    async fn publish_diagnostics(&self, uri: Url) {
        let (text, version) = {
            let docs = self.documents.lock().await;
            match docs.get(&uri) {
                Some(state) => (state.text.clone(), state.version),
                None => return,
            }
        };

        let diagnostics: Vec<_> = validate(&text, &self.registry)
            .into_iter()
            .map(to_lsp_diagnostic)
            .collect();

        if !self.documents.lock().await.is_current(&uri, version) {
            log::debug!("Dropping stale diagnostics for {} (version {})", uri, version);
            return;
        }

        log::debug!("Publishing {} diagnostics for {}", diagnostics.len(), uri);
        self.client
            .publish_diagnostics(uri, diagnostics, Some(version))
            .await;
    }
}

/// Convert a validation diagnostic to its wire representation
pub fn to_lsp_diagnostic(diagnostic: crate::core::Diagnostic) -> Diagnostic {
    let severity = match diagnostic.severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Information => DiagnosticSeverity::INFORMATION,
        Severity::Hint => DiagnosticSeverity::HINT,
    };

    Diagnostic::new(
        Range::new(
            to_lsp_position(diagnostic.range.start),
            to_lsp_position(diagnostic.range.end),
        ),
        Some(severity),
        diagnostic
            .code
            .map(|code| NumberOrString::String(code.as_str().to_string())),
        Some("webrelease-ls".to_string()),
        diagnostic.message,
        None,
        None,
    )
}

fn to_lsp_position(position: crate::core::Position) -> Position {
    Position::new(
        u32::try_from(position.line).unwrap_or(u32::MAX),
        u32::try_from(position.character).unwrap_or(u32::MAX),
    )
}

/// The word under the cursor: alphanumerics, `_` and `-`
pub fn word_at(line: &str, character: usize) -> Option<String> {
    let chars: Vec<char> = line.chars().collect();
    let is_word = |c: char| c.is_alphanumeric() || c == '_' || c == '-';
    let character = character.min(chars.len());

    let mut start = character;
    while start > 0 && is_word(chars[start - 1]) {
        start -= 1;
    }
    let mut end = character;
    while end < chars.len() && is_word(chars[end]) {
        end += 1;
    }

    if start >= end {
        return None;
    }
    Some(chars[start..end].iter().collect())
}

/// Hover text for a function or tag name
pub fn hover_markdown(registry: &TagRegistry, word: &str) -> Option<String> {
    if let Some(function) = registry.get_function(word) {
        return Some(function.hover_text());
    }
    registry.get_tag(word).map(|tag| tag.hover_text())
}

/// Completions for the text before the cursor on the current line
pub fn completion_items(registry: &TagRegistry, prefix: &str) -> Vec<CompletionItem> {
    let mut completions = Vec::new();

    if prefix.contains("<wr-") {
        completions.extend(registry.tags().map(|tag| CompletionItem {
            label: tag.name.clone(),
            kind: Some(CompletionItemKind::KEYWORD),
            detail: Some(format!("WebRelease tag: {}", tag.name)),
            documentation: tag.description.clone().map(Documentation::String),
            insert_text: Some(tag.name.clone()),
            ..Default::default()
        }));
    }

    if prefix.contains('=') && prefix.contains('"') {
        completions.extend(attribute_value_completions(prefix));
    }

    if prefix.contains('%') {
        completions.extend(registry.functions().map(|function| CompletionItem {
            label: format!("{}()", function.name),
            kind: Some(CompletionItemKind::FUNCTION),
            detail: Some(format!("WebRelease function: {}()", function.name)),
            documentation: function.description.clone().map(Documentation::String),
            insert_text: Some(format!("{}()", function.name)),
            ..Default::default()
        }));
    }

    completions
}

fn attribute_value_completions(prefix: &str) -> Vec<CompletionItem> {
    let Some(eq) = prefix.rfind('=') else {
        return Vec::new();
    };
    let name_part = prefix[..eq].trim_end();
    let name_start = name_part
        .char_indices()
        .rev()
        .take_while(|&(_, c)| c.is_alphanumeric() || c == '-')
        .last()
        .map_or(name_part.len(), |(idx, _)| idx);

    match &name_part[name_start..] {
        "condition" => ["isNotNull()", "isNull()", "isNumber()"]
            .into_iter()
            .map(|label| CompletionItem {
                label: label.to_string(),
                kind: Some(CompletionItemKind::FUNCTION),
                ..Default::default()
            })
            .collect(),
        "list" | "string" | "times" => vec![CompletionItem {
            label: "element_name".to_string(),
            kind: Some(CompletionItemKind::VARIABLE),
            documentation: Some(Documentation::String(
                "Reference to template element".to_string(),
            )),
            ..Default::default()
        }],
        _ => Vec::new(),
    }
}
