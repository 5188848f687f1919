use anyhow::Result;
use std::sync::Arc;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};

use crate::Config;
use crate::lsp::backend::Backend;
use crate::tags::TagRegistry;

/// Start the LSP server on stdio
pub async fn serve() -> Result<()> {
    let config = Config::from_args_and_env()?;
    config.init_logging();

    let registry = Arc::new(TagRegistry::from_config(&config)?);
    log::info!(
        "Starting WebRelease language server ({} tags, {} functions)",
        registry.tags().count(),
        registry.functions().count()
    );

    let (service, socket) =
        LspService::build(move |client| Backend::new(client, registry)).finish();

    Server::new(stdin(), stdout(), socket).serve(service).await;

    Ok(())
}
