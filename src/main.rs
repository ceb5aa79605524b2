use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{LanguageServer, LspService, Server};

use crate::server::{Backend, DiagnosticResult, TextDocument};

mod server;
mod utils;

#[tower_lsp::async_trait]
impl LanguageServer for server::Backend {
    async fn initialize(&self, _init: InitializeParams) -> Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::Incremental,
                )),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "ls-js".to_string(),
                version: Some("0.1.0".to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.get_client()
            .register_capability(vec![Registration {
                id: "ls-js/configuration".to_string(),
                method: "workspace/didChangeConfiguration".to_string(),
                register_options: None,
            }])
            .await
            .unwrap();

        self.info("Server initialized".to_string()).await;
    }

    async fn shutdown(&self) -> Result<()> {
        self.get_data().clear();
        Ok(())
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        let DidChangeConfigurationParams { settings } = params;
        let settings = serde_json::to_string(&settings).unwrap_or_default();

        self.handle_response(Ok(DiagnosticResult::from_logs(vec![format!(
            "Configuration changed: {}",
            settings
        )])))
        .await;
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        type DOTDP = DidOpenTextDocumentParams;
        fn did_open_with_result(this: &Backend, params: DOTDP) -> Result<DiagnosticResult> {
            let DOTDP {
                text_document: TextDocumentItem { uri, text, .. },
            } = params;

            let doc = TextDocument::new(uri.clone(), text, this.get_parser());
            let diagnostics = doc.get_syntax_errors()?;
            this.get_data().open_doc(uri.clone(), doc);

            let logs = vec![format!("Document opened: {}", uri.as_str())];
            Ok(DiagnosticResult::new(Some(logs), Some((uri, diagnostics))))
        }

        self.handle_response(did_open_with_result(self, params))
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        type DCTDP = DidChangeTextDocumentParams;
        fn did_change_with_result(this: &Backend, params: DCTDP) -> Result<DiagnosticResult> {
            let DCTDP {
                text_document: VersionedTextDocumentIdentifier { uri, .. },
                content_changes,
            } = params;

            let mut data = this.get_data();
            let doc = data.get_mut_doc(&uri)?;
            let log = doc.apply_content_changes(content_changes)?;
            let diagnostics = doc.get_syntax_errors()?;

            let logs = vec![format!("Document '{}' changed:\n{}", uri.as_str(), log)];
            Ok(DiagnosticResult::new(Some(logs), Some((uri, diagnostics))))
        }

        self.handle_response(did_change_with_result(self, params))
            .await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        fn did_close_with_result(
            this: &Backend,
            params: DidCloseTextDocumentParams,
        ) -> Result<DiagnosticResult> {
            let DidCloseTextDocumentParams {
                text_document: TextDocumentIdentifier { uri },
            } = params;

            this.get_data().close_doc(&uri)?;

            // Publishing an empty set clears the document's diagnostics in the editor
            Ok(DiagnosticResult::from_diagnostics(uri, Vec::new()))
        }

        self.handle_response(did_close_with_result(self, params))
            .await;
    }
}

#[tokio::main]
async fn main() {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, messages) = LspService::new(server::Backend::new);
    Server::new(stdin, stdout)
        .interleave(messages)
        .serve(service)
        .await;
}
