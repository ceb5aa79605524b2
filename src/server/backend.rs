use std::sync::{Arc, Mutex, MutexGuard};

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::MessageType;
use tower_lsp::Client;
use tree_sitter::Parser;

use crate::server::backend_data::BackendData;
use crate::server::DiagnosticResult;

pub struct Backend {
    client: Client,
    data: Arc<Mutex<BackendData>>,
    parser: Arc<Mutex<Parser>>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        let mut parser = Parser::new();
        parser.set_language(tree_sitter_javascript::language()).unwrap();
        let parser = Arc::new(Mutex::new(parser));
        Self {
            client,
            data: Arc::new(Mutex::new(Default::default())),
            parser,
        }
    }

    pub async fn info(&self, msg: String) {
        self.get_client().log_message(MessageType::Info, msg).await
    }

    pub async fn error(&self, msg: String) {
        self.get_client().log_message(MessageType::Error, msg).await
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }

    pub fn get_data(&self) -> MutexGuard<BackendData> {
        self.data.lock().unwrap()
    }

    pub fn get_parser(&self) -> Arc<Mutex<Parser>> {
        self.parser.clone()
    }

    /// Forwards logs and diagnostics of a handled notification to the
    /// client. Errors never cross the notification boundary; they end up in
    /// the client log instead.
    pub async fn handle_response(&self, response: Result<DiagnosticResult>) {
        match response {
            Ok(DiagnosticResult {
                logs,
                uri_diagnostics,
            }) => {
                if let Some(logs) = logs {
                    for log in logs {
                        self.info(log).await;
                    }
                }
                if let Some((uri, diagnostics)) = uri_diagnostics {
                    self.get_client()
                        .publish_diagnostics(uri, diagnostics, None)
                        .await;
                }
            }
            Err(e) => self.error(format!("{:?}", e)).await,
        }
    }
}
