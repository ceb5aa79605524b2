use std::collections::HashMap;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::Url;

use crate::server::TextDocument;
use crate::utils;

/// Per-connection store of open documents, keyed by uri. Contexts are
/// created on open, mutated in place on change and dropped on close.
#[derive(Default)]
pub struct BackendData {
    docs: HashMap<Url, TextDocument>,
}

impl BackendData {
    pub fn open_doc(&mut self, uri: Url, doc: TextDocument) {
        // A re-opened uri overwrites its previous context
        self.docs.insert(uri, doc);
    }

    #[allow(dead_code)]
    pub fn get_doc(&self, uri: &Url) -> Result<&TextDocument> {
        self.docs.get(uri).ok_or(utils::create_server_error(
            4,
            format!("No document found for uri: {}", uri),
        ))
    }

    pub fn get_mut_doc(&mut self, uri: &Url) -> Result<&mut TextDocument> {
        self.docs.get_mut(uri).ok_or(utils::create_server_error(
            4,
            format!("No document found for uri: {}", uri),
        ))
    }

    pub fn close_doc(&mut self, uri: &Url) -> Result<()> {
        self.docs
            .remove(uri)
            .map(|_| ())
            .ok_or(utils::create_server_error(
                4,
                format!("No document found for uri: {}", uri),
            ))
    }

    pub fn clear(&mut self) {
        self.docs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tree_sitter::Parser;

    fn create_doc(uri: &Url, raw: &str) -> TextDocument {
        let mut parser = Parser::new();
        parser.set_language(tree_sitter_javascript::language()).unwrap();
        TextDocument::new(uri.clone(), raw.to_string(), Arc::new(Mutex::new(parser)))
    }

    #[test]
    fn test_open_then_get() {
        let uri = Url::parse("file:///a.js").unwrap();
        let mut data = BackendData::default();

        data.open_doc(uri.clone(), create_doc(&uri, "const x = 1;"));

        assert_eq!("const x = 1;", data.get_doc(&uri).unwrap().source);
    }

    #[test]
    fn test_get_unknown_uri_is_an_error() {
        let data = BackendData::default();
        let uri = Url::parse("file:///missing.js").unwrap();

        assert!(data.get_doc(&uri).is_err());
    }

    #[test]
    fn test_reopen_overwrites() {
        let uri = Url::parse("file:///a.js").unwrap();
        let mut data = BackendData::default();

        data.open_doc(uri.clone(), create_doc(&uri, "const x = 1;"));
        data.open_doc(uri.clone(), create_doc(&uri, "const x = 2;"));

        assert_eq!("const x = 2;", data.get_doc(&uri).unwrap().source);
    }

    #[test]
    fn test_close_removes_doc() {
        let uri = Url::parse("file:///a.js").unwrap();
        let mut data = BackendData::default();

        data.open_doc(uri.clone(), create_doc(&uri, "const x = 1;"));
        data.close_doc(&uri).unwrap();

        assert!(data.get_doc(&uri).is_err());
        assert!(data.close_doc(&uri).is_err());
    }
}
