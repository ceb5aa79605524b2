use std::sync::{Arc, Mutex};

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{Diagnostic, Range, TextDocumentContentChangeEvent, Url};
use tree_sitter::{Parser, Tree};

use crate::server::position::{self, TranslatedEdit};
use crate::server::syntax_errors;
use crate::utils;

/// One open document: its full text and the syntax tree parsed from exactly
/// that text. The two are only ever replaced together.
#[derive(Clone)]
pub struct TextDocument {
    pub uri: Url,
    pub source: String,
    pub syntax_tree: Option<Tree>,
    pub parser: Arc<Mutex<Parser>>,
}

type TDCCE = TextDocumentContentChangeEvent;

impl TextDocument {
    pub fn new(uri: Url, raw: String, parser: Arc<Mutex<Parser>>) -> TextDocument {
        let mut parser_lock = parser.lock().unwrap();
        let syntax_tree = parser_lock.parse(&raw, None);
        std::mem::drop(parser_lock);

        TextDocument {
            uri,
            source: raw,
            syntax_tree,
            parser,
        }
    }

    pub fn get_syntax_tree(&self) -> Result<&Tree> {
        self.syntax_tree.as_ref().ok_or(utils::create_server_error(
            3,
            format!("No syntax tree found for document '{}'", self.uri),
        ))
    }

    pub fn get_mut_syntax_tree(&mut self) -> Result<&mut Tree> {
        let error =
            utils::create_server_error(3, format!("No syntax tree found for document '{}'", self.uri));

        self.syntax_tree.as_mut().ok_or(error)
    }

    /// Applies the content changes of one notification in wire order. Every
    /// change is translated against the text left by the previous one, so
    /// later changes never see stale coordinates.
    pub fn apply_content_changes(&mut self, params: Vec<TDCCE>) -> Result<String> {
        let mut log = String::new();
        for param in params {
            let TDCCE { range, text, .. } = param;
            match range {
                Some(range) => self.reparse(&range, text)?,
                None => self.replace_whole(text),
            };

            log.push_str(self.get_syntax_tree()?.root_node().to_sexp().as_str());
            log.push('\n');
        }

        Ok(log)
    }

    fn reparse(&mut self, range: &Range, replacement: String) -> Result<()> {
        let TranslatedEdit { edit, text } = position::translate(&self.source, range, &replacement);

        let tree = self.get_mut_syntax_tree()?;
        tree.edit(&edit);

        let mut parser = self.parser.lock().unwrap();
        let tree = parser.parse(&text, self.syntax_tree.as_ref());
        std::mem::drop(parser);

        self.source = text;
        self.syntax_tree = tree;
        Ok(())
    }

    fn replace_whole(&mut self, raw: String) {
        let mut parser = self.parser.lock().unwrap();
        let syntax_tree = parser.parse(&raw, None);
        std::mem::drop(parser);

        self.source = raw;
        self.syntax_tree = syntax_tree;
    }

    pub fn get_syntax_errors(&self) -> Result<Vec<Diagnostic>> {
        Ok(syntax_errors::get_diagnostics(self.get_syntax_tree()?))
    }
}
