use std::collections::HashMap;

use lazy_static::lazy_static;
use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity};
use tree_sitter::{Node, Tree, TreeCursor};

use crate::utils;

lazy_static! {
    // Static table, not derived from grammar metadata
    static ref CLOSING_DELIMITERS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("'", "'");
        m.insert("\"", "\"");
        m.insert("`", "`");
        m.insert("{", "}");
        m.insert("[", "]");
        m.insert("(", ")");
        m
    };
}

/// Walks the whole tree and formats every error or missing node into a
/// diagnostic. Always a full replacement set for the document.
pub fn get_diagnostics(tree: &Tree) -> Vec<Diagnostic> {
    collect_error_nodes(tree.root_node())
        .into_iter()
        .map(|node| to_diagnostic(&node))
        .collect()
}

/// Pre-order collection of all error and missing nodes in the tree,
/// including ones nested inside other erroring subtrees.
pub fn collect_error_nodes(root: Node) -> Vec<Node> {
    fn traverse<'tree>(mut cursor: TreeCursor<'tree>, nodes: &mut Vec<Node<'tree>>) {
        let node = cursor.node();
        if !node.has_error() {
            return;
        }

        if node.is_error() || node.is_missing() {
            nodes.push(node);
        };

        cursor.goto_first_child();
        for _ in 0..node.child_count() {
            traverse(cursor.node().walk(), nodes);
            cursor.goto_next_sibling();
        }
    }

    let mut nodes = Vec::new();
    traverse(root.walk(), &mut nodes);
    nodes
}

pub fn to_diagnostic(node: &Node) -> Diagnostic {
    Diagnostic {
        severity: Some(DiagnosticSeverity::Error),
        range: utils::get_range(node),
        message: describe(node),
        source: Some("parse".to_string()),
        ..Default::default()
    }
}

fn describe(node: &Node) -> String {
    if node.is_missing() {
        return format!("Missing {}", node.kind());
    }

    match node.child(0) {
        Some(child) => match closing_delimiter(child.kind()) {
            Some(closer) => format!("Expected closing {}", closer),
            None => format!("Unexpected {}", child.kind()),
        },
        None => format!("Unexpected {}", node.kind()),
    }
}

fn closing_delimiter(kind: &str) -> Option<&'static str> {
    CLOSING_DELIMITERS.get(kind).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn parse(raw: &str) -> Tree {
        let mut parser = Parser::new();
        parser.set_language(tree_sitter_javascript::language()).unwrap();
        parser.parse(raw, None).unwrap()
    }

    #[test]
    fn test_closing_delimiters() {
        assert_eq!(Some(")"), closing_delimiter("("));
        assert_eq!(Some("]"), closing_delimiter("["));
        assert_eq!(Some("}"), closing_delimiter("{"));
        assert_eq!(Some("'"), closing_delimiter("'"));
        assert_eq!(Some("\""), closing_delimiter("\""));
        assert_eq!(Some("`"), closing_delimiter("`"));
        assert_eq!(None, closing_delimiter("identifier"));
    }

    #[test]
    fn test_valid_tree_has_no_error_nodes() {
        let tree = parse("const x = 1;\nfunction f(a) { return a; }\n");
        assert!(collect_error_nodes(tree.root_node()).is_empty());
    }

    #[test]
    fn test_unterminated_call_reports_missing_paren() {
        let tree = parse("foo(");
        let diagnostics = get_diagnostics(&tree);

        assert_eq!(1, diagnostics.len());
        assert_eq!("Missing )", diagnostics[0].message);
        assert_eq!(diagnostics[0].range.start, diagnostics[0].range.end);
        assert_eq!(4, diagnostics[0].range.start.character);
    }

    #[test]
    fn test_stray_token_reports_unexpected() {
        let tree = parse(")");
        let diagnostics = get_diagnostics(&tree);

        assert!(!diagnostics.is_empty());
        assert!(diagnostics[0].message.starts_with("Unexpected"));
    }

    #[test]
    fn test_nested_errors_are_all_collected() {
        let tree = parse("foo(\nbar(");
        let nodes = collect_error_nodes(tree.root_node());

        assert_eq!(2, nodes.len());
        for node in &nodes {
            assert!(node.is_missing());
        }
    }

    #[test]
    fn test_diagnostic_fields() {
        let diagnostics = get_diagnostics(&parse("const x = ;"));

        assert!(!diagnostics.is_empty());
        for diagnostic in &diagnostics {
            assert_eq!(Some(DiagnosticSeverity::Error), diagnostic.severity);
            assert_eq!(Some("parse".to_string()), diagnostic.source);
        }
    }

    #[test]
    fn test_diagnostics_are_deterministic() {
        let tree = parse("const x = ;\nfoo(");
        assert_eq!(get_diagnostics(&tree), get_diagnostics(&tree));
    }
}
