use tower_lsp::jsonrpc::{Error, ErrorCode};
use tower_lsp::lsp_types::{Position, Range};
use tree_sitter::{Node, Point};

pub fn create_server_error(code: i64, message: String) -> Error {
    let code = ErrorCode::ServerError(code);
    Error {
        code,
        message,
        data: None,
    }
}

pub fn get_range(node: &Node) -> Range {
    let tree_sitter::Range {
        start_point:
            Point {
                row: start_line,
                column: start_character,
            },
        end_point:
            Point {
                row: end_line,
                column: end_character,
            },
        ..
    } = node.range();

    Range {
        start: Position {
            line: start_line as u32,
            character: start_character as u32,
        },
        end: Position {
            line: end_line as u32,
            character: end_character as u32,
        },
    }
}
