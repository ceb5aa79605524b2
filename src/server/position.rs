use tower_lsp::lsp_types::{Position, Range};
use tree_sitter::{InputEdit, Point};

/// Parser edit coordinates for one replacement, plus the text that results
/// from applying it.
#[derive(Debug, Clone)]
pub struct TranslatedEdit {
    pub edit: InputEdit,
    pub text: String,
}

/// Translates an editor-supplied line/column range and replacement string
/// into byte/point edit coordinates against `text`.
///
/// Rows and columns outside the document clamp to the nearest valid
/// position; an inverted range collapses to an empty span at its start.
/// Columns are counted in characters from line start.
pub fn translate(text: &str, range: &Range, replacement: &str) -> TranslatedEdit {
    fn clamp_to_lines(lines: &[&str], position: &Position) -> Point {
        let Position { line, character } = *position;
        let row = (line as usize).min(lines.len() - 1);
        let column = if line as usize > row {
            lines[row].chars().count()
        } else {
            (character as usize).min(lines[row].chars().count())
        };
        Point::new(row, column)
    }
    fn byte_offset(lines: &[&str], point: &Point) -> usize {
        let preceding: usize = lines[..point.row].iter().map(|line| line.len() + 1).sum();
        let within = lines[point.row]
            .char_indices()
            .nth(point.column)
            .map(|(idx, _)| idx)
            .unwrap_or_else(|| lines[point.row].len());
        preceding + within
    }
    fn end_point_of_replacement(start: Point, replacement: &str) -> Point {
        match replacement.rfind('\n') {
            Some(idx) => Point::new(
                start.row + replacement.matches('\n').count(),
                replacement[idx + 1..].chars().count(),
            ),
            None => Point::new(start.row, start.column + replacement.chars().count()),
        }
    }

    let lines = text.split('\n').collect::<Vec<_>>();

    let start_position = clamp_to_lines(&lines, &range.start);
    let end_position = clamp_to_lines(&lines, &range.end);

    let start_byte = byte_offset(&lines, &start_position);
    let end_byte = byte_offset(&lines, &end_position);

    let (old_end_byte, old_end_position) = if end_byte < start_byte {
        (start_byte, start_position)
    } else {
        (end_byte, end_position)
    };

    let new_end_byte = start_byte + replacement.len();
    let new_end_position = end_point_of_replacement(start_position, replacement);

    let text = format!(
        "{}{}{}",
        &text[..start_byte],
        replacement,
        &text[old_end_byte..]
    );

    TranslatedEdit {
        edit: InputEdit {
            start_byte,
            old_end_byte,
            new_end_byte,
            start_position,
            old_end_position,
            new_end_position,
        },
        text,
    }
}
