//! Line continuation handling for multi-line cells.
//!
//! A command line ending in `\` continues on the first lines of the cell,
//! exactly like a terminal. Whatever the continuation does not consume is the
//! cell's content.

use tracing::debug;

/// Marker that continues a command line onto the next cell line.
pub const CONTINUATION: char = '\\';

/// A command line merged with its continuation lines, and the rest of the cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassembled {
    /// The full argument line, continuation markers removed.
    pub line: String,
    /// The cell body left over after continuation lines were consumed.
    pub content: String,
}

/// Splits a cell into its argument line and its content.
///
/// Without a trailing marker on `line`, the cell is returned untouched as
/// content. With one, cell lines are consumed until a line does not end in
/// the marker; the remainder is trimmed. A cell that ends while a line is
/// still being continued leaves no content.
///
/// ```
/// use nbcli::cli::reassemble;
///
/// let cell = reassemble("cmd --flag \\", "a \\\nb");
/// assert_eq!(cell.line, "cmd --flag a b");
/// assert_eq!(cell.content, "");
/// ```
pub fn reassemble(line: &str, cell: &str) -> Reassembled {
    let first = line.trim_end();

    if !first.ends_with(CONTINUATION) {
        return Reassembled {
            line: first.to_string(),
            content: cell.to_string(),
        };
    }

    let mut joined = String::new();
    push_segment(&mut joined, strip_marker(first));

    let mut lines = cell.lines();
    let mut pending = true;

    for next in lines.by_ref() {
        let next = next.trim();
        pending = next.ends_with(CONTINUATION);
        push_segment(&mut joined, strip_marker(next));

        if !pending {
            break;
        }
    }

    let content = if pending {
        debug!("Cell ended while awaiting a continuation line");
        String::new()
    } else {
        lines.collect::<Vec<_>>().join("\n").trim().to_string()
    };

    Reassembled {
        line: joined,
        content,
    }
}

fn strip_marker(segment: &str) -> &str {
    segment.trim_end_matches(CONTINUATION).trim_end()
}

fn push_segment(joined: &mut String, segment: &str) {
    if segment.is_empty() {
        return;
    }

    if !joined.is_empty() {
        joined.push(' ');
    }
    joined.push_str(segment);
}
