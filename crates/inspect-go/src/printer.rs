//! Canonical rendering of declaration headers.

use tree_sitter::Node;

use inspect_core::Pos;

/// Render a declaration up to `end` (the body's opening brace), preceded
/// by its doc comment exactly as it appears in the source.
pub(crate) fn print_header(node: Node, end: usize, doc: Option<Pos>, source: &str) -> Option<String> {
    let mut out = String::new();
    if let Some(doc) = doc {
        out.push_str(source.get(doc.offset()..node.start_byte())?);
    }
    out.push_str(&span_text(node, end, source)?);
    Some(out)
}

/// Canonical text of `node` from its start to `end`, comments removed.
pub(crate) fn span_text(node: Node, end: usize, source: &str) -> Option<String> {
    let mut comments = Vec::new();
    collect_comments(node, end, &mut comments);

    let mut text = String::new();
    let mut at = node.start_byte();
    for (start, stop) in comments {
        text.push_str(source.get(at..start)?);
        text.push(' ');
        at = stop;
    }
    text.push_str(source.get(at..end)?);
    Some(canonicalize(&text))
}

fn collect_comments(node: Node, end: usize, out: &mut Vec<(usize, usize)>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.start_byte() >= end {
            break;
        }
        if child.kind() == "comment" {
            out.push((child.start_byte(), child.end_byte().min(end)));
        } else {
            collect_comments(child, end, out);
        }
    }
}

/// Collapse whitespace to single spaces outside literals, with no space
/// after `(`/`[` or before `)`/`]`/`,`, one space after `,`, and no
/// trailing comma before a closing bracket.
pub(crate) fn canonicalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in text.chars() {
        if let Some(q) = quote {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' && q != '`' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        if c.is_whitespace() {
            pending_space = true;
            continue;
        }

        if matches!(c, ')' | ']') && out.ends_with(',') {
            out.pop();
        }
        let wants_space = pending_space || out.ends_with(',');
        if wants_space
            && !out.is_empty()
            && !out.ends_with(['(', '[', ' '])
            && !matches!(c, ')' | ']' | ',')
        {
            out.push(' ');
        }
        pending_space = false;

        if matches!(c, '"' | '`' | '\'') {
            quote = Some(c);
        }
        out.push(c);
    }

    out
}
