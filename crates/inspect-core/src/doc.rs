//! Doc comment text cleanup.

/// Turn the raw comments of one comment group into documentation text.
///
/// Comment markers and compiler directives are removed, trailing whitespace
/// is stripped from every line, blank lines at either end are dropped and
/// interior blank runs collapse to one. The result is trimmed.
pub fn clean_comment<S: AsRef<str>>(comments: &[S]) -> String {
    let mut lines: Vec<&str> = Vec::new();

    for comment in comments {
        let comment = comment.as_ref();
        if let Some(body) = comment.strip_prefix("//") {
            if is_directive(body) {
                continue;
            }
            lines.push(body.strip_prefix(' ').unwrap_or(body));
        } else if let Some(body) = comment.strip_prefix("/*") {
            let body = body.strip_suffix("*/").unwrap_or(body);
            lines.extend(body.split('\n'));
        } else {
            lines.push(comment);
        }
    }

    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    for line in lines {
        let line = line.trim_end();
        if line.is_empty() && matches!(out.last(), None | Some(&"")) {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }

    out.join("\n").trim().to_string()
}

/// `//line`, `//extern`, `//export` and `//word:word` comments are
/// instructions to tooling, not documentation.
fn is_directive(body: &str) -> bool {
    if ["line ", "extern ", "export "]
        .iter()
        .any(|p| body.starts_with(p))
    {
        return true;
    }

    let Some(colon) = body.find(':') else {
        return false;
    };
    let (head, tail) = body.split_at(colon);
    let is_word = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    !head.is_empty()
        && head.chars().all(is_word)
        && tail[1..].chars().next().is_some_and(is_word)
}
