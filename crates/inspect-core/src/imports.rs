/// Strip source-level quoting from import path literals.
///
/// Order is preserved and duplicates are kept; they collapse later when a
/// package is merged. A literal without a matching pair of quotes is
/// passed through unchanged.
pub fn import_paths<I, S>(literals: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    literals
        .into_iter()
        .map(|lit| unquote(lit.as_ref()).to_string())
        .collect()
}

fn unquote(literal: &str) -> &str {
    for quote in ['"', '`'] {
        if let Some(inner) = literal
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    literal
}
