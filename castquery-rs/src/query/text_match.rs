//! Translate a plain search term into a Postgres condition on cast text.
//!
//! Used by deployments that serve `/api/search` from their own cast table
//! instead of forwarding to a hosted search API. Single words and phrases
//! become word-boundary regex matches on `casts.text`; loose words inside
//! boolean or quoted queries go through `websearch_to_tsquery` on the `tsv`
//! column.

use regex::Regex;
use std::sync::LazyLock;

static OR_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+OR\s+").unwrap());
static BOOLEAN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(AND|OR)\b").unwrap());
static QUERY_PART: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""[^"]+"|\S+"#).unwrap());

/// Build the `WHERE` fragment matching `term`.
pub fn text_match_condition(term: &str) -> String {
    let term = term.trim();

    if is_single_word(term) {
        return exact_match(remove_quotes(term));
    }

    if term.contains(" OR ") {
        return phrases_with_or(term);
    }

    if has_complex_query(term) {
        return complex_query(term);
    }

    if is_phrase(term) {
        return exact_match(remove_quotes(term));
    }

    web_search(term)
}

fn is_single_word(term: &str) -> bool {
    !term.contains(' ') || (is_quoted(term) && !inner(term).contains(' '))
}

fn is_quoted(term: &str) -> bool {
    term.starts_with('"') && term.ends_with('"')
}

fn inner(term: &str) -> &str {
    if term.len() < 2 {
        ""
    } else {
        &term[1..term.len() - 1]
    }
}

fn remove_quotes(term: &str) -> &str {
    let term = term.strip_prefix('"').unwrap_or(term);
    term.strip_suffix('"').unwrap_or(term)
}

fn has_complex_query(term: &str) -> bool {
    term.contains('"') || term.contains('-') || BOOLEAN_WORD.is_match(term)
}

fn is_phrase(term: &str) -> bool {
    !term.contains('"') || is_quoted(term)
}

fn is_boolean_operator(part: &str) -> bool {
    part.eq_ignore_ascii_case("and") || part.eq_ignore_ascii_case("or")
}

fn escape_single_quotes(s: &str) -> String {
    s.replace('\'', "''")
}

fn exact_match(phrase: &str) -> String {
    format!("casts.text ~* '\\m{}\\M'", escape_single_quotes(phrase))
}

fn web_search(term: &str) -> String {
    format!(
        "tsv @@ websearch_to_tsquery('english', '{}')",
        escape_single_quotes(term)
    )
}

fn condition(part: &str) -> String {
    if is_boolean_operator(part) {
        return part.to_uppercase();
    }
    if is_quoted(part) {
        return exact_match(remove_quotes(part));
    }
    if part.contains(' ') {
        return exact_match(part);
    }
    web_search(part)
}

fn phrases_with_or(term: &str) -> String {
    OR_SEPARATOR
        .split(term)
        .map(|part| format!("({})", condition(part)))
        .collect::<Vec<_>>()
        .join(" OR ")
}

fn complex_query(term: &str) -> String {
    let mut conditions: Vec<String> = QUERY_PART
        .find_iter(term)
        .map(|m| condition(m.as_str()))
        .collect();

    // Operands sit at even positions; fill gaps with AND.
    let mut i = 1;
    while i < conditions.len() {
        if !is_boolean_operator(&conditions[i]) {
            conditions.insert(i, "AND".to_string());
        }
        i += 2;
    }

    conditions.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_word() {
        assert_eq!(text_match_condition(" hello "), r"casts.text ~* '\mhello\M'");
    }

    #[test]
    fn test_quoted_single_word() {
        assert_eq!(text_match_condition("\"hello\""), r"casts.text ~* '\mhello\M'");
    }

    #[test]
    fn test_unquoted_phrase() {
        assert_eq!(
            text_match_condition("star wars"),
            r"casts.text ~* '\mstar wars\M'"
        );
    }

    #[test]
    fn test_or_phrases() {
        assert_eq!(
            text_match_condition("star wars OR trek"),
            r"(casts.text ~* '\mstar wars\M') OR (tsv @@ websearch_to_tsquery('english', 'trek'))"
        );
    }

    #[test]
    fn test_complex_inserts_and() {
        assert_eq!(
            text_match_condition("\"star wars\" -trek"),
            r"casts.text ~* '\mstar wars\M' AND tsv @@ websearch_to_tsquery('english', '-trek')"
        );
    }

    #[test]
    fn test_lowercase_boolean_kept() {
        assert_eq!(
            text_match_condition("cats or dogs"),
            "tsv @@ websearch_to_tsquery('english', 'cats') OR tsv @@ websearch_to_tsquery('english', 'dogs')"
        );
    }

    #[test]
    fn test_single_quotes_escaped() {
        assert_eq!(text_match_condition("it's"), r"casts.text ~* '\mit''s\M'");
    }
}
