//! Shared string utilities for code generation.

/// Normalize free text into a lowercase snake_case identifier.
///
/// Every run of characters outside `[a-z0-9_]` (after lowercasing) becomes a
/// single `_`, and leading/trailing underscores are trimmed
/// (e.g., " Order Items! " -> "order_items").
pub fn to_slug(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;

    for c in s.trim().to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }

    out.trim_matches('_').to_string()
}

/// Convert a string to underscore-joined PascalCase (e.g., "order item" -> "Order_Item")
pub fn to_pascal_snake_case(s: &str) -> String {
    to_slug(s)
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect::<Vec<_>>()
        .join("_")
}

/// Convert a slug to a PHP constant prefix (e.g., "tfd-dbcrud-ticket" -> "TFD_DBCRUD_TICKET")
pub fn to_constant_case(s: &str) -> String {
    s.to_uppercase().replace('-', "_")
}

/// Escape a value for use inside a single-quoted PHP string literal.
pub fn escape_php_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Escape a value for use inside a double-quoted PHP string literal.
///
/// `$` is escaped as well so generated strings never interpolate variables,
/// and line breaks become `\n`/`\r` so the literal stays on one line.
pub fn escape_php_double_quoted(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('$', "\\$")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

/// Escape a value for use inside a single-quoted SQL string literal.
pub fn escape_sql_string(s: &str) -> String {
    s.replace('\'', "''")
}

/// Check whether a name is a valid PHP identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_php_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Check whether a value is an unsigned integer or decimal literal (`42`, `3.14`).
pub fn is_numeric_literal(s: &str) -> bool {
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    match s.split_once('.') {
        Some((int, frac)) => all_digits(int) && all_digits(frac),
        None => all_digits(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_slug() {
        assert_eq!(to_slug("status"), "status");
        assert_eq!(to_slug("  Order Items! "), "order_items");
        assert_eq!(to_slug("created-at"), "created_at");
        assert_eq!(to_slug("__id__"), "id");
        assert_eq!(to_slug("a _b"), "a__b");
        assert_eq!(to_slug("Prix €"), "prix");
        assert_eq!(to_slug("!!!"), "");
        assert_eq!(to_slug(""), "");
    }

    #[test]
    fn test_to_pascal_snake_case() {
        assert_eq!(to_pascal_snake_case("ticket"), "Ticket");
        assert_eq!(to_pascal_snake_case("order item"), "Order_Item");
        assert_eq!(to_pascal_snake_case("__a__b__"), "A_B");
        assert_eq!(to_pascal_snake_case(""), "");
    }

    #[test]
    fn test_to_constant_case() {
        assert_eq!(to_constant_case("tfd-dbcrud-ticket"), "TFD_DBCRUD_TICKET");
        assert_eq!(to_constant_case("tfd-dbcrud-order_item"), "TFD_DBCRUD_ORDER_ITEM");
    }

    #[test]
    fn test_escape_php_string() {
        assert_eq!(escape_php_string("it's"), "it\\'s");
        assert_eq!(escape_php_string("a\\b"), "a\\\\b");
        assert_eq!(escape_php_string("plain"), "plain");
    }

    #[test]
    fn test_escape_php_double_quoted() {
        assert_eq!(
            escape_php_double_quoted(r#"`note` TEXT DEFAULT 'say "hi" $x'"#),
            r#"`note` TEXT DEFAULT 'say \"hi\" \$x'"#
        );
        assert_eq!(escape_php_double_quoted(r"a\b"), r"a\\b");
        assert_eq!(escape_php_double_quoted("'a\nb\r'"), r"'a\nb\r'");
    }

    #[test]
    fn test_escape_sql_string() {
        assert_eq!(escape_sql_string("O'Brien"), "O''Brien");
        assert_eq!(escape_sql_string("''"), "''''");
    }

    #[test]
    fn test_is_php_identifier() {
        assert!(is_php_identifier("MY_PLUGIN_VERSION"));
        assert!(is_php_identifier("_v2"));
        assert!(is_php_identifier("CFB_Field_Color"));
        assert!(!is_php_identifier("2FAST"));
        assert!(!is_php_identifier("MY-PLUGIN"));
        assert!(!is_php_identifier(""));
    }

    #[test]
    fn test_is_numeric_literal() {
        assert!(is_numeric_literal("42"));
        assert!(is_numeric_literal("0"));
        assert!(is_numeric_literal("3.14"));
        assert!(!is_numeric_literal("-1"));
        assert!(!is_numeric_literal("1."));
        assert!(!is_numeric_literal(".5"));
        assert!(!is_numeric_literal("1.2.3"));
        assert!(!is_numeric_literal("1e3"));
        assert!(!is_numeric_literal(""));
    }
}
