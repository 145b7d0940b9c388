//! Swift identifier validation.

use std::borrow::Cow;

/// Reserved words that need backticks when used as a declaration name.
const KEYWORDS: &[&str] = &[
    "Any",
    "Self",
    "as",
    "associatedtype",
    "await",
    "break",
    "case",
    "catch",
    "class",
    "continue",
    "default",
    "defer",
    "deinit",
    "do",
    "else",
    "enum",
    "extension",
    "fallthrough",
    "false",
    "fileprivate",
    "for",
    "func",
    "guard",
    "if",
    "import",
    "in",
    "init",
    "inout",
    "internal",
    "is",
    "let",
    "nil",
    "operator",
    "precedencegroup",
    "private",
    "protocol",
    "public",
    "repeat",
    "rethrows",
    "return",
    "self",
    "static",
    "struct",
    "subscript",
    "super",
    "switch",
    "throw",
    "throws",
    "true",
    "try",
    "typealias",
    "var",
    "where",
    "while",
];

/// Keywords that stay reserved even as argument labels.
const LABEL_KEYWORDS: &[&str] = &["inout", "let", "var"];

/// Returns true if `name` is a reserved word.
#[must_use]
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Returns true if `name` is lexically an identifier.
///
/// Reserved words pass this check; use [`is_keyword`] to reject them.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '_') || name == "_" {
        return false;
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Returns true if `name` can be emitted as a type name without escaping.
///
/// Dotted names (`Container.Member`) are accepted when every component is.
#[must_use]
pub fn is_type_name(name: &str) -> bool {
    name.split('.')
        .all(|component| is_identifier(component) && !is_keyword(component))
}

/// Escapes a declaration name with backticks if it is a reserved word.
#[must_use]
pub fn escape_declaration(name: &str) -> Cow<'_, str> {
    if is_keyword(name) {
        Cow::Owned(format!("`{name}`"))
    } else {
        Cow::Borrowed(name)
    }
}

/// Escapes an argument label with backticks if it is reserved in that position.
#[must_use]
pub fn escape_label(name: &str) -> Cow<'_, str> {
    if LABEL_KEYWORDS.contains(&name) {
        Cow::Owned(format!("`{name}`"))
    } else {
        Cow::Borrowed(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("point"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("café"));
        assert!(is_identifier("x1"));
        assert!(is_identifier("default"));

        assert!(!is_identifier(""));
        assert!(!is_identifier("_"));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier("a b"));
        assert!(!is_identifier("a.b"));
    }

    #[test]
    fn test_is_type_name() {
        assert!(is_type_name("Point"));
        assert!(is_type_name("IfStatement.ElseClause"));
        assert!(!is_type_name("Outer..Inner"));
        assert!(!is_type_name("Outer.class"));
        assert!(!is_type_name("Self"));
        assert!(!is_type_name("Point<Int>"));
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_declaration("default"), "`default`");
        assert_eq!(escape_declaration("value"), "value");
        assert_eq!(escape_label("default"), "default");
        assert_eq!(escape_label("var"), "`var`");
    }
}
