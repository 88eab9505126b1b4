//! Naming rules for the generated C++.
//!
//! Registry names are free-form strings (`Namespace>TestStringOutput` is a
//! real operator), while struct names and enumerators must be identifiers.
//! The original spelling always survives as a string literal, so the mapping
//! here may be lossy; `lower` rejects the collisions it can cause.
use once_cell::sync::Lazy;
use regex::Regex;

static NON_IDENT_CHAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^A-Za-z0-9_]").expect("static regex")
});

/// C++ keywords and alternative tokens (C++20).
const RESERVED_WORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char16_t", "char32_t", "char8_t", "class", "co_await", "co_return",
    "co_yield", "compl", "concept", "const", "const_cast", "consteval", "constexpr", "constinit",
    "continue", "decltype", "default", "delete", "do", "double", "dynamic_cast", "else", "enum",
    "explicit", "export", "extern", "false", "float", "for", "friend", "goto", "if", "inline",
    "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq", "nullptr",
    "operator", "or", "or_eq", "private", "protected", "public", "register", "reinterpret_cast",
    "requires", "return", "short", "signed", "sizeof", "static", "static_assert", "static_cast",
    "struct", "switch", "template", "this", "thread_local", "throw", "true", "try", "typedef",
    "typeid", "typename", "union", "unsigned", "using", "virtual", "void", "volatile", "wchar_t",
    "while", "xor", "xor_eq",
];

/// Replace every character that can't appear in an identifier with `_`.
pub fn sanitize_identifier(name: &str) -> String {
    let mut out = NON_IDENT_CHAR.replace_all(name, "_").into_owned();
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Identifier for a struct or enumerator: sanitized, with a `_` suffix on keywords.
pub fn cpp_identifier(name: &str) -> String {
    let mut ident = sanitize_identifier(name);
    if is_reserved_word(&ident) {
        ident.push('_');
    }
    ident
}

/// Plain identifier check, used to validate configured namespaces.
pub fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && !NON_IDENT_CHAR.is_match(name)
        && !is_reserved_word(name)
}

/// Escape `s` for use inside a C++ `"..."` literal.
pub fn escape_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // octal, so a following hex digit can't extend the escape
            c if c.is_ascii_control() => out.push_str(&format!("\\{:03o}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_bracket_becomes_underscore() {
        assert_eq!(sanitize_identifier("Namespace>TestStringOutput"), "Namespace_TestStringOutput");
        assert_eq!(sanitize_identifier("Conv2D"), "Conv2D");
    }

    #[test]
    fn other_illegal_characters_and_leading_digits() {
        assert_eq!(sanitize_identifier("a.b/c-d"), "a_b_c_d");
        assert_eq!(sanitize_identifier("2Fast"), "_2Fast");
        assert_eq!(sanitize_identifier(""), "_");
    }

    #[test]
    fn keywords_get_suffixed_only_on_exact_match() {
        assert_eq!(cpp_identifier("template"), "template_");
        assert_eq!(cpp_identifier("default"), "default_");
        assert_eq!(cpp_identifier("templates"), "templates");
        assert_eq!(cpp_identifier("T"), "T");
    }

    #[test]
    fn namespaces_must_be_plain_identifiers() {
        assert!(is_identifier("tfdml"));
        assert!(!is_identifier("ops::core"));
        assert!(!is_identifier("namespace"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn literals_escape_quotes_and_backslashes() {
        assert_eq!(escape_string_literal(r#"a"b\c"#), r#"a\"b\\c"#);
        assert_eq!(escape_string_literal("Namespace>X"), "Namespace>X");
        assert_eq!(escape_string_literal("\u{1}a"), "\\001a");
    }
}
