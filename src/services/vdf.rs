//! Single-key extraction from Steam's KeyValues text format (`.vdf` / `.acf`).
//!
//! Steam manifests are nested `"key" "value"` / `"key" { ... }` documents. Only one
//! key is ever needed per file here, so the text is scanned for `"key" "value"`
//! pairs in document order instead of being parsed into a tree. The scan still
//! tracks whether each quoted string sits in key or value position, so a value
//! that happens to spell the key is never mistaken for it.

use std::sync::LazyLock;

use regex::Regex;

/// A quoted string (capture 1), or a brace.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""((?:[^"\\]|\\.)*)"|[{}]"#).expect("Invalid VDF token regex")
});

/// Extracts every quoted value that follows the quoted `key`, in document order.
///
/// Key matching is case-insensitive (Steam itself treats keys that way). Values are
/// unescaped and empty values are dropped.
pub fn extract_values(text: &str, key: &str) -> Vec<String> {
    let mut values = Vec::new();
    // The key of the pair currently being read, once a key string has been seen
    let mut pending_key: Option<&str> = None;

    for caps in TOKEN_PATTERN.captures_iter(text) {
        let Some(quoted) = caps.get(1) else {
            // A brace opens or closes a block; either way a key comes next
            pending_key = None;
            continue;
        };

        match pending_key.take() {
            None => pending_key = Some(quoted.as_str()),
            Some(current) if current.eq_ignore_ascii_case(key) => {
                let value = unescape(quoted.as_str());
                if !value.is_empty() {
                    values.push(value);
                }
            }
            Some(_) => {}
        }
    }

    values
}

/// Extracts the first value for `key`, if any.
pub fn extract_first(text: &str, key: &str) -> Option<String> {
    extract_values(text, key).into_iter().next()
}

/// Collapses the C-style escapes Steam writes inside quoted strings.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_path() {
        let text = "\"libraryfolders\"\n{\n \"0\"\n {\n  \"path\" \"C:\\\\Games\\\\Steam\"\n }\n}";
        assert_eq!(extract_values(text, "path"), vec![r"C:\Games\Steam"]);
    }

    #[test]
    fn test_extract_keeps_document_order() {
        let text = r#"
            "0" { "path" "/b" }
            "1" { "path" "/a" }
            "2" { "path" "/c" }
        "#;
        assert_eq!(extract_values(text, "path"), vec!["/b", "/a", "/c"]);
    }

    #[test]
    fn test_extract_skips_empty_values() {
        let text = r#""path" "" "path" "/real""#;
        assert_eq!(extract_values(text, "path"), vec!["/real"]);
    }

    #[test]
    fn test_key_must_be_exact() {
        let text = r#""pathology" "/nope" "label" "path""#;
        assert!(extract_values(text, "path").is_empty());
    }

    #[test]
    fn test_value_spelling_the_key_is_not_a_key() {
        let text = r#"
"libraryfolders"
{
	"0"
	{
		"path"		"C:\\Steam"
		"label"		"path"
		"contentid"		"123"
	}
}
"#;
        assert_eq!(extract_values(text, "path"), vec![r"C:\Steam"]);
    }

    #[test]
    fn test_key_followed_by_block_is_ignored() {
        let text = r#""path" { "x" "y" }"#;
        assert!(extract_values(text, "path").is_empty());
    }

    #[test]
    fn test_extract_first_installdir() {
        let text = r#"
"AppState"
{
    "appid"       "549170"
    "name"        "Army Men II"
    "installdir"  "Army Men II"
}
"#;
        assert_eq!(extract_first(text, "installdir").as_deref(), Some("Army Men II"));
    }

    #[test]
    fn test_key_match_ignores_case() {
        let text = r#""InstallDir" "Game""#;
        assert_eq!(extract_first(text, "installdir").as_deref(), Some("Game"));
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"C:\\Games"), r"C:\Games");
        assert_eq!(unescape(r#"say \"hi\""#), r#"say "hi""#);
        assert_eq!(unescape(r"trailing\"), r"trailing\");
        assert_eq!(unescape("plain"), "plain");
    }

    #[test]
    fn test_escaped_quote_inside_value() {
        let text = r#""path" "D:\\Odd \"Name\"""#;
        assert_eq!(extract_values(text, "path"), vec![r#"D:\Odd "Name""#]);
    }
}
