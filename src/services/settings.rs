//! Flat `key=value` settings files.
//!
//! Updates are a read-merge-overwrite cycle: whatever is on disk is loaded,
//! new entries are applied on top, and the whole document is written back
//! sorted by key. Keys the caller does not touch keep their values.

use std::fs;
use std::sync::LazyLock;

use camino::Utf8Path;
use indexmap::IndexMap;
use regex::Regex;

use super::SetupError;

static ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([^=\s][^=]*?)\s*=\s*(.*?)\s*$").expect("Invalid settings regex")
});

/// An ordered, case-sensitive map of settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsDocument {
    entries: IndexMap<String, String>,
}

impl SettingsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `key=value` lines. Lines without a key and `=` are ignored.
    pub fn parse(text: &str) -> Self {
        Self::parse_bytes(text.as_bytes())
    }

    /// Parses raw file bytes line by line. Lines that are not valid UTF-8
    /// (legacy code-page text) are skipped like any other malformed line.
    pub fn parse_bytes(bytes: &[u8]) -> Self {
        let mut doc = Self::new();
        for line in bytes.split(|&b| b == b'\n') {
            let Ok(line) = std::str::from_utf8(line) else {
                continue;
            };
            if let Some(caps) = ENTRY_PATTERN.captures(line) {
                doc.set(&caps[1], &caps[2]);
            }
        }
        doc
    }

    /// Loads a document from disk; a missing file is an empty document.
    pub fn load(path: &Utf8Path) -> Result<Self, std::io::Error> {
        match fs::read(path) {
            Ok(bytes) => Ok(Self::parse_bytes(&bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Sets a value; later writes to the same key win.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Applies `updates` on top of this document.
    pub fn merge<K, V>(&mut self, updates: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in updates {
            self.set(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders one `key=value` line per entry, sorted by key.
    pub fn render(&self) -> String {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let mut out = String::new();
        for (key, value) in sorted {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        out
    }
}

/// Checks that an entry survives a write and re-read unchanged.
///
/// Keys must be non-empty and hold no `=`, line break, or surrounding
/// whitespace. Values may hold `=` but no line break or surrounding whitespace.
pub fn validate_entry(key: &str, value: &str) -> Result<(), String> {
    let has_break = |s: &str| s.contains(['\n', '\r']);
    let padded = |s: &str| s.trim() != s;

    if key.is_empty() {
        return Err("key is empty".to_string());
    }
    if key.contains('=') || has_break(key) || padded(key) {
        return Err(format!("key {:?} contains '=', a line break or padding", key));
    }
    if has_break(value) || padded(value) {
        return Err(format!(
            "value {:?} for {} contains a line break or padding",
            value, key
        ));
    }
    Ok(())
}

/// Merges `entries` into the settings file at `path` and rewrites it.
///
/// Parent directories are created as needed. Entries that could not be read
/// back (see [`validate_entry`]) are rejected before the file is touched.
/// Otherwise only I/O problems are errors; unparseable lines in the existing
/// file are dropped.
pub fn merge_and_write(
    path: &Utf8Path,
    entries: &IndexMap<String, String>,
) -> Result<SettingsDocument, SetupError> {
    for (key, value) in entries {
        validate_entry(key, value).map_err(|reason| SetupError::InvalidSetting {
            path: path.to_path_buf(),
            reason,
        })?;
    }

    let mut doc = SettingsDocument::load(path).map_err(|e| SetupError::write(path, e))?;
    let previous = doc.len();

    doc.merge(entries.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| SetupError::write(parent, e))?;
    }
    fs::write(path, doc.render()).map_err(|e| SetupError::write(path, e))?;

    tracing::info!(
        "Wrote {} settings to {} ({} existing, {} updated)",
        doc.len(),
        path,
        previous,
        entries.len()
    );
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_around_equals() {
        let doc = SettingsDocument::parse("Volume = 50\n  Width=1600  \n");
        assert_eq!(doc.get("Volume"), Some("50"));
        assert_eq!(doc.get("Width"), Some("1600"));
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let doc = SettingsDocument::parse("[Section]\njust text\n=orphan\nKey=Value\n\n");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("Key"), Some("Value"));
    }

    #[test]
    fn test_parse_keeps_later_duplicate() {
        let doc = SettingsDocument::parse("A=1\nA=2\n");
        assert_eq!(doc.get("A"), Some("2"));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_value_may_contain_equals() {
        let doc = SettingsDocument::parse("Args=-w=1 -h=2");
        assert_eq!(doc.get("Args"), Some("-w=1 -h=2"));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let doc = SettingsDocument::parse("width=1\nWidth=2\n");
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_render_sorted() {
        let mut doc = SettingsDocument::new();
        doc.set("Width", "1600");
        doc.set("Height", "1200");
        doc.set("Volume", "50");
        assert_eq!(doc.render(), "Height=1200\nVolume=50\nWidth=1600\n");
    }

    #[test]
    fn test_parse_bytes_skips_non_utf8_lines() {
        let doc = SettingsDocument::parse_bytes(b"Volume=50\r\nPlayerName=Andr\xe9\r\nMusic=1");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get("Volume"), Some("50"));
        assert_eq!(doc.get("Music"), Some("1"));
    }

    #[test]
    fn test_validate_entry() {
        assert!(validate_entry("Width", "1600").is_ok());
        assert!(validate_entry("Args", "-w=1").is_ok());
        assert!(validate_entry("Name", "").is_ok());

        assert!(validate_entry("", "1").is_err());
        assert!(validate_entry("A=B", "1").is_err());
        assert!(validate_entry("Two\nLines", "1").is_err());
        assert!(validate_entry(" Width", "1").is_err());
        assert!(validate_entry("Width", "1600 ").is_err());
        assert!(validate_entry("Width", "16\r\n00").is_err());
    }

    #[test]
    fn test_empty_value_survives() {
        let doc = SettingsDocument::parse("Name=\n");
        assert_eq!(doc.get("Name"), Some(""));
        assert_eq!(SettingsDocument::parse(&doc.render()), doc);
    }
}
