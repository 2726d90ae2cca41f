//! Simulation configuration files.
//!
//! The simulator writes a plain-text file with one `key=value` pair per
//! line, no comments and no escaping. The grammar is deliberately kept
//! this narrow: duplicate keys overwrite silently and values are taken
//! verbatim, including any interior whitespace. [`SimConfig`] keeps the
//! entries in insertion order so that the parameter summary reproduces
//! the file faithfully.

use std::fs;
use std::path::Path;

/// Errors that can occur while reading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be opened or read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path of the file that could not be read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A line did not contain exactly one `=` separator
    #[error("Malformed config line {line}: expected exactly one '=' in `{content}`")]
    MalformedLine {
        /// 1-based line number of the offending line
        line: usize,
        /// The offending line content
        content: String,
    },

    /// A required key was absent
    #[error("Missing required config key: {0}")]
    MissingKey(String),
}

/// An insertion-ordered `key=value` mapping read from a simulation
/// configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimConfig {
    entries: Vec<(String, String)>,
}

impl SimConfig {
    /// Read and parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse configuration text, one `key=value` pair per line.
    ///
    /// Every line must contain exactly one `=`; the line terminator is not
    /// part of the value (`\n` and `\r\n` both accepted). A duplicated key
    /// keeps its original position and takes the last value.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut entries: Vec<(String, String)> = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let mut split = line.splitn(3, '=');
            let (key, value) = match (split.next(), split.next(), split.next()) {
                (Some(key), Some(value), None) => (key, value),
                _ => {
                    return Err(ConfigError::MalformedLine {
                        line: idx + 1,
                        content: line.to_string(),
                    })
                }
            };
            match entries.iter_mut().find(|(k, _)| k == key) {
                Some((_, stored)) => *stored = value.to_string(),
                None => entries.push((key.to_string(), value.to_string())),
            }
        }
        Ok(Self { entries })
    }

    /// Look up a key, returning the stored value if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a key that must be present.
    pub fn require(&self, key: &str) -> Result<&str, ConfigError> {
        self.get(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the configuration holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One-line display summary: every entry rendered as ` key=value`,
    /// concatenated in insertion order with a leading space before each
    /// pair and no trailing separator.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            out.push(' ');
            out.push_str(key);
            out.push('=');
            out.push_str(value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_pairs() {
        let config = SimConfig::parse("L=500\nT=500\noutputprefix=traffic\n").unwrap();
        assert_eq!(config.get("L"), Some("500"));
        assert_eq!(config.get("T"), Some("500"));
        assert_eq!(config.get("outputprefix"), Some("traffic"));
        assert_eq!(config.len(), 3);
    }

    #[test]
    fn test_summary_preserves_order() {
        let config = SimConfig::parse("b=2\na=1\nc=3").unwrap();
        assert_eq!(config.summary(), " b=2 a=1 c=3");
    }

    #[test]
    fn test_duplicate_key_last_value_first_position() {
        let config = SimConfig::parse("a=1\nb=2\na=3").unwrap();
        assert_eq!(config.get("a"), Some("3"));
        assert_eq!(config.summary(), " a=3 b=2");
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn test_line_without_separator_is_rejected() {
        let err = SimConfig::parse("L=500\nnonsense\n").unwrap_err();
        match err {
            ConfigError::MalformedLine { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, "nonsense");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_line_with_two_separators_is_rejected() {
        assert!(matches!(
            SimConfig::parse("a=b=c"),
            Err(ConfigError::MalformedLine { line: 1, .. })
        ));
    }

    #[test]
    fn test_empty_line_is_rejected() {
        assert!(matches!(
            SimConfig::parse("a=1\n\nb=2"),
            Err(ConfigError::MalformedLine { line: 2, .. })
        ));
    }

    #[test]
    fn test_crlf_terminators() {
        let config = SimConfig::parse("a=1\r\nb=2\r\n").unwrap();
        assert_eq!(config.get("a"), Some("1"));
        assert_eq!(config.get("b"), Some("2"));
    }

    #[test]
    fn test_value_keeps_interior_and_trailing_spaces() {
        let config = SimConfig::parse("note=hello world \n").unwrap();
        assert_eq!(config.get("note"), Some("hello world "));
    }

    #[test]
    fn test_empty_value_is_allowed() {
        let config = SimConfig::parse("key=").unwrap();
        assert_eq!(config.get("key"), Some(""));
    }

    #[test]
    fn test_require_missing_key() {
        let config = SimConfig::parse("a=1").unwrap();
        assert!(matches!(
            config.require("outputprefix"),
            Err(ConfigError::MissingKey(key)) if key == "outputprefix"
        ));
    }

    proptest! {
        #[test]
        fn parse_stores_arbitrary_pairs(
            key in "[^=\r\n]{1,16}",
            value in "[^=\r\n]{0,32}",
        ) {
            let config = SimConfig::parse(&format!("{key}={value}")).unwrap();
            prop_assert_eq!(config.get(&key), Some(value.as_str()));
            prop_assert_eq!(config.summary(), format!(" {key}={value}"));
        }
    }
}
