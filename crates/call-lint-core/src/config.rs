//! TOML configuration for the forbidden-call check.
//!
//! ```toml
//! [analyzer]
//! root = "."
//! exclude = ["**/test/**"]
//!
//! [check]
//! method_name = "exit"
//! argument_count = "0-"
//! severity = "error"
//! ```
//!
//! All validation happens once, at configuration time. A bad property value
//! rejects the whole run before any traversal begins, with a message naming
//! the property and echoing the exact input value (`null` when absent).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::matcher::NameMatcher;
use crate::range_set::RangeSet;
use crate::rule::ForbidCallRule;
use crate::types::Severity;

/// Top-level call-lint configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Project root directory.
    pub root: PathBuf,
    /// Patterns to exclude from file discovery.
    pub exclude: Vec<String>,
    /// The forbidden-call check options.
    pub check: CheckConfig,
}

/// Options for the forbidden-call check.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckConfig {
    /// Whole-name regular expression for forbidden method/constructor names.
    ///
    /// Empty disables the check; absent is a configuration error.
    #[serde(default)]
    pub method_name: Option<String>,

    /// Comma-separated argument-count ranges (e.g. `"0"`, `"2-4"`, `"-3, 5-"`).
    ///
    /// Absent is a configuration error unless `method_name` is empty.
    #[serde(default)]
    pub argument_count: Option<String>,

    /// Severity for violations of this check.
    #[serde(default = "default_severity")]
    pub severity: Severity,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            method_name: None,
            argument_count: None,
            severity: default_severity(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_severity() -> Severity {
    Severity::Error
}

/// Errors when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML.
    #[error("invalid config: {message}")]
    Parse {
        /// Parse error detail.
        message: String,
    },
    /// A property value was rejected.
    #[error("cannot set property `{property}` to `{value}`: {reason}")]
    Property {
        /// The offending property name.
        property: &'static str,
        /// The exact input value; `null` when the property was absent.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ConfigError {
    fn property(
        property: &'static str,
        value: Option<&str>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Property {
            property,
            value: value.map_or_else(|| "null".to_owned(), str::to_owned),
            reason: reason.into(),
        }
    }
}

impl Config {
    /// Load from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parse from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        /// Wrapper to handle the `[analyzer]` section in the TOML.
        #[derive(Deserialize)]
        struct RawConfig {
            #[serde(default)]
            analyzer: AnalyzerSection,
            #[serde(default)]
            check: CheckConfig,
        }

        #[derive(Deserialize)]
        #[serde(default)]
        struct AnalyzerSection {
            root: PathBuf,
            exclude: Vec<String>,
        }

        impl Default for AnalyzerSection {
            fn default() -> Self {
                Self {
                    root: default_root(),
                    exclude: Vec::new(),
                }
            }
        }

        let raw: RawConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;

        Ok(Self {
            root: raw.analyzer.root,
            exclude: raw.analyzer.exclude,
            check: raw.check,
        })
    }
}

impl CheckConfig {
    /// Compiles both predicates into an immutable [`ForbidCallRule`].
    ///
    /// An empty `method_name` yields a rule that never fires, and
    /// `argument_count` is then not validated at all. Otherwise both
    /// properties are required and validated here, once.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError::Property`] naming the offending property and
    /// echoing its exact value (`null` when absent).
    pub fn compile(&self) -> Result<ForbidCallRule, ConfigError> {
        let method_name = self.method_name.as_deref().ok_or_else(|| {
            ConfigError::property("method_name", None, "a name pattern is required")
        })?;
        let matcher = NameMatcher::compile(method_name).map_err(|e| {
            ConfigError::property("method_name", Some(method_name), e.to_string())
        })?;

        if matcher.is_disabled() {
            // The check can never fire; skip range parsing entirely.
            return Ok(ForbidCallRule::new(matcher, None, self.severity));
        }

        let spec = self.argument_count.as_deref().ok_or_else(|| {
            ConfigError::property(
                "argument_count",
                None,
                "an argument count specification is required",
            )
        })?;
        let ranges = RangeSet::parse(spec)
            .map_err(|e| ConfigError::property("argument_count", Some(spec), e.to_string()))?;

        tracing::debug!(pattern = method_name, ranges = spec, "compiled forbidden-call rule");
        Ok(ForbidCallRule::new(matcher, Some(ranges), self.severity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
[check]
method_name = "exit"
argument_count = "0-"
"#;
        let config = Config::parse(toml).expect("parse failed");
        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.check.method_name.as_deref(), Some("exit"));
        assert_eq!(config.check.severity, Severity::Error);
        assert!(config.check.compile().is_ok());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[analyzer]
root = "./src"
exclude = ["**/test/**"]

[check]
method_name = "assert(True|False)"
argument_count = "-3, 5-7, 9-"
severity = "warning"
"#;
        let config = Config::parse(toml).expect("parse failed");
        assert_eq!(config.root, PathBuf::from("./src"));
        assert_eq!(config.exclude, vec!["**/test/**".to_owned()]);
        assert_eq!(config.check.severity, Severity::Warning);
        assert!(config.check.compile().is_ok());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        assert!(matches!(
            Config::parse("[check"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn absent_method_name_errors_echoing_null() {
        let err = CheckConfig::default().compile().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("`method_name`"), "{msg}");
        assert!(msg.contains("`null`"), "{msg}");
    }

    #[test]
    fn bad_regex_errors_echoing_the_pattern() {
        let config = CheckConfig {
            method_name: Some("[exit".to_owned()),
            argument_count: Some("0-".to_owned()),
            ..CheckConfig::default()
        };
        let msg = config.compile().unwrap_err().to_string();
        assert!(msg.contains("`method_name`"), "{msg}");
        assert!(msg.contains("`[exit`"), "{msg}");
    }

    #[test]
    fn absent_argument_count_errors_echoing_null() {
        let config = CheckConfig {
            method_name: Some("exit".to_owned()),
            ..CheckConfig::default()
        };
        let msg = config.compile().unwrap_err().to_string();
        assert!(msg.contains("`argument_count`"), "{msg}");
        assert!(msg.contains("`null`"), "{msg}");
    }

    #[test]
    fn whitespace_argument_count_errors_echoing_the_literal() {
        for bad in ["", "  ", " , ", " , 1-4 ", " - ", "10-1", "badArgCount"] {
            let config = CheckConfig {
                method_name: Some("exit".to_owned()),
                argument_count: Some(bad.to_owned()),
                ..CheckConfig::default()
            };
            let msg = config.compile().unwrap_err().to_string();
            assert!(msg.contains("`argument_count`"), "{msg}");
            assert!(msg.contains(&format!("`{bad}`")), "{msg}");
        }
    }

    #[test]
    fn empty_method_name_skips_argument_count_validation() {
        // argument_count would be rejected on its own; with an empty
        // pattern it must not even be looked at.
        for spec in [None, Some("garbage".to_owned()), Some(" - ".to_owned())] {
            let config = CheckConfig {
                method_name: Some(String::new()),
                argument_count: spec,
                ..CheckConfig::default()
            };
            let rule = config.compile().expect("disabled check must compile");
            assert!(rule.is_disabled());
        }
    }
}
