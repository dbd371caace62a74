//! Method-name pattern matching.

use regex::Regex;

/// A compiled method/constructor-name pattern.
///
/// The pattern is an anchored regular expression: it must match the whole
/// identifier, not a substring. An empty pattern is legal and matches no
/// name at all, which turns the check into a no-op.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    text: String,
    pattern: Option<Regex>,
}

impl NameMatcher {
    /// Compiles a name pattern.
    ///
    /// Empty text yields a matcher that matches nothing; this is a valid
    /// configuration, not an error.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error for malformed pattern syntax.
    pub fn compile(text: &str) -> Result<Self, regex::Error> {
        let pattern = if text.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(r"\A(?:{text})\z"))?)
        };
        Ok(Self {
            text: text.to_owned(),
            pattern,
        })
    }

    /// Returns true iff `name` matches the whole pattern.
    ///
    /// Always false for the empty pattern.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(name))
    }

    /// Returns true iff the pattern is empty and the check is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.pattern.is_none()
    }

    /// The original pattern text, verbatim.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}
