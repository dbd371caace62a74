//! Argument-count range specifications.
//!
//! A specification is a comma-separated list of inclusive integer ranges,
//! each optionally open on one side:
//!
//! - `"3"` - exactly 3 (a bare number is the closed range `[3,3]`)
//! - `"2-4"` - between 2 and 4
//! - `"-1"` - at most 1
//! - `"5-"` - at least 5
//! - `"-3, 5-7, 9-"` - the union of the member ranges
//!
//! Whitespace around numbers and the `-` is tolerated for parsing, but the
//! original text is preserved verbatim for display.

use thiserror::Error;

/// Errors from parsing an argument-count specification.
///
/// All of these reject the whole configuration at initialization time; there
/// is no per-node recovery.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RangeSetError {
    /// The whole input was empty or whitespace-only.
    #[error("specification is empty")]
    EmptySpec,
    /// A comma separated out an empty token.
    #[error("empty range in specification")]
    EmptyToken,
    /// A token was a bare `-` with neither bound present.
    #[error("range `{token}` has no bounds")]
    Unbounded {
        /// The offending token, trimmed.
        token: String,
    },
    /// A bound did not parse as a non-negative integer.
    #[error("invalid number `{text}`")]
    InvalidBound {
        /// The text that failed to parse.
        text: String,
    },
    /// Lower bound exceeded upper bound.
    #[error("range `{token}` has lower bound greater than upper bound")]
    Reversed {
        /// The offending token, trimmed.
        token: String,
    },
}

/// One inclusive range with optional bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Range {
    lower: Option<usize>,
    upper: Option<usize>,
}

impl Range {
    fn contains(self, count: usize) -> bool {
        self.lower.map_or(true, |lo| count >= lo) && self.upper.map_or(true, |hi| count <= hi)
    }
}

/// A parsed argument-count specification.
///
/// Parsed once at configuration time and immutable afterwards; evaluation is
/// a pure function of the spec and the count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSet {
    text: String,
    ranges: Vec<Range>,
}

impl RangeSet {
    /// Parses a comma-separated range specification.
    ///
    /// # Errors
    ///
    /// Returns an error when the input is empty, a token is empty or has no
    /// bounds, a bound is not a non-negative integer, or a range is reversed.
    pub fn parse(text: &str) -> Result<Self, RangeSetError> {
        if text.trim().is_empty() {
            return Err(RangeSetError::EmptySpec);
        }
        let ranges = text
            .split(',')
            .map(Self::parse_token)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            text: text.to_owned(),
            ranges,
        })
    }

    fn parse_token(token: &str) -> Result<Range, RangeSetError> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(RangeSetError::EmptyToken);
        }
        let Some((left, right)) = trimmed.split_once('-') else {
            let value = Self::parse_bound(trimmed)?;
            return Ok(Range {
                lower: Some(value),
                upper: Some(value),
            });
        };

        let lower = Self::parse_optional_bound(left)?;
        let upper = Self::parse_optional_bound(right)?;
        match (lower, upper) {
            (None, None) => Err(RangeSetError::Unbounded {
                token: trimmed.to_owned(),
            }),
            (Some(lo), Some(hi)) if lo > hi => Err(RangeSetError::Reversed {
                token: trimmed.to_owned(),
            }),
            _ => Ok(Range { lower, upper }),
        }
    }

    fn parse_optional_bound(text: &str) -> Result<Option<usize>, RangeSetError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        Self::parse_bound(trimmed).map(Some)
    }

    fn parse_bound(text: &str) -> Result<usize, RangeSetError> {
        text.parse::<usize>()
            .map_err(|_| RangeSetError::InvalidBound {
                text: text.to_owned(),
            })
    }

    /// Returns true iff `count` falls within at least one range.
    ///
    /// Bounds are inclusive; an absent lower bound admits any count from 0,
    /// an absent upper bound is unbounded above.
    #[must_use]
    pub fn contains(&self, count: usize) -> bool {
        self.ranges.iter().any(|r| r.contains(count))
    }

    /// The original specification text, verbatim.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for RangeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
