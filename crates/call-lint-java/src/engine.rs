//! Per-file rule engine.
//!
//! Owns the compiled [`ForbidCallRule`] and drives one traversal per source
//! file: parse, extract call sites, evaluate both predicates per site.

use std::path::Path;

use call_lint_core::{ForbidCallRule, Violation};

use crate::extractor::{ExtractError, JavaExtractor};

/// Evaluates the forbidden-call rule against Java source files.
pub struct CallRuleEngine {
    rule: ForbidCallRule,
    extractor: JavaExtractor,
}

impl CallRuleEngine {
    /// Creates a new engine from a compiled rule.
    #[must_use]
    pub fn new(rule: ForbidCallRule) -> Self {
        Self {
            rule,
            extractor: JavaExtractor::new(),
        }
    }

    /// Checks a single file's source, returning all violations in it.
    ///
    /// `file` is only used for violation locations; the source is not read
    /// from disk here.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] for traversal-time faults; see
    /// [`JavaExtractor::analyze`].
    pub fn check_source(&self, file: &Path, source: &str) -> Result<Vec<Violation>, ExtractError> {
        if self.rule.is_disabled() {
            // Empty name pattern: nothing can ever match.
            return Ok(Vec::new());
        }
        let sites = self.extractor.analyze(source)?;
        Ok(sites
            .iter()
            .filter_map(|site| self.rule.check(site, file))
            .collect())
    }
}
