//! The forbidden-call rule.
//!
//! A [`ForbidCallRule`] owns the two compiled predicates and evaluates one
//! extracted [`CallSite`] at a time. Evaluation short-circuits on the name:
//! when the name does not match, the argument-count ranges are never
//! consulted. A single site produces at most one violation.

use std::path::Path;

use crate::matcher::NameMatcher;
use crate::range_set::RangeSet;
use crate::types::{Location, Severity, Violation};

/// The closed set of node kinds the rule recognizes.
///
/// Anything else reaching extraction is a programming error, reported by the
/// language crates as an unsupported-kind fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallSiteKind {
    /// Plain identifier call: `exit(1)`.
    MethodCall,
    /// Qualified/object call: `System.exit(1)`.
    ObjectMethodCall,
    /// Constructor delegation to the superclass: `super(1)`.
    SuperCall,
    /// Constructor delegation within the class: `this(1)`.
    ThisCall,
    /// Method declaration; the count is the formal-parameter count.
    MethodDef,
    /// Constructor declaration; the name is the enclosing type's name.
    CtorDef,
}

impl CallSiteKind {
    /// Returns true for declaration kinds, where the count is a parameter
    /// count rather than an argument count.
    #[must_use]
    pub fn is_declaration(self) -> bool {
        matches!(self, Self::MethodDef | Self::CtorDef)
    }
}

impl std::fmt::Display for CallSiteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::MethodCall => "method call",
            Self::ObjectMethodCall => "object method call",
            Self::SuperCall => "super call",
            Self::ThisCall => "this call",
            Self::MethodDef => "method declaration",
            Self::CtorDef => "constructor declaration",
        };
        f.write_str(s)
    }
}

/// A call or declaration extracted from a single syntax-tree node.
///
/// Ephemeral: produced and consumed within one visit, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Which of the six recognized kinds this site is.
    pub kind: CallSiteKind,
    /// The callee or declared name.
    pub name: String,
    /// Argument count for calls, formal-parameter count for declarations.
    pub argument_count: usize,
    /// Line of the name token (1-indexed).
    pub line: usize,
    /// Column of the name token (1-indexed).
    pub column: usize,
    /// Byte offset of the name token.
    pub offset: usize,
    /// Byte length of the name token.
    pub length: usize,
}

/// The compiled forbidden-call rule.
///
/// Built once from a [`crate::CheckConfig`]; immutable afterwards, so a
/// single instance can be shared across threads and files.
#[derive(Debug, Clone)]
pub struct ForbidCallRule {
    matcher: NameMatcher,
    // None only when the matcher is disabled; the spec was never parsed.
    argument_counts: Option<RangeSet>,
    severity: Severity,
}

impl ForbidCallRule {
    /// Rule code used in violations.
    pub const CODE: &'static str = "CALL001";
    /// Rule name used in violations.
    pub const NAME: &'static str = "forbidden-call";

    pub(crate) fn new(
        matcher: NameMatcher,
        argument_counts: Option<RangeSet>,
        severity: Severity,
    ) -> Self {
        Self {
            matcher,
            argument_counts,
            severity,
        }
    }

    /// Returns true iff the configured pattern is empty and the rule can
    /// never fire.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.matcher.is_disabled()
    }

    /// Evaluates one call site, returning at most one violation.
    ///
    /// The name predicate is evaluated first; when it does not match, the
    /// range set is not consulted.
    #[must_use]
    pub fn check(&self, site: &CallSite, file: &Path) -> Option<Violation> {
        if !self.matcher.matches(&site.name) {
            return None;
        }
        let ranges = self.argument_counts.as_ref()?;
        if !ranges.contains(site.argument_count) {
            return None;
        }
        Some(Violation::forbidden_call(
            Self::CODE,
            Self::NAME,
            self.severity,
            Location::new(file.to_path_buf(), site.line, site.column)
                .with_span(site.offset, site.length),
            &site.name,
            self.matcher.as_str(),
            site.argument_count,
            ranges.as_str(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckConfig;

    fn rule(pattern: &str, spec: &str) -> ForbidCallRule {
        CheckConfig {
            method_name: Some(pattern.to_owned()),
            argument_count: Some(spec.to_owned()),
            ..CheckConfig::default()
        }
        .compile()
        .expect("config should compile")
    }

    fn site(name: &str, argument_count: usize) -> CallSite {
        CallSite {
            kind: CallSiteKind::MethodCall,
            name: name.to_owned(),
            argument_count,
            line: 22,
            column: 20,
            offset: 120,
            length: name.len(),
        }
    }

    #[test]
    fn matching_name_and_count_yields_one_violation() {
        let r = rule("exit", "0-");
        let v = r
            .check(&site("exit", 1), Path::new("Main.java"))
            .expect("should flag");
        assert_eq!(v.method_name, "exit");
        assert_eq!(v.name_pattern, "exit");
        assert_eq!(v.argument_count, 1);
        assert_eq!(v.argument_count_spec, "0-");
        assert_eq!(v.location.line, 22);
        assert_eq!(v.location.column, 20);
        assert_eq!(v.code, ForbidCallRule::CODE);
    }

    #[test]
    fn non_matching_name_short_circuits() {
        let r = rule("exit", "0-");
        assert!(r.check(&site("exit2", 1), Path::new("Main.java")).is_none());
    }

    #[test]
    fn count_outside_ranges_is_not_flagged() {
        let r = rule("assert(True|False)", "0-1");
        assert!(r
            .check(&site("assertTrue", 2), Path::new("Main.java"))
            .is_none());
        assert!(r
            .check(&site("assertTrue", 1), Path::new("Main.java"))
            .is_some());
    }

    #[test]
    fn disabled_rule_never_fires() {
        let r = CheckConfig {
            method_name: Some(String::new()),
            argument_count: None,
            ..CheckConfig::default()
        }
        .compile()
        .expect("empty pattern is a valid configuration");
        assert!(r.is_disabled());
        assert!(r.check(&site("exit", 1), Path::new("Main.java")).is_none());
    }

    #[test]
    fn violation_severity_follows_config() {
        let r = CheckConfig {
            method_name: Some("exit".to_owned()),
            argument_count: Some("0-".to_owned()),
            severity: Severity::Warning,
        }
        .compile()
        .expect("config should compile");
        let v = r
            .check(&site("exit", 0), Path::new("Main.java"))
            .expect("should flag");
        assert_eq!(v.severity, Severity::Warning);
    }

    #[test]
    fn declaration_kinds_are_recognized() {
        assert!(CallSiteKind::MethodDef.is_declaration());
        assert!(CallSiteKind::CtorDef.is_declaration());
        assert!(!CallSiteKind::SuperCall.is_declaration());
    }
}
