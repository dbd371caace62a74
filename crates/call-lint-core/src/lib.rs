//! # call-lint-core
//!
//! Core rule engine for flagging forbidden method calls and declarations.
//!
//! The engine decides, for a single call-like syntax-tree node, whether it is
//! forbidden according to two independently configured predicates:
//!
//! - [`NameMatcher`] - a whole-name regular expression over method and
//!   constructor identifiers
//! - [`RangeSet`] - a comma-separated set of inclusive, optionally one-sided
//!   argument-count ranges (`"0"`, `"2-4"`, `"-1"`, `"5-"`, `"-3, 5-7, 9-"`)
//!
//! Both predicates are compiled once from a [`CheckConfig`] and are immutable
//! afterwards; a [`ForbidCallRule`] evaluates one extracted [`CallSite`] into
//! at most one [`Violation`]. Extraction from an actual syntax tree lives in
//! the language crates (see `call-lint-java`).
//!
//! ## Example
//!
//! ```
//! use call_lint_core::{CallSite, CallSiteKind, CheckConfig};
//! use std::path::Path;
//!
//! let config = CheckConfig {
//!     method_name: Some("exit".into()),
//!     argument_count: Some("0-".into()),
//!     ..CheckConfig::default()
//! };
//! let rule = config.compile()?;
//!
//! let site = CallSite {
//!     kind: CallSiteKind::MethodCall,
//!     name: "exit".into(),
//!     argument_count: 1,
//!     line: 22,
//!     column: 20,
//!     offset: 0,
//!     length: 4,
//! };
//! assert!(rule.check(&site, Path::new("Main.java")).is_some());
//! # Ok::<(), call_lint_core::ConfigError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod matcher;
mod range_set;
mod rule;
mod types;

pub use config::{CheckConfig, Config, ConfigError};
pub use matcher::NameMatcher;
pub use range_set::{RangeSet, RangeSetError};
pub use rule::{CallSite, CallSiteKind, ForbidCallRule};
pub use types::{LintResult, Location, Severity, Violation, ViolationDiagnostic};
