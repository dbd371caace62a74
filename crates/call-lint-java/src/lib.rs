//! # call-lint-java
//!
//! Tree-sitter based Java call-site extraction for call-lint.
//!
//! The syntax tree is supplied by `tree-sitter` with the Java grammar; this
//! crate walks it and turns the six recognized node kinds (plain calls,
//! qualified calls, `super(...)`/`this(...)` constructor delegation, method
//! and constructor declarations) into `call-lint-core` [`CallSite`]s, then
//! evaluates the compiled rule over them:
//!
//! - [`JavaExtractor`] - parses source and extracts call sites
//! - [`CallRuleEngine`] - per-file driver producing `Violation`s
//!
//! [`CallSite`]: call_lint_core::CallSite

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod engine;
pub mod extractor;

pub use engine::CallRuleEngine;
pub use extractor::{ExtractError, JavaExtractor};
