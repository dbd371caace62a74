//! Java call-site extraction using Tree-sitter.
//!
//! The walker visits every node depth-first and extracts a [`CallSite`] from
//! each of the four grammar kinds that carry calls or declarations:
//! `method_invocation` (plain and qualified calls),
//! `explicit_constructor_invocation` (`this(...)`/`super(...)`),
//! `method_declaration`, and `constructor_declaration`. In Java a
//! constructor's declared name is the enclosing type's identifier, so the
//! `name` field already carries it.

use call_lint_core::{CallSite, CallSiteKind};
use tree_sitter::{Language, Node, Parser};

const METHOD_INVOCATION: &str = "method_invocation";
const EXPLICIT_CTOR_INVOCATION: &str = "explicit_constructor_invocation";
const METHOD_DECLARATION: &str = "method_declaration";
const CONSTRUCTOR_DECLARATION: &str = "constructor_declaration";

/// Traversal-time faults.
///
/// None of these are recoverable: extraction either succeeds for the whole
/// tree or the run is aborted.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The Java grammar could not be loaded into the parser.
    #[error("failed to load java grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    /// The parser produced no tree.
    #[error("parser produced no tree")]
    Parse,
    /// A node outside the recognized set reached single-node extraction.
    #[error("found unsupported node kind: {kind}")]
    UnsupportedNode {
        /// The unsupported grammar kind.
        kind: String,
    },
    /// A recognized node was missing a required field. Only possible for
    /// malformed parse trees.
    #[error("malformed `{kind}` node at line {line}: missing `{field}` field")]
    MissingField {
        /// Grammar kind of the node.
        kind: &'static str,
        /// The missing field name.
        field: &'static str,
        /// Line of the node (1-indexed).
        line: usize,
    },
}

/// Extracts call sites from Java source.
pub struct JavaExtractor {
    language: Language,
}

impl JavaExtractor {
    /// Creates a new Java extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_java::LANGUAGE.into(),
        }
    }

    fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
        std::str::from_utf8(&src[node.start_byte()..node.end_byte()]).unwrap_or("")
    }

    /// Parses `source` and collects every call site in the tree, in
    /// depth-first order.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded, the parser yields
    /// no tree, or a recognized node is malformed.
    pub fn analyze(&self, source: &str) -> Result<Vec<CallSite>, ExtractError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        let tree = parser.parse(source, None).ok_or(ExtractError::Parse)?;

        let src = source.as_bytes();
        let mut sites = Vec::new();
        Self::walk(tree.root_node(), src, &mut sites)?;
        Ok(sites)
    }

    fn walk(node: Node<'_>, src: &[u8], out: &mut Vec<CallSite>) -> Result<(), ExtractError> {
        if Self::is_recognized(node.kind()) {
            out.push(Self::extract(&node, src)?);
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            Self::walk(child, src, out)?;
        }
        Ok(())
    }

    fn is_recognized(kind: &str) -> bool {
        matches!(
            kind,
            METHOD_INVOCATION
                | EXPLICIT_CTOR_INVOCATION
                | METHOD_DECLARATION
                | CONSTRUCTOR_DECLARATION
        )
    }

    /// Extracts a call site from a single node.
    ///
    /// # Errors
    ///
    /// A node whose kind is outside the recognized set is a programming
    /// error and fails fast, naming the kind. The walker only dispatches
    /// the four recognized grammar kinds.
    pub fn extract(node: &Node<'_>, src: &[u8]) -> Result<CallSite, ExtractError> {
        match node.kind() {
            METHOD_INVOCATION => Self::extract_invocation(node, src),
            EXPLICIT_CTOR_INVOCATION => Self::extract_delegation(node, src),
            METHOD_DECLARATION => Self::extract_declaration(node, src, CallSiteKind::MethodDef),
            CONSTRUCTOR_DECLARATION => Self::extract_declaration(node, src, CallSiteKind::CtorDef),
            other => Err(ExtractError::UnsupportedNode {
                kind: other.to_owned(),
            }),
        }
    }

    /// `exit(1)` or `System.exit(1)`; the name is the identifier after the
    /// access operator when an object is present.
    fn extract_invocation(node: &Node<'_>, src: &[u8]) -> Result<CallSite, ExtractError> {
        let name = Self::required_field(node, "name")?;
        let arguments = Self::required_field(node, "arguments")?;
        let kind = if node.child_by_field_name("object").is_some() {
            CallSiteKind::ObjectMethodCall
        } else {
            CallSiteKind::MethodCall
        };
        Ok(Self::site(kind, &name, Self::count_named(&arguments), src))
    }

    /// `this(...)` or `super(...)` inside a constructor body. The name is
    /// the keyword itself.
    fn extract_delegation(node: &Node<'_>, src: &[u8]) -> Result<CallSite, ExtractError> {
        let constructor = Self::required_field(node, "constructor")?;
        let kind = match constructor.kind() {
            "this" => CallSiteKind::ThisCall,
            "super" => CallSiteKind::SuperCall,
            other => {
                return Err(ExtractError::UnsupportedNode {
                    kind: format!("{EXPLICIT_CTOR_INVOCATION}/{other}"),
                })
            }
        };
        let arguments = Self::required_field(node, "arguments")?;
        Ok(Self::site(
            kind,
            &constructor,
            Self::count_named(&arguments),
            src,
        ))
    }

    fn extract_declaration(
        node: &Node<'_>,
        src: &[u8],
        kind: CallSiteKind,
    ) -> Result<CallSite, ExtractError> {
        let name = Self::required_field(node, "name")?;
        let parameters = Self::required_field(node, "parameters")?;
        Ok(Self::site(kind, &name, Self::count_named(&parameters), src))
    }

    fn required_field<'t>(
        node: &Node<'t>,
        field: &'static str,
    ) -> Result<Node<'t>, ExtractError> {
        node.child_by_field_name(field)
            .ok_or_else(|| ExtractError::MissingField {
                kind: node.kind(),
                field,
                line: node.start_position().row + 1,
            })
    }

    /// Counts arguments or formal parameters. Comments are extras in the
    /// grammar and show up as named children, so they are excluded.
    fn count_named(list: &Node<'_>) -> usize {
        let mut cursor = list.walk();
        list.named_children(&mut cursor)
            .filter(|c| !matches!(c.kind(), "line_comment" | "block_comment"))
            .count()
    }

    fn site(kind: CallSiteKind, name_node: &Node<'_>, argument_count: usize, src: &[u8]) -> CallSite {
        let pos = name_node.start_position();
        CallSite {
            kind,
            name: Self::text(name_node, src).to_owned(),
            argument_count,
            line: pos.row + 1,
            column: pos.column + 1,
            offset: name_node.start_byte(),
            length: name_node.end_byte() - name_node.start_byte(),
        }
    }
}

impl Default for JavaExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sites(source: &str) -> Vec<CallSite> {
        JavaExtractor::new()
            .analyze(source)
            .expect("analyze failed")
    }

    fn of_kind(sites: &[CallSite], kind: CallSiteKind) -> Vec<CallSite> {
        sites.iter().filter(|s| s.kind == kind).cloned().collect()
    }

    #[test]
    fn plain_call_extracted() {
        let all = sites("class A { void f() { exit(7); } }");
        let calls = of_kind(&all, CallSiteKind::MethodCall);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "exit");
        assert_eq!(calls[0].argument_count, 1);
        assert_eq!(calls[0].line, 1);
        assert_eq!(calls[0].column, 22);
        assert_eq!(calls[0].offset, 21);
        assert_eq!(calls[0].length, 4);
    }

    #[test]
    fn qualified_call_uses_name_after_the_dot() {
        let all = sites("class A { void f() { System.exit(1); } }");
        let calls = of_kind(&all, CallSiteKind::ObjectMethodCall);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "exit");
        assert_eq!(calls[0].argument_count, 1);
    }

    #[test]
    fn super_qualified_call_is_an_object_call() {
        let all = sites("class A { void f() { super.render(1, 2); } }");
        let calls = of_kind(&all, CallSiteKind::ObjectMethodCall);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "render");
        assert_eq!(calls[0].argument_count, 2);
    }

    #[test]
    fn super_delegation_extracted() {
        let all = sites("class A extends B { A() { super(1, 2, 3); } }");
        let calls = of_kind(&all, CallSiteKind::SuperCall);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "super");
        assert_eq!(calls[0].argument_count, 3);
    }

    #[test]
    fn this_delegation_extracted() {
        let all = sites("class A { A() { this(0); } A(int x) {} }");
        let calls = of_kind(&all, CallSiteKind::ThisCall);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "this");
        assert_eq!(calls[0].argument_count, 1);
    }

    #[test]
    fn method_declaration_counts_formal_parameters() {
        let all = sites("class A { void render(int x, String y) { } }");
        let decls = of_kind(&all, CallSiteKind::MethodDef);
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "render");
        assert_eq!(decls[0].argument_count, 2);
    }

    #[test]
    fn constructor_declaration_uses_the_type_name() {
        let all = sites("class Widget { Widget(int a, int b) { } }");
        let decls = of_kind(&all, CallSiteKind::CtorDef);
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "Widget");
        assert_eq!(decls[0].argument_count, 2);
    }

    #[test]
    fn nested_calls_each_extracted_with_own_count() {
        let all = sites("class A { void f() { outer(inner(1, 2)); } }");
        let calls = of_kind(&all, CallSiteKind::MethodCall);
        let mut counts: Vec<(String, usize)> = calls
            .iter()
            .map(|s| (s.name.clone(), s.argument_count))
            .collect();
        counts.sort();
        assert_eq!(
            counts,
            vec![("inner".to_owned(), 2), ("outer".to_owned(), 1)]
        );
    }

    #[test]
    fn zero_argument_call() {
        let all = sites("class A { void f() { exit(); } }");
        let calls = of_kind(&all, CallSiteKind::MethodCall);
        assert_eq!(calls[0].argument_count, 0);
    }

    #[test]
    fn comments_in_argument_list_are_not_counted() {
        let all = sites("class A { void f() { exit(1, /* two */ 2); } }");
        let calls = of_kind(&all, CallSiteKind::MethodCall);
        assert_eq!(calls[0].argument_count, 2);
    }

    #[test]
    fn lines_are_one_indexed() {
        let all = sites("class A {\n    void f() {\n        exit(1);\n    }\n}\n");
        let calls = of_kind(&all, CallSiteKind::MethodCall);
        assert_eq!(calls[0].line, 3);
        assert_eq!(calls[0].column, 9);
    }

    #[test]
    fn unsupported_kind_fails_fast_naming_it() {
        let extractor = JavaExtractor::new();
        let mut parser = Parser::new();
        parser.set_language(&extractor.language).expect("grammar");
        let tree = parser.parse("class A { }", None).expect("tree");
        let err = JavaExtractor::extract(&tree.root_node(), b"class A { }").unwrap_err();
        match err {
            ExtractError::UnsupportedNode { kind } => assert_eq!(kind, "program"),
            other => panic!("expected UnsupportedNode, got {other}"),
        }
    }

    #[test]
    fn empty_source_has_no_sites() {
        assert!(sites("").is_empty());
    }

    #[test]
    fn extraction_is_order_independent_of_siblings() {
        let all = sites("class A { void f() { a(1); b(2, 3); } }");
        let calls = of_kind(&all, CallSiteKind::MethodCall);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].name, "a");
        assert_eq!(calls[0].argument_count, 1);
        assert_eq!(calls[1].name, "b");
        assert_eq!(calls[1].argument_count, 2);
    }
}
