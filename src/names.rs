//! Display-name resolution for exported entities.
//!
//! Precedence: caller-supplied override (handled in `extract`), then an
//! explicit `displayName` marker on the export, then a file-based fallback
//! for generic wrapper names, then the export's own name.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::checker::{Checker, DeclKind, Expr, SourceFile, Statement, SymbolId};

/// Export names that say nothing about the entity itself: the default-export
/// placeholder, the anonymous-function placeholder, and common
/// stateless/forwarding wrapper names.
const GENERIC_EXPORT_NAMES: &[&str] = &[
    "default",
    "__function",
    "Stateless",
    "StyledComponentClass",
    "StyledComponent",
    "FunctionComponent",
    "StatelessComponent",
];

/// Name used when the file-based fallback produces nothing usable.
const PLACEHOLDER_NAME: &str = "DefaultName";

static RE_LEADING_NON_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^A-Za-z]*").unwrap());

static RE_NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]").unwrap());

/// Resolve the public display name of an export.
pub fn compute_display_name(checker: &dyn Checker, exp: SymbolId, source: &SourceFile) -> String {
    let export_name = checker.symbol_name(exp);

    // Function-style: `Export.displayName = "..."` anywhere at module top
    // level, linked to the export by identifier.
    let stateless = display_name_assignment(source, export_name);

    // Class-style: a `displayName` property with a string-literal initializer
    // in the class body.
    let stateful = match checker.declaration_kind(exp) {
        DeclKind::Class => class_string_property(checker, exp, "displayName"),
        _ => None,
    };

    if let Some(name) = stateless.or(stateful) {
        return name;
    }

    if GENERIC_EXPORT_NAMES.contains(&export_name) {
        default_export_name(&source.path)
    } else {
        export_name.to_string()
    }
}

/// First `export_name.displayName = "literal"` statement in the module.
fn display_name_assignment(source: &SourceFile, export_name: &str) -> Option<String> {
    source.statements.iter().find_map(|stmt| match stmt {
        Statement::MemberAssignment {
            object,
            member,
            value: Expr::StringLiteral(text),
        } if object == export_name && member == "displayName" => Some(text.clone()),
        _ => None,
    })
}

/// String-literal initializer of a named property in the export's class body.
fn class_string_property(checker: &dyn Checker, exp: SymbolId, name: &str) -> Option<String> {
    checker
        .class_members(exp)
        .into_iter()
        .find(|member| member.name == name)
        .and_then(|member| match member.initializer {
            Some(Expr::StringLiteral(text)) => Some(text),
            _ => None,
        })
}

/// Name a default export after its file: the stem, or the parent directory
/// for `index` files, sanitized down to a letter-led alphanumeric identifier.
pub fn default_export_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let filename = if stem == "index" {
        path.parent()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
            .unwrap_or(stem)
    } else {
        stem
    };

    // Identifiers must start with a letter and contain only letters/digits.
    let identifier = RE_LEADING_NON_LETTER.replace(filename, "");
    let identifier = RE_NON_ALNUM.replace_all(&identifier, "");

    if identifier.is_empty() {
        PLACEHOLDER_NAME.to_string()
    } else {
        identifier.into_owned()
    }
}
