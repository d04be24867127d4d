//! Interfaces onto the external type checker and syntax trees.
//!
//! The extraction engine never parses source text or resolves types itself;
//! it consumes a [`Checker`] owned by a compiler front end (or a test double,
//! see `fixture`). Handles are opaque ids so implementations can back them
//! with whatever storage they like.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Handle to a symbol inside a checked program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

/// Handle to a resolved type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub u32);

/// Kind of a symbol's value declaration, resolved once at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Function,
    Class,
    Interface,
    TypeAlias,
    #[default]
    Other,
}

/// A documentation tag attached to a symbol, e.g. `@default undefined`.
#[derive(Debug, Clone, PartialEq)]
pub struct DocTag {
    pub name: String,
    pub text: Option<String>,
}

/// One call signature of a callable type.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub params: Vec<SymbolId>,
    pub return_type: TypeId,
}

/// Enclosing declaration of a property member's first declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentDecl {
    pub kind: DeclKind,
    pub name: String,
    /// Absolute path of the file the declaration lives in.
    pub file_name: String,
}

/// A property declared in a class body, with its initializer when present.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMember {
    pub name: String,
    pub initializer: Option<Expr>,
}

/// The slice of expression shapes name resolution cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    StringLiteral(String),
    Other,
}

/// A module-level statement, reduced to the assignment pattern name
/// resolution scans for. Everything else collapses to `Other`.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `object.member = value` at module top level.
    MemberAssignment {
        object: String,
        member: String,
        value: Expr,
    },
    Other,
}

/// Syntax-level view of one input module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub statements: Vec<Statement>,
}

/// Narrow view of a type-checked program.
///
/// Mirrors the capabilities the engine needs and nothing more, so a front end
/// backed by a real compiler and a deserialized test snapshot are
/// interchangeable. Implementations are not required to be thread-safe;
/// callers parallelizing across modules must give each run its own checker
/// or serialize access.
pub trait Checker {
    /// Exported symbols of a module in checker-reported order, or `None`
    /// when the path does not resolve to a checked module.
    fn exports_of_module(&self, module: &str) -> Option<Vec<SymbolId>>;

    /// Syntax tree of a checked module.
    fn source_file(&self, module: &str) -> Option<&SourceFile>;

    fn symbol_name(&self, sym: SymbolId) -> &str;

    /// Number of declarations behind the symbol; `None` when the symbol has
    /// no declaration list at all (as opposed to an empty one).
    fn declaration_count(&self, sym: SymbolId) -> Option<usize>;

    /// Kind of the symbol's value declaration.
    fn declaration_kind(&self, sym: SymbolId) -> DeclKind;

    /// Enclosing declaration of the symbol's first declaration, if any.
    fn declaration_parent(&self, sym: SymbolId) -> Option<ParentDecl>;

    /// Properties declared in the symbol's class body. Empty for non-class
    /// declarations.
    fn class_members(&self, sym: SymbolId) -> Vec<ClassMember>;

    /// Declared or inferred type of the symbol at its own declaration.
    fn type_of_symbol(&self, sym: SymbolId) -> TypeId;

    /// Canonical display string of a type.
    fn type_to_string(&self, ty: TypeId) -> String;

    /// Union members in declared order, or `None` for non-union types.
    fn union_members(&self, ty: TypeId) -> Option<Vec<TypeId>>;

    /// The literal text when the type is a string-literal type.
    fn string_literal_value(&self, ty: TypeId) -> Option<String>;

    /// All properties of a type, including inherited and static ones.
    fn properties_of_type(&self, ty: TypeId) -> Vec<SymbolId>;

    /// Members recorded on the type's own symbol (instance members).
    fn type_members(&self, ty: TypeId) -> Vec<SymbolId>;

    /// Call signatures of a type, in declaration order.
    fn call_signatures(&self, ty: TypeId) -> Vec<Signature>;

    /// The symbol's member map when it behaves like a properties-bearing
    /// object or interface, in declaration order. `None` otherwise.
    fn symbol_members(&self, sym: SymbolId) -> Option<Vec<(String, SymbolId)>>;

    /// Merged documentation comment text. `None` means the symbol exposes no
    /// documentation-comment capability at all; `Some("")` means an empty
    /// comment.
    fn doc_comment(&self, sym: SymbolId) -> Option<String>;

    fn doc_tags(&self, sym: SymbolId) -> Vec<DocTag>;

    /// Underlying or aliased symbols reachable from this one, used as a
    /// comment-resolution fallback. May include the symbol itself.
    fn root_symbols(&self, sym: SymbolId) -> Vec<SymbolId>;

    /// Whether the symbol is declared optional (`?` on a member or
    /// parameter).
    fn is_optional(&self, sym: SymbolId) -> bool;

    /// Whether the combined declaration modifier flags include `static`.
    fn is_static(&self, sym: SymbolId) -> bool;
}
