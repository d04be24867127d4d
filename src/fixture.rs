//! Self-contained snapshots of a checked program.
//!
//! A [`FixtureProgram`] is a JSON-serializable answer sheet for every
//! [`Checker`] question the engine asks: symbols, types, module exports, and
//! the syntax facts name resolution needs. It is the substitutable stand-in
//! for a real compiler front end — tests build them inline, the CLI loads
//! them from disk. Loading is the one fatal failure point of a run; broken
//! references inside a loaded snapshot degrade to empty answers instead.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::checker::{
    Checker, ClassMember, DeclKind, DocTag, Expr, ParentDecl, Signature, SourceFile, Statement,
    SymbolId, TypeId,
};

/// Snapshot loading failures. Everything past loading is infallible.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// A deserialized checked-program snapshot implementing [`Checker`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureProgram {
    #[serde(default)]
    modules: BTreeMap<String, FixtureModule>,
    #[serde(default)]
    symbols: Vec<FixtureSymbol>,
    #[serde(default)]
    types: Vec<FixtureType>,
    /// Built after deserialization so `source_file` can hand out references.
    #[serde(skip)]
    files: BTreeMap<String, SourceFile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureModule {
    #[serde(default)]
    exports: Vec<u32>,
    /// Source path; defaults to the module key.
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    statements: Vec<FixtureStatement>,
}

/// A top-level `object.member = value` statement.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureStatement {
    object: String,
    member: String,
    /// Assigned string literal; anything else collapses to `Expr::Other`.
    #[serde(default)]
    string_value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureSymbol {
    name: String,
    #[serde(rename = "type")]
    ty: u32,
    /// Merged comment text. Absent means an empty comment; an explicit
    /// `null` models a symbol with no documentation-comment capability.
    #[serde(default = "empty_doc")]
    doc: Option<String>,
    #[serde(default)]
    tags: Vec<FixtureTag>,
    /// Member map of a properties-bearing symbol, in declaration order.
    #[serde(default)]
    members: Option<Vec<FixtureMember>>,
    #[serde(default)]
    optional: bool,
    #[serde(default, rename = "static")]
    is_static: bool,
    /// Declarations behind the symbol; absent means the symbol exposes no
    /// declaration list at all.
    #[serde(default)]
    declarations: Option<Vec<FixtureDecl>>,
    #[serde(default)]
    roots: Vec<u32>,
}

fn empty_doc() -> Option<String> {
    Some(String::new())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureTag {
    name: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureMember {
    name: String,
    symbol: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureDecl {
    #[serde(default)]
    kind: DeclKind,
    #[serde(default)]
    parent_name: Option<String>,
    #[serde(default)]
    parent_kind: DeclKind,
    #[serde(default)]
    parent_file: Option<String>,
    #[serde(default)]
    class_members: Vec<FixtureClassMember>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureClassMember {
    name: String,
    #[serde(default)]
    string_value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureType {
    #[serde(default)]
    display: String,
    #[serde(default)]
    union: Option<Vec<u32>>,
    #[serde(default)]
    string_literal: Option<String>,
    #[serde(default)]
    properties: Vec<u32>,
    /// Members on the type's own symbol (instance members).
    #[serde(default)]
    members: Vec<u32>,
    #[serde(default)]
    call_signatures: Vec<FixtureSignature>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureSignature {
    #[serde(default)]
    params: Vec<u32>,
    returns: u32,
}

impl FixtureProgram {
    /// Parse a snapshot from JSON text.
    pub fn from_str(json: &str) -> Result<Self, FixtureError> {
        let mut program: FixtureProgram = serde_json::from_str(json)?;
        program.build_source_files();
        Ok(program)
    }

    /// Load a snapshot from disk.
    pub fn from_path(path: &Path) -> Result<Self, FixtureError> {
        let json = fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&json)
    }

    /// Module names in the snapshot, in stable order.
    pub fn module_names(&self) -> Vec<String> {
        self.modules.keys().cloned().collect()
    }

    fn build_source_files(&mut self) {
        self.files = self
            .modules
            .iter()
            .map(|(name, module)| {
                let path = module.path.clone().unwrap_or_else(|| name.clone());
                let statements = module
                    .statements
                    .iter()
                    .map(|stmt| Statement::MemberAssignment {
                        object: stmt.object.clone(),
                        member: stmt.member.clone(),
                        value: match &stmt.string_value {
                            Some(text) => Expr::StringLiteral(text.clone()),
                            None => Expr::Other,
                        },
                    })
                    .collect();
                (
                    name.clone(),
                    SourceFile {
                        path: PathBuf::from(path),
                        statements,
                    },
                )
            })
            .collect();
    }

    fn symbol(&self, sym: SymbolId) -> Option<&FixtureSymbol> {
        self.symbols.get(sym.0 as usize)
    }

    fn ty(&self, ty: TypeId) -> Option<&FixtureType> {
        self.types.get(ty.0 as usize)
    }
}

impl Checker for FixtureProgram {
    fn exports_of_module(&self, module: &str) -> Option<Vec<SymbolId>> {
        self.modules
            .get(module)
            .map(|m| m.exports.iter().copied().map(SymbolId).collect())
    }

    fn source_file(&self, module: &str) -> Option<&SourceFile> {
        self.files.get(module)
    }

    fn symbol_name(&self, sym: SymbolId) -> &str {
        self.symbol(sym).map(|s| s.name.as_str()).unwrap_or("")
    }

    fn declaration_count(&self, sym: SymbolId) -> Option<usize> {
        self.symbol(sym)?.declarations.as_ref().map(Vec::len)
    }

    fn declaration_kind(&self, sym: SymbolId) -> DeclKind {
        self.symbol(sym)
            .and_then(|s| s.declarations.as_ref())
            .and_then(|decls| decls.first())
            .map(|decl| decl.kind)
            .unwrap_or_default()
    }

    fn declaration_parent(&self, sym: SymbolId) -> Option<ParentDecl> {
        let decl = self.symbol(sym)?.declarations.as_ref()?.first()?;
        Some(ParentDecl {
            kind: decl.parent_kind,
            name: decl.parent_name.clone()?,
            file_name: decl.parent_file.clone()?,
        })
    }

    fn class_members(&self, sym: SymbolId) -> Vec<ClassMember> {
        self.symbol(sym)
            .and_then(|s| s.declarations.as_ref())
            .and_then(|decls| decls.first())
            .map(|decl| {
                decl.class_members
                    .iter()
                    .map(|member| ClassMember {
                        name: member.name.clone(),
                        initializer: member
                            .string_value
                            .clone()
                            .map(Expr::StringLiteral),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn type_of_symbol(&self, sym: SymbolId) -> TypeId {
        self.symbol(sym).map(|s| TypeId(s.ty)).unwrap_or(TypeId(u32::MAX))
    }

    fn type_to_string(&self, ty: TypeId) -> String {
        self.ty(ty).map(|t| t.display.clone()).unwrap_or_default()
    }

    fn union_members(&self, ty: TypeId) -> Option<Vec<TypeId>> {
        self.ty(ty)?
            .union
            .as_ref()
            .map(|members| members.iter().copied().map(TypeId).collect())
    }

    fn string_literal_value(&self, ty: TypeId) -> Option<String> {
        self.ty(ty)?.string_literal.clone()
    }

    fn properties_of_type(&self, ty: TypeId) -> Vec<SymbolId> {
        self.ty(ty)
            .map(|t| t.properties.iter().copied().map(SymbolId).collect())
            .unwrap_or_default()
    }

    fn type_members(&self, ty: TypeId) -> Vec<SymbolId> {
        self.ty(ty)
            .map(|t| t.members.iter().copied().map(SymbolId).collect())
            .unwrap_or_default()
    }

    fn call_signatures(&self, ty: TypeId) -> Vec<Signature> {
        self.ty(ty)
            .map(|t| {
                t.call_signatures
                    .iter()
                    .map(|sig| Signature {
                        params: sig.params.iter().copied().map(SymbolId).collect(),
                        return_type: TypeId(sig.returns),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn symbol_members(&self, sym: SymbolId) -> Option<Vec<(String, SymbolId)>> {
        self.symbol(sym)?.members.as_ref().map(|members| {
            members
                .iter()
                .map(|member| (member.name.clone(), SymbolId(member.symbol)))
                .collect()
        })
    }

    fn doc_comment(&self, sym: SymbolId) -> Option<String> {
        self.symbol(sym)?.doc.clone()
    }

    fn doc_tags(&self, sym: SymbolId) -> Vec<DocTag> {
        self.symbol(sym)
            .map(|s| {
                s.tags
                    .iter()
                    .map(|tag| DocTag {
                        name: tag.name.clone(),
                        text: tag.text.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn root_symbols(&self, sym: SymbolId) -> Vec<SymbolId> {
        self.symbol(sym)
            .map(|s| s.roots.iter().copied().map(SymbolId).collect())
            .unwrap_or_default()
    }

    fn is_optional(&self, sym: SymbolId) -> bool {
        self.symbol(sym).map(|s| s.optional).unwrap_or(false)
    }

    fn is_static(&self, sym: SymbolId) -> bool {
        self.symbol(sym).map(|s| s.is_static).unwrap_or(false)
    }
}
