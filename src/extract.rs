//! The extraction engine: properties, methods, entity assembly, and the
//! batch driver with its last-wins dedup policy.

use std::collections::HashMap;
use std::path::{Path, MAIN_SEPARATOR};

use crate::checker::{Checker, DeclKind, Signature, SourceFile, SymbolId, TypeId};
use crate::jsdoc::{self, JsDoc};
use crate::model::{
    DefaultValue, EntityDoc, LiteralValue, MethodDoc, MethodReturn, ParamDoc, ParentRef, PropDoc,
    PropMap, TypeRef,
};
use crate::names;

/// Caller-supplied display-name override, consulted before all heuristics.
/// Returning `None` or an empty string falls through to the built-in rules.
pub type NameResolver = Box<dyn Fn(SymbolId, &SourceFile) -> Option<String>>;

/// Extraction behavior switches.
#[derive(Default)]
pub struct ExtractOptions {
    /// Collapse unions made entirely of string literals into an enumerated
    /// value set instead of the plain display string.
    pub extract_literal_values_from_enum: bool,
    /// Display-name override hook.
    pub name_resolver: Option<NameResolver>,
}

/// Extracts documentation records from a checked program.
///
/// Holds only borrowed access to the checker plus run configuration; a run is
/// a pure function of the checker's answers, so repeated runs over the same
/// program produce identical output.
pub struct Extractor<'a> {
    checker: &'a dyn Checker,
    opts: ExtractOptions,
    /// Base name of the working directory, used to trim parent file paths.
    base_dir_name: Option<String>,
}

impl<'a> Extractor<'a> {
    pub fn new(checker: &'a dyn Checker) -> Self {
        Self::with_options(checker, ExtractOptions::default())
    }

    pub fn with_options(checker: &'a dyn Checker, opts: ExtractOptions) -> Self {
        let base_dir_name = std::env::current_dir()
            .ok()
            .and_then(|dir| dir.file_name().map(|n| n.to_string_lossy().into_owned()));
        Extractor {
            checker,
            opts,
            base_dir_name,
        }
    }

    /// Trim parent file paths against this directory instead of the process
    /// working directory.
    pub fn with_working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.base_dir_name = dir
            .as_ref()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        self
    }

    /// Run extraction over a batch of input modules.
    ///
    /// Modules that do not resolve to a checked module are skipped. Within
    /// each module's batch, records sharing a display name keep only the last
    /// occurrence, at its original position.
    pub fn extract<S: AsRef<str>>(&self, modules: &[S]) -> Vec<EntityDoc> {
        let mut docs = Vec::new();

        for module in modules {
            let module = module.as_ref();
            let Some(exports) = self.checker.exports_of_module(module) else {
                continue;
            };
            let Some(source) = self.checker.source_file(module) else {
                continue;
            };

            let raw: Vec<EntityDoc> = exports
                .into_iter()
                .filter_map(|exp| self.document_entity(exp, source))
                .collect();

            // Two passes: record the last index per name, then keep only
            // those occurrences.
            let mut last_index: HashMap<String, usize> = HashMap::new();
            for (i, doc) in raw.iter().enumerate() {
                last_index.insert(doc.display_name.clone(), i);
            }
            for (i, doc) in raw.into_iter().enumerate() {
                if last_index[&doc.display_name] == i {
                    docs.push(doc);
                }
            }
        }

        docs
    }

    /// Build the documentation record for one export, or `None` when the
    /// admission rule rejects it.
    pub fn document_entity(&self, exp: SymbolId, source: &SourceFile) -> Option<EntityDoc> {
        // A declaration list that exists but is empty leaves nothing to
        // document.
        if self.checker.declaration_count(exp) == Some(0) {
            return None;
        }

        let ty = self.checker.type_of_symbol(exp);

        let display_name = self
            .opts
            .name_resolver
            .as_ref()
            .and_then(|resolve| resolve(exp, source))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| names::compute_display_name(self.checker, exp, source));

        let description = self.find_doc_comment(exp).full_comment;
        let methods = self.methods_info(ty);

        if let Some(members) = self.checker.symbol_members(exp) {
            let props = self.props_info(&members, &HashMap::new());
            return Some(EntityDoc {
                display_name,
                description,
                props,
                methods,
            });
        }

        // No properties object: still worth documenting when both a comment
        // and a usable name exist.
        if !description.is_empty() && !display_name.is_empty() {
            return Some(EntityDoc {
                display_name,
                description,
                props: PropMap::new(),
                methods,
            });
        }

        None
    }

    /// Map properties-object members to property records.
    ///
    /// `defaults` are caller-supplied default values keyed by property name;
    /// they take precedence over `@default` doc tags and clear the required
    /// flag, which a doc tag alone does not.
    pub fn props_info(
        &self,
        members: &[(String, SymbolId)],
        defaults: &HashMap<String, String>,
    ) -> PropMap {
        let mut props = PropMap::new();

        for (prop_name, prop_sym) in members {
            // Type of the prop in the context of its own declaration.
            let prop_ty = self.checker.type_of_symbol(*prop_sym);
            let is_optional = self.checker.is_optional(*prop_sym);
            let doc = self.find_doc_comment(*prop_sym);

            let code_default = defaults.get(prop_name);
            let default_value = code_default
                .map(|value| DefaultValue {
                    value: value.clone(),
                })
                .or_else(|| {
                    doc.tags.get("default").map(|value| DefaultValue {
                        value: value.clone(),
                    })
                });

            props.insert(
                prop_name.clone(),
                PropDoc {
                    name: prop_name.clone(),
                    required: !is_optional && code_default.is_none(),
                    ty: self.type_ref(prop_ty),
                    description: doc.full_comment,
                    default_value,
                    parent: self.parent_ref(*prop_sym),
                },
            );
        }

        props
    }

    /// Map public-tagged callable members of a type to method records.
    pub fn methods_info(&self, ty: TypeId) -> Vec<MethodDoc> {
        let mut methods = Vec::new();

        for member in self.member_symbols(ty) {
            if !self.is_tagged_public(member) {
                continue;
            }
            // Instance member maps also carry non-callable members; those
            // have no signature and are dropped here.
            let Some(signature) = self.call_signature(member) else {
                continue;
            };

            let name = self.checker.symbol_name(member).to_string();
            let docblock = self.full_doc_comment(member).full_comment;
            let params = self.param_info(&signature);
            let description = self.checker.doc_comment(member).unwrap_or_default();
            let return_type = self.checker.type_to_string(signature.return_type);
            let returns = self.return_description(member).map(|text| MethodReturn {
                description: Some(text),
                ty: return_type,
            });

            methods.push(MethodDoc {
                name,
                docblock,
                modifiers: self.modifiers(member),
                params,
                returns,
                description,
            });
        }

        methods
    }

    /// Candidate method members: type properties that are callable first, so
    /// static members missing from the instance member map are captured, then
    /// the members on the type's own symbol.
    fn member_symbols(&self, ty: TypeId) -> Vec<SymbolId> {
        let mut symbols: Vec<SymbolId> = self
            .checker
            .properties_of_type(ty)
            .into_iter()
            .filter(|&property| self.call_signature(property).is_some())
            .collect();
        symbols.extend(self.checker.type_members(ty));
        symbols
    }

    fn call_signature(&self, sym: SymbolId) -> Option<Signature> {
        let ty = self.checker.type_of_symbol(sym);
        self.checker.call_signatures(ty).into_iter().next()
    }

    fn is_tagged_public(&self, sym: SymbolId) -> bool {
        self.checker
            .doc_tags(sym)
            .iter()
            .any(|tag| tag.name == "public")
    }

    /// Text of the `@returns` tag, when present and non-empty.
    fn return_description(&self, sym: SymbolId) -> Option<String> {
        self.checker
            .doc_tags(sym)
            .into_iter()
            .find(|tag| tag.name == "returns")
            .and_then(|tag| tag.text)
            .filter(|text| !text.is_empty())
    }

    fn modifiers(&self, sym: SymbolId) -> Vec<String> {
        if self.checker.is_static(sym) {
            vec!["static".to_string()]
        } else {
            Vec::new()
        }
    }

    fn param_info(&self, signature: &Signature) -> Vec<ParamDoc> {
        signature
            .params
            .iter()
            .map(|&param| {
                let param_ty = self.checker.type_of_symbol(param);
                let suffix = if self.checker.is_optional(param) { "?" } else { "" };
                let description = self
                    .checker
                    .doc_comment(param)
                    .filter(|text| !text.is_empty());

                ParamDoc {
                    name: format!("{}{}", self.checker.symbol_name(param), suffix),
                    description,
                    ty: TypeRef::named(self.checker.type_to_string(param_ty)),
                }
            })
            .collect()
    }

    /// Display form of a type, collapsing all-string-literal unions into an
    /// enumerated value set when the option is enabled. Non-literal members
    /// of a mixed union disqualify the whole union; no validation beyond
    /// that.
    pub fn type_ref(&self, ty: TypeId) -> TypeRef {
        let display = self.checker.type_to_string(ty);

        if self.opts.extract_literal_values_from_enum {
            if let Some(members) = self.checker.union_members(ty) {
                let literals: Option<Vec<LiteralValue>> = members
                    .iter()
                    .map(|&member| {
                        self.checker
                            .string_literal_value(member)
                            .map(|text| LiteralValue {
                                value: format!("\"{}\"", text),
                            })
                    })
                    .collect();
                if let Some(values) = literals {
                    return TypeRef {
                        name: "enum".to_string(),
                        raw: Some(display),
                        value: Some(values),
                    };
                }
            }
        }

        TypeRef::named(display)
    }

    /// Resolve a symbol's documentation, falling back to its root symbols
    /// when the symbol itself carries no comment. This finds comments
    /// attached to an aliased or merged declaration rather than the use
    /// site.
    pub fn find_doc_comment(&self, sym: SymbolId) -> JsDoc {
        let own = self.full_doc_comment(sym);
        if !own.is_empty() {
            return own;
        }

        self.checker
            .root_symbols(sym)
            .into_iter()
            .filter(|&root| root != sym)
            .map(|root| self.full_doc_comment(root))
            .find(|doc| !doc.is_empty())
            .unwrap_or_default()
    }

    /// The symbol's own merged comment; empty when the symbol exposes no
    /// documentation-comment capability.
    fn full_doc_comment(&self, sym: SymbolId) -> JsDoc {
        let Some(comment) = self.checker.doc_comment(sym) else {
            return JsDoc::default();
        };
        jsdoc::merge(&comment, &self.checker.doc_tags(sym))
    }

    /// Originating declaration of a property member. Only interface and
    /// type-alias enclosing declarations qualify.
    fn parent_ref(&self, sym: SymbolId) -> Option<ParentRef> {
        let parent = self.checker.declaration_parent(sym)?;
        match parent.kind {
            DeclKind::Interface | DeclKind::TypeAlias => Some(ParentRef {
                name: parent.name,
                file_name: self.trim_file_name(&parent.file_name),
            }),
            _ => None,
        }
    }

    /// Trim a path to start at the nearest ancestor directory matching the
    /// working directory's base name, falling back to the path unchanged.
    fn trim_file_name(&self, file_name: &str) -> String {
        let Some(base) = self.base_dir_name.as_deref() else {
            return file_name.to_string();
        };

        let parts: Vec<&str> = file_name.split(MAIN_SEPARATOR).collect();
        match parts.iter().position(|part| *part == base) {
            Some(index) => parts[index..].join(&MAIN_SEPARATOR.to_string()),
            None => file_name.to_string(),
        }
    }
}
