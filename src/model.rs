//! Output data model — format-agnostic documentation records.
//!
//! One [`EntityDoc`] per admitted export. The shape mirrors what downstream
//! documentation tooling consumes, so field names serialize in camelCase.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Documentation record for one exported entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDoc {
    /// Public display name (see the name-resolution precedence in `names`).
    pub display_name: String,
    /// Full merged documentation comment of the export itself.
    pub description: String,
    /// Properties keyed by member name.
    pub props: PropMap,
    /// Public-tagged callable members.
    pub methods: Vec<MethodDoc>,
}

/// Property name → record. BTreeMap keeps serialized output deterministic.
pub type PropMap = BTreeMap<String, PropDoc>;

/// A single member of an entity's properties object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropDoc {
    pub name: String,
    /// True iff the member is not optional and no code-supplied default exists.
    /// An `@default` doc tag alone does not clear this flag.
    pub required: bool,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    pub description: String,
    pub default_value: Option<DefaultValue>,
    /// Declaration the member originally lives in — only set when the
    /// enclosing node is an interface or type-alias declaration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentRef>,
}

/// A property default, from caller-supplied defaults or an `@default` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultValue {
    pub value: String,
}

/// A public-tagged callable member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDoc {
    pub name: String,
    /// Full doc comment including rendered tags.
    pub docblock: String,
    /// Declaration modifiers, currently just "static" when present.
    pub modifiers: Vec<String>,
    pub params: Vec<ParamDoc>,
    /// Present only when the member carries a non-empty `@returns` tag.
    pub returns: Option<MethodReturn>,
    /// Plain description text without tags.
    pub description: String,
}

/// One parameter of a method's first call signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamDoc {
    /// Parameter name, suffixed with `?` when the parameter is optional.
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

/// Return documentation for a method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodReturn {
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: String,
}

/// Display form of a resolved type.
///
/// `raw` and `value` are populated only for the enum-literal special case,
/// where `name` is the fixed string `"enum"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<LiteralValue>>,
}

impl TypeRef {
    /// Plain type reference carrying just the display string.
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef {
            name: name.into(),
            raw: None,
            value: None,
        }
    }
}

/// One member of an extracted string-literal union, already double-quoted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralValue {
    pub value: String,
}

/// Originating declaration of a property member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentRef {
    pub name: String,
    /// Source file of the declaration, trimmed to start at the working
    /// directory's base name when that ancestor appears in the path.
    pub file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_doc_serializes_camel_case() {
        let doc = EntityDoc {
            display_name: "Button".to_string(),
            description: "A button.".to_string(),
            props: PropMap::new(),
            methods: Vec::new(),
        };
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"displayName\":\"Button\""));
        assert!(json.contains("\"props\":{}"));
    }

    #[test]
    fn plain_type_ref_omits_enum_fields() {
        let json = serde_json::to_string(&TypeRef::named("string")).unwrap();
        assert_eq!(json, "{\"name\":\"string\"}");
    }

    #[test]
    fn parent_skipped_when_absent() {
        let prop = PropDoc {
            name: "label".to_string(),
            required: true,
            ty: TypeRef::named("string"),
            description: String::new(),
            default_value: None,
            parent: None,
        };
        let json = serde_json::to_string(&prop).unwrap();
        assert!(!json.contains("parent"));
        assert!(json.contains("\"defaultValue\":null"));
    }
}
