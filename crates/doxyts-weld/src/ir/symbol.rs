//! Symbol records for documented methods
//!
//! A [`SymbolRecord`] is what the extractor yields for every public function
//! member of a documented class: its qualified name, normalized return and
//! parameter types, and the raw documentation text attached to it.

use crate::ir::{TypeNormalizer, TypeRef};
use serde::{Deserialize, Serialize};

/// Parameter of a documented method
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamRef {
    /// Declared parameter name
    pub name: String,
    /// Normalized type
    pub ty: TypeRef,
    /// Whether the parameter was declared with `params`
    pub variadic: bool,
    /// Default value token, kept for documentation only
    pub default: Option<String>,
    /// Type token exactly as it appeared in the export
    pub source_type: String,
}

impl ParamRef {
    /// Create a new parameter with an already normalized type
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            source_type: ty.to_typescript(),
            ty,
            variadic: false,
            default: None,
        }
    }

    /// Create a parameter from a source type token
    pub fn parse(name: impl Into<String>, source_type: &str) -> Self {
        Self::parse_with(name, source_type, &TypeNormalizer::new())
    }

    /// Create a parameter from a source type token using the given normalizer
    pub fn parse_with(
        name: impl Into<String>,
        source_type: &str,
        normalizer: &TypeNormalizer<'_>,
    ) -> Self {
        let (ty, variadic) = normalizer.normalize_param(source_type);
        Self {
            name: name.into(),
            ty,
            variadic,
            default: None,
            source_type: source_type.trim().to_string(),
        }
    }

    /// Mark as variadic
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// Set the default value token
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Whether the parameter renders as `name?: T`
    ///
    /// Nullable, non-variadic parameters become optional and drop the
    /// nullable marker from their type. A default value alone does not make
    /// a parameter optional.
    pub fn is_optional(&self) -> bool {
        !self.variadic && self.ty.is_nullable()
    }

    /// Get TypeScript parameter declaration
    pub fn to_typescript_param(&self) -> String {
        if self.variadic {
            let element = match self.ty.unwrap_nullable() {
                TypeRef::ArrayOf(element) => element.as_ref(),
                other => other,
            };
            return format!("...{}: {}[]", self.name, element.to_typescript_with_parens());
        }

        if self.is_optional() {
            format!("{}?: {}", self.name, self.ty.unwrap_nullable().to_typescript())
        } else {
            format!("{}: {}", self.name, self.ty.to_typescript())
        }
    }
}

/// Documentation text for one parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamDoc {
    /// Parameter name the text documents
    pub name: String,
    /// Description text
    pub text: String,
}

impl ParamDoc {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Raw documentation attached to a member, before resolution
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolDocs {
    /// Brief description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub brief: String,
    /// Detailed description, with parameter and return sections removed
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub detailed: String,
    /// Parameter documentation list, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamDoc>,
    /// Return documentation entries, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub returns: Vec<String>,
}

impl SymbolDocs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the brief description
    pub fn brief(mut self, text: impl Into<String>) -> Self {
        self.brief = text.into();
        self
    }

    /// Set the detailed description
    pub fn detailed(mut self, text: impl Into<String>) -> Self {
        self.detailed = text.into();
        self
    }

    /// Add a parameter description
    pub fn param(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.params.push(ParamDoc::new(name, text));
        self
    }

    /// Add a return description
    pub fn returns(mut self, text: impl Into<String>) -> Self {
        self.returns.push(text.into());
        self
    }

    /// Check if no documentation text is present at all
    pub fn is_empty(&self) -> bool {
        self.brief.is_empty()
            && self.detailed.is_empty()
            && self.params.is_empty()
            && self.returns.is_empty()
    }
}

/// Metadata for a single documented method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    /// Qualified name segments, e.g. `["Acme", "Ui", "Widget", "Resize"]`
    pub qualified_name: Vec<String>,
    /// Normalized return type
    pub return_type: TypeRef,
    /// Return type token exactly as it appeared in the export
    pub return_token: String,
    /// Parameters in declaration order
    pub params: Vec<ParamRef>,
    /// Raw documentation
    pub docs: SymbolDocs,
}

impl SymbolRecord {
    /// Create a new record with an empty return type
    pub fn new<I, S>(qualified_name: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            qualified_name: qualified_name.into_iter().map(Into::into).collect(),
            return_type: TypeRef::void(),
            return_token: String::new(),
            params: Vec::new(),
            docs: SymbolDocs::default(),
        }
    }

    /// Set the return type token
    pub fn returns(self, token: &str) -> Self {
        self.returns_with(token, &TypeNormalizer::new())
    }

    /// Set the return type token using the given normalizer
    pub fn returns_with(mut self, token: &str, normalizer: &TypeNormalizer<'_>) -> Self {
        self.return_token = token.trim().to_string();
        self.return_type = normalizer.normalize(token);
        self
    }

    /// Add a parameter
    pub fn param(mut self, param: ParamRef) -> Self {
        self.params.push(param);
        self
    }

    /// Set parameters
    pub fn with_params(mut self, params: Vec<ParamRef>) -> Self {
        self.params = params;
        self
    }

    /// Set documentation
    pub fn with_docs(mut self, docs: SymbolDocs) -> Self {
        self.docs = docs;
        self
    }

    /// Simple method name (last segment)
    pub fn name(&self) -> &str {
        self.qualified_name.last().map(String::as_str).unwrap_or("")
    }

    /// Simple name of the enclosing class
    pub fn class_name(&self) -> Option<&str> {
        let len = self.qualified_name.len();
        (len >= 2).then(|| self.qualified_name[len - 2].as_str())
    }

    /// Namespace segments: everything except class and method
    pub fn namespace(&self) -> &[String] {
        let len = self.qualified_name.len();
        &self.qualified_name[..len.saturating_sub(2)]
    }

    /// Whether this record declares a constructor
    ///
    /// Both conditions are required: a same-named method that declares a
    /// return type is an ordinary method. Generic classes (`Box< T >`) are
    /// compared by their name without the argument list.
    pub fn is_constructor(&self) -> bool {
        self.return_token.is_empty()
            && self.class_name().map(without_generics) == Some(self.name())
    }

    /// Whether this record declares a finalizer (`~Name`)
    pub fn is_finalizer(&self) -> bool {
        self.name().starts_with('~')
    }
}

/// `Box< T >` -> `Box`
fn without_generics(name: &str) -> &str {
    name.split('<').next().unwrap_or(name).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_to_typescript() {
        assert_eq!(ParamRef::parse("x", "int").to_typescript_param(), "x: number");
        assert_eq!(ParamRef::parse("w", "Widget").to_typescript_param(), "w: Widget");
    }

    #[test]
    fn test_nullable_param_becomes_optional() {
        let param = ParamRef::parse("values", "int[]?");
        assert!(param.is_optional());
        assert_eq!(param.to_typescript_param(), "values?: number[]");

        let param = ParamRef::parse("y", "string?").with_default("null");
        assert_eq!(param.to_typescript_param(), "y?: string");
    }

    #[test]
    fn test_default_alone_is_not_optional() {
        let param = ParamRef::parse("count", "int").with_default("3");
        assert!(!param.is_optional());
        assert_eq!(param.to_typescript_param(), "count: number");
    }

    #[test]
    fn test_variadic_param() {
        let param = ParamRef::parse("items", "params int[]");
        assert!(param.variadic);
        assert_eq!(param.to_typescript_param(), "...items: number[]");

        // Nullable marker on a variadic parameter is ignored
        let param = ParamRef::parse("items", "params int[]?");
        assert!(!param.is_optional());
        assert_eq!(param.to_typescript_param(), "...items: number[]");

        let param = ParamRef::parse("names", "params List<string>");
        assert_eq!(param.to_typescript_param(), "...names: string[]");
    }

    #[test]
    fn test_record_names() {
        let record = SymbolRecord::new(["Acme", "Ui", "Widget", "Resize"]).returns("void");
        assert_eq!(record.name(), "Resize");
        assert_eq!(record.class_name(), Some("Widget"));
        assert_eq!(record.namespace(), ["Acme".to_string(), "Ui".to_string()]);

        let record = SymbolRecord::new(["Widget", "Resize"]);
        assert!(record.namespace().is_empty());
    }

    #[test]
    fn test_constructor_detection() {
        assert!(SymbolRecord::new(["Ns", "Widget", "Widget"]).is_constructor());
        assert!(!SymbolRecord::new(["Ns", "Widget", "Widget"])
            .returns("Widget")
            .is_constructor());
        assert!(!SymbolRecord::new(["Ns", "Widget", "Resize"]).is_constructor());
        assert!(SymbolRecord::new(["Ns", "Widget", "~Widget"]).is_finalizer());
    }

    #[test]
    fn test_generic_class_constructor_detection() {
        let ctor = SymbolRecord::new(["Acme", "Box< T >", "Box"]);
        assert_eq!(ctor.class_name(), Some("Box< T >"));
        assert!(ctor.is_constructor());

        assert!(SymbolRecord::new(["Acme", "Pair<K, V>", "Pair"]).is_constructor());
        assert!(!SymbolRecord::new(["Acme", "Box< T >", "Box"])
            .returns("T")
            .is_constructor());
    }
}
