//! Declaration tree
//!
//! Groups symbol records by namespace, class and method name. Overloads keep
//! the order in which they were added; namespaces and classes are only
//! sorted when the tree is read for emission.

use crate::ir::{OverloadDocs, ParamRef, SymbolRecord, TypeRef};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Key of the bucket holding classes declared outside any namespace
pub const NO_NAMESPACE: &str = "";

/// One overload of a method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overload {
    /// Parameters in declaration order
    pub params: Vec<ParamRef>,
    /// Return type
    pub return_type: TypeRef,
    /// Resolved documentation
    #[serde(default)]
    pub docs: OverloadDocs,
}

impl Overload {
    /// Build an overload from a record, resolving its documentation
    pub fn from_record(record: SymbolRecord) -> Self {
        let docs = OverloadDocs::attach(&record.docs, &record.params);
        Self {
            params: record.params,
            return_type: record.return_type,
            docs,
        }
    }

    /// Get the TypeScript method signature (without trailing `;`)
    pub fn to_typescript_signature(&self, name: &str) -> String {
        let params: Vec<String> = self.params.iter().map(|p| p.to_typescript_param()).collect();
        format!(
            "{}({}): {}",
            name,
            params.join(", "),
            self.return_type.to_typescript()
        )
    }
}

/// Methods of one class
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    /// Class summary (first non-empty value wins)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Method name -> overloads in encounter order
    pub methods: IndexMap<String, Vec<Overload>>,
}

impl ClassDecl {
    /// Number of overloads across all methods
    pub fn overload_count(&self) -> usize {
        self.methods.values().map(Vec::len).sum()
    }
}

/// Classes of one namespace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceDecl {
    /// Namespace summary (first non-empty value wins)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Class name -> class
    pub classes: IndexMap<String, ClassDecl>,
}

impl NamespaceDecl {
    /// Classes sorted by name
    pub fn classes_sorted(&self) -> Vec<(&str, &ClassDecl)> {
        let mut classes: Vec<_> = self
            .classes
            .iter()
            .map(|(name, class)| (name.as_str(), class))
            .collect();
        classes.sort_by(|a, b| a.0.cmp(b.0));
        classes
    }

    /// Number of overloads across all classes
    pub fn overload_count(&self) -> usize {
        self.classes.values().map(ClassDecl::overload_count).sum()
    }
}

/// Namespace -> class -> method -> overloads
///
/// Namespace keys are dotted paths (`Acme.Ui`); [`NO_NAMESPACE`] holds
/// classes whose qualified name has no namespace segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationTree {
    pub namespaces: IndexMap<String, NamespaceDecl>,
}

impl DeclarationTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, returning false when it was filtered out
    ///
    /// Constructors and finalizers are dropped. Identical signatures are
    /// kept as separate overloads.
    pub fn add(&mut self, record: SymbolRecord) -> bool {
        if record.is_constructor() || record.is_finalizer() {
            debug!(name = %record.qualified_name.join("::"), "skipping constructor");
            return false;
        }

        let Some(class) = record.class_name().map(str::to_string) else {
            warn!(name = %record.name(), "skipping member without an enclosing class");
            return false;
        };

        let namespace = namespace_key(record.namespace());
        let method = record.name().to_string();

        self.namespaces
            .entry(namespace)
            .or_default()
            .classes
            .entry(class)
            .or_default()
            .methods
            .entry(method)
            .or_default()
            .push(Overload::from_record(record));

        true
    }

    /// Add many records, returning how many were kept
    pub fn extend(&mut self, records: impl IntoIterator<Item = SymbolRecord>) -> usize {
        let mut kept = 0;
        for record in records {
            if self.add(record) {
                kept += 1;
            }
        }
        kept
    }

    /// Record a namespace summary unless one is already set
    pub fn note_namespace_summary(&mut self, namespace: &[String], summary: &str) {
        let summary = summary.trim();
        if summary.is_empty() {
            return;
        }
        let entry = self.namespaces.entry(namespace_key(namespace)).or_default();
        if entry.summary.is_none() {
            entry.summary = Some(summary.to_string());
        }
    }

    /// Record a class summary unless one is already set
    pub fn note_class_summary(&mut self, namespace: &[String], class: &str, summary: &str) {
        let summary = summary.trim();
        if summary.is_empty() {
            return;
        }
        let entry = self
            .namespaces
            .entry(namespace_key(namespace))
            .or_default()
            .classes
            .entry(class.to_string())
            .or_default();
        if entry.summary.is_none() {
            entry.summary = Some(summary.to_string());
        }
    }

    /// Namespaces sorted by path
    pub fn namespaces_sorted(&self) -> Vec<(&str, &NamespaceDecl)> {
        let mut namespaces: Vec<_> = self
            .namespaces
            .iter()
            .map(|(path, ns)| (path.as_str(), ns))
            .collect();
        namespaces.sort_by(|a, b| a.0.cmp(b.0));
        namespaces
    }

    /// Number of overloads in the tree
    pub fn overload_count(&self) -> usize {
        self.namespaces.values().map(NamespaceDecl::overload_count).sum()
    }

    /// Check if the tree holds no overloads
    pub fn is_empty(&self) -> bool {
        self.overload_count() == 0
    }

    /// Serialize the tree as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Join namespace segments into a tree key
pub fn namespace_key(segments: &[String]) -> String {
    segments.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::SymbolDocs;

    fn method(ns: &str, class: &str, name: &str) -> SymbolRecord {
        let mut segments: Vec<&str> = ns.split('.').filter(|s| !s.is_empty()).collect();
        segments.push(class);
        segments.push(name);
        SymbolRecord::new(segments)
    }

    #[test]
    fn test_groups_by_namespace_class_method() {
        let mut tree = DeclarationTree::new();
        tree.add(method("Acme.Ui", "Widget", "Resize").returns("void"));
        tree.add(method("Acme.Ui", "Widget", "Show").returns("void"));
        tree.add(method("Acme", "Button", "Click").returns("bool"));

        assert_eq!(tree.namespaces.len(), 2);
        let ui = &tree.namespaces["Acme.Ui"];
        let widget = &ui.classes["Widget"];
        let methods: Vec<&str> = widget.methods.keys().map(String::as_str).collect();
        assert_eq!(methods, ["Resize", "Show"]);
        assert_eq!(tree.overload_count(), 3);
    }

    #[test]
    fn test_short_names_use_no_namespace_bucket() {
        let mut tree = DeclarationTree::new();
        tree.add(SymbolRecord::new(["Widget", "Resize"]).returns("void"));
        assert!(tree.namespaces[NO_NAMESPACE].classes.contains_key("Widget"));
    }

    #[test]
    fn test_constructors_are_excluded() {
        let mut tree = DeclarationTree::new();
        assert!(!tree.add(method("Ns", "Widget", "Widget")));
        assert!(!tree.add(method("Ns", "Widget", "~Widget")));
        assert!(tree.is_empty());

        // Same name with a return type is an ordinary method
        assert!(tree.add(method("Ns", "Widget", "Widget").returns("Widget")));
        assert_eq!(tree.overload_count(), 1);
    }

    #[test]
    fn test_overloads_keep_encounter_order_without_dedup() {
        let mut tree = DeclarationTree::new();
        let kept = tree.extend([
            method("Ns", "Math", "Add").returns("int").param(ParamRef::parse("a", "int")),
            method("Ns", "Math", "Add").returns("double").param(ParamRef::parse("a", "double")),
            method("Ns", "Math", "Add").returns("int").param(ParamRef::parse("a", "int")),
        ]);
        assert_eq!(kept, 3);

        let overloads = &tree.namespaces["Ns"].classes["Math"].methods["Add"];
        let returns: Vec<String> = overloads.iter().map(|o| o.return_type.to_typescript()).collect();
        assert_eq!(returns, ["number", "number", "number"]);
        assert_eq!(overloads[1].params[0].source_type, "double");
        assert_eq!(overloads[0], overloads[2]);
    }

    #[test]
    fn test_docs_are_attached() {
        let mut tree = DeclarationTree::new();
        tree.add(
            method("Ns", "Widget", "Resize")
                .param(ParamRef::parse("width", "int"))
                .with_docs(SymbolDocs::new().brief("Resize it.").param("width", "New width")),
        );
        let overload = &tree.namespaces["Ns"].classes["Widget"].methods["Resize"][0];
        assert_eq!(overload.docs.summary.as_deref(), Some("Resize it."));
        assert_eq!(overload.docs.params.len(), 1);
    }

    #[test]
    fn test_summaries_first_wins() {
        let ns = vec!["Acme".to_string()];
        let mut tree = DeclarationTree::new();
        tree.note_namespace_summary(&ns, "");
        tree.note_namespace_summary(&ns, "First");
        tree.note_namespace_summary(&ns, "Second");
        assert_eq!(tree.namespaces["Acme"].summary.as_deref(), Some("First"));

        tree.note_class_summary(&ns, "Widget", "A widget");
        tree.note_class_summary(&ns, "Widget", "Another");
        assert_eq!(
            tree.namespaces["Acme"].classes["Widget"].summary.as_deref(),
            Some("A widget")
        );
    }

    #[test]
    fn test_sorted_views() {
        let mut tree = DeclarationTree::new();
        tree.add(method("Zeta", "B", "M"));
        tree.add(method("Alpha", "Z", "M"));
        tree.add(method("Alpha", "A", "M"));

        let namespaces: Vec<&str> = tree.namespaces_sorted().iter().map(|(n, _)| *n).collect();
        assert_eq!(namespaces, ["Alpha", "Zeta"]);

        let classes: Vec<&str> = tree.namespaces["Alpha"]
            .classes_sorted()
            .iter()
            .map(|(c, _)| *c)
            .collect();
        assert_eq!(classes, ["A", "Z"]);
    }
}
