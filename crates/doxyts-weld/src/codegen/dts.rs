//! TypeScript declaration file (.d.ts) generator
//!
//! Emits one `declare namespace` block per namespace with a nested
//! `interface` per class. Classes outside any namespace are emitted as
//! top-level `declare interface` blocks unless a root namespace is set.

use crate::ir::{ClassDecl, DeclarationTree, Overload, OverloadDocs};

/// Generator for TypeScript declaration files
pub struct DtsGenerator<'a> {
    tree: &'a DeclarationTree,
    root_namespace: Option<String>,
    indent: usize,
}

impl<'a> DtsGenerator<'a> {
    /// Create a new generator for a tree
    pub fn new(tree: &'a DeclarationTree) -> Self {
        Self {
            tree,
            root_namespace: None,
            indent: 2,
        }
    }

    /// Wrap every namespace in a root namespace
    pub fn with_root_namespace(mut self, root: Option<impl Into<String>>) -> Self {
        self.root_namespace = root.map(Into::into).filter(|r: &String| !r.is_empty());
        self
    }

    /// Set the number of spaces per indentation level
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Generate the complete declaration text
    pub fn generate(&self) -> String {
        let mut blocks = Vec::new();

        for (path, ns) in self.tree.namespaces_sorted() {
            let classes: Vec<(&str, &ClassDecl)> = ns
                .classes_sorted()
                .into_iter()
                .filter(|(_, class)| class.overload_count() > 0)
                .collect();
            if classes.is_empty() {
                continue;
            }

            let full_path = match (&self.root_namespace, path.is_empty()) {
                (Some(root), true) => root.clone(),
                (Some(root), false) => format!("{}.{}", root, path),
                (None, _) => path.to_string(),
            };

            if full_path.is_empty() {
                for (name, class) in classes {
                    blocks.push(self.generate_interface(name, class, 0, "declare "));
                }
                continue;
            }

            let mut output = String::new();
            if let Some(ref summary) = ns.summary {
                output.push_str(&self.doc_block(&summary_lines(summary), 0));
            }
            output.push_str(&format!("declare namespace {} {{\n", full_path));

            let interfaces: Vec<String> = classes
                .into_iter()
                .map(|(name, class)| self.generate_interface(name, class, 1, ""))
                .collect();
            output.push_str(&interfaces.join("\n"));

            output.push_str("}\n");
            blocks.push(output);
        }

        blocks.join("\n")
    }

    /// Generate an interface block for a class
    fn generate_interface(&self, name: &str, class: &ClassDecl, depth: usize, keyword: &str) -> String {
        let mut output = String::new();
        let pad = self.pad(depth);

        if let Some(ref summary) = class.summary {
            output.push_str(&self.doc_block(&summary_lines(summary), depth));
        }

        output.push_str(&format!("{}{}interface {} {{\n", pad, keyword, name));

        for (method, overloads) in &class.methods {
            for overload in overloads {
                output.push_str(&self.generate_overload(method, overload, depth + 1));
            }
        }

        output.push_str(&format!("{}}}\n", pad));
        output
    }

    /// Generate one overload line, preceded by its doc comment if any
    fn generate_overload(&self, name: &str, overload: &Overload, depth: usize) -> String {
        let mut output = String::new();

        if !overload.docs.is_empty() {
            output.push_str(&self.doc_block(&overload_doc_lines(&overload.docs), depth));
        }

        output.push_str(&format!(
            "{}{};\n",
            self.pad(depth),
            overload.to_typescript_signature(name)
        ));
        output
    }

    /// Render a `/** ... */` block
    fn doc_block(&self, lines: &[String], depth: usize) -> String {
        let pad = self.pad(depth);
        let mut output = format!("{}/**\n", pad);
        for line in lines {
            if line.is_empty() {
                output.push_str(&format!("{} *\n", pad));
            } else {
                output.push_str(&format!("{} * {}\n", pad, line));
            }
        }
        output.push_str(&format!("{} */\n", pad));
        output
    }

    fn pad(&self, depth: usize) -> String {
        " ".repeat(self.indent * depth)
    }
}

fn summary_lines(text: &str) -> Vec<String> {
    sanitize(text).lines().map(|l| l.trim_end().to_string()).collect()
}

/// Lines of an overload comment: summary, then `@param`, then `@returns`
fn overload_doc_lines(docs: &OverloadDocs) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(ref summary) = docs.summary {
        lines.extend(summary_lines(summary));
    }

    for param in &docs.params {
        push_tagged(&mut lines, &format!("@param {}", param.name), &param.text);
    }

    if let Some(ref returns) = docs.returns {
        push_tagged(&mut lines, "@returns", returns);
    }

    lines
}

/// Push a tag line; continuation lines of the text follow unprefixed
fn push_tagged(lines: &mut Vec<String>, tag: &str, text: &str) {
    let text = sanitize(text);
    let mut text_lines = text.lines();
    match text_lines.next() {
        Some(first) => lines.push(format!("{} {}", tag, first.trim_end())),
        None => lines.push(tag.to_string()),
    }
    lines.extend(text_lines.map(|l| l.trim_end().to_string()));
}

/// Keep documentation text from closing the comment early
fn sanitize(text: &str) -> String {
    text.trim().replace("*/", "*\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ParamRef, SymbolDocs, SymbolRecord};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_declaration_line_without_docs() {
        let mut tree = DeclarationTree::new();
        tree.add(
            SymbolRecord::new(["Demo", "Widget", "Foo"])
                .returns("bool")
                .param(ParamRef::parse("x", "int"))
                .param(ParamRef::parse("y", "string?").with_default("null")),
        );

        let output = DtsGenerator::new(&tree).generate();
        assert_eq!(
            output,
            "declare namespace Demo {\n\
             \x20 interface Widget {\n\
             \x20   Foo(x: number, y?: string): boolean;\n\
             \x20 }\n\
             }\n"
        );
        assert!(!output.contains("/**"));
    }

    #[test]
    fn test_doc_block() {
        let mut tree = DeclarationTree::new();
        tree.add(
            SymbolRecord::new(["Demo", "Widget", "Resize"])
                .returns("bool")
                .param(ParamRef::parse("width", "int"))
                .param(ParamRef::parse("height", "int"))
                .with_docs(
                    SymbolDocs::new()
                        .brief("Resize the widget.")
                        .param("width", "New width")
                        .returns("True when resized"),
                ),
        );

        let output = DtsGenerator::new(&tree).generate();
        assert_eq!(
            output,
            "declare namespace Demo {\n\
             \x20 interface Widget {\n\
             \x20   /**\n\
             \x20    * Resize the widget.\n\
             \x20    * @param width New width\n\
             \x20    * @returns True when resized\n\
             \x20    */\n\
             \x20   Resize(width: number, height: number): boolean;\n\
             \x20 }\n\
             }\n"
        );
    }

    #[test]
    fn test_overloads_in_encounter_order() {
        let mut tree = DeclarationTree::new();
        tree.add(
            SymbolRecord::new(["Demo", "Calc", "Add"])
                .returns("int")
                .param(ParamRef::parse("a", "int")),
        );
        tree.add(
            SymbolRecord::new(["Demo", "Calc", "Add"])
                .returns("string")
                .param(ParamRef::parse("a", "string")),
        );

        let output = DtsGenerator::new(&tree).generate();
        let first = output.find("Add(a: number): number;").unwrap();
        let second = output.find("Add(a: string): string;").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_sorted_namespaces_and_top_level_interfaces() {
        let mut tree = DeclarationTree::new();
        tree.add(SymbolRecord::new(["Zeta", "Z", "Run"]));
        tree.add(SymbolRecord::new(["Loose", "Go"]).returns("void"));
        tree.add(SymbolRecord::new(["Alpha", "A", "Run"]));

        let output = DtsGenerator::new(&tree).with_indent(4).generate();
        assert_eq!(
            output,
            "declare interface Loose {\n\
             \x20   Go(): void;\n\
             }\n\
             \n\
             declare namespace Alpha {\n\
             \x20   interface A {\n\
             \x20       Run(): void;\n\
             \x20   }\n\
             }\n\
             \n\
             declare namespace Zeta {\n\
             \x20   interface Z {\n\
             \x20       Run(): void;\n\
             \x20   }\n\
             }\n"
        );
    }

    #[test]
    fn test_root_namespace_and_summaries() {
        let mut tree = DeclarationTree::new();
        tree.add(SymbolRecord::new(["Loose", "Go"]));
        tree.add(SymbolRecord::new(["Ui", "Widget", "Show"]));
        tree.note_namespace_summary(&["Ui".to_string()], "User interface.");
        tree.note_class_summary(&["Ui".to_string()], "Widget", "A widget.");

        let output = DtsGenerator::new(&tree)
            .with_root_namespace(Some("wkit"))
            .generate();
        assert_eq!(
            output,
            "declare namespace wkit {\n\
             \x20 interface Loose {\n\
             \x20   Go(): void;\n\
             \x20 }\n\
             }\n\
             \n\
             /**\n\
             \x20* User interface.\n\
             \x20*/\n\
             declare namespace wkit.Ui {\n\
             \x20 /**\n\
             \x20  * A widget.\n\
             \x20  */\n\
             \x20 interface Widget {\n\
             \x20   Show(): void;\n\
             \x20 }\n\
             }\n"
        );
    }

    #[test]
    fn test_unmatched_param_doc_keeps_summary() {
        let mut tree = DeclarationTree::new();
        tree.add(
            SymbolRecord::new(["Demo", "Widget", "Move"])
                .param(ParamRef::parse("x", "int"))
                .with_docs(SymbolDocs::new().brief("Move it.").param("dx", "Delta")),
        );

        let output = DtsGenerator::new(&tree).generate();
        assert!(output.contains("     * Move it.\n     */\n"));
        assert!(!output.contains("@param"));
    }

    #[test]
    fn test_classes_without_methods_are_skipped() {
        let mut tree = DeclarationTree::new();
        tree.note_class_summary(&["Demo".to_string()], "Empty", "Nothing here.");
        assert_eq!(DtsGenerator::new(&tree).generate(), "");
    }

    #[test]
    fn test_doc_text_cannot_close_comment() {
        let mut tree = DeclarationTree::new();
        tree.add(
            SymbolRecord::new(["Demo", "Widget", "Glob"])
                .with_docs(SymbolDocs::new().brief("Ends here */ or not.")),
        );
        let output = DtsGenerator::new(&tree).generate();
        assert!(output.contains("* Ends here *\\/ or not."));
    }
}
