//! Text helpers over a parsed Doxygen XML tree

use roxmltree::Node;

/// First child element with the given tag
pub fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(tag))
}

/// Child elements with the given tag
pub fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |n| n.has_tag_name(tag))
}

/// All text below a node, concatenated and trimmed
///
/// Used for short inline values such as type tokens and names, where
/// `<ref>` children must be flattened into the surrounding text.
pub fn inline_text(node: Node<'_, '_>) -> String {
    let text: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    text.trim().to_string()
}

/// Inline text of the first child with the given tag, empty when absent
pub fn child_text(node: Node<'_, '_>, tag: &str) -> String {
    child(node, tag).map(inline_text).unwrap_or_default()
}

/// Paragraph text of a description element
///
/// Each `<para>` becomes one line with whitespace collapsed. Parameter
/// lists and return sections are left out; they are read separately.
pub fn description_text(node: Node<'_, '_>) -> String {
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    collect_paragraphs(node, &mut current, &mut paragraphs);
    flush(&mut current, &mut paragraphs);
    paragraphs.join("\n")
}

fn collect_paragraphs(node: Node<'_, '_>, current: &mut String, paragraphs: &mut Vec<String>) {
    for child in node.children() {
        if child.is_text() {
            current.push_str(child.text().unwrap_or(""));
            continue;
        }
        if !child.is_element() {
            continue;
        }

        match child.tag_name().name() {
            "parameterlist" => {}
            "simplesect" if child.attribute("kind") == Some("return") => {}
            "para" | "linebreak" => {
                flush(current, paragraphs);
                collect_paragraphs(child, current, paragraphs);
                flush(current, paragraphs);
            }
            _ => collect_paragraphs(child, current, paragraphs),
        }
    }
}

fn flush(current: &mut String, paragraphs: &mut Vec<String>) {
    let text = collapse_whitespace(current);
    if !text.is_empty() {
        paragraphs.push(text);
    }
    current.clear();
}

/// Collapse runs of whitespace into single spaces
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_inline_text_flattens_refs() {
        let doc = Document::parse("<type>List&lt; <ref refid=\"x\">Widget</ref> &gt;</type>").unwrap();
        assert_eq!(inline_text(doc.root_element()), "List< Widget >");
    }

    #[test]
    fn test_child_text_missing_is_empty() {
        let doc = Document::parse("<param><type>int</type></param>").unwrap();
        assert_eq!(child_text(doc.root_element(), "type"), "int");
        assert_eq!(child_text(doc.root_element(), "declname"), "");
    }

    #[test]
    fn test_description_skips_parameter_sections() {
        let doc = Document::parse(
            r#"<detaileddescription>
                <para>Resizes   the <bold>widget</bold>.</para>
                <para>Second paragraph.
                  <parameterlist kind="param">
                    <parameteritem>
                      <parameternamelist><parametername>w</parametername></parameternamelist>
                      <parameterdescription><para>width</para></parameterdescription>
                    </parameteritem>
                  </parameterlist>
                  <simplesect kind="return"><para>true</para></simplesect>
                </para>
              </detaileddescription>"#,
        )
        .unwrap();

        assert_eq!(
            description_text(doc.root_element()),
            "Resizes the widget.\nSecond paragraph."
        );
    }

    #[test]
    fn test_description_of_only_parameters_is_empty() {
        let doc = Document::parse(
            r#"<detaileddescription><para><parameterlist kind="param"/></para></detaileddescription>"#,
        )
        .unwrap();
        assert_eq!(description_text(doc.root_element()), "");
    }
}
