//! Extraction of class definitions from Python source
//!
//! The text is parsed with the tree-sitter Python grammar. Every
//! `class_definition` node, nested ones included, yields the full source
//! lines it spans, in the order the classes appear in the file. A span ends
//! at the class's last statement, so trailing comments in its body are left
//! out.

use super::error::ExtractionError;
use tracing::debug;
use tree_sitter::{Node, Parser, Point};

const CLASS_NODE: &str = "class_definition";
const COMMENT_NODE: &str = "comment";

/// Python 2 statements the grammar still accepts but Python 3 rejects
const PYTHON2_NODES: &[&str] = &["print_statement", "exec_statement"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassSnippet;

impl ClassSnippet {
    pub fn extract_elements(&self, text: &str) -> Result<Vec<String>, ExtractionError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| ExtractionError::Parse(format!("Python grammar unavailable: {}", e)))?;

        let tree = parser
            .parse(text, None)
            .ok_or_else(|| ExtractionError::Parse("parser produced no syntax tree".to_string()))?;

        let root = tree.root_node();
        if root.has_error() {
            let location = first_error(root)
                .map(|node| {
                    let pos = node.start_position();
                    format!("invalid syntax at line {}, column {}", pos.row + 1, pos.column + 1)
                })
                .unwrap_or_else(|| "invalid syntax".to_string());
            return Err(ExtractionError::Parse(location));
        }

        let lines: Vec<&str> = text.lines().collect();
        let mut snippets = Vec::new();
        collect_classes(root, &lines, &mut snippets)?;

        debug!("Found {} class definitions", snippets.len());
        Ok(snippets)
    }
}

fn collect_classes(
    node: Node<'_>,
    lines: &[&str],
    out: &mut Vec<String>,
) -> Result<(), ExtractionError> {
    if PYTHON2_NODES.contains(&node.kind()) {
        let pos = node.start_position();
        return Err(ExtractionError::Parse(format!(
            "invalid syntax at line {}, column {} ({})",
            pos.row + 1,
            pos.column + 1,
            node.kind()
        )));
    }

    if node.kind() == CLASS_NODE {
        let start = node.start_position().row;
        let end_pos = code_end(node);
        // A node ending at column 0 stops right after the previous line's newline
        let end = if end_pos.column == 0 && end_pos.row > start {
            end_pos.row - 1
        } else {
            end_pos.row
        };

        if let Some(span) = lines.get(start..=end.min(lines.len().saturating_sub(1))) {
            out.push(span.join("\n"));
        }
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_classes(child, lines, out)?;
    }

    Ok(())
}

/// End of the last non-comment token under `node`
fn code_end(node: Node<'_>) -> Point {
    let mut cursor = node.walk();
    let last = node
        .children(&mut cursor)
        .filter(|child| child.kind() != COMMENT_NODE)
        .last();

    match last {
        Some(child) => code_end(child),
        None => node.end_position(),
    }
}

fn first_error<'tree>(node: Node<'tree>) -> Option<Node<'tree>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            if let Some(found) = first_error(child) {
                return Some(found);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"import os

class Outer:
    """Docstring."""

    class Inner:
        x = 1

    def run(self):
        return os.getcwd()


def helper():
    pass


@decorated
class Second(Outer):
    pass
"#;

    #[test]
    fn test_extracts_top_level_and_nested_classes_in_source_order() {
        let snippets = ClassSnippet.extract_elements(SOURCE).unwrap();

        assert_eq!(snippets.len(), 3);
        assert!(snippets[0].starts_with("class Outer:"));
        assert!(snippets[0].ends_with("        return os.getcwd()"));
        assert_eq!(snippets[1], "    class Inner:\n        x = 1");
        assert_eq!(snippets[2], "class Second(Outer):\n    pass");
    }

    #[test]
    fn test_snippets_are_verbatim_lines() {
        let snippets = ClassSnippet.extract_elements(SOURCE).unwrap();
        for snippet in &snippets {
            assert!(SOURCE.contains(snippet.as_str()));
        }
    }

    #[test]
    fn test_no_classes() {
        let snippets = ClassSnippet.extract_elements("x = 1\nprint(x)\n").unwrap();
        assert!(snippets.is_empty());
    }

    #[test]
    fn test_empty_source() {
        assert!(ClassSnippet.extract_elements("").unwrap().is_empty());
    }

    #[test]
    fn test_trailing_comments_are_not_part_of_the_class() {
        let source = "class A:\n    x = 1\n    # trailing comment\n\ny = 2\n";
        let snippets = ClassSnippet.extract_elements(source).unwrap();
        assert_eq!(snippets, vec!["class A:\n    x = 1"]);
    }

    #[test]
    fn test_nested_trailing_comment_and_multiline_call() {
        let source = "class A:\n    def f(self):\n        return g(\n            1,\n        )\n        # done\n    # end of A\n";
        let snippets = ClassSnippet.extract_elements(source).unwrap();
        assert_eq!(
            snippets,
            vec!["class A:\n    def f(self):\n        return g(\n            1,\n        )"]
        );
    }

    #[test]
    fn test_python2_statements_are_rejected() {
        for source in ["print \"hello\"\nclass A:\n    pass\n", "exec \"x=1\"\n"] {
            match ClassSnippet.extract_elements(source) {
                Err(ExtractionError::Parse(message)) => {
                    assert!(message.contains("invalid syntax at line 1"))
                }
                other => panic!("Expected parse error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_invalid_source_fails() {
        let result = ClassSnippet.extract_elements("class Broken(:\n    pass\n");
        match result {
            Err(ExtractionError::Parse(message)) => assert!(message.contains("invalid syntax")),
            other => panic!("Expected parse error, got {:?}", other),
        }
    }
}
