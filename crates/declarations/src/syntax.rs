//! Small helpers over tree-sitter nodes

use tree_sitter::{Language, Node};

/// Grammar dialect picked from the file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Dialect {
    TypeScript,
    Tsx,
}

impl Dialect {
    pub fn for_file(file_name: &str) -> Self {
        if file_name.to_ascii_lowercase().ends_with(".tsx") {
            Self::Tsx
        } else {
            Self::TypeScript
        }
    }

    pub fn language(self) -> Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Source text of a node; empty if the range is not valid UTF-8
pub(crate) fn text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or_default()
}

/// Collapse every whitespace run into one space
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized declaration text without the trailing semicolon
pub(crate) fn signature_text(node: Node, source: &str) -> String {
    let collapsed = collapse_whitespace(text(node, source));
    collapsed.trim_end_matches([';', ',']).trim_end().to_string()
}

/// Type text of a `: T` annotation node
pub(crate) fn annotation_text(node: Node, source: &str) -> String {
    collapse_whitespace(text(node, source).trim_start().trim_start_matches(':'))
}

/// Whether a node has an anonymous child token of the given kind (`?`, `readonly`, `get`)
pub(crate) fn has_token(node: Node, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|child| child.kind() == kind);
    found
}

/// First child of one of the given kinds
pub(crate) fn child_of_kind<'t>(node: Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|child| kinds.contains(&child.kind()));
    found
}

/// Named children texts, collapsed
pub(crate) fn named_children_text(node: Node, source: &str) -> Vec<String> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .map(|child| collapse_whitespace(text(child, source)))
        .collect()
}

/// Split on commas that are not nested in brackets, braces, parens or angles
pub(crate) fn split_top_level(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    let mut previous = '\0';

    for c in text.chars() {
        match c {
            '<' | '(' | '[' | '{' => depth += 1,
            // `=>` is not a closing angle
            '>' if previous != '=' => depth -= 1,
            ')' | ']' | '}' => depth -= 1,
            ',' if depth <= 0 => {
                let part = current.trim();
                if !part.is_empty() {
                    parts.push(part.to_string());
                }
                current.clear();
                previous = c;
                continue;
            }
            _ => {}
        }
        current.push(c);
        previous = c;
    }

    let part = current.trim();
    if !part.is_empty() {
        parts.push(part.to_string());
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_for_file() {
        assert_eq!(Dialect::for_file("index.d.ts"), Dialect::TypeScript);
        assert_eq!(Dialect::for_file("Button.TSX"), Dialect::Tsx);
    }

    #[test]
    fn test_split_top_level() {
        assert_eq!(
            split_top_level("Base<A, B>, Other, Fn<(a: X, b: Y) => Z>"),
            vec!["Base<A, B>", "Other", "Fn<(a: X, b: Y) => Z>"]
        );
        assert!(split_top_level("  ").is_empty());
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a\n   b\t c "), "a b c");
    }
}
