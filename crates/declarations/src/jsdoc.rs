//! JSDoc extraction
//!
//! Two sources feed a definition's documentation. The `/** ... */` block right
//! before the declaration is parsed into tags first; then every leading comment
//! (including `//` lines and plain block comments) is scanned as text, and only
//! fields still empty are filled from it.

use crate::syntax::text;
use crate::types::TypeDefinition;
use tree_sitter::Node;

/// Wrapper nodes a leading comment may sit in front of
const WRAPPER_KINDS: &[&str] = &["export_statement", "ambient_declaration"];

/// Documentation gathered from comments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct JsDoc {
    pub description: Option<String>,
    pub params: Vec<(String, String)>,
    pub returns: Option<String>,
    pub examples: Vec<String>,
    pub deprecated: Option<String>,
    pub see_also: Vec<String>,
}

impl JsDoc {
    /// Documentation for the declaration at `node`
    pub fn for_node(node: Node, source: &str) -> Self {
        let comments = leading_comments(anchor(node), source);

        let structured = comments
            .iter()
            .rev()
            .find(|c| c.starts_with("/**"))
            .map(|block| Self::from_lines(&strip_comment(block)))
            .unwrap_or_default();

        let all_lines: Vec<String> = comments.iter().flat_map(|c| strip_comment(c)).collect();
        let textual = Self::from_lines(&all_lines);

        structured.fill_missing(textual)
    }

    /// Parse comment lines (markers already stripped) into description and tags
    pub fn from_lines(lines: &[String]) -> Self {
        let mut doc = Self::default();
        let mut description = Vec::new();
        let mut current: Option<(String, Vec<String>)> = None;

        for line in lines {
            let trimmed = line.trim();
            if let Some(tag_line) = trimmed.strip_prefix('@') {
                if let Some((tag, body)) = current.take() {
                    doc.apply_tag(&tag, &body);
                }
                let (tag, rest) = tag_line
                    .split_once(char::is_whitespace)
                    .unwrap_or((tag_line, ""));
                current = Some((tag.to_lowercase(), vec![rest.to_string()]));
            } else if let Some((_, body)) = current.as_mut() {
                body.push(line.clone());
            } else {
                description.push(trimmed.to_string());
            }
        }
        if let Some((tag, body)) = current.take() {
            doc.apply_tag(&tag, &body);
        }

        let description = description.join("\n").trim().to_string();
        if !description.is_empty() {
            doc.description = Some(description);
        }
        doc
    }

    fn apply_tag(&mut self, tag: &str, body: &[String]) {
        let inline = body
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        match tag {
            "param" | "arg" | "argument" => {
                if let Some(param) = parse_param(&inline) {
                    self.params.push(param);
                }
            }
            "returns" | "return" => {
                let text = strip_type_braces(&inline);
                if !text.is_empty() {
                    self.returns = Some(text.to_string());
                }
            }
            "example" => {
                let example = trim_blank_lines(body);
                if !example.is_empty() {
                    self.examples.push(example);
                }
            }
            "deprecated" => {
                let message = if inline.is_empty() {
                    "Deprecated".to_string()
                } else {
                    inline
                };
                self.deprecated = Some(message);
            }
            "see" => {
                if !inline.is_empty() {
                    self.see_also.push(inline);
                }
            }
            _ => {}
        }
    }

    /// Keep every populated field; take the rest from `other`
    pub fn fill_missing(mut self, other: Self) -> Self {
        if self.description.is_none() {
            self.description = other.description;
        }
        for (name, text) in other.params {
            if !self.params.iter().any(|(n, _)| *n == name) {
                self.params.push((name, text));
            }
        }
        if self.returns.is_none() {
            self.returns = other.returns;
        }
        if self.examples.is_empty() {
            self.examples = other.examples;
        }
        if self.deprecated.is_none() {
            self.deprecated = other.deprecated;
        }
        if self.see_also.is_empty() {
            self.see_also = other.see_also;
        }
        self
    }

    /// Merge into a definition, matching `@param` tags to parameters by name
    pub fn apply_to(self, definition: &mut TypeDefinition) {
        definition.description = self.description;
        definition.returns_doc = self.returns;
        definition.examples = self.examples;
        definition.see_also = self.see_also;
        if let Some(message) = self.deprecated {
            definition.deprecated = true;
            definition.deprecation_message = Some(message);
        }
        for parameter in &mut definition.parameters {
            parameter.description = self
                .params
                .iter()
                .find(|(name, _)| *name == parameter.name)
                .map(|(_, text)| text.clone())
                .filter(|text| !text.is_empty());
        }
    }
}

/// Climb from a declaration to the outermost `export`/`declare` wrapper
fn anchor(node: Node) -> Node {
    let mut current = node;
    if matches!(current.kind(), "variable_declarator") {
        if let Some(statement) = current.parent() {
            current = statement;
        }
    }
    while let Some(parent) = current.parent() {
        if WRAPPER_KINDS.contains(&parent.kind()) {
            current = parent;
        } else {
            break;
        }
    }
    current
}

/// Comment texts directly preceding `node`, in source order
fn leading_comments(node: Node, source: &str) -> Vec<String> {
    let mut comments = Vec::new();
    let mut current = node.prev_sibling();
    while let Some(sibling) = current {
        if sibling.kind() != "comment" || comments.len() >= 50 {
            break;
        }
        let comment = text(sibling, source);
        // Triple-slash directives head the file, they document nothing
        if comment.starts_with("/// <") {
            break;
        }
        // A comment on the line where the previous declaration ends belongs to it
        if sibling.prev_sibling().is_some_and(|prev| {
            prev.kind() != "comment" && prev.end_position().row == sibling.start_position().row
        }) {
            break;
        }
        comments.push(comment.to_string());
        current = sibling.prev_sibling();
    }
    comments.reverse();
    comments
}

/// Remove comment markers, keeping example indentation
fn strip_comment(comment: &str) -> Vec<String> {
    if let Some(line) = comment.strip_prefix("//") {
        return vec![line.trim().to_string()];
    }

    let inner = comment
        .trim_start_matches("/**")
        .trim_start_matches("/*")
        .trim_end_matches("*/");
    inner
        .lines()
        .map(|line| {
            let line = line.trim_start();
            match line.strip_prefix('*') {
                Some(rest) => rest.strip_prefix(' ').unwrap_or(rest).trim_end().to_string(),
                None => line.trim_end().to_string(),
            }
        })
        .collect()
}

/// `{Type} [name=default] - text` -> (name, text)
fn parse_param(body: &str) -> Option<(String, String)> {
    let rest = strip_type_braces(body);
    let (raw_name, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let name = raw_name
        .trim_start_matches('[')
        .split(['=', ']'])
        .next()
        .unwrap_or_default()
        .trim_start_matches("...")
        .to_string();
    if name.is_empty() {
        return None;
    }
    let text = text.trim().trim_start_matches('-').trim().to_string();
    Some((name, text))
}

/// Drop a leading `{Type}` expression, honoring nested braces
fn strip_type_braces(body: &str) -> &str {
    let body = body.trim();
    if !body.starts_with('{') {
        return body;
    }
    let mut depth = 0;
    for (i, c) in body.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return body[i + 1..].trim();
                }
            }
            _ => {}
        }
    }
    body
}

fn trim_blank_lines(lines: &[String]) -> String {
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}
