//! Bounded-size text rendering for MCP tool responses
//!
//! Output degrades progressively as it grows:
//! - related type signatures are cut at `related_type_max_chars`
//! - past 60% of the budget: at most 3 related types and 2 overloads
//! - past 70% of the budget: at most 1 example
//!
//! Thresholds are checked before every list item, so a list that crosses one
//! midway stops there rather than running on to the hard cap.
//! - anything beyond the budget is cut off
//!
//! Every reduction says how many items were left out.

use augments_context::{ApiContextResponse, ApiSearchResult, SearchApisResponse};
use augments_core::ContextConfig;
use augments_declarations::{ApiSignature, Parameter};

/// Fraction of the budget after which lists are shortened
const REDUCE_LISTS_AT: f64 = 0.6;

/// Fraction of the budget after which only one example is kept
const REDUCE_EXAMPLES_AT: f64 = 0.7;

/// Fraction of the budget after which no further search results are rendered
const STOP_RESULTS_AT: f64 = 0.7;

const REDUCED_RELATED_TYPES: usize = 3;
const REDUCED_OVERLOADS: usize = 2;
const REDUCED_EXAMPLES: usize = 1;

const ELLIPSIS: &str = "...";
const CUT_MARKER: &str = "\n\n[output truncated]";

/// Size limits for rendered output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    pub max_chars: usize,
    pub related_type_max_chars: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::from_config(&ContextConfig::default())
    }
}

impl FormatOptions {
    pub fn from_config(config: &ContextConfig) -> Self {
        Self {
            max_chars: config.max_response_chars,
            related_type_max_chars: config.related_type_max_chars,
        }
    }
}

/// Output buffer that knows how much of its budget is used
struct Output {
    text: String,
    chars: usize,
    max_chars: usize,
}

impl Output {
    fn new(max_chars: usize) -> Self {
        Self {
            text: String::new(),
            chars: 0,
            max_chars,
        }
    }

    fn push(&mut self, s: &str) {
        self.chars += s.chars().count();
        self.text.push_str(s);
    }

    fn line(&mut self, s: &str) {
        self.push(s);
        self.push("\n");
    }

    fn past(&self, fraction: f64) -> bool {
        self.chars as f64 > self.max_chars as f64 * fraction
    }

    fn code_block(&mut self, language: &str, code: &str) {
        self.line(&format!("```{language}"));
        self.line(code.trim_end());
        self.line("```");
    }

    fn omitted(&mut self, count: usize, what: &str) {
        if count > 0 {
            self.line(&format!("_{count} more {what} omitted_"));
        }
    }

    /// Final text, cut to the budget
    fn finish(self) -> String {
        if self.chars <= self.max_chars {
            return self.text;
        }
        let marker_chars = CUT_MARKER.chars().count();
        let keep = self.max_chars.saturating_sub(marker_chars);
        let mut text: String = self.text.chars().take(keep).collect();
        if self.max_chars >= marker_chars {
            text.push_str(CUT_MARKER);
        }
        text
    }
}

/// `text` cut to `max` characters with an ellipsis
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max).collect();
    cut.push_str(ELLIPSIS);
    cut
}

/// Render items in order, stopping once `threshold` is passed
///
/// The first `reduced` items are always rendered. Returns how many were.
fn render_bounded<T>(
    out: &mut Output,
    items: &[T],
    threshold: f64,
    reduced: usize,
    mut render: impl FnMut(&mut Output, &T),
) -> usize {
    let mut shown = 0;
    for item in items {
        if shown >= reduced && out.past(threshold) {
            break;
        }
        render(out, item);
        shown += 1;
    }
    shown
}

/// Render a `get_api_context` response
pub fn format_api_context(response: &ApiContextResponse, options: &FormatOptions) -> String {
    let mut out = Output::new(options.max_chars);

    match &response.api {
        Some(api) => render_api(&mut out, response, api, options),
        None => {
            out.line(&format!("# No API found for \"{}\"", response.query));
            out.push("\n");
            if let (Some(package), Some(version)) = (&response.package_name, &response.version) {
                out.line(&format!("Package: {package}@{version}"));
                out.push("\n");
            }
        }
    }

    render_examples(&mut out, response);

    if !response.related_apis.is_empty() {
        out.line("## Similar APIs");
        for name in &response.related_apis {
            out.line(&format!("- `{name}`"));
        }
        out.push("\n");
    }

    if !response.notes.is_empty() {
        out.line("## Notes");
        for note in &response.notes {
            out.line(&format!("- {note}"));
        }
        out.push("\n");
    }

    if let Some(source) = &response.types_source {
        out.line(&format!("_Source: {source}_"));
    }

    out.finish()
}

fn render_api(
    out: &mut Output,
    response: &ApiContextResponse,
    api: &ApiSignature,
    options: &FormatOptions,
) {
    let package = match (&response.package_name, &response.version) {
        (Some(package), Some(version)) => format!(" ({package}@{version})"),
        _ => String::new(),
    };
    out.line(&format!("# {} [{}]{package}", api.name, api.kind));
    out.push("\n");
    out.code_block("typescript", &api.signature);
    out.push("\n");

    if api.deprecated {
        let message = api.deprecation_message.as_deref().unwrap_or("Deprecated");
        out.line(&format!("**Deprecated:** {message}"));
        out.push("\n");
    }

    if let Some(description) = &api.description {
        out.line(description);
        out.push("\n");
    }

    if !api.parameters.is_empty() {
        out.line("## Parameters");
        for parameter in &api.parameters {
            out.line(&parameter_line(parameter));
        }
        out.push("\n");
    }

    if let Some(return_type) = &api.return_type {
        out.line("## Returns");
        out.line(&format!("`{return_type}`"));
        out.push("\n");
    }

    if let Some(overloads) = api.overloads.as_ref().filter(|o| !o.is_empty()) {
        out.line("## Overloads");
        out.line("```typescript");
        let shown = render_bounded(out, overloads, REDUCE_LISTS_AT, REDUCED_OVERLOADS, |out, o| {
            out.line(o.trim_end())
        });
        out.line("```");
        out.omitted(overloads.len() - shown, "overloads");
        out.push("\n");
    }

    if !api.related_types.is_empty() {
        out.line("## Related Types");
        let shown = render_bounded(
            out,
            &api.related_types,
            REDUCE_LISTS_AT,
            REDUCED_RELATED_TYPES,
            |out, related| {
                out.code_block(
                    "typescript",
                    &truncate(&related.signature, options.related_type_max_chars),
                )
            },
        );
        out.omitted(api.related_types.len() - shown, "related types");
        out.push("\n");
    }

    if !api.see_also.is_empty() {
        out.line("## See Also");
        for link in &api.see_also {
            out.line(&format!("- {link}"));
        }
        out.push("\n");
    }
}

fn parameter_line(parameter: &Parameter) -> String {
    let rest = if parameter.rest { "..." } else { "" };
    let optional = if parameter.optional { "?" } else { "" };
    let mut line = format!("- `{rest}{}{optional}`", parameter.name);
    if !parameter.type_annotation.is_empty() {
        line.push_str(&format!(": `{}`", parameter.type_annotation));
    }
    if let Some(default) = &parameter.default_value {
        line.push_str(&format!(" (default `{default}`)"));
    }
    if let Some(description) = &parameter.description {
        line.push_str(&format!(" - {description}"));
    }
    line
}

/// Documentation examples first, then fetched ones
fn render_examples(out: &mut Output, response: &ApiContextResponse) {
    let documented = response.api.iter().flat_map(|api| api.examples.iter());
    let mut examples: Vec<(String, &str, &str)> = documented
        .map(|code| ("From the type documentation".to_string(), "typescript", code.as_str()))
        .collect();
    examples.extend(response.examples.iter().map(|example| {
        let title = example
            .context
            .clone()
            .unwrap_or_else(|| example.source.clone());
        (title, example.language.as_str(), example.code.as_str())
    }));
    if examples.is_empty() {
        return;
    }

    out.line("## Examples");
    let shown = render_bounded(
        out,
        &examples,
        REDUCE_EXAMPLES_AT,
        REDUCED_EXAMPLES,
        |out, (title, language, code)| {
            out.line(&format!("### {title}"));
            out.code_block(language, code);
        },
    );
    out.omitted(examples.len() - shown, "examples");
    out.push("\n");
}

/// Render a `search_apis` response
///
/// Results are rendered best first until 70% of the budget is used.
pub fn format_search_results(response: &SearchApisResponse, options: &FormatOptions) -> String {
    let mut out = Output::new(options.max_chars);

    out.line(&format!("# API search: \"{}\"", response.query));
    let searched = if response.frameworks_searched.is_empty() {
        "none".to_string()
    } else {
        response.frameworks_searched.join(", ")
    };
    out.line(&format!(
        "Searched: {searched} ({} found, showing {})",
        response.total_found,
        response.results.len()
    ));
    out.push("\n");

    if response.results.is_empty() {
        out.line("No matching APIs.");
        return out.finish();
    }

    for (rendered, result) in response.results.iter().enumerate() {
        if out.past(STOP_RESULTS_AT) {
            out.omitted(response.results.len() - rendered, "results");
            break;
        }
        render_search_result(&mut out, rendered + 1, result, options);
    }

    out.finish()
}

fn render_search_result(
    out: &mut Output,
    rank: usize,
    result: &ApiSearchResult,
    options: &FormatOptions,
) {
    let deprecated = if result.deprecated { " deprecated" } else { "" };
    out.line(&format!(
        "{rank}. `{}` [{}{deprecated}] {}@{} (score {})",
        result.name, result.kind, result.package_name, result.version, result.score
    ));
    out.code_block(
        "typescript",
        &truncate(&result.signature, options.related_type_max_chars),
    );
    if let Some(summary) = result
        .description
        .as_deref()
        .and_then(|d| d.lines().next())
    {
        out.line(summary);
    }
    out.push("\n");
}
