//! Notebook post-processing.
//!
//! After conversion, description cells get markdown headers and each eligible
//! function gets a "Try This" exercise cell plus an empty scratch cell.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context as _, Result, bail};
use regex::Regex;
use serde::Serialize;
use serde_json::{Value, json};

/// Matches a function definition and captures its name.
const FN_DEF: &str = r"(?m)^\s*(?:pub(?:\([^)]*\))?\s+)?fn\s+([A-Za-z_][A-Za-z0-9_]*)\s*[(<]";

/// Function-name prefixes that never get an exercise.
const SKIPPED_PREFIXES: &[&str] = &["on_", "get_", "have_"];

/// Options for [`enhance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnhanceOptions {
    /// Add "Try This" exercise cells.
    pub exercises: bool,
}

/// What [`enhance`] changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnhanceSummary {
    pub formatted_descriptions: usize,
    pub exercises: Vec<String>,
}

/// Enhance the notebook at `path` in place.
pub fn enhance_notebook(path: &Path, options: EnhanceOptions) -> Result<EnhanceSummary> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut notebook: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid notebook JSON", path.display()))?;

    let summary = enhance(&mut notebook, options)?;

    std::fs::write(path, to_notebook_json(&notebook)?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(summary)
}

/// Enhance a parsed notebook.
pub fn enhance(notebook: &mut Value, options: EnhanceOptions) -> Result<EnhanceSummary> {
    let Some(cells) = notebook.get_mut("cells").and_then(Value::as_array_mut) else {
        bail!("notebook has no cells array");
    };

    let fn_def = Regex::new(FN_DEF)?;
    let mut summary = EnhanceSummary::default();
    let mut seen = HashSet::new();
    let mut enhanced = Vec::with_capacity(cells.len());

    for mut cell in cells.drain(..) {
        let kind = cell
            .get("cell_type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        match kind.as_str() {
            "markdown" => {
                let source = cell_source(&cell);
                if source.contains("Shows:") || source.to_lowercase().contains("demonstrates") {
                    cell["source"] = to_source_lines(&format_description(&source));
                    summary.formatted_descriptions += 1;
                }
                enhanced.push(cell);
            }
            "code" if options.exercises => {
                let source = cell_source(&cell);
                let function = defined_functions(&fn_def, &source)
                    .into_iter()
                    .find(|name| should_add_exercise(name) && !seen.contains(name));
                enhanced.push(cell);
                if let Some(name) = function {
                    enhanced.push(markdown_cell(exercise_for(&name, &source)));
                    enhanced.push(scratch_cell());
                    seen.insert(name.clone());
                    summary.exercises.push(name);
                }
            }
            _ => enhanced.push(cell),
        }
    }

    *cells = enhanced;
    Ok(summary)
}

/// Names of functions defined in `source`, in order.
pub fn defined_functions(fn_def: &Regex, source: &str) -> Vec<String> {
    fn_def
        .captures_iter(source)
        .map(|c| c[1].to_string())
        .collect()
}

/// Whether a function gets an exercise cell.
pub fn should_add_exercise(name: &str) -> bool {
    name != "main" && name != "new" && !SKIPPED_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// Reformat a description cell: short lines ending in `:` become bold headers.
pub fn format_description(text: &str) -> String {
    text.trim()
        .lines()
        .map(|line| {
            let line = line.trim();
            if line.ends_with(':') && line.split_whitespace().count() <= 2 {
                format!("**{}**", line)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// "Try This" suggestions tailored to what the cell does.
pub fn exercise_for(function: &str, source: &str) -> Vec<String> {
    let mut suggestions = Vec::new();

    if source.contains("get_api_key") || source.contains(".api_key(") {
        suggestions.push(
            "Comment out the key in `.env` and observe the configuration error naming the variable",
        );
    }
    if source.contains("get_model_name") || source.contains(".model(") {
        suggestions.push(
            "Set `EADLANGCHAIN_AI_<PROVIDER>_MODEL` to another model and compare the resolved name",
        );
    }
    if source.contains("setup_logging") {
        suggestions.push("Switch the level between `DEBUG` and `ERROR` and compare what is printed");
    }
    if source.contains("get_logger") || source.contains("tracing::") {
        suggestions.push(
            "Add `#[tracing::instrument]` to another function and watch the function segment of the log line",
        );
    }
    if source.contains(".require(") {
        suggestions.push("Require an additional provider and see where startup fails");
    }
    if suggestions.is_empty() {
        suggestions.push("Change the code above and re-run the cell");
    }

    let mut lines = vec![
        "### Try This\n".to_string(),
        "\n".to_string(),
        format!("Experiment with `{}`:\n", function),
    ];
    lines.extend(
        suggestions
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}. {}\n", i + 1, s)),
    );
    lines
}

/// Cell source as one string; nbformat allows a string or a list of lines.
fn cell_source(cell: &Value) -> String {
    match cell.get("source") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(lines)) => lines.iter().filter_map(Value::as_str).collect(),
        _ => String::new(),
    }
}

/// Split text into nbformat source lines, keeping newlines on all but the last.
fn to_source_lines(text: &str) -> Value {
    let lines: Vec<&str> = text.split('\n').collect();
    let last = lines.len().saturating_sub(1);
    Value::Array(
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                if i < last {
                    Value::String(format!("{}\n", line))
                } else {
                    Value::String(line.to_string())
                }
            })
            .collect(),
    )
}

fn markdown_cell(lines: Vec<String>) -> Value {
    json!({
        "cell_type": "markdown",
        "metadata": {},
        "source": lines,
    })
}

fn scratch_cell() -> Value {
    json!({
        "cell_type": "code",
        "metadata": {},
        "source": ["// Your experiments here\n"],
        "outputs": [],
        "execution_count": null,
    })
}

/// Serialize with one-space indentation, as Jupyter writes notebooks.
fn to_notebook_json(notebook: &Value) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    notebook.serialize(&mut serializer)?;
    out.push(b'\n');
    Ok(out)
}
