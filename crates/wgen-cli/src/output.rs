//! Run-summary rendering in the requested output format.

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Render a serializable response to a string.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => render_table(value),
    }
}

/// Key/value table for flat summary objects; scalars render bare.
fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    let Value::Object(map) = value else {
        return Ok(value_to_cell(&value));
    };

    let mut entries: Vec<(String, String)> = map
        .into_iter()
        .map(|(key, value)| (key, value_to_cell(&value)))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let key_width = entries
        .iter()
        .map(|(key, _)| key.len())
        .max()
        .unwrap_or(0)
        .max(3);
    let max_width = ui::prefs().term_width;

    let mut lines = Vec::with_capacity(entries.len() + 2);
    lines.push(format!("{:<key_width$}  value", "key"));
    lines.push("-".repeat(key_width + 7));
    for (key, cell) in entries {
        let mut line = format!("{key:<key_width$}  {cell}");
        if let Some(max_width) = max_width {
            line = truncate_line(&line, max_width);
        }
        lines.push(line);
    }

    Ok(lines.join("\n"))
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

fn truncate_line(line: &str, max_width: usize) -> String {
    if line.chars().count() <= max_width {
        return line.to_string();
    }
    let mut out: String = line.chars().take(max_width.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Summary {
        processed: u32,
        skipped: u32,
        output_dir: &'static str,
    }

    fn summary() -> Summary {
        Summary {
            processed: 12,
            skipped: 2,
            output_dir: "output",
        }
    }

    #[test]
    fn json_render_is_valid_pretty_json() {
        let out = render(&summary(), OutputFormat::Json).expect("render");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("parse");
        assert_eq!(parsed["processed"], 12);
        assert!(out.contains('\n'));
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&summary(), OutputFormat::Raw).expect("render");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("parse");
        assert_eq!(parsed["skipped"], 2);
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_lists_sorted_keys() {
        let out = render(&summary(), OutputFormat::Table).expect("render");
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("key"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].starts_with("output_dir"));
        assert!(lines[3].starts_with("processed"));
        assert!(lines[4].starts_with("skipped"));
    }
}
