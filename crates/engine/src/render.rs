//! Markdown and org-mode rendering of a [`Summary`].
//!
//! Rendering is total: every summary renders, and absent notes or timestamps
//! simply leave their slot out of the line.

use crate::model::Dialect;
use crate::summary::{Entry, Summary};
use crate::timestamp::format_timestamp;

pub const CHANGES_TITLE: &str = "Changes";

fn escape_brackets(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '[' | ']') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn escape_markdown_target(target: &str) -> String {
    if target
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '<' | '>'))
    {
        let inner = target.replace('<', "\\<").replace('>', "\\>");
        format!("<{inner}>")
    } else {
        target.to_string()
    }
}

/// Link to `path` in the given dialect.
pub fn link(path: &str, dialect: Dialect) -> String {
    match dialect {
        Dialect::Markdown => format!(
            "[{}]({})",
            escape_brackets(path),
            escape_markdown_target(path)
        ),
        Dialect::Org => {
            let escaped = escape_brackets(path);
            format!("[[{escaped}][{escaped}]]")
        }
    }
}

fn render_entry(entry: &Entry, dialect: Dialect) -> String {
    let mut line = format!("- {}", link(&entry.path, dialect));
    if !entry.text.is_empty() {
        line.push(' ');
        line.push_str(&entry.text);
    }
    if let Some(updated) = entry.updated {
        line.push(' ');
        line.push_str(&format_timestamp(updated));
    }
    line
}

fn render_section(title: &str, entries: &[Entry], dialect: Dialect) -> String {
    let lines: Vec<String> = entries.iter().map(|e| render_entry(e, dialect)).collect();
    format!("{} {title}\n\n{}", dialect.heading(), lines.join("\n"))
}

/// Render the summary as text in its dialect.
pub fn render(summary: &Summary) -> String {
    let dialect = summary.dialect;
    let mut blocks = Vec::new();

    if !summary.changes.is_empty() {
        let entries: Vec<Entry> = summary.changes.iter().map(|c| c.entry()).collect();
        blocks.push(render_section(CHANGES_TITLE, &entries, dialect));
    }
    for section in &summary.sections {
        if section.entries.is_empty() {
            continue;
        }
        blocks.push(render_section(
            section.category.as_str(),
            &section.entries,
            dialect,
        ));
    }
    if let Some(extra) = summary.extra_text.as_deref() {
        blocks.push(extra.trim_end().to_string());
    }

    if blocks.is_empty() {
        return String::new();
    }
    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}
