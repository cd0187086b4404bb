use crate::types::{DocumentOutline, OutlineEntry};

fn indent(entry: &OutlineEntry) -> String {
    "  ".repeat(entry.level.as_u8().saturating_sub(1) as usize)
}

/// Render the outline as indented text (2 spaces per level) with page numbers.
pub fn render_indented(outline: &[OutlineEntry]) -> String {
    outline
        .iter()
        .map(|entry| format!("{}{}  [page {}]", indent(entry), entry.text, entry.page))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the outline as a Markdown nested list.
pub fn render_list(outline: &[OutlineEntry]) -> String {
    outline
        .iter()
        .map(|entry| {
            format!(
                "{}* {} (p. {})",
                indent(entry),
                escape_markdown(&entry.text),
                entry.page
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a whole document: the title as a level-one heading followed by the
/// outline list.
pub fn render_document(doc: &DocumentOutline) -> String {
    let mut output = String::new();

    if !doc.title.is_empty() {
        output.push_str(&format!("# {}\n\n", escape_markdown(&doc.title)));
    }
    output.push_str(&render_list(&doc.outline));

    output.trim_end().to_string()
}

/// Escape Markdown special characters in text.
pub fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' | '#' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
