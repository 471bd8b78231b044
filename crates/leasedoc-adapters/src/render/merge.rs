//! Merge-field rendering for text templates.
//!
//! Text templates carry both their source markup (`contents`) and a
//! rendered HTML form (`html`). The editor that produces the markup may
//! embed `{{field}}` placeholders (tenant name, property address, …); this
//! module fills them in and produces the HTML payload field.
//!
//! The substitution is a simple linear scan-and-replace. Placeholders with
//! no matching field are left as-is so a half-filled document is visibly
//! half-filled rather than silently blanked.

use std::collections::HashMap;

/// Named values available to `{{field}}` placeholders.
#[derive(Debug, Clone, Default)]
pub struct MergeFields {
    fields: HashMap<String, String>,
}

impl MergeFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, consuming self for fluent construction.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|s| s.as_str())
    }

    /// Replace every `{{field}}` placeholder that has a value.
    pub fn render(&self, contents: &str) -> String {
        let mut result = contents.to_string();
        for (key, value) in &self.fields {
            let placeholder = format!("{{{{{key}}}}}");
            result = result.replace(&placeholder, value);
        }
        result
    }
}

/// Render template contents to the HTML payload field.
///
/// Merge fields are substituted first, then the text is HTML-escaped and
/// each non-empty line becomes a paragraph.
pub fn render_html(contents: &str, fields: &MergeFields) -> String {
    let merged = fields.render(contents);

    merged
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("<p>{}</p>", escape(line)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Minimal HTML escaping for text content.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
