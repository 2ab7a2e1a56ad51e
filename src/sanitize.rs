//! Shared sanitize-then-render pipeline for user-supplied text.
//!
//! Free text (book descriptions, review text) is stored as plain text:
//! `clean` strips markup at write time. HTML is produced only at display
//! time by `render`, which escapes entities and converts newlines into
//! paragraph markup. Every handler that stores or displays user text goes
//! through these two functions.

use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)>").unwrap()
});
static HTML_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)</?[A-Za-z][^>]*>").unwrap());
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Strip markup from user input, keeping only plain text.
///
/// Script and style elements are removed together with their bodies; other
/// tags and comments are removed but their text content is kept. Runs of
/// blank lines collapse to a single paragraph break.
pub fn clean(input: &str) -> String {
    let stripped = SCRIPT_STYLE.replace_all(input, "");
    let stripped = HTML_COMMENT.replace_all(&stripped, "");
    let stripped = HTML_TAG.replace_all(&stripped, "");
    let collapsed = BLANK_LINES.replace_all(&stripped, "\n\n");
    collapsed.trim().to_string()
}

/// Render cleaned plain text as safe HTML.
///
/// Entities are escaped, blank lines become paragraph boundaries and single
/// newlines become `<br>`. Input is expected to have passed through `clean`
/// already, but escaping does not rely on that.
pub fn render(input: &str) -> String {
    let escaped = escape(input);
    let paragraphs: Vec<String> = escaped
        .split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .map(|p| format!("<p>{}</p>", p.trim().replace('\n', "<br>")))
        .collect();
    paragraphs.join("")
}

fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
