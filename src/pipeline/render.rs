//! Result rendering: the model's Markdown-flavoured text → HTML.
//!
//! Only the handful of constructs the analysis prompt asks for are turned
//! into markup: `###` subheadings, `**bold**`, `- ` list items, line breaks.
//! Everything else passes through as text.
//!
//! The model's output is untrusted, so the whole input is HTML-escaped
//! first and the substitutions run on the escaped text. None of the marker
//! sequences (`###`, `**`, `- `, newlines) contain characters that escaping
//! touches, so the rules see the same structure either way, and a stray
//! `<script>` in the answer comes out as inert text.
//!
//! ## Rule Order
//!
//! Subheadings consume the rest of their line before emphasis runs, so bold
//! text inside a heading still becomes `<strong>`. List items are matched on
//! line starts before newlines are replaced, and the final pass removes the
//! `<br />` that would otherwise sit between consecutive list items.

use once_cell::sync::Lazy;
use regex::Regex;

const H3_OPEN: &str =
    r#"<h3 class="text-xl font-semibold text-brand-accent mt-6 mb-3 border-b border-neutral-medium/70 pb-2">"#;
const STRONG_OPEN: &str = r#"<strong class="font-bold text-white">"#;
const LI_OPEN: &str = r#"<li class="ml-5 list-disc">"#;

/// Render analysis text to an HTML fragment. Pure: same input, same output.
///
/// Rules (applied in order, on HTML-escaped input):
/// 1. `### ` up to end of line → `<h3>`
/// 2. `**x**` → `<strong>`
/// 3. line starting with `- ` → `<li>`
/// 4. every line break → `<br />`
/// 5. `<br />` directly before `<li` removed
pub fn render(text: &str) -> String {
    let s = escape_html(text);
    let s = render_subheadings(&s);
    let s = render_strong(&s);
    let s = render_list_items(&s);
    let s = render_line_breaks(&s);
    join_list_items(&s)
}

/// Wrap [`render`] output in a minimal standalone HTML page.
pub fn render_document(text: &str, title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n</head>\n<body>\n<div class=\"prose prose-invert max-w-none\">\n{}\n</div>\n</body>\n</html>\n",
        escape_html(title),
        render(text)
    )
}

// ── Rule 0: Escape ───────────────────────────────────────────────────────────

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 8);
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

// ── Rule 1: Subheadings ──────────────────────────────────────────────────────

// `.` stops at `\n`; `\r` is excluded so CRLF input keeps its break.
static RE_H3: Lazy<Regex> = Lazy::new(|| Regex::new(r"### ([^\r\n]*)").unwrap());

fn render_subheadings(input: &str) -> String {
    RE_H3
        .replace_all(input, format!("{H3_OPEN}$1</h3>").as_str())
        .into_owned()
}

// ── Rule 2: Strong emphasis ──────────────────────────────────────────────────

static RE_STRONG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^\r\n]*?)\*\*").unwrap());

fn render_strong(input: &str) -> String {
    RE_STRONG
        .replace_all(input, format!("{STRONG_OPEN}$1</strong>").as_str())
        .into_owned()
}

// ── Rule 3: List items ───────────────────────────────────────────────────────

// `R`: a lone `\r` also starts a line, matching rule 4.
static RE_LI: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?mR)^- ([^\r\n]*)").unwrap());

fn render_list_items(input: &str) -> String {
    RE_LI
        .replace_all(input, format!("{LI_OPEN}$1</li>").as_str())
        .into_owned()
}

// ── Rule 4: Line breaks ──────────────────────────────────────────────────────

static RE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\n|\r").unwrap());

fn render_line_breaks(input: &str) -> String {
    RE_BREAK.replace_all(input, "<br />").into_owned()
}

// ── Rule 5: No break before a list item ─────────────────────────────────────

fn join_list_items(input: &str) -> String {
    input.replace("<br /><li", "<li")
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// render is a pure function of its input.
        #[test]
        fn render_is_deterministic(text in "(?s).{0,400}") {
            prop_assert_eq!(render(&text), render(&text));
        }

        /// No raw `<` from the input survives except in markup we emit.
        #[test]
        fn input_angle_brackets_never_survive(text in "[a-z<>/ \n*#-]{0,200}") {
            let out = render(&text);
            let stripped = out
                .replace(H3_OPEN, "")
                .replace("</h3>", "")
                .replace(STRONG_OPEN, "")
                .replace("</strong>", "")
                .replace(LI_OPEN, "")
                .replace("</li>", "")
                .replace("<br />", "");
            prop_assert!(!stripped.contains('<'));
            prop_assert!(!stripped.contains('>'));
        }

        /// Output never contains a line feed: every break became `<br />`.
        #[test]
        fn no_raw_newlines_remain(text in "(?s).{0,300}") {
            let out = render(&text);
            prop_assert!(!out.contains('\n'));
            prop_assert!(!out.contains('\r'));
        }
    }
}
