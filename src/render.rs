use std::fmt::Write;

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::{
    config::{badge::BadgeOptions, language::Language, theme::Theme},
    text::syntax_highlighter::{Highlight, HighlightKind},
};

const HIGHLIGHT_CLASS_PREFIX: &str = "hljs-";
const SGR_RESET: &str = "\x1b[0m";

// A highlight resolved against its text, with a 1-based line and display
// column for its start.
#[derive(Serialize, PartialEq, Eq, Debug)]
pub struct Span<'a> {
    pub kind: HighlightKind,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
    pub text: &'a str,
}

struct PositionTracker<'a> {
    text: &'a str,
    offset: usize,
    line: usize,
    line_start: usize,
}

impl<'a> PositionTracker<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            line: 1,
            line_start: 0,
        }
    }

    // Offsets must be visited in increasing order.
    fn position(&mut self, offset: usize) -> (usize, usize) {
        for (i, c) in self.text[self.offset..offset].char_indices() {
            if c == '\n' {
                self.line += 1;
                self.line_start = self.offset + i + 1;
            }
        }

        self.offset = offset;

        let column = self.text[self.line_start..offset].width() + 1;

        (self.line, column)
    }
}

pub fn spans<'a>(text: &'a str, highlights: impl IntoIterator<Item = Highlight>) -> Vec<Span<'a>> {
    let mut tracker = PositionTracker::new(text);

    highlights
        .into_iter()
        .map(|highlight| {
            let (line, column) = tracker.position(highlight.start);

            Span {
                kind: highlight.kind,
                start: highlight.start,
                end: highlight.end,
                line,
                column,
                text: highlight.text(text),
            }
        })
        .collect()
}

// One line per span: `line:column kind "text"`.
pub fn listing(text: &str, highlights: impl IntoIterator<Item = Highlight>) -> String {
    let mut output = String::new();

    for span in spans(text, highlights) {
        let _ = writeln!(
            output,
            "{}:{} {} {:?}",
            span.line, span.column, span.kind, span.text
        );
    }

    output
}

pub fn json(
    text: &str,
    highlights: impl IntoIterator<Item = Highlight>,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&spans(text, highlights))
}

pub fn ansi(text: &str, highlights: impl IntoIterator<Item = Highlight>, theme: &Theme) -> String {
    let mut output = String::with_capacity(text.len());

    for highlight in highlights {
        let span_text = highlight.text(text);

        match theme.highlight_kind_to_color(highlight.kind) {
            Some(color) => {
                let _ = write!(output, "\x1b[{}m{}{}", color.sgr_code(), span_text, SGR_RESET);
            }
            None => output.push_str(span_text),
        }
    }

    output
}

pub fn html(text: &str, highlights: impl IntoIterator<Item = Highlight>) -> String {
    let mut output = String::with_capacity(text.len());

    for highlight in highlights {
        let span_text = highlight.text(text);

        if highlight.kind == HighlightKind::Normal {
            escape_html(span_text, &mut output);
            continue;
        }

        let _ = write!(
            output,
            "<span class=\"{}{}\">",
            HIGHLIGHT_CLASS_PREFIX,
            highlight.kind.class_name()
        );
        escape_html(span_text, &mut output);
        output.push_str("</span>");
    }

    output
}

pub fn html_block(
    language: &Language,
    text: &str,
    highlights: impl IntoIterator<Item = Highlight>,
) -> String {
    let mut output = String::new();

    output.push_str("<pre><code class=\"hljs language-");
    escape_html(&language.name, &mut output);
    output.push_str("\">");
    output.push_str(&html(text, highlights));
    output.push_str("</code></pre>\n");

    output
}

// Installs the copy badges once the document has loaded.
pub fn badge_script(options: &BadgeOptions) -> serde_json::Result<String> {
    let options = serde_json::to_string(options)?;

    Ok(format!(
        "<script>\n\
         document.addEventListener('DOMContentLoaded', () => {{\n\
         \x20 setTimeout(() => highlightJsBadge({options}));\n\
         }});\n\
         </script>\n"
    ))
}

fn escape_html(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(c),
        }
    }
}
