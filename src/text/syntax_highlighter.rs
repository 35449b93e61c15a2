use std::{collections::VecDeque, fmt};

use serde::{Deserialize, Serialize};

use super::{
    grapheme,
    syntax::{Syntax, SyntaxRule},
};

#[derive(Deserialize, Serialize, PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub enum HighlightKind {
    Normal,
    Comment,
    Keyword,
    Symbol,
    String,
    Meta,
    Variable,
}

impl HighlightKind {
    pub fn class_name(&self) -> &'static str {
        match self {
            HighlightKind::Normal => "normal",
            HighlightKind::Comment => "comment",
            HighlightKind::Keyword => "keyword",
            HighlightKind::Symbol => "symbol",
            HighlightKind::String => "string",
            HighlightKind::Meta => "meta",
            HighlightKind::Variable => "variable",
        }
    }
}

impl fmt::Display for HighlightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

#[derive(Serialize, PartialEq, Eq, Clone, Copy, Debug)]
pub struct Highlight {
    pub start: usize,
    pub end: usize,
    pub kind: HighlightKind,
}

impl Highlight {
    pub fn new(start: usize, end: usize, kind: HighlightKind) -> Self {
        Self { start, end, kind }
    }

    pub fn text<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

// Collects highlights for one scan level, merging adjacent spans of the
// level's fill kind so unmatched text comes out as a single span.
struct HighlightRun {
    highlights: Vec<Highlight>,
    fill_kind: HighlightKind,
}

impl HighlightRun {
    fn new(fill_kind: HighlightKind) -> Self {
        Self {
            highlights: Vec::new(),
            fill_kind,
        }
    }

    fn fill(&mut self, start: usize, end: usize) {
        self.push(Highlight::new(start, end, self.fill_kind));
    }

    fn push(&mut self, highlight: Highlight) {
        if highlight.is_empty() {
            return;
        }

        if let Some(last_highlight) = self.highlights.last_mut() {
            if last_highlight.end == highlight.start
                && last_highlight.kind == self.fill_kind
                && highlight.kind == self.fill_kind
            {
                last_highlight.end = highlight.end;
                return;
            }
        }

        self.highlights.push(highlight);
    }
}

pub struct SyntaxHighlighter;

impl SyntaxHighlighter {
    pub fn highlight<'a>(syntax: &'a Syntax, text: &'a str) -> Highlights<'a> {
        Highlights {
            syntax,
            text,
            x: 0,
            pending: VecDeque::new(),
            relevance: 0,
        }
    }

    pub fn match_identifier(text: &str, start: usize) -> Option<usize> {
        if !grapheme::is_word(grapheme::at(start, text)) {
            return None;
        }

        let mut i = start;

        while i < text.len() && grapheme::is_word(grapheme::at(i, text)) {
            i = grapheme::next(i, text);
        }

        Some(i)
    }

    // Matches a rule at `start`, pushing its highlights and returning where
    // scanning continues along with the relevance gathered.
    fn match_rule(
        text: &str,
        start: usize,
        rule: &SyntaxRule,
        highlights: &mut Vec<Highlight>,
    ) -> Option<(usize, u32)> {
        let open_end = rule.start.match_text(text, start)?;

        if open_end <= start {
            return None;
        }

        let kind = rule.kind.unwrap_or(HighlightKind::Normal);

        let Some(end_pattern) = &rule.end else {
            highlights.push(Highlight::new(start, open_end, kind));

            return Some((open_end, rule.relevance));
        };

        let mut run = HighlightRun::new(kind);
        let mut relevance = rule.relevance;
        let mut run_start = start;
        let mut i = open_end;

        'range: while i < text.len() {
            let current = grapheme::at(i, text);

            if rule.escape.is_some_and(|escape| grapheme::is_char(current, escape)) {
                i = grapheme::next(i, text);

                if i < text.len() && (rule.multiline || !grapheme::is_line_end(i, text)) {
                    i = grapheme::next(i, text);
                }

                continue;
            }

            if let Some(end) = end_pattern.match_text(text, i) {
                i = end.max(i);
                break;
            }

            if !rule.multiline && grapheme::is_line_end(i, text) {
                break;
            }

            for nested_rule in &rule.rules {
                let mut nested_highlights = Vec::new();

                let Some((nested_end, nested_relevance)) =
                    Self::match_rule(text, i, nested_rule, &mut nested_highlights)
                else {
                    continue;
                };

                run.fill(run_start, i);

                for highlight in nested_highlights {
                    run.push(highlight);
                }

                relevance += nested_relevance;
                run_start = nested_end;
                i = nested_end;

                continue 'range;
            }

            i = grapheme::next(i, text);
        }

        run.fill(run_start, i);
        highlights.extend(run.highlights);

        Some((i, relevance))
    }
}

// Lazily produced, covering and non-overlapping highlights for a text.
pub struct Highlights<'a> {
    syntax: &'a Syntax,
    text: &'a str,
    x: usize,
    pending: VecDeque<Highlight>,
    relevance: u32,
}

impl Highlights<'_> {
    pub fn relevance(&self) -> u32 {
        self.relevance
    }

    // Relevance of the whole text, consuming the remaining highlights.
    pub fn total_relevance(mut self) -> u32 {
        while self.next().is_some() {}

        self.relevance
    }

    fn match_at(&mut self, x: usize, highlights: &mut Vec<Highlight>) -> Result<usize, usize> {
        let syntax = self.syntax;
        let mut default_end = grapheme::next(x, self.text);

        if !grapheme::is_whitespace(grapheme::at(x, self.text)) {
            if let Some(identifier_end) = SyntaxHighlighter::match_identifier(self.text, x) {
                if let Some(keyword_end) = syntax.keywords.longest_match(self.text, x) {
                    highlights.push(Highlight::new(x, keyword_end, HighlightKind::Keyword));
                    self.relevance += 1;

                    return Ok(keyword_end);
                }

                default_end = identifier_end;
            }

            for rule in &syntax.rules {
                if let Some((end, relevance)) =
                    SyntaxHighlighter::match_rule(self.text, x, rule, highlights)
                {
                    self.relevance += relevance;

                    return Ok(end);
                }
            }
        }

        Err(default_end)
    }

    fn advance(&mut self) {
        let plain_start = self.x;
        let mut highlights = Vec::new();

        while self.x < self.text.len() {
            match self.match_at(self.x, &mut highlights) {
                Ok(end) => {
                    self.push_pending(Highlight::new(plain_start, self.x, HighlightKind::Normal));

                    for highlight in highlights {
                        self.push_pending(highlight);
                    }

                    self.x = end;

                    return;
                }
                Err(default_end) => self.x = default_end,
            }
        }

        self.push_pending(Highlight::new(plain_start, self.x, HighlightKind::Normal));
    }

    fn push_pending(&mut self, highlight: Highlight) {
        if highlight.is_empty() {
            return;
        }

        if let Some(last_highlight) = self.pending.back_mut() {
            if last_highlight.end == highlight.start
                && last_highlight.kind == HighlightKind::Normal
                && highlight.kind == HighlightKind::Normal
            {
                last_highlight.end = highlight.end;
                return;
            }
        }

        self.pending.push_back(highlight);
    }
}

impl Iterator for Highlights<'_> {
    type Item = Highlight;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pending.is_empty() && self.x < self.text.len() {
            self.advance();
        }

        self.pending.pop_front()
    }
}
