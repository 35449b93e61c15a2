use serde::Deserialize;

use super::{pattern::Pattern, syntax_highlighter::HighlightKind, trie::Trie};

const DEFAULT_RELEVANCE: fn() -> u32 = || 1;

// A rule without an end pattern highlights exactly what its start pattern
// matches. A rule with an end pattern opens a range that is closed by the
// end pattern, an unescaped line end (unless multiline), or the end of text.
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct SyntaxRule {
    #[serde(default)]
    pub kind: Option<HighlightKind>,
    pub start: Pattern,
    #[serde(default)]
    pub end: Option<Pattern>,
    #[serde(default)]
    pub escape: Option<char>,
    #[serde(default)]
    pub multiline: bool,
    #[serde(default = "DEFAULT_RELEVANCE")]
    pub relevance: u32,
    #[serde(default)]
    pub rules: Vec<SyntaxRule>,
}

impl SyntaxRule {
    pub fn is_range(&self) -> bool {
        self.end.is_some()
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.is_range() && !self.rules.is_empty() {
            return Err("nested rules require an end pattern");
        }

        if !self.is_range() && self.escape.is_some() {
            return Err("an escape character requires an end pattern");
        }

        for rule in &self.rules {
            rule.validate()?;
        }

        Ok(())
    }
}

pub struct Syntax {
    pub keywords: Trie,
    pub rules: Vec<SyntaxRule>,
}

impl Syntax {
    pub fn new(keywords: &[&str], rules: Vec<SyntaxRule>) -> Result<Self, &'static str> {
        let mut keyword_trie = Trie::new();

        for keyword in keywords {
            keyword_trie.insert(keyword);
        }

        for rule in &rules {
            rule.validate()?;
        }

        Ok(Self {
            keywords: keyword_trie,
            rules,
        })
    }
}
