use crate::text::{
    syntax::Syntax,
    syntax_highlighter::{Highlights, SyntaxHighlighter},
};

pub struct Language {
    pub name: String,
    pub aliases: Vec<String>,
    pub extensions: Vec<String>,
    pub syntax: Syntax,
}

impl Language {
    pub fn new(name: String, aliases: Vec<String>, extensions: Vec<String>, syntax: Syntax) -> Self {
        Self {
            name,
            aliases,
            extensions,
            syntax,
        }
    }

    pub fn highlight<'a>(&'a self, text: &'a str) -> Highlights<'a> {
        SyntaxHighlighter::highlight(&self.syntax, text)
    }

    pub fn relevance(&self, text: &str) -> u32 {
        self.highlight(text).total_relevance()
    }

    // The name followed by the aliases, all of which can be used for lookups.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}
