pub mod grapheme;
pub mod pattern;
pub mod syntax;
pub mod syntax_highlighter;
pub mod trie;

#[cfg(test)]
mod tests;
