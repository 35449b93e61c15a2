use std::{collections::HashMap, path::Path};

use crate::config::{language::Language, Config, ConfigError};

// Grammars registered by value, looked up by name, alias or file extension.
pub struct Registry {
    languages: Vec<Language>,
    name_languages: HashMap<String, usize>,
    extension_languages: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            languages: Vec::new(),
            name_languages: HashMap::new(),
            extension_languages: HashMap::new(),
        }
    }

    pub fn with_builtin() -> Result<Self, ConfigError> {
        let mut registry = Self::new();

        for language in Config::builtin_languages()? {
            registry.register(language);
        }

        Ok(registry)
    }

    pub fn register(&mut self, language: Language) -> usize {
        let index = self.languages.len();

        for name in language.names() {
            let Some(previous) = self.name_languages.insert(name.to_lowercase(), index) else {
                continue;
            };

            if previous != index {
                log::warn!(
                    "\"{}\" now refers to \"{}\" instead of \"{}\"",
                    name,
                    language.name,
                    self.languages[previous].name
                );
            }
        }

        for extension in &language.extensions {
            self.extension_languages
                .insert(extension.to_lowercase(), index);
        }

        log::debug!(
            "registered language \"{}\" with aliases {:?}",
            language.name,
            language.aliases
        );

        self.languages.push(language);

        index
    }

    pub fn get(&self, name: &str) -> Option<&Language> {
        self.name_languages
            .get(&name.to_lowercase())
            .and_then(|index| self.languages.get(*index))
    }

    pub fn get_for_extension(&self, extension: &str) -> Option<&Language> {
        self.extension_languages
            .get(&extension.to_lowercase())
            .and_then(|index| self.languages.get(*index))
    }

    pub fn get_for_path(&self, path: &Path) -> Option<&Language> {
        path.extension()
            .and_then(|extension| extension.to_str())
            .and_then(|extension| self.get_for_extension(extension))
    }

    // Picks the language whose rules match the text best, earlier
    // registrations win ties and nothing is returned if nothing matched.
    pub fn detect(&self, text: &str) -> Option<&Language> {
        let mut best: Option<(&Language, u32)> = None;

        for language in &self.languages {
            let relevance = language.relevance(text);

            log::trace!("\"{}\" relevance: {}", language.name, relevance);

            if relevance > 0 && best.map_or(true, |(_, best_relevance)| relevance > best_relevance) {
                best = Some((language, relevance));
            }
        }

        best.map(|(language, _)| language)
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
