pub mod badge;
pub mod language;
pub mod theme;

use std::{
    fs::{read_dir, read_to_string},
    io,
    path::{Path, PathBuf},
};

use badge::BadgeOptions;
use language::Language;
use serde::Deserialize;
use theme::Theme;
use thiserror::Error;

use crate::text::syntax::{Syntax, SyntaxRule};

const CONFIG_FILE: &str = "config.toml";
const LANGUAGES_DIR: &str = "languages";
const LANGUAGE_EXTENSION: &str = "toml";
const GHERKIN_FILE: &str = "gherkin";
const GHERKIN_LANGUAGE: &str = include_str!("../config/languages/gherkin.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to open \"{}\": {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("unable to load \"{file}\": {source}")]
    Load {
        file: String,
        source: basic_toml::Error,
    },
    #[error("invalid syntax in \"{file}\": {reason}")]
    InvalidSyntax { file: String, reason: &'static str },
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct SyntaxDesc {
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    rules: Vec<SyntaxRule>,
}

impl SyntaxDesc {
    fn syntax(self) -> Result<Syntax, &'static str> {
        let keywords: Vec<&str> = self.keywords.iter().map(String::as_str).collect();

        Syntax::new(&keywords, self.rules)
    }
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct LanguageDesc {
    name: String,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    extensions: Vec<String>,
    syntax: SyntaxDesc,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct ConfigDesc {
    #[serde(default)]
    badge: BadgeOptions,
    #[serde(default)]
    theme: Theme,
}

pub struct Config {
    pub badge: BadgeOptions,
    pub theme: Theme,
    pub languages: Vec<Language>,
}

impl Config {
    pub fn load(dir: &Path) -> Result<Config, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        let config_desc_string = Self::load_file_string(&path)?;
        let config_desc: ConfigDesc = Self::load_file_data(&path, &config_desc_string)?;

        let languages = Self::load_languages(&dir.join(LANGUAGES_DIR))?;

        log::debug!(
            "loaded config from \"{}\" with {} language(s)",
            dir.display(),
            languages.len()
        );

        Ok(Config {
            badge: config_desc.badge,
            theme: config_desc.theme,
            languages,
        })
    }

    pub fn builtin_languages() -> Result<Vec<Language>, ConfigError> {
        Ok(vec![Self::parse_language(GHERKIN_FILE, GHERKIN_LANGUAGE)?])
    }

    pub fn parse_language(file: &str, string: &str) -> Result<Language, ConfigError> {
        let language_desc: LanguageDesc =
            basic_toml::from_str(string).map_err(|source| ConfigError::Load {
                file: file.to_owned(),
                source,
            })?;

        let syntax =
            language_desc
                .syntax
                .syntax()
                .map_err(|reason| ConfigError::InvalidSyntax {
                    file: file.to_owned(),
                    reason,
                })?;

        Ok(Language::new(
            language_desc.name,
            language_desc.aliases,
            language_desc.extensions,
            syntax,
        ))
    }

    // A missing languages directory just means there are no user languages.
    fn load_languages(dir: &Path) -> Result<Vec<Language>, ConfigError> {
        let Ok(entries) = read_dir(dir) else {
            return Ok(Vec::new());
        };

        let mut paths = Vec::new();

        for entry in entries {
            let Ok(entry) = entry else {
                continue;
            };

            let path = entry.path();

            if path.extension().and_then(|extension| extension.to_str())
                != Some(LANGUAGE_EXTENSION)
            {
                log::warn!("skipping \"{}\", not a language file", path.display());
                continue;
            }

            paths.push(path);
        }

        paths.sort();

        let mut languages = Vec::new();

        for path in paths {
            let language_desc_string = Self::load_file_string(&path)?;
            let language = Self::parse_language(&Self::file_name(&path), &language_desc_string)?;

            log::debug!("loaded language \"{}\" from \"{}\"", language.name, path.display());

            languages.push(language);
        }

        Ok(languages)
    }

    fn load_file_string(path: &Path) -> Result<String, ConfigError> {
        read_to_string(path).map_err(|source| ConfigError::Open {
            path: path.to_owned(),
            source,
        })
    }

    fn load_file_data<'a, T: Deserialize<'a> + 'a>(
        path: &Path,
        string: &'a str,
    ) -> Result<T, ConfigError> {
        basic_toml::from_str::<T>(string).map_err(|source| ConfigError::Load {
            file: Self::file_name(path),
            source,
        })
    }

    fn file_name(path: &Path) -> String {
        path.file_stem()
            .and_then(|file_name| file_name.to_str())
            .unwrap_or_default()
            .to_owned()
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_desc = ConfigDesc::default();

        Self {
            badge: config_desc.badge,
            theme: config_desc.theme,
            languages: Vec::new(),
        }
    }
}
