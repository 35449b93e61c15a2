use crate::{
    config::{badge::BadgeOptions, theme::Theme, Config, ConfigError},
    registry::Registry,
};

// Everything the highlighter needs once the page or command is ready to
// render: the registered grammars plus how highlighted blocks are decorated.
pub struct Host {
    pub registry: Registry,
    pub badge: BadgeOptions,
    pub theme: Theme,
}

impl Host {
    pub fn init(config: Config) -> Result<Self, ConfigError> {
        let mut registry = Registry::with_builtin()?;

        for language in config.languages {
            registry.register(language);
        }

        log::info!(
            "highlighter ready with {} language(s)",
            registry.languages().len()
        );

        Ok(Self {
            registry,
            badge: config.badge,
            theme: config.theme,
        })
    }
}
