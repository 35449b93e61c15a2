use std::{
    fs::read_to_string,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use gherkin_highlight::{
    config::{language::Language, Config, ConfigError},
    host::Host,
    render,
};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unable to read input: {0}")]
    Input(#[from] io::Error),
    #[error("unable to write json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown language \"{0}\"")]
    UnknownLanguage(String),
    #[error("unable to detect the language, pass one with --lang")]
    UndetectedLanguage,
}

fn build_cli() -> Command {
    Command::new("gherkin-highlight")
        .about("Highlights Gherkin feature files for terminals and slide decks")
        .arg(
            Arg::new("source_path")
                .value_name("SOURCE")
                .value_parser(value_parser!(PathBuf))
                .help("File to highlight, reads stdin when omitted"),
        )
        .arg(
            Arg::new("lang")
                .short('l')
                .long("lang")
                .value_name("LANG")
                .help("Language name or alias (inferred from the extension if not specified)"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .default_value("ansi")
                .value_parser(["ansi", "html", "json", "spans"])
                .help("Output format"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Config directory containing config.toml and languages/"),
        )
        .arg(
            Arg::new("badge")
                .long("badge")
                .action(ArgAction::SetTrue)
                .help("Append the copy badge script to html output"),
        )
}

fn main() -> ExitCode {
    env_logger::init();

    let matches = build_cli().get_matches();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(dir) => Config::load(dir)?,
        None => Config::default(),
    };

    let host = Host::init(config)?;
    let source_path = matches.get_one::<PathBuf>("source_path");

    let text = match source_path {
        Some(path) => read_to_string(path)?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    let language = find_language(&host, matches.get_one::<String>("lang"), source_path, &text)?;

    log::debug!("highlighting as \"{}\"", language.name);

    let highlights = language.highlight(&text);

    let output = match matches.get_one::<String>("format").map(String::as_str) {
        Some("html") => {
            let mut output = render::html_block(language, &text, highlights);

            if matches.get_flag("badge") {
                output.push_str(&render::badge_script(&host.badge)?);
            }

            output
        }
        Some("json") => render::json(&text, highlights)? + "\n",
        Some("spans") => render::listing(&text, highlights),
        _ => render::ansi(&text, highlights, &host.theme),
    };

    print!("{output}");

    Ok(())
}

fn find_language<'a>(
    host: &'a Host,
    lang: Option<&String>,
    source_path: Option<&PathBuf>,
    text: &str,
) -> Result<&'a Language, CliError> {
    if let Some(lang) = lang {
        return host
            .registry
            .get(lang)
            .ok_or_else(|| CliError::UnknownLanguage(lang.clone()));
    }

    source_path
        .and_then(|path| host.registry.get_for_path(path))
        .or_else(|| host.registry.detect(text))
        .ok_or(CliError::UndetectedLanguage)
}
