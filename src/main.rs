//! mindline - Terminal Timeline of Theories of Consciousness
//!
//! Browse the built-in catalog, or your own, filtered by keyword and category.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use mindline::catalog::{builtin::builtin_catalog, load_catalog, Catalog};
use mindline::config::{self, Config, Overrides};
use mindline::render::ui::{TerminalUI, ThemeName};
use mindline::timeline::ALL_CATEGORIES;
use mindline::{Application, TimelineModel};
use std::io::{self, Write};
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("mindline")
        .version(mindline::VERSION)
        .about("A terminal timeline of theories of consciousness")
        .long_about(
            "mindline shows an interactive timeline of theories of consciousness, \
             grouped into historical eras, with live keyword search and category filters.",
        )
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .value_name("PATH")
                .help("Catalog TOML file to show instead of the built-in one"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Configuration file (default: <config dir>/mindline/config.toml)"),
        )
        .arg(
            Arg::new("category")
                .long("category")
                .value_name("NAME")
                .help("Only show theories in this category"),
        )
        .arg(
            Arg::new("search")
                .long("search")
                .value_name("TEXT")
                .help("Initial search text"),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .value_name("THEME")
                .value_parser(ThemeName::VARIANTS)
                .help("Color theme"),
        )
        .arg(
            Arg::new("plain")
                .long("plain")
                .action(ArgAction::SetTrue)
                .help("Print the timeline as text and exit"),
        )
}

fn overrides(matches: &ArgMatches) -> Result<Overrides> {
    let theme = matches
        .get_one::<String>("theme")
        .map(|name| name.parse::<ThemeName>())
        .transpose()?;

    Ok(Overrides {
        theme,
        catalog: matches.get_one::<String>("catalog").map(PathBuf::from),
        category: matches.get_one::<String>("category").cloned(),
        search: matches.get_one::<String>("search").cloned(),
    })
}

fn open_catalog(config: &Config) -> Result<Catalog> {
    match &config.catalog {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("Catalog file does not exist: {}", path.display());
            }
            Ok(load_catalog(path)?)
        }
        None => Ok(builtin_catalog().context("built-in catalog is invalid")?),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let matches = cli().get_matches();

    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let mut config = config::load(config_path.as_deref())?;
    config.apply_overrides(overrides(&matches)?);

    let catalog = open_catalog(&config)?;
    if config.category != ALL_CATEGORIES && catalog.category(&config.category).is_none() {
        log::warn!("category '{}' is not in the catalog", config.category);
    }
    log::info!(
        "starting with theme={} category={} search={:?}",
        config.theme,
        config.category,
        config.search
    );

    let model = TimelineModel::with_filters(config.search.as_str(), &config.category);

    if matches.get_flag("plain") {
        let snapshot = model.snapshot(&catalog);
        let mut stdout = io::stdout().lock();
        mindline::render::write_plain(&mut stdout, &catalog.title, &snapshot)?;
        stdout.flush()?;
        return Ok(());
    }

    let ui_renderer = Box::new(TerminalUI::with_theme(config.theme.theme())?);
    let mut app =
        Application::new(catalog, model, ui_renderer)?.with_poll_interval(config.poll_interval());

    app.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(!mindline::VERSION.is_empty());
    }

    #[test]
    fn test_cli_definition() {
        cli().debug_assert();
    }

    #[test]
    fn test_overrides_from_flags() {
        let matches = cli().get_matches_from([
            "mindline",
            "--theme",
            "monochrome",
            "--category",
            "Physics",
            "--search",
            "quantum",
            "--plain",
        ]);
        let overrides = overrides(&matches).unwrap();
        assert_eq!(overrides.theme, Some(ThemeName::Monochrome));
        assert_eq!(overrides.category.as_deref(), Some("Physics"));
        assert_eq!(overrides.search.as_deref(), Some("quantum"));
        assert_eq!(overrides.catalog, None);
        assert!(matches.get_flag("plain"));
    }

    #[test]
    fn test_rejects_unknown_theme() {
        let result = cli().try_get_matches_from(["mindline", "--theme", "neon"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_catalog_file() {
        let config = Config {
            catalog: Some(PathBuf::from("/this/catalog/does/not/exist.toml")),
            ..Config::default()
        };
        let err = open_catalog(&config).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
