#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing
)]
//! Integration tests for configuration loading through the command setup.

mod common;

use common::IntegrationTestContext;
use macsetup_cli::commands::CommandSetup;
use macsetup_cli::config::Config;
use macsetup_cli::error::ConfigError;
use macsetup_cli::logging::Logger;

#[test]
fn full_document_loads() {
    let ctx = IntegrationTestContext::new(
        r#"
brew_formulae = ["git", "neovim", "ripgrep"]
brew_casks = ["iterm2", "visual-studio-code"]
brew_fonts = ["font-jetbrains-mono-nerd-font"]
personal_apps = ["vlc"]

[dock]
apps = ["Finder", "iTerm2", "Visual Studio Code"]
tile_size = 48
autohide = true

[finder]
default_view = "list"
show_hidden_files = true

[git]
default_branch = "main"

[system]
key_repeat_rate = 2
screenshot_location = "~/Pictures/Screenshots"

[optional]
copy_dotfiles = true
install_oh_my_zsh = true
"#,
    );
    let setup = CommandSetup::init(&ctx.global(), &Logger::new()).unwrap();
    let config = setup.config;

    assert_eq!(config.brew_formulae.len(), 3);
    assert_eq!(config.brew_fonts, vec!["font-jetbrains-mono-nerd-font"]);
    assert_eq!(config.dock.apps.as_ref().unwrap()[1], "iTerm2");
    assert_eq!(config.git.settings(), vec![("init.defaultBranch", "main")]);
    assert!(config.optional.install_oh_my_zsh);
    assert!(!config.optional.install_nvchad);
    assert_eq!(config.personal_apps(), vec!["vlc"]);
    assert!(config.validate().is_empty());
}

#[test]
fn missing_config_is_not_found() {
    let ctx = IntegrationTestContext::new("");
    std::fs::remove_file(ctx.root_path().join("config.toml")).unwrap();

    let err = CommandSetup::init(&ctx.global(), &Logger::new()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::NotFound { .. })
    ));
}

#[test]
fn malformed_config_is_parse_error() {
    let ctx = IntegrationTestContext::new("[finder\nshow_path_bar = true\n");
    let err = CommandSetup::init(&ctx.global(), &Logger::new()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Parse { .. })
    ));
}

#[test]
fn alternate_config_file_relative_to_root() {
    let ctx = IntegrationTestContext::new("brew_formulae = [\"git\"]\n");
    std::fs::write(ctx.root_path().join("work.toml"), "brew_casks = [\"slack\"]\n").unwrap();
    let mut global = ctx.global();
    global.config = Some("work.toml".into());

    let setup = CommandSetup::init(&global, &Logger::new()).unwrap();
    assert!(setup.config.brew_formulae.is_empty());
    assert_eq!(setup.config.brew_casks, vec!["slack"]);
}

#[test]
fn unknown_keys_load_with_warnings() {
    let ctx = IntegrationTestContext::new(
        r#"
wallpaper = "beach.png"

[finder]
default_view = "coverflow"
"#,
    );
    let setup = CommandSetup::init(&ctx.global(), &Logger::new()).unwrap();
    let items: Vec<(String, String)> = setup
        .config
        .validate()
        .into_iter()
        .map(|w| (w.source, w.item))
        .collect();
    assert_eq!(
        items,
        vec![
            ("(top level)".to_string(), "wallpaper".to_string()),
            ("finder".to_string(), "coverflow".to_string()),
        ]
    );
}

#[test]
fn empty_document_is_valid() {
    let config: Config = toml::from_str("").unwrap();
    assert!(config.validate().is_empty());
    assert_eq!(config, Config::default());
}
