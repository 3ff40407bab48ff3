//! The declarative configuration document.
//!
//! Every leaf setting is optional. An absent key means "leave the current
//! OS setting untouched", so steps must issue no command for it.
pub mod toml_loader;
pub mod validation;

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Default configuration file name, relative to the project root.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Plugins cloned into the Oh My Zsh custom directory when `zsh_plugins`
/// is not configured.
pub const DEFAULT_ZSH_PLUGINS: &[(&str, &str)] = &[
    (
        "zsh-autosuggestions",
        "https://github.com/zsh-users/zsh-autosuggestions",
    ),
    (
        "zsh-syntax-highlighting",
        "https://github.com/zsh-users/zsh-syntax-highlighting",
    ),
    (
        "zsh-interactive-cd",
        "https://github.com/changyuheng/zsh-interactive-cd",
    ),
    (
        "you-should-use",
        "https://github.com/MichaelAquilina/zsh-you-should-use",
    ),
    ("zsh-bat", "https://github.com/fdellwing/zsh-bat"),
];

/// Casks installed by `personal-apps` when `personal_apps` is not configured.
pub const DEFAULT_PERSONAL_APPS: &[&str] = &[
    "discord",
    "jagex-launcher",
    "runelite",
    "steam",
    "google-drive",
    "appcleaner",
    "keka",
    "veracrypt",
    "vlc",
    "handbrake",
    "anydesk",
    "cyberduck",
    "wireshark",
    "balenaetcher",
];

/// Keys that are present in the document but not recognized.
pub type UnknownKeys = BTreeMap<String, toml::Value>;

/// All loaded configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dock: DockConfig,
    pub finder: FinderConfig,
    pub git: GitConfig,
    pub system: SystemConfig,
    pub optional: OptionalConfig,
    pub brew_formulae: Vec<String>,
    pub brew_casks: Vec<String>,
    pub brew_fonts: Vec<String>,
    /// Plugin name → git URL. Replaces [`DEFAULT_ZSH_PLUGINS`] when set.
    pub zsh_plugins: Option<BTreeMap<String, String>>,
    /// Replaces [`DEFAULT_PERSONAL_APPS`] when set.
    pub personal_apps: Option<Vec<String>>,
    #[serde(flatten)]
    pub unknown: UnknownKeys,
}

/// `[dock]` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DockConfig {
    /// Application display names, in Dock order.
    pub apps: Option<Vec<String>>,
    pub tile_size: Option<i64>,
    pub autohide: Option<bool>,
    pub show_recents: Option<bool>,
    #[serde(flatten)]
    pub unknown: UnknownKeys,
}

/// `[finder]` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// One of `icon`, `list`, `column`, `gallery`.
    pub default_view: Option<String>,
    pub show_path_bar: Option<bool>,
    pub show_status_bar: Option<bool>,
    pub show_hidden_files: Option<bool>,
    #[serde(flatten)]
    pub unknown: UnknownKeys,
}

/// `[git]` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    pub default_branch: Option<String>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    #[serde(flatten)]
    pub unknown: UnknownKeys,
}

impl GitConfig {
    /// `(git key, value)` pairs for every configured setting, in a fixed order.
    #[must_use]
    pub fn settings(&self) -> Vec<(&'static str, &str)> {
        [
            ("init.defaultBranch", self.default_branch.as_deref()),
            ("user.name", self.user_name.as_deref()),
            ("user.email", self.user_email.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}

/// `[system]` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub key_repeat_rate: Option<i64>,
    pub initial_key_repeat: Option<i64>,
    /// Opt-in: only `true` changes anything.
    pub tap_to_click: Option<bool>,
    pub tracking_speed: Option<f64>,
    /// Opt-in: only `true` changes anything.
    pub disable_auto_correct: Option<bool>,
    /// Opt-in: only `true` changes anything.
    pub disable_auto_capitalize: Option<bool>,
    /// Directory for screenshots; `~` is expanded.
    pub screenshot_location: Option<String>,
    pub screenshot_show_thumbnail: Option<bool>,
    #[serde(flatten)]
    pub unknown: UnknownKeys,
}

/// `[optional]` section: toggles for the optional steps.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OptionalConfig {
    pub copy_dotfiles: bool,
    pub install_oh_my_zsh: bool,
    pub install_nvchad: bool,
    #[serde(flatten)]
    pub unknown: UnknownKeys,
}

/// Finder view styles and their vendor codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStyle {
    Icon,
    List,
    Column,
    Gallery,
}

impl ViewStyle {
    /// Look up a view style by its configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "icon" => Some(Self::Icon),
            "list" => Some(Self::List),
            "column" => Some(Self::Column),
            "gallery" => Some(Self::Gallery),
            _ => None,
        }
    }

    /// The `FXPreferredViewStyle` code Finder stores for this style.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Icon => "icnv",
            Self::List => "Nlsv",
            Self::Column => "clmv",
            Self::Gallery => "glyv",
        }
    }
}

impl Config {
    /// Load the configuration document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the file does not exist,
    /// [`ConfigError::Read`] if it cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid document.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        toml_loader::load_config(path)
    }

    /// Plugins to install, configured or built in.
    #[must_use]
    pub fn zsh_plugins(&self) -> Vec<(String, String)> {
        self.zsh_plugins.as_ref().map_or_else(
            || {
                DEFAULT_ZSH_PLUGINS
                    .iter()
                    .map(|(name, url)| ((*name).to_string(), (*url).to_string()))
                    .collect()
            },
            |plugins| {
                plugins
                    .iter()
                    .map(|(name, url)| (name.clone(), url.clone()))
                    .collect()
            },
        )
    }

    /// Personal casks to install, configured or built in.
    #[must_use]
    pub fn personal_apps(&self) -> Vec<String> {
        self.personal_apps.clone().unwrap_or_else(|| {
            DEFAULT_PERSONAL_APPS
                .iter()
                .map(|s| (*s).to_string())
                .collect()
        })
    }
}
