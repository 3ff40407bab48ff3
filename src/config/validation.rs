//! Non-fatal configuration checks.
//!
//! Steps silently ignore keys they do not recognize; this module surfaces
//! them once at load time so a typo does not go unnoticed.
use super::{Config, UnknownKeys, ViewStyle};

/// A validation warning detected after loading the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Section the warning belongs to (`"(top level)"` for root keys).
    pub source: String,
    /// The offending key or value.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

const TOP_LEVEL: &str = "(top level)";

fn unknown_keys(section: &str, keys: &UnknownKeys, out: &mut Vec<ValidationWarning>) {
    for key in keys.keys() {
        out.push(ValidationWarning::new(
            section,
            key,
            "unrecognized key is ignored",
        ));
    }
}

fn blank_packages(section: &str, names: &[String], out: &mut Vec<ValidationWarning>) {
    for (index, name) in names.iter().enumerate() {
        if name.trim().is_empty() {
            out.push(ValidationWarning::new(
                section,
                format!("#{index}"),
                "empty package name",
            ));
        }
    }
}

impl Config {
    /// Check the configuration and return any warnings found.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        unknown_keys(TOP_LEVEL, &self.unknown, &mut warnings);
        unknown_keys("dock", &self.dock.unknown, &mut warnings);
        unknown_keys("finder", &self.finder.unknown, &mut warnings);
        unknown_keys("git", &self.git.unknown, &mut warnings);
        unknown_keys("system", &self.system.unknown, &mut warnings);
        unknown_keys("optional", &self.optional.unknown, &mut warnings);

        if let Some(view) = &self.finder.default_view
            && ViewStyle::from_name(view).is_none()
        {
            warnings.push(ValidationWarning::new(
                "finder",
                view,
                "unknown default_view (expected icon, list, column or gallery)",
            ));
        }

        blank_packages("brew_formulae", &self.brew_formulae, &mut warnings);
        blank_packages("brew_casks", &self.brew_casks, &mut warnings);
        blank_packages("brew_fonts", &self.brew_fonts, &mut warnings);

        warnings
    }
}
