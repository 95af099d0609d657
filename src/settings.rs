//! Settings for seeding a fresh planner.

use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::domain::types::CategoryName;

/// Categories created when no configuration says otherwise.
pub const DEFAULT_SEED_CATEGORIES: [&str; 3] = ["Todo", "Setup", "Taxes"];

/// Configuration options for a planner instance.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TodoSettings {
    /// Category names seeded in display order.
    pub seed_categories: Vec<String>,
    /// Name of the seed that becomes the undeletable default category.
    pub default_category: String,
    /// Initial value of the "show completed" filter.
    pub show_completed: bool,
}

impl Default for TodoSettings {
    fn default() -> Self {
        Self {
            seed_categories: DEFAULT_SEED_CATEGORIES
                .iter()
                .map(ToString::to_string)
                .collect(),
            default_category: DEFAULT_SEED_CATEGORIES[0].to_string(),
            show_completed: true,
        }
    }
}

impl TodoSettings {
    /// Loads settings from an optional YAML file and `TODO_*` environment
    /// variables. Environment variables take precedence over the file.
    ///
    /// The process environment is only read, never modified.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Yaml).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix("TODO")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("seed_categories"),
            )
            .build()?
            .try_deserialize()
    }

    /// Like [`TodoSettings::load`], but first exports the variables of the
    /// dotenv file at `env_file` into the process environment.
    ///
    /// This mutates process-wide state and is meant for the host binary
    /// during start-up. Variables already set are not overridden.
    pub fn load_with_env_file(path: Option<&Path>, env_file: &Path) -> Result<Self, ConfigError> {
        dotenvy::from_path(env_file).map_err(|e| ConfigError::Foreign(Box::new(e)))?;
        Self::load(path)
    }

    /// Valid seed names and the index of the default category among them.
    ///
    /// Blank names are skipped. If nothing usable is configured the built-in
    /// seeds are used; an unknown default name falls back to the first seed.
    pub fn seeds(&self) -> (Vec<CategoryName>, usize) {
        let configured: Vec<CategoryName> = self
            .seed_categories
            .iter()
            .filter_map(|name| CategoryName::new(name.as_str()).ok())
            .collect();

        let names = if configured.is_empty() {
            log::warn!("No usable seed categories configured, using built-in seeds");
            DEFAULT_SEED_CATEGORIES
                .iter()
                .filter_map(|name| CategoryName::new(*name).ok())
                .collect()
        } else {
            configured
        };

        let default_index = names
            .iter()
            .position(|name| name.as_str() == self.default_category.trim())
            .unwrap_or(0);

        (names, default_index)
    }
}
