use std::path::{Path, PathBuf};

use serde::Deserialize;

use fgscript::Options;

/// Name of the config file looked up next to the source file.
pub const DEFAULT_CONFIG_NAME: &str = "fgscript.toml";

/// `[compat]` table shared by `fgscript.toml` and test frontmatter.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct CompatConfig {
    pub top_level_statements: bool,
    pub unmatched_end: bool,
    pub top_level_comments: bool,
}

impl From<CompatConfig> for Options {
    fn from(compat: CompatConfig) -> Self {
        Options {
            allow_top_level_statements: compat.top_level_statements,
            tolerate_unmatched_end: compat.unmatched_end,
            emit_top_level_comments: compat.top_level_comments,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub compat: CompatConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
        toml::from_str(&text).map_err(|e| format!("invalid config '{}': {}", path.display(), e))
    }

    /// Load `explicit` if given, otherwise `fgscript.toml` next to `source`
    /// when present. No file at all means the default (strict) config.
    pub fn discover(explicit: Option<&Path>, source: &Path) -> Result<(Config, Option<PathBuf>), String> {
        if let Some(path) = explicit {
            return Ok((Config::load(path)?, Some(path.to_path_buf())));
        }

        let candidate = source
            .parent()
            .map(|dir| dir.join(DEFAULT_CONFIG_NAME))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_NAME));
        if candidate.is_file() {
            return Ok((Config::load(&candidate)?, Some(candidate)));
        }

        Ok((Config::default(), None))
    }
}
