//! Configuration for the operations layer.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use storyshelf_core::ScanOptions;

use crate::error::{OpsError, OpsResult};

/// Configuration for storyshelf operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory (relative to the project root) the story build writes to.
    #[serde(default = "default_storybook_dir")]
    pub storybook_dir: PathBuf,

    /// Directory (relative to the project root) searched for story files.
    #[serde(default = "default_source_root")]
    pub source_root: PathBuf,

    /// Default output directory for built docsets.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File name suffixes that mark story modules.
    #[serde(default = "default_story_suffixes")]
    pub story_suffixes: Vec<String>,

    /// Story files larger than this (in KB) are skipped.
    #[serde(default = "default_max_file_size_kb")]
    pub max_file_size_kb: u64,

    /// Static build command, run in the project root.
    #[serde(default = "default_build_command")]
    pub build_command: Vec<String>,

    /// Metadata extract command, run after the build.
    #[serde(default = "default_extract_command")]
    pub extract_command: Vec<String>,

    /// Call names and limits for the fallback scanner.
    #[serde(default)]
    pub scan: ScanOptions,
}

fn default_storybook_dir() -> PathBuf {
    PathBuf::from("storybook-static")
}

fn default_source_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("docset")
}

fn default_story_suffixes() -> Vec<String> {
    [".stories.js", ".stories.jsx", ".stories.ts", ".stories.tsx"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_max_file_size_kb() -> u64 {
    512
}

fn default_build_command() -> Vec<String> {
    split_command("node node_modules/@storybook/react/dist/server/build.js -s public")
}

fn default_extract_command() -> Vec<String> {
    split_command("node node_modules/@storybook/cli/bin/index.js extract")
}

fn split_command(command: &str) -> Vec<String> {
    command.split_whitespace().map(String::from).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storybook_dir: default_storybook_dir(),
            source_root: default_source_root(),
            output_dir: default_output_dir(),
            story_suffixes: default_story_suffixes(),
            max_file_size_kb: default_max_file_size_kb(),
            build_command: default_build_command(),
            extract_command: default_extract_command(),
            scan: ScanOptions::default(),
        }
    }
}

impl Config {
    /// Keys accepted by [`Config::get`] and [`Config::set`].
    pub const KEYS: &'static [&'static str] = &[
        "storybook_dir",
        "source_root",
        "output_dir",
        "story_suffixes",
        "max_file_size_kb",
        "build_command",
        "extract_command",
        "group_call",
        "variant_method",
        "max_input_len",
    ];

    /// Load configuration from disk with environment overrides.
    pub fn load() -> OpsResult<Self> {
        let config = match Self::config_file_path() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(&path)?;
                serde_json::from_str(&contents)?
            }
            _ => Self::default(),
        };

        Ok(config.with_env_overrides())
    }

    /// Apply `SHELF_*` environment variables on top of this configuration.
    pub fn with_env_overrides(self) -> Self {
        let env_path = |key: &str| std::env::var(key).ok().map(PathBuf::from);

        Self {
            storybook_dir: env_path("SHELF_STORYBOOK_DIR").unwrap_or(self.storybook_dir),
            source_root: env_path("SHELF_SOURCE_ROOT").unwrap_or(self.source_root),
            output_dir: env_path("SHELF_OUTPUT_DIR").unwrap_or(self.output_dir),
            ..self
        }
    }

    /// Save configuration to disk.
    pub fn save(&self) -> OpsResult<()> {
        if let Some(path) = Self::config_file_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(self)?;
            std::fs::write(&path, contents)?;
        }
        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "storyshelf", "shelf")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Maximum story file size in bytes.
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size_kb * 1024
    }

    /// Get a configuration value by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "storybook_dir" => Some(self.storybook_dir.display().to_string()),
            "source_root" => Some(self.source_root.display().to_string()),
            "output_dir" => Some(self.output_dir.display().to_string()),
            "story_suffixes" => Some(self.story_suffixes.join(",")),
            "max_file_size_kb" => Some(self.max_file_size_kb.to_string()),
            "build_command" => Some(self.build_command.join(" ")),
            "extract_command" => Some(self.extract_command.join(" ")),
            "group_call" => Some(self.scan.group_call.clone()),
            "variant_method" => Some(self.scan.variant_method.clone()),
            "max_input_len" => Some(
                self.scan
                    .max_input_len
                    .map(|len| len.to_string())
                    .unwrap_or_else(|| "none".to_string()),
            ),
            _ => None,
        }
    }

    /// Set a configuration value by key.
    pub fn set(&mut self, key: &str, value: &str) -> OpsResult<()> {
        match key {
            "storybook_dir" => self.storybook_dir = PathBuf::from(value),
            "source_root" => self.source_root = PathBuf::from(value),
            "output_dir" => self.output_dir = PathBuf::from(value),
            "story_suffixes" => {
                self.story_suffixes = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
            }
            "max_file_size_kb" => {
                self.max_file_size_kb = value
                    .parse()
                    .map_err(|_| OpsError::Config(format!("Invalid number: {}", value)))?;
            }
            "build_command" => self.build_command = split_command(value),
            "extract_command" => self.extract_command = split_command(value),
            "group_call" => self.scan.group_call = non_empty(key, value)?,
            "variant_method" => self.scan.variant_method = non_empty(key, value)?,
            "max_input_len" => {
                self.scan.max_input_len = match value {
                    "none" | "" => None,
                    _ => Some(
                        value
                            .parse()
                            .map_err(|_| OpsError::Config(format!("Invalid number: {}", value)))?,
                    ),
                };
            }
            _ => {
                return Err(OpsError::Config(format!("Unknown config key: {}", key)));
            }
        }
        Ok(())
    }
}

fn non_empty(key: &str, value: &str) -> OpsResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(OpsError::Config(format!("{} cannot be empty", key)));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.storybook_dir, PathBuf::from("storybook-static"));
        assert_eq!(config.story_suffixes.len(), 4);
        assert_eq!(config.build_command[0], "node");
        assert_eq!(config.extract_command.last().map(String::as_str), Some("extract"));
        assert_eq!(config.scan.group_call, "storiesOf");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: Config = serde_json::from_str(r#"{ "output_dir": "out" }"#).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.max_file_size_kb, 512);
        assert_eq!(config.scan, ScanOptions::default());
    }

    #[test]
    fn test_get_set_round_trip_every_key() {
        let mut config = Config::default();
        for key in Config::KEYS {
            let value = config.get(key).unwrap();
            config.set(key, &value).unwrap();
        }
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_set_parses_values() {
        let mut config = Config::default();
        config.set("story_suffixes", ".story.js, .stories.mdx").unwrap();
        assert_eq!(config.story_suffixes, vec![".story.js", ".stories.mdx"]);

        config.set("build_command", "npm run build-storybook").unwrap();
        assert_eq!(config.build_command, vec!["npm", "run", "build-storybook"]);

        config.set("max_input_len", "none").unwrap();
        assert_eq!(config.scan.max_input_len, None);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("max_file_size_kb", "lots"),
            Err(OpsError::Config(_))
        ));
        assert!(matches!(config.set("group_call", "  "), Err(OpsError::Config(_))));
        assert!(matches!(config.set("nope", "1"), Err(OpsError::Config(_))));
        assert!(config.get("nope").is_none());
    }
}
