//! Config command implementation.
//!
//! Manages CLI configuration.

use anyhow::Result;
use storyshelf_ops::Config;

/// Accept `story-suffixes` as well as `story_suffixes`.
fn normalize_key(key: &str) -> String {
    key.replace('-', "_")
}

/// Show current configuration.
pub fn show(config: &Config) -> Result<()> {
    println!("Storyshelf Configuration");
    println!("{:-<40}", "");

    for key in Config::KEYS {
        let value = config.get(key).unwrap_or_default();
        println!("{:<20} {}", key, value);
    }

    if let Some(config_path) = Config::config_file_path() {
        println!("\nConfig file: {}", config_path.display());
    }

    Ok(())
}

/// Set a configuration value.
pub fn set(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let key = normalize_key(key);
    if let Err(err) = config.set(&key, value) {
        anyhow::bail!("{}. Valid keys: {}", err, Config::KEYS.join(", "));
    }

    config.save()?;
    println!("Set {} to: {}", key, value);
    Ok(())
}

/// Get a configuration value.
pub fn get(config: &Config, key: &str) -> Result<()> {
    let key = normalize_key(key);
    match config.get(&key) {
        Some(value) => println!("{}", value),
        None => anyhow::bail!("Unknown config key: {}", key),
    }
    Ok(())
}

/// Reset configuration to defaults.
pub fn reset() -> Result<()> {
    let config = Config::default();
    config.save()?;
    println!("Configuration reset to defaults");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_keys_are_accepted() {
        assert_eq!(normalize_key("story-suffixes"), "story_suffixes");
        assert_eq!(normalize_key("output_dir"), "output_dir");
        assert!(get(&Config::default(), "max-file-size-kb").is_ok());
        assert!(get(&Config::default(), "github-token").is_err());
    }
}
