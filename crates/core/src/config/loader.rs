//! Configuration file loader for the `.netgenius/` directory structure.
//!
//! This module loads:
//! - `config.toml`: Provider and session settings
//! - `prompts/*.md`: Prompt templates with YAML front matter

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::AppConfig;
use crate::prompts::parse_prompt_markdown;
use ng_protocol::config_models::GlobalConfig;
use ng_protocol::prompt_models::PromptTemplate;
use std::path::Path;
use walkdir::WalkDir;

/// Name of the project configuration directory.
pub const CONFIG_DIR: &str = ".netgenius";

/// Loads all configuration from the `.netgenius/` directory.
///
/// # Arguments
///
/// * `root` - Root directory containing the `.netgenius/` folder
///
/// # Returns
///
/// An `AppConfig` containing all loaded configuration. Missing directories
/// or files yield the defaults rather than an error.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - Files exist but cannot be read
/// - Files have invalid syntax (TOML or Markdown front matter)
/// - A prompt's front matter is missing `name` or names an unknown `stage`
///
/// # Example
///
/// ```rust,no_run
/// use ng_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Using {}", config.global.provider.model);
/// # Ok(())
/// # }
/// ```
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let ng_dir = root.join(CONFIG_DIR);

    if !ng_dir.exists() {
        tracing::debug!(path = %ng_dir.display(), "no config directory, using defaults");
        return Ok(AppConfig::default());
    }

    let global = load_global_config(&ng_dir)?;
    let prompts = load_prompts(&ng_dir)?;

    tracing::debug!(
        model = %global.provider.model,
        prompt_overrides = prompts.len(),
        "loaded configuration"
    );

    Ok(AppConfig { global, prompts })
}

/// Loads global configuration from `config.toml`.
fn load_global_config(ng_dir: &Path) -> ConfigResult<GlobalConfig> {
    let config_path = ng_dir.join("config.toml");

    if !config_path.exists() {
        return Ok(GlobalConfig::default());
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    let config: GlobalConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path,
            source,
        })?;

    Ok(config)
}

/// Loads all prompt templates from `prompts/*.md`, in file-name order.
fn load_prompts(ng_dir: &Path) -> ConfigResult<Vec<PromptTemplate>> {
    let prompts_dir = ng_dir.join("prompts");

    if !prompts_dir.exists() {
        return Ok(Vec::new());
    }

    let mut prompts = Vec::new();

    for entry in WalkDir::new(&prompts_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ConfigError::DirectoryWalk {
            path: prompts_dir.clone(),
            source,
        })?;

        let path = entry.path();

        if path.extension().and_then(|s| s.to_str()) != Some("md") {
            continue;
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let template =
            parse_prompt_markdown(&content).map_err(|reason| ConfigError::MarkdownParse {
                path: path.to_path_buf(),
                reason,
            })?;

        prompts.push(template);
    }

    Ok(prompts)
}
