//! Directory structure and file generation for `.netgenius` initialization.

use super::error::{InitError, InitResult};
use super::templates::{get_template, list_templates};
use crate::config::loader::CONFIG_DIR;
use std::fs;
use std::path::{Path, PathBuf};

/// Options for initializing a `.netgenius` directory.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Target directory where `.netgenius` will be created.
    pub target_dir: PathBuf,

    /// Overwrite an existing `.netgenius` directory.
    pub force: bool,

    /// Write only `config.toml`; prompts keep using the embedded defaults.
    pub minimal: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            target_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            force: false,
            minimal: false,
        }
    }
}

/// Generate a `.netgenius` directory structure from the embedded templates.
///
/// ```text
/// .netgenius/
/// ├── config.toml
/// └── prompts/            (unless minimal)
///     ├── intent.md
///     ├── script.md
///     └── ...
/// ```
///
/// Returns the paths of the files written.
///
/// # Errors
/// - `DirectoryExists` if `.netgenius` exists and `force` is not set
/// - `TemplateNotFound` if an embedded template is missing
/// - `DirectoryCreate` / `FileWrite` on file system failures
pub async fn generate_netgenius_structure(options: InitOptions) -> InitResult<Vec<PathBuf>> {
    let ng_dir = options.target_dir.join(CONFIG_DIR);

    if ng_dir.exists() && !options.force {
        return Err(InitError::DirectoryExists(ng_dir));
    }

    fs::create_dir_all(&ng_dir).map_err(|source| InitError::DirectoryCreate {
        path: ng_dir.clone(),
        source,
    })?;

    let mut written = vec![write_template_file(&ng_dir, "config.toml")?];

    if !options.minimal {
        for prompt_path in list_templates("prompts/") {
            written.push(write_template_file(&ng_dir, &prompt_path)?);
        }
    }

    tracing::info!(path = %ng_dir.display(), files = written.len(), "initialized project");
    Ok(written)
}

/// Write one embedded template below `ng_dir`, creating parent directories.
fn write_template_file(ng_dir: &Path, template_path: &str) -> InitResult<PathBuf> {
    let content = get_template(template_path)
        .ok_or_else(|| InitError::TemplateNotFound(template_path.to_string()))?;

    let target_path = ng_dir.join(template_path);

    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|source| InitError::DirectoryCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&target_path, content).map_err(|source| InitError::FileWrite {
        path: target_path.clone(),
        source,
    })?;

    Ok(target_path)
}
