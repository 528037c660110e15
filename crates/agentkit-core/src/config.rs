//! Generation of the project's `.agentkit/config.yaml` from the catalog template.
//!
//! The document is rendered and validated fully in memory, then written with
//! a single atomic replace. It is never merged with an existing file: either
//! the existing file is kept as-is, or (with `force`) it is replaced whole.

use crate::catalog::AssetCatalog;
use crate::error::{KitError, Result};
use crate::fs::Fs;
use crate::paths;
use crate::project::ProjectName;
use crate::template;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Version of the installer embedded at compile time.
pub const INSTALLER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedConfig {
    pub path: PathBuf,
    pub content: String,
    /// An earlier config was replaced.
    pub replaced: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigResult {
    Written(GeneratedConfig),
    Skipped,
}

/// Template variables for a project.
pub fn standard_variables(project: &ProjectName, catalog_version: &str) -> BTreeMap<String, String> {
    [
        ("project_name", project.name.clone()),
        ("project_name_source", project.source.to_string()),
        ("catalog_version", catalog_version.to_string()),
        ("installer_version", INSTALLER_VERSION.to_string()),
        ("config_dir", paths::CONFIG_DIR.to_string()),
        ("stories_dir", paths::STORIES_DIR.to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// Render `template_id` with `variables` into `target`.
///
/// Values are inserted as double-quoted YAML scalars, so templates write
/// `name: {{ project_name }}` without quotes of their own.
pub fn generate(
    fs: &dyn Fs,
    catalog: &dyn AssetCatalog,
    template_id: &str,
    variables: &BTreeMap<String, String>,
    target: &Path,
    force: bool,
) -> Result<ConfigResult> {
    let existed = fs.exists(target);
    if existed && !force {
        tracing::debug!(path = %target.display(), "config exists, not regenerating");
        return Ok(ConfigResult::Skipped);
    }

    let raw = catalog
        .read_file(template_id)?
        .ok_or_else(|| KitError::TemplateMissing(template_id.to_string()))?;
    let text = String::from_utf8(raw)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    let quoted = variables
        .iter()
        .map(|(k, v)| Ok((k.clone(), yaml_scalar(v)?)))
        .collect::<Result<BTreeMap<_, _>>>()?;
    let content = template::render(&text, &quoted)?;
    ensure_mapping(&content)?;

    fs.write_atomic(target, content.as_bytes())?;
    Ok(ConfigResult::Written(GeneratedConfig {
        path: target.to_path_buf(),
        content,
        replaced: existed,
    }))
}

/// JSON strings are valid YAML double-quoted scalars.
fn yaml_scalar(value: &str) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

fn ensure_mapping(content: &str) -> Result<()> {
    match serde_yaml::from_str::<serde_yaml::Value>(content)? {
        serde_yaml::Value::Mapping(_) => Ok(()),
        _ => Err(KitError::ConfigNotMapping),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
