//! Derive the host project's name from its build descriptor.
//!
//! Descriptors are only read, never written. A descriptor that is missing,
//! unreadable, or malformed is skipped in favor of the next one.

use crate::error::Result;
use crate::fs::Fs;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Used when no descriptor yields a name. Deliberately not a plausible name.
pub const FALLBACK_PROJECT_NAME: &str = "unnamed-project";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    Descriptor(&'static str),
    Fallback,
}

impl fmt::Display for NameSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameSource::Descriptor(file) => f.write_str(file),
            NameSource::Fallback => f.write_str("fallback"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName {
    pub name: String,
    pub source: NameSource,
}

type Parser = fn(&str) -> Result<Option<String>>;

const DESCRIPTORS: &[(&str, Parser)] = &[
    ("Cargo.toml", parse_cargo_toml),
    ("package.json", parse_package_json),
    ("pyproject.toml", parse_pyproject_toml),
    ("go.mod", parse_go_mod),
];

pub fn detect_project_name(fs: &dyn Fs, root: &Path) -> ProjectName {
    for &(file, parse) in DESCRIPTORS {
        let path = root.join(file);
        if !fs.exists(&path) {
            continue;
        }
        let text = match fs.read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(descriptor = file, error = %e, "unreadable build descriptor");
                continue;
            }
        };
        match parse(&text) {
            Ok(Some(name)) => {
                tracing::debug!(descriptor = file, %name, "project name detected");
                return ProjectName {
                    name,
                    source: NameSource::Descriptor(file),
                };
            }
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(descriptor = file, error = %e, "malformed build descriptor");
            }
        }
    }

    tracing::warn!(
        "no build descriptor with a project name found; using '{FALLBACK_PROJECT_NAME}'"
    );
    ProjectName {
        name: FALLBACK_PROJECT_NAME.to_string(),
        source: NameSource::Fallback,
    }
}

fn non_empty(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

// ---------------------------------------------------------------------------
// Descriptor parsers
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct NameTable {
    name: Option<String>,
}

#[derive(Deserialize)]
struct CargoManifest {
    package: Option<NameTable>,
}

fn parse_cargo_toml(text: &str) -> Result<Option<String>> {
    let manifest: CargoManifest = toml::from_str(text)?;
    Ok(non_empty(manifest.package.and_then(|p| p.name)))
}

fn parse_package_json(text: &str) -> Result<Option<String>> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    Ok(non_empty(
        value.get("name").and_then(|n| n.as_str()).map(str::to_string),
    ))
}

#[derive(Deserialize)]
struct PyProject {
    project: Option<NameTable>,
    tool: Option<PyTools>,
}

#[derive(Deserialize)]
struct PyTools {
    poetry: Option<NameTable>,
}

fn parse_pyproject_toml(text: &str) -> Result<Option<String>> {
    let doc: PyProject = toml::from_str(text)?;
    let pep621 = non_empty(doc.project.and_then(|p| p.name));
    Ok(pep621.or_else(|| non_empty(doc.tool.and_then(|t| t.poetry).and_then(|p| p.name))))
}

fn parse_go_mod(text: &str) -> Result<Option<String>> {
    let module = text
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("module "))
        .map(|path| path.split("//").next().unwrap_or(path).trim().trim_matches('"'));
    Ok(non_empty(
        module.and_then(|m| m.rsplit('/').next()).map(str::to_string),
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
