//! The asset catalog: named, ordered groups of files the installer copies.
//!
//! A catalog is described by a `catalog.yaml` manifest that lists each group
//! and its files. Sources live at `<group>/<file>` relative to the catalog
//! root; destinations are `<file>` relative to wherever the installer places
//! the group. The manifest is validated once at load time so nothing later
//! has to worry about paths escaping the target root.

use crate::error::{KitError, Result};
use crate::paths;
use rust_embed::Embed;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "catalog.yaml";

pub const GROUP_AGENTS: &str = "agents";
pub const GROUP_WORKFLOWS: &str = "workflows";
pub const GROUP_TASKS: &str = "tasks";
pub const GROUP_CHECKLISTS: &str = "checklists";
pub const GROUP_STORIES: &str = "stories";
pub const GROUP_HOOKS: &str = "hooks";
pub const GROUP_SKILLS: &str = "skills";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    /// Catalog-relative source, always `/`-separated.
    pub source: String,
    /// Destination relative to the group's install directory.
    pub destination: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetGroup {
    pub name: String,
    pub entries: Vec<AssetEntry>,
}

#[derive(Debug, Deserialize)]
struct ManifestDoc {
    version: String,
    config_template: String,
    #[serde(default)]
    groups: Vec<GroupDoc>,
}

#[derive(Debug, Deserialize)]
struct GroupDoc {
    name: String,
    #[serde(default)]
    files: Vec<String>,
}

/// A parsed and validated `catalog.yaml`.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    pub version: String,
    pub config_template: String,
    pub groups: Vec<AssetGroup>,
}

impl CatalogIndex {
    pub fn parse(yaml: &str) -> Result<Self> {
        let doc: ManifestDoc = serde_yaml::from_str(yaml)?;
        let config_template = paths::display_rel(&paths::confined(&doc.config_template)?);

        let mut seen = HashSet::new();
        let mut groups = Vec::with_capacity(doc.groups.len());
        for group in doc.groups {
            if group.name.contains('/') {
                return Err(KitError::UnsafePath(group.name));
            }
            paths::confined(&group.name)?;
            if !seen.insert(group.name.clone()) {
                return Err(KitError::DuplicateGroup(group.name));
            }
            let entries = group
                .files
                .iter()
                .map(|file| {
                    let destination = paths::confined(file)?;
                    let source = format!("{}/{}", group.name, paths::display_rel(&destination));
                    Ok(AssetEntry {
                        source,
                        destination,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            groups.push(AssetGroup {
                name: group.name,
                entries,
            });
        }

        Ok(Self {
            version: doc.version,
            config_template,
            groups,
        })
    }
}

// ---------------------------------------------------------------------------
// AssetCatalog
// ---------------------------------------------------------------------------

pub trait AssetCatalog {
    fn version(&self) -> &str;

    /// Catalog-relative path of the config template.
    fn config_template(&self) -> &str;

    fn list_groups(&self) -> &[AssetGroup];

    fn group(&self, name: &str) -> Option<&AssetGroup> {
        self.list_groups().iter().find(|g| g.name == name)
    }

    /// Bytes of a catalog file, or `None` when the catalog lacks it.
    fn read_file(&self, relative: &str) -> std::io::Result<Option<Vec<u8>>>;
}

#[derive(Embed)]
#[folder = "$CARGO_MANIFEST_DIR/assets/"]
struct BundledAssets;

/// The catalog compiled into the binary.
#[derive(Debug, Clone)]
pub struct EmbeddedCatalog {
    index: CatalogIndex,
}

impl EmbeddedCatalog {
    pub fn load() -> Result<Self> {
        let file = <BundledAssets as Embed>::get(MANIFEST_FILE)
            .ok_or_else(|| KitError::CatalogManifestMissing("embedded catalog.yaml".into()))?;
        let yaml = std::str::from_utf8(&file.data)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(Self {
            index: CatalogIndex::parse(yaml)?,
        })
    }
}

impl AssetCatalog for EmbeddedCatalog {
    fn version(&self) -> &str {
        &self.index.version
    }

    fn config_template(&self) -> &str {
        &self.index.config_template
    }

    fn list_groups(&self) -> &[AssetGroup] {
        &self.index.groups
    }

    fn read_file(&self, relative: &str) -> std::io::Result<Option<Vec<u8>>> {
        Ok(<BundledAssets as Embed>::get(relative).map(|f| f.data.into_owned()))
    }
}

/// A catalog unpacked on disk, rooted at a directory holding `catalog.yaml`.
#[derive(Debug, Clone)]
pub struct DirCatalog {
    dir: PathBuf,
    index: CatalogIndex,
}

impl DirCatalog {
    pub fn open(dir: &Path) -> Result<Self> {
        let manifest = dir.join(MANIFEST_FILE);
        let yaml = match std::fs::read_to_string(&manifest) {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(KitError::CatalogManifestMissing(
                    manifest.display().to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            dir: dir.to_path_buf(),
            index: CatalogIndex::parse(&yaml)?,
        })
    }
}

impl AssetCatalog for DirCatalog {
    fn version(&self) -> &str {
        &self.index.version
    }

    fn config_template(&self) -> &str {
        &self.index.config_template
    }

    fn list_groups(&self) -> &[AssetGroup] {
        &self.index.groups
    }

    fn read_file(&self, relative: &str) -> std::io::Result<Option<Vec<u8>>> {
        let rel = paths::confined(relative)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
        match std::fs::read(self.dir.join(rel)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn embedded_catalog_has_every_group() {
        let catalog = EmbeddedCatalog::load().unwrap();
        for name in [
            GROUP_AGENTS,
            GROUP_WORKFLOWS,
            GROUP_TASKS,
            GROUP_CHECKLISTS,
            GROUP_STORIES,
            GROUP_HOOKS,
            GROUP_SKILLS,
        ] {
            let group = catalog.group(name).unwrap_or_else(|| panic!("missing group {name}"));
            assert!(!group.entries.is_empty(), "group {name} is empty");
        }
    }

    #[test]
    fn embedded_manifest_matches_bundled_files() {
        let catalog = EmbeddedCatalog::load().unwrap();
        for group in catalog.list_groups() {
            for entry in &group.entries {
                assert!(
                    catalog.read_file(&entry.source).unwrap().is_some(),
                    "manifest lists {} but it is not bundled",
                    entry.source
                );
            }
        }
        assert!(catalog.read_file(catalog.config_template()).unwrap().is_some());
    }

    #[test]
    fn bundled_yaml_assets_are_well_formed() {
        for name in BundledAssets::iter() {
            if name.ends_with(".yaml") || name.ends_with(".yml") {
                let file = <BundledAssets as Embed>::get(&name).unwrap();
                let text = std::str::from_utf8(&file.data).unwrap();
                serde_yaml::from_str::<serde_yaml::Value>(text)
                    .unwrap_or_else(|e| panic!("{name} is not valid YAML: {e}"));
            }
        }
    }

    #[test]
    fn parse_keeps_manifest_order() {
        let index = CatalogIndex::parse(
            "version: '2'\nconfig_template: config/t.tmpl\ngroups:\n  - name: tasks\n    files: [b.md, a.md]\n  - name: agents\n    files: [x.md]\n",
        )
        .unwrap();
        assert_eq!(index.version, "2");
        let names: Vec<_> = index.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["tasks", "agents"]);
        assert_eq!(index.groups[0].entries[0].source, "tasks/b.md");
        assert_eq!(index.groups[0].entries[1].destination, PathBuf::from("a.md"));
    }

    #[test]
    fn parse_rejects_traversal() {
        let err = CatalogIndex::parse(
            "version: '1'\nconfig_template: c.tmpl\ngroups:\n  - name: agents\n    files: [../../etc/passwd]\n",
        )
        .unwrap_err();
        assert!(matches!(err, KitError::UnsafePath(_)));

        let err = CatalogIndex::parse(
            "version: '1'\nconfig_template: c.tmpl\ngroups:\n  - name: ../agents\n    files: []\n",
        )
        .unwrap_err();
        assert!(matches!(err, KitError::UnsafePath(_)));
    }

    #[test]
    fn parse_rejects_duplicate_groups() {
        let err = CatalogIndex::parse(
            "version: '1'\nconfig_template: c.tmpl\ngroups:\n  - name: agents\n  - name: agents\n",
        )
        .unwrap_err();
        assert!(matches!(err, KitError::DuplicateGroup(_)));
    }

    #[test]
    fn dir_catalog_reports_missing_sources_as_none() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            "version: '1'\nconfig_template: config/c.tmpl\ngroups:\n  - name: agents\n    files: [a.md, gone.md]\n",
        )
        .unwrap();
        std::fs::create_dir_all(dir.path().join("agents")).unwrap();
        std::fs::write(dir.path().join("agents/a.md"), "# A\n").unwrap();

        let catalog = DirCatalog::open(dir.path()).unwrap();
        assert_eq!(catalog.read_file("agents/a.md").unwrap().unwrap(), b"# A\n");
        assert!(catalog.read_file("agents/gone.md").unwrap().is_none());
    }

    #[test]
    fn dir_catalog_without_manifest_fails() {
        let dir = TempDir::new().unwrap();
        let err = DirCatalog::open(dir.path()).unwrap_err();
        assert!(matches!(err, KitError::CatalogManifestMissing(_)));
    }
}
