//! In-memory filesystem and catalog for unit tests.

use crate::catalog::{AssetCatalog, AssetEntry, AssetGroup};
use crate::fs::Fs;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File { data: Vec<u8>, executable: bool },
    /// A link to a directory somewhere else; followed like the OS would.
    Symlink,
}

#[derive(Debug, Default)]
pub struct MemFs {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
    failing: RefCell<BTreeSet<PathBuf>>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, data: &[u8]) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.ensure_dir(parent).unwrap();
        }
        self.nodes.borrow_mut().insert(
            path.to_path_buf(),
            Node::File {
                data: data.to_vec(),
                executable: false,
            },
        );
    }

    /// Put a symbolic link to a directory at `path`.
    pub fn add_symlink(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.ensure_dir(parent).unwrap();
        }
        self.nodes.borrow_mut().insert(path.to_path_buf(), Node::Symlink);
    }

    /// Make every subsequent write to `path` fail.
    pub fn fail_writes_to(&self, path: impl AsRef<Path>) {
        self.failing.borrow_mut().insert(path.as_ref().to_path_buf());
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.nodes.borrow().get(path.as_ref()) {
            Some(Node::File { data, .. }) => Some(data.clone()),
            _ => None,
        }
    }

    pub fn text(&self, path: impl AsRef<Path>) -> Option<String> {
        self.contents(path).map(|d| String::from_utf8(d).unwrap())
    }

    pub fn is_executable(&self, path: impl AsRef<Path>) -> bool {
        matches!(
            self.nodes.borrow().get(path.as_ref()),
            Some(Node::File {
                executable: true,
                ..
            })
        )
    }

    /// Every file under the tree, for before/after comparisons.
    pub fn snapshot(&self) -> BTreeMap<PathBuf, Vec<u8>> {
        self.nodes
            .borrow()
            .iter()
            .filter_map(|(p, n)| match n {
                Node::File { data, .. } => Some((p.clone(), data.clone())),
                Node::Dir | Node::Symlink => None,
            })
            .collect()
    }
}

impl Fs for MemFs {
    fn exists(&self, path: &Path) -> bool {
        self.nodes.borrow().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.nodes.borrow().get(path), Some(Node::Dir | Node::Symlink))
    }

    fn is_symlink(&self, path: &Path) -> bool {
        matches!(self.nodes.borrow().get(path), Some(Node::Symlink))
    }

    fn ensure_dir(&self, path: &Path) -> std::io::Result<()> {
        let mut nodes = self.nodes.borrow_mut();
        let ancestors: Vec<&Path> = path.ancestors().collect();
        for dir in ancestors.into_iter().rev() {
            if dir.as_os_str().is_empty() {
                continue;
            }
            match nodes.get(dir) {
                Some(Node::Dir | Node::Symlink) => {}
                Some(Node::File { .. }) => {
                    return Err(Error::new(
                        ErrorKind::AlreadyExists,
                        format!("{} exists and is not a directory", dir.display()),
                    ));
                }
                None => {
                    nodes.insert(dir.to_path_buf(), Node::Dir);
                }
            }
        }
        Ok(())
    }

    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        match self.nodes.borrow().get(path) {
            Some(Node::File { data, .. }) => Ok(data.clone()),
            Some(Node::Dir | Node::Symlink) => Err(Error::new(ErrorKind::Other, "is a directory")),
            None => Err(Error::new(ErrorKind::NotFound, "no such file")),
        }
    }

    fn write_atomic(&self, path: &Path, data: &[u8]) -> std::io::Result<()> {
        self.store(path, data, false)
    }

    fn write_atomic_executable(&self, path: &Path, data: &[u8]) -> std::io::Result<()> {
        self.store(path, data, true)
    }
}

impl MemFs {
    /// One-step replace; an existing file's executable bit is kept.
    fn store(&self, path: &Path, data: &[u8], executable: bool) -> std::io::Result<()> {
        if self.failing.borrow().contains(path) {
            return Err(Error::new(ErrorKind::PermissionDenied, "injected write failure"));
        }
        if let Some(parent) = path.parent() {
            self.ensure_dir(parent)?;
        }
        let mut nodes = self.nodes.borrow_mut();
        let was_executable = match nodes.get(path) {
            Some(Node::Dir | Node::Symlink) => {
                return Err(Error::new(ErrorKind::Other, "is a directory"))
            }
            Some(Node::File { executable, .. }) => *executable,
            None => false,
        };
        nodes.insert(
            path.to_path_buf(),
            Node::File {
                data: data.to_vec(),
                executable: executable || was_executable,
            },
        );
        Ok(())
    }
}

/// A catalog built in code; sources are keyed by `<group>/<file>`.
#[derive(Debug, Default)]
pub struct MemCatalog {
    groups: Vec<AssetGroup>,
    files: HashMap<String, Vec<u8>>,
    template: String,
}

impl MemCatalog {
    pub fn new() -> Self {
        Self {
            template: "config/config.yaml.tmpl".to_string(),
            ..Self::default()
        }
    }

    /// Add a group whose files all exist in the catalog.
    pub fn with_group(mut self, name: &str, files: &[(&str, &str)]) -> Self {
        let mut entries = Vec::new();
        for (file, body) in files {
            let source = format!("{name}/{file}");
            self.files.insert(source.clone(), body.as_bytes().to_vec());
            entries.push(AssetEntry {
                source,
                destination: PathBuf::from(file),
            });
        }
        self.groups.push(AssetGroup {
            name: name.to_string(),
            entries,
        });
        self
    }

    /// Drop a file from the catalog while leaving it in its group's manifest.
    pub fn without_file(mut self, source: &str) -> Self {
        self.files.remove(source);
        self
    }

    pub fn with_template(mut self, body: &str) -> Self {
        self.files.insert(self.template.clone(), body.as_bytes().to_vec());
        self
    }
}

impl AssetCatalog for MemCatalog {
    fn version(&self) -> &str {
        "test"
    }

    fn config_template(&self) -> &str {
        &self.template
    }

    fn list_groups(&self) -> &[AssetGroup] {
        &self.groups
    }

    fn read_file(&self, relative: &str) -> std::io::Result<Option<Vec<u8>>> {
        Ok(self.files.get(relative).cloned())
    }
}
