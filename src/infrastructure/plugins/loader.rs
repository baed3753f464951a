//! Plugin loader - Discovers command and event manifests on disk

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use super::manifest::{self, CommandManifest};
use crate::application::errors::PluginError;
use crate::application::events::EventBus;
use crate::domain::entities::{Command, CommandRegistry};
use crate::handlers::HandlerCatalog;

/// What a load pass did
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<PluginError>,
}

impl LoadReport {
    fn skip(&mut self, err: PluginError) {
        match &err {
            PluginError::MissingField { .. } => warn!("Skipping manifest: {}", err),
            _ => error!("Failed to load manifest: {}", err),
        }
        self.skipped.push(err);
    }
}

/// Plugin loader.
///
/// Walks a directory tree depth-first in name order and binds every
/// `.yaml`/`.yml` manifest to a handler from the catalogue. A bad file is
/// logged and skipped; its siblings still load.
pub struct PluginLoader {
    catalog: HandlerCatalog,
}

impl PluginLoader {
    pub fn new(catalog: HandlerCatalog) -> Self {
        Self { catalog }
    }

    /// Load every command manifest under `root` into `registry`.
    ///
    /// Same-named commands replace earlier ones, so loading a directory twice
    /// leaves the registry unchanged.
    pub fn load_commands(&self, root: &Path, registry: &mut CommandRegistry) -> LoadReport {
        let mut report = LoadReport::default();

        for path in manifest_files(root) {
            match self.build_command(root, &path) {
                Ok(command) => {
                    let name = command.name.clone();
                    if let Some(previous) = registry.register(command) {
                        info!(
                            command = %name,
                            previous = ?previous.source,
                            "Command overridden by {}",
                            path.display()
                        );
                    }
                    report.loaded += 1;
                }
                Err(e) => report.skip(e),
            }
        }

        info!("Loaded {} commands from {}", report.loaded, root.display());
        report
    }

    /// Subscribe every event manifest under `root` on `bus`
    pub fn load_events(&self, root: &Path, bus: &EventBus) -> LoadReport {
        let mut report = LoadReport::default();

        for path in manifest_files(root) {
            let entries = match read(&path).and_then(|c| manifest::decode_events(&path, &c)) {
                Ok(entries) => entries,
                Err(e) => {
                    report.skip(e);
                    continue;
                }
            };

            for entry in entries {
                let event = match entry {
                    Ok(event) => event,
                    Err(e) => {
                        report.skip(e);
                        continue;
                    }
                };

                let key = event.handler_key();
                let Some(handler) = self.catalog.event(key) else {
                    report.skip(PluginError::UnknownHandler {
                        path: path.clone(),
                        handler: key.to_string(),
                    });
                    continue;
                };

                if event.once {
                    bus.once(&event.signal, key, handler);
                } else {
                    bus.on(&event.signal, key, handler);
                }
                report.loaded += 1;
            }
        }

        info!("Wired {} event handlers from {}", report.loaded, root.display());
        report
    }

    fn build_command(&self, root: &Path, path: &Path) -> Result<Command, PluginError> {
        let manifest = manifest::decode_command(path, &read(path)?)?;

        let handler = self
            .catalog
            .command(manifest.handler_key())
            .ok_or_else(|| PluginError::UnknownHandler {
                path: path.to_path_buf(),
                handler: manifest.handler_key().to_string(),
            })?;

        let CommandManifest {
            name,
            description,
            usage,
            category,
            permissions,
            ..
        } = manifest;

        let mut command = Command::new(name, handler).with_source(path);
        command.description = description;
        command.usage = usage;
        command.category = category.or_else(|| directory_category(root, path));
        command.permissions = permissions;
        Ok(command)
    }
}

fn read(path: &Path) -> Result<String, PluginError> {
    std::fs::read_to_string(path).map_err(|source| PluginError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Name of the directory holding a manifest, unless it is the root itself
fn directory_category(root: &Path, path: &Path) -> Option<String> {
    let parent = path.parent()?;
    if parent == root {
        return None;
    }
    parent
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_lowercase())
}

fn is_manifest(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Manifest files under `root`, depth-first, sorted by name at each level
pub fn manifest_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if !root.is_dir() {
        warn!("Plugin directory does not exist: {}", root.display());
        return files;
    }
    collect(root, &mut files);
    files
}

fn collect(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to read plugin directory {}: {}", dir.display(), e);
            return;
        }
    };

    // file_type() does not follow symlinks, so linked directories are not descended
    let mut paths: Vec<(PathBuf, bool)> = entries
        .filter_map(|entry| {
            let entry = entry
                .map_err(|e| warn!("Failed to read directory entry: {}", e))
                .ok()?;
            let file_type = entry
                .file_type()
                .map_err(|e| warn!("Failed to stat {}: {}", entry.path().display(), e))
                .ok()?;
            Some((entry.path(), file_type.is_dir()))
        })
        .filter(|(p, _)| {
            !p.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with('.'))
                .unwrap_or(false)
        })
        .collect();
    paths.sort();

    for (path, is_dir) in paths {
        if is_dir {
            collect(&path, files);
        } else if is_manifest(&path) {
            files.push(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn walks_depth_first_in_name_order() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("b/inner")).unwrap();
        fs::create_dir_all(root.join(".hidden")).unwrap();
        fs::write(root.join("a.yaml"), "name: a").unwrap();
        fs::write(root.join("b/inner/c.yml"), "name: c").unwrap();
        fs::write(root.join("b/d.yaml"), "name: d").unwrap();
        fs::write(root.join("b/notes.txt"), "ignored").unwrap();
        fs::write(root.join(".hidden/e.yaml"), "name: e").unwrap();

        let names: Vec<String> = manifest_files(root)
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().display().to_string())
            .collect();
        assert_eq!(names, vec!["a.yaml", "b/d.yaml", "b/inner/c.yml"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_descended() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("mod")).unwrap();
        fs::write(root.join("ping.yaml"), "name: ping").unwrap();
        std::os::unix::fs::symlink(root, root.join("mod/loop")).unwrap();

        let files = manifest_files(root);
        assert_eq!(files, vec![root.join("ping.yaml")]);
    }

    #[test]
    fn missing_root_yields_nothing() {
        assert!(manifest_files(Path::new("/nonexistent/plugins")).is_empty());
    }

    #[test]
    fn category_comes_from_parent_directory() {
        let root = Path::new("/plugins/commands");
        assert_eq!(
            directory_category(root, &root.join("Moderation/ban.yaml")),
            Some("moderation".to_string())
        );
        assert_eq!(directory_category(root, &root.join("ping.yaml")), None);
    }
}
