//! Workspace declaration detection and package discovery.
//!
//! A workspace declares its package directories with glob patterns, either in
//! `pnpm-workspace.yaml` or in the root `package.json` `workspaces` array.
//! Only the `<base>/*` glob shape is supported: each declared base folder is
//! scanned one level deep for directories containing a named manifest.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::configs::manifest::{read_package_manifest, PACKAGE_MANIFEST_FILE};
use crate::configs::workspace::{parse_pnpm_workspace, PNPM_WORKSPACE_FILE};

/// A package directory plus the name read from its manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    pub name: String,
    pub path: PathBuf,
}

/// How the workspace declares its package globs. Immutable once detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceDeclaration {
    /// `pnpm-workspace.yaml` with a `packages:` list.
    Pnpm { globs: Vec<String> },
    /// Root `package.json` with a `workspaces` array.
    Manifest { globs: Vec<String> },
}

impl WorkspaceDeclaration {
    /// Detect the declaration style by file presence, pnpm first. A file
    /// that fails to read or parse is treated as if it were absent.
    pub fn detect(root: &Path) -> Option<Self> {
        let yaml_path = root.join(PNPM_WORKSPACE_FILE);
        if yaml_path.exists() {
            if let Some(config) = std::fs::read_to_string(&yaml_path)
                .ok()
                .and_then(|contents| parse_pnpm_workspace(&contents).ok())
            {
                return Some(Self::Pnpm {
                    globs: config.packages.unwrap_or_default(),
                });
            }
        }

        if let Some(manifest) = read_package_manifest(root) {
            if let Some(globs) = manifest.workspaces {
                return Some(Self::Manifest { globs });
            }
        }

        None
    }

    pub fn globs(&self) -> &[String] {
        match self {
            Self::Pnpm { globs } | Self::Manifest { globs } => globs,
        }
    }

    /// The package manager used to run workspace scripts.
    pub fn package_manager(&self) -> PackageManager {
        match self {
            Self::Pnpm { .. } => PackageManager::Pnpm,
            Self::Manifest { .. } => PackageManager::Yarn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Pnpm,
    Yarn,
}

impl PackageManager {
    pub fn program(&self) -> &'static str {
        match self {
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
        }
    }
}

/// Expand one `<base>/*` glob into candidate package directories, sorted for
/// deterministic discovery order. Any other glob shape is skipped with a
/// warning; a missing base folder yields nothing.
fn resolve_package_dirs(root: &Path, glob: &str) -> Vec<PathBuf> {
    let mut parts = glob.split('/');
    let base = parts.next().unwrap_or_default();
    let wildcard = parts.next();

    if base.is_empty() || base.contains('*') || wildcard != Some("*") || parts.next().is_some() {
        eprintln!(
            "{} {}",
            "Skipping unsupported workspace glob:".yellow(),
            glob
        );
        return Vec::new();
    }

    let Ok(entries) = std::fs::read_dir(root.join(base)) else {
        return Vec::new();
    };

    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.join(PACKAGE_MANIFEST_FILE).exists())
        .collect();
    dirs.sort();
    dirs
}

/// Discover every package the workspace declaration resolves to. Directories
/// without a valid named manifest are skipped without error; duplicate paths
/// across globs are collapsed.
pub fn discover_packages(
    root: &Path,
    declaration: &WorkspaceDeclaration,
) -> Vec<PackageDescriptor> {
    let mut seen = BTreeSet::new();
    let mut packages = Vec::new();

    for glob in declaration.globs() {
        for dir in resolve_package_dirs(root, glob) {
            if !seen.insert(dir.clone()) {
                continue;
            }
            let Some(manifest) = read_package_manifest(&dir) else {
                continue;
            };
            let Some(name) = manifest.name else {
                continue;
            };
            packages.push(PackageDescriptor { name, path: dir });
        }
    }

    packages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_manifest(dir: &Path, contents: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(PACKAGE_MANIFEST_FILE), contents).unwrap();
    }

    #[test]
    fn detects_pnpm_before_manifest_workspaces() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(
            temp.path().join(PNPM_WORKSPACE_FILE),
            "packages:\n  - 'apps/*'\n",
        )
        .unwrap();
        write_manifest(temp.path(), r#"{"name":"root","workspaces":["packages/*"]}"#);

        let declaration = WorkspaceDeclaration::detect(temp.path()).unwrap();
        assert_eq!(
            declaration,
            WorkspaceDeclaration::Pnpm {
                globs: vec!["apps/*".to_string()]
            }
        );
        assert_eq!(declaration.package_manager(), PackageManager::Pnpm);
    }

    #[test]
    fn falls_back_to_manifest_workspaces() {
        let temp = tempfile::tempdir().unwrap();
        write_manifest(temp.path(), r#"{"name":"root","workspaces":["packages/*"]}"#);

        let declaration = WorkspaceDeclaration::detect(temp.path()).unwrap();
        assert_eq!(
            declaration,
            WorkspaceDeclaration::Manifest {
                globs: vec!["packages/*".to_string()]
            }
        );
        assert_eq!(declaration.package_manager(), PackageManager::Yarn);
    }

    #[test]
    fn unparsable_yaml_is_treated_as_absent() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join(PNPM_WORKSPACE_FILE), "packages: [oops").unwrap();
        write_manifest(temp.path(), r#"{"name":"root","workspaces":["apps/*"]}"#);

        let declaration = WorkspaceDeclaration::detect(temp.path()).unwrap();
        assert!(matches!(declaration, WorkspaceDeclaration::Manifest { .. }));
    }

    #[test]
    fn no_declaration_detected() {
        let temp = tempfile::tempdir().unwrap();
        write_manifest(temp.path(), r#"{"name":"root"}"#);
        assert!(WorkspaceDeclaration::detect(temp.path()).is_none());
    }

    #[test]
    fn discovers_named_packages_one_level_deep() {
        let temp = tempfile::tempdir().unwrap();
        write_manifest(&temp.path().join("apps/host"), r#"{"name":"host"}"#);
        write_manifest(&temp.path().join("apps/remote"), r#"{"name":"remote"}"#);
        // No manifest: skipped without error.
        std::fs::create_dir_all(temp.path().join("apps/scratch")).unwrap();
        // Nested package: not discovered (one level only).
        write_manifest(&temp.path().join("apps/host/vendor"), r#"{"name":"vendor"}"#);
        write_manifest(&temp.path().join("packages/ui"), r#"{"name":"@acme/ui"}"#);

        let declaration = WorkspaceDeclaration::Pnpm {
            globs: vec!["apps/*".to_string(), "packages/*".to_string()],
        };
        let packages = discover_packages(temp.path(), &declaration);

        let names: Vec<&str> = packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["host", "remote", "@acme/ui"]);
    }

    #[test]
    fn duplicate_globs_collapse_to_one_descriptor() {
        let temp = tempfile::tempdir().unwrap();
        write_manifest(&temp.path().join("apps/web"), r#"{"name":"web"}"#);

        let declaration = WorkspaceDeclaration::Pnpm {
            globs: vec!["apps/*".to_string(), "apps/*".to_string()],
        };
        let packages = discover_packages(temp.path(), &declaration);
        assert_eq!(packages.len(), 1);
    }

    #[test]
    fn unsupported_glob_shapes_are_skipped() {
        let temp = tempfile::tempdir().unwrap();
        write_manifest(&temp.path().join("apps/web"), r#"{"name":"web"}"#);
        write_manifest(&temp.path().join("tools/deep/cli"), r#"{"name":"cli"}"#);

        let declaration = WorkspaceDeclaration::Pnpm {
            globs: vec![
                "apps/*".to_string(),
                "tools/**".to_string(),
                "tools/*/cli".to_string(),
                "*/web".to_string(),
            ],
        };
        let packages = discover_packages(temp.path(), &declaration);
        let names: Vec<&str> = packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["web"]);
    }

    #[test]
    fn manifest_without_name_is_skipped() {
        let temp = tempfile::tempdir().unwrap();
        write_manifest(&temp.path().join("apps/anon"), r#"{"version":"0.0.1"}"#);
        write_manifest(&temp.path().join("apps/named"), r#"{"name":"named"}"#);

        let declaration = WorkspaceDeclaration::Pnpm {
            globs: vec!["apps/*".to_string()],
        };
        let packages = discover_packages(temp.path(), &declaration);
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name, "named");
    }

    #[test]
    fn missing_base_folder_yields_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let declaration = WorkspaceDeclaration::Pnpm {
            globs: vec!["ghosts/*".to_string()],
        };
        assert!(discover_packages(temp.path(), &declaration).is_empty());
    }
}
