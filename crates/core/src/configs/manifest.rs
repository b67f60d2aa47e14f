use std::path::Path;

use serde::Deserialize;

/// File name of the per-package manifest.
pub const PACKAGE_MANIFEST_FILE: &str = "package.json";

/// The subset of `package.json` the runner cares about. All other fields are
/// ignored.
#[derive(Debug, Deserialize, Clone)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    /// Workspace globs; present only in a workspace root manifest.
    #[serde(default)]
    pub workspaces: Option<Vec<String>>,
}

/// Read a directory's `package.json`. A missing, unreadable, or malformed
/// manifest is treated identically: as if the directory had none.
pub fn read_package_manifest(dir: &Path) -> Option<PackageManifest> {
    let contents = std::fs::read_to_string(dir.join(PACKAGE_MANIFEST_FILE)).ok()?;
    serde_json::from_str(&contents).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_name_and_workspaces() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(PACKAGE_MANIFEST_FILE),
            r#"{"name":"host","version":"1.0.0","workspaces":["apps/*"],"scripts":{"dev":"rspack serve"}}"#,
        )
        .unwrap();

        let manifest = read_package_manifest(dir.path()).unwrap();
        assert_eq!(manifest.name.as_deref(), Some("host"));
        assert_eq!(manifest.workspaces, Some(vec!["apps/*".to_string()]));
    }

    #[test]
    fn missing_manifest_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_package_manifest(dir.path()).is_none());
    }

    #[test]
    fn malformed_manifest_is_none() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PACKAGE_MANIFEST_FILE), "{not json").unwrap();
        assert!(read_package_manifest(dir.path()).is_none());
    }
}
