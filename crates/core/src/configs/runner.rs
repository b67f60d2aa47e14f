use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{RunnerError, RunnerResult};

/// File name of the required run configuration at the invocation root.
pub const RUNNER_CONFIG_FILE: &str = "workspace-runner.json";

/// The `ui` value that enables the terminal dashboard.
const DASHBOARD_UI: &str = "wui";

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AppConfig {
    /// Script names this package is permitted to run.
    pub scripts: Vec<String>,
}

/// The run configuration: which packages may run which scripts, and whether
/// the terminal dashboard is enabled.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RunnerConfig {
    pub ui: Option<String>,
    #[serde(default)]
    pub apps: HashMap<String, AppConfig>,
}

impl RunnerConfig {
    /// Load `workspace-runner.json` from the invocation root. A missing file
    /// is a fatal condition for the caller, as is a shape mismatch.
    pub fn load(root: &Path) -> RunnerResult<Self> {
        let path = root.join(RUNNER_CONFIG_FILE);
        if !path.exists() {
            return Err(RunnerError::Config(format!(
                "Missing {}",
                RUNNER_CONFIG_FILE
            )));
        }
        let contents = std::fs::read_to_string(&path)?;
        parse_runner_config(&contents)
    }

    /// Whether the terminal dashboard is enabled. Only the exact value
    /// `"wui"` turns it on; anything else falls back to plain mode.
    pub fn dashboard_enabled(&self) -> bool {
        self.ui.as_deref() == Some(DASHBOARD_UI)
    }

    /// Whether the configuration permits `package` to run `command`.
    pub fn permits(&self, package: &str, command: &str) -> bool {
        self.apps
            .get(package)
            .map(|app| app.scripts.iter().any(|s| s == command))
            .unwrap_or(false)
    }
}

pub fn parse_runner_config(json_str: &str) -> RunnerResult<RunnerConfig> {
    serde_json::from_str(json_str).map_err(|e| {
        RunnerError::Config(format!("Invalid {}: {}", RUNNER_CONFIG_FILE, e))
    })
}
