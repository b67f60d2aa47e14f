use serde::Deserialize;

use crate::types::RunnerResult;

/// File name of the pnpm workspace declaration.
pub const PNPM_WORKSPACE_FILE: &str = "pnpm-workspace.yaml";

/// `pnpm-workspace.yaml` with its `packages:` glob list.
#[derive(Debug, Deserialize, Clone)]
pub struct PnpmWorkspaceConfig {
    pub packages: Option<Vec<String>>,
}

pub fn parse_pnpm_workspace(yaml_str: &str) -> RunnerResult<PnpmWorkspaceConfig> {
    let config: PnpmWorkspaceConfig = serde_yaml::from_str(yaml_str)?;
    Ok(config)
}
