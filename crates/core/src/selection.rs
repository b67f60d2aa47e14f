//! Run-set filtering.
//!
//! Reduces discovered packages to the subset the run configuration permits to
//! run the requested command. Filtering is pure: discovery order is preserved
//! and repeated application yields the same result.

use crate::configs::runner::RunnerConfig;
use crate::workspace::PackageDescriptor;

/// Keep the descriptors whose name appears in the configuration's `apps` map
/// with `command` among its permitted scripts.
pub fn select_runnable(
    descriptors: &[PackageDescriptor],
    config: &RunnerConfig,
    command: &str,
) -> Vec<PackageDescriptor> {
    descriptors
        .iter()
        .filter(|descriptor| config.permits(&descriptor.name, command))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::runner::parse_runner_config;
    use std::path::PathBuf;

    fn descriptor(name: &str) -> PackageDescriptor {
        PackageDescriptor {
            name: name.to_string(),
            path: PathBuf::from(format!("apps/{}", name)),
        }
    }

    #[test]
    fn keeps_only_opted_in_packages_with_the_command() {
        let config =
            parse_runner_config(r#"{"apps":{"pkg-a":{"scripts":["dev"]}}}"#).unwrap();
        let discovered = vec![descriptor("pkg-a"), descriptor("pkg-b")];

        let selection = select_runnable(&discovered, &config, "dev");
        assert_eq!(selection, vec![descriptor("pkg-a")]);
    }

    #[test]
    fn command_must_be_listed_in_scripts() {
        let config =
            parse_runner_config(r#"{"apps":{"pkg-a":{"scripts":["build"]}}}"#).unwrap();
        let discovered = vec![descriptor("pkg-a")];

        assert!(select_runnable(&discovered, &config, "dev").is_empty());
    }

    #[test]
    fn preserves_discovery_order() {
        let config = parse_runner_config(
            r#"{"apps":{"a":{"scripts":["dev"]},"b":{"scripts":["dev"]},"c":{"scripts":["dev"]}}}"#,
        )
        .unwrap();
        let discovered = vec![descriptor("c"), descriptor("a"), descriptor("b")];

        let selection = select_runnable(&discovered, &config, "dev");
        let names: Vec<&str> = selection.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let config = parse_runner_config(
            r#"{"apps":{"a":{"scripts":["dev"]},"b":{"scripts":["test"]}}}"#,
        )
        .unwrap();
        let discovered = vec![descriptor("a"), descriptor("b")];

        let once = select_runnable(&discovered, &config, "dev");
        let twice = select_runnable(&once, &config, "dev");
        assert_eq!(once, twice);
    }
}
