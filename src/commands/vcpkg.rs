//! `devdesk vcpkg` command.

use serde::Serialize;

use crate::cli::VcpkgCommand;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::vcpkg::{RegistrySettings, Resolution, VcpkgService, VersionEntry};

/// Execute a `vcpkg` action.
///
/// # Errors
///
/// Returns an error string if the lookup fails.
pub async fn run(
    ctx: &ServiceContext,
    config: &Config,
    action: &VcpkgCommand,
) -> Result<(), String> {
    let service = VcpkgService::new(ctx.http.as_ref(), RegistrySettings::from(config));
    match action {
        VcpkgCommand::Resolve { purl, json } => {
            let resolution = service.resolve(purl).await.map_err(|e| e.to_string())?;
            tracing::info!(
                port = %resolution.step1.port_name,
                file = %resolution.step3.file_name,
                "resolved"
            );
            if *json {
                print_json(&resolution)
            } else {
                print!("{}", format_resolution(&resolution));
                Ok(())
            }
        }
        VcpkgCommand::Versions { port, json } => {
            let versions = service.list_versions(port).await.map_err(|e| e.to_string())?;
            if *json {
                print_json(&versions)
            } else {
                print!("{}", format_versions(port, &versions));
                Ok(())
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

fn format_resolution(resolution: &Resolution) -> String {
    let Resolution { step1, step2, step3 } = resolution;
    let metadata = &step3.metadata;

    let mut lines = vec![
        format!("Port: {}", step1.port_name),
        format!("Version: {}", step1.version),
        format!("Git tree: {}", step2.git_tree),
        format!("Metadata file: {}", step3.file_name),
    ];
    if let Some(description) = metadata.description() {
        lines.push(format!("Description: {description}"));
    }
    if let Some(homepage) = metadata.homepage() {
        lines.push(format!("Homepage: {homepage}"));
    }
    if let Some(license) = metadata.license() {
        lines.push(format!("License: {license}"));
    }
    let dependencies = metadata.dependencies();
    if !dependencies.is_empty() {
        lines.push(format!("Dependencies: {}", dependencies.join(", ")));
    }
    let features = metadata.features();
    if !features.is_empty() {
        lines.push(format!("Features: {}", features.join(", ")));
    }
    with_trailing_newlines(&lines)
}

fn format_versions(port: &str, versions: &[VersionEntry]) -> String {
    if versions.is_empty() {
        return format!("No versions published for {port}.\n");
    }
    let width = versions
        .iter()
        .map(|v| v.display_version().len())
        .max()
        .unwrap_or(0);
    let mut lines = vec![format!("{} versions of {port}:", versions.len())];
    lines.extend(
        versions
            .iter()
            .map(|entry| format!("  {:<width$}  {}", entry.display_version(), entry.git_tree)),
    );
    with_trailing_newlines(&lines)
}

fn with_trailing_newlines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::vcpkg::{parse_metadata, Step1Result, Step2Result, Step3Result};

    fn entries() -> Vec<VersionEntry> {
        serde_json::from_value(json!([
            {"version": "1.3.1", "port-version": 1, "git-tree": "aaa"},
            {"version": "1.2.13", "git-tree": "bbb"}
        ]))
        .unwrap()
    }

    #[test]
    fn versions_are_aligned_with_port_suffix() {
        let text = format_versions("zlib", &entries());
        assert_eq!(text, "2 versions of zlib:\n  1.3.1#1  aaa\n  1.2.13   bbb\n");
    }

    #[test]
    fn no_versions_message() {
        assert_eq!(format_versions("x", &[]), "No versions published for x.\n");
    }

    #[test]
    fn resolution_summary_lists_metadata() {
        let raw = r#"{"name": "zlib", "version": "1.3.1", "description": "compression",
                      "license": "Zlib", "dependencies": ["vcpkg-cmake"]}"#;
        let resolution = Resolution {
            step1: Step1Result {
                port_name: "zlib".into(),
                version: "1.3.1".into(),
                git_tree: "aaa".into(),
                all_versions: entries(),
            },
            step2: Step2Result {
                git_tree: "aaa".into(),
                tree_entries: Vec::new(),
                metadata_file: None,
            },
            step3: Step3Result {
                metadata: parse_metadata(raw, "vcpkg.json").unwrap(),
                raw_content: raw.into(),
                file_name: "vcpkg.json".into(),
            },
        };

        let text = format_resolution(&resolution);
        assert!(text.starts_with(
            "Port: zlib\nVersion: 1.3.1\nGit tree: aaa\nMetadata file: vcpkg.json\n"
        ));
        assert!(text.contains("Description: compression\n"));
        assert!(text.contains("License: Zlib\n"));
        assert!(text.contains("Dependencies: vcpkg-cmake\n"));
        assert!(!text.contains("Homepage"));
    }
}
