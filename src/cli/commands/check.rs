//! Check command implementation
//!
//! Implements `forgeplan check` to validate the manifest and dry-render the
//! plan of every configured target.

use anyhow::{bail, Result};
use std::path::Path;

use crate::cli::output::{is_json, status};
use crate::config::defaults::MANIFEST_FILE;
use crate::core::check::check_manifest;
use crate::core::manifest::Manifest;

/// Execute the check command
pub async fn execute(project_dir: &Path) -> Result<()> {
    let manifest_path = project_dir.join(MANIFEST_FILE);
    let manifest = Manifest::load(&manifest_path)?;

    tracing::info!("Checking project: {}", manifest.project.name);

    let report = check_manifest(&manifest);

    if is_json() {
        let json_result = serde_json::json!({
            "status": if report.is_valid() { "success" } else { "error" },
            "issues": report.issues,
            "warnings": report.warnings,
            "targets": report.targets.iter().map(|t| serde_json::json!({
                "target": t.target.id(),
                "steps": t.steps,
                "error": t.error,
            })).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&json_result)?);
        if !report.is_valid() {
            bail!("Check failed");
        }
        return Ok(());
    }

    println!("Checking project configuration...\n");

    if report.issues.is_empty() {
        println!("{} Manifest is valid", status::SUCCESS);
    } else {
        println!("{} Manifest has errors", status::ERROR);
        for issue in &report.issues {
            println!("  - {issue}");
        }
    }

    if !report.targets.is_empty() {
        println!("\nTarget plans:");
        for target_check in &report.targets {
            match &target_check.error {
                None => println!(
                    "  {} {} ({} steps)",
                    status::SUCCESS,
                    target_check.target,
                    target_check.steps
                ),
                Some(error) => {
                    println!("  {} {}", status::ERROR, target_check.target);
                    println!("      {error}");
                }
            }
        }
    }

    if !report.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &report.warnings {
            println!("  {} {warning}", status::WARNING);
        }
    }

    println!();
    if report.is_valid() {
        println!("{} Check passed - plans are ready to hand off", status::SUCCESS);
        Ok(())
    } else {
        bail!("Check failed - please fix the issues above");
    }
}
