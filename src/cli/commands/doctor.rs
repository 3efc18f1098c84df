//! Doctor command implementation
//!
//! Implements `forgeplan doctor` to probe for the native tools the emitted
//! plans rely on.

use anyhow::{bail, Result};

use crate::cli::output::{create_spinner, is_json, is_quiet, print_detail, status};
use crate::core::doctor::run_doctor;

/// Execute the doctor command
pub async fn execute() -> Result<()> {
    let spinner = (!is_quiet() && !is_json()).then(|| create_spinner("Probing for tools..."));
    let report = run_doctor();
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if is_json() {
        let json_result = serde_json::json!({
            "status": if report.all_required_found() { "success" } else { "error" },
            "checks": report.checks.iter().map(|c| serde_json::json!({
                "name": c.name,
                "found": c.found(),
                "required": c.required,
                "path": c.path.as_ref().map(|p| p.display().to_string()),
            })).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&json_result)?);
        if !report.all_required_found() {
            bail!("Missing required tools");
        }
        return Ok(());
    }

    for check in &report.checks {
        let required_str = if check.required { "" } else { " [optional]" };
        match &check.path {
            Some(path) => println!(
                "  {} {}{required_str} ({})",
                status::SUCCESS,
                check.name,
                path.display()
            ),
            None => {
                println!("  {} {}{required_str}", status::ERROR, check.name);
                print_detail(&format!("Suggestion: {}", check.hint));
            }
        }
    }

    println!();
    if report.all_required_found() {
        if !is_quiet() {
            println!("{} All required tools found", status::SUCCESS);
        }
        Ok(())
    } else {
        bail!("Missing required tools. Install them and re-run 'forgeplan doctor'.");
    }
}
