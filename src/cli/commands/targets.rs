//! Targets command implementation
//!
//! Implements `forgeplan targets` to list the supported target set.

use anyhow::Result;

use crate::cli::output::is_json;
use crate::core::target::BuildTarget;

/// Execute the targets command
pub async fn execute() -> Result<()> {
    if is_json() {
        let entries: Vec<_> = BuildTarget::ALL
            .iter()
            .map(|target| {
                serde_json::json!({
                    "target": target.id(),
                    "generator": target.cmake_generator(),
                    "toolchain": target.toolchain_path(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Supported targets:\n");
    for target in BuildTarget::ALL {
        println!("  {}", target.id());
        println!("      generator: {}", target.cmake_generator());
        println!("      toolchain: {}", target.toolchain_path());
    }

    Ok(())
}
