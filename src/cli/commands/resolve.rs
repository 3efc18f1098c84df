//! Resolve command implementation
//!
//! Implements `forgeplan resolve` to print the property record a target
//! resolves to, without touching the manifest.

use anyhow::Result;

use crate::cli::output::is_json;
use crate::core::properties::{BuildProperties, PropertyValue};
use crate::core::request::BuildRequest;

/// Execute the resolve command
pub async fn execute(target: &str, project: Option<String>) -> Result<()> {
    let mut request = BuildRequest::new(target);
    if let Some(project) = project {
        request = request.with_project(project);
    }

    let properties: BuildProperties = request.resolve_properties()?;

    if is_json() {
        println!("{}", serde_json::to_string_pretty(&properties)?);
        return Ok(());
    }

    println!("Properties for {}:\n", properties.target);
    for (name, value) in properties.to_map() {
        match value {
            PropertyValue::Str(s) => println!("  {name} = {s}"),
            PropertyValue::Argv(argv) => println!("  {name} = {argv:?}"),
        }
    }

    Ok(())
}
