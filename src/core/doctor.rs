//! Doctor command logic
//!
//! Probes PATH for the native tools the emitted plans rely on. forgeplan
//! itself never runs them; the checks exist so a misconfigured worker is
//! caught before a plan is handed to the orchestrator.

use std::path::PathBuf;

/// Result of probing for one tool
#[derive(Debug, Clone)]
pub struct ToolCheck {
    /// Tool binary name
    pub name: &'static str,
    /// Where the tool was found, if anywhere
    pub path: Option<PathBuf>,
    /// Whether every plan needs this tool
    pub required: bool,
    /// Install hint shown when the tool is missing
    pub hint: &'static str,
}

impl ToolCheck {
    /// Whether the tool was found
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

/// Overall doctor report
#[derive(Debug, Default)]
pub struct DoctorReport {
    /// Individual tool results
    pub checks: Vec<ToolCheck>,
}

impl DoctorReport {
    /// Whether every required tool is present
    pub fn all_required_found(&self) -> bool {
        self.checks.iter().filter(|c| c.required).all(ToolCheck::found)
    }

    /// Required tools that are missing
    pub fn missing_required(&self) -> Vec<&ToolCheck> {
        self.checks
            .iter()
            .filter(|c| c.required && !c.found())
            .collect()
    }
}

fn probe(name: &'static str, required: bool, hint: &'static str) -> ToolCheck {
    ToolCheck {
        name,
        path: which::which(name).ok(),
        required,
        hint,
    }
}

/// Probe for every tool the step sequence references
pub fn run_doctor() -> DoctorReport {
    DoctorReport {
        checks: vec![
            probe("git", true, "install git from https://git-scm.com/"),
            probe("cmake", true, "install CMake from https://cmake.org/download/"),
            probe("make", false, "needed for Linux targets only"),
            probe("msbuild", false, "needed for Windows targets only"),
        ],
    }
}
