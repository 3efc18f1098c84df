//! Build property resolution
//!
//! Maps a resolved target and project name to the flat property record the
//! step sequence consumes. The record is created fresh per build request,
//! assigned once here, and read-only afterwards.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::defaults::{DEFAULT_PROJECT, SDK_DIR};
use crate::core::target::{BuildTarget, TargetFamily};

/// A single build property value.
///
/// Platform-specific link commands are either one shell line (Windows, run
/// through cmd.exe) or an argv token list (Linux, run without a shell).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Plain string value
    Str(String),
    /// Command-line token list
    Argv(Vec<String>),
}

impl PropertyValue {
    /// The string value, if this is not a token list
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Argv(_) => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(value: Vec<String>) -> Self {
        Self::Argv(value)
    }
}

/// Resolved build properties for one build request.
///
/// Fields are write-once: assigned during [`BuildProperties::resolve`] and
/// consumed read-only by every subsequent step via property interpolation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildProperties {
    /// Project (source tree) name
    pub project: String,

    /// Target this record was resolved for
    pub target: BuildTarget,

    /// CMake generator name
    pub cmake_generator: String,

    /// Repository-relative CMake toolchain file path
    pub toolchain_path: String,

    /// MSBuild platform name (Windows targets only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vs_platform: Option<String>,

    /// Solution file name tag (Windows targets only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution_tag: Option<String>,

    /// Command that removes a pre-existing SDK link
    pub rm_sdklink_cmd: PropertyValue,

    /// Command that links the checked-out SDK bundle into the source tree
    pub mk_sdklink_cmd: PropertyValue,
}

impl BuildProperties {
    /// Resolve the property record for a target.
    ///
    /// The project name falls back to [`DEFAULT_PROJECT`] when absent or
    /// empty, mirroring build requests that arrive without one.
    pub fn resolve(target: BuildTarget, project: Option<&str>) -> Self {
        let project = match project {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => DEFAULT_PROJECT.to_string(),
        };

        let (rm_sdklink_cmd, mk_sdklink_cmd) = sdk_link_commands(target, &project);

        Self {
            cmake_generator: target.cmake_generator().to_string(),
            toolchain_path: target.toolchain_path().to_string(),
            vs_platform: target.vs_platform().map(String::from),
            solution_tag: target.solution_tag().map(String::from),
            rm_sdklink_cmd,
            mk_sdklink_cmd,
            project,
            target,
        }
    }

    /// Flatten the record into the named property map steps interpolate from
    pub fn to_map(&self) -> BTreeMap<String, PropertyValue> {
        let mut map = BTreeMap::new();
        map.insert("project".to_string(), PropertyValue::from(self.project.clone()));
        map.insert("target".to_string(), PropertyValue::from(self.target.id()));
        map.insert(
            "cmake_generator".to_string(),
            PropertyValue::from(self.cmake_generator.clone()),
        );
        map.insert(
            "toolchain_path".to_string(),
            PropertyValue::from(self.toolchain_path.clone()),
        );
        if let Some(ref platform) = self.vs_platform {
            map.insert("vs_platform".to_string(), PropertyValue::from(platform.clone()));
        }
        if let Some(ref tag) = self.solution_tag {
            map.insert("solution_tag".to_string(), PropertyValue::from(tag.clone()));
        }
        map.insert("rm_sdklink_cmd".to_string(), self.rm_sdklink_cmd.clone());
        map.insert("mk_sdklink_cmd".to_string(), self.mk_sdklink_cmd.clone());
        map
    }
}

/// SDK unlink/link commands for a target.
///
/// Windows uses a directory junction and cmd.exe syntax; the unlink guards
/// with 'if exist' so a fresh worker does not fail. Linux symlinks the
/// bundle; the clang flavor overwrites a stale link in place with -sfn.
fn sdk_link_commands(target: BuildTarget, project: &str) -> (PropertyValue, PropertyValue) {
    match target.family() {
        TargetFamily::Windows => {
            let link = format!("{project}\\Code\\SDKs");
            (
                PropertyValue::Str(format!("if exist {link} rmdir {link}")),
                PropertyValue::Str(format!("mklink /J {link} {SDK_DIR}")),
            )
        }
        TargetFamily::Linux => {
            let link = format!("{project}/Code/SDKs");
            let ln_flags = match target {
                BuildTarget::LinuxX64Clang => "-sfn",
                _ => "-s",
            };
            (
                PropertyValue::Argv(vec!["rm".to_string(), link.clone()]),
                PropertyValue::Argv(vec![
                    "ln".to_string(),
                    ln_flags.to_string(),
                    SDK_DIR.to_string(),
                    link,
                ]),
            )
        }
    }
}
