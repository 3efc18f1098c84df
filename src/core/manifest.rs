//! Manifest (forgeplan.toml) parsing and validation
//!
//! The manifest pins the per-project inputs a plan needs beyond the target:
//! repository coordinates, branch, build configuration and the target set.
//! CLI flags override manifest values; manifest values override built-in
//! defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::defaults::{DEFAULT_BRANCH, DEFAULT_BUILD_CONFIG, DEFAULT_PROJECT};
use crate::core::target::BuildTarget;
use crate::error::ManifestError;

/// The project manifest (forgeplan.toml)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    /// Project configuration
    pub project: ProjectConfig,

    /// Repository coordinates
    #[serde(default)]
    pub repos: ReposConfig,

    /// Build configuration
    #[serde(default)]
    pub build: BuildConfig,
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfig {
    /// Project (source tree) name
    pub name: String,
}

/// Repository coordinates
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReposConfig {
    /// Source repository, host-relative
    #[serde(default)]
    pub code: String,

    /// Dependency bundle repository
    #[serde(default)]
    pub sdks: String,

    /// Branch to build
    #[serde(default = "default_branch")]
    pub branch: String,
}

/// Build configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuildConfig {
    /// Build configuration name (Debug, Release, ...)
    #[serde(default = "default_build_config")]
    pub config: String,

    /// Number of parallel compile jobs
    #[serde(default)]
    pub jobs: Option<usize>,

    /// Targets this project builds for
    #[serde(default)]
    pub targets: Vec<String>,
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

fn default_build_config() -> String {
    DEFAULT_BUILD_CONFIG.to_string()
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            config: default_build_config(),
            jobs: None,
            targets: Vec::new(),
        }
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            project: ProjectConfig {
                name: DEFAULT_PROJECT.to_string(),
            },
            repos: ReposConfig {
                code: String::new(),
                sdks: String::new(),
                branch: default_branch(),
            },
            build: BuildConfig::default(),
        }
    }
}

impl Manifest {
    /// Parse a manifest from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(content)?)
    }

    /// Load the manifest from a file
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Serialize the manifest to TOML text
    pub fn to_toml_string(&self) -> Result<String, ManifestError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Starter manifest written by `forgeplan init`
    pub fn starter(name: &str) -> Self {
        Self {
            project: ProjectConfig {
                name: name.to_string(),
            },
            repos: ReposConfig {
                code: "github.com/example/engine.git".to_string(),
                sdks: "github.com/example/engine-sdks.git".to_string(),
                branch: default_branch(),
            },
            build: BuildConfig {
                config: default_build_config(),
                jobs: None,
                targets: BuildTarget::ALL.iter().map(|t| t.id().to_string()).collect(),
            },
        }
    }

    /// Parse the configured target identifiers.
    ///
    /// Any unknown identifier fails the whole call; a manifest naming an
    /// unsupported target is invalid, not partially usable.
    pub fn targets(&self) -> Result<Vec<BuildTarget>, ManifestError> {
        self.build
            .targets
            .iter()
            .map(|id| id.parse::<BuildTarget>().map_err(ManifestError::from))
            .collect()
    }

    /// Structural validation beyond TOML well-formedness
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.project.name.is_empty() {
            return Err(ManifestError::MissingField {
                field: "project.name".to_string(),
            });
        }
        if self.repos.code.is_empty() {
            return Err(ManifestError::MissingField {
                field: "repos.code".to_string(),
            });
        }
        if self.repos.sdks.is_empty() {
            return Err(ManifestError::MissingField {
                field: "repos.sdks".to_string(),
            });
        }
        if self.build.targets.is_empty() {
            return Err(ManifestError::MissingField {
                field: "build.targets".to_string(),
            });
        }
        self.targets()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[project]
name = "Game"

[repos]
code = "github.com/example/game.git"
sdks = "github.com/example/game-sdks.git"
branch = "release/1.4"

[build]
config = "Profile"
jobs = 12
targets = ["win_x64", "linux_x64_clang"]
"#;

    #[test]
    fn test_parse_full_manifest() {
        let manifest = Manifest::from_toml(SAMPLE).unwrap();
        assert_eq!(manifest.project.name, "Game");
        assert_eq!(manifest.repos.branch, "release/1.4");
        assert_eq!(manifest.build.config, "Profile");
        assert_eq!(manifest.build.jobs, Some(12));
        assert_eq!(
            manifest.targets().unwrap(),
            vec![BuildTarget::WinX64, BuildTarget::LinuxX64Clang]
        );
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let manifest = Manifest::from_toml("[project]\nname = \"Game\"\n").unwrap();
        assert_eq!(manifest.repos.branch, DEFAULT_BRANCH);
        assert_eq!(manifest.build.config, DEFAULT_BUILD_CONFIG);
        assert_eq!(manifest.build.jobs, None);
        assert!(manifest.build.targets.is_empty());
    }

    #[test]
    fn test_unknown_target_invalidates_manifest() {
        let manifest = Manifest::from_toml(
            r#"
[project]
name = "Game"

[repos]
code = "a.git"
sdks = "b.git"

[build]
targets = ["win_x64", "amiga_m68k"]
"#,
        )
        .unwrap();
        assert!(matches!(
            manifest.validate(),
            Err(ManifestError::Target(_))
        ));
    }

    #[test]
    fn test_validate_flags_missing_repos() {
        let manifest = Manifest::from_toml(
            "[project]\nname = \"Game\"\n\n[build]\ntargets = [\"win_x64\"]\n",
        )
        .unwrap();
        match manifest.validate() {
            Err(ManifestError::MissingField { field }) => assert_eq!(field, "repos.code"),
            other => panic!("expected missing field error, got {other:?}"),
        }
    }

    #[test]
    fn test_starter_round_trips() {
        let starter = Manifest::starter("Game");
        let toml_text = starter.to_toml_string().unwrap();
        let parsed = Manifest::from_toml(&toml_text).unwrap();
        assert_eq!(parsed, starter);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Manifest::load(&dir.path().join("forgeplan.toml")).unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { .. }));
    }
}
