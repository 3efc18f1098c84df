//! Build target definitions
//!
//! A target is a named (OS, architecture, compiler) combination. The set is
//! closed: every supported target is a variant here, and everything derived
//! from a target (generator, toolchain file, platform tags) is resolved by
//! exhaustive matching. An identifier outside the set is a hard parse error,
//! never a silently incomplete configuration.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::TargetError;

/// A supported build target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BuildTarget {
    /// 32-bit Windows, MSVC
    WinX86,
    /// 64-bit Windows, MSVC
    WinX64,
    /// 64-bit Linux, GCC
    LinuxX64Gcc,
    /// 64-bit Linux, Clang
    LinuxX64Clang,
}

/// Operating-system family of a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFamily {
    Windows,
    Linux,
}

impl BuildTarget {
    /// All supported targets, in canonical order
    pub const ALL: [BuildTarget; 4] = [
        Self::WinX86,
        Self::WinX64,
        Self::LinuxX64Gcc,
        Self::LinuxX64Clang,
    ];

    /// Canonical target identifier as used in build requests
    pub fn id(self) -> &'static str {
        match self {
            Self::WinX86 => "win_x86",
            Self::WinX64 => "win_x64",
            Self::LinuxX64Gcc => "linux_x64_gcc",
            Self::LinuxX64Clang => "linux_x64_clang",
        }
    }

    /// Comma-separated list of all supported identifiers, for error messages
    pub fn supported_ids() -> String {
        Self::ALL.map(Self::id).join(", ")
    }

    /// CMake generator used to configure this target
    pub fn cmake_generator(self) -> &'static str {
        match self {
            Self::WinX86 => "Visual Studio 14 2015",
            Self::WinX64 => "Visual Studio 14 2015 Win64",
            Self::LinuxX64Gcc | Self::LinuxX64Clang => "Unix Makefiles",
        }
    }

    /// Repository-relative path of the CMake toolchain file
    pub fn toolchain_path(self) -> &'static str {
        match self {
            Self::WinX86 | Self::WinX64 => "Tools/CMake/toolchain/windows/WindowsPC-MSVC.cmake",
            Self::LinuxX64Gcc => "Tools/CMake/toolchain/linux/Linux_GCC.cmake",
            Self::LinuxX64Clang => "Tools/CMake/toolchain/linux/Linux_Clang.cmake",
        }
    }

    /// Operating-system family
    pub fn family(self) -> TargetFamily {
        match self {
            Self::WinX86 | Self::WinX64 => TargetFamily::Windows,
            Self::LinuxX64Gcc | Self::LinuxX64Clang => TargetFamily::Linux,
        }
    }

    /// MSBuild platform name, for Windows targets only
    pub fn vs_platform(self) -> Option<&'static str> {
        match self {
            Self::WinX86 => Some("Win32"),
            Self::WinX64 => Some("x64"),
            Self::LinuxX64Gcc | Self::LinuxX64Clang => None,
        }
    }

    /// Tag embedded in the generated solution file name, for Windows targets
    /// only. Differs from the platform for 64-bit Windows: the solution is
    /// named 'Win64', the MSBuild platform 'x64'.
    pub fn solution_tag(self) -> Option<&'static str> {
        match self {
            Self::WinX86 => Some("Win32"),
            Self::WinX64 => Some("Win64"),
            Self::LinuxX64Gcc | Self::LinuxX64Clang => None,
        }
    }
}

impl FromStr for BuildTarget {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "win_x86" => Ok(Self::WinX86),
            "win_x64" => Ok(Self::WinX64),
            "linux_x64_gcc" => Ok(Self::LinuxX64Gcc),
            "linux_x64_clang" => Ok(Self::LinuxX64Clang),
            other => Err(TargetError::Unknown {
                name: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl TryFrom<String> for BuildTarget {
    type Error = TargetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BuildTarget> for String {
    fn from(target: BuildTarget) -> Self {
        target.id().to_string()
    }
}
