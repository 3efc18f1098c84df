//! Default configuration values

/// Project name used when a build request carries none
pub const DEFAULT_PROJECT: &str = "CRYENGINE";

/// Branch built when neither the manifest nor the request names one
pub const DEFAULT_BRANCH: &str = "main";

/// Build configuration used when none is requested
pub const DEFAULT_BUILD_CONFIG: &str = "Release";

/// Directory the dependency bundle is checked out into
pub const SDK_DIR: &str = "ce_sdks";

/// Location inside the source tree the SDK bundle is linked to,
/// relative to the project directory
pub const SDK_LINK_SUBPATH: &str = "Code/SDKs";

/// Timeout for source and dependency checkout steps (in seconds)
pub const GIT_STEP_TIMEOUT_SECS: u64 = 3600;

/// Prefix of the CMake-generated Visual Studio solution file
pub const MSBUILD_SOLUTION_PREFIX: &str = "CryEngine_CMake";

/// Manifest file name
pub const MANIFEST_FILE: &str = "forgeplan.toml";

/// Minimum proptest iterations
pub const MIN_PROPTEST_ITERATIONS: u32 = 100;
