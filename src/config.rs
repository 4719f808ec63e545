use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "helleaser.toml";

/// File name looked up in the user configuration directory.
pub const USER_CONFIG_FILE: &str = ".helleaser.toml";

/// Represents the complete configuration for helleaser.
///
/// Every value can be overridden from the command line.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub git: GitConfig,
}

fn default_environment() -> String {
    "production".to_string()
}

fn default_manifest() -> String {
    "package.json".to_string()
}

/// Release selection settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    /// Environment used when `--staging` is not given
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Manifest path, relative to the working directory
    #[serde(default = "default_manifest")]
    pub manifest: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            environment: default_environment(),
            manifest: default_manifest(),
        }
    }
}

/// Returns the package manager executable for the host.
fn default_package_manager() -> String {
    if cfg!(windows) {
        "npm.cmd".to_string()
    } else {
        "npm".to_string()
    }
}

fn default_build_script() -> String {
    "build".to_string()
}

/// Build invocation settings: `<package_manager> run <script>`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BuildConfig {
    #[serde(default = "default_package_manager")]
    pub package_manager: String,

    #[serde(default = "default_build_script")]
    pub script: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            package_manager: default_package_manager(),
            script: default_build_script(),
        }
    }
}

fn default_git_program() -> String {
    "git".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Version control settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_git_program")]
    pub program: String,

    /// Remote pulled from and pushed to when merging
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Branch merged into after every release unless `--merge` is given
    #[serde(default)]
    pub merge_target: Option<String>,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            program: default_git_program(),
            remote: default_remote(),
            merge_target: None,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `helleaser.toml` in current directory
/// 3. `.helleaser.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    if let Some(path) = config_path {
        return load_from(Path::new(path));
    }

    let local = Path::new(LOCAL_CONFIG_FILE);
    if local.exists() {
        return load_from(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user = config_dir.join(USER_CONFIG_FILE);
        if user.exists() {
            return load_from(&user);
        }
    }

    Ok(Config::default())
}

fn load_from(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}
