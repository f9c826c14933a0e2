use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::Path;

use crate::error::CoreError;
use crate::grid::{DEFAULT_SECTOR_COUNT, MAX_SECTOR_COUNT};
use crate::i18n::Locale;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub map: MapConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_sectors")]
    pub sectors: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            sectors: default_sectors(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}

/// Configuration after every layer has been applied.
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub resolved_output: String,
    pub resolved_locale: Locale,
}

impl EffectiveConfig {
    /// Sectors on the live map.
    #[must_use]
    pub const fn sectors(&self) -> u32 {
        self.project.map.sectors
    }
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            user: UserConfig::default(),
            resolved_output: "text".to_string(),
            resolved_locale: Locale::default(),
        }
    }
}

/// Explicit values from the command line; `None` defers to lower layers.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub output: Option<String>,
    pub locale: Option<String>,
}

fn parse_file<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let parsed = toml::from_str::<T>(&content).map_err(|err| CoreError::ConfigParse {
        path: path.display().to_string(),
        reason: err.message().to_string(),
    })?;
    Ok(parsed)
}

/// Load `.solargrid/config.toml` under `project_root`, or defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed, or if
/// `map.sectors` exceeds [`MAX_SECTOR_COUNT`].
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(".solargrid/config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }
    let config: ProjectConfig = parse_file(&path)?;
    if config.map.sectors > MAX_SECTOR_COUNT {
        return Err(CoreError::ConfigParse {
            path: path.display().to_string(),
            reason: format!(
                "map.sectors is {}, at most {MAX_SECTOR_COUNT} is supported",
                config.map.sectors
            ),
        }
        .into());
    }
    Ok(config)
}

/// Load `<config_dir>/solargrid/config.toml`, or defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("solargrid/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }
    parse_file(&path)
}

/// Resolve the effective configuration.
///
/// Precedence for both output mode and locale: command line, environment
/// (`FORMAT`, `SOLARGRID_LOCALE`), user config, project config, default.
///
/// # Errors
///
/// Returns an error if a config file is malformed or the winning locale is
/// not supported.
pub fn resolve_config(project_root: &Path, overrides: &ConfigOverrides) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;

    let env_format = env::var("FORMAT").ok();
    let env_locale = env::var("SOLARGRID_LOCALE").ok();

    let resolved_output = resolve_output(
        [
            overrides.output.as_deref(),
            env_format.as_deref(),
            user.output.as_deref(),
            project.display.output.as_deref(),
        ],
        std::io::stdout().is_terminal(),
    );
    let resolved_locale = resolve_locale([
        overrides.locale.as_deref(),
        env_locale.as_deref(),
        user.locale.as_deref(),
        project.display.locale.as_deref(),
    ])?;

    Ok(EffectiveConfig {
        project,
        user,
        resolved_output,
        resolved_locale,
    })
}

fn normalize_output_mode(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pretty" | "human" => Some("pretty"),
        "text" | "plain" => Some("text"),
        "json" => Some("json"),
        _ => None,
    }
}

/// First recognised output mode in precedence order, else pretty on a TTY
/// and text when piped. Unrecognised values are skipped.
fn resolve_output(layers: [Option<&str>; 4], is_tty: bool) -> String {
    layers
        .into_iter()
        .flatten()
        .find_map(normalize_output_mode)
        .unwrap_or(if is_tty { "pretty" } else { "text" })
        .to_string()
}

/// First locale set in precedence order. A set but unsupported value is an
/// error rather than being skipped.
fn resolve_locale(layers: [Option<&str>; 4]) -> Result<Locale, CoreError> {
    layers
        .into_iter()
        .flatten()
        .find(|raw| !raw.trim().is_empty())
        .map_or(Ok(Locale::default()), |raw| raw.parse())
}

const fn default_sectors() -> u32 {
    DEFAULT_SECTOR_COUNT
}
