use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default base directory holding the dataset CSV (`BRAIN_DIR`).
pub const DEFAULT_BRAIN_DIR: &str = "../brain";
/// Default base directory for downloaded inputs (`INPUT_DIR`).
pub const DEFAULT_INPUT_DIR: &str = "../input";
/// Default dataset name; the CSV is `{brain_dir}/{brain_name}.csv` (`MIT_BRAIN`).
pub const DEFAULT_BRAIN_NAME: &str = "mit_brain";
/// Subdirectory of the input directory that receives caption files.
pub const CAPTIONS_SUBDIR: &str = "captions";

/// Caption tool settings (section `[tool]` in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Program name or path of the subtitle tool.
    pub program: String,
    /// Per-row timeout for one caption download.
    pub fetch_timeout_secs: u64,
    /// Timeout for the `--version` presence check.
    pub probe_timeout_secs: u64,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: "yt-dlp".to_string(),
            fetch_timeout_secs: 60,
            probe_timeout_secs: 5,
        }
    }
}

/// Global configuration loaded from `~/.config/capdl/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapdlConfig {
    /// Caption language code requested from the tool.
    pub language: String,
    /// Name of the CSV column holding the video URL.
    pub url_column: String,
    #[serde(default)]
    pub tool: ToolConfig,
}

impl Default for CapdlConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            url_column: "url".to_string(),
            tool: ToolConfig::default(),
        }
    }
}

/// Where the dataset and caption directory live when not given explicitly.
///
/// Filled from the environment by the CLI; the core never reads the
/// environment itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub brain_dir: PathBuf,
    pub input_dir: PathBuf,
    pub brain_name: String,
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self {
            brain_dir: PathBuf::from(DEFAULT_BRAIN_DIR),
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            brain_name: DEFAULT_BRAIN_NAME.to_string(),
        }
    }
}

impl DatasetPaths {
    /// `{brain_dir}/{brain_name}.csv`
    pub fn csv_path(&self) -> PathBuf {
        self.brain_dir.join(format!("{}.csv", self.brain_name))
    }

    /// `{input_dir}/captions`
    pub fn captions_dir(&self) -> PathBuf {
        self.input_dir.join(CAPTIONS_SUBDIR)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("capdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CapdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CapdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: CapdlConfig = toml::from_str(&data)?;
    Ok(cfg)
}
