use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[clap(about, version)]
pub struct Opts {
    #[clap(long, default_value = ".", help = "Root directory of the repository")]
    pub root: PathBuf,
    #[clap(long, help = "Config file (default: <root>/webindex.toml if present)")]
    pub config: Option<PathBuf>,
    #[clap(long, help = "Override the fast-building architecture")]
    pub fast_arch: Option<String>,
}

#[derive(Deserialize)]
pub struct Config {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_component")]
    pub component: String,
    /// Architecture whose builds usually land first; a newest version
    /// carrying only this architecture gets flagged as delayed
    #[serde(default = "default_fast_arch")]
    pub fast_arch: String,
}

impl Config {
    /// An explicitly given config path must be readable; the default path
    /// is optional and falls back to built-in defaults.
    pub fn load(opts: &Opts) -> Result<Config> {
        let mut config = match &opts.config {
            Some(path) => Config::read(path)?,
            None => {
                let path = opts.root.join("webindex.toml");
                if path.is_file() {
                    Config::read(&path)?
                } else {
                    Config::default()
                }
            }
        };
        if let Some(arch) = &opts.fast_arch {
            config.fast_arch = arch.clone();
        }
        Ok(config)
    }

    fn read(path: &Path) -> Result<Config> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&data).context("Failed to parse config file")
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            title: default_title(),
            component: default_component(),
            fast_arch: default_fast_arch(),
        }
    }
}

#[inline]
fn default_title() -> String {
    "aptly-webindex".to_string()
}

#[inline]
fn default_component() -> String {
    "main".to_string()
}

#[inline]
fn default_fast_arch() -> String {
    "amd64".to_string()
}
