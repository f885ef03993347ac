use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub activity: ActivityConfig,
    #[serde(default)]
    pub blog: BlogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_username")]
    pub default_username: String,
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityConfig {
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogConfig {
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_dataset")]
    pub dataset: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}
fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}
fn default_username() -> String {
    "octocat".to_string()
}
fn default_limit() -> usize {
    5
}
fn default_proxy_url() -> String {
    "http://127.0.0.1:3000/api/github".to_string()
}
fn default_refresh_interval() -> u64 {
    300
}
fn default_dataset() -> String {
    "production".to_string()
}
fn default_api_version() -> String {
    "2023-05-03".to_string()
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            default_username: default_username(),
            default_limit: default_limit(),
        }
    }
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            limit: default_limit(),
            proxy_url: default_proxy_url(),
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: default_dataset(),
            api_version: default_api_version(),
        }
    }
}

impl ProxyConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind
            .parse()
            .with_context(|| format!("Invalid proxy bind address: {}", self.bind))
    }
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::read(path);
        }

        let mut candidates = Vec::new();

        if let Some(home) = std::env::var_os("HOME") {
            candidates.push(PathBuf::from(home).join(".config/ghfeed/config.toml"));
        }

        // macOS: ~/Library/Application Support/ghfeed/
        if let Some(proj_dirs) = ProjectDirs::from("", "", "ghfeed") {
            candidates.push(proj_dirs.config_dir().join("config.toml"));
        }

        for config_path in &candidates {
            if config_path.exists() {
                return Self::read(config_path);
            }
        }

        Ok(AppConfig::default())
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content).with_context(|| "Failed to parse config file")
    }

    pub fn log_dir(&self) -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("", "", "ghfeed") {
            return proj_dirs.data_dir().join("logs");
        }
        PathBuf::from(".local/share/ghfeed/logs")
    }
}
