use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use relsync_release::{AssetNaming, DEFAULT_API_BASE, ReleaseChannel, RepoId};
use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG: &str = r#"# relsync configuration

[paths]
# Installation directories to update, in order.
targets = ["./M9A"]

# Scratch area for downloads and configuration backups. Removed after each run.
staging = "./relsync-staging"

[release]
# Repository on the release host, as owner/name.
repo = "MAA1999/M9A"

# "release" for the latest stable release, "latest" to include prereleases.
channel = "release"

api_base = "https://api.github.com"

# e.g. "http://127.0.0.1:7890" or "socks5://127.0.0.1:1080"; empty for none.
proxy = ""

# Download the full build when the minimal one lacks bundled dependencies.
full_download_enabled = true

[naming]
product = "M9A"
platform = "win"
arch = "x86_64"

[logs]
# Also write each run's log to a file in `dir`.
save_enabled = false
dir = "logs"

# Older run logs beyond this count are deleted.
max_files = 15

# Console level; RUST_LOG overrides it.
level = "info"
"#;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub release: ReleaseConfig,
    pub naming: AssetNaming,
    pub logs: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub targets: Vec<PathBuf>,
    /// Single-target form kept for older configuration files.
    pub target: Option<PathBuf>,
    pub staging: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            target: None,
            staging: std::env::temp_dir().join("relsync"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    pub repo: String,
    pub channel: ReleaseChannel,
    pub api_base: String,
    pub proxy: String,
    pub full_download_enabled: bool,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            repo: String::new(),
            channel: ReleaseChannel::default(),
            api_base: DEFAULT_API_BASE.to_string(),
            proxy: String::new(),
            full_download_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub save_enabled: bool,
    pub dir: PathBuf,
    pub max_files: usize,
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            save_enabled: false,
            dir: PathBuf::from("logs"),
            max_files: 15,
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Every configured target, `paths.target` first, without duplicates.
    pub fn targets(&self) -> Vec<PathBuf> {
        let mut targets: Vec<PathBuf> = Vec::new();
        for target in self.paths.target.iter().chain(&self.paths.targets) {
            if !targets.contains(target) {
                targets.push(target.clone());
            }
        }
        targets
    }

    pub fn repo(&self) -> Result<RepoId> {
        self.release
            .repo
            .parse::<RepoId>()
            .with_context(|| format!("release.repo '{}' is not valid", self.release.repo))
    }

    pub fn proxy(&self) -> Option<String> {
        let proxy = self.release.proxy.trim();
        (!proxy.is_empty()).then(|| proxy.to_string())
    }

    /// Check the settings every mode depends on.
    pub fn validate(&self) -> Result<()> {
        if self.targets().is_empty() {
            bail!("no installation directory configured in [paths] targets");
        }
        if self.paths.staging.as_os_str().is_empty() {
            bail!("paths.staging must not be empty");
        }
        Ok(())
    }
}

/// Load the configuration at `path`.
///
/// When the file does not exist a commented default is written there and
/// `None` is returned so the caller can stop and let the user edit it.
pub fn load_or_init(path: &Path) -> Result<Option<Config>> {
    if !path.exists() {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write default config to {}", path.display()))?;
        return Ok(None);
    }

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config =
        Config::parse(&text).with_context(|| format!("Failed to parse config {}", path.display()))?;
    config.validate()?;
    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_template_is_valid() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        config.validate().unwrap();
        assert_eq!(config.targets(), vec![PathBuf::from("./M9A")]);
        assert_eq!(config.repo().unwrap().to_string(), "MAA1999/M9A");
        assert_eq!(config.release.channel, ReleaseChannel::Release);
        assert_eq!(config.proxy(), None);
        assert!(config.release.full_download_enabled);
        assert_eq!(config.naming, AssetNaming::default());
        assert_eq!(config.logs, LogConfig::default());
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = Config::parse("[paths]\ntargets = [\"/opt/a\"]\n").unwrap();
        assert_eq!(config.release.api_base, DEFAULT_API_BASE);
        assert_eq!(config.logs.max_files, 15);
        assert!(config.release.full_download_enabled);
    }

    #[test]
    fn test_single_target_is_merged() {
        let config = Config::parse(
            r#"
            [paths]
            target = "/opt/a"
            targets = ["/opt/b", "/opt/a"]
            "#,
        )
        .unwrap();
        assert_eq!(
            config.targets(),
            vec![PathBuf::from("/opt/a"), PathBuf::from("/opt/b")]
        );
    }

    #[test]
    fn test_channel_and_proxy() {
        let config = Config::parse(
            r#"
            [release]
            repo = "owner/name"
            channel = "latest"
            proxy = " http://127.0.0.1:7890 "
            full_download_enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(config.release.channel, ReleaseChannel::Latest);
        assert_eq!(config.proxy().as_deref(), Some("http://127.0.0.1:7890"));
        assert!(!config.release.full_download_enabled);
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::parse("[release]\nchannel = \"nightly\"\n").is_err());

        let config = Config::parse("[release]\nrepo = \"no-slash\"\n").unwrap();
        assert!(config.repo().is_err());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_writes_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("relsync.toml");

        assert!(load_or_init(&path).unwrap().is_none());
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);

        let config = load_or_init(&path).unwrap().unwrap();
        assert_eq!(config.targets(), vec![PathBuf::from("./M9A")]);
    }
}
