use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use relsync_verify::Sha256Digest;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

/// A published release, as returned by the hosted release API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDescriptor {
    #[serde(rename = "tag_name")]
    pub tag: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub assets: Vec<AssetDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    pub name: String,
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
    #[serde(default)]
    pub size: u64,
    /// Published digest in `sha256:<hex>` form, when the host provides one.
    #[serde(default)]
    pub digest: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

static BODY_DIGEST: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9a-f]{64}").unwrap());

impl ReleaseDescriptor {
    /// The tag without its leading `v`.
    pub fn version(&self) -> &str {
        self.tag
            .strip_prefix(['v', 'V'])
            .unwrap_or(&self.tag)
    }

    pub fn asset(&self, name: &str) -> Option<&AssetDescriptor> {
        self.assets.iter().find(|a| a.name == name)
    }

    /// Look up the published SHA-256 for `asset_name`.
    ///
    /// The asset's own `digest` field is preferred. Otherwise the release notes
    /// are scanned for a line naming the asset, mentioning `sha256` and
    /// carrying a 64-digit hex string.
    pub fn published_digest(&self, asset_name: &str) -> Option<Sha256Digest> {
        if let Some(raw) = self.asset(asset_name).and_then(|a| a.digest.as_deref()) {
            let is_sha256 = raw
                .get(..7)
                .is_some_and(|p| p.eq_ignore_ascii_case("sha256:"));
            if is_sha256 {
                match Sha256Digest::from_str(raw) {
                    Ok(digest) => {
                        debug!(asset = asset_name, "digest published with asset");
                        return Some(digest);
                    }
                    Err(e) => warn!(asset = asset_name, error = %e, "ignoring malformed asset digest"),
                }
            }
        }

        self.body
            .lines()
            .filter(|line| line.contains(asset_name))
            .map(str::to_lowercase)
            .filter(|line| line.contains("sha256"))
            .find_map(|line| {
                BODY_DIGEST
                    .find(&line)
                    .and_then(|m| Sha256Digest::from_str(m.as_str()).ok())
            })
            .inspect(|_| debug!(asset = asset_name, "digest found in release notes"))
    }
}

/// Which release the resolver asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseChannel {
    /// The latest non-prerelease, non-draft release.
    #[default]
    Release,
    /// The newest release of any kind, prereleases included.
    Latest,
}

impl fmt::Display for ReleaseChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseChannel::Release => f.write_str("release"),
            ReleaseChannel::Latest => f.write_str("latest"),
        }
    }
}

impl FromStr for ReleaseChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "release" => Ok(ReleaseChannel::Release),
            "latest" => Ok(ReleaseChannel::Latest),
            other => Err(format!("unknown release channel '{other}'")),
        }
    }
}
