use std::fmt;
use std::str::FromStr;

use relsync_fetch::HttpClient;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::{ReleaseChannel, ReleaseDescriptor};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// An `owner/name` repository identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidRepo(s.to_string());
        let (owner, name) = s.trim().split_once('/').ok_or_else(invalid)?;
        let valid = |part: &str| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        };
        if !valid(owner) || !valid(name) {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Where release metadata comes from.
pub trait ReleaseSource {
    fn fetch_release(&self, repo: &RepoId, channel: ReleaseChannel) -> Result<ReleaseDescriptor>;
}

/// A GitHub-compatible releases API.
pub struct GithubReleases<C> {
    client: C,
    api_base: String,
}

impl<C: HttpClient> GithubReleases<C> {
    pub fn new(client: C) -> Self {
        Self::with_api_base(client, DEFAULT_API_BASE)
    }

    pub fn with_api_base(client: C, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self { client, api_base }
    }

    pub fn endpoint(&self, repo: &RepoId, channel: ReleaseChannel) -> String {
        match channel {
            ReleaseChannel::Release => format!("{}/repos/{repo}/releases/latest", self.api_base),
            ReleaseChannel::Latest => format!("{}/repos/{repo}/releases?per_page=1", self.api_base),
        }
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let headers = [
            ("Accept".to_string(), "application/vnd.github+json".to_string()),
            ("X-GitHub-Api-Version".to_string(), "2022-11-28".to_string()),
        ];
        let response = self.client.get(url, &headers).map_err(|e| Error::Request {
            url: url.to_string(),
            source: Box::new(e),
        })?;

        serde_json::from_reader(response.body).map_err(|source| {
            if source.is_io() {
                Error::Body {
                    url: url.to_string(),
                    source: source.into(),
                }
            } else {
                Error::Parse {
                    url: url.to_string(),
                    source,
                }
            }
        })
    }
}

impl<C: HttpClient> ReleaseSource for GithubReleases<C> {
    fn fetch_release(&self, repo: &RepoId, channel: ReleaseChannel) -> Result<ReleaseDescriptor> {
        let url = self.endpoint(repo, channel);
        debug!(%url, %channel, "querying release");

        let release = match channel {
            ReleaseChannel::Release => self.get_json::<ReleaseDescriptor>(&url)?,
            ReleaseChannel::Latest => self
                .get_json::<Vec<ReleaseDescriptor>>(&url)?
                .into_iter()
                .next()
                .ok_or_else(|| Error::NoRelease(repo.to_string()))?,
        };

        info!(tag = %release.tag, assets = release.assets.len(), "found release");
        Ok(release)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_id() {
        let repo: RepoId = "MAA1999/M9A".parse().unwrap();
        assert_eq!(repo.owner, "MAA1999");
        assert_eq!(repo.name, "M9A");
        assert_eq!(repo.to_string(), "MAA1999/M9A");
    }

    #[test]
    fn test_invalid_repo_id() {
        for bad in ["", "M9A", "/M9A", "owner/", "a/b/c", "own er/name"] {
            assert!(bad.parse::<RepoId>().is_err(), "{bad} should be rejected");
        }
    }
}
