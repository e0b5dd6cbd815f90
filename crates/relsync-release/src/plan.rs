use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::keywords::{Role, VariantTokens, resolve_variant_tokens};
use crate::model::{AssetDescriptor, ReleaseChannel, ReleaseDescriptor};
use crate::naming::AssetNaming;
use crate::source::{ReleaseSource, RepoId};

/// An asset chosen for a role, with the token it was matched by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedAsset {
    pub role: Role,
    pub token: String,
    pub asset: AssetDescriptor,
}

/// Everything later stages need to know about the release being installed.
#[derive(Debug, Clone)]
pub struct ReleasePlan {
    pub release: ReleaseDescriptor,
    pub naming: AssetNaming,
    pub tokens: VariantTokens,
    pub minimal: SelectedAsset,
    /// The smallest full asset, if any matched.
    pub full: Option<SelectedAsset>,
    /// Every asset that matched a full token.
    pub full_candidates: Vec<SelectedAsset>,
}

impl ReleasePlan {
    /// Select assets from an already fetched release.
    ///
    /// A missing minimal asset is an error. A missing full asset only leaves
    /// [`ReleasePlan::full`] empty.
    pub fn from_release(release: ReleaseDescriptor, naming: AssetNaming) -> Result<Self> {
        let tokens = resolve_variant_tokens(&release.body);
        info!(minimal = %tokens.minimal, full = ?tokens.full, "resolved variant tokens");

        let pattern = naming.pattern(&tokens.minimal)?;
        let minimal = release
            .assets
            .iter()
            .find(|asset| pattern.is_match(&asset.name))
            .map(|asset| SelectedAsset {
                role: Role::Minimal,
                token: tokens.minimal.clone(),
                asset: asset.clone(),
            })
            .ok_or_else(|| Error::MissingAsset {
                role: Role::Minimal,
                pattern: pattern.template().to_string(),
            })?;

        let patterns = tokens
            .full
            .iter()
            .map(|token| Ok((token, naming.pattern(token)?)))
            .collect::<Result<Vec<_>>>()?;
        let full_candidates: Vec<SelectedAsset> = release
            .assets
            .iter()
            .filter(|asset| asset.name != minimal.asset.name)
            .filter_map(|asset| {
                patterns
                    .iter()
                    .find(|(_, pattern)| pattern.is_match(&asset.name))
                    .map(|(token, _)| SelectedAsset {
                        role: Role::Full,
                        token: (*token).clone(),
                        asset: asset.clone(),
                    })
            })
            .collect();

        if full_candidates.len() > 1 {
            let listing: Vec<String> = full_candidates
                .iter()
                .map(|c| format!("{} ({} bytes)", c.asset.name, c.asset.size))
                .collect();
            info!(candidates = ?listing, "multiple full assets advertised, choosing the smallest");
        }
        let full = full_candidates
            .iter()
            .min_by_key(|c| c.asset.size)
            .cloned();
        match &full {
            Some(selected) => info!(asset = %selected.asset.name, size = selected.asset.size, "selected full asset"),
            None => warn!(tokens = ?tokens.full, "no full asset matches"),
        }
        info!(asset = %minimal.asset.name, size = minimal.asset.size, "selected minimal asset");

        Ok(Self {
            release,
            naming,
            tokens,
            minimal,
            full,
            full_candidates,
        })
    }

    pub fn version(&self) -> &str {
        self.release.version()
    }

    /// Local file name the selected asset is cached under.
    pub fn cache_file_name(&self, selected: &SelectedAsset) -> String {
        self.naming.cache_file_name(self.version(), &selected.token)
    }
}

/// Fetch one release from `source` and select its assets.
pub fn resolve<S: ReleaseSource + ?Sized>(
    source: &S,
    repo: &RepoId,
    channel: ReleaseChannel,
    naming: AssetNaming,
) -> Result<ReleasePlan> {
    let release = source.fetch_release(repo, channel)?;
    ReleasePlan::from_release(release, naming)
}
