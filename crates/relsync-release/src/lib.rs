//! Release resolution.
//!
//! Turns a hosted release into a [`ReleasePlan`]: which asset supplies the
//! minimal build, which (if any) supplies the full build, and where each is
//! cached locally. Variant tokens come from `<token> = <label>` lines in the
//! release notes, falling back to fixed defaults.
//!
//! ```
//! use relsync_release::{Role, resolve_variant_tokens};
//!
//! let tokens = resolve_variant_tokens("Alpha = 命令行版\nBeta = 命令行版");
//! assert_eq!(tokens.minimal, "Beta");
//! assert_eq!(tokens.full, vec![Role::Full.default_token().to_string()]);
//! ```

mod error;
mod keywords;
mod model;
mod naming;
mod plan;
mod source;

pub use error::{Error, Result};
pub use keywords::{Role, VariantTokens, resolve_variant_tokens};
pub use model::{AssetDescriptor, ReleaseChannel, ReleaseDescriptor};
pub use naming::{AssetNaming, AssetPattern};
pub use plan::{ReleasePlan, SelectedAsset, resolve};
pub use source::{DEFAULT_API_BASE, GithubReleases, ReleaseSource, RepoId};
