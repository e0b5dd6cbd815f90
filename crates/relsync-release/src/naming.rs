use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const WILDCARD: &str = "[0-9A-Za-z._-]+";

/// The fixed parts of artifact file names: `<product>-<platform>-<arch>-v*-<token>.zip`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetNaming {
    pub product: String,
    pub platform: String,
    pub arch: String,
}

impl Default for AssetNaming {
    fn default() -> Self {
        Self {
            product: "M9A".into(),
            platform: "win".into(),
            arch: "x86_64".into(),
        }
    }
}

impl AssetNaming {
    /// File name template for `token`, with `*` standing for the version.
    pub fn template(&self, token: &str) -> String {
        format!("{}-{}-{}-v*-{token}.zip", self.product, self.platform, self.arch)
    }

    pub fn pattern(&self, token: &str) -> Result<AssetPattern> {
        AssetPattern::new(&self.template(token))
    }

    /// Local file name for a cached artifact.
    pub fn cache_file_name(&self, version: &str, token: &str) -> String {
        self.template(token).replacen('*', version, 1)
    }
}

/// A compiled file name template.
#[derive(Debug, Clone)]
pub struct AssetPattern {
    template: String,
    regex: Regex,
}

impl AssetPattern {
    pub fn new(template: &str) -> Result<Self> {
        let body = template
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(WILDCARD);
        let regex = Regex::new(&format!("^{body}$")).map_err(|source| Error::Pattern {
            pattern: template.to_string(),
            source,
        })?;

        Ok(Self {
            template: template.to_string(),
            regex,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_and_cache_name() {
        let naming = AssetNaming::default();
        assert_eq!(naming.template("Lite"), "M9A-win-x86_64-v*-Lite.zip");
        assert_eq!(
            naming.cache_file_name("2.1.0", "Lite"),
            "M9A-win-x86_64-v2.1.0-Lite.zip"
        );
    }

    #[test]
    fn test_pattern_tolerates_versions() {
        let pattern = AssetNaming::default().pattern("Lite").unwrap();
        assert!(pattern.is_match("M9A-win-x86_64-v2.1.0-Lite.zip"));
        assert!(pattern.is_match("M9A-win-x86_64-v2.1.0-beta.3-Lite.zip"));
        assert!(pattern.is_match("M9A-win-x86_64-v10.0_rc1-Lite.zip"));
    }

    #[test]
    fn test_pattern_is_anchored_and_literal() {
        let pattern = AssetNaming::default().pattern("Lite").unwrap();
        assert!(!pattern.is_match("M9A-win-x86_64-v2.1.0-Lite.zip.sha256"));
        assert!(!pattern.is_match("old-M9A-win-x86_64-v2.1.0-Lite.zip"));
        assert!(!pattern.is_match("M9A-win-x86_64-v2.1.0-Lite_zip"));
        assert!(!pattern.is_match("M9A-win-x86_64-v-Lite.zip"));
        assert!(!pattern.is_match("M9A-win-x86_64-v2.1.0-Full.zip"));
    }

    #[test]
    fn test_custom_naming() {
        let naming = AssetNaming {
            product: "tool".into(),
            platform: "linux".into(),
            arch: "aarch64".into(),
        };
        let pattern = naming.pattern("Full").unwrap();
        assert_eq!(pattern.template(), "tool-linux-aarch64-v*-Full.zip");
        assert!(pattern.is_match("tool-linux-aarch64-v0.9-Full.zip"));
    }
}
