use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// The two build variants a release can advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Minimal,
    Full,
}

impl Role {
    /// Label used in release notes to map a token onto this role.
    pub fn label(self) -> &'static str {
        match self {
            Role::Minimal => "命令行版",
            Role::Full => "完整版",
        }
    }

    /// Token used when the release notes map nothing onto this role.
    pub fn default_token(self) -> &'static str {
        match self {
            Role::Minimal => "Lite",
            Role::Full => "Full",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        [Role::Minimal, Role::Full]
            .into_iter()
            .find(|role| role.label() == label)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Minimal => f.write_str("minimal"),
            Role::Full => f.write_str("full"),
        }
    }
}

/// Tokens resolved for each role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantTokens {
    pub minimal: String,
    /// Every distinct token mapped onto the full role, in order of first mention.
    pub full: Vec<String>,
}

impl Default for VariantTokens {
    fn default() -> Self {
        Self {
            minimal: Role::Minimal.default_token().to_string(),
            full: vec![Role::Full.default_token().to_string()],
        }
    }
}

// `Token = 命令行版` anywhere on a line, with full-width `＝` allowed.
static MAPPING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^0-9A-Za-z._-])([0-9A-Za-z._-]+)\s*[=＝]\s*(命令行版|完整版)").unwrap()
});

/// Extract variant tokens from free-text release notes.
///
/// For the minimal role the last mapping wins. For the full role every mapped
/// token is kept, since a release may ship several full flavors.
pub fn resolve_variant_tokens(body: &str) -> VariantTokens {
    let mut minimal = None;
    let mut full: Vec<String> = Vec::new();

    for line in body.lines() {
        let line: String = line.chars().filter(|c| !matches!(c, '`' | '*')).collect();
        for caps in MAPPING.captures_iter(&line) {
            let token = caps[1].to_string();
            match Role::from_label(&caps[2]) {
                Some(Role::Minimal) => minimal = Some(token),
                Some(Role::Full) => {
                    if !full.contains(&token) {
                        full.push(token);
                    }
                }
                None => {}
            }
        }
    }

    let defaults = VariantTokens::default();
    VariantTokens {
        minimal: minimal.unwrap_or(defaults.minimal),
        full: if full.is_empty() { defaults.full } else { full },
    }
}
