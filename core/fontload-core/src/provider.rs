//! Provider identities, aliases and detection (made by FontLab https://www.fontlab.com/)
//!
//! Every font service answers to a handful of nicknames. Callers may name one
//! outright ("tk", "Google", "selfhosted") or say nothing at all, in which case
//! we squint at the configuration and guess from the fields it carries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::FontRequest;
use crate::error::{FontLoadError, Result};

/// Canonical font provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Google,
    Adobe,
    FontAwesome,
    Bunny,
    Fontshare,
    Local,
    Custom,
}

impl Provider {
    pub const ALL: [Provider; 7] = [
        Provider::Google,
        Provider::Adobe,
        Provider::FontAwesome,
        Provider::Bunny,
        Provider::Fontshare,
        Provider::Local,
        Provider::Custom,
    ];

    /// Canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Adobe => "adobe",
            Provider::FontAwesome => "font_awesome",
            Provider::Bunny => "bunny",
            Provider::Fontshare => "fontshare",
            Provider::Local => "local",
            Provider::Custom => "custom",
        }
    }

    /// Every alias accepted for this provider, canonical name first.
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Provider::Google => &["google", "go", "g"],
            Provider::Adobe => &["adobe", "ad", "a", "typekit", "type", "kit", "ty", "tk"],
            Provider::FontAwesome => &["font_awesome", "font", "wesome", "fo", "we", "fw"],
            Provider::Bunny => &["bunny", "bun", "bu"],
            Provider::Fontshare => &["fontshare", "sh", "fs"],
            Provider::Local => &["local", "lo"],
            Provider::Custom => &["custom", "selfhosted"],
        }
    }

    /// Look up an alias, ignoring ASCII case.
    pub fn from_alias(alias: &str) -> Option<Provider> {
        let lowered = alias.trim().to_ascii_lowercase();
        Provider::ALL
            .into_iter()
            .find(|provider| provider.aliases().contains(&lowered.as_str()))
    }

    /// Guess the provider from the shape of a configuration.
    ///
    /// Rules are checked in a fixed order and the first hit wins; anything
    /// unrecognised is treated as a custom stylesheet.
    pub fn detect(config: &FontRequest) -> Provider {
        if config.has("projectId") || config.has("kitId") {
            Provider::Adobe
        } else if config.has("family")
            || (config.has("name") && config.key_equals("provider", "google"))
        {
            Provider::Google
        } else if config.key_equals("cdn", "fontawesome") || config.has("iconSet") {
            Provider::FontAwesome
        } else if config.key_equals("provider", "bunny") || config.has("bunnyFontFamily") {
            Provider::Bunny
        } else if config.key_equals("provider", "fontshare") || config.has("fontshareId") {
            Provider::Fontshare
        } else if config.has("localFontName") || config.has("localSrc") {
            Provider::Local
        } else {
            // url, css or name+src all land here, and so does everything else.
            Provider::Custom
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = FontLoadError;

    fn from_str(s: &str) -> Result<Self> {
        Provider::from_alias(s).ok_or_else(|| FontLoadError::UnsupportedProvider {
            name: s.trim().to_ascii_lowercase(),
        })
    }
}

/// Resolve the provider for a load.
///
/// An explicit name must be a known alias; a missing or blank name falls back
/// to [`Provider::detect`], which never fails.
pub fn resolve(explicit: Option<&str>, config: &FontRequest) -> Result<Provider> {
    match explicit.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => {
            let provider = name.parse::<Provider>();
            match &provider {
                Ok(p) => log::debug!("provider alias `{name}` resolved to {p}"),
                Err(_) => log::warn!("provider alias `{name}` is not recognised"),
            }
            provider
        }
        None => {
            let provider = Provider::detect(config);
            log::debug!("provider detected from configuration: {provider}");
            Ok(provider)
        }
    }
}
