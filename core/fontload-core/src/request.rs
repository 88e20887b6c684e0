//! Per-provider request construction (made by FontLab https://www.fontlab.com/)
//!
//! Each provider speaks its own dialect: Google wants `css2?family=Name:wght@400;700`,
//! Bunny wants comma-separated variants, Adobe only needs a kit id, and local or
//! self-hosted faces skip the network entirely and become an inline `@font-face`.
//! Builders validate their required fields up front and return a [`LoadPlan`]
//! that is pure data, so a plan can be inspected without touching any document.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::bind::ClassBinding;
use crate::config::{Field, FontRequest};
use crate::error::{FontLoadError, Result};
use crate::fontface::FontFace;
use crate::provider::{self, Provider};

pub const GOOGLE_CSS2_URL: &str = "https://fonts.googleapis.com/css2";
pub const TYPEKIT_URL: &str = "https://use.typekit.net";
pub const FONT_AWESOME_CDN: &str = "https://cdnjs.cloudflare.com/ajax/libs/font-awesome";
pub const FONT_AWESOME_DEFAULT_VERSION: &str = "6.5.1";
pub const BUNNY_URL: &str = "https://fonts.bunny.net";
pub const FONTSHARE_CSS_URL: &str = "https://fontshare.com/api/css";

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static pattern"));

/// What a load injects: a stylesheet to fetch or CSS text to inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RenderedAsset {
    Stylesheet(String),
    InlineCss(String),
}

/// Everything a load needs, decided before any document is touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadPlan {
    pub provider: Provider,
    pub asset: RenderedAsset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<ClassBinding>,
}

/// Resolve the provider and build its plan in one step.
pub fn plan(explicit: Option<&str>, config: &FontRequest) -> Result<LoadPlan> {
    let provider = provider::resolve(explicit, config)?;
    build(provider, config)
}

/// Build the plan for an already resolved provider.
pub fn build(provider: Provider, config: &FontRequest) -> Result<LoadPlan> {
    let (asset, font_name) = match provider {
        Provider::Google => google(config)?,
        Provider::Adobe => adobe(config)?,
        Provider::FontAwesome => font_awesome(config),
        Provider::Bunny => bunny(config)?,
        Provider::Fontshare => fontshare(config)?,
        Provider::Local => local(config)?,
        Provider::Custom => custom(config)?,
    };

    // Providers that manage their own families still honour an explicit `name`.
    let font_name = font_name.or_else(|| config.text(Field::FaceName));
    let binding = config
        .text(Field::Use)
        .map(|target| ClassBinding::from_request(target, font_name, config));

    log::debug!("{provider} plan: {asset:?}");
    Ok(LoadPlan {
        provider,
        asset,
        binding,
    })
}

type Built = (RenderedAsset, Option<String>);

fn google(config: &FontRequest) -> Result<Built> {
    let name = config.text(Field::GoogleName).ok_or_else(|| {
        FontLoadError::missing(
            Provider::Google,
            "Font name or family is required for Google Fonts.",
        )
    })?;

    let family = plus_separated(&name);
    let weights = non_empty(config.list(Field::Weight)).unwrap_or_else(|| vec!["400".into()]);
    let mut url = format!(
        "{GOOGLE_CSS2_URL}?family={family}:wght@{}",
        weights.join(";")
    );
    if let Some(subsets) = non_empty(config.list(Field::Subset)) {
        url.push_str(&format!("&subset={}", subsets.join(",")));
    }
    let display = config.text(Field::Display).unwrap_or_else(|| "swap".into());
    url.push_str(&format!("&display={display}"));

    Ok((RenderedAsset::Stylesheet(url), Some(family.replace('+', " "))))
}

fn adobe(config: &FontRequest) -> Result<Built> {
    let kit = config.text(Field::KitId).ok_or_else(|| {
        FontLoadError::missing(
            Provider::Adobe,
            "Adobe Fonts Project ID or Kit ID is required for Adobe Fonts.",
        )
    })?;
    Ok((RenderedAsset::Stylesheet(format!("{TYPEKIT_URL}/{kit}.css")), None))
}

fn font_awesome(config: &FontRequest) -> Built {
    let url = match (config.text(Field::Url), config.text(Field::Version)) {
        (Some(url), _) => url,
        (None, Some(version)) => format!("{FONT_AWESOME_CDN}/{version}/css/all.min.css"),
        (None, None) => format!("{FONT_AWESOME_CDN}/{FONT_AWESOME_DEFAULT_VERSION}/css/all.min.css"),
    };
    (RenderedAsset::Stylesheet(url), None)
}

fn bunny(config: &FontRequest) -> Result<Built> {
    let family = config.text(Field::BunnyFamily).ok_or_else(|| {
        FontLoadError::missing(
            Provider::Bunny,
            "Font family (bunnyFontFamily or family) is required for Bunny Fonts.",
        )
    })?;

    let format = config.text(Field::Format).unwrap_or_else(|| "css2".into());
    let mut url = format!("{BUNNY_URL}/{format}?family={}", plus_separated(&family));
    if let Some(variants) = non_empty(config.list(Field::Variant)) {
        url.push_str(&format!("&variant={}", variants.join(",")));
    }
    if let Some(subsets) = non_empty(config.list(Field::Subset)) {
        url.push_str(&format!("&subset={}", subsets.join(",")));
    }

    Ok((RenderedAsset::Stylesheet(url), Some(family)))
}

fn fontshare(config: &FontRequest) -> Result<Built> {
    let id = config.text(Field::FontshareId).ok_or_else(|| {
        FontLoadError::missing(
            Provider::Fontshare,
            "Font ID (fontshareId or id) is required for Fontshare.",
        )
    })?;
    Ok((RenderedAsset::Stylesheet(format!("{FONTSHARE_CSS_URL}?f={id}")), None))
}

fn local(config: &FontRequest) -> Result<Built> {
    let name = config.text(Field::LocalName).ok_or_else(|| {
        FontLoadError::missing(
            Provider::Local,
            "Font name (localFontName or name) is required for local fonts.",
        )
    })?;
    let src = config.text(Field::LocalSource).ok_or_else(|| {
        FontLoadError::missing(
            Provider::Local,
            "Font source (localSrc or src) is required for local fonts.",
        )
    })?;

    let css = face(config, &name, src).to_css();
    Ok((RenderedAsset::InlineCss(css), Some(name)))
}

fn custom(config: &FontRequest) -> Result<Built> {
    if let Some(url) = config.text(Field::Url) {
        return Ok((RenderedAsset::Stylesheet(url), None));
    }
    if let Some(css) = config.text(Field::Css) {
        return Ok((RenderedAsset::InlineCss(css), None));
    }
    match (config.text(Field::FaceName), config.text(Field::Source)) {
        (Some(name), Some(src)) => {
            let css = face(config, &name, src).to_css();
            Ok((RenderedAsset::InlineCss(css), Some(name)))
        }
        _ => Err(FontLoadError::missing(
            Provider::Custom,
            "For 'custom' or 'selfhosted' provider, you must provide 'url', 'css', or both 'name' and 'src' in fontConfig.",
        )),
    }
}

fn face(config: &FontRequest, name: &str, src: String) -> FontFace {
    FontFace::new(name, src)
        .weight(config.text(Field::Weight))
        .style(config.text(Field::Style))
        .display(config.text(Field::Display))
}

/// Collapse whitespace runs into `+`, the way font CDNs spell family names.
fn plus_separated(name: &str) -> String {
    WHITESPACE.replace_all(name, "+").into_owned()
}

fn non_empty(list: Option<Vec<String>>) -> Option<Vec<String>> {
    list.filter(|items| !items.is_empty())
}
