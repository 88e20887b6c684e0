//! `@font-face` rule generation (made by FontLab https://www.fontlab.com/)

use std::fmt::Write as _;

/// Inputs for a single `@font-face` rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontFace {
    pub family: String,
    pub src: String,
    pub weight: Option<String>,
    pub style: Option<String>,
    pub display: Option<String>,
}

impl FontFace {
    pub fn new(family: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            src: src.into(),
            ..Self::default()
        }
    }

    pub fn weight(mut self, weight: Option<String>) -> Self {
        self.weight = weight;
        self
    }

    pub fn style(mut self, style: Option<String>) -> Self {
        self.style = style;
        self
    }

    pub fn display(mut self, display: Option<String>) -> Self {
        self.display = display;
        self
    }

    /// Render the rule. Identical inputs always render identical bytes.
    pub fn to_css(&self) -> String {
        let mut css = String::from("@font-face {\n");
        let _ = writeln!(css, "  font-family: '{}';", self.family);
        let _ = writeln!(
            css,
            "  src: url('{}') format('{}');",
            self.src,
            format_hint(&self.src)
        );
        if let Some(weight) = &self.weight {
            let _ = writeln!(css, "  font-weight: {weight};");
        }
        if let Some(style) = &self.style {
            let _ = writeln!(css, "  font-style: {style};");
        }
        let display = self.display.as_deref().unwrap_or("swap");
        let _ = writeln!(css, "  font-display: {display};");
        css.push_str("}\n");
        css
    }
}

/// CSS `format()` hint for a font URL, judged by its extension.
///
/// Query strings and fragments are ignored; unknown extensions get `woff2`.
pub fn format_hint(src: &str) -> &'static str {
    let path = src.split(['?', '#']).next().unwrap_or(src);
    let ext = match path.rsplit_once('.') {
        Some((_, ext)) if !ext.contains('/') => ext.to_ascii_lowercase(),
        _ => return "woff2",
    };

    match ext.as_str() {
        "woff" => "woff",
        "ttf" => "truetype",
        "otf" => "opentype",
        "svg" => "svg",
        "eot" => "embedded-opentype",
        _ => "woff2",
    }
}
