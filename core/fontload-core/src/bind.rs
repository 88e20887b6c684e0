//! Class binding after a successful load (made by FontLab https://www.fontlab.com/)
//!
//! Once a font is in place we can point a selector at it. Each selector owns
//! one style element, found by an id derived from the selector, and every
//! bind rewrites that element wholesale. Binding twice never stacks rules.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{Field, FontRequest};
use crate::document::Document;
use crate::error::Result;

static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("static pattern"));

/// Selector binding requested through the `use` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassBinding {
    /// CSS selector, or a class token when no font name is known.
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl ClassBinding {
    pub fn new(target: impl Into<String>, font_name: Option<String>) -> Self {
        Self {
            target: target.into(),
            font_name,
            weight: None,
            style: None,
            display: None,
        }
    }

    /// Build a binding for `target`, mirroring style hints from the request.
    pub fn from_request(
        target: impl Into<String>,
        font_name: Option<String>,
        config: &FontRequest,
    ) -> Self {
        Self {
            weight: config.text(Field::Weight),
            style: config.text(Field::Style),
            display: config.text(Field::BindingDisplay),
            ..Self::new(target, font_name)
        }
    }

    /// Id of the style element that holds this selector's rule.
    pub fn style_id(&self) -> String {
        style_element_id(&self.target)
    }

    /// The rule text, or `None` when there is no font name to apply.
    pub fn rule(&self) -> Option<String> {
        let name = self.font_name.as_deref()?;
        let mut css = format!("\n{} {{\n  font-family: \"{name}\", sans-serif;\n", self.target);
        if let Some(weight) = &self.weight {
            let _ = writeln!(css, "  font-weight: {weight};");
        }
        if let Some(style) = &self.style {
            let _ = writeln!(css, "  font-style: {style};");
        }
        if let Some(display) = &self.display {
            let _ = writeln!(css, "  font-display: {display};");
        }
        css.push_str("}\n");
        Some(css)
    }

    /// Class token used when the binding degrades to a root flag class.
    pub fn flag_class(&self) -> &str {
        self.target.strip_prefix('.').unwrap_or(&self.target)
    }
}

/// `font-style-` followed by the selector with every non-alphanumeric byte dashed out.
pub fn style_element_id(selector: &str) -> String {
    format!("font-style-{}", NON_ALNUM.replace_all(selector, "-"))
}

/// Apply a binding to the document.
pub fn bind<D: Document + ?Sized>(document: &D, binding: &ClassBinding) -> Result<()> {
    match binding.rule() {
        Some(rule) => {
            let id = binding.style_id();
            log::info!("binding {} to font {:?} via #{id}", binding.target, binding.font_name);
            document.write_style(&id, &rule)?;
        }
        None => {
            let class = binding.flag_class();
            if class.is_empty() {
                log::warn!("ignoring empty class binding");
                return Ok(());
            }
            log::info!("flagging root element with class {class}");
            document.add_root_class(class)?;
        }
    }
    Ok(())
}
