//! Browser DOM backend for [`Document`] (made by FontLab https://www.fontlab.com/)
//!
//! Only meaningful on `wasm32` targets running inside a page.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::document::{Document, LinkCallback, LinkOutcome};
use crate::error::DocumentError;

/// [`Document`] over a live `web_sys::Document`.
#[derive(Debug, Clone)]
pub struct BrowserDocument {
    document: web_sys::Document,
}

impl BrowserDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// The document of the current window, if there is one.
    pub fn current() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }

    fn head(&self) -> Result<web_sys::HtmlHeadElement, DocumentError> {
        self.document
            .head()
            .ok_or_else(|| DocumentError::new("head", "document has no <head>"))
    }

    fn create(&self, tag: &'static str) -> Result<web_sys::Element, DocumentError> {
        self.document
            .create_element(tag)
            .map_err(js_error("create element"))
    }
}

fn js_error(operation: &'static str) -> impl Fn(JsValue) -> DocumentError {
    move |value| {
        let message = value.as_string().unwrap_or_else(|| format!("{value:?}"));
        DocumentError::new(operation, message)
    }
}

impl Document for BrowserDocument {
    fn append_stylesheet(&self, href: &str, on_settle: LinkCallback) -> Result<(), DocumentError> {
        let link = self.create("link")?;
        link.set_attribute("rel", "stylesheet")
            .map_err(js_error("set rel"))?;
        link.set_attribute("href", href).map_err(js_error("set href"))?;

        // One handler serves both events. load and error are exclusive, so it
        // runs once and wasm-bindgen frees it on that call.
        let handler = Closure::once_into_js(move |event: web_sys::Event| {
            let outcome = if event.type_() == "load" {
                LinkOutcome::Loaded
            } else {
                LinkOutcome::Failed
            };
            on_settle(outcome);
        });
        for event in ["load", "error"] {
            link.add_event_listener_with_callback(event, handler.unchecked_ref())
                .map_err(js_error("add listener"))?;
        }

        self.head()?
            .append_child(&link)
            .map_err(js_error("append link"))?;
        Ok(())
    }

    fn append_style(&self, css: &str) -> Result<(), DocumentError> {
        let style = self.create("style")?;
        style.set_text_content(Some(css));
        self.head()?
            .append_child(&style)
            .map_err(js_error("append style"))?;
        Ok(())
    }

    fn write_style(&self, id: &str, css: &str) -> Result<(), DocumentError> {
        let style = match self.document.get_element_by_id(id) {
            Some(existing) => existing,
            None => {
                let style = self.create("style")?;
                style.set_id(id);
                self.head()?
                    .append_child(&style)
                    .map_err(js_error("append style"))?;
                style
            }
        };
        style.set_text_content(Some(css));
        Ok(())
    }

    fn add_root_class(&self, class: &str) -> Result<(), DocumentError> {
        self.document
            .document_element()
            .ok_or_else(|| DocumentError::new("root class", "document has no root element"))?
            .class_list()
            .add_1(class)
            .map_err(js_error("root class"))
    }
}
