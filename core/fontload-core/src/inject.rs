//! Attach rendered assets to a document (made by FontLab https://www.fontlab.com/)

use std::rc::Rc;

use crate::bind::{bind, ClassBinding};
use crate::completion::Completion;
use crate::document::{Document, LinkCallback, LinkOutcome};
use crate::error::FontLoadError;
use crate::request::RenderedAsset;

/// Inject an asset, binding the class on success.
pub fn inject<D>(document: &Rc<D>, asset: RenderedAsset, binding: Option<ClassBinding>) -> Completion
where
    D: Document + ?Sized + 'static,
{
    match asset {
        RenderedAsset::Stylesheet(url) => inject_url(document, url, binding),
        RenderedAsset::InlineCss(css) => inject_text(document.as_ref(), &css, binding.as_ref()),
    }
}

/// Append a stylesheet link and settle when the host reports its load event.
pub fn inject_url<D>(document: &Rc<D>, url: String, binding: Option<ClassBinding>) -> Completion
where
    D: Document + ?Sized + 'static,
{
    let (settle, completion) = Completion::pending(url.clone());
    let weak = Rc::downgrade(document);
    let href = url.clone();

    let on_settle: LinkCallback = Box::new(move |outcome| {
        let result = match outcome {
            LinkOutcome::Loaded => {
                log::info!("stylesheet loaded: {href}");
                match (&binding, weak.upgrade()) {
                    (Some(binding), Some(document)) => bind(document.as_ref(), binding),
                    (Some(binding), None) => {
                        log::warn!("document went away before {} could be bound", binding.target);
                        Ok(())
                    }
                    (None, _) => Ok(()),
                }
            }
            LinkOutcome::Failed => {
                log::warn!("stylesheet failed to load: {href}");
                Err(FontLoadError::ResourceLoadFailure { url: href })
            }
        };
        settle.send(result);
    });

    log::info!("appending stylesheet link {url}");
    match document.append_stylesheet(&url, on_settle) {
        Ok(()) => completion,
        Err(err) => {
            log::warn!("document refused stylesheet {url}: {err}");
            Completion::ready(Err(err.into()))
        }
    }
}

/// Append literal CSS and settle immediately.
///
/// Inline styles have no load event, so success here only means the block
/// was appended; parse or render problems further down are not observed.
pub fn inject_text<D>(document: &D, css: &str, binding: Option<&ClassBinding>) -> Completion
where
    D: Document + ?Sized,
{
    log::info!("appending inline style block ({} bytes)", css.len());
    let result = document
        .append_style(css)
        .map_err(FontLoadError::from)
        .and_then(|()| match binding {
            Some(binding) => bind(document, binding),
            None => Ok(()),
        });
    Completion::ready(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;

    #[test]
    fn url_completion_waits_for_load_event() {
        let document = Rc::new(MemoryDocument::new());
        let binding = ClassBinding::new(".body", Some("Lato".into()));
        let mut completion = inject_url(&document, "https://f.example/lato.css".into(), Some(binding));

        assert_eq!(completion.try_result(), None);
        assert!(document.style_by_id("font-style--body").is_none());

        assert!(document.settle_link("https://f.example/lato.css", LinkOutcome::Loaded));
        assert_eq!(completion.try_result(), Some(Ok(())));
        assert!(document
            .style_by_id("font-style--body")
            .expect("bound")
            .contains("\"Lato\""));
    }

    #[test]
    fn failed_link_reports_url_and_skips_binding() {
        let document = Rc::new(MemoryDocument::new());
        let binding = ClassBinding::new(".body", Some("Lato".into()));
        let mut completion = inject_url(&document, "https://f.example/404.css".into(), Some(binding));

        document.settle_link("https://f.example/404.css", LinkOutcome::Failed);
        let err = completion.try_result().expect("settled").unwrap_err();
        assert_eq!(err.to_string(), "Failed to load CSS from URL: https://f.example/404.css");
        assert!(document.style_by_id("font-style--body").is_none());
    }

    #[test]
    fn inline_css_settles_synchronously() {
        let document = MemoryDocument::new();
        let mut completion = inject_text(&document, "@font-face {}", None);

        assert_eq!(completion.try_result(), Some(Ok(())));
        assert_eq!(document.inline_styles(), vec!["@font-face {}".to_string()]);
    }
}
