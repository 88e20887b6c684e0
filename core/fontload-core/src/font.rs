//! The `Font` facade (made by FontLab https://www.fontlab.com/)

use std::rc::Rc;

use crate::completion::Completion;
use crate::config::FontRequest;
use crate::document::Document;
use crate::error::Result;
use crate::inject::inject;
use crate::provider::{self, Provider};
use crate::request::{self, LoadPlan};

/// A font to load from one provider into one document.
///
/// The provider is settled at construction, from the explicit name when one
/// is given and from the configuration's shape otherwise. An unknown name is
/// kept as an error and reported by [`Font::load`].
pub struct Font<D: ?Sized> {
    provider: Result<Provider>,
    config: FontRequest,
    document: Rc<D>,
}

impl<D> Font<D>
where
    D: Document + ?Sized + 'static,
{
    pub fn new(provider_name: Option<&str>, config: FontRequest, document: Rc<D>) -> Self {
        let provider = provider::resolve(provider_name, &config);
        Self {
            provider,
            config,
            document,
        }
    }

    pub fn provider(&self) -> Result<Provider> {
        self.provider.clone()
    }

    pub fn config(&self) -> &FontRequest {
        &self.config
    }

    /// Validate the configuration and build the load plan without touching the document.
    pub fn plan(&self) -> Result<LoadPlan> {
        request::build(self.provider.clone()?, &self.config)
    }

    /// Inject the font and return its completion signal.
    ///
    /// Validation problems settle the completion immediately; nothing is
    /// appended to the document in that case. Each call injects again.
    pub fn load(&self) -> Completion {
        match self.plan() {
            Ok(plan) => {
                log::info!("loading font via {}", plan.provider);
                inject(&self.document, plan.asset, plan.binding)
            }
            Err(err) => {
                log::warn!("font load rejected: {err}");
                Completion::ready(Err(err))
            }
        }
    }
}

impl<D: ?Sized> std::fmt::Debug for Font<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("provider", &self.provider)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
