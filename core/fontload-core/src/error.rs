//! Error taxonomy for font loads (made by FontLab https://www.fontlab.com/)

use thiserror::Error;

use crate::provider::Provider;

pub type Result<T> = std::result::Result<T, FontLoadError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FontLoadError {
    #[error("Provider \"{name}\" is not supported or could not be detected.")]
    UnsupportedProvider { name: String },

    #[error("{detail}")]
    MissingRequiredField {
        provider: Provider,
        detail: &'static str,
    },

    #[error("Failed to load CSS from URL: {url}")]
    ResourceLoadFailure { url: String },

    #[error("Stylesheet listener for {url} was dropped before the load settled")]
    Abandoned { url: String },

    #[error("Document rejected the update: {0}")]
    Document(#[from] DocumentError),
}

impl FontLoadError {
    pub(crate) fn missing(provider: Provider, detail: &'static str) -> Self {
        FontLoadError::MissingRequiredField { provider, detail }
    }
}

/// Failure reported by a [`Document`](crate::document::Document) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation}: {message}")]
pub struct DocumentError {
    pub operation: &'static str,
    pub message: String,
}

impl DocumentError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}
