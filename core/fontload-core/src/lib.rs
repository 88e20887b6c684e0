//! fontload-core: The patient concierge of web font delivery
//!
//! Like a hotel concierge who knows every shop in town, this library takes
//! one polite request ("I'd like Roboto, bold, for my headlines") and knows
//! exactly which door to knock on, whether that's Google, Adobe, Bunny,
//! Fontshare, Font Awesome, or a font file you keep in your own closet.
//!
//! ## Four Steps to a Dressed Page
//!
//! **Resolution**: Figuring out who we're talking to
//! - Understands nicknames ("tk", "go", "selfhosted") in any letter case
//! - Guesses the provider from the shape of the request when nobody says
//! - Follows a fixed order of hunches, so the same request always gets the same answer
//!
//! **Request building**: Speaking each provider's dialect
//! - Google's `css2` URLs with weights, subsets, and display strategy
//! - Bunny's variants, Adobe's kits, Fontshare's ids, Font Awesome's CDN
//! - Local and self-hosted faces rendered as tidy `@font-face` rules
//!
//! **Injection**: Hanging the stylesheet in the hallway
//! - Links wait for the host's load event; inline styles settle at once
//! - Every load settles exactly once, success or a readable complaint
//!
//! **Binding**: Introducing the font to its selector
//! - One style element per selector, rewritten rather than piled up
//! - Icon fonts without a family name just raise a flag class on the root
//!
//! ## A Sample Conversation
//!
//! ```rust
//! use std::rc::Rc;
//! use fontload_core::document::{LinkOutcome, MemoryDocument};
//! use fontload_core::{Font, FontRequest};
//!
//! let document = Rc::new(MemoryDocument::new());
//! let request = FontRequest::new()
//!     .with("family", "Roboto")
//!     .with("weight", serde_json::json!(["400", "700"]))
//!     .with("use", ".my-class");
//!
//! let font = Font::new(None, request, Rc::clone(&document));
//! let mut completion = font.load();
//!
//! // The page's network stack reports back...
//! document.settle_all(LinkOutcome::Loaded);
//!
//! assert_eq!(completion.try_result(), Some(Ok(())));
//! assert!(document.links()[0].contains(":wght@400;700"));
//! ```
//!
//! ## The Cast of Characters
//!
//! - [`FontRequest`]: The guest's wish list, in whatever words they chose
//! - [`Provider`]: The shop we end up visiting
//! - [`LoadPlan`]: The errand written down before anyone leaves the lobby
//! - [`Document`]: The page we decorate, passed in rather than assumed
//! - [`Completion`]: The receipt that says how it all went
//!
//! ---
//!
//! Crafted with care at FontLab https://www.fontlab.com/

pub mod bind;
pub mod completion;
pub mod config;
pub mod document;
pub mod error;
pub mod font;
pub mod fontface;
pub mod inject;
pub mod provider;
pub mod request;
#[cfg(feature = "web")]
pub mod web;

pub use completion::Completion;
pub use config::{Field, FontRequest};
pub use document::Document;
pub use error::{DocumentError, FontLoadError};
pub use font::Font;
pub use provider::Provider;
pub use request::{plan, LoadPlan, RenderedAsset};
