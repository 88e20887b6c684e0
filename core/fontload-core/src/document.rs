//! The document capability and an in-memory implementation (made by FontLab https://www.fontlab.com/)
//!
//! Loading a font only ever touches two places: the document head (links and
//! style blocks) and the root element's class list. [`Document`] names exactly
//! those operations so the loader can run against a real browser, a server-side
//! renderer, or the [`MemoryDocument`] used in tests and the CLI.

use std::cell::RefCell;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

/// How a stylesheet link settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkOutcome {
    Loaded,
    Failed,
}

/// Called once when a stylesheet link loads or fails.
pub type LinkCallback = Box<dyn FnOnce(LinkOutcome) + 'static>;

/// Host document operations used by the loader.
pub trait Document {
    /// Append a `<link rel="stylesheet">` and report its load event through `on_settle`.
    ///
    /// A host that never sees the load finish simply never calls `on_settle`.
    fn append_stylesheet(&self, href: &str, on_settle: LinkCallback) -> Result<(), DocumentError>;

    /// Append a `<style>` block with literal content.
    fn append_style(&self, css: &str) -> Result<(), DocumentError>;

    /// Find the `<style>` element with `id`, creating it if needed, and replace its content.
    fn write_style(&self, id: &str, css: &str) -> Result<(), DocumentError>;

    /// Add a class to the root element's class list.
    fn add_root_class(&self, class: &str) -> Result<(), DocumentError>;
}

/// Where a recorded stylesheet link stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkState {
    Pending,
    Loaded,
    Failed,
}

/// A node appended to the in-memory head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeadNode {
    Link { href: String, state: LinkState },
    Style { id: Option<String>, css: String },
}

/// Document that records every mutation and lets the caller settle links by hand.
#[derive(Default)]
pub struct MemoryDocument {
    head: RefCell<Vec<HeadNode>>,
    listeners: RefCell<Vec<(usize, LinkCallback)>>,
    root_classes: RefCell<Vec<String>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the head in insertion order.
    pub fn head(&self) -> Vec<HeadNode> {
        self.head.borrow().clone()
    }

    pub fn links(&self) -> Vec<String> {
        self.head
            .borrow()
            .iter()
            .filter_map(|node| match node {
                HeadNode::Link { href, .. } => Some(href.clone()),
                HeadNode::Style { .. } => None,
            })
            .collect()
    }

    pub fn pending_links(&self) -> Vec<String> {
        self.head
            .borrow()
            .iter()
            .filter_map(|node| match node {
                HeadNode::Link {
                    href,
                    state: LinkState::Pending,
                } => Some(href.clone()),
                _ => None,
            })
            .collect()
    }

    /// Contents of `<style>` blocks that carry no id.
    pub fn inline_styles(&self) -> Vec<String> {
        self.head
            .borrow()
            .iter()
            .filter_map(|node| match node {
                HeadNode::Style { id: None, css } => Some(css.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn style_by_id(&self, id: &str) -> Option<String> {
        self.head.borrow().iter().find_map(|node| match node {
            HeadNode::Style { id: Some(found), css } if found == id => Some(css.clone()),
            _ => None,
        })
    }

    pub fn styles_with_id(&self, id: &str) -> usize {
        self.head
            .borrow()
            .iter()
            .filter(|node| matches!(node, HeadNode::Style { id: Some(found), .. } if found == id))
            .count()
    }

    pub fn root_classes(&self) -> Vec<String> {
        self.root_classes.borrow().clone()
    }

    /// Settle the oldest pending link for `href`. Returns false when none is pending.
    pub fn settle_link(&self, href: &str, outcome: LinkOutcome) -> bool {
        let index = {
            let head = self.head.borrow();
            head.iter().position(|node| {
                matches!(node, HeadNode::Link { href: h, state: LinkState::Pending } if h == href)
            })
        };
        match index {
            Some(index) => {
                self.settle_index(index, outcome);
                true
            }
            None => false,
        }
    }

    /// Settle every pending link with the same outcome, returning how many settled.
    pub fn settle_all(&self, outcome: LinkOutcome) -> usize {
        let mut settled = 0;
        while let Some(href) = self.pending_links().into_iter().next() {
            self.settle_link(&href, outcome);
            settled += 1;
        }
        settled
    }

    fn settle_index(&self, index: usize, outcome: LinkOutcome) {
        if let Some(HeadNode::Link { state, .. }) = self.head.borrow_mut().get_mut(index) {
            *state = match outcome {
                LinkOutcome::Loaded => LinkState::Loaded,
                LinkOutcome::Failed => LinkState::Failed,
            };
        }

        let callback = {
            let mut listeners = self.listeners.borrow_mut();
            listeners
                .iter()
                .position(|(node, _)| *node == index)
                .map(|pos| listeners.remove(pos).1)
        };
        // The callback may write back into this document, so no borrow is held here.
        if let Some(callback) = callback {
            callback(outcome);
        }
    }

    /// Render the head as HTML markup.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for node in self.head.borrow().iter() {
            match node {
                HeadNode::Link { href, .. } => {
                    html.push_str(&format!(
                        "<link rel=\"stylesheet\" href=\"{}\">\n",
                        escape_attr(href)
                    ));
                }
                HeadNode::Style { id: Some(id), css } => {
                    html.push_str(&format!("<style id=\"{}\">{css}</style>\n", escape_attr(id)));
                }
                HeadNode::Style { id: None, css } => {
                    html.push_str(&format!("<style>{css}</style>\n"));
                }
            }
        }
        html
    }
}

impl fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDocument")
            .field("head", &self.head.borrow())
            .field("pending_listeners", &self.listeners.borrow().len())
            .field("root_classes", &self.root_classes.borrow())
            .finish()
    }
}

impl Document for MemoryDocument {
    fn append_stylesheet(&self, href: &str, on_settle: LinkCallback) -> Result<(), DocumentError> {
        let index = {
            let mut head = self.head.borrow_mut();
            head.push(HeadNode::Link {
                href: href.to_string(),
                state: LinkState::Pending,
            });
            head.len() - 1
        };
        self.listeners.borrow_mut().push((index, on_settle));
        Ok(())
    }

    fn append_style(&self, css: &str) -> Result<(), DocumentError> {
        self.head.borrow_mut().push(HeadNode::Style {
            id: None,
            css: css.to_string(),
        });
        Ok(())
    }

    fn write_style(&self, id: &str, css: &str) -> Result<(), DocumentError> {
        let mut head = self.head.borrow_mut();
        let existing = head.iter_mut().find_map(|node| match node {
            HeadNode::Style {
                id: Some(found),
                css,
            } if found == id => Some(css),
            _ => None,
        });
        match existing {
            Some(content) => *content = css.to_string(),
            None => head.push(HeadNode::Style {
                id: Some(id.to_string()),
                css: css.to_string(),
            }),
        }
        Ok(())
    }

    fn add_root_class(&self, class: &str) -> Result<(), DocumentError> {
        let mut classes = self.root_classes.borrow_mut();
        if !classes.iter().any(|existing| existing == class) {
            classes.push(class.to_string());
        }
        Ok(())
    }
}

fn escape_attr(raw: &str) -> String {
    raw.replace('&', "&amp;").replace('"', "&quot;")
}
