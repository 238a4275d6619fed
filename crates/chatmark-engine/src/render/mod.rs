//! Rendering a message into a displayable [`Fragment`].
//!
//! ```
//! use chatmark_engine::render;
//!
//! let fragment = render("**Rest** and drink [water](https://nhs.uk)", |url, label| {
//!     println!("open {label} at {url}");
//! });
//! assert!(fragment.html().starts_with("<p><strong>Rest</strong>"));
//! assert_eq!(fragment.links().len(), 1);
//! ```

mod html;

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    links::{LinkEntry, LinkHandler, LinkId, LinkRegistry},
    parsing::{ParsedDoc, parse_document},
};
use html::HtmlWriter;

/// Presentation knobs for the serializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Glyph shown after every link label.
    pub link_icon: String,
    /// Class on the link button. The icon span gets `<link_class>-icon`.
    pub link_class: String,
    /// Emit `class="language-LANG"` on fenced code with a language tag.
    pub code_language_class: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            link_icon: "🔗".to_string(),
            link_class: "source-link".to_string(),
            code_language_class: true,
        }
    }
}

/// The output of one render call: HTML plus the links it contains.
///
/// Link ids in the HTML are only meaningful to this fragment's registry.
/// Dropping the fragment drops its registry entries.
#[derive(Debug)]
pub struct Fragment {
    html: String,
    links: LinkRegistry,
}

impl Fragment {
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn links(&self) -> &LinkRegistry {
        &self.links
    }

    /// Runs the activation handler for `id`. Unknown ids are ignored.
    pub fn activate(&self, id: &LinkId) -> bool {
        self.links.activate(id)
    }

    /// Activation from a raw `data-link-id` attribute value.
    pub fn activate_raw(&self, raw: &str) -> bool {
        self.links.activate_raw(raw)
    }

    pub fn release(&mut self, id: &LinkId) -> Option<LinkEntry> {
        self.links.release(id)
    }

    /// Splits the fragment into its HTML and the registry that answers
    /// activations of its links.
    pub fn into_parts(self) -> (String, LinkRegistry) {
        (self.html, self.links)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

/// Renders `raw` with default options.
///
/// `on_link_activated(url, label)` runs whenever one of the fragment's links
/// is activated. Never fails: malformed syntax comes out as escaped text.
pub fn render<F>(raw: &str, on_link_activated: F) -> Fragment
where
    F: Fn(&str, &str) + Send + Sync + 'static,
{
    render_with_options(raw, &RenderOptions::default(), on_link_activated)
}

pub fn render_with_options<F>(raw: &str, options: &RenderOptions, on_link_activated: F) -> Fragment
where
    F: Fn(&str, &str) + Send + Sync + 'static,
{
    render_document(&parse_document(raw), options, Arc::new(on_link_activated))
}

/// Serializes an already parsed document.
pub fn render_document(doc: &ParsedDoc, options: &RenderOptions, handler: LinkHandler) -> Fragment {
    let mut links = LinkRegistry::new(handler);
    let mut writer = HtmlWriter::new(options, &mut links);
    writer.write_blocks(&doc.blocks);
    let html = writer.finish();

    log::debug!(
        "rendered {} blocks, {} links, {} bytes of html",
        doc.blocks.len(),
        links.len(),
        html.len()
    );

    Fragment { html, links }
}
