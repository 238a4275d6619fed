//! Per-fragment link registry.
//!
//! Rendered links are inert markup carrying only a `data-link-id`. The
//! registry maps that id back to the link's destination and label and to the
//! caller's activation handler. Each [`crate::Fragment`] owns its registry,
//! so dropping the fragment disposes of its entries.

use std::{
    collections::BTreeMap,
    fmt,
    str::FromStr,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use serde::Serialize;
use thiserror::Error;

/// Callback invoked with `(url, label)` when a rendered link is activated.
pub type LinkHandler = Arc<dyn Fn(&str, &str) + Send + Sync>;

static NEXT_LINK_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique link identifier, rendered as `link-N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(u64);

impl LinkId {
    pub const PREFIX: &'static str = "link-";

    /// Mints a fresh id. Ids are never reused within a process, even across
    /// concurrent render calls.
    pub fn fresh() -> Self {
        Self(NEXT_LINK_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("not a link id: {0:?}")]
pub struct InvalidLinkId(pub String);

impl FromStr for LinkId {
    type Err = InvalidLinkId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(Self::PREFIX)
            .and_then(|n| n.parse().ok())
            .map(LinkId)
            .ok_or_else(|| InvalidLinkId(s.to_string()))
    }
}

impl Serialize for LinkId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One registered link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkEntry {
    pub id: LinkId,
    pub url: String,
    /// The label as a reader sees it, without inline markup.
    pub label: String,
}

pub struct LinkRegistry {
    handler: LinkHandler,
    entries: BTreeMap<LinkId, LinkEntry>,
}

impl LinkRegistry {
    pub fn new(handler: LinkHandler) -> Self {
        Self {
            handler,
            entries: BTreeMap::new(),
        }
    }

    /// Records a link and returns its fresh id.
    pub fn register(&mut self, url: &str, label: &str) -> LinkId {
        let id = LinkId::fresh();
        self.entries.insert(
            id,
            LinkEntry {
                id,
                url: url.to_string(),
                label: label.to_string(),
            },
        );
        id
    }

    /// Calls the handler with the entry's `(url, label)`.
    ///
    /// Unknown or released ids are ignored; returns whether the handler ran.
    pub fn activate(&self, id: &LinkId) -> bool {
        match self.entries.get(id) {
            Some(entry) => {
                log::debug!("activating {} -> {}", entry.id, entry.url);
                (self.handler)(&entry.url, &entry.label);
                true
            }
            None => {
                log::debug!("ignoring activation of unknown link {id}");
                false
            }
        }
    }

    /// Like [`LinkRegistry::activate`] but takes the raw `data-link-id`
    /// attribute value. Malformed ids are ignored the same way.
    pub fn activate_raw(&self, raw: &str) -> bool {
        match raw.parse::<LinkId>() {
            Ok(id) => self.activate(&id),
            Err(e) => {
                log::debug!("ignoring activation: {e}");
                false
            }
        }
    }

    /// Forgets one entry; later activations of `id` are no-ops.
    pub fn release(&mut self, id: &LinkId) -> Option<LinkEntry> {
        self.entries.remove(id)
    }

    pub fn get(&self, id: &LinkId) -> Option<&LinkEntry> {
        self.entries.get(id)
    }

    /// Entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &LinkEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for LinkRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkRegistry")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}
