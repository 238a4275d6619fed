pub mod escape;
pub mod links;
pub mod message;
pub mod parsing;
pub mod render;
pub mod sources;

// Re-export key types for easier usage
pub use escape::escape;
pub use links::{InvalidLinkId, LinkEntry, LinkHandler, LinkId, LinkRegistry};
pub use message::{Message, MessageError, MessageMetadata, Role, render_message};
pub use parsing::{BlockOutline, ParsedDoc, parse_document};
pub use render::{Fragment, RenderOptions, render, render_document, render_with_options};
pub use sources::{Attributed, SourceOptions, attribute_sources, source_to_link};
