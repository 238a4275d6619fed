//! Chat message records as they arrive from the backend.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    render::{Fragment, RenderOptions, render_with_options},
    sources::{SourceOptions, attribute_sources},
};

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("Failed to parse message record: {source}")]
    MessageParseError { source: serde_json::Error },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageMetadata {
    #[serde(default)]
    pub is_medical: bool,
    #[serde(default)]
    pub used_rag: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
}

impl Message {
    pub fn from_json(json: &str) -> Result<Self, MessageError> {
        serde_json::from_str(json).map_err(|source| MessageError::MessageParseError { source })
    }
}

/// Renders a message for display. Assistant messages get source
/// attribution first; user messages are rendered as written.
pub fn render_message<F>(
    message: &Message,
    render_options: &RenderOptions,
    source_options: &SourceOptions,
    on_link_activated: F,
) -> Fragment
where
    F: Fn(&str, &str) + Send + Sync + 'static,
{
    match message.role {
        Role::User => render_with_options(&message.content, render_options, on_link_activated),
        Role::Assistant => {
            let attributed = attribute_sources(
                &message.content,
                &message.sources,
                message.metadata.as_ref(),
                source_options,
            );
            render_with_options(&attributed.content, render_options, on_link_activated)
        }
    }
}
