//! Source attribution for assistant answers.
//!
//! Answers drawn from the knowledge base get a deduplicated list of their
//! sources appended. Answers from general knowledge have their own
//! `Sources:` section rewritten into links where the publisher is known, or
//! a note appended when they cite nothing.

use serde::{Deserialize, Serialize};

use crate::message::MessageMetadata;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceOptions {
    /// Longest `host/path` shown for a URL source before it is cut with `...`.
    pub max_display_len: usize,
    pub knowledge_base_heading: String,
    pub general_heading: String,
    pub general_note: String,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            max_display_len: 60,
            knowledge_base_heading: "Sources (Kyra's Knowledge Base)".to_string(),
            general_heading: "Sources (General Medical Knowledge - GPT-4o)".to_string(),
            general_note: "This response is based on general medical knowledge (GPT-4o AI), \
                           not our internal knowledge base. For official NHS guidance, please \
                           visit NHS.uk or consult your healthcare provider."
                .to_string(),
        }
    }
}

/// Message content after attribution, with the sources it ended up citing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attributed {
    pub content: String,
    pub sources: Vec<String>,
}

const SOURCES_HEADING: &str = "sources:";

pub fn attribute_sources(
    content: &str,
    sources: &[String],
    metadata: Option<&MessageMetadata>,
    options: &SourceOptions,
) -> Attributed {
    let Some(meta) = metadata.filter(|m| m.is_medical) else {
        return Attributed {
            content: content.to_string(),
            sources: sources.to_vec(),
        };
    };

    if meta.used_rag && !sources.is_empty() {
        knowledge_base(content, sources, options)
    } else {
        general_knowledge(content, sources, options)
    }
}

fn knowledge_base(content: &str, sources: &[String], options: &SourceOptions) -> Attributed {
    let unique = dedup(sources.iter().cloned());

    let mut out = content.to_string();
    out.push_str(&format!("\n\n**{}:**\n", options.knowledge_base_heading));
    for source in &unique {
        match display_url(source, options.max_display_len) {
            Some(display) => out.push_str(&format!("- [{display}]({source})\n")),
            None => out.push_str(&format!("- {source}\n")),
        }
    }

    log::debug!("attributed {} knowledge base sources", unique.len());
    Attributed {
        content: out,
        sources: unique,
    }
}

fn general_knowledge(content: &str, sources: &[String], options: &SourceOptions) -> Attributed {
    let mut cited = vec![];
    let mut lines: Vec<String> = vec![];
    let mut heading_at = None;
    let mut in_sources = false;

    for line in content.split('\n') {
        let trimmed = line.trim();
        if !in_sources && heading_at.is_none() && starts_with_ignore_case(trimmed, SOURCES_HEADING) {
            in_sources = true;
            heading_at = Some(lines.len());
            lines.push(line.to_string());
            continue;
        }
        if in_sources {
            if let Some(rest) = trimmed.strip_prefix('-') {
                let text = rest.trim();
                cited.push(text.to_string());
                match source_to_link(text) {
                    Some(link) => lines.push(format!("- {link}")),
                    None => lines.push(line.to_string()),
                }
                continue;
            }
            if !trimmed.is_empty() {
                in_sources = false;
            }
        }
        lines.push(line.to_string());
    }

    let cited = dedup(cited);
    if cited.is_empty() {
        log::debug!("no sources cited, appending general knowledge note");
        return Attributed {
            content: format!("{content}\n\n\n**Note:** {}", options.general_note),
            sources: sources.to_vec(),
        };
    }

    if let Some(line) = heading_at.and_then(|i| lines.get_mut(i)) {
        let indent = line.len() - line.trim_start().len();
        let rest = line[indent + SOURCES_HEADING.len()..].to_string();
        *line = format!("{}**{}:**{rest}", &line[..indent], options.general_heading);
    }

    log::debug!("attributed {} general knowledge sources", cited.len());
    Attributed {
        content: lines.join("\n"),
        sources: cited,
    }
}

/// A publisher whose citations can be turned into links.
struct Publisher {
    /// Lowercase substrings that identify the publisher in citation text.
    names: &'static [&'static str],
    homepage: &'static str,
    /// Builds a topic page URL from a slug; `None` links the homepage.
    topic_url: Option<fn(&str) -> String>,
    /// Separator for words in the slug.
    slug_sep: &'static str,
}

const PUBLISHERS: &[Publisher] = &[
    Publisher {
        names: &["nhs.uk"],
        homepage: "https://www.nhs.uk/",
        topic_url: Some(nhs_topic),
        slug_sep: "-",
    },
    Publisher {
        names: &["mayo clinic"],
        homepage: "https://www.mayoclinic.org/",
        topic_url: Some(mayo_topic),
        slug_sep: "-",
    },
    Publisher {
        names: &["cdc"],
        homepage: "https://www.cdc.gov/",
        topic_url: None,
        slug_sep: "-",
    },
    Publisher {
        names: &["webmd"],
        homepage: "https://www.webmd.com/",
        topic_url: Some(webmd_topic),
        slug_sep: "-",
    },
    Publisher {
        names: &["medlineplus"],
        homepage: "https://medlineplus.gov/",
        topic_url: Some(medlineplus_topic),
        slug_sep: "",
    },
    Publisher {
        names: &["cancer research", "cancerresearchuk"],
        homepage: "https://www.cancerresearchuk.org/",
        topic_url: Some(cruk_topic),
        slug_sep: "-",
    },
];

fn nhs_topic(slug: &str) -> String {
    format!("https://www.nhs.uk/conditions/{slug}/")
}

fn mayo_topic(slug: &str) -> String {
    format!("https://www.mayoclinic.org/diseases-conditions/{slug}/symptoms-causes/syc-20354349")
}

fn webmd_topic(slug: &str) -> String {
    format!("https://www.webmd.com/a-to-z-guides/{slug}")
}

fn medlineplus_topic(slug: &str) -> String {
    format!("https://medlineplus.gov/{slug}.html")
}

fn cruk_topic(slug: &str) -> String {
    format!("https://www.cancerresearchuk.org/about-cancer/{slug}")
}

/// Rewrites a citation such as `NHS.uk - Leptospirosis` into a markdown
/// link. Returns `None` when the publisher is not recognized.
pub fn source_to_link(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    let publisher = PUBLISHERS
        .iter()
        .find(|p| p.names.iter().any(|n| lower.contains(n)))?;

    let url = match (text.split_once('-'), publisher.topic_url) {
        (Some((_, topic)), Some(topic_url)) => topic_url(&slug(topic, publisher.slug_sep)),
        _ => publisher.homepage.to_string(),
    };
    Some(format!("[{text}]({url})"))
}

fn slug(topic: &str, sep: &str) -> String {
    topic
        .trim()
        .to_lowercase()
        .replace(' ', sep)
        .chars()
        .filter(|c| !matches!(c, ',' | '(' | ')'))
        .collect()
}

/// `host/path` of an http(s) URL, cut to `max` characters.
fn display_url(source: &str, max: usize) -> Option<String> {
    let rest = source
        .strip_prefix("https://")
        .or_else(|| source.strip_prefix("http://"))?;
    let end = rest.find(['?', '#']).unwrap_or(rest.len());
    let display = &rest[..end];

    if display.chars().count() <= max {
        return Some(display.to_string());
    }
    let mut cut: String = display.chars().take(max.saturating_sub(3)).collect();
    cut.push_str("...");
    Some(cut)
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn dedup(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = vec![];
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
