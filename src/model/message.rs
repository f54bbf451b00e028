//! Platform-neutral message payloads produced by the render stage.
//!
//! The render stage builds these instead of Serenity builders so its output can be
//! inspected in tests; the bot adapter converts them right before sending.

use chrono::{DateTime, Utc};

/// One message to send: optional plain content plus at most one embed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MessagePayload {
    pub content: Option<String>,
    pub embed: Option<EmbedPayload>,
}

impl MessagePayload {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            embed: None,
        }
    }

    pub fn embed(embed: EmbedPayload) -> Self {
        Self {
            content: None,
            embed: Some(embed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmbedPayload {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub author: Option<EmbedAuthor>,
    pub fields: Vec<EmbedField>,
    pub image_url: Option<String>,
    pub footer: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub color: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedAuthor {
    pub name: String,
    pub url: Option<String>,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: true,
        }
    }

    pub fn block(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }
}
