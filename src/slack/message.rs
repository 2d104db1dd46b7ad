//! Block Kit message construction.

use serde::Serialize;

/// A structured Slack message: an ordered sequence of blocks.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SlackMessage {
    blocks: Vec<Block>,
}

impl SlackMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mrkdwn text section.
    pub fn section(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Section { text: Text::mrkdwn(text), accessory: None });
        self
    }

    /// Append a mrkdwn text section carrying an image accessory.
    pub fn section_with_image(
        mut self,
        text: impl Into<String>,
        image_url: impl Into<String>,
        alt_text: impl Into<String>,
    ) -> Self {
        self.blocks.push(Block::Section {
            text: Text::mrkdwn(text),
            accessory: Some(Accessory::image(image_url, alt_text)),
        });
        self
    }

    /// Append a divider.
    pub fn divider(mut self) -> Self {
        self.blocks.push(Block::Divider);
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Section {
        text: Text,
        #[serde(skip_serializing_if = "Option::is_none")]
        accessory: Option<Accessory>,
    },
    Divider,
}

#[derive(Debug, Clone, Serialize)]
pub struct Text {
    #[serde(rename = "type")]
    kind: &'static str,
    text: String,
}

impl Text {
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self { kind: "mrkdwn", text: text.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Accessory {
    #[serde(rename = "type")]
    kind: &'static str,
    image_url: String,
    alt_text: String,
}

impl Accessory {
    pub fn image(image_url: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self { kind: "image", image_url: image_url.into(), alt_text: alt_text.into() }
    }
}
