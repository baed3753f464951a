use chrono::{DateTime, Utc};

pub const COLOR_ERROR: u32 = 0xFF0000;
pub const COLOR_SUCCESS: u32 = 0x00FF00;
pub const COLOR_INFO: u32 = 0x5865F2;

/// Rich embed payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Embed {
    pub fn new(title: impl Into<String>, description: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color,
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self) -> Self {
        self.timestamp = Some(Utc::now());
        self
    }
}

/// A user-facing message, rendered by the platform client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub content: Option<String>,
    pub embed: Option<Embed>,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            embed: None,
        }
    }

    pub fn embed(embed: Embed) -> Self {
        Self {
            content: None,
            embed: Some(embed),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self::embed(Embed::new("Error", description, COLOR_ERROR))
    }

    /// Plain-text rendering, used by text-only adapters and logs
    pub fn render(&self) -> String {
        let mut out = Vec::new();
        if let Some(content) = &self.content {
            out.push(content.clone());
        }
        if let Some(embed) = &self.embed {
            out.push(format!("[{}] {}", embed.title, embed.description));
            if let Some(ts) = embed.timestamp {
                out.push(format!("({})", ts.format("%Y-%m-%d %H:%M:%S UTC")));
            }
        }
        out.join(" ")
    }
}
