use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attachments at or above this size are left out of the snapshot.
pub const MAX_ATTACHMENT_BYTES: u64 = 8_000_000;

/// A file attached to a pinned message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentSnapshot {
    pub filename: String,
    pub data: Vec<u8>,
}

/// A pinned message, reposted and re-pinned on restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedMessageSnapshot {
    /// Author display string (`name` or `name#discriminator`).
    pub author: String,
    /// When the original message was posted.
    pub posted_at: DateTime<Utc>,
    /// Name of the text channel the message was pinned in.
    pub channel_name: String,
    pub content: String,
    pub attachments: Vec<AttachmentSnapshot>,
}

impl PinnedMessageSnapshot {
    /// Title of the embed used to repost the message.
    pub fn repost_title(&self) -> String {
        format!(
            "Pinned message by {} on {}",
            self.author,
            self.posted_at.format("%Y-%m-%d")
        )
    }
}
