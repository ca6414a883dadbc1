//! Channel, category and thread snapshots.
//!
//! Cross references (channel → category, thread → channel, overwrite → role) are stored as
//! names because Discord reissues ids when the entities are recreated.

use serde::{Deserialize, Serialize};

/// Permission delta for one role on a channel or category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionOverwriteSnapshot {
    /// Name of the role the overwrite applies to.
    pub role_name: String,
    pub allow: u64,
    pub deny: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySnapshot {
    pub name: String,
    pub nsfw: bool,
    pub position: u16,
    pub overwrites: Vec<PermissionOverwriteSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChannelSnapshot {
    pub name: String,
    pub topic: Option<String>,
    pub nsfw: bool,
    pub position: u16,
    /// Name of the parent category.
    pub category: Option<String>,
    /// Whether the channel's overwrites mirrored its category's.
    pub permissions_synced: bool,
    /// Default auto-archive duration for new threads, in minutes.
    pub default_auto_archive_minutes: Option<u16>,
    pub overwrites: Vec<PermissionOverwriteSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceChannelSnapshot {
    pub name: String,
    pub nsfw: bool,
    pub position: u16,
    pub category: Option<String>,
    pub permissions_synced: bool,
    pub overwrites: Vec<PermissionOverwriteSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadSnapshot {
    pub name: String,
    /// Auto-archive duration in minutes.
    pub auto_archive_minutes: u16,
    /// Name of the parent text channel.
    pub channel_name: String,
}
