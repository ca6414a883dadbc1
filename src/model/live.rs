//! Views of a live guild and the parameter types used to mutate it.
//!
//! These types decouple the capture and restore services from Serenity's model structs.
//! Reads produce `Live*` values carrying the raw flags Discord reports; writes take the
//! `*Spec`/`*Edit` parameter types. Ids are Serenity's typed snowflakes.

use chrono::{DateTime, Utc};
use serenity::all::{ChannelId, MessageId, RoleId, UserId};

/// A role as it currently exists in the guild.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveRole {
    pub id: RoleId,
    pub name: String,
    pub position: u16,
    pub colour: u32,
    pub hoist: bool,
    pub mentionable: bool,
    pub permissions: u64,
    /// Managed by an integration (bots, boosts, linked services).
    pub managed: bool,
    /// Owning bot, for roles created by a bot integration.
    pub bot_id: Option<UserId>,
    /// Carries the premium-subscriber tag.
    pub premium_subscriber: bool,
    /// The guild's `@everyone` role.
    pub is_default: bool,
    /// CDN URL of the role icon.
    pub icon_url: Option<String>,
}

/// Who a permission overwrite applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteTarget {
    Role(RoleId),
    Member(UserId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveOverwrite {
    pub target: OverwriteTarget,
    pub allow: u64,
    pub deny: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Text,
    Voice,
    Category,
    /// Forums, stages, directories and anything else not captured.
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveChannel {
    pub id: ChannelId,
    pub name: String,
    pub kind: ChannelKind,
    pub position: u16,
    pub parent_id: Option<ChannelId>,
    pub topic: Option<String>,
    pub nsfw: bool,
    pub default_auto_archive_minutes: Option<u16>,
    pub overwrites: Vec<LiveOverwrite>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveThread {
    pub id: ChannelId,
    pub name: String,
    pub parent_id: Option<ChannelId>,
    pub auto_archive_minutes: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveAttachment {
    pub filename: String,
    pub size: u64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LivePin {
    pub id: MessageId,
    /// Author display string.
    pub author: String,
    pub author_is_bot: bool,
    pub posted_at: DateTime<Utc>,
    pub content: String,
    pub attachments: Vec<LiveAttachment>,
}

/// The bot's own membership in the guild.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveMember {
    pub user_id: UserId,
    pub role_ids: Vec<RoleId>,
}

/// Fields to set when creating or editing a role. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleSpec {
    pub name: Option<String>,
    pub colour: Option<u32>,
    pub hoist: Option<bool>,
    pub mentionable: Option<bool>,
    pub permissions: Option<u64>,
    /// Icon image bytes. `Some(None)` removes the role's current icon.
    pub icon: Option<Option<Vec<u8>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSpec {
    pub name: String,
    pub kind: ChannelKind,
    pub position: u16,
    pub parent_id: Option<ChannelId>,
    pub topic: Option<String>,
    pub nsfw: bool,
    pub default_auto_archive_minutes: Option<u16>,
    pub overwrites: Vec<LiveOverwrite>,
}

/// Post-creation channel edit. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelEdit {
    pub nsfw: Option<bool>,
    pub overwrites: Option<Vec<LiveOverwrite>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThreadSpec {
    pub name: String,
    pub auto_archive_minutes: u16,
}

/// An embed message with file uploads.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedMessage {
    pub title: String,
    pub description: Option<String>,
    /// `(filename, bytes)` pairs.
    pub files: Vec<(String, Vec<u8>)>,
}
