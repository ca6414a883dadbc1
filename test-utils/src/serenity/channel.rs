//! Test factories for Serenity GuildChannel objects.

use serde_json::json;
use serenity::all::GuildChannel;

/// A role or member permission overwrite for a test channel.
#[derive(Debug, Clone, Copy)]
pub struct TestOverwrite {
    pub id: u64,
    /// `false` for a role overwrite, `true` for a member overwrite.
    pub member: bool,
    pub allow: u64,
    pub deny: u64,
}

impl TestOverwrite {
    pub fn role(id: u64, allow: u64, deny: u64) -> Self {
        Self {
            id,
            member: false,
            allow,
            deny,
        }
    }

    pub fn member(id: u64, allow: u64, deny: u64) -> Self {
        Self {
            id,
            member: true,
            allow,
            deny,
        }
    }
}

/// Creates a test channel without permission overwrites.
///
/// # Arguments
/// - `channel_id` - Discord channel ID (snowflake)
/// - `guild_id` - Owning guild
/// - `name` - Channel name
/// - `kind` - Discord channel type (0 text, 2 voice, 4 category, 5 news, 15 forum)
/// - `position` - Sorting position
/// - `parent_id` - Parent category, if any
///
/// # Panics
/// - If the JSON cannot be deserialized into a GuildChannel (indicates invalid test data)
pub fn create_test_channel(
    channel_id: u64,
    guild_id: u64,
    name: &str,
    kind: u8,
    position: u16,
    parent_id: Option<u64>,
) -> GuildChannel {
    create_test_channel_with_overwrites(channel_id, guild_id, name, kind, position, parent_id, &[])
}

/// Creates a test channel carrying the given permission overwrites.
pub fn create_test_channel_with_overwrites(
    channel_id: u64,
    guild_id: u64,
    name: &str,
    kind: u8,
    position: u16,
    parent_id: Option<u64>,
    overwrites: &[TestOverwrite],
) -> GuildChannel {
    let overwrites: Vec<_> = overwrites
        .iter()
        .map(|o| {
            json!({
                "id": o.id.to_string(),
                "type": if o.member { 1 } else { 0 },
                "allow": o.allow.to_string(),
                "deny": o.deny.to_string(),
            })
        })
        .collect();

    serde_json::from_value(json!({
        "id": channel_id.to_string(),
        "guild_id": guild_id.to_string(),
        "type": kind,
        "name": name,
        "position": position,
        "parent_id": parent_id.map(|id| id.to_string()),
        "topic": null,
        "nsfw": false,
        "permission_overwrites": overwrites,
        "flags": 0,
    }))
    .expect("Failed to create test channel - invalid JSON structure")
}
