//! Populated snapshots for tests.

use chrono::{TimeZone, Utc};

use super::*;

pub const VIEW_CHANNEL_BITS: u64 = 1 << 10;
pub const SEND_MESSAGES_BITS: u64 = 1 << 11;

pub fn user_role(name: &str, position: u16) -> RoleSnapshot {
    RoleSnapshot::User(RoleAttributes {
        name: name.to_string(),
        hoist: false,
        mentionable: false,
        position,
        colour: 0,
        permissions: 0,
        icon: None,
    })
}

pub fn default_role(permissions: u64) -> RoleSnapshot {
    RoleSnapshot::Default(DefaultRole {
        mentionable: false,
        permissions,
    })
}

pub fn overwrite(role_name: &str, allow: u64, deny: u64) -> PermissionOverwriteSnapshot {
    PermissionOverwriteSnapshot {
        role_name: role_name.to_string(),
        allow,
        deny,
    }
}

pub fn text_channel(name: &str, position: u16, category: Option<&str>) -> TextChannelSnapshot {
    TextChannelSnapshot {
        name: name.to_string(),
        topic: None,
        nsfw: false,
        position,
        category: category.map(str::to_string),
        permissions_synced: false,
        default_auto_archive_minutes: None,
        overwrites: Vec::new(),
    }
}

pub fn pin(author: &str, channel_name: &str, content: &str) -> PinnedMessageSnapshot {
    PinnedMessageSnapshot {
        author: author.to_string(),
        posted_at: Utc.with_ymd_and_hms(2024, 3, 15, 12, 30, 0).unwrap(),
        channel_name: channel_name.to_string(),
        content: content.to_string(),
        attachments: Vec::new(),
    }
}

/// A snapshot touching every variant: all role kinds, a category, text and voice channels,
/// a thread and pins with and without attachments.
pub fn sample_snapshot() -> GuildSnapshot {
    let mut snapshot = GuildSnapshot::new(
        42,
        "Test Guild",
        Utc.with_ymd_and_hms(2025, 6, 1, 4, 0, 0).unwrap(),
    );

    snapshot.roles = vec![
        default_role(VIEW_CHANNEL_BITS | SEND_MESSAGES_BITS),
        RoleSnapshot::User(RoleAttributes {
            name: "Member".to_string(),
            hoist: true,
            mentionable: true,
            position: 1,
            colour: 0x00FF00,
            permissions: VIEW_CHANNEL_BITS,
            icon: Some(vec![0x89, 0x50, 0x4E, 0x47]),
        }),
        RoleSnapshot::Premium(RoleAttributes {
            name: "Server Booster".to_string(),
            hoist: false,
            mentionable: false,
            position: 2,
            colour: 0xF47FFF,
            permissions: 0,
            icon: None,
        }),
        RoleSnapshot::Bot(BotRole {
            name: "Music".to_string(),
            hoist: false,
            position: 3,
            colour: 0,
            permissions: SEND_MESSAGES_BITS,
            bot_id: 5555,
        }),
        user_role("Moderator", 4),
    ];

    snapshot.categories = vec![CategorySnapshot {
        name: "Info".to_string(),
        nsfw: false,
        position: 0,
        overwrites: vec![overwrite("@everyone", 0, SEND_MESSAGES_BITS)],
    }];

    let mut rules = text_channel("rules", 0, Some("Info"));
    rules.topic = Some("Read these".to_string());
    rules.permissions_synced = true;
    rules.default_auto_archive_minutes = Some(1440);
    rules.overwrites = vec![overwrite("@everyone", 0, SEND_MESSAGES_BITS)];

    let mut general = text_channel("general", 1, None);
    general.overwrites = vec![overwrite("Moderator", SEND_MESSAGES_BITS, 0)];

    snapshot.text_channels = vec![rules, general];

    snapshot.voice_channels = vec![VoiceChannelSnapshot {
        name: "Lounge".to_string(),
        nsfw: false,
        position: 2,
        category: Some("Info".to_string()),
        permissions_synced: false,
        overwrites: vec![overwrite("Member", VIEW_CHANNEL_BITS, 0)],
    }];

    snapshot.threads = vec![ThreadSnapshot {
        name: "Announcements chat".to_string(),
        auto_archive_minutes: 60,
        channel_name: "general".to_string(),
    }];

    let mut with_file = pin("alice", "rules", "Welcome!");
    with_file.attachments = vec![AttachmentSnapshot {
        filename: "banner.png".to_string(),
        data: vec![1, 2, 3, 4],
    }];
    snapshot.pinned_messages = vec![with_file, pin("bob", "general", "Be nice")];

    snapshot
}
