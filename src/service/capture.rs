//! Capture pipeline.
//!
//! Reads the live structure of a guild through a `GuildTarget` and builds a
//! `GuildSnapshot`. Capture never mutates the guild. Failing to list roles or channels
//! aborts the capture; everything finer grained (an unreadable pin channel, an attachment
//! or icon that cannot be downloaded) is logged and skipped.

use chrono::Utc;
use serenity::all::{ChannelId, RoleId};
use std::collections::HashMap;
use std::time::Duration;

use crate::{
    error::target::TargetError,
    model::{
        live::{ChannelKind, LiveChannel, LiveOverwrite, LivePin, LiveRole, OverwriteTarget},
        snapshot::{
            AttachmentSnapshot, BotRole, CategorySnapshot, DefaultRole, GuildSnapshot,
            PermissionOverwriteSnapshot, PinnedMessageSnapshot, RoleAttributes, RoleSnapshot,
            TextChannelSnapshot, ThreadSnapshot, VoiceChannelSnapshot, MAX_ATTACHMENT_BYTES,
        },
    },
    service::target::GuildTarget,
};

pub struct CaptureService<'a> {
    target: &'a dyn GuildTarget,
    /// Delay after each pin fetch.
    pacing: Duration,
}

impl<'a> CaptureService<'a> {
    pub fn new(target: &'a dyn GuildTarget, pacing: Duration) -> Self {
        Self { target, pacing }
    }

    /// Captures the guild's current structure.
    ///
    /// # Returns
    /// - `Ok(GuildSnapshot)` - Snapshot of roles, channels, threads and pins
    /// - `Err(TargetError)` - The guild name, roles, channels or threads could not be read
    pub async fn capture(&self) -> Result<GuildSnapshot, TargetError> {
        let guild_id = self.target.guild_id();
        let guild_name = self.target.guild_name().await?;
        let mut snapshot = GuildSnapshot::new(guild_id.get(), guild_name, Utc::now());

        let mut roles = self.target.roles().await?;
        roles.sort_by_key(|role| (role.position, role.id));
        let role_names: HashMap<RoleId, String> = roles
            .iter()
            .map(|role| (role.id, role.name.clone()))
            .collect();

        for role in &roles {
            snapshot.roles.push(self.capture_role(role).await);
        }

        let mut channels = self.target.channels().await?;
        channels.sort_by_key(|channel| (channel.position, channel.id));
        let categories: HashMap<ChannelId, &LiveChannel> = channels
            .iter()
            .filter(|channel| channel.kind == ChannelKind::Category)
            .map(|channel| (channel.id, channel))
            .collect();

        for channel in &channels {
            let overwrites = capture_overwrites(&channel.overwrites, &role_names);
            let parent = channel.parent_id.and_then(|id| categories.get(&id));
            let category = parent.map(|parent| parent.name.clone());
            let permissions_synced = parent
                .map(|parent| same_overwrites(&channel.overwrites, &parent.overwrites))
                .unwrap_or(false);

            match channel.kind {
                ChannelKind::Category => snapshot.categories.push(CategorySnapshot {
                    name: channel.name.clone(),
                    nsfw: channel.nsfw,
                    position: channel.position,
                    overwrites,
                }),
                ChannelKind::Text => snapshot.text_channels.push(TextChannelSnapshot {
                    name: channel.name.clone(),
                    topic: channel.topic.clone(),
                    nsfw: channel.nsfw,
                    position: channel.position,
                    category,
                    permissions_synced,
                    default_auto_archive_minutes: channel.default_auto_archive_minutes,
                    overwrites,
                }),
                ChannelKind::Voice => snapshot.voice_channels.push(VoiceChannelSnapshot {
                    name: channel.name.clone(),
                    nsfw: channel.nsfw,
                    position: channel.position,
                    category,
                    permissions_synced,
                    overwrites,
                }),
                ChannelKind::Other => {
                    tracing::debug!("Skipping unsupported channel {}", channel.name);
                }
            }
        }

        let text_channels: Vec<&LiveChannel> = channels
            .iter()
            .filter(|channel| channel.kind == ChannelKind::Text)
            .collect();

        let mut threads = self.target.active_threads().await?;
        threads.sort_by_key(|thread| thread.id);
        for thread in threads {
            let parent = text_channels
                .iter()
                .find(|channel| Some(channel.id) == thread.parent_id);
            if let Some(parent) = parent {
                snapshot.threads.push(ThreadSnapshot {
                    name: thread.name,
                    auto_archive_minutes: thread.auto_archive_minutes,
                    channel_name: parent.name.clone(),
                });
            }
        }

        for channel in text_channels {
            let pins = self.target.pins(channel.id).await;
            // Rejected fetches count against the rate limit too
            tokio::time::sleep(self.pacing).await;
            let pins = match pins {
                Ok(pins) => pins,
                Err(e) => {
                    tracing::warn!("Skipping pins of channel {}: {}", channel.name, e);
                    continue;
                }
            };

            // Discord lists the most recent pin first
            for pin in pins.iter().rev().filter(|pin| !pin.author_is_bot) {
                snapshot
                    .pinned_messages
                    .push(self.capture_pin(pin, &channel.name).await);
            }
        }

        tracing::info!(
            "Captured guild {}: {} roles, {} categories, {} text, {} voice, {} threads, {} pins",
            guild_id,
            snapshot.roles.len(),
            snapshot.categories.len(),
            snapshot.text_channels.len(),
            snapshot.voice_channels.len(),
            snapshot.threads.len(),
            snapshot.pinned_messages.len()
        );

        Ok(snapshot)
    }

    /// Classifies a role by its ownership flags.
    async fn capture_role(&self, role: &LiveRole) -> RoleSnapshot {
        if let Some(bot_id) = role.bot_id {
            return RoleSnapshot::Bot(BotRole {
                name: role.name.clone(),
                hoist: role.hoist,
                position: role.position,
                colour: role.colour,
                permissions: role.permissions,
                bot_id: bot_id.get(),
            });
        }

        if role.is_default && !role.premium_subscriber {
            return RoleSnapshot::Default(DefaultRole {
                mentionable: role.mentionable,
                permissions: role.permissions,
            });
        }

        let attributes = RoleAttributes {
            name: role.name.clone(),
            hoist: role.hoist,
            mentionable: role.mentionable,
            position: role.position,
            colour: role.colour,
            permissions: role.permissions,
            icon: self.download_icon(role).await,
        };

        if role.premium_subscriber {
            RoleSnapshot::Premium(attributes)
        } else {
            RoleSnapshot::User(attributes)
        }
    }

    async fn download_icon(&self, role: &LiveRole) -> Option<Vec<u8>> {
        let url = role.icon_url.as_ref()?;

        match self.target.download(url).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!("Skipping icon of role {}: {}", role.name, e);
                None
            }
        }
    }

    async fn capture_pin(&self, pin: &LivePin, channel_name: &str) -> PinnedMessageSnapshot {
        let mut attachments = Vec::new();

        for attachment in &pin.attachments {
            if attachment.size >= MAX_ATTACHMENT_BYTES {
                tracing::debug!(
                    "Skipping attachment {} ({} bytes) over size limit",
                    attachment.filename,
                    attachment.size
                );
                continue;
            }

            match self.target.download(&attachment.url).await {
                Ok(data) if (data.len() as u64) < MAX_ATTACHMENT_BYTES => {
                    attachments.push(AttachmentSnapshot {
                        filename: attachment.filename.clone(),
                        data,
                    })
                }
                Ok(_) => tracing::debug!(
                    "Skipping attachment {} larger than reported",
                    attachment.filename
                ),
                Err(e) => {
                    tracing::warn!("Skipping attachment {}: {}", attachment.filename, e)
                }
            }
        }

        PinnedMessageSnapshot {
            author: pin.author.clone(),
            posted_at: pin.posted_at,
            channel_name: channel_name.to_string(),
            content: pin.content.clone(),
            attachments,
        }
    }
}

/// Role overwrites whose role still exists, keyed by role name.
fn capture_overwrites(
    overwrites: &[LiveOverwrite],
    role_names: &HashMap<RoleId, String>,
) -> Vec<PermissionOverwriteSnapshot> {
    overwrites
        .iter()
        .filter_map(|overwrite| match overwrite.target {
            OverwriteTarget::Role(id) => role_names.get(&id).map(|name| {
                PermissionOverwriteSnapshot {
                    role_name: name.clone(),
                    allow: overwrite.allow,
                    deny: overwrite.deny,
                }
            }),
            OverwriteTarget::Member(_) => None,
        })
        .collect()
}

/// Order-insensitive comparison of two overwrite sets.
fn same_overwrites(a: &[LiveOverwrite], b: &[LiveOverwrite]) -> bool {
    a.len() == b.len() && a.iter().all(|overwrite| b.contains(overwrite))
}
