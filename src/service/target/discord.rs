//! Discord implementation of `GuildTarget`.
//!
//! Every method is a single HTTP call through Serenity, except `download` which fetches
//! CDN assets with reqwest. Serenity models are converted into the `Live*` views right at
//! this boundary so nothing above it depends on Serenity's struct layout.

use chrono::{DateTime, Utc};
use serenity::{
    all::{
        AutoArchiveDuration, ChannelId, ChannelType, CreateAttachment, CreateChannel, CreateEmbed,
        CreateMessage, CreateThread, EditChannel, EditRole, GuildChannel, GuildId, Message,
        MessageId, PermissionOverwrite, PermissionOverwriteType, Permissions, Role, RoleId, UserId,
    },
    async_trait,
    http::{Http, HttpError, LightMethod, Request, Route},
};
use std::sync::Arc;

use crate::{
    error::target::TargetError,
    model::live::{
        ChannelEdit, ChannelKind, ChannelSpec, EmbedMessage, LiveAttachment, LiveChannel,
        LiveMember, LiveOverwrite, LivePin, LiveRole, LiveThread, OverwriteTarget, RoleSpec,
        ThreadSpec,
    },
};

use super::GuildTarget;

/// A guild reached through Discord's HTTP API.
pub struct SerenityGuild {
    http: Arc<Http>,
    downloader: reqwest::Client,
    guild_id: GuildId,
    bot_user_id: UserId,
}

impl SerenityGuild {
    pub fn new(
        http: Arc<Http>,
        downloader: reqwest::Client,
        guild_id: GuildId,
        bot_user_id: UserId,
    ) -> Self {
        Self {
            http,
            downloader,
            guild_id,
            bot_user_id,
        }
    }

    fn role_builder(spec: &RoleSpec) -> EditRole<'static> {
        let mut builder = EditRole::new();
        if let Some(name) = &spec.name {
            builder = builder.name(name.clone());
        }
        if let Some(colour) = spec.colour {
            builder = builder.colour(colour);
        }
        if let Some(hoist) = spec.hoist {
            builder = builder.hoist(hoist);
        }
        if let Some(mentionable) = spec.mentionable {
            builder = builder.mentionable(mentionable);
        }
        if let Some(permissions) = spec.permissions {
            builder = builder.permissions(Permissions::from_bits_truncate(permissions));
        }
        builder
    }
}

#[async_trait]
impl GuildTarget for SerenityGuild {
    fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    async fn guild_name(&self) -> Result<String, TargetError> {
        Ok(self.guild_id.to_partial_guild(&self.http).await?.name)
    }

    async fn roles(&self) -> Result<Vec<LiveRole>, TargetError> {
        let roles = self.guild_id.roles(&self.http).await?;

        Ok(roles
            .values()
            .map(|role| live_role(self.guild_id, role))
            .collect())
    }

    async fn channels(&self) -> Result<Vec<LiveChannel>, TargetError> {
        let channels = self.guild_id.channels(&self.http).await?;

        Ok(channels.values().map(live_channel).collect())
    }

    async fn active_threads(&self) -> Result<Vec<LiveThread>, TargetError> {
        let data = self.guild_id.get_active_threads(&self.http).await?;

        Ok(data.threads.iter().map(live_thread).collect())
    }

    async fn pins(&self, channel: ChannelId) -> Result<Vec<LivePin>, TargetError> {
        let messages = channel.pins(&self.http).await?;

        Ok(messages.iter().map(live_pin).collect())
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, TargetError> {
        let bytes = self
            .downloader
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(bytes.to_vec())
    }

    async fn acting_member(&self) -> Result<LiveMember, TargetError> {
        let member = self.guild_id.member(&self.http, self.bot_user_id).await?;

        Ok(LiveMember {
            user_id: member.user.id,
            role_ids: member.roles,
        })
    }

    async fn member_present(&self, user: UserId) -> Result<bool, TargetError> {
        match self.guild_id.member(&self.http, user).await {
            Ok(_) => Ok(true),
            Err(serenity::Error::Http(HttpError::UnsuccessfulRequest(response)))
                if response.status_code.as_u16() == 404 =>
            {
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_role(&self, role: RoleId) -> Result<(), TargetError> {
        self.guild_id.delete_role(&self.http, role).await?;
        Ok(())
    }

    async fn create_role(&self, spec: &RoleSpec) -> Result<RoleId, TargetError> {
        let icon = spec
            .icon
            .clone()
            .flatten()
            .map(|bytes| CreateAttachment::bytes(bytes, "icon.png"));
        let builder = Self::role_builder(spec).icon(icon.as_ref());

        Ok(self.guild_id.create_role(&self.http, builder).await?.id)
    }

    async fn edit_role(&self, role: RoleId, spec: &RoleSpec) -> Result<(), TargetError> {
        let mut builder = Self::role_builder(spec);
        if let Some(icon) = &spec.icon {
            let icon = icon
                .as_ref()
                .map(|bytes| CreateAttachment::bytes(bytes.clone(), "icon.png"));
            builder = builder.icon(icon.as_ref());
        }

        self.guild_id.edit_role(&self.http, role, builder).await?;
        Ok(())
    }

    async fn reorder_roles(&self, positions: &[(RoleId, u16)]) -> Result<(), TargetError> {
        let body: Vec<_> = positions
            .iter()
            .map(|(id, position)| {
                serde_json::json!({ "id": id.to_string(), "position": position })
            })
            .collect();
        let body = serde_json::to_vec(&body)
            .map_err(|e| TargetError::Rejected(format!("Invalid role position body: {}", e)))?;

        let request = Request::new(
            Route::GuildRoles {
                guild_id: self.guild_id,
            },
            LightMethod::Patch,
        )
        .body(Some(body));

        // Response roles lack `guild_id`, so they are not decoded into `Role`
        self.http.fire::<serde_json::Value>(request).await?;
        Ok(())
    }

    async fn delete_channel(&self, channel: ChannelId) -> Result<(), TargetError> {
        channel.delete(&self.http).await?;
        Ok(())
    }

    async fn create_channel(&self, spec: &ChannelSpec) -> Result<ChannelId, TargetError> {
        let kind = match spec.kind {
            ChannelKind::Voice => ChannelType::Voice,
            ChannelKind::Category => ChannelType::Category,
            ChannelKind::Text | ChannelKind::Other => ChannelType::Text,
        };

        let mut builder = CreateChannel::new(spec.name.clone())
            .kind(kind)
            .position(spec.position)
            .nsfw(spec.nsfw)
            .permissions(spec.overwrites.iter().map(permission_overwrite));
        if let Some(parent_id) = spec.parent_id {
            builder = builder.category(parent_id);
        }
        if let Some(topic) = &spec.topic {
            builder = builder.topic(topic.clone());
        }
        if let Some(minutes) = spec.default_auto_archive_minutes {
            builder = builder.default_auto_archive_duration(AutoArchiveDuration::from(minutes));
        }

        Ok(self.guild_id.create_channel(&self.http, builder).await?.id)
    }

    async fn edit_channel(
        &self,
        channel: ChannelId,
        edit: &ChannelEdit,
    ) -> Result<(), TargetError> {
        let mut builder = EditChannel::new();
        if let Some(nsfw) = edit.nsfw {
            builder = builder.nsfw(nsfw);
        }
        if let Some(overwrites) = &edit.overwrites {
            builder = builder.permissions(overwrites.iter().map(permission_overwrite));
        }

        channel.edit(&self.http, builder).await?;
        Ok(())
    }

    async fn create_thread(
        &self,
        channel: ChannelId,
        spec: &ThreadSpec,
    ) -> Result<ChannelId, TargetError> {
        let builder = CreateThread::new(spec.name.clone())
            .kind(ChannelType::PublicThread)
            .auto_archive_duration(AutoArchiveDuration::from(spec.auto_archive_minutes));

        Ok(channel.create_thread(&self.http, builder).await?.id)
    }

    async fn send_embed(
        &self,
        channel: ChannelId,
        message: &EmbedMessage,
    ) -> Result<MessageId, TargetError> {
        let mut embed = CreateEmbed::new().title(message.title.clone());
        if let Some(description) = &message.description {
            embed = embed.description(description.clone());
        }

        let files = message
            .files
            .iter()
            .map(|(filename, data)| CreateAttachment::bytes(data.clone(), filename.clone()));
        let builder = CreateMessage::new().embed(embed).add_files(files);

        Ok(channel.send_message(&self.http, builder).await?.id)
    }

    async fn pin_message(
        &self,
        channel: ChannelId,
        message: MessageId,
    ) -> Result<(), TargetError> {
        channel.pin(&self.http, message).await?;
        Ok(())
    }

    async fn send_text(
        &self,
        channel: ChannelId,
        content: &str,
    ) -> Result<MessageId, TargetError> {
        Ok(channel.say(&self.http, content).await?.id)
    }
}

/// Converts a Serenity role, keeping the raw flags the capture pipeline classifies on.
pub fn live_role(guild_id: GuildId, role: &Role) -> LiveRole {
    LiveRole {
        id: role.id,
        name: role.name.clone(),
        position: role.position,
        colour: role.colour.0,
        hoist: role.hoist,
        mentionable: role.mentionable,
        permissions: role.permissions.bits(),
        managed: role.managed,
        bot_id: role.tags.bot_id,
        premium_subscriber: role.tags.premium_subscriber,
        is_default: role.id.get() == guild_id.get(),
        icon_url: role.icon.as_ref().map(|hash| {
            format!(
                "https://cdn.discordapp.com/role-icons/{}/{}.png",
                role.id, hash
            )
        }),
    }
}

pub fn live_channel(channel: &GuildChannel) -> LiveChannel {
    let kind = match channel.kind {
        ChannelType::Text | ChannelType::News => ChannelKind::Text,
        ChannelType::Voice => ChannelKind::Voice,
        ChannelType::Category => ChannelKind::Category,
        _ => ChannelKind::Other,
    };

    LiveChannel {
        id: channel.id,
        name: channel.name.clone(),
        kind,
        position: channel.position,
        parent_id: channel.parent_id,
        topic: channel.topic.clone(),
        nsfw: channel.nsfw,
        default_auto_archive_minutes: channel.default_auto_archive_duration.map(u16::from),
        overwrites: channel
            .permission_overwrites
            .iter()
            .filter_map(live_overwrite)
            .collect(),
    }
}

pub fn live_thread(thread: &GuildChannel) -> LiveThread {
    LiveThread {
        id: thread.id,
        name: thread.name.clone(),
        parent_id: thread.parent_id,
        auto_archive_minutes: thread
            .thread_metadata
            .as_ref()
            .map(|metadata| u16::from(metadata.auto_archive_duration))
            .unwrap_or(1440),
    }
}

pub fn live_pin(message: &Message) -> LivePin {
    let author = match message.author.discriminator {
        Some(discriminator) => format!("{}#{:04}", message.author.name, discriminator.get()),
        None => message.author.name.clone(),
    };

    LivePin {
        id: message.id,
        author,
        author_is_bot: message.author.bot,
        posted_at: DateTime::<Utc>::from_timestamp(message.timestamp.unix_timestamp(), 0)
            .unwrap_or_default(),
        content: message.content.clone(),
        attachments: message
            .attachments
            .iter()
            .map(|attachment| LiveAttachment {
                filename: attachment.filename.clone(),
                size: u64::from(attachment.size),
                url: attachment.url.clone(),
            })
            .collect(),
    }
}

fn live_overwrite(overwrite: &PermissionOverwrite) -> Option<LiveOverwrite> {
    let target = match overwrite.kind {
        PermissionOverwriteType::Role(id) => OverwriteTarget::Role(id),
        PermissionOverwriteType::Member(id) => OverwriteTarget::Member(id),
        _ => return None,
    };

    Some(LiveOverwrite {
        target,
        allow: overwrite.allow.bits(),
        deny: overwrite.deny.bits(),
    })
}

fn permission_overwrite(overwrite: &LiveOverwrite) -> PermissionOverwrite {
    let kind = match overwrite.target {
        OverwriteTarget::Role(id) => PermissionOverwriteType::Role(id),
        OverwriteTarget::Member(id) => PermissionOverwriteType::Member(id),
    };

    PermissionOverwrite {
        allow: Permissions::from_bits_truncate(overwrite.allow),
        deny: Permissions::from_bits_truncate(overwrite.deny),
        kind,
    }
}
