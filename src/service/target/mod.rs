//! Access to one live guild.
//!
//! `GuildTarget` is the seam between the snapshot services and Discord. The capture
//! pipeline only reads through it and the restore orchestrator issues every mutation
//! through it, one call at a time. `SerenityGuild` is the production implementation over
//! Discord's HTTP API.

pub mod discord;

#[cfg(test)]
pub mod memory;

use serenity::all::{ChannelId, GuildId, MessageId, RoleId, UserId};
use serenity::async_trait;

use crate::{
    error::target::TargetError,
    model::live::{
        ChannelEdit, ChannelSpec, EmbedMessage, LiveChannel, LiveMember, LivePin, LiveRole,
        LiveThread, RoleSpec, ThreadSpec,
    },
};

pub use discord::SerenityGuild;

/// Read and write primitives against one guild.
#[async_trait]
pub trait GuildTarget: Send + Sync {
    fn guild_id(&self) -> GuildId;

    async fn guild_name(&self) -> Result<String, TargetError>;

    /// Every role of the guild, including `@everyone` and managed roles.
    async fn roles(&self) -> Result<Vec<LiveRole>, TargetError>;

    /// Every channel and category of the guild, excluding threads.
    async fn channels(&self) -> Result<Vec<LiveChannel>, TargetError>;

    async fn active_threads(&self) -> Result<Vec<LiveThread>, TargetError>;

    /// Pinned messages of a channel, most recently pinned first.
    async fn pins(&self, channel: ChannelId) -> Result<Vec<LivePin>, TargetError>;

    /// Fetches a CDN asset such as an attachment or role icon.
    async fn download(&self, url: &str) -> Result<Vec<u8>, TargetError>;

    /// The bot's own membership in the guild.
    async fn acting_member(&self) -> Result<LiveMember, TargetError>;

    /// Whether the given user is currently a member of the guild.
    async fn member_present(&self, user: UserId) -> Result<bool, TargetError>;

    async fn delete_role(&self, role: RoleId) -> Result<(), TargetError>;

    async fn create_role(&self, spec: &RoleSpec) -> Result<RoleId, TargetError>;

    async fn edit_role(&self, role: RoleId, spec: &RoleSpec) -> Result<(), TargetError>;

    /// Moves every listed role to its position in one request.
    async fn reorder_roles(&self, positions: &[(RoleId, u16)]) -> Result<(), TargetError>;

    async fn delete_channel(&self, channel: ChannelId) -> Result<(), TargetError>;

    async fn create_channel(&self, spec: &ChannelSpec) -> Result<ChannelId, TargetError>;

    async fn edit_channel(&self, channel: ChannelId, edit: &ChannelEdit)
        -> Result<(), TargetError>;

    /// Starts a public thread in a text channel.
    async fn create_thread(
        &self,
        channel: ChannelId,
        spec: &ThreadSpec,
    ) -> Result<ChannelId, TargetError>;

    async fn send_embed(
        &self,
        channel: ChannelId,
        message: &EmbedMessage,
    ) -> Result<MessageId, TargetError>;

    async fn pin_message(&self, channel: ChannelId, message: MessageId)
        -> Result<(), TargetError>;

    async fn send_text(&self, channel: ChannelId, content: &str)
        -> Result<MessageId, TargetError>;
}
