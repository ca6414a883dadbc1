//! Guild snapshot model.
//!
//! A `GuildSnapshot` is the portable record of a guild's structure at one point in time:
//! roles, categories, text and voice channels, active threads and pinned messages. It is
//! produced wholesale by the capture pipeline, written once by the snapshot store, and read
//! wholesale by the restore orchestrator. Nothing in here talks to Discord.

pub mod channel;
pub mod pin;
pub mod role;

#[cfg(test)]
pub mod fixture;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::snapshot::SnapshotError;

pub use channel::{
    CategorySnapshot, PermissionOverwriteSnapshot, TextChannelSnapshot, ThreadSnapshot,
    VoiceChannelSnapshot,
};
pub use pin::{AttachmentSnapshot, PinnedMessageSnapshot, MAX_ATTACHMENT_BYTES};
pub use role::{BotRole, DefaultRole, RoleAttributes, RoleSnapshot};

/// Structural snapshot of one guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildSnapshot {
    pub guild_id: u64,
    pub guild_name: String,
    pub captured_at: DateTime<Utc>,
    /// Every role of the guild, ordered by position.
    pub roles: Vec<RoleSnapshot>,
    pub categories: Vec<CategorySnapshot>,
    pub text_channels: Vec<TextChannelSnapshot>,
    pub voice_channels: Vec<VoiceChannelSnapshot>,
    pub threads: Vec<ThreadSnapshot>,
    /// Pinned messages in capture order.
    pub pinned_messages: Vec<PinnedMessageSnapshot>,
}

impl GuildSnapshot {
    /// Creates an empty snapshot for the given guild.
    pub fn new(guild_id: u64, guild_name: impl Into<String>, captured_at: DateTime<Utc>) -> Self {
        Self {
            guild_id,
            guild_name: guild_name.into(),
            captured_at,
            roles: Vec::new(),
            categories: Vec::new(),
            text_channels: Vec::new(),
            voice_channels: Vec::new(),
            threads: Vec::new(),
            pinned_messages: Vec::new(),
        }
    }

    pub fn default_role(&self) -> Option<&DefaultRole> {
        self.roles.iter().find_map(|role| match role {
            RoleSnapshot::Default(default) => Some(default),
            _ => None,
        })
    }

    pub fn premium_role(&self) -> Option<&RoleAttributes> {
        self.roles.iter().find_map(|role| match role {
            RoleSnapshot::Premium(premium) => Some(premium),
            _ => None,
        })
    }

    pub fn user_roles(&self) -> impl Iterator<Item = &RoleAttributes> {
        self.roles.iter().filter_map(|role| match role {
            RoleSnapshot::User(user) => Some(user),
            _ => None,
        })
    }

    pub fn bot_roles(&self) -> impl Iterator<Item = &BotRole> {
        self.roles.iter().filter_map(|role| match role {
            RoleSnapshot::Bot(bot) => Some(bot),
            _ => None,
        })
    }

    /// Checks the role cardinality invariant.
    ///
    /// A snapshot must hold exactly one default role and at most one premium role.
    ///
    /// # Returns
    /// - `Ok(())` - Snapshot is well formed
    /// - `Err(SnapshotError::MissingDefaultRole)` - No default role captured
    /// - `Err(SnapshotError::DuplicateRoleVariant)` - More than one default or premium role
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let defaults = self
            .roles
            .iter()
            .filter(|role| matches!(role, RoleSnapshot::Default(_)))
            .count();
        let premiums = self
            .roles
            .iter()
            .filter(|role| matches!(role, RoleSnapshot::Premium(_)))
            .count();

        if defaults == 0 {
            return Err(SnapshotError::MissingDefaultRole);
        }
        if defaults > 1 {
            return Err(SnapshotError::DuplicateRoleVariant {
                variant: "default",
                count: defaults,
            });
        }
        if premiums > 1 {
            return Err(SnapshotError::DuplicateRoleVariant {
                variant: "premium",
                count: premiums,
            });
        }

        Ok(())
    }
}
