//! Restore orchestrator.
//!
//! Rebuilds a guild's structure from a snapshot through a fixed sequence of steps:
//!
//! 1. Delete existing roles (best effort)
//! 2. Edit `@everyone`
//! 3. Edit the server booster role and the roles of bots present in the guild
//! 4. Create user roles
//! 5. Reorder all restored roles in one call, keeping the bot's own role on top
//! 6. Delete existing channels (best effort)
//! 7. Create categories
//! 8. Create text channels
//! 9. Create voice channels
//! 10. Create threads
//! 11. Repost and re-pin pinned messages
//! 12. Post a completion notice
//!
//! Later steps resolve names against entities created by earlier ones, so the order is
//! fixed and calls are issued one at a time. Individual call failures are recorded in the
//! returned `RestoreReport` and never stop the run. The only errors returned are failures
//! to read the guild before anything has been changed.

mod channels;
mod pins;
mod resolve;
mod roles;

use serenity::all::{RoleId, UserId};
use std::collections::HashSet;
use std::time::Duration;

use crate::{
    error::target::TargetError,
    model::{
        live::{LiveChannel, LiveMember, LiveRole},
        restore::{RestorePreview, RestoreReport},
        snapshot::GuildSnapshot,
    },
    service::target::GuildTarget,
};

pub use pins::COMPLETION_NOTICE;
pub use resolve::DEFAULT_ROLE_NAME;

pub struct RestoreService<'a> {
    target: &'a dyn GuildTarget,
    /// Delay after each mutating call.
    pacing: Duration,
}

/// Live state read before the first mutation.
struct GuildState {
    acting: LiveMember,
    acting_role: Option<RoleId>,
    roles: Vec<LiveRole>,
    channels: Vec<LiveChannel>,
}

impl<'a> RestoreService<'a> {
    pub fn new(target: &'a dyn GuildTarget, pacing: Duration) -> Self {
        Self { target, pacing }
    }

    /// Lists what a restore of `snapshot` would destroy and which bot roles it cannot restore.
    ///
    /// # Returns
    /// - `Ok(RestorePreview)` - Roles and channels to delete, missing bots, acting role
    /// - `Err(TargetError)` - The guild could not be read
    pub async fn preview(&self, snapshot: &GuildSnapshot) -> Result<RestorePreview, TargetError> {
        let state = self.read_state().await?;

        let mut roles_to_delete: Vec<&LiveRole> =
            state.roles.iter().filter(|role| is_deletable(role)).collect();
        roles_to_delete.sort_by_key(|role| (role.position, role.id));

        let mut channels_to_delete: Vec<&LiveChannel> = state.channels.iter().collect();
        channels_to_delete.sort_by_key(|channel| (channel.position, channel.id));

        Ok(RestorePreview {
            roles_to_delete: roles_to_delete.iter().map(|r| r.name.clone()).collect(),
            channels_to_delete: channels_to_delete.iter().map(|c| c.name.clone()).collect(),
            missing_bots: self.missing_bots(snapshot, state.acting.user_id).await?,
            acting_role: state.acting_role,
        })
    }

    /// Restores `snapshot` into the target guild.
    ///
    /// # Returns
    /// - `Ok(RestoreReport)` - Itemized outcome of every step
    /// - `Err(TargetError)` - The guild's members, roles or channels could not be read;
    ///   nothing has been changed
    pub async fn restore(&self, snapshot: &GuildSnapshot) -> Result<RestoreReport, TargetError> {
        let state = self.read_state().await?;
        let mut report = RestoreReport::default();

        tracing::info!(
            "Restoring snapshot of {} captured {} into guild {}",
            snapshot.guild_name,
            snapshot.captured_at,
            self.target.guild_id()
        );

        let roles = self.restore_roles(snapshot, &state, &mut report).await;
        let channels = self
            .restore_channels(snapshot, &state, &roles, &mut report)
            .await;
        self.restore_pins(snapshot, &channels, &mut report).await;
        self.signal_completion(snapshot, &channels, &mut report).await;

        tracing::info!(
            "Restore into guild {} finished with {} failed calls, {} dropped overwrites",
            self.target.guild_id(),
            report.failure_count(),
            report.dropped_overwrites
        );

        Ok(report)
    }

    async fn read_state(&self) -> Result<GuildState, TargetError> {
        let acting = self.target.acting_member().await?;
        let roles = self.target.roles().await?;
        let channels = self.target.channels().await?;
        let acting_role = roles
            .iter()
            .find(|role| role.bot_id == Some(acting.user_id))
            .map(|role| role.id);

        Ok(GuildState {
            acting,
            acting_role,
            roles,
            channels,
        })
    }

    /// Names of captured bot roles whose bot is not in the guild.
    async fn missing_bots(
        &self,
        snapshot: &GuildSnapshot,
        acting_user: UserId,
    ) -> Result<Vec<String>, TargetError> {
        let mut missing = Vec::new();
        let mut checked = HashSet::new();

        for bot in snapshot.bot_roles() {
            let bot_id = UserId::new(bot.bot_id);
            if bot_id == acting_user || !checked.insert(bot_id) {
                continue;
            }
            if !self.target.member_present(bot_id).await? {
                missing.push(bot.name.clone());
            }
        }

        Ok(missing)
    }

    async fn pause(&self) {
        if !self.pacing.is_zero() {
            tokio::time::sleep(self.pacing).await;
        }
    }
}

/// Roles a restore deletes: everything except `@everyone` and integration-managed roles.
fn is_deletable(role: &LiveRole) -> bool {
    !role.is_default && !role.managed
}
