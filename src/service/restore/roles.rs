use serenity::all::{RoleId, UserId};

use crate::model::{
    live::{LiveRole, RoleSpec},
    restore::{RestoreReport, StepOutcome},
    snapshot::GuildSnapshot,
};

use super::{is_deletable, resolve::RoleIndex, GuildState, RestoreService, DEFAULT_ROLE_NAME};

impl<'a> RestoreService<'a> {
    /// Steps 1 to 5: rebuilds the role hierarchy.
    ///
    /// # Returns
    /// - `RoleIndex` - Every role name resolvable for channel overwrites
    pub(super) async fn restore_roles(
        &self,
        snapshot: &GuildSnapshot,
        state: &GuildState,
        report: &mut RestoreReport,
    ) -> RoleIndex {
        let survivors = self.delete_roles(state, report).await;

        // Survivors first, then edited roles, then created roles
        let mut index = RoleIndex::default();
        for role in &survivors {
            if role.is_default {
                index.insert(DEFAULT_ROLE_NAME, role.id);
            } else {
                index.insert(role.name.clone(), role.id);
            }
        }

        let mut positions: Vec<(RoleId, u16)> = Vec::new();

        report.default_role = self.edit_default_role(snapshot, &survivors).await;
        report.premium_role = self
            .edit_premium_role(snapshot, &survivors, &mut index, &mut positions)
            .await;
        self.edit_bot_roles(snapshot, state, &survivors, &mut index, &mut positions, report)
            .await;

        for role in snapshot.user_roles() {
            let spec = RoleSpec {
                name: Some(role.name.clone()),
                colour: Some(role.colour),
                hoist: Some(role.hoist),
                mentionable: Some(role.mentionable),
                permissions: Some(role.permissions),
                icon: role.icon.clone().map(Some),
            };

            match self.target.create_role(&spec).await {
                Ok(id) => {
                    index.insert(role.name.clone(), id);
                    positions.push((id, role.position));
                    report.roles_created.success(&role.name);
                }
                Err(e) => {
                    tracing::warn!("Failed to create role {}: {}", role.name, e);
                    report.roles_created.failure(&role.name, e);
                }
            }
            self.pause().await;
        }

        report.role_positions = self.reorder_roles(positions, state.acting_role).await;

        index
    }

    /// Step 1: deletes every deletable role, returning the roles that remain.
    async fn delete_roles<'s>(
        &self,
        state: &'s GuildState,
        report: &mut RestoreReport,
    ) -> Vec<&'s LiveRole> {
        let mut roles: Vec<&LiveRole> = state.roles.iter().collect();
        roles.sort_by_key(|role| (role.position, role.id));

        let mut survivors = Vec::new();
        for role in roles {
            if !is_deletable(role) {
                survivors.push(role);
                continue;
            }

            match self.target.delete_role(role.id).await {
                Ok(()) => report.roles_deleted.success(&role.name),
                Err(e) => {
                    tracing::warn!("Failed to delete role {}: {}", role.name, e);
                    report.roles_deleted.failure(&role.name, e);
                    survivors.push(role);
                }
            }
            self.pause().await;
        }

        survivors
    }

    /// Step 2: `@everyone` only takes permissions and the mentionable flag.
    async fn edit_default_role(
        &self,
        snapshot: &GuildSnapshot,
        survivors: &[&LiveRole],
    ) -> StepOutcome {
        let Some(captured) = snapshot.default_role() else {
            return StepOutcome::Skipped("No default role captured".to_string());
        };
        let Some(live) = survivors.iter().find(|role| role.is_default) else {
            return StepOutcome::Failed("Guild has no default role".to_string());
        };

        let spec = RoleSpec {
            mentionable: Some(captured.mentionable),
            permissions: Some(captured.permissions),
            ..Default::default()
        };

        let outcome = match self.target.edit_role(live.id, &spec).await {
            Ok(()) => StepOutcome::Applied,
            Err(e) => {
                tracing::warn!("Failed to edit default role: {}", e);
                StepOutcome::Failed(e.to_string())
            }
        };
        self.pause().await;

        outcome
    }

    /// Step 3: the booster role cannot be created, only edited when the guild has one.
    async fn edit_premium_role(
        &self,
        snapshot: &GuildSnapshot,
        survivors: &[&LiveRole],
        index: &mut RoleIndex,
        positions: &mut Vec<(RoleId, u16)>,
    ) -> StepOutcome {
        let Some(captured) = snapshot.premium_role() else {
            return StepOutcome::Skipped("No server booster role captured".to_string());
        };
        let Some(live) = survivors.iter().find(|role| role.premium_subscriber) else {
            return StepOutcome::Skipped("Guild has no server booster role".to_string());
        };

        let spec = RoleSpec {
            name: Some(captured.name.clone()),
            colour: Some(captured.colour),
            hoist: Some(captured.hoist),
            mentionable: Some(captured.mentionable),
            permissions: Some(captured.permissions),
            // A booster role captured without an icon must lose the one it has now
            icon: Some(captured.icon.clone()),
        };

        let outcome = match self.target.edit_role(live.id, &spec).await {
            Ok(()) => {
                index.insert(captured.name.clone(), live.id);
                positions.push((live.id, captured.position));
                StepOutcome::Applied
            }
            Err(e) => {
                tracing::warn!("Failed to edit server booster role: {}", e);
                StepOutcome::Failed(e.to_string())
            }
        };
        self.pause().await;

        outcome
    }

    /// Step 3b: edits the roles of captured bots that are in the guild.
    ///
    /// Bots that are absent are reported as missing and their roles left alone. The acting
    /// bot's own role is never edited; it is positioned above everything in step 5.
    async fn edit_bot_roles(
        &self,
        snapshot: &GuildSnapshot,
        state: &GuildState,
        survivors: &[&LiveRole],
        index: &mut RoleIndex,
        positions: &mut Vec<(RoleId, u16)>,
        report: &mut RestoreReport,
    ) {
        for bot in snapshot.bot_roles() {
            let bot_id = UserId::new(bot.bot_id);
            if bot_id == state.acting.user_id {
                continue;
            }

            match self.target.member_present(bot_id).await {
                Ok(true) => {}
                Ok(false) => {
                    tracing::info!("Bot {} for role {} is not in the guild", bot_id, bot.name);
                    report.missing_bots.push(bot.name.clone());
                    continue;
                }
                Err(e) => {
                    report.bot_roles.failure(&bot.name, e);
                    continue;
                }
            }

            let Some(live) = survivors.iter().find(|role| role.bot_id == Some(bot_id)) else {
                report
                    .bot_roles
                    .failure(&bot.name, "Bot is present but has no integration role");
                continue;
            };

            let spec = RoleSpec {
                name: Some(bot.name.clone()),
                colour: Some(bot.colour),
                hoist: Some(bot.hoist),
                permissions: Some(bot.permissions),
                ..Default::default()
            };

            match self.target.edit_role(live.id, &spec).await {
                Ok(()) => {
                    index.insert(bot.name.clone(), live.id);
                    positions.push((live.id, bot.position));
                    report.bot_roles.success(&bot.name);
                }
                Err(e) => {
                    tracing::warn!("Failed to edit bot role {}: {}", bot.name, e);
                    report.bot_roles.failure(&bot.name, e);
                }
            }
            self.pause().await;
        }
    }

    /// Step 5: one bulk reorder with the acting role forced above every restored role.
    async fn reorder_roles(
        &self,
        mut positions: Vec<(RoleId, u16)>,
        acting_role: Option<RoleId>,
    ) -> StepOutcome {
        match acting_role {
            Some(acting_role) => {
                let top = positions.iter().map(|(_, position)| *position).max();
                positions.push((acting_role, top.unwrap_or(0).saturating_add(1)));
            }
            None => tracing::warn!("Bot has no integration role to keep on top"),
        }

        if positions.is_empty() {
            return StepOutcome::Skipped("No roles to position".to_string());
        }
        positions.sort_by_key(|(id, position)| (*position, *id));

        let outcome = match self.target.reorder_roles(&positions).await {
            Ok(()) => StepOutcome::Applied,
            Err(e) => {
                tracing::warn!("Failed to reorder roles: {}", e);
                StepOutcome::Failed(e.to_string())
            }
        };
        self.pause().await;

        outcome
    }
}
