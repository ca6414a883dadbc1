use serenity::all::ChannelId;

use crate::model::{
    live::{ChannelEdit, ChannelKind, ChannelSpec, LiveChannel, ThreadSpec},
    restore::RestoreReport,
    snapshot::{GuildSnapshot, PermissionOverwriteSnapshot},
};

use super::{
    resolve::{ChannelIndex, CreatedCategory, RoleIndex},
    GuildState, RestoreService,
};

/// The fields text and voice channels share during creation.
struct ChannelPlan<'s> {
    name: &'s str,
    kind: ChannelKind,
    position: u16,
    nsfw: bool,
    category: Option<&'s str>,
    permissions_synced: bool,
    topic: Option<String>,
    default_auto_archive_minutes: Option<u16>,
    overwrites: &'s [PermissionOverwriteSnapshot],
}

impl<'a> RestoreService<'a> {
    /// Steps 6 to 10: replaces every channel, category and thread.
    ///
    /// # Returns
    /// - `ChannelIndex` - Recreated categories and text channels by name
    pub(super) async fn restore_channels(
        &self,
        snapshot: &GuildSnapshot,
        state: &GuildState,
        roles: &RoleIndex,
        report: &mut RestoreReport,
    ) -> ChannelIndex {
        self.delete_channels(&state.channels, report).await;

        let mut index = ChannelIndex::default();

        let mut categories: Vec<_> = snapshot.categories.iter().collect();
        categories.sort_by_key(|category| category.position);
        for category in categories {
            let (overwrites, dropped) = roles.resolve(&category.overwrites);
            report.dropped_overwrites += dropped;

            let spec = ChannelSpec {
                name: category.name.clone(),
                kind: ChannelKind::Category,
                position: category.position,
                parent_id: None,
                topic: None,
                nsfw: category.nsfw,
                default_auto_archive_minutes: None,
                overwrites: overwrites.clone(),
            };

            match self.target.create_channel(&spec).await {
                Ok(id) => {
                    index.insert_category(&category.name, CreatedCategory { id, overwrites });
                    report.categories_created.success(&category.name);
                }
                Err(e) => {
                    tracing::warn!("Failed to create category {}: {}", category.name, e);
                    report.categories_created.failure(&category.name, e);
                }
            }
            self.pause().await;
        }

        let mut text_channels: Vec<_> = snapshot.text_channels.iter().collect();
        text_channels.sort_by_key(|channel| channel.position);
        for channel in text_channels {
            let plan = ChannelPlan {
                name: &channel.name,
                kind: ChannelKind::Text,
                position: channel.position,
                nsfw: channel.nsfw,
                category: channel.category.as_deref(),
                permissions_synced: channel.permissions_synced,
                topic: channel.topic.clone(),
                default_auto_archive_minutes: channel.default_auto_archive_minutes,
                overwrites: &channel.overwrites,
            };
            if let Some(id) = self.create_channel(plan, roles, &index, report).await {
                index.insert_text_channel(&channel.name, id);
            }
        }

        let mut voice_channels: Vec<_> = snapshot.voice_channels.iter().collect();
        voice_channels.sort_by_key(|channel| channel.position);
        for channel in voice_channels {
            let plan = ChannelPlan {
                name: &channel.name,
                kind: ChannelKind::Voice,
                position: channel.position,
                nsfw: channel.nsfw,
                category: channel.category.as_deref(),
                permissions_synced: channel.permissions_synced,
                topic: None,
                default_auto_archive_minutes: None,
                overwrites: &channel.overwrites,
            };
            self.create_channel(plan, roles, &index, report).await;
        }

        for thread in &snapshot.threads {
            let Some(parent) = index.text_channel(&thread.channel_name) else {
                report.threads_created.failure(
                    &thread.name,
                    format!("Parent channel {} was not restored", thread.channel_name),
                );
                continue;
            };

            let spec = ThreadSpec {
                name: thread.name.clone(),
                auto_archive_minutes: thread.auto_archive_minutes,
            };

            match self.target.create_thread(parent, &spec).await {
                Ok(_) => report.threads_created.success(&thread.name),
                Err(e) => {
                    tracing::warn!("Failed to create thread {}: {}", thread.name, e);
                    report.threads_created.failure(&thread.name, e);
                }
            }
            self.pause().await;
        }

        index
    }

    /// Step 6: deletes every channel and category, continuing past failures.
    async fn delete_channels(&self, channels: &[LiveChannel], report: &mut RestoreReport) {
        let mut channels: Vec<&LiveChannel> = channels.iter().collect();
        // Children before their categories
        channels.sort_by_key(|channel| (channel.kind == ChannelKind::Category, channel.position));

        for channel in channels {
            match self.target.delete_channel(channel.id).await {
                Ok(()) => report.channels_deleted.success(&channel.name),
                Err(e) => {
                    tracing::warn!("Failed to delete channel {}: {}", channel.name, e);
                    report.channels_deleted.failure(&channel.name, e);
                }
            }
            self.pause().await;
        }
    }

    /// Steps 8 and 9: creates one text or voice channel under its resolved category.
    ///
    /// Permission sync is applied afterwards as an edit copying the category's overwrites.
    async fn create_channel(
        &self,
        plan: ChannelPlan<'_>,
        roles: &RoleIndex,
        index: &ChannelIndex,
        report: &mut RestoreReport,
    ) -> Option<ChannelId> {
        let created = match plan.kind {
            ChannelKind::Voice => &mut report.voice_channels_created,
            _ => &mut report.text_channels_created,
        };
        let (overwrites, dropped) = roles.resolve(plan.overwrites);
        report.dropped_overwrites += dropped;

        let parent = plan.category.and_then(|name| index.category(name));
        if let (Some(category), None) = (plan.category, parent) {
            tracing::debug!(
                "Category {} of channel {} was not restored",
                category,
                plan.name
            );
            report.unresolved_parents.push(plan.name.to_string());
        }

        let spec = ChannelSpec {
            name: plan.name.to_string(),
            kind: plan.kind,
            position: plan.position,
            parent_id: parent.map(|category| category.id),
            topic: plan.topic,
            nsfw: plan.nsfw,
            default_auto_archive_minutes: plan.default_auto_archive_minutes,
            overwrites,
        };

        let id = match self.target.create_channel(&spec).await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Failed to create channel {}: {}", plan.name, e);
                created.failure(plan.name, e);
                self.pause().await;
                return None;
            }
        };
        self.pause().await;

        if let (true, Some(category)) = (plan.permissions_synced, parent) {
            let edit = ChannelEdit {
                nsfw: Some(plan.nsfw),
                overwrites: Some(category.overwrites.clone()),
            };
            if let Err(e) = self.target.edit_channel(id, &edit).await {
                tracing::warn!("Failed to sync permissions of {}: {}", plan.name, e);
                created.failure(format!("{} (permission sync)", plan.name), e);
            }
            self.pause().await;
        }

        created.success(plan.name);
        Some(id)
    }
}
