//! Name to id resolution for entities recreated during a restore.
//!
//! Discord issues new ids for every recreated role and channel, so snapshots reference
//! roles, categories and channels by name. These indexes are filled as entities are created
//! and consulted by later steps.

use serenity::all::{ChannelId, RoleId};
use std::collections::HashMap;

use crate::model::{
    live::{LiveOverwrite, OverwriteTarget},
    snapshot::PermissionOverwriteSnapshot,
};

/// Platform name of the default role.
pub const DEFAULT_ROLE_NAME: &str = "@everyone";

/// Role names resolvable at the current point of the restore.
#[derive(Debug, Default)]
pub struct RoleIndex {
    by_name: HashMap<String, RoleId>,
}

impl RoleIndex {
    /// Records a role. A later insert under the same name replaces the earlier one.
    pub fn insert(&mut self, name: impl Into<String>, id: RoleId) {
        self.by_name.insert(name.into(), id);
    }

    pub fn get(&self, name: &str) -> Option<RoleId> {
        self.by_name.get(name).copied()
    }

    /// Resolves captured overwrites, leaving out those whose role does not exist.
    ///
    /// # Returns
    /// - `(overwrites, dropped)` - Resolved overwrites and how many were left out
    pub fn resolve(
        &self,
        overwrites: &[PermissionOverwriteSnapshot],
    ) -> (Vec<LiveOverwrite>, usize) {
        let mut resolved = Vec::with_capacity(overwrites.len());
        let mut dropped = 0;

        for overwrite in overwrites {
            match self.get(&overwrite.role_name) {
                Some(id) => resolved.push(LiveOverwrite {
                    target: OverwriteTarget::Role(id),
                    allow: overwrite.allow,
                    deny: overwrite.deny,
                }),
                None => {
                    tracing::debug!(
                        "Dropping overwrite for unknown role {}",
                        overwrite.role_name
                    );
                    dropped += 1;
                }
            }
        }

        (resolved, dropped)
    }
}

/// A recreated category with the overwrites it was created with.
#[derive(Debug, Clone)]
pub struct CreatedCategory {
    pub id: ChannelId,
    pub overwrites: Vec<LiveOverwrite>,
}

/// Channel names resolvable at the current point of the restore.
///
/// When two channels share a name the first one created wins, which is the one with the
/// lowest captured position.
#[derive(Debug, Default)]
pub struct ChannelIndex {
    categories: HashMap<String, CreatedCategory>,
    text_channels: HashMap<String, ChannelId>,
}

impl ChannelIndex {
    pub fn insert_category(&mut self, name: &str, category: CreatedCategory) {
        self.categories.entry(name.to_string()).or_insert(category);
    }

    pub fn insert_text_channel(&mut self, name: &str, id: ChannelId) {
        self.text_channels.entry(name.to_string()).or_insert(id);
    }

    pub fn category(&self, name: &str) -> Option<&CreatedCategory> {
        self.categories.get(name)
    }

    pub fn text_channel(&self, name: &str) -> Option<ChannelId> {
        self.text_channels.get(name).copied()
    }
}
