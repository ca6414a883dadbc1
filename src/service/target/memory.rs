//! In-memory guild for service tests.
//!
//! Emulates the platform rules the snapshot services depend on: `@everyone` and managed
//! roles cannot be deleted, new roles land at position 1 and push the others up, every
//! created entity gets a fresh id, and channels can only reference existing roles and
//! categories. Every mutating call is appended to a call log by entity name so tests can
//! assert on ordering.

use chrono::{TimeZone, Utc};
use serenity::all::{ChannelId, GuildId, MessageId, Permissions, RoleId, UserId};
use serenity::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use crate::{
    error::target::TargetError,
    model::live::{
        ChannelEdit, ChannelKind, ChannelSpec, EmbedMessage, LiveChannel, LiveMember,
        LiveOverwrite, LivePin, LiveRole, LiveThread, OverwriteTarget, RoleSpec, ThreadSpec,
    },
};

use super::GuildTarget;

pub const ACTING_BOT_ID: u64 = 9000;
pub const ACTING_ROLE_ID: u64 = 9001;

/// A mutating call, identified by entity names.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    DeleteRole(String),
    CreateRole(String),
    EditRole(String),
    ReorderRoles(Vec<(String, u16)>),
    DeleteChannel(String),
    CreateChannel {
        name: String,
        parent: Option<String>,
        /// Names of the roles the overwrites target.
        overwrite_roles: Vec<String>,
    },
    EditChannel(String),
    CreateThread { name: String, parent: String },
    SendEmbed { channel: String, title: String },
    PinMessage { channel: String },
    SendText { channel: String, content: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub title: String,
    pub description: Option<String>,
    pub files: Vec<(String, Vec<u8>)>,
    pub pinned: bool,
}

#[derive(Debug)]
pub struct MemoryState {
    pub name: String,
    pub roles: Vec<LiveRole>,
    pub channels: Vec<LiveChannel>,
    pub threads: Vec<LiveThread>,
    pub pins: HashMap<ChannelId, Vec<LivePin>>,
    pub downloads: HashMap<String, Vec<u8>>,
    pub acting: LiveMember,
    pub members: HashSet<UserId>,
    pub messages: Vec<SentMessage>,
    pub calls: Vec<Call>,
    /// Entity names whose mutations are rejected.
    pub failing: HashSet<String>,
    /// Channels whose pins cannot be read.
    pub unreadable_pins: HashSet<ChannelId>,
    pub fail_role_reads: bool,
    next_id: u64,
}

impl MemoryState {
    fn issue_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn check(&self, name: &str) -> Result<(), TargetError> {
        if self.failing.contains(name) {
            return Err(TargetError::Rejected(format!("Injected failure for {}", name)));
        }
        Ok(())
    }

    fn role_name(&self, id: RoleId) -> Option<String> {
        self.roles.iter().find(|r| r.id == id).map(|r| r.name.clone())
    }

    fn channel_name(&self, id: ChannelId) -> String {
        self.channels
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Role names ordered from lowest to highest position, excluding `@everyone`.
    pub fn role_order(&self) -> Vec<String> {
        let mut roles: Vec<_> = self.roles.iter().filter(|r| !r.is_default).collect();
        roles.sort_by_key(|r| (r.position, r.id));
        roles.into_iter().map(|r| r.name.clone()).collect()
    }

    pub fn role_named(&self, name: &str) -> Option<&LiveRole> {
        self.roles.iter().find(|r| r.name == name)
    }

    pub fn channel_named(&self, name: &str) -> Option<&LiveChannel> {
        self.channels.iter().find(|c| c.name == name)
    }
}

pub struct MemoryGuild {
    guild_id: GuildId,
    state: Mutex<MemoryState>,
}

impl MemoryGuild {
    /// A guild holding only `@everyone` and the acting bot's administrator role on top.
    pub fn new(guild_id: u64, name: &str) -> Self {
        let mut acting_role = bot_role(
            ACTING_ROLE_ID,
            "Guildvault",
            ACTING_BOT_ID,
            1,
        );
        acting_role.permissions = Permissions::ADMINISTRATOR.bits();

        let mut members = HashSet::new();
        members.insert(UserId::new(ACTING_BOT_ID));

        Self {
            guild_id: GuildId::new(guild_id),
            state: Mutex::new(MemoryState {
                name: name.to_string(),
                roles: vec![default_role(guild_id), acting_role],
                channels: Vec::new(),
                threads: Vec::new(),
                pins: HashMap::new(),
                downloads: HashMap::new(),
                acting: LiveMember {
                    user_id: UserId::new(ACTING_BOT_ID),
                    role_ids: vec![RoleId::new(ACTING_ROLE_ID)],
                },
                members,
                messages: Vec::new(),
                calls: Vec::new(),
                failing: HashSet::new(),
                unreadable_pins: HashSet::new(),
                fail_role_reads: false,
                next_id: 10_000,
            }),
        }
    }

    pub fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    /// Adds a role below the acting role.
    pub fn add_role(&self, role: LiveRole) {
        let mut state = self.state();
        let top = state.roles.iter().map(|r| r.position).max().unwrap_or(0);
        if let Some(acting) = state
            .roles
            .iter_mut()
            .find(|r| r.id == RoleId::new(ACTING_ROLE_ID))
        {
            acting.position = acting.position.max(top.max(role.position) + 1);
        }
        state.roles.push(role);
    }

    pub fn add_channel(&self, channel: LiveChannel) {
        self.state().channels.push(channel);
    }

    pub fn add_thread(&self, thread: LiveThread) {
        self.state().threads.push(thread);
    }

    pub fn add_pin(&self, channel: u64, pin: LivePin) {
        self.state()
            .pins
            .entry(ChannelId::new(channel))
            .or_default()
            .push(pin);
    }

    pub fn add_download(&self, url: &str, bytes: Vec<u8>) {
        self.state().downloads.insert(url.to_string(), bytes);
    }

    pub fn add_member(&self, user: u64) {
        self.state().members.insert(UserId::new(user));
    }

    /// Makes every mutation of the named entity fail.
    pub fn fail_on(&self, name: &str) {
        self.state().failing.insert(name.to_string());
    }
}

#[async_trait]
impl GuildTarget for MemoryGuild {
    fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    async fn guild_name(&self) -> Result<String, TargetError> {
        Ok(self.state().name.clone())
    }

    async fn roles(&self) -> Result<Vec<LiveRole>, TargetError> {
        let state = self.state();
        if state.fail_role_reads {
            return Err(TargetError::Rejected("Roles unavailable".to_string()));
        }
        Ok(state.roles.clone())
    }

    async fn channels(&self) -> Result<Vec<LiveChannel>, TargetError> {
        Ok(self.state().channels.clone())
    }

    async fn active_threads(&self) -> Result<Vec<LiveThread>, TargetError> {
        Ok(self.state().threads.clone())
    }

    async fn pins(&self, channel: ChannelId) -> Result<Vec<LivePin>, TargetError> {
        let state = self.state();
        if state.unreadable_pins.contains(&channel) {
            return Err(TargetError::Rejected("Missing access".to_string()));
        }
        Ok(state.pins.get(&channel).cloned().unwrap_or_default())
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, TargetError> {
        self.state()
            .downloads
            .get(url)
            .cloned()
            .ok_or_else(|| TargetError::Rejected(format!("404 for {}", url)))
    }

    async fn acting_member(&self) -> Result<LiveMember, TargetError> {
        Ok(self.state().acting.clone())
    }

    async fn member_present(&self, user: UserId) -> Result<bool, TargetError> {
        Ok(self.state().members.contains(&user))
    }

    async fn delete_role(&self, role: RoleId) -> Result<(), TargetError> {
        let mut state = self.state();
        let Some(index) = state.roles.iter().position(|r| r.id == role) else {
            return Err(TargetError::Rejected("Unknown role".to_string()));
        };
        let name = state.roles[index].name.clone();
        state.calls.push(Call::DeleteRole(name.clone()));
        state.check(&name)?;
        if state.roles[index].is_default || state.roles[index].managed {
            return Err(TargetError::Rejected(format!("Cannot delete {}", name)));
        }
        state.roles.remove(index);
        Ok(())
    }

    async fn create_role(&self, spec: &RoleSpec) -> Result<RoleId, TargetError> {
        let mut state = self.state();
        let name = spec.name.clone().unwrap_or_else(|| "new role".to_string());
        state.calls.push(Call::CreateRole(name.clone()));
        state.check(&name)?;

        for role in state.roles.iter_mut().filter(|r| !r.is_default) {
            role.position += 1;
        }
        let id = RoleId::new(state.issue_id());
        state.roles.push(LiveRole {
            id,
            name,
            position: 1,
            colour: spec.colour.unwrap_or(0),
            hoist: spec.hoist.unwrap_or(false),
            mentionable: spec.mentionable.unwrap_or(false),
            permissions: spec.permissions.unwrap_or(0),
            managed: false,
            bot_id: None,
            premium_subscriber: false,
            is_default: false,
            icon_url: matches!(spec.icon, Some(Some(_)))
                .then(|| format!("https://cdn.example/role-icons/{}.png", id)),
        });
        Ok(id)
    }

    async fn edit_role(&self, role: RoleId, spec: &RoleSpec) -> Result<(), TargetError> {
        let mut state = self.state();
        let Some(current) = state.role_name(role) else {
            return Err(TargetError::Rejected("Unknown role".to_string()));
        };
        state
            .calls
            .push(Call::EditRole(spec.name.clone().unwrap_or(current.clone())));
        state.check(&current)?;

        let Some(target) = state.roles.iter_mut().find(|r| r.id == role) else {
            return Err(TargetError::Rejected("Unknown role".to_string()));
        };
        if let Some(name) = &spec.name {
            target.name = name.clone();
        }
        if let Some(colour) = spec.colour {
            target.colour = colour;
        }
        if let Some(hoist) = spec.hoist {
            target.hoist = hoist;
        }
        if let Some(mentionable) = spec.mentionable {
            target.mentionable = mentionable;
        }
        if let Some(permissions) = spec.permissions {
            target.permissions = permissions;
        }
        if let Some(icon) = &spec.icon {
            target.icon_url = icon
                .as_ref()
                .map(|_| format!("https://cdn.example/role-icons/{}.png", role));
        }
        Ok(())
    }

    async fn reorder_roles(&self, positions: &[(RoleId, u16)]) -> Result<(), TargetError> {
        let mut state = self.state();
        let mut named = Vec::with_capacity(positions.len());
        for (id, position) in positions {
            let name = state
                .role_name(*id)
                .ok_or_else(|| TargetError::Rejected(format!("Unknown role {}", id)))?;
            named.push((name, *position));
        }
        state.calls.push(Call::ReorderRoles(named));

        for (id, position) in positions {
            if let Some(role) = state.roles.iter_mut().find(|r| r.id == *id) {
                role.position = *position;
            }
        }
        Ok(())
    }

    async fn delete_channel(&self, channel: ChannelId) -> Result<(), TargetError> {
        let mut state = self.state();
        let Some(index) = state.channels.iter().position(|c| c.id == channel) else {
            return Err(TargetError::Rejected("Unknown channel".to_string()));
        };
        let name = state.channels[index].name.clone();
        state.calls.push(Call::DeleteChannel(name.clone()));
        state.check(&name)?;
        state.channels.remove(index);
        state.threads.retain(|t| t.parent_id != Some(channel));
        Ok(())
    }

    async fn create_channel(&self, spec: &ChannelSpec) -> Result<ChannelId, TargetError> {
        let mut state = self.state();

        let parent = match spec.parent_id {
            Some(parent_id) => {
                let parent = state
                    .channels
                    .iter()
                    .find(|c| c.id == parent_id && c.kind == ChannelKind::Category)
                    .ok_or_else(|| TargetError::Rejected("Unknown category".to_string()))?;
                Some(parent.name.clone())
            }
            None => None,
        };
        let mut overwrite_roles = Vec::new();
        for overwrite in &spec.overwrites {
            if let OverwriteTarget::Role(id) = overwrite.target {
                let name = state
                    .role_name(id)
                    .ok_or_else(|| TargetError::Rejected(format!("Unknown role {}", id)))?;
                overwrite_roles.push(name);
            }
        }

        state.calls.push(Call::CreateChannel {
            name: spec.name.clone(),
            parent,
            overwrite_roles,
        });
        state.check(&spec.name)?;

        let id = ChannelId::new(state.issue_id());
        state.channels.push(LiveChannel {
            id,
            name: spec.name.clone(),
            kind: spec.kind,
            position: spec.position,
            parent_id: spec.parent_id,
            topic: spec.topic.clone(),
            nsfw: spec.nsfw,
            default_auto_archive_minutes: spec.default_auto_archive_minutes,
            overwrites: spec.overwrites.clone(),
        });
        Ok(id)
    }

    async fn edit_channel(
        &self,
        channel: ChannelId,
        edit: &ChannelEdit,
    ) -> Result<(), TargetError> {
        let mut state = self.state();
        let name = state.channel_name(channel);
        state.calls.push(Call::EditChannel(name.clone()));
        state.check(&name)?;

        let Some(target) = state.channels.iter_mut().find(|c| c.id == channel) else {
            return Err(TargetError::Rejected("Unknown channel".to_string()));
        };
        if let Some(nsfw) = edit.nsfw {
            target.nsfw = nsfw;
        }
        if let Some(overwrites) = &edit.overwrites {
            target.overwrites = overwrites.clone();
        }
        Ok(())
    }

    async fn create_thread(
        &self,
        channel: ChannelId,
        spec: &ThreadSpec,
    ) -> Result<ChannelId, TargetError> {
        let mut state = self.state();
        let parent = state
            .channels
            .iter()
            .find(|c| c.id == channel && c.kind == ChannelKind::Text)
            .map(|c| c.name.clone())
            .ok_or_else(|| TargetError::Rejected("Unknown text channel".to_string()))?;
        state.calls.push(Call::CreateThread {
            name: spec.name.clone(),
            parent,
        });
        state.check(&spec.name)?;

        let id = ChannelId::new(state.issue_id());
        state.threads.push(LiveThread {
            id,
            name: spec.name.clone(),
            parent_id: Some(channel),
            auto_archive_minutes: spec.auto_archive_minutes,
        });
        Ok(id)
    }

    async fn send_embed(
        &self,
        channel: ChannelId,
        message: &EmbedMessage,
    ) -> Result<MessageId, TargetError> {
        let mut state = self.state();
        let name = state.channel_name(channel);
        state.calls.push(Call::SendEmbed {
            channel: name.clone(),
            title: message.title.clone(),
        });
        state.check(&message.title)?;

        let id = MessageId::new(state.issue_id());
        state.messages.push(SentMessage {
            id,
            channel_id: channel,
            title: message.title.clone(),
            description: message.description.clone(),
            files: message.files.clone(),
            pinned: false,
        });
        Ok(id)
    }

    async fn pin_message(
        &self,
        channel: ChannelId,
        message: MessageId,
    ) -> Result<(), TargetError> {
        let mut state = self.state();
        let name = state.channel_name(channel);
        state.calls.push(Call::PinMessage {
            channel: name.clone(),
        });
        state.check(&name)?;

        let Some(sent) = state
            .messages
            .iter_mut()
            .find(|m| m.id == message && m.channel_id == channel)
        else {
            return Err(TargetError::Rejected("Unknown message".to_string()));
        };
        sent.pinned = true;
        Ok(())
    }

    async fn send_text(
        &self,
        channel: ChannelId,
        content: &str,
    ) -> Result<MessageId, TargetError> {
        let mut state = self.state();
        let name = state.channel_name(channel);
        state.calls.push(Call::SendText {
            channel: name,
            content: content.to_string(),
        });

        Ok(MessageId::new(state.issue_id()))
    }
}

pub fn default_role(guild_id: u64) -> LiveRole {
    LiveRole {
        id: RoleId::new(guild_id),
        name: "@everyone".to_string(),
        position: 0,
        colour: 0,
        hoist: false,
        mentionable: false,
        permissions: 0,
        managed: false,
        bot_id: None,
        premium_subscriber: false,
        is_default: true,
        icon_url: None,
    }
}

pub fn user_role(id: u64, name: &str, position: u16) -> LiveRole {
    LiveRole {
        id: RoleId::new(id),
        name: name.to_string(),
        position,
        colour: 0,
        hoist: false,
        mentionable: false,
        permissions: 0,
        managed: false,
        bot_id: None,
        premium_subscriber: false,
        is_default: false,
        icon_url: None,
    }
}

pub fn premium_role(id: u64, name: &str, position: u16) -> LiveRole {
    LiveRole {
        managed: true,
        premium_subscriber: true,
        ..user_role(id, name, position)
    }
}

pub fn bot_role(id: u64, name: &str, bot_id: u64, position: u16) -> LiveRole {
    LiveRole {
        managed: true,
        bot_id: Some(UserId::new(bot_id)),
        ..user_role(id, name, position)
    }
}

pub fn channel(
    id: u64,
    name: &str,
    kind: ChannelKind,
    position: u16,
    parent: Option<u64>,
) -> LiveChannel {
    LiveChannel {
        id: ChannelId::new(id),
        name: name.to_string(),
        kind,
        position,
        parent_id: parent.map(ChannelId::new),
        topic: None,
        nsfw: false,
        default_auto_archive_minutes: None,
        overwrites: Vec::new(),
    }
}

pub fn role_overwrite(role: u64, allow: u64, deny: u64) -> LiveOverwrite {
    LiveOverwrite {
        target: OverwriteTarget::Role(RoleId::new(role)),
        allow,
        deny,
    }
}

pub fn pin(id: u64, author: &str, content: &str) -> LivePin {
    LivePin {
        id: MessageId::new(id),
        author: author.to_string(),
        author_is_bot: false,
        posted_at: Utc.with_ymd_and_hms(2024, 3, 15, 12, 30, 0).unwrap(),
        content: content.to_string(),
        attachments: Vec::new(),
    }
}
