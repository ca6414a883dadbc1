//! Role snapshot variants.
//!
//! Discord role kinds follow different lifecycle rules on restore, so each kind is its own
//! variant: user roles are recreated, the default role and the premium-subscriber role are
//! edited in place, and bot roles are only touched when their bot is present in the guild.

use serde::{Deserialize, Serialize};

/// Shared shape of roles whose full display state is captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAttributes {
    pub name: String,
    pub hoist: bool,
    pub mentionable: bool,
    /// Position in the role hierarchy (higher = more important).
    pub position: u16,
    pub colour: u32,
    /// Raw permission bits.
    pub permissions: u64,
    /// Role icon image bytes, if the role had one.
    pub icon: Option<Vec<u8>>,
}

/// The guild's `@everyone` role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultRole {
    pub mentionable: bool,
    pub permissions: u64,
}

/// A role managed by a bot integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotRole {
    pub name: String,
    pub hoist: bool,
    pub position: u16,
    pub colour: u32,
    pub permissions: u64,
    /// User id of the bot that owns the role.
    pub bot_id: u64,
}

/// A captured guild role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleSnapshot {
    /// Ordinary role, recreated on restore.
    User(RoleAttributes),
    /// `@everyone`, edited in place.
    Default(DefaultRole),
    /// Server booster role, edited in place when the target has one.
    Premium(RoleAttributes),
    /// Bot-owned role, edited only when the bot is present.
    Bot(BotRole),
}

