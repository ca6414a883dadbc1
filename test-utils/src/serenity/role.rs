//! Test factories for Serenity Role objects.
//!
//! Discord distinguishes role kinds through the `managed` flag and the `tags` object, so
//! each kind the bot classifies has its own factory.

use serde_json::{json, Value};
use serenity::all::Role;

fn role_json(role_id: u64, name: &str, color: u32, position: i16) -> Value {
    json!({
        "id": role_id.to_string(),
        "name": name,
        "color": color,
        "hoist": false,
        "icon": null,
        "unicode_emoji": null,
        "position": position,
        "permissions": "0",
        "managed": false,
        "mentionable": false,
    })
}

fn build(value: Value) -> Role {
    serde_json::from_value(value).expect("Failed to create test role - invalid JSON structure")
}

/// Creates an ordinary Serenity Role.
///
/// Not hoisted, not managed, not mentionable, with zero permissions.
///
/// # Arguments
/// - `role_id` - Discord role ID (snowflake)
/// - `name` - Role name
/// - `color` - Role color as RGB
/// - `position` - Role position in the hierarchy (higher = more important)
///
/// # Panics
/// - If the JSON cannot be deserialized into a Role (indicates invalid test data)
pub fn create_test_role(role_id: u64, name: &str, color: u32, position: i16) -> Role {
    build(role_json(role_id, name, color, position))
}

/// Creates the `@everyone` role, whose id equals the guild id.
pub fn create_test_default_role(guild_id: u64, permissions: u64) -> Role {
    let mut value = role_json(guild_id, "@everyone", 0, 0);
    value["permissions"] = json!(permissions.to_string());
    build(value)
}

/// Creates the managed server booster role.
pub fn create_test_premium_role(role_id: u64, name: &str, position: i16) -> Role {
    let mut value = role_json(role_id, name, 0xF47FFF, position);
    value["managed"] = json!(true);
    value["tags"] = json!({ "premium_subscriber": null });
    build(value)
}

/// Creates the managed role of a bot integration.
pub fn create_test_bot_role(
    role_id: u64,
    name: &str,
    bot_id: u64,
    position: i16,
    permissions: u64,
) -> Role {
    let mut value = role_json(role_id, name, 0, position);
    value["managed"] = json!(true);
    value["permissions"] = json!(permissions.to_string());
    value["tags"] = json!({ "bot_id": bot_id.to_string() });
    build(value)
}
